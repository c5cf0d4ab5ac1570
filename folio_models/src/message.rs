use chrono::{DateTime, Utc};

use crate::{contact::ContactMessage, macros::id};

id!(MessageId);

/// A contact message that has been accepted by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMessage {
    pub id: MessageId,
    pub created_at: DateTime<Utc>,
    pub message: ContactMessage,
}
