//! Message store that keeps everything in process memory.
//!
//! Messages are lost on restart. Intended for a low traffic contact form
//! where every message is also written to the log.

use std::sync::Arc;

use folio_models::message::StoredMessage;
use folio_persistence_contracts::{MessageRepoCreateError, MessageRepository};
use tokio::sync::RwLock;
use tracing::warn;

#[derive(Debug, Clone, Default)]
pub struct MemoryMessageRepository {
    messages: Arc<RwLock<Vec<StoredMessage>>>,
    capacity: Option<usize>,
}

impl MemoryMessageRepository {
    /// Creates an empty store which accepts at most `capacity` messages.
    ///
    /// `None` means unbounded.
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            messages: Default::default(),
            capacity,
        }
    }
}

impl MessageRepository for MemoryMessageRepository {
    async fn create(&self, message: &StoredMessage) -> Result<(), MessageRepoCreateError> {
        let mut messages = self.messages.write().await;
        if self.capacity.is_some_and(|capacity| messages.len() >= capacity) {
            warn!(capacity = ?self.capacity, "message store is full");
            return Err(MessageRepoCreateError::Unavailable);
        }
        messages.push(message.clone());
        Ok(())
    }

    async fn list(&self) -> anyhow::Result<Vec<StoredMessage>> {
        Ok(self.messages.read().await.clone())
    }

    async fn ping(&self) -> anyhow::Result<()> {
        let len = self.messages.read().await.len();
        match self.capacity {
            Some(capacity) if len >= capacity => {
                anyhow::bail!("message store is full ({len}/{capacity})")
            }
            _ => Ok(()),
        }
    }
}
