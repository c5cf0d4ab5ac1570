use folio_models::message::MessageId;
use folio_shared_contracts::id::IdService;
use uuid::Uuid;

/// Generates UUIDv7 message ids, which sort by creation time.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdServiceImpl;

impl IdService for IdServiceImpl {
    #[tracing::instrument(level = "trace", skip(self))]
    fn message_id(&self) -> MessageId {
        Uuid::now_v7().into()
    }
}
