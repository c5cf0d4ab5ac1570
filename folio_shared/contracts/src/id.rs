use folio_models::message::MessageId;

/// Source of identifiers for accepted messages.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait IdService: Send + Sync + 'static {
    /// Returns a new identifier. Identifiers are unique and roughly ordered
    /// by the time they were generated.
    fn message_id(&self) -> MessageId;
}

#[cfg(feature = "mock")]
impl MockIdService {
    pub fn with_message_id(mut self, id: MessageId) -> Self {
        self.expect_message_id().once().return_const(id);
        self
    }
}
