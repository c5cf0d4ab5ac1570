use std::future::Future;

use folio_models::message::StoredMessage;
use thiserror::Error;

/// Storage for accepted contact messages.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait MessageRepository: Send + Sync + 'static {
    /// Stores a new message.
    ///
    /// Messages are never deduplicated: storing the same content twice
    /// results in two messages.
    fn create(
        &self,
        message: &StoredMessage,
    ) -> impl Future<Output = Result<(), MessageRepoCreateError>> + Send;

    /// Returns all stored messages, oldest first.
    fn list(&self) -> impl Future<Output = anyhow::Result<Vec<StoredMessage>>> + Send;

    /// Verify that the store is able to accept messages.
    fn ping(&self) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[derive(Debug, Error)]
pub enum MessageRepoCreateError {
    #[error("The message store is currently unavailable.")]
    Unavailable,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockMessageRepository {
    pub fn with_create(
        mut self,
        message: StoredMessage,
        result: Result<(), MessageRepoCreateError>,
    ) -> Self {
        self.expect_create()
            .once()
            .with(mockall::predicate::eq(message))
            .return_once(|_| Box::pin(std::future::ready(result)));
        self
    }
}
