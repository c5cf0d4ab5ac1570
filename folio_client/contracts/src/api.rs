use std::future::Future;

use folio_api_contracts::messages::{ApiError, ApiMessageCreated};
use folio_models::contact::ContactMessage;
use thiserror::Error;

/// Transport used by the contact form to reach the server.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait MessageApiService: Send + Sync + 'static {
    /// Submit a validated message. Issues exactly one request.
    fn create_message(
        &self,
        message: &ContactMessage,
    ) -> impl Future<Output = Result<ApiMessageCreated, CreateMessageError>> + Send;
}

#[derive(Debug, Error)]
pub enum CreateMessageError {
    /// The server refused the message and explained why.
    #[error("The server rejected the message: {}", .0.message)]
    Rejected(ApiError),
    /// Transport failures, server faults and unexpected responses.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockMessageApiService {
    pub fn with_create_message(
        mut self,
        message: ContactMessage,
        result: Result<ApiMessageCreated, CreateMessageError>,
    ) -> Self {
        self.expect_create_message()
            .once()
            .with(mockall::predicate::eq(message))
            .return_once(|_| Box::pin(std::future::ready(result)));
        self
    }
}
