use std::future::Future;

use folio_models::{
    contact::{ContactMessageForm, ValidationErrors},
    message::StoredMessage,
};
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFeatureService: Send + Sync + 'static {
    /// Validate and accept a message submitted through the contact form.
    ///
    /// The validation performed here is authoritative, regardless of any
    /// checks the client already did.
    fn create_message(
        &self,
        form: ContactMessageForm,
    ) -> impl Future<Output = Result<StoredMessage, ContactCreateMessageError>> + Send;
}

#[derive(Debug, Error)]
pub enum ContactCreateMessageError {
    #[error("Invalid contact message: {0}")]
    Invalid(ValidationErrors),
    #[error("The message store is unavailable.")]
    Unavailable,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockContactFeatureService {
    pub fn with_create_message(
        mut self,
        form: ContactMessageForm,
        result: Result<StoredMessage, ContactCreateMessageError>,
    ) -> Self {
        self.expect_create_message()
            .once()
            .with(mockall::predicate::eq(form))
            .return_once(|_| Box::pin(std::future::ready(result)));
        self
    }
}
