use anyhow::Context;
use folio_core_contact_contracts::{ContactCreateMessageError, ContactFeatureService};
use folio_models::{
    contact::{validate_input, ContactMessageForm},
    message::StoredMessage,
};
use folio_persistence_contracts::{MessageRepoCreateError, MessageRepository};
use folio_shared_contracts::{id::IdService, time::TimeService};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct ContactFeatureServiceImpl<Id, Time, MessageRepo> {
    id: Id,
    time: Time,
    message_repo: MessageRepo,
}

impl<Id, Time, MessageRepo> ContactFeatureServiceImpl<Id, Time, MessageRepo> {
    pub fn new(id: Id, time: Time, message_repo: MessageRepo) -> Self {
        Self {
            id,
            time,
            message_repo,
        }
    }
}

impl<Id, Time, MessageRepo> ContactFeatureService
    for ContactFeatureServiceImpl<Id, Time, MessageRepo>
where
    Id: IdService,
    Time: TimeService,
    MessageRepo: MessageRepository,
{
    #[tracing::instrument(skip_all)]
    async fn create_message(
        &self,
        form: ContactMessageForm,
    ) -> Result<StoredMessage, ContactCreateMessageError> {
        let message = validate_input(&form).map_err(|errors| {
            debug!(%errors, "rejected invalid contact message");
            ContactCreateMessageError::Invalid(errors)
        })?;

        let message = StoredMessage {
            id: self.id.message_id(),
            created_at: self.time.now(),
            message,
        };

        self.message_repo
            .create(&message)
            .await
            .map_err(|err| match err {
                MessageRepoCreateError::Unavailable => ContactCreateMessageError::Unavailable,
                MessageRepoCreateError::Other(err) => err.context("Failed to store message").into(),
            })?;

        info!(
            id = %message.id,
            name = message.message.name.as_str(),
            email = message.message.email.as_str(),
            "accepted contact message"
        );

        Ok(message)
    }
}
