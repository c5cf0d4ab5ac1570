use anyhow::{bail, Context};
use clap::Args;
use folio_client_contracts::{
    notification::{Notification, NotificationKind, NotificationService},
    state::SubmissionState,
};
use folio_client_impl::{
    api::{MessageApiServiceConfig, MessageApiServiceImpl},
    form::ContactForm,
    http::HttpClient,
};
use folio_config::Config;
use folio_models::contact::ContactMessageForm;
use url::Url;

#[derive(Debug, Args)]
pub struct SendArgs {
    /// Name of the sender
    #[arg(long)]
    pub name: String,
    /// Email address replies should go to
    #[arg(long)]
    pub email: String,
    /// The message itself
    #[arg(long)]
    pub message: String,
    /// URL of the server, overrides `client.base_url` from the config
    #[arg(long)]
    pub base_url: Option<Url>,
}

impl SendArgs {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        let base_url = self.base_url.unwrap_or(config.client.base_url);
        let input = ContactMessageForm {
            name: self.name,
            email: self.email,
            message: self.message,
        };

        match submit(&base_url, input).await? {
            SubmissionState::Success(created) => {
                println!("{}", created.id);
                Ok(())
            }
            SubmissionState::Error(err) => {
                Err(anyhow::Error::new(err).context("Failed to submit contact message"))
            }
            state => bail!("Submission did not complete: {state:?}"),
        }
    }
}

/// Submits a single message and waits for the outcome.
async fn submit(base_url: &Url, input: ContactMessageForm) -> anyhow::Result<SubmissionState> {
    let api = MessageApiServiceImpl::new(MessageApiServiceConfig::new(base_url)?, HttpClient::new()?);
    let form = ContactForm::new(api, ConsoleNotificationService);

    if let Some(request) = form.submit(input) {
        request.await.context("Submission task failed")?;
    }

    Ok(form.state())
}

struct ConsoleNotificationService;

impl NotificationService for ConsoleNotificationService {
    fn notify(&self, notification: Notification) {
        let Notification {
            kind,
            title,
            description,
        } = notification;
        match kind {
            NotificationKind::Success => println!("{title} {description}"),
            NotificationKind::Error => eprintln!("{title}: {description}"),
        }
    }
}
