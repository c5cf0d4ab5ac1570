use std::sync::Arc;

use anyhow::{anyhow, Context};
use folio_api_contracts::messages::{
    parse_error_response, parse_success_response, ApiCreateMessageRequest, ApiMessageCreated,
    CREATE_MESSAGE,
};
use folio_client_contracts::api::{CreateMessageError, MessageApiService};
use folio_models::contact::ContactMessage;
use tracing::debug;
use url::Url;

use crate::http::HttpClient;

#[derive(Debug, Clone)]
pub struct MessageApiServiceImpl {
    config: MessageApiServiceConfig,
    http: HttpClient,
}

#[derive(Debug, Clone)]
pub struct MessageApiServiceConfig {
    create_message_endpoint: Arc<Url>,
}

impl MessageApiServiceConfig {
    /// `base_url` is the origin of the server, the endpoint paths are
    /// absolute.
    pub fn new(base_url: &Url) -> anyhow::Result<Self> {
        let create_message_endpoint = base_url
            .join(CREATE_MESSAGE.path)
            .context("Failed to build create message URL")?;
        Ok(Self {
            create_message_endpoint: create_message_endpoint.into(),
        })
    }
}

impl MessageApiServiceImpl {
    pub fn new(config: MessageApiServiceConfig, http: HttpClient) -> Self {
        Self { config, http }
    }
}

impl MessageApiService for MessageApiServiceImpl {
    #[tracing::instrument(skip_all, fields(url = %self.config.create_message_endpoint))]
    async fn create_message(
        &self,
        message: &ContactMessage,
    ) -> Result<ApiMessageCreated, CreateMessageError> {
        let response = self
            .http
            .request(
                CREATE_MESSAGE.method.clone(),
                (*self.config.create_message_endpoint).clone(),
            )
            .json(&ApiCreateMessageRequest::from(message))
            .send()
            .await
            .context("Failed to send create message request")?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .context("Failed to read create message response")?;
        debug!(%status, "received create message response");

        if status.is_success() {
            return parse_success_response(&body)
                .context("Failed to deserialize create message response")
                .map_err(Into::into);
        }

        if status.is_client_error() {
            if let Some(err) = parse_error_response(&body) {
                return Err(CreateMessageError::Rejected(err));
            }
        }

        Err(anyhow!("Create message request failed with status {status}").into())
    }
}
