use folio_api_rest::{RestServer, RestServerConfig};
use folio_config::Config;
use folio_core_contact_impl::ContactFeatureServiceImpl;
use folio_persistence_contracts::MessageRepository;
use folio_persistence_memory::MemoryMessageRepository;
use folio_shared_impl::{id::IdServiceImpl, time::TimeServiceImpl};
use tracing::info;

pub async fn serve(config: Config) -> anyhow::Result<()> {
    info!("Initializing message store");
    let message_repo = MemoryMessageRepository::new(config.contact.max_messages);
    message_repo.ping().await?;

    let contact = ContactFeatureServiceImpl::new(IdServiceImpl, TimeServiceImpl, message_repo);
    let server = RestServer::new(
        RestServerConfig {
            host: config.http.host,
            port: config.http.port,
            allowed_origins: config.http.allowed_origins.into(),
        },
        contact,
    );
    server.serve().await
}
