use std::{net::IpAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use folio_core_contact_contracts::ContactFeatureService;
use tokio::net::TcpListener;
use tracing::info;
use url::Url;

mod errors;
mod middlewares;
mod routes;

#[derive(Debug, Clone)]
pub struct RestServer<Contact> {
    config: RestServerConfig,
    contact: Contact,
}

#[derive(Debug, Clone)]
pub struct RestServerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Origins of the sites that may submit the contact form from a browser
    pub allowed_origins: Arc<[Url]>,
}

impl<Contact> RestServer<Contact>
where
    Contact: ContactFeatureService,
{
    pub fn new(config: RestServerConfig, contact: Contact) -> Self {
        Self { config, contact }
    }

    /// Binds to the configured address and serves requests until a shutdown
    /// signal is received.
    pub async fn serve(self) -> anyhow::Result<()> {
        let (host, port) = (self.config.host, self.config.port);
        let listener = TcpListener::bind((host, port))
            .await
            .with_context(|| format!("Failed to bind to {host}:{port}"))?;
        info!("Starting http server on {host}:{port}");
        self.serve_on(listener).await
    }

    pub async fn serve_on(self, listener: TcpListener) -> anyhow::Result<()> {
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("Failed to start HTTP server")
    }

    fn router(self) -> Router<()> {
        let router = Router::new().merge(routes::contact::router(self.contact.into()));
        let router = middlewares::panic_handler::add(router);
        let router = middlewares::trace::add(router);
        let router = middlewares::request_id::add(router);
        middlewares::cors::add(router, &self.config.allowed_origins)
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received shutdown signal"),
        Err(err) => tracing::error!("Failed to listen for shutdown signal: {err}"),
    }
}
