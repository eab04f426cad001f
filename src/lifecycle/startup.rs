//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the status client and collector from validated configuration
//! - Register the collector with the exporter registry
//! - Bind the listener and begin serving scrapes
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Subsystems initialize in order, not concurrently
//! - The listener binds last (scrapes only when the registry is ready)

use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use crate::collector::{FetchError, HealthzCollector, StatusClient};
use crate::config::ExporterConfig;
use crate::exporter::{HttpServer, MetricsRegistry, RegistryError};
use crate::lifecycle::Shutdown;

/// Error raised while bringing the exporter up.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("failed to build status client: {0}")]
    Client(#[from] FetchError),

    #[error("failed to register collector: {0}")]
    Registry(#[from] RegistryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Build the registry described by `config`.
pub fn build_registry(config: &ExporterConfig) -> Result<MetricsRegistry, StartupError> {
    let client = StatusClient::new(Duration::from_secs(config.http.timeout_secs))?;
    let collector = HealthzCollector::with_client(
        &config.collector.system,
        &config.collector.endpoint,
        &config.servers,
        client,
    );

    for server in collector.servers() {
        tracing::info!(server_id = %server.id, url = %server.status_url, "Monitoring server");
    }

    let mut registry = MetricsRegistry::new();
    registry.register(Arc::new(collector))?;
    Ok(registry)
}

/// Bring the exporter up and serve until `shutdown` fires.
pub async fn run(config: ExporterConfig, shutdown: &Shutdown) -> Result<(), StartupError> {
    let registry = Arc::new(build_registry(&config)?);

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        path = %config.listener.metrics_path,
        "Listening for scrapes"
    );

    let server = HttpServer::new(&config.listener, registry);
    server.run(listener, shutdown.subscribe()).await?;
    Ok(())
}
