//! HTTP scrape endpoint.
//!
//! # Responsibilities
//! - Create Axum Router serving the metrics path and a landing page
//! - Wire up middleware (tracing, scrape timeout)
//! - Bind server to listener and shut down gracefully
//!
//! A scrape that exceeds the timeout has its response future dropped, which
//! abandons any status fetches still in flight.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ListenerConfig;
use crate::exporter::registry::MetricsRegistry;

/// Content type of the Prometheus text exposition format.
pub const TEXT_FORMAT: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<MetricsRegistry>,
    pub metrics_path: String,
}

/// HTTP server exposing the registry.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server serving `registry`.
    pub fn new(config: &ListenerConfig, registry: Arc<MetricsRegistry>) -> Self {
        let state = AppState {
            registry,
            metrics_path: config.metrics_path.clone(),
        };
        let router = Self::build_router(config, state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ListenerConfig, state: AppState) -> Router {
        Router::new()
            .route(&config.metrics_path, get(metrics_handler))
            .route("/", get(index_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.scrape_timeout_secs)))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server received shutdown signal");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    let body = state.registry.gather().await;
    ([(header::CONTENT_TYPE, TEXT_FORMAT)], body)
}

async fn index_handler(State(state): State<AppState>) -> Html<String> {
    Html(format!(
        "<html>\n<head><title>Healthz Exporter</title></head>\n<body>\n<h1>Healthz Exporter</h1>\n<p><a href=\"{0}\">Metrics</a></p>\n</body>\n</html>\n",
        state.metrics_path
    ))
}
