//! Healthz Exporter
//!
//! Serves a Prometheus scrape endpoint. Every scrape polls each configured
//! server's `/streaming/serverz` endpoint and reports
//! `gnatsd_healthz_state{server_id="..."}` as 1 (up) or 0 (down).
//!
//! ```text
//!   Prometheus ──GET /metrics──▶ exporter::server
//!                                    │
//!                                    ▼
//!                              exporter::registry ──▶ HealthzCollector
//!                                                        │  (per server, concurrent)
//!                                                        ▼
//!                                          GET <url>/streaming/serverz
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use healthz_exporter::collector::ServerSource;
use healthz_exporter::config::{read_config, validate_config, ConfigError, ExporterConfig};
use healthz_exporter::lifecycle::{signals, startup, Shutdown};
use healthz_exporter::observability::{init_logging, DEFAULT_LOG_LEVEL};

#[derive(Parser)]
#[command(name = "healthz-exporter")]
#[command(about = "Prometheus exporter for server health state", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to serve scrapes on (overrides the config file).
    #[arg(short, long)]
    bind: Option<String>,

    /// Server to monitor as `id=url`, or a bare URL used as its own id. Repeatable.
    #[arg(short, long = "server")]
    servers: Vec<ServerSource>,

    /// Log level (overrides the config file).
    #[arg(short, long)]
    log_level: Option<String>,
}

fn resolve_config(cli: Cli) -> Result<ExporterConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => read_config(path)?,
        None => ExporterConfig::default(),
    };

    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    if !cli.servers.is_empty() {
        config.servers = cli.servers;
    }
    if let Some(level) = cli.log_level {
        config.observability.log_level = level;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Bootstrap level until the config file has been read.
    let logging = init_logging(cli.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL));

    let config = match resolve_config(cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    if let Some(handle) = &logging {
        handle.set_level(&config.observability.log_level);
    }

    tracing::info!("healthz-exporter v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        servers = config.servers.len(),
        fetch_timeout_secs = config.http.timeout_secs,
        "Configuration loaded"
    );

    let shutdown = Arc::new(Shutdown::new());
    signals::spawn_signal_listener(shutdown.clone());

    if let Err(e) = startup::run(config, &shutdown).await {
        tracing::error!(error = %e, "Exporter failed");
        return ExitCode::FAILURE;
    }

    tracing::info!("Shutdown complete");
    ExitCode::SUCCESS
}
