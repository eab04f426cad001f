use std::time::Duration;

use clap::Parser;

use healthz_exporter::collector::{HealthzCollector, ServerSource, StatusClient, CORE_SYSTEM};
use healthz_exporter::observability::init_logging;

#[derive(Parser)]
#[command(name = "healthz-probe")]
#[command(about = "Run a single health scrape and print the results", long_about = None)]
struct Cli {
    /// Per-fetch timeout in seconds.
    #[arg(short, long, default_value_t = 5)]
    timeout: u64,

    /// Log level; failure reasons are logged at debug.
    #[arg(short, long, default_value = "debug")]
    log_level: String,

    /// Server to probe as `id=url`, or a bare URL used as its own id. Repeatable.
    #[arg(required = true)]
    servers: Vec<ServerSource>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let client = StatusClient::new(Duration::from_secs(cli.timeout))?;
    let collector = HealthzCollector::with_client(CORE_SYSTEM, "healthz", &cli.servers, client);

    let samples = collector.collect_health().await;
    println!("{}", serde_json::to_string_pretty(&samples)?);
    Ok(())
}
