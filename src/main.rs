use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use location_insights::{InsightsConfig, logging, web};

/// Merges uploaded location and metadata files and reports per-type statistics
#[derive(Debug, Parser)]
#[command(name = "location-insights", version, about)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, env = "LOCATION_INSIGHTS_CONFIG")]
    config: Option<PathBuf>,

    /// Address to bind, overrides `server.host`
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on, overrides `server.port`
    #[arg(short, long)]
    port: Option<u16>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = InsightsConfig::load_from_path(cli.config)
        .context("Failed to load configuration")?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    config.validate()?;

    logging::init(&config.logging, cli.verbose);
    tracing::info!(
        "Starting location-insights {} (duplicate ids: {:?})",
        location_insights::VERSION,
        config.processing.duplicate_ids
    );

    web::run(&config).await
}
