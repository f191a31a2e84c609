use std::path::PathBuf;

use anyhow::{Context, Result};
use api_gateway::ApiGateway;
use archive_server::{AppSettings, logging, provider};
use clap::Parser;
use tokio_util::sync::CancellationToken;

/// Arthur Dean Austin Archive API server
#[derive(Parser, Debug)]
#[command(name = "archive-server", version, about, long_about = None)]
struct Cli {
    /// Path to a YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log filter directive, e.g. `debug` or `api_gateway=trace` (overrides `RUST_LOG`)
    #[arg(long)]
    log_level: Option<String>,

    /// Print the effective configuration with secrets redacted and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = AppSettings::load(cli.config.as_deref()).context("failed to load settings")?;

    if cli.print_config {
        let dump = serde_json::to_string_pretty(&settings.redacted())?;
        println!("{dump}");
        return Ok(());
    }

    logging::init(&settings.logging, cli.log_level.as_deref())?;
    tracing::info!(
        environment = %settings.environment,
        bind_addr = %settings.bind_addr,
        identity_provider = ?settings.identity_provider,
        "starting archive server"
    );

    let idp = provider::shared(&settings)?;
    let gateway = ApiGateway::new(settings.gateway_config(), idp);

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for shutdown signal");
            }
            cancel.cancel();
        }
    });

    gateway.serve(cancel).await.context("HTTP server failed")
}
