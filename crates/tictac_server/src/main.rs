//! Tic-tac-toe session server (HTTP)

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use tictac_server::ServerConfig;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tictac_server=debug")),
        )
        .init();

    let mut config = ServerConfig::load(cli.config.as_deref())?;
    if let Some(host) = cli.host {
        config = config.with_host(host);
    }
    if let Some(port) = cli.port {
        config = config.with_port(port);
    }
    if let Some(prefix) = cli.api_prefix {
        config = config.with_api_prefix(prefix);
    }
    if cli.max_sessions.is_some() {
        config = config.with_max_sessions(cli.max_sessions);
    }

    info!(?config, "Starting tic-tac-toe server");
    tictac_server::serve(&config, shutdown_signal()).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
