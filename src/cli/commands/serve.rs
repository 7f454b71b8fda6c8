//! Implementation of the `kaimono serve` command.

use anyhow::{anyhow, Context, Result};
use clap::Args;
use std::path::Path;
use tracing::{info, warn};

use crate::application::build_server;
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::logging::LoggerImpl;

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Override the listen address
    #[arg(long)]
    pub host: Option<String>,

    /// Override the listen port
    #[arg(short, long)]
    pub port: Option<u16>,
}

pub async fn execute(args: ServeArgs, config_path: Option<&Path>) -> Result<()> {
    let mut config = super::load_config(config_path)?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    ConfigLoader::validate(&config)?;

    let _logger = LoggerImpl::init(&config.logging).context("Failed to initialize logging")?;
    info!(server = ?config.server, store = ?config.store, line = ?config.line, "Starting webhook service");

    let server = build_server(&config).await?;
    server
        .serve_with_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow!(e))
        .context("Webhook server failed")?;

    info!("Webhook service stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!(error = %e, "Failed to listen for shutdown signal, stop the process to exit");
            std::future::pending::<()>().await;
        }
    }
}
