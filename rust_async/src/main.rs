//! Pi Calculator Service
//!
//! ```bash
//! pi-service --config service.toml
//! pi-service --listen-addr 127.0.0.1:8080 --workers 4
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use pi_estimator_async::{RpcServer, ServiceConfig};
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Monte Carlo π estimation over HTTP.
#[derive(Parser, Debug)]
#[command(name = "pi-service")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address (overrides config)
    #[arg(long)]
    listen_addr: Option<SocketAddr>,

    /// Worker count for parallel requests (overrides config)
    #[arg(long)]
    workers: Option<usize>,

    /// Base seed for reproducible estimates (overrides config)
    #[arg(long)]
    seed: Option<u64>,

    /// Log level filter (overrides RUST_LOG)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn load_config(cli: &Cli) -> Result<ServiceConfig> {
    let mut config = match &cli.config {
        Some(path) => ServiceConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ServiceConfig::default(),
    };

    if let Some(addr) = cli.listen_addr {
        config.server.listen_addr = addr;
    }
    if let Some(workers) = cli.workers {
        config.estimator.workers = Some(workers);
    }
    if cli.seed.is_some() {
        config.estimator.seed = cli.seed;
    }

    config.validate().context("invalid configuration")?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .init();

    let config = load_config(&cli)?;
    info!(
        listen_addr = %config.server.listen_addr,
        workers = ?config.estimator.workers,
        max_iterations = config.estimator.max_iterations,
        "starting pi calculator service"
    );

    let mut handle = RpcServer::from_config(&config)
        .start()
        .await
        .context("failed to start RPC server")?;

    signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;
    info!("received shutdown signal");

    handle.shutdown();
    handle.join().await.context("RPC server task failed")?;
    Ok(())
}
