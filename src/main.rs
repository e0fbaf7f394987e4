//! docgate - gateway safeguard for sensitive document uploads.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::net::TcpListener;

use docgate::config::{self, GatewayConfig};
use docgate::error::Result;
use docgate::http::GatewayServer;
use docgate::lifecycle::Shutdown;
use docgate::observability::{logging, metrics};
use docgate::ratelimit::{self, LimiterSet};
use docgate::store::DocumentStore;

#[derive(Parser, Debug)]
#[command(name = "docgate", about = "Gateway safeguard for sensitive document uploads")]
struct Args {
    /// Path to the TOML configuration file; defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init("docgate=debug,tower_http=debug");
    tracing::info!("docgate v0.1.0 starting");

    let config = match &args.config {
        Some(path) => config::loader::load_config(path)?,
        None => GatewayConfig::default(),
    };
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upload_quota = config.limits.upload.max_requests,
        max_file_size = config.validation.max_file_size_bytes,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let shutdown = Shutdown::new();
    let limiters = Arc::new(LimiterSet::from_config(&config.limits));
    let sweeper = ratelimit::spawn_sweeper(
        limiters.clone(),
        Duration::from_secs(config.limits.sweep_interval_secs),
        shutdown.subscribe(),
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let store = Arc::new(DocumentStore::new());
    let server = GatewayServer::new(&config, limiters, store);
    let server_shutdown = shutdown.subscribe();
    let server_task = tokio::spawn(server.run(listener, server_shutdown));

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received");
    shutdown.trigger();

    if let Ok(result) = server_task.await {
        result?;
    }
    let _ = sweeper.await;
    tracing::info!("Shutdown complete");

    Ok(())
}
