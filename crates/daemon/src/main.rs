//! qbroker - Main Entry Point
//! HTTP front end over a single in-process broker

mod config;

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Args;
use qbroker_api_http::HttpServer;
use qbroker_core::port::MessageBroker;
use qbroker_core::Broker;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// How long shutdown waits for in-flight long polls
const SHUTDOWN_GRACE_PERIOD: Duration = Duration::from_secs(5);

fn init_logging() -> Result<()> {
    // JSON for production, pretty for development
    let log_format = std::env::var("QBROKER_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("qbroker=info,tower_http=info"))
        .context("Failed to create env filter")?;

    match log_format.as_str() {
        "json" => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json())
            .try_init(),
        _ => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().pretty())
            .try_init(),
    }
    .context("Failed to install tracing subscriber")?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Parse configuration (exits with usage on bad flags)
    let args = Args::parse();

    // 2. Initialize logging
    init_logging()?;
    info!("qbroker v{} starting...", VERSION);

    // 3. Build the broker (the only instance in this process)
    let broker_config = args.broker_config();
    info!(
        max_queues = broker_config.max_queues,
        max_queue_size = broker_config.max_queue_size,
        default_timeout_secs = broker_config.default_timeout_secs,
        "Initializing broker..."
    );
    let broker: Arc<dyn MessageBroker> =
        Arc::new(Broker::new(broker_config).context("Invalid broker configuration")?);

    // 4. Start HTTP server
    let server = HttpServer::new(args.server_config(), broker);
    let handle = server.start().await.context("HTTP server start failed")?;

    info!(addr = %handle.local_addr(), "System ready. Waiting for messages...");
    info!("Press Ctrl+C to shutdown");

    // 5. Wait for shutdown signal
    tokio::signal::ctrl_c().await?;

    info!("Shutdown signal received. Exiting gracefully...");

    // 6. Graceful shutdown
    match tokio::time::timeout(SHUTDOWN_GRACE_PERIOD, handle.stop()).await {
        Ok(result) => result.context("HTTP server stop failed")?,
        Err(_) => warn!(
            grace_period = ?SHUTDOWN_GRACE_PERIOD,
            "In-flight requests still waiting, exiting anyway"
        ),
    }

    info!("Shutdown complete.");

    Ok(())
}
