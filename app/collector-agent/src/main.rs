//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Telemetry collector agent binary

use clap::Parser;
use collector_agent::{build_supervisor, AGENT_VERSION};
use collector_core::config::DEFAULT_CONFIG_PATH;
use collector_core::{CollectorConfig, CollectorResult};
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "collector-agent", version, about = "OTLP telemetry collector agent")]
struct Args {
    /// Configuration file
    #[arg(short, long, env = "COLLECTOR_CONFIG")]
    config: Option<PathBuf>,

    /// Log level used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    let registry = tracing_subscriber::registry().with(filter);
    if args.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    info!("Starting collector agent v{}", AGENT_VERSION);

    let config = load_config(args.config.as_deref())?;
    let supervisor = build_supervisor(&config).await;
    info!(id = supervisor.id(), "Collector configured");

    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        signal_cancel.cancel();
    });

    if let Err(e) = supervisor.run(cancel).await {
        error!("Collector exited with error: {}", e);
        return Err(e.into());
    }

    info!("Collector agent shutdown completed");
    Ok(())
}

/// Load configuration from the given file, the default file, or defaults
fn load_config(path: Option<&Path>) -> CollectorResult<CollectorConfig> {
    if let Some(path) = path {
        info!("Loading configuration from {}", path.display());
        return CollectorConfig::from_file(path);
    }

    if Path::new(DEFAULT_CONFIG_PATH).exists() {
        info!("Loading configuration from {}", DEFAULT_CONFIG_PATH);
        return CollectorConfig::from_file(DEFAULT_CONFIG_PATH);
    }

    info!("Using default configuration");
    Ok(CollectorConfig::default())
}

/// Handle shutdown signals
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        }
        _ = terminate => {
            info!("Received terminate signal");
        }
    }
}
