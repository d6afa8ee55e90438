//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Telemetry collector agent
//!
//! Wires the OTLP receiver, the fan-out pipeline and the status server
//! together under a lifecycle supervisor.

pub mod state;
pub mod status;
pub mod supervisor;
pub mod types;

pub use state::SupervisorState;
pub use status::{HttpStatusServer, StatusServer};
pub use supervisor::{StatsReporter, Supervisor};
pub use types::SupervisorStats;

use collector_core::{exporters::LoggingSink, CollectorConfig, Pipeline, SignalKind};
use ingestion::ReceiverHandle;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Agent version information
pub const AGENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build a supervisor from a resolved configuration
pub async fn build_supervisor(config: &CollectorConfig) -> Supervisor {
    let pipeline = Arc::new(Pipeline::new());

    let logging = &config.exporters.logging;
    if logging.enabled {
        let sink = Arc::new(LoggingSink::from_config(logging));
        for kind in SignalKind::ALL
            .into_iter()
            .filter(|kind| logging.exports(*kind))
        {
            match kind {
                SignalKind::Traces => pipeline.add_trace_exporter(sink.clone()).await,
                SignalKind::Metrics => pipeline.add_metrics_exporter(sink.clone()).await,
                SignalKind::Logs => pipeline.add_logs_exporter(sink.clone()).await,
            }
        }
    }

    let receiver = if config.receiver.enabled {
        let handle = ReceiverHandle::new();
        handle
            .create_traces_receiver(&config.receiver, pipeline.clone())
            .await;
        handle
            .create_metrics_receiver(&config.receiver, pipeline.clone())
            .await;
        Some(
            handle
                .create_logs_receiver(&config.receiver, pipeline.clone())
                .await,
        )
    } else {
        info!("OTLP receiver disabled");
        None
    };

    let id = config
        .supervisor
        .id
        .clone()
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let mut supervisor = Supervisor::new(id, pipeline, receiver)
        .with_shutdown_timeout(config.supervisor.shutdown_timeout());

    if config.status.enabled {
        supervisor =
            supervisor.with_status_server(Arc::new(HttpStatusServer::new(&config.status.endpoint)));
    }

    supervisor
}
