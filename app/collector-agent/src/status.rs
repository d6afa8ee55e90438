//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Status server
//!
//! Exposes collector health and counters over HTTP.

use async_trait::async_trait;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use collector_core::{CollectorError, CollectorResult};
use serde_json::json;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::state::SupervisorState;
use crate::supervisor::StatsReporter;
use crate::types::SupervisorStats;

/// Status collaborator started and stopped by the supervisor
#[async_trait]
pub trait StatusServer: Send + Sync {
    /// Start serving; returns once the server is accepting
    async fn start(&self, reporter: StatsReporter) -> CollectorResult<()>;

    /// Stop serving
    async fn stop(&self) -> CollectorResult<()>;

    fn name(&self) -> &str;
}

struct RunningStatus {
    local_addr: SocketAddr,
    shutdown: CancellationToken,
    handle: JoinHandle<std::io::Result<()>>,
}

/// Status server over HTTP
pub struct HttpStatusServer {
    endpoint: String,
    running: Mutex<Option<RunningStatus>>,
}

impl HttpStatusServer {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            running: Mutex::new(None),
        }
    }

    /// Bound address, once started
    pub async fn local_addr(&self) -> Option<SocketAddr> {
        self.running
            .lock()
            .await
            .as_ref()
            .map(|running| running.local_addr)
    }

    /// Router with the status endpoints
    pub fn router(reporter: StatsReporter) -> Router {
        Router::new()
            .route("/health", get(health))
            .route("/stats", get(stats))
            .with_state(reporter)
    }
}

#[async_trait]
impl StatusServer for HttpStatusServer {
    async fn start(&self, reporter: StatsReporter) -> CollectorResult<()> {
        let mut running = self.running.lock().await;
        if running.is_some() {
            return Err(CollectorError::startup("status server already started"));
        }

        let listener = TcpListener::bind(&self.endpoint).await.map_err(|e| {
            CollectorError::startup_with_source(
                format!("failed to bind status endpoint {}: {}", self.endpoint, e),
                e,
            )
        })?;
        let local_addr = listener.local_addr()?;

        let shutdown = CancellationToken::new();
        let signal = shutdown.clone();
        let router = Self::router(reporter);
        let handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(signal.cancelled_owned())
                .await
        });

        info!("Status server listening on {}", local_addr);
        *running = Some(RunningStatus {
            local_addr,
            shutdown,
            handle,
        });
        Ok(())
    }

    async fn stop(&self) -> CollectorResult<()> {
        let Some(running) = self.running.lock().await.take() else {
            return Ok(());
        };

        running.shutdown.cancel();
        match running.handle.await? {
            Ok(()) => {
                info!("Status server on {} stopped", running.local_addr);
                Ok(())
            }
            Err(e) => {
                warn!("Status server on {} failed: {}", running.local_addr, e);
                Err(CollectorError::network_with_source(
                    "status server failed",
                    e,
                ))
            }
        }
    }

    fn name(&self) -> &str {
        "status-server"
    }
}

async fn health(State(reporter): State<StatsReporter>) -> impl IntoResponse {
    let state = reporter.state();
    let (code, status) = if state == SupervisorState::Running {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
    };

    (code, Json(json!({ "status": status, "state": state })))
}

async fn stats(State(reporter): State<StatsReporter>) -> Json<SupervisorStats> {
    Json(reporter.stats())
}
