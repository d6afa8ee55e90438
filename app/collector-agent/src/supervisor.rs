//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Collector lifecycle supervision
//!
//! The supervisor starts the receiver and the status server, waits for the
//! cancellation token and then stops both concurrently within a bounded time.

use collector_core::{
    CollectorError, CollectorResult, Pipeline, COLLECTOR_VERSION, DEFAULT_SHUTDOWN_TIMEOUT_SECS,
};
use futures::future::join_all;
use ingestion::OtlpReceiver;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::state::{StateCell, SupervisorState};
use crate::status::StatusServer;
use crate::types::SupervisorStats;

/// Cloneable source of supervisor statistics
#[derive(Clone)]
pub struct StatsReporter {
    id: String,
    hostname: String,
    state: Arc<Mutex<StateCell>>,
    receiver: Option<Arc<OtlpReceiver>>,
    pipeline: Arc<Pipeline>,
}

impl StatsReporter {
    /// Current lifecycle state
    pub fn state(&self) -> SupervisorState {
        self.lock_state().state()
    }

    /// Snapshot of state and counters
    pub fn stats(&self) -> SupervisorStats {
        let (state, uptime) = {
            let cell = self.lock_state();
            (cell.state(), cell.uptime())
        };

        SupervisorStats {
            id: self.id.clone(),
            hostname: self.hostname.clone(),
            state,
            running: state == SupervisorState::Running,
            uptime,
            receiver: self
                .receiver
                .as_ref()
                .map(|receiver| receiver.stats())
                .unwrap_or_default(),
            pipeline: self.pipeline.stats(),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, StateCell> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Collector supervisor
pub struct Supervisor {
    reporter: StatsReporter,
    status: Option<Arc<dyn StatusServer>>,
    status_start: Mutex<Option<JoinHandle<()>>>,
    shutdown_timeout: Duration,
}

impl Supervisor {
    /// Create a supervisor over a pipeline and an optional receiver
    pub fn new(
        id: impl Into<String>,
        pipeline: Arc<Pipeline>,
        receiver: Option<Arc<OtlpReceiver>>,
    ) -> Self {
        let hostname = hostname::get()
            .ok()
            .and_then(|name| name.into_string().ok())
            .unwrap_or_else(|| "unknown".to_string());

        Self {
            reporter: StatsReporter {
                id: id.into(),
                hostname,
                state: Arc::new(Mutex::new(StateCell::new())),
                receiver,
                pipeline,
            },
            status: None,
            status_start: Mutex::new(None),
            shutdown_timeout: Duration::from_secs(DEFAULT_SHUTDOWN_TIMEOUT_SECS),
        }
    }

    pub fn with_status_server(mut self, status: Arc<dyn StatusServer>) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }

    pub fn id(&self) -> &str {
        &self.reporter.id
    }

    pub fn pipeline(&self) -> &Arc<Pipeline> {
        &self.reporter.pipeline
    }

    pub fn receiver(&self) -> Option<&Arc<OtlpReceiver>> {
        self.reporter.receiver.as_ref()
    }

    pub fn state(&self) -> SupervisorState {
        self.reporter.state()
    }

    pub fn stats(&self) -> SupervisorStats {
        self.reporter.stats()
    }

    /// Handle for status collaborators
    pub fn reporter(&self) -> StatsReporter {
        self.reporter.clone()
    }

    /// Start all components, wait for `cancel`, then shut down
    pub async fn run(&self, cancel: CancellationToken) -> CollectorResult<()> {
        let previous = self
            .reporter
            .lock_state()
            .begin_run()
            .ok_or_else(|| CollectorError::startup("collector already running"))?;

        info!(
            id = %self.reporter.id,
            version = COLLECTOR_VERSION,
            "Starting collector"
        );

        if let Some(receiver) = &self.reporter.receiver {
            if let Err(e) = receiver.start().await {
                error!("Failed to start OTLP receiver: {}", e);
                self.reporter.lock_state().revert(previous);
                return Err(e);
            }
        }

        if let Some(status) = &self.status {
            let status = status.clone();
            let reporter = self.reporter.clone();
            let handle = tokio::spawn(async move {
                if let Err(e) = status.start(reporter).await {
                    error!(
                        server = status.name(),
                        "Failed to start status server: {}",
                        e
                    );
                }
            });
            *self.lock_status_start() = Some(handle);
        }

        info!(id = %self.reporter.id, "Collector running");

        cancel.cancelled().await;
        info!("Cancellation received, shutting down collector");

        self.shutdown().await
    }

    /// Stop all components concurrently within the shutdown timeout
    pub async fn shutdown(&self) -> CollectorResult<()> {
        let errors: Arc<Mutex<Vec<String>>> = Arc::default();
        let mut tasks = Vec::new();

        if let Some(receiver) = self.reporter.receiver.clone() {
            let errors = errors.clone();
            tasks.push(tokio::spawn(async move {
                if let Err(e) = receiver.shutdown().await {
                    record_error(&errors, format!("receiver: {}", e));
                }
            }));
        }

        if let Some(status) = self.status.clone() {
            let errors = errors.clone();
            let started = self.lock_status_start().take();
            tasks.push(tokio::spawn(async move {
                if let Some(started) = started {
                    if let Err(e) = started.await {
                        let message = format!("{}: start task failed: {}", status.name(), e);
                        record_error(&errors, message);
                    }
                }
                if let Err(e) = status.stop().await {
                    record_error(&errors, format!("{}: {}", status.name(), e));
                }
            }));
        }

        match tokio::time::timeout(self.shutdown_timeout, join_all(tasks)).await {
            Ok(results) => {
                for result in results {
                    if let Err(e) = result {
                        record_error(&errors, format!("shutdown task failed: {}", e));
                    }
                }
            }
            Err(_) => {
                warn!(
                    "Collector shutdown did not complete within {:?}, continuing",
                    self.shutdown_timeout
                );
            }
        }

        self.reporter.lock_state().stop();

        let errors = std::mem::take(&mut *errors.lock().unwrap_or_else(PoisonError::into_inner));
        if errors.is_empty() {
            info!(id = %self.reporter.id, "Collector stopped");
            Ok(())
        } else {
            Err(CollectorError::shutdown(format!(
                "shutdown completed with errors: {}",
                errors.join("; ")
            )))
        }
    }

    fn lock_status_start(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.status_start
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

fn record_error(errors: &Mutex<Vec<String>>, message: String) {
    error!("{}", message);
    errors
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(message);
}
