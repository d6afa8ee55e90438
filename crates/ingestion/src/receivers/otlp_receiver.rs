//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Dual-protocol OTLP receiver
//!
//! Instances are obtained through a [`ReceiverHandle`](super::ReceiverHandle),
//! which guarantees at most one live receiver per handle. Shutting a started
//! receiver down clears the handle so the next construction builds a fresh
//! instance.

use axum::Router;
use collector_core::{
    CollectorError, CollectorResult, LogsSink, MetricsSink, ReceiverConfig, TelemetrySink,
    TracesSink,
};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex as StdMutex, PoisonError, Weak};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::dispatch::{ReceiverShared, RoutedSignal};
use super::grpc::spawn_grpc_server;
use super::http::{build_router, spawn_http_server};
use super::stats::ReceiverStats;
use super::ServerTask;

pub(crate) type ReceiverSlot = StdMutex<Option<Arc<OtlpReceiver>>>;

struct RunningServers {
    grpc: Option<ServerTask>,
    http: Option<ServerTask>,
}

/// Server lifecycle; `Draining` holds a token cancelled once the drain ends
enum ServerState {
    Idle,
    Running(RunningServers),
    Draining(CancellationToken),
}

impl ServerState {
    fn running(&self) -> Option<&RunningServers> {
        match self {
            ServerState::Running(running) => Some(running),
            _ => None,
        }
    }
}

/// OTLP receiver serving gRPC and HTTP
pub struct OtlpReceiver {
    config: ReceiverConfig,
    shared: Arc<ReceiverShared>,
    servers: Mutex<ServerState>,
    registry: Weak<ReceiverSlot>,
}

impl OtlpReceiver {
    pub(crate) fn new(config: ReceiverConfig, registry: Weak<ReceiverSlot>) -> Self {
        let shared = Arc::new(ReceiverShared::new(
            config.auth.clone(),
            config.max_request_body_bytes,
        ));

        Self {
            config,
            shared,
            servers: Mutex::new(ServerState::Idle),
            registry,
        }
    }

    /// Configuration this instance was built with
    pub fn config(&self) -> &ReceiverConfig {
        &self.config
    }

    /// Register the traces consumer, replacing any previous one
    pub async fn register_traces_consumer(&self, consumer: TracesSink) {
        self.register_consumer(consumer).await;
    }

    /// Register the metrics consumer, replacing any previous one
    pub async fn register_metrics_consumer(&self, consumer: MetricsSink) {
        self.register_consumer(consumer).await;
    }

    /// Register the logs consumer, replacing any previous one
    pub async fn register_logs_consumer(&self, consumer: LogsSink) {
        self.register_consumer(consumer).await;
    }

    async fn register_consumer<P: RoutedSignal>(&self, consumer: Arc<dyn TelemetrySink<P>>) {
        let mut slot = P::consumer_slot(&self.shared.consumers).write().await;
        if slot.is_some() {
            debug!(signal = %P::KIND, "Replacing registered consumer");
        }
        info!(signal = %P::KIND, consumer = consumer.name(), "Registered consumer");
        *slot = Some(consumer);
    }

    /// Bind the configured listeners and start serving
    pub async fn start(&self) -> CollectorResult<()> {
        let mut servers = self.servers.lock().await;
        match &*servers {
            ServerState::Running(_) => {
                return Err(CollectorError::startup("receiver already started"));
            }
            ServerState::Draining(drained) if !drained.is_cancelled() => {
                return Err(CollectorError::startup("receiver still shutting down"));
            }
            _ => {}
        }

        let router = match self.config.http_address() {
            Some(_) => Some(self.http_router()?),
            None => None,
        };

        let grpc_listener = match self.config.grpc_address() {
            Some(endpoint) => Some(bind("gRPC", endpoint).await?),
            None => None,
        };
        let http_listener = match self.config.http_address() {
            Some(endpoint) => Some(bind("HTTP", endpoint).await?),
            None => None,
        };

        let grpc = grpc_listener
            .map(|listener| spawn_grpc_server(listener, self.shared.clone()))
            .transpose()?;
        let http = match (http_listener, router) {
            (Some(listener), Some(router)) => Some(spawn_http_server(listener, router)?),
            _ => None,
        };

        info!(
            grpc = ?grpc.as_ref().map(|task| task.local_addr),
            http = ?http.as_ref().map(|task| task.local_addr),
            v2 = self.config.enable_v2,
            "OTLP receiver started"
        );

        *servers = ServerState::Running(RunningServers { grpc, http });
        Ok(())
    }

    /// Stop both servers and release the handle
    ///
    /// The drain runs in its own task without holding the server lock, so a
    /// concurrent `start` fails fast instead of waiting on in-flight calls.
    pub async fn shutdown(&self) -> CollectorResult<()> {
        let drained = CancellationToken::new();
        let running = {
            let mut servers = self.servers.lock().await;
            match std::mem::replace(&mut *servers, ServerState::Draining(drained.clone())) {
                ServerState::Running(running) => running,
                previous => {
                    *servers = previous;
                    debug!("OTLP receiver not running, nothing to shut down");
                    return Ok(());
                }
            }
        };

        info!("Shutting down OTLP receiver");

        for task in [&running.grpc, &running.http].into_iter().flatten() {
            task.shutdown.cancel();
        }

        let grace = self.config.http_shutdown_grace();
        let drain = tokio::spawn(async move {
            let _done = drained.drop_guard();
            let (grpc_result, http_result) =
                tokio::join!(stop_grpc(running.grpc), stop_http(running.http, grace));
            grpc_result.and(http_result)
        });
        let result = drain.await?;

        {
            let mut servers = self.servers.lock().await;
            if matches!(*servers, ServerState::Draining(_)) {
                *servers = ServerState::Idle;
            }
        }

        self.release();
        info!("OTLP receiver shut down");

        result
    }

    /// Whether the servers are running
    pub async fn is_running(&self) -> bool {
        self.servers.lock().await.running().is_some()
    }

    /// Whether a shutdown is still draining in-flight requests
    pub async fn is_draining(&self) -> bool {
        match &*self.servers.lock().await {
            ServerState::Draining(drained) => !drained.is_cancelled(),
            _ => false,
        }
    }

    /// Bound gRPC address, once started
    pub async fn grpc_local_addr(&self) -> Option<SocketAddr> {
        self.servers
            .lock()
            .await
            .running()
            .and_then(|running| running.grpc.as_ref())
            .map(|task| task.local_addr)
    }

    /// Bound HTTP address, once started
    pub async fn http_local_addr(&self) -> Option<SocketAddr> {
        self.servers
            .lock()
            .await
            .running()
            .and_then(|running| running.http.as_ref())
            .map(|task| task.local_addr)
    }

    /// HTTP router serving this receiver's routes
    pub fn http_router(&self) -> CollectorResult<Router> {
        build_router(&self.config, self.shared.clone())
    }

    /// Snapshot of the received counters
    pub fn stats(&self) -> ReceiverStats {
        self.shared.counters.snapshot()
    }

    fn release(&self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };

        let mut current = registry.lock().unwrap_or_else(PoisonError::into_inner);
        let is_current = current
            .as_ref()
            .is_some_and(|receiver| std::ptr::eq(Arc::as_ptr(receiver), self));
        if is_current {
            *current = None;
        }
    }
}

async fn bind(protocol: &str, endpoint: &str) -> CollectorResult<TcpListener> {
    TcpListener::bind(endpoint).await.map_err(|e| {
        CollectorError::startup_with_source(
            format!("failed to bind {} endpoint {}: {}", protocol, endpoint, e),
            e,
        )
    })
}

async fn stop_grpc(task: Option<ServerTask>) -> CollectorResult<()> {
    let Some(task) = task else {
        return Ok(());
    };
    task.handle.await?
}

async fn stop_http(task: Option<ServerTask>, grace: Duration) -> CollectorResult<()> {
    let Some(task) = task else {
        return Ok(());
    };

    let mut handle = task.handle;
    match tokio::time::timeout(grace, &mut handle).await {
        Ok(joined) => joined?,
        Err(_) => {
            warn!(
                "OTLP HTTP server on {} did not drain within {:?}, aborting",
                task.local_addr, grace
            );
            handle.abort();
            Ok(())
        }
    }
}
