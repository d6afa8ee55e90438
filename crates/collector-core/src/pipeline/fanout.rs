//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Fan-out dispatcher
//!
//! Holds one ordered sink list per signal kind. Dispatch takes a snapshot of
//! the list under the read lock and invokes the sinks after releasing it, so
//! registration never waits on a slow sink.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::error::{CollectorError, CollectorResult};
use crate::traits::TelemetrySink;
use crate::types::{
    LogsBatch, LogsPayload, MetricsBatch, MetricsPayload, SignalPayload, TelemetryBatch,
    TracesBatch, TracesPayload,
};

use super::state::{PipelineCounters, PipelineStats};

type SinkList<P> = RwLock<Vec<Arc<dyn TelemetrySink<P>>>>;

/// Telemetry fan-out pipeline
pub struct Pipeline {
    /// Trace sinks, in registration order
    traces: SinkList<TracesPayload>,

    /// Metrics sinks, in registration order
    metrics: SinkList<MetricsPayload>,

    /// Logs sinks, in registration order
    logs: SinkList<LogsPayload>,

    /// Processed/dropped counters
    counters: PipelineCounters,
}

impl Pipeline {
    /// Create a pipeline with no sinks
    pub fn new() -> Self {
        Self {
            traces: RwLock::new(Vec::new()),
            metrics: RwLock::new(Vec::new()),
            logs: RwLock::new(Vec::new()),
            counters: PipelineCounters::new(),
        }
    }

    /// Append a trace sink
    pub async fn add_trace_exporter(&self, sink: Arc<dyn TelemetrySink<TracesPayload>>) {
        Self::register(&self.traces, sink).await;
    }

    /// Append a metrics sink
    pub async fn add_metrics_exporter(&self, sink: Arc<dyn TelemetrySink<MetricsPayload>>) {
        Self::register(&self.metrics, sink).await;
    }

    /// Append a logs sink
    pub async fn add_logs_exporter(&self, sink: Arc<dyn TelemetrySink<LogsPayload>>) {
        Self::register(&self.logs, sink).await;
    }

    /// Deliver a trace batch to every trace sink
    pub async fn consume_traces(&self, batch: &TracesBatch) -> CollectorResult<()> {
        Self::fan_out(&self.traces, &self.counters, batch).await
    }

    /// Deliver a metrics batch to every metrics sink
    pub async fn consume_metrics(&self, batch: &MetricsBatch) -> CollectorResult<()> {
        Self::fan_out(&self.metrics, &self.counters, batch).await
    }

    /// Deliver a logs batch to every logs sink
    pub async fn consume_logs(&self, batch: &LogsBatch) -> CollectorResult<()> {
        Self::fan_out(&self.logs, &self.counters, batch).await
    }

    /// Get a point-in-time copy of the pipeline counters
    pub fn stats(&self) -> PipelineStats {
        self.counters.snapshot()
    }

    async fn register<P: SignalPayload>(sinks: &SinkList<P>, sink: Arc<dyn TelemetrySink<P>>) {
        let mut sinks = sinks.write().await;
        sinks.push(sink);
        info!(
            signal = %P::KIND,
            position = sinks.len() - 1,
            "Added exporter to pipeline"
        );
    }

    async fn fan_out<P: SignalPayload>(
        sinks: &SinkList<P>,
        counters: &PipelineCounters,
        batch: &TelemetryBatch<P>,
    ) -> CollectorResult<()> {
        let items = batch.size as u64;
        counters.record_processed(P::KIND, items);

        let snapshot: Vec<Arc<dyn TelemetrySink<P>>> = sinks.read().await.clone();
        if snapshot.is_empty() {
            counters.record_dropped(P::KIND, items);
            debug!(
                signal = %P::KIND,
                batch_id = %batch.id,
                items,
                "No exporters registered, dropping batch"
            );
            return Ok(());
        }

        let mut last_error: Option<CollectorError> = None;
        for (position, sink) in snapshot.iter().enumerate() {
            if let Err(e) = sink.consume(batch).await {
                warn!(
                    signal = %P::KIND,
                    batch_id = %batch.id,
                    sink = sink.name(),
                    position,
                    error = %e,
                    "Exporter failed to consume batch"
                );
                last_error = Some(e);
            }
        }

        match last_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TelemetrySink<TracesPayload> for Pipeline {
    async fn consume(&self, batch: &TracesBatch) -> CollectorResult<()> {
        self.consume_traces(batch).await
    }

    fn name(&self) -> &str {
        "pipeline"
    }
}

#[async_trait]
impl TelemetrySink<MetricsPayload> for Pipeline {
    async fn consume(&self, batch: &MetricsBatch) -> CollectorResult<()> {
        self.consume_metrics(batch).await
    }

    fn name(&self) -> &str {
        "pipeline"
    }
}

#[async_trait]
impl TelemetrySink<LogsPayload> for Pipeline {
    async fn consume(&self, batch: &LogsBatch) -> CollectorResult<()> {
        self.consume_logs(batch).await
    }

    fn name(&self) -> &str {
        "pipeline"
    }
}
