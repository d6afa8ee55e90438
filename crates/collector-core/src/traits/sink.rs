//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Sink trait for telemetry destinations
//!
//! A sink accepts batches of exactly one signal kind. The same trait is used
//! for the receiver's consumer (the pipeline) and for the pipeline's
//! destinations.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::CollectorResult;
use crate::types::{LogsPayload, MetricsPayload, SignalPayload, TelemetryBatch, TracesPayload};

/// Destination that accepts batches of one signal kind
#[async_trait]
pub trait TelemetrySink<P: SignalPayload>: Send + Sync {
    /// Accept one batch
    async fn consume(&self, batch: &TelemetryBatch<P>) -> CollectorResult<()>;

    /// Get sink name, used in log records
    fn name(&self) -> &str {
        "sink"
    }
}

/// Shared handle to a trace sink
pub type TracesSink = Arc<dyn TelemetrySink<TracesPayload>>;

/// Shared handle to a metrics sink
pub type MetricsSink = Arc<dyn TelemetrySink<MetricsPayload>>;

/// Shared handle to a logs sink
pub type LogsSink = Arc<dyn TelemetrySink<LogsPayload>>;
