//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Telemetry collector core
//!
//! This crate provides the pieces shared by the receiver and the supervisor:
//! the error type, decoded signal batches, the sink trait, the fan-out
//! pipeline, configuration and the built-in logging sink.

pub mod config;
pub mod error;
pub mod exporters;
pub mod pipeline;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use config::{AuthPolicy, CollectorConfig, ReceiverConfig};
pub use error::{CollectorError, CollectorResult};
pub use pipeline::{Pipeline, PipelineStats};
pub use traits::{LogsSink, MetricsSink, TelemetrySink, TracesSink};
pub use types::{
    LogsBatch, LogsPayload, MetricsBatch, MetricsPayload, SignalKind, SignalPayload,
    TelemetryBatch, TracesBatch, TracesPayload,
};

/// Collector version information
pub const COLLECTOR_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Collector name
pub const COLLECTOR_NAME: &str = "telemetry-collector";

/// Default OTLP/gRPC endpoint
pub const DEFAULT_GRPC_ENDPOINT: &str = "0.0.0.0:4317";

/// Default OTLP/HTTP endpoint
pub const DEFAULT_HTTP_ENDPOINT: &str = "0.0.0.0:4318";

/// Default status server endpoint
pub const DEFAULT_STATUS_ENDPOINT: &str = "0.0.0.0:13133";

/// Default upper bound on supervisor shutdown
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 15;

/// Default grace period for in-flight HTTP requests on receiver shutdown
pub const DEFAULT_HTTP_SHUTDOWN_GRACE_MS: u64 = 5_000;

/// Default maximum request size (16 MiB)
pub const DEFAULT_MAX_REQUEST_SIZE: usize = 16 * 1024 * 1024;
