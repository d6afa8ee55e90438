//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Telemetry data types for the collector
//!
//! A batch is one decoded OTLP export request together with its item count.
//! The payload type determines the signal kind.

pub mod batch;
pub mod signal;

pub use batch::{LogsBatch, MetricsBatch, TelemetryBatch, TracesBatch};
pub use signal::{LogsPayload, MetricsPayload, SignalKind, SignalPayload, TracesPayload};
