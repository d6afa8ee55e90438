//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Telemetry batch

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::signal::{LogsPayload, MetricsPayload, SignalKind, SignalPayload, TracesPayload};

/// One decoded unit of telemetry of a single signal kind
#[derive(Debug, Clone)]
pub struct TelemetryBatch<P> {
    /// Batch ID
    pub id: Uuid,

    /// Time the batch was decoded
    pub timestamp: DateTime<Utc>,

    /// Ingestion source (protocol and endpoint version)
    pub source: String,

    /// Number of items in the payload
    pub size: usize,

    /// Decoded payload
    pub payload: P,
}

/// Batch of spans
pub type TracesBatch = TelemetryBatch<TracesPayload>;

/// Batch of metric data points
pub type MetricsBatch = TelemetryBatch<MetricsPayload>;

/// Batch of log records
pub type LogsBatch = TelemetryBatch<LogsPayload>;

impl<P: SignalPayload> TelemetryBatch<P> {
    /// Create a batch, counting the payload items
    pub fn new(payload: P, source: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            source: source.into(),
            size: payload.item_count(),
            payload,
        }
    }

    /// Signal kind of this batch
    pub fn kind(&self) -> SignalKind {
        P::KIND
    }

    /// Whether the payload carries no items
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry_proto::tonic::logs::v1::{LogRecord, ResourceLogs, ScopeLogs};

    #[test]
    fn test_batch_counts_items_on_creation() {
        let payload = LogsPayload {
            resource_logs: vec![ResourceLogs {
                scope_logs: vec![ScopeLogs {
                    log_records: vec![LogRecord::default(); 3],
                    ..Default::default()
                }],
                ..Default::default()
            }],
        };

        let batch = TelemetryBatch::new(payload, "otlp_http_v1");
        assert_eq!(batch.size, 3);
        assert_eq!(batch.kind(), SignalKind::Logs);
        assert_eq!(batch.source, "otlp_http_v1");
        assert!(!batch.is_empty());
    }

    #[test]
    fn test_empty_batch() {
        let batch = TracesBatch::new(TracesPayload::default(), "otlp_grpc");
        assert!(batch.is_empty());
        assert_eq!(batch.kind(), SignalKind::Traces);
    }
}
