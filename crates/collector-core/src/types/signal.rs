//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Signal kinds and their OTLP payloads

use opentelemetry_proto::tonic::collector::logs::v1::ExportLogsServiceRequest;
use opentelemetry_proto::tonic::collector::metrics::v1::ExportMetricsServiceRequest;
use opentelemetry_proto::tonic::collector::trace::v1::ExportTraceServiceRequest;
use opentelemetry_proto::tonic::metrics::v1::{metric::Data as MetricData, Metric};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Traces payload (OTLP trace export request)
pub type TracesPayload = ExportTraceServiceRequest;

/// Metrics payload (OTLP metrics export request)
pub type MetricsPayload = ExportMetricsServiceRequest;

/// Logs payload (OTLP logs export request)
pub type LogsPayload = ExportLogsServiceRequest;

/// Telemetry signal kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalKind {
    Traces,
    Metrics,
    Logs,
}

impl SignalKind {
    /// All signal kinds, in routing order
    pub const ALL: [SignalKind; 3] = [SignalKind::Traces, SignalKind::Metrics, SignalKind::Logs];

    /// Lowercase name, as used in paths and log fields
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalKind::Traces => "traces",
            SignalKind::Metrics => "metrics",
            SignalKind::Logs => "logs",
        }
    }

    /// Fixed v2 ingestion path for this kind
    pub fn v2_path(&self) -> &'static str {
        match self {
            SignalKind::Traces => "/v2/traces",
            SignalKind::Metrics => "/v2/metrics",
            SignalKind::Logs => "/v2/logs",
        }
    }

    /// Default v1 ingestion path for this kind
    pub fn default_v1_path(&self) -> &'static str {
        match self {
            SignalKind::Traces => "/v1/traces",
            SignalKind::Metrics => "/v1/metrics",
            SignalKind::Logs => "/v1/logs",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded payload that belongs to exactly one signal kind
pub trait SignalPayload: fmt::Debug + Send + Sync + 'static {
    /// Signal kind carried by this payload
    const KIND: SignalKind;

    /// Number of items in the payload: spans, data points or log records
    fn item_count(&self) -> usize;
}

impl SignalPayload for ExportTraceServiceRequest {
    const KIND: SignalKind = SignalKind::Traces;

    fn item_count(&self) -> usize {
        self.resource_spans
            .iter()
            .flat_map(|resource_spans| resource_spans.scope_spans.iter())
            .map(|scope_spans| scope_spans.spans.len())
            .sum()
    }
}

impl SignalPayload for ExportMetricsServiceRequest {
    const KIND: SignalKind = SignalKind::Metrics;

    fn item_count(&self) -> usize {
        self.resource_metrics
            .iter()
            .flat_map(|resource_metrics| resource_metrics.scope_metrics.iter())
            .flat_map(|scope_metrics| scope_metrics.metrics.iter())
            .map(data_point_count)
            .sum()
    }
}

impl SignalPayload for ExportLogsServiceRequest {
    const KIND: SignalKind = SignalKind::Logs;

    fn item_count(&self) -> usize {
        self.resource_logs
            .iter()
            .flat_map(|resource_logs| resource_logs.scope_logs.iter())
            .map(|scope_logs| scope_logs.log_records.len())
            .sum()
    }
}

fn data_point_count(metric: &Metric) -> usize {
    match &metric.data {
        Some(MetricData::Gauge(gauge)) => gauge.data_points.len(),
        Some(MetricData::Sum(sum)) => sum.data_points.len(),
        Some(MetricData::Histogram(histogram)) => histogram.data_points.len(),
        Some(MetricData::ExponentialHistogram(histogram)) => histogram.data_points.len(),
        Some(MetricData::Summary(summary)) => summary.data_points.len(),
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry_proto::tonic::logs::v1::{LogRecord, ResourceLogs, ScopeLogs};
    use opentelemetry_proto::tonic::metrics::v1::{
        Gauge, Histogram, HistogramDataPoint, NumberDataPoint, ResourceMetrics, ScopeMetrics, Sum,
    };
    use opentelemetry_proto::tonic::trace::v1::{ResourceSpans, ScopeSpans, Span};

    fn metric(data: Option<MetricData>) -> Metric {
        Metric {
            name: "test_metric".to_string(),
            data,
            ..Default::default()
        }
    }

    #[test]
    fn test_trace_item_count_spans_all_scopes() {
        let request = ExportTraceServiceRequest {
            resource_spans: vec![
                ResourceSpans {
                    scope_spans: vec![
                        ScopeSpans {
                            spans: vec![Span::default(), Span::default()],
                            ..Default::default()
                        },
                        ScopeSpans {
                            spans: vec![Span::default()],
                            ..Default::default()
                        },
                    ],
                    ..Default::default()
                },
                ResourceSpans {
                    scope_spans: vec![ScopeSpans {
                        spans: vec![Span::default()],
                        ..Default::default()
                    }],
                    ..Default::default()
                },
            ],
        };

        assert_eq!(request.item_count(), 4);
        assert_eq!(ExportTraceServiceRequest::KIND, SignalKind::Traces);
    }

    #[test]
    fn test_metric_item_count_counts_data_points() {
        let request = ExportMetricsServiceRequest {
            resource_metrics: vec![ResourceMetrics {
                scope_metrics: vec![ScopeMetrics {
                    metrics: vec![
                        metric(Some(MetricData::Gauge(Gauge {
                            data_points: vec![NumberDataPoint::default(); 2],
                        }))),
                        metric(Some(MetricData::Sum(Sum {
                            data_points: vec![NumberDataPoint::default(); 3],
                            ..Default::default()
                        }))),
                        metric(Some(MetricData::Histogram(Histogram {
                            data_points: vec![HistogramDataPoint::default()],
                            ..Default::default()
                        }))),
                        metric(None),
                    ],
                    ..Default::default()
                }],
                ..Default::default()
            }],
        };

        assert_eq!(request.item_count(), 6);
    }

    #[test]
    fn test_log_item_count() {
        let request = ExportLogsServiceRequest {
            resource_logs: vec![ResourceLogs {
                scope_logs: vec![ScopeLogs {
                    log_records: vec![LogRecord::default(); 5],
                    ..Default::default()
                }],
                ..Default::default()
            }],
        };

        assert_eq!(request.item_count(), 5);
        assert_eq!(ExportTraceServiceRequest::default().item_count(), 0);
    }

    #[test]
    fn test_signal_kind_paths() {
        assert_eq!(SignalKind::Traces.v2_path(), "/v2/traces");
        assert_eq!(SignalKind::Metrics.default_v1_path(), "/v1/metrics");
        assert_eq!(SignalKind::Logs.to_string(), "logs");
    }
}
