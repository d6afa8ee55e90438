//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Shared fixtures for ingestion tests

#![allow(dead_code)]

use async_trait::async_trait;
use collector_core::{
    CollectorError, CollectorResult, LogsPayload, MetricsPayload, SignalPayload, TelemetryBatch,
    TelemetrySink, TracesPayload,
};
use opentelemetry_proto::tonic::logs::v1::{LogRecord, ResourceLogs, ScopeLogs};
use opentelemetry_proto::tonic::metrics::v1::{
    metric::Data, number_data_point::Value, Gauge, Metric, NumberDataPoint, ResourceMetrics,
    ScopeMetrics,
};
use opentelemetry_proto::tonic::trace::v1::{ResourceSpans, ScopeSpans, Span};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Sink that records the sizes of the batches it receives
#[derive(Default)]
pub struct RecordingSink {
    calls: AtomicUsize,
    completed: AtomicUsize,
    sizes: Mutex<Vec<usize>>,
    sources: Mutex<Vec<String>>,
    fail: bool,
    delay: Option<Duration>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    /// Sink that holds every batch for `delay` before accepting it
    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Default::default()
        }
    }

    pub async fn wait_for_calls(&self, expected: usize) {
        for _ in 0..200 {
            if self.calls() >= expected {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("sink saw {} calls, expected {}", self.calls(), expected);
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn sizes(&self) -> Vec<usize> {
        self.sizes.lock().unwrap().clone()
    }

    pub fn sources(&self) -> Vec<String> {
        self.sources.lock().unwrap().clone()
    }
}

#[async_trait]
impl<P: SignalPayload> TelemetrySink<P> for RecordingSink {
    async fn consume(&self, batch: &TelemetryBatch<P>) -> CollectorResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.sizes.lock().unwrap().push(batch.size);
        self.sources.lock().unwrap().push(batch.source.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.completed.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(CollectorError::export("recording sink rejected batch"));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "recording"
    }
}

pub fn traces(span_count: usize) -> TracesPayload {
    let spans = (0..span_count)
        .map(|i| Span {
            trace_id: vec![7; 16],
            span_id: vec![i as u8 + 1; 8],
            name: format!("span-{i}"),
            ..Default::default()
        })
        .collect();

    TracesPayload {
        resource_spans: vec![ResourceSpans {
            scope_spans: vec![ScopeSpans {
                spans,
                ..Default::default()
            }],
            ..Default::default()
        }],
    }
}

pub fn metrics(point_count: usize) -> MetricsPayload {
    let data_points = (0..point_count)
        .map(|i| NumberDataPoint {
            value: Some(Value::AsInt(i as i64)),
            ..Default::default()
        })
        .collect();

    MetricsPayload {
        resource_metrics: vec![ResourceMetrics {
            scope_metrics: vec![ScopeMetrics {
                metrics: vec![Metric {
                    name: "queue.depth".to_string(),
                    data: Some(Data::Gauge(Gauge { data_points })),
                    ..Default::default()
                }],
                ..Default::default()
            }],
            ..Default::default()
        }],
    }
}

pub fn logs(record_count: usize) -> LogsPayload {
    LogsPayload {
        resource_logs: vec![ResourceLogs {
            scope_logs: vec![ScopeLogs {
                log_records: (0..record_count).map(|_| LogRecord::default()).collect(),
                ..Default::default()
            }],
            ..Default::default()
        }],
    }
}
