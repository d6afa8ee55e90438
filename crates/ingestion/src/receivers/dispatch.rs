//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Shared decode-count-dispatch path for both protocols

use collector_core::{
    AuthPolicy, CollectorResult, LogsPayload, MetricsPayload, SignalPayload, TelemetryBatch,
    TelemetrySink, TracesPayload,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error};

use super::context::EndpointContext;
use super::stats::ReceiverCounters;

type ConsumerSlot<P> = RwLock<Option<Arc<dyn TelemetrySink<P>>>>;

/// Registered consumer per signal kind
#[derive(Default)]
pub(crate) struct ConsumerRegistry {
    traces: ConsumerSlot<TracesPayload>,
    metrics: ConsumerSlot<MetricsPayload>,
    logs: ConsumerSlot<LogsPayload>,
}

/// State shared by the receiver and its server tasks
pub(crate) struct ReceiverShared {
    pub(crate) consumers: ConsumerRegistry,
    pub(crate) counters: ReceiverCounters,
    pub(crate) auth: AuthPolicy,
    pub(crate) max_body_bytes: usize,
}

impl ReceiverShared {
    pub(crate) fn new(auth: AuthPolicy, max_body_bytes: usize) -> Self {
        Self {
            consumers: ConsumerRegistry::default(),
            counters: ReceiverCounters::new(),
            auth,
            max_body_bytes,
        }
    }
}

/// OTLP request type routed through the receiver
pub(crate) trait RoutedSignal:
    SignalPayload + prost::Message + Default + DeserializeOwned
{
    fn consumer_slot(consumers: &ConsumerRegistry) -> &ConsumerSlot<Self>;
}

impl RoutedSignal for TracesPayload {
    fn consumer_slot(consumers: &ConsumerRegistry) -> &ConsumerSlot<Self> {
        &consumers.traces
    }
}

impl RoutedSignal for MetricsPayload {
    fn consumer_slot(consumers: &ConsumerRegistry) -> &ConsumerSlot<Self> {
        &consumers.metrics
    }
}

impl RoutedSignal for LogsPayload {
    fn consumer_slot(consumers: &ConsumerRegistry) -> &ConsumerSlot<Self> {
        &consumers.logs
    }
}

/// Count a decoded payload and hand it to the registered consumer
pub(crate) async fn dispatch<P: RoutedSignal>(
    shared: &ReceiverShared,
    payload: P,
    context: &EndpointContext,
) -> CollectorResult<()> {
    let batch = TelemetryBatch::new(payload, context.source());
    shared.counters.record_received(P::KIND, batch.size);

    let consumer = P::consumer_slot(&shared.consumers).read().await.clone();
    let Some(consumer) = consumer else {
        debug!(signal = %P::KIND, size = batch.size, "No consumer registered, batch discarded");
        return Ok(());
    };

    debug!(
        signal = %P::KIND,
        size = batch.size,
        source = %batch.source,
        consumer = consumer.name(),
        "Dispatching batch"
    );

    consumer.consume(&batch).await.map_err(|e| {
        error!(
            signal = %P::KIND,
            batch_id = %batch.id,
            consumer = consumer.name(),
            "Consumer failed to accept batch: {}",
            e
        );
        e
    })
}
