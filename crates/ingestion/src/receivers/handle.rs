//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Shared receiver handle
//!
//! The three per-kind constructors all resolve to the same receiver instance.
//! The first construction wins; later configurations are ignored.

use collector_core::{LogsSink, MetricsSink, ReceiverConfig, TracesSink};
use std::sync::{Arc, PoisonError};
use tracing::debug;

use super::otlp_receiver::{OtlpReceiver, ReceiverSlot};

/// Owner of the single live receiver
#[derive(Clone, Default)]
pub struct ReceiverHandle {
    slot: Arc<ReceiverSlot>,
}

impl ReceiverHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the live receiver, building it from `config` if there is none
    pub fn get_or_create(&self, config: &ReceiverConfig) -> Arc<OtlpReceiver> {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = slot.as_ref() {
            debug!("Reusing existing OTLP receiver");
            return existing.clone();
        }

        debug!("Creating OTLP receiver");
        let registry = Arc::downgrade(&self.slot);
        let receiver = Arc::new(OtlpReceiver::new(config.clone(), registry));
        *slot = Some(receiver.clone());
        receiver
    }

    /// Acquire the receiver and register its traces consumer
    pub async fn create_traces_receiver(
        &self,
        config: &ReceiverConfig,
        consumer: TracesSink,
    ) -> Arc<OtlpReceiver> {
        let receiver = self.get_or_create(config);
        receiver.register_traces_consumer(consumer).await;
        receiver
    }

    /// Acquire the receiver and register its metrics consumer
    pub async fn create_metrics_receiver(
        &self,
        config: &ReceiverConfig,
        consumer: MetricsSink,
    ) -> Arc<OtlpReceiver> {
        let receiver = self.get_or_create(config);
        receiver.register_metrics_consumer(consumer).await;
        receiver
    }

    /// Acquire the receiver and register its logs consumer
    pub async fn create_logs_receiver(
        &self,
        config: &ReceiverConfig,
        consumer: LogsSink,
    ) -> Arc<OtlpReceiver> {
        let receiver = self.get_or_create(config);
        receiver.register_logs_consumer(consumer).await;
        receiver
    }

    /// The live receiver, if any
    pub fn current(&self) -> Option<Arc<OtlpReceiver>> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
