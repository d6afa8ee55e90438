//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Receiver counters

use collector_core::SignalKind;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Received item counters, one per signal kind
#[derive(Debug, Default)]
pub struct ReceiverCounters {
    traces_received: AtomicU64,
    metrics_received: AtomicU64,
    logs_received: AtomicU64,
}

impl ReceiverCounters {
    pub const fn new() -> Self {
        Self {
            traces_received: AtomicU64::new(0),
            metrics_received: AtomicU64::new(0),
            logs_received: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn record_received(&self, kind: SignalKind, items: usize) {
        self.counter(kind)
            .fetch_add(items as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> ReceiverStats {
        ReceiverStats {
            traces_received: self.traces_received.load(Ordering::Relaxed),
            metrics_received: self.metrics_received.load(Ordering::Relaxed),
            logs_received: self.logs_received.load(Ordering::Relaxed),
        }
    }

    fn counter(&self, kind: SignalKind) -> &AtomicU64 {
        match kind {
            SignalKind::Traces => &self.traces_received,
            SignalKind::Metrics => &self.metrics_received,
            SignalKind::Logs => &self.logs_received,
        }
    }
}

/// Point-in-time copy of the receiver counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiverStats {
    pub traces_received: u64,
    pub metrics_received: u64,
    pub logs_received: u64,
}

impl ReceiverStats {
    pub fn received(&self, kind: SignalKind) -> u64 {
        match kind {
            SignalKind::Traces => self.traces_received,
            SignalKind::Metrics => self.metrics_received,
            SignalKind::Logs => self.logs_received,
        }
    }
}
