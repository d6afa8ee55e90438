//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Pipeline counters
//!
//! Six independent atomic counters. All operations use relaxed ordering;
//! there is no cross-counter consistency.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::types::SignalKind;

/// Live pipeline counters
#[derive(Debug, Default)]
pub struct PipelineCounters {
    traces_processed: AtomicU64,
    metrics_processed: AtomicU64,
    logs_processed: AtomicU64,
    traces_dropped: AtomicU64,
    metrics_dropped: AtomicU64,
    logs_dropped: AtomicU64,
}

impl PipelineCounters {
    /// Create counters, all at zero
    pub const fn new() -> Self {
        Self {
            traces_processed: AtomicU64::new(0),
            metrics_processed: AtomicU64::new(0),
            logs_processed: AtomicU64::new(0),
            traces_dropped: AtomicU64::new(0),
            metrics_dropped: AtomicU64::new(0),
            logs_dropped: AtomicU64::new(0),
        }
    }

    /// Record items entering the pipeline
    #[inline]
    pub fn record_processed(&self, kind: SignalKind, items: u64) {
        let counter = match kind {
            SignalKind::Traces => &self.traces_processed,
            SignalKind::Metrics => &self.metrics_processed,
            SignalKind::Logs => &self.logs_processed,
        };
        counter.fetch_add(items, Ordering::Relaxed);
    }

    /// Record items that had no destination
    #[inline]
    pub fn record_dropped(&self, kind: SignalKind, items: u64) {
        let counter = match kind {
            SignalKind::Traces => &self.traces_dropped,
            SignalKind::Metrics => &self.metrics_dropped,
            SignalKind::Logs => &self.logs_dropped,
        };
        counter.fetch_add(items, Ordering::Relaxed);
    }

    /// Get a point-in-time copy of all counters
    pub fn snapshot(&self) -> PipelineStats {
        PipelineStats {
            traces_processed: self.traces_processed.load(Ordering::Relaxed),
            metrics_processed: self.metrics_processed.load(Ordering::Relaxed),
            logs_processed: self.logs_processed.load(Ordering::Relaxed),
            traces_dropped: self.traces_dropped.load(Ordering::Relaxed),
            metrics_dropped: self.metrics_dropped.load(Ordering::Relaxed),
            logs_dropped: self.logs_dropped.load(Ordering::Relaxed),
        }
    }
}

/// Pipeline statistics snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineStats {
    /// Spans handed to the pipeline
    pub traces_processed: u64,

    /// Metric data points handed to the pipeline
    pub metrics_processed: u64,

    /// Log records handed to the pipeline
    pub logs_processed: u64,

    /// Spans with no registered sink
    pub traces_dropped: u64,

    /// Metric data points with no registered sink
    pub metrics_dropped: u64,

    /// Log records with no registered sink
    pub logs_dropped: u64,
}

impl PipelineStats {
    /// Processed count for one kind
    pub fn processed(&self, kind: SignalKind) -> u64 {
        match kind {
            SignalKind::Traces => self.traces_processed,
            SignalKind::Metrics => self.metrics_processed,
            SignalKind::Logs => self.logs_processed,
        }
    }

    /// Dropped count for one kind
    pub fn dropped(&self, kind: SignalKind) -> u64 {
        match kind {
            SignalKind::Traces => self.traces_dropped,
            SignalKind::Metrics => self.metrics_dropped,
            SignalKind::Logs => self.logs_dropped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_are_independent_per_kind() {
        let counters = PipelineCounters::new();
        counters.record_processed(SignalKind::Traces, 3);
        counters.record_processed(SignalKind::Logs, 5);
        counters.record_dropped(SignalKind::Logs, 5);

        let stats = counters.snapshot();
        assert_eq!(stats.processed(SignalKind::Traces), 3);
        assert_eq!(stats.processed(SignalKind::Metrics), 0);
        assert_eq!(stats.processed(SignalKind::Logs), 5);
        assert_eq!(stats.dropped(SignalKind::Traces), 0);
        assert_eq!(stats.dropped(SignalKind::Logs), 5);
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let counters = PipelineCounters::default();
        let before = counters.snapshot();
        counters.record_processed(SignalKind::Metrics, 1);

        assert_eq!(before.metrics_processed, 0);
        assert_eq!(counters.snapshot().metrics_processed, 1);
    }
}
