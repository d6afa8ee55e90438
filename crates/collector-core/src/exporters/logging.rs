//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Logging sink
//!
//! Writes a summary of every batch to the tracing subscriber. Useful as a
//! default destination and while debugging collector deployments.

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::LoggingExporterConfig;
use crate::error::CollectorResult;
use crate::traits::TelemetrySink;
use crate::types::{SignalPayload, TelemetryBatch};

/// Sink that logs each batch it receives
#[derive(Debug, Clone)]
pub struct LoggingSink {
    name: String,
    detailed: bool,
}

impl LoggingSink {
    pub fn new(name: impl Into<String>, detailed: bool) -> Self {
        Self {
            name: name.into(),
            detailed,
        }
    }

    pub fn from_config(config: &LoggingExporterConfig) -> Self {
        Self::new("logging", config.detailed)
    }

    pub fn is_detailed(&self) -> bool {
        self.detailed
    }
}

#[async_trait]
impl<P> TelemetrySink<P> for LoggingSink
where
    P: SignalPayload + Serialize,
{
    async fn consume(&self, batch: &TelemetryBatch<P>) -> CollectorResult<()> {
        if batch.is_empty() {
            debug!(
                sink = %self.name,
                signal = %batch.kind(),
                batch_id = %batch.id,
                source = %batch.source,
                "Received empty telemetry batch"
            );
            return Ok(());
        }

        info!(
            sink = %self.name,
            signal = %batch.kind(),
            batch_id = %batch.id,
            source = %batch.source,
            received_at = %batch.timestamp,
            size = batch.size,
            "Received telemetry batch"
        );

        if self.detailed {
            match serde_json::to_string(&batch.payload) {
                Ok(payload) => {
                    debug!(sink = %self.name, batch_id = %batch.id, %payload, "Batch payload")
                }
                Err(e) => warn!(
                    sink = %self.name,
                    batch_id = %batch.id,
                    "Failed to render batch payload: {}",
                    e
                ),
            }
        }

        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
