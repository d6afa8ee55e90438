//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Supervisor types

use collector_core::PipelineStats;
use ingestion::ReceiverStats;
use serde::{Serialize, Serializer};
use std::time::Duration;

use crate::state::SupervisorState;

/// Point-in-time view of the collector
#[derive(Debug, Clone, Serialize)]
pub struct SupervisorStats {
    /// Collector instance id
    pub id: String,

    /// Host the collector runs on
    pub hostname: String,

    pub state: SupervisorState,

    pub running: bool,

    /// Time since the current run began; zero unless running
    #[serde(rename = "uptime_secs", serialize_with = "serialize_secs")]
    pub uptime: Duration,

    pub receiver: ReceiverStats,

    pub pipeline: PipelineStats,
}

fn serialize_secs<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}
