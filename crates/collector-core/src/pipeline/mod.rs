//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Fan-out pipeline for the collector
//!
//! The pipeline delivers every consumed batch to all sinks registered for the
//! batch's signal kind, in registration order, and keeps per-kind counters.
//!
//! ```text
//! [Receiver] ──→ Pipeline::consume_* ──→ sink #0 ──→ sink #1 ──→ ... (same batch)
//!                      │
//!                      └──→ no sinks: counted as dropped
//! ```

pub mod fanout;
pub mod state;

pub use fanout::Pipeline;
pub use state::{PipelineCounters, PipelineStats};
