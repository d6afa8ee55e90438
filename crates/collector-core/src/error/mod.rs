//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Error handling for the telemetry collector
//!
//! This module provides the structured error type shared by the receiver,
//! the fan-out pipeline and the supervisor.

pub mod context;
pub mod conversions;
pub mod types;

// Re-export commonly used types
pub use context::ErrorContext;
pub use types::{CollectorError, CollectorResult};
