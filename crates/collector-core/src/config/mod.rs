//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Configuration for the telemetry collector
//!
//! Configuration is fully resolved before any component is built; the
//! receiver, pipeline and supervisor never read files or the environment.

pub mod collector;
pub mod receiver;

pub use collector::{
    CollectorConfig, ExportersConfig, LoggingExporterConfig, StatusConfig, SupervisorConfig,
    DEFAULT_CONFIG_PATH,
};
pub use receiver::{AuthPolicy, ReceiverConfig};
