//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! OTLP ingestion for the telemetry collector
//!
//! This crate provides the dual-protocol receiver: OTLP/gRPC and OTLP/HTTP
//! listeners, versioned HTTP routing with a key-based gate on v2 endpoints,
//! body decoding and per-kind dispatch to a registered consumer.

pub mod conversion;
pub mod receivers;
pub mod security;

pub use conversion::decode_payload;
pub use receivers::{
    ContentEncoding, EndpointContext, OtlpReceiver, Protocol, ReceiverHandle, ReceiverStats,
};
pub use security::{authenticate, AuthRejection};
