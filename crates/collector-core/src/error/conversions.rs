//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Error conversions for the telemetry collector
//!
//! This module provides error conversion implementations for common error types.

use super::types::CollectorError;

impl From<std::io::Error> for CollectorError {
    fn from(err: std::io::Error) -> Self {
        CollectorError::network_with_source("IO error", err)
    }
}

impl From<serde_json::Error> for CollectorError {
    fn from(err: serde_json::Error) -> Self {
        CollectorError::serialization_with_source("JSON serialization error", err)
    }
}

impl From<prost::DecodeError> for CollectorError {
    fn from(err: prost::DecodeError) -> Self {
        CollectorError::decode_with_source("Protobuf decode error", err)
    }
}

impl From<tonic::transport::Error> for CollectorError {
    fn from(err: tonic::transport::Error) -> Self {
        CollectorError::network_with_source("gRPC transport error", err)
    }
}

impl From<tokio::time::error::Elapsed> for CollectorError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        CollectorError::timeout_with_source("Operation timeout", err)
    }
}

impl From<tokio::task::JoinError> for CollectorError {
    fn from(err: tokio::task::JoinError) -> Self {
        CollectorError::internal_with_source("Background task failed", err)
    }
}

impl From<config::ConfigError> for CollectorError {
    fn from(err: config::ConfigError) -> Self {
        CollectorError::configuration_with_source(err.to_string(), err)
    }
}

impl From<validator::ValidationErrors> for CollectorError {
    fn from(err: validator::ValidationErrors) -> Self {
        CollectorError::validation_with_source(err.to_string(), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let collector_err: CollectorError = io_err.into();
        assert!(matches!(collector_err, CollectorError::Network { .. }));
    }

    #[test]
    fn test_decode_error_conversion() {
        use prost::Message;

        use opentelemetry_proto::tonic::collector::trace::v1::ExportTraceServiceRequest;

        let err = ExportTraceServiceRequest::decode(&[0xff, 0xff, 0xff][..]).unwrap_err();
        let collector_err: CollectorError = err.into();
        assert!(matches!(collector_err, CollectorError::Decode { .. }));
        assert!(collector_err.is_permanent());
    }
}
