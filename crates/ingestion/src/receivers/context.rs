//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Per-request endpoint context

use axum::http::{header::CONTENT_TYPE, HeaderMap};
use collector_core::SignalKind;
use std::fmt;

/// Content type selecting OTLP/JSON decoding
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Wire protocol a request arrived on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Grpc,
    Http,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Grpc => write!(f, "grpc"),
            Protocol::Http => write!(f, "http"),
        }
    }
}

/// Payload encoding of a request body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentEncoding {
    Protobuf,
    Json,
}

impl ContentEncoding {
    /// JSON only for exactly `application/json`; anything else, including a
    /// missing header, is protobuf
    pub fn from_content_type(content_type: Option<&str>) -> Self {
        match content_type {
            Some(JSON_CONTENT_TYPE) => ContentEncoding::Json,
            _ => ContentEncoding::Protobuf,
        }
    }
}

/// Facts about one ingestion request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointContext {
    pub protocol: Protocol,
    pub path: String,
    pub encoding: ContentEncoding,
    pub is_v2: bool,
}

impl EndpointContext {
    /// Context of an HTTP request
    pub fn http(path: &str, headers: &HeaderMap) -> Self {
        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok());

        Self {
            protocol: Protocol::Http,
            path: path.to_string(),
            encoding: ContentEncoding::from_content_type(content_type),
            is_v2: is_v2_path(path),
        }
    }

    /// Context of a gRPC export call
    pub fn grpc(kind: SignalKind) -> Self {
        let path = match kind {
            SignalKind::Traces => "/opentelemetry.proto.collector.trace.v1.TraceService/Export",
            SignalKind::Metrics => {
                "/opentelemetry.proto.collector.metrics.v1.MetricsService/Export"
            }
            SignalKind::Logs => "/opentelemetry.proto.collector.logs.v1.LogsService/Export",
        };

        Self {
            protocol: Protocol::Grpc,
            path: path.to_string(),
            encoding: ContentEncoding::Protobuf,
            is_v2: false,
        }
    }

    /// Batch source label, e.g. `http/v2` or `grpc`
    pub fn source(&self) -> String {
        match self.protocol {
            Protocol::Grpc => self.protocol.to_string(),
            Protocol::Http if self.is_v2 => format!("{}/v2", self.protocol),
            Protocol::Http => format!("{}/v1", self.protocol),
        }
    }
}

/// Whether a path is one of the fixed v2 paths
pub fn is_v2_path(path: &str) -> bool {
    SignalKind::ALL.iter().any(|kind| kind.v2_path() == path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_encoding_from_content_type() {
        assert_eq!(
            ContentEncoding::from_content_type(Some("application/json")),
            ContentEncoding::Json
        );
        assert_eq!(
            ContentEncoding::from_content_type(Some("application/x-protobuf")),
            ContentEncoding::Protobuf
        );
        assert_eq!(
            ContentEncoding::from_content_type(Some("application/json; charset=utf-8")),
            ContentEncoding::Protobuf
        );
        assert_eq!(
            ContentEncoding::from_content_type(None),
            ContentEncoding::Protobuf
        );
    }

    #[test]
    fn test_http_context() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let context = EndpointContext::http("/v2/logs", &headers);
        assert_eq!(context.protocol, Protocol::Http);
        assert_eq!(context.encoding, ContentEncoding::Json);
        assert!(context.is_v2);
        assert_eq!(context.source(), "http/v2");

        let context = EndpointContext::http("/v1/logs", &HeaderMap::new());
        assert!(!context.is_v2);
        assert_eq!(context.encoding, ContentEncoding::Protobuf);
        assert_eq!(context.source(), "http/v1");
    }

    #[test]
    fn test_custom_v1_path_is_not_v2() {
        assert!(!is_v2_path("/ingest/v2/traces"));
        assert!(!is_v2_path("/v2/traces/"));
        assert!(is_v2_path("/v2/metrics"));
    }

    #[test]
    fn test_grpc_context() {
        let context = EndpointContext::grpc(SignalKind::Metrics);
        assert_eq!(context.protocol, Protocol::Grpc);
        assert!(!context.is_v2);
        assert_eq!(context.source(), "grpc");
        assert!(context.path.ends_with("MetricsService/Export"));
    }
}
