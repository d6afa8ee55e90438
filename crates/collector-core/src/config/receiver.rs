//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Receiver configuration
//!
//! This module provides the listener, routing and authentication settings of
//! the OTLP receiver.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::time::Duration;
use validator::{Validate, ValidationError};

use crate::types::SignalKind;
use crate::{
    DEFAULT_GRPC_ENDPOINT, DEFAULT_HTTP_ENDPOINT, DEFAULT_HTTP_SHUTDOWN_GRACE_MS,
    DEFAULT_MAX_REQUEST_SIZE,
};

/// Authentication policy applied to v2 HTTP endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthPolicy {
    /// Require a key id on v2 endpoints
    pub required: bool,

    /// Accepted key ids; empty accepts any well-formed key id
    pub allow_list: HashSet<String>,

    /// Require a well-formed key secret as well
    pub validate_secret: bool,
}

impl Default for AuthPolicy {
    fn default() -> Self {
        Self {
            required: true,
            allow_list: HashSet::new(),
            validate_secret: false,
        }
    }
}

impl AuthPolicy {
    /// Policy that lets every v2 request through
    pub fn disabled() -> Self {
        Self {
            required: false,
            ..Default::default()
        }
    }

    /// Policy that requires a key id from the given set
    pub fn allow<I, S>(key_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            required: true,
            allow_list: key_ids.into_iter().map(Into::into).collect(),
            validate_secret: false,
        }
    }
}

/// OTLP receiver configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ReceiverConfig {
    /// Build and start the receiver
    pub enabled: bool,

    /// Serve OTLP over gRPC
    pub grpc_enabled: bool,

    /// gRPC listen address; no gRPC listener when unset or empty
    #[serde(deserialize_with = "empty_as_none")]
    #[validate(length(min = 1))]
    pub grpc_endpoint: Option<String>,

    /// Serve OTLP over HTTP
    pub http_enabled: bool,

    /// HTTP listen address; no HTTP listener when unset or empty
    #[serde(deserialize_with = "empty_as_none")]
    #[validate(length(min = 1))]
    pub http_endpoint: Option<String>,

    /// v1 HTTP path for traces
    #[validate(custom(function = "validate_base_path"))]
    pub traces_path: String,

    /// v1 HTTP path for metrics
    #[validate(custom(function = "validate_base_path"))]
    pub metrics_path: String,

    /// v1 HTTP path for logs
    #[validate(custom(function = "validate_base_path"))]
    pub logs_path: String,

    /// Register the fixed v2 HTTP paths
    pub enable_v2: bool,

    /// Maximum accepted request body (HTTP) or message (gRPC) size in bytes
    #[validate(range(min = 1024))]
    pub max_request_body_bytes: usize,

    /// Grace period for in-flight HTTP requests on shutdown, in milliseconds
    pub http_shutdown_grace_ms: u64,

    /// Authentication policy for v2 endpoints
    pub auth: AuthPolicy,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            grpc_enabled: true,
            grpc_endpoint: Some(DEFAULT_GRPC_ENDPOINT.to_string()),
            http_enabled: true,
            http_endpoint: Some(DEFAULT_HTTP_ENDPOINT.to_string()),
            traces_path: SignalKind::Traces.default_v1_path().to_string(),
            metrics_path: SignalKind::Metrics.default_v1_path().to_string(),
            logs_path: SignalKind::Logs.default_v1_path().to_string(),
            enable_v2: true,
            max_request_body_bytes: DEFAULT_MAX_REQUEST_SIZE,
            http_shutdown_grace_ms: DEFAULT_HTTP_SHUTDOWN_GRACE_MS,
            auth: AuthPolicy::default(),
        }
    }
}

impl ReceiverConfig {
    /// Configuration listening on the given addresses, other settings default
    pub fn with_endpoints(grpc_endpoint: Option<&str>, http_endpoint: Option<&str>) -> Self {
        Self {
            grpc_endpoint: grpc_endpoint.map(str::to_string),
            http_endpoint: http_endpoint.map(str::to_string),
            ..Default::default()
        }
    }

    /// gRPC address to bind, if the gRPC listener is enabled
    pub fn grpc_address(&self) -> Option<&str> {
        self.grpc_endpoint.as_deref().filter(|_| self.grpc_enabled)
    }

    /// HTTP address to bind, if the HTTP listener is enabled
    pub fn http_address(&self) -> Option<&str> {
        self.http_endpoint.as_deref().filter(|_| self.http_enabled)
    }

    pub fn http_shutdown_grace(&self) -> Duration {
        Duration::from_millis(self.http_shutdown_grace_ms)
    }

    /// Configured v1 path for a signal kind
    pub fn v1_path(&self, kind: SignalKind) -> &str {
        match kind {
            SignalKind::Traces => &self.traces_path,
            SignalKind::Metrics => &self.metrics_path,
            SignalKind::Logs => &self.logs_path,
        }
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|endpoint| !endpoint.trim().is_empty()))
}

fn validate_base_path(path: &str) -> Result<(), ValidationError> {
    if !path.starts_with('/') {
        return Err(ValidationError::new("path_must_start_with_slash"));
    }
    if path.contains(['{', '}', '*', ':']) {
        return Err(ValidationError::new("path_must_be_literal"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_receiver_config() {
        let config = ReceiverConfig::default();
        assert!(config.enabled);
        assert!(config.enable_v2);
        assert_eq!(config.grpc_endpoint.as_deref(), Some("0.0.0.0:4317"));
        assert_eq!(config.http_endpoint.as_deref(), Some("0.0.0.0:4318"));
        assert_eq!(config.v1_path(SignalKind::Traces), "/v1/traces");
        assert_eq!(config.v1_path(SignalKind::Metrics), "/v1/metrics");
        assert_eq!(config.v1_path(SignalKind::Logs), "/v1/logs");
        assert!(config.auth.required);
        assert!(config.auth.allow_list.is_empty());
        assert_eq!(config.http_shutdown_grace(), Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_listener_flags_gate_addresses() {
        let config = ReceiverConfig {
            grpc_enabled: false,
            ..Default::default()
        };
        assert_eq!(config.grpc_address(), None);
        assert_eq!(config.http_address(), Some("0.0.0.0:4318"));

        let config = ReceiverConfig::with_endpoints(None, Some("127.0.0.1:0"));
        assert_eq!(config.grpc_address(), None);
        assert_eq!(config.http_address(), Some("127.0.0.1:0"));
    }

    #[test]
    fn test_relative_path_is_rejected() {
        let config = ReceiverConfig {
            traces_path: "v1/traces".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_path_with_parameters_is_rejected() {
        let config = ReceiverConfig {
            logs_path: "/v1/{tenant}/logs".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_auth_policy_constructors() {
        let policy = AuthPolicy::allow(["tfk_a", "tfk_b"]);
        assert!(policy.required);
        assert!(policy.allow_list.contains("tfk_a"));
        assert_eq!(policy.allow_list.len(), 2);

        assert!(!AuthPolicy::disabled().required);
    }
}
