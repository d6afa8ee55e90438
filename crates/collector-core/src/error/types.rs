//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Error types for the telemetry collector
//!
//! This module provides the main error type and result alias used throughout
//! the collector.

use std::error::Error as StdError;
use thiserror::Error;

/// Result type for collector operations
pub type CollectorResult<T> = Result<T, CollectorError>;

/// Main error type for the collector
#[derive(Error, Debug)]
pub enum CollectorError {
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// Configuration validation errors
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// Wire payload decoding errors
    #[error("Decode error: {message}")]
    Decode {
        message: String,
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// Authentication and authorization errors
    #[error("Authentication error: {message}")]
    Authentication {
        message: String,
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// Consumer and sink errors
    #[error("Export error: {message}")]
    Export {
        message: String,
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// Component startup errors
    #[error("Startup error: {message}")]
    Startup {
        message: String,
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// Component shutdown errors
    #[error("Shutdown error: {message}")]
    Shutdown {
        message: String,
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// Network and transport errors
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// Timeout errors
    #[error("Timeout error: {message}")]
    Timeout {
        message: String,
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// Internal errors
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },
}

impl CollectorError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        CollectorError::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        CollectorError::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        CollectorError::Validation {
            message: message.into(),
            source: None,
        }
    }

    /// Create a validation error with source
    pub fn validation_with_source(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        CollectorError::Validation {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        CollectorError::Decode {
            message: message.into(),
            source: None,
        }
    }

    /// Create a decode error with source
    pub fn decode_with_source(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        CollectorError::Decode {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an authentication error
    pub fn authentication(message: impl Into<String>) -> Self {
        CollectorError::Authentication {
            message: message.into(),
            source: None,
        }
    }

    /// Create an authentication error with source
    pub fn authentication_with_source(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        CollectorError::Authentication {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an export error
    pub fn export(message: impl Into<String>) -> Self {
        CollectorError::Export {
            message: message.into(),
            source: None,
        }
    }

    /// Create an export error with source
    pub fn export_with_source(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        CollectorError::Export {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a startup error
    pub fn startup(message: impl Into<String>) -> Self {
        CollectorError::Startup {
            message: message.into(),
            source: None,
        }
    }

    /// Create a startup error with source
    pub fn startup_with_source(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        CollectorError::Startup {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a shutdown error
    pub fn shutdown(message: impl Into<String>) -> Self {
        CollectorError::Shutdown {
            message: message.into(),
            source: None,
        }
    }

    /// Create a shutdown error with source
    pub fn shutdown_with_source(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        CollectorError::Shutdown {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a network error
    pub fn network(message: impl Into<String>) -> Self {
        CollectorError::Network {
            message: message.into(),
            source: None,
        }
    }

    /// Create a network error with source
    pub fn network_with_source(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        CollectorError::Network {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        CollectorError::Serialization {
            message: message.into(),
            source: None,
        }
    }

    /// Create a serialization error with source
    pub fn serialization_with_source(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        CollectorError::Serialization {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a timeout error
    pub fn timeout(message: impl Into<String>) -> Self {
        CollectorError::Timeout {
            message: message.into(),
            source: None,
        }
    }

    /// Create a timeout error with source
    pub fn timeout_with_source(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        CollectorError::Timeout {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        CollectorError::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Create an internal error with source
    pub fn internal_with_source(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        CollectorError::Internal {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get the message without the category prefix
    pub fn message(&self) -> &str {
        match self {
            CollectorError::Configuration { message, .. } => message,
            CollectorError::Validation { message, .. } => message,
            CollectorError::Decode { message, .. } => message,
            CollectorError::Authentication { message, .. } => message,
            CollectorError::Export { message, .. } => message,
            CollectorError::Startup { message, .. } => message,
            CollectorError::Shutdown { message, .. } => message,
            CollectorError::Network { message, .. } => message,
            CollectorError::Serialization { message, .. } => message,
            CollectorError::Timeout { message, .. } => message,
            CollectorError::Internal { message, .. } => message,
        }
    }

    /// Check if the error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CollectorError::Network { .. } | CollectorError::Timeout { .. }
        )
    }

    /// Check if the error is permanent
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            CollectorError::Configuration { .. }
                | CollectorError::Validation { .. }
                | CollectorError::Decode { .. }
                | CollectorError::Authentication { .. }
        )
    }

    /// Get error context for logging
    pub fn context(&self) -> crate::error::ErrorContext {
        crate::error::ErrorContext {
            error_type: self.error_type(),
            retryable: self.is_retryable(),
            permanent: self.is_permanent(),
        }
    }

    /// Get the error type as a string
    pub fn error_type(&self) -> &'static str {
        match self {
            CollectorError::Configuration { .. } => "Configuration",
            CollectorError::Validation { .. } => "Validation",
            CollectorError::Decode { .. } => "Decode",
            CollectorError::Authentication { .. } => "Authentication",
            CollectorError::Export { .. } => "Export",
            CollectorError::Startup { .. } => "Startup",
            CollectorError::Shutdown { .. } => "Shutdown",
            CollectorError::Network { .. } => "Network",
            CollectorError::Serialization { .. } => "Serialization",
            CollectorError::Timeout { .. } => "Timeout",
            CollectorError::Internal { .. } => "Internal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = CollectorError::configuration("Invalid config");
        assert!(matches!(config_err, CollectorError::Configuration { .. }));
        assert!(!config_err.is_retryable());
        assert!(config_err.is_permanent());

        let network_err = CollectorError::network("Connection failed");
        assert!(matches!(network_err, CollectorError::Network { .. }));
        assert!(network_err.is_retryable());
        assert!(!network_err.is_permanent());
    }

    #[test]
    fn test_error_display_and_message() {
        let err = CollectorError::export("sink rejected batch");
        assert_eq!(err.to_string(), "Export error: sink rejected batch");
        assert_eq!(err.message(), "sink rejected batch");
    }

    #[test]
    fn test_error_source_is_preserved() {
        let io_err = std::io::Error::new(std::io::ErrorKind::AddrInUse, "address in use");
        let err = CollectorError::startup_with_source("failed to bind", io_err);
        let source = err.source().expect("source should be set");
        assert_eq!(source.to_string(), "address in use");
    }

    #[test]
    fn test_error_context() {
        let err = CollectorError::timeout("Operation timed out");
        let context = err.context();
        assert_eq!(context.error_type, "Timeout");
        assert!(context.retryable);
        assert!(!context.permanent);
    }
}
