//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Top-level collector configuration and loader

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use validator::Validate;

use super::receiver::ReceiverConfig;
use crate::error::{CollectorError, CollectorResult};
use crate::types::SignalKind;
use crate::{DEFAULT_SHUTDOWN_TIMEOUT_SECS, DEFAULT_STATUS_ENDPOINT};

/// Default configuration file location
pub const DEFAULT_CONFIG_PATH: &str = "config/collector.toml";

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "COLLECTOR";

/// Main collector configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CollectorConfig {
    /// Collector name
    #[validate(length(min = 1))]
    pub name: String,

    /// Supervisor settings
    #[validate(nested)]
    pub supervisor: SupervisorConfig,

    /// OTLP receiver settings
    #[validate(nested)]
    pub receiver: ReceiverConfig,

    /// Status server settings
    #[validate(nested)]
    pub status: StatusConfig,

    /// Built-in exporters
    pub exporters: ExportersConfig,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            name: crate::COLLECTOR_NAME.to_string(),
            supervisor: SupervisorConfig::default(),
            receiver: ReceiverConfig::default(),
            status: StatusConfig::default(),
            exporters: ExportersConfig::default(),
        }
    }
}

impl CollectorConfig {
    /// Load configuration from a file, overlaid with `COLLECTOR__*` environment variables
    pub fn from_file<P: AsRef<Path>>(path: P) -> CollectorResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CollectorError::configuration(format!(
                "configuration file not found: {}",
                path.display()
            )));
        }

        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string without environment overrides
    pub fn from_toml_str(content: &str) -> CollectorResult<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(content, config::FileFormat::Toml))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}

/// Supervisor settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct SupervisorConfig {
    /// Collector instance id; a random UUID is generated when unset
    pub id: Option<String>,

    /// Upper bound on the whole shutdown sequence
    #[validate(range(min = 1, max = 300))]
    pub shutdown_timeout_secs: u64,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            id: None,
            shutdown_timeout_secs: DEFAULT_SHUTDOWN_TIMEOUT_SECS,
        }
    }
}

impl SupervisorConfig {
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }
}

/// Status server settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct StatusConfig {
    pub enabled: bool,

    #[validate(length(min = 1))]
    pub endpoint: String,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: DEFAULT_STATUS_ENDPOINT.to_string(),
        }
    }
}

/// Built-in exporters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportersConfig {
    pub logging: LoggingExporterConfig,
}

/// Logging exporter settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingExporterConfig {
    pub enabled: bool,

    /// Signal kinds the logging exporter is registered for
    pub signals: Vec<SignalKind>,

    /// Also log each payload as JSON at debug level
    pub detailed: bool,
}

impl Default for LoggingExporterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            signals: SignalKind::ALL.to_vec(),
            detailed: false,
        }
    }
}

impl LoggingExporterConfig {
    pub fn exports(&self, kind: SignalKind) -> bool {
        self.enabled && self.signals.contains(&kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_is_valid() {
        let config = CollectorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(
            config.supervisor.shutdown_timeout(),
            Duration::from_secs(15)
        );
        assert!(config.supervisor.id.is_none());
        assert!(config.status.enabled);
        assert_eq!(config.status.endpoint, "0.0.0.0:13133");
        assert!(config.exporters.logging.exports(SignalKind::Logs));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(
            file,
            r#"
name = "edge-collector"

[supervisor]
id = "collector-7"
shutdown_timeout_secs = 5

[receiver]
grpc_endpoint = "127.0.0.1:14317"
http_endpoint = "127.0.0.1:14318"
traces_path = "/ingest/traces"
enable_v2 = false

[receiver.auth]
required = true
allow_list = ["tfk_a", "tfk_b"]
validate_secret = true

[status]
enabled = false

[exporters.logging]
signals = ["traces"]
detailed = true
"#
        )
        .unwrap();

        let config = CollectorConfig::from_file(file.path()).unwrap();
        assert_eq!(config.name, "edge-collector");
        assert_eq!(config.supervisor.id.as_deref(), Some("collector-7"));
        assert_eq!(config.supervisor.shutdown_timeout(), Duration::from_secs(5));
        assert_eq!(
            config.receiver.grpc_endpoint.as_deref(),
            Some("127.0.0.1:14317")
        );
        assert_eq!(config.receiver.traces_path, "/ingest/traces");
        assert_eq!(config.receiver.metrics_path, "/v1/metrics");
        assert!(!config.receiver.enable_v2);
        assert!(config.receiver.auth.validate_secret);
        assert!(config.receiver.auth.allow_list.contains("tfk_b"));
        assert!(!config.status.enabled);
        assert!(config.exporters.logging.exports(SignalKind::Traces));
        assert!(!config.exporters.logging.exports(SignalKind::Metrics));
        assert!(config.exporters.logging.detailed);
    }

    #[test]
    fn test_missing_file_is_configuration_error() {
        let err = CollectorConfig::from_file("/nonexistent/collector.toml").unwrap_err();
        assert!(matches!(err, CollectorError::Configuration { .. }));
    }

    #[test]
    fn test_out_of_range_timeout_is_rejected() {
        let err = CollectorConfig::from_toml_str(
            r#"
[supervisor]
shutdown_timeout_secs = 0
"#,
        )
        .unwrap_err();
        assert!(matches!(err, CollectorError::Validation { .. }));
        assert!(err.message().contains("supervisor.shutdown_timeout_secs"));
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = CollectorConfig::from_toml_str(
            r#"
[receiver]
http_endpoint = "127.0.0.1:0"
"#,
        )
        .unwrap();
        assert_eq!(
            config.receiver.http_endpoint.as_deref(),
            Some("127.0.0.1:0")
        );
        assert_eq!(
            config.receiver.grpc_endpoint.as_deref(),
            Some("0.0.0.0:4317")
        );
        assert!(config.receiver.enable_v2);
        assert_eq!(config.supervisor.shutdown_timeout_secs, 15);
    }

    #[test]
    fn test_http_only_receiver() {
        let config = CollectorConfig::from_toml_str(
            r#"
[receiver]
grpc_endpoint = ""
http_endpoint = "127.0.0.1:0"
"#,
        )
        .unwrap();
        assert_eq!(config.receiver.grpc_endpoint, None);
        assert_eq!(config.receiver.grpc_address(), None);
        assert_eq!(config.receiver.http_address(), Some("127.0.0.1:0"));
    }

    #[test]
    fn test_grpc_listener_disabled_by_flag() {
        let config = CollectorConfig::from_toml_str(
            r#"
[receiver]
grpc_enabled = false
"#,
        )
        .unwrap();
        assert!(!config.receiver.grpc_enabled);
        assert_eq!(config.receiver.grpc_address(), None);
        assert_eq!(config.receiver.http_address(), Some("0.0.0.0:4318"));
    }
}
