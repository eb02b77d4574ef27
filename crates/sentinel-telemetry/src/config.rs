//! Telemetry configuration from environment variables.

use std::env;

/// Configuration for logging and self-metrics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Service name attached to startup logs
    pub service_name: String,

    /// Log level filter directive (trace, debug, info, warn, error, or a
    /// full `EnvFilter` expression)
    pub log_level: String,

    /// Whether to emit JSON formatted logs
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "cardinality-sentinel".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OTEL_SERVICE_NAME`: Service name (default: cardinality-sentinel)
    /// - `SENTINEL_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `SENTINEL_JSON_LOGS`: Enable JSON logs (default: false in dev, true in containers)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let is_container =
            lookup("KUBERNETES_SERVICE_HOST").is_some() || lookup("DOCKER_CONTAINER").is_some();

        Self {
            service_name: lookup("OTEL_SERVICE_NAME")
                .unwrap_or_else(|| "cardinality-sentinel".to_string()),

            log_level: lookup("SENTINEL_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or_else(|| "info".to_string()),

            json_logs: lookup("SENTINEL_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(is_container),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> TelemetryConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        TelemetryConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_default_config() {
        assert_eq!(config_from(&[]), TelemetryConfig::default());
    }

    #[test]
    fn test_sentinel_level_wins_over_rust_log() {
        let config = config_from(&[("SENTINEL_LOG_LEVEL", "debug"), ("RUST_LOG", "warn")]);
        assert_eq!(config.log_level, "debug");

        let config = config_from(&[("RUST_LOG", "warn")]);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_json_logs_default_in_containers() {
        assert!(config_from(&[("KUBERNETES_SERVICE_HOST", "10.0.0.1")]).json_logs);
        assert!(!config_from(&[("KUBERNETES_SERVICE_HOST", "10.0.0.1"), ("SENTINEL_JSON_LOGS", "false")]).json_logs);
        assert!(config_from(&[("SENTINEL_JSON_LOGS", "1")]).json_logs);
    }
}
