//! Command-line flags and runtime configuration.
//!
//! Every flag can also be supplied through the environment variable named
//! next to it; an explicit flag wins.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use cs_01_cardinality_scanner::{DEFAULT_LABEL_LIMIT, ScannerConfig};
use cs_03_series_cleaner::{CleanerConfig, MAX_LOOKBACK_SECS};
use thiserror::Error;

/// Cardinality sentinel command-line interface.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "cardinality-sentinel",
    version,
    about = "Finds high-cardinality labels in Prometheus, drops them from the scrape configuration and deletes their series"
)]
pub struct CliArgs {
    /// Scrape configuration file rewritten with labeldrop rules
    #[arg(long, env = "PROMETHEUS_CONFIG_FILE", default_value = "./prometheus.yml")]
    pub prometheus_config_file: PathBuf,

    /// Prometheus base URL
    #[arg(long, env = "PROMETHEUS_BASE_URL", default_value = "http://localhost:9090")]
    pub prometheus_base_url: String,

    /// Labels with more distinct values than this are dropped
    #[arg(long, env = "CARDINALITY_LABEL_LIMIT", default_value_t = DEFAULT_LABEL_LIMIT)]
    pub cardinality_label_limit: u64,

    /// Seconds between remediation passes
    #[arg(long, env = "SENTINEL_SCAN_INTERVAL", default_value_t = 120)]
    pub scan_interval: u64,

    /// Seconds of history deleted for each dropped label
    #[arg(long, env = "SENTINEL_CLEANUP_WINDOW", default_value_t = 3600)]
    pub cleanup_window: u64,

    /// Listen address of the status server
    #[arg(long, env = "SENTINEL_STATUS_ADDR", default_value = "0.0.0.0:8080")]
    pub status_addr: SocketAddr,
}

/// Validated runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub config_path: PathBuf,
    pub prometheus_base_url: String,
    pub scanner: ScannerConfig,
    pub cleaner: CleanerConfig,
    pub scan_interval: Duration,
    pub status_addr: SocketAddr,
}

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("cardinality label limit must be greater than zero")]
    InvalidLimit,

    #[error("scan interval must be greater than zero")]
    ZeroScanInterval,

    #[error("cleanup window must be between 1 and {max} seconds, got {0}", max = MAX_LOOKBACK_SECS)]
    InvalidCleanupWindow(u64),

    #[error("prometheus base url must start with http:// or https://, got {0}")]
    InvalidBaseUrl(String),
}

impl RuntimeConfig {
    pub fn from_args(args: CliArgs) -> Result<Self, ConfigError> {
        let scanner = ScannerConfig::new(args.cardinality_label_limit)
            .map_err(|_| ConfigError::InvalidLimit)?;

        if args.scan_interval == 0 {
            return Err(ConfigError::ZeroScanInterval);
        }

        let cleaner = CleanerConfig::from_secs(args.cleanup_window)
            .ok_or(ConfigError::InvalidCleanupWindow(args.cleanup_window))?;

        let url = args.prometheus_base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(args.prometheus_base_url));
        }

        Ok(Self {
            config_path: args.prometheus_config_file,
            prometheus_base_url: url.to_string(),
            scanner,
            cleaner,
            scan_interval: Duration::from_secs(args.scan_interval),
            status_addr: args.status_addr,
        })
    }
}
