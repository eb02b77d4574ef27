//! # Metrics Source
//!
//! Everything the sentinel needs from the monitored Prometheus server,
//! expressed as driven ports so the core crates never touch HTTP directly.
//!
//! ## Architecture
//!
//! - **Ports Layer** (`ports`): Trait definitions
//!   - `MetricsSource`: statistics, instant queries, series deletion,
//!     tombstone compaction and live config retrieval
//!   - `ConfigReloader`: the `/-/reload` lifecycle endpoint
//!
//! - **Adapters Layer** (`adapters/`): External connections
//!   - `PrometheusClient`: implements both ports over the HTTP API
//!
//! - **Test Utilities** (`test_utils`, feature `test-utils`)
//!   - `ScriptedSource`: in-memory source with canned answers and a call log
//!
//! ## Usage Example
//!
//! ```ignore
//! use metrics_source::{MetricsSource, PrometheusClient};
//!
//! let client = PrometheusClient::new("http://localhost:9090")?;
//! let stats = client.statistics().await?;
//! ```

pub mod adapters;
pub mod ports;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use adapters::prometheus::{ClientSettings, PrometheusClient};
pub use ports::{ConfigReloader, MetricsSource, ReloadResponse};
pub use shared_types::SourceError;
