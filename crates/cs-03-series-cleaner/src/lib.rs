//! # CS-03 Series Cleaner
//!
//! Removes series that were ingested before a labeldrop rule took effect.
//!
//! - **Domain Layer** (`domain/`): `series_selector`, `CleanerConfig`, `CleanError`
//! - **Ports Layer** (`ports/`): `SeriesCleanApi` (driving), `MetricsSource` (driven)
//! - **Service Layer** (`service`): `SeriesCleaner`
//!
//! Deletion at Prometheus is asynchronous. The cleaner issues one bulk
//! delete over the look-back window followed by one tombstone compaction
//! and does not verify the outcome.

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::{series_selector, CleanError, CleanerConfig, MAX_LOOKBACK_SECS};
pub use ports::SeriesCleanApi;
pub use service::SeriesCleaner;
