//! Cleaner domain.

pub mod config;
pub mod errors;
pub mod selector;

pub use config::{CleanerConfig, MAX_LOOKBACK_SECS};
pub use errors::CleanError;
pub use selector::series_selector;
