//! Scanner domain: configuration, query construction and errors.

pub mod config;
pub mod errors;
pub mod query;

pub use config::{DEFAULT_LABEL_LIMIT, ScannerConfig};
pub use errors::ScanError;
pub use query::jobs_for_label_query;
