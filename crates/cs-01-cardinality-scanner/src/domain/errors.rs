//! Scanner errors.

use shared_types::SourceError;
use thiserror::Error;

/// Errors that abort a scan. No partial mapping is ever returned with one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("error retrieving TSDB stats from the prometheus API, {0}")]
    SourceUnavailable(#[source] SourceError),

    #[error("error querying the prometheus API, {source}")]
    QueryFailed {
        label: String,
        #[source]
        source: SourceError,
    },

    #[error("cardinality label limit must be greater than zero")]
    InvalidLimit,
}

impl ScanError {
    /// Stable identifier used as a metrics label.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SourceUnavailable(_) => "source_unavailable",
            Self::QueryFailed { .. } => "query_failed",
            Self::InvalidLimit => "invalid_limit",
        }
    }
}
