//! Cleaner errors.

use shared_types::{LabelList, SourceError};
use thiserror::Error;

/// Errors from a clean-up request. Neither is retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CleanError {
    #[error(
        "error while deleting label data {} for query {}, error {source}",
        LabelList::new(.labels),
        LabelList::new(.selectors)
    )]
    DeleteFailed {
        labels: Vec<String>,
        selectors: Vec<String>,
        #[source]
        source: SourceError,
    },

    #[error(
        "error while cleaning tombstones for label data {}, error {source}",
        LabelList::new(.labels)
    )]
    CompactionFailed {
        labels: Vec<String>,
        #[source]
        source: SourceError,
    },
}

impl CleanError {
    /// Stable identifier used as a metrics label.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DeleteFailed { .. } => "delete_failed",
            Self::CompactionFailed { .. } => "compaction_failed",
        }
    }
}
