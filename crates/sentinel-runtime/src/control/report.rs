//! Pass state and outcome.

use cs_01_cardinality_scanner::ScanError;
use cs_02_config_rewriter::RewriteError;
use cs_03_series_cleaner::CleanError;
use shared_types::OffendingLabels;

/// Where the loop currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PassState {
    #[default]
    Idle,
    Scanning,
    Remediating,
    Cleaning,
}

/// Result of one remediation pass.
#[derive(Debug)]
pub enum PassReport {
    /// Scan succeeded and nothing exceeded the limit.
    NothingToRemediate,
    /// Scan failed. Nothing was rewritten.
    ScanFailed(ScanError),
    /// Offending labels were found but the rewrite or reload failed.
    /// The summary is not updated and no series are deleted.
    RewriteFailed {
        offending: OffendingLabels,
        error: RewriteError,
    },
    /// Labels were dropped and recorded in the summary. `cleanup` carries
    /// the series cleaner's result, which never undoes the drop.
    Remediated {
        offending: OffendingLabels,
        cleanup: Result<(), CleanError>,
    },
    /// Shutdown was requested while the pass was in flight.
    Cancelled,
}

impl PassReport {
    /// Metric label for this outcome.
    pub fn outcome(&self) -> &'static str {
        match self {
            Self::NothingToRemediate => "nothing_to_remediate",
            Self::ScanFailed(_) => "scan_failed",
            Self::RewriteFailed { .. } => "rewrite_failed",
            Self::Remediated { .. } => "remediated",
            Self::Cancelled => "cancelled",
        }
    }
}
