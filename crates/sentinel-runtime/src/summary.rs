//! Cumulative remediation summary.

use std::sync::Arc;

use parking_lot::RwLock;
use shared_types::OffendingLabels;

/// Every label dropped for every job since the process started.
///
/// Append-only. The remediation loop is the only writer; the status server
/// reads owned snapshots. Cloning shares the same underlying record.
#[derive(Debug, Clone, Default)]
pub struct SummaryStore {
    inner: Arc<RwLock<OffendingLabels>>,
}

impl SummaryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pass's labels. Labels already present are appended again.
    pub fn record(&self, offending: &OffendingLabels) {
        self.inner.write().extend_from(offending);
    }

    /// Owned copy of the current summary.
    pub fn snapshot(&self) -> OffendingLabels {
        self.inner.read().clone()
    }
}
