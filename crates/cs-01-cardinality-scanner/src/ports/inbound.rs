//! # Driving Port (Inbound API)

use async_trait::async_trait;
use shared_types::OffendingLabels;

use crate::domain::ScanError;

/// Detect high-cardinality labels and the jobs that emit them.
#[async_trait]
pub trait CardinalityScanApi: Send + Sync {
    /// Run one scan. An empty mapping means nothing exceeded the limit.
    async fn scan(&self) -> Result<OffendingLabels, ScanError>;
}
