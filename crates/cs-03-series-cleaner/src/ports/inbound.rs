//! # Driving Port (Inbound API)

use async_trait::async_trait;

use crate::domain::CleanError;

/// Delete stored series for offending labels.
#[async_trait]
pub trait SeriesCleanApi: Send + Sync {
    /// Delete every series carrying any of `labels`, then compact.
    /// An empty list is a no-op.
    async fn clean(&self, labels: &[String]) -> Result<(), CleanError>;
}
