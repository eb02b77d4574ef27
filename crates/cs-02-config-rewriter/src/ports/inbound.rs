//! # Driving Port (Inbound API)

use std::path::Path;

use async_trait::async_trait;
use shared_types::OffendingLabels;

use crate::domain::RewriteError;

/// Drop offending labels at ingestion time.
#[async_trait]
pub trait LabelDropApi: Send + Sync {
    /// Add one labeldrop rule per affected job, write the result to
    /// `config_path` and reload. Returns only after the reload succeeded.
    ///
    /// An empty mapping is a no-op.
    async fn drop_labels_in_jobs(
        &self,
        offending: &OffendingLabels,
        config_path: &Path,
    ) -> Result<(), RewriteError>;
}
