//! Config Rewriter Service

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use shared_types::OffendingLabels;
use tracing::{debug, info, warn};

use crate::domain::{RewriteError, ScrapeConfigDocument};
use crate::ports::{ConfigReloader, LabelDropApi, MetricsSource};

/// Rewrites the scrape configuration through the injected ports.
///
/// The live configuration is always fetched from the server so the rewrite
/// starts from what Prometheus is actually running, not from a possibly
/// stale local file.
pub struct ConfigRewriter<S: MetricsSource, R: ConfigReloader> {
    /// Source of the live configuration (driven port)
    source: Arc<S>,
    /// Reload endpoint (driven port)
    reloader: Arc<R>,
}

impl<S: MetricsSource, R: ConfigReloader> ConfigRewriter<S, R> {
    pub fn new(source: Arc<S>, reloader: Arc<R>) -> Self {
        Self { source, reloader }
    }

    async fn reload(&self) -> Result<(), RewriteError> {
        let response = self
            .reloader
            .reload()
            .await
            .map_err(RewriteError::ReloadUnreachable)?;

        if !response.is_success() {
            return Err(RewriteError::ReloadFailed {
                status: response.status,
                body: response.body,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl<S: MetricsSource, R: ConfigReloader> LabelDropApi for ConfigRewriter<S, R> {
    async fn drop_labels_in_jobs(
        &self,
        offending: &OffendingLabels,
        config_path: &Path,
    ) -> Result<(), RewriteError> {
        if offending.is_empty() {
            debug!("No offending labels, leaving configuration untouched");
            return Ok(());
        }

        let yaml = self
            .source
            .fetch_live_config()
            .await
            .map_err(RewriteError::ConfigFetchFailed)?;
        let mut document = ScrapeConfigDocument::parse(&yaml)?;

        if document.scrape_configs.is_empty() {
            return Err(RewriteError::NoScrapeJobs {
                labels: offending.clone(),
                path: config_path.to_path_buf(),
            });
        }

        let outcome = document.append_label_drops(offending)?;
        for job in &outcome.missing {
            warn!(job = %job, "Job has offending labels but no scrape config, skipping");
        }

        let rendered = document.to_yaml().map_err(std::io::Error::other)?;
        tokio::fs::write(config_path, rendered).await?;
        info!(
            path = %config_path.display(),
            jobs = ?outcome.applied,
            "Wrote labeldrop rules to configuration"
        );

        self.reload().await?;
        info!("Prometheus configuration reloaded");
        Ok(())
    }
}
