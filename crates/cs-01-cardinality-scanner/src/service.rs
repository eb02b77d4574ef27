//! Cardinality Scanner Service
//!
//! Orchestrates the statistics fetch and the per-label attribution queries.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use shared_types::OffendingLabels;
use tracing::{debug, info, warn};

use crate::domain::{jobs_for_label_query, ScanError, ScannerConfig};
use crate::ports::{CardinalityScanApi, MetricsSource};

/// Scanner implementation over an injected [`MetricsSource`].
pub struct CardinalityScanner<S: MetricsSource> {
    /// Metrics source (driven port)
    source: Arc<S>,
    config: ScannerConfig,
}

impl<S: MetricsSource> CardinalityScanner<S> {
    pub fn new(source: Arc<S>, config: ScannerConfig) -> Self {
        Self { source, config }
    }

    /// Record every job that emits `label` into `offending`.
    async fn attribute(&self, label: &str, offending: &mut OffendingLabels) -> Result<(), ScanError> {
        let query = jobs_for_label_query(label);
        let result = self
            .source
            .instant_query(&query, Utc::now())
            .await
            .map_err(|source| ScanError::QueryFailed {
                label: label.to_string(),
                source,
            })?;

        let Some(samples) = result.as_vector() else {
            debug!(label, result_type = result.result_type(), "Discarding non-vector result");
            return Ok(());
        };

        for sample in samples {
            match sample.job() {
                Some(job) => offending.record(job, label),
                None => debug!(label, metric = ?sample.metric, "Sample has no job label, skipping"),
            }
        }
        Ok(())
    }
}

#[async_trait]
impl<S: MetricsSource> CardinalityScanApi for CardinalityScanner<S> {
    async fn scan(&self) -> Result<OffendingLabels, ScanError> {
        let stats = self
            .source
            .statistics()
            .await
            .map_err(ScanError::SourceUnavailable)?;

        let limit = self.config.limit();
        let mut offending = OffendingLabels::new();

        for stat in stats.iter().filter(|stat| stat.exceeds(limit)) {
            warn!(
                label = %stat.name,
                value_count = stat.value,
                limit,
                "Label exceeds cardinality limit"
            );
            self.attribute(&stat.name, &mut offending).await?;
        }

        if !offending.is_empty() {
            info!(jobs = offending.len(), offending = %offending, "Scan found offending labels");
        }
        Ok(offending)
    }
}
