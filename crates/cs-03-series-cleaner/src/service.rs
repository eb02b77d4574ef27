//! Series Cleaner Service

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::domain::{series_selector, CleanError, CleanerConfig};
use crate::ports::{MetricsSource, SeriesCleanApi};

/// Deletes offending series through the injected [`MetricsSource`].
pub struct SeriesCleaner<S: MetricsSource> {
    source: Arc<S>,
    config: CleanerConfig,
}

impl<S: MetricsSource> SeriesCleaner<S> {
    pub fn new(source: Arc<S>, config: CleanerConfig) -> Self {
        Self { source, config }
    }
}

#[async_trait]
impl<S: MetricsSource> SeriesCleanApi for SeriesCleaner<S> {
    async fn clean(&self, labels: &[String]) -> Result<(), CleanError> {
        if labels.is_empty() {
            debug!("No labels to clean");
            return Ok(());
        }

        let selectors: Vec<String> = labels.iter().map(|label| series_selector(label)).collect();
        let end = Utc::now();
        let start = end
            .checked_sub_signed(self.config.lookback)
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

        self.source
            .delete_series(&selectors, start, end)
            .await
            .map_err(|source| CleanError::DeleteFailed {
                labels: labels.to_vec(),
                selectors: selectors.clone(),
                source,
            })?;
        info!(?labels, %start, %end, "Deleted offending series");

        self.source
            .clean_tombstones()
            .await
            .map_err(|source| CleanError::CompactionFailed {
                labels: labels.to_vec(),
                source,
            })?;
        info!(?labels, "Cleaned tombstones");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use metrics_source::test_utils::{ScriptedSource, SourceCall};

    #[tokio::test]
    async fn test_window_matches_lookback() {
        let source = Arc::new(ScriptedSource::new());
        let cleaner = SeriesCleaner::new(source.clone(), CleanerConfig::new(Duration::minutes(5)));

        cleaner.clean(&["uid".to_string()]).await.unwrap();

        match &source.calls()[0] {
            SourceCall::DeleteSeries { start, end, .. } => {
                assert_eq!(*end - *start, Duration::minutes(5));
            }
            other => panic!("unexpected call {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unrepresentable_window_starts_at_epoch() {
        let source = Arc::new(ScriptedSource::new());
        let cleaner = SeriesCleaner::new(source.clone(), CleanerConfig::new(Duration::MAX));

        cleaner.clean(&["uid".to_string()]).await.unwrap();

        match &source.calls()[0] {
            SourceCall::DeleteSeries { start, .. } => {
                assert_eq!(*start, DateTime::<Utc>::UNIX_EPOCH);
            }
            other => panic!("unexpected call {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_list_is_noop() {
        let source = Arc::new(ScriptedSource::new());
        let cleaner = SeriesCleaner::new(source.clone(), CleanerConfig::default());

        cleaner.clean(&[]).await.unwrap();

        assert!(source.calls().is_empty());
    }
}
