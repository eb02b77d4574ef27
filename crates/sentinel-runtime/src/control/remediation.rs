//! The periodic remediation loop.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use cs_01_cardinality_scanner::CardinalityScanApi;
use cs_02_config_rewriter::LabelDropApi;
use cs_03_series_cleaner::SeriesCleanApi;
use parking_lot::Mutex;
use sentinel_telemetry::{
    HistogramTimer, LABELS_DROPPED, PASSES_TOTAL, PASS_DURATION, REMEDIATION_ERRORS,
};
use shared_types::OffendingLabels;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::report::{PassReport, PassState};
use crate::summary::SummaryStore;

/// Loop settings fixed at startup.
#[derive(Debug, Clone)]
pub struct LoopSettings {
    /// Scrape configuration file the rewriter writes.
    pub config_path: PathBuf,
    /// Time between pass starts.
    pub interval: Duration,
}

/// Drives the scanner, rewriter and cleaner.
pub struct RemediationLoop<Sc, Rw, Cl>
where
    Sc: CardinalityScanApi,
    Rw: LabelDropApi,
    Cl: SeriesCleanApi,
{
    scanner: Arc<Sc>,
    rewriter: Arc<Rw>,
    cleaner: Arc<Cl>,
    summary: SummaryStore,
    settings: LoopSettings,
    state: Mutex<PassState>,
}

impl<Sc, Rw, Cl> RemediationLoop<Sc, Rw, Cl>
where
    Sc: CardinalityScanApi,
    Rw: LabelDropApi,
    Cl: SeriesCleanApi,
{
    pub fn new(
        scanner: Arc<Sc>,
        rewriter: Arc<Rw>,
        cleaner: Arc<Cl>,
        summary: SummaryStore,
        settings: LoopSettings,
    ) -> Self {
        Self {
            scanner,
            rewriter,
            cleaner,
            summary,
            settings,
            state: Mutex::new(PassState::Idle),
        }
    }

    pub fn state(&self) -> PassState {
        *self.state.lock()
    }

    fn enter(&self, state: PassState) {
        debug!(?state, "Pass state changed");
        *self.state.lock() = state;
    }

    /// Run passes until `shutdown` is cancelled.
    ///
    /// A pass in flight when shutdown arrives is abandoned at its next
    /// await point and reported as [`PassReport::Cancelled`].
    pub async fn run(&self, shutdown: CancellationToken) {
        let mut ticker = interval(self.settings.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(
            interval_secs = self.settings.interval.as_secs(),
            config_path = %self.settings.config_path.display(),
            "Remediation loop started"
        );

        loop {
            tokio::select! {
                biased;

                _ = shutdown.cancelled() => {
                    info!("Remediation loop shutting down");
                    break;
                }

                _ = ticker.tick() => {
                    let report = tokio::select! {
                        biased;
                        _ = shutdown.cancelled() => PassReport::Cancelled,
                        report = self.run_pass() => report,
                    };

                    if matches!(report, PassReport::Cancelled) {
                        self.enter(PassState::Idle);
                        PASSES_TOTAL.with_label_values(&[report.outcome()]).inc();
                        warn!("Remediation pass cancelled by shutdown");
                        break;
                    }
                }
            }
        }
    }

    /// Execute exactly one pass.
    pub async fn run_pass(&self) -> PassReport {
        let _timer = HistogramTimer::new(&PASS_DURATION);

        self.enter(PassState::Scanning);
        let report = match self.scanner.scan().await {
            Err(error) => {
                error!(%error, "Cardinality scan failed");
                REMEDIATION_ERRORS.with_label_values(&[error.kind()]).inc();
                PassReport::ScanFailed(error)
            }
            Ok(offending) if offending.is_empty() => {
                info!("No labels above the cardinality limit");
                PassReport::NothingToRemediate
            }
            Ok(offending) => self.remediate(offending).await,
        };
        self.enter(PassState::Idle);

        PASSES_TOTAL.with_label_values(&[report.outcome()]).inc();
        report
    }

    async fn remediate(&self, offending: OffendingLabels) -> PassReport {
        self.enter(PassState::Remediating);
        info!(offending = %offending, "Dropping high-cardinality labels");

        if let Err(error) = self
            .rewriter
            .drop_labels_in_jobs(&offending, &self.settings.config_path)
            .await
        {
            error!(%error, "Failed to drop labels in scrape configuration");
            REMEDIATION_ERRORS.with_label_values(&[error.kind()]).inc();
            return PassReport::RewriteFailed { offending, error };
        }

        self.summary.record(&offending);
        LABELS_DROPPED.inc_by(offending.label_count() as u64);

        self.enter(PassState::Cleaning);
        let labels = offending.distinct_labels();
        let cleanup = self.cleaner.clean(&labels).await;
        match &cleanup {
            Ok(()) => info!(?labels, "Removed series for dropped labels"),
            Err(error) => {
                error!(%error, "Failed to clean series, labels stay dropped");
                REMEDIATION_ERRORS.with_label_values(&[error.kind()]).inc();
            }
        }

        PassReport::Remediated { offending, cleanup }
    }
}
