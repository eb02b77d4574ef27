//! Prometheus self-metrics for the sentinel.
//!
//! All metrics follow the naming convention: `sentinel_<metric>_<unit>`
//!
//! ## Metric Types
//!
//! - **Counter**: passes by outcome, labels dropped, remediation errors by kind
//! - **Histogram**: pass duration

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts,
    Registry, TextEncoder,
};
use std::sync::Arc;

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// Remediation passes by outcome
    pub static ref PASSES_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("sentinel_passes_total", "Total remediation passes by outcome"),
        &["outcome"]  // nothing_to_remediate, scan_failed, rewrite_failed, remediated, cancelled
    ).expect("metric creation failed");

    /// Labels written into labeldrop rules
    pub static ref LABELS_DROPPED: IntCounter = IntCounter::new(
        "sentinel_labels_dropped_total",
        "Total job/label pairs dropped through the scrape configuration"
    ).expect("metric creation failed");

    /// Errors by kind
    pub static ref REMEDIATION_ERRORS: IntCounterVec = IntCounterVec::new(
        Opts::new("sentinel_remediation_errors_total", "Remediation errors by kind"),
        &["kind"]
    ).expect("metric creation failed");

    /// Wall-clock time of one pass
    pub static ref PASS_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "sentinel_pass_duration_seconds",
            "Time spent in one remediation pass"
        ).buckets(exponential_buckets(0.01, 2.0, 14).expect("valid bucket layout"))
    ).expect("metric creation failed");
}

/// Handle for the registered metrics
pub struct MetricsHandle {
    _registry: Arc<Registry>,
}

/// Register all metrics with the global registry.
///
/// Safe to call more than once; metrics that are already registered are
/// left alone.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(PASSES_TOTAL.clone()),
        Box::new(LABELS_DROPPED.clone()),
        Box::new(REMEDIATION_ERRORS.clone()),
        Box::new(PASS_DURATION.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(MetricsHandle {
        _registry: Arc::new(REGISTRY.clone()),
    })
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    /// Start a new timer for the given histogram.
    pub fn new(histogram: &Histogram) -> Self {
        Self {
            histogram: histogram.clone(),
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        self.histogram.observe(duration);
    }
}
