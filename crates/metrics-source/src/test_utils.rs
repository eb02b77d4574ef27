//! Test utilities for the metrics source ports.
//!
//! Enable with the `test-utils` feature flag.
//!
//! # Example
//!
//! ```rust,ignore
//! use metrics_source::test_utils::{sample, ScriptedSource};
//! use shared_types::LabelStat;
//!
//! let source = ScriptedSource::new()
//!     .with_statistics(vec![LabelStat::new("pod", 10)])
//!     .with_query("pod", vec![sample(&[("job", "kubelet")])]);
//! assert!(source.calls().is_empty());
//! ```

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use shared_types::{LabelStat, QueryResult, Sample, SourceError};

use crate::ports::{ConfigReloader, MetricsSource, ReloadResponse};

/// A call observed by [`ScriptedSource`], in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceCall {
    Statistics,
    InstantQuery(String),
    DeleteSeries {
        selectors: Vec<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    CleanTombstones,
    FetchLiveConfig,
    Reload,
}

#[derive(Debug, Default)]
struct Script {
    statistics: Option<Result<Vec<LabelStat>, SourceError>>,
    queries: HashMap<String, Result<QueryResult, SourceError>>,
    live_config: Option<Result<String, SourceError>>,
    delete_error: Option<SourceError>,
    clean_error: Option<SourceError>,
    reload: Option<Result<ReloadResponse, SourceError>>,
}

/// In-memory [`MetricsSource`] and [`ConfigReloader`] with canned answers.
///
/// Queries are scripted per label: the answer registered for `pod` is
/// returned for any expression containing `{pod=~`. Unscripted queries
/// return an empty vector, unscripted statistics an empty list, and an
/// unscripted reload answers 200.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    script: Mutex<Script>,
    calls: Mutex<Vec<SourceCall>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_statistics(self, stats: Vec<LabelStat>) -> Self {
        self.script.lock().statistics = Some(Ok(stats));
        self
    }

    pub fn with_statistics_error(self, error: SourceError) -> Self {
        self.script.lock().statistics = Some(Err(error));
        self
    }

    /// Answer queries about `label` with a vector of `samples`.
    pub fn with_query(self, label: &str, samples: Vec<Sample>) -> Self {
        self.with_query_result(label, QueryResult::Vector(samples))
    }

    pub fn with_query_result(self, label: &str, result: QueryResult) -> Self {
        self.script
            .lock()
            .queries
            .insert(label.to_string(), Ok(result));
        self
    }

    pub fn with_query_error(self, label: &str, error: SourceError) -> Self {
        self.script
            .lock()
            .queries
            .insert(label.to_string(), Err(error));
        self
    }

    pub fn with_live_config(self, yaml: impl Into<String>) -> Self {
        self.script.lock().live_config = Some(Ok(yaml.into()));
        self
    }

    pub fn with_config_error(self, error: SourceError) -> Self {
        self.script.lock().live_config = Some(Err(error));
        self
    }

    pub fn with_delete_error(self, error: SourceError) -> Self {
        self.script.lock().delete_error = Some(error);
        self
    }

    pub fn with_clean_error(self, error: SourceError) -> Self {
        self.script.lock().clean_error = Some(error);
        self
    }

    pub fn with_reload_status(self, status: u16, body: Option<&str>) -> Self {
        self.script.lock().reload = Some(Ok(ReloadResponse {
            status,
            body: body.map(str::to_string),
        }));
        self
    }

    pub fn with_reload_error(self, error: SourceError) -> Self {
        self.script.lock().reload = Some(Err(error));
        self
    }

    /// Every call received so far.
    pub fn calls(&self) -> Vec<SourceCall> {
        self.calls.lock().clone()
    }

    /// Number of calls matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&SourceCall) -> bool) -> usize {
        self.calls.lock().iter().filter(|c| predicate(c)).count()
    }

    fn record(&self, call: SourceCall) {
        self.calls.lock().push(call);
    }
}

#[async_trait]
impl MetricsSource for ScriptedSource {
    async fn statistics(&self) -> Result<Vec<LabelStat>, SourceError> {
        self.record(SourceCall::Statistics);
        self.script
            .lock()
            .statistics
            .clone()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn instant_query(
        &self,
        expr: &str,
        _at: DateTime<Utc>,
    ) -> Result<QueryResult, SourceError> {
        self.record(SourceCall::InstantQuery(expr.to_string()));
        let script = self.script.lock();
        script
            .queries
            .iter()
            .find(|(label, _)| expr.contains(&format!("{{{label}=~")))
            .map(|(_, answer)| answer.clone())
            .unwrap_or_else(|| Ok(QueryResult::Vector(Vec::new())))
    }

    async fn delete_series(
        &self,
        selectors: &[String],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<(), SourceError> {
        self.record(SourceCall::DeleteSeries {
            selectors: selectors.to_vec(),
            start,
            end,
        });
        match self.script.lock().delete_error.clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    async fn clean_tombstones(&self) -> Result<(), SourceError> {
        self.record(SourceCall::CleanTombstones);
        match self.script.lock().clean_error.clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    async fn fetch_live_config(&self) -> Result<String, SourceError> {
        self.record(SourceCall::FetchLiveConfig);
        self.script
            .lock()
            .live_config
            .clone()
            .unwrap_or_else(|| Ok(String::new()))
    }
}

#[async_trait]
impl ConfigReloader for ScriptedSource {
    async fn reload(&self) -> Result<ReloadResponse, SourceError> {
        self.record(SourceCall::Reload);
        self.script
            .lock()
            .reload
            .clone()
            .unwrap_or_else(|| Ok(ReloadResponse::ok()))
    }
}

/// Build a sample with the given labels and a value of 1.
pub fn sample(labels: &[(&str, &str)]) -> Sample {
    let metric = labels
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();
    Sample::new(metric, 1.0, 0.0)
}
