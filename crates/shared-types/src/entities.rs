//! # Core Domain Entities
//!
//! Read-only views over what the monitored Prometheus server reports.
//!
//! ## Clusters
//!
//! - **Statistics**: `LabelStat`
//! - **Query results**: `Sample`, `RangeSeries`, `QueryResult`

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name of the label Prometheus attaches to every scraped series.
pub const JOB_LABEL: &str = "job";

/// A label set as returned by the query API.
pub type LabelSet = BTreeMap<String, String>;

// =============================================================================
// STATISTICS
// =============================================================================

/// Number of distinct values observed for a single label name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelStat {
    /// The label name.
    pub name: String,
    /// Count of distinct values across all ingested series.
    pub value: u64,
}

impl LabelStat {
    pub fn new(name: impl Into<String>, value: u64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// True when the label has strictly more values than `limit`.
    pub fn exceeds(&self, limit: u64) -> bool {
        self.value > limit
    }
}

// =============================================================================
// QUERY RESULTS
// =============================================================================

/// A single instant-vector sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Labels identifying the series.
    pub metric: LabelSet,
    /// Sample value.
    pub value: f64,
    /// Evaluation timestamp in seconds since the UNIX epoch.
    pub timestamp: f64,
}

impl Sample {
    pub fn new(metric: LabelSet, value: f64, timestamp: f64) -> Self {
        Self {
            metric,
            value,
            timestamp,
        }
    }

    /// Value of the named label, if present.
    pub fn label(&self, name: &str) -> Option<&str> {
        self.metric.get(name).map(String::as_str)
    }

    /// Value of the `job` label, if present.
    pub fn job(&self) -> Option<&str> {
        self.label(JOB_LABEL)
    }
}

/// A range-vector series. Decoded for completeness; nothing consumes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeSeries {
    pub metric: LabelSet,
    /// `(timestamp, value)` pairs.
    pub values: Vec<(f64, f64)>,
}

/// Result of an instant query, tagged by its shape.
///
/// Only the `Vector` shape carries job attribution; every other shape is
/// discarded by consumers without error.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    Vector(Vec<Sample>),
    Matrix(Vec<RangeSeries>),
    Scalar { timestamp: f64, value: f64 },
    String { timestamp: f64, value: String },
}

impl QueryResult {
    /// Wire name of the result shape.
    pub fn result_type(&self) -> &'static str {
        match self {
            Self::Vector(_) => "vector",
            Self::Matrix(_) => "matrix",
            Self::Scalar { .. } => "scalar",
            Self::String { .. } => "string",
        }
    }

    /// The samples if this is the vector shape.
    pub fn as_vector(&self) -> Option<&[Sample]> {
        match self {
            Self::Vector(samples) => Some(samples),
            _ => None,
        }
    }

    pub fn is_vector(&self) -> bool {
        matches!(self, Self::Vector(_))
    }
}
