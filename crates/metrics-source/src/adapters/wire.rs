//! JSON shapes of the Prometheus HTTP API.

use serde::Deserialize;
use shared_types::{LabelSet, LabelStat, QueryResult, RangeSeries, Sample, SourceError};
use tracing::warn;

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ApiStatus {
    Success,
    Error,
}

/// `{status, data, errorType, error, warnings}`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiEnvelope<T> {
    pub status: ApiStatus,
    pub data: Option<T>,
    #[serde(default)]
    pub error_type: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl<T> ApiEnvelope<T> {
    pub fn into_data(self) -> Result<T, SourceError> {
        if !self.warnings.is_empty() {
            warn!(warnings = ?self.warnings, "Prometheus returned warnings");
        }
        match self.status {
            ApiStatus::Error => Err(SourceError::Api {
                error_type: self.error_type.unwrap_or_default(),
                error: self.error.unwrap_or_default(),
            }),
            ApiStatus::Success => self
                .data
                .ok_or_else(|| SourceError::Decode("success response without data".into())),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TsdbStatus {
    #[serde(default)]
    pub label_value_count_by_label_name: Vec<LabelStat>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ConfigStatus {
    pub yaml: String,
}

/// `[<unix seconds>, "<value>"]`
type WirePoint = (f64, String);

#[derive(Debug, Deserialize)]
pub(crate) struct WireSample {
    #[serde(default)]
    metric: LabelSet,
    value: WirePoint,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireSeries {
    #[serde(default)]
    metric: LabelSet,
    #[serde(default)]
    values: Vec<WirePoint>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "resultType", content = "result", rename_all = "lowercase")]
pub(crate) enum QueryData {
    Vector(Vec<WireSample>),
    Matrix(Vec<WireSeries>),
    Scalar(WirePoint),
    String(WirePoint),
}

fn parse_value(raw: &str) -> Result<f64, SourceError> {
    raw.parse::<f64>()
        .map_err(|_| SourceError::Decode(format!("invalid sample value {raw:?}")))
}

impl TryFrom<QueryData> for QueryResult {
    type Error = SourceError;

    fn try_from(data: QueryData) -> Result<Self, Self::Error> {
        Ok(match data {
            QueryData::Vector(samples) => QueryResult::Vector(
                samples
                    .into_iter()
                    .map(|s| {
                        let (timestamp, raw) = s.value;
                        Ok(Sample::new(s.metric, parse_value(&raw)?, timestamp))
                    })
                    .collect::<Result<_, SourceError>>()?,
            ),
            QueryData::Matrix(series) => QueryResult::Matrix(
                series
                    .into_iter()
                    .map(|s| {
                        let values = s
                            .values
                            .iter()
                            .map(|(ts, raw)| Ok((*ts, parse_value(raw)?)))
                            .collect::<Result<_, SourceError>>()?;
                        Ok(RangeSeries {
                            metric: s.metric,
                            values,
                        })
                    })
                    .collect::<Result<_, SourceError>>()?,
            ),
            QueryData::Scalar((timestamp, raw)) => QueryResult::Scalar {
                timestamp,
                value: parse_value(&raw)?,
            },
            QueryData::String((timestamp, value)) => QueryResult::String { timestamp, value },
        })
    }
}
