//! # Scrape Configuration Document
//!
//! The in-memory form of a Prometheus configuration file. Only
//! `scrape_configs[].job_name` is modelled directly and
//! `scrape_configs[].metric_relabel_configs` is validated on parse; every
//! other section and job setting is carried through as an opaque YAML value.
//!
//! Unknown top-level keys are rejected the same way Prometheus' own loader
//! rejects them.

use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::{Mapping, Value};
use shared_types::OffendingLabels;

use super::relabel::RelabelRule;

/// A complete Prometheus configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScrapeConfigDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alerting: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_files: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scrape_config_files: Option<Value>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub scrape_configs: Vec<ScrapeJob>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracing: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_write: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_read: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub otlp: Option<Value>,
}

const METRIC_RELABEL_CONFIGS: &str = "metric_relabel_configs";

/// One `scrape_configs` entry.
///
/// `job_name` is always written first. Every other key, including
/// `metric_relabel_configs`, stays at its position in the source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeJob {
    pub job_name: String,
    /// Every other job setting, in file order.
    #[serde(flatten)]
    pub settings: Mapping,
}

impl ScrapeJob {
    /// The job's `metric_relabel_configs`. A missing or null key is empty.
    pub fn metric_relabel_configs(&self) -> Result<Vec<RelabelRule>, serde_yaml::Error> {
        match self.settings.get(METRIC_RELABEL_CONFIGS) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(rules) => serde_yaml::from_value(rules.clone()),
        }
    }

    /// Append `rule` after the existing rules. Existing rules are written
    /// back exactly as they were read.
    pub fn push_metric_relabel_config(
        &mut self,
        rule: &RelabelRule,
    ) -> Result<(), serde_yaml::Error> {
        let rule = serde_yaml::to_value(rule)?;
        match self.settings.get_mut(METRIC_RELABEL_CONFIGS) {
            Some(Value::Sequence(rules)) => rules.push(rule),
            // Inserting over an existing null keeps the key's position.
            _ => {
                self.settings
                    .insert(Value::from(METRIC_RELABEL_CONFIGS), Value::Sequence(vec![rule]));
            }
        }
        Ok(())
    }
}

/// Which jobs of a mapping received a rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelDropOutcome {
    /// Jobs that got a new labeldrop rule, in document order.
    pub applied: Vec<String>,
    /// Jobs named in the mapping but absent from the document.
    pub missing: Vec<String>,
}

impl ScrapeConfigDocument {
    /// Parse a configuration file. An empty file is an empty document.
    pub fn parse(yaml: &str) -> Result<Self, serde_yaml::Error> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let document = serde_yaml::from_str::<Option<Self>>(yaml)?.unwrap_or_default();
        for job in &document.scrape_configs {
            job.metric_relabel_configs()?;
        }
        Ok(document)
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    pub fn job(&self, job_name: &str) -> Option<&ScrapeJob> {
        self.scrape_configs.iter().find(|job| job.job_name == job_name)
    }

    /// Append one labeldrop rule to every job named in `offending`, matching
    /// any of that job's labels.
    pub fn append_label_drops(
        &mut self,
        offending: &OffendingLabels,
    ) -> Result<LabelDropOutcome, serde_yaml::Error> {
        let mut outcome = LabelDropOutcome::default();

        for job in &mut self.scrape_configs {
            if let Some(labels) = offending.labels_for(&job.job_name) {
                job.push_metric_relabel_config(&RelabelRule::label_drop(
                    RelabelRule::alternation(labels),
                ))?;
                outcome.applied.push(job.job_name.clone());
            }
        }

        outcome.missing = offending
            .jobs()
            .filter(|job| !outcome.applied.iter().any(|applied| applied == job))
            .map(str::to_string)
            .collect();
        Ok(outcome)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
