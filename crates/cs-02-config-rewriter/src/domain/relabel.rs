//! Relabeling rules as they appear under `metric_relabel_configs`.

use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;

/// Relabel action. Prometheus writes these lowercased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelabelAction {
    Replace,
    Keep,
    Drop,
    KeepEqual,
    DropEqual,
    HashMod,
    LabelMap,
    LabelDrop,
    LabelKeep,
    Lowercase,
    Uppercase,
}

/// One relabel rule.
///
/// Fields are written in the order Prometheus itself uses. Keys not listed
/// here are kept in `extra` and written back after the known ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelabelRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_labels: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modulus: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replacement: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<RelabelAction>,
    #[serde(flatten)]
    pub extra: Mapping,
}

impl RelabelRule {
    /// `{regex: <regex>, action: labeldrop}`
    pub fn label_drop(regex: impl Into<String>) -> Self {
        Self {
            regex: Some(regex.into()),
            action: Some(RelabelAction::LabelDrop),
            ..Self::default()
        }
    }

    /// Alternation matching any of `labels`, in order.
    pub fn alternation(labels: &[String]) -> String {
        labels.join("|")
    }
}
