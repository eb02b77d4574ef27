//! # Offending Labels
//!
//! The job → labels mapping produced by the scanner and consumed by the
//! rewriter, the cleaner and the remediation summary.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Mapping from scrape job name to the labels flagged for that job.
///
/// Jobs iterate in lexical order. Labels keep the order they were recorded
/// in, which is the order the generated drop regex uses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OffendingLabels(BTreeMap<String, Vec<String>>);

impl OffendingLabels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `label` to `job`'s entry, creating the entry if absent.
    pub fn record(&mut self, job: impl Into<String>, label: impl Into<String>) {
        self.0.entry(job.into()).or_default().push(label.into());
    }

    /// Append every label of `other` to the matching entry here.
    pub fn extend_from(&mut self, other: &OffendingLabels) {
        for (job, labels) in other.iter() {
            self.0
                .entry(job.to_string())
                .or_default()
                .extend(labels.iter().cloned());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of jobs.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn labels_for(&self, job: &str) -> Option<&[String]> {
        self.0.get(job).map(Vec::as_slice)
    }

    pub fn jobs(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(job, labels)| (job.as_str(), labels.as_slice()))
    }

    /// Total number of recorded labels across all jobs, duplicates included.
    pub fn label_count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    /// All labels in job order, keeping the first occurrence of each name.
    pub fn distinct_labels(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        self.0
            .values()
            .flatten()
            .filter(|label| seen.insert(label.as_str()))
            .cloned()
            .collect()
    }
}

impl<J, L> FromIterator<(J, Vec<L>)> for OffendingLabels
where
    J: Into<String>,
    L: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (J, Vec<L>)>>(iter: I) -> Self {
        let mut offending = Self::new();
        for (job, labels) in iter {
            let job = job.into();
            for label in labels {
                offending.record(job.clone(), label);
            }
        }
        offending
    }
}

impl fmt::Display for OffendingLabels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (job, labels)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", job, LabelList::new(labels))?;
        }
        write!(f, "}}")
    }
}

/// Space-separated, bracketed rendering of a string list: `[a b c]`.
///
/// Used in operator-facing error messages.
#[derive(Debug, Clone, Copy)]
pub struct LabelList<'a>(&'a [String]);

impl<'a> LabelList<'a> {
    pub fn new(items: &'a [String]) -> Self {
        Self(items)
    }
}

impl fmt::Display for LabelList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_discovery_order() {
        let mut offending = OffendingLabels::new();
        offending.record("some-job", "v3");
        offending.record("some-job", "v2");

        assert_eq!(
            offending.labels_for("some-job"),
            Some(&["v3".to_string(), "v2".to_string()][..])
        );
    }

    #[test]
    fn test_extend_does_not_deduplicate() {
        let pass: OffendingLabels = [("job-a", vec!["x"])].into_iter().collect();
        let mut total = OffendingLabels::new();
        total.extend_from(&pass);
        total.extend_from(&pass);

        assert_eq!(total.labels_for("job-a").map(<[String]>::len), Some(2));
        assert_eq!(total.label_count(), 2);
    }

    #[test]
    fn test_distinct_labels_across_jobs() {
        let offending: OffendingLabels = [
            ("b-job", vec!["pod", "uid"]),
            ("a-job", vec!["uid", "ts"]),
        ]
        .into_iter()
        .collect();

        assert_eq!(offending.distinct_labels(), vec!["uid", "ts", "pod"]);
    }

    #[test]
    fn test_display_formats() {
        let offending: OffendingLabels = [("some-job", vec!["somevalue"])].into_iter().collect();
        assert_eq!(offending.to_string(), "{some-job: [somevalue]}");

        let labels = vec!["label1".to_string(), "otherlabel2".to_string()];
        assert_eq!(LabelList::new(&labels).to_string(), "[label1 otherlabel2]");
        assert_eq!(LabelList::new(&[]).to_string(), "[]");
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let offending: OffendingLabels = [("job-a", vec!["x", "x"])].into_iter().collect();
        let json = serde_json::to_value(&offending).unwrap();
        assert_eq!(json, serde_json::json!({"job-a": ["x", "x"]}));
    }
}
