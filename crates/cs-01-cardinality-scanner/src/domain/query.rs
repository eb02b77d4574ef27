//! PromQL built by the scanner.

/// Total of every series carrying `label`, grouped by the emitting job.
///
/// ```
/// use cs_01_cardinality_scanner::jobs_for_label_query;
///
/// assert_eq!(jobs_for_label_query("pod"), r#"sum({pod=~".+"}) by (job)"#);
/// ```
pub fn jobs_for_label_query(label: &str) -> String {
    format!(r#"sum({{{label}=~".+"}}) by (job)"#)
}
