//! Rewriter errors.

use std::path::PathBuf;

use shared_types::{OffendingLabels, SourceError};
use thiserror::Error;

/// Errors that abort a rewrite.
///
/// Once the file has been written a later failure leaves it in place; the
/// next pass starts again from the live configuration.
#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("error retrieving the latest config from the prometheus API, {0}")]
    ConfigFetchFailed(#[source] SourceError),

    #[error(transparent)]
    ConfigParseFailed(#[from] serde_yaml::Error),

    #[error(
        "had labels to drop {labels}, but no scrapeConfigs in config file at {}",
        .path.display()
    )]
    NoScrapeJobs {
        labels: OffendingLabels,
        path: PathBuf,
    },

    #[error(transparent)]
    ConfigWriteFailed(#[from] std::io::Error),

    #[error(
        "error when reloading prometheus config, expected status code 200 but was {status}, {}",
        describe_body(.body)
    )]
    ReloadFailed { status: u16, body: Option<String> },

    #[error("error when reloading prometheus config, {0}")]
    ReloadUnreachable(#[source] SourceError),
}

impl RewriteError {
    /// Stable identifier used as a metrics label.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ConfigFetchFailed(_) => "config_fetch_failed",
            Self::ConfigParseFailed(_) => "config_parse_failed",
            Self::NoScrapeJobs { .. } => "no_scrape_jobs",
            Self::ConfigWriteFailed(_) => "config_write_failed",
            Self::ReloadFailed { .. } => "reload_failed",
            Self::ReloadUnreachable(_) => "reload_unreachable",
        }
    }
}

fn describe_body(body: &Option<String>) -> String {
    match body {
        Some(body) => format!("body: {body}"),
        None => "body was unreadable".to_string(),
    }
}
