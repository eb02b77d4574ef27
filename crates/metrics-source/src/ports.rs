//! # Driven Ports (Outbound SPI)
//!
//! Interfaces the scanner, rewriter and cleaner require from the host.
//! The production implementation is [`crate::PrometheusClient`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared_types::{LabelStat, QueryResult, SourceError};

/// Query and administration API of the monitored Prometheus server.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; a single instance is shared by
/// every service in the control loop.
#[async_trait]
pub trait MetricsSource: Send + Sync {
    /// Distinct value count per label name across the TSDB head.
    async fn statistics(&self) -> Result<Vec<LabelStat>, SourceError>;

    /// Evaluate `expr` at `at`.
    async fn instant_query(
        &self,
        expr: &str,
        at: DateTime<Utc>,
    ) -> Result<QueryResult, SourceError>;

    /// Mark every series matching any of `selectors` in `[start, end]` for
    /// deletion.
    async fn delete_series(
        &self,
        selectors: &[String],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<(), SourceError>;

    /// Remove deleted data from disk.
    async fn clean_tombstones(&self) -> Result<(), SourceError>;

    /// The configuration the server is currently running with, as YAML.
    async fn fetch_live_config(&self) -> Result<String, SourceError>;
}

/// Outcome of a reload request. Any status is returned as-is; interpreting
/// it is up to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReloadResponse {
    pub status: u16,
    /// `None` when the body could not be read.
    pub body: Option<String>,
}

impl ReloadResponse {
    pub fn ok() -> Self {
        Self {
            status: 200,
            body: Some(String::new()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// Configuration reload trigger.
#[async_trait]
pub trait ConfigReloader: Send + Sync {
    /// Ask the server to re-read its configuration file.
    ///
    /// Returns `Err` only when no response was received.
    async fn reload(&self) -> Result<ReloadResponse, SourceError>;
}

#[async_trait]
impl<T: MetricsSource + ?Sized> MetricsSource for std::sync::Arc<T> {
    async fn statistics(&self) -> Result<Vec<LabelStat>, SourceError> {
        (**self).statistics().await
    }

    async fn instant_query(
        &self,
        expr: &str,
        at: DateTime<Utc>,
    ) -> Result<QueryResult, SourceError> {
        (**self).instant_query(expr, at).await
    }

    async fn delete_series(
        &self,
        selectors: &[String],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<(), SourceError> {
        (**self).delete_series(selectors, start, end).await
    }

    async fn clean_tombstones(&self) -> Result<(), SourceError> {
        (**self).clean_tombstones().await
    }

    async fn fetch_live_config(&self) -> Result<String, SourceError> {
        (**self).fetch_live_config().await
    }
}

#[async_trait]
impl<T: ConfigReloader + ?Sized> ConfigReloader for std::sync::Arc<T> {
    async fn reload(&self) -> Result<ReloadResponse, SourceError> {
        (**self).reload().await
    }
}
