//! Prometheus HTTP API adapter.
//!
//! Implements [`MetricsSource`] and [`ConfigReloader`] over the documented
//! v1 query/admin API and the `/-/reload` lifecycle endpoint. The admin
//! endpoints require Prometheus to run with `--web.enable-admin-api`, and
//! reload requires `--web.enable-lifecycle`.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::{DeserializeOwned, IgnoredAny};
use shared_types::{LabelStat, QueryResult, SourceError};
use tracing::debug;

use super::wire::{ApiEnvelope, ApiStatus, ConfigStatus, QueryData, TsdbStatus};
use crate::ports::{ConfigReloader, MetricsSource, ReloadResponse};

const TSDB_STATUS_PATH: &str = "api/v1/status/tsdb";
const QUERY_PATH: &str = "api/v1/query";
const DELETE_SERIES_PATH: &str = "api/v1/admin/tsdb/delete_series";
const CLEAN_TOMBSTONES_PATH: &str = "api/v1/admin/tsdb/clean_tombstones";
const CONFIG_STATUS_PATH: &str = "api/v1/status/config";
const RELOAD_PATH: &str = "-/reload";
const READY_PATH: &str = "-/ready";

/// Transport settings for [`PrometheusClient`].
#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Upper bound on establishing a TCP/TLS connection. Requests themselves
    /// have no deadline; cancellation is driven by the caller.
    pub connect_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
        }
    }
}

/// HTTP client for a single Prometheus server.
#[derive(Debug, Clone)]
pub struct PrometheusClient {
    client: Client,
    base_url: Url,
}

impl PrometheusClient {
    /// Create a client with default settings.
    pub fn new(base_url: &str) -> Result<Self, SourceError> {
        Self::with_settings(base_url, ClientSettings::default())
    }

    pub fn with_settings(base_url: &str, settings: ClientSettings) -> Result<Self, SourceError> {
        let mut url = Url::parse(base_url)
            .map_err(|e| SourceError::InvalidUrl(format!("{base_url}: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(SourceError::InvalidUrl(format!(
                "{base_url}: scheme must be http or https"
            )));
        }
        // Url::join replaces the last path segment unless the base ends in '/'.
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        let client = Client::builder()
            .connect_timeout(settings.connect_timeout)
            .build()
            .map_err(transport)?;

        Ok(Self {
            client,
            base_url: url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Probe `/-/ready`. Used once at startup.
    pub async fn check_ready(&self) -> Result<(), SourceError> {
        let response = self.send(self.client.get(self.endpoint(READY_PATH)?)).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(SourceError::Status {
            status: status.as_u16(),
            body,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, SourceError> {
        self.base_url
            .join(path)
            .map_err(|e| SourceError::InvalidUrl(format!("{path}: {e}")))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, SourceError> {
        request.send().await.map_err(transport)
    }

    /// Decode an API envelope, falling back to the raw status when the body
    /// is not one.
    async fn read_api<T: DeserializeOwned>(response: Response) -> Result<T, SourceError> {
        let status = response.status();
        let body = response.text().await.map_err(transport)?;
        match serde_json::from_str::<ApiEnvelope<T>>(&body) {
            Ok(envelope) => envelope.into_data(),
            Err(_) if !status.is_success() => Err(SourceError::Status {
                status: status.as_u16(),
                body,
            }),
            Err(e) => Err(SourceError::Decode(e.to_string())),
        }
    }

    /// Admin endpoints answer `204 No Content` on success.
    async fn read_empty(response: Response) -> Result<(), SourceError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.map_err(transport)?;
        match serde_json::from_str::<ApiEnvelope<IgnoredAny>>(&body).ok() {
            Some(envelope) if envelope.status == ApiStatus::Error => {
                envelope.into_data().map(|_| ())
            }
            _ => Err(SourceError::Status {
                status: status.as_u16(),
                body,
            }),
        }
    }
}

#[async_trait]
impl MetricsSource for PrometheusClient {
    async fn statistics(&self) -> Result<Vec<LabelStat>, SourceError> {
        let url = self.endpoint(TSDB_STATUS_PATH)?;
        debug!(%url, "Fetching TSDB statistics");
        let response = self.send(self.client.get(url)).await?;
        let status: TsdbStatus = Self::read_api(response).await?;
        Ok(status.label_value_count_by_label_name)
    }

    async fn instant_query(
        &self,
        expr: &str,
        at: DateTime<Utc>,
    ) -> Result<QueryResult, SourceError> {
        let url = self.endpoint(QUERY_PATH)?;
        debug!(query = expr, "Running instant query");
        let request = self
            .client
            .get(url)
            .query(&[("query", expr.to_string()), ("time", format_time(at))]);
        let response = self.send(request).await?;
        let data: QueryData = Self::read_api(response).await?;
        data.try_into()
    }

    async fn delete_series(
        &self,
        selectors: &[String],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<(), SourceError> {
        let url = self.endpoint(DELETE_SERIES_PATH)?;
        let mut form: Vec<(&str, String)> = selectors
            .iter()
            .map(|selector| ("match[]", selector.clone()))
            .collect();
        form.push(("start", format_time(start)));
        form.push(("end", format_time(end)));

        debug!(?selectors, "Deleting series");
        let response = self.send(self.client.post(url).form(&form)).await?;
        Self::read_empty(response).await
    }

    async fn clean_tombstones(&self) -> Result<(), SourceError> {
        let url = self.endpoint(CLEAN_TOMBSTONES_PATH)?;
        debug!("Cleaning tombstones");
        let response = self.send(self.client.post(url)).await?;
        Self::read_empty(response).await
    }

    async fn fetch_live_config(&self) -> Result<String, SourceError> {
        let url = self.endpoint(CONFIG_STATUS_PATH)?;
        debug!(%url, "Fetching live configuration");
        let response = self.send(self.client.get(url)).await?;
        let config: ConfigStatus = Self::read_api(response).await?;
        Ok(config.yaml)
    }
}

#[async_trait]
impl ConfigReloader for PrometheusClient {
    async fn reload(&self) -> Result<ReloadResponse, SourceError> {
        let url = self.endpoint(RELOAD_PATH)?;
        debug!(%url, "Requesting configuration reload");
        let response = self.send(self.client.post(url)).await?;
        let status = response.status().as_u16();
        let body = response.text().await.ok();
        Ok(ReloadResponse { status, body })
    }
}

fn transport(err: reqwest::Error) -> SourceError {
    SourceError::Transport(err.to_string())
}

fn format_time(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_keeps_path_prefix() {
        let client = PrometheusClient::new("http://prom.internal:9090/prometheus").unwrap();
        assert_eq!(
            client.endpoint(QUERY_PATH).unwrap().as_str(),
            "http://prom.internal:9090/prometheus/api/v1/query"
        );
        assert_eq!(
            client.endpoint(RELOAD_PATH).unwrap().as_str(),
            "http://prom.internal:9090/prometheus/-/reload"
        );
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        assert!(matches!(
            PrometheusClient::new("ftp://localhost:9090"),
            Err(SourceError::InvalidUrl(_))
        ));
        assert!(matches!(
            PrometheusClient::new("not a url"),
            Err(SourceError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_time_format_is_rfc3339_utc() {
        let at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        assert_eq!(format_time(at), "2023-11-14T22:13:20.000Z");
    }
}
