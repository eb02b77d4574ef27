//! One full remediation pass against a mock Prometheus.

use std::sync::Arc;
use std::time::Duration;

use cs_01_cardinality_scanner::{CardinalityScanner, ScannerConfig};
use cs_02_config_rewriter::ConfigRewriter;
use cs_03_series_cleaner::{CleanerConfig, SeriesCleaner};
use metrics_source::PrometheusClient;
use sentinel_runtime::{LoopSettings, PassReport, RemediationLoop, SummaryStore};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LIVE_CONFIG: &str = r#"
global:
  scrape_interval: 15s
scrape_configs:
  - job_name: prometheus
    static_configs:
      - targets: ["localhost:9090"]
  - job_name: api
    static_configs:
      - targets: ["api:8080"]
"#;

async fn mount_prometheus(server: &MockServer, reload_status: u16) {
    Mock::given(method("GET"))
        .and(path("/api/v1/status/tsdb"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": {
                "labelValueCountByLabelName": [
                    {"name": "request_id", "value": 1500},
                    {"name": "job", "value": 2}
                ]
            }
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/query"))
        .and(query_param("query", r#"sum({request_id=~".+"}) by (job)"#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": {
                "resultType": "vector",
                "result": [{"metric": {"job": "api"}, "value": [1700000000.0, "1500"]}]
            }
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/status/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": {"yaml": LIVE_CONFIG}
        })))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/-/reload"))
        .respond_with(ResponseTemplate::new(reload_status))
        .expect(1)
        .mount(server)
        .await;
}

fn remediation(
    server: &MockServer,
    dir: &TempDir,
    summary: SummaryStore,
) -> RemediationLoop<
    CardinalityScanner<PrometheusClient>,
    ConfigRewriter<PrometheusClient, PrometheusClient>,
    SeriesCleaner<PrometheusClient>,
> {
    let client = Arc::new(PrometheusClient::new(&server.uri()).unwrap());
    RemediationLoop::new(
        Arc::new(CardinalityScanner::new(
            client.clone(),
            ScannerConfig::new(1000).unwrap(),
        )),
        Arc::new(ConfigRewriter::new(client.clone(), client.clone())),
        Arc::new(SeriesCleaner::new(client, CleanerConfig::default())),
        summary,
        LoopSettings {
            config_path: dir.path().join("prometheus.yml"),
            interval: Duration::from_secs(60),
        },
    )
}

#[tokio::test]
async fn test_full_pass_drops_label_and_deletes_series() {
    let server = MockServer::start().await;
    mount_prometheus(&server, 200).await;
    Mock::given(method("POST"))
        .and(path("/api/v1/admin/tsdb/delete_series"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/admin/tsdb/clean_tombstones"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let summary = SummaryStore::new();
    let report = remediation(&server, &dir, summary.clone()).run_pass().await;

    assert!(matches!(report, PassReport::Remediated { cleanup: Ok(()), .. }));
    assert_eq!(
        summary.snapshot().labels_for("api"),
        Some(&["request_id".to_string()][..])
    );

    let written: serde_json::Value =
        serde_yaml::from_str(&std::fs::read_to_string(dir.path().join("prometheus.yml")).unwrap())
            .unwrap();
    let api = &written["scrape_configs"][1];
    assert_eq!(api["job_name"], json!("api"));
    assert_eq!(
        api["metric_relabel_configs"],
        json!([{"regex": "request_id", "action": "labeldrop"}])
    );
    assert!(written["scrape_configs"][0]
        .get("metric_relabel_configs")
        .is_none());
}

#[tokio::test]
async fn test_failed_reload_skips_cleanup() {
    let server = MockServer::start().await;
    mount_prometheus(&server, 500).await;
    Mock::given(method("POST"))
        .and(path("/api/v1/admin/tsdb/delete_series"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let summary = SummaryStore::new();
    let report = remediation(&server, &dir, summary.clone()).run_pass().await;

    assert!(matches!(report, PassReport::RewriteFailed { .. }));
    assert!(summary.snapshot().is_empty());
}
