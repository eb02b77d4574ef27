//! PrometheusClient against a mock HTTP server.

use chrono::{DateTime, Utc};
use metrics_source::{ConfigReloader, MetricsSource, PrometheusClient, SourceError};
use reqwest::Url;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> PrometheusClient {
    PrometheusClient::new(&server.uri()).unwrap()
}

#[tokio::test]
async fn test_statistics_reads_label_value_counts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/status/tsdb"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": {
                "headStats": {"numSeries": 508},
                "seriesCountByMetricName": [{"name": "up", "value": 12}],
                "labelValueCountByLabelName": [
                    {"name": "request_id", "value": 1500000},
                    {"name": "job", "value": 3}
                ]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let stats = client(&server).statistics().await.unwrap();

    assert_eq!(stats.len(), 2);
    assert_eq!(stats[0].name, "request_id");
    assert_eq!(stats[0].value, 1_500_000);
}

#[tokio::test]
async fn test_instant_query_sends_expression_and_decodes_vector() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/query"))
        .and(query_param("query", r#"sum({request_id=~".+"}) by (job)"#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": {
                "resultType": "vector",
                "result": [
                    {"metric": {"job": "api"}, "value": [1700000000.0, "1500000"]},
                    {"metric": {}, "value": [1700000000.0, "3"]}
                ]
            }
        })))
        .mount(&server)
        .await;

    let result = client(&server)
        .instant_query(r#"sum({request_id=~".+"}) by (job)"#, Utc::now())
        .await
        .unwrap();

    let samples = result.as_vector().unwrap();
    assert_eq!(samples.len(), 2);
    assert_eq!(samples[0].job(), Some("api"));
    assert_eq!(samples[1].job(), None);
}

#[tokio::test]
async fn test_api_error_envelope_on_bad_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/query"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "status": "error",
            "errorType": "bad_data",
            "error": "1:6: parse error: unexpected \"}\""
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .instant_query("sum({", Utc::now())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "bad_data: 1:6: parse error: unexpected \"}\"");
}

#[tokio::test]
async fn test_non_json_failure_keeps_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/status/tsdb"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let err = client(&server).statistics().await.unwrap_err();

    assert_eq!(
        err,
        SourceError::Status {
            status: 502,
            body: "bad gateway".into()
        }
    );
}

#[tokio::test]
async fn test_delete_series_sends_repeated_match_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/admin/tsdb/delete_series"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let start = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
    let end = DateTime::from_timestamp(1_700_003_600, 0).unwrap();
    let selectors = vec![
        r#"{label1=~".+"}"#.to_string(),
        r#"{otherlabel2=~".+"}"#.to_string(),
    ];
    client(&server)
        .delete_series(&selectors, start, end)
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8(requests[0].body.clone()).unwrap();
    let form = Url::parse(&format!("http://form/?{body}")).unwrap();
    let pairs: Vec<(String, String)> = form.query_pairs().into_owned().collect();

    assert_eq!(
        pairs,
        vec![
            ("match[]".to_string(), r#"{label1=~".+"}"#.to_string()),
            ("match[]".to_string(), r#"{otherlabel2=~".+"}"#.to_string()),
            ("start".to_string(), "2023-11-14T22:13:20.000Z".to_string()),
            ("end".to_string(), "2023-11-14T23:13:20.000Z".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_admin_api_disabled_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/admin/tsdb/clean_tombstones"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "status": "error",
            "errorType": "unavailable",
            "error": "admin APIs disabled"
        })))
        .mount(&server)
        .await;

    let err = client(&server).clean_tombstones().await.unwrap_err();

    assert_eq!(err.to_string(), "unavailable: admin APIs disabled");
}

#[tokio::test]
async fn test_fetch_live_config_returns_yaml() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/status/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": {"yaml": "scrape_configs:\n- job_name: prometheus\n"}
        })))
        .mount(&server)
        .await;

    let yaml = client(&server).fetch_live_config().await.unwrap();

    assert_eq!(yaml, "scrape_configs:\n- job_name: prometheus\n");
}

#[tokio::test]
async fn test_reload_passes_status_through() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/-/reload"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Some body"))
        .expect(1)
        .mount(&server)
        .await;

    let response = client(&server).reload().await.unwrap();

    assert_eq!(response.status, 500);
    assert_eq!(response.body.as_deref(), Some("Some body"));
    assert!(!response.is_success());
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    // Port 9 (discard) is not expected to accept connections in CI.
    let client = PrometheusClient::new("http://127.0.0.1:9").unwrap();

    let err = client.reload().await.unwrap_err();

    assert!(err.is_transport());
}

#[tokio::test]
async fn test_check_ready() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/-/ready"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/-/ready"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Prometheus Server is Ready."))
        .mount(&server)
        .await;
    let client = client(&server);

    assert_eq!(
        client.check_ready().await.unwrap_err(),
        SourceError::Status {
            status: 503,
            body: "Service Unavailable".to_string()
        }
    );
    assert!(client.check_ready().await.is_ok());
}
