//! Read-only status server.
//!
//! - `GET /ping` → `{"message": "pong"}`
//! - `GET /summary` → `{"summary": {job: [labels...]}}`
//! - `GET /metrics` → sentinel self-metrics in Prometheus text format

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use sentinel_telemetry::encode_metrics;
use serde::Serialize;
use shared_types::OffendingLabels;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::summary::SummaryStore;

#[derive(Clone)]
struct StatusState {
    summary: SummaryStore,
}

#[derive(Serialize)]
struct SummaryResponse {
    summary: OffendingLabels,
}

/// Build the status router.
pub fn router(summary: SummaryStore) -> Router {
    Router::new()
        .route("/ping", get(ping))
        .route("/summary", get(summary_handler))
        .route("/metrics", get(metrics))
        .with_state(StatusState { summary })
}

/// Serve the status router on `listener` until `shutdown` is cancelled.
pub async fn serve(
    listener: TcpListener,
    summary: SummaryStore,
    shutdown: CancellationToken,
) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "Status server listening");
    }

    axum::serve(listener, router(summary))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
}

async fn ping() -> impl IntoResponse {
    Json(serde_json::json!({ "message": "pong" }))
}

async fn summary_handler(State(state): State<StatusState>) -> Json<SummaryResponse> {
    Json(SummaryResponse {
        summary: state.summary.snapshot(),
    })
}

async fn metrics() -> Response {
    match encode_metrics() {
        Ok(body) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to encode metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_ping() {
        let (status, body) = get_json(router(SummaryStore::new()), "/ping").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({"message": "pong"}));
    }

    #[tokio::test]
    async fn test_summary_starts_empty() {
        let (status, body) = get_json(router(SummaryStore::new()), "/summary").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({"summary": {}}));
    }

    #[tokio::test]
    async fn test_summary_reflects_recorded_drops() {
        let summary = SummaryStore::new();
        let pass: OffendingLabels = [("job-a", vec!["x"]), ("job-b", vec!["y", "z"])]
            .into_iter()
            .collect();
        summary.record(&pass);
        summary.record(&[("job-a", vec!["x"])].into_iter().collect());

        let (_, body) = get_json(router(summary), "/summary").await;

        assert_eq!(
            body,
            serde_json::json!({"summary": {"job-a": ["x", "x"], "job-b": ["y", "z"]}})
        );
    }

    #[tokio::test]
    async fn test_metrics_endpoint() {
        sentinel_telemetry::register_metrics().unwrap();
        let response = router(SummaryStore::new())
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; version=0.0.4"
        );
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let response = router(SummaryStore::new())
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
