use crate::services::get_metrics;
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// Liveness check.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "charge-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness check. The service holds no connections of its own, so it is
/// ready as soon as it is listening.
pub async fn readiness_check() -> impl IntoResponse {
    StatusCode::OK
}

/// Metrics endpoint for Prometheus scraping.
pub async fn metrics_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        get_metrics(),
    )
}
