//! Liveness probe endpoint.

use axum::{http::StatusCode, response::IntoResponse, Json};

use crate::models::HealthStatus;

/// `GET /health`: always returns 200 OK with `{"status": "ok"}`.
///
/// This endpoint has no dependencies and never blocks, making it safe to use
/// as a Docker / Kubernetes liveness probe.
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthStatus::ok()))
}
