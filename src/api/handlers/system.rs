//! System endpoints: health check.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
    upstream_breaker: UpstreamBreakerStatus,
}

/// Snapshot of the upstream circuit breaker.
#[derive(Debug, Serialize, ToSchema)]
pub struct UpstreamBreakerStatus {
    state: String,
    failure_count: u32,
    fail_max: u32,
}

/// `GET /health`: Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service status, version, current timestamp and the state of the upstream circuit breaker. An open breaker does not make the service unhealthy; lookups fall back to the catalog cache.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let breaker = state.resolver.breaker();
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            upstream_breaker: UpstreamBreakerStatus {
                state: breaker.state().to_string(),
                failure_count: breaker.failure_count(),
                fail_max: breaker.fail_max(),
            },
        }),
    )
}

/// System routes mounted at the root level (not under /api/v1).
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_handler))
}
