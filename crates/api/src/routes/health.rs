//! Health check endpoints.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::time::Instant;

use crate::app::AppState;

/// Full health check including database connectivity and latency.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let start = Instant::now();
    let db_ok = sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.pool)
        .await
        .is_ok();
    let latency_ms = start.elapsed().as_millis() as u64;

    let status = if db_ok { "healthy" } else { "unhealthy" };
    let code = if db_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        code,
        Json(json!({
            "status": status,
            "database": {
                "status": if db_ok { "up" } else { "down" },
                "latency_ms": latency_ms,
            },
        })),
    )
}

/// Readiness probe. Fails while the database is unreachable.
pub async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    let db_ok = sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.pool)
        .await
        .is_ok();

    if db_ok {
        (StatusCode::OK, Json(json!({ "status": "ready" })))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "not ready" })),
        )
    }
}

/// Liveness probe. Answers as long as the process is serving requests.
pub async fn live() -> impl IntoResponse {
    Json(json!({ "status": "alive" }))
}
