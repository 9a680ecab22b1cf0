use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use prometheus::{Encoder, TextEncoder};
use serde::Serialize;
use std::sync::Arc;

use crate::AppState;

/// Rate limiter stats
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RateLimitStats {
    enabled: bool,
    window_secs: u64,
    tracked_clients: usize,
}

/// Health check response
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: String,
    version: String,
    uptime: u64,
    rate_limit: RateLimitStats,
}

/// GET /health - liveness plus limiter stats
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let health = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime: state.start_time.elapsed().as_secs(),
        rate_limit: RateLimitStats {
            enabled: state.limiter.is_enabled(),
            window_secs: state.limiter.window().as_secs(),
            tracked_clients: state.limiter.tracked_clients().await,
        },
    };

    Json(health)
}

/// GET /metrics - Prometheus metrics
pub async fn metrics() -> Response {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    match encoder.encode(&metric_families, &mut buffer) {
        Ok(_) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            buffer,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to encode metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [("content-type", "text/plain")],
                b"Internal Server Error".to_vec(),
            )
                .into_response()
        }
    }
}
