//! Gateway middleware: CORS and per-client rate limiting

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::net::SocketAddr;
use std::sync::Arc;

use crate::error::ApiError;
use crate::services::metrics;
use crate::services::rate_limit::Admission;
use crate::AppState;

const ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
const ALLOW_HEADERS: &str = "Content-Type, Authorization";

/// Operational endpoints polled by probes and scrapers, never rate limited
const UNLIMITED_PATHS: [&str; 2] = ["/health", "/metrics"];

/// Adds CORS headers to every response and answers preflight requests
/// with an empty 200 before anything else runs.
pub async fn cors(request: Request, next: Next) -> Response {
    let mut response = if request.method() == Method::OPTIONS {
        StatusCode::OK.into_response()
    } else {
        next.run(request).await
    };

    set_cors_headers(response.headers_mut());
    response
}

fn set_cors_headers(headers: &mut HeaderMap) {
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static("true"),
    );
}

/// Rejects requests over the per-client budget with 429
pub async fn rate_limit(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    if UNLIMITED_PATHS.contains(&request.uri().path()) {
        return next.run(request).await;
    }

    let client = client_address(&request);

    match state.limiter.check(&client).await {
        Admission::Admitted => next.run(request).await,
        Admission::Limited => {
            tracing::warn!("Rate limited {} on {}", client, request.uri().path());
            metrics::RATE_LIMITED_TOTAL.inc();
            ApiError::RateLimited.into_response()
        }
    }
}

/// Client IP from the connection, "unknown" when the server was not
/// started with connect info
fn client_address(request: &Request) -> String {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
