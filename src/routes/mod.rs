pub mod extract;
pub mod health;
pub mod index;
pub mod media;
pub mod reply;
pub mod stream;

use axum::{
    middleware::from_fn,
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::error::ApiError;
use crate::middleware;
use crate::AppState;

async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

async fn page_not_found() -> ApiError {
    ApiError::PageNotFound
}

/// Routes under `/api/v1`
fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/mediaInfo",
            get(media::media_info).fallback(method_not_allowed),
        )
        .route(
            "/getSeasonList",
            get(media::get_season_list).fallback(method_not_allowed),
        )
        .route(
            "/getStream",
            post(stream::get_stream).fallback(method_not_allowed),
        )
        .fallback(route_not_found)
}

/// Build the gateway router.
///
/// Request order: CORS (and preflight short-circuit) → rate limit → route.
/// Outside `/api/v1` anything but the known GET routes is a plain 404.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Web client
        .route("/", get(index::index).fallback(page_not_found))
        // Health endpoints
        .route("/health", get(health::health_check).fallback(page_not_found))
        .route("/metrics", get(health::metrics).fallback(page_not_found))
        // Media API
        .nest("/api/v1", api_router())
        .fallback(page_not_found)
        // Middleware
        .layer(from_fn_with_state(state.clone(), middleware::rate_limit))
        .layer(from_fn(middleware::cors))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
