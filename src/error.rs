use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::models::Envelope;
use crate::routes::reply::Reply;
use crate::services::metrics;
use crate::services::provider::ProviderError;

pub const MISSING_ID: &str = "Please provide a valid id";

/// Failures a request can end in.
///
/// Input and upstream problems are reported inside the `{success: false}`
/// envelope with HTTP 200; gateway-level problems get a 4xx status and an
/// `{error}` body.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed client input
    #[error("{0}")]
    Validation(String),

    /// Provider does not know the id or returned no playlist
    #[error("Media not found")]
    NotFound,

    /// Upstream fetch/parse failure
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Request body is not valid JSON
    #[error("Invalid JSON")]
    InvalidJson,

    #[error("Too many requests, please try again later.")]
    RateLimited,

    /// Unknown path under the API prefix
    #[error("Route not found")]
    RouteNotFound,

    /// Unknown path or method outside the API prefix
    #[error("Not found")]
    PageNotFound,

    #[error("Method not allowed")]
    MethodNotAllowed,
}

impl ApiError {
    pub fn missing_id() -> Self {
        ApiError::Validation(MISSING_ID.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(message) => {
                return Reply::new().json(Envelope::fail(message.clone()));
            }
            ApiError::NotFound | ApiError::Provider(ProviderError::NotFound) => {
                return Reply::new().json(Envelope::fail("Media not found"));
            }
            ApiError::Provider(e) => {
                // Upstream details stay in the logs
                tracing::error!("Provider error: {}", e);
                metrics::PROVIDER_ERRORS_TOTAL.inc();
                return Reply::new().json(Envelope::fail("Internal server error"));
            }
            ApiError::InvalidJson => StatusCode::BAD_REQUEST,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::RouteNotFound | ApiError::PageNotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        };

        Reply::new()
            .status(status)
            .json(json!({ "error": self.to_string() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::missing_id().into_response().status(), StatusCode::OK);
        assert_eq!(ApiError::NotFound.into_response().status(), StatusCode::OK);
        assert_eq!(
            ApiError::Provider(ProviderError::Http(500)).into_response().status(),
            StatusCode::OK
        );
        assert_eq!(
            ApiError::InvalidJson.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::RateLimited.into_response().status(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            ApiError::RouteNotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::PageNotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::MethodNotAllowed.into_response().status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
    }
}
