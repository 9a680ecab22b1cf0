//! Response writer used by the handlers.
//!
//! `Reply::new().status(code).json(data)` sets the status first and writes
//! the body second; `status` can be skipped for a 200.

use axum::{
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Debug, Clone, Copy)]
pub struct Reply {
    status: StatusCode,
}

impl Default for Reply {
    fn default() -> Self {
        Self::new()
    }
}

impl Reply {
    pub fn new() -> Self {
        Self {
            status: StatusCode::OK,
        }
    }

    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Write `data` as an `application/json` body
    pub fn json<T: Serialize>(self, data: T) -> Response {
        (self.status, Json(data)).into_response()
    }

    /// Write `text` as a `text/plain` body
    pub fn send(self, text: impl Into<String>) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            text.into(),
        )
            .into_response()
    }

    /// Write `html` as a `text/html` body
    pub fn html(self, html: String) -> Response {
        (self.status, Html(html)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::json;

    #[tokio::test]
    async fn test_status_then_json() {
        let response = Reply::new()
            .status(StatusCode::METHOD_NOT_ALLOWED)
            .json(json!({"error": "Method not allowed"}));

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], br#"{"error":"Method not allowed"}"#);
    }

    #[tokio::test]
    async fn test_send_defaults_to_ok() {
        let response = Reply::new().send("alive");

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"alive");
    }
}
