use axum::{extract::State, http::StatusCode, response::Response};
use std::sync::Arc;

use crate::routes::reply::Reply;
use crate::AppState;

/// GET / - serves the web client's index page, read fresh on every request
pub async fn index(State(state): State<Arc<AppState>>) -> Response {
    match tokio::fs::read_to_string(&state.config.index_html_path).await {
        Ok(html) => Reply::new().html(html),
        Err(e) => {
            tracing::error!(
                "Error reading HTML file {}: {}",
                state.config.index_html_path,
                e
            );
            Reply::new()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .send("Error loading application")
        }
    }
}
