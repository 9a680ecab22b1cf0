use axum::{extract::State, response::Response};
use serde_json::Value;
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::Envelope;
use crate::routes::extract::JsonBody;
use crate::routes::reply::Reply;
use crate::services::metrics;
use crate::AppState;

/// POST /api/v1/getStream
///
/// Body: `{ "id": "...", ...selection }`. Everything besides `id` is the
/// provider-specific selection and is forwarded untouched.
pub async fn get_stream(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody,
) -> Result<Response, ApiError> {
    metrics::record_request("getStream");

    let Value::Object(mut selection) = body else {
        return Err(ApiError::missing_id());
    };

    let id = match selection.remove("id") {
        Some(Value::String(id)) if !id.is_empty() => id,
        _ => return Err(ApiError::missing_id()),
    };

    let link = state.provider.resolve_stream(&id, selection).await?;
    Ok(Reply::new().json(Envelope::ok(link)))
}
