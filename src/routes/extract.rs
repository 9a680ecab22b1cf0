use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde_json::{Map, Value};

use crate::error::ApiError;

/// Whole request body parsed as JSON. An empty body reads as `{}`.
pub struct JsonBody(pub Value);

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(request, state).await.map_err(|e| {
            tracing::error!("Failed to read request body: {}", e);
            ApiError::InvalidJson
        })?;

        if bytes.is_empty() {
            return Ok(JsonBody(Value::Object(Map::new())));
        }

        serde_json::from_slice(&bytes).map(JsonBody).map_err(|e| {
            tracing::error!("JSON parsing error: {}", e);
            ApiError::InvalidJson
        })
    }
}
