//! Metadata endpoints: raw passthrough and normalized season list

use axum::{
    extract::{Query, State},
    response::Response,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::Envelope;
use crate::routes::reply::Reply;
use crate::services::{metrics, normalizer, provider::ProviderError};
use crate::AppState;

#[derive(Deserialize, Default)]
pub struct MediaQuery {
    pub id: Option<String>,
}

/// Non-empty `id` query parameter
fn require_id(query: Option<Query<MediaQuery>>) -> Result<String, ApiError> {
    match query.and_then(|Query(query)| query.id) {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err(ApiError::missing_id()),
    }
}

/// GET /api/v1/mediaInfo?id=<id>
///
/// Returns the provider's envelope as-is, without checking its `success`
/// flag. `/getSeasonList` does check it.
pub async fn media_info(
    State(state): State<Arc<AppState>>,
    query: Option<Query<MediaQuery>>,
) -> Result<Response, ApiError> {
    metrics::record_request("mediaInfo");
    let id = require_id(query)?;

    let envelope = state.provider.fetch_metadata(&id).await?;
    Ok(Reply::new().json(envelope))
}

/// GET /api/v1/getSeasonList?id=<id>
pub async fn get_season_list(
    State(state): State<Arc<AppState>>,
    query: Option<Query<MediaQuery>>,
) -> Result<Response, ApiError> {
    metrics::record_request("getSeasonList");
    let id = require_id(query)?;

    let envelope = state.provider.fetch_metadata(&id).await?;
    if !envelope.success {
        return Err(ApiError::NotFound);
    }

    let playlist = envelope
        .playlist()
        .map_err(|e| ProviderError::Parse(e.to_string()))?;

    let playlist = match playlist {
        Some(playlist) if !playlist.is_empty() => playlist,
        _ => return Err(ApiError::NotFound),
    };

    let seasons = normalizer::normalize(&playlist);
    tracing::info!(
        "Season list for {}: {} ({} entries)",
        id,
        seasons.kind,
        seasons.seasons.len()
    );

    Ok(Reply::new().json(Envelope::ok(&seasons)))
}
