//! Upstream media provider
//!
//! The gateway talks to exactly one content provider. [`MediaProvider`] is
//! the narrow contract the handlers depend on; [`HttpProvider`] is the
//! reqwest-backed implementation used in production.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, error};

use crate::models::Envelope;

/// Stream link returned by the provider, forwarded to clients untouched
pub type StreamLink = Value;

/// Failures reported by the provider
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider does not know the requested media
    #[error("Media not found")]
    NotFound,
    /// Network/connection error
    #[error("Network error: {0}")]
    Network(String),
    /// HTTP error (non-2xx status)
    #[error("HTTP error: {0}")]
    Http(u16),
    /// Response body could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),
}

#[async_trait]
pub trait MediaProvider: Send + Sync {
    /// Fetch the raw metadata envelope for a media id
    async fn fetch_metadata(&self, id: &str) -> Result<Envelope, ProviderError>;

    /// Resolve a playable stream for `id` and a provider-specific selection
    async fn resolve_stream(
        &self,
        id: &str,
        selection: Map<String, Value>,
    ) -> Result<StreamLink, ProviderError>;
}

/// HTTP client for the upstream provider
pub struct HttpProvider {
    http: Client,
    base_url: String,
}

impl HttpProvider {
    /// Create a new provider client
    ///
    /// # Arguments
    /// * `base_url` - Provider base URL (e.g., "http://provider.local:4000")
    /// * `user_agent` - User-Agent sent with every upstream request
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self, ProviderError> {
        let http = Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Decode a provider response into an envelope
    async fn read_envelope(response: reqwest::Response) -> Result<Envelope, ProviderError> {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ProviderError::NotFound);
        }
        if !status.is_success() {
            return Err(ProviderError::Http(status.as_u16()));
        }

        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        serde_json::from_str(&text).map_err(|e| {
            error!("Failed to parse provider response: {}", e);
            debug!("Response text: {}", text.chars().take(500).collect::<String>());
            ProviderError::Parse(e.to_string())
        })
    }
}

#[async_trait]
impl MediaProvider for HttpProvider {
    async fn fetch_metadata(&self, id: &str) -> Result<Envelope, ProviderError> {
        debug!("Provider metadata request: {}", id);

        let response = self
            .http
            .get(self.endpoint("info"))
            .query(&[("id", id)])
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        Self::read_envelope(response).await
    }

    async fn resolve_stream(
        &self,
        id: &str,
        mut selection: Map<String, Value>,
    ) -> Result<StreamLink, ProviderError> {
        debug!("Provider stream request: {}", id);

        selection.insert("id".to_string(), Value::String(id.to_string()));

        let response = self
            .http
            .post(self.endpoint("stream"))
            .json(&selection)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let envelope = Self::read_envelope(response).await?;
        if !envelope.success {
            return Err(ProviderError::NotFound);
        }

        envelope
            .data
            .ok_or_else(|| ProviderError::Parse("stream reply without data".to_string()))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_trailing_slash() {
        let provider = HttpProvider::new("http://provider.local:4000/", "test").unwrap();
        assert_eq!(provider.endpoint("info"), "http://provider.local:4000/info");
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(ProviderError::NotFound.to_string(), "Media not found");
        assert_eq!(ProviderError::Http(503).to_string(), "HTTP error: 503");
    }
}
