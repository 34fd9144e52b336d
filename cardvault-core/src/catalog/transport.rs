//! Catalog transport trait - Abstraction over the HTTP layer
//!
//! The fetcher only sees this trait, so tests can script responses
//! without a network and alternative transports can be swapped in.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

use crate::error::CatalogError;

fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("cardvault/", env!("CARGO_PKG_VERSION")).to_string()
}

/// HTTP client configuration for catalog endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL the `/search` endpoints hang off.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// User-agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from a JSON file, if present and parseable.
    pub fn load_from_path(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        match serde_json::from_str(&content) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!("Ignoring invalid client config {}: {}", path.display(), e);
                None
            }
        }
    }
}

/// Trait for catalog endpoint transports.
///
/// Implementations issue one GET per call and return the decoded JSON
/// body; shape normalization happens downstream.
#[async_trait]
pub trait CatalogTransport: Send + Sync {
    /// Fetch the given endpoint (e.g. `/search/pokemon`) as JSON.
    async fn get_json(&self, endpoint: &str) -> Result<Value, CatalogError>;

    /// Transport identifier for logging/debugging.
    fn name(&self) -> &'static str;
}

/// reqwest-backed transport for the real catalog API.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Build a transport from configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl CatalogTransport for HttpTransport {
    async fn get_json(&self, endpoint: &str) -> Result<Value, CatalogError> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| CatalogError::Transport {
                endpoint: endpoint.to_string(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(CatalogError::Status {
                endpoint: endpoint.to_string(),
                status: response.status(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| CatalogError::Transport {
                endpoint: endpoint.to_string(),
                source,
            })?;

        serde_json::from_str(&body).map_err(|source| CatalogError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
    }

    fn name(&self) -> &'static str {
        "http"
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000/api");
        assert_eq!(config.timeout_seconds, 30);
        assert!(config.user_agent.starts_with("cardvault/"));
    }

    #[test]
    fn test_config_partial_json_fills_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"base_url": "https://api.example.com"}"#).unwrap();
        assert_eq!(config.base_url, "https://api.example.com");
        assert_eq!(config.timeout_seconds, 30);
    }

    #[tokio::test]
    async fn test_mock_transport_scripted_response() {
        let transport = mock::MockTransport::new()
            .respond("/search", serde_json::json!([{"card_id": "x"}]));

        let body = transport.get_json("/search").await.unwrap();
        assert!(body.is_array());

        let missing = transport.get_json("/search/pokemon").await;
        assert!(missing.is_err());
    }
}
