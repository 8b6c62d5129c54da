//! Bing Autosuggest client.
//!
//! # Configuration
//!
//! ```ignore
//! let config = BingSuggestConfig::new(api_key)
//!     .with_endpoint("https://api.bing.microsoft.com")
//!     .with_timeout(Duration::from_secs(10));
//!
//! let client = BingSuggestClient::new(config)?;
//! let suggestions = client.suggest("apple").await?;
//! ```

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use crate::ports::FacetProviderError;

/// Header carrying the subscription key.
pub const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Source of query completions.
#[async_trait]
pub trait SuggestionSource: Send + Sync {
    async fn suggest(&self, query: &str) -> Result<Vec<String>, FacetProviderError>;
}

/// Configuration for the Bing Autosuggest API.
#[derive(Debug, Clone)]
pub struct BingSuggestConfig {
    api_key: Secret<String>,
    /// Scheme and host, without a trailing path.
    pub endpoint: String,
    /// Market code sent as `mkt`.
    pub market: String,
    pub timeout: Duration,
}

impl BingSuggestConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            endpoint: "https://api.bing.microsoft.com".to_string(),
            market: "en-US".to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_market(mut self, market: impl Into<String>) -> Self {
        self.market = market.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// HTTP client for the Bing v7 Suggestions endpoint.
pub struct BingSuggestClient {
    config: BingSuggestConfig,
    client: Client,
}

impl BingSuggestClient {
    pub fn new(config: BingSuggestConfig) -> Result<Self, FacetProviderError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| FacetProviderError::network(format!("failed to create HTTP client: {}", e)))?;
        Ok(Self { config, client })
    }

    fn suggestions_url(&self) -> String {
        format!("{}/v7.0/Suggestions", self.config.endpoint.trim_end_matches('/'))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SuggestionsResponse {
    #[serde(default)]
    suggestion_groups: Vec<SuggestionGroup>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SuggestionGroup {
    #[serde(default)]
    search_suggestions: Vec<SearchSuggestion>,
}

#[derive(Debug, Deserialize)]
struct SearchSuggestion {
    query: String,
}

impl SuggestionsResponse {
    /// Queries of the first suggestion group.
    fn into_queries(self) -> Vec<String> {
        self.suggestion_groups
            .into_iter()
            .next()
            .map(|group| group.search_suggestions.into_iter().map(|s| s.query).collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl SuggestionSource for BingSuggestClient {
    async fn suggest(&self, query: &str) -> Result<Vec<String>, FacetProviderError> {
        let response = self
            .client
            .get(self.suggestions_url())
            .query(&[("mkt", self.config.market.as_str()), ("q", query)])
            .header(SUBSCRIPTION_KEY_HEADER, self.config.api_key())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FacetProviderError::network(format!(
                        "request timed out after {}s",
                        self.config.timeout.as_secs()
                    ))
                } else {
                    FacetProviderError::network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, query, "Suggestion API request failed");
            return Err(FacetProviderError::Status {
                status: status.as_u16(),
            });
        }

        let body: SuggestionsResponse = response
            .json()
            .await
            .map_err(|e| FacetProviderError::parse(e.to_string()))?;
        Ok(body.into_queries())
    }
}
