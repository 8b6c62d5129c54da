//! Facet source configuration

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::error::ValidationError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FacetSource {
    /// The topic's own facets from the dataset
    #[default]
    Dataset,
    /// Query suggestions from the autosuggest API
    Suggestions,
}

/// Where candidate facets come from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacetsConfig {
    #[serde(default)]
    pub source: FacetSource,

    /// TSV of enhanced facet representations
    #[serde(default)]
    pub enhanced_reps_path: Option<PathBuf>,

    /// Autosuggest subscription key
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Minimum spacing between autosuggest calls
    #[serde(default = "default_cooldown_ms")]
    pub cooldown_ms: u64,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_cache_path")]
    pub cache_path: PathBuf,

    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Characters appended to each query during expansion
    #[serde(default)]
    pub expansion_chars: String,
}

impl FacetsConfig {
    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().is_empty())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.source != FacetSource::Suggestions {
            return Ok(());
        }
        if !self.has_api_key() {
            return Err(ValidationError::MissingRequired("FACETS__API_KEY"));
        }
        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(ValidationError::InvalidUrl("facets.endpoint"));
        }
        if self.max_depth == 0 {
            return Err(ValidationError::MustBePositive("max_depth"));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::MustBePositive("timeout_secs"));
        }
        if !self.expansion_chars.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ValidationError::InvalidExpansionChars);
        }
        Ok(())
    }
}

impl Default for FacetsConfig {
    fn default() -> Self {
        Self {
            source: FacetSource::default(),
            enhanced_reps_path: None,
            api_key: None,
            endpoint: default_endpoint(),
            cooldown_ms: default_cooldown_ms(),
            timeout_secs: default_timeout_secs(),
            cache_path: default_cache_path(),
            max_depth: default_max_depth(),
            expansion_chars: String::new(),
        }
    }
}

fn default_endpoint() -> String {
    "https://api.bing.microsoft.com".to_string()
}

fn default_cooldown_ms() -> u64 {
    3000
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_cache_path() -> PathBuf {
    PathBuf::from("cache/suggestions.json")
}

fn default_max_depth() -> usize {
    1
}
