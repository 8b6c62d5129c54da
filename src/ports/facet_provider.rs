//! Facet Provider Port - supplies the initial candidate facets for a topic.
//!
//! Providers may read facets from a dataset, expand the query through a
//! web-suggestion API, or decorate another provider (e.g. attaching enhanced
//! representations). The returned order and prior scores seed the dialogue.

use async_trait::async_trait;

use crate::domain::clarify::{ScoredFacet, Topic};

/// Port for retrieving candidate facets.
#[async_trait]
pub trait FacetProvider: Send + Sync {
    /// Returns `(facet, prior_score)` pairs for the topic; may be empty.
    async fn facets_for_topic(&self, topic: &Topic) -> Result<Vec<ScoredFacet>, FacetProviderError>;
}

/// Facet provider errors.
#[derive(Debug, thiserror::Error)]
pub enum FacetProviderError {
    /// Network error talking to a remote source.
    #[error("network error: {0}")]
    Network(String),

    /// Remote source answered with a non-success status.
    #[error("suggestion API returned status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// Remote payload could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// Reading or writing a backing file failed.
    #[error("IO error: {0}")]
    Io(String),

    /// No enhanced representation is known for a facet.
    #[error("no enhanced representation for topic '{topic}', facet '{facet}'")]
    MissingEnhancedRep {
        /// Topic query.
        topic: String,
        /// Facet description.
        facet: String,
    },

    /// Suggested text could not become a facet.
    #[error("invalid facet: {0}")]
    InvalidFacet(String),
}

impl FacetProviderError {
    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Creates an IO error.
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io(message.into())
    }

    /// Returns true if retrying the same call might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Status { status } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_failures_are_retryable() {
        assert!(FacetProviderError::network("reset").is_retryable());
        assert!(FacetProviderError::Status { status: 503 }.is_retryable());
        assert!(FacetProviderError::Status { status: 429 }.is_retryable());
    }

    #[test]
    fn permanent_failures_are_not_retryable() {
        assert!(!FacetProviderError::Status { status: 401 }.is_retryable());
        assert!(!FacetProviderError::parse("bad json").is_retryable());
    }
}
