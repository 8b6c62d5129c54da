//! Similarity Oracle Port - Interface for sentence similarity scoring.
//!
//! Both the agent (ranking facets against evidence) and the simulated user
//! (judging how well a question matches its intent) score text pairs through
//! this port. Implementations may wrap embedding models, learned matchers or
//! lexical heuristics, and may be decorated with a cache.
//!
//! # Contract
//!
//! - Scores lie in [0, 1]
//! - Deterministic for a given model and cache state
//! - Symmetry is not required: `similarity(a, b)` may differ from `similarity(b, a)`

use async_trait::async_trait;

/// Port for scoring the similarity of two texts.
#[async_trait]
pub trait SimilarityOracle: Send + Sync {
    /// Scores how similar `text_a` is to `text_b`, in [0, 1].
    async fn similarity(&self, text_a: &str, text_b: &str) -> Result<f64, SimilarityError>;

    /// Short name for logs.
    fn name(&self) -> &str;
}

/// Similarity oracle errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimilarityError {
    /// Backing model or service is unavailable.
    #[error("similarity backend unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// Backend produced a score outside [0, 1].
    #[error("similarity score {score} is outside [0, 1]")]
    ScoreOutOfRange {
        /// Offending score.
        score: f64,
    },
}

impl SimilarityError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Validates a raw backend score.
    pub fn check_score(score: f64) -> Result<f64, Self> {
        if (0.0..=1.0).contains(&score) {
            Ok(score)
        } else {
            Err(Self::ScoreOutOfRange { score })
        }
    }
}
