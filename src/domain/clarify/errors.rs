//! Error types for the clarification domain.

use crate::domain::foundation::{FacetId, TopicId, ValidationError};
use crate::ports::{EvaluationError, FacetProviderError, SimilarityError};

/// Errors raised while simulating clarification dialogues.
///
/// Contract violations (`InvalidState`, `OutOfSync`, `Validation`,
/// `UnknownTargetFacet`, `CandidateMismatch`) are programming errors and are
/// never corrected silently. The remaining variants wrap collaborator failures
/// and are surfaced unchanged to the caller of the dialogue run.
#[derive(Debug, thiserror::Error)]
pub enum ClarifyError {
    #[error("invalid dialogue state: {0}")]
    InvalidState(String),

    #[error("question/answer history out of sync: {questions} questions, {answers} answers ({reason})")]
    OutOfSync {
        questions: usize,
        answers: usize,
        reason: &'static str,
    },

    #[error("facet {facet} does not belong to topic {topic}")]
    UnknownTargetFacet { topic: TopicId, facet: FacetId },

    #[error("ranker returned a candidate set that is not a permutation of its input: {0}")]
    CandidateMismatch(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("similarity oracle failed: {0}")]
    Similarity(#[from] SimilarityError),

    #[error("facet provider failed: {0}")]
    FacetProvider(#[from] FacetProviderError),

    #[error("retrieval evaluation failed: {0}")]
    Evaluation(#[from] EvaluationError),
}

impl ClarifyError {
    /// Creates an invalid state error.
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }

    /// Creates a candidate mismatch error.
    pub fn candidate_mismatch(message: impl Into<String>) -> Self {
        Self::CandidateMismatch(message.into())
    }

    /// Returns true for programming errors as opposed to collaborator failures.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::InvalidState(_)
                | Self::OutOfSync { .. }
                | Self::UnknownTargetFacet { .. }
                | Self::CandidateMismatch(_)
                | Self::Validation(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contract_violations_are_classified() {
        assert!(ClarifyError::invalid_state("terminal").is_contract_violation());
        assert!(ClarifyError::OutOfSync {
            questions: 2,
            answers: 0,
            reason: "pending"
        }
        .is_contract_violation());
        assert!(!ClarifyError::Similarity(SimilarityError::unavailable("down"))
            .is_contract_violation());
    }

    #[test]
    fn out_of_sync_displays_counts() {
        let err = ClarifyError::OutOfSync {
            questions: 2,
            answers: 0,
            reason: "still waiting on an answer",
        };
        assert_eq!(
            err.to_string(),
            "question/answer history out of sync: 2 questions, 0 answers (still waiting on an answer)"
        );
    }
}
