//! Turn and dialogue records produced by the engine.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::foundation::{FacetId, TopicId};
use crate::ports::{MetricMap, Stance};

use super::lifecycle::DialogueLifecycle;
use super::topic::{CandidateSnapshot, Facet};

/// Outcome of a single engine step.
#[derive(Debug, Clone)]
pub struct StepResult {
    pub question: String,
    pub answer: Option<String>,
    pub stance: Stance,
    /// Similarity the simulated user computed for the question.
    pub similarity: f64,
    /// 1.0 on a confirmed guess, otherwise the guess's ranking score.
    pub clarify_score: f64,
    pub guessed_facet: Arc<Facet>,
    pub lifecycle: DialogueLifecycle,
}

/// One turn of a dialogue trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub question: String,
    pub answer: Option<String>,
    pub stance: Stance,
    pub similarity: f64,
    pub clarify_score: f64,
    pub guessed_facet_id: FacetId,
    /// Candidates left after the turn, best first.
    pub candidates: Vec<CandidateSnapshot>,
    pub informative_evidence: Vec<String>,
    pub lifecycle: DialogueLifecycle,
}

/// Full record of one simulated dialogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueTrace {
    pub topic_id: TopicId,
    pub target_facet_id: FacetId,
    pub initial_candidates: Vec<CandidateSnapshot>,
    pub turns: Vec<TurnRecord>,
    pub lifecycle: DialogueLifecycle,
    /// The agent believes it found the intent.
    pub subjective_success: bool,
    /// The agent found the intent and it was the user's target.
    pub real_success: bool,
    pub resolved_query: String,
    pub metrics: MetricMap,
}

impl DialogueTrace {
    pub fn turn_count(&self) -> usize {
        self.turns.len()
    }

    /// Facet the dialogue settled on, if it succeeded.
    pub fn confirmed_facet_id(&self) -> Option<&FacetId> {
        if self.lifecycle.is_success() {
            self.turns.last().map(|turn| &turn.guessed_facet_id)
        } else {
            None
        }
    }
}
