//! Per-dialogue state of the simulated user.

use std::sync::Arc;

use crate::domain::clarify::{ClarifyError, Facet, Topic};
use crate::domain::foundation::ensure_unit_interval;

/// What the simulated user knows and has said in one dialogue.
///
/// Questions and answers are recorded in lockstep: at any observation point
/// either both lists have the same length or exactly one question is pending.
#[derive(Debug, Clone)]
pub struct UserSimulatorState {
    topic: Arc<Topic>,
    target: Arc<Facet>,
    turns: usize,
    patience: usize,
    cooperativeness: f64,
    questions: Vec<String>,
    answers: Vec<Option<String>>,
}

impl UserSimulatorState {
    /// Creates the state for a user whose real intent is `target`.
    pub fn new(
        topic: Arc<Topic>,
        target: Arc<Facet>,
        patience: usize,
        cooperativeness: f64,
    ) -> Result<Self, ClarifyError> {
        if !topic.contains_facet(target.id()) {
            return Err(ClarifyError::UnknownTargetFacet {
                topic: topic.id().clone(),
                facet: target.id().clone(),
            });
        }
        let cooperativeness = ensure_unit_interval("cooperativeness", cooperativeness)?;
        Ok(Self {
            topic,
            target,
            turns: 0,
            patience,
            cooperativeness,
            questions: Vec::new(),
            answers: Vec::new(),
        })
    }

    pub fn topic(&self) -> &Arc<Topic> {
        &self.topic
    }

    pub fn target(&self) -> &Arc<Facet> {
        &self.target
    }

    pub fn turns(&self) -> usize {
        self.turns
    }

    pub fn patience(&self) -> usize {
        self.patience
    }

    pub fn cooperativeness(&self) -> f64 {
        self.cooperativeness
    }

    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    pub fn answers(&self) -> &[Option<String>] {
        &self.answers
    }

    /// True once the user has answered as many questions as patience allows.
    pub fn ran_out_of_patience(&self) -> bool {
        self.turns >= self.patience
    }

    pub(crate) fn set_cooperativeness(&mut self, value: f64) -> Result<(), ClarifyError> {
        self.cooperativeness = ensure_unit_interval("cooperativeness", value)?;
        Ok(())
    }

    pub(crate) fn begin_turn(&mut self) {
        self.turns += 1;
    }

    /// Fails if a previous question is still unanswered.
    pub(crate) fn ensure_answered(&self) -> Result<(), ClarifyError> {
        if self.questions.len() != self.answers.len() {
            return Err(ClarifyError::OutOfSync {
                questions: self.questions.len(),
                answers: self.answers.len(),
                reason: "still waiting on an answer to a previous question",
            });
        }
        Ok(())
    }

    /// Records a question; fails if the previous one is still unanswered.
    pub fn add_question(&mut self, question: impl Into<String>) -> Result<(), ClarifyError> {
        self.ensure_answered()?;
        self.questions.push(question.into());
        Ok(())
    }

    /// Records the answer to the pending question.
    pub fn add_answer(&mut self, answer: Option<String>) -> Result<(), ClarifyError> {
        if self.questions.len() != self.answers.len() + 1 {
            return Err(ClarifyError::OutOfSync {
                questions: self.questions.len(),
                answers: self.answers.len(),
                reason: "no question is waiting on an answer",
            });
        }
        self.answers.push(answer);
        Ok(())
    }
}
