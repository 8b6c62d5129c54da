//! Dialogue state: candidate set, dead set, evidence and lifecycle.

use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::foundation::{FacetId, StateMachine};

use super::errors::ClarifyError;
use super::lifecycle::DialogueLifecycle;
use super::topic::{ScoredFacet, Topic};

/// State of one clarification dialogue, owned by a single simulation run.
///
/// Facets only ever move from the candidate set to the dead set, so
/// `candidates().len() + dead().len()` stays equal to `total_facets()`.
#[derive(Debug, Clone)]
pub struct DialogueState {
    topic: Arc<Topic>,
    candidates: Vec<ScoredFacet>,
    dead: Vec<ScoredFacet>,
    informative_evidence: Vec<String>,
    lifecycle: DialogueLifecycle,
    total_facets: usize,
}

impl DialogueState {
    /// Creates a state from the provider's candidates.
    ///
    /// Duplicate facet ids keep their first occurrence. An empty candidate
    /// set starts the dialogue in `Failed`.
    pub fn new(topic: Arc<Topic>, candidates: Vec<ScoredFacet>) -> Self {
        let mut seen = HashSet::new();
        let offered = candidates.len();
        let candidates: Vec<ScoredFacet> = candidates
            .into_iter()
            .filter(|candidate| seen.insert(candidate.id().clone()))
            .collect();
        if candidates.len() != offered {
            tracing::warn!(
                topic = %topic.id(),
                dropped = offered - candidates.len(),
                "Dropped duplicate facets from candidate set"
            );
        }

        let lifecycle = if candidates.is_empty() {
            DialogueLifecycle::Failed
        } else {
            DialogueLifecycle::Ongoing
        };

        Self {
            topic,
            total_facets: candidates.len(),
            candidates,
            dead: Vec::new(),
            informative_evidence: Vec::new(),
            lifecycle,
        }
    }

    pub fn topic(&self) -> &Arc<Topic> {
        &self.topic
    }

    /// Facets not yet proposed, best guess first.
    pub fn candidates(&self) -> &[ScoredFacet] {
        &self.candidates
    }

    /// Facets proposed and rejected, in proposal order.
    pub fn dead(&self) -> &[ScoredFacet] {
        &self.dead
    }

    /// Informative content extracted from "no" answers, in arrival order.
    pub fn informative_evidence(&self) -> &[String] {
        &self.informative_evidence
    }

    pub fn lifecycle(&self) -> DialogueLifecycle {
        self.lifecycle
    }

    /// Number of facets the dialogue started with.
    pub fn total_facets(&self) -> usize {
        self.total_facets
    }

    /// Head candidate of an ongoing dialogue.
    pub(crate) fn peek_guess(&self) -> Result<&ScoredFacet, ClarifyError> {
        if !self.lifecycle.is_ongoing() {
            return Err(ClarifyError::invalid_state(format!(
                "cannot step a dialogue in state {:?}",
                self.lifecycle
            )));
        }
        self.candidates.first().ok_or_else(|| {
            ClarifyError::invalid_state("cannot step a dialogue without candidates")
        })
    }

    /// Moves the head candidate to the dead set and returns it.
    pub(crate) fn pop_guess(&mut self) -> Result<ScoredFacet, ClarifyError> {
        self.peek_guess()?;
        let guess = self.candidates.remove(0);
        self.dead.push(guess.clone());
        Ok(guess)
    }

    /// Appends extracted evidence; empty extractions carry no information.
    pub(crate) fn record_evidence(&mut self, evidence: String) {
        if !evidence.is_empty() {
            self.informative_evidence.push(evidence);
        }
    }

    /// Takes the candidate set out for re-ranking.
    pub(crate) fn take_candidates(&mut self) -> Vec<ScoredFacet> {
        std::mem::take(&mut self.candidates)
    }

    /// Puts a re-ranked candidate set back after checking it is a permutation
    /// of what is still unproposed.
    pub(crate) fn restore_candidates(
        &mut self,
        ranked: Vec<ScoredFacet>,
    ) -> Result<(), ClarifyError> {
        let expected = self.total_facets - self.dead.len();
        if ranked.len() != expected {
            return Err(ClarifyError::candidate_mismatch(format!(
                "expected {} candidates, got {}",
                expected,
                ranked.len()
            )));
        }

        let dead_ids: HashSet<&FacetId> = self.dead.iter().map(ScoredFacet::id).collect();
        let mut seen = HashSet::new();
        for candidate in &ranked {
            if dead_ids.contains(candidate.id()) {
                return Err(ClarifyError::candidate_mismatch(format!(
                    "facet {} was already proposed",
                    candidate.id()
                )));
            }
            if !seen.insert(candidate.id()) {
                return Err(ClarifyError::candidate_mismatch(format!(
                    "facet {} appears twice",
                    candidate.id()
                )));
            }
        }

        self.candidates = ranked;
        Ok(())
    }

    /// Applies a validated lifecycle transition.
    pub(crate) fn transition(&mut self, target: DialogueLifecycle) -> Result<(), ClarifyError> {
        self.lifecycle = self.lifecycle.transition_to(target)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clarify::topic::Facet;
    use crate::domain::foundation::TopicId;

    fn facet(id: &str) -> Arc<Facet> {
        Arc::new(Facet::new(FacetId::new(id).unwrap(), format!("facet {}", id), vec![]))
    }

    fn state_with(ids: &[&str]) -> DialogueState {
        let topic = Arc::new(Topic::new(TopicId::new("t").unwrap(), "query", vec![]));
        let candidates = ids.iter().map(|id| ScoredFacet::new(facet(id), 0.0)).collect();
        DialogueState::new(topic, candidates)
    }

    #[test]
    fn empty_candidates_start_failed() {
        let state = state_with(&[]);
        assert_eq!(state.lifecycle(), DialogueLifecycle::Failed);
        assert_eq!(state.total_facets(), 0);
    }

    #[test]
    fn duplicates_are_dropped() {
        let state = state_with(&["a", "b", "a"]);
        assert_eq!(state.candidates().len(), 2);
        assert_eq!(state.total_facets(), 2);
    }

    #[test]
    fn pop_guess_moves_head_to_dead() {
        let mut state = state_with(&["a", "b"]);
        let guess = state.pop_guess().unwrap();
        assert_eq!(guess.id().as_str(), "a");
        assert_eq!(state.dead().len(), 1);
        assert_eq!(state.candidates().len(), 1);
        assert_eq!(state.candidates().len() + state.dead().len(), state.total_facets());
    }

    #[test]
    fn pop_guess_on_terminal_state_fails() {
        let mut state = state_with(&["a"]);
        state.transition(DialogueLifecycle::Success).unwrap();
        assert!(matches!(state.pop_guess(), Err(ClarifyError::InvalidState(_))));
    }

    #[test]
    fn empty_evidence_is_not_recorded() {
        let mut state = state_with(&["a"]);
        state.record_evidence(String::new());
        state.record_evidence("blue one".to_string());
        state.record_evidence("blue one".to_string());
        assert_eq!(state.informative_evidence(), &["blue one", "blue one"]);
    }

    #[test]
    fn restore_rejects_dead_or_duplicate_facets() {
        let mut state = state_with(&["a", "b", "c"]);
        let dead = state.pop_guess().unwrap();
        let taken = state.take_candidates();

        let mut with_dead = taken.clone();
        with_dead[0] = dead;
        assert!(state.restore_candidates(with_dead).is_err());

        let duplicated = vec![taken[0].clone(), taken[0].clone()];
        assert!(state.restore_candidates(duplicated).is_err());

        let reversed: Vec<_> = taken.into_iter().rev().collect();
        state.restore_candidates(reversed).unwrap();
        assert_eq!(state.candidates()[0].id().as_str(), "c");
    }

    #[test]
    fn terminal_transition_cannot_be_undone() {
        let mut state = state_with(&["a"]);
        state.transition(DialogueLifecycle::Failed).unwrap();
        assert!(state.transition(DialogueLifecycle::Success).is_err());
        assert_eq!(state.lifecycle(), DialogueLifecycle::Failed);
    }
}
