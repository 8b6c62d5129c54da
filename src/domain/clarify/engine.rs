//! Clarify Engine - drives clarification dialogues turn by turn.
//!
//! Each turn proposes the best remaining candidate facet, asks the simulated
//! user about it and either confirms the guess or folds the answer back into
//! the ranking as evidence.

use futures::stream::{self, StreamExt};
use std::sync::Arc;

use crate::domain::ranking::{zero_scores, FacetRanker};
use crate::domain::simulation::{UserSimulator, UserSimulatorState};
use crate::ports::{
    FacetProvider, InformativeExtractor, QuestionGenerator, RetrievalEvaluator, Stance,
    StanceDetector,
};

use super::errors::ClarifyError;
use super::lifecycle::DialogueLifecycle;
use super::report::{FacetReport, RunReport, TopicOutcome, TopicReport};
use super::state::DialogueState;
use super::topic::{CandidateSnapshot, Facet, Topic};
use super::trace::{DialogueTrace, StepResult, TurnRecord};

/// Collaborators the engine is wired with.
pub struct EngineComponents {
    pub facet_provider: Arc<dyn FacetProvider>,
    pub ranker: Arc<dyn FacetRanker>,
    pub question_generator: Arc<dyn QuestionGenerator>,
    pub user_simulator: Arc<UserSimulator>,
    pub stance_detector: Arc<dyn StanceDetector>,
    pub informative_extractor: Arc<dyn InformativeExtractor>,
    pub evaluator: Arc<dyn RetrievalEvaluator>,
}

/// Runs clarification dialogues between the agent and a simulated user.
pub struct ClarifyEngine {
    facet_provider: Arc<dyn FacetProvider>,
    ranker: Arc<dyn FacetRanker>,
    question_generator: Arc<dyn QuestionGenerator>,
    user_simulator: Arc<UserSimulator>,
    stance_detector: Arc<dyn StanceDetector>,
    informative_extractor: Arc<dyn InformativeExtractor>,
    evaluator: Arc<dyn RetrievalEvaluator>,
    max_concurrent_topics: usize,
}

impl ClarifyEngine {
    pub fn new(components: EngineComponents) -> Self {
        Self {
            facet_provider: components.facet_provider,
            ranker: components.ranker,
            question_generator: components.question_generator,
            user_simulator: components.user_simulator,
            stance_detector: components.stance_detector,
            informative_extractor: components.informative_extractor,
            evaluator: components.evaluator,
            max_concurrent_topics: 1,
        }
    }

    /// Number of topics simulated at the same time by `run`. Zero is treated as one.
    pub fn with_max_concurrent_topics(mut self, limit: usize) -> Self {
        self.max_concurrent_topics = limit.max(1);
        self
    }

    pub fn ranker_name(&self) -> &'static str {
        self.ranker.name()
    }

    /// Builds the initial dialogue state for a topic.
    ///
    /// A provider that finds no facets yields a `Failed` state rather than an error.
    pub async fn build_dialogue(&self, topic: Arc<Topic>) -> Result<DialogueState, ClarifyError> {
        let facets = self.facet_provider.facets_for_topic(&topic).await?;
        let mut state = DialogueState::new(topic, facets);
        if state.lifecycle().is_ongoing() {
            self.rerank(&mut state).await?;
        } else {
            tracing::info!(topic = %state.topic().id(), "No candidate facets, dialogue failed");
        }
        Ok(state)
    }

    /// Plays one turn of the dialogue.
    pub async fn step(
        &self,
        state: &mut DialogueState,
        user: &mut UserSimulatorState,
    ) -> Result<StepResult, ClarifyError> {
        if user.topic().id() != state.topic().id() {
            return Err(ClarifyError::invalid_state(format!(
                "user simulates topic {} but dialogue is about {}",
                user.topic().id(),
                state.topic().id()
            )));
        }

        // 1. Propose the best remaining candidate
        let guess = state.peek_guess()?.clone();
        let question = self
            .question_generator
            .generate_question(state.topic(), &guess.facet);

        // 2. Ask the user; the guess only dies once an answer came back
        let feedback = self.user_simulator.feedback(user, &question).await?;
        state.pop_guess()?;
        let stance = self.stance_detector.stance(feedback.answer.as_deref());

        // 3. Confirm, or learn from the rejection
        let clarify_score = if stance == Stance::Yes {
            state.transition(DialogueLifecycle::Success)?;
            1.0
        } else {
            let evidence = self
                .informative_extractor
                .extract(feedback.answer.as_deref());
            state.record_evidence(evidence);
            self.rerank(state).await?;
            if state.candidates().is_empty() || user.ran_out_of_patience() {
                state.transition(DialogueLifecycle::Failed)?;
            }
            guess.score
        };

        tracing::debug!(
            topic = %state.topic().id(),
            guess = %guess.id(),
            ?stance,
            similarity = feedback.similarity,
            remaining = state.candidates().len(),
            lifecycle = ?state.lifecycle(),
            "Dialogue turn"
        );

        Ok(StepResult {
            question,
            answer: feedback.answer,
            stance,
            similarity: feedback.similarity,
            clarify_score,
            guessed_facet: guess.facet,
            lifecycle: state.lifecycle(),
        })
    }

    /// Simulates one full dialogue with a user whose intent is `target`.
    pub async fn run_dialogue(
        &self,
        topic: Arc<Topic>,
        target: Arc<Facet>,
    ) -> Result<DialogueTrace, ClarifyError> {
        let mut user = self
            .user_simulator
            .build_state(topic.clone(), target.clone())?;
        let mut state = self.build_dialogue(topic.clone()).await?;
        let initial_candidates = snapshot(&state);

        let mut turns = Vec::new();
        let mut confirmed: Option<Arc<Facet>> = None;
        while state.lifecycle().is_ongoing() {
            let result = self.step(&mut state, &mut user).await?;
            if result.lifecycle.is_success() {
                confirmed = Some(result.guessed_facet.clone());
            }
            turns.push(TurnRecord {
                question: result.question,
                answer: result.answer,
                stance: result.stance,
                similarity: result.similarity,
                clarify_score: result.clarify_score,
                guessed_facet_id: result.guessed_facet.id().clone(),
                candidates: snapshot(&state),
                informative_evidence: state.informative_evidence().to_vec(),
                lifecycle: result.lifecycle,
            });
        }

        let subjective_success = state.lifecycle().is_success();
        let real_success = confirmed
            .as_ref()
            .map_or(false, |facet| facet.id() == target.id());
        let resolved_query = match &confirmed {
            Some(facet) => facet.description().to_string(),
            None => topic.query().to_string(),
        };
        let metrics = self
            .evaluator
            .calculate_metrics(&topic, &target, &resolved_query)
            .await?;

        Ok(DialogueTrace {
            topic_id: topic.id().clone(),
            target_facet_id: target.id().clone(),
            initial_candidates,
            turns,
            lifecycle: state.lifecycle(),
            subjective_success,
            real_success,
            resolved_query,
            metrics,
        })
    }

    /// Simulates `epochs` dialogues for every facet of every topic.
    ///
    /// A failing dialogue aborts its topic only; the error is recorded in the
    /// report and the remaining topics still run.
    pub async fn run(&self, epochs: usize, topics: &[Arc<Topic>]) -> RunReport {
        tracing::info!(
            topics = topics.len(),
            epochs,
            ranker = self.ranker.name(),
            concurrency = self.max_concurrent_topics,
            "Starting simulation run"
        );

        let reports: Vec<TopicReport> = stream::iter(topics.iter().cloned())
            .map(|topic| self.run_topic(epochs, topic))
            .buffered(self.max_concurrent_topics)
            .collect()
            .await;

        let report = RunReport::new(epochs, self.ranker.name(), reports);
        tracing::info!(
            topics = report.topics.len(),
            aborted = report.aborted_topics(),
            "Simulation run finished"
        );
        report
    }

    async fn run_topic(&self, epochs: usize, topic: Arc<Topic>) -> TopicReport {
        let outcome = match self.simulate_topic(epochs, &topic).await {
            Ok(facets) => {
                tracing::info!(topic = %topic.id(), facets = facets.len(), "Topic simulated");
                TopicOutcome::Completed { facets }
            }
            Err(err) => {
                tracing::warn!(topic = %topic.id(), error = %err, "Topic aborted");
                TopicOutcome::Aborted {
                    error: err.to_string(),
                }
            }
        };
        TopicReport {
            topic_id: topic.id().clone(),
            query: topic.query().to_string(),
            outcome,
        }
    }

    async fn simulate_topic(
        &self,
        epochs: usize,
        topic: &Arc<Topic>,
    ) -> Result<Vec<FacetReport>, ClarifyError> {
        let mut facets = Vec::with_capacity(topic.facets().len());
        for target in topic.facets() {
            let mut dialogues = Vec::with_capacity(epochs);
            for _ in 0..epochs {
                dialogues.push(self.run_dialogue(topic.clone(), target.clone()).await?);
            }
            facets.push(FacetReport::from_dialogues(target.id().clone(), dialogues));
        }
        Ok(facets)
    }

    async fn rerank(&self, state: &mut DialogueState) -> Result<(), ClarifyError> {
        if state.candidates().is_empty() {
            return Ok(());
        }
        let candidates = state.take_candidates();
        if !self
            .ranker
            .needs_rescoring(state.informative_evidence(), state.dead())
        {
            return state.restore_candidates(zero_scores(candidates));
        }
        let ranked = self
            .ranker
            .rank(candidates, state.informative_evidence(), state.dead())
            .await?;
        state.restore_candidates(ranked)
    }
}

fn snapshot(state: &DialogueState) -> Vec<CandidateSnapshot> {
    state.candidates().iter().map(CandidateSnapshot::from).collect()
}
