//! Simulated user answering clarifying questions.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::clarify::{ClarifyError, Facet, Topic};
use crate::ports::SimilarityOracle;

use super::answer_generator::AnswerGenerator;
use super::cooperativeness::CooperativenessSchedule;
use super::user_state::UserSimulatorState;

/// Separator between topic query and facet description when the user
/// compares its intent against a question.
pub const INTENT_SEPARATOR: &str = " . ";

/// One reply from the simulated user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserFeedback {
    /// `None` when the user has run out of patience.
    pub answer: Option<String>,
    /// Similarity between the user's intent and the question.
    pub similarity: f64,
}

/// Simulated user driven by a similarity oracle and an answer generator.
pub struct UserSimulator {
    oracle: Arc<dyn SimilarityOracle>,
    answers: Arc<dyn AnswerGenerator>,
    patience: usize,
    schedule: CooperativenessSchedule,
}

impl UserSimulator {
    pub fn new(
        oracle: Arc<dyn SimilarityOracle>,
        answers: Arc<dyn AnswerGenerator>,
        patience: usize,
        schedule: CooperativenessSchedule,
    ) -> Self {
        Self {
            oracle,
            answers,
            patience,
            schedule,
        }
    }

    pub fn patience(&self) -> usize {
        self.patience
    }

    /// Fresh state for a user whose real intent is `target`.
    pub fn build_state(
        &self,
        topic: Arc<Topic>,
        target: Arc<Facet>,
    ) -> Result<UserSimulatorState, ClarifyError> {
        UserSimulatorState::new(topic, target, self.patience, self.schedule.base())
    }

    /// Answers `question`, recording both in the state.
    ///
    /// Nothing is recorded when the oracle or the answer generator fails.
    pub async fn feedback(
        &self,
        state: &mut UserSimulatorState,
        question: &str,
    ) -> Result<UserFeedback, ClarifyError> {
        state.ensure_answered()?;

        if state.ran_out_of_patience() {
            tracing::debug!(turns = state.turns(), "User out of patience, not answering");
            state.add_question(question)?;
            state.add_answer(None)?;
            return Ok(UserFeedback {
                answer: None,
                similarity: 0.0,
            });
        }

        let cooperativeness = self.schedule.at(state.turns());
        let intent = format!(
            "{}{}{}",
            state.topic().query(),
            INTENT_SEPARATOR,
            state.target().description()
        );
        let similarity = self.oracle.similarity(&intent, question).await?;
        let answer = self.answers.generate_answer(
            state.topic(),
            state.target(),
            cooperativeness,
            similarity,
        )?;

        state.set_cooperativeness(cooperativeness)?;
        state.begin_turn();
        state.add_question(question)?;
        state.add_answer(Some(answer.clone()))?;
        Ok(UserFeedback {
            answer: Some(answer),
            similarity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::language::KeywordStanceDetector;
    use crate::adapters::similarity::MockSimilarityOracle;
    use crate::domain::clarify::QuestionAnswer;
    use crate::domain::foundation::{FacetId, RandomSource, TopicId};
    use crate::domain::simulation::{CooperativenessCurve, QaAnswerGenerator};

    fn topic() -> Arc<Topic> {
        Arc::new(Topic::new(
            TopicId::new("t").unwrap(),
            "apple",
            vec![Facet::new(
                FacetId::new("f1").unwrap(),
                "apple fruit",
                vec![QuestionAnswer::new("edible fruit?", "yes, it's a fruit")],
            )],
        ))
    }

    fn simulator(oracle: MockSimilarityOracle, patience: usize, schedule: CooperativenessSchedule) -> UserSimulator {
        let answers = QaAnswerGenerator::new(
            Arc::new(KeywordStanceDetector::default()),
            0.5,
            RandomSource::seeded(4),
        );
        UserSimulator::new(Arc::new(oracle), Arc::new(answers), patience, schedule)
    }

    #[tokio::test]
    async fn compares_intent_with_question() {
        let oracle = MockSimilarityOracle::new().with_default(0.9);
        let sim = simulator(oracle.clone(), 3, CooperativenessSchedule::constant(1.0).unwrap());
        let topic = topic();
        let mut state = sim.build_state(topic.clone(), topic.facets()[0].clone()).unwrap();

        let feedback = sim.feedback(&mut state, "ARE YOU LOOKING TO apple fruit?").await.unwrap();

        assert_eq!(feedback.similarity, 0.9);
        assert_eq!(feedback.answer.as_deref(), Some("yes, it's a fruit"));
        assert_eq!(
            oracle.calls(),
            vec![(
                "apple . apple fruit".to_string(),
                "ARE YOU LOOKING TO apple fruit?".to_string()
            )]
        );
        assert_eq!(state.turns(), 1);
        assert_eq!(state.questions().len(), state.answers().len());
    }

    #[tokio::test]
    async fn exhausted_user_answers_nothing_without_consulting_oracle() {
        let oracle = MockSimilarityOracle::new().with_default(0.9);
        let sim = simulator(oracle.clone(), 0, CooperativenessSchedule::constant(1.0).unwrap());
        let topic = topic();
        let mut state = sim.build_state(topic.clone(), topic.facets()[0].clone()).unwrap();

        let feedback = sim.feedback(&mut state, "anything?").await.unwrap();

        assert_eq!(feedback.answer, None);
        assert_eq!(feedback.similarity, 0.0);
        assert_eq!(oracle.call_count(), 0);
        assert_eq!(state.questions(), &["anything?".to_string()]);
        assert_eq!(state.answers(), &[None]);
        assert_eq!(state.turns(), 0);
    }

    #[tokio::test]
    async fn cooperativeness_follows_schedule_per_turn() {
        let oracle = MockSimilarityOracle::new().with_default(0.1);
        let schedule = CooperativenessSchedule::new(CooperativenessCurve::Decreasing, 0.8).unwrap();
        let sim = simulator(oracle, 5, schedule);
        let topic = topic();
        let mut state = sim.build_state(topic.clone(), topic.facets()[0].clone()).unwrap();

        sim.feedback(&mut state, "q1").await.unwrap();
        assert_eq!(state.cooperativeness(), 0.8);
        sim.feedback(&mut state, "q2").await.unwrap();
        assert!((state.cooperativeness() - 0.8 / 3f64.log2()).abs() < 1e-12);
    }

    #[tokio::test]
    async fn oracle_failure_is_surfaced() {
        let oracle = MockSimilarityOracle::new()
            .with_error(crate::ports::SimilarityError::unavailable("offline"));
        let sim = simulator(oracle, 3, CooperativenessSchedule::constant(1.0).unwrap());
        let topic = topic();
        let mut state = sim.build_state(topic.clone(), topic.facets()[0].clone()).unwrap();

        let result = sim.feedback(&mut state, "q").await;
        assert!(matches!(result, Err(ClarifyError::Similarity(_))));
    }

    #[tokio::test]
    async fn failed_turn_leaves_history_untouched() {
        let oracle = MockSimilarityOracle::new()
            .with_default(0.9)
            .with_error(crate::ports::SimilarityError::unavailable("offline"));
        let sim = simulator(oracle, 3, CooperativenessSchedule::constant(1.0).unwrap());
        let topic = topic();
        let mut state = sim.build_state(topic.clone(), topic.facets()[0].clone()).unwrap();

        assert!(sim.feedback(&mut state, "q").await.is_err());
        assert!(state.questions().is_empty());
        assert!(state.answers().is_empty());
        assert_eq!(state.turns(), 0);

        // The same question can be asked again once the oracle recovers.
        let feedback = sim.feedback(&mut state, "q").await.unwrap();
        assert_eq!(feedback.answer.as_deref(), Some("yes, it's a fruit"));
        assert_eq!(state.questions(), &["q".to_string()]);
        assert_eq!(state.turns(), 1);
    }
}
