//! Answer generation from ground-truth question/answer pairs.

use std::sync::Arc;

use crate::domain::clarify::{ClarifyError, Facet, Topic};
use crate::domain::foundation::{ensure_unit_interval, RandomSource};
use crate::ports::{Stance, StanceDetector};

/// Default affirmative answer when a facet has no recorded "yes" answers.
pub const DEFAULT_YES_ANSWER: &str = "yes";

/// Default negative answer when the user does not elaborate.
pub const DEFAULT_NO_ANSWER: &str = "no";

/// Produces the simulated user's free-text answer.
pub trait AnswerGenerator: Send + Sync {
    /// Answers a question about the user's `facet`, given how cooperative the
    /// user currently is and how well the question matched the intent.
    fn generate_answer(
        &self,
        topic: &Topic,
        facet: &Facet,
        cooperativeness: f64,
        similarity: f64,
    ) -> Result<String, ClarifyError>;
}

/// Facet answers split by stance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerBuckets {
    pub yes: Vec<String>,
    pub no: Vec<String>,
}

/// Samples answers real users gave for the facet.
///
/// - `similarity >= perfect_match_threshold`: the user believes the agent got
///   it right and answers from the "yes" bucket.
/// - otherwise, with probability `cooperativeness`, an elaborating answer from
///   the "no" bucket; else a bare refusal.
pub struct QaAnswerGenerator {
    stance: Arc<dyn StanceDetector>,
    perfect_match_threshold: f64,
    yes_answer: String,
    no_answer: String,
    random: RandomSource,
}

impl QaAnswerGenerator {
    pub fn new(
        stance: Arc<dyn StanceDetector>,
        perfect_match_threshold: f64,
        random: RandomSource,
    ) -> Self {
        Self {
            stance,
            perfect_match_threshold,
            yes_answer: DEFAULT_YES_ANSWER.to_string(),
            no_answer: DEFAULT_NO_ANSWER.to_string(),
            random,
        }
    }

    /// Overrides the fallback answers.
    pub fn with_default_answers(
        mut self,
        yes_answer: impl Into<String>,
        no_answer: impl Into<String>,
    ) -> Self {
        self.yes_answer = yes_answer.into();
        self.no_answer = no_answer.into();
        self
    }

    pub fn perfect_match_threshold(&self) -> f64 {
        self.perfect_match_threshold
    }

    /// Splits the facet's answers by stance; undecidable answers are dropped.
    pub fn buckets(&self, facet: &Facet) -> AnswerBuckets {
        let mut buckets = AnswerBuckets::default();
        for qa in facet.questions_answers() {
            match self.stance.stance(Some(&qa.answer)) {
                Stance::Yes => buckets.yes.push(qa.answer.clone()),
                Stance::No => buckets.no.push(qa.answer.clone()),
                Stance::Other => {}
            }
        }
        buckets
    }
}

impl AnswerGenerator for QaAnswerGenerator {
    fn generate_answer(
        &self,
        _topic: &Topic,
        facet: &Facet,
        cooperativeness: f64,
        similarity: f64,
    ) -> Result<String, ClarifyError> {
        let cooperativeness = ensure_unit_interval("cooperativeness", cooperativeness)?;
        let buckets = self.buckets(facet);

        if similarity >= self.perfect_match_threshold {
            return Ok(self
                .random
                .choose(&buckets.yes)
                .cloned()
                .unwrap_or_else(|| self.yes_answer.clone()));
        }

        if self.random.next_unit() < cooperativeness {
            if let Some(answer) = self.random.choose(&buckets.no) {
                return Ok(answer.clone());
            }
        }
        Ok(self.no_answer.clone())
    }
}
