//! Question Generator Port - turns a guessed facet into a clarifying question.

use crate::domain::clarify::{Facet, Topic};

/// Port for generating the clarifying question asked about a facet.
pub trait QuestionGenerator: Send + Sync {
    fn generate_question(&self, topic: &Topic, facet: &Facet) -> String;
}
