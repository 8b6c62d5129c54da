//! Template-based clarifying questions.

use crate::domain::clarify::{Facet, Topic};
use crate::ports::QuestionGenerator;

/// Asks "ARE YOU LOOKING TO {facet description}?".
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateQuestionGenerator;

impl QuestionGenerator for TemplateQuestionGenerator {
    fn generate_question(&self, _topic: &Topic, facet: &Facet) -> String {
        let subject = facet.description().trim_end_matches(&['.', '?'][..]);
        format!("ARE YOU LOOKING TO {}?", subject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{FacetId, TopicId};

    fn ask(desc: &str) -> String {
        let topic = Topic::new(TopicId::new("t").unwrap(), "q", vec![]);
        let facet = Facet::new(FacetId::new("f").unwrap(), desc, vec![]);
        TemplateQuestionGenerator.generate_question(&topic, &facet)
    }

    #[test]
    fn trailing_punctuation_is_replaced() {
        assert_eq!(
            ask("find the homepage of the hotel chain.?"),
            "ARE YOU LOOKING TO find the homepage of the hotel chain?"
        );
        assert_eq!(ask("apple fruit"), "ARE YOU LOOKING TO apple fruit?");
    }
}
