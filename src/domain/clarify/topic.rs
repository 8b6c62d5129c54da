//! Topics, facets and scored candidates.

use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;

use crate::domain::foundation::{FacetId, TopicId};

/// Maximum number of whitespace tokens kept from an enhanced representation.
pub const ENHANCED_REP_MAX_TOKENS: usize = 512;

/// A ground-truth clarifying question and the answer a real user gave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionAnswer {
    pub question: String,
    pub answer: String,
}

impl QuestionAnswer {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// One candidate interpretation of a topic.
///
/// Facets are immutable once built and shared through `Arc` between the
/// topic, the dialogue state and the ranker. The enhanced representation is
/// attached with [`Facet::with_enhanced_rep`] before any ranking happens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facet {
    id: FacetId,
    description: String,
    questions_answers: Vec<QuestionAnswer>,
    #[serde(default, deserialize_with = "deserialize_enhanced_rep")]
    enhanced_rep: String,
}

impl Facet {
    /// Creates a facet without an enhanced representation.
    pub fn new(
        id: FacetId,
        description: impl Into<String>,
        questions_answers: Vec<QuestionAnswer>,
    ) -> Self {
        Self {
            id,
            description: description.into(),
            questions_answers,
            enhanced_rep: String::new(),
        }
    }

    /// Returns a copy carrying the normalized enhanced representation.
    pub fn with_enhanced_rep(mut self, raw: &str) -> Self {
        self.enhanced_rep = normalize_enhanced_rep(raw);
        self
    }

    pub fn id(&self) -> &FacetId {
        &self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn questions_answers(&self) -> &[QuestionAnswer] {
        &self.questions_answers
    }

    /// Normalized enhanced representation (empty when none was attached).
    pub fn enhanced_rep(&self) -> &str {
        &self.enhanced_rep
    }

    /// Description followed by the enhanced representation, newline-separated.
    ///
    /// This is the text the similarity ranker compares against evidence.
    pub fn full_representation(&self) -> String {
        format!("{}\n{}", self.description, self.enhanced_rep)
    }
}

/// Replaces ellipses with sentence breaks and keeps the first
/// [`ENHANCED_REP_MAX_TOKENS`] space-separated tokens.
pub fn normalize_enhanced_rep(raw: &str) -> String {
    raw.replace("...", ". ")
        .split(' ')
        .take(ENHANCED_REP_MAX_TOKENS)
        .collect::<Vec<_>>()
        .join(" ")
}

fn deserialize_enhanced_rep<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(|raw| normalize_enhanced_rep(&raw))
}

/// An ambiguous search query and its possible interpretations.
#[derive(Debug, Clone, PartialEq)]
pub struct Topic {
    id: TopicId,
    query: String,
    facets: Vec<Arc<Facet>>,
}

impl Topic {
    pub fn new(id: TopicId, query: impl Into<String>, facets: Vec<Facet>) -> Self {
        Self {
            id,
            query: query.into(),
            facets: facets.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn id(&self) -> &TopicId {
        &self.id
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn facets(&self) -> &[Arc<Facet>] {
        &self.facets
    }

    /// Looks up a facet of this topic by identifier.
    pub fn facet(&self, id: &FacetId) -> Option<&Arc<Facet>> {
        self.facets.iter().find(|facet| facet.id() == id)
    }

    pub fn contains_facet(&self, id: &FacetId) -> bool {
        self.facet(id).is_some()
    }
}

/// A facet paired with its current ranking score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredFacet {
    pub facet: Arc<Facet>,
    pub score: f64,
}

impl ScoredFacet {
    pub fn new(facet: Arc<Facet>, score: f64) -> Self {
        Self { facet, score }
    }

    pub fn id(&self) -> &FacetId {
        self.facet.id()
    }
}

/// Serializable view of a scored facet used in traces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateSnapshot {
    pub facet_id: FacetId,
    pub score: f64,
}

impl From<&ScoredFacet> for CandidateSnapshot {
    fn from(scored: &ScoredFacet) -> Self {
        Self {
            facet_id: scored.id().clone(),
            score: scored.score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facet(id: &str, desc: &str) -> Facet {
        Facet::new(FacetId::new(id).unwrap(), desc, vec![])
    }

    mod enhanced_rep {
        use super::*;

        #[test]
        fn truncates_to_token_cap() {
            let raw = (0..600).map(|i| format!("w{}", i)).collect::<Vec<_>>().join(" ");
            let rep = normalize_enhanced_rep(&raw);
            assert_eq!(rep.split(' ').count(), ENHANCED_REP_MAX_TOKENS);
            assert!(rep.ends_with("w511"));
        }

        #[test]
        fn short_text_is_kept() {
            assert_eq!(normalize_enhanced_rep("a short text"), "a short text");
        }

        #[test]
        fn ellipses_become_sentence_breaks() {
            assert_eq!(normalize_enhanced_rep("wait...what"), "wait. what");
        }

        #[test]
        fn facet_stores_normalized_rep() {
            let raw = vec!["x"; 1000].join(" ");
            let f = facet("1", "apple fruit").with_enhanced_rep(&raw);
            assert_eq!(f.enhanced_rep().split(' ').count(), ENHANCED_REP_MAX_TOKENS);
        }

        #[test]
        fn deserialized_facet_is_normalized() {
            let raw = (0..600).map(|i| format!("w{}", i)).collect::<Vec<_>>().join(" ");
            let json = serde_json::json!({
                "id": "F1",
                "description": "apple fruit",
                "questions_answers": [],
                "enhanced_rep": format!("red...{}", raw),
            });

            let facet: Facet = serde_json::from_value(json).unwrap();

            assert!(facet.enhanced_rep().starts_with("red. w0"));
            assert_eq!(facet.enhanced_rep().split(' ').count(), ENHANCED_REP_MAX_TOKENS);
        }

        #[test]
        fn missing_rep_deserializes_empty() {
            let json = r#"{"id": "F1", "description": "apple fruit", "questions_answers": []}"#;
            let facet: Facet = serde_json::from_str(json).unwrap();
            assert_eq!(facet.enhanced_rep(), "");
        }

        #[test]
        fn full_representation_joins_with_newline() {
            let f = facet("1", "apple fruit").with_enhanced_rep("red and sweet");
            assert_eq!(f.full_representation(), "apple fruit\nred and sweet");
        }
    }

    mod topic {
        use super::*;

        #[test]
        fn finds_facets_by_id() {
            let topic = Topic::new(
                TopicId::new("t1").unwrap(),
                "apple",
                vec![facet("1", "apple fruit"), facet("2", "apple inc")],
            );
            let id = FacetId::new("2").unwrap();
            assert_eq!(topic.facet(&id).unwrap().description(), "apple inc");
            assert!(!topic.contains_facet(&FacetId::new("3").unwrap()));
        }
    }
}
