//! Bag-of-words cosine similarity.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::adapters::language::text::tokens;
use crate::ports::{SimilarityError, SimilarityOracle};

/// Cosine similarity of term-frequency vectors over lowercase,
/// punctuation-free tokens. Texts without tokens score 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalSimilarityOracle;

impl LexicalSimilarityOracle {
    pub fn new() -> Self {
        Self
    }

    fn term_frequencies(text: &str) -> HashMap<String, f64> {
        let mut counts = HashMap::new();
        for token in tokens(text) {
            *counts.entry(token).or_insert(0.0) += 1.0;
        }
        counts
    }

    /// Synchronous scoring, shared with other adapters.
    pub fn score(text_a: &str, text_b: &str) -> f64 {
        let a = Self::term_frequencies(text_a);
        let b = Self::term_frequencies(text_b);
        let norm_a = a.values().map(|v| v * v).sum::<f64>().sqrt();
        let norm_b = b.values().map(|v| v * v).sum::<f64>().sqrt();
        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }
        let dot: f64 = a
            .iter()
            .filter_map(|(term, wa)| b.get(term).map(|wb| wa * wb))
            .sum();
        (dot / (norm_a * norm_b)).clamp(0.0, 1.0)
    }
}

#[async_trait]
impl SimilarityOracle for LexicalSimilarityOracle {
    async fn similarity(&self, text_a: &str, text_b: &str) -> Result<f64, SimilarityError> {
        Ok(Self::score(text_a, text_b))
    }

    fn name(&self) -> &str {
        "lexical"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn identical_texts_score_one() {
        let oracle = LexicalSimilarityOracle::new();
        let score = oracle.similarity("Apple fruit", "apple, FRUIT!").await.unwrap();
        assert!((score - 1.0).abs() < 1e-12);
    }

    #[tokio::test]
    async fn disjoint_texts_score_zero() {
        let oracle = LexicalSimilarityOracle::new();
        assert_eq!(oracle.similarity("apple fruit", "jaguar car").await.unwrap(), 0.0);
        assert_eq!(oracle.similarity("", "jaguar car").await.unwrap(), 0.0);
    }

    #[test]
    fn partial_overlap_is_cosine_of_counts() {
        // [apple:1, fruit:1] vs [apple:1, company:1]
        assert!((LexicalSimilarityOracle::score("apple fruit", "apple company") - 0.5).abs() < 1e-12);
    }
}
