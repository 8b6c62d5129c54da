//! Mock similarity oracle for testing.
//!
//! # Features
//!
//! - Substring rules matched against both texts
//! - Default score for unmatched pairs
//! - Error injection (next call, or calls mentioning a text)
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let oracle = MockSimilarityOracle::new()
//!     .with_rule("apple inc", "company", 0.9)
//!     .with_default(0.1);
//!
//! assert_eq!(oracle.similarity("apple inc", "the company").await?, 0.9);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::ports::{SimilarityError, SimilarityOracle};

#[derive(Debug, Clone)]
struct Rule {
    a_contains: String,
    b_contains: String,
    score: f64,
}

/// Mock similarity oracle.
///
/// Clones share call history and queued errors.
#[derive(Debug, Clone)]
pub struct MockSimilarityOracle {
    rules: Vec<Rule>,
    default_score: f64,
    queued_errors: Arc<Mutex<VecDeque<SimilarityError>>>,
    failing_texts: Vec<(String, SimilarityError)>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl Default for MockSimilarityOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSimilarityOracle {
    /// Creates an oracle that scores every pair 0.0.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            default_score: 0.0,
            queued_errors: Arc::new(Mutex::new(VecDeque::new())),
            failing_texts: Vec::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Score for pairs no rule matches.
    pub fn with_default(mut self, score: f64) -> Self {
        self.default_score = score;
        self
    }

    /// Scores `(a, b)` as `score` when `a` contains `a_contains` and `b`
    /// contains `b_contains`. Rules are tried in insertion order.
    pub fn with_rule(
        mut self,
        a_contains: impl Into<String>,
        b_contains: impl Into<String>,
        score: f64,
    ) -> Self {
        self.rules.push(Rule {
            a_contains: a_contains.into(),
            b_contains: b_contains.into(),
            score,
        });
        self
    }

    /// Fails the next call with `error`.
    pub fn with_error(self, error: SimilarityError) -> Self {
        self.queued_errors.lock().unwrap().push_back(error);
        self
    }

    /// Fails every call where either text contains `text`.
    pub fn with_error_when(mut self, text: impl Into<String>, error: SimilarityError) -> Self {
        self.failing_texts.push((text.into(), error));
        self
    }

    /// Number of calls made.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// All `(a, b)` pairs scored, in call order.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }

    fn score(&self, a: &str, b: &str) -> f64 {
        self.rules
            .iter()
            .find(|rule| a.contains(&rule.a_contains) && b.contains(&rule.b_contains))
            .map(|rule| rule.score)
            .unwrap_or(self.default_score)
    }
}

#[async_trait]
impl SimilarityOracle for MockSimilarityOracle {
    async fn similarity(&self, text_a: &str, text_b: &str) -> Result<f64, SimilarityError> {
        self.calls
            .lock()
            .unwrap()
            .push((text_a.to_string(), text_b.to_string()));

        if let Some(error) = self.queued_errors.lock().unwrap().pop_front() {
            return Err(error);
        }
        if let Some((_, error)) = self
            .failing_texts
            .iter()
            .find(|(text, _)| text_a.contains(text.as_str()) || text_b.contains(text.as_str()))
        {
            return Err(error.clone());
        }
        Ok(self.score(text_a, text_b))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn first_matching_rule_wins() {
        let oracle = MockSimilarityOracle::new()
            .with_rule("apple", "fruit", 0.8)
            .with_rule("apple", "", 0.3)
            .with_default(0.1);

        assert_eq!(oracle.similarity("apple pie", "a fruit").await.unwrap(), 0.8);
        assert_eq!(oracle.similarity("apple pie", "company").await.unwrap(), 0.3);
        assert_eq!(oracle.similarity("jaguar", "car").await.unwrap(), 0.1);
    }

    #[tokio::test]
    async fn queued_error_is_consumed_once() {
        let oracle = MockSimilarityOracle::new().with_error(SimilarityError::unavailable("down"));

        assert!(oracle.similarity("a", "b").await.is_err());
        assert!(oracle.similarity("a", "b").await.is_ok());
        assert_eq!(oracle.call_count(), 2);
    }

    #[tokio::test]
    async fn clones_share_call_history() {
        let oracle = MockSimilarityOracle::new();
        let clone = oracle.clone();
        clone.similarity("x", "y").await.unwrap();
        assert_eq!(oracle.calls(), vec![("x".to_string(), "y".to_string())]);
    }
}
