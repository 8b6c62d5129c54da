//! Retrieval Evaluator Port - scores the query a dialogue resolved to.
//!
//! After a dialogue ends, its resolved query (the confirmed facet's
//! description, or the original topic query on failure) is run through a
//! document retriever and judged against relevance judgments for the target
//! facet. Implementations report at least `p@{1,5,10,20}`, `ndcg@{1,5,10,20}`
//! and `mrr`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::clarify::{Facet, Topic};

/// Metric name to value.
pub type MetricMap = BTreeMap<String, f64>;

/// Port for computing ranking-quality metrics of a resolved query.
#[async_trait]
pub trait RetrievalEvaluator: Send + Sync {
    async fn calculate_metrics(
        &self,
        topic: &Topic,
        facet: &Facet,
        resolved_query: &str,
    ) -> Result<MetricMap, EvaluationError>;
}

/// A single retrieved document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub doc_id: String,
    pub score: f64,
}

impl SearchHit {
    pub fn new(doc_id: impl Into<String>, score: f64) -> Self {
        Self {
            doc_id: doc_id.into(),
            score,
        }
    }
}

/// Port for the document retriever the evaluator judges.
#[async_trait]
pub trait DocumentSearcher: Send + Sync {
    /// Ranked documents for `query` in the context of `topic`.
    async fn search(&self, topic: &Topic, query: &str) -> Result<Vec<SearchHit>, EvaluationError>;
}

/// Retrieval evaluation errors.
#[derive(Debug, thiserror::Error)]
pub enum EvaluationError {
    /// Search backend failed.
    #[error("search failed: {0}")]
    Search(String),

    /// Relevance judgments or corpus could not be read.
    #[error("IO error: {0}")]
    Io(String),

    /// Relevance judgments or corpus are malformed.
    #[error("parse error at line {line}: {reason}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What was wrong.
        reason: String,
    },
}

impl EvaluationError {
    /// Creates a parse error.
    pub fn parse(line: usize, reason: impl Into<String>) -> Self {
        Self::Parse {
            line,
            reason: reason.into(),
        }
    }
}
