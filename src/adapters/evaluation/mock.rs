//! Mock retrieval evaluator for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::domain::clarify::{Facet, Topic};
use crate::ports::{EvaluationError, MetricMap, RetrievalEvaluator};

/// Returns fixed metrics and records every resolved query.
#[derive(Debug, Clone, Default)]
pub struct MockRetrievalEvaluator {
    metrics: MetricMap,
    resolved_queries: Arc<Mutex<Vec<String>>>,
    fail_with: Option<String>,
}

impl MockRetrievalEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_metric(mut self, name: impl Into<String>, value: f64) -> Self {
        self.metrics.insert(name.into(), value);
        self
    }

    /// Fails every call with a search error.
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.fail_with = Some(message.into());
        self
    }

    pub fn resolved_queries(&self) -> Vec<String> {
        self.resolved_queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl RetrievalEvaluator for MockRetrievalEvaluator {
    async fn calculate_metrics(
        &self,
        _topic: &Topic,
        _facet: &Facet,
        resolved_query: &str,
    ) -> Result<MetricMap, EvaluationError> {
        self.resolved_queries
            .lock()
            .unwrap()
            .push(resolved_query.to_string());
        match &self.fail_with {
            Some(message) => Err(EvaluationError::Search(message.clone())),
            None => Ok(self.metrics.clone()),
        }
    }
}
