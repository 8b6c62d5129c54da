use async_trait::async_trait;

use crate::domain::clarify::{Facet, Topic};
use crate::ports::{EvaluationError, MetricMap, RetrievalEvaluator};

/// Evaluator used when no relevance judgments are configured; reports no metrics.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledEvaluator;

#[async_trait]
impl RetrievalEvaluator for DisabledEvaluator {
    async fn calculate_metrics(
        &self,
        _topic: &Topic,
        _facet: &Facet,
        _resolved_query: &str,
    ) -> Result<MetricMap, EvaluationError> {
        Ok(MetricMap::new())
    }
}
