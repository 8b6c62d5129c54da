//! Relevance-judgment based retrieval evaluation.
//!
//! Judgments come from a TREC qrels file, one `qid iter docid relevance` line
//! per judgment, where `qid` is `"{topic_id}-{facet_id}"`. The resolved query
//! is run through a `DocumentSearcher` and the ranking is scored with
//! trec_eval conventions:
//!
//! - `p@k`: relevant documents in the top `k`, divided by `k`
//! - `ndcg@k`: linear gains, `log2(rank + 1)` discount, ideal ranking from the judgments
//! - `mrr`: reciprocal rank of the first relevant document within the top 1000
//!
//! Ties in search score are broken by document id, descending.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::fs;

use crate::domain::clarify::{Facet, Topic};
use crate::ports::{DocumentSearcher, EvaluationError, MetricMap, RetrievalEvaluator, SearchHit};

/// Cutoffs reported for precision and nDCG.
pub const METRIC_DEPTHS: [usize; 4] = [1, 5, 10, 20];

/// Ranking depth for reciprocal rank.
pub const MRR_DEPTH: usize = 1000;

/// Judgments per query id, then per document id.
pub type Qrels = HashMap<String, HashMap<String, i64>>;

/// Evaluates resolved queries against qrels.
pub struct QrelsEvaluator {
    searcher: Arc<dyn DocumentSearcher>,
    qrels: Qrels,
}

impl QrelsEvaluator {
    pub fn new(searcher: Arc<dyn DocumentSearcher>, qrels: Qrels) -> Self {
        Self { searcher, qrels }
    }

    /// Reads judgments from a qrels file.
    pub async fn load(
        searcher: Arc<dyn DocumentSearcher>,
        path: impl AsRef<Path>,
    ) -> Result<Self, EvaluationError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .await
            .map_err(|e| EvaluationError::Io(format!("{}: {}", path.display(), e)))?;
        let qrels = parse_qrels(&raw)?;
        tracing::info!(path = %path.display(), queries = qrels.len(), "Loaded relevance judgments");
        Ok(Self::new(searcher, qrels))
    }

    pub fn query_id(topic: &Topic, facet: &Facet) -> String {
        format!("{}-{}", topic.id(), facet.id())
    }
}

/// Parses qrels text; blank lines are skipped.
pub fn parse_qrels(raw: &str) -> Result<Qrels, EvaluationError> {
    let mut qrels: Qrels = HashMap::new();
    for (index, line) in raw.lines().enumerate() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        if fields.len() != 4 {
            return Err(EvaluationError::parse(
                index + 1,
                format!("expected 4 fields, found {}", fields.len()),
            ));
        }
        let relevance: i64 = fields[3].parse().map_err(|_| {
            EvaluationError::parse(index + 1, format!("relevance '{}' is not an integer", fields[3]))
        })?;
        qrels
            .entry(fields[0].to_string())
            .or_default()
            .insert(fields[2].to_string(), relevance);
    }
    Ok(qrels)
}

/// Scores a ranking against the judgments of one query.
pub fn score_ranking(hits: &[SearchHit], judgments: &HashMap<String, i64>) -> MetricMap {
    let mut ranked: Vec<&SearchHit> = hits.iter().collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| b.doc_id.cmp(&a.doc_id)));

    let gains: Vec<f64> = ranked
        .iter()
        .map(|hit| judgments.get(&hit.doc_id).copied().unwrap_or(0).max(0) as f64)
        .collect();

    let mut ideal: Vec<f64> = judgments.values().map(|&rel| rel.max(0) as f64).collect();
    ideal.sort_by(|a, b| b.total_cmp(a));

    let mut metrics = MetricMap::new();
    for depth in METRIC_DEPTHS {
        let relevant = gains.iter().take(depth).filter(|&&gain| gain > 0.0).count();
        metrics.insert(format!("p@{}", depth), relevant as f64 / depth as f64);

        let actual = dcg_at(&gains, depth);
        let best = dcg_at(&ideal, depth);
        let ndcg = if best > 0.0 { actual / best } else { 0.0 };
        metrics.insert(format!("ndcg@{}", depth), ndcg);
    }

    let reciprocal_rank = gains
        .iter()
        .take(MRR_DEPTH)
        .position(|&gain| gain > 0.0)
        .map_or(0.0, |index| 1.0 / (index + 1) as f64);
    metrics.insert("mrr".to_string(), reciprocal_rank);

    metrics
}

fn dcg_at(gains: &[f64], depth: usize) -> f64 {
    gains
        .iter()
        .take(depth)
        .enumerate()
        .map(|(index, gain)| gain / ((index + 2) as f64).log2())
        .sum()
}

#[async_trait]
impl RetrievalEvaluator for QrelsEvaluator {
    async fn calculate_metrics(
        &self,
        topic: &Topic,
        facet: &Facet,
        resolved_query: &str,
    ) -> Result<MetricMap, EvaluationError> {
        let hits = self.searcher.search(topic, resolved_query).await?;
        let qid = Self::query_id(topic, facet);
        let empty = HashMap::new();
        let judgments = self.qrels.get(&qid).unwrap_or(&empty);
        if judgments.is_empty() {
            tracing::debug!(qid, "No relevance judgments for query");
        }
        Ok(score_ranking(&hits, judgments))
    }
}
