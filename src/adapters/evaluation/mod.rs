//! Retrieval evaluation adapters.
//!
//! - `QrelsEvaluator` - trec_eval-style metrics from relevance judgments
//! - `NullSearcher`, `CorpusSearcher` - document searchers to evaluate
//! - `DisabledEvaluator` - no judgments configured
//! - `MockRetrievalEvaluator` - fixed metrics for tests

mod disabled;
mod mock;
mod qrels;
mod searchers;

pub use disabled::DisabledEvaluator;
pub use mock::MockRetrievalEvaluator;
pub use qrels::{parse_qrels, score_ranking, Qrels, QrelsEvaluator, METRIC_DEPTHS, MRR_DEPTH};
pub use searchers::{CorpusSearcher, NullSearcher};
