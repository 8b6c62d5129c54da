//! Ports - Interfaces for external collaborators.
//!
//! Following hexagonal architecture, ports define the contracts between the
//! clarification domain and the capabilities it consumes. Adapters implement
//! these ports.
//!
//! ## Language Ports
//!
//! - `SimilarityOracle` - Text-pair similarity in [0, 1]
//! - `StanceDetector` - yes / no / other classification of answers
//! - `InformativeExtractor` - Positive evidence hidden in "no" answers
//! - `QuestionGenerator` - Clarifying question for a guessed facet
//!
//! ## Retrieval Ports
//!
//! - `FacetProvider` - Initial candidate facets for a topic
//! - `RetrievalEvaluator` - Ranking metrics for a resolved query
//! - `DocumentSearcher` - Document retriever judged by the evaluator

mod facet_provider;
mod informative_extractor;
mod question_generator;
mod retrieval_evaluator;
mod similarity_oracle;
mod stance_detector;

pub use facet_provider::{FacetProvider, FacetProviderError};
pub use informative_extractor::InformativeExtractor;
pub use question_generator::QuestionGenerator;
pub use retrieval_evaluator::{
    DocumentSearcher, EvaluationError, MetricMap, RetrievalEvaluator, SearchHit,
};
pub use similarity_oracle::{SimilarityError, SimilarityOracle};
pub use stance_detector::{Stance, StanceDetector};
