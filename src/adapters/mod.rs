//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the clarification domain to concrete capabilities:
//! - `dataset` - Qulac-style topic/facet datasets
//! - `facets` - Facet providers (dataset, enhanced representations, query suggestions)
//! - `similarity` - Similarity oracles (lexical, random, cached, mock)
//! - `language` - Stance detection, informative extraction, question templates
//! - `evaluation` - Retrieval evaluation against relevance judgments
//! - `rate_limiter` - Cooldown gate for remote APIs

pub mod dataset;
pub mod evaluation;
pub mod facets;
pub mod language;
pub mod rate_limiter;
pub mod similarity;

pub use dataset::{DatasetError, QulacDataset};
pub use evaluation::{CorpusSearcher, NullSearcher, QrelsEvaluator};
pub use facets::{DatasetFacetProvider, EnhancedRepFacetProvider, SuggestionFacetProvider};
pub use language::{KeywordStanceDetector, PrefixStrippingExtractor, TemplateQuestionGenerator};
pub use rate_limiter::CooldownGate;
pub use similarity::{CachingSimilarityOracle, LexicalSimilarityOracle, RandomSimilarityOracle};
