//! Similarity oracle adapters.
//!
//! ## Available Adapters
//!
//! - `LexicalSimilarityOracle` - Bag-of-words cosine
//! - `RandomSimilarityOracle` - Uniform random baseline
//! - `CachingSimilarityOracle` - Memoizing decorator
//! - `MockSimilarityOracle` - Rule-driven mock for tests

mod cached;
mod lexical;
mod mock;
mod random;

pub use cached::{CacheStats, CachingSimilarityOracle};
pub use lexical::LexicalSimilarityOracle;
pub use mock::MockSimilarityOracle;
pub use random::RandomSimilarityOracle;
