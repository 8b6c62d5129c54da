//! Facet provider adapters.
//!
//! ## Available Adapters
//!
//! - `DatasetFacetProvider` - The topic's own facets
//! - `EnhancedRepFacetProvider` - Decorator attaching enhanced representations
//! - `SuggestionFacetProvider` - Breadth-first autosuggest expansion
//! - `MockFacetProvider` - Canned candidates for tests
//!
//! The suggestion provider talks to a `SuggestionSource`; `BingSuggestClient`
//! is the HTTP implementation.

mod bing;
mod dataset;
mod enhanced;
mod mock;
mod suggestion;
mod suggestion_cache;

pub use bing::{BingSuggestClient, BingSuggestConfig, SuggestionSource, SUBSCRIPTION_KEY_HEADER};
pub use dataset::DatasetFacetProvider;
pub use enhanced::EnhancedRepFacetProvider;
pub use mock::MockFacetProvider;
pub use suggestion::SuggestionFacetProvider;
pub use suggestion_cache::SuggestionCache;
