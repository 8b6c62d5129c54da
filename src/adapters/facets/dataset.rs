//! Facets straight from the dataset.

use async_trait::async_trait;

use crate::domain::clarify::{ScoredFacet, Topic};
use crate::ports::{FacetProvider, FacetProviderError};

/// Offers a topic's own facets, in dataset order, with a prior of 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct DatasetFacetProvider;

impl DatasetFacetProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FacetProvider for DatasetFacetProvider {
    async fn facets_for_topic(&self, topic: &Topic) -> Result<Vec<ScoredFacet>, FacetProviderError> {
        Ok(topic
            .facets()
            .iter()
            .map(|facet| ScoredFacet::new(facet.clone(), 0.0))
            .collect())
    }
}
