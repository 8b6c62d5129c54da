//! Mock facet provider for testing.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use crate::domain::clarify::{ScoredFacet, Topic};
use crate::domain::foundation::TopicId;
use crate::ports::{FacetProvider, FacetProviderError};

/// Returns pre-configured candidates per topic, or nothing.
///
/// Clones share call history and queued errors.
#[derive(Debug, Clone, Default)]
pub struct MockFacetProvider {
    candidates: HashMap<TopicId, Vec<ScoredFacet>>,
    errors: Arc<Mutex<VecDeque<FacetProviderError>>>,
    calls: Arc<Mutex<Vec<TopicId>>>,
}

impl MockFacetProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_candidates(mut self, topic: TopicId, candidates: Vec<ScoredFacet>) -> Self {
        self.candidates.insert(topic, candidates);
        self
    }

    /// Fails the next call with `error`.
    pub fn with_error(self, error: FacetProviderError) -> Self {
        self.errors.lock().unwrap().push_back(error);
        self
    }

    /// Topics asked for, in call order.
    pub fn calls(&self) -> Vec<TopicId> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl FacetProvider for MockFacetProvider {
    async fn facets_for_topic(&self, topic: &Topic) -> Result<Vec<ScoredFacet>, FacetProviderError> {
        self.calls.lock().unwrap().push(topic.id().clone());
        if let Some(error) = self.errors.lock().unwrap().pop_front() {
            return Err(error);
        }
        Ok(self.candidates.get(topic.id()).cloned().unwrap_or_default())
    }
}
