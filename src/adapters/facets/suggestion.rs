//! Facets discovered through query autosuggestion.
//!
//! Starting from the topic query, suggestions are expanded breadth-first up
//! to `max_depth` levels. At each level the text is queried as-is and once
//! per expansion character (`"{text} {char}"`). Every distinct suggestion
//! becomes a facet with id `"{topic_id}_{suggestion}"` and a prior equal to
//! its discovery rank, the root query counting as rank 1.

use async_trait::async_trait;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use crate::adapters::rate_limiter::CooldownGate;
use crate::domain::clarify::{Facet, ScoredFacet, Topic};
use crate::domain::foundation::FacetId;
use crate::ports::{FacetProvider, FacetProviderError};

use super::bing::SuggestionSource;
use super::suggestion_cache::SuggestionCache;

/// Expands topic queries into facets through a suggestion source.
pub struct SuggestionFacetProvider {
    source: Arc<dyn SuggestionSource>,
    cache: SuggestionCache,
    gate: CooldownGate,
    max_depth: usize,
    expansion_chars: Vec<char>,
}

impl SuggestionFacetProvider {
    /// `max_depth` must be at least 1.
    pub fn new(
        source: Arc<dyn SuggestionSource>,
        cache: SuggestionCache,
        cooldown: Duration,
        max_depth: usize,
    ) -> Result<Self, FacetProviderError> {
        if max_depth == 0 {
            return Err(FacetProviderError::InvalidFacet(
                "suggestion expansion depth must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            source,
            cache,
            gate: CooldownGate::new(cooldown),
            max_depth,
            expansion_chars: Vec::new(),
        })
    }

    /// Characters appended to each expanded text for additional queries.
    pub fn with_expansion_chars(mut self, chars: impl IntoIterator<Item = char>) -> Self {
        self.expansion_chars = chars.into_iter().collect();
        self
    }

    fn expansions(&self, text: &str) -> Vec<String> {
        std::iter::once(text.to_string())
            .chain(self.expansion_chars.iter().map(|c| format!("{} {}", text, c)))
            .collect()
    }

    /// Cached suggestions for `query`, calling the source through the gate on a miss.
    async fn suggestions(&self, query: &str) -> Result<Vec<String>, FacetProviderError> {
        if let Some(cached) = self.cache.get(query).await {
            return Ok(cached);
        }
        let suggestions = self.gate.run(|| self.source.suggest(query)).await?;
        tracing::debug!(query, count = suggestions.len(), "Fetched suggestions");
        self.cache.insert(query, suggestions.clone()).await?;
        Ok(suggestions)
    }
}

#[async_trait]
impl FacetProvider for SuggestionFacetProvider {
    async fn facets_for_topic(&self, topic: &Topic) -> Result<Vec<ScoredFacet>, FacetProviderError> {
        let mut facets = Vec::new();
        let mut seen = HashSet::new();
        let mut queue = VecDeque::from([(topic.query().to_string(), 0usize)]);
        let mut rank = 0usize;

        while let Some((text, depth)) = queue.pop_front() {
            if !seen.insert(text.clone()) {
                continue;
            }
            rank += 1;

            if text != topic.query() {
                let id = FacetId::new(format!("{}_{}", topic.id(), text))
                    .map_err(|e| FacetProviderError::InvalidFacet(e.to_string()))?;
                let facet = Facet::new(id, text.clone(), Vec::new());
                facets.push(ScoredFacet::new(Arc::new(facet), rank as f64));
            }

            if depth < self.max_depth {
                for query in self.expansions(&text) {
                    for suggestion in self.suggestions(&query).await? {
                        let suggestion = suggestion.trim();
                        if !suggestion.is_empty() {
                            queue.push_back((suggestion.to_string(), depth + 1));
                        }
                    }
                }
            }
        }

        tracing::info!(topic = %topic.id(), facets = facets.len(), "Expanded topic through suggestions");
        Ok(facets)
    }
}
