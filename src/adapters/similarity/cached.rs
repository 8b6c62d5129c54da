//! Caching decorator for similarity oracles.
//!
//! Scores are memoized per literal `(text_a, text_b)` pair for the lifetime of
//! the decorator. Misses are computed outside the lock, so two tasks racing on
//! the same pair may both call the inner oracle; the last write wins and both
//! values are equal for a deterministic oracle.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{SimilarityError, SimilarityOracle};

/// Cache hit and miss counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Memoizing wrapper around another oracle.
pub struct CachingSimilarityOracle {
    inner: Arc<dyn SimilarityOracle>,
    cache: RwLock<HashMap<(String, String), f64>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl CachingSimilarityOracle {
    pub fn new(inner: Arc<dyn SimilarityOracle>) -> Self {
        Self {
            inner,
            cache: RwLock::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    /// Number of cached pairs.
    pub async fn len(&self) -> usize {
        self.cache.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.cache.read().await.is_empty()
    }
}

#[async_trait]
impl SimilarityOracle for CachingSimilarityOracle {
    async fn similarity(&self, text_a: &str, text_b: &str) -> Result<f64, SimilarityError> {
        let key = (text_a.to_string(), text_b.to_string());
        if let Some(score) = self.cache.read().await.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(*score);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let score = self.inner.similarity(text_a, text_b).await?;
        self.cache.write().await.insert(key, score);
        Ok(score)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
