//! Similarity oracle configuration

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MatcherKind {
    #[default]
    Lexical,
    Random,
}

/// Oracles used by the agent's ranker and by the simulated user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityConfig {
    #[serde(default)]
    pub clarify_matcher: MatcherKind,

    #[serde(default)]
    pub user_matcher: MatcherKind,

    /// Memoize scores per text pair
    #[serde(default = "default_cache_enabled")]
    pub cache_enabled: bool,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            clarify_matcher: MatcherKind::default(),
            user_matcher: MatcherKind::default(),
            cache_enabled: default_cache_enabled(),
        }
    }
}

fn default_cache_enabled() -> bool {
    true
}
