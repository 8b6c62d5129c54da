//! Facet ranking configuration

use serde::{Deserialize, Serialize};

use super::error::{ensure_unit_interval, ValidationError};

/// Which ranker reorders candidates after a rejected guess
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RankingStrategy {
    #[default]
    Similarity,
    Random,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    #[serde(default)]
    pub strategy: RankingStrategy,

    /// Weight of positive evidence against rejected facets
    #[serde(default = "default_alpha")]
    pub alpha: f64,
}

impl RankingConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        ensure_unit_interval("alpha", self.alpha)
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            strategy: RankingStrategy::default(),
            alpha: default_alpha(),
        }
    }
}

fn default_alpha() -> f64 {
    1.0
}
