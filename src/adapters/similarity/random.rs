//! Random similarity baseline.

use async_trait::async_trait;

use crate::domain::foundation::RandomSource;
use crate::ports::{SimilarityError, SimilarityOracle};

/// Scores every pair with a fresh uniform draw.
#[derive(Debug, Clone)]
pub struct RandomSimilarityOracle {
    random: RandomSource,
}

impl RandomSimilarityOracle {
    pub fn new(random: RandomSource) -> Self {
        Self { random }
    }
}

#[async_trait]
impl SimilarityOracle for RandomSimilarityOracle {
    async fn similarity(&self, _text_a: &str, _text_b: &str) -> Result<f64, SimilarityError> {
        Ok(self.random.next_unit())
    }

    fn name(&self) -> &str {
        "random"
    }
}
