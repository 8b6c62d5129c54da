//! Random baseline ranker.

use async_trait::async_trait;

use crate::domain::clarify::{ClarifyError, ScoredFacet};
use crate::domain::foundation::RandomSource;

use super::{sort_with_random_ties, FacetRanker};

/// Ignores scores and evidence; every call assigns fresh uniform scores.
#[derive(Debug, Clone)]
pub struct RandomFacetRanker {
    random: RandomSource,
}

impl RandomFacetRanker {
    pub fn new(random: RandomSource) -> Self {
        Self { random }
    }
}

#[async_trait]
impl FacetRanker for RandomFacetRanker {
    async fn rank(
        &self,
        candidates: Vec<ScoredFacet>,
        _positive: &[String],
        _negative: &[ScoredFacet],
    ) -> Result<Vec<ScoredFacet>, ClarifyError> {
        let scores = self.random.unit_draws(candidates.len());
        let rescored = candidates
            .into_iter()
            .zip(scores)
            .map(|(candidate, score)| ScoredFacet::new(candidate.facet, score))
            .collect();
        Ok(sort_with_random_ties(rescored, &self.random))
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clarify::Facet;
    use crate::domain::foundation::FacetId;
    use std::sync::Arc;

    fn candidates(n: usize) -> Vec<ScoredFacet> {
        (0..n)
            .map(|i| {
                let facet = Facet::new(FacetId::new(i.to_string()).unwrap(), "f", vec![]);
                ScoredFacet::new(Arc::new(facet), 100.0)
            })
            .collect()
    }

    #[tokio::test]
    async fn replaces_scores_with_unit_draws_sorted_descending() {
        let ranker = RandomFacetRanker::new(RandomSource::seeded(5));
        let ranked = ranker.rank(candidates(6), &[], &[]).await.unwrap();

        assert_eq!(ranked.len(), 6);
        for pair in ranked.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        assert!(ranked.iter().all(|s| (0.0..1.0).contains(&s.score)));
    }

    #[tokio::test]
    async fn is_reproducible_under_a_seed() {
        let a = RandomFacetRanker::new(RandomSource::seeded(11));
        let b = RandomFacetRanker::new(RandomSource::seeded(11));
        let ids = |ranked: Vec<ScoredFacet>| -> Vec<String> {
            ranked.iter().map(|s| s.id().to_string()).collect()
        };
        assert_eq!(
            ids(a.rank(candidates(5), &[], &[]).await.unwrap()),
            ids(b.rank(candidates(5), &[], &[]).await.unwrap())
        );
    }
}
