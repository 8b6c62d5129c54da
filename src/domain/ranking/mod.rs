//! Facet ranking strategies.
//!
//! A ranker reorders the candidate set after every rejected guess, using
//! positive evidence (informative "no" content) and negative evidence
//! (already rejected facets). Rankers sort by score, descending, and break
//! ties with a fresh random draw per candidate per call, so callers must not
//! rely on a stable order among equal scores.

mod random_ranker;
mod similarity_ranker;

pub use random_ranker::RandomFacetRanker;
pub use similarity_ranker::SimilarityFacetRanker;

use async_trait::async_trait;

use crate::domain::clarify::{ClarifyError, ScoredFacet};
use crate::domain::foundation::RandomSource;

/// Strategy for ordering the remaining candidates.
#[async_trait]
pub trait FacetRanker: Send + Sync {
    /// Returns the candidates re-scored and sorted best first.
    ///
    /// The output must be a permutation of `candidates`.
    async fn rank(
        &self,
        candidates: Vec<ScoredFacet>,
        positive: &[String],
        negative: &[ScoredFacet],
    ) -> Result<Vec<ScoredFacet>, ClarifyError>;

    /// Whether `rank` would change anything for this evidence.
    ///
    /// Returning false lets the engine skip the call and apply
    /// [`zero_scores`] instead.
    fn needs_rescoring(&self, _positive: &[String], _negative: &[ScoredFacet]) -> bool {
        true
    }

    /// Short name for logs and reports.
    fn name(&self) -> &'static str;
}

/// Sorts by score descending, breaking ties with one random draw per item.
pub fn sort_with_random_ties(scored: Vec<ScoredFacet>, random: &RandomSource) -> Vec<ScoredFacet> {
    let draws = random.unit_draws(scored.len());
    let mut keyed: Vec<(f64, ScoredFacet)> = draws.into_iter().zip(scored).collect();
    keyed.sort_by(|(tie_a, a), (tie_b, b)| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| tie_b.total_cmp(tie_a))
    });
    keyed.into_iter().map(|(_, scored)| scored).collect()
}

/// Outcome of ranking when every score would be zero: same order, zero scores.
pub fn zero_scores(candidates: Vec<ScoredFacet>) -> Vec<ScoredFacet> {
    candidates
        .into_iter()
        .map(|candidate| ScoredFacet::new(candidate.facet, 0.0))
        .collect()
}
