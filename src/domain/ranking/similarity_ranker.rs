//! Evidence-weighted similarity ranker.
//!
//! Each candidate's full representation is compared against:
//! - positive evidence: informative "no" content, averaged (`pos`)
//! - negative evidence: rejected facets' representations, averaged and negated (`neg`)
//!
//! and scored as `alpha * pos + (1 - alpha) * neg`.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::clarify::{ClarifyError, ScoredFacet};
use crate::domain::foundation::{ensure_unit_interval, RandomSource};
use crate::ports::SimilarityOracle;

use super::{sort_with_random_ties, zero_scores, FacetRanker};

/// Ranks candidates by weighted similarity to accumulated evidence.
pub struct SimilarityFacetRanker {
    oracle: Arc<dyn SimilarityOracle>,
    alpha: f64,
    random: RandomSource,
}

impl SimilarityFacetRanker {
    /// Creates a ranker; `alpha` must lie in [0, 1].
    ///
    /// `alpha = 1` ignores negative evidence, `alpha = 0` ignores positive evidence.
    pub fn new(
        oracle: Arc<dyn SimilarityOracle>,
        alpha: f64,
        random: RandomSource,
    ) -> Result<Self, ClarifyError> {
        let alpha = ensure_unit_interval("alpha", alpha)?;
        Ok(Self {
            oracle,
            alpha,
            random,
        })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    fn uses_positive(&self, positive: &[String]) -> bool {
        self.alpha > 0.0 && !positive.is_empty()
    }

    fn uses_negative(&self, negative: &[ScoredFacet]) -> bool {
        self.alpha < 1.0 && !negative.is_empty()
    }

    async fn mean_similarity(&self, rep: &str, texts: &[String]) -> Result<f64, ClarifyError> {
        let mut total = 0.0;
        for text in texts {
            total += self.oracle.similarity(rep, text).await?;
        }
        Ok(total / texts.len() as f64)
    }
}

#[async_trait]
impl FacetRanker for SimilarityFacetRanker {
    async fn rank(
        &self,
        candidates: Vec<ScoredFacet>,
        positive: &[String],
        negative: &[ScoredFacet],
    ) -> Result<Vec<ScoredFacet>, ClarifyError> {
        let use_positive = self.uses_positive(positive);
        let use_negative = self.uses_negative(negative);
        if !use_positive && !use_negative {
            // Every score would be zero: keep the incoming order.
            return Ok(zero_scores(candidates));
        }

        let dead_reps: Vec<String> = if use_negative {
            negative
                .iter()
                .map(|dead| dead.facet.full_representation())
                .collect()
        } else {
            Vec::new()
        };

        let mut rescored = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let rep = candidate.facet.full_representation();
            let pos = if use_positive {
                self.mean_similarity(&rep, positive).await?
            } else {
                0.0
            };
            let neg = if use_negative {
                -self.mean_similarity(&rep, &dead_reps).await?
            } else {
                0.0
            };
            let score = self.alpha * pos + (1.0 - self.alpha) * neg;
            tracing::trace!(facet = %candidate.id(), pos, neg, score, "Scored candidate");
            rescored.push(ScoredFacet::new(candidate.facet, score));
        }

        Ok(sort_with_random_ties(rescored, &self.random))
    }

    fn needs_rescoring(&self, positive: &[String], negative: &[ScoredFacet]) -> bool {
        self.uses_positive(positive) || self.uses_negative(negative)
    }

    fn name(&self) -> &'static str {
        "similarity"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::similarity::MockSimilarityOracle;
    use crate::domain::clarify::Facet;
    use crate::domain::foundation::FacetId;

    fn scored(id: &str, desc: &str, score: f64) -> ScoredFacet {
        let facet = Facet::new(FacetId::new(id).unwrap(), desc, vec![]);
        ScoredFacet::new(Arc::new(facet), score)
    }

    fn ids(ranked: &[ScoredFacet]) -> Vec<&str> {
        ranked.iter().map(|s| s.id().as_str()).collect()
    }

    fn ranker(oracle: MockSimilarityOracle, alpha: f64) -> SimilarityFacetRanker {
        SimilarityFacetRanker::new(Arc::new(oracle), alpha, RandomSource::seeded(1)).unwrap()
    }

    mod construction {
        use super::*;

        #[test]
        fn rejects_alpha_outside_unit_interval() {
            let oracle: Arc<dyn SimilarityOracle> = Arc::new(MockSimilarityOracle::new());
            assert!(SimilarityFacetRanker::new(oracle.clone(), 1.2, RandomSource::seeded(1)).is_err());
            assert!(SimilarityFacetRanker::new(oracle, -0.1, RandomSource::seeded(1)).is_err());
        }
    }

    mod empty_evidence {
        use super::*;

        #[tokio::test]
        async fn keeps_input_order_without_consulting_oracle() {
            let oracle = MockSimilarityOracle::new().with_default(0.7);
            let ranker = ranker(oracle.clone(), 0.5);
            let input = vec![scored("b", "b", 0.0), scored("a", "a", 0.0), scored("c", "c", 0.0)];

            assert!(!ranker.needs_rescoring(&[], &[]));
            let ranked = ranker.rank(input, &[], &[]).await.unwrap();

            assert_eq!(ids(&ranked), vec!["b", "a", "c"]);
            assert_eq!(oracle.call_count(), 0);
        }

        #[tokio::test]
        async fn alpha_one_ignores_dead_set_when_no_positive_evidence() {
            let oracle = MockSimilarityOracle::new();
            let ranker = ranker(oracle.clone(), 1.0);
            let dead = vec![scored("x", "x", 0.0)];

            assert!(!ranker.needs_rescoring(&[], &dead));
            let ranked = ranker.rank(vec![scored("a", "a", 0.3)], &[], &dead).await.unwrap();
            assert_eq!(ranked[0].score, 0.0);
            assert_eq!(oracle.call_count(), 0);
        }

        #[tokio::test]
        async fn drops_prior_scores_but_keeps_their_order() {
            let ranker = ranker(MockSimilarityOracle::new(), 0.5);
            let input = vec![scored("f1", "f1", 2.0), scored("f2", "f2", 3.0)];

            let ranked = ranker.rank(input, &[], &[]).await.unwrap();

            assert_eq!(ids(&ranked), vec!["f1", "f2"]);
            assert!(ranked.iter().all(|s| s.score == 0.0));
        }
    }

    mod positive_evidence {
        use super::*;

        #[tokio::test]
        async fn promotes_candidates_similar_to_evidence() {
            let oracle = MockSimilarityOracle::new()
                .with_rule("apple inc", "tech", 0.9)
                .with_rule("apple fruit", "tech", 0.1);
            let ranker = ranker(oracle, 1.0);
            let input = vec![scored("f1", "apple fruit", 0.0), scored("f2", "apple inc", 0.0)];

            let ranked = ranker
                .rank(input, &["the tech company".to_string()], &[])
                .await
                .unwrap();

            assert_eq!(ids(&ranked), vec!["f2", "f1"]);
            assert!((ranked[0].score - 0.9).abs() < 1e-9);
        }

        #[tokio::test]
        async fn averages_over_repeated_evidence() {
            let oracle = MockSimilarityOracle::new()
                .with_rule("target", "one", 1.0)
                .with_rule("target", "two", 0.0);
            let ranker = ranker(oracle, 1.0);
            let evidence = vec!["one".to_string(), "one".to_string(), "two".to_string()];

            let ranked = ranker
                .rank(vec![scored("t", "target", 0.0)], &evidence, &[])
                .await
                .unwrap();
            assert!((ranked[0].score - 2.0 / 3.0).abs() < 1e-9);
        }
    }

    mod negative_evidence {
        use super::*;

        #[tokio::test]
        async fn alpha_zero_demotes_candidates_close_to_rejected_facets() {
            let oracle = MockSimilarityOracle::new()
                .with_rule("apple pie", "apple fruit", 0.8)
                .with_rule("apple inc", "apple fruit", 0.1);
            let ranker = ranker(oracle, 0.0);
            let dead = vec![scored("f1", "apple fruit", 0.0)];
            let input = vec![scored("pie", "apple pie", 0.0), scored("inc", "apple inc", 0.0)];

            let ranked = ranker
                .rank(input, &["ignored".to_string()], &dead)
                .await
                .unwrap();

            assert_eq!(ids(&ranked), vec!["inc", "pie"]);
            assert!((ranked[0].score + 0.1).abs() < 1e-9);
        }

        #[tokio::test]
        async fn alpha_one_never_compares_against_dead_facets() {
            let oracle = MockSimilarityOracle::new().with_default(0.5);
            let ranker = ranker(oracle.clone(), 1.0);
            let dead = vec![scored("gone", "rejected facet text", 0.0)];

            ranker
                .rank(vec![scored("a", "a", 0.0)], &["hint".to_string()], &dead)
                .await
                .unwrap();

            assert!(oracle
                .calls()
                .iter()
                .all(|(_, b)| !b.contains("rejected facet text")));
        }

        #[tokio::test]
        async fn mixes_both_signals() {
            let oracle = MockSimilarityOracle::new()
                .with_rule("cand", "hint", 0.6)
                .with_rule("cand", "dead", 0.2);
            let ranker = ranker(oracle, 0.5);
            let dead = vec![scored("d", "dead", 0.0)];

            let ranked = ranker
                .rank(vec![scored("c", "cand", 0.0)], &["hint".to_string()], &dead)
                .await
                .unwrap();
            assert!((ranked[0].score - (0.5 * 0.6 - 0.5 * 0.2)).abs() < 1e-9);
        }
    }

    #[tokio::test]
    async fn propagates_oracle_errors() {
        let oracle = MockSimilarityOracle::new()
            .with_error(crate::ports::SimilarityError::unavailable("model not loaded"));
        let ranker = ranker(oracle, 1.0);

        let result = ranker
            .rank(vec![scored("a", "a", 0.0)], &["hint".to_string()], &[])
            .await;
        assert!(matches!(result, Err(ClarifyError::Similarity(_))));
    }
}
