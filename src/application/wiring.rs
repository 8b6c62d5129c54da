//! Builds engine collaborators from configuration.

use secrecy::ExposeSecret;
use std::sync::Arc;

use crate::adapters::evaluation::{CorpusSearcher, DisabledEvaluator, NullSearcher, QrelsEvaluator};
use crate::adapters::facets::{
    BingSuggestClient, BingSuggestConfig, DatasetFacetProvider, EnhancedRepFacetProvider,
    SuggestionCache, SuggestionFacetProvider,
};
use crate::adapters::language::{
    KeywordStanceDetector, PrefixStrippingExtractor, TemplateQuestionGenerator,
};
use crate::adapters::similarity::{
    CachingSimilarityOracle, LexicalSimilarityOracle, RandomSimilarityOracle,
};
use crate::config::{
    AppConfig, EvaluationConfig, FacetSource, FacetsConfig, MatcherKind, RankingStrategy,
    SimilarityConfig, ValidationError,
};
use crate::domain::clarify::{ClarifyEngine, ClarifyError, EngineComponents};
use crate::domain::foundation::RandomSource;
use crate::domain::ranking::{FacetRanker, RandomFacetRanker, SimilarityFacetRanker};
use crate::domain::simulation::{CooperativenessSchedule, QaAnswerGenerator, UserSimulator};
use crate::ports::{
    DocumentSearcher, FacetProvider, RetrievalEvaluator, SimilarityOracle, StanceDetector,
};

use super::error::SimulationError;

/// Similarity oracle of the given kind, memoized when `cached`.
pub fn build_oracle(
    kind: MatcherKind,
    cached: bool,
    random: &RandomSource,
) -> Arc<dyn SimilarityOracle> {
    let oracle: Arc<dyn SimilarityOracle> = match kind {
        MatcherKind::Lexical => Arc::new(LexicalSimilarityOracle::new()),
        MatcherKind::Random => Arc::new(RandomSimilarityOracle::new(random.clone())),
    };
    if cached {
        Arc::new(CachingSimilarityOracle::new(oracle))
    } else {
        oracle
    }
}

/// Oracles for the ranker and for the simulated user, in that order.
///
/// When both use the same matcher they share one instance, and so one cache.
pub fn build_oracles(
    config: &SimilarityConfig,
    random: &RandomSource,
) -> (Arc<dyn SimilarityOracle>, Arc<dyn SimilarityOracle>) {
    let clarify = build_oracle(config.clarify_matcher, config.cache_enabled, random);
    let user = if config.user_matcher == config.clarify_matcher {
        clarify.clone()
    } else {
        build_oracle(config.user_matcher, config.cache_enabled, random)
    };
    (clarify, user)
}

/// Facet provider for the configured source, decorated with enhanced
/// representations when a table is configured.
pub async fn build_facet_provider(
    config: &FacetsConfig,
) -> Result<Arc<dyn FacetProvider>, SimulationError> {
    let provider: Arc<dyn FacetProvider> = match config.source {
        FacetSource::Dataset => Arc::new(DatasetFacetProvider::new()),
        FacetSource::Suggestions => {
            let api_key = config
                .api_key
                .as_ref()
                .ok_or(ValidationError::MissingRequired("FACETS__API_KEY"))?;
            let client = BingSuggestClient::new(
                BingSuggestConfig::new(api_key.expose_secret().clone())
                    .with_endpoint(config.endpoint.clone())
                    .with_timeout(config.timeout()),
            )?;
            let cache = SuggestionCache::open(&config.cache_path).await?;
            let provider = SuggestionFacetProvider::new(
                Arc::new(client),
                cache,
                config.cooldown(),
                config.max_depth,
            )?
            .with_expansion_chars(config.expansion_chars.chars());
            Arc::new(provider)
        }
    };

    match &config.enhanced_reps_path {
        Some(path) => Ok(Arc::new(EnhancedRepFacetProvider::load(provider, path).await?)),
        None => Ok(provider),
    }
}

/// Qrels evaluator when judgments are configured, otherwise one that reports nothing.
pub async fn build_evaluator(
    config: &EvaluationConfig,
) -> Result<Arc<dyn RetrievalEvaluator>, SimulationError> {
    let Some(qrels_path) = &config.qrels_path else {
        return Ok(Arc::new(DisabledEvaluator));
    };
    let searcher: Arc<dyn DocumentSearcher> = match &config.corpus_path {
        Some(corpus) => Arc::new(CorpusSearcher::load(corpus).await?),
        None => Arc::new(NullSearcher),
    };
    Ok(Arc::new(QrelsEvaluator::load(searcher, qrels_path).await?))
}

/// Wires every collaborator the engine needs around one shared random source.
pub async fn build_engine(
    config: &AppConfig,
    random: &RandomSource,
) -> Result<ClarifyEngine, SimulationError> {
    let simulation = &config.simulation;

    let stance_detector: Arc<dyn StanceDetector> = Arc::new(KeywordStanceDetector::default());
    let (clarify_oracle, user_oracle) = build_oracles(&config.similarity, random);

    let ranker: Arc<dyn FacetRanker> = match config.ranking.strategy {
        RankingStrategy::Similarity => Arc::new(SimilarityFacetRanker::new(
            clarify_oracle,
            config.ranking.alpha,
            random.clone(),
        )?),
        RankingStrategy::Random => Arc::new(RandomFacetRanker::new(random.clone())),
    };

    let schedule = CooperativenessSchedule::new(
        simulation.cooperativeness_schedule,
        simulation.cooperativeness,
    )
    .map_err(ClarifyError::from)?;
    let answers = QaAnswerGenerator::new(
        stance_detector.clone(),
        simulation.perfect_match_threshold,
        random.clone(),
    );
    let user_simulator = UserSimulator::new(
        user_oracle,
        Arc::new(answers),
        simulation.patience,
        schedule,
    );

    let components = EngineComponents {
        facet_provider: build_facet_provider(&config.facets).await?,
        ranker,
        question_generator: Arc::new(TemplateQuestionGenerator),
        user_simulator: Arc::new(user_simulator),
        stance_detector,
        informative_extractor: Arc::new(PrefixStrippingExtractor::default()),
        evaluator: build_evaluator(&config.evaluation).await?,
    };

    Ok(ClarifyEngine::new(components).with_max_concurrent_topics(simulation.max_concurrent_topics))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clarify::{Facet, Topic};
    use crate::domain::foundation::{FacetId, TopicId};
    use std::io::Write;
    use std::path::PathBuf;

    fn topic() -> Topic {
        let facet = Facet::new(FacetId::new("F1").unwrap(), "apple fruit", vec![]);
        Topic::new(TopicId::new("1").unwrap(), "apple", vec![facet])
    }

    mod oracles {
        use super::*;

        #[tokio::test]
        async fn cached_oracle_keeps_inner_name() {
            let oracle = build_oracle(MatcherKind::Lexical, true, &RandomSource::seeded(1));
            assert_eq!(oracle.name(), "lexical");
            let score = oracle.similarity("apple fruit", "apple fruit").await.unwrap();
            assert!((score - 1.0).abs() < 1e-9);
        }

        #[test]
        fn same_matcher_shares_one_oracle() {
            let (clarify, user) =
                build_oracles(&SimilarityConfig::default(), &RandomSource::seeded(1));
            assert!(Arc::ptr_eq(&clarify, &user));
        }

        #[test]
        fn different_matchers_get_their_own_oracle() {
            let config = SimilarityConfig {
                user_matcher: MatcherKind::Random,
                ..SimilarityConfig::default()
            };
            let (clarify, user) = build_oracles(&config, &RandomSource::seeded(1));
            assert!(!Arc::ptr_eq(&clarify, &user));
            assert_eq!(clarify.name(), "lexical");
            assert_eq!(user.name(), "random");
        }

        #[test]
        fn random_matcher_is_selectable() {
            let oracle = build_oracle(MatcherKind::Random, false, &RandomSource::seeded(1));
            assert_eq!(oracle.name(), "random");
        }
    }

    mod evaluators {
        use super::*;

        #[tokio::test]
        async fn no_qrels_reports_no_metrics() {
            let evaluator = build_evaluator(&EvaluationConfig::default()).await.unwrap();
            let topic = topic();
            let metrics = evaluator
                .calculate_metrics(&topic, &topic.facets()[0], "apple fruit")
                .await
                .unwrap();
            assert!(metrics.is_empty());
        }

        #[tokio::test]
        async fn qrels_without_corpus_scores_zero() {
            let mut qrels = tempfile::NamedTempFile::new().unwrap();
            qrels.write_all(b"1-F1 0 d1 1\n").unwrap();
            let config = EvaluationConfig {
                qrels_path: Some(qrels.path().to_path_buf()),
                corpus_path: None,
            };
            let evaluator = build_evaluator(&config).await.unwrap();
            let topic = topic();
            let metrics = evaluator
                .calculate_metrics(&topic, &topic.facets()[0], "apple fruit")
                .await
                .unwrap();
            assert_eq!(metrics["mrr"], 0.0);
        }

        #[tokio::test]
        async fn missing_qrels_file_fails() {
            let config = EvaluationConfig {
                qrels_path: Some(PathBuf::from("/nonexistent/qrels.txt")),
                corpus_path: None,
            };
            assert!(matches!(
                build_evaluator(&config).await,
                Err(SimulationError::Evaluation(_))
            ));
        }
    }

    mod facet_providers {
        use super::*;

        #[tokio::test]
        async fn dataset_source_returns_topic_facets() {
            let provider = build_facet_provider(&FacetsConfig::default()).await.unwrap();
            let facets = provider.facets_for_topic(&topic()).await.unwrap();
            assert_eq!(facets.len(), 1);
        }

        #[tokio::test]
        async fn suggestions_without_key_fail() {
            let config = FacetsConfig {
                source: FacetSource::Suggestions,
                ..FacetsConfig::default()
            };
            assert!(matches!(
                build_facet_provider(&config).await,
                Err(SimulationError::InvalidConfig(_))
            ));
        }
    }

    #[tokio::test]
    async fn rejects_alpha_outside_unit_interval() {
        let mut config = AppConfig::with_dataset("unused.json");
        config.ranking.alpha = 2.0;
        assert!(matches!(
            build_engine(&config, &RandomSource::seeded(1)).await,
            Err(SimulationError::Clarify(_))
        ));
    }
}
