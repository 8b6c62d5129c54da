//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `CLARIFY_SIM` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use clarify_sim::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Simulating {} epochs", config.simulation.epochs);
//! ```

mod error;
mod evaluation;
mod facets;
mod logging;
mod output;
mod ranking;
mod similarity;
mod simulation;

pub use error::{ConfigError, ValidationError};
pub use evaluation::EvaluationConfig;
pub use facets::{FacetSource, FacetsConfig};
pub use logging::{LogFormat, LoggingConfig};
pub use output::{OutputConfig, OutputFormat};
pub use ranking::{RankingConfig, RankingStrategy};
pub use similarity::{MatcherKind, SimilarityConfig};
pub use simulation::SimulationConfig;

use serde::{Deserialize, Serialize};

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Dataset, epochs, patience and user behavior
    pub simulation: SimulationConfig,

    #[serde(default)]
    pub ranking: RankingConfig,

    #[serde(default)]
    pub similarity: SimilarityConfig,

    #[serde(default)]
    pub facets: FacetsConfig,

    #[serde(default)]
    pub evaluation: EvaluationConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CLARIFY_SIM` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `CLARIFY_SIM__SIMULATION__PATIENCE=5` -> `simulation.patience = 5`
    /// - `CLARIFY_SIM__FACETS__SOURCE=suggestions` -> `facets.source = suggestions`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the dataset path is missing or a value cannot
    /// be parsed into its expected type.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CLARIFY_SIM")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Configuration with defaults everywhere except the dataset path.
    pub fn with_dataset(dataset_path: impl Into<std::path::PathBuf>) -> Self {
        Self {
            simulation: SimulationConfig::new(dataset_path),
            ranking: RankingConfig::default(),
            similarity: SimilarityConfig::default(),
            facets: FacetsConfig::default(),
            evaluation: EvaluationConfig::default(),
            logging: LoggingConfig::default(),
            output: OutputConfig::default(),
        }
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.simulation.validate()?;
        self.ranking.validate()?;
        self.facets.validate()?;
        self.evaluation.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
