//! Simulation run configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::domain::simulation::CooperativenessCurve;

use super::error::{ensure_unit_interval, ValidationError};

/// Dialogue simulation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Qulac-layout dataset JSON file
    pub dataset_path: PathBuf,

    /// Dialogues simulated per target facet
    #[serde(default = "default_epochs")]
    pub epochs: usize,

    /// Seed for the shared random source; entropy when unset
    #[serde(default)]
    pub seed: Option<u64>,

    /// Questions the user answers before giving up
    #[serde(default = "default_patience")]
    pub patience: usize,

    /// Base probability of elaborating on a "no"
    #[serde(default = "default_cooperativeness")]
    pub cooperativeness: f64,

    #[serde(default)]
    pub cooperativeness_schedule: CooperativenessCurve,

    /// Similarity at or above which the user answers "yes"
    #[serde(default = "default_perfect_match_threshold")]
    pub perfect_match_threshold: f64,

    /// Topics simulated at once; runs are only reproducible at 1
    #[serde(default = "default_max_concurrent_topics")]
    pub max_concurrent_topics: usize,
}

impl SimulationConfig {
    pub fn new(dataset_path: impl Into<PathBuf>) -> Self {
        Self {
            dataset_path: dataset_path.into(),
            epochs: default_epochs(),
            seed: None,
            patience: default_patience(),
            cooperativeness: default_cooperativeness(),
            cooperativeness_schedule: CooperativenessCurve::default(),
            perfect_match_threshold: default_perfect_match_threshold(),
            max_concurrent_topics: default_max_concurrent_topics(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.dataset_path.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("SIMULATION__DATASET_PATH"));
        }
        if self.epochs == 0 {
            return Err(ValidationError::MustBePositive("epochs"));
        }
        if self.max_concurrent_topics == 0 {
            return Err(ValidationError::MustBePositive("max_concurrent_topics"));
        }
        ensure_unit_interval("cooperativeness", self.cooperativeness)?;
        ensure_unit_interval("perfect_match_threshold", self.perfect_match_threshold)?;
        Ok(())
    }
}

fn default_epochs() -> usize {
    10
}

fn default_patience() -> usize {
    3
}

fn default_cooperativeness() -> f64 {
    1.0
}

fn default_perfect_match_threshold() -> f64 {
    0.5
}

fn default_max_concurrent_topics() -> usize {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulation_defaults() {
        let config = SimulationConfig::new("data/qulac.json");
        assert_eq!(config.epochs, 10);
        assert_eq!(config.patience, 3);
        assert_eq!(config.cooperativeness, 1.0);
        assert_eq!(config.perfect_match_threshold, 0.5);
        assert_eq!(config.max_concurrent_topics, 1);
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_patience_is_allowed() {
        let config = SimulationConfig {
            patience: 0,
            ..SimulationConfig::new("data/qulac.json")
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_epochs() {
        let config = SimulationConfig {
            epochs: 0,
            ..SimulationConfig::new("data/qulac.json")
        };
        assert_eq!(config.validate(), Err(ValidationError::MustBePositive("epochs")));
    }

    #[test]
    fn test_rejects_threshold_above_one() {
        let config = SimulationConfig {
            perfect_match_threshold: 1.5,
            ..SimulationConfig::new("data/qulac.json")
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::OutsideUnitInterval { field: "perfect_match_threshold", .. })
        ));
    }

    #[test]
    fn test_rejects_empty_dataset_path() {
        let config = SimulationConfig::new("");
        assert!(matches!(config.validate(), Err(ValidationError::MissingRequired(_))));
    }
}
