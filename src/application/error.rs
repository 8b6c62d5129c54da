//! Errors surfaced while setting up or reporting a simulation run.

use thiserror::Error;

use crate::adapters::dataset::DatasetError;
use crate::config::{ConfigError, ValidationError};
use crate::domain::clarify::ClarifyError;
use crate::ports::{EvaluationError, FacetProviderError};

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ValidationError),

    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    #[error("Facet provider setup failed: {0}")]
    FacetProvider(#[from] FacetProviderError),

    #[error("Evaluator setup failed: {0}")]
    Evaluation(#[from] EvaluationError),

    #[error(transparent)]
    Clarify(#[from] ClarifyError),

    #[error("Failed to install tracing subscriber: {0}")]
    Telemetry(String),

    #[error("Failed to render report: {0}")]
    Render(String),
}
