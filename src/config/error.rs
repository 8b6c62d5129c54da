//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("{field} must be within [0, 1], got {value}")]
    OutsideUnitInterval { field: &'static str, value: f64 },

    #[error("{0} must be greater than zero")]
    MustBePositive(&'static str),

    #[error("Invalid URL for {0}")]
    InvalidUrl(&'static str),

    #[error("Invalid log filter: {0}")]
    InvalidLogFilter(String),

    #[error("Expansion characters must be ASCII letters or digits")]
    InvalidExpansionChars,
}

pub(crate) fn ensure_unit_interval(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::OutsideUnitInterval { field, value })
    }
}
