//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};

use super::error::SimulationError;

/// Installs the global subscriber, writing to stderr.
///
/// `RUST_LOG` overrides the configured filter when set.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), SimulationError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .map_err(|e| SimulationError::Telemetry(e.to_string()))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    let result = match config.format {
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    result.map_err(|e| SimulationError::Telemetry(e.to_string()))
}
