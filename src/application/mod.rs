//! Application layer - wires configured collaborators into a simulation run.
//!
//! - `telemetry` - tracing subscriber installation
//! - `SimulationRunner` - loads the dataset, builds the engine, runs all topics
//! - `SimulationOutput` - the report with the effective configuration echoed

mod error;
mod simulation_runner;
pub mod telemetry;
mod wiring;

pub use error::SimulationError;
pub use simulation_runner::{SimulationOutput, SimulationRunner};
pub use wiring::{build_engine, build_evaluator, build_facet_provider, build_oracle, build_oracles};
