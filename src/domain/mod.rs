//! Domain layer containing the simulation logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (IDs, errors, state machine, randomness)
//! - `clarify` - Dialogue state, clarify engine and run reports
//! - `ranking` - Candidate facet ranking strategies
//! - `simulation` - Simulated user and answer generation

pub mod clarify;
pub mod foundation;
pub mod ranking;
pub mod simulation;
