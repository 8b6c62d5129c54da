//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, the state machine trait, the injected random
//! source and validation errors that form the vocabulary of the simulator.

mod errors;
mod ids;
mod random;
mod state_machine;

pub use errors::{ensure_unit_interval, ValidationError};
pub use ids::{FacetId, TopicId};
pub use random::RandomSource;
pub use state_machine::StateMachine;
