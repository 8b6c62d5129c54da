//! User simulation.
//!
//! The simulated user knows its true intent (a target facet), loses patience
//! after a fixed number of turns, and answers through an `AnswerGenerator`
//! whose willingness to elaborate follows a cooperativeness schedule.

mod answer_generator;
mod cooperativeness;
mod user_simulator;
mod user_state;

pub use answer_generator::{
    AnswerBuckets, AnswerGenerator, QaAnswerGenerator, DEFAULT_NO_ANSWER, DEFAULT_YES_ANSWER,
};
pub use cooperativeness::{CooperativenessCurve, CooperativenessSchedule};
pub use user_simulator::{UserFeedback, UserSimulator, INTENT_SEPARATOR};
pub use user_state::UserSimulatorState;
