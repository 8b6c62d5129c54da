//! Clarification dialogues.
//!
//! # Module Organization
//!
//! - `topic` - Topics, facets and scored candidates
//! - `lifecycle` - Dialogue lifecycle state machine
//! - `state` - Candidate set, dead set and accumulated evidence
//! - `engine` - Turn loop, dialogue runs and multi-topic simulation
//! - `trace` - Per-turn and per-dialogue records
//! - `report` - Aggregated run reports

mod engine;
mod errors;
mod lifecycle;
mod report;
mod state;
mod topic;
mod trace;

pub use engine::{ClarifyEngine, EngineComponents};
pub use errors::ClarifyError;
pub use lifecycle::DialogueLifecycle;
pub use report::{
    FacetReport, RunReport, SummaryStats, TopicOutcome, TopicReport, METRIC_REAL_SUCCESS,
    METRIC_SUBJECTIVE_SUCCESS, METRIC_TURNS,
};
pub use state::DialogueState;
pub use topic::{
    normalize_enhanced_rep, CandidateSnapshot, Facet, QuestionAnswer, ScoredFacet, Topic,
    ENHANCED_REP_MAX_TOKENS,
};
pub use trace::{DialogueTrace, StepResult, TurnRecord};
