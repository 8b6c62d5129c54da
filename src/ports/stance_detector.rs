//! Stance Detector Port - yes/no classification of free-text answers.

use serde::{Deserialize, Serialize};

/// Stance of an answer to a yes/no clarifying question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stance {
    Yes,
    No,
    /// Neither affirmative nor negative (also used for a missing answer).
    Other,
}

/// Port for classifying answer stance.
///
/// `None` stands for a user who refused to answer (out of patience).
pub trait StanceDetector: Send + Sync {
    fn stance(&self, answer: Option<&str>) -> Stance;
}
