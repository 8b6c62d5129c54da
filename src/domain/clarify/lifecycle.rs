//! Dialogue lifecycle state machine.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// The lifecycle of one clarification dialogue.
///
/// - `Ongoing`: the agent still has candidates and the user is engaged
/// - `Success`: the user said "yes" to a proposed facet
/// - `Failed`: candidates ran out, patience ran out, or there was nothing to propose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DialogueLifecycle {
    #[default]
    Ongoing,
    Success,
    Failed,
}

impl DialogueLifecycle {
    /// Returns true while the agent may take another turn.
    pub fn is_ongoing(&self) -> bool {
        matches!(self, Self::Ongoing)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

impl StateMachine for DialogueLifecycle {
    fn can_transition_to(&self, target: &Self) -> bool {
        use DialogueLifecycle::*;
        matches!((self, target), (Ongoing, Success) | (Ongoing, Failed))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use DialogueLifecycle::*;
        match self {
            Ongoing => vec![Success, Failed],
            Success => vec![],
            Failed => vec![],
        }
    }
}
