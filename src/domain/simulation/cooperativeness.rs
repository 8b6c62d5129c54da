//! Cooperativeness schedules.
//!
//! Cooperativeness is the probability that the simulated user elaborates on a
//! "no" answer. It may stay constant or drift with the turn index.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ensure_unit_interval, ValidationError};

/// How cooperativeness evolves over turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CooperativenessCurve {
    #[default]
    Constant,
    /// `min(1, base * log2(turn + 2))`
    Increasing,
    /// `base / log2(turn + 2)`
    Decreasing,
}

/// A curve anchored at a base cooperativeness in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CooperativenessSchedule {
    curve: CooperativenessCurve,
    base: f64,
}

impl CooperativenessSchedule {
    pub fn new(curve: CooperativenessCurve, base: f64) -> Result<Self, ValidationError> {
        let base = ensure_unit_interval("cooperativeness", base)?;
        Ok(Self { curve, base })
    }

    pub fn constant(base: f64) -> Result<Self, ValidationError> {
        Self::new(CooperativenessCurve::Constant, base)
    }

    pub fn base(&self) -> f64 {
        self.base
    }

    pub fn curve(&self) -> CooperativenessCurve {
        self.curve
    }

    /// Cooperativeness when answering question number `turn` (0-based).
    pub fn at(&self, turn: usize) -> f64 {
        let scale = ((turn + 2) as f64).log2();
        match self.curve {
            CooperativenessCurve::Constant => self.base,
            CooperativenessCurve::Increasing => (self.base * scale).min(1.0),
            CooperativenessCurve::Decreasing => self.base / scale,
        }
    }
}
