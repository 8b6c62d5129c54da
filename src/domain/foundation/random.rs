//! Injected random source.
//!
//! Every randomized decision in a simulation (tie-breaks, answer sampling,
//! cooperativeness draws, random baselines) goes through a `RandomSource`
//! handle passed in at construction. There is no process-wide generator.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::sync::{Arc, Mutex, PoisonError};

/// Shared, cloneable handle to a seedable generator.
///
/// Clones share the same underlying generator, so a single seed drives the
/// whole simulation.
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: Arc<Mutex<StdRng>>,
}

impl RandomSource {
    /// Creates a deterministic source from a seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Arc::new(Mutex::new(StdRng::seed_from_u64(seed))),
        }
    }

    /// Creates a source seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: Arc::new(Mutex::new(StdRng::from_entropy())),
        }
    }

    /// Seeded when a seed is given, entropy-backed otherwise.
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    /// Uniform draw from [0, 1).
    pub fn next_unit(&self) -> f64 {
        self.with_rng(|rng| rng.gen::<f64>())
    }

    /// `count` uniform draws from [0, 1) taken under a single lock.
    pub fn unit_draws(&self, count: usize) -> Vec<f64> {
        self.with_rng(|rng| (0..count).map(|_| rng.gen::<f64>()).collect())
    }

    /// Uniformly chosen element, `None` for an empty slice.
    pub fn choose<'a, T>(&self, items: &'a [T]) -> Option<&'a T> {
        self.with_rng(|rng| items.choose(rng))
    }

    fn with_rng<R>(&self, f: impl FnOnce(&mut StdRng) -> R) -> R {
        // A panic while holding the lock cannot leave the generator invalid.
        let mut guard = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}
