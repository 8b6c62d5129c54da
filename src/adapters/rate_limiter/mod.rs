//! Rate limiting for remote collaborators.
//!
//! - `CooldownGate` - One call at a time, spaced by a fixed cooldown

mod cooldown;

pub use cooldown::CooldownGate;
