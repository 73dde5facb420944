//! Payoff storage.
//!
//! - `PayoffStore`: the game's dense payoff arena, keyed by profile
//! - `PayoffBuffer`: shape-tagged copies used for bulk load and save
//!
//! Payoffs are exact values; comparisons never apply a tolerance.

pub mod buffer;
pub mod store;

pub use buffer::{PayoffBuffer, Shape};
pub use store::{Cell, PayoffStore};

/// A single player's payoff.
pub type Payoff = f64;
