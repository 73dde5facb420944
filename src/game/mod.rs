//! The game facade and its saved form.
//!
//! - `Game`: owns the strategy space and payoff store; the API drivers use
//! - `GameSnapshot`: players plus payoffs, for loaders and savers

mod game;
pub mod snapshot;

pub use game::Game;
pub use snapshot::GameSnapshot;
