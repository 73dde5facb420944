//! Core game types: players, profiles, strategy spaces, configuration, RNG.
//!
//! These are the building blocks every other module derives its shape
//! from. `StrategySpace` owns the dimensions; nothing else stores them
//! independently.

pub mod player;
pub mod profile;
pub mod config;
pub mod space;
pub mod rng;

pub use player::{default_strategy_name, Player, PlayerId, MAX_PLAYERS};
pub use profile::{Profile, ProfileIter};
pub use config::{GameConfig, PlayerConfig};
pub use space::StrategySpace;
pub use rng::GameRng;
