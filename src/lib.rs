//! # rust-simgame
//!
//! Finite n-player simultaneous (normal-form) games with dense payoff
//! storage and pure-strategy equilibrium analysis.
//!
//! ## Design Principles
//!
//! 1. **N-Player First**: Players 0 and 1 index the rows and columns of a
//!    payoff page; every further player is a digit of the page's slice
//!    index. No API assumes exactly two players.
//!
//! 2. **One Source of Truth**: `StrategySpace` owns every dimension. The
//!    payoff store's shape is always derived from it, and only the
//!    mutator may change it.
//!
//! 3. **All-or-Nothing**: Every operation validates before it writes. A
//!    call that returns `Err` leaves the game exactly as it was.
//!
//! ## Architecture
//!
//! - **Mixed-radix addressing**: the choices of players 2.. encode to a
//!   slice index with player 2 least significant. Encode and decode are
//!   direct arithmetic and form a bijection.
//!
//! - **Rebuild, don't patch**: structural changes build the new payoff
//!   buffer from scratch, mapping each new cell back to the old cell that
//!   holds the same profile.
//!
//! ## Modules
//!
//! - `core`: Players, profiles, strategy spaces, configuration, RNG
//! - `indexing`: Profile <-> slice index encoding
//! - `payoffs`: Dense payoff store and load/save buffers
//! - `analysis`: Best responses and pure equilibria
//! - `mutation`: Adding and removing strategies and players
//! - `game`: The `Game` facade and snapshots

pub mod error;
pub mod core;
pub mod indexing;
pub mod payoffs;
pub mod analysis;
pub mod mutation;
pub mod game;

// Re-export commonly used types
pub use crate::error::{GameError, RangeTarget, Result};

pub use crate::core::{
    GameConfig, GameRng, Player, PlayerConfig, PlayerId, Profile, ProfileIter, StrategySpace,
    MAX_PLAYERS,
};

pub use crate::indexing::{ProfileIndexer, SliceIndex};

pub use crate::payoffs::{Cell, Payoff, PayoffBuffer, PayoffStore, Shape};

pub use crate::analysis::{EquilibriumAnalyzer, EquilibriumSet};

pub use crate::mutation::GameMutator;

pub use crate::game::{Game, GameSnapshot};
