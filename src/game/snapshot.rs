//! Saved game state.
//!
//! A `GameSnapshot` is everything needed to rebuild a game: the player
//! configuration and a full payoff buffer. Serializers write it in any
//! serde format; `Game::to_bytes` uses bincode.

use serde::{Deserialize, Serialize};

use crate::core::GameConfig;
use crate::payoffs::PayoffBuffer;

/// Players plus payoffs of a game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Player configuration, including strategy names and rationality.
    pub config: GameConfig,

    /// Every payoff, laid out `[page][row][col][player]`.
    pub payoffs: PayoffBuffer,
}
