//! Game configuration types.
//!
//! Games are described at construction time by:
//! - `PlayerConfig`: strategy count, optional names, rationality level
//! - `GameConfig`: the ordered list of players
//!
//! Configs are plain data; `StrategySpace::from_config` validates them.

use serde::{Deserialize, Serialize};

/// Configuration for a single player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Number of strategies (must be at least 1).
    pub strategy_count: usize,

    /// Rationality level. Carried through saves, not used by any analysis.
    #[serde(default)]
    pub rationality: u8,

    /// Custom strategy names. Must have `strategy_count` entries when set.
    #[serde(default)]
    pub strategy_names: Option<Vec<String>>,
}

impl PlayerConfig {
    /// Create a player with `strategy_count` default-named strategies.
    pub fn new(strategy_count: usize) -> Self {
        Self {
            strategy_count,
            rationality: 0,
            strategy_names: None,
        }
    }

    /// Create a player whose strategy count is taken from its names.
    pub fn named<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        Self {
            strategy_count: names.len(),
            rationality: 0,
            strategy_names: Some(names),
        }
    }

    /// Set the rationality level.
    #[must_use]
    pub fn with_rationality(mut self, rationality: u8) -> Self {
        self.rationality = rationality;
        self
    }

    /// Set custom strategy names.
    #[must_use]
    pub fn with_names<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.strategy_names = Some(names.into_iter().map(Into::into).collect());
        self
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Players in position order.
    pub players: Vec<PlayerConfig>,
}

impl Default for GameConfig {
    /// Two players with two strategies each.
    fn default() -> Self {
        Self::uniform(2, 2)
    }
}

impl GameConfig {
    /// Create an empty configuration. Add players with `with_player`.
    pub fn new() -> Self {
        Self {
            players: Vec::new(),
        }
    }

    /// One default-named player per entry of `strategy_counts`.
    pub fn from_counts(strategy_counts: &[usize]) -> Self {
        Self {
            players: strategy_counts.iter().map(|&k| PlayerConfig::new(k)).collect(),
        }
    }

    /// `player_count` players with `strategy_count` strategies each.
    pub fn uniform(player_count: usize, strategy_count: usize) -> Self {
        Self {
            players: vec![PlayerConfig::new(strategy_count); player_count],
        }
    }

    /// Add a player.
    #[must_use]
    pub fn with_player(mut self, player: PlayerConfig) -> Self {
        self.players.push(player);
        self
    }

    /// Number of configured players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Strategy counts in player order.
    #[must_use]
    pub fn strategy_counts(&self) -> Vec<usize> {
        self.players.iter().map(|p| p.strategy_count).collect()
    }
}
