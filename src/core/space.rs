//! The strategy space: per-player strategy counts and names.
//!
//! `StrategySpace` is the single source of truth for the game's
//! dimensions. Every other component derives its shape from it, and only
//! the mutator may change it.

use std::borrow::Cow;

use rustc_hash::FxHashSet;
use serde::Serialize;

use super::config::{GameConfig, PlayerConfig};
use super::player::{default_strategy_name, Player, PlayerId};
use super::profile::ProfileIter;
use crate::error::{GameError, Result};

/// Ordered players of a game, with at least two players and at least one
/// strategy each.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StrategySpace {
    players: Vec<Player>,
}

impl StrategySpace {
    /// Build a space with default names from strategy counts.
    pub fn new(strategy_counts: &[usize]) -> Result<Self> {
        Self::from_config(&GameConfig::from_counts(strategy_counts))
    }

    /// Build and validate a space from a configuration.
    pub fn from_config(config: &GameConfig) -> Result<Self> {
        if config.players.len() < 2 {
            return Err(GameError::invalid_space(format!(
                "a game needs at least 2 players, got {}",
                config.players.len()
            )));
        }

        let players = config
            .players
            .iter()
            .enumerate()
            .map(|(i, p)| build_player(PlayerId::from_index(i)?, p))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { players })
    }

    /// Number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Iterate over all player IDs.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.players.len())
    }

    /// Get a player, failing if the ID is outside the space.
    pub fn player(&self, player: PlayerId) -> Result<&Player> {
        self.players
            .get(player.index())
            .ok_or_else(|| GameError::player_out_of_range(player, self.players.len()))
    }

    /// All players in position order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Strategy count of a player.
    pub fn strategy_count(&self, player: PlayerId) -> Result<usize> {
        self.player(player).map(Player::strategy_count)
    }

    /// Strategy counts in player order.
    #[must_use]
    pub fn strategy_counts(&self) -> Vec<usize> {
        self.players.iter().map(Player::strategy_count).collect()
    }

    /// True when every player has the same number of strategies.
    #[must_use]
    pub fn is_impartial(&self) -> bool {
        let first = self.players[0].strategy_count();
        self.players.iter().all(|p| p.strategy_count() == first)
    }

    /// Number of payoff pages: the product of the strategy counts of
    /// players 2.., or 1 for two-player games.
    ///
    /// `None` if the product overflows `usize`.
    #[must_use]
    pub fn page_count(&self) -> Option<usize> {
        self.players[2..]
            .iter()
            .try_fold(1usize, |acc, p| acc.checked_mul(p.strategy_count()))
    }

    /// Number of distinct profiles, `None` on overflow.
    #[must_use]
    pub fn profile_count(&self) -> Option<usize> {
        self.players
            .iter()
            .try_fold(1usize, |acc, p| acc.checked_mul(p.strategy_count()))
    }

    /// Lexicographic iterator over every profile of the space.
    #[must_use]
    pub fn profiles(&self) -> ProfileIter {
        ProfileIter::new(&self.strategy_counts())
    }

    /// Fail with `OutOfRange` unless `strategy` is a valid index for `player`.
    pub fn check_strategy(&self, player: PlayerId, strategy: usize) -> Result<()> {
        let count = self.strategy_count(player)?;
        if strategy < count {
            Ok(())
        } else {
            Err(GameError::strategy_out_of_range(player, strategy, count))
        }
    }

    /// Display name of a strategy: the configured name, or the default.
    pub fn strategy_name(&self, player: PlayerId, strategy: usize) -> Result<Cow<'_, str>> {
        self.check_strategy(player, strategy)?;
        let data = &self.players[player.index()];
        Ok(match data.custom_names() {
            Some(names) => Cow::Borrowed(names[strategy].as_str()),
            None => Cow::Owned(default_strategy_name(player, strategy, data.strategy_count())),
        })
    }

    /// Look up a strategy index by display name.
    ///
    /// Names are unique per player, so at most one strategy matches.
    pub fn strategy_index(&self, player: PlayerId, name: &str) -> Result<Option<usize>> {
        let count = self.strategy_count(player)?;
        for s in 0..count {
            if self.strategy_name(player, s)? == name {
                return Ok(Some(s));
            }
        }
        Ok(None)
    }

    /// The configuration that rebuilds this space.
    #[must_use]
    pub fn to_config(&self) -> GameConfig {
        GameConfig {
            players: self
                .players
                .iter()
                .map(|p| PlayerConfig {
                    strategy_count: p.strategy_count(),
                    rationality: p.rationality,
                    strategy_names: p.custom_names().map(<[String]>::to_vec),
                })
                .collect(),
        }
    }

    pub(crate) fn player_mut(&mut self, player: PlayerId) -> &mut Player {
        &mut self.players[player.index()]
    }

    pub(crate) fn push_player(&mut self, player: Player) {
        self.players.push(player);
    }
}

pub(crate) fn build_player(id: PlayerId, config: &PlayerConfig) -> Result<Player> {
    if config.strategy_count == 0 {
        return Err(GameError::invalid_space(format!(
            "{} must have at least 1 strategy",
            id
        )));
    }
    if let Some(names) = &config.strategy_names {
        if names.len() != config.strategy_count {
            return Err(GameError::invalid_space(format!(
                "{} has {} strategies but {} names",
                id,
                config.strategy_count,
                names.len()
            )));
        }
        let mut seen = FxHashSet::default();
        if let Some(duplicate) = names.iter().find(|name| !seen.insert(name.as_str())) {
            return Err(GameError::invalid_space(format!(
                "{} has two strategies named {:?}",
                id, duplicate
            )));
        }
    }
    Ok(Player::new(
        config.strategy_count,
        config.rationality,
        config.strategy_names.clone(),
    ))
}
