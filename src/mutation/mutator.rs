//! Structural changes to a game: adding and removing strategies and players.
//!
//! Each operation follows the same steps:
//! 1. Validate the request against the current space.
//! 2. Build the new `StrategySpace`.
//! 3. Rebuild the payoff store for the new space. Each new cell is mapped
//!    back to the old cell holding the same profile (under the old
//!    numbering), or left zero if the profile is new.
//! 4. Commit the new space.
//!
//! The store is rebuilt from scratch, so page order always matches what a
//! fresh `ProfileIndexer` over the new space produces. A step that fails
//! leaves both space and store untouched.

use crate::core::space::build_player;
use crate::core::{PlayerConfig, PlayerId, StrategySpace};
use crate::error::{GameError, Result};
use crate::payoffs::{Cell, PayoffStore};

/// The only component that changes a game's strategy space.
#[derive(Debug)]
pub struct GameMutator<'g> {
    space: &'g mut StrategySpace,
    store: &'g mut PayoffStore,
}

impl<'g> GameMutator<'g> {
    /// Mutator over a space and the store built from it.
    ///
    /// Fails with `ShapeMismatch` if `store` was built for another space.
    pub fn new(space: &'g mut StrategySpace, store: &'g mut PayoffStore) -> Result<Self> {
        store.check_space(space)?;
        Ok(Self { space, store })
    }

    /// Mutator over a pair the caller keeps consistent.
    pub(crate) fn trusted(space: &'g mut StrategySpace, store: &'g mut PayoffStore) -> Self {
        debug_assert!(store.check_space(space).is_ok());
        Self { space, store }
    }

    /// Append a new last strategy for `player` with all-zero payoffs.
    pub fn add_strategy(&mut self, player: PlayerId) -> Result<()> {
        let count = self.space.strategy_count(player)?;
        self.insert_strategy(player, count)
    }

    /// Insert a new strategy for `player` at position `at`.
    ///
    /// Strategies at `at` and above move up by one. Profiles using the new
    /// strategy get all-zero payoffs.
    pub fn insert_strategy(&mut self, player: PlayerId, at: usize) -> Result<()> {
        let count = self.space.strategy_count(player)?;
        if at > count {
            return Err(GameError::strategy_out_of_range(player, at, count + 1));
        }

        let mut next = self.space.clone();
        next.player_mut(player).insert_strategy(player, at);

        self.remap(next, player, |s| match s.cmp(&at) {
            std::cmp::Ordering::Less => Some(s),
            std::cmp::Ordering::Equal => None,
            std::cmp::Ordering::Greater => Some(s - 1),
        })?;

        log::debug!(
            "inserted strategy {} for {} ({} -> {} strategies)",
            at,
            player,
            count,
            count + 1
        );
        Ok(())
    }

    /// Remove strategy `strategy` of `player`, discarding every profile
    /// that uses it.
    ///
    /// Strategies above `strategy` move down by one; all surviving
    /// profiles keep their payoffs. Fails with `OutOfRange` for an invalid
    /// index and `InvalidStrategySpace` when it is the player's last
    /// strategy.
    pub fn remove_strategy(&mut self, player: PlayerId, strategy: usize) -> Result<()> {
        self.space.check_strategy(player, strategy)?;
        let count = self.space.strategy_count(player)?;
        if count <= 1 {
            return Err(GameError::invalid_space(format!(
                "cannot remove the last strategy of {}",
                player
            )));
        }

        let mut next = self.space.clone();
        next.player_mut(player).remove_strategy(strategy);

        self.remap(next, player, |s| Some(if s < strategy { s } else { s + 1 }))?;

        log::debug!(
            "removed strategy {} of {} ({} -> {} strategies)",
            strategy,
            player,
            count,
            count - 1
        );
        Ok(())
    }

    /// Append a new player as the most significant page digit.
    ///
    /// Each existing profile, extended with the new player's strategy 0,
    /// keeps its payoffs and gets payoff 0 for the new player. Every other
    /// new profile is all-zero. Returns the new player's ID.
    pub fn add_player(&mut self, config: &PlayerConfig) -> Result<PlayerId> {
        let old_count = self.space.player_count();
        let id = PlayerId::from_index(old_count)?;

        let mut next = self.space.clone();
        next.push_player(build_player(id, config)?);

        let old = self.store.indexer().clone();
        self.store.resize(&next, |indexer, cell| {
            let digits = indexer.decode(cell.page).ok()?;
            let (&newest, rest) = digits.split_last()?;
            (newest == 0).then(|| Cell::new(old.encode_digits(rest), cell.row, cell.col))
        })?;
        *self.space = next;

        log::debug!(
            "added {} with {} strategies ({} players)",
            id,
            config.strategy_count,
            old_count + 1
        );
        Ok(id)
    }

    /// Rebuild the store for `next`, where `player`'s strategies were
    /// renumbered by `translate` (new index -> old index, `None` for a
    /// strategy that did not exist), then commit `next`.
    fn remap<F>(&mut self, next: StrategySpace, player: PlayerId, translate: F) -> Result<()>
    where
        F: Fn(usize) -> Option<usize>,
    {
        let old = self.store.indexer().clone();
        self.store.resize(&next, |indexer, cell| match player.index() {
            0 => translate(cell.row).map(|row| Cell::new(cell.page, row, cell.col)),
            1 => translate(cell.col).map(|col| Cell::new(cell.page, cell.row, col)),
            x => {
                let mut digits = indexer.decode(cell.page).ok()?;
                digits[x - 2] = translate(digits[x - 2])?;
                Some(Cell::new(old.encode_digits(&digits), cell.row, cell.col))
            }
        })?;
        *self.space = next;
        Ok(())
    }
}
