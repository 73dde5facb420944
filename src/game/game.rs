//! The game: a strategy space and the payoff store shaped by it.
//!
//! `Game` is the query and mutation API drivers use. It owns both halves
//! of the model, routes structural changes through `GameMutator`, and
//! caches the pure-equilibrium set until the next write.

use std::cell::OnceCell;
use std::ops::RangeInclusive;

use crate::analysis::{EquilibriumAnalyzer, EquilibriumSet};
use crate::core::{GameConfig, GameRng, PlayerConfig, PlayerId, Profile, ProfileIter, StrategySpace};
use crate::error::Result;
use crate::mutation::GameMutator;
use crate::payoffs::{Payoff, PayoffBuffer, PayoffStore, Shape};

use super::snapshot::GameSnapshot;

/// A finite n-player simultaneous game.
///
/// ## Example
///
/// ```
/// use rust_simgame::{Game, PayoffBuffer, Profile};
///
/// let mut game = Game::new(&[2, 2]).unwrap();
/// game.enter_payoffs(
///     PayoffBuffer::from_bimatrix(
///         vec![vec![3.0, 0.0], vec![5.0, 1.0]],
///         vec![vec![3.0, 0.0], vec![5.0, 1.0]],
///     )
///     .unwrap(),
/// )
/// .unwrap();
///
/// let profile = Profile::new(&[1, 0]);
/// assert_eq!(game.get_payoff(&profile).unwrap(), &[5.0, 5.0]);
/// assert_eq!(game.is_best_response(&profile).unwrap(), vec![true, true]);
/// assert!(game.pure_equilibria().contains(&profile));
/// ```
#[derive(Clone, Debug)]
pub struct Game {
    space: StrategySpace,
    store: PayoffStore,
    equilibria: OnceCell<EquilibriumSet>,
}

impl Game {
    /// New game with default-named strategies and all-zero payoffs.
    pub fn new(strategy_counts: &[usize]) -> Result<Self> {
        Self::from_config(&GameConfig::from_counts(strategy_counts))
    }

    /// New game from a configuration, with all-zero payoffs.
    pub fn from_config(config: &GameConfig) -> Result<Self> {
        let space = StrategySpace::from_config(config)?;
        let store = PayoffStore::new(&space)?;
        Ok(Self::assemble(space, store))
    }

    /// Rebuild a game from a snapshot, validating players and payoffs.
    ///
    /// The payoff shape is checked against the players before any store
    /// is allocated.
    pub fn from_snapshot(snapshot: GameSnapshot) -> Result<Self> {
        let space = StrategySpace::from_config(&snapshot.config)?;
        let store = PayoffStore::with_payoffs(&space, snapshot.payoffs)?;
        Ok(Self::assemble(space, store))
    }

    /// Decode a game saved with `to_bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let snapshot: GameSnapshot = bincode::deserialize(bytes)?;
        Self::from_snapshot(snapshot)
    }

    // === Inspection ===

    /// The strategy space.
    #[must_use]
    pub fn space(&self) -> &StrategySpace {
        &self.space
    }

    /// Number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.space.player_count()
    }

    /// Strategy count of a player.
    pub fn strategy_count(&self, player: PlayerId) -> Result<usize> {
        self.space.strategy_count(player)
    }

    /// Dimensions of the payoff store.
    #[must_use]
    pub fn shape(&self) -> Shape {
        self.store.shape()
    }

    /// The payoff store.
    #[must_use]
    pub fn store(&self) -> &PayoffStore {
        &self.store
    }

    /// Lexicographic iterator over every profile.
    #[must_use]
    pub fn profiles(&self) -> ProfileIter {
        self.space.profiles()
    }

    // === Payoffs ===

    /// Replace every payoff. The buffer's shape must match the game's.
    pub fn enter_payoffs(&mut self, buffer: PayoffBuffer) -> Result<()> {
        self.store.bulk_load(buffer)?;
        self.invalidate();
        Ok(())
    }

    /// Copy of every payoff, for savers.
    #[must_use]
    pub fn payoffs(&self) -> PayoffBuffer {
        self.store.to_buffer()
    }

    /// Payoff vector of a profile.
    pub fn get_payoff(&self, profile: &Profile) -> Result<&[Payoff]> {
        self.store.get(profile)
    }

    /// Overwrite the payoff vector of a profile.
    pub fn set_payoff(&mut self, profile: &Profile, payoffs: &[Payoff]) -> Result<()> {
        self.store.set(profile, payoffs)?;
        self.invalidate();
        Ok(())
    }

    /// Fill every payoff with integer values drawn from `range`.
    ///
    /// Fails with `EmptyPayoffRange`, leaving the game untouched, if
    /// `range` is empty.
    pub fn randomize_payoffs(
        &mut self,
        rng: &mut GameRng,
        range: RangeInclusive<i32>,
    ) -> Result<()> {
        let sample = rng.payoff_sampler(range)?;
        self.store.fill_with(sample);
        self.invalidate();
        Ok(())
    }

    // === Analysis ===

    /// Analyzer borrowing this game.
    #[must_use]
    pub fn analyzer(&self) -> EquilibriumAnalyzer<'_> {
        EquilibriumAnalyzer::trusted(&self.space, &self.store)
    }

    /// Per-player best-response flags at `profile`.
    pub fn is_best_response(&self, profile: &Profile) -> Result<Vec<bool>> {
        self.analyzer().is_best_response(profile)
    }

    /// Strategies of `player` maximizing their payoff against `profile`.
    pub fn best_responses(&self, player: PlayerId, profile: &Profile) -> Result<Vec<usize>> {
        self.analyzer().best_responses(player, profile)
    }

    /// Whether `profile` is a pure equilibrium.
    pub fn is_equilibrium(&self, profile: &Profile) -> Result<bool> {
        self.analyzer().is_equilibrium(profile)
    }

    /// All pure equilibria, computed on first use after any change.
    pub fn pure_equilibria(&self) -> &EquilibriumSet {
        self.equilibria.get_or_init(|| self.analyzer().pure_equilibria())
    }

    // === Mutation ===

    /// Append a strategy for `player` with all-zero payoffs.
    pub fn add_strategy(&mut self, player: PlayerId) -> Result<()> {
        self.mutator().add_strategy(player)?;
        self.invalidate();
        Ok(())
    }

    /// Insert a strategy for `player` at position `at`.
    pub fn insert_strategy(&mut self, player: PlayerId, at: usize) -> Result<()> {
        self.mutator().insert_strategy(player, at)?;
        self.invalidate();
        Ok(())
    }

    /// Remove strategy `strategy` of `player`.
    pub fn remove_strategy(&mut self, player: PlayerId, strategy: usize) -> Result<()> {
        self.mutator().remove_strategy(player, strategy)?;
        self.invalidate();
        Ok(())
    }

    /// Append a player; returns its ID.
    pub fn add_player(&mut self, config: &PlayerConfig) -> Result<PlayerId> {
        let id = self.mutator().add_player(config)?;
        self.invalidate();
        Ok(id)
    }

    // === Saving ===

    /// Players and payoffs, for serializers.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            config: self.space.to_config(),
            payoffs: self.payoffs(),
        }
    }

    /// Encode the snapshot with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(&self.snapshot())?)
    }

    fn mutator(&mut self) -> GameMutator<'_> {
        GameMutator::trusted(&mut self.space, &mut self.store)
    }

    fn assemble(space: StrategySpace, store: PayoffStore) -> Self {
        log::debug!(
            "created game with strategy counts {:?} (payoff shape {})",
            space.strategy_counts(),
            store.shape()
        );
        Self {
            space,
            store,
            equilibria: OnceCell::new(),
        }
    }

    fn invalidate(&mut self) {
        if self.equilibria.take().is_some() {
            log::trace!("dropped cached pure equilibria");
        }
    }
}
