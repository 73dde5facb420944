//! Pure-strategy best responses and equilibria.
//!
//! A player is best-responding at a profile when no unilateral deviation
//! to another of their strategies yields a strictly higher payoff. Ties
//! count as best responses. Payoffs are compared exactly.
//!
//! A pure equilibrium is a profile at which every player is
//! best-responding. Enumeration visits the full cross product of the
//! strategy space; with the `parallel` feature the per-profile checks run
//! on the rayon pool.

use rustc_hash::FxHashSet;

use crate::core::{PlayerId, Profile, StrategySpace};
use crate::error::Result;
use crate::payoffs::{Payoff, PayoffStore};

/// Set of pure equilibrium profiles. Iteration order is unspecified.
pub type EquilibriumSet = FxHashSet<Profile>;

/// Read-only queries over a game's payoffs.
#[derive(Clone, Copy, Debug)]
pub struct EquilibriumAnalyzer<'a> {
    space: &'a StrategySpace,
    store: &'a PayoffStore,
}

impl<'a> EquilibriumAnalyzer<'a> {
    /// Analyzer over a space and the store built from it.
    ///
    /// Fails with `ShapeMismatch` if `store` was built for another space.
    pub fn new(space: &'a StrategySpace, store: &'a PayoffStore) -> Result<Self> {
        store.check_space(space)?;
        Ok(Self { space, store })
    }

    /// Analyzer over a pair the caller keeps consistent.
    pub(crate) fn trusted(space: &'a StrategySpace, store: &'a PayoffStore) -> Self {
        debug_assert!(store.check_space(space).is_ok());
        Self { space, store }
    }

    /// For each player, whether their strategy in `profile` is a best
    /// response to the others' choices.
    pub fn is_best_response(&self, profile: &Profile) -> Result<Vec<bool>> {
        self.store.indexer().validate(profile)?;
        Ok(self
            .space
            .player_ids()
            .map(|player| self.best_responds(profile, player))
            .collect())
    }

    /// Whether every player best-responds at `profile`.
    pub fn is_equilibrium(&self, profile: &Profile) -> Result<bool> {
        self.store.indexer().validate(profile)?;
        Ok(self.space.player_ids().all(|player| self.best_responds(profile, player)))
    }

    /// Every strategy of `player` that maximizes their payoff against the
    /// other players' choices in `profile`, in ascending order.
    pub fn best_responses(&self, player: PlayerId, profile: &Profile) -> Result<Vec<usize>> {
        let count = self.space.strategy_count(player)?;
        self.store.indexer().validate(profile)?;

        let payoffs: Vec<Payoff> = (0..count)
            .map(|s| self.payoff(&profile.with_strategy(player, s), player))
            .collect();
        let best = payoffs.iter().copied().fold(Payoff::NEG_INFINITY, Payoff::max);

        Ok(payoffs
            .iter()
            .enumerate()
            .filter(|(_, &v)| v == best)
            .map(|(s, _)| s)
            .collect())
    }

    /// All pure equilibria of the game.
    #[must_use]
    pub fn pure_equilibria(&self) -> EquilibriumSet {
        let equilibria = self.collect_equilibria();
        log::debug!(
            "found {} pure equilibria among {} profiles",
            equilibria.len(),
            self.space.profile_count().unwrap_or(usize::MAX)
        );
        equilibria
    }

    #[cfg(not(feature = "parallel"))]
    fn collect_equilibria(&self) -> EquilibriumSet {
        self.space
            .profiles()
            .filter(|profile| self.all_best_respond(profile))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn collect_equilibria(&self) -> EquilibriumSet {
        use rayon::prelude::*;

        let profiles: Vec<Profile> = self.space.profiles().collect();
        profiles
            .into_par_iter()
            .filter(|profile| self.all_best_respond(profile))
            .collect()
    }

    fn all_best_respond(&self, profile: &Profile) -> bool {
        self.space.player_ids().all(|player| self.best_responds(profile, player))
    }

    /// `profile` must be valid.
    fn best_responds(&self, profile: &Profile, player: PlayerId) -> bool {
        let current = self.payoff(profile, player);
        let chosen = profile.strategy(player);
        let count = self.space.players()[player.index()].strategy_count();

        let mut deviation = profile.clone();
        (0..count).filter(|&s| s != chosen).all(|s| {
            deviation = deviation.with_strategy(player, s);
            self.payoff(&deviation, player) <= current
        })
    }

    fn payoff(&self, profile: &Profile, player: PlayerId) -> Payoff {
        self.store.payoff_unchecked(profile, player.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payoffs::PayoffBuffer;

    fn store_for(space: &StrategySpace, buffer: PayoffBuffer) -> PayoffStore {
        let mut store = PayoffStore::new(space).unwrap();
        store.bulk_load(buffer).unwrap();
        store
    }

    #[test]
    fn test_ties_are_best_responses() {
        let space = StrategySpace::new(&[2, 2]).unwrap();
        let store = store_for(
            &space,
            PayoffBuffer::from_bimatrix(vec![vec![1.0, 1.0], vec![1.0, 1.0]], vec![vec![0.0, 0.0], vec![0.0, 0.0]])
                .unwrap(),
        );
        let analyzer = EquilibriumAnalyzer::new(&space, &store).unwrap();

        assert_eq!(analyzer.is_best_response(&Profile::new(&[0, 1])).unwrap(), vec![true, true]);
        assert_eq!(analyzer.pure_equilibria().len(), 4);
    }

    #[test]
    fn test_prisoners_dilemma() {
        let space = StrategySpace::new(&[2, 2]).unwrap();
        let store = store_for(
            &space,
            PayoffBuffer::from_bimatrix(
                vec![vec![-1.0, -3.0], vec![0.0, -2.0]],
                vec![vec![-1.0, 0.0], vec![-3.0, -2.0]],
            )
            .unwrap(),
        );
        let analyzer = EquilibriumAnalyzer::new(&space, &store).unwrap();

        assert_eq!(analyzer.is_best_response(&Profile::new(&[0, 0])).unwrap(), vec![false, false]);
        assert!(analyzer.is_equilibrium(&Profile::new(&[1, 1])).unwrap());

        let equilibria = analyzer.pure_equilibria();
        assert_eq!(equilibria.len(), 1);
        assert!(equilibria.contains(&Profile::new(&[1, 1])));
    }

    #[test]
    fn test_matching_pennies_has_no_pure_equilibrium() {
        let space = StrategySpace::new(&[2, 2]).unwrap();
        let store = store_for(
            &space,
            PayoffBuffer::from_bimatrix(
                vec![vec![1.0, -1.0], vec![-1.0, 1.0]],
                vec![vec![-1.0, 1.0], vec![1.0, -1.0]],
            )
            .unwrap(),
        );
        assert!(EquilibriumAnalyzer::new(&space, &store).unwrap().pure_equilibria().is_empty());
    }

    #[test]
    fn test_best_responses_lists_all_maximizers() {
        let space = StrategySpace::new(&[3, 1]).unwrap();
        let store = store_for(
            &space,
            PayoffBuffer::from_bimatrix(vec![vec![2.0], vec![1.0], vec![2.0]], vec![vec![0.0], vec![0.0], vec![0.0]])
                .unwrap(),
        );
        let analyzer = EquilibriumAnalyzer::new(&space, &store).unwrap();

        let best = analyzer.best_responses(PlayerId::ROW, &Profile::new(&[1, 0])).unwrap();
        assert_eq!(best, vec![0, 2]);
        assert_eq!(analyzer.best_responses(PlayerId::COLUMN, &Profile::new(&[1, 0])).unwrap(), vec![0]);
    }

    #[test]
    fn test_page_player_deviation() {
        // Player 2 prefers page 1 whatever the others do.
        let space = StrategySpace::new(&[1, 1, 2]).unwrap();
        let store = store_for(
            &space,
            PayoffBuffer::from_nested(vec![
                vec![vec![vec![0.0, 0.0, 1.0]]],
                vec![vec![vec![0.0, 0.0, 2.0]]],
            ])
            .unwrap(),
        );
        let analyzer = EquilibriumAnalyzer::new(&space, &store).unwrap();

        assert_eq!(
            analyzer.is_best_response(&Profile::new(&[0, 0, 0])).unwrap(),
            vec![true, true, false]
        );
        let equilibria = analyzer.pure_equilibria();
        assert_eq!(equilibria.len(), 1);
        assert!(equilibria.contains(&Profile::new(&[0, 0, 1])));
    }

    #[test]
    fn test_invalid_profile_is_rejected() {
        let space = StrategySpace::new(&[2, 2]).unwrap();
        let store = PayoffStore::new(&space).unwrap();
        let analyzer = EquilibriumAnalyzer::new(&space, &store).unwrap();

        assert!(analyzer.is_best_response(&Profile::new(&[2, 0])).is_err());
        assert!(analyzer.is_best_response(&Profile::new(&[0, 0, 0])).is_err());
        assert!(analyzer.best_responses(PlayerId::new(5), &Profile::new(&[0, 0])).is_err());
    }

    #[test]
    fn test_new_rejects_mismatched_store() {
        let space = StrategySpace::new(&[3, 3]).unwrap();
        let store = PayoffStore::new(&StrategySpace::new(&[2, 2]).unwrap()).unwrap();
        assert!(matches!(
            EquilibriumAnalyzer::new(&space, &store).unwrap_err(),
            crate::error::GameError::ShapeMismatch { .. }
        ));
    }
}
