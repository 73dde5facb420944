//! Structural game mutations.
//!
//! `GameMutator` adds and removes strategies (and adds players), keeping
//! the payoff store's shape equal to the strategy space's at every commit.

pub mod mutator;

pub use mutator::GameMutator;
