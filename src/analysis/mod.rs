//! Equilibrium analysis over a game's payoffs.
//!
//! `EquilibriumAnalyzer` borrows a strategy space and its payoff store and
//! answers best-response and pure-equilibrium queries without mutating
//! either.

pub mod equilibrium;

pub use equilibrium::{EquilibriumAnalyzer, EquilibriumSet};
