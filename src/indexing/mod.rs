//! Profile addressing.
//!
//! `ProfileIndexer` maps the strategy choices of players 2.. to a single
//! slice index and back. Rebuild it from the `StrategySpace` after every
//! structural change.

pub mod indexer;

pub use indexer::{PageDigits, ProfileIndexer, SliceIndex};
