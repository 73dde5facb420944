//! Error types for game construction, queries and mutations.
//!
//! Every fallible operation reports a contract violation: an index outside
//! the current strategy space, a payoff buffer or vector whose shape
//! disagrees with the space, a request that would leave the space itself
//! invalid, or a bad argument to a payoff generator. A failed call never
//! modifies the game.

use thiserror::Error;

use crate::core::PlayerId;

/// The kind of index that fell outside its bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RangeTarget {
    /// A player position.
    Player,
    /// A strategy of the given player.
    Strategy(PlayerId),
    /// A slice index selecting one payoff page.
    Page,
}

impl std::fmt::Display for RangeTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RangeTarget::Player => write!(f, "player"),
            RangeTarget::Strategy(player) => write!(f, "strategy of {}", player),
            RangeTarget::Page => write!(f, "slice index"),
        }
    }
}

/// Errors raised by the game core.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("{target} {index} is out of range (must be below {bound})")]
    OutOfRange {
        target: RangeTarget,
        index: usize,
        bound: usize,
    },

    #[error("shape mismatch in {context}: expected {expected}, found {actual}")]
    ShapeMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("invalid strategy space: {reason}")]
    InvalidStrategySpace {
        reason: String,
    },

    #[error("cannot draw payoffs from the empty range {start}..={end}")]
    EmptyPayoffRange {
        start: i32,
        end: i32,
    },

    #[error("failed to decode game snapshot: {0}")]
    Snapshot(#[from] bincode::Error),
}

impl GameError {
    pub(crate) fn player_out_of_range(player: PlayerId, player_count: usize) -> Self {
        GameError::OutOfRange {
            target: RangeTarget::Player,
            index: player.index(),
            bound: player_count,
        }
    }

    pub(crate) fn strategy_out_of_range(player: PlayerId, strategy: usize, count: usize) -> Self {
        GameError::OutOfRange {
            target: RangeTarget::Strategy(player),
            index: strategy,
            bound: count,
        }
    }

    pub(crate) fn shape(context: &'static str, expected: usize, actual: usize) -> Self {
        GameError::ShapeMismatch {
            context,
            expected,
            actual,
        }
    }

    pub(crate) fn invalid_space(reason: impl Into<String>) -> Self {
        GameError::InvalidStrategySpace {
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GameError>;
