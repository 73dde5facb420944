//! Player identification and per-player strategy data.
//!
//! ## PlayerId
//!
//! Type-safe player position supporting 2-255 players.
//!
//! ## Player
//!
//! A player's strategy count, optional strategy names and the
//! (unused) rationality level carried over from saved games.

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

/// Largest supported number of players.
pub const MAX_PLAYERS: usize = u8::MAX as usize;

/// Player identifier supporting up to 255 players.
///
/// Player indices are 0-based. Players 0 and 1 are the row and column
/// axes of every payoff page; players 2.. select the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// The row player.
    pub const ROW: PlayerId = PlayerId(0);

    /// The column player.
    pub const COLUMN: PlayerId = PlayerId(1);

    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// The player at position `index`.
    ///
    /// Fails with `InvalidStrategySpace` once `index` reaches `MAX_PLAYERS`.
    pub fn from_index(index: usize) -> Result<Self> {
        u8::try_from(index)
            .ok()
            .filter(|_| index < MAX_PLAYERS)
            .map(PlayerId)
            .ok_or_else(|| {
                GameError::invalid_space(format!(
                    "at most {} players supported, got player index {}",
                    MAX_PLAYERS, index
                ))
            })
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// True for players 2.., whose strategies select a payoff page.
    #[must_use]
    pub const fn is_page_player(self) -> bool {
        self.0 >= 2
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    ///
    /// ```
    /// use rust_simgame::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(players, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count.min(MAX_PLAYERS)).filter_map(|i| u8::try_from(i).ok().map(PlayerId))
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// One player of a simultaneous game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    strategy_count: usize,

    /// Rationality level from saved games. Stored, never interpreted.
    pub rationality: u8,

    /// Custom strategy names. `None` means default names are generated.
    names: Option<Vec<String>>,
}

impl Player {
    pub(crate) fn new(strategy_count: usize, rationality: u8, names: Option<Vec<String>>) -> Self {
        debug_assert!(strategy_count >= 1);
        debug_assert!(names.as_ref().map_or(true, |n| n.len() == strategy_count));
        Self {
            strategy_count,
            rationality,
            names,
        }
    }

    /// Number of strategies available to this player.
    #[must_use]
    pub fn strategy_count(&self) -> usize {
        self.strategy_count
    }

    /// Custom strategy names, if any were configured.
    #[must_use]
    pub fn custom_names(&self) -> Option<&[String]> {
        self.names.as_deref()
    }

    /// Insert a strategy slot at `at`, shifting later strategies up by one.
    ///
    /// A custom name list gets the default name for the new position, with
    /// a `#n` suffix if a strategy already carries that name.
    pub(crate) fn insert_strategy(&mut self, id: PlayerId, at: usize) {
        self.strategy_count += 1;
        let count = self.strategy_count;
        if let Some(names) = self.names.as_mut() {
            let name = unused_name(names, default_strategy_name(id, at, count));
            names.insert(at, name);
        }
    }

    /// Remove strategy `at`, shifting later strategies down by one.
    pub(crate) fn remove_strategy(&mut self, at: usize) {
        debug_assert!(self.strategy_count > 1);
        self.strategy_count -= 1;
        if let Some(names) = self.names.as_mut() {
            names.remove(at);
        }
    }
}

fn unused_name(names: &[String], base: String) -> String {
    let mut name = base.clone();
    let mut n = 2usize;
    while names.contains(&name) {
        name = format!("{}#{}", base, n);
        n += 1;
    }
    name
}

/// The generated display name of `strategy` for a player with `count` strategies.
///
/// The first and last strategies get edge names (`U`/`D` for the row
/// player, `L`/`R` for everyone else); interior strategies are numbered.
///
/// ```
/// use rust_simgame::core::{default_strategy_name, PlayerId};
///
/// assert_eq!(default_strategy_name(PlayerId::new(0), 1, 3), "M1");
/// assert_eq!(default_strategy_name(PlayerId::new(1), 2, 3), "R");
/// assert_eq!(default_strategy_name(PlayerId::new(3), 0, 2), "L(3)");
/// ```
#[must_use]
pub fn default_strategy_name(player: PlayerId, strategy: usize, count: usize) -> String {
    let last = strategy + 1 == count && strategy > 0;
    match player.index() {
        0 if strategy == 0 => "U".to_string(),
        0 if last => "D".to_string(),
        0 => format!("M{}", strategy),
        1 if strategy == 0 => "L".to_string(),
        1 if last => "R".to_string(),
        1 => format!("C{}", strategy),
        x if strategy == 0 => format!("L({})", x),
        x if last => format!("R({})", x),
        x => format!("C({}, {})", x, strategy),
    }
}
