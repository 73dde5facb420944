//! Strategy profiles: one strategy choice per player.
//!
//! A `Profile` is only meaningful against a strategy space; it is validated
//! by the indexer before any lookup. `ProfileIter` enumerates the full
//! cross product of a space in ascending lexicographic order
//! `(player 0, player 1, player 2, ...)`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::PlayerId;

/// One strategy index per player.
///
/// SmallVec keeps games with up to 8 players off the heap.
///
/// ## Example
///
/// ```
/// use rust_simgame::core::{PlayerId, Profile};
///
/// let profile = Profile::new(&[1, 0, 2]);
/// assert_eq!(profile.strategy(PlayerId::new(2)), 2);
///
/// let deviation = profile.with_strategy(PlayerId::new(0), 0);
/// assert_eq!(deviation.as_slice(), &[0, 0, 2]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Profile {
    strategies: SmallVec<[usize; 8]>,
}

impl Profile {
    /// Create a profile from per-player strategy indices.
    #[must_use]
    pub fn new(strategies: &[usize]) -> Self {
        Self {
            strategies: SmallVec::from_slice(strategies),
        }
    }

    /// The all-zero profile for `player_count` players.
    #[must_use]
    pub fn zeros(player_count: usize) -> Self {
        Self {
            strategies: SmallVec::from_elem(0, player_count),
        }
    }

    /// Number of players the profile covers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// True if the profile covers no players.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Strategy chosen by `player`.
    ///
    /// Panics if the player is not covered by the profile.
    #[must_use]
    pub fn strategy(&self, player: PlayerId) -> usize {
        self.strategies[player.index()]
    }

    /// Copy of this profile with `player` switched to `strategy`.
    #[must_use]
    pub fn with_strategy(&self, player: PlayerId, strategy: usize) -> Self {
        let mut next = self.clone();
        next.strategies[player.index()] = strategy;
        next
    }

    /// The strategy indices as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.strategies
    }

    /// Strategy choices of the page players (players 2..).
    #[must_use]
    pub fn page_digits(&self) -> &[usize] {
        self.strategies.get(2..).unwrap_or(&[])
    }
}

impl From<&[usize]> for Profile {
    fn from(strategies: &[usize]) -> Self {
        Self::new(strategies)
    }
}

impl<const N: usize> From<[usize; N]> for Profile {
    fn from(strategies: [usize; N]) -> Self {
        Self::new(&strategies)
    }
}

impl std::ops::Deref for Profile {
    type Target = [usize];

    fn deref(&self) -> &[usize] {
        &self.strategies
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(")?;
        for (i, s) in self.strategies.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", s)?;
        }
        write!(f, ")")
    }
}

/// Lexicographic iterator over every profile of a space.
///
/// The last player's strategy varies fastest.
#[derive(Clone, Debug)]
pub struct ProfileIter {
    radices: SmallVec<[usize; 8]>,
    next: Option<Profile>,
}

impl ProfileIter {
    /// Iterate all profiles for the given per-player strategy counts.
    ///
    /// Yields nothing if any count is zero.
    #[must_use]
    pub fn new(strategy_counts: &[usize]) -> Self {
        let next = if strategy_counts.iter().all(|&k| k > 0) {
            Some(Profile::zeros(strategy_counts.len()))
        } else {
            None
        };
        Self {
            radices: SmallVec::from_slice(strategy_counts),
            next,
        }
    }
}

impl Iterator for ProfileIter {
    type Item = Profile;

    fn next(&mut self) -> Option<Profile> {
        let current = self.next.take()?;

        let mut successor = current.clone();
        for i in (0..self.radices.len()).rev() {
            successor.strategies[i] += 1;
            if successor.strategies[i] < self.radices[i] {
                self.next = Some(successor);
                break;
            }
            successor.strategies[i] = 0;
        }

        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_basics() {
        let profile = Profile::new(&[1, 0, 2, 3]);
        assert_eq!(profile.len(), 4);
        assert_eq!(profile.strategy(PlayerId::new(3)), 3);
        assert_eq!(profile.page_digits(), &[2, 3]);
        assert_eq!(format!("{}", profile), "(1, 0, 2, 3)");
    }

    #[test]
    fn test_two_player_profile_has_no_page_digits() {
        let profile = Profile::from([1, 1]);
        assert!(profile.page_digits().is_empty());
    }

    #[test]
    fn test_with_strategy_leaves_original() {
        let profile = Profile::new(&[0, 1]);
        let deviation = profile.with_strategy(PlayerId::COLUMN, 0);
        assert_eq!(profile.as_slice(), &[0, 1]);
        assert_eq!(deviation.as_slice(), &[0, 0]);
    }

    #[test]
    fn test_iter_lexicographic_order() {
        let profiles: Vec<Vec<usize>> = ProfileIter::new(&[2, 1, 3])
            .map(|p| p.as_slice().to_vec())
            .collect();
        assert_eq!(
            profiles,
            vec![
                vec![0, 0, 0],
                vec![0, 0, 1],
                vec![0, 0, 2],
                vec![1, 0, 0],
                vec![1, 0, 1],
                vec![1, 0, 2],
            ]
        );
    }

    #[test]
    fn test_iter_count_is_product() {
        assert_eq!(ProfileIter::new(&[3, 2, 4, 2]).count(), 48);
        assert_eq!(ProfileIter::new(&[1, 1]).count(), 1);
    }

    #[test]
    fn test_iter_with_zero_radix_is_empty() {
        assert_eq!(ProfileIter::new(&[2, 0]).count(), 0);
    }

    #[test]
    fn test_profile_ordering() {
        let a = Profile::new(&[0, 1]);
        let b = Profile::new(&[1, 0]);
        assert!(a < b);
    }
}
