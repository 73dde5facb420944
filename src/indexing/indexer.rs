//! Mixed-radix encoding between profiles and slice indices.
//!
//! Players 0 and 1 address a row and column inside a payoff page. The
//! choices of players 2..n-1 are the digits of a mixed-radix number whose
//! value is the page's slice index:
//!
//! ```text
//! index = c_2 + k_2 * c_3 + k_2 * k_3 * c_4 + ... + (k_2 * ... * k_{n-2}) * c_{n-1}
//! ```
//!
//! Player 2 is the least-significant digit. This is row-major array
//! indexing over heterogeneous radices, so encode and decode are a pair of
//! direct arithmetic passes and form a bijection on
//! `[0, k_2 * ... * k_{n-1})`.
//!
//! Impartial games (all counts equal) need no separate path: their place
//! values are powers of the common count, which the general table already
//! produces.

use smallvec::SmallVec;

use crate::core::{PlayerId, Profile, StrategySpace};
use crate::error::{GameError, Result};

/// Linear index of one payoff page.
pub type SliceIndex = usize;

/// Strategy choices of players 2.., least-significant first.
pub type PageDigits = SmallVec<[usize; 8]>;

/// Encoder/decoder for one snapshot of a strategy space.
///
/// The indexer copies the radices it needs, so it must be rebuilt whenever
/// the space changes.
///
/// ## Example
///
/// ```
/// use rust_simgame::core::{Profile, StrategySpace};
/// use rust_simgame::indexing::ProfileIndexer;
///
/// let space = StrategySpace::new(&[2, 2, 3, 2]).unwrap();
/// let indexer = ProfileIndexer::new(&space).unwrap();
///
/// // c_2 + 3 * c_3
/// assert_eq!(indexer.encode(&Profile::new(&[0, 1, 2, 1])).unwrap(), 5);
/// assert_eq!(indexer.decode(5).unwrap().as_slice(), &[2, 1]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileIndexer {
    /// Strategy count of every player.
    radices: SmallVec<[usize; 8]>,
    /// Place value of each page player, indexed from player 2.
    place_values: SmallVec<[usize; 8]>,
    page_count: usize,
}

impl ProfileIndexer {
    /// Build the place-value table for a space.
    ///
    /// Fails with `InvalidStrategySpace` if the page count overflows.
    pub fn new(space: &StrategySpace) -> Result<Self> {
        let radices: SmallVec<[usize; 8]> = space.strategy_counts().into_iter().collect();

        let mut place_values = SmallVec::with_capacity(radices.len().saturating_sub(2));
        let mut place = 1usize;
        for &radix in radices.iter().skip(2) {
            place_values.push(place);
            place = place.checked_mul(radix).ok_or_else(|| {
                GameError::invalid_space("number of payoff pages overflows usize")
            })?;
        }

        Ok(Self {
            radices,
            place_values,
            page_count: place,
        })
    }

    /// Number of players in the indexed space.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.radices.len()
    }

    /// Strategy count of each player.
    #[must_use]
    pub fn radices(&self) -> &[usize] {
        &self.radices
    }

    /// Place value of each page player (players 2..), in player order.
    #[must_use]
    pub fn place_values(&self) -> &[usize] {
        &self.place_values
    }

    /// Number of slice indices; 1 when there are no page players.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Fail unless `profile` has one valid strategy per player.
    pub fn validate(&self, profile: &Profile) -> Result<()> {
        if profile.len() != self.radices.len() {
            return Err(GameError::shape("profile length", self.radices.len(), profile.len()));
        }
        for (i, (&s, &k)) in profile.iter().zip(self.radices.iter()).enumerate() {
            if s >= k {
                return Err(GameError::strategy_out_of_range(PlayerId::from_index(i)?, s, k));
            }
        }
        Ok(())
    }

    /// Slice index of a full profile, after validating it.
    pub fn encode(&self, profile: &Profile) -> Result<SliceIndex> {
        self.validate(profile)?;
        Ok(self.encode_digits(profile.page_digits()))
    }

    /// Slice index of page digits (players 2.., in player order).
    ///
    /// Digits are trusted to be in range; callers validate first.
    #[must_use]
    pub fn encode_digits(&self, digits: &[usize]) -> SliceIndex {
        debug_assert_eq!(digits.len(), self.place_values.len());
        digits
            .iter()
            .zip(self.place_values.iter())
            .map(|(&digit, &place)| digit * place)
            .sum()
    }

    /// Page digits (players 2.., in player order) of a slice index.
    pub fn decode(&self, index: SliceIndex) -> Result<PageDigits> {
        if index >= self.page_count {
            return Err(GameError::OutOfRange {
                target: crate::error::RangeTarget::Page,
                index,
                bound: self.page_count,
            });
        }

        let mut digits: PageDigits = SmallVec::from_elem(0, self.place_values.len());
        let mut rest = index;
        for (i, &radix) in self.radices.iter().skip(2).enumerate() {
            digits[i] = rest % radix;
            rest /= radix;
        }
        debug_assert_eq!(rest, 0);
        Ok(digits)
    }

    /// Rebuild a full profile from a slice index plus row and column choices.
    pub fn profile_at(&self, index: SliceIndex, row: usize, col: usize) -> Result<Profile> {
        let digits = self.decode(index)?;
        let mut strategies: SmallVec<[usize; 8]> = SmallVec::with_capacity(self.radices.len());
        strategies.push(row);
        strategies.push(col);
        strategies.extend_from_slice(&digits);
        let profile = Profile::new(&strategies);
        self.validate(&profile)?;
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indexer(counts: &[usize]) -> ProfileIndexer {
        ProfileIndexer::new(&StrategySpace::new(counts).unwrap()).unwrap()
    }

    #[test]
    fn test_two_players_single_page() {
        let idx = indexer(&[3, 4]);
        assert_eq!(idx.page_count(), 1);
        assert!(idx.place_values().is_empty());
        assert_eq!(idx.encode(&Profile::new(&[2, 3])).unwrap(), 0);
        assert!(idx.decode(0).unwrap().is_empty());
    }

    #[test]
    fn test_place_values() {
        let idx = indexer(&[2, 2, 3, 4, 5]);
        assert_eq!(idx.place_values(), &[1, 3, 12]);
        assert_eq!(idx.page_count(), 60);
    }

    #[test]
    fn test_player_two_is_least_significant() {
        let idx = indexer(&[2, 2, 3, 2]);
        assert_eq!(idx.encode(&Profile::new(&[0, 0, 1, 0])).unwrap(), 1);
        assert_eq!(idx.encode(&Profile::new(&[0, 0, 0, 1])).unwrap(), 3);
        assert_eq!(idx.encode(&Profile::new(&[1, 1, 2, 1])).unwrap(), 5);
    }

    #[test]
    fn test_row_and_col_do_not_affect_index() {
        let idx = indexer(&[3, 3, 2, 2]);
        let a = idx.encode(&Profile::new(&[0, 0, 1, 1])).unwrap();
        let b = idx.encode(&Profile::new(&[2, 1, 1, 1])).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_radix_one_digit_is_inert() {
        let with = indexer(&[2, 2, 3, 1, 2]);
        let without = indexer(&[2, 2, 3, 2]);
        assert_eq!(with.page_count(), without.page_count());
        for c2 in 0..3 {
            for c4 in 0..2 {
                assert_eq!(
                    with.encode(&Profile::new(&[0, 0, c2, 0, c4])).unwrap(),
                    without.encode(&Profile::new(&[0, 0, c2, c4])).unwrap()
                );
            }
        }
    }

    #[test]
    fn test_uniform_place_values_are_powers() {
        let idx = indexer(&[3, 3, 3, 3, 3]);
        assert_eq!(idx.place_values(), &[1, 3, 9]);
    }

    #[test]
    fn test_decode_inverts_encode() {
        let idx = indexer(&[2, 3, 4, 1, 3]);
        for index in 0..idx.page_count() {
            let digits = idx.decode(index).unwrap();
            assert_eq!(idx.encode_digits(&digits), index);
        }
    }

    #[test]
    fn test_decode_out_of_range() {
        let idx = indexer(&[2, 2, 2]);
        let err = idx.decode(2).unwrap_err();
        assert!(matches!(err, GameError::OutOfRange { index: 2, bound: 2, .. }));
    }

    #[test]
    fn test_encode_rejects_bad_profiles() {
        let idx = indexer(&[2, 2, 2]);
        assert!(matches!(
            idx.encode(&Profile::new(&[0, 0])).unwrap_err(),
            GameError::ShapeMismatch { expected: 3, actual: 2, .. }
        ));
        assert!(matches!(
            idx.encode(&Profile::new(&[0, 2, 0])).unwrap_err(),
            GameError::OutOfRange { index: 2, bound: 2, .. }
        ));
    }

    #[test]
    fn test_profile_at() {
        let idx = indexer(&[2, 3, 2, 3]);
        let profile = idx.profile_at(5, 1, 2).unwrap();
        assert_eq!(profile.as_slice(), &[1, 2, 1, 2]);
        assert!(idx.profile_at(0, 2, 0).is_err());
    }

    #[test]
    fn test_overflow_is_rejected() {
        let space = StrategySpace::new(&[1, 1, usize::MAX, 3]).unwrap();
        assert!(matches!(
            ProfileIndexer::new(&space).unwrap_err(),
            GameError::InvalidStrategySpace { .. }
        ));
    }
}
