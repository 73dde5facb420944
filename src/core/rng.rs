//! Deterministic random number generation for generated games.
//!
//! Same seed, same payoffs: benches and property tests rely on
//! `GameRng` to build reproducible random games.
//!
//! ```
//! use rust_simgame::core::GameRng;
//!
//! let mut a = GameRng::new(7);
//! let mut b = GameRng::new(7);
//! assert_eq!(a.gen_payoff(-5..=5).unwrap(), b.gen_payoff(-5..=5).unwrap());
//! assert!(a.gen_payoff(5..=3).is_err());
//! ```

use std::ops::RangeInclusive;

use rand::distributions::{Distribution, Uniform};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::error::{GameError, Result};
use crate::payoffs::Payoff;

/// Deterministic RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Fork an independent, deterministic stream.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self
            .seed
            .wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self::new(fork_seed)
    }

    /// An integer-valued payoff drawn uniformly from `range`.
    ///
    /// Integer values keep ties (and therefore weak best responses) common.
    pub fn gen_payoff(&mut self, range: RangeInclusive<i32>) -> Result<Payoff> {
        let mut sample = self.payoff_sampler(range)?;
        Ok(sample())
    }

    /// Repeated draws from `range` off this stream.
    ///
    /// Fails with `EmptyPayoffRange` before drawing anything.
    pub(crate) fn payoff_sampler(
        &mut self,
        range: RangeInclusive<i32>,
    ) -> Result<impl FnMut() -> Payoff + '_> {
        if range.is_empty() {
            return Err(GameError::EmptyPayoffRange {
                start: *range.start(),
                end: *range.end(),
            });
        }
        let dist = Uniform::new_inclusive(*range.start(), *range.end());
        let inner = &mut self.inner;
        Ok(move || Payoff::from(dist.sample(&mut *inner)))
    }
}
