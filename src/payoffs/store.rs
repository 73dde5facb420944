//! Dense payoff storage for every profile of a game.
//!
//! The store is one contiguous `Vec<Payoff>` laid out
//! `[page][row][col][player]`: the slice index picks a page, player 0's
//! strategy a row, player 1's a column, and each cell holds the full
//! n-vector of payoffs. Its shape is always `Shape::of` the space it was
//! built from.
//!
//! Structural changes go through `resize`, which rebuilds the buffer from
//! scratch for the new space: every new cell is either copied from a source
//! cell the caller names or zero-filled. Nothing is patched in place.

use super::buffer::{PayoffBuffer, Shape};
use super::Payoff;
use crate::core::{PlayerId, Profile, StrategySpace};
use crate::error::{GameError, RangeTarget, Result};
use crate::indexing::{ProfileIndexer, SliceIndex};

/// Coordinates of one payoff entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub page: SliceIndex,
    pub row: usize,
    pub col: usize,
}

impl Cell {
    #[must_use]
    pub const fn new(page: SliceIndex, row: usize, col: usize) -> Self {
        Self { page, row, col }
    }
}

/// Payoff vectors for every profile, addressed through a `ProfileIndexer`.
#[derive(Clone, Debug, PartialEq)]
pub struct PayoffStore {
    indexer: ProfileIndexer,
    shape: Shape,
    data: Vec<Payoff>,
}

impl PayoffStore {
    /// All-zero store sized for `space`.
    pub fn new(space: &StrategySpace) -> Result<Self> {
        let indexer = ProfileIndexer::new(space)?;
        let shape = Shape::of(space)?;
        let data = PayoffBuffer::zeros(shape)?.into_parts().1;
        Ok(Self {
            indexer,
            shape,
            data,
        })
    }

    /// Store for `space` holding the payoffs of `buffer`.
    ///
    /// The buffer's shape must equal the one `space` requires. Nothing is
    /// allocated before the shapes are compared.
    pub fn with_payoffs(space: &StrategySpace, buffer: PayoffBuffer) -> Result<Self> {
        let indexer = ProfileIndexer::new(space)?;
        let shape = Shape::of(space)?;
        shape.expect(&buffer.shape())?;
        let (_, data) = buffer.into_parts();
        Ok(Self {
            indexer,
            shape,
            data,
        })
    }

    /// Fail with `ShapeMismatch` unless this store was built for `space`.
    pub fn check_space(&self, space: &StrategySpace) -> Result<()> {
        Shape::of(space)?.expect(&self.shape)?;
        let counts = space.strategy_counts();
        for (&expected, &actual) in counts.iter().zip(self.indexer.radices()) {
            if expected != actual {
                return Err(GameError::shape("strategy count", expected, actual));
            }
        }
        Ok(())
    }

    /// The indexer for the current space.
    #[must_use]
    pub fn indexer(&self) -> &ProfileIndexer {
        &self.indexer
    }

    /// Current dimensions.
    #[must_use]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Cell addressed by a profile, after validating it.
    pub fn cell(&self, profile: &Profile) -> Result<Cell> {
        let page = self.indexer.encode(profile)?;
        Ok(Cell::new(page, profile[0], profile[1]))
    }

    /// Payoff vector of a profile.
    pub fn get(&self, profile: &Profile) -> Result<&[Payoff]> {
        let cell = self.cell(profile)?;
        Ok(self.entry(cell))
    }

    /// Payoff of one player at a profile.
    ///
    /// The profile must already be validated.
    pub(crate) fn payoff_unchecked(&self, profile: &Profile, player: usize) -> Payoff {
        let page = self.indexer.encode_digits(profile.page_digits());
        self.data[self.offset(Cell::new(page, profile[0], profile[1])) + player]
    }

    /// Overwrite the payoff vector of a profile.
    ///
    /// `payoffs` must hold exactly one value per player.
    pub fn set(&mut self, profile: &Profile, payoffs: &[Payoff]) -> Result<()> {
        let cell = self.cell(profile)?;
        if payoffs.len() != self.shape.players {
            return Err(GameError::shape("payoff vector", self.shape.players, payoffs.len()));
        }
        let offset = self.offset(cell);
        self.data[offset..offset + payoffs.len()].copy_from_slice(payoffs);
        Ok(())
    }

    /// Replace every payoff with the contents of `buffer`.
    ///
    /// The buffer's shape must equal the store's exactly.
    pub fn bulk_load(&mut self, buffer: PayoffBuffer) -> Result<()> {
        self.shape.expect(&buffer.shape())?;
        let (_, data) = buffer.into_parts();
        if data.len() != self.data.len() {
            return Err(GameError::shape("payoff buffer length", self.data.len(), data.len()));
        }
        self.data = data;
        log::debug!("loaded payoffs with shape {}", self.shape);
        Ok(())
    }

    /// Copy the whole store into a buffer.
    #[must_use]
    pub fn to_buffer(&self) -> PayoffBuffer {
        PayoffBuffer::from_parts(self.shape, self.data.clone())
    }

    /// Rebuild the store for `new_space`.
    ///
    /// `source` maps each cell of the new space to the cell of the current
    /// space whose payoffs it inherits, or `None` for a zero-filled cell.
    /// The first `min(old, new)` payoffs of an inherited vector are copied.
    /// A source cell outside the current store is `OutOfRange`. On error
    /// the store is unchanged.
    pub fn resize<F>(&mut self, new_space: &StrategySpace, mut source: F) -> Result<()>
    where
        F: FnMut(&ProfileIndexer, Cell) -> Option<Cell>,
    {
        let indexer = ProfileIndexer::new(new_space)?;
        let shape = Shape::of(new_space)?;
        let mut data = PayoffBuffer::zeros(shape)?.into_parts().1;

        let carried = shape.players.min(self.shape.players);
        let mut copied = 0usize;
        for page in 0..shape.pages {
            for row in 0..shape.rows {
                for col in 0..shape.cols {
                    let target = Cell::new(page, row, col);
                    let Some(from) = source(&indexer, target) else {
                        continue;
                    };
                    self.check_cell(from)?;
                    let src = self.offset(from);
                    let dst = offset_in(&shape, target);
                    data[dst..dst + carried].copy_from_slice(&self.data[src..src + carried]);
                    copied += 1;
                }
            }
            log::trace!("rebuilt payoff page {}/{}", page + 1, shape.pages);
        }

        log::debug!(
            "resized payoff store {} -> {} ({} of {} cells carried over)",
            self.shape,
            shape,
            copied,
            shape.cell_count()
        );

        self.indexer = indexer;
        self.shape = shape;
        self.data = data;
        Ok(())
    }

    /// Fill every payoff from `value`, called in storage order.
    pub(crate) fn fill_with(&mut self, mut value: impl FnMut() -> Payoff) {
        self.data.iter_mut().for_each(|v| *v = value());
    }

    fn entry(&self, cell: Cell) -> &[Payoff] {
        let offset = self.offset(cell);
        &self.data[offset..offset + self.shape.players]
    }

    fn check_cell(&self, cell: Cell) -> Result<()> {
        if cell.page >= self.shape.pages {
            Err(GameError::OutOfRange {
                target: RangeTarget::Page,
                index: cell.page,
                bound: self.shape.pages,
            })
        } else if cell.row >= self.shape.rows {
            Err(GameError::strategy_out_of_range(PlayerId::ROW, cell.row, self.shape.rows))
        } else if cell.col >= self.shape.cols {
            Err(GameError::strategy_out_of_range(PlayerId::COLUMN, cell.col, self.shape.cols))
        } else {
            Ok(())
        }
    }

    fn offset(&self, cell: Cell) -> usize {
        offset_in(&self.shape, cell)
    }
}

fn offset_in(shape: &Shape, cell: Cell) -> usize {
    ((cell.page * shape.rows + cell.row) * shape.cols + cell.col) * shape.players
}
