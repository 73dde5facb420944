//! Dense payoff buffers exchanged with loaders and savers.
//!
//! A `PayoffBuffer` is a fully materialized copy of a payoff store: its
//! `Shape` plus a flat row-major vector laid out
//! `[page][row][col][player]`. Loaders build one (from nested vectors, or
//! from one matrix stack per player) and hand it to `Game::enter_payoffs`;
//! savers get one back from `Game::payoffs`.

use serde::{Deserialize, Serialize};

use super::Payoff;
use crate::core::{PlayerId, StrategySpace};
use crate::error::{GameError, Result};

/// Dimensions of a payoff store: `(pages, rows, cols, players)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    /// Number of slice indices (product of counts of players 2..).
    pub pages: usize,
    /// Strategy count of player 0.
    pub rows: usize,
    /// Strategy count of player 1.
    pub cols: usize,
    /// Payoffs per entry (the player count).
    pub players: usize,
}

/// Largest number of payoffs a single buffer can hold.
const MAX_PAYOFFS: usize = isize::MAX as usize / std::mem::size_of::<Payoff>();

impl Shape {
    /// The shape a space requires.
    ///
    /// Fails with `InvalidStrategySpace` if the buffer would be too large
    /// to allocate.
    pub fn of(space: &StrategySpace) -> Result<Self> {
        let counts = space.strategy_counts();
        let shape = Self {
            pages: space
                .page_count()
                .ok_or_else(|| GameError::invalid_space("number of payoff pages overflows usize"))?,
            rows: counts[0],
            cols: counts[1],
            players: counts.len(),
        };
        shape.checked_len()?;
        Ok(shape)
    }

    /// Total number of payoff values.
    ///
    /// `None` if the count overflows `usize` or the buffer would exceed
    /// `isize::MAX` bytes.
    #[must_use]
    pub fn len(&self) -> Option<usize> {
        self.pages
            .checked_mul(self.rows)?
            .checked_mul(self.cols)?
            .checked_mul(self.players)
            .filter(|&len| len <= MAX_PAYOFFS)
    }

    fn checked_len(&self) -> Result<usize> {
        self.len().ok_or_else(|| {
            GameError::invalid_space(format!("a {} payoff buffer is too large to allocate", self))
        })
    }

    /// Number of `(page, row, col)` cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.pages.saturating_mul(self.rows).saturating_mul(self.cols)
    }

    /// Fail with `ShapeMismatch` on the first dimension that differs.
    pub fn expect(&self, actual: &Shape) -> Result<()> {
        let dims = [
            ("payoff pages", self.pages, actual.pages),
            ("payoff rows", self.rows, actual.rows),
            ("payoff columns", self.cols, actual.cols),
            ("payoffs per entry", self.players, actual.players),
        ];
        for (context, expected, found) in dims {
            if expected != found {
                return Err(GameError::shape(context, expected, found));
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}x{}x{}", self.pages, self.rows, self.cols, self.players)
    }
}

/// Shape-tagged dense payoff data.
///
/// The data length always equals `shape.len()`; deserialization checks it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPayoffBuffer")]
pub struct PayoffBuffer {
    shape: Shape,
    data: Vec<Payoff>,
}

#[derive(Deserialize)]
struct RawPayoffBuffer {
    shape: Shape,
    data: Vec<Payoff>,
}

impl TryFrom<RawPayoffBuffer> for PayoffBuffer {
    type Error = GameError;

    fn try_from(raw: RawPayoffBuffer) -> Result<Self> {
        Self::new(raw.shape, raw.data)
    }
}

impl PayoffBuffer {
    /// Wrap flat `[page][row][col][player]` data.
    pub fn new(shape: Shape, data: Vec<Payoff>) -> Result<Self> {
        let expected = shape.checked_len()?;
        if data.len() != expected {
            return Err(GameError::shape("payoff buffer length", expected, data.len()));
        }
        Ok(Self { shape, data })
    }

    /// All-zero buffer of the given shape.
    ///
    /// Fails with `InvalidStrategySpace` instead of aborting when the
    /// allocation cannot be satisfied.
    pub fn zeros(shape: Shape) -> Result<Self> {
        let len = shape.checked_len()?;
        let mut data = Vec::new();
        data.try_reserve_exact(len).map_err(|_| {
            GameError::invalid_space(format!("cannot allocate a {} payoff buffer", shape))
        })?;
        data.resize(len, 0.0);
        Ok(Self { shape, data })
    }

    /// Build from `pages[page][row][col][player]`.
    ///
    /// Every page, row and entry must have the same length as the first.
    pub fn from_nested(pages: Vec<Vec<Vec<Vec<Payoff>>>>) -> Result<Self> {
        let rows = pages.first().map_or(0, Vec::len);
        let cols = pages.first().and_then(|p| p.first()).map_or(0, Vec::len);
        let players = pages
            .first()
            .and_then(|p| p.first())
            .and_then(|r| r.first())
            .map_or(0, Vec::len);
        let shape = Shape {
            pages: pages.len(),
            rows,
            cols,
            players,
        };

        let mut data = Vec::new();
        for page in pages {
            if page.len() != rows {
                return Err(GameError::shape("payoff rows", rows, page.len()));
            }
            for row in page {
                if row.len() != cols {
                    return Err(GameError::shape("payoff columns", cols, row.len()));
                }
                for entry in row {
                    if entry.len() != players {
                        return Err(GameError::shape("payoffs per entry", players, entry.len()));
                    }
                    data.extend(entry);
                }
            }
        }

        Self::new(shape, data)
    }

    /// Build from one matrix stack per player: `per_player[player][page][row][col]`.
    pub fn from_player_matrices(per_player: Vec<Vec<Vec<Vec<Payoff>>>>) -> Result<Self> {
        let players = per_player.len();
        let pages = per_player.first().map_or(0, Vec::len);
        let rows = per_player.first().and_then(|m| m.first()).map_or(0, Vec::len);
        let cols = per_player
            .first()
            .and_then(|m| m.first())
            .and_then(|p| p.first())
            .map_or(0, Vec::len);
        let shape = Shape {
            pages,
            rows,
            cols,
            players,
        };

        let mut buffer = Self::zeros(shape)?;
        for (x, stack) in per_player.iter().enumerate() {
            if stack.len() != pages {
                return Err(GameError::shape("payoff pages", pages, stack.len()));
            }
            for (m, page) in stack.iter().enumerate() {
                if page.len() != rows {
                    return Err(GameError::shape("payoff rows", rows, page.len()));
                }
                for (i, row) in page.iter().enumerate() {
                    if row.len() != cols {
                        return Err(GameError::shape("payoff columns", cols, row.len()));
                    }
                    for (j, &value) in row.iter().enumerate() {
                        let offset = buffer.offset(m, i, j) + x;
                        buffer.data[offset] = value;
                    }
                }
            }
        }
        Ok(buffer)
    }

    /// Two-player game from the row player's and column player's matrices.
    pub fn from_bimatrix(row_payoffs: Vec<Vec<Payoff>>, col_payoffs: Vec<Vec<Payoff>>) -> Result<Self> {
        Self::from_player_matrices(vec![vec![row_payoffs], vec![col_payoffs]])
    }

    /// Dimensions of the buffer.
    #[must_use]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Flat `[page][row][col][player]` data.
    #[must_use]
    pub fn as_slice(&self) -> &[Payoff] {
        &self.data
    }

    /// Payoff vector of one cell. Panics if the cell is outside the shape.
    #[must_use]
    pub fn entry(&self, page: usize, row: usize, col: usize) -> &[Payoff] {
        let offset = self.offset(page, row, col);
        &self.data[offset..offset + self.shape.players]
    }

    /// Nested `[page][row][col][player]` copy.
    #[must_use]
    pub fn to_nested(&self) -> Vec<Vec<Vec<Vec<Payoff>>>> {
        (0..self.shape.pages)
            .map(|m| {
                (0..self.shape.rows)
                    .map(|i| (0..self.shape.cols).map(|j| self.entry(m, i, j).to_vec()).collect())
                    .collect()
            })
            .collect()
    }

    /// One player's payoffs as `[page][row][col]`.
    pub fn player_matrix(&self, player: PlayerId) -> Result<Vec<Vec<Vec<Payoff>>>> {
        let x = player.index();
        if x >= self.shape.players {
            return Err(GameError::player_out_of_range(player, self.shape.players));
        }
        Ok((0..self.shape.pages)
            .map(|m| {
                (0..self.shape.rows)
                    .map(|i| (0..self.shape.cols).map(|j| self.entry(m, i, j)[x]).collect())
                    .collect()
            })
            .collect())
    }

    /// Wrap data already known to match `shape`.
    pub(crate) fn from_parts(shape: Shape, data: Vec<Payoff>) -> Self {
        debug_assert_eq!(shape.len(), Some(data.len()));
        Self { shape, data }
    }

    pub(crate) fn into_parts(self) -> (Shape, Vec<Payoff>) {
        (self.shape, self.data)
    }

    fn offset(&self, page: usize, row: usize, col: usize) -> usize {
        ((page * self.shape.rows + row) * self.shape.cols + col) * self.shape.players
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(pages: usize, rows: usize, cols: usize, players: usize) -> Shape {
        Shape {
            pages,
            rows,
            cols,
            players,
        }
    }

    #[test]
    fn test_shape_of_space() {
        let space = StrategySpace::new(&[3, 2, 2, 4]).unwrap();
        assert_eq!(Shape::of(&space).unwrap(), shape(8, 3, 2, 4));
    }

    #[test]
    fn test_shape_expect_names_dimension() {
        let err = shape(2, 2, 2, 3).expect(&shape(2, 3, 2, 3)).unwrap_err();
        assert!(matches!(
            err,
            GameError::ShapeMismatch {
                context: "payoff rows",
                expected: 2,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_new_checks_length() {
        assert!(PayoffBuffer::new(shape(1, 2, 2, 2), vec![0.0; 8]).is_ok());
        assert!(matches!(
            PayoffBuffer::new(shape(1, 2, 2, 2), vec![0.0; 7]).unwrap_err(),
            GameError::ShapeMismatch { expected: 8, actual: 7, .. }
        ));
    }

    #[test]
    fn test_oversized_shape_is_rejected() {
        // 2^62 values fit in usize but not in memory.
        let huge = shape(1, 1 << 31, 1 << 31, 1);
        assert_eq!(huge.len(), None);
        assert!(matches!(
            PayoffBuffer::zeros(huge).unwrap_err(),
            GameError::InvalidStrategySpace { .. }
        ));
        assert!(PayoffBuffer::new(huge, Vec::new()).is_err());

        let space = StrategySpace::new(&[1 << 31, 1 << 31]).unwrap();
        assert!(matches!(
            Shape::of(&space).unwrap_err(),
            GameError::InvalidStrategySpace { .. }
        ));
    }

    #[test]
    fn test_deserialize_checks_length() {
        let good = PayoffBuffer::new(shape(1, 1, 1, 2), vec![1.0, 2.0]).unwrap();
        let mut value = serde_json::to_value(&good).unwrap();
        value["data"] = serde_json::json!([1.0]);

        assert!(serde_json::from_value::<PayoffBuffer>(value).is_err());
        let json = serde_json::to_string(&good).unwrap();
        assert_eq!(serde_json::from_str::<PayoffBuffer>(&json).unwrap(), good);
    }

    #[test]
    fn test_from_nested_layout() {
        let buffer = PayoffBuffer::from_nested(vec![vec![
            vec![vec![1.0, 2.0], vec![3.0, 4.0]],
            vec![vec![5.0, 6.0], vec![7.0, 8.0]],
        ]])
        .unwrap();
        assert_eq!(buffer.shape(), shape(1, 2, 2, 2));
        assert_eq!(buffer.as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        assert_eq!(buffer.entry(0, 1, 0), &[5.0, 6.0]);
    }

    #[test]
    fn test_from_nested_rejects_ragged() {
        let err = PayoffBuffer::from_nested(vec![vec![
            vec![vec![1.0, 2.0], vec![3.0, 4.0]],
            vec![vec![5.0, 6.0]],
        ]])
        .unwrap_err();
        assert!(matches!(err, GameError::ShapeMismatch { context: "payoff columns", .. }));

        let err = PayoffBuffer::from_nested(vec![vec![vec![vec![1.0, 2.0], vec![3.0]]]]).unwrap_err();
        assert!(matches!(err, GameError::ShapeMismatch { context: "payoffs per entry", .. }));
    }

    #[test]
    fn test_bimatrix_matches_nested() {
        let bimatrix = PayoffBuffer::from_bimatrix(
            vec![vec![3.0, 0.0], vec![5.0, 1.0]],
            vec![vec![3.0, 5.0], vec![0.0, 1.0]],
        )
        .unwrap();
        let nested = PayoffBuffer::from_nested(vec![vec![
            vec![vec![3.0, 3.0], vec![0.0, 5.0]],
            vec![vec![5.0, 0.0], vec![1.0, 1.0]],
        ]])
        .unwrap();
        assert_eq!(bimatrix, nested);
    }

    #[test]
    fn test_player_matrix_inverts_from_player_matrices() {
        let p0 = vec![vec![vec![1.0, 2.0]], vec![vec![3.0, 4.0]]];
        let p1 = vec![vec![vec![5.0, 6.0]], vec![vec![7.0, 8.0]]];
        let p2 = vec![vec![vec![9.0, 10.0]], vec![vec![11.0, 12.0]]];
        let buffer = PayoffBuffer::from_player_matrices(vec![p0.clone(), p1, p2.clone()]).unwrap();

        assert_eq!(buffer.shape(), shape(2, 1, 2, 3));
        assert_eq!(buffer.player_matrix(PlayerId::new(0)).unwrap(), p0);
        assert_eq!(buffer.player_matrix(PlayerId::new(2)).unwrap(), p2);
        assert!(buffer.player_matrix(PlayerId::new(3)).is_err());
    }

    #[test]
    fn test_to_nested_round_trip() {
        let pages = vec![
            vec![vec![vec![1.0, 2.0, 3.0]]],
            vec![vec![vec![4.0, 5.0, 6.0]]],
        ];
        let buffer = PayoffBuffer::from_nested(pages.clone()).unwrap();
        assert_eq!(buffer.to_nested(), pages);
    }
}
