use serde::{Deserialize, Serialize};

use crate::error::GridError;

/// Row-major flat grid. No per-cell objects.
/// `x` is the column, `y` is the row.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    pub data: Vec<T>,
    pub w: usize,
    pub h: usize,
}

/// A cell coordinate: `x` is the column, `y` is the row, both zero-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl<T: Copy + Default> Grid<T> {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            data: vec![T::default(); w * h],
            w,
            h,
        }
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.w && y < self.h);
        y * self.w + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> T {
        self.data[self.idx(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: T) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    /// Signed lookup; `None` outside the grid.
    #[inline]
    pub fn try_get(&self, x: i32, y: i32) -> Option<T> {
        in_bounds(x, y, self.w, self.h).map(|(x, y)| self.get(x, y))
    }

    pub fn is_square(&self) -> bool {
        self.w == self.h
    }

    /// Rows as nested vectors, outer index is `y`.
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        self.data.chunks(self.w.max(1)).map(|row| row.to_vec()).collect()
    }
}

impl Grid<bool> {
    /// Build a square cell grid from nested rows, rejecting ragged or
    /// non-square input.
    pub fn from_rows(rows: &[Vec<bool>]) -> Result<Self, GridError> {
        let size = rows.len();
        if size == 0 {
            return Err(GridError::InvalidSize(0));
        }
        for (y, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(GridError::RaggedRows {
                    row: y,
                    len: row.len(),
                    expected: size,
                });
            }
        }
        Ok(Self {
            data: rows.concat(),
            w: size,
            h: size,
        })
    }

    /// Same as `from_rows` for 0/1 integer rows; any non-zero value is filled.
    pub fn from_bits(rows: &[Vec<u8>]) -> Result<Self, GridError> {
        let rows: Vec<Vec<bool>> = rows
            .iter()
            .map(|row| row.iter().map(|&v| v != 0).collect())
            .collect();
        Self::from_rows(&rows)
    }

    pub fn filled_count(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }
}

/// Bounds check for signed coordinates. No wrapping on either axis.
#[inline]
pub fn in_bounds(x: i32, y: i32, w: usize, h: usize) -> Option<(usize, usize)> {
    if x < 0 || y < 0 || x as usize >= w || y as usize >= h {
        return None;
    }
    Some((x as usize, y as usize))
}

/// Offsets in up, right, down, left order.
pub const OFFSETS4: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// 4-connected in-bounds neighbors, up/right/down/left.
pub fn neighbors4(x: usize, y: usize, w: usize, h: usize) -> impl Iterator<Item = (usize, usize)> {
    let mut out = [(0usize, 0usize); 4];
    let mut n = 0;
    for (dx, dy) in OFFSETS4 {
        if let Some(pos) = in_bounds(x as i32 + dx, y as i32 + dy, w, h) {
            out[n] = pos;
            n += 1;
        }
    }
    out.into_iter().take(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_has_two_neighbors() {
        let n: Vec<_> = neighbors4(0, 0, 3, 3).collect();
        assert_eq!(n, vec![(1, 0), (0, 1)]);
    }

    #[test]
    fn center_neighbors_in_order() {
        let n: Vec<_> = neighbors4(1, 1, 3, 3).collect();
        assert_eq!(n, vec![(1, 0), (2, 1), (1, 2), (0, 1)]);
    }

    #[test]
    fn no_wrapping_at_edges() {
        let n: Vec<_> = neighbors4(2, 2, 3, 3).collect();
        assert_eq!(n, vec![(2, 1), (1, 2)]);
    }

    #[test]
    fn signed_lookup_rejects_outside() {
        let g = Grid::<bool>::from_bits(&[vec![1, 0], vec![0, 1]]).unwrap();
        assert_eq!(g.try_get(0, 0), Some(true));
        assert_eq!(g.try_get(1, 0), Some(false));
        assert_eq!(g.try_get(-1, 0), None);
        assert_eq!(g.try_get(0, 2), None);
    }

    #[test]
    fn ragged_rows_rejected() {
        let err = Grid::<bool>::from_bits(&[vec![1, 0], vec![0]]).unwrap_err();
        assert_eq!(
            err,
            GridError::RaggedRows {
                row: 1,
                len: 1,
                expected: 2
            }
        );
    }

    #[test]
    fn wide_rows_rejected() {
        let err = Grid::<bool>::from_bits(&[vec![1, 0, 1], vec![0, 1, 1]]).unwrap_err();
        assert!(matches!(err, GridError::RaggedRows { row: 0, .. }));
    }

    #[test]
    fn empty_rows_rejected() {
        assert_eq!(Grid::<bool>::from_rows(&[]), Err(GridError::InvalidSize(0)));
    }

    #[test]
    fn rows_round_trip_layout() {
        let rows = vec![vec![true, false], vec![false, false]];
        let g = Grid::from_rows(&rows).unwrap();
        assert_eq!(g.get(0, 0), true);
        assert_eq!(g.get(1, 0), false);
        assert_eq!(g.to_rows(), rows);
        assert_eq!(g.filled_count(), 1);
    }
}
