use log::debug;
use rand::RngCore;

use crate::config::{DEFAULT_SIZE, validate_size};
use crate::connectivity::{ConnectivityMap, build_map};
use crate::error::GridError;
use crate::generator::generate;
use crate::grid::{Coord, Grid};
use crate::rng::SplitMix64;

/// Owns the current grid and the connectivity map derived from it.
///
/// The pair is only ever replaced together by `set_size` or `set_grid`.
/// On error the previous pair is kept untouched. Queries are plain lookups.
pub struct GridModel<R = SplitMix64> {
    grid: Grid<bool>,
    map: ConnectivityMap,
    rng: R,
}

impl GridModel<SplitMix64> {
    /// Model with a random grid from a seeded `SplitMix64`.
    pub fn seeded(size: usize, seed: u64) -> Result<Self, GridError> {
        Self::with_rng(size, SplitMix64::new(seed))
    }
}

impl Default for GridModel<SplitMix64> {
    fn default() -> Self {
        let mut rng = SplitMix64::new(42);
        let grid = generate(DEFAULT_SIZE, &mut rng).unwrap_or_else(|_| Grid::new(DEFAULT_SIZE, DEFAULT_SIZE));
        Self::from_parts(grid, rng)
    }
}

impl<R: RngCore> GridModel<R> {
    /// Model with a random `size x size` grid drawn from `rng`.
    /// `rng` is kept for later `set_size` calls.
    pub fn with_rng(size: usize, mut rng: R) -> Result<Self, GridError> {
        let grid = generate(validate_size(size)?, &mut rng)?;
        Ok(Self::from_parts(grid, rng))
    }

    /// Model over an explicit grid; `rng` serves later `set_size` calls.
    pub fn from_grid(grid: Grid<bool>, rng: R) -> Result<Self, GridError> {
        check_square(&grid)?;
        Ok(Self::from_parts(grid, rng))
    }

    fn from_parts(grid: Grid<bool>, rng: R) -> Self {
        let map = build_map(&grid);
        log_rebuild(&grid, &map);
        Self { grid, map, rng }
    }

    pub fn size(&self) -> usize {
        self.grid.w
    }

    /// Read-only view of the current grid.
    pub fn grid(&self) -> &Grid<bool> {
        &self.grid
    }

    pub fn connectivity(&self) -> &ConnectivityMap {
        &self.map
    }

    /// Regenerate a random grid of `size` and rebuild the map.
    pub fn set_size(&mut self, size: usize) -> Result<(), GridError> {
        let grid = generate(validate_size(size)?, &mut self.rng)?;
        self.replace(grid);
        Ok(())
    }

    /// Substitute an explicit grid; size follows its dimensions.
    pub fn set_grid(&mut self, grid: Grid<bool>) -> Result<(), GridError> {
        check_square(&grid)?;
        self.replace(grid);
        Ok(())
    }

    /// `set_grid` for nested rows, outer index is `y`.
    pub fn set_rows(&mut self, rows: &[Vec<bool>]) -> Result<(), GridError> {
        self.set_grid(Grid::from_rows(rows)?)
    }

    fn replace(&mut self, grid: Grid<bool>) {
        let map = build_map(&grid);
        log_rebuild(&grid, &map);
        self.grid = grid;
        self.map = map;
    }

    /// Cells connected to `(x, y)`, the cell itself included.
    /// Empty for empty or isolated cells and outside the grid.
    pub fn connected_group(&self, x: i32, y: i32) -> &[Coord] {
        self.map.group(x, y)
    }

    /// Number of cells in the group at `(x, y)`; zero when there is none.
    pub fn group_len(&self, x: i32, y: i32) -> usize {
        self.connected_group(x, y).len()
    }

    pub fn is_filled(&self, x: i32, y: i32) -> bool {
        self.grid.try_get(x, y).unwrap_or(false)
    }

    pub fn group_count(&self) -> usize {
        self.map.group_count()
    }
}

fn check_square(grid: &Grid<bool>) -> Result<(), GridError> {
    if !grid.is_square() {
        return Err(GridError::NotSquare { w: grid.w, h: grid.h });
    }
    validate_size(grid.w)?;
    if grid.data.len() != grid.w * grid.h {
        return Err(GridError::RaggedRows {
            row: grid.data.len() / grid.w,
            len: grid.data.len() % grid.w,
            expected: grid.w,
        });
    }
    Ok(())
}

fn log_rebuild(grid: &Grid<bool>, map: &ConnectivityMap) {
    debug!(
        "rebuilt {}x{} grid: {} filled, {} groups, {} isolated",
        grid.w,
        grid.h,
        grid.filled_count(),
        map.group_count(),
        map.isolated_count()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> Grid<bool> {
        Grid::<bool>::from_bits(&[
            vec![1, 0, 0, 0, 1],
            vec![1, 0, 0, 0, 0],
            vec![1, 0, 0, 1, 1],
            vec![0, 0, 1, 1, 0],
            vec![1, 0, 0, 1, 0],
        ])
        .unwrap()
    }

    #[test]
    fn default_size_is_five() {
        let model = GridModel::default();
        assert_eq!(model.size(), 5);
        assert_eq!(model.grid().to_rows().len(), 5);
        assert!(model.grid().to_rows().iter().all(|r| r.len() == 5));
    }

    #[test]
    fn set_size_regenerates() {
        let mut model = GridModel::seeded(5, 1).unwrap();
        for size in [1, 5, 10, 20, 100] {
            model.set_size(size).unwrap();
            assert_eq!(model.size(), size);
            assert_eq!(model.grid().w, size);
            assert_eq!(model.grid().h, size);
        }
    }

    #[test]
    fn zero_size_keeps_previous_pair() {
        let mut model = GridModel::seeded(6, 3).unwrap();
        let before = model.grid().clone();
        let groups = model.group_count();
        assert_eq!(model.set_size(0), Err(GridError::InvalidSize(0)));
        assert_eq!(model.grid(), &before);
        assert_eq!(model.group_count(), groups);
        assert!(matches!(GridModel::seeded(0, 3), Err(GridError::InvalidSize(0))));
    }

    #[test]
    fn set_grid_takes_size_from_grid() {
        let mut model = GridModel::seeded(10, 3).unwrap();
        model.set_grid(scenario()).unwrap();
        assert_eq!(model.size(), 5);
        assert_eq!(model.group_len(2, 3), 5);
        assert_eq!(model.group_len(0, 1), 3);
        assert_eq!(model.group_count(), 2);
    }

    #[test]
    fn non_square_grid_rejected() {
        let mut model = GridModel::seeded(4, 3).unwrap();
        let before = model.grid().clone();
        let wide = Grid::<bool>::new(3, 2);
        assert_eq!(model.set_grid(wide), Err(GridError::NotSquare { w: 3, h: 2 }));
        let ragged = vec![vec![true, true], vec![true]];
        assert!(matches!(model.set_rows(&ragged), Err(GridError::RaggedRows { .. })));
        assert_eq!(model.grid(), &before);
    }

    #[test]
    fn short_buffer_rejected() {
        let mut model = GridModel::seeded(2, 3).unwrap();
        let bad = Grid {
            data: vec![true; 3],
            w: 2,
            h: 2,
        };
        assert!(matches!(model.set_grid(bad), Err(GridError::RaggedRows { row: 1, len: 1, .. })));
        let empty = Grid::<bool>::new(0, 0);
        assert_eq!(
            GridModel::from_grid(empty, SplitMix64::new(0)).err(),
            Some(GridError::InvalidSize(0))
        );
    }

    #[test]
    fn queries_are_stable() {
        let mut model = GridModel::seeded(4, 0).unwrap();
        model.set_grid(scenario()).unwrap();
        let first = model.connected_group(3, 3).to_vec();
        for _ in 0..3 {
            assert_eq!(model.connected_group(3, 3), first.as_slice());
        }
    }

    #[test]
    fn is_filled_handles_outside() {
        let mut model = GridModel::seeded(4, 0).unwrap();
        model.set_grid(scenario()).unwrap();
        assert!(model.is_filled(4, 0));
        assert!(!model.is_filled(1, 0));
        assert!(!model.is_filled(-1, 0));
        assert!(!model.is_filled(5, 5));
    }

    #[test]
    fn seeded_models_match() {
        let a = GridModel::seeded(12, 77).unwrap();
        let b = GridModel::seeded(12, 77).unwrap();
        assert_eq!(a.grid(), b.grid());
    }
}
