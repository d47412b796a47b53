use rand::RngCore;

use crate::error::GridError;
use crate::grid::Grid;

/// Generate a `size x size` grid where every cell is independently filled
/// with probability 0.5.
///
/// Each cell consumes one `u64` from `rng` in row-major order and is filled
/// when the top bit is set, so a seeded source gives the same grid on every
/// platform. A size of zero is rejected.
pub fn generate<R: RngCore + ?Sized>(size: usize, rng: &mut R) -> Result<Grid<bool>, GridError> {
    if size == 0 {
        return Err(GridError::InvalidSize(size));
    }

    let mut grid = Grid::<bool>::new(size, size);
    for cell in &mut grid.data {
        *cell = rng.next_u64() >> 63 == 1;
    }
    Ok(grid)
}
