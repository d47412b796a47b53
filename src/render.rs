use rayon::prelude::*;

use crate::grid::{Coord, Grid};

// Palette (filled/background/hover, as in the browser view)
const FILLED: [u8; 4] = [40, 44, 52, 255];
const EMPTY: [u8; 4] = [236, 239, 244, 255];
const HIGHLIGHT: [u8; 4] = [235, 131, 52, 255];
const GRIDLINE: [u8; 4] = [200, 204, 210, 255];

/// Pixel side length of one cell, including its 1px grid line.
pub fn cell_px(size: usize) -> usize {
    (512 / size.max(1)).clamp(2, 32)
}

/// Render the grid as RGBA, `cell_px(size)` pixels per cell.
/// Cells in `highlight` are drawn in the hover colour.
/// Returns the buffer and its side length in pixels.
pub fn render_grid(grid: &Grid<bool>, highlight: &[Coord]) -> (Vec<u8>, usize) {
    let cell = cell_px(grid.w);
    let side = grid.w * cell;

    let mut marked = Grid::<bool>::new(grid.w, grid.h);
    for c in highlight {
        if c.x < grid.w && c.y < grid.h {
            marked.set(c.x, c.y, true);
        }
    }

    let mut rgba = vec![0u8; side * side * 4];
    rgba.par_chunks_mut(side * 4)
        .enumerate()
        .for_each(|(py, row)| {
            let y = py / cell;
            for px in 0..side {
                let x = px / cell;
                let color = if px % cell == cell - 1 || py % cell == cell - 1 {
                    GRIDLINE
                } else if marked.get(x, y) {
                    HIGHLIGHT
                } else if grid.get(x, y) {
                    FILLED
                } else {
                    EMPTY
                };
                row[px * 4..px * 4 + 4].copy_from_slice(&color);
            }
        });

    (rgba, side)
}
