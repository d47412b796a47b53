use crate::grid::{Coord, Grid, neighbors4};

/// Label of a cell that belongs to no group (an empty cell).
pub const NO_GROUP: u32 = u32::MAX;

/// Precomputed index from every connected filled cell to its group.
///
/// `labels` holds one group id per cell; `groups[id]` is the member list
/// shared by every cell carrying that id, so a lookup never traverses.
/// Isolated filled cells (no filled neighbour) are connected to nothing and
/// stay unlabelled, like empty cells.
#[derive(Clone, Debug)]
pub struct ConnectivityMap {
    labels: Grid<u32>,
    groups: Vec<Vec<Coord>>,
    isolated: usize,
}

impl ConnectivityMap {
    /// Members of the group containing `(x, y)`.
    /// Empty for empty or isolated cells and for coordinates outside the grid.
    pub fn group(&self, x: i32, y: i32) -> &[Coord] {
        match self.group_id(x, y) {
            Some(id) => &self.groups[id],
            None => &[],
        }
    }

    pub fn group_id(&self, x: i32, y: i32) -> Option<usize> {
        match self.labels.try_get(x, y) {
            Some(NO_GROUP) | None => None,
            Some(id) => Some(id as usize),
        }
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Every group once, in discovery order.
    pub fn groups(&self) -> impl Iterator<Item = &[Coord]> {
        self.groups.iter().map(Vec::as_slice)
    }

    pub fn largest(&self) -> Option<&[Coord]> {
        self.groups().max_by_key(|g| g.len())
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Filled cells with no filled neighbour.
    pub fn isolated_count(&self) -> usize {
        self.isolated
    }
}

/// Work-list flood fill over filled cells from `(x, y)`.
///
/// `visited` is a flat row-major mark array and is shared across calls by
/// `build_map`, so every cell is expanded at most once per build.
/// The seed must be filled and unvisited. It comes first in the result,
/// followed by cells in pop order.
fn flood(grid: &Grid<bool>, x: usize, y: usize, visited: &mut [bool]) -> Vec<Coord> {
    let (w, h) = (grid.w, grid.h);
    let mut members = Vec::new();
    let mut stack = vec![(x, y)];
    visited[grid.idx(x, y)] = true;

    while let Some((cx, cy)) = stack.pop() {
        members.push(Coord::new(cx, cy));
        for (nx, ny) in neighbors4(cx, cy, w, h) {
            let ni = grid.idx(nx, ny);
            if grid.data[ni] && !visited[ni] {
                visited[ni] = true;
                stack.push((nx, ny));
            }
        }
    }

    members
}

/// Full connected group containing `(x, y)`, the cell itself included.
/// Empty if the cell is empty or outside the grid.
pub fn component_of(grid: &Grid<bool>, x: i32, y: i32) -> Vec<Coord> {
    if grid.try_get(x, y) != Some(true) {
        return Vec::new();
    }
    let mut visited = vec![false; grid.data.len()];
    flood(grid, x as usize, y as usize, &mut visited)
}

/// Label every connected filled cell with its group.
///
/// Scans row by row; each filled cell not yet visited seeds one traversal,
/// whose members are all labelled with the same id. A traversal that finds
/// only its seed is counted as isolated and left unlabelled.
pub fn build_map(grid: &Grid<bool>) -> ConnectivityMap {
    let (w, h) = (grid.w, grid.h);
    let mut labels = Grid::<u32>::new(w, h);
    labels.data.fill(NO_GROUP);
    let mut visited = vec![false; grid.data.len()];
    let mut groups: Vec<Vec<Coord>> = Vec::new();
    let mut isolated = 0;

    for y in 0..h {
        for x in 0..w {
            if !grid.get(x, y) || visited[grid.idx(x, y)] {
                continue;
            }
            let members = flood(grid, x, y, &mut visited);
            if members.len() == 1 {
                isolated += 1;
                continue;
            }
            let id = groups.len() as u32;
            for m in &members {
                labels.set(m.x, m.y, id);
            }
            groups.push(members);
        }
    }

    ConnectivityMap {
        labels,
        groups,
        isolated,
    }
}
