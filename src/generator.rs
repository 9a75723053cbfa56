use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::grid::{Dir, Grid, Pos};

/// Carves a perfect maze with a randomized depth-first backtracker.
///
/// The walk starts at the entrance and keeps an explicit stack, so large
/// sizes never recurse. Every cell ends up visited exactly once and the open
/// passages form a spanning tree: exactly `size² - 1` of them, one simple
/// path between any two cells.
///
/// `rng` only picks among the unvisited neighbors of the current cell, which
/// are offered in `Dir::ALL` order.
pub fn generate<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Grid {
    let mut grid = Grid::new(size);
    let start = grid.entrance();
    grid.cell_mut(start).visited = true;
    let mut stack = vec![start];
    let mut deepest = 1;

    while let Some(&current) = stack.last() {
        let options = unvisited_neighbors(&grid, current);
        match options.choose(rng) {
            Some(&dir) => {
                if let Some(next) = grid.carve(current, dir) {
                    grid.cell_mut(next).visited = true;
                    stack.push(next);
                    deepest = deepest.max(stack.len());
                }
            }
            None => {
                stack.pop();
            }
        }
    }

    debug!(
        "generated {0}x{0} maze: {1} passages, max stack depth {2}",
        grid.size(),
        grid.passage_count(),
        deepest
    );
    grid
}

fn unvisited_neighbors(grid: &Grid, pos: Pos) -> Vec<Dir> {
    let mut options = Vec::with_capacity(4);
    for dir in Dir::ALL {
        if let Some(next) = grid.neighbor(pos, dir) {
            if !grid.cell(next).visited {
                options.push(dir);
            }
        }
    }
    options
}
