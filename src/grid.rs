use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    pub const fn new(x: usize, y: usize) -> Self {
        Pos { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Right,
    Down,
    Left,
}

impl Dir {
    /// Neighbor scan order used by the generator.
    pub const ALL: [Dir; 4] = [Dir::Up, Dir::Right, Dir::Down, Dir::Left];

    pub fn delta(self) -> (isize, isize) {
        match self {
            Dir::Up => (0, -1),
            Dir::Right => (1, 0),
            Dir::Down => (0, 1),
            Dir::Left => (-1, 0),
        }
    }

    pub fn opposite(self) -> Dir {
        match self {
            Dir::Up => Dir::Down,
            Dir::Right => Dir::Left,
            Dir::Down => Dir::Up,
            Dir::Left => Dir::Right,
        }
    }
}

/// One maze cell. A `true` wall blocks traversal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
    pub visited: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Cell {
            top: true,
            right: true,
            bottom: true,
            left: true,
            visited: false,
        }
    }
}

impl Cell {
    pub fn wall(&self, dir: Dir) -> bool {
        match dir {
            Dir::Up => self.top,
            Dir::Right => self.right,
            Dir::Down => self.bottom,
            Dir::Left => self.left,
        }
    }

    fn clear_wall(&mut self, dir: Dir) {
        match dir {
            Dir::Up => self.top = false,
            Dir::Right => self.right = false,
            Dir::Down => self.bottom = false,
            Dir::Left => self.left = false,
        }
    }
}

/// Square grid of cells stored row-major in a flat arena.
///
/// Callers must stay inside `[0, size)²`; `cell` and `cell_mut` index
/// directly and panic on out-of-range coordinates. Walls only change
/// through `carve`, which keeps both sides in agreement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// All-walls grid. A size of zero is bumped to a single cell.
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        Grid {
            size,
            cells: vec![Cell::default(); size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn entrance(&self) -> Pos {
        Pos::new(0, 0)
    }

    pub fn exit(&self) -> Pos {
        Pos::new(self.size - 1, self.size - 1)
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.x < self.size && pos.y < self.size
    }

    pub fn cell(&self, pos: Pos) -> &Cell {
        &self.cells[self.idx(pos)]
    }

    pub(crate) fn cell_mut(&mut self, pos: Pos) -> &mut Cell {
        let idx = self.idx(pos);
        &mut self.cells[idx]
    }

    pub fn has_wall(&self, pos: Pos, dir: Dir) -> bool {
        self.cell(pos).wall(dir)
    }

    /// In-bounds neighbor of `pos` in `dir`, walls ignored.
    pub fn neighbor(&self, pos: Pos, dir: Dir) -> Option<Pos> {
        let (dx, dy) = dir.delta();
        let nx = pos.x.checked_add_signed(dx)?;
        let ny = pos.y.checked_add_signed(dy)?;
        let next = Pos::new(nx, ny);
        self.contains(next).then_some(next)
    }

    /// Clears the wall between `pos` and its neighbor in `dir` on both sides.
    /// Returns the neighbor, or `None` (and changes nothing) at the border.
    pub fn carve(&mut self, pos: Pos, dir: Dir) -> Option<Pos> {
        let next = self.neighbor(pos, dir)?;
        self.cell_mut(pos).clear_wall(dir);
        self.cell_mut(next).clear_wall(dir.opposite());
        Some(next)
    }

    /// Number of open passages, each counted once.
    pub fn passage_count(&self) -> usize {
        self.positions()
            .map(|pos| {
                [Dir::Right, Dir::Down]
                    .into_iter()
                    .filter(|&dir| self.neighbor(pos, dir).is_some() && !self.has_wall(pos, dir))
                    .count()
            })
            .sum()
    }

    /// Flood over open passages; `result[y * size + x]` marks reachable cells.
    pub fn reachable_from(&self, start: Pos) -> Vec<bool> {
        let mut seen = vec![false; self.cells.len()];
        let mut q = VecDeque::new();
        seen[self.idx(start)] = true;
        q.push_back(start);
        while let Some(pos) = q.pop_front() {
            for dir in Dir::ALL {
                if self.has_wall(pos, dir) {
                    continue;
                }
                let Some(next) = self.neighbor(pos, dir) else {
                    continue;
                };
                let idx = self.idx(next);
                if !seen[idx] {
                    seen[idx] = true;
                    q.push_back(next);
                }
            }
        }
        seen
    }

    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.size).flat_map(move |y| (0..self.size).map(move |x| Pos::new(x, y)))
    }

    fn idx(&self, pos: Pos) -> usize {
        pos.y * self.size + pos.x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_all_walls() {
        let grid = Grid::new(4);
        assert_eq!(grid.size(), 4);
        for pos in grid.positions() {
            let cell = grid.cell(pos);
            assert!(cell.top && cell.right && cell.bottom && cell.left);
            assert!(!cell.visited);
        }
        assert_eq!(grid.passage_count(), 0);
    }

    #[test]
    fn zero_size_becomes_single_cell() {
        let grid = Grid::new(0);
        assert_eq!(grid.size(), 1);
        assert_eq!(grid.entrance(), grid.exit());
    }

    #[test]
    fn neighbor_respects_bounds() {
        let grid = Grid::new(3);
        assert_eq!(grid.neighbor(Pos::new(0, 0), Dir::Up), None);
        assert_eq!(grid.neighbor(Pos::new(0, 0), Dir::Left), None);
        assert_eq!(grid.neighbor(Pos::new(2, 2), Dir::Right), None);
        assert_eq!(grid.neighbor(Pos::new(2, 2), Dir::Down), None);
        assert_eq!(grid.neighbor(Pos::new(1, 1), Dir::Up), Some(Pos::new(1, 0)));
        assert_eq!(grid.neighbor(Pos::new(1, 1), Dir::Left), Some(Pos::new(0, 1)));
    }

    #[test]
    fn carve_clears_both_sides() {
        let mut grid = Grid::new(3);
        assert_eq!(grid.carve(Pos::new(1, 1), Dir::Right), Some(Pos::new(2, 1)));
        assert!(!grid.cell(Pos::new(1, 1)).right);
        assert!(!grid.cell(Pos::new(2, 1)).left);

        grid.carve(Pos::new(1, 1), Dir::Up);
        assert!(!grid.cell(Pos::new(1, 1)).top);
        assert!(!grid.cell(Pos::new(1, 0)).bottom);
        assert_eq!(grid.passage_count(), 2);
    }

    #[test]
    fn carve_at_border_is_noop() {
        let mut grid = Grid::new(2);
        assert_eq!(grid.carve(Pos::new(0, 0), Dir::Left), None);
        assert!(grid.cell(Pos::new(0, 0)).left);
        assert_eq!(grid.passage_count(), 0);
    }

    #[test]
    fn reachable_follows_open_walls_only() {
        let mut grid = Grid::new(3);
        grid.carve(Pos::new(0, 0), Dir::Right);
        grid.carve(Pos::new(1, 0), Dir::Down);
        let seen = grid.reachable_from(Pos::new(0, 0));
        assert_eq!(seen.iter().filter(|&&s| s).count(), 3);
        assert!(seen[3 + 1]);
        assert!(!seen[2 * 3 + 2]);
    }
}
