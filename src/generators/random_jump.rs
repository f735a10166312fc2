use rand::{Rng, rngs::StdRng};

use crate::maze::{Coord, Grid};

/// Carving offsets in array coordinates: down, right, up, left.
const DIRECTIONS: [(i32, i32); 4] = [(0, 2), (2, 0), (0, -2), (-2, 0)];

/// What a single call to [`RandomJumpCarver::step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarveStep {
    /// A passage was carved from `from` into the previously walled cell `to`.
    Carved { from: Coord, to: Coord },
    /// No forward move was possible; the cursor jumped to an already open cell.
    Jumped(Coord),
    /// The carver is inert, nothing happened.
    Idle,
}

/// Randomized depth-first carving that escapes dead ends by jumping to a random
/// already-open cell instead of backtracking along a stack.
///
/// The carver can run a whole maze at once with [`generate`](Self::generate) or be
/// driven one decision at a time with [`step`](Self::step). Between two calls the
/// grid never holds a half-carved passage.
pub struct RandomJumpCarver {
    rng: StdRng,
    /// Current array coordinate, always on a logical cell.
    cursor: Coord,
    /// Logical cells not yet carved into.
    remaining: usize,
    /// Logical dimensions of the grid the carver was last reset with.
    dims: (u16, u16),
}

impl RandomJumpCarver {
    /// Creates an inert carver. Call [`reset`](Self::reset) or
    /// [`generate`](Self::generate) to start carving.
    pub fn new(rng: StdRng) -> Self {
        RandomJumpCarver {
            rng,
            cursor: (1, 1),
            remaining: 0,
            dims: (0, 0),
        }
    }

    /// Current carving position, for drawing a marker.
    pub fn cursor(&self) -> Coord {
        self.cursor
    }

    /// Number of logical cells still walled in.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0
    }

    /// Starts a new generation on `grid`: opens a uniformly random logical cell and
    /// puts the cursor on it.
    ///
    /// The grid is expected to be all walls already (see [`Grid::fill_walls`]); no
    /// other slot is touched. A 1x1 grid is complete right away, so its entrance
    /// and exit are carved here.
    pub fn reset(&mut self, grid: &mut Grid) {
        self.dims = (grid.width(), grid.height());
        self.cursor = self.random_cell(grid);
        grid.open(self.cursor);
        self.remaining = grid.width() as usize * grid.height() as usize - 1;
        tracing::debug!(
            "[carver] reset on {}x{} maze, starting at {:?}",
            self.dims.0,
            self.dims.1,
            self.cursor
        );
        if self.remaining == 0 {
            self.finish(grid);
        }
    }

    /// Fills `grid` with walls and carves a complete maze, entrance and exit included.
    pub fn generate(&mut self, grid: &mut Grid) {
        grid.fill_walls();
        self.reset(grid);
        while self.is_active() {
            self.step(grid);
        }
    }

    /// Performs exactly one carving decision. The decision that visits the last
    /// cell also carves the entrance and exit. Does nothing once inert.
    ///
    /// # Panics
    /// If `grid` does not have the dimensions the carver was reset with.
    pub fn step(&mut self, grid: &mut Grid) -> CarveStep {
        if !self.is_active() {
            return CarveStep::Idle;
        }
        assert_eq!(
            (grid.width(), grid.height()),
            self.dims,
            "Carver stepped on a grid it was not reset with"
        );

        let step = self.carve_once(grid);
        tracing::trace!("[carver] {:?}, {} cells remaining", step, self.remaining);
        if self.remaining == 0 {
            self.finish(grid);
        }
        step
    }

    /// The carving rule: try one random direction, carve if it leads into an
    /// unvisited interior cell, otherwise jump to a random open cell.
    fn carve_once(&mut self, grid: &mut Grid) -> CarveStep {
        let from = self.cursor;
        let direction = DIRECTIONS[self.rng.random_range(0..DIRECTIONS.len())];

        match offset(from, direction) {
            Some(to) if grid.is_interior(to) && grid.is_wall(to) => {
                grid.open(((from.0 + to.0) / 2, (from.1 + to.1) / 2));
                grid.open(to);
                self.remaining -= 1;
                self.cursor = to;
                CarveStep::Carved { from, to }
            }
            _ => {
                // At least the starting cell is open, so this terminates
                self.cursor = loop {
                    let cell = self.random_cell(grid);
                    if grid.is_open(cell) {
                        break cell;
                    }
                };
                CarveStep::Jumped(self.cursor)
            }
        }
    }

    fn finish(&mut self, grid: &mut Grid) {
        grid.carve_openings();
        tracing::debug!("[carver] maze complete, entrance and exit carved");
    }

    /// A uniformly random logical cell, as an array coordinate.
    fn random_cell(&mut self, grid: &Grid) -> Coord {
        let x = self.rng.random_range(0..grid.width());
        let y = self.rng.random_range(0..grid.height());
        grid.cell_coord((x, y))
    }
}

fn offset(coord: Coord, (dx, dy): (i32, i32)) -> Option<Coord> {
    let x = u16::try_from(coord.0 as i32 + dx).ok()?;
    let y = u16::try_from(coord.1 as i32 + dy).ok()?;
    Some((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::get_rng;
    use crate::maze::get_neighbors;
    use quickcheck::{TestResult, quickcheck};
    use std::collections::{HashSet, VecDeque};

    fn carver(seed: u64) -> RandomJumpCarver {
        RandomJumpCarver::new(get_rng(Some(seed)))
    }

    /// Open interior slots between two logical cells, i.e. carved passages.
    fn passage_count(grid: &Grid) -> usize {
        (0..grid.array_height())
            .flat_map(|y| (0..grid.array_width()).map(move |x| (x, y)))
            .filter(|&(x, y)| (x % 2 == 1) != (y % 2 == 1))
            .filter(|&c| grid.is_interior(c) && grid.is_open(c))
            .count()
    }

    /// Logical cells reachable from the top-left cell through carved passages.
    fn reachable_cells(grid: &Grid) -> HashSet<Coord> {
        let start = grid.cell_coord((0, 0));
        let mut seen = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);
        while let Some(cell) = queue.pop_front() {
            for next in get_neighbors(cell, 2) {
                let wall = ((cell.0 + next.0) / 2, (cell.1 + next.1) / 2);
                if grid.is_interior(next) && grid.is_open(wall) && seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        seen
    }

    fn assert_perfect_maze(grid: &Grid) {
        let cells = grid.width() as usize * grid.height() as usize;
        assert!(grid.logical_cells().all(|c| grid.is_open(c)));
        assert_eq!(passage_count(grid), cells - 1);
        assert_eq!(reachable_cells(grid).len(), cells);
        // Structural walls never open
        for y in (0..grid.array_height()).step_by(2) {
            for x in (0..grid.array_width()).step_by(2) {
                assert!(grid.is_wall((x, y)), "({}, {}) should be a wall", x, y);
            }
        }
        let (entrance, exit) = (grid.entrance(), grid.exit());
        assert!(grid.is_open(entrance));
        assert!(grid.is_open((entrance.0, entrance.1 + 1)));
        assert!(grid.is_open(exit));
        assert!(grid.is_open((exit.0, exit.1 - 1)));
        // Only the two openings break the border
        let border_open = (0..grid.array_height())
            .flat_map(|y| (0..grid.array_width()).map(move |x| (x, y)))
            .filter(|&c| grid.is_boundary(c) && grid.is_open(c))
            .count();
        assert_eq!(border_open, 2);
    }

    #[test]
    fn test_single_cell_maze() {
        let mut grid = Grid::new(1, 1).unwrap();
        let mut carver = carver(0);
        carver.generate(&mut grid);
        assert!(!carver.is_active());
        assert!(grid.is_open((1, 1)));
        assert!(grid.is_open((1, 0)));
        assert!(grid.is_open((1, 2)));
        assert_eq!(grid.cells().iter().filter(|c| c.is_open()).count(), 3);
    }

    #[test]
    fn test_single_cell_maze_stepped() {
        let mut grid = Grid::new(1, 1).unwrap();
        let mut carver = carver(0);
        carver.reset(&mut grid);
        assert!(!carver.is_active());
        assert_eq!(carver.step(&mut grid), CarveStep::Idle);
        assert!(grid.is_open((1, 0)) && grid.is_open((1, 2)));
    }

    #[test]
    fn test_two_cell_maze() {
        let mut grid = Grid::new(2, 1).unwrap();
        let mut carver = carver(11);
        carver.reset(&mut grid);
        assert_eq!(carver.remaining(), 1);
        assert!(carver.is_active());

        let mut carved = 0;
        while carver.is_active() {
            if let CarveStep::Carved { .. } = carver.step(&mut grid) {
                carved += 1;
            }
        }
        assert_eq!(carved, 1);
        assert!(grid.is_open((1, 1)));
        assert!(grid.is_open((2, 1)));
        assert!(grid.is_open((3, 1)));
        assert_perfect_maze(&grid);
    }

    #[test]
    fn test_generate_builds_perfect_mazes() {
        for (seed, (w, h)) in [(1, (10, 10)), (2, (1, 7)), (3, (7, 1)), (4, (25, 13))] {
            let mut grid = Grid::new(w, h).unwrap();
            carver(seed).generate(&mut grid);
            assert_perfect_maze(&grid);
        }
    }

    #[test]
    fn test_generate_overwrites_previous_content() {
        let mut grid = Grid::new(8, 5).unwrap();
        let mut carver = carver(5);
        carver.generate(&mut grid);
        carver.generate(&mut grid);
        assert_perfect_maze(&grid);
    }

    #[test]
    fn test_stepping_matches_generate() {
        let mut generated = Grid::new(9, 6).unwrap();
        carver(42).generate(&mut generated);

        let mut stepped = Grid::new(9, 6).unwrap();
        let mut carver = carver(42);
        carver.reset(&mut stepped);
        while carver.is_active() {
            carver.step(&mut stepped);
        }
        assert_eq!(carver.step(&mut stepped), CarveStep::Idle);
        assert_eq!(stepped.cells(), generated.cells());
    }

    #[test]
    fn test_steps_are_atomic() {
        let mut grid = Grid::new(6, 6).unwrap();
        let mut carver = carver(9);
        carver.reset(&mut grid);
        let mut open_before = grid.cells().iter().filter(|c| c.is_open()).count();
        while carver.is_active() {
            let remaining = carver.remaining();
            let step = carver.step(&mut grid);
            let open_after = grid.cells().iter().filter(|c| c.is_open()).count();
            match step {
                CarveStep::Carved { from, to } => {
                    assert_eq!(carver.remaining(), remaining - 1);
                    assert_eq!(carver.cursor(), to);
                    assert!(get_neighbors(from, 2).any(|c| c == to));
                    if carver.is_active() {
                        assert_eq!(open_after, open_before + 2);
                    }
                }
                CarveStep::Jumped(cell) => {
                    assert_eq!(carver.remaining(), remaining);
                    assert!(grid.is_open(cell));
                    assert_eq!(open_after, open_before);
                }
                CarveStep::Idle => panic!("active carver reported idle"),
            }
            assert_eq!(carver.cursor().0 % 2, 1);
            assert_eq!(carver.cursor().1 % 2, 1);
            open_before = open_after;
        }
    }

    #[test]
    fn test_step_when_inert_does_nothing() {
        let mut grid = Grid::new(5, 4).unwrap();
        let mut carver = carver(8);
        carver.generate(&mut grid);
        let before = grid.cells().to_vec();
        let cursor = carver.cursor();
        for _ in 0..10 {
            assert_eq!(carver.step(&mut grid), CarveStep::Idle);
        }
        assert_eq!(grid.cells(), &before[..]);
        assert_eq!(carver.cursor(), cursor);
    }

    #[test]
    fn test_new_carver_is_inert() {
        let mut grid = Grid::new(3, 3).unwrap();
        let mut carver = carver(0);
        assert!(!carver.is_active());
        assert_eq!(carver.step(&mut grid), CarveStep::Idle);
        assert!(grid.cells().iter().all(|c| c.is_wall()));
    }

    #[test]
    fn test_reset_mid_generation() {
        let mut grid = Grid::new(7, 7).unwrap();
        let mut carver = carver(13);
        carver.reset(&mut grid);
        for _ in 0..20 {
            carver.step(&mut grid);
        }
        grid.fill_walls();
        carver.reset(&mut grid);
        assert_eq!(carver.remaining(), 48);
        while carver.is_active() {
            carver.step(&mut grid);
        }
        assert_perfect_maze(&grid);
    }

    #[test]
    fn test_reset_after_resize() {
        let mut grid = Grid::new(3, 3).unwrap();
        let mut carver = carver(21);
        carver.generate(&mut grid);
        grid.resize(4, 2).unwrap();
        carver.generate(&mut grid);
        assert_perfect_maze(&grid);
    }

    #[test]
    #[should_panic]
    fn test_step_on_mismatched_grid() {
        let mut grid = Grid::new(4, 4).unwrap();
        let mut other = Grid::new(5, 4).unwrap();
        let mut carver = carver(1);
        carver.reset(&mut grid);
        carver.step(&mut other);
    }

    #[test]
    fn test_quickcheck_perfect_maze() {
        fn prop(w: u8, h: u8, seed: u64) -> TestResult {
            let (w, h) = (w as u16 % 16, h as u16 % 16);
            if w == 0 || h == 0 {
                return TestResult::discard();
            }
            let mut grid = Grid::new(w, h).unwrap();
            carver(seed).generate(&mut grid);
            assert_perfect_maze(&grid);
            TestResult::passed()
        }
        quickcheck(prop as fn(u8, u8, u64) -> TestResult);
    }
}
