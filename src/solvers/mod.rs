mod bfs;

pub use bfs::solve_bfs;

use crate::maze::{Coord, Grid};

/// Holds the shortest entrance-to-exit path of the last solved grid.
#[derive(Debug, Default)]
pub struct Solver {
    solution: Vec<Coord>,
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recomputes the path for `grid`, discarding the previous one.
    /// An empty result means the exit is unreachable.
    pub fn solve(&mut self, grid: &Grid) -> &[Coord] {
        self.solution = solve_bfs(grid);
        if self.solution.is_empty() {
            tracing::debug!("[solver] no path from entrance to exit");
        } else {
            tracing::debug!("[solver] found path of {} cells", self.solution.len());
        }
        &self.solution
    }

    pub fn solution(&self) -> &[Coord] {
        &self.solution
    }

    pub fn clear(&mut self) {
        self.solution.clear();
    }
}
