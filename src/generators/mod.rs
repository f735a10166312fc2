use rand::{SeedableRng, rngs::StdRng};

mod random_jump;

pub use random_jump::{CarveStep, RandomJumpCarver};

use crate::maze::Grid;

/// Get a random number generator, optionally seeded for reproducibility.
pub fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Generation algorithms offered for selection.
///
/// Only `RecursiveBacktracker` has its own behaviour. Prim's and Kruskal's can be
/// selected, but carve with the same random-jump rule.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    #[default]
    RecursiveBacktracker,
    Prim,
    Kruskal,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [
        Algorithm::RecursiveBacktracker,
        Algorithm::Prim,
        Algorithm::Kruskal,
    ];

    pub fn is_implemented(self) -> bool {
        matches!(self, Algorithm::RecursiveBacktracker)
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Algorithm::RecursiveBacktracker => write!(f, "Recursive Backtracker"),
            Algorithm::Prim => write!(f, "Prim's Algorithm"),
            Algorithm::Kruskal => write!(f, "Kruskal's Algorithm"),
        }
    }
}

/// Generate a complete maze into `grid` in one call.
pub fn generate_maze(grid: &mut Grid, algorithm: Algorithm, seed: Option<u64>) {
    if !algorithm.is_implemented() {
        tracing::warn!(
            "{} is not implemented, carving with {} instead",
            algorithm,
            Algorithm::RecursiveBacktracker
        );
    }
    RandomJumpCarver::new(get_rng(seed)).generate(grid);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let mut a = Grid::new(12, 9).unwrap();
        let mut b = Grid::new(12, 9).unwrap();
        generate_maze(&mut a, Algorithm::RecursiveBacktracker, Some(7));
        generate_maze(&mut b, Algorithm::RecursiveBacktracker, Some(7));
        assert_eq!(a.cells(), b.cells());
    }

    #[test]
    fn test_unimplemented_algorithms_still_carve() {
        let mut expected = Grid::new(6, 6).unwrap();
        generate_maze(&mut expected, Algorithm::RecursiveBacktracker, Some(3));
        for algorithm in [Algorithm::Prim, Algorithm::Kruskal] {
            let mut grid = Grid::new(6, 6).unwrap();
            generate_maze(&mut grid, algorithm, Some(3));
            assert_eq!(grid.cells(), expected.cells());
        }
    }

    #[test]
    fn test_algorithm_names() {
        assert_eq!(
            Algorithm::ALL.map(|a| a.to_string()),
            [
                "Recursive Backtracker".to_string(),
                "Prim's Algorithm".to_string(),
                "Kruskal's Algorithm".to_string(),
            ]
        );
        assert!(Algorithm::default().is_implemented());
        assert!(!Algorithm::Prim.is_implemented());
    }
}
