use std::time::Duration;

use crate::generators::Algorithm;

#[derive(Debug, Clone)]
pub struct Config {
    /// Maze width in logical cells
    pub width: u16,
    /// Maze height in logical cells
    pub height: u16,
    /// Whether generation and solution reveal advance one unit per tick
    pub animate: bool,
    /// Minimum time between two carving steps while animating
    pub generation_delay: Duration,
    /// Minimum time between two revealed path coordinates while animating
    pub solution_delay: Duration,
    pub algorithm: Algorithm,
    /// Seed for the carver, fresh entropy when `None`
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            animate: true,
            generation_delay: Duration::from_millis(50),
            solution_delay: Duration::from_millis(100),
            algorithm: Algorithm::default(),
            seed: None,
        }
    }
}
