pub mod cell;
mod grid;

use std::fmt;

pub use cell::Cell;
pub use grid::Grid;

/// An `(x, y)` coordinate in the wall array.
pub type Coord = (u16, u16);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    /// A logical dimension was zero or above `Grid::MAX_DIMENSION`.
    InvalidDimensions { width: u16, height: u16 },
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MazeError::InvalidDimensions { width, height } => write!(
                f,
                "invalid maze dimensions {}x{}: both must be between 1 and {}",
                width,
                height,
                Grid::MAX_DIMENSION
            ),
        }
    }
}

impl std::error::Error for MazeError {}

/// Get the coordinates `distance` slots away from `coord` in the cardinal directions,
/// in the order down, right, up, left.
/// Directions that would leave the `u16` range are skipped.
pub fn get_neighbors(coord: Coord, distance: u16) -> impl Iterator<Item = Coord> {
    let (x, y) = coord;
    [
        (Some(x), y.checked_add(distance)),
        (x.checked_add(distance), Some(y)),
        (Some(x), y.checked_sub(distance)),
        (x.checked_sub(distance), Some(y)),
    ]
    .into_iter()
    .filter_map(|c| match c {
        (Some(x), Some(y)) => Some((x, y)),
        _ => None,
    })
}
