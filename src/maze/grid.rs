use super::{Coord, MazeError, cell::Cell};

/// The wall array a maze is carved into.
///
/// A maze of `width x height` logical cells is stored as a
/// `(2 * width + 1) x (2 * height + 1)` array. Logical cell `(cx, cy)` sits at
/// array coordinate `(2 * cx + 1, 2 * cy + 1)`; the slots between two logical
/// cells are the walls removed when a passage is carved, and the even/even
/// slots are structural walls that are never opened.
pub struct Grid {
    data: Box<[Cell]>,
    /// Logical width in cells
    width: u16,
    /// Logical height in cells
    height: u16,
}

impl Grid {
    /// Largest accepted logical dimension, bounding the array at 1999x1999 slots.
    pub const MAX_DIMENSION: u16 = 999;

    /// Creates a grid of `width x height` logical cells with every slot set to a wall.
    pub fn new(width: u16, height: u16) -> Result<Self, MazeError> {
        Self::validate(width, height)?;
        let data = vec![Cell::Wall; Self::array_len(width, height)].into_boxed_slice();
        Ok(Grid {
            data,
            width,
            height,
        })
    }

    /// Reallocates the grid for new logical dimensions. No content survives:
    /// every slot is a wall afterwards and any solution computed on the old
    /// grid is stale.
    /// On error the grid is left untouched.
    pub fn resize(&mut self, width: u16, height: u16) -> Result<(), MazeError> {
        *self = Self::new(width, height)?;
        Ok(())
    }

    fn validate(width: u16, height: u16) -> Result<(), MazeError> {
        if width == 0 || height == 0 || width > Self::MAX_DIMENSION || height > Self::MAX_DIMENSION
        {
            return Err(MazeError::InvalidDimensions { width, height });
        }
        Ok(())
    }

    fn array_len(width: u16, height: u16) -> usize {
        (width as usize * 2 + 1) * (height as usize * 2 + 1)
    }

    /// Returns the width of the maze in logical cells.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Returns the height of the maze in logical cells.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Width of the underlying wall array.
    pub fn array_width(&self) -> u16 {
        self.width * 2 + 1
    }

    /// Height of the underlying wall array.
    pub fn array_height(&self) -> u16 {
        self.height * 2 + 1
    }

    /// Row-major view of the whole wall array.
    pub fn cells(&self) -> &[Cell] {
        &self.data
    }

    /// Iterates over the rows of the wall array, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.data.chunks(self.array_width() as usize)
    }

    fn ravel_index(&self, x: u16, y: u16) -> usize {
        y as usize * self.array_width() as usize + x as usize
    }

    /// Checks if the array coordinate lies inside the wall array.
    pub fn contains(&self, coord: Coord) -> bool {
        coord.0 < self.array_width() && coord.1 < self.array_height()
    }

    /// Checks if the array coordinate lies strictly inside the outer border.
    pub fn is_interior(&self, coord: Coord) -> bool {
        let (x, y) = coord;
        x > 0 && y > 0 && x < self.width * 2 && y < self.height * 2
    }

    pub fn is_boundary(&self, coord: Coord) -> bool {
        self.contains(coord) && !self.is_interior(coord)
    }

    pub fn is_open(&self, coord: Coord) -> bool {
        self[coord].is_open()
    }

    pub fn is_wall(&self, coord: Coord) -> bool {
        self[coord].is_wall()
    }

    pub fn set(&mut self, coord: Coord, cell: Cell) {
        assert!(
            self.contains(coord),
            "Coordinate {:?} is outside the {}x{} wall array",
            coord,
            self.array_width(),
            self.array_height()
        );
        let idx = self.ravel_index(coord.0, coord.1);
        self.data[idx] = cell;
    }

    /// Carves the slot at `coord`.
    pub fn open(&mut self, coord: Coord) {
        self.set(coord, Cell::Open);
    }

    /// Turns every slot back into a wall.
    pub fn fill_walls(&mut self) {
        self.data.fill(Cell::Wall);
    }

    /// Maps a logical cell to its array coordinate.
    ///
    /// # Panics
    /// If the logical cell is outside the maze.
    pub fn cell_coord(&self, cell: Coord) -> Coord {
        assert!(
            cell.0 < self.width && cell.1 < self.height,
            "Logical cell {:?} is outside the {}x{} maze",
            cell,
            self.width,
            self.height
        );
        (cell.0 * 2 + 1, cell.1 * 2 + 1)
    }

    /// The opening in the top border, above logical cell `(0, 0)`.
    pub fn entrance(&self) -> Coord {
        (1, 0)
    }

    /// The opening in the bottom border, below the last logical cell.
    pub fn exit(&self) -> Coord {
        (self.width * 2 - 1, self.height * 2)
    }

    /// Opens the entrance and exit together with the interior cells they lead to.
    pub fn carve_openings(&mut self) {
        let (entrance, exit) = (self.entrance(), self.exit());
        self.open(entrance);
        self.open((entrance.0, entrance.1 + 1));
        self.open(exit);
        self.open((exit.0, exit.1 - 1));
    }

    /// Iterates over the array coordinates of all logical cells, row by row.
    pub fn logical_cells(&self) -> impl Iterator<Item = Coord> + use<> {
        let (width, height) = (self.width, self.height);
        (0..height).flat_map(move |y| (0..width).map(move |x| (x * 2 + 1, y * 2 + 1)))
    }
}

impl std::ops::Index<Coord> for Grid {
    type Output = Cell;

    fn index(&self, index: Coord) -> &Self::Output {
        &self.data[self.ravel_index(index.0, index.1)]
    }
}
