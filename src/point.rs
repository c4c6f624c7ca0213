use std::fmt;

/// A position or displacement on the play field, in pixel units.
///
/// Game positions are always multiples of the configured cell size.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }

    pub fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn scale(self, factor: i32) -> Point {
        Point::new(self.x * factor, self.y * factor)
    }

    pub fn reverse(self) -> Point {
        self.scale(-1)
    }

    /// Folds the point back into `[0, max_x) x [0, max_y)`.
    pub fn wrap(self, max_x: i32, max_y: i32) -> Point {
        Point::new(self.x.rem_euclid(max_x), self.y.rem_euclid(max_y))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Extents of the play field in pixel units, plus the grid unit.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Field {
    pub cell_size: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Field {
    pub fn new(cell_size: i32, columns: i32, rows: i32) -> Self {
        Field { cell_size, max_x: columns * cell_size, max_y: rows * cell_size }
    }

    pub fn columns(&self) -> i32 {
        self.max_x / self.cell_size
    }

    pub fn rows(&self) -> i32 {
        self.max_y / self.cell_size
    }

    pub fn center(&self) -> Point {
        Point::new(self.max_x / 2, self.max_y / 2)
    }

    /// Snaps a cell coordinate to its pixel position.
    pub fn cell(&self, column: i32, row: i32) -> Point {
        Point::new(column, row).scale(self.cell_size)
    }
}
