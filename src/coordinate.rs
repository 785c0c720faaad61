use core::fmt;
use core::ops::Add;
use serde::{Deserialize, Serialize};

/// `√2 − 2`, the correction applied to the diagonal part of an octile distance.
const DIAGONAL_CORRECTION: f64 = std::f64::consts::SQRT_2 - 2.0;

/// A grid cell addressed as `(row, col)`. The derived ordering compares the row first and
/// then the column, which is the tie-breaking order used by the frontier.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Coordinate {
    pub row: i32,
    pub col: i32,
}

impl Coordinate {
    pub const fn new(row: i32, col: i32) -> Coordinate {
        Coordinate { row, col }
    }

    /// Unit direction pointing from `self` towards `other`, with each component clamped to
    /// {-1, 0, 1}. Returns [None] if both coordinates are equal.
    pub fn dir_to(&self, other: &Coordinate) -> Option<Direction> {
        Direction::from_delta(other.row - self.row, other.col - self.col)
    }

    /// Number of unit steps (straight or diagonal) needed to go from `self` to `other`
    /// on an empty grid, the [Chebyshev distance](https://en.wikipedia.org/wiki/Chebyshev_distance).
    pub fn move_distance(&self, other: &Coordinate) -> i32 {
        (self.row - other.row)
            .abs()
            .max((self.col - other.col).abs())
    }

    /// Whether `other` lies on one of the eight rays leaving `self`.
    pub fn is_aligned_with(&self, other: &Coordinate) -> bool {
        let d_row = (self.row - other.row).abs();
        let d_col = (self.col - other.col).abs();
        d_row == 0 || d_col == 0 || d_row == d_col
    }
}

impl Add<Direction> for Coordinate {
    type Output = Coordinate;

    fn add(self, dir: Direction) -> Coordinate {
        let (d_row, d_col) = dir.delta();
        Coordinate::new(self.row + d_row, self.col + d_col)
    }
}

impl From<(i32, i32)> for Coordinate {
    fn from((row, col): (i32, i32)) -> Coordinate {
        Coordinate::new(row, col)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Octile distance between two cells: unit cost for straight steps and `√2` for diagonal
/// ones. Admissible for 8-directional movement, and exact for any unobstructed straight or
/// diagonal run, which is why it also prices a jump.
pub fn octile(a: &Coordinate, b: &Coordinate) -> f64 {
    let dx = (a.row - b.row).abs();
    let dy = (a.col - b.col).abs();
    (dx + dy) as f64 + DIAGONAL_CORRECTION * dx.min(dy) as f64
}

/// The eight unit moves on the grid. North decreases the row, east increases the column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// Straight moves first, then diagonals.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
        Direction::NorthWest,
        Direction::NorthEast,
        Direction::SouthWest,
        Direction::SouthEast,
    ];

    /// `(row, col)` components of the move.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::NorthEast => (-1, 1),
            Direction::East => (0, 1),
            Direction::SouthEast => (1, 1),
            Direction::South => (1, 0),
            Direction::SouthWest => (1, -1),
            Direction::West => (0, -1),
            Direction::NorthWest => (-1, -1),
        }
    }

    /// Builds the direction of an arbitrary offset by taking the sign of each component.
    pub fn from_delta(d_row: i32, d_col: i32) -> Option<Direction> {
        match (d_row.signum(), d_col.signum()) {
            (-1, 0) => Some(Direction::North),
            (-1, 1) => Some(Direction::NorthEast),
            (0, 1) => Some(Direction::East),
            (1, 1) => Some(Direction::SouthEast),
            (1, 0) => Some(Direction::South),
            (1, -1) => Some(Direction::SouthWest),
            (0, -1) => Some(Direction::West),
            (-1, -1) => Some(Direction::NorthWest),
            _ => None,
        }
    }

    pub const fn diagonal(self) -> bool {
        matches!(
            self,
            Direction::NorthEast
                | Direction::SouthEast
                | Direction::SouthWest
                | Direction::NorthWest
        )
    }

    /// The vertical part of the move, if any.
    pub fn row_dir(self) -> Option<Direction> {
        Direction::from_delta(self.delta().0, 0)
    }

    /// The horizontal part of the move, if any.
    pub fn col_dir(self) -> Option<Direction> {
        Direction::from_delta(0, self.delta().1)
    }
}
