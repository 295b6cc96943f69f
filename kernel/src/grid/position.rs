//! `Position` and the four-directional move set.
//!
//! A position is `(row, col)` with row 0 at the top of the map. Coordinates
//! are signed so that a neighbor one step outside the grid is representable;
//! bounds are owned by the map, not by the coordinate type.

use std::fmt;

/// A cell coordinate on a 2D grid.
///
/// `Ord` is row-major, which gives deterministic iteration in
/// `BTreeMap<Position, _>` indexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: i64,
    pub col: i64,
}

impl Position {
    #[must_use]
    pub const fn new(row: i64, col: i64) -> Self {
        Self { row, col }
    }

    /// The neighbor one step away in `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dr, dc) = direction.delta();
        Self {
            row: self.row.saturating_add(dr),
            col: self.col.saturating_add(dc),
        }
    }

    /// Manhattan distance to `other`.
    #[must_use]
    pub fn manhattan(self, other: Self) -> i64 {
        manhattan(self, other)
    }

    /// Convert to `(row, col)` array indices, or `None` if either is negative.
    #[must_use]
    pub fn to_indices(self) -> Option<(usize, usize)> {
        let row = usize::try_from(self.row).ok()?;
        let col = usize::try_from(self.col).ok()?;
        Some((row, col))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Cardinal move direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// `(d_row, d_col)` for one step.
    #[must_use]
    pub const fn delta(self) -> (i64, i64) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }

    /// Stable lowercase name (used in audit JSON).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Successor enumeration order. Downstream tie-breaking depends on it.
pub const CARDINAL_DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

/// `|Δrow| + |Δcol|`.
///
/// Admissible and consistent only when every traversal cost is at least 1.
/// That precondition is assumed by callers, not checked here.
#[must_use]
pub fn manhattan(a: Position, b: Position) -> i64 {
    (a.row - b.row).abs() + (a.col - b.col).abs()
}
