//! Shared value types for the agent core.
//!
//! Cells and walls are plain `Copy` values compared structurally so they can be
//! used directly as `HashSet` keys.

use std::fmt;

/// Unit grid square identified by `(col, row)`. Row grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

impl Cell {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Cell containing a continuous position (floor of each axis).
    pub fn containing(pos: Position) -> Self {
        Self {
            col: pos.x.floor() as i32,
            row: pos.y.floor() as i32,
        }
    }

    /// Continuous coordinates of the cell center.
    pub fn center(self) -> Position {
        Position {
            x: f64::from(self.col) + 0.5,
            y: f64::from(self.row) + 0.5,
        }
    }

    pub fn neighbor(self, dir: Direction) -> Self {
        let (dc, dr) = dir.offset();
        Self {
            col: self.col + dc,
            row: self.row + dr,
        }
    }

    pub fn is_adjacent(self, other: Cell) -> bool {
        u64::from(self.col.abs_diff(other.col)) + u64::from(self.row.abs_diff(other.row)) == 1
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.col, self.row)
    }
}

/// Latest continuous position reported by the simulator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Position) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Grid step directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Down,
    Right,
    Up,
    Left,
}

/// Neighbor evaluation order used by the planner.
pub const DIRECTIONS: [Direction; 4] = [
    Direction::Down,
    Direction::Right,
    Direction::Up,
    Direction::Left,
];

impl Direction {
    /// `(d_col, d_row)` step for this direction.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::Down => (0, 1),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Left => (-1, 0),
        }
    }
}

/// A wall segment between two grid points.
///
/// Endpoints are stored in canonical order (lexicographically smaller point
/// first), so a wall reported as `(1,0)->(0,0)` equals one reported as
/// `(0,0)->(1,0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Wall {
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
}

impl Wall {
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        if (x0, y0) <= (x1, y1) {
            Self { x0, y0, x1, y1 }
        } else {
            Self {
                x0: x1,
                y0: y1,
                x1: x0,
                y1: y0,
            }
        }
    }

    /// The unit edge separating two adjacent cells, or `None` if they are not adjacent.
    pub fn between(a: Cell, b: Cell) -> Option<Self> {
        if !a.is_adjacent(b) {
            return None;
        }
        let wall = if a.col == b.col {
            // Horizontal edge on the line y = max(row).
            let y = a.row.max(b.row);
            Wall::new(a.col, y, a.col + 1, y)
        } else {
            // Vertical edge on the line x = max(col).
            let x = a.col.max(b.col);
            Wall::new(x, a.row, x, a.row + 1)
        };
        Some(wall)
    }

    pub fn endpoints(self) -> ((i32, i32), (i32, i32)) {
        ((self.x0, self.y0), (self.x1, self.y1))
    }

    /// Split an axis-aligned segment into unit edges on the grid `0..=limit`.
    ///
    /// Only the part of the segment inside the grid is split; the rest can never
    /// separate two grid cells. Segments with nothing to split (zero-length,
    /// diagonal, or entirely off the grid) are returned unchanged.
    pub fn unit_edges(self, limit: i32) -> Vec<Wall> {
        let grid = 0..=limit;
        if self.y0 == self.y1 && grid.contains(&self.y0) {
            let (lo, hi) = (self.x0.max(0), self.x1.min(limit));
            if lo < hi {
                return (lo..hi)
                    .map(|x| Wall::new(x, self.y0, x + 1, self.y0))
                    .collect();
            }
        } else if self.x0 == self.x1 && grid.contains(&self.x0) {
            let (lo, hi) = (self.y0.max(0), self.y1.min(limit));
            if lo < hi {
                return (lo..hi)
                    .map(|y| Wall::new(self.x0, y, self.x0, y + 1))
                    .collect();
            }
        }
        vec![self]
    }
}

impl fmt::Display for Wall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})->({},{})", self.x0, self.y0, self.x1, self.y1)
    }
}
