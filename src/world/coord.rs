//! Grid coordinates.
//!
//! Integer (x, y) pairs on a bounded grid with the Manhattan metric
//! (movement and adjacency are 4-directional). Column 0 is the home
//! column where ore is delivered and equipment is requested.

use serde::Serialize;

/// A position on the grid, or the off-grid sentinel for destroyed entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

/// Off-grid sentinel reported for destroyed entities.
pub const OFF_GRID: Coord = Coord { x: -1, y: -1 };

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Coord { x, y }
    }

    /// Manhattan distance to `other`.
    pub fn distance(self, other: Coord) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// True for the off-grid sentinel.
    pub fn is_off_grid(self) -> bool {
        self == OFF_GRID
    }

    /// The home-column cell in this coordinate's row.
    pub fn home(self) -> Coord {
        Coord::new(0, self.y)
    }

    /// True if this coordinate lies in the home column.
    pub fn at_home(self) -> bool {
        self.x == 0
    }

    /// Clamps the coordinate into a `width` x `height` grid.
    pub fn clamped(self, width: i32, height: i32) -> Coord {
        Coord::new(self.x.clamp(0, width - 1), self.y.clamp(0, height - 1))
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_distance() {
        assert_eq!(Coord::new(0, 0).distance(Coord::new(3, 4)), 7);
        assert_eq!(Coord::new(5, 5).distance(Coord::new(5, 5)), 0);
        assert_eq!(Coord::new(2, 1).distance(Coord::new(1, 2)), 2);
    }

    #[test]
    fn off_grid_sentinel() {
        assert!(OFF_GRID.is_off_grid());
        assert!(!Coord::new(0, 0).is_off_grid());
    }

    #[test]
    fn home_column() {
        let c = Coord::new(7, 3);
        assert_eq!(c.home(), Coord::new(0, 3));
        assert!(!c.at_home());
        assert!(c.home().at_home());
    }

    #[test]
    fn clamped_stays_in_bounds() {
        assert_eq!(Coord::new(-2, 20).clamped(30, 15), Coord::new(0, 14));
        assert_eq!(Coord::new(10, 5).clamped(30, 15), Coord::new(10, 5));
    }
}
