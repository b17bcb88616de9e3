//! Per-cell knowledge state.
//!
//! The grid accumulates what the turn feed has revealed about each cell:
//! remaining ore (only meaningful once the cell has been scanned) and
//! whether a hole has been dug there by either side. Cell knowledge is
//! mutated only by incoming turn snapshots; `known` never reverts once set.

use super::coord::Coord;

/// Knowledge about a single cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cell {
    /// Remaining ore units; only valid while `known` is true.
    pub ore: i32,
    /// Whether this cell's content has ever been revealed by a radar.
    pub known: bool,
    /// Whether a hole has been dug here, by either side.
    pub hole: bool,
}

/// The bot's accumulated view of the whole grid.
#[derive(Debug, Clone)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates an all-unknown grid of the given dimensions.
    pub fn new(width: i32, height: i32) -> Self {
        Grid {
            width,
            height,
            cells: vec![Cell::default(); (width * height) as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    fn index(&self, pos: Coord) -> usize {
        (pos.y * self.width + pos.x) as usize
    }

    /// Returns the cell at `pos`. Callers must pass an in-bounds coordinate.
    pub fn cell(&self, pos: Coord) -> Cell {
        self.cells[self.index(pos)]
    }

    /// Applies one cell reading from the turn feed.
    ///
    /// `ore` is `None` while the cell has not been scanned; a scanned value
    /// marks the cell known and overwrites the ore count. The hole flag is
    /// taken as supplied by the feed.
    pub fn update(&mut self, pos: Coord, ore: Option<i32>, hole: bool) {
        let idx = self.index(pos);
        let cell = &mut self.cells[idx];
        cell.hole = hole;
        if let Some(amount) = ore {
            cell.known = true;
            cell.ore = amount;
        }
    }

    /// All cells known to still contain ore, in row-major order.
    ///
    /// Ordering is deliberately unspecified beyond determinism; callers
    /// sort by distance from their own reference point.
    pub fn revealed_ore_cells(&self) -> impl Iterator<Item = (Coord, Cell)> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.width).filter_map(move |x| {
                let pos = Coord::new(x, y);
                let cell = self.cell(pos);
                (cell.known && cell.ore > 0).then_some((pos, cell))
            })
        })
    }

    /// True if no cell in row `y` has a hole.
    pub fn row_is_hole_free(&self, y: i32) -> bool {
        (0..self.width).all(|x| !self.cell(Coord::new(x, y)).hole)
    }
}
