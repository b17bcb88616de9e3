//! Self-excavation ledger.
//!
//! Records every cell the engine itself has dug, so that holes observed on
//! the grid can be split into our own (safe to stand near) and rival-dug
//! (possibly trapped, treated as contested ground). The ledger only ever
//! grows for the duration of a match.

use std::collections::HashSet;

use crate::world::{Coord, Grid};

/// Append-only record of cells dug by our own robots.
#[derive(Debug, Default, Clone)]
pub struct HoleLedger {
    dug: HashSet<Coord>,
}

impl HoleLedger {
    pub fn new() -> Self {
        HoleLedger::default()
    }

    /// Records a dig the engine is about to issue at `pos`.
    ///
    /// Called exactly once per dig action, atomically with choosing it.
    pub fn record_self_dig(&mut self, pos: Coord) {
        self.dug.insert(pos);
    }

    /// True if we have dug at `pos` at some point this match.
    pub fn dug_by_us(&self, pos: Coord) -> bool {
        self.dug.contains(&pos)
    }

    /// True iff the grid shows a hole at `pos` that we never dug ourselves.
    pub fn was_dug_by_rival(&self, pos: Coord, grid: &Grid) -> bool {
        grid.cell(pos).hole && !self.dug.contains(&pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrecorded_hole_is_rival_dug() {
        let mut grid = Grid::new(30, 15);
        grid.update(Coord::new(4, 4), None, true);
        let ledger = HoleLedger::new();
        assert!(ledger.was_dug_by_rival(Coord::new(4, 4), &grid));
    }

    #[test]
    fn recorded_dig_is_never_rival_dug() {
        let mut grid = Grid::new(30, 15);
        let mut ledger = HoleLedger::new();
        ledger.record_self_dig(Coord::new(4, 4));
        grid.update(Coord::new(4, 4), None, true);
        assert!(!ledger.was_dug_by_rival(Coord::new(4, 4), &grid));
        // Later hole reports at the same cell change nothing.
        grid.update(Coord::new(4, 4), Some(1), true);
        assert!(!ledger.was_dug_by_rival(Coord::new(4, 4), &grid));
    }

    #[test]
    fn no_hole_means_no_rival_dig() {
        let grid = Grid::new(30, 15);
        let ledger = HoleLedger::new();
        assert!(!ledger.was_dug_by_rival(Coord::new(1, 1), &grid));
    }
}
