//! World model and per-turn snapshot types.
//!
//! Contains the core data structures for coordinates, the accumulated
//! cell-knowledge grid, entities, and the overall world state.

pub mod coord;
pub mod entity;
pub mod grid;
pub mod state;

pub use coord::{Coord, OFF_GRID};
pub use entity::{EntityKind, Item, Marker, Robot};
pub use grid::{Cell, Grid};
pub use state::{World, REQUEST_COOLDOWN};
