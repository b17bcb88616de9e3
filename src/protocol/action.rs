//! Turn output actions.
//!
//! The four wire forms a robot can emit each turn. Every action carries a
//! free-form annotation rendered after the command; the referee ignores it,
//! but it makes replays readable.

use crate::world::{Coord, Item};

/// One action for one robot, exactly one emitted per robot per turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Wait { note: String },
    Move { dest: Coord, note: String },
    Dig { pos: Coord, note: String },
    Request { item: Item, note: String },
}

impl Action {
    pub fn wait(note: impl Into<String>) -> Action {
        Action::Wait { note: note.into() }
    }

    pub fn move_to(dest: Coord, note: impl Into<String>) -> Action {
        Action::Move { dest, note: note.into() }
    }

    pub fn dig(pos: Coord, note: impl Into<String>) -> Action {
        Action::Dig { pos, note: note.into() }
    }

    /// Builds a request for a requestable item. Panics on `None`/`Ore`,
    /// which have no wire keyword; mission logic never asks for those.
    pub fn request(item: Item, note: impl Into<String>) -> Action {
        assert!(item.request_keyword().is_some(), "item {:?} is not requestable", item);
        Action::Request { item, note: note.into() }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Wait { note } => {
                write!(f, "WAIT")?;
                write_note(f, note)
            }
            Action::Move { dest, note } => {
                write!(f, "MOVE {} {}", dest.x, dest.y)?;
                write_note(f, note)
            }
            Action::Dig { pos, note } => {
                write!(f, "DIG {} {}", pos.x, pos.y)?;
                write_note(f, note)
            }
            Action::Request { item, note } => {
                let keyword = item.request_keyword().expect("checked at construction");
                write!(f, "REQUEST {}", keyword)?;
                write_note(f, note)
            }
        }
    }
}

fn write_note(f: &mut std::fmt::Formatter<'_>, note: &str) -> std::fmt::Result {
    if note.is_empty() {
        Ok(())
    } else {
        write!(f, " {}", note)
    }
}
