//! Entities and carried items.
//!
//! Robots, deployed radars, and visible trap markers, rebuilt wholesale
//! from the turn feed each turn. Mission state that must survive a turn
//! lives outside these objects, keyed by the stable entity id.

use super::coord::Coord;

/// What a robot is carrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Item {
    None,
    Radar,
    Trap,
    Ore,
}

impl Item {
    /// Parses an item from its wire code (-1 none, 2 radar, 3 trap, 4 ore).
    pub fn from_code(code: i32) -> Option<Item> {
        match code {
            -1 => Some(Item::None),
            2 => Some(Item::Radar),
            3 => Some(Item::Trap),
            4 => Some(Item::Ore),
            _ => None,
        }
    }

    /// Returns the keyword used by `REQUEST` for requestable items.
    pub fn request_keyword(self) -> Option<&'static str> {
        match self {
            Item::Radar => Some("RADAR"),
            Item::Trap => Some("TRAP"),
            Item::None | Item::Ore => None,
        }
    }
}

/// The kind of a visible entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    MyRobot,
    RivalRobot,
    Radar,
    Trap,
}

impl EntityKind {
    /// Parses an entity kind from its wire code (0-3).
    pub fn from_code(code: i32) -> Option<EntityKind> {
        match code {
            0 => Some(EntityKind::MyRobot),
            1 => Some(EntityKind::RivalRobot),
            2 => Some(EntityKind::Radar),
            3 => Some(EntityKind::Trap),
            _ => None,
        }
    }
}

/// A robot, owned or rival.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Robot {
    pub id: i32,
    pub pos: Coord,
    pub item: Item,
}

impl Robot {
    pub fn new(id: i32, pos: Coord, item: Item) -> Self {
        Robot { id, pos, item }
    }

    /// True once the robot has been destroyed (off-grid sentinel position).
    pub fn is_dead(self) -> bool {
        self.pos.is_off_grid()
    }

    /// True if the robot stands in the home column.
    pub fn at_home(self) -> bool {
        self.pos.at_home()
    }
}

/// A deployed radar or a visible trap marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    pub id: i32,
    pub pos: Coord,
}
