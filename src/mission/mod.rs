//! Mission state machines.
//!
//! A mission is a per-robot plan that survives across turns while the robot
//! objects themselves are rebuilt from every feed. Each variant owns a
//! mutable target and its transient progress flags, produces the next wire
//! action for its robot, and reports its own completion.
//!
//! A closed enum keeps the state machines exhaustive and lets the
//! opportunistic trap trigger sit in a single wrapper ahead of every
//! variant's own logic.

pub mod roster;

use crate::ledger::HoleLedger;
use crate::protocol::Action;
use crate::world::{Coord, Item, Robot, World, REQUEST_COOLDOWN};

/// Rows shifted when a dig approach turns out to be rival-dug.
///
/// Single-step and re-evaluated every turn; treated as tunable policy,
/// not a contract.
const ORE_RETARGET_DY: i32 = 1;

/// Columns shifted toward home when a radar deposit cell has gone bad.
const RADAR_RETARGET_DX: i32 = 1;

/// An active assignment for one robot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mission {
    /// Walk to a fixed coordinate.
    MoveTo { target: Coord },
    /// Dig ore at the target and carry it back to the home column.
    DigOre { target: Coord, just_dug: bool },
    /// Fetch a radar at home and bury it at the target.
    PlaceRadar { target: Coord, acquired: bool },
    /// Outnumbered play: hold the home column, spring aligned traps,
    /// stockpile trap requests, keep to hole-free rows.
    Denial,
}

impl Mission {
    pub fn move_to(target: Coord) -> Mission {
        Mission::MoveTo { target }
    }

    pub fn dig_ore(target: Coord) -> Mission {
        Mission::DigOre { target, just_dug: false }
    }

    pub fn place_radar(target: Coord) -> Mission {
        Mission::PlaceRadar { target, acquired: false }
    }

    /// The coordinate a dig-ore mission is claiming, if any.
    pub fn claimed_ore(&self) -> Option<Coord> {
        match self {
            Mission::DigOre { target, .. } => Some(*target),
            _ => None,
        }
    }

    /// The radar spot a placement mission is claiming, if any.
    pub fn claimed_radar_spot(&self) -> Option<Coord> {
        match self {
            Mission::PlaceRadar { target, .. } => Some(*target),
            _ => None,
        }
    }

    /// Produces the robot's action for this turn.
    ///
    /// The opportunistic trap trigger is checked first for every variant:
    /// a visible trap within reach with at least two rivals on top of it is
    /// worth more than whatever the mission was doing.
    pub fn next_action(&mut self, robot: Robot, world: &mut World, ledger: &mut HoleLedger) -> Action {
        if let Some(trap) = springable_trap(robot, world) {
            ledger.record_self_dig(trap);
            return Action::dig(trap, "spring trap");
        }

        match self {
            Mission::MoveTo { target } => Action::move_to(*target, format!("move to {}", target)),
            Mission::DigOre { target, just_dug } => {
                dig_ore_action(target, just_dug, robot, world, ledger)
            }
            Mission::PlaceRadar { target, acquired } => {
                place_radar_action(target, acquired, robot, world, ledger)
            }
            Mission::Denial => denial_action(robot, world, ledger),
        }
    }

    /// Whether this mission is finished and should be replaced.
    ///
    /// Evaluated lazily at the start of the turn in which the mission would
    /// be used again; once true the roster discards the mission.
    pub fn is_completed(&self, robot: Robot, world: &World) -> bool {
        match self {
            Mission::MoveTo { target } => robot.pos.distance(*target) == 0,
            Mission::DigOre { target, just_dug } => {
                let delivered = robot.at_home() && robot.item == Item::Ore;
                let exhausted = *just_dug && robot.item == Item::None;
                delivered || exhausted || world.trap_at(*target)
            }
            Mission::PlaceRadar { target, acquired } => {
                let deployed = *acquired && robot.item == Item::None;
                deployed || world.trap_at(*target)
            }
            Mission::Denial => alive_count(&world.my_robots) >= alive_count(&world.rival_robots),
        }
    }
}

impl std::fmt::Display for Mission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mission::MoveTo { target } => write!(f, "move to {}", target),
            Mission::DigOre { target, .. } => write!(f, "dig ore {}", target),
            Mission::PlaceRadar { target, .. } => write!(f, "place radar {}", target),
            Mission::Denial => write!(f, "denial"),
        }
    }
}

fn alive_count(robots: &[Robot]) -> usize {
    robots.iter().filter(|r| !r.is_dead()).count()
}

/// Finds a visible trap within dig range of `robot` that has at least two
/// rival robots in blast range.
fn springable_trap(robot: Robot, world: &World) -> Option<Coord> {
    world
        .traps
        .iter()
        .map(|t| t.pos)
        .find(|&pos| robot.pos.distance(pos) <= 1 && world.rivals_adjacent_to(pos) >= 2)
}

/// The cell a robot should stand on to dig `target`: one step short on the
/// home side, so the robot itself never stands in the blast cell.
fn approach_point(target: Coord) -> Coord {
    Coord::new((target.x - 1).max(0), target.y)
}

fn dig_ore_action(
    target: &mut Coord,
    just_dug: &mut bool,
    robot: Robot,
    world: &mut World,
    ledger: &mut HoleLedger,
) -> Action {
    if robot.item == Item::Ore {
        return Action::move_to(robot.pos.home(), "deliver ore");
    }

    if robot.pos.distance(*target) <= 1 {
        *just_dug = true;
        ledger.record_self_dig(*target);
        return Action::dig(*target, format!("dig ore {}", target));
    }

    // A robot still at home loses nothing by grabbing a trap first.
    if robot.at_home() && world.trap_cooldown == 0 {
        world.trap_cooldown = REQUEST_COOLDOWN;
        return Action::request(Item::Trap, "stock a trap");
    }

    let mut approach = approach_point(*target);
    if ledger.was_dug_by_rival(approach, &world.grid) {
        *target = Coord::new(target.x, target.y + ORE_RETARGET_DY)
            .clamped(world.width(), world.height());
        approach = approach_point(*target);
    }
    Action::move_to(approach, format!("toward ore {}", target))
}

fn place_radar_action(
    target: &mut Coord,
    acquired: &mut bool,
    robot: Robot,
    world: &mut World,
    ledger: &mut HoleLedger,
) -> Action {
    match robot.item {
        Item::Radar => {
            *acquired = true;
            if robot.pos.distance(*target) <= 1 {
                if ledger.was_dug_by_rival(*target, &world.grid) || world.trap_at(*target) {
                    *target = Coord::new((target.x - RADAR_RETARGET_DX).max(1), target.y);
                }
                if robot.pos.distance(*target) <= 1 {
                    ledger.record_self_dig(*target);
                    return Action::dig(*target, format!("bury radar {}", target));
                }
            }
            Action::move_to(*target, format!("carry radar {}", target))
        }
        Item::None => {
            if robot.at_home() {
                world.radar_cooldown = REQUEST_COOLDOWN;
                Action::request(Item::Radar, "fetch radar")
            } else {
                Action::move_to(robot.pos.home(), "home for radar")
            }
        }
        _ => Action::move_to(robot.pos.home(), "home"),
    }
}

fn denial_action(robot: Robot, world: &mut World, ledger: &mut HoleLedger) -> Action {
    if !robot.at_home() {
        return Action::move_to(robot.pos.home(), "fall back");
    }

    // A trap on our own row with a rival cluster on it is worth walking to.
    let aligned = world
        .traps
        .iter()
        .map(|t| t.pos)
        .find(|&pos| pos.y == robot.pos.y && world.rivals_adjacent_to(pos) >= 2);
    if let Some(pos) = aligned {
        if robot.pos.distance(pos) <= 1 {
            ledger.record_self_dig(pos);
            return Action::dig(pos, "spring trap");
        }
        return Action::move_to(pos, "close on trap");
    }

    if world.trap_cooldown == 0 {
        world.trap_cooldown = REQUEST_COOLDOWN;
        return Action::request(Item::Trap, "stock a trap");
    }

    // Sit on the nearest row with no known hole; wait if there is none.
    let safe_row = (0..world.height())
        .filter(|&y| world.grid.row_is_hole_free(y))
        .min_by_key(|&y| (y - robot.pos.y).abs());
    match safe_row {
        Some(y) if y != robot.pos.y => Action::move_to(Coord::new(robot.pos.x, y), "safe row"),
        _ => Action::wait("hold"),
    }
}
