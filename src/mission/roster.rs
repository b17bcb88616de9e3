//! Mission assignment.
//!
//! Maps stable robot ids to their active missions and creates new ones for
//! idle robots. The priority policy is strict: radar scouting while the map
//! is dark, then the nearest claimable ore cell, then a denial posture when
//! outnumbered, then a deterministic forward probe. Every path produces a
//! mission, so a robot is never left idle.

use std::collections::HashMap;

use super::Mission;
use crate::ledger::HoleLedger;
use crate::world::{Coord, Robot, World, REQUEST_COOLDOWN};

/// Below this many revealed ore cells the map is considered dark and radar
/// coverage outranks harvesting.
pub const SCOUT_THRESHOLD: usize = 4;

/// Columns ahead of the robot probed by the fallback mission.
pub const FALLBACK_DX: i32 = 4;

/// Per-robot mission store, keyed by stable robot id.
#[derive(Debug, Default)]
pub struct MissionRoster {
    missions: HashMap<i32, Mission>,
}

impl MissionRoster {
    pub fn new() -> Self {
        MissionRoster::default()
    }

    /// True if `robot` holds a live mission.
    ///
    /// A stored mission that reports completion is dropped here, so the
    /// caller sees it as absent and assigns a fresh one.
    pub fn has_active(&mut self, robot: Robot, world: &World) -> bool {
        match self.missions.get(&robot.id) {
            Some(mission) if mission.is_completed(robot, world) => {
                self.missions.remove(&robot.id);
                false
            }
            Some(_) => true,
            None => false,
        }
    }

    /// The robot's current mission, for action production.
    pub fn get_mut(&mut self, robot_id: i32) -> Option<&mut Mission> {
        self.missions.get_mut(&robot_id)
    }

    /// Installs a mission directly, bypassing the priority policy.
    /// Used for the first-turn radar pre-assignment.
    pub fn preassign(&mut self, robot_id: i32, mission: Mission) {
        self.missions.insert(robot_id, mission);
    }

    /// Number of live dig-ore missions claiming `pos`.
    fn claims_on(&self, pos: Coord) -> usize {
        self.missions
            .values()
            .filter(|m| m.claimed_ore() == Some(pos))
            .count()
    }

    /// Radar spots claimed by live placement missions.
    fn claimed_radar_spots(&self) -> Vec<Coord> {
        self.missions
            .values()
            .filter_map(|m| m.claimed_radar_spot())
            .collect()
    }

    /// Picks the nearest revealed ore cell `robot` may claim.
    ///
    /// A cell is skipped once the robots already assigned to it match its
    /// remaining known yield, when it carries a trap marker, and when its
    /// hole was dug by the rival.
    fn recommend_ore_position(
        &self,
        robot: Robot,
        world: &World,
        ledger: &HoleLedger,
    ) -> Option<Coord> {
        let mut cells: Vec<_> = world.grid.revealed_ore_cells().collect();
        cells.sort_by_key(|(pos, _)| pos.distance(robot.pos));

        cells
            .into_iter()
            .find(|&(pos, cell)| {
                self.claims_on(pos) < cell.ore as usize
                    && !world.trap_at(pos)
                    && !ledger.was_dug_by_rival(pos, &world.grid)
            })
            .map(|(pos, _)| pos)
    }

    /// Creates and stores a new mission for an idle robot.
    ///
    /// Consumes the radar cooldown speculatively when it hands out a
    /// placement mission, so the next robot evaluated this turn cannot
    /// claim the same scarce radar.
    pub fn assign(&mut self, robot: Robot, world: &mut World, ledger: &HoleLedger) -> &mut Mission {
        let mission = self.choose(robot, world, ledger);
        self.missions.insert(robot.id, mission);
        self.missions.get_mut(&robot.id).expect("just inserted")
    }

    fn choose(&self, robot: Robot, world: &mut World, ledger: &HoleLedger) -> Mission {
        let revealed = world.grid.revealed_ore_cells().count();
        if revealed < SCOUT_THRESHOLD && world.radar_cooldown == 0 {
            let claimed = self.claimed_radar_spots();
            let spot = world.recommend_radar_position(robot.pos, &claimed);
            world.radar_cooldown = REQUEST_COOLDOWN;
            return Mission::place_radar(spot);
        }

        if let Some(pos) = self.recommend_ore_position(robot, world, ledger) {
            return Mission::dig_ore(pos);
        }

        let mine = world.my_robots.iter().filter(|r| !r.is_dead()).count();
        let rivals = world.rival_robots.iter().filter(|r| !r.is_dead()).count();
        if mine < rivals && world.trap_cooldown == 0 {
            return Mission::Denial;
        }

        // Nothing claimable: probe a few columns ahead rather than idle.
        let probe = Coord::new(robot.pos.x + FALLBACK_DX, robot.pos.y)
            .clamped(world.width(), world.height());
        Mission::dig_ore(probe)
    }
}
