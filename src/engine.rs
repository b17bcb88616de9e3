//! Turn orchestration.
//!
//! Owns the persistent match state (accumulated world, self-dig ledger,
//! mission roster) and turns each parsed feed into one action per owned
//! robot, in feed order. The whole pass is synchronous; scarce resources
//! are claimed by mutating shared counters as each robot is decided, so
//! feed order is the deterministic tie-break for contention.

use crate::ledger::HoleLedger;
use crate::mission::roster::MissionRoster;
use crate::mission::Mission;
use crate::protocol::{Action, TurnFeed};
use crate::world::{Robot, World, REQUEST_COOLDOWN};

/// Persistent engine state for one match.
pub struct Engine {
    pub world: World,
    pub ledger: HoleLedger,
    pub roster: MissionRoster,
    turn: u32,
    trace: bool,
}

impl Engine {
    /// Creates an engine for a grid of the given dimensions.
    pub fn new(width: i32, height: i32) -> Self {
        Engine {
            world: World::new(width, height),
            ledger: HoleLedger::new(),
            roster: MissionRoster::new(),
            turn: 0,
            trace: false,
        }
    }

    /// Enables per-robot mission traces on stderr.
    pub fn with_trace(mut self) -> Self {
        self.trace = true;
        self
    }

    /// Ingests one turn of parsed input.
    pub fn apply_feed(&mut self, feed: &TurnFeed) {
        self.world.apply(feed);
    }

    /// Produces exactly one action per owned robot, in feed order.
    pub fn plan_turn(&mut self) -> Vec<Action> {
        let robots: Vec<Robot> = self.world.my_robots.clone();

        if self.turn == 0 {
            self.opening_radar_preassignment(&robots);
        }
        self.turn += 1;

        let mut actions = Vec::with_capacity(robots.len());
        for robot in robots {
            if robot.is_dead() {
                actions.push(Action::wait("down"));
                continue;
            }

            if !self.roster.has_active(robot, &self.world) {
                self.roster.assign(robot, &mut self.world, &self.ledger);
            }
            let mission = self
                .roster
                .get_mut(robot.id)
                .expect("assignment always yields a mission");
            if self.trace {
                eprintln!("robot {} on mission {}", robot.id, mission);
            }
            actions.push(mission.next_action(robot, &mut self.world, &mut self.ledger));
        }
        actions
    }

    /// Opening move: with the whole squad still on the home column, send
    /// whoever stands closest to the first constellation spot for the
    /// radar, and claim the radar before the generic loop runs.
    fn opening_radar_preassignment(&mut self, robots: &[Robot]) {
        if robots.is_empty() || !robots.iter().all(|r| r.at_home()) {
            return;
        }
        let target = self.world.radar_spots()[0];
        let scout = robots
            .iter()
            .min_by_key(|r| r.pos.distance(target))
            .expect("squad is non-empty");
        self.roster.preassign(scout.id, Mission::place_radar(target));
        self.world.radar_cooldown = REQUEST_COOLDOWN;
    }
}
