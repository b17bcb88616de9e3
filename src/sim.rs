//! Offline match simulation.
//!
//! A deliberately small referee that pits two engine instances against each
//! other on a seeded random grid, for whole-match exercise of the decision
//! core outside the live protocol. It models the parts of the rules the
//! engine's decisions depend on: movement budget, digging, ore pickup and
//! delivery, radar visibility, buried traps, and request cooldowns. Both
//! sides play toward the x = 0 home column; the harness measures decision
//! quality over turns, not board symmetry.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::engine::Engine;
use crate::protocol::{Action, CellReading, EntityReading, TurnFeed};
use crate::world::{Coord, EntityKind, Item, OFF_GRID};

/// Cells a robot may cross per turn.
const MOVE_BUDGET: i32 = 4;
/// Cells a radar reveals around itself (Manhattan).
const RADAR_RANGE: i32 = 4;
/// Referee cooldown after a granted equipment request.
const COOLDOWN: i32 = 5;

/// Simulation parameters.
#[derive(Debug, Clone)]
pub struct SimConfig {
    pub width: i32,
    pub height: i32,
    pub robots_per_side: usize,
    pub turns: u32,
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            width: 30,
            height: 15,
            robots_per_side: 5,
            turns: 200,
            seed: 1,
        }
    }
}

/// Outcome of one simulated match, one JSONL record per match.
#[derive(Debug, Clone, Serialize)]
pub struct MatchRecord {
    pub seed: u64,
    pub turns_played: u32,
    pub scores: [i32; 2],
    pub robots_lost: [usize; 2],
    /// Where each side's robots ended up, in id order; destroyed robots
    /// report the off-grid sentinel.
    pub final_positions: [Vec<Coord>; 2],
}

#[derive(Debug, Clone, Copy)]
struct SimRobot {
    id: i32,
    side: usize,
    pos: Coord,
    item: Item,
    alive: bool,
}

#[derive(Debug, Clone, Copy)]
struct SimMarker {
    id: i32,
    side: usize,
    pos: Coord,
}

/// Mutable referee state for one match.
struct Referee {
    width: i32,
    height: i32,
    ore: Vec<i32>,
    holes: Vec<bool>,
    robots: Vec<SimRobot>,
    radars: Vec<SimMarker>,
    traps: Vec<SimMarker>,
    /// Cooldowns per side: [radar, trap].
    cooldowns: [[i32; 2]; 2],
    scores: [i32; 2],
    next_id: i32,
}

impl Referee {
    fn new(config: &SimConfig, rng: &mut SmallRng) -> Self {
        let cells = (config.width * config.height) as usize;
        let mut ore = vec![0; cells];
        // Sparse veins away from the home column, 1-3 ore each.
        let veins = cells / 12;
        for _ in 0..veins {
            let x = rng.gen_range(4..config.width);
            let y = rng.gen_range(0..config.height);
            ore[(y * config.width + x) as usize] += rng.gen_range(1..=3);
        }

        let mut robots = Vec::new();
        let mut next_id = 0;
        for side in 0..2 {
            for i in 0..config.robots_per_side {
                let y = (i as i32 * config.height / config.robots_per_side as i32)
                    .min(config.height - 1);
                robots.push(SimRobot {
                    id: next_id,
                    side,
                    pos: Coord::new(0, y),
                    item: Item::None,
                    alive: true,
                });
                next_id += 1;
            }
        }

        Referee {
            width: config.width,
            height: config.height,
            ore,
            holes: vec![false; cells],
            robots,
            radars: Vec::new(),
            traps: Vec::new(),
            cooldowns: [[0; 2]; 2],
            scores: [0; 2],
            next_id,
        }
    }

    fn index(&self, pos: Coord) -> usize {
        (pos.y * self.width + pos.x) as usize
    }

    fn in_bounds(&self, pos: Coord) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    fn visible_to(&self, side: usize, pos: Coord) -> bool {
        self.radars
            .iter()
            .any(|r| r.side == side && r.pos.distance(pos) <= RADAR_RANGE)
    }

    /// Builds the turn feed as seen by `side`.
    fn feed_for(&self, side: usize) -> TurnFeed {
        let rival = 1 - side;
        let mut cells = Vec::with_capacity((self.width * self.height) as usize);
        for y in 0..self.height {
            for x in 0..self.width {
                let pos = Coord::new(x, y);
                let idx = self.index(pos);
                let ore = self
                    .visible_to(side, pos)
                    .then_some(self.ore[idx]);
                cells.push(CellReading { ore, hole: self.holes[idx] });
            }
        }

        let mut entities = Vec::new();
        for r in &self.robots {
            let kind = if r.side == side {
                EntityKind::MyRobot
            } else {
                EntityKind::RivalRobot
            };
            let pos = if r.alive { r.pos } else { OFF_GRID };
            // A rival's cargo is not disclosed.
            let item = if r.side == side { r.item } else { Item::None };
            entities.push(EntityReading { id: r.id, kind, pos, item });
        }
        for m in self.radars.iter().filter(|m| m.side == side) {
            entities.push(EntityReading {
                id: m.id,
                kind: EntityKind::Radar,
                pos: m.pos,
                item: Item::None,
            });
        }
        for m in self.traps.iter().filter(|m| m.side == side) {
            entities.push(EntityReading {
                id: m.id,
                kind: EntityKind::Trap,
                pos: m.pos,
                item: Item::None,
            });
        }

        TurnFeed {
            my_score: self.scores[side],
            rival_score: self.scores[rival],
            cells,
            radar_cooldown: self.cooldowns[side][0],
            trap_cooldown: self.cooldowns[side][1],
            entities,
        }
    }

    /// Applies one side's actions. `actions` is in that side's feed order,
    /// i.e. ascending robot id within the side.
    fn apply(&mut self, side: usize, actions: &[Action]) {
        let ids: Vec<i32> = self
            .robots
            .iter()
            .filter(|r| r.side == side)
            .map(|r| r.id)
            .collect();
        for (id, action) in ids.into_iter().zip(actions) {
            self.apply_one(side, id, action);
        }
    }

    fn apply_one(&mut self, side: usize, robot_id: i32, action: &Action) {
        let Some(robot_idx) = self.robots.iter().position(|r| r.id == robot_id) else {
            return;
        };
        if !self.robots[robot_idx].alive {
            return;
        }

        match action {
            Action::Wait { .. } => {}
            Action::Move { dest, .. } => {
                let dest = dest.clamped(self.width, self.height);
                self.robots[robot_idx].pos = step_toward(self.robots[robot_idx].pos, dest);
            }
            Action::Dig { pos, .. } => {
                let pos = *pos;
                if !self.in_bounds(pos) || self.robots[robot_idx].pos.distance(pos) > 1 {
                    return;
                }
                self.dig(robot_idx, pos);
            }
            Action::Request { item, .. } => {
                let slot = match item {
                    Item::Radar => 0,
                    Item::Trap => 1,
                    _ => return,
                };
                let robot = self.robots[robot_idx];
                if robot.pos.at_home()
                    && robot.item == Item::None
                    && self.cooldowns[side][slot] == 0
                {
                    self.robots[robot_idx].item = *item;
                    self.cooldowns[side][slot] = COOLDOWN;
                }
            }
        }
    }

    fn dig(&mut self, robot_idx: usize, pos: Coord) {
        let idx = self.index(pos);
        self.holes[idx] = true;

        // A buried trap of either side detonates first.
        if let Some(t) = self.traps.iter().position(|t| t.pos == pos) {
            self.traps.remove(t);
            for r in self.robots.iter_mut() {
                if r.alive && r.pos.distance(pos) <= 1 {
                    r.alive = false;
                }
            }
            return;
        }

        let robot = self.robots[robot_idx];
        match robot.item {
            Item::Radar => {
                self.radars.push(SimMarker { id: self.next_id, side: robot.side, pos });
                self.next_id += 1;
                self.robots[robot_idx].item = Item::None;
            }
            Item::Trap => {
                self.traps.push(SimMarker { id: self.next_id, side: robot.side, pos });
                self.next_id += 1;
                self.robots[robot_idx].item = Item::None;
            }
            Item::None if self.ore[idx] > 0 => {
                self.ore[idx] -= 1;
                self.robots[robot_idx].item = Item::Ore;
            }
            _ => {}
        }
    }

    /// End-of-turn bookkeeping: deliveries and cooldown decay.
    fn end_turn(&mut self) {
        for r in self.robots.iter_mut() {
            if r.alive && r.item == Item::Ore && r.pos.at_home() {
                self.scores[r.side] += 1;
                r.item = Item::None;
            }
        }
        for side in &mut self.cooldowns {
            for cd in side.iter_mut() {
                *cd = (*cd - 1).max(0);
            }
        }
    }

    fn robots_lost(&self, side: usize) -> usize {
        self.robots
            .iter()
            .filter(|r| r.side == side && !r.alive)
            .count()
    }

    fn final_positions(&self, side: usize) -> Vec<Coord> {
        self.robots
            .iter()
            .filter(|r| r.side == side)
            .map(|r| if r.alive { r.pos } else { OFF_GRID })
            .collect()
    }
}

/// One movement step of up to the per-turn budget, x before y.
fn step_toward(from: Coord, dest: Coord) -> Coord {
    let mut pos = from;
    let mut budget = MOVE_BUDGET;
    while budget > 0 && pos != dest {
        if pos.x != dest.x {
            pos.x += (dest.x - pos.x).signum();
        } else {
            pos.y += (dest.y - pos.y).signum();
        }
        budget -= 1;
    }
    pos
}

/// Plays one full match between two fresh engines and reports the outcome.
pub fn run_match(config: &SimConfig) -> MatchRecord {
    let mut rng = SmallRng::seed_from_u64(config.seed);
    let mut referee = Referee::new(config, &mut rng);
    let mut engines = [
        Engine::new(config.width, config.height),
        Engine::new(config.width, config.height),
    ];

    let mut turns_played = 0;
    for _ in 0..config.turns {
        for side in 0..2 {
            let feed = referee.feed_for(side);
            engines[side].apply_feed(&feed);
            let actions = engines[side].plan_turn();
            referee.apply(side, &actions);
        }
        referee.end_turn();
        turns_played += 1;
    }

    MatchRecord {
        seed: config.seed,
        turns_played,
        scores: referee.scores,
        robots_lost: [referee.robots_lost(0), referee.robots_lost(1)],
        final_positions: [referee.final_positions(0), referee.final_positions(1)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_toward_respects_budget() {
        let from = Coord::new(0, 0);
        assert_eq!(step_toward(from, Coord::new(10, 0)), Coord::new(4, 0));
        assert_eq!(step_toward(from, Coord::new(2, 5)), Coord::new(2, 2));
        assert_eq!(step_toward(from, Coord::new(1, 1)), Coord::new(1, 1));
    }

    #[test]
    fn request_requires_home_and_cooldown() {
        let config = SimConfig::default();
        let mut rng = SmallRng::seed_from_u64(7);
        let mut referee = Referee::new(&config, &mut rng);

        referee.apply_one(0, 0, &Action::request(Item::Radar, ""));
        assert_eq!(referee.robots[0].item, Item::Radar);
        assert_eq!(referee.cooldowns[0][0], COOLDOWN);

        // Second robot of the same side is refused while on cooldown.
        referee.apply_one(0, 1, &Action::request(Item::Radar, ""));
        assert_eq!(referee.robots[1].item, Item::None);
    }

    #[test]
    fn dig_picks_up_ore_and_delivery_scores() {
        let config = SimConfig::default();
        let mut rng = SmallRng::seed_from_u64(7);
        let mut referee = Referee::new(&config, &mut rng);
        let target = Coord::new(1, 0);
        let idx = referee.index(target);
        referee.ore[idx] = 2;

        referee.apply_one(0, 0, &Action::dig(target, ""));
        assert_eq!(referee.robots[0].item, Item::Ore);
        assert_eq!(referee.ore[idx], 1);
        assert!(referee.holes[idx]);

        referee.end_turn();
        assert_eq!(referee.scores[0], 1);
        assert_eq!(referee.robots[0].item, Item::None);
    }

    #[test]
    fn buried_trap_detonates_on_dig() {
        let config = SimConfig::default();
        let mut rng = SmallRng::seed_from_u64(7);
        let mut referee = Referee::new(&config, &mut rng);
        let spot = Coord::new(1, 0);
        referee.traps.push(SimMarker { id: 99, side: 1, pos: spot });
        referee.robots[0].pos = Coord::new(1, 1);

        referee.apply_one(0, 0, &Action::dig(spot, ""));
        assert!(!referee.robots[0].alive);
        assert!(referee.traps.is_empty());
    }

    #[test]
    fn full_match_runs_to_completion() {
        let config = SimConfig {
            turns: 40,
            ..SimConfig::default()
        };
        let record = run_match(&config);
        assert_eq!(record.turns_played, 40);
        assert_eq!(record.seed, config.seed);
        assert_eq!(record.final_positions[0].len(), config.robots_per_side);
        assert_eq!(record.final_positions[1].len(), config.robots_per_side);
    }

    #[test]
    fn match_record_serializes_positions() {
        let config = SimConfig {
            turns: 10,
            ..SimConfig::default()
        };
        let record = run_match(&config);
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"final_positions\""));
        assert!(json.contains("\"x\""));
    }

    #[test]
    fn matches_are_deterministic_per_seed() {
        let config = SimConfig {
            turns: 30,
            seed: 42,
            ..SimConfig::default()
        };
        let a = run_match(&config);
        let b = run_match(&config);
        assert_eq!(a.scores, b.scores);
        assert_eq!(a.robots_lost, b.robots_lost);
        assert_eq!(a.final_positions, b.final_positions);
    }
}
