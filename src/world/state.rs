//! World snapshot.
//!
//! Holds everything known about the current turn: the accumulated grid,
//! the per-turn entity lists (rebuilt wholesale from each feed), equipment
//! cooldowns, scores, and the static radar placement constellation.
//!
//! The cooldowns are also mutated speculatively by mission logic within a
//! turn, so a robot evaluated later in the same turn does not request
//! equipment a robot evaluated earlier has already claimed.

use super::coord::Coord;
use super::entity::{EntityKind, Marker, Robot};
use super::grid::Grid;
use crate::protocol::feed::TurnFeed;

/// Cooldown written when the engine decides to request equipment.
///
/// The next feed overwrites it with the referee's value; it only has to be
/// nonzero to suppress a duplicate request later in the same turn.
pub const REQUEST_COOLDOWN: i32 = 5;

/// The recommended radar placement pattern for the standard 30x15 grid,
/// center-first so early radars cover the densest ore band.
const STANDARD_CONSTELLATION: [Coord; 9] = [
    Coord::new(9, 7),
    Coord::new(13, 3),
    Coord::new(13, 11),
    Coord::new(17, 7),
    Coord::new(5, 3),
    Coord::new(5, 11),
    Coord::new(21, 3),
    Coord::new(21, 11),
    Coord::new(25, 7),
];

/// Builds the radar constellation for a grid of the given size.
///
/// The standard competitive grid gets the hand-tuned nine-point pattern;
/// other sizes get a lattice with the same spacing, ordered by distance
/// from the grid center so central coverage comes first.
fn radar_constellation(width: i32, height: i32) -> Vec<Coord> {
    if (width, height) == (30, 15) {
        return STANDARD_CONSTELLATION.to_vec();
    }

    let mut spots = Vec::new();
    let mut x = 5;
    let mut mid_column = true;
    while x < width - 1 {
        if mid_column {
            spots.push(Coord::new(x, height / 2));
        } else {
            spots.push(Coord::new(x, height / 4));
            spots.push(Coord::new(x, 3 * height / 4));
        }
        mid_column = !mid_column;
        x += 4;
    }
    let center = Coord::new(width / 2, height / 2);
    // Grids too narrow for the lattice still get one spot, so the
    // constellation is never empty.
    if spots.is_empty() {
        spots.push(center.clamped(width, height));
    }
    spots.sort_by_key(|spot| spot.distance(center));
    spots
}

/// Complete view of the match at the current turn.
#[derive(Debug, Clone)]
pub struct World {
    pub grid: Grid,
    pub my_robots: Vec<Robot>,
    pub rival_robots: Vec<Robot>,
    pub radars: Vec<Marker>,
    pub traps: Vec<Marker>,
    pub radar_cooldown: i32,
    pub trap_cooldown: i32,
    pub my_score: i32,
    pub rival_score: i32,
    radar_spots: Vec<Coord>,
}

impl World {
    /// Creates an empty world for a grid of the given dimensions.
    pub fn new(width: i32, height: i32) -> Self {
        World {
            grid: Grid::new(width, height),
            my_robots: Vec::new(),
            rival_robots: Vec::new(),
            radars: Vec::new(),
            traps: Vec::new(),
            radar_cooldown: 0,
            trap_cooldown: 0,
            my_score: 0,
            rival_score: 0,
            radar_spots: radar_constellation(width, height),
        }
    }

    pub fn width(&self) -> i32 {
        self.grid.width()
    }

    pub fn height(&self) -> i32 {
        self.grid.height()
    }

    /// The static radar placement constellation.
    pub fn radar_spots(&self) -> &[Coord] {
        &self.radar_spots
    }

    /// Ingests one parsed turn feed, replacing all per-turn state.
    ///
    /// Grid knowledge accumulates; entity lists and cooldowns are replaced.
    pub fn apply(&mut self, feed: &TurnFeed) {
        self.my_score = feed.my_score;
        self.rival_score = feed.rival_score;
        self.radar_cooldown = feed.radar_cooldown;
        self.trap_cooldown = feed.trap_cooldown;

        for (i, reading) in feed.cells.iter().enumerate() {
            let pos = Coord::new(i as i32 % self.grid.width(), i as i32 / self.grid.width());
            self.grid.update(pos, reading.ore, reading.hole);
        }

        self.my_robots.clear();
        self.rival_robots.clear();
        self.radars.clear();
        self.traps.clear();
        for e in &feed.entities {
            match e.kind {
                EntityKind::MyRobot => self.my_robots.push(Robot::new(e.id, e.pos, e.item)),
                EntityKind::RivalRobot => self.rival_robots.push(Robot::new(e.id, e.pos, e.item)),
                EntityKind::Radar => self.radars.push(Marker { id: e.id, pos: e.pos }),
                EntityKind::Trap => self.traps.push(Marker { id: e.id, pos: e.pos }),
            }
        }
    }

    /// True if a trap marker is visible at `pos`.
    pub fn trap_at(&self, pos: Coord) -> bool {
        self.traps.iter().any(|t| t.pos == pos)
    }

    /// True if one of our radars sits at `pos`.
    pub fn radar_at(&self, pos: Coord) -> bool {
        self.radars.iter().any(|r| r.pos == pos)
    }

    /// Number of rival robots within adjacency distance 1 of `pos`.
    pub fn rivals_adjacent_to(&self, pos: Coord) -> usize {
        self.rival_robots
            .iter()
            .filter(|r| !r.is_dead() && r.pos.distance(pos) <= 1)
            .count()
    }

    /// Picks the next radar placement target for a robot at `from`.
    ///
    /// Candidates already holding a radar or a trap marker, or claimed by
    /// another active placement mission, are skipped; the nearest survivor
    /// wins. If every candidate is taken, falls back to the pattern head.
    pub fn recommend_radar_position(&self, from: Coord, claimed: &[Coord]) -> Coord {
        self.radar_spots
            .iter()
            .copied()
            .filter(|&spot| {
                !self.radar_at(spot) && !self.trap_at(spot) && !claimed.contains(&spot)
            })
            .min_by_key(|&spot| spot.distance(from))
            .unwrap_or(self.radar_spots[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::entity::Item;

    fn world_with_markers() -> World {
        let mut world = World::new(30, 15);
        world.radars.push(Marker { id: 10, pos: Coord::new(9, 7) });
        world.traps.push(Marker { id: 11, pos: Coord::new(13, 3) });
        world
    }

    #[test]
    fn standard_grid_uses_tuned_constellation() {
        let world = World::new(30, 15);
        assert_eq!(world.radar_spots().len(), 9);
        assert_eq!(world.radar_spots()[0], Coord::new(9, 7));
    }

    #[test]
    fn nonstandard_grid_gets_generated_constellation() {
        let world = World::new(20, 10);
        assert!(!world.radar_spots().is_empty());
        for spot in world.radar_spots() {
            assert!(spot.x > 0 && spot.x < 20);
            assert!(spot.y >= 0 && spot.y < 10);
        }
    }

    #[test]
    fn tiny_grid_still_has_a_constellation() {
        let world = World::new(6, 5);
        assert!(!world.radar_spots().is_empty());
        let pick = world.recommend_radar_position(Coord::new(0, 2), &[]);
        assert_eq!(pick, Coord::new(3, 2));
    }

    #[test]
    fn recommend_skips_occupied_and_claimed() {
        let world = world_with_markers();
        // (9,7) has a radar, (13,3) a trap; claim (13,11) explicitly.
        let pick = world.recommend_radar_position(Coord::new(0, 7), &[Coord::new(13, 11)]);
        assert_ne!(pick, Coord::new(9, 7));
        assert_ne!(pick, Coord::new(13, 3));
        assert_ne!(pick, Coord::new(13, 11));
    }

    #[test]
    fn recommend_prefers_nearest() {
        let world = World::new(30, 15);
        let pick = world.recommend_radar_position(Coord::new(0, 14), &[]);
        assert_eq!(pick, Coord::new(5, 11));
    }

    #[test]
    fn recommend_falls_back_when_exhausted() {
        let mut world = World::new(30, 15);
        for &spot in STANDARD_CONSTELLATION.iter() {
            world.radars.push(Marker { id: 100 + spot.x, pos: spot });
        }
        let pick = world.recommend_radar_position(Coord::new(0, 0), &[]);
        assert_eq!(pick, STANDARD_CONSTELLATION[0]);
    }

    #[test]
    fn rivals_adjacent_counts_distance_one() {
        let mut world = World::new(30, 15);
        world.rival_robots.push(Robot::new(1, Coord::new(5, 5), Item::None));
        world.rival_robots.push(Robot::new(2, Coord::new(5, 6), Item::None));
        world.rival_robots.push(Robot::new(3, Coord::new(8, 8), Item::None));
        assert_eq!(world.rivals_adjacent_to(Coord::new(5, 5)), 2);
    }
}
