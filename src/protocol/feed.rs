//! Turn input parser.
//!
//! Reads the raw textual turn feed into structured `TurnFeed` values the
//! engine can ingest. This is the only boundary where malformed text is
//! possible; everything past it works with well-typed values.

use std::io::BufRead;

use thiserror::Error;

use crate::world::{Coord, EntityKind, Item};

/// Errors that can occur while reading the turn feed.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("feed ended unexpectedly")]
    UnexpectedEof,
    #[error("io error reading feed: {0}")]
    Io(#[from] std::io::Error),
    #[error("expected integer, got '{0}'")]
    BadInt(String),
    #[error("expected {expected} fields, got {got}: '{line}'")]
    BadFieldCount {
        line: String,
        expected: usize,
        got: usize,
    },
    #[error("unknown entity kind code {0}")]
    BadEntityKind(i32),
    #[error("unknown item code {0}")]
    BadItem(i32),
}

/// One cell as reported this turn: ore amount if scanned, and hole flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellReading {
    pub ore: Option<i32>,
    pub hole: bool,
}

/// One visible entity as reported this turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityReading {
    pub id: i32,
    pub kind: EntityKind,
    pub pos: Coord,
    pub item: Item,
}

/// A fully parsed turn of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnFeed {
    pub my_score: i32,
    pub rival_score: i32,
    /// Row-major, `width * height` readings.
    pub cells: Vec<CellReading>,
    pub radar_cooldown: i32,
    pub trap_cooldown: i32,
    /// In feed order; this order defines the action output order.
    pub entities: Vec<EntityReading>,
}

fn read_line<R: BufRead>(input: &mut R) -> Result<String, FeedError> {
    let mut line = String::new();
    let n = input.read_line(&mut line)?;
    if n == 0 {
        return Err(FeedError::UnexpectedEof);
    }
    Ok(line)
}

fn parse_int(token: &str) -> Result<i32, FeedError> {
    token
        .parse::<i32>()
        .map_err(|_| FeedError::BadInt(token.to_string()))
}

/// Splits a line into exactly `expected` whitespace-separated fields.
fn fields(line: &str, expected: usize) -> Result<Vec<&str>, FeedError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != expected {
        return Err(FeedError::BadFieldCount {
            line: line.trim_end().to_string(),
            expected,
            got: tokens.len(),
        });
    }
    Ok(tokens)
}

/// Reads the one-time init line: grid width and height.
pub fn read_init<R: BufRead>(input: &mut R) -> Result<(i32, i32), FeedError> {
    let line = read_line(input)?;
    let tokens = fields(&line, 2)?;
    Ok((parse_int(tokens[0])?, parse_int(tokens[1])?))
}

/// Reads one complete turn of input for a `width` x `height` grid.
pub fn read_turn<R: BufRead>(input: &mut R, width: i32, height: i32) -> Result<TurnFeed, FeedError> {
    let line = read_line(input)?;
    let tokens = fields(&line, 2)?;
    let my_score = parse_int(tokens[0])?;
    let rival_score = parse_int(tokens[1])?;

    let mut cells = Vec::with_capacity((width * height) as usize);
    for _ in 0..height {
        let line = read_line(input)?;
        let tokens = fields(&line, 2 * width as usize)?;
        for pair in tokens.chunks(2) {
            let ore = if pair[0] == "?" {
                None
            } else {
                Some(parse_int(pair[0])?)
            };
            let hole = parse_int(pair[1])? == 1;
            cells.push(CellReading { ore, hole });
        }
    }

    let line = read_line(input)?;
    let tokens = fields(&line, 3)?;
    let entity_count = parse_int(tokens[0])?;
    let radar_cooldown = parse_int(tokens[1])?;
    let trap_cooldown = parse_int(tokens[2])?;

    let mut entities = Vec::with_capacity(entity_count.max(0) as usize);
    for _ in 0..entity_count {
        let line = read_line(input)?;
        let tokens = fields(&line, 5)?;
        let id = parse_int(tokens[0])?;
        let kind_code = parse_int(tokens[1])?;
        let kind = EntityKind::from_code(kind_code).ok_or(FeedError::BadEntityKind(kind_code))?;
        let pos = Coord::new(parse_int(tokens[2])?, parse_int(tokens[3])?);
        let item_code = parse_int(tokens[4])?;
        let item = Item::from_code(item_code).ok_or(FeedError::BadItem(item_code))?;
        entities.push(EntityReading { id, kind, pos, item });
    }

    Ok(TurnFeed {
        my_score,
        rival_score,
        cells,
        radar_cooldown,
        trap_cooldown,
        entities,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn tiny_feed() -> String {
        // 3x2 grid, one robot per side, one radar.
        let mut s = String::new();
        s.push_str("3 2\n");
        s.push_str("1 0\n");
        s.push_str("? 0 2 1 0 0\n");
        s.push_str("? 0 ? 0 1 1\n");
        s.push_str("3 4 0\n");
        s.push_str("0 0 0 0 -1\n");
        s.push_str("1 1 2 1 4\n");
        s.push_str("7 2 1 0 -1\n");
        s
    }

    #[test]
    fn read_init_parses_dimensions() {
        let mut input = Cursor::new(tiny_feed());
        assert_eq!(read_init(&mut input).unwrap(), (3, 2));
    }

    #[test]
    fn read_turn_parses_full_feed() {
        let mut input = Cursor::new(tiny_feed());
        let (w, h) = read_init(&mut input).unwrap();
        let feed = read_turn(&mut input, w, h).unwrap();

        assert_eq!(feed.my_score, 1);
        assert_eq!(feed.rival_score, 0);
        assert_eq!(feed.cells.len(), 6);
        assert_eq!(feed.cells[0], CellReading { ore: None, hole: false });
        assert_eq!(feed.cells[1], CellReading { ore: Some(2), hole: true });
        assert_eq!(feed.cells[5], CellReading { ore: Some(1), hole: true });
        assert_eq!(feed.radar_cooldown, 4);
        assert_eq!(feed.trap_cooldown, 0);

        assert_eq!(feed.entities.len(), 3);
        assert_eq!(feed.entities[0].kind, EntityKind::MyRobot);
        assert_eq!(feed.entities[0].item, Item::None);
        assert_eq!(feed.entities[1].kind, EntityKind::RivalRobot);
        assert_eq!(feed.entities[1].item, Item::Ore);
        assert_eq!(feed.entities[2].kind, EntityKind::Radar);
        assert_eq!(feed.entities[2].pos, Coord::new(1, 0));
    }

    #[test]
    fn truncated_feed_is_eof() {
        let mut input = Cursor::new("1 0\n".to_string());
        let err = read_turn(&mut input, 3, 2).unwrap_err();
        assert!(matches!(err, FeedError::UnexpectedEof));
    }

    #[test]
    fn bad_row_width_is_rejected() {
        let mut input = Cursor::new("0 0\n? 0\n".to_string());
        let err = read_turn(&mut input, 3, 2).unwrap_err();
        assert!(matches!(err, FeedError::BadFieldCount { expected: 6, .. }));
    }

    #[test]
    fn bad_entity_kind_is_rejected() {
        let mut input = Cursor::new("0 0\n? 0 ? 0 ? 0\n? 0 ? 0 ? 0\n1 0 0\n5 9 0 0 -1\n");
        let err = read_turn(&mut input, 3, 2).unwrap_err();
        assert!(matches!(err, FeedError::BadEntityKind(9)));
    }

    #[test]
    fn non_numeric_score_is_rejected() {
        let mut input = Cursor::new("x 0\n".to_string());
        let err = read_turn(&mut input, 3, 2).unwrap_err();
        assert!(matches!(err, FeedError::BadInt(_)));
    }
}
