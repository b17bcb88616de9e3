//! Prospector -- a mission-driven bot for turn-based grid-mining duels.
//!
//! This binary reads the turn feed from stdin and writes one action per
//! owned robot to stdout each turn, until the feed ends.

use std::io::{self, Write};

use prospector::engine::Engine;
use prospector::protocol::{read_init, read_turn, FeedError};

fn main() {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    let (width, height) = match read_init(&mut input) {
        Ok(dims) => dims,
        Err(e) => {
            eprintln!("init: {}", e);
            return;
        }
    };
    let mut engine = Engine::new(width, height).with_trace();

    loop {
        let feed = match read_turn(&mut input, width, height) {
            Ok(f) => f,
            Err(FeedError::UnexpectedEof) => break,
            Err(e) => {
                eprintln!("feed: {}", e);
                break;
            }
        };

        engine.apply_feed(&feed);
        for action in engine.plan_turn() {
            writeln!(out, "{}", action).unwrap();
        }
        out.flush().unwrap();
    }
}
