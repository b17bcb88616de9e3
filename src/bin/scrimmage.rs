//! Offline scrimmage CLI.
//!
//! Runs seeded self-play matches of the engine against itself and emits
//! one JSON record per match.
//!
//! Usage:
//!   cargo run --release --bin scrimmage -- [OPTIONS]
//!
//! Options:
//!   --matches N   Number of matches to play (default: 10)
//!   --seed N      Base seed; match i uses seed + i (default: 1)
//!   --turns N     Turns per match (default: 200)
//!   --width W     Grid width (default: 30)
//!   --height H    Grid height (default: 15)
//!   --quiet       Suppress the stderr summary

use std::env;

use rayon::prelude::*;

use prospector::sim::{run_match, MatchRecord, SimConfig};

fn main() {
    let args: Vec<String> = env::args().collect();
    let mut base = SimConfig::default();
    let mut matches = 10usize;
    let mut quiet = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--matches" => {
                i += 1;
                matches = args[i].parse().expect("invalid --matches value");
            }
            "--seed" => {
                i += 1;
                base.seed = args[i].parse().expect("invalid --seed value");
            }
            "--turns" => {
                i += 1;
                base.turns = args[i].parse().expect("invalid --turns value");
            }
            "--width" => {
                i += 1;
                base.width = args[i].parse().expect("invalid --width value");
            }
            "--height" => {
                i += 1;
                base.height = args[i].parse().expect("invalid --height value");
            }
            "--quiet" => quiet = true,
            other => {
                eprintln!("unknown option: {}", other);
                std::process::exit(2);
            }
        }
        i += 1;
    }

    let records: Vec<MatchRecord> = (0..matches as u64)
        .into_par_iter()
        .map(|offset| {
            let config = SimConfig {
                seed: base.seed + offset,
                ..base.clone()
            };
            run_match(&config)
        })
        .collect();

    for record in &records {
        println!("{}", serde_json::to_string(record).expect("record serializes"));
    }

    if !quiet {
        let total: i32 = records.iter().map(|r| r.scores[0] + r.scores[1]).sum();
        let lost: usize = records.iter().map(|r| r.robots_lost[0] + r.robots_lost[1]).sum();
        eprintln!(
            "{} matches, {} ore delivered, {} robots lost",
            records.len(),
            total,
            lost
        );
    }
}
