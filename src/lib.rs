//! Prospector engine library.
//!
//! Exposes the world model, mission state machines, turn orchestrator,
//! protocol codecs, and the offline match simulator for use by the
//! integration tests and the binary entry points.

pub mod engine;
pub mod ledger;
pub mod mission;
pub mod protocol;
pub mod sim;
pub mod world;
