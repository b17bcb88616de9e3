//! Wire protocol codecs.
//!
//! The turn-feed reader and the action serializer. Both are stateless
//! transformations; all decision logic lives in `mission` and `engine`.

pub mod action;
pub mod feed;

pub use action::Action;
pub use feed::{read_init, read_turn, CellReading, EntityReading, FeedError, TurnFeed};
