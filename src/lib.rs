// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Isla: a turn-based game of governing an island.
//!
//! Each player rules a copy of the same island. Every turn an event is drawn
//! for the season and the player picks one of its choices; the choice's
//! effects move faction satisfaction, supporters and resources, and may
//! queue a follow-up event. Winter closes the year with the harvest, then
//! starvation or growth. A player whose supporters turn against them is
//! overthrown, which ends the game.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │     CLI (play / simulate / ...)     │
//! ├──────────────────┬──────────────────┤
//! │  Content loader  │    Save files    │
//! ├──────────────────┴──────────────────┤
//! │   Game: state, pool, players, ...   │
//! └─────────────────────────────────────┘
//! ```
//!
//! All randomness flows through one seeded RNG owned by [`GameState`].

pub mod content;
pub mod error;
pub mod game;
pub mod save;

pub use error::{ContentError, GameError, GameResult, SaveError};

// Re-export key game types at crate root for convenience
pub use game::{
    Choice, ChoiceOutcome, Difficulty, Effect, Event, EventId, EventPool, Faction, GameConfig,
    GameState, Player, ResourceKind, Resources, Season, YearReport,
};
