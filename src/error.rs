//! Error types for content loading, gameplay and persistence.
//!
//! Three families, matching where a failure can come from:
//! - [`ContentError`]: static scenario content is malformed. Raised once, at
//!   load time; nothing is partially recovered.
//! - [`GameError`]: a runtime operation was asked to do something the current
//!   state forbids. Callers are expected to check preconditions first, so these
//!   indicate a programming error rather than a player mistake.
//! - [`SaveError`]: reading or writing a saved game failed, or the save
//!   describes a state no game can reach.
//!
//! Treasury and food running dry is never an error; those counters saturate.

use std::path::PathBuf;

use thiserror::Error;

use crate::game::{InvariantViolation, Season};

/// Scenario or event content could not be loaded.
#[derive(Debug, Error)]
pub enum ContentError {
    /// A content file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A content file is not valid JSON, or has the wrong shape.
    ///
    /// Unknown seasons, resource kinds and effect types surface here.
    #[error("invalid content in {}: {source}", path.display())]
    Json {
        /// File that failed.
        path: PathBuf,
        /// Underlying serde error.
        source: serde_json::Error,
    },

    /// An effect names a faction that is not in the scenario roster.
    #[error("event \"{event}\" references unknown faction \"{faction}\"")]
    UnknownFaction {
        /// Event holding the bad effect.
        event: String,
        /// The faction name that did not resolve.
        faction: String,
    },

    /// Two roster entries share a name.
    #[error("faction \"{0}\" is declared more than once")]
    DuplicateFaction(String),

    /// The scenario declares no factions at all.
    #[error("scenario declares no factions")]
    NoFactions,

    /// A faction starts with satisfaction outside 0..=100.
    #[error("faction \"{name}\" starts with satisfaction {satisfaction}, expected 0..=100")]
    SatisfactionOutOfRange {
        /// Faction name.
        name: String,
        /// Offending value.
        satisfaction: u32,
    },

    /// Starting industry and farming exceed 100% together.
    #[error("starting industry {industry}% + farming {farming}% exceeds 100%")]
    LandOverAllocated {
        /// Starting industry.
        industry: u32,
        /// Starting farming.
        farming: u32,
    },

    /// An event offers nothing to choose.
    #[error("event \"{0}\" has no choices")]
    NoChoices(String),

    /// No event can ever be drawn in a season.
    #[error("no event is available in {0}")]
    EmptySeason(Season),
}

/// A gameplay operation was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    /// The named faction is not in this player's roster.
    #[error("unknown faction \"{0}\"")]
    UnknownFaction(String),

    /// A supporter was removed from a faction that has none.
    #[error("faction \"{0}\" has no supporters left")]
    NoSupporters(String),

    /// Satisfaction is frozen at zero and cannot be bought back.
    #[error("faction \"{0}\" has collapsed and cannot be bribed")]
    FrozenFaction(String),

    /// The treasury cannot cover a purchase.
    #[error("costs {needed}$ but the treasury holds {available}$")]
    InsufficientFunds {
        /// Price of the action.
        needed: u64,
        /// Current treasury.
        available: u32,
    },

    /// A choice index past the end of the current event's choices.
    #[error("choice {index} does not exist, the event offers {count}")]
    InvalidChoice {
        /// Requested index.
        index: usize,
        /// Number of choices offered.
        count: usize,
    },

    /// There is no event to resolve.
    #[error("no event is in play")]
    NoCurrentEvent,

    /// A game was requested with no players.
    #[error("a game needs at least one player")]
    NoPlayers,
}

/// A saved game could not be written or restored.
#[derive(Debug, Error)]
pub enum SaveError {
    /// File I/O failed.
    #[error("save file {}: {source}", path.display())]
    Io {
        /// Save file path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The save file is not a valid game.
    #[error("corrupt save file {}: {source}", path.display())]
    Json {
        /// Save file path.
        path: PathBuf,
        /// Underlying serde error.
        source: serde_json::Error,
    },

    /// The save file parses but describes an impossible game.
    #[error("invalid save file {}: {}", path.display(), list_violations(violations))]
    Invalid {
        /// Save file path.
        path: PathBuf,
        /// Every broken invariant.
        violations: Vec<InvariantViolation>,
    },
}

fn list_violations(violations: &[InvariantViolation]) -> String {
    violations
        .iter()
        .map(|v| v.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type for gameplay operations.
pub type GameResult<T> = Result<T, GameError>;
