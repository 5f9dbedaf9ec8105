//! CLI command implementations for Isla.

pub(crate) mod play;
pub(crate) mod simulate;
pub(crate) mod validate;

mod output;

use clap::ValueEnum;
use isla::Difficulty;
use std::error::Error;
use std::fmt;

/// Largest number of players a game can seat.
pub(crate) const MAX_PLAYERS: i64 = 4;

/// Save file used when `--save` is not given.
pub(crate) const DEFAULT_SAVE: &str = "isla-save.json";

/// Difficulty as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum DifficultyArg {
    /// Defeat below 10% weighted satisfaction; losses halved.
    Easy,
    /// Defeat below 30% weighted satisfaction.
    Medium,
    /// Defeat below 50% weighted satisfaction; losses increased by half.
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Self::Easy,
            DifficultyArg::Medium => Self::Medium,
            DifficultyArg::Hard => Self::Hard,
        }
    }
}

/// Output format for the `simulate` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<isla::ContentError> for CliError {
    fn from(e: isla::ContentError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<isla::GameError> for CliError {
    fn from(e: isla::GameError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<isla::SaveError> for CliError {
    fn from(e: isla::SaveError) -> Self {
        Self::new(e.to_string())
    }
}

/// Seed to use when none was given on the command line.
pub(crate) fn pick_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(rand::random)
}
