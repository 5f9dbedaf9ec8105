//! Isla CLI - play, resume, validate and simulate island games.

// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// Isla - govern an island one season at a time
#[derive(Parser, Debug)]
#[command(name = "isla")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start a new game
    Play {
        /// Scenario directory (factions.json, resources.json, events.json)
        #[arg(required = true)]
        scenario: PathBuf,

        /// Difficulty: easy, medium or hard
        #[arg(short, long, default_value = "medium")]
        difficulty: cli::DifficultyArg,

        /// Number of players (1-4)
        #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u8).range(1..=cli::MAX_PLAYERS))]
        players: u8,

        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Save file written by the save command
        #[arg(long, default_value = cli::DEFAULT_SAVE)]
        save: PathBuf,
    },

    /// Resume a saved game
    Resume {
        /// Save file
        #[arg(required = true)]
        save: PathBuf,
    },

    /// Check a scenario directory for errors
    Validate {
        /// Scenario directory
        #[arg(required = true)]
        scenario: PathBuf,

        /// Difficulty used to scale resource effects
        #[arg(short, long, default_value = "medium")]
        difficulty: cli::DifficultyArg,
    },

    /// Play a game non-interactively, always taking the first choice
    Simulate {
        /// Scenario directory
        #[arg(required = true)]
        scenario: PathBuf,

        /// Difficulty: easy, medium or hard
        #[arg(short, long, default_value = "medium")]
        difficulty: cli::DifficultyArg,

        /// Number of players (1-4)
        #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u8).range(1..=cli::MAX_PLAYERS))]
        players: u8,

        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Maximum turns (default: 400)
        #[arg(short, long, default_value = "400")]
        turns: u32,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },
}

fn main() -> ExitCode {
    // Game text goes to stdout, diagnostics to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let result = match args.command {
        Commands::Play {
            scenario,
            difficulty,
            players,
            seed,
            save,
        } => cli::play::execute(scenario, difficulty.into(), players, seed, save),

        Commands::Resume { save } => cli::play::resume(save),

        Commands::Validate {
            scenario,
            difficulty,
        } => cli::validate::execute(scenario, difficulty.into()),

        Commands::Simulate {
            scenario,
            difficulty,
            players,
            seed,
            turns,
            format,
        } => cli::simulate::execute(scenario, difficulty.into(), players, seed, turns, format),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
