//! Simulate command implementation.

use super::output::{JsonSimulation, format_text};
use super::{CliError, OutputFormat, pick_seed};
use isla::content::load_scenario;
use isla::{Difficulty, GameConfig, GameState};
use std::path::PathBuf;

/// Play until someone is overthrown or `max_turns` turns have been played,
/// always taking the first choice. Returns the number of turns played.
///
/// # Errors
///
/// Returns an error if a choice or a year end fails.
pub(crate) fn run(game: &mut GameState, max_turns: u32) -> Result<u32, CliError> {
    let mut played = 0;
    while played < max_turns && !game.is_game_over() {
        if game.current_event().is_none() {
            return Err(CliError::new(format!(
                "no event left to draw in {}",
                game.season()
            )));
        }
        game.choose(0)?;
        played += 1;
        // A choice that topples a government ends the game before the harvest
        if game.is_game_over() {
            break;
        }
        if game.is_end_of_year() {
            let report = game.end_year()?;
            tracing::debug!(
                turn = game.turn(),
                deaths = report.deaths,
                births = report.births,
                "year end"
            );
            if game.is_game_over() {
                break;
            }
        }
        game.advance();
    }
    Ok(played)
}

/// Execute the simulate command.
///
/// # Errors
///
/// Returns an error if the scenario cannot be loaded or the game fails.
pub(crate) fn execute(
    scenario: PathBuf,
    difficulty: Difficulty,
    players: u8,
    seed: Option<u64>,
    turns: u32,
    format: OutputFormat,
) -> Result<(), CliError> {
    let content = load_scenario(&scenario, difficulty)?;
    let seed = pick_seed(seed);
    let config = GameConfig {
        difficulty,
        players: usize::from(players),
        seed,
    };

    let mut game = GameState::new(config, &content.scenario, content.events)?;
    let played = run(&mut game, turns)?;
    let summary = JsonSimulation::from_game(&game, seed, played);

    match format {
        OutputFormat::Text => print!("{}", format_text(&summary)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
    }

    Ok(())
}
