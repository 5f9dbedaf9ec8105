//! Output formatting utilities for CLI.

use isla::{Event, GameState, Player};
use serde::Serialize;

/// JSON-serializable simulation result.
#[derive(Debug, Serialize)]
pub(super) struct JsonSimulation {
    /// Random seed used.
    pub(super) seed: u64,
    /// Difficulty name.
    pub(super) difficulty: String,
    /// Turns played before the game ended or the limit was hit.
    pub(super) turns_played: u32,
    /// Season the game stopped in.
    pub(super) season: String,
    /// Whether some player was overthrown.
    pub(super) game_over: bool,
    /// Per-player results.
    pub(super) players: Vec<JsonPlayer>,
}

/// JSON-serializable player result.
#[derive(Debug, Serialize)]
pub(super) struct JsonPlayer {
    /// Player name.
    pub(super) name: String,
    /// Whether the player was overthrown.
    pub(super) defeated: bool,
    /// Total supporters.
    pub(super) population: u64,
    /// Support-weighted satisfaction, absent with no supporters.
    pub(super) average_satisfaction: Option<u32>,
    /// Treasury.
    pub(super) treasury: u32,
    /// Food units in store.
    pub(super) food: u32,
    /// Per-faction state.
    pub(super) factions: Vec<JsonFaction>,
}

/// JSON-serializable faction state.
#[derive(Debug, Serialize)]
pub(super) struct JsonFaction {
    /// Faction name.
    pub(super) name: String,
    /// Satisfaction in percent.
    pub(super) satisfaction: u32,
    /// Supporters.
    pub(super) support: u32,
}

impl JsonSimulation {
    /// Create from a finished game.
    pub(super) fn from_game(game: &GameState, seed: u64, turns_played: u32) -> Self {
        let difficulty = game.difficulty();
        Self {
            seed,
            difficulty: difficulty.to_string(),
            turns_played,
            season: game.season().to_string(),
            game_over: game.is_game_over(),
            players: game
                .players
                .iter()
                .map(|p| JsonPlayer {
                    name: p.name().to_string(),
                    defeated: p.is_dead(difficulty),
                    population: p.total_support(),
                    average_satisfaction: p.average_satisfaction(),
                    treasury: p.resources().treasury(),
                    food: p.resources().food(),
                    factions: p
                        .factions()
                        .iter()
                        .map(|f| JsonFaction {
                            name: f.name().to_string(),
                            satisfaction: f.satisfaction(),
                            support: f.support(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

/// Format an event and its numbered choices.
pub(super) fn format_event(event: &Event) -> String {
    let mut output = format!("== {} ==\n", event.name);
    for (i, choice) in event.choices.iter().enumerate() {
        output.push_str(&format!("  {}) {}\n", i + 1, choice.label));
        for effect in &choice.effects {
            output.push_str(&format!("       {effect}\n"));
        }
    }
    output
}

/// Format a player's factions as a table.
pub(super) fn format_factions(player: &Player) -> String {
    let mut output = format!("{:<16} {:>12} {:>11}\n", "Faction", "Satisfaction", "Supporters");
    for faction in player.factions() {
        output.push_str(&format!(
            "{:<16} {:>11}% {:>11}\n",
            faction.name(),
            faction.satisfaction(),
            faction.support()
        ));
    }
    match player.average_satisfaction() {
        Some(average) => output.push_str(&format!(
            "Overall: {average}% of {} supporters\n",
            player.total_support()
        )),
        None => output.push_str("Overall: no supporters left\n"),
    }
    output
}

/// Format a player's resources.
pub(super) fn format_resources(player: &Player) -> String {
    let r = player.resources();
    format!(
        "Industry: {}%\nFarming:  {}%\nTreasury: {}$\nFood:     {} units\n",
        r.industry(),
        r.farming(),
        r.treasury(),
        r.food()
    )
}

/// Format a game summary as human-readable text.
pub(super) fn format_text(summary: &JsonSimulation) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Simulation (seed: {}, difficulty: {})\n",
        summary.seed, summary.difficulty
    ));
    output.push_str(&format!(
        "  Turns: {} (stopped in {})\n",
        summary.turns_played, summary.season
    ));
    output.push_str(if summary.game_over {
        "  Result: overthrown\n\n"
    } else {
        "  Result: survived\n\n"
    });

    for player in &summary.players {
        let average = player
            .average_satisfaction
            .map_or_else(|| "-".to_string(), |a| format!("{a}%"));
        output.push_str(&format!(
            "  {}: {} supporters, {} satisfied, {}$, {} food",
            player.name, player.population, average, player.treasury, player.food
        ));
        if player.defeated {
            output.push_str(" [overthrown]");
        }
        output.push('\n');
        for faction in &player.factions {
            output.push_str(&format!(
                "    {}: {}% / {}\n",
                faction.name, faction.satisfaction, faction.support
            ));
        }
    }

    output
}
