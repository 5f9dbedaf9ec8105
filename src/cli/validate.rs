//! Scenario validation command implementation.

use super::CliError;
use isla::content::load_scenario;
use isla::{Difficulty, Season};
use std::path::PathBuf;

/// Execute the validate command.
///
/// # Errors
///
/// Returns an error if the scenario cannot be loaded or is invalid.
pub(crate) fn execute(scenario: PathBuf, difficulty: Difficulty) -> Result<(), CliError> {
    println!("Validating: {}", scenario.display());
    println!();

    let content = match load_scenario(&scenario, difficulty) {
        Ok(content) => {
            print_check("Scenario content", true);
            content
        }
        Err(e) => {
            print_check("Scenario content", false);
            return Err(e.into());
        }
    };

    let events = &content.events;
    println!();
    println!("Summary:");
    println!("  Factions:     {}", content.scenario.factions.len());
    for faction in &content.scenario.factions {
        println!("    {faction}");
    }
    println!("  Resources:    {}", content.scenario.resources);
    println!(
        "  Events:       {} ({} follow-ups)",
        events.catalog().len(),
        events.catalog().len().saturating_sub(events.available().len())
    );
    for season in Season::ALL {
        println!("    {:<8} {}", season.to_string(), events.drawable_in(season));
    }

    println!();
    println!("Validation successful!");

    Ok(())
}

fn print_check(name: &str, ok: bool) {
    let status = if ok { "OK" } else { "FAILED" };
    let symbol = if ok { "✓" } else { "✗" };
    println!("  {symbol} {name}: {status}");
}
