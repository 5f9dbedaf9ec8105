//! Scenario content: starting factions, starting resources and events.
//!
//! A scenario directory holds three JSON files:
//!
//! ```text
//! my-scenario/
//! ├── factions.json    [{"name", "satisfaction", "supporter"}, ...]
//! ├── resources.json   {"industry", "farming", "treasury", "foodUnit"}
//! └── events.json      [{"name", "seasons"?, "choices": [...]}, ...]
//! ```
//!
//! Everything is validated up front. Bad content fails the load with a
//! [`ContentError`]; the game never starts on partially valid data.

mod records;

pub use records::{ALL_FACTIONS, ChoiceRecord, EffectRecord, EventRecord, compile_events};

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::error::ContentError;
use crate::game::{Difficulty, EventPool, Faction, Resources, Season};

/// Roster file name inside a scenario directory.
pub const FACTIONS_FILE: &str = "factions.json";

/// Starting resources file name inside a scenario directory.
pub const RESOURCES_FILE: &str = "resources.json";

/// Event file name inside a scenario directory.
pub const EVENTS_FILE: &str = "events.json";

/// Starting state shared by every player of a game.
///
/// Players copy it; they never share it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    /// Factions, in display order.
    pub factions: Vec<Faction>,
    /// Starting resources.
    pub resources: Resources,
}

impl Scenario {
    /// Build a validated scenario.
    ///
    /// # Errors
    ///
    /// Fails on an empty roster, duplicate names, or satisfaction above 100.
    pub fn new(factions: Vec<Faction>, resources: Resources) -> Result<Self, ContentError> {
        if factions.is_empty() {
            return Err(ContentError::NoFactions);
        }

        let mut seen = HashSet::new();
        for faction in &factions {
            if !seen.insert(faction.name()) {
                return Err(ContentError::DuplicateFaction(faction.name().to_string()));
            }
            if faction.satisfaction() > crate::game::SATISFACTION_MAX {
                return Err(ContentError::SatisfactionOutOfRange {
                    name: faction.name().to_string(),
                    satisfaction: faction.satisfaction(),
                });
            }
        }

        Ok(Self {
            factions,
            resources,
        })
    }

    /// Faction names in roster order.
    pub fn faction_names(&self) -> impl Iterator<Item = &str> {
        self.factions.iter().map(Faction::name)
    }

    /// Whether the roster has a faction with this name.
    #[must_use]
    pub fn has_faction(&self, name: &str) -> bool {
        self.faction_names().any(|n| n == name)
    }
}

/// A fully loaded scenario: starting state plus compiled events.
#[derive(Debug, Clone)]
pub struct Content {
    /// Starting state.
    pub scenario: Scenario,
    /// Compiled events, all top-level events available.
    pub events: EventPool,
}

/// Fail if some season can never draw a fresh event.
///
/// # Errors
///
/// Returns [`ContentError::EmptySeason`] for the first season with no event.
pub fn check_season_coverage(events: &EventPool) -> Result<(), ContentError> {
    for season in Season::ALL {
        if events.drawable_in(season) == 0 {
            return Err(ContentError::EmptySeason(season));
        }
    }
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: PathBuf) -> Result<T, ContentError> {
    let text = fs::read_to_string(&path).map_err(|source| ContentError::Io {
        path: path.clone(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ContentError::Json { path, source })
}

/// Load and validate a scenario directory.
///
/// Negative resource effects are scaled for `difficulty` during the load.
///
/// # Errors
///
/// Fails if any file is missing or malformed, or the content is
/// inconsistent.
pub fn load_scenario(dir: &Path, difficulty: Difficulty) -> Result<Content, ContentError> {
    let factions: Vec<Faction> = read_json(dir.join(FACTIONS_FILE))?;
    let resources: Resources = read_json(dir.join(RESOURCES_FILE))?;
    let scenario = Scenario::new(factions, resources)?;

    let records: Vec<EventRecord> = read_json(dir.join(EVENTS_FILE))?;
    let events = compile_events(&records, &scenario, difficulty)?;
    check_season_coverage(&events)?;

    tracing::info!(
        dir = %dir.display(),
        factions = scenario.factions.len(),
        events = events.catalog().len(),
        %difficulty,
        "scenario loaded"
    );

    Ok(Content { scenario, events })
}
