//! Saved games.
//!
//! A save is the whole [`GameState`] as pretty-printed JSON, RNG included,
//! so a resumed game draws exactly what the original would have drawn.

use std::fs;
use std::path::Path;

use crate::error::SaveError;
use crate::game::{GameState, check_invariants};

/// Write `game` to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn save_game(game: &GameState, path: &Path) -> Result<(), SaveError> {
    let json = serde_json::to_string_pretty(game).map_err(|source| SaveError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|source| SaveError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(path = %path.display(), turn = game.turn(), "game saved");
    Ok(())
}

/// Read a game saved by [`save_game`].
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not a saved game, or
/// breaks a game invariant (see [`check_invariants`]).
pub fn load_game(path: &Path) -> Result<GameState, SaveError> {
    let json = fs::read_to_string(path).map_err(|source| SaveError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let game: GameState = serde_json::from_str(&json).map_err(|source| SaveError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let violations = check_invariants(&game);
    if !violations.is_empty() {
        return Err(SaveError::Invalid {
            path: path.to_path_buf(),
            violations,
        });
    }

    tracing::info!(path = %path.display(), turn = game.turn(), "game loaded");
    Ok(game)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Scenario;
    use crate::game::{Choice, Event, EventPool, Faction, GameConfig, Resources, Season};

    fn game() -> GameState {
        let mut pool = EventPool::new();
        for (name, season) in [("Storm", Season::Spring), ("Harvest", Season::Summer)] {
            pool.push_available(Event::new(
                name,
                vec![season],
                vec![Choice::new("Carry on", Vec::new())],
            ));
        }
        let scenario = Scenario::new(
            vec![Faction::new("Loyalists", 70, 12)],
            Resources::new(10, 20, 50, 60).unwrap(),
        )
        .unwrap();
        GameState::new(GameConfig::default(), &scenario, pool).unwrap()
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.json");

        let game = game();
        save_game(&game, &path).unwrap();
        assert_eq!(load_game(&path).unwrap(), game);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_game(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, SaveError::Io { .. }));
    }

    #[test]
    fn test_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.json");
        fs::write(&path, "{\"turn\": \"soon\"}").unwrap();

        let err = load_game(&path).unwrap_err();
        assert!(matches!(err, SaveError::Json { .. }));
        assert!(err.to_string().contains("corrupt save file"));
    }

    /// Save `game`, let `edit` rewrite its JSON, then load it back.
    fn load_edited(edit: impl FnOnce(&mut serde_json::Value)) -> Result<GameState, SaveError> {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.json");
        save_game(&game(), &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let mut json: serde_json::Value = serde_json::from_str(&text).unwrap();
        edit(&mut json);
        fs::write(&path, json.to_string()).unwrap();
        load_game(&path)
    }

    #[test]
    fn test_event_in_two_sets_rejected() {
        let err = load_edited(|json| {
            json["pool"]["pending"] = json["pool"]["used"].clone();
        })
        .unwrap_err();

        let SaveError::Invalid { violations, .. } = &err else {
            panic!("expected an invalid save, got {err}");
        };
        assert_eq!(violations.len(), 1);
        assert!(err.to_string().contains("pooled more than once"), "{err}");
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        let err = load_edited(|json| {
            json["players"][0]["factions"][0]["satisfaction"] = serde_json::json!(250);
            json["current_player"] = serde_json::json!(3);
        })
        .unwrap_err();

        let SaveError::Invalid { violations, .. } = &err else {
            panic!("expected an invalid save, got {err}");
        };
        assert_eq!(violations.len(), 2);
        assert!(err.to_string().contains("satisfaction 250"), "{err}");
        assert!(err.to_string().contains("out of range"), "{err}");
    }
}
