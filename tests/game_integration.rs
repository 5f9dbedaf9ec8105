//! Multi-turn integration tests for game mechanics.
//!
//! These tests load real scenario directories, play seeded games to the end
//! and check that saved games resume exactly where they left off.
//!
//! Run with: cargo test --release game_integration

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::fs;
use std::path::{Path, PathBuf};

use isla::content::{Content, load_scenario};
use isla::game::check_invariants;
use isla::save::{load_game, save_game};
use isla::{ContentError, Difficulty, GameConfig, GameState, Season};

/// The scenario shipped with the crate.
fn sandbox() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("scenarios/sandbox")
}

fn load(difficulty: Difficulty) -> Content {
    load_scenario(&sandbox(), difficulty).unwrap_or_else(|e| panic!("sandbox scenario: {e}"))
}

fn new_game(seed: u64, players: usize, difficulty: Difficulty) -> GameState {
    let content = load(difficulty);
    let config = GameConfig {
        difficulty,
        players,
        seed,
    };
    GameState::new(config, &content.scenario, content.events).unwrap()
}

/// Play one turn taking choice `pick` (wrapped to the event's choice count).
fn play_turn(game: &mut GameState, pick: usize) {
    let count = game.current_event().unwrap().choices.len();
    game.choose(pick % count).unwrap();
    if game.is_end_of_year() {
        game.end_year().unwrap();
    }
    game.advance();
}

/// Write a scenario directory with the given event file contents.
fn write_scenario(dir: &Path, events: &str) {
    fs::write(
        dir.join("factions.json"),
        r#"[{"name": "Loyalists", "satisfaction": 80, "supporter": 10},
            {"name": "Farmers", "satisfaction": 50, "supporter": 20}]"#,
    )
    .unwrap();
    fs::write(
        dir.join("resources.json"),
        r#"{"industry": 10, "farming": 20, "treasury": 100, "foodUnit": 50}"#,
    )
    .unwrap();
    fs::write(dir.join("events.json"), events).unwrap();
}

const ALL_SEASON_EVENT: &str = r#"[{"name": "Drought", "choices": [
    {"label": "Ration water", "effects": [
        {"type": "resources", "resource": "FOODUNIT", "value": -20},
        {"type": "satisfaction", "faction": "all", "value": -2}
    ]}
]}]"#;

#[test]
fn test_sandbox_loads() {
    let content = load(Difficulty::Medium);
    assert_eq!(content.scenario.factions.len(), 8);
    assert!(content.scenario.has_faction("Loyalists"));
    assert_eq!(content.events.available().len(), 10);
    // Two follow-ups are catalogued but not drawable yet
    assert_eq!(content.events.catalog().len(), 12);
    for season in Season::ALL {
        assert!(content.events.drawable_in(season) > 0, "{season} has no events");
    }
}

#[test]
fn test_difficulty_scales_negative_resources() {
    let easy = load(Difficulty::Easy);
    let hard = load(Difficulty::Hard);

    let treasury_loss = |content: &Content| {
        content
            .events
            .catalog()
            .iter()
            .find(|e| e.name == "The archbishop asks for a new cathedral")
            .unwrap()
            .choices[0]
            .effects[1]
            .delta()
    };
    assert_eq!(treasury_loss(&easy), -50);
    assert_eq!(treasury_loss(&hard), -150);
}

#[test]
fn test_200_turn_games_no_panic() {
    for seed in 0..10 {
        for players in 1..=4 {
            let mut game = new_game(seed, players, Difficulty::Easy);
            for turn in 0..200 {
                if game.is_game_over() {
                    break;
                }
                play_turn(&mut game, turn);
                let violations = check_invariants(&game);
                assert!(violations.is_empty(), "seed {seed}: {violations:?}");
            }
        }
    }
}

#[test]
fn test_same_seed_same_game() {
    let mut a = new_game(7, 2, Difficulty::Medium);
    let mut b = new_game(7, 2, Difficulty::Medium);

    for turn in 0..60 {
        assert_eq!(a.current_event_id(), b.current_event_id(), "turn {turn}");
        if a.is_game_over() {
            break;
        }
        play_turn(&mut a, turn * 3);
        play_turn(&mut b, turn * 3);
    }
    assert_eq!(a, b);
}

#[test]
fn test_different_seeds_diverge() {
    let draws = |seed| {
        let mut game = new_game(seed, 1, Difficulty::Easy);
        (0..12)
            .map(|_| {
                let id = game.current_event_id();
                play_turn(&mut game, 0);
                id
            })
            .collect::<Vec<_>>()
    };
    assert_ne!(draws(1), draws(2));
}

#[test]
fn test_resume_reproduces_draws() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("save.json");

    let mut original = new_game(2024, 2, Difficulty::Medium);
    for turn in 0..9 {
        play_turn(&mut original, turn);
    }
    save_game(&original, &path).unwrap();
    let mut resumed = load_game(&path).unwrap();
    assert_eq!(resumed, original);

    for turn in 9..40 {
        if original.is_game_over() {
            break;
        }
        play_turn(&mut original, turn);
        play_turn(&mut resumed, turn);
        assert_eq!(resumed.current_event_id(), original.current_event_id());
    }
    assert_eq!(resumed, original);
}

#[test]
fn test_chained_event_is_queued() {
    let dir = tempfile::tempdir().unwrap();
    write_scenario(
        dir.path(),
        r#"[{"name": "Locusts", "choices": [
            {"label": "Burn the fields", "next": {
                "name": "Famine", "seasons": ["SUMMER"],
                "choices": [{"label": "Import grain"}]
            }}
        ]}]"#,
    );

    let content = load_scenario(dir.path(), Difficulty::Medium).unwrap();
    let mut game = GameState::new(GameConfig::default(), &content.scenario, content.events).unwrap();
    assert_eq!(game.current_event().unwrap().name, "Locusts");

    let outcome = game.choose(0).unwrap();
    let famine = outcome.deferred.unwrap();
    assert_eq!(game.pool.pending(), &[famine]);

    // The follow-up comes up sooner or later and is never queued twice
    let mut seen = 0;
    for _ in 0..40 {
        game.advance();
        if game.current_event_id() == Some(famine) {
            seen += 1;
        }
        game.choose(0).unwrap();
    }
    assert!(seen >= 1);
    assert!(game.pool.pending().len() <= 1);
}

#[test]
fn test_starvation_and_defeat() {
    let dir = tempfile::tempdir().unwrap();
    write_scenario(dir.path(), ALL_SEASON_EVENT);
    fs::write(
        dir.path().join("resources.json"),
        r#"{"industry": 0, "farming": 0, "treasury": 0, "foodUnit": 0}"#,
    )
    .unwrap();

    let content = load_scenario(dir.path(), Difficulty::Hard).unwrap();
    let config = GameConfig {
        difficulty: Difficulty::Hard,
        ..GameConfig::default()
    };
    let mut game = GameState::new(config, &content.scenario, content.events).unwrap();

    for _ in 0..3 {
        game.choose(0).unwrap();
        game.advance();
    }
    assert!(game.is_end_of_year());
    game.choose(0).unwrap();
    let report = game.end_year().unwrap();

    // No food at all: every supporter starves
    assert_eq!(report.deaths, 30);
    assert_eq!(game.players[0].total_support(), 0);
    assert!(game.is_game_over());
}

#[test]
fn test_missing_file_reported() {
    let dir = tempfile::tempdir().unwrap();
    write_scenario(dir.path(), ALL_SEASON_EVENT);
    fs::remove_file(dir.path().join("resources.json")).unwrap();

    let err = load_scenario(dir.path(), Difficulty::Medium).unwrap_err();
    assert!(matches!(err, ContentError::Io { ref path, .. } if path.ends_with("resources.json")));
}

#[test]
fn test_invalid_content_rejected() {
    let cases = [
        (
            r#"[{"name": "x", "seasons": ["MONSOON"], "choices": [{"label": "y"}]}]"#,
            "invalid content",
        ),
        (
            r#"[{"name": "x", "choices": [{"label": "y", "effects": [
                {"type": "resources", "resource": "GOLD", "value": 1}]}]}]"#,
            "invalid content",
        ),
        (
            r#"[{"name": "x", "choices": [{"label": "y", "effects": [
                {"type": "satisfaction", "faction": "Pirates", "value": 1}]}]}]"#,
            "unknown faction \"Pirates\"",
        ),
        (r#"[{"name": "x", "choices": []}]"#, "has no choices"),
        (
            r#"[{"name": "x", "seasons": ["SPRING"], "choices": [{"label": "y"}]}]"#,
            "no event is available in SUMMER",
        ),
    ];

    for (events, message) in cases {
        let dir = tempfile::tempdir().unwrap();
        write_scenario(dir.path(), events);
        let err = load_scenario(dir.path(), Difficulty::Medium).unwrap_err();
        assert!(err.to_string().contains(message), "{events}: {err}");
    }
}

#[test]
fn test_over_allocated_land_rejected() {
    let dir = tempfile::tempdir().unwrap();
    write_scenario(dir.path(), ALL_SEASON_EVENT);
    fs::write(
        dir.path().join("resources.json"),
        r#"{"industry": 70, "farming": 40, "treasury": 0, "foodUnit": 0}"#,
    )
    .unwrap();

    let err = load_scenario(dir.path(), Difficulty::Medium).unwrap_err();
    assert!(err.to_string().contains("exceeds 100%"), "{err}");
}
