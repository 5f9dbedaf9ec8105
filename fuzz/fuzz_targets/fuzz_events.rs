#![no_main]

//! Event content fuzzer.
//!
//! Feeds arbitrary bytes to the `events.json` parser and compiles whatever
//! parses. Bad content must come back as an error, never a panic, and a
//! compiled pool must start out consistent.

use isla::content::{EventRecord, Scenario, check_season_coverage, compile_events};
use isla::game::{Difficulty, EventPool, Faction, Resources, Season};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(records) = serde_json::from_slice::<Vec<EventRecord>>(data) else {
        return;
    };
    let Ok(resources) = Resources::new(10, 10, 0, 0) else {
        return;
    };
    let Ok(scenario) = Scenario::new(
        vec![
            Faction::new("Loyalists", 80, 10),
            Faction::new("Capitalists", 50, 10),
        ],
        resources,
    ) else {
        return;
    };

    for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        let Ok(pool) = compile_events(&records, &scenario, difficulty) else {
            continue;
        };
        let _ = check_season_coverage(&pool);
        check_pool(&pool);
    }
});

/// Every top-level record is available, nothing else is pooled yet.
fn check_pool(pool: &EventPool) {
    assert!(pool.used().is_empty());
    assert!(pool.pending().is_empty());
    assert!(pool.available().len() <= pool.catalog().len());

    for event in pool.catalog() {
        assert!(!event.choices.is_empty(), "event {} has no choices", event.name);
        assert!(Season::ALL.iter().any(|&s| event.occurs_in(s)));
        for choice in &event.choices {
            if let Some(next) = choice.next {
                assert!(pool.event(next).is_some(), "dangling follow-up {next}");
            }
        }
    }
}
