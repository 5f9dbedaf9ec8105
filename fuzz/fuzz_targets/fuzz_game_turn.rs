#![no_main]

//! Full game turn fuzzer.
//!
//! This fuzz target exercises the complete game turn sequence:
//! 1. Draw an event for the season
//! 2. Apply a (possibly invalid) choice
//! 3. Bribe and buy food at the year end
//! 4. Run the harvest and population update
//! 5. Advance player and season
//!
//! This catches integration bugs that individual module tests miss.

use arbitrary::Arbitrary;
use isla::content::Scenario;
use isla::game::{
    Choice, Difficulty, Effect, Event, EventPool, Faction, GameConfig, GameState, ResourceKind,
    Resources, Season, check_invariants,
};
use libfuzzer_sys::fuzz_target;

/// A fuzzer-generated effect.
#[derive(Arbitrary, Debug, Clone)]
enum FuzzEffect {
    Satisfaction { faction: u8, delta: i16 },
    Support { faction: u8, delta: i16, percentage: bool },
    Resource { kind: u8, delta: i16 },
}

/// A fuzzer-generated year-end action.
#[derive(Arbitrary, Debug, Clone)]
enum FuzzAction {
    Bribe { faction: u8 },
    BuyFood { units: u16 },
}

/// Structured input for full game turn fuzzing.
#[derive(Arbitrary, Debug)]
struct GameTurnInput {
    /// Starting (satisfaction, support) for up to four factions.
    factions: Vec<(u8, u16)>,
    /// Starting industry, farming, treasury, food.
    resources: (u8, u8, u16, u16),
    /// Effects of each event's choices.
    events: Vec<Vec<Vec<FuzzEffect>>>,
    /// Choice picked each turn.
    picks: Vec<u8>,
    /// Actions tried at every year end.
    actions: Vec<FuzzAction>,
    players: u8,
    seed: u64,
}

const NAMES: [&str; 4] = ["Loyalists", "Capitalists", "Communists", "Ecologists"];

fuzz_target!(|input: GameTurnInput| {
    let factions: Vec<Faction> = input
        .factions
        .iter()
        .take(NAMES.len())
        .enumerate()
        .map(|(i, &(sat, sup))| Faction::new(NAMES[i], u32::from(sat), u32::from(sup)))
        .collect();
    if factions.is_empty() {
        return;
    }

    let (industry, farming, treasury, food) = input.resources;
    let industry = u32::from(industry) % 101;
    let farming = u32::from(farming) % (101 - industry);
    let Ok(resources) = Resources::new(industry, farming, u32::from(treasury), u32::from(food))
    else {
        return;
    };
    let Ok(scenario) = Scenario::new(factions, resources) else {
        return;
    };

    // One all-season event guarantees every draw succeeds
    let mut pool = EventPool::new();
    pool.push_available(Event::new(
        "Quiet day",
        Vec::new(),
        vec![Choice::new("Rest", Vec::new())],
    ));
    let count = scenario.factions.len();
    for (i, choices) in input.events.iter().take(8).enumerate() {
        let choices: Vec<Choice> = choices
            .iter()
            .take(4)
            .map(|effects| Choice::new("c", effects.iter().take(6).map(|e| effect(e, count)).collect()))
            .collect();
        if choices.is_empty() {
            continue;
        }
        let event = Event::new(format!("E{i}"), vec![Season::ALL[i % 4]], choices);
        // Even events start queued as follow-ups, odd ones as fresh content
        if i % 2 == 0 {
            let id = pool.register(event);
            pool.defer(id);
        } else {
            pool.push_available(event);
        }
    }

    let config = GameConfig {
        difficulty: Difficulty::Medium,
        players: usize::from(input.players % 4) + 1,
        seed: input.seed,
    };
    let Ok(mut game) = GameState::new(config, &scenario, pool) else {
        return;
    };

    for &pick in input.picks.iter().take(64) {
        let _ = game.choose(usize::from(pick % 5));

        if game.is_end_of_year() {
            for action in input.actions.iter().take(4) {
                let Ok(player) = game.current_player_mut() else {
                    return;
                };
                let _ = match *action {
                    FuzzAction::Bribe { faction } => player
                        .bribe(NAMES[usize::from(faction) % count])
                        .map(|_| ()),
                    FuzzAction::BuyFood { units } => player.buy_food(u32::from(units)).map(|_| ()),
                };
            }
            assert!(game.end_year().is_ok());
        }

        let violations = check_invariants(&game);
        assert!(violations.is_empty(), "Invariants violated: {violations:?}");

        if game.is_game_over() {
            break;
        }
        game.advance();
        assert!(game.current_event().is_some());
    }
});

fn effect(effect: &FuzzEffect, factions: usize) -> Effect {
    match *effect {
        FuzzEffect::Satisfaction { faction, delta } => Effect::FactionSatisfaction {
            faction: NAMES[usize::from(faction) % factions].to_string(),
            delta: i32::from(delta),
        },
        FuzzEffect::Support {
            faction,
            delta,
            percentage,
        } => Effect::FactionSupport {
            faction: NAMES[usize::from(faction) % factions].to_string(),
            delta: i32::from(delta),
            percentage,
        },
        FuzzEffect::Resource { kind, delta } => Effect::Resource {
            resource: match kind % 4 {
                0 => ResourceKind::Industry,
                1 => ResourceKind::Farming,
                2 => ResourceKind::Treasury,
                _ => ResourceKind::Food,
            },
            delta: i32::from(delta),
        },
    }
}
