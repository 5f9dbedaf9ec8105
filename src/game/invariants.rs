//! Game invariants - sanity checks that detect bugs.
//!
//! The mutation rules already clamp every counter, so these should NEVER
//! trigger. A violation means some code path bypassed the rules, or a save
//! file was edited by hand.

use std::collections::HashSet;

use crate::game::{GameState, LAND_MAX, SATISFACTION_MAX};

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all game invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(state: &GameState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let mut report = |message: String| violations.push(InvariantViolation { message });

    // Each event sits in at most one pool set, at most once
    let pool = &state.pool;
    let mut pooled = HashSet::new();
    for (set, ids) in [
        ("available", pool.available()),
        ("used", pool.used()),
        ("pending", pool.pending()),
    ] {
        for &id in ids {
            if pool.event(id).is_none() {
                report(format!("Event {id} in {set} is not in the catalogue"));
            }
            if !pooled.insert(id) {
                report(format!("Event {id} is pooled more than once (seen again in {set})"));
            }
        }
    }

    if let Some(id) = state.current_event_id() {
        if pool.event(id).is_none() {
            report(format!("Current event {id} is not in the catalogue"));
        }
    }

    if state.players.is_empty() {
        report("Game has no players".to_string());
    } else if state.current_player_index() >= state.players.len() {
        report(format!(
            "Current player index {} out of range for {} players",
            state.current_player_index(),
            state.players.len()
        ));
    }

    for player in &state.players {
        let resources = player.resources();
        if resources.industry().saturating_add(resources.farming()) > LAND_MAX {
            report(format!(
                "{} uses {}% industry + {}% farming > {LAND_MAX}%",
                player.name(),
                resources.industry(),
                resources.farming()
            ));
        }

        let mut names = HashSet::new();
        for faction in player.factions() {
            if faction.satisfaction() > SATISFACTION_MAX {
                report(format!(
                    "{} faction {} has satisfaction {} > {SATISFACTION_MAX}",
                    player.name(),
                    faction.name(),
                    faction.satisfaction()
                ));
            }
            if !names.insert(faction.name()) {
                report(format!(
                    "{} has faction {} twice",
                    player.name(),
                    faction.name()
                ));
            }
        }
    }

    violations
}

/// Assert all game invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(state: &GameState) {
    let violations = check_invariants(state);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Game invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_state: &GameState) {}
