//! Game layer for Isla.
//!
//! Implements the rules of governing the island:
//! - Factions with satisfaction and supporters
//! - Resources: land use, treasury and food stores
//! - Events whose choices apply effects and queue follow-ups
//! - The event pool and its season-aware draws
//! - Year-end harvest, starvation and growth
//! - Turn, season and player rotation

mod effect;
mod event;
mod faction;
mod invariants;
mod player;
mod pool;
mod resources;
mod season;
mod state;
pub mod weighted;

pub use effect::{Effect, ResourceKind};
pub use event::{Choice, Event, EventId};
pub use faction::{BRIBE_COST_PER_SUPPORTER, Faction, SATISFACTION_MAX, SATISFACTION_MIN};
pub use invariants::{InvariantViolation, assert_invariants, check_invariants};
pub use player::{
    BRIBE_LOYALIST_FALLOUT, BRIBE_SATISFACTION, FOOD_PRICE, LOYALISTS, Player,
    STARVATION_FALLOUT, YearReport,
};
pub use pool::{DrawSource, EventPool, PENDING_PRIORITY, PoolSet};
pub use resources::{
    FOOD_PER_FARMING, FOOD_PER_SUPPORTER, LAND_MAX, MONEY_PER_INDUSTRY, Resources,
};
pub use season::{Difficulty, Season};
pub use state::{ChoiceOutcome, GameConfig, GameState};
