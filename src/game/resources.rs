//! Island economy: land use, treasury and food stores.
//!
//! Industry and farming are percentages of the island's land and share the
//! same 100%. Treasury and food are plain stocks that saturate at zero: an
//! empty granary is a hardship, not an error.
//!
//! # Yearly yields
//!
//! - Money: industry × 10
//! - Food: farming × 40
//! - Upkeep: 4 food per supporter

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ContentError;

/// Upper bound shared by industry and farming.
pub const LAND_MAX: u32 = 100;

/// Food consumed by one supporter per year.
pub const FOOD_PER_SUPPORTER: u32 = 4;

/// Money produced per point of industry.
pub const MONEY_PER_INDUSTRY: u32 = 10;

/// Food produced per point of farming.
pub const FOOD_PER_FARMING: u32 = 40;

/// Resource record as it appears in scenario files.
#[derive(Debug, Clone, Copy, Deserialize)]
struct ResourcesRecord {
    industry: u32,
    farming: u32,
    treasury: u32,
    #[serde(alias = "foodUnit")]
    food: u32,
}

impl TryFrom<ResourcesRecord> for Resources {
    type Error = ContentError;

    fn try_from(record: ResourcesRecord) -> Result<Self, Self::Error> {
        Resources::new(record.industry, record.farming, record.treasury, record.food)
    }
}

/// Per-player economic counters.
///
/// Invariant: `industry + farming <= 100`. Copies are deep; each player owns
/// its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ResourcesRecord")]
pub struct Resources {
    industry: u32,
    farming: u32,
    treasury: u32,
    food: u32,
}

/// Saturating `old + delta` on an unsigned counter.
fn saturating_apply(old: u32, delta: i32) -> u32 {
    old.saturating_add_signed(delta)
}

impl Resources {
    /// Create a resource record, rejecting over-allocated land.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::LandOverAllocated`] if industry and farming
    /// together exceed 100.
    pub fn new(industry: u32, farming: u32, treasury: u32, food: u32) -> Result<Self, ContentError> {
        if industry.saturating_add(farming) > LAND_MAX {
            return Err(ContentError::LandOverAllocated { industry, farming });
        }
        Ok(Self {
            industry,
            farming,
            treasury,
            food,
        })
    }

    /// Industrialisation, in percent of land.
    #[must_use]
    pub const fn industry(&self) -> u32 {
        self.industry
    }

    /// Farming, in percent of land.
    #[must_use]
    pub const fn farming(&self) -> u32 {
        self.farming
    }

    /// Money in the treasury.
    #[must_use]
    pub const fn treasury(&self) -> u32 {
        self.treasury
    }

    /// Food units in store.
    #[must_use]
    pub const fn food(&self) -> u32 {
        self.food
    }

    /// Change industry, keeping it within `0..=100 - farming`.
    pub fn add_industry(&mut self, delta: i32) {
        let ceiling = LAND_MAX - self.farming;
        self.industry = saturating_apply(self.industry, delta).min(ceiling);
    }

    /// Change farming, keeping it within `0..=100 - industry`.
    pub fn add_farming(&mut self, delta: i32) {
        let ceiling = LAND_MAX - self.industry;
        self.farming = saturating_apply(self.farming, delta).min(ceiling);
    }

    /// Change the treasury. Never drops below zero.
    pub fn add_money(&mut self, delta: i32) {
        self.treasury = saturating_apply(self.treasury, delta);
    }

    /// Change the food stock. Never drops below zero.
    pub fn add_food(&mut self, delta: i32) {
        self.food = saturating_apply(self.food, delta);
    }

    /// Take money out of the treasury. The caller has checked the balance.
    pub(crate) fn spend(&mut self, amount: u32) {
        self.treasury = self.treasury.saturating_sub(amount);
    }

    /// Add `industry × 10` to the treasury and return the amount.
    pub fn generate_money(&mut self) -> u32 {
        let money = self.industry * MONEY_PER_INDUSTRY;
        self.treasury = self.treasury.saturating_add(money);
        money
    }

    /// Add `farming × 40` to the food stock and return the amount.
    pub fn generate_food(&mut self) -> u32 {
        let food = self.farming * FOOD_PER_FARMING;
        self.food = self.food.saturating_add(food);
        food
    }

    /// Feed `population` supporters for a year.
    ///
    /// Returns how many supporters could not be fed. On a shortfall every
    /// whole ration is eaten and only the leftover crumbs (`food % 4`) stay in
    /// store.
    pub fn consume_food(&mut self, population: u64) -> u64 {
        let required = population.saturating_mul(u64::from(FOOD_PER_SUPPORTER));

        if required > u64::from(self.food) {
            let fed = u64::from(self.food / FOOD_PER_SUPPORTER);
            self.food %= FOOD_PER_SUPPORTER;
            return population - fed;
        }

        // required <= food, so it fits in u32
        #[allow(clippy::cast_possible_truncation)]
        let required = required as u32;
        self.food -= required;
        0
    }

    /// Whether this year's harvest strictly exceeds what `population` eats.
    #[must_use]
    pub fn has_enough_farming(&self, population: u64) -> bool {
        population.saturating_mul(u64::from(FOOD_PER_SUPPORTER))
            < u64::from(self.farming) * u64::from(FOOD_PER_FARMING)
    }
}

impl fmt::Display for Resources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Resources:")?;
        writeln!(f, "  Industry: {}% / Farming: {}%", self.industry, self.farming)?;
        writeln!(f, "  Treasury: {}$", self.treasury)?;
        write!(f, "  Food: {} units", self.food)
    }
}
