//! Player state: one island's economy and factions, and its population
//! dynamics at the turn of the year.
//!
//! # Year end
//!
//! 1. Harvest and industry yields are added to the stores.
//! 2. Every supporter eats 4 food.
//! 3. If some could not be fed, that many die. Each death hits a faction
//!    chosen in proportion to its share of the remaining population, and
//!    every faction loses 2 satisfaction.
//! 4. Otherwise, if the harvest alone exceeded upkeep, the population grows by
//!    1-10%. Newcomers lean toward satisfied factions.
//!
//! Steps 3 and 4 never both happen in one year.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::content::Scenario;
use crate::error::{GameError, GameResult};
use crate::game::weighted::choose_weighted;
use crate::game::{Difficulty, Faction, Resources};

/// Name of the faction that resents bribes paid to others.
pub const LOYALISTS: &str = "Loyalists";

/// Satisfaction lost by every faction for each supporter that starves.
pub const STARVATION_FALLOUT: i32 = 2;

/// Satisfaction bought by a bribe.
pub const BRIBE_SATISFACTION: i32 = 10;

/// Satisfaction the Loyalists lose when another faction is bribed.
pub const BRIBE_LOYALIST_FALLOUT: i32 = 5;

/// Market price of one food unit.
pub const FOOD_PRICE: u32 = 8;

/// Lowest acquisition factor a faction can have, however unhappy.
const MIN_GROWTH_FACTOR: f64 = 0.2;

/// What happened to a player at the end of a year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearReport {
    /// Food harvested.
    pub food_generated: u32,
    /// Money earned by industry.
    pub money_generated: u32,
    /// Supporters before deaths or births.
    pub population: u64,
    /// Supporters who starved.
    pub deaths: u64,
    /// Supporters who joined.
    pub births: u64,
}

impl fmt::Display for YearReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Harvest: +{} food units", self.food_generated)?;
        writeln!(f, "Industry: +{}$", self.money_generated)?;
        write!(f, "Population: {}", self.population)?;
        if self.deaths > 0 {
            write!(f, "\n{} supporters starved", self.deaths)?;
        }
        if self.births > 0 {
            write!(f, "\n{} new supporters", self.births)?;
        }
        Ok(())
    }
}

/// One island and its government.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    name: String,
    resources: Resources,
    factions: Vec<Faction>,
}

impl Player {
    /// Create a player owning the given roster and resources.
    #[must_use]
    pub fn new(name: impl Into<String>, factions: Vec<Faction>, resources: Resources) -> Self {
        Self {
            name: name.into(),
            resources,
            factions,
        }
    }

    /// Create a player with its own copy of a scenario's starting state.
    #[must_use]
    pub fn from_scenario(name: impl Into<String>, scenario: &Scenario) -> Self {
        Self::new(name, scenario.factions.clone(), scenario.resources)
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resource counters.
    #[must_use]
    pub const fn resources(&self) -> &Resources {
        &self.resources
    }

    /// Mutable resource counters.
    pub fn resources_mut(&mut self) -> &mut Resources {
        &mut self.resources
    }

    /// Faction roster, in scenario order.
    #[must_use]
    pub fn factions(&self) -> &[Faction] {
        &self.factions
    }

    /// Look up a faction by name.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::UnknownFaction`] if no faction has that name.
    pub fn faction(&self, name: &str) -> GameResult<&Faction> {
        self.factions
            .iter()
            .find(|f| f.name() == name)
            .ok_or_else(|| GameError::UnknownFaction(name.to_string()))
    }

    /// Look up a faction by name for mutation.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::UnknownFaction`] if no faction has that name.
    pub fn faction_mut(&mut self, name: &str) -> GameResult<&mut Faction> {
        self.factions
            .iter_mut()
            .find(|f| f.name() == name)
            .ok_or_else(|| GameError::UnknownFaction(name.to_string()))
    }

    /// Total supporters across factions.
    #[must_use]
    pub fn total_support(&self) -> u64 {
        self.factions.iter().map(|f| u64::from(f.support())).sum()
    }

    /// Support-weighted average satisfaction, or `None` with no supporters.
    #[must_use]
    pub fn average_satisfaction(&self) -> Option<u32> {
        let total = self.total_support();
        if total == 0 {
            return None;
        }
        // An average of values <= 100 fits in u32.
        #[allow(clippy::cast_possible_truncation)]
        let average = (self.weighted_satisfaction() / total) as u32;
        Some(average)
    }

    fn weighted_satisfaction(&self) -> u64 {
        self.factions
            .iter()
            .map(|f| u64::from(f.satisfaction()) * u64::from(f.support()))
            .sum()
    }

    /// Whether this government has fallen.
    ///
    /// A player falls with no supporters left, or when average satisfaction
    /// (weighted by support) drops below the difficulty's threshold.
    #[must_use]
    pub fn is_dead(&self, difficulty: Difficulty) -> bool {
        let total = self.total_support();
        if total == 0 {
            return true;
        }
        self.weighted_satisfaction() < u64::from(difficulty.defeat_threshold()) * total
    }

    /// Factions that can still be bribed.
    #[must_use]
    pub fn satisfied_factions(&self) -> Vec<&Faction> {
        self.factions.iter().filter(|f| !f.is_collapsed()).collect()
    }

    /// Bribe a faction: pay its price for +10 satisfaction.
    ///
    /// Bribing anyone but the Loyalists costs the Loyalists 5 satisfaction.
    /// Returns the amount paid.
    ///
    /// # Errors
    ///
    /// Fails if the faction is unknown, has collapsed, or the treasury
    /// cannot cover the price.
    pub fn bribe(&mut self, name: &str) -> GameResult<u64> {
        let faction = self.faction(name)?;
        if faction.is_collapsed() {
            return Err(GameError::FrozenFaction(name.to_string()));
        }

        let cost = faction.bribe_cost();
        let treasury = self.resources.treasury();
        if cost > u64::from(treasury) {
            return Err(GameError::InsufficientFunds {
                needed: cost,
                available: treasury,
            });
        }

        // cost <= treasury
        #[allow(clippy::cast_possible_truncation)]
        let cost_paid = cost as u32;
        self.resources.spend(cost_paid);
        self.faction_mut(name)?.add_satisfaction(BRIBE_SATISFACTION);

        if name != LOYALISTS {
            if let Ok(loyalists) = self.faction_mut(LOYALISTS) {
                loyalists.add_satisfaction(-BRIBE_LOYALIST_FALLOUT);
            }
        }

        tracing::info!(player = %self.name, faction = name, cost, "bribe paid");
        Ok(cost)
    }

    /// Most food units the treasury can buy.
    #[must_use]
    pub const fn max_food_purchase(&self) -> u32 {
        self.resources.treasury() / FOOD_PRICE
    }

    /// Buy food on the market. Returns the amount paid.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InsufficientFunds`] if the treasury is short.
    pub fn buy_food(&mut self, units: u32) -> GameResult<u64> {
        let cost = u64::from(units) * u64::from(FOOD_PRICE);
        let treasury = self.resources.treasury();
        if cost > u64::from(treasury) {
            return Err(GameError::InsufficientFunds {
                needed: cost,
                available: treasury,
            });
        }

        #[allow(clippy::cast_possible_truncation)]
        let cost_paid = cost as u32;
        self.resources.spend(cost_paid);
        self.resources.add_food(i32::try_from(units).unwrap_or(i32::MAX));
        Ok(cost)
    }

    /// Close the year: collect yields, feed the population, then either
    /// starve the unfed or grow.
    ///
    /// # Errors
    ///
    /// Propagates a failed supporter removal, which cannot happen while the
    /// roster is consistent.
    pub fn generate_resources<R: Rng + ?Sized>(&mut self, rng: &mut R) -> GameResult<YearReport> {
        let food_generated = self.resources.generate_food();
        let money_generated = self.resources.generate_money();

        let population = self.total_support();
        let overflow = self.resources.consume_food(population);

        let mut report = YearReport {
            food_generated,
            money_generated,
            population,
            ..YearReport::default()
        };

        if overflow > 0 {
            report.deaths = self.kill_supporters(overflow, population, rng)?;
        } else if self.resources.has_enough_farming(population) {
            report.births = self.generate_new_supporters(population, rng);
        }

        tracing::info!(
            player = %self.name,
            food = food_generated,
            money = money_generated,
            population,
            deaths = report.deaths,
            births = report.births,
            "year closed"
        );
        Ok(report)
    }

    /// Remove `overflow` supporters, one weighted draw at a time.
    ///
    /// Each death picks a faction by its share of the remaining population,
    /// then costs every faction satisfaction. Returns the number killed.
    fn kill_supporters<R: Rng + ?Sized>(
        &mut self,
        overflow: u64,
        population: u64,
        rng: &mut R,
    ) -> GameResult<u64> {
        let mut remaining = population;
        let mut deaths = 0;

        for _ in 0..overflow {
            if remaining == 0 {
                break;
            }
            #[allow(clippy::cast_precision_loss)]
            let pop = remaining as f64;
            let shares = self
                .factions
                .iter()
                .enumerate()
                .map(|(i, f)| (i, f64::from(f.support()) / pop));
            let Some(index) = choose_weighted(rng, shares) else {
                break;
            };

            self.factions[index].kill_supporter()?;
            for faction in &mut self.factions {
                faction.add_satisfaction(-STARVATION_FALLOUT);
            }
            remaining -= 1;
            deaths += 1;
        }

        Ok(deaths)
    }

    /// Add 1-10% of `population` as new supporters. Returns how many joined.
    fn generate_new_supporters<R: Rng + ?Sized>(&mut self, population: u64, rng: &mut R) -> u64 {
        let multiplier: f64 = rng.random_range(1.0..10.0);
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_precision_loss,
            clippy::cast_sign_loss
        )]
        let added = (population as f64 * multiplier / 100.0) as u64;

        let mut births = 0;
        for _ in 0..added {
            let chances = self.faction_chances(population);
            let Some(index) = choose_weighted(rng, chances.into_iter().enumerate()) else {
                break;
            };
            self.factions[index].add_support(1);
            births += 1;
        }
        births
    }

    /// Probability that a newcomer joins each faction, in roster order.
    ///
    /// A faction's pull is its share of `population` scaled by
    /// `max(satisfaction × 0.9 / 100 + 0.1, 0.2)`; the pulls are normalised
    /// to sum to 1. All zeros when nobody supports anyone.
    #[must_use]
    pub fn faction_chances(&self, population: u64) -> Vec<f64> {
        if population == 0 {
            return vec![0.0; self.factions.len()];
        }
        #[allow(clippy::cast_precision_loss)]
        let pop = population as f64;

        let weights: Vec<f64> = self
            .factions
            .iter()
            .map(|f| {
                let factor = (f64::from(f.satisfaction()) * 0.9 / 100.0 + 0.1).max(MIN_GROWTH_FACTOR);
                factor * f64::from(f.support()) / pop
            })
            .collect();

        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return weights;
        }
        weights.into_iter().map(|w| w / total).collect()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}]", self.name)?;
        for faction in &self.factions {
            writeln!(f, "  {faction}")?;
        }
        write!(f, "{}", self.resources)
    }
}
