//! Political factions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};

/// Lowest satisfaction. A faction that reaches it never recovers.
pub const SATISFACTION_MIN: u32 = 0;

/// Highest satisfaction.
pub const SATISFACTION_MAX: u32 = 100;

/// Treasury cost of a bribe, per supporter of the bribed faction.
pub const BRIBE_COST_PER_SUPPORTER: u64 = 15;

/// A named political bloc.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faction {
    name: String,
    satisfaction: u32,
    #[serde(alias = "supporter")]
    support: u32,
}

impl Faction {
    /// Create a faction. Satisfaction is clamped to 0..=100.
    #[must_use]
    pub fn new(name: impl Into<String>, satisfaction: u32, support: u32) -> Self {
        Self {
            name: name.into(),
            satisfaction: satisfaction.min(SATISFACTION_MAX),
            support,
        }
    }

    /// Unique faction name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Satisfaction in percent.
    #[must_use]
    pub const fn satisfaction(&self) -> u32 {
        self.satisfaction
    }

    /// Number of supporters.
    #[must_use]
    pub const fn support(&self) -> u32 {
        self.support
    }

    /// Whether satisfaction has hit zero for good.
    #[must_use]
    pub const fn is_collapsed(&self) -> bool {
        self.satisfaction == SATISFACTION_MIN
    }

    /// Change satisfaction within 0..=100. No-op once collapsed.
    pub fn add_satisfaction(&mut self, delta: i32) {
        if self.is_collapsed() {
            return;
        }
        self.satisfaction = self
            .satisfaction
            .saturating_add_signed(delta)
            .min(SATISFACTION_MAX);
    }

    /// Change support by a flat amount, flooring at zero.
    pub fn add_support(&mut self, delta: i32) {
        self.support = self.support.saturating_add_signed(delta);
    }

    /// Change support by `percentage` percent of its current value.
    ///
    /// The change truncates toward zero, so small factions can be immune to
    /// small percentages.
    pub fn add_support_percentage(&mut self, percentage: i32) {
        let delta = i64::from(self.support) * i64::from(percentage) / 100;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let updated = (i64::from(self.support) + delta).clamp(0, i64::from(u32::MAX)) as u32;
        self.support = updated;
    }

    /// Remove one supporter.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NoSupporters`] if the faction has none left.
    pub fn kill_supporter(&mut self) -> GameResult<()> {
        if self.support == 0 {
            return Err(GameError::NoSupporters(self.name.clone()));
        }
        self.support -= 1;
        Ok(())
    }

    /// Price of bribing this faction.
    #[must_use]
    pub fn bribe_cost(&self) -> u64 {
        u64::from(self.support) * BRIBE_COST_PER_SUPPORTER
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}% / {}", self.name, self.satisfaction, self.support)
    }
}
