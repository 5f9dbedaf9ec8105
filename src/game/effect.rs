//! Effects: the atomic mutations a choice applies to a player.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GameResult;
use crate::game::Player;

/// Which resource counter a [`Effect::Resource`] touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    /// Industrialisation percentage.
    #[serde(rename = "INDUSTRY")]
    Industry,
    /// Farming percentage.
    #[serde(rename = "FARMING")]
    Farming,
    /// Treasury.
    #[serde(rename = "TREASURY")]
    Treasury,
    /// Food stock.
    #[serde(rename = "FOODUNIT", alias = "FOOD")]
    Food,
}

/// A single signed change to one faction or resource.
///
/// Effects carry no "already used" flag: applying one twice changes state
/// twice. Callers apply each effect exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Effect {
    /// Change a faction's satisfaction.
    FactionSatisfaction {
        /// Target faction.
        faction: String,
        /// Signed change in percentage points.
        delta: i32,
    },
    /// Change a faction's supporter count.
    FactionSupport {
        /// Target faction.
        faction: String,
        /// Signed change, flat or in percent.
        delta: i32,
        /// Whether `delta` is a percentage of current support.
        percentage: bool,
    },
    /// Change one of the player's resource counters.
    Resource {
        /// Target counter.
        resource: ResourceKind,
        /// Signed change, already scaled for difficulty.
        delta: i32,
    },
}

impl Effect {
    /// The signed value this effect carries.
    #[must_use]
    pub const fn delta(&self) -> i32 {
        match self {
            Effect::FactionSatisfaction { delta, .. }
            | Effect::FactionSupport { delta, .. }
            | Effect::Resource { delta, .. } => *delta,
        }
    }

    /// The faction this effect targets, if any.
    #[must_use]
    pub fn faction(&self) -> Option<&str> {
        match self {
            Effect::FactionSatisfaction { faction, .. } | Effect::FactionSupport { faction, .. } => {
                Some(faction)
            }
            Effect::Resource { .. } => None,
        }
    }

    /// Apply this effect to `player`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GameError::UnknownFaction`] if the target faction is
    /// not in the player's roster. Content loading rejects such effects, so
    /// this only fires for hand-built effects.
    pub fn apply(&self, player: &mut Player) -> GameResult<()> {
        match self {
            Effect::FactionSatisfaction { faction, delta } => {
                player.faction_mut(faction)?.add_satisfaction(*delta);
            }
            Effect::FactionSupport {
                faction,
                delta,
                percentage,
            } => {
                let faction = player.faction_mut(faction)?;
                if *percentage {
                    faction.add_support_percentage(*delta);
                } else {
                    faction.add_support(*delta);
                }
            }
            Effect::Resource { resource, delta } => {
                let resources = player.resources_mut();
                match resource {
                    ResourceKind::Industry => resources.add_industry(*delta),
                    ResourceKind::Farming => resources.add_farming(*delta),
                    ResourceKind::Treasury => resources.add_money(*delta),
                    ResourceKind::Food => resources.add_food(*delta),
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let delta = self.delta();
        if delta > 0 {
            write!(f, "+{delta}")?;
        } else {
            write!(f, "{delta}")?;
        }

        match self {
            Effect::FactionSatisfaction { faction, .. } => {
                write!(f, "% satisfaction for faction {faction}")
            }
            Effect::FactionSupport {
                faction,
                percentage: true,
                ..
            } => write!(f, "% supporters for faction {faction}"),
            Effect::FactionSupport { faction, .. } => write!(f, " supporters for faction {faction}"),
            Effect::Resource { resource, .. } => match resource {
                ResourceKind::Industry => f.write_str("% industry"),
                ResourceKind::Farming => f.write_str("% farming"),
                ResourceKind::Treasury => f.write_str("$"),
                ResourceKind::Food => f.write_str(" food units"),
            },
        }
    }
}
