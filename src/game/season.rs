//! Seasons and difficulty levels.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Season of the in-game year. Cycles spring to winter and back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Season {
    /// First season of the year.
    Spring,
    /// Second season.
    Summer,
    /// Third season.
    Autumn,
    /// Last season; the year closes at the end of winter.
    Winter,
}

impl Season {
    /// All seasons in calendar order.
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Autumn, Season::Winter];

    /// The season that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Season::Spring => Season::Summer,
            Season::Summer => Season::Autumn,
            Season::Autumn => Season::Winter,
            Season::Winter => Season::Spring,
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Season::Spring => "SPRING",
            Season::Summer => "SUMMER",
            Season::Autumn => "AUTUMN",
            Season::Winter => "WINTER",
        };
        f.write_str(name)
    }
}

/// Difficulty, fixed for a whole game once chosen.
///
/// Controls two things: the average satisfaction below which a player is
/// overthrown, and how hard negative resource effects hit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    /// Threshold 10, negative resource effects halved.
    Easy,
    /// Threshold 30, effects as written.
    #[default]
    Medium,
    /// Threshold 50, negative resource effects ×1.5.
    Hard,
}

impl Difficulty {
    /// Weighted average satisfaction a player must stay at or above.
    #[must_use]
    pub const fn defeat_threshold(self) -> u32 {
        match self {
            Difficulty::Easy => 10,
            Difficulty::Medium => 30,
            Difficulty::Hard => 50,
        }
    }

    /// Multiplier applied to negative resource effects at load time.
    #[must_use]
    pub const fn negative_multiplier(self) -> f64 {
        match self {
            Difficulty::Easy => 0.5,
            Difficulty::Medium => 1.0,
            Difficulty::Hard => 1.5,
        }
    }

    /// Scale a resource effect value. Only losses are scaled; the result
    /// truncates toward zero.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn scale_resource_delta(self, value: i32) -> i32 {
        if value < 0 {
            (f64::from(value) * self.negative_multiplier()) as i32
        } else {
            value
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(name)
    }
}
