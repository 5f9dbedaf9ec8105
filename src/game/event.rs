//! Narrative events and the choices they offer.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::{Effect, Season};

/// Handle to an event in an [`crate::game::EventPool`]'s catalogue.
///
/// Pool membership is tracked by handle, so the same event is never in two
/// pool sets at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub u32);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One option of an event: a list of effects plus an optional follow-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Text shown to the player.
    pub label: String,
    /// Effects, applied in order.
    pub effects: Vec<Effect>,
    /// Follow-up event queued as pending when this choice is taken.
    pub next: Option<EventId>,
}

impl Choice {
    /// Create a choice with no follow-up.
    #[must_use]
    pub fn new(label: impl Into<String>, effects: Vec<Effect>) -> Self {
        Self {
            label: label.into(),
            effects,
            next: None,
        }
    }

    /// Chain a follow-up event onto this choice.
    #[must_use]
    pub fn followed_by(mut self, next: EventId) -> Self {
        self.next = Some(next);
        self
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// A named, season-tagged situation offering at least one choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Event title.
    pub name: String,
    /// Seasons in which the event may be drawn.
    pub seasons: Vec<Season>,
    /// Options, in display order.
    pub choices: Vec<Choice>,
}

impl Event {
    /// Create an event. An empty season list means "any season".
    #[must_use]
    pub fn new(name: impl Into<String>, seasons: Vec<Season>, choices: Vec<Choice>) -> Self {
        let seasons = if seasons.is_empty() {
            Season::ALL.to_vec()
        } else {
            seasons
        };
        Self {
            name: name.into(),
            seasons,
            choices,
        }
    }

    /// Whether the event may be drawn in `season`.
    #[must_use]
    pub fn occurs_in(&self, season: Season) -> bool {
        self.seasons.contains(&season)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for (i, choice) in self.choices.iter().enumerate() {
            write!(f, "\n  {}) {}", i + 1, choice.label)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_seasons_means_all() {
        let event = Event::new("Hurricane", Vec::new(), vec![Choice::new("Pray", Vec::new())]);
        for season in Season::ALL {
            assert!(event.occurs_in(season));
        }
    }

    #[test]
    fn test_season_filter() {
        let event = Event::new(
            "Harvest festival",
            vec![Season::Autumn],
            vec![Choice::new("Celebrate", Vec::new())],
        );
        assert!(event.occurs_in(Season::Autumn));
        assert!(!event.occurs_in(Season::Spring));
    }

    #[test]
    fn test_display_lists_choices() {
        let event = Event::new(
            "Strike",
            vec![Season::Summer],
            vec![
                Choice::new("Negotiate", Vec::new()),
                Choice::new("Send the army", Vec::new()).followed_by(EventId(3)),
            ],
        );
        assert_eq!(event.to_string(), "Strike\n  1) Negotiate\n  2) Send the army");
        assert_eq!(event.choices[1].next, Some(EventId(3)));
    }
}
