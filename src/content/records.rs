//! Event records as authored in `events.json`, and their compilation into an
//! [`EventPool`].

use serde::Deserialize;

use crate::content::Scenario;
use crate::error::ContentError;
use crate::game::{Choice, Difficulty, Effect, Event, EventPool, ResourceKind, Season};

/// Faction name that targets every faction in the roster.
pub const ALL_FACTIONS: &str = "all";

/// An authored event.
#[derive(Debug, Clone, Deserialize)]
pub struct EventRecord {
    /// Title.
    pub name: String,
    /// Seasons the event may occur in; empty or missing means all of them.
    #[serde(default)]
    pub seasons: Vec<Season>,
    /// Options offered to the player.
    pub choices: Vec<ChoiceRecord>,
}

/// An authored choice.
#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceRecord {
    /// Text shown to the player.
    pub label: String,
    /// Effects in application order.
    #[serde(default)]
    pub effects: Vec<EffectRecord>,
    /// Follow-up event, queued when this choice is taken.
    #[serde(default)]
    pub next: Option<Box<EventRecord>>,
}

/// An authored effect, tagged by `type`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EffectRecord {
    /// Satisfaction change for one faction or `"all"`.
    Satisfaction {
        /// Target faction name.
        faction: String,
        /// Signed change.
        value: i32,
    },
    /// Supporter change for one faction or `"all"`.
    Supporter {
        /// Target faction name.
        faction: String,
        /// Signed change.
        value: i32,
        /// Whether `value` is a percentage.
        #[serde(default)]
        percentage: bool,
    },
    /// Resource change.
    Resources {
        /// Target counter.
        resource: ResourceKind,
        /// Signed change, before difficulty scaling.
        value: i32,
    },
}

/// Turns records into a pool, resolving factions and scaling for difficulty.
struct Compiler<'a> {
    scenario: &'a Scenario,
    difficulty: Difficulty,
    pool: EventPool,
}

impl Compiler<'_> {
    fn event(&mut self, record: &EventRecord) -> Result<Event, ContentError> {
        if record.choices.is_empty() {
            return Err(ContentError::NoChoices(record.name.clone()));
        }

        let mut choices = Vec::with_capacity(record.choices.len());
        for choice in &record.choices {
            let mut effects = Vec::new();
            for effect in &choice.effects {
                self.effect(&record.name, effect, &mut effects)?;
            }

            let mut compiled = Choice::new(choice.label.clone(), effects);
            if let Some(next) = &choice.next {
                let next = self.event(next)?;
                compiled = compiled.followed_by(self.pool.register(next));
            }
            choices.push(compiled);
        }

        Ok(Event::new(record.name.clone(), record.seasons.clone(), choices))
    }

    fn effect(
        &self,
        event: &str,
        record: &EffectRecord,
        out: &mut Vec<Effect>,
    ) -> Result<(), ContentError> {
        match record {
            EffectRecord::Satisfaction { faction, value } => {
                for faction in self.targets(event, faction)? {
                    out.push(Effect::FactionSatisfaction {
                        faction,
                        delta: *value,
                    });
                }
            }
            EffectRecord::Supporter {
                faction,
                value,
                percentage,
            } => {
                for faction in self.targets(event, faction)? {
                    out.push(Effect::FactionSupport {
                        faction,
                        delta: *value,
                        percentage: *percentage,
                    });
                }
            }
            EffectRecord::Resources { resource, value } => out.push(Effect::Resource {
                resource: *resource,
                delta: self.difficulty.scale_resource_delta(*value),
            }),
        }
        Ok(())
    }

    /// Resolve a faction reference, expanding `"all"` in roster order.
    fn targets(&self, event: &str, faction: &str) -> Result<Vec<String>, ContentError> {
        if faction == ALL_FACTIONS {
            return Ok(self.scenario.faction_names().map(str::to_string).collect());
        }
        if !self.scenario.has_faction(faction) {
            return Err(ContentError::UnknownFaction {
                event: event.to_string(),
                faction: faction.to_string(),
            });
        }
        Ok(vec![faction.to_string()])
    }
}

/// Compile authored events into a pool.
///
/// Top-level events start out available; follow-ups are only catalogued.
/// Negative resource effects are scaled once by `difficulty` here.
///
/// # Errors
///
/// Fails on an event without choices or an effect naming a faction the
/// scenario does not have.
pub fn compile_events(
    records: &[EventRecord],
    scenario: &Scenario,
    difficulty: Difficulty,
) -> Result<EventPool, ContentError> {
    let mut compiler = Compiler {
        scenario,
        difficulty,
        pool: EventPool::new(),
    };

    for record in records {
        let event = compiler.event(record)?;
        compiler.pool.push_available(event);
    }

    Ok(compiler.pool)
}
