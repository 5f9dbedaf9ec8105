//! Event pool: what can be drawn, what has been drawn, what is waiting.
//!
//! The pool owns every event of a game (the catalogue) and tracks each one by
//! [`EventId`] in at most one of three sets:
//!
//! - `available`: fresh content, drawable this playthrough
//! - `used`: already drawn; recycled per season once `available` runs dry
//! - `pending`: follow-ups queued by earlier choices
//!
//! Chained follow-ups live only in the catalogue until a choice defers them.
//! An event drawn from `pending` leaves the pool for good; an event drawn from
//! `available` moves to `used`.
//!
//! # Drawing
//!
//! Each draw flips a fair coin. On heads a pending event is preferred: the
//! first one tagged for the season, or failing that any pending event at
//! random, whatever its season. On tails (or with nothing pending) a fresh
//! event for the season is picked uniformly, recycling that season's used
//! events first if none is left.

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::game::{Event, EventId, Season};

/// Probability that a draw looks at pending follow-ups first.
pub const PENDING_PRIORITY: f64 = 0.5;

/// Which pool set an event currently sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolSet {
    /// Drawable fresh content.
    Available,
    /// Drawn before, waiting to be recycled.
    Used,
    /// Queued follow-up.
    Pending,
}

/// Where a drawn event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawSource {
    /// A pending follow-up.
    Pending,
    /// Fresh content from `available`.
    Fresh,
}

/// The game's events and the bookkeeping of which can be drawn next.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPool {
    catalog: Vec<Event>,
    available: Vec<EventId>,
    used: Vec<EventId>,
    pending: Vec<EventId>,
}

impl EventPool {
    /// Create an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an event to the catalogue without making it drawable.
    ///
    /// Used for follow-ups, which only enter play through [`Self::defer`].
    pub fn register(&mut self, event: Event) -> EventId {
        #[allow(clippy::cast_possible_truncation)]
        let id = EventId(self.catalog.len() as u32);
        self.catalog.push(event);
        id
    }

    /// Add an event to the catalogue and to `available`.
    pub fn push_available(&mut self, event: Event) -> EventId {
        let id = self.register(event);
        self.available.push(id);
        id
    }

    /// Look up an event.
    #[must_use]
    pub fn event(&self, id: EventId) -> Option<&Event> {
        self.catalog.get(id.0 as usize)
    }

    /// Every event known to the pool, in registration order.
    #[must_use]
    pub fn catalog(&self) -> &[Event] {
        &self.catalog
    }

    /// Events drawable as fresh content.
    #[must_use]
    pub fn available(&self) -> &[EventId] {
        &self.available
    }

    /// Events already drawn from `available`.
    #[must_use]
    pub fn used(&self) -> &[EventId] {
        &self.used
    }

    /// Queued follow-ups, oldest first.
    #[must_use]
    pub fn pending(&self) -> &[EventId] {
        &self.pending
    }

    /// Which set `id` is in, if any.
    #[must_use]
    pub fn location(&self, id: EventId) -> Option<PoolSet> {
        if self.available.contains(&id) {
            Some(PoolSet::Available)
        } else if self.used.contains(&id) {
            Some(PoolSet::Used)
        } else if self.pending.contains(&id) {
            Some(PoolSet::Pending)
        } else {
            None
        }
    }

    /// Number of catalogue events that can ever come up fresh in `season`.
    #[must_use]
    pub fn drawable_in(&self, season: Season) -> usize {
        self.available
            .iter()
            .chain(&self.used)
            .filter(|&&id| self.matches(id, season))
            .count()
    }

    /// Queue a follow-up event.
    ///
    /// Returns `false` (and changes nothing) if the event is unknown or
    /// already in one of the pool sets.
    pub fn defer(&mut self, id: EventId) -> bool {
        if self.event(id).is_none() {
            tracing::warn!(event = %id, "cannot defer unknown event");
            return false;
        }
        if let Some(set) = self.location(id) {
            tracing::warn!(event = %id, ?set, "follow-up already pooled, not queued again");
            return false;
        }
        self.pending.push(id);
        true
    }

    /// Draw the next event for `season`.
    ///
    /// Returns `None` only if no event was ever tagged for the season and
    /// nothing is pending.
    pub fn draw_next<R: Rng + ?Sized>(&mut self, season: Season, rng: &mut R) -> Option<EventId> {
        self.draw_next_with_source(season, rng).map(|(id, _)| id)
    }

    /// Like [`Self::draw_next`], also reporting which branch produced the event.
    pub fn draw_next_with_source<R: Rng + ?Sized>(
        &mut self,
        season: Season,
        rng: &mut R,
    ) -> Option<(EventId, DrawSource)> {
        if rng.random_bool(PENDING_PRIORITY) {
            if let Some(id) = self.draw_pending(season, rng) {
                return Some((id, DrawSource::Pending));
            }
        }
        self.draw_fresh(season, rng).map(|id| (id, DrawSource::Fresh))
    }

    /// Take a pending follow-up out of the pool.
    ///
    /// Prefers the oldest one tagged for `season`; otherwise takes any pending
    /// event at random, regardless of season. `None` when nothing is pending.
    pub fn draw_pending<R: Rng + ?Sized>(&mut self, season: Season, rng: &mut R) -> Option<EventId> {
        if self.pending.is_empty() {
            return None;
        }

        let index = match self.pending.iter().position(|&id| self.matches(id, season)) {
            Some(index) => index,
            None => rng.random_range(0..self.pending.len()),
        };
        let id = self.pending.remove(index);
        tracing::debug!(event = %id, %season, "drew pending follow-up");
        Some(id)
    }

    /// Draw fresh content for `season` and move it to `used`.
    ///
    /// Recycles the season's used events first if none is available.
    pub fn draw_fresh<R: Rng + ?Sized>(&mut self, season: Season, rng: &mut R) -> Option<EventId> {
        let mut candidates = self.available_indices(season);
        if candidates.is_empty() {
            self.recycle(season);
            candidates = self.available_indices(season);
        }

        let &index = candidates.choose(rng)?;
        let id = self.available.remove(index);
        self.used.push(id);
        tracing::debug!(event = %id, %season, "drew fresh event");
        Some(id)
    }

    /// Move every used event tagged for `season` back into `available`.
    ///
    /// Returns how many were moved.
    pub fn recycle(&mut self, season: Season) -> usize {
        let (recycled, kept): (Vec<EventId>, Vec<EventId>) = self
            .used
            .iter()
            .partition(|&&id| self.matches(id, season));
        self.used = kept;
        let count = recycled.len();
        self.available.extend(recycled);

        if count > 0 {
            tracing::info!(%season, count, "recycled used events");
        }
        count
    }

    fn available_indices(&self, season: Season) -> Vec<usize> {
        self.available
            .iter()
            .enumerate()
            .filter(|&(_, &id)| self.matches(id, season))
            .map(|(index, _)| index)
            .collect()
    }

    fn matches(&self, id: EventId, season: Season) -> bool {
        self.event(id).is_some_and(|event| event.occurs_in(season))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Choice;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    fn event(name: &str, seasons: &[Season]) -> Event {
        Event::new(name, seasons.to_vec(), vec![Choice::new("Ok", Vec::new())])
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(2024)
    }

    fn assert_disjoint(pool: &EventPool) {
        let mut seen = HashSet::new();
        for id in pool.available().iter().chain(pool.used()).chain(pool.pending()) {
            assert!(seen.insert(*id), "{id} is in two pool sets");
        }
    }

    #[test]
    fn test_fresh_draws_exhaust_before_repeating() {
        let mut pool = EventPool::new();
        let ids: Vec<_> = (0..5)
            .map(|i| pool.push_available(event(&format!("e{i}"), &[Season::Spring])))
            .collect();
        let mut rng = rng();

        let mut drawn = HashSet::new();
        for _ in 0..ids.len() {
            let id = pool.draw_fresh(Season::Spring, &mut rng).unwrap();
            assert!(drawn.insert(id), "{id} drawn twice before exhaustion");
            assert_eq!(pool.location(id), Some(PoolSet::Used));
            assert_disjoint(&pool);
        }

        assert!(pool.available().is_empty());
        assert_eq!(pool.used().len(), ids.len());
    }

    #[test]
    fn test_fresh_draw_respects_season() {
        let mut pool = EventPool::new();
        let winter = pool.push_available(event("Frost", &[Season::Winter]));
        pool.push_available(event("Drought", &[Season::Summer]));
        let mut rng = rng();

        for _ in 0..10 {
            assert_eq!(pool.draw_fresh(Season::Winter, &mut rng), Some(winter));
        }
    }

    #[test]
    fn test_recycling_repopulates_exactly_the_season() {
        let mut pool = EventPool::new();
        let spring: Vec<_> = (0..3)
            .map(|i| pool.push_available(event(&format!("s{i}"), &[Season::Spring])))
            .collect();
        let summer = pool.push_available(event("sun", &[Season::Summer]));
        let mut rng = rng();

        for _ in 0..3 {
            pool.draw_fresh(Season::Spring, &mut rng).unwrap();
        }
        pool.draw_fresh(Season::Summer, &mut rng).unwrap();
        assert!(pool.available().is_empty());
        assert_eq!(pool.used().len(), 4);

        assert_eq!(pool.recycle(Season::Spring), 3);
        let mut available = pool.available().to_vec();
        available.sort();
        assert_eq!(available, spring);
        assert_eq!(pool.used(), &[summer]);
    }

    #[test]
    fn test_fresh_draw_recycles_when_dry() {
        let mut pool = EventPool::new();
        for i in 0..3 {
            pool.push_available(event(&format!("s{i}"), &[Season::Spring]));
        }
        let mut rng = rng();
        for _ in 0..3 {
            pool.draw_fresh(Season::Spring, &mut rng).unwrap();
        }

        let id = pool.draw_fresh(Season::Spring, &mut rng).unwrap();
        assert_eq!(pool.available().len(), 2);
        assert_eq!(pool.used(), &[id]);
        assert_disjoint(&pool);
    }

    #[test]
    fn test_fresh_draw_with_no_season_content() {
        let mut pool = EventPool::new();
        pool.push_available(event("sun", &[Season::Summer]));
        assert_eq!(pool.draw_fresh(Season::Winter, &mut rng()), None);
    }

    #[test]
    fn test_pending_prefers_first_season_match() {
        let mut pool = EventPool::new();
        let summer = pool.register(event("summer follow-up", &[Season::Summer]));
        let autumn_a = pool.register(event("autumn a", &[Season::Autumn]));
        let autumn_b = pool.register(event("autumn b", &[Season::Autumn]));
        assert!(pool.defer(summer));
        assert!(pool.defer(autumn_a));
        assert!(pool.defer(autumn_b));

        let mut rng = rng();
        assert_eq!(pool.draw_pending(Season::Autumn, &mut rng), Some(autumn_a));
        assert_eq!(pool.draw_pending(Season::Autumn, &mut rng), Some(autumn_b));
        assert_eq!(pool.pending(), &[summer]);
    }

    #[test]
    fn test_pending_falls_back_to_any_season() {
        let mut pool = EventPool::new();
        let summer = pool.register(event("summer follow-up", &[Season::Summer]));
        pool.defer(summer);

        assert_eq!(pool.draw_pending(Season::Winter, &mut rng()), Some(summer));
        assert!(pool.pending().is_empty());
        assert_eq!(pool.location(summer), None);
    }

    #[test]
    fn test_pending_empty() {
        let mut pool = EventPool::new();
        assert_eq!(pool.draw_pending(Season::Spring, &mut rng()), None);
    }

    #[test]
    fn test_defer_rejects_duplicates_and_unknown() {
        let mut pool = EventPool::new();
        let fresh = pool.push_available(event("fresh", &[]));
        let follow = pool.register(event("follow", &[]));

        assert!(pool.defer(follow));
        assert!(!pool.defer(follow));
        assert!(!pool.defer(fresh));
        assert!(!pool.defer(EventId(99)));
        assert_eq!(pool.pending(), &[follow]);
        assert_disjoint(&pool);
    }

    #[test]
    fn test_draw_next_favours_pending_about_half_the_time() {
        let mut rng = rng();
        let mut pending_draws = 0;
        let trials = 2000;

        for _ in 0..trials {
            let mut pool = EventPool::new();
            pool.push_available(event("fresh", &[]));
            let follow = pool.register(event("follow", &[]));
            pool.defer(follow);

            let (_, source) = pool.draw_next_with_source(Season::Spring, &mut rng).unwrap();
            if source == DrawSource::Pending {
                pending_draws += 1;
            }
        }

        assert!(
            (800..1200).contains(&pending_draws),
            "pending drawn {pending_draws} / {trials}"
        );
    }

    #[test]
    fn test_draw_next_without_pending_is_fresh() {
        let mut pool = EventPool::new();
        let only = pool.push_available(event("only", &[]));
        let mut rng = rng();
        for _ in 0..20 {
            assert_eq!(
                pool.draw_next_with_source(Season::Summer, &mut rng),
                Some((only, DrawSource::Fresh))
            );
        }
    }

    #[test]
    fn test_drawable_in() {
        let mut pool = EventPool::new();
        pool.push_available(event("a", &[Season::Spring, Season::Summer]));
        pool.push_available(event("b", &[Season::Summer]));
        pool.register(event("follow", &[Season::Winter]));

        assert_eq!(pool.drawable_in(Season::Summer), 2);
        assert_eq!(pool.drawable_in(Season::Spring), 1);
        assert_eq!(pool.drawable_in(Season::Winter), 0);
    }

    #[test]
    fn test_serde_round_trip_preserves_sets() {
        let mut pool = EventPool::new();
        for i in 0..4 {
            pool.push_available(event(&format!("e{i}"), &[]));
        }
        let follow = pool.register(event("follow", &[]));
        pool.defer(follow);
        let mut rng = rng();
        pool.draw_fresh(Season::Spring, &mut rng);

        let json = serde_json::to_string(&pool).unwrap();
        let back: EventPool = serde_json::from_str(&json).unwrap();
        assert_eq!(pool, back);
    }
}
