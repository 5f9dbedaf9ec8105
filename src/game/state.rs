//! Game state management.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::content::Scenario;
use crate::error::{GameError, GameResult};
use crate::game::{Difficulty, Event, EventId, EventPool, Player, Season, YearReport};

/// Settings fixed for the whole game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Defeat threshold and content scaling.
    pub difficulty: Difficulty,
    /// Number of players sharing the island's fate.
    pub players: usize,
    /// RNG seed; the same seed and choices replay the same game.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            players: 1,
            seed: 0,
        }
    }
}

/// Result of taking a choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOutcome {
    /// Label of the choice taken.
    pub label: String,
    /// Applied effects, described in application order.
    pub effects: Vec<String>,
    /// Follow-up queued into the pending pool, if any.
    pub deferred: Option<EventId>,
}

/// Complete game state.
///
/// Owns the RNG so that a saved game resumes with the same draws.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Every event of the game and the draw bookkeeping.
    pub pool: EventPool,
    /// Players in turn order.
    pub players: Vec<Player>,
    current_player: usize,
    season: Season,
    turn: u32,
    difficulty: Difficulty,
    current_event: Option<EventId>,
    rng: ChaCha8Rng,
}

impl GameState {
    /// Start a game: one copy of the scenario per player, spring of turn 1,
    /// with the first event already drawn.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NoPlayers`] if `config.players` is zero.
    pub fn new(config: GameConfig, scenario: &Scenario, pool: EventPool) -> GameResult<Self> {
        if config.players == 0 {
            return Err(GameError::NoPlayers);
        }

        let players = (1..=config.players)
            .map(|n| Player::from_scenario(format!("Player {n}"), scenario))
            .collect();

        let mut state = Self {
            pool,
            players,
            current_player: 0,
            season: Season::Spring,
            turn: 1,
            difficulty: config.difficulty,
            current_event: None,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
        };
        state.draw_event();

        tracing::info!(
            players = config.players,
            difficulty = %config.difficulty,
            seed = config.seed,
            "game started"
        );
        Ok(state)
    }

    /// Current turn number (1-indexed).
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.turn
    }

    /// Current season.
    #[must_use]
    pub const fn season(&self) -> Season {
        self.season
    }

    /// Difficulty the game was started with.
    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Index of the player whose turn it is.
    #[must_use]
    pub const fn current_player_index(&self) -> usize {
        self.current_player
    }

    /// The player whose turn it is.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NoPlayers`] on an empty roster.
    pub fn current_player(&self) -> GameResult<&Player> {
        self.players
            .get(self.current_player)
            .ok_or(GameError::NoPlayers)
    }

    /// Mutable access to the player whose turn it is.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NoPlayers`] on an empty roster.
    pub fn current_player_mut(&mut self) -> GameResult<&mut Player> {
        self.players
            .get_mut(self.current_player)
            .ok_or(GameError::NoPlayers)
    }

    /// Handle of the event awaiting a choice.
    #[must_use]
    pub const fn current_event_id(&self) -> Option<EventId> {
        self.current_event
    }

    /// The event awaiting a choice; `None` once a choice has been taken.
    #[must_use]
    pub fn current_event(&self) -> Option<&Event> {
        self.current_event.and_then(|id| self.pool.event(id))
    }

    /// Take choice `index` of the current event for the current player.
    ///
    /// Effects apply in listed order. A follow-up event is queued into the
    /// pending pool, not played now. The event is consumed; the next one is
    /// drawn by [`Self::next_turn`].
    ///
    /// # Errors
    ///
    /// Fails if no event is awaiting a choice, the index is out of range, or
    /// an effect names a faction the player does not have.
    pub fn choose(&mut self, index: usize) -> GameResult<ChoiceOutcome> {
        let event = self.current_event().ok_or(GameError::NoCurrentEvent)?;
        let choice = event
            .choices
            .get(index)
            .ok_or(GameError::InvalidChoice {
                index,
                count: event.choices.len(),
            })?
            .clone();

        let player = self
            .players
            .get_mut(self.current_player)
            .ok_or(GameError::NoPlayers)?;
        for effect in &choice.effects {
            effect.apply(player)?;
        }

        let deferred = choice.next.filter(|&next| self.pool.defer(next));
        self.current_event = None;

        tracing::debug!(
            player = %player.name(),
            choice = %choice.label,
            deferred = ?deferred,
            "choice applied"
        );

        Ok(ChoiceOutcome {
            effects: choice.effects.iter().map(ToString::to_string).collect(),
            label: choice.label,
            deferred,
        })
    }

    /// Hand over to the next player and draw their event.
    pub fn next_turn(&mut self) {
        self.turn += 1;
        self.current_player = (self.current_player + 1) % self.players.len().max(1);
        self.draw_event();
    }

    /// Move to the next season.
    pub fn next_season(&mut self) {
        self.season = self.season.next();
        tracing::debug!(season = %self.season, "season changed");
    }

    /// Whether the current turn closes the year.
    #[must_use]
    pub fn is_end_of_year(&self) -> bool {
        self.season == Season::Winter
    }

    /// Run the current player's year-end harvest and population update.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NoPlayers`] on an empty roster.
    pub fn end_year(&mut self) -> GameResult<YearReport> {
        let player = self
            .players
            .get_mut(self.current_player)
            .ok_or(GameError::NoPlayers)?;
        player.generate_resources(&mut self.rng)
    }

    /// Whether the current player is the last of the round.
    #[must_use]
    pub fn is_round_complete(&self) -> bool {
        self.current_player + 1 >= self.players.len()
    }

    /// Move on after a turn: the season changes when a round completes, then
    /// the next turn starts and draws for the new season.
    ///
    /// Changing the season first is deliberate. Drawing before the season
    /// moves would hand the first player of a round an event from the
    /// previous season (a SPRING event played in SUMMER).
    pub fn advance(&mut self) {
        if self.is_round_complete() {
            self.next_season();
        }
        self.next_turn();
    }

    /// Whether any player has been overthrown.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.players.iter().any(|p| p.is_dead(self.difficulty))
    }

    /// Players who have been overthrown.
    pub fn defeated_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_dead(self.difficulty))
    }

    fn draw_event(&mut self) {
        self.current_event = self.pool.draw_next(self.season, &mut self.rng);
        match self.current_event() {
            Some(event) => {
                tracing::debug!(turn = self.turn, season = %self.season, event = %event.name, "event drawn");
            }
            None => tracing::warn!(season = %self.season, "no event to draw"),
        }
    }
}
