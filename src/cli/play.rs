//! Interactive play and resume commands.

use super::output::{format_event, format_factions, format_resources};
use super::{CliError, pick_seed};
use isla::content::load_scenario;
use isla::save::{load_game, save_game};
use isla::game::FOOD_PRICE;
use isla::{Difficulty, GameConfig, GameState};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if the scenario cannot be loaded or the terminal fails.
pub(crate) fn execute(
    scenario: PathBuf,
    difficulty: Difficulty,
    players: u8,
    seed: Option<u64>,
    save: PathBuf,
) -> Result<(), CliError> {
    let content = load_scenario(&scenario, difficulty)?;
    let seed = pick_seed(seed);
    println!("Starting game with seed {seed}...");

    let config = GameConfig {
        difficulty,
        players: usize::from(players),
        seed,
    };
    let game = GameState::new(config, &content.scenario, content.events)?;

    Session::new(game, save, io::stdin().lock(), io::stdout().lock()).run()
}

/// Execute the resume command.
///
/// # Errors
///
/// Returns an error if the save cannot be read or the terminal fails.
pub(crate) fn resume(save: PathBuf) -> Result<(), CliError> {
    let game = load_game(&save)?;
    println!("Resuming turn {} ({})...", game.turn(), game.season());

    Session::new(game, save, io::stdin().lock(), io::stdout().lock()).run()
}

/// Whether to keep playing after a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// A game driven by line-based input.
struct Session<R, W> {
    game: GameState,
    save: PathBuf,
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    fn new(game: GameState, save: PathBuf, input: R, out: W) -> Self {
        Self {
            game,
            save,
            input,
            out,
        }
    }

    fn run(&mut self) -> Result<(), CliError> {
        writeln!(self.out, "Difficulty: {}", self.game.difficulty())?;
        loop {
            if self.game.is_game_over() {
                for player in self.game.defeated_players() {
                    writeln!(self.out, "\n{} has been overthrown.", player.name())?;
                }
                writeln!(self.out, "Game over on turn {}.", self.game.turn())?;
                return Ok(());
            }

            if self.play_turn()? == Flow::Quit {
                writeln!(self.out, "Goodbye.")?;
                return Ok(());
            }
            if !self.game.is_game_over() {
                self.game.advance();
            }
        }
    }

    /// Read one trimmed line. `None` at end of input.
    fn prompt(&mut self, text: &str) -> Result<Option<String>, CliError> {
        write!(self.out, "{text}\n> ")?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_lowercase()))
    }

    fn play_turn(&mut self) -> Result<Flow, CliError> {
        let player = self.game.current_player()?.name().to_string();
        writeln!(
            self.out,
            "\nTurn {} - {} - {player}",
            self.game.turn(),
            self.game.season()
        )?;

        let Some(event) = self.game.current_event() else {
            return Err(CliError::new(format!(
                "no event left to draw in {}",
                self.game.season()
            )));
        };
        let count = event.choices.len();
        write!(self.out, "{}", format_event(event))?;

        let menu = format!("[1-{count}] choose  f) factions  r) resources  e) event  s) save  q) quit");
        loop {
            let Some(line) = self.prompt(&menu)? else {
                return Ok(Flow::Quit);
            };
            match line.as_str() {
                "f" => self.show_factions()?,
                "r" => self.show_resources()?,
                "e" => {
                    if let Some(event) = self.game.current_event() {
                        write!(self.out, "{}", format_event(event))?;
                    }
                }
                "s" => {
                    save_game(&self.game, &self.save)?;
                    writeln!(self.out, "Saved to {}", self.save.display())?;
                }
                "q" => return Ok(Flow::Quit),
                other => match other.parse::<usize>() {
                    Ok(n) if (1..=count).contains(&n) => {
                        let outcome = self.game.choose(n - 1)?;
                        writeln!(self.out, "You chose: {}", outcome.label)?;
                        for effect in &outcome.effects {
                            writeln!(self.out, "  {effect}")?;
                        }
                        if outcome.deferred.is_some() {
                            writeln!(self.out, "  (this will have consequences...)")?;
                        }
                        break;
                    }
                    _ => writeln!(self.out, "Unknown command: {other}")?,
                },
            }
        }

        if self.game.is_end_of_year() && !self.game.is_game_over() {
            return self.year_end();
        }
        Ok(Flow::Continue)
    }

    fn year_end(&mut self) -> Result<Flow, CliError> {
        writeln!(self.out, "\nWinter: the year is drawing to a close.")?;
        let menu = "b) bribe  p) buy food  f) factions  r) resources  e) end year  q) quit";
        loop {
            let Some(line) = self.prompt(menu)? else {
                return Ok(Flow::Quit);
            };
            match line.as_str() {
                "b" => self.bribe()?,
                "p" => self.buy_food()?,
                "f" => self.show_factions()?,
                "r" => self.show_resources()?,
                "e" => break,
                "q" => return Ok(Flow::Quit),
                other => writeln!(self.out, "Unknown command: {other}")?,
            }
        }

        let report = self.game.end_year()?;
        writeln!(self.out, "\n{report}")?;
        Ok(Flow::Continue)
    }

    fn bribe(&mut self) -> Result<(), CliError> {
        let candidates: Vec<(String, u64)> = self
            .game
            .current_player()?
            .satisfied_factions()
            .iter()
            .map(|f| (f.name().to_string(), f.bribe_cost()))
            .collect();
        if candidates.is_empty() {
            writeln!(self.out, "No faction is open to a bribe.")?;
            return Ok(());
        }

        for (i, (name, cost)) in candidates.iter().enumerate() {
            writeln!(self.out, "  {}) {name} ({cost}$)", i + 1)?;
        }
        let Some(line) = self.prompt("Faction to bribe (blank to cancel)")? else {
            return Ok(());
        };
        let Some((name, _)) = line
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| candidates.get(i))
        else {
            return Ok(());
        };

        match self.game.current_player_mut()?.bribe(name) {
            Ok(cost) => writeln!(self.out, "{name} accepted {cost}$.")?,
            Err(e) => writeln!(self.out, "Bribe failed: {e}")?,
        }
        Ok(())
    }

    fn buy_food(&mut self) -> Result<(), CliError> {
        let max = self.game.current_player()?.max_food_purchase();
        let text = format!("Food units to buy at {FOOD_PRICE}$ each (up to {max}, blank to cancel)");
        let Some(line) = self.prompt(&text)? else {
            return Ok(());
        };
        let Ok(units) = line.parse::<u32>() else {
            return Ok(());
        };

        match self.game.current_player_mut()?.buy_food(units) {
            Ok(cost) => writeln!(self.out, "Bought {units} food units for {cost}$.")?,
            Err(e) => writeln!(self.out, "Purchase failed: {e}")?,
        }
        Ok(())
    }

    fn show_factions(&mut self) -> Result<(), CliError> {
        let text = format_factions(self.game.current_player()?);
        write!(self.out, "{text}")?;
        Ok(())
    }

    fn show_resources(&mut self) -> Result<(), CliError> {
        let text = format_resources(self.game.current_player()?);
        write!(self.out, "{text}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use isla::content::Scenario;
    use isla::{Choice, Effect, Event, EventPool, Faction, ResourceKind, Resources};
    use std::io::Cursor;

    fn game() -> GameState {
        let mut pool = EventPool::new();
        pool.push_available(Event::new(
            "Market day",
            Vec::new(),
            vec![
                Choice::new("Stay home", Vec::new()),
                Choice::new(
                    "Tax the stalls",
                    vec![Effect::Resource {
                        resource: ResourceKind::Treasury,
                        delta: 25,
                    }],
                ),
            ],
        ));
        let scenario = Scenario::new(
            vec![
                Faction::new("Loyalists", 60, 10),
                Faction::new("Capitalists", 40, 10),
            ],
            Resources::new(10, 10, 500, 0).unwrap(),
        )
        .unwrap();
        GameState::new(GameConfig::default(), &scenario, pool).unwrap()
    }

    fn session(input: &str) -> Session<Cursor<Vec<u8>>, Vec<u8>> {
        session_with(game(), input)
    }

    fn session_with(game: GameState, input: &str) -> Session<Cursor<Vec<u8>>, Vec<u8>> {
        Session::new(
            game,
            PathBuf::from("unused.json"),
            Cursor::new(input.as_bytes().to_vec()),
            Vec::new(),
        )
    }

    fn output(session: &Session<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8_lossy(&session.out).to_string()
    }

    #[test]
    fn test_choose_and_quit() {
        let mut session = session("f\n2\nq\n");
        session.run().unwrap();

        let text = output(&session);
        assert!(text.contains("== Market day =="));
        assert!(text.contains("Capitalists"));
        assert!(text.contains("You chose: Tax the stalls"));
        assert!(text.contains("+25$"));
        assert_eq!(session.game.turn(), 2);
        assert_eq!(session.game.players[0].resources().treasury(), 525);
    }

    #[test]
    fn test_end_of_input_quits() {
        let mut session = session("");
        session.run().unwrap();
        assert_eq!(session.game.turn(), 1);
        assert!(output(&session).contains("Goodbye."));
    }

    #[test]
    fn test_unknown_commands_reprompt() {
        let mut session = session("9\nzap\n1\nq\n");
        session.run().unwrap();

        let text = output(&session);
        assert!(text.contains("Unknown command: 9"));
        assert!(text.contains("Unknown command: zap"));
        assert!(text.contains("You chose: Stay home"));
    }

    #[test]
    fn test_year_end_menu() {
        // Three seasons, then winter: bribe the Capitalists, buy food, close the year
        let mut session = session("1\n1\n1\n1\nb\n2\np\n5\ne\nq\n");
        session.run().unwrap();

        let text = output(&session);
        assert!(text.contains("Winter"));
        assert!(text.contains("Capitalists accepted 150$."));
        assert!(text.contains("Bought 5 food units for 40$."));
        assert!(text.contains("Harvest: +400 food units"));

        let player = &session.game.players[0];
        assert_eq!(player.faction("Capitalists").unwrap().satisfaction(), 50);
        assert_eq!(player.faction("Loyalists").unwrap().satisfaction(), 55);
        // 500 - 150 - 40 + 100 from industry
        assert_eq!(player.resources().treasury(), 410);
        assert_eq!(session.game.season(), isla::Season::Spring);
    }

    #[test]
    fn test_failed_purchase_is_reported() {
        let mut session = session("1\n1\n1\n1\np\n1000\ne\nq\n");
        session.run().unwrap();
        assert!(output(&session).contains("Purchase failed: costs 8000$ but the treasury holds 500$"));
    }

    #[test]
    fn test_winter_defeat_ends_before_year_end() {
        let mut pool = EventPool::new();
        pool.push_available(Event::new(
            "Unrest",
            Vec::new(),
            vec![Choice::new(
                "Ignore it",
                vec![Effect::FactionSatisfaction {
                    faction: "Loyalists".to_string(),
                    delta: -6,
                }],
            )],
        ));
        let scenario = Scenario::new(
            vec![Faction::new("Loyalists", 50, 10)],
            Resources::new(10, 10, 0, 0).unwrap(),
        )
        .unwrap();
        let game = GameState::new(GameConfig::default(), &scenario, pool).unwrap();

        // 50 -> 44 -> 38 -> 32 -> 26 in winter, below the medium threshold
        let mut session = session_with(game, "1\n1\n1\n1\n");
        session.run().unwrap();

        let text = output(&session);
        assert!(!text.contains("the year is drawing to a close"));
        assert!(text.contains("Player 1 has been overthrown."));
        assert!(text.contains("Game over on turn 4."));
        assert_eq!(session.game.players[0].resources().food(), 0);
    }

    #[test]
    fn test_save_then_resume() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("save.json");

        let mut first = session("2\ns\nq\n");
        first.save = path.clone();
        first.run().unwrap();

        let resumed = load_game(&path).unwrap();
        assert_eq!(resumed, first.game);
        assert_eq!(resumed.turn(), 2);
    }
}
