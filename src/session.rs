//! Text turn loop.
//!
//! A session reads one command per line, applies it to the game on behalf of
//! the human side to move, and lets AI-controlled sides reply until a human
//! is to act again or the game ends.
//!
//! ## Supported Commands
//!
//! - `place <pos>` - Place a checker
//! - `move <from> <to>` - Slide a checker to an adjacent empty position
//! - `remove <pos>` - Remove an opposing checker after a mill
//! - `<pos>` - Shorthand for `place` or `remove`, depending on phase
//! - `<from> <to>` - Shorthand for `move`
//! - `board` - Show the board
//! - `help` - List commands
//! - `new` - Start a new game
//! - `quit` - Exit
//!
//! Positions are numbers 1-24 or board coordinates such as `a7`.
//! Responses start with `=` on success and `?` on failure.

use std::io::{self, BufRead, Write};

use crate::board::{Position, parse_coord};
use crate::constants::MAX_GAME_LEN;
use crate::game::{Action, Game, GamePhase, Outcome, Player};
use crate::search::{Ai, SearchConfig};

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &["board", "help", "move", "new", "place", "quit", "remove"];

/// Session settings.
#[derive(Clone, Debug, Default)]
pub struct SessionConfig {
    /// Sides played by the AI.
    pub ai_players: Vec<Player>,
    pub search: SearchConfig,
    /// Seed for AI tie-breaking; random when absent.
    pub seed: Option<u64>,
}

/// An interactive game between humans and/or the AI.
pub struct Session {
    game: Game,
    ai: Ai,
    ai_players: Vec<Player>,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        let ai = match config.seed {
            Some(seed) => Ai::with_seed(config.search, seed),
            None => Ai::new(config.search),
        };
        Self {
            game: Game::new(),
            ai,
            ai_players: config.ai_players,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    fn is_ai(&self, player: Player) -> bool {
        self.ai_players.contains(&player)
    }

    /// Run the loop on stdin and stdout.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        self.run_with(stdin.lock(), &mut stdout)
    }

    /// Run the loop over arbitrary input and output.
    pub fn run_with<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> io::Result<()> {
        let opening = self.play_ai();
        for line in &opening {
            writeln!(out, "{line}")?;
        }
        self.show(out)?;

        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = line.split_whitespace().collect();
            let (command, args) = Self::parse_command(&parts);

            let (success, message) = self.execute(&command, &args);
            let prefix = if success { '=' } else { '?' };
            writeln!(out, "{prefix} {message}")?;

            if command == "quit" {
                break;
            }

            if success && command != "help" && command != "board" {
                for line in self.play_ai() {
                    writeln!(out, "{line}")?;
                }
                self.show(out)?;
            }
            out.flush()?;
        }
        Ok(())
    }

    /// Split a command line, expanding bare positions into full commands.
    fn parse_command(parts: &[&str]) -> (String, Vec<String>) {
        let Some(first) = parts.first() else {
            return (String::new(), Vec::new());
        };
        let args: Vec<String> = parts.iter().map(|s| s.to_string()).collect();

        if parse_coord(first).is_some() {
            let command = match parts.len() {
                1 => "pos",
                2 => "move",
                _ => "",
            };
            return (command.to_string(), args);
        }

        (first.to_lowercase(), args[1..].to_vec())
    }

    /// Execute a command and return (success, response).
    fn execute(&mut self, command: &str, args: &[String]) -> (bool, String) {
        match command {
            "help" => (
                true,
                format!(
                    "commands: {}; positions are 1-24 or coordinates like a7",
                    KNOWN_COMMANDS.join(", ")
                ),
            ),

            "quit" => (true, String::new()),

            "board" => (true, self.game.board().to_string()),

            "new" => {
                self.game = Game::new();
                (true, "new game".to_string())
            }

            "place" | "remove" | "pos" => {
                let Some(pos) = Self::position_arg(args, 0) else {
                    return (false, "expected a position (1-24 or a7..g1)".to_string());
                };
                let action = match (command, self.game.phase()) {
                    ("place", _) => Action::Place(pos),
                    ("remove", _) | (_, GamePhase::Removal) => Action::Remove(pos),
                    _ => Action::Place(pos),
                };
                self.human(action)
            }

            "move" => {
                let (Some(from), Some(to)) =
                    (Self::position_arg(args, 0), Self::position_arg(args, 1))
                else {
                    return (false, "expected two positions".to_string());
                };
                self.human(Action::Move { from, to })
            }

            "" => (false, "could not parse command".to_string()),

            _ => (false, format!("unknown command: {command}")),
        }
    }

    fn position_arg(args: &[String], i: usize) -> Option<Position> {
        args.get(i).and_then(|s| parse_coord(s))
    }

    /// Apply an action for the human side to move.
    fn human(&mut self, action: Action) -> (bool, String) {
        let player = self.game.to_move();
        if self.is_ai(player) && !self.game.is_over() {
            return (false, format!("{player} is played by the AI"));
        }
        match self.game.apply(action) {
            Ok(outcome) => (true, format!("{player}: {action}; {}", self.describe(outcome))),
            Err(e) => (false, e.to_string()),
        }
    }

    /// Let AI sides play until a human is to act or the game stops.
    ///
    /// With no human at the board the loop stops after [`MAX_GAME_LEN`]
    /// placements and moves, since movement can cycle.
    fn play_ai(&mut self) -> Vec<String> {
        let mut log = Vec::new();
        let unattended = Player::BOTH.iter().all(|&p| self.is_ai(p));
        while !self.game.is_over() && self.is_ai(self.game.to_move()) {
            if unattended && self.game.turn() >= MAX_GAME_LEN {
                log.push(format!("stopped after {MAX_GAME_LEN} turns with no winner"));
                break;
            }
            let player = self.game.to_move();
            let Some(action) = self.ai.choose(&self.game) else {
                break;
            };
            match self.game.apply(action) {
                Ok(outcome) => log.push(format!("{player} (AI): {action}; {}", self.describe(outcome))),
                Err(e) => {
                    log.push(format!("{player} (AI) failed: {e}"));
                    break;
                }
            }
        }
        log
    }

    fn describe(&self, outcome: Outcome) -> String {
        match outcome {
            Outcome::NextTurn(next) => {
                if self.game.legal_actions().is_empty() {
                    format!("{next} has no legal moves, game blocked with no winner")
                } else {
                    format!("{next} to {}", verb(self.game.phase()))
                }
            }
            Outcome::Removal(player) => format!("mill! {player} removes a checker"),
            Outcome::Won(player) => format!("{player} wins"),
        }
    }

    fn show<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{}", self.game.board())?;
        writeln!(out, "{}", status(&self.game))
    }
}

fn verb(phase: GamePhase) -> &'static str {
    match phase {
        GamePhase::Placement => "place",
        GamePhase::Movement => "move",
        GamePhase::Removal => "remove",
    }
}

/// One-line summary of whose turn it is and the checker counts.
pub fn status(game: &Game) -> String {
    let counts = format!(
        "P1 {} live/{} in hand, P2 {} live/{} in hand",
        game.checkers(Player::One),
        game.in_hand(Player::One),
        game.checkers(Player::Two),
        game.in_hand(Player::Two)
    );
    match game.winner() {
        Some(winner) => format!("{winner} has won [{counts}]"),
        None => format!(
            "{} to {} [{counts}]",
            game.to_move(),
            verb(game.phase())
        ),
    }
}

/// Play the AI against itself for at most `max_turns` placements and moves.
///
/// Returns the winner, or `None` if the game was blocked or hit the cap.
pub fn selfplay<W: Write>(
    config: SessionConfig,
    max_turns: usize,
    out: &mut W,
) -> io::Result<Option<Player>> {
    let mut session = Session::new(SessionConfig {
        ai_players: Player::BOTH.to_vec(),
        ..config
    });
    let max_turns = if max_turns == 0 { MAX_GAME_LEN } else { max_turns };

    while !session.game.is_over() && session.game.turn() < max_turns {
        let player = session.game.to_move();
        // A blocked side was already reported when its turn began.
        let Some(action) = session.ai.choose(&session.game) else {
            break;
        };
        match session.game.apply(action) {
            Ok(outcome) => writeln!(out, "{player}: {action}; {}", session.describe(outcome))?,
            Err(e) => {
                writeln!(out, "{player} failed: {e}")?;
                break;
            }
        }
        if !matches!(session.game.phase(), GamePhase::Removal) {
            session.show(out)?;
        }
    }

    if session.game.winner().is_none() && session.game.turn() >= max_turns {
        writeln!(out, "stopped after {max_turns} turns with no winner")?;
    }
    Ok(session.game.winner())
}
