//! Turn state machine.
//!
//! A game moves through two main phases:
//! - **Placement**: each player drops their 9 checkers on empty positions,
//!   alternating, for 18 half-turns in total.
//! - **Movement**: players slide one checker per turn to an adjacent empty
//!   position.
//!
//! Completing a mill in either phase enters the transient **Removal** phase,
//! where the same player must take exactly one opposing checker before play
//! passes on. A mill costs the opponent one live checker; the first player
//! brought down to 2 loses and the game accepts no further operations.
//!
//! Every operation validates completely before touching the board, so a
//! rejected operation leaves the game exactly as it was.

use std::fmt;

use crate::board::{Board, NodeState, Position, is_adjacent, is_valid, str_coord};
use crate::constants::{CHECKERS_PER_PLAYER, LOSING_CHECKERS};
use crate::error::Error;
use crate::mill::forms_mill;

/// One of the two players. Player 1 moves first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub const BOTH: [Player; 2] = [Player::One, Player::Two];

    /// The opposing player.
    #[inline]
    pub fn other(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Node state occupied by this player's checkers.
    #[inline]
    pub fn state(self) -> NodeState {
        match self {
            Player::One => NodeState::Player1,
            Player::Two => NodeState::Player2,
        }
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::One => write!(f, "Player 1"),
            Player::Two => write!(f, "Player 2"),
        }
    }
}

/// Current phase of play.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GamePhase {
    Placement,
    Movement,
    Removal,
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GamePhase::Placement => write!(f, "placement"),
            GamePhase::Movement => write!(f, "movement"),
            GamePhase::Removal => write!(f, "removal"),
        }
    }
}

/// A single operation by the side to move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Place(Position),
    Move { from: Position, to: Position },
    Remove(Position),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Action::Place(p) => write!(f, "place {p} ({})", str_coord(p)),
            Action::Move { from, to } => write!(
                f,
                "move {from} {to} ({}-{})",
                str_coord(from),
                str_coord(to)
            ),
            Action::Remove(p) => write!(f, "remove {p} ({})", str_coord(p)),
        }
    }
}

/// What happens next after a successful operation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Play passes to this player.
    NextTurn(Player),
    /// This player formed a mill and must remove an opposing checker.
    Removal(Player),
    /// This player has won; the game is over.
    Won(Player),
}

/// A game of Nine Men's Morris.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    phase: GamePhase,
    to_move: Player,
    /// Checkers not yet placed, per player.
    in_hand: [u8; 2],
    /// Live checkers, per player. Drops by one for each mill scored against them.
    checkers: [u8; 2],
    winner: Option<Player>,
    /// Completed placements and moves.
    turn: usize,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Start a new game on an empty board with Player 1 to place.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            phase: GamePhase::Placement,
            to_move: Player::One,
            in_hand: [CHECKERS_PER_PLAYER; 2],
            checkers: [CHECKERS_PER_PLAYER; 2],
            winner: None,
            turn: 0,
        }
    }

    /// Start a movement-phase game from an arbitrary board.
    ///
    /// Both players have nothing left in hand and their live-checker counts
    /// equal the checkers on the board.
    pub fn with_board(board: Board, to_move: Player) -> Self {
        let mut checkers = [0u8; 2];
        for p in Player::BOTH {
            checkers[p.index()] = board.count(p.state()).min(u8::MAX as usize) as u8;
        }
        let winner = Player::BOTH
            .into_iter()
            .find(|p| checkers[p.index()] <= LOSING_CHECKERS)
            .map(Player::other);
        Self {
            board,
            phase: GamePhase::Movement,
            to_move,
            in_hand: [0; 2],
            checkers,
            winner,
            turn: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// The player expected to act next (the capturer during Removal).
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Checkers `player` still has to place.
    pub fn in_hand(&self, player: Player) -> u8 {
        self.in_hand[player.index()]
    }

    /// Live-checker count of `player`.
    pub fn checkers(&self, player: Player) -> u8 {
        self.checkers[player.index()]
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Number of completed placements and moves.
    pub fn turn(&self) -> usize {
        self.turn
    }

    /// Place one of `player`'s checkers on an empty position.
    pub fn place(&mut self, player: Player, pos: Position) -> Result<Outcome, Error> {
        self.check_turn(player, GamePhase::Placement)?;
        if !is_valid(pos) {
            return Err(Error::InvalidPosition(pos));
        }
        if self.board.at(pos) != NodeState::Empty {
            return Err(Error::OccupiedPosition(pos));
        }

        self.board.put(pos, player.state());
        let hand = &mut self.in_hand[player.index()];
        *hand = hand.saturating_sub(1);
        Ok(self.finish_turn(player, pos))
    }

    /// Slide one of `player`'s checkers from `from` to the adjacent empty `to`.
    pub fn move_checker(
        &mut self,
        player: Player,
        from: Position,
        to: Position,
    ) -> Result<Outcome, Error> {
        self.check_turn(player, GamePhase::Movement)?;
        for pos in [from, to] {
            if !is_valid(pos) {
                return Err(Error::InvalidPosition(pos));
            }
        }
        if self.board.at(from) != player.state() {
            return Err(Error::NotOwner {
                player,
                position: from,
            });
        }
        if !is_adjacent(from, to) {
            return Err(Error::NotAdjacent { from, to });
        }
        if self.board.at(to) != NodeState::Empty {
            return Err(Error::OccupiedPosition(to));
        }

        self.board.put(from, NodeState::Empty);
        self.board.put(to, player.state());
        Ok(self.finish_turn(player, to))
    }

    /// Take the opposing checker at `pos` after forming a mill.
    pub fn remove(&mut self, player: Player, pos: Position) -> Result<Outcome, Error> {
        self.check_turn(player, GamePhase::Removal)?;
        if !is_valid(pos) {
            return Err(Error::InvalidPosition(pos));
        }
        if self.board.at(pos) != player.other().state() {
            return Err(Error::WrongOwner {
                player,
                position: pos,
            });
        }

        self.board.put(pos, NodeState::Empty);
        Ok(self.end_turn(player))
    }

    /// Apply an action on behalf of the side to move.
    pub fn apply(&mut self, action: Action) -> Result<Outcome, Error> {
        let player = self.to_move;
        match action {
            Action::Place(pos) => self.place(player, pos),
            Action::Move { from, to } => self.move_checker(player, from, to),
            Action::Remove(pos) => self.remove(player, pos),
        }
    }

    /// Every action the side to move may take. Empty once the game is over.
    pub fn legal_actions(&self) -> Vec<Action> {
        if self.winner.is_some() {
            return Vec::new();
        }
        match self.phase {
            GamePhase::Placement => self
                .board
                .empty_positions()
                .into_iter()
                .map(Action::Place)
                .collect(),
            GamePhase::Movement => self
                .board
                .slide_moves(self.to_move)
                .into_iter()
                .map(|(from, to)| Action::Move { from, to })
                .collect(),
            GamePhase::Removal => self
                .board
                .positions_with(self.to_move.other().state())
                .map(Action::Remove)
                .collect(),
        }
    }

    fn check_turn(&self, player: Player, phase: GamePhase) -> Result<(), Error> {
        if let Some(winner) = self.winner {
            return Err(Error::GameOver { winner });
        }
        if self.phase != phase {
            return Err(Error::WrongPhase(self.phase));
        }
        if player != self.to_move {
            return Err(Error::WrongTurn(player));
        }
        Ok(())
    }

    /// Settle a completed placement or move that landed on `pos`.
    fn finish_turn(&mut self, player: Player, pos: Position) -> Outcome {
        self.turn += 1;
        if !forms_mill(&self.board, pos) {
            return self.end_turn(player);
        }

        let opponent = player.other();
        let live = &mut self.checkers[opponent.index()];
        *live = live.saturating_sub(1);
        if *live <= LOSING_CHECKERS {
            self.winner = Some(player);
            return Outcome::Won(player);
        }
        self.phase = GamePhase::Removal;
        Outcome::Removal(player)
    }

    fn end_turn(&mut self, player: Player) -> Outcome {
        self.to_move = player.other();
        self.phase = if self.in_hand.iter().all(|&n| n == 0) {
            GamePhase::Movement
        } else {
            GamePhase::Placement
        };
        Outcome::NextTurn(self.to_move)
    }
}
