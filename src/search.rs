//! Depth-limited minimax search for the AI opponent.
//!
//! The search copies the live board once per decision and then explores
//! hypothetical futures on that copy by mutating it in place and undoing
//! each change before trying the next candidate. There is no transposition
//! table and no pruning; with a depth of 3 plies and at most 24 candidates
//! per ply the full tree stays small.
//!
//! Mills formed inside the search are not resolved into captures. They are
//! only rewarded through the static evaluator at the leaves.

use crate::board::{Board, NodeState, Position};
use crate::constants::{LOSING_CHECKERS, SEARCH_DEPTH};
use crate::game::{Action, Game, GamePhase, Player};
use crate::heuristics::{choose_removal, evaluate};

/// Search parameters.
#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// Lookahead in plies, including the AI's own move.
    pub depth: usize,
    /// Print per-candidate scores to stderr.
    pub verbose: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: SEARCH_DEPTH,
            verbose: false,
        }
    }
}

/// A searchable ply. Removals are resolved by the heuristic, never searched.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Ply {
    Place(Position),
    Slide(Position, Position),
}

impl From<Ply> for Action {
    fn from(ply: Ply) -> Action {
        match ply {
            Ply::Place(pos) => Action::Place(pos),
            Ply::Slide(from, to) => Action::Move { from, to },
        }
    }
}

/// Scratch state for one search, seen from `player`'s side.
pub struct Minimax {
    board: Board,
    player: Player,
    in_hand: [u8; 2],
    checkers: [u8; 2],
    /// Nodes visited so far
    nodes: u64,
}

impl Minimax {
    /// Snapshot `game` for a search on behalf of `player`.
    pub fn new(game: &Game, player: Player) -> Self {
        let mut in_hand = [0; 2];
        let mut checkers = [0; 2];
        for p in Player::BOTH {
            in_hand[p.index()] = game.in_hand(p);
            checkers[p.index()] = game.checkers(p);
        }
        Self {
            board: game.board().clone(),
            player,
            in_hand,
            checkers,
            nodes: 0,
        }
    }

    /// The scratch board. Identical to the game's board between searches.
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Minimax value of the current scratch board.
    ///
    /// `maximizing` means the searching player is to move. Leaves are scored
    /// with [`evaluate`] when `depth` hits zero, when either side is already
    /// down to the losing checker count, or when the side to move has no
    /// candidates.
    pub fn minimax(&mut self, depth: usize, maximizing: bool) -> i32 {
        self.nodes += 1;
        if depth == 0 || self.checkers.iter().any(|&c| c <= LOSING_CHECKERS) {
            return evaluate(&self.board, self.player);
        }

        let mover = if maximizing {
            self.player
        } else {
            self.player.other()
        };
        let candidates = self.candidates(mover);
        if candidates.is_empty() {
            return evaluate(&self.board, self.player);
        }

        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        for ply in candidates {
            self.make(mover, ply);
            let score = self.minimax(depth - 1, !maximizing);
            self.unmake(mover, ply);
            best = if maximizing {
                best.max(score)
            } else {
                best.min(score)
            };
        }
        best
    }

    /// Score every candidate for the searching player at the root.
    ///
    /// Each candidate is one ply, so the subtree below it is searched to
    /// `depth - 1`.
    pub fn score_candidates(&mut self, depth: usize) -> Vec<(Action, i32)> {
        let depth = depth.max(1);
        let mover = self.player;
        let candidates = self.candidates(mover);
        let mut scored = Vec::with_capacity(candidates.len());
        for ply in candidates {
            self.make(mover, ply);
            let score = self.minimax(depth - 1, false);
            self.unmake(mover, ply);
            scored.push((ply.into(), score));
        }
        scored
    }

    /// Placements while `mover` has checkers in hand, slides otherwise.
    fn candidates(&self, mover: Player) -> Vec<Ply> {
        if self.in_hand[mover.index()] > 0 {
            self.board
                .empty_positions()
                .into_iter()
                .map(Ply::Place)
                .collect()
        } else {
            self.board
                .slide_moves(mover)
                .into_iter()
                .map(|(from, to)| Ply::Slide(from, to))
                .collect()
        }
    }

    fn make(&mut self, mover: Player, ply: Ply) {
        match ply {
            Ply::Place(pos) => {
                self.board.put(pos, mover.state());
                self.in_hand[mover.index()] -= 1;
            }
            Ply::Slide(from, to) => {
                self.board.put(from, NodeState::Empty);
                self.board.put(to, mover.state());
            }
        }
    }

    fn unmake(&mut self, mover: Player, ply: Ply) {
        match ply {
            Ply::Place(pos) => {
                self.board.put(pos, NodeState::Empty);
                self.in_hand[mover.index()] += 1;
            }
            Ply::Slide(from, to) => {
                self.board.put(to, NodeState::Empty);
                self.board.put(from, mover.state());
            }
        }
    }
}

/// Minimax-driven opponent.
pub struct Ai {
    config: SearchConfig,
    rng: fastrand::Rng,
}

impl Ai {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            rng: fastrand::Rng::new(),
        }
    }

    /// An opponent whose tie-breaking is reproducible.
    pub fn with_seed(config: SearchConfig, seed: u64) -> Self {
        Self {
            config,
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Pick an action for the side to move in `game`.
    ///
    /// During Removal this is the greedy removal heuristic; otherwise a
    /// minimax search. Returns `None` if the game is over or the side to
    /// move has nothing legal to do.
    pub fn choose(&mut self, game: &Game) -> Option<Action> {
        if game.is_over() {
            return None;
        }
        let player = game.to_move();
        match game.phase() {
            GamePhase::Removal => choose_removal(game.board(), player).map(Action::Remove),
            GamePhase::Placement | GamePhase::Movement => self.search(game, player),
        }
    }

    /// Best placement or move for `player`, ties broken uniformly at random.
    fn search(&mut self, game: &Game, player: Player) -> Option<Action> {
        let mut minimax = Minimax::new(game, player);
        let scored = minimax.score_candidates(self.config.depth);
        let best = scored.iter().map(|&(_, s)| s).max()?;
        let ties: Vec<Action> = scored
            .iter()
            .filter(|&&(_, s)| s == best)
            .map(|&(a, _)| a)
            .collect();

        if self.config.verbose {
            dump_candidates(&scored);
            eprintln!(
                "{player}: best={best} ties={} nodes={}",
                ties.len(),
                minimax.nodes()
            );
        }

        match ties.len() {
            0 => None,
            1 => Some(ties[0]),
            n => Some(ties[self.rng.usize(..n)]),
        }
    }
}

/// Print debug information about scored root candidates.
pub fn dump_candidates(scored: &[(Action, i32)]) {
    for (action, score) in scored {
        eprintln!("{action} score={score}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movement_game(p1: &[Position], p2: &[Position], to_move: Player) -> Game {
        let mut board = Board::new();
        for &p in p1 {
            board.set(p, NodeState::Player1).unwrap();
        }
        for &p in p2 {
            board.set(p, NodeState::Player2).unwrap();
        }
        Game::with_board(board, to_move)
    }

    #[test]
    fn test_depth_zero_is_static_eval() {
        let mut game = Game::new();
        for p in [1, 2, 10, 5] {
            game.place(game.to_move(), p).unwrap();
        }
        let mut minimax = Minimax::new(&game, Player::One);
        let expected = evaluate(game.board(), Player::One);
        assert_eq!(minimax.minimax(0, true), expected);
        assert_eq!(minimax.minimax(0, false), expected);
    }

    #[test]
    fn test_search_restores_board() {
        let mut game = Game::new();
        for p in [1, 2, 10] {
            game.place(game.to_move(), p).unwrap();
        }
        let mut minimax = Minimax::new(&game, Player::Two);
        minimax.minimax(3, true);
        assert_eq!(minimax.board(), game.board());
        assert!(minimax.nodes() > 1);
    }

    #[test]
    fn test_single_move_is_chosen() {
        // Player 1's only slide is 1 -> 10.
        let game = movement_game(&[1, 2, 3], &[5, 15, 24], Player::One);
        assert_eq!(game.legal_actions().len(), 1);
        for seed in 0..5 {
            let mut ai = Ai::with_seed(SearchConfig::default(), seed);
            assert_eq!(ai.choose(&game), Some(Action::Move { from: 1, to: 10 }));
        }
    }

    #[test]
    fn test_completes_mill_at_depth_one() {
        let mut game = Game::new();
        for p in [1, 3, 10, 20] {
            game.place(game.to_move(), p).unwrap();
        }
        let config = SearchConfig {
            depth: 1,
            verbose: false,
        };
        let mut ai = Ai::with_seed(config, 7);
        assert_eq!(ai.choose(&game), Some(Action::Place(22)));
    }

    #[test]
    fn test_removal_uses_heuristic() {
        let mut game = Game::new();
        for p in [1, 2, 10, 5, 22] {
            game.place(game.to_move(), p).unwrap();
        }
        let mut ai = Ai::with_seed(SearchConfig::default(), 1);
        // 2 and 5 are a vertical pair; 2 comes first.
        assert_eq!(ai.choose(&game), Some(Action::Remove(2)));
    }

    #[test]
    fn test_same_seed_same_choice() {
        let game = Game::new();
        let pick = |seed| Ai::with_seed(SearchConfig { depth: 1, verbose: false }, seed).choose(&game);
        assert_eq!(pick(42), pick(42));
    }

    #[test]
    fn test_boxed_in_reply_scores_statically() {
        // Player 1 is boxed in; Player 2's 7 -> 8 keeps it that way.
        let game = movement_game(&[1, 3, 23], &[2, 7, 10, 15, 20, 22, 24], Player::Two);
        let mut minimax = Minimax::new(&game, Player::Two);
        assert_eq!(minimax.minimax(2, false), evaluate(game.board(), Player::Two));

        let scored = minimax.score_candidates(2);
        let slide = Action::Move { from: 7, to: 8 };
        let (_, score) = scored.iter().find(|&&(a, _)| a == slide).unwrap();
        let mut after = game.clone();
        after.apply(slide).unwrap();
        assert_eq!(*score, evaluate(after.board(), Player::Two));
        assert_eq!(minimax.board(), game.board());
    }

    #[test]
    fn test_candidates_never_include_removals() {
        let mut game = Game::new();
        for p in [1, 2, 10, 5, 22] {
            game.place(game.to_move(), p).unwrap();
        }
        let mut minimax = Minimax::new(&game, Player::Two);
        let scored = minimax.score_candidates(1);
        assert_eq!(scored.len(), 19);
        assert!(scored.iter().all(|&(a, _)| matches!(a, Action::Place(_))));
    }

    #[test]
    fn test_blocked_side_has_no_choice() {
        // Player 1 at 1 and 3 boxed in, plus 23 boxed in.
        let game = movement_game(&[1, 3, 23], &[2, 10, 15, 20, 22, 24], Player::One);
        assert!(game.legal_actions().is_empty());
        let mut ai = Ai::with_seed(SearchConfig::default(), 3);
        assert_eq!(ai.choose(&game), None);
    }
}
