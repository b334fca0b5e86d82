//! Integration tests for morris-rust
//!
//! These exercise the public API end to end: topology, mill detection,
//! the turn state machine, and the AI opponent.

use morris_rust::board::{Axis, Board, NodeState, Position, all_positions, neighbors, parse_coord};
use morris_rust::error::Error;
use morris_rust::game::{Action, Game, GamePhase, Outcome, Player};
use morris_rust::heuristics::{choose_removal, evaluate};
use morris_rust::mill::count_matching_neighbors;
use morris_rust::search::{Ai, Minimax, SearchConfig};

// =============================================================================
// Helper functions for setting up test positions
// =============================================================================

/// Play a sequence of placements, alternating sides from Player 1.
fn setup_placements(positions: &[Position]) -> (Game, Vec<Outcome>) {
    let mut game = Game::new();
    let mut outcomes = Vec::new();
    for &p in positions {
        let outcome = game
            .place(game.to_move(), p)
            .unwrap_or_else(|e| panic!("placement {p} failed: {e}"));
        outcomes.push(outcome);
    }
    (game, outcomes)
}

/// Build a movement-phase game from explicit checker sets.
fn setpos(p1: &[Position], p2: &[Position], to_move: Player) -> Game {
    let mut board = Board::new();
    for &p in p1 {
        board.set(p, NodeState::Player1).unwrap();
    }
    for &p in p2 {
        board.set(p, NodeState::Player2).unwrap();
    }
    Game::with_board(board, to_move)
}

fn fast_ai(seed: u64) -> Ai {
    Ai::with_seed(
        SearchConfig {
            depth: 1,
            verbose: false,
        },
        seed,
    )
}

// =============================================================================
// Topology
// =============================================================================

#[test]
fn test_neighbors_symmetric() {
    for p in all_positions() {
        for axis in Axis::BOTH {
            for &q in neighbors(p, axis).unwrap() {
                assert!(neighbors(q, axis).unwrap().contains(&p), "{p} <-> {q}");
            }
        }
    }
}

#[test]
fn test_neighbors_total_over_board() {
    for p in all_positions() {
        let degree = neighbors(p, Axis::Horizontal).unwrap().len()
            + neighbors(p, Axis::Vertical).unwrap().len();
        assert!((2..=4).contains(&degree), "position {p} has degree {degree}");
    }
    assert!(matches!(neighbors(25, Axis::Horizontal), Err(Error::OutOfRange(25))));
}

#[test]
fn test_coordinates_map_to_positions() {
    assert_eq!(parse_coord("a7"), Some(1));
    assert_eq!(parse_coord("d7"), Some(2));
    assert_eq!(parse_coord("a4"), Some(10));
    assert_eq!(parse_coord("a1"), Some(22));
    assert_eq!(parse_coord("e3"), Some(18));
}

// =============================================================================
// Mill detection and the state machine
// =============================================================================

#[test]
fn test_vertical_line_forms_mill() {
    let (game, outcomes) = setup_placements(&[1, 2, 10, 5, 22]);
    assert_eq!(
        count_matching_neighbors(game.board(), 22, Axis::Vertical, None),
        2
    );
    assert_eq!(
        outcomes,
        vec![
            Outcome::NextTurn(Player::Two),
            Outcome::NextTurn(Player::One),
            Outcome::NextTurn(Player::Two),
            Outcome::NextTurn(Player::One),
            Outcome::Removal(Player::One),
        ]
    );
    assert_eq!(game.phase(), GamePhase::Removal);
    assert_eq!(game.to_move(), Player::One);
}

#[test]
fn test_occupied_placement_is_atomic() {
    let (mut game, _) = setup_placements(&[1, 2]);
    let before = game.board().clone();
    assert_eq!(game.place(Player::One, 2), Err(Error::OccupiedPosition(2)));
    assert_eq!(game.board(), &before);
    assert_eq!(game.in_hand(Player::One), 8);
}

#[test]
fn test_non_adjacent_move_is_atomic() {
    let mut game = setpos(&[1, 9, 16], &[3, 20, 24], Player::One);
    let before = game.board().snapshot();
    assert_eq!(
        game.move_checker(Player::One, 1, 5),
        Err(Error::NotAdjacent { from: 1, to: 5 })
    );
    assert_eq!(game.board().snapshot(), before);
    assert_eq!(game.to_move(), Player::One);
}

#[test]
fn test_movement_mill_and_capture() {
    // Player 1 slides 4 -> 5 to complete 2-5-8.
    let mut game = setpos(&[2, 4, 8, 12], &[3, 10, 21, 24], Player::One);
    assert_eq!(
        game.move_checker(Player::One, 4, 5),
        Ok(Outcome::Removal(Player::One))
    );
    assert_eq!(game.checkers(Player::Two), 3);
    let target = choose_removal(game.board(), Player::One).unwrap();
    // No opposing checker has a partner in line, so the first one goes.
    assert_eq!(target, 3);
    assert_eq!(game.remove(Player::One, target), Ok(Outcome::NextTurn(Player::Two)));
    assert_eq!(game.phase(), GamePhase::Movement);
}

#[test]
fn test_game_ends_at_two_checkers() {
    let mut game = setpos(&[2, 4, 8], &[3, 21, 24], Player::One);
    assert_eq!(
        game.apply(Action::Move { from: 4, to: 5 }),
        Ok(Outcome::Won(Player::One))
    );
    assert!(game.is_over());
    assert_eq!(
        game.apply(Action::Move { from: 3, to: 15 }),
        Err(Error::GameOver {
            winner: Player::One
        })
    );
}

// =============================================================================
// AI opponent
// =============================================================================

#[test]
fn test_minimax_depth_zero_matches_evaluator() {
    let (game, _) = setup_placements(&[1, 2, 10, 5, 22]);
    for player in Player::BOTH {
        let mut search = Minimax::new(&game, player);
        let expected = evaluate(game.board(), player);
        assert_eq!(search.minimax(0, true), expected);
        assert_eq!(search.minimax(0, false), expected);
    }
}

#[test]
fn test_ai_takes_only_move() {
    let game = setpos(&[1, 2, 3], &[5, 15, 24], Player::One);
    for seed in [1, 2, 3] {
        let mut ai = Ai::with_seed(SearchConfig::default(), seed);
        assert_eq!(ai.choose(&game), Some(Action::Move { from: 1, to: 10 }));
    }
}

#[test]
fn test_ai_actions_are_always_legal() {
    let mut game = Game::new();
    let mut ai = fast_ai(2024);
    while !game.is_over() && game.turn() < 60 {
        let Some(action) = ai.choose(&game) else {
            break;
        };
        assert!(
            game.legal_actions().contains(&action),
            "AI chose illegal {action}"
        );
        game.apply(action).unwrap();
    }
    assert!(game.turn() > 0);
}

#[test]
fn test_ai_never_touches_live_game() {
    let (game, _) = setup_placements(&[1, 2, 10, 5]);
    let before = game.board().clone();
    let mut ai = Ai::with_seed(SearchConfig::default(), 8);
    let action = ai.choose(&game);
    assert!(action.is_some());
    assert_eq!(game.board(), &before);
}
