//! Static evaluation and the capture-removal policy.
//!
//! Both are single-ply and cheap: the evaluator scores leaves of the minimax
//! search, and the removal policy picks which opposing checker to take after
//! the AI completes a mill without searching further.

use crate::board::{Board, Position, all_positions};
use crate::constants::{CHECKER_VALUE, MILL_BONUS, MILL_COUNT};
use crate::game::Player;
use crate::mill::line_strength;

/// Score `board` from `player`'s point of view.
///
/// Each checker is worth [`CHECKER_VALUE`] to its owner, plus [`MILL_BONUS`]
/// if it currently sits in a mill. The result is `player`'s total minus the
/// opponent's.
pub fn evaluate(board: &Board, player: Player) -> i32 {
    let mut score = 0;
    for pos in all_positions() {
        let Some(owner) = board.at(pos).owner() else {
            continue;
        };
        let mut value = CHECKER_VALUE;
        if line_strength(board, pos) == MILL_COUNT {
            value += MILL_BONUS;
        }
        if owner == player {
            score += value;
        } else {
            score -= value;
        }
    }
    score
}

/// How close an opposing checker is to being part of a mill.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Threat {
    None,
    /// One same-colored neighbor in line.
    Vulnerable,
    /// Already part of a mill.
    Critical,
}

/// Classify the checker at `pos` by its strongest line.
pub fn threat(board: &Board, pos: Position) -> Threat {
    match line_strength(board, pos) {
        0 => Threat::None,
        1 => Threat::Vulnerable,
        _ => Threat::Critical,
    }
}

/// Pick the opposing checker `capturer` should remove.
///
/// Prefers the first checker already in a mill, then the first one with a
/// partner in line, then the first opposing checker at all. Returns `None`
/// when the opponent has nothing on the board.
pub fn choose_removal(board: &Board, capturer: Player) -> Option<Position> {
    let targets: Vec<(Position, Threat)> = board
        .positions_with(capturer.other().state())
        .map(|pos| (pos, threat(board, pos)))
        .collect();

    [Threat::Critical, Threat::Vulnerable]
        .iter()
        .find_map(|&level| targets.iter().find(|(_, t)| *t == level))
        .or_else(|| targets.first())
        .map(|&(pos, _)| pos)
}
