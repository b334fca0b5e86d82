//! Mill detection.
//!
//! A mill is three same-state nodes in a straight line. Rather than scanning
//! every line on the board after a move, detection walks outward from the
//! changed node along one axis, counting neighbors that share its state.
//! Only the nodes on the two lines through the changed node are inspected.

use crate::board::{Axis, Board, NodeState, Position};
use crate::constants::MILL_COUNT;

/// Count neighbors of `pos` along `axis` sharing its state, following the
/// line through each match.
///
/// `came_from` is the position the walk arrived from; it is skipped so the
/// walk never turns back on itself. A result of [`MILL_COUNT`] means `pos`
/// sits in a full line of three. The count saturates there.
pub fn count_matching_neighbors(
    board: &Board,
    pos: Position,
    axis: Axis,
    came_from: Option<Position>,
) -> usize {
    let Ok(node) = board.node(pos) else {
        return 0;
    };

    let mut count = 0;
    for &next in node.neighbors(axis) {
        if Some(next) == came_from {
            continue;
        }
        if board.at(next) == node.state {
            count += 1;
            if count >= MILL_COUNT {
                return MILL_COUNT;
            }
            count += count_matching_neighbors(board, next, axis, Some(pos));
        }
    }
    count.min(MILL_COUNT)
}

/// Highest matching-neighbor count of `pos` over both axes.
pub fn line_strength(board: &Board, pos: Position) -> usize {
    Axis::BOTH
        .iter()
        .map(|&axis| count_matching_neighbors(board, pos, axis, None))
        .max()
        .unwrap_or(0)
}

/// Check whether the checker at `pos` is part of a mill on either axis.
///
/// Always false for empty nodes.
pub fn forms_mill(board: &Board, pos: Position) -> bool {
    match board.state(pos) {
        Ok(NodeState::Empty) | Err(_) => false,
        Ok(_) => line_strength(board, pos) == MILL_COUNT,
    }
}
