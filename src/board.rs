//! Board topology and node state.
//!
//! The 24 positions form three nested squares joined by four spokes:
//!
//! ```text
//!  1-----------2-----------3
//!  |   4-------5-------6   |
//!  |   |   7---8---9   |   |
//! 10--11--12      13--14--15
//!  |   |  16--17--18   |   |
//!  |  19------20------21   |
//! 22----------23----------24
//! ```
//!
//! Every node carries its own horizontal and vertical neighbor lists, so
//! nothing downstream needs coordinate math. Positions can also be written
//! in board notation: a column letter `a`-`g` and a row digit `1`-`7`, with
//! row 7 at the top (position 1 is `a7`, position 24 is `g1`).

use std::fmt;

use crate::constants::{GRID, NUM_POSITIONS};
use crate::error::Error;
use crate::game::Player;

/// A board position, 1..=24.
pub type Position = usize;

/// Contents of a single node.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum NodeState {
    #[default]
    Empty,
    Player1,
    Player2,
}

impl NodeState {
    /// The player owning this node, if any.
    pub fn owner(self) -> Option<Player> {
        match self {
            NodeState::Empty => None,
            NodeState::Player1 => Some(Player::One),
            NodeState::Player2 => Some(Player::Two),
        }
    }

    fn symbol(self) -> char {
        match self {
            NodeState::Empty => '.',
            NodeState::Player1 => 'X',
            NodeState::Player2 => 'O',
        }
    }
}

/// One of the two line directions through a node.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub const BOTH: [Axis; 2] = [Axis::Horizontal, Axis::Vertical];
}

/// Neighbor lists per position, as (horizontal, vertical).
#[rustfmt::skip]
const TOPOLOGY: [(&[Position], &[Position]); NUM_POSITIONS] = [
    (&[2], &[10]),          // 1
    (&[1, 3], &[5]),        // 2
    (&[2], &[15]),          // 3
    (&[5], &[11]),          // 4
    (&[4, 6], &[2, 8]),     // 5
    (&[5], &[14]),          // 6
    (&[8], &[12]),          // 7
    (&[7, 9], &[5]),        // 8
    (&[8], &[13]),          // 9
    (&[11], &[1, 22]),      // 10
    (&[10, 12], &[4, 19]),  // 11
    (&[11], &[7, 16]),      // 12
    (&[14], &[9, 18]),      // 13
    (&[13, 15], &[6, 21]),  // 14
    (&[14], &[3, 24]),      // 15
    (&[17], &[12]),         // 16
    (&[16, 18], &[20]),     // 17
    (&[17], &[13]),         // 18
    (&[20], &[11]),         // 19
    (&[19, 21], &[17, 23]), // 20
    (&[20], &[14]),         // 21
    (&[23], &[10]),         // 22
    (&[22, 24], &[20]),     // 23
    (&[23], &[15]),         // 24
];

/// Grid cell (column, row-from-top) of each position.
#[rustfmt::skip]
const GRID_CELLS: [(usize, usize); NUM_POSITIONS] = [
    (0, 0), (3, 0), (6, 0),
    (1, 1), (3, 1), (5, 1),
    (2, 2), (3, 2), (4, 2),
    (0, 3), (1, 3), (2, 3), (4, 3), (5, 3), (6, 3),
    (2, 4), (3, 4), (4, 4),
    (1, 5), (3, 5), (5, 5),
    (0, 6), (3, 6), (6, 6),
];

/// Diagram rows; each `*` is filled with the next position in order.
const DIAGRAM: [&str; GRID] = [
    "*-----*-----*",
    "| *---*---* |",
    "| | *-*-* | |",
    "*-*-*   *-*-*",
    "| | *-*-* | |",
    "| *---*---* |",
    "*-----*-----*",
];

/// Check whether `pos` names a board position.
#[inline]
pub fn is_valid(pos: Position) -> bool {
    (1..=NUM_POSITIONS).contains(&pos)
}

/// Iterate over every board position in order.
pub fn all_positions() -> impl Iterator<Item = Position> {
    1..=NUM_POSITIONS
}

/// Neighbors of `pos` along `axis`.
///
/// # Errors
/// Returns [`Error::OutOfRange`] for positions outside 1..=24.
pub fn neighbors(pos: Position, axis: Axis) -> Result<&'static [Position], Error> {
    if !is_valid(pos) {
        return Err(Error::OutOfRange(pos));
    }
    let (horizontal, vertical) = TOPOLOGY[pos - 1];
    Ok(match axis {
        Axis::Horizontal => horizontal,
        Axis::Vertical => vertical,
    })
}

/// Check whether two positions share a board line segment.
pub fn is_adjacent(from: Position, to: Position) -> bool {
    Axis::BOTH.iter().any(|&axis| {
        neighbors(from, axis)
            .map(|list| list.contains(&to))
            .unwrap_or(false)
    })
}

/// Parse a position from either its number (`"10"`) or board notation (`"a4"`).
///
/// Returns `None` for anything that does not name a valid position.
pub fn parse_coord(s: &str) -> Option<Position> {
    let s = s.trim();
    if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
        return s.parse::<Position>().ok().filter(|&n| is_valid(n));
    }

    let bytes = s.as_bytes();
    if bytes.len() != 2 {
        return None;
    }
    let col_char = bytes[0].to_ascii_lowercase();
    let row_char = bytes[1];
    if !(b'a'..=b'g').contains(&col_char) || !(b'1'..=b'7').contains(&row_char) {
        return None;
    }
    let col = (col_char - b'a') as usize;
    let row = GRID - (row_char - b'0') as usize;

    GRID_CELLS
        .iter()
        .position(|&cell| cell == (col, row))
        .map(|i| i + 1)
}

/// Convert a position to board notation (e.g. `"a7"`).
///
/// Returns `"??"` for invalid positions.
pub fn str_coord(pos: Position) -> String {
    if !is_valid(pos) {
        return "??".into();
    }
    let (col, row) = GRID_CELLS[pos - 1];
    format!("{}{}", (b'a' + col as u8) as char, GRID - row)
}

/// A single board node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub position: Position,
    pub state: NodeState,
    horizontal_neighbors: &'static [Position],
    vertical_neighbors: &'static [Position],
}

impl Node {
    /// Neighbors of this node along `axis`.
    pub fn neighbors(&self, axis: Axis) -> &'static [Position] {
        match axis {
            Axis::Horizontal => self.horizontal_neighbors,
            Axis::Vertical => self.vertical_neighbors,
        }
    }
}

/// The 24-node board. Owns every node and is the only mutator of node state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    nodes: [Node; NUM_POSITIONS],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create an empty board with the canonical topology.
    pub fn new() -> Self {
        Self {
            nodes: std::array::from_fn(|i| Node {
                position: i + 1,
                state: NodeState::Empty,
                horizontal_neighbors: TOPOLOGY[i].0,
                vertical_neighbors: TOPOLOGY[i].1,
            }),
        }
    }

    /// Look up a node.
    pub fn node(&self, pos: Position) -> Result<&Node, Error> {
        if !is_valid(pos) {
            return Err(Error::OutOfRange(pos));
        }
        Ok(&self.nodes[pos - 1])
    }

    /// State of the node at `pos`.
    pub fn state(&self, pos: Position) -> Result<NodeState, Error> {
        self.node(pos).map(|n| n.state)
    }

    /// Set the state of the node at `pos`.
    pub fn set(&mut self, pos: Position, state: NodeState) -> Result<(), Error> {
        if !is_valid(pos) {
            return Err(Error::OutOfRange(pos));
        }
        self.put(pos, state);
        Ok(())
    }

    /// Unchecked read for positions already known to be valid.
    #[inline]
    pub(crate) fn at(&self, pos: Position) -> NodeState {
        self.nodes[pos - 1].state
    }

    /// Unchecked write for positions already known to be valid.
    #[inline]
    pub(crate) fn put(&mut self, pos: Position, state: NodeState) {
        self.nodes[pos - 1].state = state;
    }

    /// Read-only copy of every node state, indexed by `position - 1`.
    pub fn snapshot(&self) -> [NodeState; NUM_POSITIONS] {
        std::array::from_fn(|i| self.nodes[i].state)
    }

    /// Number of nodes in the given state.
    pub fn count(&self, state: NodeState) -> usize {
        self.nodes.iter().filter(|n| n.state == state).count()
    }

    /// Positions whose node is in the given state, in ascending order.
    pub fn positions_with(&self, state: NodeState) -> impl Iterator<Item = Position> + '_ {
        self.nodes
            .iter()
            .filter(move |n| n.state == state)
            .map(|n| n.position)
    }

    /// Every empty position, in ascending order.
    pub fn empty_positions(&self) -> Vec<Position> {
        self.positions_with(NodeState::Empty).collect()
    }

    /// Every (from, to) slide of one of `player`'s checkers onto an adjacent
    /// empty node, ordered by `from` then horizontal before vertical.
    pub fn slide_moves(&self, player: Player) -> Vec<(Position, Position)> {
        let mut moves = Vec::new();
        for node in self.nodes.iter().filter(|n| n.state == player.state()) {
            for axis in Axis::BOTH {
                for &to in node.neighbors(axis) {
                    if self.at(to) == NodeState::Empty {
                        moves.push((node.position, to));
                    }
                }
            }
        }
        moves
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut states = self.nodes.iter().map(|n| n.state.symbol());
        for (i, row) in DIAGRAM.iter().enumerate() {
            write!(f, "{} ", GRID - i)?;
            for ch in row.chars() {
                if ch == '*' {
                    write!(f, "{}", states.next().unwrap_or('?'))?;
                } else {
                    write!(f, "{ch}")?;
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "  a b c d e f g")
    }
}
