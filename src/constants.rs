//! Constants for board geometry, game rules, and AI parameters.
//!
//! The board is a fixed graph of 24 positions, numbered 1..=24 from left to
//! right and top to bottom across the three nested squares.

// =============================================================================
// Board Geometry
// =============================================================================

/// Number of positions on the board.
pub const NUM_POSITIONS: usize = 24;

/// Width and height of the rendered grid (7x7 with gaps).
pub const GRID: usize = 7;

/// Matching-neighbor count that signals a mill (the origin plus two more).
pub const MILL_COUNT: usize = 2;

// =============================================================================
// Game Rules
// =============================================================================

/// Checkers each player starts with, both in hand and as live count.
pub const CHECKERS_PER_PLAYER: u8 = 9;

/// A player whose live-checker count drops to this value has lost.
pub const LOSING_CHECKERS: u8 = 2;

// =============================================================================
// AI Parameters
// =============================================================================

/// Default minimax lookahead in plies.
pub const SEARCH_DEPTH: usize = 3;

/// Evaluator bonus for a checker that currently sits in a mill.
pub const MILL_BONUS: i32 = 5;

/// Evaluator value of each checker on the board.
pub const CHECKER_VALUE: i32 = 1;

/// Half-turn cap for self-play, since movement can cycle forever.
pub const MAX_GAME_LEN: usize = 200;
