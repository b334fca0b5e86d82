//! Morris-Rust: a Nine Men's Morris engine with a minimax opponent.
//!
//! ## Modules
//!
//! - [`constants`] - Board size, rule and AI parameters
//! - [`board`] - Board topology, node state and coordinates
//! - [`mill`] - Recursive mill detection
//! - [`game`] - Turn state machine (placement, movement, removal)
//! - [`heuristics`] - Static evaluator and capture-removal policy
//! - [`search`] - Minimax search and the AI opponent
//! - [`session`] - Text turn loop and self-play
//! - [`error`] - Error taxonomy
//!
//! ## Example
//!
//! ```
//! use morris_rust::game::{Game, Outcome, Player};
//! use morris_rust::search::{Ai, SearchConfig};
//!
//! let mut game = Game::new();
//! for pos in [1, 2, 10, 5] {
//!     game.place(game.to_move(), pos).unwrap();
//! }
//! // Completing 1-10-22 forms a mill.
//! assert_eq!(game.place(Player::One, 22), Ok(Outcome::Removal(Player::One)));
//!
//! // Let the AI pick the checker to take.
//! let mut ai = Ai::with_seed(SearchConfig::default(), 1);
//! let action = ai.choose(&game).unwrap();
//! game.apply(action).unwrap();
//! println!("{}", game.board());
//! ```

pub mod board;
pub mod constants;
pub mod error;
pub mod game;
pub mod heuristics;
pub mod mill;
pub mod search;
pub mod session;
