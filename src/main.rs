//! Morris-Rust: Nine Men's Morris against a minimax AI.
//!
//! ## Usage
//!
//! - `morris-rust` - Play as Player 1 against the AI
//! - `morris-rust play --ai none` - Two humans at one terminal
//! - `morris-rust selfplay` - Watch the AI play itself
//! - `morris-rust demo` - Run a short scripted demo

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};

use morris_rust::constants::{MAX_GAME_LEN, SEARCH_DEPTH};
use morris_rust::game::{Game, Player};
use morris_rust::search::{Ai, SearchConfig};
use morris_rust::session::{Session, SessionConfig, selfplay, status};

/// Morris-Rust: Nine Men's Morris with a minimax opponent
#[derive(Parser)]
#[command(name = "morris-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    search: SearchArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive game on stdin/stdout
    Play {
        /// Which sides the AI plays
        #[arg(long, value_enum, default_value_t = AiSide::P2)]
        ai: AiSide,
    },
    /// Let the AI play both sides
    Selfplay {
        /// Stop after this many placements and moves
        #[arg(long, default_value_t = MAX_GAME_LEN)]
        max_turns: usize,
    },
    /// Run a short scripted demo of the engine
    Demo,
}

#[derive(Args)]
struct SearchArgs {
    /// Minimax lookahead in plies
    #[arg(long, global = true, default_value_t = SEARCH_DEPTH)]
    depth: usize,

    /// Seed for AI tie-breaking
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Print search diagnostics to stderr
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum AiSide {
    None,
    P1,
    P2,
    Both,
}

impl AiSide {
    fn players(self) -> Vec<Player> {
        match self {
            AiSide::None => Vec::new(),
            AiSide::P1 => vec![Player::One],
            AiSide::P2 => vec![Player::Two],
            AiSide::Both => Player::BOTH.to_vec(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = SessionConfig {
        ai_players: Vec::new(),
        search: SearchConfig {
            depth: cli.search.depth,
            verbose: cli.search.verbose,
        },
        seed: cli.search.seed,
    };

    match cli.command {
        Some(Commands::Selfplay { max_turns }) => {
            let mut stdout = std::io::stdout();
            let winner = selfplay(config, max_turns, &mut stdout).context("self-play failed")?;
            match winner {
                Some(player) => println!("{player} wins"),
                None => println!("no winner"),
            }
        }
        Some(Commands::Demo) => run_demo(config)?,
        Some(Commands::Play { ai }) => play(config, ai)?,
        None => play(config, AiSide::P2)?,
    }
    Ok(())
}

fn play(config: SessionConfig, ai: AiSide) -> Result<()> {
    println!("Morris-Rust: Nine Men's Morris (type `help` for commands)\n");
    let mut session = Session::new(SessionConfig {
        ai_players: ai.players(),
        ..config
    });
    session.run().context("game loop failed")
}

fn run_demo(config: SessionConfig) -> Result<()> {
    println!("Morris-Rust: Nine Men's Morris Engine\n");

    // Demo 1: scripted opening that closes the 1-10-22 mill
    println!("=== Mill Demo ===");
    let mut game = Game::new();
    for pos in [1, 2, 10, 5, 22] {
        let player = game.to_move();
        let outcome = game
            .place(player, pos)
            .with_context(|| format!("demo placement {pos} rejected"))?;
        println!("{player} places {pos}: {outcome:?}");
    }
    println!("{}", game.board());

    // Demo 2: AI chooses the capture and replies
    println!("=== AI Demo ===");
    let mut ai = match config.seed {
        Some(seed) => Ai::with_seed(config.search, seed),
        None => Ai::new(config.search),
    };
    for _ in 0..2 {
        let Some(action) = ai.choose(&game) else {
            break;
        };
        let player = game.to_move();
        game.apply(action)
            .with_context(|| format!("AI action {action} rejected"))?;
        println!("{player} (AI): {action}");
    }
    println!("{}", game.board());
    println!("{}", status(&game));
    Ok(())
}
