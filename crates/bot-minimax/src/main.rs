//! Minimax bot driver.
//!
//! Replays a list of coordinate moves, then either asks the engine for the
//! next move or lets it play against itself.

use anyhow::{Context, Result};
use chess_engine::{Engine, Game, SearchConfig};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Minimax chess bot.
#[derive(Parser)]
#[command(name = "bot-minimax")]
#[command(about = "Picks chess moves with a depth-limited alpha-beta search")]
struct Args {
    /// Moves played so far, in coordinate notation (e.g. "e2e4 e7e5")
    #[arg(long, default_value = "")]
    moves: String,

    /// Requested search depth (capped at 5)
    #[arg(long)]
    depth: Option<u32>,

    /// Path to a TOML search configuration
    #[arg(long, default_value = "search.toml")]
    config: PathBuf,

    /// Time budget per move in milliseconds
    #[arg(long)]
    movetime: Option<u64>,

    /// Let the engine play this many plies against itself
    #[arg(long)]
    self_play: Option<usize>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let args = Args::parse();

    let mut config = SearchConfig::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    if let Some(ms) = args.movetime {
        config.time_limit_ms = Some(ms);
    }
    config.validate()?;
    let depth = args.depth.unwrap_or(config.max_depth);
    tracing::info!(?config, depth, "search configured");

    let mut game = Game::new();
    for text in args.moves.split_whitespace() {
        game.make_move_text(text)
            .with_context(|| format!("replaying move {}", text))?;
    }

    let engine = Engine::new(config);
    match args.self_play {
        Some(plies) => self_play(&engine, &mut game, depth, plies)?,
        None => suggest(&engine, &game, depth),
    }
    Ok(())
}

/// Prints the engine's choice for the side to move.
fn suggest(engine: &Engine, game: &Game, depth: u32) {
    println!("{}", game.board());
    if let Some(result) = game.result() {
        println!("result {}", result);
        return;
    }

    let cancel = chess_engine::CancelToken::new();
    match engine.search(game.history(), depth, game.side_to_move(), &cancel) {
        Some(found) => match found.best_move {
            Some(m) => {
                println!(
                    "info depth {} score {} nodes {}",
                    found.depth, found.score, found.nodes
                );
                println!("bestmove {} ({})", m, m.describe());
            }
            None => println!("bestmove 0000"),
        },
        None => println!("bestmove 0000"),
    }
}

/// Plays up to `plies` engine moves, stopping when the game ends.
fn self_play(engine: &Engine, game: &mut Game, depth: u32, plies: usize) -> Result<()> {
    for _ in 0..plies {
        if game.is_game_over() {
            break;
        }
        let color = game.side_to_move();
        let Some(m) = engine.best_move(game.history(), depth, color) else {
            break;
        };
        game.make_move(m)
            .with_context(|| format!("engine produced {}", m))?;
        println!("{:>3}. {} {}", game.ply_count(), color, m.describe());
    }

    println!("{}", game.board());
    match game.result() {
        Some(result) => println!("result {}", result),
        None => println!("result * ({} plies played)", game.ply_count()),
    }
    Ok(())
}
