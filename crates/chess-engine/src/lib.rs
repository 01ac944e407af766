//! Chess rules engine and minimax opponent.
//!
//! This crate provides:
//! - [`Board`] - 8x8 grid of pieces, rebuilt from a move history or mutated live
//! - Move generation and validation, with castling, en passant and promotion
//! - [`RuleSet`] and the classifier for checkmate, stalemate, the fifty-move
//!   rule and move repetition
//! - [`Game`] - Complete game management with history tracking and undo
//! - [`search`] - Alpha-beta search with quiescence, move ordering and a
//!   cancellable background [`Engine`]
//!
//! # Architecture
//!
//! The move history is the source of truth. A board can always be rebuilt
//! by replaying it from the initial setup, and the side to move follows from
//! its length. Search nodes work on their own copies of the board.
//!
//! # Example
//!
//! ```
//! use chess_core::Color;
//! use chess_engine::{Engine, Game, SearchConfig};
//!
//! let mut game = Game::new();
//! game.make_move_text("e2e4").unwrap();
//! game.make_move_text("e7e5").unwrap();
//! println!("Legal moves after 1.e4 e5: {}", game.legal_moves().len());
//!
//! let engine = Engine::new(SearchConfig { max_depth: 1, ..SearchConfig::default() });
//! let reply = engine.best_move(game.history(), 1, Color::White);
//! assert!(reply.is_some());
//! ```

mod board;
mod game;
pub mod movegen;
pub mod rules;
pub mod search;

pub use board::Board;
pub use game::{Game, GameError};
pub use movegen::{find_move, in_check, is_attacked, legal_moves, MoveList};
pub use rules::{is_checkmate, is_stalemate, DrawReason, GameResult, RuleSet, StandardChess};
pub use search::{CancelToken, Engine, SearchConfig, SearchHandle, SearchResult};
