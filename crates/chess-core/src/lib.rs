//! Core types for chess.
//!
//! This crate provides the fundamental types used across the chess engine:
//! - [`Piece`], [`PieceKind`] and [`Color`] for piece representation
//! - [`Square`] for board coordinates (row 0 is Black's back rank)
//! - [`Move`] for move representation
//! - Piece-placement text parsing for building boards in tests and tools

mod color;
mod error;
mod mov;
mod piece;
mod placement;
mod square;

pub use color::Color;
pub use error::CoreError;
pub use mov::{Move, MoveFlag, MoveText};
pub use piece::{Piece, PieceKind};
pub use placement::Placement;
pub use square::Square;
