//! Errors raised while building core values from untrusted input.

use thiserror::Error;

/// Errors that can occur when constructing squares, moves or placements.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("square out of range: row {row}, col {col}")]
    InvalidSquare { row: i32, col: i32 },

    #[error("invalid algebraic square: '{0}'")]
    InvalidAlgebraic(String),

    #[error("invalid move text: '{0}'")]
    InvalidMoveText(String),

    #[error("invalid piece placement: {0}")]
    InvalidPlacement(String),
}
