//! Rule set abstraction and game-state classification.
//!
//! This module provides the [`RuleSet`] trait, which bundles the operations
//! the rest of the engine needs from the rules of chess, and the free
//! functions that classify a move history as checkmate, stalemate or a
//! draw by the fifty-move rule or repetition.

mod standard;

pub use standard::{
    game_result, halfmove_clock, is_checkmate, is_checkmate_on, is_repetition, is_stalemate,
    is_stalemate_on, StandardChess, FIFTY_MOVE_LIMIT, REPETITION_MIN_PLIES, REPETITION_WINDOW,
};

use crate::{Board, MoveList};
use chess_core::{Color, Move};
use std::fmt;

/// Result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    /// White wins by checkmate.
    WhiteWins,
    /// Black wins by checkmate.
    BlackWins,
    /// Draw with a specific reason.
    Draw(DrawReason),
}

impl GameResult {
    /// The side that won, if any.
    pub fn winner(self) -> Option<Color> {
        match self {
            GameResult::WhiteWins => Some(Color::White),
            GameResult::BlackWins => Some(Color::Black),
            GameResult::Draw(_) => None,
        }
    }

    /// Result of `color` being checkmated.
    pub fn checkmated(color: Color) -> Self {
        match color {
            Color::White => GameResult::BlackWins,
            Color::Black => GameResult::WhiteWins,
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameResult::WhiteWins => write!(f, "1-0 (checkmate)"),
            GameResult::BlackWins => write!(f, "0-1 (checkmate)"),
            GameResult::Draw(reason) => write!(f, "1/2-1/2 ({})", reason),
        }
    }
}

/// Reason for a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    /// No legal moves but not in check.
    Stalemate,
    /// Fifty half-moves without a pawn move or capture.
    FiftyMoveRule,
    /// The same pair of moves was played three times in a row.
    Repetition,
}

impl fmt::Display for DrawReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DrawReason::Stalemate => "stalemate",
            DrawReason::FiftyMoveRule => "fifty-move rule",
            DrawReason::Repetition => "repetition",
        };
        f.write_str(s)
    }
}

/// The operations the engine needs from a set of chess rules.
///
/// # Example
///
/// ```
/// use chess_engine::rules::RuleSet;
/// use chess_engine::StandardChess;
/// use chess_core::Color;
///
/// let board = StandardChess.initial_board();
/// let moves = StandardChess.legal_moves(&board, Color::White, None);
/// assert_eq!(moves.len(), 20);
/// ```
pub trait RuleSet {
    /// Returns the board every game starts from.
    fn initial_board(&self) -> Board;

    /// Generates all legal moves for `color`.
    fn legal_moves(&self, board: &Board, color: Color, last_move: Option<&Move>) -> MoveList;

    /// Returns true if `m` is one of the legal moves for `color`.
    fn is_legal(&self, board: &Board, color: Color, last_move: Option<&Move>, m: &Move) -> bool {
        self.legal_moves(board, color, last_move).contains(m)
    }

    /// Returns true if the king of `color` is attacked.
    fn is_check(&self, board: &Board, color: Color) -> bool;

    /// Classifies the position reached by `history`.
    ///
    /// `board` must be the board obtained by replaying `history`.
    fn game_result(&self, board: &Board, history: &[Move]) -> Option<GameResult>;

    /// Returns true if the game is over.
    fn is_game_over(&self, board: &Board, history: &[Move]) -> bool {
        self.game_result(board, history).is_some()
    }
}
