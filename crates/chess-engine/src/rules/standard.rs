//! Standard chess rules implementation.

use super::{DrawReason, GameResult, RuleSet};
use crate::movegen::{has_legal_move, in_check, legal_moves};
use crate::{Board, MoveList};
use chess_core::{Color, Move};

/// Half-moves without a pawn move or capture after which the game is drawn.
pub const FIFTY_MOVE_LIMIT: u32 = 50;

/// Number of trailing half-moves inspected by the repetition check.
pub const REPETITION_WINDOW: usize = 10;

/// Shortest history the repetition check considers.
pub const REPETITION_MIN_PLIES: usize = 12;

/// Standard chess rules.
///
/// - Standard piece movement
/// - Castling (kingside and queenside)
/// - En passant
/// - Pawn promotion
/// - Check, checkmate, and stalemate detection
/// - Fifty-move rule and move repetition
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardChess;

impl RuleSet for StandardChess {
    fn initial_board(&self) -> Board {
        Board::initial()
    }

    fn legal_moves(&self, board: &Board, color: Color, last_move: Option<&Move>) -> MoveList {
        legal_moves(board, color, last_move)
    }

    fn is_check(&self, board: &Board, color: Color) -> bool {
        in_check(board, color)
    }

    fn game_result(&self, board: &Board, history: &[Move]) -> Option<GameResult> {
        game_result(board, history)
    }
}

/// Returns true if `color` is in check and has no legal move.
pub fn is_checkmate_on(board: &Board, color: Color, last_move: Option<&Move>) -> bool {
    in_check(board, color) && !has_legal_move(board, color, last_move)
}

/// Returns true if `color` is not in check and has no legal move.
pub fn is_stalemate_on(board: &Board, color: Color, last_move: Option<&Move>) -> bool {
    !in_check(board, color) && !has_legal_move(board, color, last_move)
}

/// Half-moves since the last pawn move or capture.
pub fn halfmove_clock(history: &[Move]) -> u32 {
    history
        .iter()
        .rev()
        .take_while(|m| !m.resets_clock())
        .count() as u32
}

/// Returns true if the last two moves were each played twice before at
/// four half-move intervals, with no capture among them.
///
/// This compares moves, not positions, so it approximates threefold
/// repetition rather than implementing it exactly.
pub fn is_repetition(history: &[Move]) -> bool {
    let n = history.len();
    if n < REPETITION_MIN_PLIES.max(REPETITION_WINDOW) {
        return false;
    }
    let at = |back: usize| &history[n - back];
    let last = at(1);
    let reply = at(2);
    last.same_signature(at(5))
        && last.same_signature(at(9))
        && reply.same_signature(at(6))
        && reply.same_signature(at(10))
}

/// Classifies the position reached by `history`.
///
/// `board` must equal `Board::replay(history)`. Checkmate wins outright;
/// otherwise a side without legal moves is stalemated, and a side that is
/// not in check may be drawn by the fifty-move rule or repetition.
pub fn game_result(board: &Board, history: &[Move]) -> Option<GameResult> {
    let to_move = Color::to_move_after(history.len());
    let check = in_check(board, to_move);

    if !has_legal_move(board, to_move, history.last()) {
        return Some(if check {
            GameResult::checkmated(to_move)
        } else {
            GameResult::Draw(DrawReason::Stalemate)
        });
    }
    if check {
        return None;
    }
    if halfmove_clock(history) >= FIFTY_MOVE_LIMIT {
        return Some(GameResult::Draw(DrawReason::FiftyMoveRule));
    }
    if is_repetition(history) {
        return Some(GameResult::Draw(DrawReason::Repetition));
    }
    None
}

/// Returns true if the side to move after `history` is checkmated.
pub fn is_checkmate(history: &[Move]) -> bool {
    let board = Board::replay(history);
    matches!(
        game_result(&board, history),
        Some(GameResult::WhiteWins | GameResult::BlackWins)
    )
}

/// Returns true if the game reached by `history` is drawn.
pub fn is_stalemate(history: &[Move]) -> bool {
    let board = Board::replay(history);
    matches!(game_result(&board, history), Some(GameResult::Draw(_)))
}
