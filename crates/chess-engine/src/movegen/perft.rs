//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against known-correct values to validate the move generator.

use super::legal_moves;
use crate::Board;
use chess_core::{Color, Move};

/// Counts the number of leaf nodes at the given depth.
///
/// `last_move` is the move that produced `board`, if any; en passant
/// depends on it.
pub fn perft(board: &Board, to_move: Color, last_move: Option<&Move>, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = legal_moves(board, to_move, last_move);

    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for m in &moves {
        let next = board.after(m);
        nodes += perft(&next, to_move.opposite(), Some(m), depth - 1);
    }
    nodes
}

/// Perft over the position reached by a move history.
pub fn perft_history(history: &[Move], depth: u32) -> u64 {
    let board = Board::replay(history);
    perft(
        &board,
        Color::to_move_after(history.len()),
        history.last(),
        depth,
    )
}

/// Perft with divide - shows node count for each move at depth-1.
/// Useful for debugging to identify which moves have incorrect counts.
pub fn perft_divide(
    board: &Board,
    to_move: Color,
    last_move: Option<&Move>,
    depth: u32,
) -> Vec<(String, u64)> {
    let moves = legal_moves(board, to_move, last_move);
    let mut results = Vec::with_capacity(moves.len());

    for m in &moves {
        let nodes = if depth > 1 {
            perft(&board.after(m), to_move.opposite(), Some(m), depth - 1)
        } else {
            1
        };
        results.push((m.to_coordinate(), nodes));
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
