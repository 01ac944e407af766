//! Static evaluation.
//!
//! Scores are from White's point of view: positive favours White.

use super::SearchConfig;
use crate::movegen::{in_check, legal_moves};
use crate::Board;
use chess_core::{Color, Move, Piece, PieceKind, Square};

/// Piece-square tables, indexed `[row][col]` from White's side of the board
/// (row 0 is the rank White promotes on). Black reads them mirrored.
const PAWN_TABLE: [[i32; 8]; 8] = [
    [0, 0, 0, 0, 0, 0, 0, 0],
    [50, 50, 50, 50, 50, 50, 50, 50],
    [20, 30, 30, 50, 50, 30, 30, 20],
    [10, 20, 20, 25, 25, 20, 20, 10],
    [5, 20, 20, 25, 25, 20, 20, 5],
    [0, 10, 10, 20, 20, 10, 10, 0],
    [0, 10, -5, 0, 0, -5, 10, 0],
    [0, 5, 5, -10, -10, 5, 5, 0],
];

const KNIGHT_TABLE: [[i32; 8]; 8] = [
    [-50, -40, -30, -30, -30, -30, -40, -50],
    [-40, -20, 0, 0, 0, 0, -20, -40],
    [-30, 0, 10, 15, 15, 10, 0, -30],
    [-30, 5, 15, 20, 20, 15, 5, -30],
    [-30, 0, 15, 20, 20, 15, 0, -30],
    [-30, 5, 10, 15, 15, 10, 5, -30],
    [-40, -20, 0, 5, 5, 0, -20, -40],
    [-50, -40, -30, -30, -30, -30, -40, -50],
];

const KING_ENDGAME_TABLE: [[i32; 8]; 8] = [
    [-50, -30, -10, 0, 0, -10, -30, -50],
    [-30, -10, 20, 30, 30, 20, -10, -30],
    [-10, 20, 40, 50, 50, 40, 20, -10],
    [0, 30, 50, 60, 60, 50, 30, 0],
    [0, 30, 50, 60, 60, 50, 30, 0],
    [-10, 20, 40, 50, 50, 40, 20, -10],
    [-30, -10, 20, 30, 30, 20, -10, -30],
    [-50, -30, -10, 0, 0, -10, -30, -50],
];

/// Positional bonus for a piece standing on `sq`.
pub fn piece_square_value(piece: Piece, sq: Square) -> i32 {
    let row = match piece.color {
        Color::White => sq.row(),
        Color::Black => 7 - sq.row(),
    } as usize;
    let col = sq.col() as usize;
    match piece.kind {
        PieceKind::Pawn => PAWN_TABLE[row][col],
        PieceKind::Knight => KNIGHT_TABLE[row][col],
        PieceKind::King => KING_ENDGAME_TABLE[row][col],
        _ => 0,
    }
}

/// Bonus for being close to the enemy king, by Manhattan distance.
///
/// Negative once the distance exceeds seven.
#[inline]
pub fn king_proximity(from: Square, enemy_king: Square, weight: i32) -> i32 {
    (7 - from.manhattan(enemy_king) as i32) * weight
}

/// Evaluates a position.
///
/// `last_move` is the move that produced `board`; it matters for the
/// mobility term through en passant.
pub fn evaluate(board: &Board, last_move: Option<&Move>, config: &SearchConfig) -> i32 {
    let white_moves = legal_moves(board, Color::White, last_move);
    let black_moves = legal_moves(board, Color::Black, last_move);
    let white_check = in_check(board, Color::White);
    let black_check = in_check(board, Color::Black);

    if black_check && black_moves.is_empty() {
        return config.checkmate_value;
    }
    if white_check && white_moves.is_empty() {
        return -config.checkmate_value;
    }

    let mut score = 0;
    if black_check {
        score += config.check_value;
    }
    if white_check {
        score -= config.check_value;
    }

    let kings = [
        board.find_king(Color::White),
        board.find_king(Color::Black),
    ];
    for (sq, piece) in board.pieces() {
        let mut value = piece.value() + piece_square_value(piece, sq);
        if let Some(enemy_king) = kings[piece.color.opposite().index()] {
            value += king_proximity(sq, enemy_king, config.king_proximity_weight);
        }
        if piece.kind == PieceKind::Queen
            && !piece.has_moved
            && sq.row() == piece.color.back_rank()
        {
            value += config.queen_home_bonus;
        }
        score += signed(piece.color, value);
    }

    let white_material = board.material(Color::White);
    let black_material = board.material(Color::Black);
    let queen = PieceKind::Queen.value();
    if white_material - black_material > queen {
        score += config.winning_bonus;
    }
    if black_material - white_material > queen {
        score -= config.winning_bonus;
    }

    score + white_moves.len() as i32 - black_moves.len() as i32
}

#[inline]
fn signed(color: Color, value: i32) -> i32 {
    match color {
        Color::White => value,
        Color::Black => -value,
    }
}
