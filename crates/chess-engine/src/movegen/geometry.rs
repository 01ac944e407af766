//! Movement predicates for every piece type.
//!
//! These answer "can this piece travel from here to there on this board",
//! looking only at the board (and, for pawns and kings, the previous move).
//! They know nothing about check: filtering out moves that expose the king
//! happens in the legal move generator.

use crate::Board;
use chess_core::{Move, Piece, PieceKind, Square};

/// Returns true if `piece` on `from` may move to `to`, ignoring check.
///
/// Captures of friendly pieces are not rejected here. En passant is never
/// allowed because no previous move is known; see [`can_move_after`].
#[inline]
pub fn can_move(piece: Piece, from: Square, to: Square, board: &Board) -> bool {
    can_move_after(piece, from, to, board, None)
}

/// Like [`can_move`], with the previous move available for en passant.
pub fn can_move_after(
    piece: Piece,
    from: Square,
    to: Square,
    board: &Board,
    last_move: Option<&Move>,
) -> bool {
    if from == to {
        return false;
    }
    match piece.kind {
        PieceKind::Pawn => pawn_can_move(piece, from, to, board, last_move),
        PieceKind::Knight => knight_step(from, to),
        PieceKind::Bishop => diagonal(from, to) && path_clear(board, from, to),
        PieceKind::Rook => straight(from, to) && path_clear(board, from, to),
        PieceKind::Queen => (diagonal(from, to) || straight(from, to)) && path_clear(board, from, to),
        PieceKind::King => king_step(from, to) || castling_geometry(piece, from, to, board),
    }
}

/// Returns true if `piece` on `from` attacks `target`.
///
/// Attack detection uses the plain movement geometry: pawns attack both
/// forward diagonals whether or not anything stands there, and kings attack
/// only adjacent squares (never through castling).
pub fn attacks(piece: Piece, from: Square, target: Square, board: &Board) -> bool {
    match piece.kind {
        PieceKind::Pawn => {
            let d_row = target.row() as i8 - from.row() as i8;
            d_row == piece.color.pawn_direction() && from.col().abs_diff(target.col()) == 1
        }
        PieceKind::King => king_step(from, target),
        _ => can_move(piece, from, target, board),
    }
}

fn pawn_can_move(
    pawn: Piece,
    from: Square,
    to: Square,
    board: &Board,
    last_move: Option<&Move>,
) -> bool {
    let dir = pawn.color.pawn_direction();
    let d_row = to.row() as i8 - from.row() as i8;
    let d_col = to.col().abs_diff(from.col());

    if d_col == 0 {
        if d_row == dir {
            return board.is_empty(to);
        }
        if d_row == 2 * dir && from.row() == pawn.color.pawn_row() {
            return from
                .offset(dir, 0)
                .is_some_and(|mid| board.is_empty(mid))
                && board.is_empty(to);
        }
        return false;
    }

    if d_col != 1 || d_row != dir {
        return false;
    }

    match board.piece_at(to) {
        Some(target) => target.color != pawn.color,
        None => last_move.is_some_and(|last| en_passant_target(pawn, from, to, board, last)),
    }
}

/// True if `last` was an enemy pawn's double step that ended right beside
/// `from`, on the column the capturing pawn is heading to.
fn en_passant_target(pawn: Piece, from: Square, to: Square, board: &Board, last: &Move) -> bool {
    last.piece.kind == PieceKind::Pawn
        && last.piece.color != pawn.color
        && last.from.row().abs_diff(last.to.row()) == 2
        && last.to == from.with_col(to.col())
        && board
            .piece_at(last.to)
            .is_some_and(|p| p.is(PieceKind::Pawn, last.piece.color))
}

fn castling_geometry(king: Piece, from: Square, to: Square, board: &Board) -> bool {
    if king.has_moved || from.row() != to.row() || from.col().abs_diff(to.col()) != 2 {
        return false;
    }
    let rook_col = if to.col() > from.col() { 7 } else { 0 };
    let rook_sq = from.with_col(rook_col);
    let rook_ready = board
        .piece_at(rook_sq)
        .is_some_and(|rook| rook.is(PieceKind::Rook, king.color) && !rook.has_moved);
    rook_ready && path_clear(board, from, rook_sq)
}

#[inline]
fn knight_step(from: Square, to: Square) -> bool {
    let d_row = from.row().abs_diff(to.row());
    let d_col = from.col().abs_diff(to.col());
    (d_row == 1 && d_col == 2) || (d_row == 2 && d_col == 1)
}

#[inline]
fn king_step(from: Square, to: Square) -> bool {
    from != to && from.row().abs_diff(to.row()) <= 1 && from.col().abs_diff(to.col()) <= 1
}

#[inline]
fn straight(from: Square, to: Square) -> bool {
    from != to && (from.row() == to.row() || from.col() == to.col())
}

#[inline]
fn diagonal(from: Square, to: Square) -> bool {
    from != to && from.row().abs_diff(to.row()) == from.col().abs_diff(to.col())
}

/// Returns true if every square strictly between `from` and `to` is empty.
///
/// Only meaningful for squares on a shared line or diagonal.
fn path_clear(board: &Board, from: Square, to: Square) -> bool {
    let d_row = (to.row() as i8 - from.row() as i8).signum();
    let d_col = (to.col() as i8 - from.col() as i8).signum();
    let mut current = from.offset(d_row, d_col);
    while let Some(sq) = current {
        if sq == to {
            return true;
        }
        if !board.is_empty(sq) {
            return false;
        }
        current = sq.offset(d_row, d_col);
    }
    false
}
