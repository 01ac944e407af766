//! Move generation.
//!
//! Moves are produced by asking each friendly piece's movement predicate
//! about every square on the board, then discarding moves that would leave
//! the mover's king attacked.

mod geometry;
pub mod perft;

use crate::Board;
use chess_core::{Color, Move, MoveFlag, MoveText, Piece, PieceKind, Square};

pub use geometry::{attacks, can_move, can_move_after};

/// A list of moves with a fixed maximum capacity.
///
/// Chess positions have at most 218 legal moves, so we use a fixed-size
/// array to avoid heap allocations during move generation.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// Maximum number of legal moves in any chess position.
    pub const MAX_MOVES: usize = 256;

    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [Move::NULL; Self::MAX_MOVES],
            len: 0,
        }
    }

    /// Adds a move to the list.
    ///
    /// Panics if the list is full. Move generation only pushes legal moves,
    /// which never exceed 218 in any reachable position.
    #[inline]
    pub fn push(&mut self, m: Move) {
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len] = m;
        self.len += 1;
    }

    /// Returns the number of moves.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    /// Returns an iterator over the moves.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    /// Returns true if the list holds the given move.
    #[inline]
    pub fn contains(&self, m: &Move) -> bool {
        self.as_slice().contains(m)
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        debug_assert!(index < self.len);
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Generates all legal moves for `color`.
///
/// `last_move` is the move played just before, needed for en passant.
pub fn legal_moves(board: &Board, color: Color, last_move: Option<&Move>) -> MoveList {
    let mut moves = MoveList::new();
    for (from, piece) in board.pieces_of(color) {
        push_legal(board, piece, from, last_move, &mut moves);
    }
    moves
}

/// Generates the legal moves of one piece.
pub fn legal_moves_from(board: &Board, from: Square, last_move: Option<&Move>) -> MoveList {
    let mut moves = MoveList::new();
    if let Some(piece) = board.piece_at(from) {
        push_legal(board, piece, from, last_move, &mut moves);
    }
    moves
}

/// Returns true if `color` has at least one legal move.
pub fn has_legal_move(board: &Board, color: Color, last_move: Option<&Move>) -> bool {
    let mut found = false;
    for (from, piece) in board.pieces_of(color) {
        for to in Square::all() {
            candidates(board, piece, from, to, last_move, |m| {
                found = found || is_safe(board, &m);
            });
            if found {
                return true;
            }
        }
    }
    false
}

/// Finds the legal move described by coordinate text.
pub fn find_move(
    board: &Board,
    color: Color,
    last_move: Option<&Move>,
    text: &MoveText,
) -> Option<Move> {
    legal_moves(board, color, last_move)
        .iter()
        .find(|m| text.matches(m))
        .copied()
}

/// Pushes every legal move of the piece on `from`.
///
/// Only moves that pass the king-safety filter reach the list, so its
/// length is bounded by the legal-move maximum.
fn push_legal(
    board: &Board,
    piece: Piece,
    from: Square,
    last_move: Option<&Move>,
    moves: &mut MoveList,
) {
    for to in Square::all() {
        candidates(board, piece, from, to, last_move, |m| {
            if is_safe(board, &m) {
                moves.push(m);
            }
        });
    }
}

/// Turns a geometrically valid `from -> to` into fully described moves.
fn candidates<F>(
    board: &Board,
    piece: Piece,
    from: Square,
    to: Square,
    last_move: Option<&Move>,
    mut emit: F,
) where
    F: FnMut(Move),
{
    let target = board.piece_at(to);
    if target.is_some_and(|t| t.color == piece.color) {
        return;
    }
    if !can_move_after(piece, from, to, board, last_move) {
        return;
    }

    let d_row = from.row().abs_diff(to.row());
    let d_col = from.col().abs_diff(to.col());

    match piece.kind {
        PieceKind::King if d_col == 2 => {
            let flag = if to.col() > from.col() {
                MoveFlag::CastleKingside
            } else {
                MoveFlag::CastleQueenside
            };
            emit(Move::new(from, to, piece, None, flag));
        }
        PieceKind::Pawn if d_row == 2 => {
            emit(Move::new(from, to, piece, None, MoveFlag::DoublePush));
        }
        PieceKind::Pawn if d_col == 1 && target.is_none() => {
            let victim = board.piece_at(from.with_col(to.col()));
            emit(Move::new(from, to, piece, victim, MoveFlag::EnPassant));
        }
        PieceKind::Pawn if to.row() == piece.color.promotion_row() => {
            for kind in PieceKind::PROMOTIONS {
                if let Some(flag) = MoveFlag::promote_to(kind) {
                    emit(Move::new(from, to, piece, target, flag));
                }
            }
        }
        _ => emit(Move::new(from, to, piece, target, MoveFlag::Normal)),
    }
}

/// Returns true if the move does not leave the mover's king attacked.
///
/// Castling additionally requires that the king is not in check now and
/// that the square it crosses would be a legal one-step king move.
fn is_safe(board: &Board, m: &Move) -> bool {
    let color = m.color();
    if m.is_castling() {
        if in_check(board, color) {
            return false;
        }
        let step = if m.to.col() > m.from.col() { 1 } else { -1 };
        let crossing = match m.from.offset(0, step) {
            Some(sq) => sq,
            None => return false,
        };
        let half_step = Move::new(m.from, crossing, m.piece, None, MoveFlag::Normal);
        if in_check(&board.after(&half_step), color) {
            return false;
        }
    }
    !in_check(&board.after(m), color)
}

/// Returns true if `square` is attacked by any piece of `by_color`.
pub fn is_attacked(board: &Board, square: Square, by_color: Color) -> bool {
    board
        .pieces_of(by_color)
        .any(|(from, piece)| attacks(piece, from, square, board))
}

/// Returns true if the king of `color` is attacked.
///
/// A board without that king reports check: the position is broken and
/// should never be treated as safe.
pub fn in_check(board: &Board, color: Color) -> bool {
    match board.find_king(color) {
        Some(king) => is_attacked(board, king, color.opposite()),
        None => {
            tracing::warn!(%color, "no king on the board; treating as in check");
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn board(text: &str) -> Board {
        Board::from_placement(text).unwrap()
    }

    fn quiet(from: &str, to: &str) -> Move {
        let pawn = Piece::new(PieceKind::Pawn, Color::White);
        Move::new(sq(from), sq(to), pawn, None, MoveFlag::Normal)
    }

    #[test]
    fn movelist_push_and_iterate() {
        let mut list = MoveList::new();
        assert!(list.is_empty());

        let m1 = quiet("e2", "e4");
        let m2 = quiet("d2", "d4");

        list.push(m1);
        list.push(m2);

        assert_eq!(list.len(), 2);
        assert_eq!(list[0], m1);
        assert_eq!(list[1], m2);
        assert!(list.contains(&m2));
    }

    #[test]
    fn movelist_default() {
        let list = MoveList::default();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn most_crowded_position_fits() {
        // Nine white queens plus minor pieces: 218 legal moves.
        let b = board("R6R/3Q4/1Q4Q1/4Q3/2Q4Q/Q4Q2/pp1Q4/kBNN1KB1");
        let moves = legal_moves(&b, Color::White, None);
        assert_eq!(moves.len(), 218);
        assert!(moves.len() <= MoveList::MAX_MOVES);
        assert!(has_legal_move(&b, Color::White, None));
    }

    #[test]
    fn legal_moves_startpos() {
        let moves = legal_moves(&Board::initial(), Color::White, None);
        assert_eq!(moves.len(), 20); // 16 pawn moves + 4 knight moves
        let pawn_moves = moves
            .iter()
            .filter(|m| m.piece.kind == PieceKind::Pawn)
            .count();
        assert_eq!(pawn_moves, 16);
        assert_eq!(legal_moves(&Board::initial(), Color::Black, None).len(), 20);
    }

    #[test]
    fn legal_moves_from_one_piece() {
        let moves = legal_moves_from(&Board::initial(), sq("g1"), None);
        assert_eq!(moves.len(), 2);
        assert!(legal_moves_from(&Board::initial(), sq("e4"), None).is_empty());
    }

    #[test]
    fn is_attacked_startpos() {
        let b = Board::initial();
        assert!(is_attacked(&b, sq("e3"), Color::White));
        assert!(is_attacked(&b, sq("f3"), Color::White));
        assert!(!is_attacked(&b, sq("e4"), Color::White));
        assert!(is_attacked(&b, sq("e6"), Color::Black));
        assert!(!is_attacked(&b, sq("e3"), Color::Black));
    }

    #[test]
    fn in_check_startpos() {
        let b = Board::initial();
        assert!(!in_check(&b, Color::White));
        assert!(!in_check(&b, Color::Black));
    }

    #[test]
    fn missing_king_counts_as_check() {
        let b = board("8/8/8/8/8/8/8/4K3");
        assert!(in_check(&b, Color::Black));
        assert!(!in_check(&b, Color::White));
    }

    #[test]
    fn pinned_piece_cannot_move() {
        // The e2 knight shields the king from the e8 rook.
        let b = board("4r2k/8/8/8/8/8/4N3/4K3");
        let moves = legal_moves(&b, Color::White, None);
        assert!(moves.iter().all(|m| m.piece.kind == PieceKind::King));
    }

    #[test]
    fn castling_both_sides() {
        let b = board("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R");
        let moves = legal_moves(&b, Color::White, None);
        assert!(moves.iter().any(|m| m.flag == MoveFlag::CastleKingside));
        assert!(moves.iter().any(|m| m.flag == MoveFlag::CastleQueenside));
    }

    #[test]
    fn no_castling_through_attacked_square() {
        // The f5 rook covers f1 but leaves the queenside alone.
        let b = board("r3k2r/8/8/5r2/8/8/8/R3K2R");
        let moves = legal_moves(&b, Color::White, None);
        assert!(!moves.iter().any(|m| m.flag == MoveFlag::CastleKingside));
        assert!(moves.iter().any(|m| m.flag == MoveFlag::CastleQueenside));
    }

    #[test]
    fn no_castling_out_of_check() {
        let b = board("r3k2r/8/8/4r3/8/8/8/R3K2R");
        let moves = legal_moves(&b, Color::White, None);
        assert!(!moves.iter().any(|m| m.is_castling()));
    }

    #[test]
    fn no_castling_into_check() {
        let b = board("r3k2r/8/8/6r1/8/8/8/R3K2R");
        let moves = legal_moves(&b, Color::White, None);
        assert!(!moves.iter().any(|m| m.flag == MoveFlag::CastleKingside));
    }

    #[test]
    fn queenside_castling_allows_attacked_b_file() {
        let b = board("1r2k3/8/8/8/8/8/8/R3K3");
        let moves = legal_moves(&b, Color::White, None);
        assert!(moves.iter().any(|m| m.flag == MoveFlag::CastleQueenside));
    }

    #[test]
    fn en_passant_only_right_after_double_step() {
        let b = board("4k3/8/8/3pP3/8/8/8/4K3");
        let black_pawn = Piece::new(PieceKind::Pawn, Color::Black);
        let double = Move::new(sq("d7"), sq("d5"), black_pawn, None, MoveFlag::DoublePush);

        let moves = legal_moves(&b, Color::White, Some(&double));
        let ep = moves
            .iter()
            .find(|m| m.flag == MoveFlag::EnPassant)
            .copied()
            .unwrap();
        assert_eq!(ep.to, sq("d6"));
        assert_eq!(ep.captured.map(|p| p.kind), Some(PieceKind::Pawn));

        let king = Piece::new(PieceKind::King, Color::Black);
        let later = Move::new(sq("e8"), sq("f8"), king, None, MoveFlag::Normal);
        let moves = legal_moves(&b, Color::White, Some(&later));
        assert!(!moves.iter().any(|m| m.flag == MoveFlag::EnPassant));
    }

    #[test]
    fn promotion_offers_four_pieces() {
        let b = board("8/P7/8/8/8/8/8/4K2k");
        let moves = legal_moves(&b, Color::White, None);
        let promos: Vec<_> = moves.iter().filter_map(|m| m.promotion()).collect();
        assert_eq!(
            promos,
            vec![
                PieceKind::Queen,
                PieceKind::Rook,
                PieceKind::Bishop,
                PieceKind::Knight
            ]
        );
    }

    #[test]
    fn find_move_resolves_text() {
        let b = Board::initial();
        let text = MoveText::parse("e2e4").unwrap();
        let m = find_move(&b, Color::White, None, &text).unwrap();
        assert_eq!(m.flag, MoveFlag::DoublePush);
        let bad = MoveText::parse("e2e5").unwrap();
        assert!(find_move(&b, Color::White, None, &bad).is_none());
    }

    #[test]
    fn has_legal_move_matches_generation() {
        let stalemated = board("7k/5Q2/6K1/8/8/8/8/8");
        assert!(!has_legal_move(&stalemated, Color::Black, None));
        assert!(legal_moves(&stalemated, Color::Black, None).is_empty());
        assert!(has_legal_move(&Board::initial(), Color::White, None));
    }
}
