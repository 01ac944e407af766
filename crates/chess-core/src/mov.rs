//! Move representation.

use crate::{Color, CoreError, Piece, PieceKind, Square};
use std::fmt;
use std::str::FromStr;

/// Flags for special move types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MoveFlag {
    /// Normal move (no special action).
    Normal = 0,
    /// Pawn double push from starting row.
    DoublePush = 1,
    /// Kingside castling (O-O).
    CastleKingside = 2,
    /// Queenside castling (O-O-O).
    CastleQueenside = 3,
    /// En passant capture.
    EnPassant = 4,
    /// Pawn promotion to knight.
    PromoteKnight = 5,
    /// Pawn promotion to bishop.
    PromoteBishop = 6,
    /// Pawn promotion to rook.
    PromoteRook = 7,
    /// Pawn promotion to queen.
    PromoteQueen = 8,
}

impl MoveFlag {
    /// Returns the promotion flag for a piece type.
    #[inline]
    pub const fn promote_to(kind: PieceKind) -> Option<Self> {
        match kind {
            PieceKind::Knight => Some(MoveFlag::PromoteKnight),
            PieceKind::Bishop => Some(MoveFlag::PromoteBishop),
            PieceKind::Rook => Some(MoveFlag::PromoteRook),
            PieceKind::Queen => Some(MoveFlag::PromoteQueen),
            _ => None,
        }
    }

    /// Returns the promotion piece if this is a promotion move.
    #[inline]
    pub const fn promotion_piece(self) -> Option<PieceKind> {
        match self {
            MoveFlag::PromoteKnight => Some(PieceKind::Knight),
            MoveFlag::PromoteBishop => Some(PieceKind::Bishop),
            MoveFlag::PromoteRook => Some(PieceKind::Rook),
            MoveFlag::PromoteQueen => Some(PieceKind::Queen),
            _ => None,
        }
    }

    /// Returns true if this is a promotion move.
    #[inline]
    pub const fn is_promotion(self) -> bool {
        matches!(
            self,
            MoveFlag::PromoteKnight
                | MoveFlag::PromoteBishop
                | MoveFlag::PromoteRook
                | MoveFlag::PromoteQueen
        )
    }

    /// Returns true if this is a castling move.
    #[inline]
    pub const fn is_castling(self) -> bool {
        matches!(self, MoveFlag::CastleKingside | MoveFlag::CastleQueenside)
    }
}

/// A chess move.
///
/// A move is a value describing one transition of the board: it carries the
/// moving piece as it stood before the move (including its has-moved flag)
/// and whatever it captured, so the transition can be replayed or reversed
/// without consulting the board.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    /// The moving piece before the move.
    pub piece: Piece,
    /// The captured piece. For en passant this is the pawn beside `from`.
    pub captured: Option<Piece>,
    pub flag: MoveFlag,
}

impl Move {
    /// Creates a new move.
    #[inline]
    pub const fn new(
        from: Square,
        to: Square,
        piece: Piece,
        captured: Option<Piece>,
        flag: MoveFlag,
    ) -> Self {
        Move {
            from,
            to,
            piece,
            captured,
            flag,
        }
    }

    /// Returns the promotion target, if any.
    #[inline]
    pub const fn promotion(&self) -> Option<PieceKind> {
        self.flag.promotion_piece()
    }

    /// Returns true if the move takes a piece.
    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    /// Returns true if this is a castling move.
    #[inline]
    pub const fn is_castling(&self) -> bool {
        self.flag.is_castling()
    }

    /// The mover's has-moved flag before this move.
    #[inline]
    pub const fn had_moved(&self) -> bool {
        self.piece.has_moved
    }

    /// The color making the move.
    #[inline]
    pub const fn color(&self) -> Color {
        self.piece.color
    }

    /// Returns true if this move resets the fifty-move counter.
    #[inline]
    pub fn resets_clock(&self) -> bool {
        self.piece.kind == PieceKind::Pawn || self.is_capture()
    }

    /// For castling moves, the rook's `(from, to)` relocation.
    pub const fn castling_rook(&self) -> Option<(Square, Square)> {
        match self.flag {
            MoveFlag::CastleKingside => Some((self.from.with_col(7), self.from.with_col(5))),
            MoveFlag::CastleQueenside => Some((self.from.with_col(0), self.from.with_col(3))),
            _ => None,
        }
    }

    /// For en passant moves, the square of the captured pawn.
    pub const fn en_passant_square(&self) -> Option<Square> {
        match self.flag {
            MoveFlag::EnPassant => Some(self.from.with_col(self.to.col())),
            _ => None,
        }
    }

    /// Repetition signature comparison.
    ///
    /// Two moves match when they share coordinates and the moving piece's
    /// type and color, and neither captured anything.
    pub fn same_signature(&self, other: &Move) -> bool {
        self.from == other.from
            && self.to == other.to
            && self.piece.kind == other.piece.kind
            && self.piece.color == other.piece.color
            && self.captured.is_none()
            && other.captured.is_none()
    }

    /// Returns the coordinate notation for this move (e.g., "e2e4", "e7e8q").
    pub fn to_coordinate(&self) -> String {
        let promo = match self.flag {
            MoveFlag::PromoteKnight => "n",
            MoveFlag::PromoteBishop => "b",
            MoveFlag::PromoteRook => "r",
            MoveFlag::PromoteQueen => "q",
            _ => "",
        };
        format!("{}{}{}", self.from, self.to, promo)
    }

    /// Human readable label, e.g. `Knight(G1->F3)`, `O-O`, `Pawn(E5->D6) e.p. x Pawn`.
    pub fn describe(&self) -> String {
        let mut out = match self.flag {
            MoveFlag::CastleKingside => "O-O".to_string(),
            MoveFlag::CastleQueenside => "O-O-O".to_string(),
            _ => format!(
                "{}({}->{})",
                self.piece.kind,
                self.from.to_algebraic().to_uppercase(),
                self.to.to_algebraic().to_uppercase()
            ),
        };
        if let Some(kind) = self.promotion() {
            out.push_str(&format!(" = {}", kind));
        } else if self.flag == MoveFlag::EnPassant {
            out.push_str(" e.p.");
        }
        if let Some(captured) = self.captured {
            out.push_str(&format!(" x {}", captured.kind));
        }
        out
    }

    /// A placeholder move (used to fill fixed-size buffers, never legal).
    pub const NULL: Move = Move {
        from: Square::A8,
        to: Square::A8,
        piece: Piece::new(PieceKind::Pawn, Color::White),
        captured: None,
        flag: MoveFlag::Normal,
    };
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_coordinate())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_coordinate())
    }
}

/// A move request in coordinate notation, before it is matched to a legal move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveText {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl MoveText {
    /// Parses coordinate notation such as `e2e4` or `e7e8q`.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        let invalid = || CoreError::InvalidMoveText(s.to_string());
        if !s.is_ascii() || s.len() < 4 || s.len() > 5 {
            return Err(invalid());
        }
        let from = Square::from_algebraic(&s[0..2]).map_err(|_| invalid())?;
        let to = Square::from_algebraic(&s[2..4]).map_err(|_| invalid())?;
        let promotion = match s[4..].chars().next() {
            None => None,
            Some(c) => match PieceKind::from_char(c) {
                Some((kind, _)) if MoveFlag::promote_to(kind).is_some() => Some(kind),
                _ => return Err(invalid()),
            },
        };
        Ok(MoveText {
            from,
            to,
            promotion,
        })
    }

    /// Returns true if `m` is the move this text describes.
    ///
    /// A promotion without an explicit piece matches the queen promotion.
    pub fn matches(&self, m: &Move) -> bool {
        if m.from != self.from || m.to != self.to {
            return false;
        }
        match (m.promotion(), self.promotion) {
            (None, None) => true,
            (Some(kind), None) => kind == PieceKind::Queen,
            (Some(kind), Some(wanted)) => kind == wanted,
            (None, Some(_)) => false,
        }
    }
}

impl FromStr for MoveText {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MoveText::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn white(kind: PieceKind) -> Piece {
        Piece::new(kind, Color::White)
    }

    #[test]
    fn move_coordinate() {
        let m = Move::new(
            sq("e2"),
            sq("e4"),
            white(PieceKind::Pawn),
            None,
            MoveFlag::DoublePush,
        );
        assert_eq!(m.to_coordinate(), "e2e4");

        let promo = Move::new(
            sq("e7"),
            sq("e8"),
            white(PieceKind::Pawn).moved(),
            None,
            MoveFlag::PromoteQueen,
        );
        assert_eq!(promo.to_coordinate(), "e7e8q");
        assert_eq!(promo.promotion(), Some(PieceKind::Queen));
    }

    #[test]
    fn castling_rook_relocation() {
        let king = white(PieceKind::King);
        let short = Move::new(sq("e1"), sq("g1"), king, None, MoveFlag::CastleKingside);
        assert_eq!(short.castling_rook(), Some((sq("h1"), sq("f1"))));
        let long = Move::new(sq("e1"), sq("c1"), king, None, MoveFlag::CastleQueenside);
        assert_eq!(long.castling_rook(), Some((sq("a1"), sq("d1"))));
        assert_eq!(long.describe(), "O-O-O");
    }

    #[test]
    fn en_passant_square_is_beside_the_mover() {
        let pawn = white(PieceKind::Pawn).moved();
        let victim = Piece::new(PieceKind::Pawn, Color::Black).moved();
        let m = Move::new(sq("e5"), sq("d6"), pawn, Some(victim), MoveFlag::EnPassant);
        assert_eq!(m.en_passant_square(), Some(sq("d5")));
        assert_eq!(m.describe(), "Pawn(E5->D6) e.p. x Pawn");
    }

    #[test]
    fn signature_ignores_has_moved_but_not_captures() {
        let knight = white(PieceKind::Knight);
        let a = Move::new(sq("g1"), sq("f3"), knight, None, MoveFlag::Normal);
        let b = Move::new(sq("g1"), sq("f3"), knight.moved(), None, MoveFlag::Normal);
        assert!(a.same_signature(&b));

        let pawn = Piece::new(PieceKind::Pawn, Color::Black);
        let c = Move::new(sq("g1"), sq("f3"), knight, Some(pawn), MoveFlag::Normal);
        assert!(!a.same_signature(&c));
        assert!(!c.same_signature(&c));
    }

    #[test]
    fn move_text_parse() {
        let text = MoveText::parse("e2e4").unwrap();
        assert_eq!(text.from, sq("e2"));
        assert_eq!(text.to, sq("e4"));
        assert_eq!(text.promotion, None);

        let promo: MoveText = "e7e8N".parse().unwrap();
        assert_eq!(promo.promotion, Some(PieceKind::Knight));

        assert!(MoveText::parse("e7e8k").is_err());
        assert!(MoveText::parse("e2").is_err());
        assert!(MoveText::parse("e2e4qq").is_err());
        assert!(MoveText::parse("e2e9").is_err());
    }

    #[test]
    fn move_text_matches_queen_by_default() {
        let pawn = white(PieceKind::Pawn).moved();
        let queen = Move::new(sq("a7"), sq("a8"), pawn, None, MoveFlag::PromoteQueen);
        let knight = Move::new(sq("a7"), sq("a8"), pawn, None, MoveFlag::PromoteKnight);
        let text = MoveText::parse("a7a8").unwrap();
        assert!(text.matches(&queen));
        assert!(!text.matches(&knight));
        assert!(MoveText::parse("a7a8n").unwrap().matches(&knight));
    }

    #[test]
    fn move_debug_display() {
        let m = Move::new(
            sq("g1"),
            sq("f3"),
            white(PieceKind::Knight),
            None,
            MoveFlag::Normal,
        );
        assert_eq!(format!("{:?}", m), "Move(g1f3)");
        assert_eq!(format!("{}", m), "g1f3");
        assert_eq!(m.describe(), "Knight(G1->F3)");
    }
}
