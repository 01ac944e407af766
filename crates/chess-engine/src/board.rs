//! Board representation.

use chess_core::{Color, CoreError, Move, Piece, PieceKind, Placement, Square};
use std::fmt;

/// An 8x8 grid of optional pieces.
///
/// The board is plain data: copying it is cheap, which is how search nodes
/// get their own scratch boards. It does not know whose turn it is; that
/// follows from the length of the move history it was derived from.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Option<Piece>; 64],
}

impl Board {
    /// Creates an empty board.
    pub const fn empty() -> Self {
        Board { cells: [None; 64] }
    }

    /// Creates the standard starting position.
    pub fn initial() -> Self {
        let mut board = Board::empty();
        for color in Color::ALL {
            for (col, kind) in PieceKind::BACK_RANK.iter().enumerate() {
                board.put(back_square(color, col as u8), Piece::new(*kind, color));
                board.put(
                    back_square(color, col as u8).with_row(color.pawn_row()),
                    Piece::new(PieceKind::Pawn, color),
                );
            }
        }
        board
    }

    /// Builds a board from piece-placement text.
    ///
    /// A piece counts as unmoved when it stands where a piece of the same
    /// type and color starts the game, so castling and double pushes are
    /// available exactly from the home squares.
    pub fn from_placement(text: &str) -> Result<Self, CoreError> {
        let placement = Placement::parse(text)?;
        let start = Board::initial();
        let mut board = Board::empty();
        for (sq, kind, color) in placement.occupied() {
            let piece = Piece::new(kind, color);
            let at_home = start
                .piece_at(sq)
                .is_some_and(|home| home.is(kind, color));
            board.put(sq, if at_home { piece } else { piece.moved() });
        }
        Ok(board)
    }

    /// Reconstructs the board by replaying a move history from the start.
    pub fn replay(history: &[Move]) -> Self {
        let mut board = Board::initial();
        for m in history {
            board.apply(m);
        }
        board
    }

    /// Returns the piece-placement text for this board.
    pub fn placement(&self) -> Placement {
        Placement::from_fn(|sq| self.piece_at(sq).map(|p| (p.kind, p.color)))
    }

    /// Returns the piece at the given square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.cells[sq.index() as usize]
    }

    /// Returns true if the square is empty.
    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.cells[sq.index() as usize].is_none()
    }

    /// Places a piece, replacing whatever stood there.
    #[inline]
    pub fn put(&mut self, sq: Square, piece: Piece) {
        self.cells[sq.index() as usize] = Some(piece);
    }

    /// Removes and returns the piece on a square.
    #[inline]
    pub fn take(&mut self, sq: Square) -> Option<Piece> {
        self.cells[sq.index() as usize].take()
    }

    /// Sets a square's contents directly.
    #[inline]
    pub fn set(&mut self, sq: Square, piece: Option<Piece>) {
        self.cells[sq.index() as usize] = piece;
    }

    /// Iterates over all occupied squares.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    /// Iterates over the squares holding pieces of one color.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.color == color)
    }

    /// Finds the king of the given color by scanning the board.
    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|(_, p)| p.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    /// Sum of the material values of one color's pieces.
    pub fn material(&self, color: Color) -> i32 {
        self.pieces_of(color).map(|(_, p)| p.value()).sum()
    }

    /// Applies a move.
    ///
    /// The move is trusted: it is expected to come from the move generator
    /// or a history of such moves. A pawn reaching the last row without a
    /// promotion flag becomes a queen.
    pub fn apply(&mut self, m: &Move) {
        self.take(m.from);

        if let Some(ep) = m.en_passant_square() {
            self.take(ep);
        }

        let landed = match m.promotion() {
            Some(kind) => Piece::new(kind, m.color()).moved(),
            None if m.piece.kind == PieceKind::Pawn
                && m.to.row() == m.color().promotion_row() =>
            {
                Piece::new(PieceKind::Queen, m.color()).moved()
            }
            None => m.piece.moved(),
        };
        self.put(m.to, landed);

        if let Some((rook_from, rook_to)) = m.castling_rook() {
            if let Some(rook) = self.take(rook_from) {
                self.put(rook_to, rook.moved());
            }
        }
    }

    /// Reverses a move previously applied to this board.
    pub fn unapply(&mut self, m: &Move) {
        self.take(m.to);
        self.put(m.from, m.piece);

        match m.en_passant_square() {
            Some(ep) => self.set(ep, m.captured),
            None => self.set(m.to, m.captured),
        }

        if let Some((rook_from, rook_to)) = m.castling_rook() {
            if let Some(rook) = self.take(rook_to) {
                self.put(rook_from, Piece::new(rook.kind, rook.color));
            }
        }
    }

    /// Returns a copy of the board with the move applied.
    #[inline]
    pub fn after(&self, m: &Move) -> Board {
        let mut next = *self;
        next.apply(m);
        next
    }
}

fn back_square(color: Color, col: u8) -> Square {
    match Square::new(color.back_rank(), col) {
        Some(sq) => sq,
        None => unreachable!("back rank and column are in range"),
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8u8 {
            write!(f, "{} ", 8 - row)?;
            for col in 0..8u8 {
                let c = Square::new(row, col)
                    .and_then(|sq| self.piece_at(sq))
                    .map_or('.', |p| p.to_char());
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "  abcdefgh")
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", self.placement())
    }
}
