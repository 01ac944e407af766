//! Board square representation.

use crate::CoreError;
use std::fmt;

/// A square on the chess board, indexed 0-63.
///
/// Squares are addressed by `(row, col)` as seen from White's side of the
/// table: row 0 holds Black's back rank, row 7 holds White's back rank and
/// col 0 is the a-file.
/// - a8 = (0, 0), h8 = (0, 7)
/// - a1 = (7, 0), h1 = (7, 7)
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// Creates a square from row and column, or `None` if either is outside 0..8.
    #[inline]
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if row < 8 && col < 8 {
            Some(Square(row * 8 + col))
        } else {
            None
        }
    }

    /// Creates a square from signed coordinates, reporting out-of-range input.
    pub fn try_new(row: i32, col: i32) -> Result<Self, CoreError> {
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Ok(Square((row * 8 + col) as u8))
        } else {
            Err(CoreError::InvalidSquare { row, col })
        }
    }

    /// Parses a square from algebraic notation (e.g., "e4").
    pub fn from_algebraic(s: &str) -> Result<Self, CoreError> {
        let bytes = s.as_bytes();
        let invalid = || CoreError::InvalidAlgebraic(s.to_string());
        if bytes.len() != 2 {
            return Err(invalid());
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(invalid());
        }
        Ok(Square((b'8' - rank) * 8 + (file - b'a')))
    }

    /// Iterates over all 64 squares, row by row.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64u8).map(Square)
    }

    /// Returns the index (0-63).
    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Returns the row (0-7).
    #[inline]
    pub const fn row(self) -> u8 {
        self.0 / 8
    }

    /// Returns the column (0-7).
    #[inline]
    pub const fn col(self) -> u8 {
        self.0 % 8
    }

    /// Returns the square shifted by the given deltas, if it stays on the board.
    #[inline]
    pub const fn offset(self, d_row: i8, d_col: i8) -> Option<Square> {
        let row = self.row() as i8 + d_row;
        let col = self.col() as i8 + d_col;
        if row < 0 || row > 7 || col < 0 || col > 7 {
            None
        } else {
            Some(Square((row * 8 + col) as u8))
        }
    }

    /// Returns the same column on another row.
    #[inline]
    pub const fn with_row(self, row: u8) -> Square {
        Square(row * 8 + self.col())
    }

    /// Returns the same row on another column.
    #[inline]
    pub const fn with_col(self, col: u8) -> Square {
        Square(self.row() * 8 + col)
    }

    /// Manhattan distance between two squares.
    #[inline]
    pub const fn manhattan(self, other: Square) -> u8 {
        self.row().abs_diff(other.row()) + self.col().abs_diff(other.col())
    }

    /// Returns the algebraic notation for this square.
    pub fn to_algebraic(self) -> String {
        let file = (b'a' + self.col()) as char;
        let rank = (b'8' - self.row()) as char;
        format!("{}{}", file, rank)
    }

    /// The a8 corner, row 0 col 0.
    pub const A8: Square = Square(0);
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self.to_algebraic())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}
