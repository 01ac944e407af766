//! Piece-placement text parsing and serialization.
//!
//! The placement text is the first field of a FEN record
//! (`rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR`), listed from row 0
//! (Black's back rank) down to row 7. Side to move, castling rights and
//! clocks are not part of it: the engine derives those from move history.

use crate::{Color, CoreError, PieceKind, Square};
use std::fmt;

/// A parsed grid of piece types and colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    cells: [[Option<(PieceKind, Color)>; 8]; 8],
}

impl Placement {
    /// The standard starting placement.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

    /// Parses placement text.
    pub fn parse(text: &str) -> Result<Self, CoreError> {
        let rows: Vec<&str> = text.trim().split('/').collect();
        if rows.len() != 8 {
            return Err(CoreError::InvalidPlacement(format!(
                "expected 8 rows, got {}",
                rows.len()
            )));
        }

        let mut cells = [[None; 8]; 8];
        for (row, row_text) in rows.iter().enumerate() {
            let mut col = 0u32;
            for c in row_text.chars() {
                if let Some(run) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                    col += run;
                } else if let Some(piece) = PieceKind::from_char(c) {
                    if col < 8 {
                        cells[row][col as usize] = Some(piece);
                    }
                    col += 1;
                } else {
                    return Err(CoreError::InvalidPlacement(format!(
                        "invalid character '{}' in row {}",
                        c, row
                    )));
                }
            }
            if col != 8 {
                return Err(CoreError::InvalidPlacement(format!(
                    "row {} has {} squares, expected 8",
                    row, col
                )));
            }
        }

        Ok(Placement { cells })
    }

    /// Returns the piece type and color at a square, if any.
    #[inline]
    pub fn get(&self, sq: Square) -> Option<(PieceKind, Color)> {
        self.cells[sq.row() as usize][sq.col() as usize]
    }

    /// Iterates over occupied squares.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, PieceKind, Color)> + '_ {
        Square::all().filter_map(|sq| self.get(sq).map(|(kind, color)| (sq, kind, color)))
    }

    /// Builds a placement from a cell lookup.
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(Square) -> Option<(PieceKind, Color)>,
    {
        let mut cells = [[None; 8]; 8];
        for sq in Square::all() {
            cells[sq.row() as usize][sq.col() as usize] = f(sq);
        }
        Placement { cells }
    }
}

impl Default for Placement {
    /// The standard starting placement.
    fn default() -> Self {
        Self::from_fn(|sq| {
            let kind = match sq.row() {
                0 | 7 => PieceKind::BACK_RANK[sq.col() as usize],
                1 | 6 => PieceKind::Pawn,
                _ => return None,
            };
            let color = if sq.row() < 4 { Color::Black } else { Color::White };
            Some((kind, color))
        })
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.cells.iter().enumerate() {
            let mut empty = 0;
            for cell in cells {
                match cell {
                    Some((kind, color)) => {
                        if empty > 0 {
                            write!(f, "{}", empty)?;
                            empty = 0;
                        }
                        write!(f, "{}", kind.to_char(*color))?;
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                write!(f, "{}", empty)?;
            }
            if row < 7 {
                write!(f, "/")?;
            }
        }
        Ok(())
    }
}
