/*
  Corvid, a UCI-compatible chess engine.
  Copyright (C) 2026 The Corvid Authors.

  Corvid is free software: you can redistribute it and/or modify
  it under the terms of the GNU General Public License as published by
  the Free Software Foundation, either version 3 of the License, or
  (at your option) any later version.

  Corvid is distributed in the hope that it will be useful,
  but WITHOUT ANY WARRANTY; without even the implied warranty of
  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
  GNU General Public License for more details.

  You should have received a copy of the GNU General Public License
  along with this program.  If not, see <http://www.gnu.org/licenses/>.
*/

//! Pieces, which carry both a type and a color.

use super::Color;
use std::fmt::{Display, Formatter, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// The type of a piece, independent of its color or square.
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceType {
    /// Material value of this piece type, in centipawns.
    #[must_use]
    pub const fn material_value(self) -> i32 {
        match self {
            PieceType::Pawn => 100,
            PieceType::Knight => 320,
            PieceType::Bishop => 330,
            PieceType::Rook => 500,
            PieceType::Queen => 900,
            PieceType::King => 20_000,
        }
    }

    /// Compressed value used by MVV-LVA move ordering, where the gap between
    /// pieces matters less than their relative order.
    #[must_use]
    pub const fn mvv_lva_value(self) -> i32 {
        match self {
            PieceType::Pawn => 1,
            PieceType::Knight | PieceType::Bishop => 3,
            PieceType::Rook => 5,
            PieceType::Queen => 9,
            PieceType::King => 10,
        }
    }

    /// The uppercase FEN letter for this piece type.
    #[must_use]
    pub const fn to_fen_char(self) -> char {
        match self {
            PieceType::Pawn => 'P',
            PieceType::Knight => 'N',
            PieceType::Bishop => 'B',
            PieceType::Rook => 'R',
            PieceType::Queen => 'Q',
            PieceType::King => 'K',
        }
    }

    /// Parse a piece type from its uppercase FEN letter.
    #[must_use]
    pub const fn from_fen_char(c: char) -> Option<PieceType> {
        match c {
            'P' => Some(PieceType::Pawn),
            'N' => Some(PieceType::Knight),
            'B' => Some(PieceType::Bishop),
            'R' => Some(PieceType::Rook),
            'Q' => Some(PieceType::Queen),
            'K' => Some(PieceType::King),
            _ => None,
        }
    }

    /// Parse a promotion piece type from its lowercase UCI letter
    /// (`q`, `r`, `b`, `n`).
    #[must_use]
    pub const fn from_uci_promo_char(c: char) -> Option<PieceType> {
        match c {
            'q' => Some(PieceType::Queen),
            'r' => Some(PieceType::Rook),
            'b' => Some(PieceType::Bishop),
            'n' => Some(PieceType::Knight),
            _ => None,
        }
    }

    /// The lowercase UCI letter for this piece type, when used as a
    /// promotion.
    #[must_use]
    pub const fn to_uci_promo_char(self) -> char {
        match self {
            PieceType::Queen => 'q',
            PieceType::Rook => 'r',
            PieceType::Bishop => 'b',
            PieceType::Knight => 'n',
            PieceType::Pawn | PieceType::King => 'q',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// A piece on the board: a type paired with the color that owns it.
pub struct Piece {
    pub piece_type: PieceType,
    pub color: Color,
}

impl Piece {
    #[must_use]
    pub const fn new(piece_type: PieceType, color: Color) -> Piece {
        Piece { piece_type, color }
    }

    /// FEN character for this piece: uppercase for white, lowercase for
    /// black.
    #[must_use]
    pub fn to_fen_char(self) -> char {
        let c = self.piece_type.to_fen_char();
        match self.color {
            Color::White => c,
            Color::Black => c.to_ascii_lowercase(),
        }
    }

    /// Parse a piece from its FEN character, inferring color from case.
    #[must_use]
    pub fn from_fen_char(c: char) -> Option<Piece> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        PieceType::from_fen_char(c.to_ascii_uppercase()).map(|piece_type| Piece::new(piece_type, color))
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.to_fen_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fen_char_round_trip() {
        for &pt in &[
            PieceType::Pawn,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Rook,
            PieceType::Queen,
            PieceType::King,
        ] {
            for &color in &[Color::White, Color::Black] {
                let piece = Piece::new(pt, color);
                let parsed = Piece::from_fen_char(piece.to_fen_char()).unwrap();
                assert_eq!(piece, parsed);
            }
        }
    }

    #[test]
    fn white_is_uppercase() {
        assert_eq!(Piece::new(PieceType::Knight, Color::White).to_fen_char(), 'N');
        assert_eq!(Piece::new(PieceType::Knight, Color::Black).to_fen_char(), 'n');
    }
}
