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

//! A `Move` identifies a source and destination square plus whatever
//! special handling applying it requires: promotion, castling, en passant.

use super::{PieceType, Square};
use std::fmt::{Display, Formatter, Result as FmtResult};

#[derive(Clone, Copy, Debug)]
/// A single move from one square to another.
///
/// Equality and ordering intentionally ignore `score`, which is scratch
/// space for move ordering heuristics, not part of the move's identity.
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceType>,
    pub is_king_castle: bool,
    pub is_queen_castle: bool,
    pub is_en_passant: bool,
    /// Heuristic ordering score, filled in by [`crate::order_moves`]. Not
    /// part of the move's identity.
    pub score: i32,
}

impl Move {
    #[must_use]
    pub const fn quiet(from: Square, to: Square) -> Move {
        Move {
            from,
            to,
            promotion: None,
            is_king_castle: false,
            is_queen_castle: false,
            is_en_passant: false,
            score: 0,
        }
    }

    #[must_use]
    pub const fn promoting(from: Square, to: Square, promotion: PieceType) -> Move {
        Move {
            from,
            to,
            promotion: Some(promotion),
            is_king_castle: false,
            is_queen_castle: false,
            is_en_passant: false,
            score: 0,
        }
    }

    #[must_use]
    pub const fn castling(from: Square, to: Square, king_side: bool) -> Move {
        Move {
            from,
            to,
            promotion: None,
            is_king_castle: king_side,
            is_queen_castle: !king_side,
            is_en_passant: false,
            score: 0,
        }
    }

    #[must_use]
    pub const fn en_passant(from: Square, to: Square) -> Move {
        Move {
            from,
            to,
            promotion: None,
            is_king_castle: false,
            is_queen_castle: false,
            is_en_passant: true,
            score: 0,
        }
    }

    /// Render this move in UCI notation, e.g. `"e2e4"` or `"a7a8q"`.
    #[must_use]
    pub fn to_uci(self) -> String {
        let mut s = format!("{}{}", self.from, self.to);
        if let Some(promo) = self.promotion {
            s.push(promo.to_uci_promo_char());
        }
        s
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from
            && self.to == other.to
            && self.promotion == other.promotion
            && self.is_king_castle == other.is_king_castle
            && self.is_queen_castle == other.is_queen_castle
            && self.is_en_passant == other.is_en_passant
    }
}

impl Eq for Move {}

impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.to_uci())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Reasons a UCI move token could not be parsed into coordinates.
pub enum UciMoveError {
    /// The token was shorter than the minimum `"e2e4"` length.
    TooShort,
    /// A square component did not parse, e.g. `"i9"`.
    BadSquare,
    /// The fifth character was not one of `q`, `r`, `b`, `n`.
    BadPromotion,
}

impl Display for UciMoveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let msg = match self {
            UciMoveError::TooShort => "move token too short",
            UciMoveError::BadSquare => "move token names an off-board square",
            UciMoveError::BadPromotion => "unrecognized promotion letter",
        };
        write!(f, "{msg}")
    }
}

impl std::error::Error for UciMoveError {}

/// Parse the `from`/`to`/promotion coordinates out of a raw UCI move token.
/// This does not know about castling or en passant: it is matched up
/// against the legal move list by the caller, which fills in those flags
/// from whichever legal move shares these coordinates.
///
/// # Errors
/// Returns [`UciMoveError`] if the token is malformed.
pub fn parse_uci_coords(
    token: &str,
) -> std::result::Result<(Square, Square, Option<PieceType>), UciMoveError> {
    if token.len() < 4 {
        return Err(UciMoveError::TooShort);
    }
    let from = Square::from_uci(&token[0..2]).ok_or(UciMoveError::BadSquare)?;
    let to = Square::from_uci(&token[2..4]).ok_or(UciMoveError::BadSquare)?;
    let promotion = match token.len() {
        4 => None,
        5 => {
            let c = token.as_bytes()[4] as char;
            Some(PieceType::from_uci_promo_char(c).ok_or(UciMoveError::BadPromotion)?)
        }
        _ => return Err(UciMoveError::BadPromotion),
    };
    Ok((from, to, promotion))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uci_round_trip_for_quiet_move() {
        let m = Move::quiet(Square::new(6, 4), Square::new(4, 4));
        assert_eq!(m.to_uci(), "e2e4");
    }

    #[test]
    fn uci_round_trip_for_promotion() {
        let m = Move::promoting(Square::new(1, 0), Square::new(0, 0), PieceType::Queen);
        assert_eq!(m.to_uci(), "a7a8q");
    }

    #[test]
    fn equality_ignores_score() {
        let mut a = Move::quiet(Square::new(6, 4), Square::new(4, 4));
        let b = Move::quiet(Square::new(6, 4), Square::new(4, 4));
        a.score = 500;
        assert_eq!(a, b);
    }

    #[test]
    fn parse_rejects_short_tokens() {
        assert_eq!(parse_uci_coords("e2e"), Err(UciMoveError::TooShort));
    }

    #[test]
    fn parse_rejects_bad_promotion() {
        assert_eq!(
            parse_uci_coords("a7a8x"),
            Err(UciMoveError::BadPromotion)
        );
    }
}
