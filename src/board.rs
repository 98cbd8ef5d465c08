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

//! The board state: an 8x8 grid of pieces plus the metadata (side to move,
//! castling rights, en passant target, clocks, repetition history) needed
//! to generate and apply moves correctly.

use super::{
    moves::Move,
    piece::{Piece, PieceType},
    square::Square,
    zobrist, Color,
};
use nohash_hasher::IntMap;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Index of a castling right in the order white king-side, white
/// queen-side, black king-side, black queen-side, matching the layout of
/// [`zobrist::castle_key`].
const WHITE_KING_SIDE: usize = 0;
const WHITE_QUEEN_SIDE: usize = 1;
const BLACK_KING_SIDE: usize = 2;
const BLACK_QUEEN_SIDE: usize = 3;

#[derive(Clone, Debug)]
/// A complete, self-contained chess position.
///
/// `Board` is deliberately cheap to clone and carries its own repetition
/// history, so the search can work with plain owned copies instead of
/// mutating and unmaking moves.
pub struct Board {
    grid: [[Option<Piece>; 8]; 8],
    pub side_to_move: Color,
    pub white_king_side: bool,
    pub white_queen_side: bool,
    pub black_king_side: bool,
    pub black_queen_side: bool,
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    /// The Zobrist fingerprint of the current position: grid, side to move,
    /// castling rights, and en passant target, but not the clocks.
    pub hash: u64,
    /// How many times each position (keyed by [`Board::hash`]) has been
    /// reached so far in this game, used for threefold-repetition
    /// detection.
    pub position_counts: IntMap<u64, u32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Reasons a FEN string could not be parsed.
pub enum FenError {
    WrongFieldCount,
    BadPlacement,
    BadSideToMove,
    BadCastling,
    BadEnPassant,
    BadClock,
}

impl Display for FenError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let msg = match self {
            FenError::WrongFieldCount => "FEN does not have the expected number of fields",
            FenError::BadPlacement => "FEN piece-placement field is malformed",
            FenError::BadSideToMove => "FEN side-to-move field must be `w` or `b`",
            FenError::BadCastling => "FEN castling-rights field is malformed",
            FenError::BadEnPassant => "FEN en-passant field is malformed",
            FenError::BadClock => "FEN clock field is not a valid number",
        };
        write!(f, "{msg}")
    }
}

impl std::error::Error for FenError {}

impl Board {
    /// Recompute this board's Zobrist hash from scratch. Used after bulk
    /// construction (e.g. FEN parsing); incremental updates during move
    /// application avoid calling this.
    fn recompute_hash(&mut self) {
        let mut hash = 0u64;
        for row in 0..8u8 {
            for col in 0..8u8 {
                if let Some(piece) = self.grid[row as usize][col as usize] {
                    let index = row as usize * 8 + col as usize;
                    hash ^= zobrist::piece_square_key(piece.piece_type, piece.color, index);
                }
            }
        }
        if self.white_king_side {
            hash ^= zobrist::castle_key(WHITE_KING_SIDE);
        }
        if self.white_queen_side {
            hash ^= zobrist::castle_key(WHITE_QUEEN_SIDE);
        }
        if self.black_king_side {
            hash ^= zobrist::castle_key(BLACK_KING_SIDE);
        }
        if self.black_queen_side {
            hash ^= zobrist::castle_key(BLACK_QUEEN_SIDE);
        }
        if let Some(ep) = self.en_passant {
            hash ^= zobrist::en_passant_key(ep.col as usize);
        }
        if self.side_to_move == Color::Black {
            hash ^= zobrist::black_to_move_key();
        }
        self.hash = hash;
    }

    fn record_current_position(&mut self) {
        *self.position_counts.entry(self.hash).or_insert(0) += 1;
    }

    /// How many times the current position has occurred so far, including
    /// the present occurrence.
    #[must_use]
    pub fn repetition_count(&self) -> u32 {
        *self.position_counts.get(&self.hash).unwrap_or(&0)
    }

    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.grid[sq.row as usize][sq.col as usize]
    }

    fn set_piece_at(&mut self, sq: Square, piece: Option<Piece>) {
        self.grid[sq.row as usize][sq.col as usize] = piece;
    }

    /// Locate the king of the given color, if it's on the board. A search
    /// state is only ever missing a king if the root position was already
    /// malformed; callers treat that as "not in check" rather than
    /// panicking.
    #[must_use]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        for row in 0..8u8 {
            for col in 0..8u8 {
                if self.grid[row as usize][col as usize]
                    == Some(Piece::new(PieceType::King, color))
                {
                    return Some(Square::new(row, col));
                }
            }
        }
        None
    }

    /// Iterate over every occupied square and its piece.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        (0..8u8).flat_map(move |row| {
            (0..8u8).filter_map(move |col| {
                self.grid[row as usize][col as usize].map(|p| (Square::new(row, col), p))
            })
        })
    }

    /// Apply a move, producing the resulting position. Updates the grid,
    /// castling rights, en-passant target, side to move, the halfmove clock,
    /// the fullmove number, the Zobrist hash, and the repetition-count map.
    ///
    /// This assumes `mv` is at least pseudo-legal in `self`; legality
    /// (whether it leaves the mover's own king in check) is the caller's
    /// responsibility, checked by trial-applying exactly this function.
    #[must_use]
    pub fn make_move(&self, mv: &Move) -> Board {
        let mut next = self.clone();

        let piece = self.piece_at(mv.from).expect("move source square is empty");
        let captured = self.piece_at(mv.to);
        let is_pawn_move = piece.piece_type == PieceType::Pawn;
        let is_capture = captured.is_some() || mv.is_en_passant;

        next.set_piece_at(mv.to, Some(piece));
        next.set_piece_at(mv.from, None);

        if let Some(promotion) = mv.promotion {
            next.set_piece_at(mv.to, Some(Piece::new(promotion, piece.color)));
        } else if mv.is_king_castle {
            let row = mv.from.row;
            let rook = next.piece_at(Square::new(row, 7));
            next.set_piece_at(Square::new(row, 5), rook);
            next.set_piece_at(Square::new(row, 7), None);
        } else if mv.is_queen_castle {
            let row = mv.from.row;
            let rook = next.piece_at(Square::new(row, 0));
            next.set_piece_at(Square::new(row, 3), rook);
            next.set_piece_at(Square::new(row, 0), None);
        } else if mv.is_en_passant {
            let captured_row = match piece.color {
                Color::White => mv.to.row + 1,
                Color::Black => mv.to.row - 1,
            };
            next.set_piece_at(Square::new(captured_row, mv.to.col), None);
        }

        next.en_passant = None;
        if is_pawn_move && mv.to.row.abs_diff(mv.from.row) == 2 {
            let skipped_row = (mv.from.row + mv.to.row) / 2;
            next.en_passant = Some(Square::new(skipped_row, mv.from.col));
        }

        match piece.piece_type {
            PieceType::King => match piece.color {
                Color::White => {
                    next.white_king_side = false;
                    next.white_queen_side = false;
                }
                Color::Black => {
                    next.black_king_side = false;
                    next.black_queen_side = false;
                }
            },
            PieceType::Rook => match (piece.color, mv.from.row, mv.from.col) {
                (Color::White, 7, 0) => next.white_queen_side = false,
                (Color::White, 7, 7) => next.white_king_side = false,
                (Color::Black, 0, 0) => next.black_queen_side = false,
                (Color::Black, 0, 7) => next.black_king_side = false,
                _ => {}
            },
            _ => {}
        }
        if let Some(captured) = captured {
            if captured.piece_type == PieceType::Rook {
                match (captured.color, mv.to.row, mv.to.col) {
                    (Color::White, 7, 0) => next.white_queen_side = false,
                    (Color::White, 7, 7) => next.white_king_side = false,
                    (Color::Black, 0, 0) => next.black_queen_side = false,
                    (Color::Black, 0, 7) => next.black_king_side = false,
                    _ => {}
                }
            }
        }

        next.side_to_move = !self.side_to_move;
        next.halfmove_clock = if is_pawn_move || is_capture {
            0
        } else {
            self.halfmove_clock + 1
        };
        if self.side_to_move == Color::Black {
            next.fullmove_number += 1;
        }

        next.recompute_hash();
        next.record_current_position();
        next
    }

    /// Parse a position from the standard six-field FEN representation.
    /// Missing halfmove/fullmove fields default to 0 and 1 respectively.
    ///
    /// # Errors
    /// Returns [`FenError`] if any field is malformed.
    pub fn from_fen(fen: &str) -> Result<Board, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(FenError::WrongFieldCount);
        }

        let mut grid = [[None; 8]; 8];
        let mut row = 0usize;
        let mut col = 0usize;
        for c in fields[0].chars() {
            if c == '/' {
                row += 1;
                col = 0;
                if row >= 8 {
                    return Err(FenError::BadPlacement);
                }
            } else if let Some(skip) = c.to_digit(10) {
                col += skip as usize;
                if col > 8 {
                    return Err(FenError::BadPlacement);
                }
            } else {
                let piece = Piece::from_fen_char(c).ok_or(FenError::BadPlacement)?;
                if col >= 8 {
                    return Err(FenError::BadPlacement);
                }
                grid[row][col] = Some(piece);
                col += 1;
            }
        }

        let side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(FenError::BadSideToMove),
        };

        let castling = fields[2];
        if castling != "-" && !castling.chars().all(|c| "KQkq".contains(c)) {
            return Err(FenError::BadCastling);
        }
        let white_king_side = castling.contains('K');
        let white_queen_side = castling.contains('Q');
        let black_king_side = castling.contains('k');
        let black_queen_side = castling.contains('q');

        let en_passant = match fields[3] {
            "-" => None,
            s => Some(Square::from_uci(s).ok_or(FenError::BadEnPassant)?),
        };

        let halfmove_clock = fields
            .get(4)
            .map(|s| s.parse::<u32>().map_err(|_| FenError::BadClock))
            .transpose()?
            .unwrap_or(0);
        let fullmove_number = fields
            .get(5)
            .map(|s| s.parse::<u32>().map_err(|_| FenError::BadClock))
            .transpose()?
            .unwrap_or(1);

        let mut board = Board {
            grid,
            side_to_move,
            white_king_side,
            white_queen_side,
            black_king_side,
            black_queen_side,
            en_passant,
            halfmove_clock,
            fullmove_number,
            hash: 0,
            position_counts: IntMap::default(),
        };
        board.recompute_hash();
        board.record_current_position();
        Ok(board)
    }

    /// Serialize this position to the standard six-field FEN form.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut placement = String::new();
        for row in 0..8 {
            let mut empty_run = 0;
            for col in 0..8 {
                match self.grid[row][col] {
                    Some(piece) => {
                        if empty_run > 0 {
                            placement.push_str(&empty_run.to_string());
                            empty_run = 0;
                        }
                        placement.push(piece.to_fen_char());
                    }
                    None => empty_run += 1,
                }
            }
            if empty_run > 0 {
                placement.push_str(&empty_run.to_string());
            }
            if row != 7 {
                placement.push('/');
            }
        }

        let side = match self.side_to_move {
            Color::White => "w",
            Color::Black => "b",
        };

        let mut castling = String::new();
        if self.white_king_side {
            castling.push('K');
        }
        if self.white_queen_side {
            castling.push('Q');
        }
        if self.black_king_side {
            castling.push('k');
        }
        if self.black_queen_side {
            castling.push('q');
        }
        if castling.is_empty() {
            castling.push('-');
        }

        let ep = self.en_passant.map_or_else(|| "-".to_string(), Square::to_uci);

        format!(
            "{placement} {side} {castling} {ep} {} {}",
            self.halfmove_clock, self.fullmove_number
        )
    }
}

impl Default for Board {
    /// The standard chess starting position.
    fn default() -> Board {
        Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
            .expect("starting position FEN is well-formed")
    }
}

impl PartialEq for Board {
    /// Two boards are equal iff their Zobrist hashes agree, which covers
    /// everything the Position Key is defined over (grid, side to move,
    /// castling rights, en passant target) but intentionally ignores the
    /// clocks and repetition history.
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for Board {}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.to_fen())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_fen_round_trips() {
        let board = Board::default();
        assert_eq!(
            board.to_fen(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
        );
    }

    #[test]
    fn king_square_found_for_both_colors() {
        let board = Board::default();
        assert_eq!(board.king_square(Color::White), Some(Square::new(7, 4)));
        assert_eq!(board.king_square(Color::Black), Some(Square::new(0, 4)));
    }

    #[test]
    fn pawn_double_push_sets_en_passant_target() {
        let board = Board::default();
        let mv = Move::quiet(Square::new(6, 4), Square::new(4, 4));
        let next = board.make_move(&mv);
        assert_eq!(next.en_passant, Some(Square::new(5, 4)));
    }

    #[test]
    fn quiet_move_increments_halfmove_clock() {
        let board = Board::from_fen("8/8/8/8/8/8/4K3/4k3 w - - 3 10").unwrap();
        let mv = Move::quiet(Square::new(6, 4), Square::new(6, 5));
        let next = board.make_move(&mv);
        assert_eq!(next.halfmove_clock, 4);
    }

    #[test]
    fn capture_resets_halfmove_clock() {
        let board = Board::from_fen("8/8/8/8/3p4/8/4K3/4k3 w - - 7 10").unwrap();
        let mv = Move::quiet(Square::new(6, 4), Square::new(4, 3));
        let next = board.make_move(&mv);
        assert_eq!(next.halfmove_clock, 0);
    }

    #[test]
    fn repeated_position_increments_count() {
        let mut board = Board::default();
        let nf3 = Move::quiet(Square::new(7, 6), Square::new(5, 5));
        let nf6 = Move::quiet(Square::new(0, 6), Square::new(2, 5));
        let ng1 = Move::quiet(Square::new(5, 5), Square::new(7, 6));
        let ng8 = Move::quiet(Square::new(2, 5), Square::new(0, 6));
        board = board.make_move(&nf3).make_move(&nf6).make_move(&ng1).make_move(&ng8);
        assert_eq!(board.repetition_count(), 2);
    }

    #[test]
    fn rejects_malformed_fen() {
        assert_eq!(Board::from_fen("not a fen"), Err(FenError::WrongFieldCount));
    }
}
