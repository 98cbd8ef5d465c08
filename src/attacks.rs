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

//! Attack detection: whether a square is attacked by a given side, and
//! whether a king is in check. Neither function knows about whose turn it
//! is to move, and neither considers en passant or castling, which are not
//! "attacks" in this sense.

use super::{
    board::Board,
    piece::{Piece, PieceType},
    square::Square,
    Color,
};

const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const KING_DELTAS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Whether `(row, col)` is attacked by a piece of color `by`, in `board`.
#[must_use]
pub fn is_square_attacked(board: &Board, row: u8, col: u8, by: Color) -> bool {
    let r = row as i8;
    let c = col as i8;

    let pawn_row_delta: i8 = match by {
        Color::White => 1,
        Color::Black => -1,
    };
    for dc in [-1i8, 1] {
        if let Some(sq) = Square::try_new(r + pawn_row_delta, c + dc) {
            if board.piece_at(sq) == Some(Piece::new(PieceType::Pawn, by)) {
                return true;
            }
        }
    }

    for (dr, dc) in KNIGHT_DELTAS {
        if let Some(sq) = Square::try_new(r + dr, c + dc) {
            if board.piece_at(sq) == Some(Piece::new(PieceType::Knight, by)) {
                return true;
            }
        }
    }

    for &(dr, dc) in &ROOK_DIRECTIONS {
        if sliding_attack_hits(board, r, c, dr, dc, by, PieceType::Rook) {
            return true;
        }
    }
    for &(dr, dc) in &BISHOP_DIRECTIONS {
        if sliding_attack_hits(board, r, c, dr, dc, by, PieceType::Bishop) {
            return true;
        }
    }

    for (dr, dc) in KING_DELTAS {
        if let Some(sq) = Square::try_new(r + dr, c + dc) {
            if board.piece_at(sq) == Some(Piece::new(PieceType::King, by)) {
                return true;
            }
        }
    }

    false
}

/// Walk one ray from `(r, c)` in direction `(dr, dc)`, returning true if the
/// first occupied square on it holds a `rook_like` piece type or a queen of
/// color `by`.
fn sliding_attack_hits(
    board: &Board,
    r: i8,
    c: i8,
    dr: i8,
    dc: i8,
    by: Color,
    rook_like: PieceType,
) -> bool {
    for i in 1..8i8 {
        match Square::try_new(r + dr * i, c + dc * i) {
            Some(sq) => match board.piece_at(sq) {
                None => continue,
                Some(piece) if piece.color == by && piece.piece_type == rook_like => return true,
                Some(piece) if piece.color == by && piece.piece_type == PieceType::Queen => {
                    return true
                }
                Some(_) => return false,
            },
            None => return false,
        }
    }
    false
}

/// Whether the king of color `king_color` is in check. Returns `false` if
/// that king is absent from the board (a degenerate, not-naturally-reachable
/// state).
#[must_use]
pub fn is_king_in_check(board: &Board, king_color: Color) -> bool {
    match board.king_square(king_color) {
        Some(sq) => is_square_attacked(board, sq.row, sq.col, !king_color),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_has_no_checks() {
        let board = Board::default();
        assert!(!is_king_in_check(&board, Color::White));
        assert!(!is_king_in_check(&board, Color::Black));
    }

    #[test]
    fn rook_on_open_file_checks_king() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/4K2r w - - 0 1").unwrap();
        assert!(is_square_attacked(&board, 7, 4, Color::Black));
    }

    #[test]
    fn blocked_rook_does_not_attack_through_piece() {
        let board = Board::from_fen("4k3/8/8/8/8/8/4P3/4K2r w - - 0 1").unwrap();
        assert!(!is_square_attacked(&board, 7, 4, Color::Black));
    }

    #[test]
    fn missing_king_is_not_in_check() {
        let board = Board::from_fen("8/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert!(!is_king_in_check(&board, Color::Black));
    }
}
