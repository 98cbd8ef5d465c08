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

//! Pseudo-legal and legal move generation.
//!
//! Pseudo-legal moves obey piece-movement rules but may leave the mover's
//! own king in check; [`generate_legal`] filters those out by trial-applying
//! each move and checking the result, which is simple to get right at the
//! cost of speed that doesn't matter at this engine's scale.

use super::{
    attacks::{is_king_in_check, is_square_attacked},
    board::Board,
    moves::Move,
    piece::PieceType,
    square::Square,
    Color,
};

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
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

/// Generate every move legal by piece-movement rules, ignoring whether it
/// leaves the mover's own king in check. When `captures_only` is set, only
/// captures (and capture-promotions) are produced; castling and other quiet
/// moves are suppressed.
#[must_use]
pub fn generate_pseudo_legal(board: &Board, captures_only: bool) -> Vec<Move> {
    let mut moves = Vec::new();
    let side = board.side_to_move;

    for (sq, piece) in board.pieces() {
        if piece.color != side {
            continue;
        }
        match piece.piece_type {
            PieceType::Pawn => generate_pawn_moves(board, sq, &mut moves, captures_only),
            PieceType::Knight => {
                generate_stepping_moves(board, sq, &KNIGHT_DELTAS, side, &mut moves, captures_only)
            }
            PieceType::Bishop => generate_sliding_moves(
                board,
                sq,
                &BISHOP_DIRECTIONS,
                side,
                &mut moves,
                captures_only,
            ),
            PieceType::Rook => generate_sliding_moves(
                board,
                sq,
                &ROOK_DIRECTIONS,
                side,
                &mut moves,
                captures_only,
            ),
            PieceType::Queen => {
                generate_sliding_moves(
                    board,
                    sq,
                    &ROOK_DIRECTIONS,
                    side,
                    &mut moves,
                    captures_only,
                );
                generate_sliding_moves(
                    board,
                    sq,
                    &BISHOP_DIRECTIONS,
                    side,
                    &mut moves,
                    captures_only,
                );
            }
            PieceType::King => {
                generate_stepping_moves(board, sq, &KING_DELTAS, side, &mut moves, captures_only);
                if !captures_only {
                    generate_castling_moves(board, side, &mut moves);
                }
            }
        }
    }

    moves
}

fn can_land_on(board: &Board, sq: Square, side: Color) -> bool {
    board.piece_at(sq).map_or(true, |p| p.color != side)
}

fn generate_stepping_moves(
    board: &Board,
    from: Square,
    deltas: &[(i8, i8)],
    side: Color,
    moves: &mut Vec<Move>,
    captures_only: bool,
) {
    for &(dr, dc) in deltas {
        let Some(to) = Square::try_new(from.row as i8 + dr, from.col as i8 + dc) else {
            continue;
        };
        let is_capture = board.piece_at(to).is_some();
        if captures_only && !is_capture {
            continue;
        }
        if can_land_on(board, to, side) {
            moves.push(Move::quiet(from, to));
        }
    }
}

fn generate_sliding_moves(
    board: &Board,
    from: Square,
    directions: &[(i8, i8)],
    side: Color,
    moves: &mut Vec<Move>,
    captures_only: bool,
) {
    for &(dr, dc) in directions {
        for i in 1..8i8 {
            let Some(to) = Square::try_new(from.row as i8 + dr * i, from.col as i8 + dc * i)
            else {
                break;
            };
            match board.piece_at(to) {
                None => {
                    if !captures_only {
                        moves.push(Move::quiet(from, to));
                    }
                }
                Some(piece) => {
                    if piece.color != side {
                        moves.push(Move::quiet(from, to));
                    }
                    break;
                }
            }
        }
    }
}

const PROMOTION_PIECES: [PieceType; 4] = [
    PieceType::Queen,
    PieceType::Rook,
    PieceType::Bishop,
    PieceType::Knight,
];

fn generate_pawn_moves(board: &Board, from: Square, moves: &mut Vec<Move>, captures_only: bool) {
    let side = board.side_to_move;
    let direction = side.pawn_direction();
    let promotion_row = side.promotion_row();
    let start_row = side.pawn_start_row();

    if !captures_only {
        if let Some(one_ahead) = Square::try_new(from.row as i8 + direction, from.col as i8) {
            if board.piece_at(one_ahead).is_none() {
                push_pawn_move(from, one_ahead, promotion_row, moves);
                if from.row == start_row {
                    if let Some(two_ahead) =
                        Square::try_new(from.row as i8 + 2 * direction, from.col as i8)
                    {
                        if board.piece_at(two_ahead).is_none() {
                            moves.push(Move::quiet(from, two_ahead));
                        }
                    }
                }
            }
        }
    }

    for dc in [-1i8, 1] {
        let Some(to) = Square::try_new(from.row as i8 + direction, from.col as i8 + dc) else {
            continue;
        };
        match board.piece_at(to) {
            Some(target) if target.color != side => push_pawn_move(from, to, promotion_row, moves),
            _ => {}
        }
        if board.en_passant == Some(to) && board.piece_at(to).is_none() {
            moves.push(Move::en_passant(from, to));
        }
    }
}

fn push_pawn_move(from: Square, to: Square, promotion_row: u8, moves: &mut Vec<Move>) {
    if to.row == promotion_row {
        for promo in PROMOTION_PIECES {
            moves.push(Move::promoting(from, to, promo));
        }
    } else {
        moves.push(Move::quiet(from, to));
    }
}

fn generate_castling_moves(board: &Board, side: Color, moves: &mut Vec<Move>) {
    let row = side.back_rank();
    let (king_side_right, queen_side_right) = match side {
        Color::White => (board.white_king_side, board.white_queen_side),
        Color::Black => (board.black_king_side, board.black_queen_side),
    };
    let opponent = !side;

    if king_side_right
        && board.piece_at(Square::new(row, 5)).is_none()
        && board.piece_at(Square::new(row, 6)).is_none()
        && !is_square_attacked(board, row, 4, opponent)
        && !is_square_attacked(board, row, 5, opponent)
        && !is_square_attacked(board, row, 6, opponent)
    {
        moves.push(Move::castling(
            Square::new(row, 4),
            Square::new(row, 6),
            true,
        ));
    }

    if queen_side_right
        && board.piece_at(Square::new(row, 1)).is_none()
        && board.piece_at(Square::new(row, 2)).is_none()
        && board.piece_at(Square::new(row, 3)).is_none()
        && !is_square_attacked(board, row, 4, opponent)
        && !is_square_attacked(board, row, 3, opponent)
        && !is_square_attacked(board, row, 2, opponent)
    {
        moves.push(Move::castling(
            Square::new(row, 4),
            Square::new(row, 2),
            false,
        ));
    }
}

/// Generate every strictly legal move: pseudo-legal moves that do not leave
/// the mover's own king in check.
#[must_use]
pub fn generate_legal(board: &Board, captures_only: bool) -> Vec<Move> {
    let side = board.side_to_move;
    generate_pseudo_legal(board, captures_only)
        .into_iter()
        .filter(|mv| !is_king_in_check(&board.make_move(mv), side))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_has_twenty_legal_moves() {
        let board = Board::default();
        assert_eq!(generate_legal(&board, false).len(), 20);
    }

    #[test]
    fn no_legal_moves_never_leave_own_king_in_check() {
        let board = Board::default();
        for mv in generate_legal(&board, false) {
            let next = board.make_move(&mv);
            assert!(!is_king_in_check(&next, Color::White));
        }
    }

    #[test]
    fn captures_only_is_subset_of_all_moves() {
        let board = Board::from_fen("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1").unwrap();
        let captures = generate_legal(&board, true);
        let all_moves = generate_legal(&board, false);
        for mv in &captures {
            assert!(all_moves.contains(mv));
        }
        assert!(!captures.is_empty());
    }

    #[test]
    fn en_passant_capture_is_generated() {
        let mut board = Board::default();
        for uci in ["e2e4", "a7a6", "e4e5", "d7d5"] {
            let (from, to, _) = super::super::moves::parse_uci_coords(uci).unwrap();
            let mv = generate_legal(&board, false)
                .into_iter()
                .find(|m| m.from == from && m.to == to)
                .unwrap();
            board = board.make_move(&mv);
        }
        let legal = generate_legal(&board, false);
        assert!(legal.iter().any(|m| m.is_en_passant
            && m.from == Square::new(3, 4)
            && m.to == Square::new(2, 3)));
    }

    #[test]
    fn castling_through_check_is_forbidden() {
        let board = Board::from_fen("5r1k/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        let legal = generate_legal(&board, false);
        assert!(!legal
            .iter()
            .any(|m| m.is_king_castle && m.from == Square::new(7, 4)));
    }

    #[test]
    fn stalemate_position_has_no_legal_moves() {
        let board = Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(generate_legal(&board, false).is_empty());
        assert!(!is_king_in_check(&board, Color::Black));
    }
}
