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

//! Game-end detection: checkmate, stalemate, threefold repetition, and the
//! fifty-move rule, and a single status string combining all four the way a
//! PGN result tag would.

use super::{attacks::is_king_in_check, board::Board, movegen::generate_legal};

/// Whether the side to move is checkmated: no legal moves, and in check.
#[must_use]
pub fn is_checkmate(board: &Board) -> bool {
    generate_legal(board, false).is_empty() && is_king_in_check(board, board.side_to_move)
}

/// Whether the side to move is stalemated: no legal moves, but not in check.
#[must_use]
pub fn is_stalemate(board: &Board) -> bool {
    generate_legal(board, false).is_empty() && !is_king_in_check(board, board.side_to_move)
}

/// Whether the current position has occurred three or more times.
#[must_use]
pub fn is_threefold_repetition(board: &Board) -> bool {
    board.repetition_count() >= 3
}

/// Whether the halfmove clock has reached the fifty-move-rule threshold.
#[must_use]
pub fn is_fifty_move_draw(board: &Board) -> bool {
    board.halfmove_clock >= 100
}

/// A PGN-style result string for `board`, or `None` if the game is still
/// ongoing. Checked in the same priority order as the other three draw
/// conditions: checkmate and stalemate (which both require generating the
/// legal move list) are resolved before the cheaper clock/repetition checks.
#[must_use]
pub fn game_end_status(board: &Board) -> Option<String> {
    if is_checkmate(board) {
        return Some(if board.side_to_move == super::Color::White {
            "0-1 {Black mates}".to_string()
        } else {
            "1-0 {White mates}".to_string()
        });
    }
    if is_stalemate(board) {
        return Some("1/2-1/2 {Stalemate}".to_string());
    }
    if is_threefold_repetition(board) {
        return Some("1/2-1/2 {Draw by threefold repetition}".to_string());
    }
    if is_fifty_move_draw(board) {
        return Some("1/2-1/2 {Draw by fifty-move rule}".to_string());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_has_no_game_end_status() {
        assert_eq!(game_end_status(&Board::default()), None);
    }

    #[test]
    fn checkmate_reports_the_winning_side() {
        let board = Board::from_fen("k7/7Q/1K6/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(is_checkmate(&board));
        assert_eq!(
            game_end_status(&board),
            Some("1-0 {White mates}".to_string())
        );
    }

    #[test]
    fn stalemate_reports_a_draw() {
        let board = Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(is_stalemate(&board));
        assert_eq!(
            game_end_status(&board),
            Some("1/2-1/2 {Stalemate}".to_string())
        );
    }

    #[test]
    fn threefold_repetition_reports_a_draw() {
        let mut board = Board::default();
        let nf3 = super::super::moves::parse_uci_coords("g1f3").unwrap();
        let nf6 = super::super::moves::parse_uci_coords("g8f6").unwrap();
        let ng1 = super::super::moves::parse_uci_coords("f3g1").unwrap();
        let ng8 = super::super::moves::parse_uci_coords("f6g8").unwrap();
        // Starting position occurs once at the outset, then again after each
        // full back-and-forth knight shuffle: two round trips bring the
        // repetition count to three.
        for (from, to, _) in [nf3, nf6, ng1, ng8, nf3, nf6, ng1, ng8] {
            let mv = generate_legal(&board, false)
                .into_iter()
                .find(|m| m.from == from && m.to == to)
                .unwrap();
            board = board.make_move(&mv);
        }
        assert!(is_threefold_repetition(&board));
        assert_eq!(
            game_end_status(&board),
            Some("1/2-1/2 {Draw by threefold repetition}".to_string())
        );
    }

    #[test]
    fn fifty_move_clock_reports_a_draw() {
        let board = Board::from_fen("7k/8/8/8/8/8/8/K7 w - - 100 80").unwrap();
        assert!(is_fifty_move_draw(&board));
        assert_eq!(
            game_end_status(&board),
            Some("1/2-1/2 {Draw by fifty-move rule}".to_string())
        );
    }
}
