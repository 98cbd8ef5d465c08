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

//! Zobrist hashing: an incrementally-maintainable 64-bit fingerprint of a
//! position, used both as the board's `Position Key` and as the key into the
//! repetition-count map.
//!
//! The key table is built once, lazily, from a fixed-seed RNG the first time
//! it is touched, rather than being checked into source as a giant literal
//! array. Since the seed is fixed, the table (and therefore every hash it
//! produces) is stable across runs of the engine, which is all correctness
//! requires: the values never need to match any other program's Zobrist
//! scheme.

use super::{Color, PieceType};
use once_cell::sync::Lazy;

const NUM_PIECE_TYPES: usize = 6;
const NUM_COLORS: usize = 2;
const NUM_SQUARES: usize = 64;

/// Fixed seed for the key table's RNG, chosen arbitrarily. Keeping it fixed
/// means the same board always hashes to the same key within a single build
/// of the engine, which is all `position_counts` and repetition detection
/// need.
const KEY_TABLE_SEED: u64 = 0x5EED_C0FF_EE15_B00B;

struct ZobristKeys {
    /// `piece_square[piece_type][color][square]`
    piece_square: [[[u64; NUM_SQUARES]; NUM_COLORS]; NUM_PIECE_TYPES],
    castle: [u64; 4],
    en_passant_file: [u64; 8],
    black_to_move: u64,
}

fn piece_type_index(piece_type: PieceType) -> usize {
    match piece_type {
        PieceType::Pawn => 0,
        PieceType::Knight => 1,
        PieceType::Bishop => 2,
        PieceType::Rook => 3,
        PieceType::Queen => 4,
        PieceType::King => 5,
    }
}

fn color_index(color: Color) -> usize {
    match color {
        Color::White => 0,
        Color::Black => 1,
    }
}

static KEYS: Lazy<ZobristKeys> = Lazy::new(|| {
    let rng = fastrand::Rng::with_seed(KEY_TABLE_SEED);

    let mut piece_square = [[[0u64; NUM_SQUARES]; NUM_COLORS]; NUM_PIECE_TYPES];
    for pt in &mut piece_square {
        for color in pt {
            for key in color {
                *key = rng.u64(..);
            }
        }
    }

    let mut castle = [0u64; 4];
    for key in &mut castle {
        *key = rng.u64(..);
    }

    let mut en_passant_file = [0u64; 8];
    for key in &mut en_passant_file {
        *key = rng.u64(..);
    }

    ZobristKeys {
        piece_square,
        castle,
        en_passant_file,
        black_to_move: rng.u64(..),
    }
});

/// The key to XOR in or out when a piece of the given type, color, and
/// `square index` (`row * 8 + col`) is placed or removed.
#[must_use]
pub fn piece_square_key(piece_type: PieceType, color: Color, square_index: usize) -> u64 {
    KEYS.piece_square[piece_type_index(piece_type)][color_index(color)][square_index]
}

/// The key for a single castling right. `index` is 0=white king-side,
/// 1=white queen-side, 2=black king-side, 3=black queen-side.
#[must_use]
pub fn castle_key(index: usize) -> u64 {
    KEYS.castle[index]
}

/// The key for an en-passant target on the given file (0..8).
#[must_use]
pub fn en_passant_key(file: usize) -> u64 {
    KEYS.en_passant_file[file]
}

/// The key XORed in whenever it is black's turn to move.
#[must_use]
pub fn black_to_move_key() -> u64 {
    KEYS.black_to_move
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_deterministic_across_calls() {
        let a = piece_square_key(PieceType::Queen, Color::White, 27);
        let b = piece_square_key(PieceType::Queen, Color::White, 27);
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_squares_get_distinct_keys() {
        let a = piece_square_key(PieceType::Pawn, Color::White, 8);
        let b = piece_square_key(PieceType::Pawn, Color::White, 9);
        assert_ne!(a, b);
    }

    #[test]
    fn castle_keys_are_distinct() {
        let keys: Vec<u64> = (0..4).map(castle_key).collect();
        for i in 0..4 {
            for j in (i + 1)..4 {
                assert_ne!(keys[i], keys[j]);
            }
        }
    }
}
