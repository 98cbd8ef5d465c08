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

//! Iterative-deepening alpha-beta search with a quiescence extension.
//!
//! The search is entirely synchronous: one call to [`Engine::go`] runs to
//! completion (or to cancellation) before returning. Cancellation is
//! cooperative, signaled through a single atomic flag that every recursive
//! call checks before doing work.

use super::{
    attacks::is_king_in_check,
    board::Board,
    evaluate::evaluate,
    movegen::generate_legal,
    ordering::order_moves,
    Color, Move, DRAW_SCORE, IN_CHECK_PENALTY, MATE_SCORE, MAX_QUIESCENCE_PLY, MAX_SEARCH_PLY,
};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    sync::atomic::{AtomicBool, AtomicU64, Ordering},
    time::{Duration, Instant},
};

/// After this many nodes, the search checks the wall clock again. Checking
/// every node would dominate runtime with syscalls; checking too rarely
/// risks overrunning the deadline.
const TIME_CHECK_INTERVAL: u64 = 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Ways a search can conclude abnormally. There is currently only one: the
/// allotted time ran out mid-search. The variant exists (rather than a bare
/// bool) so future failure modes have somewhere to go.
pub enum SearchError {
    Timeout,
}

impl Display for SearchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            SearchError::Timeout => write!(f, "search exceeded its time budget"),
        }
    }
}

impl std::error::Error for SearchError {}

/// The outcome of one completed iterative-deepening depth.
#[derive(Clone, Debug)]
pub struct DepthResult {
    pub depth: u8,
    /// Score from the engine's own perspective: positive means the engine
    /// believes it's doing well.
    pub score: i32,
    pub best_move: Move,
    pub nodes: u64,
    pub elapsed: Duration,
}

/// Owns the mutable state a search needs: the cancellation flag, the node
/// counter, and the RNG used to break root ties. One `Engine` persists for
/// the process's lifetime; each `go` resets its counters and runs to
/// completion against a fresh deadline.
pub struct Engine {
    cancelled: AtomicBool,
    nodes: AtomicU64,
    rng: fastrand::Rng,
}

impl Engine {
    #[must_use]
    pub fn new() -> Engine {
        Engine {
            cancelled: AtomicBool::new(false),
            nodes: AtomicU64::new(0),
            rng: fastrand::Rng::new(),
        }
    }

    #[must_use]
    pub fn nodes_searched(&self) -> u64 {
        self.nodes.load(Ordering::Relaxed)
    }

    fn reset(&self) {
        self.cancelled.store(false, Ordering::Relaxed);
        self.nodes.store(0, Ordering::Relaxed);
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Bump the node counter and, every [`TIME_CHECK_INTERVAL`] nodes, check
    /// whether `deadline` has passed. Returns whether the search is
    /// cancelled (either because this call observed the deadline, or
    /// because a sibling call already had).
    fn tick(&self, deadline: Instant) -> bool {
        let n = self.nodes.fetch_add(1, Ordering::Relaxed) + 1;
        if n % TIME_CHECK_INTERVAL == 0 && Instant::now() >= deadline {
            self.cancelled.store(true, Ordering::Relaxed);
        }
        self.is_cancelled()
    }

    /// Run iterative deepening from `board` until `deadline` passes or a
    /// forced mate is proven, calling `on_depth` after each depth that
    /// completes without cancellation. Returns the last completed depth's
    /// result, or `None` if `board` has no legal moves.
    pub fn go(
        &self,
        board: &Board,
        deadline: Instant,
        mut on_depth: impl FnMut(&DepthResult),
    ) -> Option<DepthResult> {
        self.reset();
        let engine_color = board.side_to_move;

        let mut root_moves = generate_legal(board, false);
        if root_moves.is_empty() {
            return None;
        }
        order_moves(board, &mut root_moves);

        let mut best: DepthResult = DepthResult {
            depth: 0,
            score: 0,
            best_move: root_moves[0],
            nodes: 0,
            elapsed: Duration::ZERO,
        };

        for depth in 1..=MAX_SEARCH_PLY {
            let depth_start = Instant::now();
            let nodes_before = self.nodes_searched();

            let mut best_score = i32::MIN;
            let mut best_moves_this_depth: Vec<Move> = Vec::new();

            for &mv in &root_moves {
                let successor = board.make_move(&mv);
                let score_from_white = self.alpha_beta(
                    &successor,
                    depth - 1,
                    i32::MIN + 1,
                    i32::MAX,
                    successor.side_to_move == Color::White,
                    deadline,
                );
                if self.is_cancelled() {
                    break;
                }
                let score_for_engine = match engine_color {
                    Color::White => score_from_white,
                    Color::Black => -score_from_white,
                };
                if score_for_engine > best_score {
                    best_score = score_for_engine;
                    best_moves_this_depth.clear();
                    best_moves_this_depth.push(mv);
                } else if score_for_engine == best_score {
                    best_moves_this_depth.push(mv);
                }
            }

            if self.is_cancelled() {
                break;
            }

            let chosen = best_moves_this_depth[self.rng.usize(..best_moves_this_depth.len())];
            best = DepthResult {
                depth,
                score: best_score,
                best_move: chosen,
                nodes: self.nodes_searched() - nodes_before,
                elapsed: depth_start.elapsed(),
            };
            on_depth(&best);

            if Instant::now() >= deadline {
                break;
            }
            if best.score.unsigned_abs() as i32 >= MATE_SCORE - i32::from(MAX_SEARCH_PLY) * 2 {
                break;
            }
        }

        Some(best)
    }

    /// Fail-hard negamax-style alpha-beta search. Returns a score from
    /// White's perspective.
    fn alpha_beta(
        &self,
        board: &Board,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
        deadline: Instant,
    ) -> i32 {
        if self.tick(deadline) {
            return 0;
        }

        let mut legal_moves = generate_legal(board, false);
        if legal_moves.is_empty() {
            return if is_king_in_check(board, board.side_to_move) {
                if maximizing {
                    -(MATE_SCORE + i32::from(depth))
                } else {
                    MATE_SCORE + i32::from(depth)
                }
            } else {
                DRAW_SCORE
            };
        }

        if board.repetition_count() >= 3 || board.halfmove_clock >= 100 {
            return DRAW_SCORE;
        }

        if depth == 0 {
            return self.quiescence(board, alpha, beta, maximizing, deadline, MAX_QUIESCENCE_PLY);
        }

        order_moves(board, &mut legal_moves);

        if maximizing {
            let mut max_eval = i32::MIN;
            for mv in &legal_moves {
                let next = board.make_move(mv);
                let eval = self.alpha_beta(&next, depth - 1, alpha, beta, false, deadline);
                if self.is_cancelled() {
                    return 0;
                }
                max_eval = max_eval.max(eval);
                alpha = alpha.max(eval);
                if beta <= alpha {
                    break;
                }
            }
            max_eval
        } else {
            let mut min_eval = i32::MAX;
            for mv in &legal_moves {
                let next = board.make_move(mv);
                let eval = self.alpha_beta(&next, depth - 1, alpha, beta, true, deadline);
                if self.is_cancelled() {
                    return 0;
                }
                min_eval = min_eval.min(eval);
                beta = beta.min(eval);
                if beta <= alpha {
                    break;
                }
            }
            min_eval
        }
    }

    /// Extend search through captures (and, if in check, all legal replies)
    /// past the main search's horizon, to avoid misjudging positions with
    /// hanging pieces right at the cutoff depth.
    fn quiescence(
        &self,
        board: &Board,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
        deadline: Instant,
        depth_remaining: i32,
    ) -> i32 {
        if self.tick(deadline) {
            return 0;
        }

        if depth_remaining <= 0 {
            return evaluate(board);
        }

        let mut stand_pat = evaluate(board);
        let in_check = is_king_in_check(board, board.side_to_move);
        if in_check {
            stand_pat += if maximizing {
                -IN_CHECK_PENALTY
            } else {
                IN_CHECK_PENALTY
            };
        }

        if maximizing {
            if stand_pat >= beta && !in_check {
                return beta;
            }
            alpha = alpha.max(stand_pat);
        } else {
            if stand_pat <= alpha && !in_check {
                return alpha;
            }
            beta = beta.min(stand_pat);
        }

        let mut moves = generate_legal(board, !in_check);
        order_moves(board, &mut moves);

        if in_check && moves.is_empty() {
            return if maximizing {
                -(MATE_SCORE + i32::from(MAX_SEARCH_PLY) + depth_remaining)
            } else {
                MATE_SCORE + i32::from(MAX_SEARCH_PLY) + depth_remaining
            };
        }
        if !in_check && moves.is_empty() {
            return stand_pat;
        }

        if maximizing {
            for mv in &moves {
                let next = board.make_move(mv);
                let score =
                    self.quiescence(&next, alpha, beta, false, deadline, depth_remaining - 1);
                if self.is_cancelled() {
                    return 0;
                }
                alpha = alpha.max(score);
                if alpha >= beta {
                    break;
                }
            }
            alpha
        } else {
            for mv in &moves {
                let next = board.make_move(mv);
                let score =
                    self.quiescence(&next, alpha, beta, true, deadline, depth_remaining - 1);
                if self.is_cancelled() {
                    return 0;
                }
                beta = beta.min(score);
                if alpha >= beta {
                    break;
                }
            }
            beta
        }
    }
}

impl Default for Engine {
    fn default() -> Engine {
        Engine::new()
    }
}

/// Convert an internal mate-biased score into a UCI `mate <n>` value, or
/// `None` if `score` is an ordinary centipawn evaluation.
#[must_use]
pub fn mate_distance(score: i32) -> Option<i32> {
    let threshold = MATE_SCORE - i32::from(MAX_SEARCH_PLY) * 2;
    if score.abs() > threshold {
        let ply_to_mate = MATE_SCORE - score.abs();
        let moves_to_mate = (ply_to_mate + 1) / 2;
        Some(if score > 0 { moves_to_mate } else { -moves_to_mate })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn search(fen: &str, depth_budget: Duration) -> DepthResult {
        let board = Board::from_fen(fen).unwrap();
        let engine = Engine::new();
        let deadline = Instant::now() + depth_budget;
        engine.go(&board, deadline, |_| {}).expect("position has legal moves")
    }

    #[test]
    fn starting_position_returns_a_legal_move() {
        let board = Board::default();
        let result = search(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            Duration::from_millis(300),
        );
        let legal = generate_legal(&board, false);
        assert!(legal.contains(&result.best_move));
    }

    #[test]
    fn finds_mate_in_one() {
        let result = search("k7/7Q/1K6/8/8/8/8/8 w - - 0 1", Duration::from_millis(500));
        assert_eq!(mate_distance(result.score), Some(1));
    }

    #[test]
    fn stalemate_has_no_legal_moves() {
        let board = Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        let engine = Engine::new();
        let deadline = Instant::now() + Duration::from_millis(50);
        assert!(engine.go(&board, deadline, |_| {}).is_none());
    }

    #[test]
    fn mate_distance_is_none_for_ordinary_scores() {
        assert_eq!(mate_distance(150), None);
    }
}
