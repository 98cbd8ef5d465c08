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

//! The main UCI procedure.
//!
//! Unlike engines that spawn a helper thread per search, Corvid has none: a
//! `go` command runs to completion (or to its time budget) on the same
//! thread that reads stdin, so the GUI simply waits for `bestmove` before
//! sending anything else. That's the tradeoff this engine's whole design
//! makes for simplicity over responsiveness.

use corvid::{
    generate_legal,
    search::{mate_distance, Engine},
    time::search_budget_ms,
    uci::{parse_line, Command},
    Board, Color,
};
use std::{
    io::stdin,
    time::{Duration, Instant},
};

fn main() {
    let mut debug = false;
    let mut board = Board::default();
    let engine = Engine::new();

    loop {
        let mut line = String::new();
        if stdin().read_line(&mut line).is_err() {
            debug_info("failed to read line", debug);
            continue;
        }
        if line.is_empty() {
            // stdin closed
            break;
        }

        match parse_line(&line) {
            Command::Uci => {
                println!("id name Corvid {}", env!("CARGO_PKG_VERSION"));
                println!("id author The Corvid Authors");
                println!(
                    "option name UCI_EngineAbout type string default \
                    Corvid: Copyright (C) 2026 The Corvid Authors. \
                    This program comes with ABSOLUTELY NO WARRANTY. \
                    Licensed under the GNU GPLv3."
                );
                println!("uciok");
            }
            Command::Debug(new_debug) => debug = new_debug,
            Command::IsReady => println!("readyok"),
            Command::NewGame => board = Board::default(),
            Command::Position { fen, moves } => match apply_position(fen.as_deref(), &moves) {
                Ok(new_board) => board = new_board,
                Err(msg) => debug_info(&msg, debug),
            },
            Command::Go(opts) => {
                let white_to_move = board.side_to_move == Color::White;
                let budget_ms = search_budget_ms(&opts.time_control(white_to_move));
                let deadline = Instant::now() + Duration::from_millis(u64::from(budget_ms));
                debug_info(&format!("search budget: {budget_ms}ms"), debug);
                run_search(&engine, &board, deadline, debug);
            }
            Command::Quit => break,
            Command::Unknown(text) => {
                if !text.trim().is_empty() {
                    debug_info(&format!("ignoring unrecognized command: {text}"), debug);
                }
            }
        }
    }
}

/// Replay `fen` (or the starting position) and then each UCI move token in
/// `moves`, matching each token against the legal move list rather than
/// trusting its castling/en-passant flags, which UCI notation doesn't carry.
fn apply_position(fen: Option<&str>, moves: &[String]) -> Result<Board, String> {
    let mut board = match fen {
        Some(fen) => Board::from_fen(fen).map_err(|e| format!("invalid fen: {e}"))?,
        None => Board::default(),
    };
    for token in moves {
        let legal = generate_legal(&board, false);
        let mv = legal
            .iter()
            .find(|m| &m.to_uci() == token)
            .ok_or_else(|| format!("illegal move in position history: {token}"))?;
        board = board.make_move(mv);
    }
    Ok(board)
}

fn run_search(engine: &Engine, board: &Board, deadline: Instant, debug: bool) {
    let result = engine.go(board, deadline, |depth_result| {
        let score_str = match mate_distance(depth_result.score) {
            Some(n) => format!("mate {n}"),
            None => format!("cp {}", depth_result.score),
        };
        let millis = depth_result.elapsed.as_millis();
        let nps = if millis > 0 {
            u128::from(depth_result.nodes) * 1000 / millis
        } else {
            0
        };
        println!(
            "info depth {} score {score_str} nodes {} time {} nps {nps} pv {}",
            depth_result.depth,
            depth_result.nodes,
            millis,
            depth_result.best_move.to_uci(),
        );
    });

    match result {
        Some(depth_result) => println!("bestmove {}", depth_result.best_move.to_uci()),
        None => {
            debug_info("no legal moves in current position", debug);
            println!("bestmove 0000");
        }
    }
}

/// Print a debug info message to the console. Has no effect unless `debug`
/// mode has been turned on by the GUI.
fn debug_info(s: &str, debug: bool) {
    if debug {
        println!("info string {s}");
    }
}
