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

//! Parsing of the subset of the UCI protocol this engine speaks:
//! `uci`, `debug`, `isready`, `ucinewgame`, `position`, `go`, and `quit`.
//!
//! Anything this engine doesn't recognize is reported as
//! [`Command::Unknown`] rather than an error; per the protocol, GUIs may
//! send options or commands an engine doesn't support, and the correct
//! response is to ignore them, not to crash or halt the input loop.

use super::time::TimeControl;

#[derive(Debug, Clone, PartialEq)]
/// One parsed line of GUI-to-engine UCI input.
pub enum Command {
    Uci,
    Debug(bool),
    IsReady,
    NewGame,
    /// `fen` is `None` for `position startpos`. `moves` are the raw UCI move
    /// tokens following `moves`, in order; the caller is responsible for
    /// matching each against the legal move list and applying it.
    Position {
        fen: Option<String>,
        moves: Vec<String>,
    },
    Go(GoOptions),
    Quit,
    /// A line that parsed as a known first token but whose body couldn't be
    /// used (e.g. `position` with neither `startpos` nor `fen`), or a first
    /// token that isn't part of this engine's supported subset.
    Unknown(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Parsed options from a `go` command line.
pub struct GoOptions {
    pub wtime: Option<u32>,
    pub btime: Option<u32>,
    pub winc: u32,
    pub binc: u32,
    pub movestogo: Option<u32>,
    pub movetime: Option<u32>,
}

impl GoOptions {
    /// Build the [`TimeControl`] relevant to whichever side is to move.
    #[must_use]
    pub fn time_control(&self, white_to_move: bool) -> TimeControl {
        TimeControl {
            movetime: self.movetime,
            my_time: if white_to_move { self.wtime } else { self.btime },
            my_inc: if white_to_move { self.winc } else { self.binc },
            movestogo: self.movestogo,
        }
    }
}

/// Parse a single line of UCI input. Never fails: an unrecognized line comes
/// back as [`Command::Unknown`] so the caller can decide, per its debug
/// setting, whether to report it.
#[must_use]
pub fn parse_line(line: &str) -> Command {
    let mut tokens = line.split_whitespace();
    let Some(head) = tokens.next() else {
        return Command::Unknown(String::new());
    };

    match head {
        "uci" => Command::Uci,
        "debug" => match tokens.next() {
            Some("on") => Command::Debug(true),
            Some("off") => Command::Debug(false),
            _ => Command::Unknown(line.to_string()),
        },
        "isready" => Command::IsReady,
        "ucinewgame" => Command::NewGame,
        "position" => parse_position(tokens),
        "go" => Command::Go(parse_go(tokens)),
        "quit" => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    }
}

fn parse_position<'a>(mut tokens: impl Iterator<Item = &'a str>) -> Command {
    match tokens.next() {
        Some("startpos") => {
            let moves = collect_moves(&mut tokens);
            Command::Position { fen: None, moves }
        }
        Some("fen") => {
            let mut fen_parts = Vec::new();
            let mut moves = Vec::new();
            for tok in tokens.by_ref() {
                if tok == "moves" {
                    break;
                }
                fen_parts.push(tok);
            }
            moves.extend(tokens.map(str::to_string));
            Command::Position {
                fen: Some(fen_parts.join(" ")),
                moves,
            }
        }
        _ => Command::Unknown("position".to_string()),
    }
}

fn collect_moves<'a>(tokens: &mut impl Iterator<Item = &'a str>) -> Vec<String> {
    match tokens.next() {
        Some("moves") => tokens.map(str::to_string).collect(),
        _ => Vec::new(),
    }
}

fn parse_go<'a>(tokens: impl Iterator<Item = &'a str>) -> GoOptions {
    let mut opts = GoOptions::default();
    let mut tokens = tokens.peekable();
    while let Some(tok) = tokens.next() {
        match tok {
            "wtime" => opts.wtime = next_u32(&mut tokens),
            "btime" => opts.btime = next_u32(&mut tokens),
            "winc" => opts.winc = next_u32(&mut tokens).unwrap_or(0),
            "binc" => opts.binc = next_u32(&mut tokens).unwrap_or(0),
            "movestogo" => opts.movestogo = next_u32(&mut tokens),
            "movetime" => opts.movetime = next_u32(&mut tokens),
            _ => {}
        }
    }
    opts
}

fn next_u32<'a>(tokens: &mut std::iter::Peekable<impl Iterator<Item = &'a str>>) -> Option<u32> {
    tokens.next().and_then(|s| s.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_uci_and_isready() {
        assert_eq!(parse_line("uci"), Command::Uci);
        assert_eq!(parse_line("isready"), Command::IsReady);
    }

    #[test]
    fn parses_startpos_with_moves() {
        let cmd = parse_line("position startpos moves e2e4 e7e5");
        assert_eq!(
            cmd,
            Command::Position {
                fen: None,
                moves: vec!["e2e4".to_string(), "e7e5".to_string()],
            }
        );
    }

    #[test]
    fn parses_fen_without_moves() {
        let cmd = parse_line("position fen 8/8/8/8/8/8/8/K6k w - - 0 1");
        assert_eq!(
            cmd,
            Command::Position {
                fen: Some("8/8/8/8/8/8/8/K6k w - - 0 1".to_string()),
                moves: vec![],
            }
        );
    }

    #[test]
    fn parses_go_with_clock_fields() {
        let cmd = parse_line("go wtime 1000 btime 2000 winc 5 binc 10 movestogo 20");
        assert_eq!(
            cmd,
            Command::Go(GoOptions {
                wtime: Some(1000),
                btime: Some(2000),
                winc: 5,
                binc: 10,
                movestogo: Some(20),
                movetime: None,
            })
        );
    }

    #[test]
    fn parses_go_movetime() {
        let cmd = parse_line("go movetime 500");
        assert_eq!(
            cmd,
            Command::Go(GoOptions {
                movetime: Some(500),
                ..Default::default()
            })
        );
    }

    #[test]
    fn unknown_command_does_not_panic() {
        assert_eq!(
            parse_line("setoption name Hash value 64"),
            Command::Unknown("setoption name Hash value 64".to_string())
        );
    }
}
