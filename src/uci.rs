//! UCI-like line protocol.
//!
//! Handles text framing and command dispatch only; board rules and search
//! live in `board`. Supported commands: `uci`, `isready`, `ucinewgame`,
//! `position startpos|fen ... [moves ...]`, `go [movetime <ms>]`,
//! `getboard`, `exit`/`quit`.

use std::io::{self, BufRead};
use std::path::Path;
use std::time::Duration;

use crate::board::search::{Search, DEFAULT_TT_MB};
use crate::board::{parse_move, Position};
use crate::book::OpeningBook;

const DEFAULT_MOVETIME: Duration = Duration::from_secs(5);
const BOOK_PATH: &str = "book.txt";

/// Apply a `position` command to the board. Moves are validated one by
/// one; an invalid move is rejected and the rest of the list is skipped.
pub fn parse_position_command(pos: &mut Position, parts: &[&str]) {
    let mut i = 1;
    if i < parts.len() && parts[i] == "startpos" {
        *pos = Position::start();
        i += 1;
    } else if i < parts.len() && parts[i] == "fen" {
        let fen = parts[i + 1..].join(" ");
        match Position::try_from_fen(&fen) {
            Ok(parsed) => *pos = parsed,
            Err(e) => {
                println!("Invalid position: {e}");
                return;
            }
        }
        while i < parts.len() && parts[i] != "moves" {
            i += 1;
        }
    }

    if i < parts.len() && parts[i] == "moves" {
        for text in &parts[i + 1..] {
            let mv = match parse_move(text) {
                Ok(mv) => mv,
                Err(e) => {
                    println!("Invalid move {text}: {e}");
                    return;
                }
            };
            if !pos.is_move_valid(mv) {
                println!("Invalid move {text}");
                return;
            }
            pos.make_move(mv);
        }
    }
}

fn movetime_from(parts: &[&str]) -> Duration {
    let mut i = 1;
    while i < parts.len() {
        if parts[i] == "movetime" {
            if let Some(ms) = parts.get(i + 1).and_then(|v| v.parse().ok()) {
                return Duration::from_millis(ms);
            }
        }
        i += 1;
    }
    DEFAULT_MOVETIME
}

/// Read commands from stdin until `exit`/`quit` or end of input.
pub fn run_uci_loop() {
    let stdin = io::stdin();
    let mut pos = Position::start();
    let mut search = Search::new(DEFAULT_TT_MB);
    let book = if Path::new(BOOK_PATH).exists() {
        OpeningBook::try_from_path(Path::new(BOOK_PATH)).unwrap_or_else(|e| {
            log::warn!("ignoring opening book: {e}");
            OpeningBook::new()
        })
    } else {
        OpeningBook::new()
    };

    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match parts[0] {
            "uci" => {
                println!("id name Knightfall");
                println!("id author Knightfall developers");
                println!("uciok");
            }
            "isready" => println!("readyok"),
            "ucinewgame" => {
                pos = Position::start();
                search.reset();
            }
            "position" => parse_position_command(&mut pos, &parts),
            "go" => {
                let mut best = book.lookup(pos.hash()).filter(|&mv| pos.is_move_valid(mv));
                if best.is_none() {
                    best = search.find_best_move_in_time(&pos, movetime_from(&parts));
                }
                match best {
                    Some(mv) => {
                        pos.make_move(mv);
                        // After the move, a mated opponent means this was
                        // the mating move.
                        if search.is_in_mate(&mut pos) {
                            println!("bestmove {mv} mate");
                        } else {
                            println!("bestmove {mv}");
                        }
                    }
                    None => println!("bestmove 0000"),
                }
            }
            "getboard" => println!("board {}", pos.to_raw_board()),
            "exit" | "quit" => break,
            other => println!("unknown command {other}"),
        }
    }
}
