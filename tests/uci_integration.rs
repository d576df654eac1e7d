//! Protocol-layer tests for position setup.

use knightfall::uci::parse_position_command;
use knightfall::Position;

#[test]
fn startpos_resets_the_board() {
    let mut pos = Position::from_fen("8/8/8/8/8/8/8/K6k w - - 0 1");
    parse_position_command(&mut pos, &["position", "startpos"]);
    assert_eq!(pos.hash(), Position::start().hash());
}

#[test]
fn startpos_with_moves_applies_them() {
    let mut pos = Position::start();
    parse_position_command(
        &mut pos,
        &["position", "startpos", "moves", "e2e4", "e7e5", "g1f3"],
    );
    assert_eq!(pos.ply(), 3);

    let mut replay = Position::start();
    for text in ["e2e4", "e7e5", "g1f3"] {
        let mv = knightfall::board::parse_move(text).unwrap();
        replay.make_move(mv);
    }
    assert_eq!(pos.hash(), replay.hash());
}

#[test]
fn invalid_move_stops_the_list() {
    let mut pos = Position::start();
    parse_position_command(
        &mut pos,
        &["position", "startpos", "moves", "e2e4", "e2e4", "d7d5"],
    );
    // The illegal second e2e4 is rejected; d7d5 is never applied.
    assert_eq!(pos.ply(), 1);
}

#[test]
fn fen_positions_are_accepted() {
    let mut pos = Position::start();
    parse_position_command(
        &mut pos,
        &[
            "position", "fen", "r3k2r/8/8/8/8/8/8/R3K2R", "w", "KQkq", "-", "0", "1", "moves",
            "e1g1",
        ],
    );
    assert_eq!(pos.ply(), 1);
    assert_eq!(pos.to_raw_board().chars().nth(6), Some('K'));
}

#[test]
fn raw_board_dump_matches_the_position() {
    let pos = Position::start();
    let raw = pos.to_raw_board();
    assert_eq!(&raw[0..8], "RNBQKBNR");
    assert_eq!(&raw[8..16], "PPPPPPPP");
    assert_eq!(&raw[24..32], "........");
}
