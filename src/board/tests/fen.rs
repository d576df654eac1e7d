//! Position and move text codec tests.

use crate::board::error::{FenError, MoveParseError};
use crate::board::{parse_move, Color, Piece, Position, Square};

const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[test]
fn start_fen_matches_start_position() {
    let parsed = Position::from_fen(START_FEN);
    let start = Position::start();
    assert_eq!(parsed.hash(), start.hash());
    assert_eq!(parsed.to_fen(), start.to_fen());
}

#[test]
fn fen_round_trip() {
    let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    let pos = Position::from_fen(fen);
    assert_eq!(pos.to_fen(), fen);
}

#[test]
fn side_to_move_and_rights_parse() {
    let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K2R b K - 0 1");
    assert_eq!(pos.side_to_move(), Color::Black);
    assert!(pos.castling_rights().has(Color::White, true));
    assert!(!pos.castling_rights().has(Color::White, false));
    assert!(!pos.castling_rights().has(Color::Black, true));
}

#[test]
fn en_passant_square_sets_the_file() {
    let pos =
        Position::from_fen("rnbqkbnr/pppp1ppp/8/4p3/8/8/PPPPPPPP/RNBQKBNR w KQkq e6 0 2");
    assert_eq!(pos.en_passant_file(), Some(4));
}

#[test]
fn parsed_hash_matches_recomputed_hash() {
    let pos = Position::from_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1");
    assert_eq!(pos.hash(), pos.recompute_hash());
}

#[test]
fn too_few_parts_is_rejected() {
    let err = Position::try_from_fen("8/8/8/8/8/8/8/8 w").unwrap_err();
    assert!(matches!(err, FenError::TooFewParts { found: 2 }));
}

#[test]
fn bad_piece_letter_is_rejected() {
    let err = Position::try_from_fen("8/8/8/8/8/8/8/7x w - - 0 1").unwrap_err();
    assert!(matches!(err, FenError::InvalidPiece { char: 'x' }));
}

#[test]
fn bad_side_to_move_is_rejected() {
    let err = Position::try_from_fen("8/8/8/8/8/8/8/8 x - - 0 1").unwrap_err();
    assert!(matches!(err, FenError::InvalidSideToMove { .. }));
}

#[test]
fn raw_board_round_trip() {
    let pos = Position::start();
    let raw = pos.to_raw_board();
    assert_eq!(raw.len(), 64);
    assert!(raw.starts_with("RNBQKBNR"));
    assert!(raw.ends_with("rnbqkbnr"));

    let rebuilt = Position::try_from_raw_board(&raw).unwrap();
    for idx in 0..64 {
        assert_eq!(rebuilt.at(Square::from_index(idx)), pos.at(Square::from_index(idx)));
    }
}

#[test]
fn raw_board_rejects_wrong_length() {
    let err = Position::try_from_raw_board("RNBQK").unwrap_err();
    assert!(matches!(err, FenError::InvalidBoardLength { len: 5 }));
}

#[test]
fn parse_move_coordinates() {
    let mv = parse_move("e2e4").unwrap();
    assert_eq!(mv.from, Square(1, 4));
    assert_eq!(mv.to, Square(3, 4));
}

#[test]
fn parse_move_is_case_insensitive_on_files() {
    assert_eq!(parse_move("E2E4").unwrap(), parse_move("e2e4").unwrap());
}

#[test]
fn parse_move_ignores_promotion_suffix() {
    let mv = parse_move("a7a8q").unwrap();
    assert_eq!(mv.to, Square(7, 0));
}

#[test]
fn parse_move_rejects_garbage() {
    assert!(matches!(
        parse_move("e2"),
        Err(MoveParseError::InvalidLength { len: 2 })
    ));
    assert!(matches!(
        parse_move("z9z9"),
        Err(MoveParseError::InvalidSquare { .. })
    ));
}

#[test]
fn move_formats_as_uci_text() {
    let mv = parse_move("g1f3").unwrap();
    assert_eq!(mv.to_string(), "g1f3");
}

#[test]
fn piece_letters_round_trip() {
    for piece in Piece::ALL {
        assert_eq!(Piece::from_char(piece.to_char()), Some(piece));
    }
    assert_eq!(Piece::Queen.to_fen_char(Color::White), 'Q');
    assert_eq!(Piece::Queen.to_fen_char(Color::Black), 'q');
}
