//! Perft node counts for move generation correctness.
//!
//! Positions are chosen so that no promotion occurs within the counted
//! depth: promotions always produce a queen here, so positions with
//! under-promotion choices in range would not match published counts.

use crate::board::Position;

struct TestPosition {
    name: &'static str,
    fen: &'static str,
    depths: &'static [(usize, u64)],
}

const TEST_POSITIONS: &[TestPosition] = &[
    TestPosition {
        name: "Initial Position",
        fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        depths: &[(1, 20), (2, 400), (3, 8902), (4, 197_281)],
    },
    TestPosition {
        name: "Kiwipete",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        depths: &[(1, 48), (2, 2039)],
    },
    TestPosition {
        name: "Rook Endgame",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        depths: &[(1, 14), (2, 191), (3, 2812), (4, 43_238)],
    },
    TestPosition {
        name: "En Passant Capture",
        fen: "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
        depths: &[(1, 31), (2, 707), (3, 21_637)],
    },
    TestPosition {
        name: "Castling",
        fen: "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1",
        depths: &[(1, 26), (2, 568), (3, 13_744)],
    },
];

#[test]
fn perft_checkpoints() {
    for test in TEST_POSITIONS {
        let mut pos = Position::from_fen(test.fen);
        for &(depth, expected) in test.depths {
            let nodes = pos.perft(depth);
            assert_eq!(
                nodes, expected,
                "{} at depth {depth}: got {nodes}, expected {expected}",
                test.name
            );
        }
    }
}

#[test]
fn perft_leaves_the_position_unchanged() {
    let mut pos = Position::start();
    let before_hash = pos.hash();
    let before_fen = pos.to_fen();
    assert_eq!(pos.perft(3), 8902);
    assert_eq!(pos.hash(), before_hash);
    assert_eq!(pos.to_fen(), before_fen);
}

#[test]
fn start_position_has_twenty_moves() {
    let mut pos = Position::start();
    assert_eq!(pos.legal_moves().len(), 20);
}

#[test]
#[ignore = "slow; run with --ignored"]
fn perft_start_depth_five() {
    let mut pos = Position::start();
    assert_eq!(pos.perft(5), 4_865_609);
}
