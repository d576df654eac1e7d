//! Mate-in-one positions the engine must solve at shallow depth.

use knightfall::{Position, Search};

fn best_move(fen: &str, depth: i32) -> String {
    let mut pos = Position::from_fen(fen);
    let mut search = Search::new(16);
    search
        .find_best_move(&mut pos, depth)
        .expect("position has a move")
        .to_string()
}

#[test]
fn back_rank_rook_mate() {
    assert_eq!(
        best_move("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1", 3),
        "a1a8"
    );
}

#[test]
fn queen_supported_by_king_mates() {
    // Qg7 next to the black king, protected from g6.
    assert_eq!(
        best_move("6k1/8/6KQ/8/8/8/8/8 w - - 0 1", 3),
        "h6g7"
    );
}

#[test]
fn smothered_corner_mate_with_knight() {
    // Black king boxed in at h8 by its own pieces; Nf7 is mate.
    assert_eq!(
        best_move("6rk/6pp/8/4N3/8/8/8/6K1 w - - 0 1", 3),
        "e5f7"
    );
}

#[test]
fn mated_side_reports_mate() {
    // Back-rank mate already delivered; Black to move has no escape.
    let mut pos = Position::from_fen("R5k1/5ppp/8/8/8/8/5PPP/6K1 b - - 0 1");
    let mut search = Search::new(16);
    assert!(search.is_in_mate(&mut pos));
    assert!(pos.legal_moves().is_empty());
}
