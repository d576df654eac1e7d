//! End-to-end search tests against the public API.

use std::time::Duration;

use knightfall::board::parse_move;
use knightfall::{Position, Search};

#[test]
fn timed_search_on_the_start_position_is_legal() {
    let mut pos = Position::start();
    let mut search = Search::new(16);
    let best = search
        .find_best_move_in_time(&pos, Duration::from_millis(300))
        .expect("start position has moves");
    assert!(pos.is_move_valid(best));
}

#[test]
fn search_escapes_an_attacked_queen() {
    // The d5 pawn attacks the e4 queen; leaving her there loses.
    let mut pos = Position::from_fen("k7/8/8/3p4/4Q3/8/8/4K3 w - - 0 1");
    let mut search = Search::new(16);
    let best = search.find_best_move(&mut pos, 4).expect("queen can move");
    assert_eq!(best.from, parse_move("e4d5").unwrap().from);
}

#[test]
fn search_prefers_the_shorter_mate() {
    // Mate in one is available; a deeper search must still play it.
    let mut pos = Position::from_fen("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1");
    let mut search = Search::new(16);
    let best = search.find_best_move(&mut pos, 5).expect("mate available");
    assert_eq!(best.to_string(), "a1a8");
}

#[test]
fn game_loop_of_applied_best_moves_stays_consistent() {
    let mut pos = Position::start();
    let mut search = Search::new(16);
    for _ in 0..6 {
        let Some(best) = search.find_best_move(&mut pos, 3) else {
            break;
        };
        assert!(pos.is_move_valid(best));
        pos.make_move(best);
        assert_eq!(pos.hash(), pos.recompute_hash());
    }
}
