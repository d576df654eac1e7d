//! Property-based tests.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::Position;

fn move_count_strategy() -> impl Strategy<Value = usize> {
    1..=30usize
}

fn seed_strategy() -> impl Strategy<Value = u64> {
    any::<u64>()
}

/// Play a random legal game of up to `num_moves` plies.
fn random_walk(pos: &mut Position, seed: u64, num_moves: usize) -> usize {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut played = 0;
    for _ in 0..num_moves {
        let moves = pos.legal_moves();
        if moves.is_empty() {
            break;
        }
        let mv = moves[rng.gen_range(0..moves.len())];
        pos.make_move(mv);
        played += 1;
    }
    played
}

proptest! {
    /// Unmaking every move of a random game restores the starting state
    /// exactly, hash included.
    #[test]
    fn prop_make_unmake_restores_state(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut pos = Position::start();
        let initial_hash = pos.hash();
        let initial_fen = pos.to_fen();

        let played = random_walk(&mut pos, seed, num_moves);
        for _ in 0..played {
            pos.unmake_move();
        }

        prop_assert_eq!(pos.hash(), initial_hash);
        prop_assert_eq!(pos.to_fen(), initial_fen);
    }

    /// The incrementally maintained hash never drifts from the
    /// from-scratch recomputation.
    #[test]
    fn prop_hash_matches_recompute(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut pos = Position::start();
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 0..num_moves {
            let moves = pos.legal_moves();
            if moves.is_empty() {
                break;
            }
            let mv = moves[rng.gen_range(0..moves.len())];
            pos.make_move(mv);
            prop_assert_eq!(pos.hash(), pos.recompute_hash());
        }
    }

    /// FEN survives a round trip from any reachable position.
    #[test]
    fn prop_fen_round_trip(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut pos = Position::start();
        random_walk(&mut pos, seed, num_moves);

        let fen = pos.to_fen();
        let reparsed = Position::from_fen(&fen);
        // Compare the position fields only; the move counters restart.
        let fields = |f: &str| f.split(' ').take(4).map(String::from).collect::<Vec<_>>();
        prop_assert_eq!(fields(&reparsed.to_fen()), fields(&fen));
        prop_assert_eq!(reparsed.hash(), pos.hash());
    }

    /// Every generated legal move passes the validity check, and applying
    /// it never leaves the mover's king capturable.
    #[test]
    fn prop_legal_moves_are_valid(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut pos = Position::start();
        random_walk(&mut pos, seed, num_moves);

        for mv in pos.legal_moves() {
            prop_assert!(pos.is_move_valid(mv));
        }
    }
}
