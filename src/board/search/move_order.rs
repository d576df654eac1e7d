//! Heuristic move ordering.
//!
//! Returns an index permutation over the move list, best first. Scores,
//! highest to lowest: the hash move, captures by victim value with a small
//! penalty for the attacker's value, killer moves, then a quiet tiebreak
//! that tries heavy pieces before the king.

use crate::board::{Move, MoveList, Piece, Position};

use super::KillerTable;

pub(super) fn order_moves(
    pos: &Position,
    moves: &MoveList,
    hash_move: Move,
    killers: Option<(&KillerTable, i32)>,
) -> Vec<usize> {
    let mut scores = Vec::with_capacity(moves.len());
    for mv in moves {
        let mut score = 0;
        if !hash_move.is_null() && *mv == hash_move {
            score += 1000;
        }

        if let Some((_, victim)) = pos.at(mv.to) {
            let aggressor = match pos.at(mv.from) {
                Some((_, piece)) => piece.exchange_value(),
                None => 0,
            };
            score += 100 + 10 * victim.exchange_value() - aggressor;
        }

        if killers.is_some_and(|(table, depth)| table.matches(depth, *mv)) {
            score += 50;
        } else if let Some((_, mover)) = pos.at(mv.from) {
            score += quiet_bias(mover);
        }

        scores.push(score);
    }

    let mut indices: Vec<usize> = (0..moves.len()).collect();
    indices.sort_unstable_by_key(|&i| std::cmp::Reverse(scores[i]));
    indices
}

fn quiet_bias(mover: Piece) -> i32 {
    match mover {
        Piece::Queen => 10,
        Piece::Rook => 9,
        Piece::Knight | Piece::Bishop => 7,
        Piece::Pawn => 3,
        Piece::King => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{parse_move, Position};

    fn position_of(order: &[usize], moves: &MoveList, text: &str) -> usize {
        let target = parse_move(text).unwrap();
        order
            .iter()
            .position(|&i| moves[i] == target)
            .expect("move not generated")
    }

    #[test]
    fn hash_move_sorts_first() {
        let pos = Position::start();
        let moves = pos.generate_moves(true);
        let hash_move = parse_move("h2h3").unwrap();
        let order = order_moves(&pos, &moves, hash_move, None);
        assert_eq!(moves[order[0]], hash_move);
    }

    #[test]
    fn captures_sort_before_quiet_moves() {
        // White pawn e4 can take the d5 pawn.
        let pos = Position::from_fen(
            "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2",
        );
        let moves = pos.generate_moves(true);
        let order = order_moves(&pos, &moves, Move::null(), None);
        assert_eq!(moves[order[0]].to_string(), "e4d5");
    }

    #[test]
    fn cheap_attacker_on_same_victim_sorts_higher() {
        // Both the b4 pawn and the c1 queen can capture the c5 rook.
        let pos = Position::from_fen("4k3/8/8/2r5/1P6/8/8/2Q1K3 w - - 0 1");
        let moves = pos.generate_moves(true);
        let order = order_moves(&pos, &moves, Move::null(), None);
        let pawn_takes = position_of(&order, &moves, "b4c5");
        let queen_takes = position_of(&order, &moves, "c1c5");
        assert!(pawn_takes < queen_takes);
    }

    #[test]
    fn killer_moves_sort_ahead_of_other_quiets() {
        let pos = Position::start();
        let moves = pos.generate_moves(true);
        let killer = parse_move("a2a3").unwrap();

        let mut killers = KillerTable::new();
        killers.record(3, killer);

        let order = order_moves(&pos, &moves, Move::null(), Some((&killers, 3)));
        assert_eq!(moves[order[0]], killer);
    }
}
