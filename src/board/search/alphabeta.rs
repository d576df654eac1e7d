//! Negamax alpha-beta with quiescence extension.
//!
//! Legality is handled lazily: moves are pseudo-legal, and a child that
//! could capture the king returns `MAX_SCORE` immediately, which the
//! parent sees as a losing reply. A node where every reply loses the king
//! runs a one-ply lookahead with the turn flipped to tell checkmate
//! (opponent attacks the king right now) from stalemate.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::board::{Move, Piece, Position, EMPTY_MOVE};
use crate::tt::{Bound, TranspositionTable};

use super::move_order::order_moves;
use super::{KillerTable, Search, SearchStats, MATE_RANGE, MAX_SCORE};

/// Borrowed state for one search invocation. The root depth identifies
/// the ply whose best move is published.
pub(super) struct SearchContext<'a> {
    pos: &'a mut Position,
    tt: &'a mut TranspositionTable,
    killers: &'a mut KillerTable,
    stats: &'a mut SearchStats,
    stop: Option<&'a AtomicBool>,
    root_depth: i32,
    disambiguating: bool,
    pub(super) root_best: Option<Move>,
    pub(super) aborted: bool,
}

impl<'a> SearchContext<'a> {
    pub(super) fn new(
        search: &'a mut Search,
        pos: &'a mut Position,
        root_depth: i32,
        stop: Option<&'a AtomicBool>,
    ) -> Self {
        SearchContext {
            pos,
            tt: &mut search.tt,
            killers: &mut search.killers,
            stats: &mut search.stats,
            stop,
            root_depth,
            disambiguating: false,
            root_best: None,
            aborted: false,
        }
    }

    /// Fail-hard negamax. When `aborted` is set on return the score is
    /// garbage and must not be stored or published.
    pub(super) fn alphabeta(&mut self, depth: i32, mut alpha: i32, beta: i32) -> i32 {
        if let Some(stop) = self.stop {
            if stop.load(Ordering::Relaxed) {
                self.aborted = true;
                return 0;
            }
        }
        if depth <= 0 {
            return self.quiescence(depth, alpha, beta);
        }
        self.stats.nodes += 1;

        let at_root = depth == self.root_depth && !self.disambiguating;
        let hash = self.pos.hash();
        let mut hash_move = EMPTY_MOVE;
        let entry = *self.tt.entry(hash);
        if entry.hash == hash {
            hash_move = entry.best_move;
            // Cutting off at the root would return a score without a best
            // move; the root always searches so one gets set.
            if entry.depth >= depth && !at_root {
                self.stats.tt_hits += 1;
                match entry.bound {
                    Bound::Exact => return entry.score,
                    Bound::Lower if entry.score >= beta => return beta,
                    _ => {}
                }
            }
        } else {
            self.stats.tt_misses += 1;
        }

        let moves = self.pos.generate_moves(true);
        if moves.is_empty() {
            return 0;
        }
        let order = order_moves(self.pos, &moves, hash_move, Some((&*self.killers, depth)));

        let mut max_score = -MAX_SCORE;
        let mut best = EMPTY_MOVE;
        let mut bound = Bound::Upper;

        for idx in order {
            let mv = moves[idx];
            // The previous ply left its king en prise; this position is won.
            if matches!(self.pos.at(mv.to), Some((_, Piece::King))) {
                if at_root {
                    self.root_best = Some(mv);
                }
                return MAX_SCORE;
            }

            let quiet = self.pos.is_empty(mv.to);
            self.pos.make_move(mv);
            let mut score = -self.alphabeta(depth - 1, -beta, -alpha);
            self.pos.unmake_move();
            if self.aborted {
                return 0;
            }

            // Prefer shorter mates: one point off per ply of distance.
            if score > MAX_SCORE - MATE_RANGE {
                score -= 1;
            }

            if score > alpha {
                bound = Bound::Exact;
                alpha = score;
            }
            if score >= beta {
                self.tt.store(hash, depth, Bound::Lower, score, mv);
                if quiet {
                    self.killers.record(depth, mv);
                }
                return beta;
            }
            if score > max_score {
                max_score = score;
                best = mv;
                if at_root {
                    self.root_best = Some(mv);
                }
            }
        }

        if max_score == -MAX_SCORE {
            // Every reply loses the king. If the opponent could take it
            // with the move as it stands, this is mate; otherwise stalemate.
            self.pos.switch_turn();
            let was_disambiguating = self.disambiguating;
            self.disambiguating = true;
            let reply = self.alphabeta(1, -beta, -alpha);
            self.disambiguating = was_disambiguating;
            self.pos.switch_turn();
            if self.aborted {
                return 0;
            }
            return if reply == MAX_SCORE { -MAX_SCORE } else { 0 };
        }

        self.tt.store(hash, depth, bound, max_score, best);
        max_score
    }

    /// Captures-only extension below depth 0, with the static evaluation
    /// as a standing-pat floor.
    fn quiescence(&mut self, depth: i32, mut alpha: i32, beta: i32) -> i32 {
        self.stats.nodes += 1;

        let hash = self.pos.hash();
        let mut hash_move = EMPTY_MOVE;
        let entry = *self.tt.entry(hash);
        if entry.hash == hash {
            hash_move = entry.best_move;
            if entry.depth >= depth {
                self.stats.tt_hits += 1;
                match entry.bound {
                    Bound::Exact => return entry.score,
                    Bound::Lower if entry.score >= beta => return beta,
                    _ => {}
                }
            }
        } else {
            self.stats.tt_misses += 1;
        }

        let moves = self.pos.generate_moves(false);
        let order = order_moves(self.pos, &moves, hash_move, None);

        let mut max_score = self.pos.evaluate();
        let mut best = EMPTY_MOVE;
        let mut bound = Bound::Upper;

        for idx in order {
            let mv = moves[idx];
            if matches!(self.pos.at(mv.to), Some((_, Piece::King))) {
                return MAX_SCORE;
            }
            if self.pos.is_empty(mv.to) {
                continue;
            }

            self.pos.make_move(mv);
            let score = -self.quiescence(depth - 1, -beta, -alpha);
            self.pos.unmake_move();

            if score > alpha {
                bound = Bound::Exact;
                alpha = score;
                best = mv;
            }
            if score >= beta {
                self.tt.store(hash, depth, Bound::Lower, score, mv);
                return beta;
            }
            if score > max_score {
                max_score = score;
            }
        }

        self.tt.store(hash, depth, bound, max_score, best);
        max_score
    }
}

impl Search {
    /// One full-window search to `depth`, used by the mate probe.
    pub(super) fn probe_score(&mut self, pos: &mut Position, depth: i32) -> i32 {
        let mut ctx = SearchContext::new(self, pos, depth, None);
        ctx.alphabeta(depth, -MAX_SCORE, MAX_SCORE)
    }
}
