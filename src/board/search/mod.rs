//! Search engine: iterative-deepening negamax alpha-beta with quiescence
//! extension, transposition table, move ordering, and a time-bounded
//! variant driven by a single background thread.

mod alphabeta;
mod iterative;
mod move_order;

use std::sync::atomic::AtomicBool;
use std::time::Duration;

use crate::board::{Move, Position, EMPTY_MOVE};
use crate::tt::TranspositionTable;

pub use crate::board::eval::MAX_SCORE;

/// Scores within this distance of `MAX_SCORE` are forced mates; the
/// per-ply decrement that prefers shorter mates stays inside this band.
pub(crate) const MATE_RANGE: i32 = 128;

/// Deepest remaining depth the killer table is indexed by.
pub(crate) const MAX_DEPTH: i32 = 64;

/// Default transposition table budget in megabytes.
pub const DEFAULT_TT_MB: usize = 64;

/// Two refuting quiet moves per remaining depth. Heuristic noise carries
/// over between searches on purpose; the slots are never cleared.
pub(crate) struct KillerTable {
    slots: [[Move; 2]; MAX_DEPTH as usize],
    cursor: [usize; MAX_DEPTH as usize],
}

impl KillerTable {
    fn new() -> Self {
        KillerTable {
            slots: [[EMPTY_MOVE; 2]; MAX_DEPTH as usize],
            cursor: [0; MAX_DEPTH as usize],
        }
    }

    pub(crate) fn matches(&self, depth: i32, mv: Move) -> bool {
        let Some(slots) = self.slots_at(depth) else {
            return false;
        };
        slots[0] == mv || slots[1] == mv
    }

    pub(crate) fn record(&mut self, depth: i32, mv: Move) {
        if self.matches(depth, mv) {
            return;
        }
        if let Ok(idx) = usize::try_from(depth) {
            if idx < MAX_DEPTH as usize {
                self.slots[idx][self.cursor[idx]] = mv;
                self.cursor[idx] ^= 1;
            }
        }
    }

    fn slots_at(&self, depth: i32) -> Option<&[Move; 2]> {
        usize::try_from(depth)
            .ok()
            .filter(|&idx| idx < MAX_DEPTH as usize)
            .map(|idx| &self.slots[idx])
    }
}

/// Counters accumulated over one search invocation.
#[derive(Clone, Copy, Debug, Default)]
pub struct SearchStats {
    pub nodes: u64,
    pub tt_hits: u64,
    pub tt_misses: u64,
    pub depth_reached: i32,
}

/// A search engine instance: transposition table, killer slots, and
/// per-invocation statistics. One engine serves one search at a time;
/// nothing here is synchronized.
pub struct Search {
    tt: TranspositionTable,
    killers: KillerTable,
    stats: SearchStats,
}

impl Search {
    #[must_use]
    pub fn new(tt_size_mb: usize) -> Self {
        Search {
            tt: TranspositionTable::new(tt_size_mb),
            killers: KillerTable::new(),
            stats: SearchStats::default(),
        }
    }

    #[must_use]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Drop all cached search state, as for a new game.
    pub fn reset(&mut self) {
        self.tt.clear();
    }

    /// Search to a fixed depth and return the best move, or `None` when
    /// the side to move has no legal continuation.
    pub fn find_best_move(&mut self, pos: &mut Position, depth: i32) -> Option<Move> {
        self.stats = SearchStats::default();
        let mut best = None;
        let mut previous_score = 0;
        for d in 1..=depth {
            match self.search_root(pos, d, previous_score, None) {
                Some((score, mv)) => {
                    previous_score = score;
                    best = Some(mv);
                    self.stats.depth_reached = d;
                    log::debug!("depth {d} best {mv} score {score}");
                    if score.abs() >= MAX_SCORE - MATE_RANGE {
                        break;
                    }
                }
                None => break,
            }
        }
        best
    }

    /// Search for a fixed wall-clock budget on a background thread and
    /// return the best move of the deepest fully completed depth.
    pub fn find_best_move_in_time(&mut self, pos: &Position, budget: Duration) -> Option<Move> {
        let stop = AtomicBool::new(false);
        iterative::deepen_for(self, pos, budget, &stop)
    }

    /// Shallow two-ply probe: is the side to move checkmated?
    pub fn is_in_mate(&mut self, pos: &mut Position) -> bool {
        let score = self.probe_score(pos, 2);
        score == -MAX_SCORE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Square;

    fn mv(from: usize, to: usize) -> Move {
        Move::new(Square::from_index(from), Square::from_index(to))
    }

    #[test]
    fn killer_table_holds_two_slots_per_depth() {
        let mut killers = KillerTable::new();
        killers.record(4, mv(8, 16));
        killers.record(4, mv(9, 17));
        assert!(killers.matches(4, mv(8, 16)));
        assert!(killers.matches(4, mv(9, 17)));
        assert!(!killers.matches(3, mv(8, 16)));
    }

    #[test]
    fn third_killer_evicts_the_oldest() {
        let mut killers = KillerTable::new();
        killers.record(2, mv(8, 16));
        killers.record(2, mv(9, 17));
        killers.record(2, mv(10, 18));
        assert!(!killers.matches(2, mv(8, 16)));
        assert!(killers.matches(2, mv(9, 17)));
        assert!(killers.matches(2, mv(10, 18)));
    }

    #[test]
    fn recording_a_present_killer_is_a_no_op() {
        let mut killers = KillerTable::new();
        killers.record(5, mv(8, 16));
        killers.record(5, mv(8, 16));
        killers.record(5, mv(9, 17));
        assert!(killers.matches(5, mv(8, 16)));
        assert!(killers.matches(5, mv(9, 17)));
    }

    #[test]
    fn out_of_range_depths_are_ignored() {
        let mut killers = KillerTable::new();
        killers.record(-1, mv(8, 16));
        killers.record(MAX_DEPTH + 1, mv(8, 16));
        assert!(!killers.matches(-1, mv(8, 16)));
        assert!(!killers.matches(MAX_DEPTH + 1, mv(8, 16)));
    }
}
