//! Iterative deepening with aspiration windows, and the time-bounded
//! driver that runs it on a background thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;

use crate::board::{Move, Position};

use super::alphabeta::SearchContext;
use super::{Search, SearchStats, MATE_RANGE, MAX_DEPTH, MAX_SCORE};

/// Starting half-width of the aspiration window around the previous
/// depth's score.
const ASPIRATION_DELTA: i32 = 50;

impl Search {
    /// Search one depth. Depths after the first open with a narrow window
    /// around the previous score and widen geometrically on failure until
    /// the true score is bracketed.
    ///
    /// Returns `None` when the search was cancelled mid-depth or the side
    /// to move has no move that avoids immediate loss.
    pub(super) fn search_root(
        &mut self,
        pos: &mut Position,
        depth: i32,
        previous_score: i32,
        stop: Option<&AtomicBool>,
    ) -> Option<(i32, Move)> {
        let mut delta = ASPIRATION_DELTA;
        let (mut alpha, mut beta) = if depth <= 1 {
            (-MAX_SCORE, MAX_SCORE)
        } else {
            (previous_score - delta, previous_score + delta)
        };

        loop {
            let mut ctx = SearchContext::new(self, pos, depth, stop);
            let score = ctx.alphabeta(depth, alpha, beta);
            let aborted = ctx.aborted;
            let root_best = ctx.root_best;

            if aborted {
                return None;
            }
            if score <= alpha && alpha > -MAX_SCORE {
                delta *= 2;
                alpha = (previous_score - delta).max(-MAX_SCORE);
                continue;
            }
            if score >= beta && beta < MAX_SCORE {
                delta *= 2;
                beta = (previous_score + delta).min(MAX_SCORE);
                continue;
            }
            return root_best.map(|mv| (score, mv));
        }
    }
}

/// Deepen on a background thread while the caller sleeps off the budget,
/// then signal the stop flag and join. Only fully completed depths
/// publish a best move; a depth cut short by the flag is discarded.
pub(super) fn deepen_for(
    search: &mut Search,
    pos: &Position,
    budget: Duration,
    stop: &AtomicBool,
) -> Option<Move> {
    search.stats = SearchStats::default();
    let published: Mutex<Option<Move>> = Mutex::new(None);
    let mut worker_pos = pos.clone();

    thread::scope(|scope| {
        let published = &published;
        scope.spawn(move || {
            let mut previous_score = 0;
            for depth in 1..=MAX_DEPTH {
                if stop.load(Ordering::Relaxed) {
                    break;
                }
                match search.search_root(&mut worker_pos, depth, previous_score, Some(stop)) {
                    Some((score, mv)) => {
                        previous_score = score;
                        *published.lock() = Some(mv);
                        search.stats.depth_reached = depth;
                        log::debug!(
                            "depth {depth} best {mv} score {score} nodes {}",
                            search.stats.nodes
                        );
                        if score.abs() >= MAX_SCORE - MATE_RANGE {
                            break;
                        }
                    }
                    None => break,
                }
            }
        });

        thread::sleep(budget);
        stop.store(true, Ordering::Relaxed);
    });

    let best = *published.lock();
    best
}
