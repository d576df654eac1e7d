//! Transposition table.
//!
//! A fixed-capacity array of single slots indexed by `hash % capacity`.
//! Writes always overwrite (no depth-preferred replacement) and distinct
//! positions may alias the same slot, so callers must compare the stored
//! hash against their own before trusting anything in the entry.

use crate::board::{Move, EMPTY_MOVE};

/// How a stored score relates to the true minimax score.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    /// The score is the true minimax value.
    Exact,
    /// The true value is at least the stored score (beta cutoff).
    Lower,
    /// The true value is at most the stored score (no move reached alpha).
    Upper,
}

/// One table slot. `depth` is the remaining search depth the score was
/// computed at; quiescence nodes store negative depths so they never
/// satisfy a main-search depth requirement.
#[derive(Clone, Copy, Debug)]
pub struct TtEntry {
    pub hash: u64,
    pub depth: i32,
    pub bound: Bound,
    pub score: i32,
    pub best_move: Move,
}

impl Default for TtEntry {
    fn default() -> Self {
        TtEntry {
            hash: 0,
            depth: 0,
            bound: Bound::Upper,
            score: 0,
            best_move: EMPTY_MOVE,
        }
    }
}

/// Single-slot always-replace transposition table.
pub struct TranspositionTable {
    entries: Vec<TtEntry>,
}

impl TranspositionTable {
    /// Allocate a table using roughly `size_mb` megabytes.
    #[must_use]
    pub fn new(size_mb: usize) -> Self {
        let capacity = (size_mb * 1024 * 1024 / std::mem::size_of::<TtEntry>()).max(1);
        TranspositionTable {
            entries: vec![TtEntry::default(); capacity],
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// The slot a hash maps to. The stored hash may belong to a different
    /// position; verify before use.
    #[inline]
    #[must_use]
    pub fn entry(&self, hash: u64) -> &TtEntry {
        &self.entries[(hash % self.entries.len() as u64) as usize]
    }

    /// Overwrite the slot for `hash`.
    pub fn store(&mut self, hash: u64, depth: i32, bound: Bound, score: i32, best_move: Move) {
        let idx = (hash % self.entries.len() as u64) as usize;
        self.entries[idx] = TtEntry {
            hash,
            depth,
            bound,
            score,
            best_move,
        };
    }

    /// Reset every slot, as for a new game.
    pub fn clear(&mut self) {
        for entry in &mut self.entries {
            *entry = TtEntry::default();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Move, Square};

    #[test]
    fn store_then_probe_round_trips() {
        let mut tt = TranspositionTable::new(1);
        let mv = Move::new(Square(1, 4), Square(3, 4));
        tt.store(0xDEAD_BEEF, 5, Bound::Exact, 42, mv);

        let entry = tt.entry(0xDEAD_BEEF);
        assert_eq!(entry.hash, 0xDEAD_BEEF);
        assert_eq!(entry.depth, 5);
        assert_eq!(entry.bound, Bound::Exact);
        assert_eq!(entry.score, 42);
        assert_eq!(entry.best_move, mv);
    }

    #[test]
    fn unrelated_hash_does_not_match() {
        let mut tt = TranspositionTable::new(1);
        tt.store(1, 3, Bound::Lower, 10, Move::null());

        let entry = tt.entry(2);
        assert_ne!(entry.hash, 2);
    }

    #[test]
    fn aliasing_hashes_overwrite_the_slot() {
        let mut tt = TranspositionTable::new(1);
        let capacity = tt.capacity() as u64;
        let first = 7;
        let second = 7 + capacity;

        tt.store(first, 4, Bound::Exact, 1, Move::null());
        tt.store(second, 2, Bound::Upper, -1, Move::null());

        // Always-replace: the shallower later write wins the slot, and the
        // stored hash exposes the aliasing to the caller.
        let entry = tt.entry(first);
        assert_eq!(entry.hash, second);
        assert_eq!(entry.depth, 2);
    }

    #[test]
    fn clear_resets_entries() {
        let mut tt = TranspositionTable::new(1);
        tt.store(99, 6, Bound::Exact, 7, Move::null());
        tt.clear();
        assert_eq!(tt.entry(99).hash, 0);
    }
}
