//! Opening book.
//!
//! Text format, one block per position:
//!
//! ```text
//! pos <FEN>
//! <move> <count>
//! <move> <count>
//! ```
//!
//! Positions are keyed by Zobrist hash; lookup picks among the stored
//! moves at random, weighted by how often each was played.

use std::collections::HashMap;
use std::path::Path;

use rand::Rng;

use crate::board::error::BookError;
use crate::board::{parse_move, Move, Position};

#[derive(Clone, Copy, Debug)]
struct BookMove {
    mv: Move,
    count: u32,
}

/// A hash-keyed map of opening positions to weighted move lists.
#[derive(Debug, Default)]
pub struct OpeningBook {
    positions: HashMap<u64, Vec<BookMove>>,
}

impl OpeningBook {
    /// An empty book; every lookup misses.
    #[must_use]
    pub fn new() -> Self {
        OpeningBook::default()
    }

    /// Load a book file from disk.
    pub fn try_from_path(path: &Path) -> Result<OpeningBook, BookError> {
        let text = std::fs::read_to_string(path).map_err(|e| BookError::Io {
            message: e.to_string(),
        })?;
        let book = Self::try_from_str(&text)?;
        log::debug!(
            "loaded opening book: {} positions from {}",
            book.len(),
            path.display()
        );
        Ok(book)
    }

    /// Parse book text. A blank line ends the book.
    pub fn try_from_str(text: &str) -> Result<OpeningBook, BookError> {
        let mut positions: HashMap<u64, Vec<BookMove>> = HashMap::new();
        let mut current_hash = None;

        for line in text.lines() {
            if line.is_empty() {
                break;
            }
            if let Some(fen) = line.strip_prefix("pos ") {
                let pos =
                    Position::try_from_fen(fen).map_err(|_| BookError::InvalidPosition {
                        line: line.to_string(),
                    })?;
                let hash = pos.hash();
                if positions.contains_key(&hash) {
                    return Err(BookError::DuplicatePosition {
                        line: line.to_string(),
                    });
                }
                positions.insert(hash, Vec::new());
                current_hash = Some(hash);
            } else {
                let invalid = || BookError::InvalidMoveLine {
                    line: line.to_string(),
                };
                let hash = current_hash.ok_or_else(invalid)?;
                let mut parts = line.split(' ');
                let move_text = parts.next().ok_or_else(invalid)?;
                let count_text = parts.next().ok_or_else(invalid)?;
                if parts.next().is_some() {
                    return Err(invalid());
                }
                let mv = parse_move(move_text).map_err(|_| invalid())?;
                let count: u32 = count_text.parse().map_err(|_| invalid())?;
                if let Some(moves) = positions.get_mut(&hash) {
                    moves.push(BookMove { mv, count });
                }
            }
        }

        Ok(OpeningBook { positions })
    }

    /// Number of positions in the book.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// A book move for the position with this hash, chosen at random
    /// weighted by play count. `None` when the position is out of book.
    #[must_use]
    pub fn lookup(&self, hash: u64) -> Option<Move> {
        let moves = self.positions.get(&hash)?;
        let total: u32 = moves.iter().map(|m| m.count).sum();
        if total == 0 {
            return None;
        }
        let mut remaining = rand::thread_rng().gen_range(0..total);
        for entry in moves {
            if remaining < entry.count {
                log::debug!("book hit: {}", entry.mv);
                return Some(entry.mv);
            }
            remaining -= entry.count;
        }
        None
    }
}
