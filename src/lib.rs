//! Knightfall, a UCI chess engine.
//!
//! The `board` module owns the rules: position state, move generation,
//! reversible make/unmake, evaluation, and the search engine. Around it
//! sit the transposition table, the opening book, and the UCI protocol
//! loop.

pub mod board;
pub mod book;
pub mod tt;
pub mod uci;
pub mod zobrist;

pub use board::search::Search;
pub use board::{Move, Position};
pub use book::OpeningBook;
pub use tt::TranspositionTable;
