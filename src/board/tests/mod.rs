//! Board module tests.
//!
//! Organized by category:
//! - `fen.rs` - position and move text codecs
//! - `make_unmake.rs` - reversible move application
//! - `castling.rs` - castling generation and rights tracking
//! - `perft.rs` - move generation node counts
//! - `search.rs` - search behavior on known positions
//! - `proptest.rs` - property-based tests

mod fen;
mod perft;
mod proptest;
