//! Chess board representation and rules.
//!
//! The board is a 64-slot mailbox of `Option<(Color, Piece)>` with a
//! Zobrist hash maintained incrementally through every mutation. Moves are
//! applied reversibly: `make_move` pushes an undo record, `unmake_move`
//! pops it and restores the position bit-for-bit.

pub mod error;
mod eval;
mod fen;
mod make_unmake;
mod movegen;
pub mod search;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use eval::MAX_SCORE;
pub use fen::parse_move;
pub use state::Position;
pub use types::{CastlingRights, Color, Move, MoveList, Piece, Square};

pub(crate) use types::{file_to_index, rank_to_index, EMPTY_MOVE};
