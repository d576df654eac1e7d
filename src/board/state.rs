//! Position state: mailbox board, side to move, castling rights,
//! en-passant file, and the incrementally maintained Zobrist hash.
//!
//! Every mutation goes through `set_square` / `switch_turn` /
//! `set_castling_right` / `set_en_passant_file`, each of which toggles the
//! matching Zobrist keys before writing. The incremental hash therefore
//! always equals what `recompute_hash` would produce from scratch.

use crate::zobrist::ZOBRIST;

use super::{CastlingRights, Color, Move, Piece, Square};

/// Which permanent side effects a move had, recorded for exact reversal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SpecialMove {
    Normal,
    LostCastleKingSide,
    LostCastleQueenSide,
    LostBothCastle,
    EnPassantCapture,
}

/// One entry of the Position-owned undo stack, pushed by `make_move` and
/// consumed by `unmake_move`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct UndoRecord {
    pub(crate) mv: Move,
    pub(crate) captured: Option<(Color, Piece)>,
    pub(crate) promoted: bool,
    pub(crate) special: SpecialMove,
    pub(crate) previous_en_passant_file: Option<usize>,
}

/// The mutable board position.
#[derive(Clone, Debug)]
pub struct Position {
    pub(crate) squares: [Option<(Color, Piece)>; 64],
    pub(crate) side_to_move: Color,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant_file: Option<usize>,
    pub(crate) hash: u64,
    pub(crate) history: Vec<UndoRecord>,
}

impl Position {
    /// An empty board, White to move, no rights, no en-passant file.
    #[must_use]
    pub fn empty() -> Self {
        Position {
            squares: [None; 64],
            side_to_move: Color::White,
            castling_rights: CastlingRights::none(),
            en_passant_file: None,
            hash: 0,
            history: Vec::new(),
        }
    }

    /// The standard chess starting position.
    #[must_use]
    pub fn start() -> Self {
        let mut pos = Position::empty();
        let back_rank = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        for (file, piece) in back_rank.iter().enumerate() {
            pos.set_square(Square(0, file), Some((Color::White, *piece)));
            pos.set_square(Square(1, file), Some((Color::White, Piece::Pawn)));
            pos.set_square(Square(6, file), Some((Color::Black, Piece::Pawn)));
            pos.set_square(Square(7, file), Some((Color::Black, *piece)));
        }
        for color in Color::BOTH {
            pos.set_castling_right(color, true, true);
            pos.set_castling_right(color, false, true);
        }
        pos
    }

    /// The piece (with owner) on a square, if any.
    #[inline]
    #[must_use]
    pub fn at(&self, sq: Square) -> Option<(Color, Piece)> {
        self.squares[sq.as_index()]
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.squares[sq.as_index()].is_none()
    }

    /// The color of the piece on a square, if any.
    #[inline]
    #[must_use]
    pub fn color_at(&self, sq: Square) -> Option<Color> {
        self.at(sq).map(|(color, _)| color)
    }

    #[inline]
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    #[must_use]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    #[inline]
    #[must_use]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[inline]
    #[must_use]
    pub fn en_passant_file(&self) -> Option<usize> {
        self.en_passant_file
    }

    /// Number of plies currently applied on the undo stack.
    #[inline]
    #[must_use]
    pub fn ply(&self) -> usize {
        self.history.len()
    }

    /// Place `piece` on `sq`, toggling the Zobrist keys of both the old and
    /// the new occupant. No-op when the content does not change.
    pub(crate) fn set_square(&mut self, sq: Square, piece: Option<(Color, Piece)>) {
        let idx = sq.as_index();
        let old = self.squares[idx];
        if old == piece {
            return;
        }
        if let Some((color, old_piece)) = old {
            self.hash ^= ZOBRIST.piece_keys[old_piece.index()][color.index()][idx];
        }
        if let Some((color, new_piece)) = piece {
            self.hash ^= ZOBRIST.piece_keys[new_piece.index()][color.index()][idx];
        }
        self.squares[idx] = piece;
    }

    /// Flip the side to move, toggling the turn key.
    pub(crate) fn switch_turn(&mut self) {
        self.side_to_move = self.side_to_move.opponent();
        self.hash ^= ZOBRIST.black_to_move_key;
    }

    /// Set or clear one castling-rights flag. The Zobrist key toggles only
    /// on an actual change.
    pub(crate) fn set_castling_right(&mut self, color: Color, kingside: bool, allowed: bool) {
        if self.castling_rights.has(color, kingside) == allowed {
            return;
        }
        self.hash ^= ZOBRIST.castling_keys[color.index()][usize::from(!kingside)];
        if allowed {
            self.castling_rights.set(color, kingside);
        } else {
            self.castling_rights.remove(color, kingside);
        }
    }

    /// Change the en-passant file, toggling the old file key out and the
    /// new one in.
    pub(crate) fn set_en_passant_file(&mut self, file: Option<usize>) {
        if self.en_passant_file == file {
            return;
        }
        if let Some(old) = self.en_passant_file {
            self.hash ^= ZOBRIST.en_passant_keys[old];
        }
        if let Some(new) = file {
            self.hash ^= ZOBRIST.en_passant_keys[new];
        }
        self.en_passant_file = file;
    }

    /// The square of `color`'s king. Returns `None` only for malformed
    /// boards (search treats a captured king as an immediate mate signal).
    #[must_use]
    pub(crate) fn king_square(&self, color: Color) -> Option<Square> {
        for idx in 0..64 {
            if self.squares[idx] == Some((color, Piece::King)) {
                return Some(Square::from_index(idx));
            }
        }
        None
    }

    /// From-scratch hash over (board, rights, ep-file, turn). The reference
    /// the incremental hash must always agree with.
    #[must_use]
    pub fn recompute_hash(&self) -> u64 {
        let mut hash: u64 = 0;
        for idx in 0..64 {
            if let Some((color, piece)) = self.squares[idx] {
                hash ^= ZOBRIST.piece_keys[piece.index()][color.index()][idx];
            }
        }
        if self.side_to_move == Color::Black {
            hash ^= ZOBRIST.black_to_move_key;
        }
        for color in Color::BOTH {
            if self.castling_rights.has(color, true) {
                hash ^= ZOBRIST.castling_keys[color.index()][0];
            }
            if self.castling_rights.has(color, false) {
                hash ^= ZOBRIST.castling_keys[color.index()][1];
            }
        }
        if let Some(file) = self.en_passant_file {
            hash ^= ZOBRIST.en_passant_keys[file];
        }
        hash
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::start()
    }
}
