//! Reversible move application.
//!
//! `make_move` derives castling, en passant, and promotion from board
//! content and the destination square; nothing beyond from/to is stored on
//! the `Move` itself. Every permanent side effect is captured in an
//! `UndoRecord` so `unmake_move` can reverse the ply exactly, hash included.

use super::state::{SpecialMove, UndoRecord};
use super::{Move, Piece, Position, Square};

impl Position {
    /// Apply `mv` for the side to move and switch the turn.
    ///
    /// The move must come from the pseudo-legal move list; callers wanting
    /// full legality go through `is_move_valid`.
    ///
    /// # Panics
    /// Panics if the from-square is empty.
    pub fn make_move(&mut self, mv: Move) {
        let (color, piece) = self.at(mv.from).expect("make_move: from-square empty");
        let previous_en_passant_file = self.en_passant_file;
        let mut captured = self.at(mv.to);
        let mut special = SpecialMove::Normal;

        // Castling: a king moving two files from its home square drags the
        // rook along.
        let home = Square(color.back_rank(), 4);
        if piece == Piece::King && mv.from == home && mv.from.file().abs_diff(mv.to.file()) == 2 {
            let rank = color.back_rank();
            let (rook_from, rook_to) = if mv.to.file() == 6 { (7, 5) } else { (0, 3) };
            self.set_square(Square(rank, rook_to), Some((color, Piece::Rook)));
            self.set_square(Square(rank, rook_from), None);
        }

        // En passant: a pawn moving diagonally into an empty destination
        // captures the pawn on its own rank at the destination file.
        if piece == Piece::Pawn && mv.from.file() != mv.to.file() && captured.is_none() {
            let victim = Square(mv.from.rank(), mv.to.file());
            captured = self.at(victim);
            self.set_square(victim, None);
            special = SpecialMove::EnPassantCapture;
        }

        // Castling rights: any king move revokes both flags for that color,
        // a rook move off its home corner revokes that side only.
        if piece == Piece::King {
            let had_k = self.castling_rights.has(color, true);
            let had_q = self.castling_rights.has(color, false);
            special = match (had_k, had_q) {
                (true, true) => SpecialMove::LostBothCastle,
                (true, false) => SpecialMove::LostCastleKingSide,
                (false, true) => SpecialMove::LostCastleQueenSide,
                (false, false) => special,
            };
            self.set_castling_right(color, true, false);
            self.set_castling_right(color, false, false);
        } else if piece == Piece::Rook && mv.from.rank() == color.back_rank() {
            if mv.from.file() == 7 && self.castling_rights.has(color, true) {
                self.set_castling_right(color, true, false);
                special = SpecialMove::LostCastleKingSide;
            } else if mv.from.file() == 0 && self.castling_rights.has(color, false) {
                self.set_castling_right(color, false, false);
                special = SpecialMove::LostCastleQueenSide;
            }
        }

        self.set_square(mv.to, Some((color, piece)));
        self.set_square(mv.from, None);

        let mut promoted = false;
        if piece == Piece::Pawn && mv.to.rank() == color.pawn_promotion_rank() {
            self.set_square(mv.to, Some((color, Piece::Queen)));
            promoted = true;
        }

        // The en-passant file is live only for the single reply to a
        // double pawn push.
        if piece == Piece::Pawn && mv.from.rank().abs_diff(mv.to.rank()) == 2 {
            self.set_en_passant_file(Some(mv.from.file()));
        } else {
            self.set_en_passant_file(None);
        }

        self.history.push(UndoRecord {
            mv,
            captured,
            promoted,
            special,
            previous_en_passant_file,
        });
        self.switch_turn();
    }

    /// Reverse the most recent `make_move`, restoring board, rights,
    /// en-passant file, turn, and hash bit-for-bit.
    ///
    /// # Panics
    /// Panics if no move has been applied.
    pub fn unmake_move(&mut self) {
        let record = self
            .history
            .pop()
            .expect("unmake_move: history stack empty");
        self.switch_turn();

        let mv = record.mv;
        let color = self.side_to_move;
        let (_, piece_at_to) = self.at(mv.to).expect("unmake_move: to-square empty");
        let mover = if record.promoted {
            Piece::Pawn
        } else {
            piece_at_to
        };

        // Undo the rook relocation of a castling move (derived the same way
        // make_move derived it).
        let home = Square(color.back_rank(), 4);
        if mover == Piece::King && mv.from == home && mv.from.file().abs_diff(mv.to.file()) == 2 {
            let rank = color.back_rank();
            let (rook_from, rook_to) = if mv.to.file() == 6 { (7, 5) } else { (0, 3) };
            self.set_square(Square(rank, rook_from), Some((color, Piece::Rook)));
            self.set_square(Square(rank, rook_to), None);
        }

        self.set_square(mv.from, Some((color, mover)));
        if record.special == SpecialMove::EnPassantCapture {
            self.set_square(mv.to, None);
            self.set_square(Square(mv.from.rank(), mv.to.file()), record.captured);
        } else {
            self.set_square(mv.to, record.captured);
        }

        match record.special {
            SpecialMove::LostCastleKingSide => self.set_castling_right(color, true, true),
            SpecialMove::LostCastleQueenSide => self.set_castling_right(color, false, true),
            SpecialMove::LostBothCastle => {
                self.set_castling_right(color, true, true);
                self.set_castling_right(color, false, true);
            }
            SpecialMove::Normal | SpecialMove::EnPassantCapture => {}
        }

        self.set_en_passant_file(record.previous_en_passant_file);
    }
}
