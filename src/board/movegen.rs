//! Pseudo-legal move generation, attack detection, and legality checks.
//!
//! Generation is pseudo-legal: a move may leave the mover's own king in
//! check. The search exploits this (a captured king deep in the tree is an
//! immediate mate signal); callers needing strict legality use
//! `is_move_valid` or `legal_moves`.

use super::{Color, Move, MoveList, Piece, Position, Square};

const KNIGHT_OFFSETS: [(isize, isize); 8] = [
    (-1, -2),
    (-2, -1),
    (1, -2),
    (2, -1),
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
];

const KING_OFFSETS: [(isize, isize); 8] = [
    (0, 1),
    (1, 0),
    (-1, 0),
    (0, -1),
    (-1, -1),
    (1, -1),
    (1, 1),
    (-1, 1),
];

const BISHOP_DIRECTIONS: [(isize, isize); 4] = [(-1, -1), (1, -1), (1, 1), (-1, 1)];
const ROOK_DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (-1, 0), (0, -1)];

impl Position {
    /// Generate all pseudo-legal moves for the side to move.
    ///
    /// `include_castling` is disabled when computing attack sets, which
    /// keeps the castling legality test from recursing into itself.
    #[must_use]
    pub fn generate_moves(&self, include_castling: bool) -> MoveList {
        self.generate_moves_for(self.side_to_move, include_castling)
    }

    pub(crate) fn generate_moves_for(&self, color: Color, include_castling: bool) -> MoveList {
        let mut moves = MoveList::new();
        for idx in 0..64 {
            let Some((owner, piece)) = self.squares[idx] else {
                continue;
            };
            if owner != color {
                continue;
            }
            let from = Square::from_index(idx);
            match piece {
                Piece::Pawn => self.generate_pawn_moves(from, color, &mut moves),
                Piece::Knight => {
                    self.generate_offset_moves(from, color, &KNIGHT_OFFSETS, &mut moves);
                }
                Piece::Bishop => {
                    self.generate_sliding_moves(from, color, &BISHOP_DIRECTIONS, &mut moves);
                }
                Piece::Rook => {
                    self.generate_sliding_moves(from, color, &ROOK_DIRECTIONS, &mut moves);
                }
                Piece::Queen => {
                    self.generate_sliding_moves(from, color, &BISHOP_DIRECTIONS, &mut moves);
                    self.generate_sliding_moves(from, color, &ROOK_DIRECTIONS, &mut moves);
                }
                Piece::King => {
                    self.generate_offset_moves(from, color, &KING_OFFSETS, &mut moves);
                    if include_castling {
                        self.generate_castling_moves(from, color, &mut moves);
                    }
                }
            }
        }
        moves
    }

    fn generate_pawn_moves(&self, from: Square, color: Color, moves: &mut MoveList) {
        let dir = color.pawn_direction();

        if let Some(up1) = from.offset(dir, 0) {
            if self.is_empty(up1) {
                moves.push(Move::new(from, up1));
                if from.rank() == color.pawn_start_rank() {
                    if let Some(up2) = up1.offset(dir, 0) {
                        if self.is_empty(up2) {
                            moves.push(Move::new(from, up2));
                        }
                    }
                }
            }
        }

        for df in [-1, 1] {
            let Some(diag) = from.offset(dir, df) else {
                continue;
            };
            if self.color_at(diag) == Some(color.opponent()) {
                moves.push(Move::new(from, diag));
            } else if self.is_empty(diag)
                && from.rank() == color.en_passant_rank()
                && self.en_passant_file == Some(diag.file())
            {
                moves.push(Move::new(from, diag));
            }
        }
    }

    fn generate_offset_moves(
        &self,
        from: Square,
        color: Color,
        offsets: &[(isize, isize)],
        moves: &mut MoveList,
    ) {
        for &(dr, df) in offsets {
            if let Some(to) = from.offset(dr, df) {
                if self.color_at(to) != Some(color) {
                    moves.push(Move::new(from, to));
                }
            }
        }
    }

    fn generate_sliding_moves(
        &self,
        from: Square,
        color: Color,
        directions: &[(isize, isize)],
        moves: &mut MoveList,
    ) {
        for &(dr, df) in directions {
            let mut to = from;
            loop {
                match to.offset(dr, df) {
                    None => break,
                    Some(next) => {
                        to = next;
                        match self.color_at(to) {
                            Some(c) if c == color => break,
                            Some(_) => {
                                moves.push(Move::new(from, to));
                                break;
                            }
                            None => moves.push(Move::new(from, to)),
                        }
                    }
                }
            }
        }
    }

    fn generate_castling_moves(&self, from: Square, color: Color, moves: &mut MoveList) {
        let rank = color.back_rank();
        if from != Square(rank, 4) {
            return;
        }

        let kingside = self.castling_rights.has(color, true)
            && self.at(Square(rank, 7)) == Some((color, Piece::Rook))
            && self.is_empty(Square(rank, 5))
            && self.is_empty(Square(rank, 6));
        let queenside = self.castling_rights.has(color, false)
            && self.at(Square(rank, 0)) == Some((color, Piece::Rook))
            && self.is_empty(Square(rank, 1))
            && self.is_empty(Square(rank, 2))
            && self.is_empty(Square(rank, 3));

        if !kingside && !queenside {
            return;
        }

        // King start, transit, and destination squares must all be safe.
        let replies = self.generate_moves_for(color.opponent(), false);
        let attacked = |sq: Square| replies.iter().any(|m| m.to == sq);

        if kingside
            && !attacked(Square(rank, 4))
            && !attacked(Square(rank, 5))
            && !attacked(Square(rank, 6))
        {
            moves.push(Move::new(from, Square(rank, 6)));
        }
        if queenside
            && !attacked(Square(rank, 4))
            && !attacked(Square(rank, 3))
            && !attacked(Square(rank, 2))
        {
            moves.push(Move::new(from, Square(rank, 2)));
        }
    }

    /// True when the side to move has a pseudo-legal reply landing on the
    /// opposing king. Used both for check detection (after a turn flip) and
    /// as the post-apply legality test.
    #[must_use]
    pub(crate) fn can_capture_king(&self) -> bool {
        let moves = self.generate_moves_for(self.side_to_move, false);
        moves
            .iter()
            .any(|m| matches!(self.at(m.to), Some((_, Piece::King))))
    }

    /// Is the side to move currently in check?
    #[must_use]
    pub fn is_in_check(&self) -> bool {
        let Some(king) = self.king_square(self.side_to_move) else {
            return false;
        };
        self.generate_moves_for(self.side_to_move.opponent(), false)
            .iter()
            .any(|m| m.to == king)
    }

    /// A move is valid when it is pseudo-legal and applying it does not
    /// leave the mover's own king capturable.
    #[must_use]
    pub fn is_move_valid(&mut self, mv: Move) -> bool {
        if !self.generate_moves(true).contains(mv) {
            return false;
        }
        self.make_move(mv);
        let legal = !self.can_capture_king();
        self.unmake_move();
        legal
    }

    /// Fully legal moves for the side to move.
    #[must_use]
    pub fn legal_moves(&mut self) -> Vec<Move> {
        let pseudo = self.generate_moves(true);
        let mut legal = Vec::with_capacity(pseudo.len());
        for &mv in &pseudo {
            self.make_move(mv);
            if !self.can_capture_king() {
                legal.push(mv);
            }
            self.unmake_move();
        }
        legal
    }

    /// Count leaf nodes of the legal move tree to `depth`.
    #[must_use]
    pub fn perft(&mut self, depth: usize) -> u64 {
        if depth == 0 {
            return 1;
        }
        let mut nodes = 0;
        for mv in self.legal_moves() {
            self.make_move(mv);
            nodes += self.perft(depth - 1);
            self.unmake_move();
        }
        nodes
    }
}
