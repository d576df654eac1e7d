//! Position and move text codecs.
//!
//! Two board formats are supported: standard FEN, and the raw 64-character
//! dump used by the `getboard` command (squares a1 through h8 in index
//! order, FEN piece letters, `.` for an empty square). Moves travel as
//! plain coordinate text ("e2e4"); any promotion suffix is ignored since
//! promotion is derived when the move is applied.

use super::error::{FenError, MoveParseError};
use super::{file_to_index, rank_to_index, Color, Move, Piece, Position, Square};

impl Position {
    /// Parse a FEN string. The halfmove and fullmove counters are accepted
    /// but not tracked.
    pub fn try_from_fen(fen: &str) -> Result<Position, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(FenError::TooFewParts { found: parts.len() });
        }

        let mut pos = Position::empty();

        for (i, rank_str) in parts[0].split('/').enumerate() {
            if i >= 8 {
                return Err(FenError::InvalidRank { rank: i });
            }
            let rank = 7 - i;
            let mut file = 0;
            for c in rank_str.chars() {
                if file > 8 {
                    return Err(FenError::TooManyFiles { rank, files: file });
                }
                if let Some(skip) = c.to_digit(10) {
                    file += skip as usize;
                } else {
                    let piece =
                        Piece::from_char(c).ok_or(FenError::InvalidPiece { char: c })?;
                    let color = if c.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    if file >= 8 {
                        return Err(FenError::TooManyFiles { rank, files: file + 1 });
                    }
                    pos.set_square(Square(rank, file), Some((color, piece)));
                    file += 1;
                }
            }
        }

        match parts[1] {
            "w" => {}
            "b" => pos.switch_turn(),
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        }

        if parts[2] != "-" {
            for c in parts[2].chars() {
                match c {
                    'K' => pos.set_castling_right(Color::White, true, true),
                    'Q' => pos.set_castling_right(Color::White, false, true),
                    'k' => pos.set_castling_right(Color::Black, true, true),
                    'q' => pos.set_castling_right(Color::Black, false, true),
                    _ => return Err(FenError::InvalidCastling { char: c }),
                }
            }
        }

        if parts[3] != "-" {
            let chars: Vec<char> = parts[3].chars().collect();
            if chars.len() != 2 || !('a'..='h').contains(&chars[0].to_ascii_lowercase()) {
                return Err(FenError::InvalidEnPassant {
                    found: parts[3].to_string(),
                });
            }
            pos.set_en_passant_file(Some(file_to_index(chars[0])));
        }

        Ok(pos)
    }

    /// Parse a FEN string, panicking on malformed input. Convenience for
    /// positions known at compile time.
    ///
    /// # Panics
    /// Panics if the FEN is invalid.
    #[must_use]
    pub fn from_fen(fen: &str) -> Position {
        match Position::try_from_fen(fen) {
            Ok(pos) => pos,
            Err(e) => panic!("invalid FEN '{fen}': {e}"),
        }
    }

    /// Render the position as FEN. The untracked halfmove clock is emitted
    /// as 0 and the fullmove number is derived from the undo stack.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut fen = String::new();

        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match self.at(Square(rank, file)) {
                    None => empty += 1,
                    Some((color, piece)) => {
                        if empty > 0 {
                            fen.push(char::from_digit(empty, 10).unwrap_or('0'));
                            empty = 0;
                        }
                        fen.push(piece.to_fen_char(color));
                    }
                }
            }
            if empty > 0 {
                fen.push(char::from_digit(empty, 10).unwrap_or('0'));
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(if self.side_to_move == Color::White {
            'w'
        } else {
            'b'
        });

        fen.push(' ');
        if self.castling_rights.as_u8() == 0 {
            fen.push('-');
        } else {
            if self.castling_rights.has(Color::White, true) {
                fen.push('K');
            }
            if self.castling_rights.has(Color::White, false) {
                fen.push('Q');
            }
            if self.castling_rights.has(Color::Black, true) {
                fen.push('k');
            }
            if self.castling_rights.has(Color::Black, false) {
                fen.push('q');
            }
        }

        fen.push(' ');
        match self.en_passant_file {
            None => fen.push('-'),
            Some(file) => {
                let rank = if self.side_to_move == Color::White {
                    '6'
                } else {
                    '3'
                };
                fen.push((b'a' + file as u8) as char);
                fen.push(rank);
            }
        }

        fen.push_str(&format!(" 0 {}", self.ply() / 2 + 1));
        fen
    }

    /// Parse the raw 64-character board dump (a1 first, `.` for empty).
    /// Side to move, rights, and en-passant state are not part of the
    /// format and come back at their defaults.
    pub fn try_from_raw_board(board: &str) -> Result<Position, FenError> {
        let chars: Vec<char> = board.chars().collect();
        if chars.len() != 64 {
            return Err(FenError::InvalidBoardLength { len: chars.len() });
        }
        let mut pos = Position::empty();
        for (idx, &c) in chars.iter().enumerate() {
            if c == '.' {
                continue;
            }
            let piece = Piece::from_char(c).ok_or(FenError::InvalidPiece { char: c })?;
            let color = if c.is_ascii_uppercase() {
                Color::White
            } else {
                Color::Black
            };
            pos.set_square(Square::from_index(idx), Some((color, piece)));
        }
        Ok(pos)
    }

    /// Render the raw 64-character board dump.
    #[must_use]
    pub fn to_raw_board(&self) -> String {
        (0..64)
            .map(|idx| match self.squares[idx] {
                None => '.',
                Some((color, piece)) => piece.to_fen_char(color),
            })
            .collect()
    }
}

/// Parse coordinate move text ("e2e4"). A trailing promotion letter is
/// accepted and ignored.
pub fn parse_move(text: &str) -> Result<Move, MoveParseError> {
    let chars: Vec<char> = text.trim().chars().collect();
    if chars.len() < 4 || chars.len() > 5 {
        return Err(MoveParseError::InvalidLength { len: chars.len() });
    }

    let square = |file: char, rank: char| -> Result<Square, MoveParseError> {
        if !('a'..='h').contains(&file.to_ascii_lowercase()) || !('1'..='8').contains(&rank) {
            return Err(MoveParseError::InvalidSquare {
                notation: text.to_string(),
            });
        }
        Ok(Square(rank_to_index(rank), file_to_index(file)))
    };

    let from = square(chars[0], chars[1])?;
    let to = square(chars[2], chars[3])?;
    Ok(Move::new(from, to))
}
