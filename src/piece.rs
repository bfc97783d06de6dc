/*
  Chesscore, a chess board representation and legal move generator.
  Copyright (C) 2024 The Chesscore Authors

  Chesscore is free software: you can redistribute it and/or modify
  it under the terms of the GNU General Public License as published by
  the Free Software Foundation, either version 3 of the License, or
  (at your option) any later version.

  Chesscore is distributed in the hope that it will be useful,
  but WITHOUT ANY WARRANTY; without even the implied warranty of
  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
  GNU General Public License for more details.

  You should have received a copy of the GNU General Public License
  along with this program.  If not, see <http://www.gnu.org/licenses/>.
*/

//! Piece types, independent of color or location.

use std::fmt::{Display, Formatter};

use crate::color::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
/// The type of a piece, without color. Ordered `Pawn..King` so that
/// `side as usize * 6 + piece as usize` addresses `Position::pieces`
/// exactly as specified.
pub enum PieceType {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceType {
    pub const NUM_TYPES: usize = 6;

    pub const ALL: [PieceType; 6] = [
        PieceType::Pawn,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Rook,
        PieceType::Queen,
        PieceType::King,
    ];

    /// The four types a pawn may promote to, in the order their FEN letters
    /// are conventionally listed.
    pub const PROMOTION_TYPES: [PieceType; 4] = [
        PieceType::Queen,
        PieceType::Rook,
        PieceType::Bishop,
        PieceType::Knight,
    ];

    #[must_use]
    /// This piece's uppercase FEN letter.
    pub const fn code(self) -> char {
        match self {
            PieceType::Pawn => 'P',
            PieceType::Knight => 'N',
            PieceType::Bishop => 'B',
            PieceType::Rook => 'R',
            PieceType::Queen => 'Q',
            PieceType::King => 'K',
        }
    }

    #[must_use]
    /// Parse an uppercase FEN piece letter.
    pub const fn from_code(c: char) -> Option<PieceType> {
        match c {
            'P' => Some(PieceType::Pawn),
            'N' => Some(PieceType::Knight),
            'B' => Some(PieceType::Bishop),
            'R' => Some(PieceType::Rook),
            'Q' => Some(PieceType::Queen),
            'K' => Some(PieceType::King),
            _ => None,
        }
    }
}

impl Display for PieceType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// A piece of a known color and type, as found occupying a square.
pub struct Piece {
    pub color: Color,
    pub piece_type: PieceType,
}

impl Piece {
    #[must_use]
    pub const fn new(color: Color, piece_type: PieceType) -> Piece {
        Piece { color, piece_type }
    }

    #[must_use]
    /// The index of this piece's bitboard within `Position::pieces`:
    /// `color * 6 + piece_type`.
    pub const fn index(self) -> usize {
        self.color as usize * PieceType::NUM_TYPES + self.piece_type as usize
    }

    #[must_use]
    /// This piece's FEN letter: uppercase for White, lowercase for Black.
    pub fn code(self) -> char {
        match self.color {
            Color::White => self.piece_type.code(),
            Color::Black => self.piece_type.code().to_ascii_lowercase(),
        }
    }

    #[must_use]
    /// Parse a FEN piece letter (case determines color).
    pub fn from_code(c: char) -> Option<Piece> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let piece_type = PieceType::from_code(c.to_ascii_uppercase())?;
        Some(Piece::new(color, piece_type))
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_index_matches_layout() {
        assert_eq!(Piece::new(Color::White, PieceType::Pawn).index(), 0);
        assert_eq!(Piece::new(Color::White, PieceType::King).index(), 5);
        assert_eq!(Piece::new(Color::Black, PieceType::Pawn).index(), 6);
        assert_eq!(Piece::new(Color::Black, PieceType::King).index(), 11);
    }

    #[test]
    fn code_round_trip() {
        for color in Color::ALL {
            for piece_type in PieceType::ALL {
                let piece = Piece::new(color, piece_type);
                assert_eq!(Piece::from_code(piece.code()), Some(piece));
            }
        }
    }
}
