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

//! Squares, the 64 positions on a board, plus the reserved "no square" case.

use std::cmp::max;
use std::fmt::{Display, Formatter};

use crate::direction::Direction;

#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// A single square on the board. Internally represented as an index from 0
/// (a1) to 63 (h8); the reserved "no square" sentinel is modeled as
/// `Option<Square>` rather than smuggled in as an out-of-range discriminant.
pub enum Square {
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8,
}

/// Every square, indexed identically to [`Square as u8`](Square).
pub const ALL_SQUARES: [Square; 64] = [
    Square::A1, Square::B1, Square::C1, Square::D1, Square::E1, Square::F1, Square::G1, Square::H1,
    Square::A2, Square::B2, Square::C2, Square::D2, Square::E2, Square::F2, Square::G2, Square::H2,
    Square::A3, Square::B3, Square::C3, Square::D3, Square::E3, Square::F3, Square::G3, Square::H3,
    Square::A4, Square::B4, Square::C4, Square::D4, Square::E4, Square::F4, Square::G4, Square::H4,
    Square::A5, Square::B5, Square::C5, Square::D5, Square::E5, Square::F5, Square::G5, Square::H5,
    Square::A6, Square::B6, Square::C6, Square::D6, Square::E6, Square::F6, Square::G6, Square::H6,
    Square::A7, Square::B7, Square::C7, Square::D7, Square::E7, Square::F7, Square::G7, Square::H7,
    Square::A8, Square::B8, Square::C8, Square::D8, Square::E8, Square::F8, Square::G8, Square::H8,
];

impl Square {
    #[inline]
    #[must_use]
    /// Construct a square from an index in `0..64`. Out-of-range indices are
    /// a programming error; see the `OutOfBoardIndex` policy.
    ///
    /// # Panics
    /// Panics (in debug builds) if `index >= 64`.
    pub const fn from_index(index: u8) -> Square {
        debug_assert!(index < 64);
        ALL_SQUARES[index as usize]
    }

    #[inline]
    #[must_use]
    /// Construct a square from a rank and file, both in `0..8` (rank 0 is
    /// rank 1 in algebraic notation, file 0 is the a-file). Returns `None` if
    /// either coordinate is out of range.
    pub const fn new(rank: u8, file: u8) -> Option<Square> {
        if rank >= 8 || file >= 8 {
            None
        } else {
            Some(Square::from_index(rank * 8 + file))
        }
    }

    #[inline]
    #[must_use]
    /// The rank of this square, 0 (rank 1) through 7 (rank 8).
    pub const fn rank(self) -> u8 {
        self as u8 >> 3
    }

    #[inline]
    #[must_use]
    /// The file of this square, 0 (the a-file) through 7 (the h-file).
    pub const fn file(self) -> u8 {
        self as u8 & 7
    }

    #[must_use]
    /// Apply a bounded offset to this square. Returns `None` if the resulting
    /// file or rank would fall outside `0..8` (i.e. the move would wrap
    /// around the board edge).
    pub fn try_offset(self, df: i8, dr: i8) -> Option<Square> {
        let file = self.file() as i8 + df;
        let rank = self.rank() as i8 + dr;
        if !(0..8).contains(&file) || !(0..8).contains(&rank) {
            return None;
        }
        Square::new(rank as u8, file as u8)
    }

    #[must_use]
    /// Apply a [`Direction`] to this square, the same way [`Square::try_offset`]
    /// does, returning `None` on wraparound.
    pub fn try_towards(self, dir: Direction) -> Option<Square> {
        let (df, dr) = dir.components();
        self.try_offset(df, dr)
    }

    #[must_use]
    /// Chebyshev (king-move) distance to another square.
    pub fn chebyshev_to(self, rhs: Square) -> u8 {
        let rank_diff = (rhs.rank() as i8 - self.rank() as i8).unsigned_abs();
        let file_diff = (rhs.file() as i8 - self.file() as i8).unsigned_abs();
        max(rank_diff, file_diff)
    }

    #[must_use]
    /// The name of this square's file, e.g. `"e"` for any square on the
    /// e-file.
    pub const fn file_name(self) -> &'static str {
        match self.file() {
            0 => "a",
            1 => "b",
            2 => "c",
            3 => "d",
            4 => "e",
            5 => "f",
            6 => "g",
            _ => "h",
        }
    }

    #[must_use]
    /// Parse an algebraic square name such as `"e4"`.
    pub fn from_algebraic(s: &str) -> Option<Square> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = match bytes[0] {
            b'a'..=b'h' => bytes[0] - b'a',
            _ => return None,
        };
        let rank = match bytes[1] {
            b'1'..=b'8' => bytes[1] - b'1',
            _ => return None,
        };
        Square::new(rank, file)
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.file_name(), self.rank() + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_algebraic() {
        for sq in ALL_SQUARES {
            let s = sq.to_string();
            assert_eq!(Square::from_algebraic(&s), Some(sq));
        }
    }

    #[test]
    fn offset_wraps_to_none() {
        assert_eq!(Square::A1.try_offset(-1, 0), None);
        assert_eq!(Square::H8.try_offset(1, 0), None);
        assert_eq!(Square::A1.try_offset(0, -1), None);
    }

    #[test]
    fn offset_within_board() {
        assert_eq!(Square::A1.try_offset(1, 1), Some(Square::B2));
        assert_eq!(Square::E4.try_offset(-1, 2), Some(Square::D6));
    }

    #[test]
    fn try_towards_matches_direction_constants() {
        assert_eq!(Square::E4.try_towards(Direction::NORTH), Some(Square::E5));
        assert_eq!(Square::E4.try_towards(Direction::SOUTHWEST), Some(Square::D3));
        assert_eq!(Square::A1.try_towards(Direction::WEST), None);
    }

    #[test]
    fn chebyshev_distance() {
        assert_eq!(Square::A1.chebyshev_to(Square::H8), 7);
        assert_eq!(Square::E4.chebyshev_to(Square::E5), 1);
    }

    #[test]
    fn rank_and_file() {
        assert_eq!(Square::E4.rank(), 3);
        assert_eq!(Square::E4.file(), 4);
    }
}
