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

//! Moves, packed into a single 16-bit word: 6 bits "from", 6 bits "to", 4
//! bits flag.

use std::fmt::{Display, Formatter};

use crate::piece::PieceType;
use crate::square::Square;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
/// The special-case tag carried by a [`Move`], distinguishing quiet moves
/// and ordinary captures (both `None`) from the handful of move kinds that
/// need extra handling during `make`/`unmake`.
pub enum MoveFlag {
    None = 0,
    EnPassantCapture = 1,
    Castle = 2,
    PawnTwoUp = 3,
    PromoteQueen = 4,
    PromoteKnight = 5,
    PromoteRook = 6,
    PromoteBishop = 7,
}

impl MoveFlag {
    #[must_use]
    const fn from_bits(bits: u16) -> MoveFlag {
        match bits {
            0 => MoveFlag::None,
            1 => MoveFlag::EnPassantCapture,
            2 => MoveFlag::Castle,
            3 => MoveFlag::PawnTwoUp,
            4 => MoveFlag::PromoteQueen,
            5 => MoveFlag::PromoteKnight,
            6 => MoveFlag::PromoteRook,
            7 => MoveFlag::PromoteBishop,
            _ => panic!("move flag must fit in 4 bits and be one of the eight defined kinds"),
        }
    }

    #[must_use]
    /// The piece type a `Promote*` flag promotes to.
    pub const fn promotion_piece(self) -> Option<PieceType> {
        match self {
            MoveFlag::PromoteQueen => Some(PieceType::Queen),
            MoveFlag::PromoteKnight => Some(PieceType::Knight),
            MoveFlag::PromoteRook => Some(PieceType::Rook),
            MoveFlag::PromoteBishop => Some(PieceType::Bishop),
            _ => None,
        }
    }

    #[must_use]
    pub const fn for_promotion(piece_type: PieceType) -> MoveFlag {
        match piece_type {
            PieceType::Queen => MoveFlag::PromoteQueen,
            PieceType::Knight => MoveFlag::PromoteKnight,
            PieceType::Rook => MoveFlag::PromoteRook,
            PieceType::Bishop => MoveFlag::PromoteBishop,
            _ => panic!("only Queen, Rook, Bishop, and Knight are valid promotion targets"),
        }
    }
}

const FROM_SHIFT: u16 = 0;
const TO_SHIFT: u16 = 6;
const FLAG_SHIFT: u16 = 12;
const SQUARE_MASK: u16 = 0x3F;
const FLAG_MASK: u16 = 0xF;

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
/// A single move: a "from" square, a "to" square, and a flag distinguishing
/// the handful of move kinds that need special handling. Packed into a
/// `u16` so that move lists are cheap to generate, copy, and store.
pub struct Move(u16);

impl Move {
    /// The null move: from and to both a1, flag `None`. Never legal, used
    /// as a sentinel and by the null-move search trick (making this move
    /// simply passes the turn).
    pub const NULL: Move = Move(0);

    #[must_use]
    pub const fn new(from: Square, to: Square, flag: MoveFlag) -> Move {
        Move((from as u16) << FROM_SHIFT | (to as u16) << TO_SHIFT | (flag as u16) << FLAG_SHIFT)
    }

    #[must_use]
    pub const fn quiet(from: Square, to: Square) -> Move {
        Move::new(from, to, MoveFlag::None)
    }

    #[must_use]
    pub const fn from_sq(self) -> Square {
        Square::from_index(((self.0 >> FROM_SHIFT) & SQUARE_MASK) as u8)
    }

    #[must_use]
    pub const fn to_sq(self) -> Square {
        Square::from_index(((self.0 >> TO_SHIFT) & SQUARE_MASK) as u8)
    }

    #[must_use]
    pub const fn flag(self) -> MoveFlag {
        MoveFlag::from_bits((self.0 >> FLAG_SHIFT) & FLAG_MASK)
    }

    #[must_use]
    /// Is this move a pawn promotion? Per the flag layout, exactly the four
    /// flags numbered `PromoteQueen..=PromoteBishop` are promotions.
    pub const fn is_promotion(self) -> bool {
        (self.0 >> FLAG_SHIFT) & FLAG_MASK >= MoveFlag::PromoteQueen as u16
    }

    #[must_use]
    pub const fn is_castle(self) -> bool {
        matches!(self.flag(), MoveFlag::Castle)
    }

    #[must_use]
    pub const fn is_en_passant(self) -> bool {
        matches!(self.flag(), MoveFlag::EnPassantCapture)
    }

    #[must_use]
    pub const fn is_pawn_two_up(self) -> bool {
        matches!(self.flag(), MoveFlag::PawnTwoUp)
    }

    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    /// Format this move the way engine-to-engine protocols expect: plain
    /// from/to algebraic squares, with a lowercase promotion letter suffix
    /// if any (e.g. `e7e8q`). This intentionally omits disambiguation,
    /// check, and mate markers — those depend on search-side context this
    /// crate does not own.
    pub fn to_uci(self) -> String {
        let mut s = format!("{}{}", self.from_sq(), self.to_sq());
        if let Some(piece_type) = self.flag().promotion_piece() {
            s.push(piece_type.code().to_ascii_lowercase());
        }
        s
    }

    #[must_use]
    /// Parse a move in the format [`Move::to_uci`] produces. Since the same
    /// four characters can describe a quiet move, a capture, a pawn push,
    /// or a castle depending on what's on the board, this alone cannot
    /// recover the flag for anything other than promotions; callers should
    /// match the result against a position's legal moves to fill in the
    /// rest, per the move-text grammar.
    pub fn from_uci(s: &str) -> Option<(Square, Square, Option<PieceType>)> {
        if s.len() < 4 {
            return None;
        }
        let from = Square::from_algebraic(&s[0..2])?;
        let to = Square::from_algebraic(&s[2..4])?;
        let promotion = match s.as_bytes().get(4) {
            None => None,
            Some(&c) => Some(PieceType::from_code((c as char).to_ascii_uppercase())?),
        };
        Some((from, to, promotion))
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

impl std::fmt::Debug for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Move({} -> {}, {:?})", self.from_sq(), self.to_sq(), self.flag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_fields() {
        let m = Move::new(Square::E2, Square::E4, MoveFlag::PawnTwoUp);
        assert_eq!(m.from_sq(), Square::E2);
        assert_eq!(m.to_sq(), Square::E4);
        assert_eq!(m.flag(), MoveFlag::PawnTwoUp);
        assert!(m.is_pawn_two_up());
        assert!(!m.is_promotion());
    }

    #[test]
    fn promotion_flags_report_is_promotion() {
        for piece_type in [PieceType::Queen, PieceType::Rook, PieceType::Bishop, PieceType::Knight] {
            let m = Move::new(Square::E7, Square::E8, MoveFlag::for_promotion(piece_type));
            assert!(m.is_promotion());
            assert_eq!(m.flag().promotion_piece(), Some(piece_type));
        }
    }

    #[test]
    fn uci_round_trip_for_promotion() {
        let m = Move::new(Square::E7, Square::E8, MoveFlag::PromoteQueen);
        assert_eq!(m.to_uci(), "e7e8q");
        let (from, to, promo) = Move::from_uci("e7e8q").unwrap();
        assert_eq!(from, Square::E7);
        assert_eq!(to, Square::E8);
        assert_eq!(promo, Some(PieceType::Queen));
    }

    #[test]
    fn uci_round_trip_for_quiet_move() {
        let m = Move::quiet(Square::G1, Square::F3);
        assert_eq!(m.to_uci(), "g1f3");
        let (from, to, promo) = Move::from_uci("g1f3").unwrap();
        assert_eq!(from, Square::G1);
        assert_eq!(to, Square::F3);
        assert_eq!(promo, None);
    }

    #[test]
    fn null_move_is_null() {
        assert!(Move::NULL.is_null());
        assert!(!Move::quiet(Square::A1, Square::A2).is_null());
    }
}
