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

//! Precomputed attack tables: knight, king, and pawn leapers; per-square,
//! per-direction ray masks; and occupancy-parameterized slider attacks
//! (bishop, rook, queen) built on top of the ray masks.
//!
//! All tables are built once, lazily, on first use, and are immutable and
//! freely shareable afterward — the same pattern the teacher codebase uses
//! for its `MAGIC` and `BETWEEN` statics, except here the slider tables hold
//! ray masks rather than magic-hashed attack sets (see `DESIGN.md` for why
//! this implementation favors direct ray marching over magic bitboards).

use once_cell::sync::Lazy;

use crate::bitboard::Bitboard;
use crate::color::Color;
use crate::direction::Direction;
use crate::square::{Square, ALL_SQUARES};

/// Build the table of single-step leaper attacks for a set of directions,
/// stopping any step that would wrap around a board edge.
fn step_attacks(dirs: &[Direction]) -> [Bitboard; 64] {
    let mut table = [Bitboard::EMPTY; 64];
    for sq in ALL_SQUARES {
        let mut bb = Bitboard::EMPTY;
        for &dir in dirs {
            if let Some(target) = sq.try_towards(dir) {
                bb.set(target);
            }
        }
        table[sq as usize] = bb;
    }
    table
}

/// Knight attacks, indexed by source square.
pub static KNIGHT_ATTACKS: Lazy<[Bitboard; 64]> = Lazy::new(|| step_attacks(&Direction::KNIGHT_STEPS));

/// King attacks, indexed by source square.
pub static KING_ATTACKS: Lazy<[Bitboard; 64]> = Lazy::new(|| step_attacks(&Direction::KING_STEPS));

/// Pawn attacks, indexed by `[color][square]`.
pub static PAWN_ATTACKS: Lazy<[[Bitboard; 64]; 2]> = Lazy::new(|| {
    [
        step_attacks(&[Direction::NORTHEAST, Direction::NORTHWEST]),
        step_attacks(&[Direction::SOUTHEAST, Direction::SOUTHWEST]),
    ]
});

#[must_use]
/// Squares attacked by a pawn of the given color standing on `sq`.
pub fn pawn_attacks(color: Color, sq: Square) -> Bitboard {
    PAWN_ATTACKS[color as usize][sq as usize]
}

#[must_use]
/// Squares attacked by a knight standing on `sq`.
pub fn knight_attacks(sq: Square) -> Bitboard {
    KNIGHT_ATTACKS[sq as usize]
}

#[must_use]
/// Squares attacked by a king standing on `sq`.
pub fn king_attacks(sq: Square) -> Bitboard {
    KING_ATTACKS[sq as usize]
}

/// For each square and each of the eight ray directions (ordered as
/// [`Direction::ALL_RAYS`]), the set of squares from (but not including) that
/// square to the board edge along that direction.
static RAYS: Lazy<[[Bitboard; 8]; 64]> = Lazy::new(|| {
    let mut table = [[Bitboard::EMPTY; 8]; 64];
    for sq in ALL_SQUARES {
        for (d, &dir) in Direction::ALL_RAYS.iter().enumerate() {
            let mut bb = Bitboard::EMPTY;
            let mut cur = sq;
            while let Some(next) = cur.try_towards(dir) {
                bb.set(next);
                cur = next;
            }
            table[sq as usize][d] = bb;
        }
    }
    table
});

/// A table of the squares strictly between two squares that lie on a common
/// rank, file, or diagonal; empty if the two squares do not share a line.
static BETWEEN: Lazy<[[Bitboard; 64]; 64]> = Lazy::new(|| {
    let mut table = [[Bitboard::EMPTY; 64]; 64];
    for a in ALL_SQUARES {
        for &dir in &Direction::ALL_RAYS {
            let mut cur = a;
            let mut between = Bitboard::EMPTY;
            while let Some(next) = cur.try_towards(dir) {
                table[a as usize][next as usize] = between;
                between.set(next);
                cur = next;
            }
        }
    }
    table
});

/// Index, within [`Direction::ALL_RAYS`], of each direction's opposite:
/// N<->S, E<->W, NE<->SW, SE<->NW.
const OPPOSITE_RAY: [usize; 8] = [2, 3, 0, 1, 6, 7, 4, 5];

/// A table of the full line (both rays) through two aligned squares,
/// including both endpoints; empty if the squares share no rank, file, or
/// diagonal.
static LINE_THROUGH: Lazy<[[Bitboard; 64]; 64]> = Lazy::new(|| {
    let mut table = [[Bitboard::EMPTY; 64]; 64];
    for a in ALL_SQUARES {
        for d in 0..8 {
            let ray = RAYS[a as usize][d];
            for b in ray {
                let line = ray | RAYS[b as usize][OPPOSITE_RAY[d]] | Bitboard::from_square(a);
                table[a as usize][b as usize] = line;
            }
        }
    }
    table
});

#[must_use]
/// The squares strictly between `a` and `b`, if they share a rank, file, or
/// diagonal; otherwise the empty set.
pub fn between(a: Square, b: Square) -> Bitboard {
    BETWEEN[a as usize][b as usize]
}

#[must_use]
/// The entire line through `a` and `b` (both rays plus the two squares
/// themselves), if they are aligned; otherwise the empty set.
pub fn line_through(a: Square, b: Square) -> Bitboard {
    LINE_THROUGH[a as usize][b as usize]
}

/// Index of each rook direction within [`Direction::ALL_RAYS`].
const ROOK_RAY_INDICES: [usize; 4] = [0, 1, 2, 3];
/// Index of each bishop direction within [`Direction::ALL_RAYS`].
const BISHOP_RAY_INDICES: [usize; 4] = [4, 5, 6, 7];

fn slider_attacks(sq: Square, occupancy: Bitboard, ray_indices: &[usize; 4]) -> Bitboard {
    let mut attacks = Bitboard::EMPTY;
    for &d in ray_indices {
        let ray = RAYS[sq as usize][d];
        let blockers = ray & occupancy;
        if blockers.is_empty() {
            attacks |= ray;
            continue;
        }
        let dir = Direction::ALL_RAYS[d];
        let nearest = if dir.is_increasing() {
            blockers.lsb().unwrap()
        } else {
            blockers.msb().unwrap()
        };
        // `ray` runs from `sq` to the edge; subtracting the ray that starts
        // *beyond* the nearest blocker keeps everything up to and including
        // that blocker, matching the spec's "subtract the ray segment past
        // the blocker; include the blocker square itself".
        attacks |= ray & !RAYS[nearest as usize][d];
    }
    attacks
}

#[must_use]
/// Squares attacked by a bishop on `sq` given the board's current occupancy.
pub fn bishop_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    slider_attacks(sq, occupancy, &BISHOP_RAY_INDICES)
}

#[must_use]
/// Squares attacked by a rook on `sq` given the board's current occupancy.
pub fn rook_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    slider_attacks(sq, occupancy, &ROOK_RAY_INDICES)
}

#[must_use]
/// Squares attacked by a queen on `sq` given the board's current occupancy:
/// the bitwise union of bishop and rook attacks (never logical-OR; see the
/// design notes on the bug in one source draft).
pub fn queen_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    bishop_attacks(sq, occupancy) | rook_attacks(sq, occupancy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn knight_attacks_from_corner() {
        let attacks = knight_attacks(Square::A1);
        assert_eq!(attacks.popcount(), 2);
        assert!(attacks.contains(Square::B3));
        assert!(attacks.contains(Square::C2));
    }

    #[test]
    fn king_attacks_from_center() {
        let attacks = king_attacks(Square::E4);
        assert_eq!(attacks.popcount(), 8);
    }

    #[test]
    fn pawn_attacks_are_diagonal_only() {
        let white = pawn_attacks(Color::White, Square::E4);
        assert!(white.contains(Square::D5));
        assert!(white.contains(Square::F5));
        assert!(!white.contains(Square::E5));

        let black = pawn_attacks(Color::Black, Square::E4);
        assert!(black.contains(Square::D3));
        assert!(black.contains(Square::F3));
    }

    #[test]
    fn rook_attacks_stop_at_blocker_inclusive() {
        let occ = Bitboard::from_square(Square::E6);
        let attacks = rook_attacks(Square::E4, occ);
        assert!(attacks.contains(Square::E5));
        assert!(attacks.contains(Square::E6));
        assert!(!attacks.contains(Square::E7));
        assert!(attacks.contains(Square::A4));
        assert!(attacks.contains(Square::H4));
    }

    #[test]
    fn bishop_attacks_stop_at_blocker_inclusive() {
        let occ = Bitboard::from_square(Square::G6);
        let attacks = bishop_attacks(Square::E4, occ);
        assert!(attacks.contains(Square::F5));
        assert!(attacks.contains(Square::G6));
        assert!(!attacks.contains(Square::H7));
    }

    #[test]
    fn queen_attacks_is_union_of_rook_and_bishop() {
        let occ = Bitboard::EMPTY;
        let queen = queen_attacks(Square::D4, occ);
        let expected = rook_attacks(Square::D4, occ) | bishop_attacks(Square::D4, occ);
        assert_eq!(queen, expected);
    }

    #[test]
    fn between_on_rank() {
        let b = between(Square::A1, Square::D1);
        assert!(b.contains(Square::B1));
        assert!(b.contains(Square::C1));
        assert!(!b.contains(Square::A1));
        assert!(!b.contains(Square::D1));
    }

    #[test]
    fn between_unaligned_is_empty() {
        assert_eq!(between(Square::A1, Square::B3), Bitboard::EMPTY);
    }

    #[test]
    fn line_through_includes_endpoints_and_beyond() {
        let line = line_through(Square::A1, Square::D4);
        assert!(line.contains(Square::A1));
        assert!(line.contains(Square::D4));
        assert!(line.contains(Square::H8));
        assert!(!line.contains(Square::A2));
    }
}
