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

//! A static evaluator: material, piece-square tables, pawn structure, and a
//! rough king-safety term. Returns a centipawn score from White's
//! perspective. Pure function of `Position`; nothing here is cached, since
//! the core does not own a transposition table.

use crate::bitboard::Bitboard;
use crate::color::Color;
use crate::piece::PieceType;
use crate::position::Position;
use crate::square::Square;

/// Centipawn value of one piece of each type. Kings are worth nothing: a
/// king can never be captured, so it never contributes to material.
const MATERIAL: [i32; 6] = [100, 320, 330, 500, 900, 0];

const BISHOP_PAIR_BONUS: i32 = 50;
const PASSED_PAWN_BONUS: i32 = 100;
const ISOLATED_PAWN_PENALTY: i32 = 20;
const DOUBLED_PAWN_PENALTY: i32 = 10;
const PAWN_SHIELD_BONUS: i32 = 10;

#[rustfmt::skip]
const PAWN_TABLE: [i32; 64] = [
      0,   0,   0,   0,   0,   0,   0,   0,
      5,  10,  10, -20, -20,  10,  10,   5,
      5,  -5, -10,   0,   0, -10,  -5,   5,
      0,   0,   0,  20,  20,   0,   0,   0,
      5,   5,  10,  25,  25,  10,   5,   5,
     10,  10,  20,  30,  30,  20,  10,  10,
     50,  50,  50,  50,  50,  50,  50,  50,
      0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const KNIGHT_TABLE: [i32; 64] = [
    -50, -40, -30, -30, -30, -30, -40, -50,
    -40, -20,   0,   5,   5,   0, -20, -40,
    -30,   5,  10,  15,  15,  10,   5, -30,
    -30,   0,  15,  20,  20,  15,   0, -30,
    -30,   5,  15,  20,  20,  15,   5, -30,
    -30,   0,  10,  15,  15,  10,   0, -30,
    -40, -20,   0,   0,   0,   0, -20, -40,
    -50, -40, -30, -30, -30, -30, -40, -50,
];

#[rustfmt::skip]
const BISHOP_TABLE: [i32; 64] = [
    -20, -10, -10, -10, -10, -10, -10, -20,
    -10,   5,   0,   0,   0,   0,   5, -10,
    -10,  10,  10,  10,  10,  10,  10, -10,
    -10,   0,  10,  10,  10,  10,   0, -10,
    -10,   5,   5,  10,  10,   5,   5, -10,
    -10,   0,   5,  10,  10,   5,   0, -10,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -20, -10, -10, -10, -10, -10, -10, -20,
];

#[rustfmt::skip]
const ROOK_TABLE: [i32; 64] = [
      0,   0,   0,   5,   5,   0,   0,   0,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
      5,  10,  10,  10,  10,  10,  10,   5,
      0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const QUEEN_TABLE: [i32; 64] = [
    -20, -10, -10,  -5,  -5, -10, -10, -20,
    -10,   0,   5,   0,   0,   0,   0, -10,
    -10,   5,   5,   5,   5,   5,   0, -10,
      0,   0,   5,   5,   5,   5,   0,  -5,
     -5,   0,   5,   5,   5,   5,   0,  -5,
    -10,   0,   5,   5,   5,   5,   0, -10,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -20, -10, -10,  -5,  -5, -10, -10, -20,
];

#[rustfmt::skip]
const KING_MIDGAME_TABLE: [i32; 64] = [
     20,  30,  10,   0,   0,  10,  30,  20,
     20,  20,   0,   0,   0,   0,  20,  20,
    -10, -20, -20, -20, -20, -20, -20, -10,
    -20, -30, -30, -40, -40, -30, -30, -20,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
];

#[rustfmt::skip]
const KING_ENDGAME_TABLE: [i32; 64] = [
    -50, -30, -30, -30, -30, -30, -30, -50,
    -30, -30,   0,   0,   0,   0, -30, -30,
    -30, -10,  20,  30,  30,  20, -10, -30,
    -30, -10,  30,  40,  40,  30, -10, -30,
    -30, -10,  30,  40,  40,  30, -10, -30,
    -30, -10,  20,  30,  30,  20, -10, -30,
    -30, -20, -10,   0,   0, -10, -20, -30,
    -50, -40, -30, -20, -20, -30, -40, -50,
];

fn pst_value(table: &[i32; 64], color: Color, sq: Square) -> i32 {
    let index = match color {
        Color::White => sq as usize,
        // Flip the rank (a1<->a8, e4<->e5, ...) so every table is defined
        // once from White's perspective.
        Color::Black => sq as usize ^ 56,
    };
    table[index]
}

fn table_for(piece_type: PieceType, king_table: &KingTableChoice) -> &'static [i32; 64] {
    match piece_type {
        PieceType::Pawn => &PAWN_TABLE,
        PieceType::Knight => &KNIGHT_TABLE,
        PieceType::Bishop => &BISHOP_TABLE,
        PieceType::Rook => &ROOK_TABLE,
        PieceType::Queen => &QUEEN_TABLE,
        PieceType::King => match king_table {
            KingTableChoice::Midgame => &KING_MIDGAME_TABLE,
            KingTableChoice::Endgame => &KING_ENDGAME_TABLE,
        },
    }
}

/// Which king piece-square table to consult. The specification leaves this
/// choice open; this implementation always uses the midgame table, which
/// is the conservative, spec-permitted choice (no game-phase detection is
/// otherwise needed anywhere in this crate).
enum KingTableChoice {
    Midgame,
    #[allow(dead_code)]
    Endgame,
}

fn signed(color: Color, value: i32) -> i32 {
    match color {
        Color::White => value,
        Color::Black => -value,
    }
}

fn material_and_pst(pos: &Position) -> i32 {
    let mut score = 0;
    for color in Color::ALL {
        for piece_type in PieceType::ALL {
            let bb = pos.pieces_of(color, piece_type);
            let material = MATERIAL[piece_type as usize];
            let table = table_for(piece_type, &KingTableChoice::Midgame);
            for sq in bb {
                score += signed(color, material + pst_value(table, color, sq));
            }
        }
        if pos.pieces_of(color, PieceType::Bishop).popcount() >= 2 {
            score += signed(color, BISHOP_PAIR_BONUS);
        }
    }
    score
}

/// All squares on `file` and its immediate neighbors, clipped at the board
/// edge.
fn file_and_neighbors(file: u8) -> Bitboard {
    let mut mask = Bitboard::FILES[file as usize];
    if file > 0 {
        mask |= Bitboard::FILES[file as usize - 1];
    }
    if file < 7 {
        mask |= Bitboard::FILES[file as usize + 1];
    }
    mask
}

/// The squares strictly ahead of `sq` (in `color`'s direction of advance)
/// on `sq`'s file and its two neighbors — the mask a passed pawn must find
/// clear of enemy pawns.
fn ahead_mask(color: Color, sq: Square) -> Bitboard {
    let file_mask = file_and_neighbors(sq.file());
    let rank_mask = match color {
        Color::White => {
            let mut m = Bitboard::EMPTY;
            for r in (sq.rank() + 1)..8 {
                m |= Bitboard::RANKS[r as usize];
            }
            m
        }
        Color::Black => {
            let mut m = Bitboard::EMPTY;
            for r in 0..sq.rank() {
                m |= Bitboard::RANKS[r as usize];
            }
            m
        }
    };
    file_mask & rank_mask
}

fn pawn_structure(pos: &Position) -> i32 {
    let mut score = 0;
    for color in Color::ALL {
        let own_pawns = pos.pieces_of(color, PieceType::Pawn);
        let enemy_pawns = pos.pieces_of(!color, PieceType::Pawn);

        for sq in own_pawns {
            if (ahead_mask(color, sq) & enemy_pawns).is_empty() {
                score += signed(color, PASSED_PAWN_BONUS);
            }
            let neighbor_files = if sq.file() == 0 {
                Bitboard::FILES[1]
            } else if sq.file() == 7 {
                Bitboard::FILES[6]
            } else {
                Bitboard::FILES[sq.file() as usize - 1] | Bitboard::FILES[sq.file() as usize + 1]
            };
            if (neighbor_files & own_pawns).is_empty() {
                score -= signed(color, ISOLATED_PAWN_PENALTY);
            }
        }

        for file in 0..8 {
            let on_file = (own_pawns & Bitboard::FILES[file]).popcount();
            if on_file > 1 {
                score -= signed(color, DOUBLED_PAWN_PENALTY * (on_file as i32 - 1));
            }
        }
    }
    score
}

fn king_safety(pos: &Position) -> i32 {
    let mut score = 0;
    for color in Color::ALL {
        let king_sq = pos.king_square(color);
        let on_back_rank = match color {
            Color::White => king_sq.rank() <= 1,
            Color::Black => king_sq.rank() >= 6,
        };
        if !on_back_rank {
            continue;
        }
        let shield_rank = match color {
            Color::White => king_sq.rank() + 1,
            Color::Black => king_sq.rank() - 1,
        };
        let shield_files = file_and_neighbors(king_sq.file());
        let shield_mask = shield_files & Bitboard::RANKS[shield_rank as usize];
        let shielded = (shield_mask & pos.pieces_of(color, PieceType::Pawn)).popcount();
        score += signed(color, PAWN_SHIELD_BONUS * shielded as i32);
    }
    score
}

#[must_use]
/// Evaluate `pos`, returning a centipawn score from White's perspective:
/// positive favors White, negative favors Black.
pub fn evaluate(pos: &Position) -> i32 {
    material_and_pst(pos) + pawn_structure(pos) + king_safety(pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen;

    #[test]
    fn starting_position_is_symmetric() {
        let pos = fen::parse(fen::START_POSITION_FEN).unwrap();
        assert_eq!(evaluate(&pos), 0);
    }

    #[test]
    fn extra_queen_is_worth_roughly_nine_pawns() {
        let with_queen = fen::parse("4k3/8/8/8/8/8/8/3QK3 w - - 0 1").unwrap();
        let without_queen = fen::parse("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let diff = evaluate(&with_queen) - evaluate(&without_queen);
        assert!(diff > 800 && diff < 1200, "diff was {diff}");
    }

    #[test]
    fn isolated_pawn_is_penalized() {
        let isolated = fen::parse("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").unwrap();
        let supported = fen::parse("4k3/8/8/8/8/8/3PP3/4K3 w - - 0 1").unwrap();
        let isolated_bonus = evaluate(&isolated) - MATERIAL[PieceType::Pawn as usize];
        let supported_bonus =
            evaluate(&supported) - 2 * MATERIAL[PieceType::Pawn as usize];
        assert!(isolated_bonus < supported_bonus);
    }
}
