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

//! End-to-end perft scenarios against five canonical positions that
//! collectively exercise castling, promotion, en passant, and check
//! evasion. Any deviation from these counts indicates a bug in move
//! generation or make/unmake, not in this test.

use chesscore::fen;
use chesscore::perft::perft;

fn assert_perft(fen_str: &str, depth: u32, expected: u64) {
    let mut pos = fen::parse(fen_str).expect("FEN in the perft table must parse");
    assert_eq!(perft(&mut pos, depth), expected, "perft({depth}) mismatch for {fen_str}");
}

#[test]
fn starting_position() {
    assert_perft(
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        5,
        4_865_609,
    );
}

#[test]
fn kiwipete() {
    assert_perft(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        4,
        4_085_603,
    );
}

#[test]
fn endgame_position() {
    assert_perft("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", 5, 674_624);
}

#[test]
fn unbalanced_position() {
    assert_perft(
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        4,
        422_333,
    );
}

#[test]
fn edwards_position() {
    assert_perft("rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8", 3, 62_379);
}
