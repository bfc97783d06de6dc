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

//! Cross-module invariants from the testable-properties list: FEN
//! round-tripping, make/unmake restoration, and post-move check safety.

use chesscore::fen;
use chesscore::movegen::legal_moves;

const SAMPLE_FENS: &[&str] = &[
    fen::START_POSITION_FEN,
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
    "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
];

#[test]
fn fen_round_trips_for_every_sample_position() {
    for &fen_str in SAMPLE_FENS {
        let pos = fen::parse(fen_str).unwrap();
        assert_eq!(fen::generate(&pos), fen_str);
    }
}

#[test]
fn make_unmake_restores_every_field_for_every_legal_move() {
    for &fen_str in SAMPLE_FENS {
        let mut pos = fen::parse(fen_str).unwrap();
        let before = fen::generate(&pos);
        for mv in legal_moves(&pos) {
            let undo = pos.make_move(mv);
            pos.unmake_move(undo);
            assert_eq!(fen::generate(&pos), before, "move {mv} did not round-trip cleanly");
        }
    }
}

#[test]
fn mover_is_never_left_in_check_after_a_legal_move() {
    use chesscore::movegen::attack_data;

    for &fen_str in SAMPLE_FENS {
        let mut pos = fen::parse(fen_str).unwrap();
        let mover = pos.side_to_move();
        for mv in legal_moves(&pos) {
            let undo = pos.make_move(mv);
            let data = attack_data(&pos, mover);
            assert!(!data.in_check(), "move {mv} left the mover in check");
            pos.unmake_move(undo);
        }
    }
}
