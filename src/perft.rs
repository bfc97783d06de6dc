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

//! Perft: the node-counting correctness oracle for make/unmake and the move
//! generator. Any deviation from the canonical counts (see the integration
//! tests under `tests/`) indicates a bug upstream, not here.

use crate::movegen::legal_moves;
use crate::position::Position;

#[must_use]
/// The number of leaf positions reachable from `pos` in exactly `depth`
/// plies, playing every legal move at every ply.
pub fn perft(pos: &mut Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = legal_moves(pos);
    if depth == 1 {
        return moves.len() as u64;
    }
    let mut nodes = 0;
    for mv in moves {
        let undo = pos.make_move(mv);
        nodes += perft(pos, depth - 1);
        pos.unmake_move(undo);
    }
    nodes
}

/// Run `perft` separately for each legal move at the root, printing
/// `<move>: <count>` for each and the grand total last. Returns the total,
/// which must equal `perft(pos, depth)`.
pub fn perft_divide(pos: &mut Position, depth: u32) -> u64 {
    let moves = legal_moves(pos);
    let mut total = 0;
    for mv in moves {
        let undo = pos.make_move(mv);
        let count = perft(pos, depth.saturating_sub(1));
        pos.unmake_move(undo);
        println!("{mv}: {count}");
        total += count;
    }
    println!("total: {total}");
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen;

    #[test]
    fn depth_zero_is_one() {
        let mut pos = fen::parse(fen::START_POSITION_FEN).unwrap();
        assert_eq!(perft(&mut pos, 0), 1);
    }

    #[test]
    fn starting_position_depth_one_and_two() {
        let mut pos = fen::parse(fen::START_POSITION_FEN).unwrap();
        assert_eq!(perft(&mut pos, 1), 20);
        assert_eq!(perft(&mut pos, 2), 400);
    }
}
