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

//! A thin driver around `chesscore::perft`: `perft <depth> [fen]`. With no
//! FEN, runs from the standard starting position.

use std::env;
use std::process::ExitCode;

use chesscore::fen;
use chesscore::perft::perft_divide;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("usage: perft <depth> [fen]");
        return ExitCode::FAILURE;
    }

    let depth: u32 = match args[1].parse() {
        Ok(d) => d,
        Err(_) => {
            eprintln!("depth '{}' is not a non-negative integer", args[1]);
            return ExitCode::FAILURE;
        }
    };

    let fen_str = if args.len() > 2 {
        args[2..].join(" ")
    } else {
        fen::START_POSITION_FEN.to_string()
    };

    let mut pos = match fen::parse(&fen_str) {
        Ok(pos) => pos,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    perft_divide(&mut pos, depth);
    ExitCode::SUCCESS
}
