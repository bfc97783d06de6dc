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

//! The error taxonomy surfaced by FEN parsing and move application.
//!
//! Programming errors (an out-of-range square or file/rank) are not part of
//! this taxonomy; they are caught with `debug_assert!`/`panic!` at the point
//! of construction, since a caller cannot sensibly recover from them.

use thiserror::Error;

/// The result type used throughout this crate's fallible public API.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A FEN string was structurally malformed, or one of its fields held a
    /// value out of range (e.g. a castling character outside `KQkq`, or a
    /// half-move clock that failed to parse as an integer).
    #[error("malformed FEN: {0}")]
    MalformedFen(String),

    /// A FEN string parsed structurally but described an impossible chess
    /// position (no king of some color, more than one king of some color,
    /// pawns on the first or last rank, and so on).
    #[error("illegal position: {0}")]
    IllegalPosition(String),

    /// A caller supplied a `from`/`to`/flag triple that is not a legal move
    /// in the current position. The internal legal move generator never
    /// produces a move that triggers this variant; it is only reachable when
    /// an external driver applies a move it did not obtain from
    /// [`crate::movegen::legal_moves`].
    #[error("illegal move: {0}")]
    IllegalMove(String),
}
