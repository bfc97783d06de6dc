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

//! Forsyth-Edwards Notation: the sole serialization format for `Position`.

use crate::castling::CastleRights;
use crate::color::Color;
use crate::error::{Error, Result};
use crate::piece::Piece;
use crate::position::Position;
use crate::square::Square;

/// The FEN of the standard chess starting position.
pub const START_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Parse a FEN string into a `Position`.
///
/// # Errors
/// Returns [`Error::MalformedFen`] if a structural token is missing or a
/// field's value is out of range, and [`Error::IllegalPosition`] if the
/// resulting board violates the basic structural invariants (propagated
/// from [`Position::validate`]).
pub fn parse(fen: &str) -> Result<Position> {
    let fields: Vec<&str> = fen.split_ascii_whitespace().collect();
    if fields.len() != 6 {
        return Err(Error::MalformedFen(format!(
            "expected 6 space-separated fields, found {}",
            fields.len()
        )));
    }
    let [placement, side, castling, ep, halfmove, fullmove] = fields[..] else {
        unreachable!("length checked above");
    };

    let mut pos = Position::empty();
    parse_placement(&mut pos, placement)?;
    pos.set_side_to_move(parse_side(side)?);
    pos.set_castling_rights(parse_castling(castling)?);
    pos.set_en_passant_square(parse_en_passant(ep)?);
    pos.set_halfmove_clock(parse_clock(halfmove, "halfmove clock")?);
    let fullmove_clock = parse_clock(fullmove, "fullmove clock")?;
    if fullmove_clock == 0 {
        return Err(Error::MalformedFen("fullmove clock must be positive".to_string()));
    }
    pos.set_fullmove_clock(fullmove_clock);

    pos.validate()?;
    Ok(pos)
}

fn parse_placement(pos: &mut Position, placement: &str) -> Result<()> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(Error::MalformedFen(format!(
            "placement has {} ranks, expected 8",
            ranks.len()
        )));
    }
    for (rank_from_top, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - rank_from_top as u8;
        let mut file: u8 = 0;
        for c in rank_str.chars() {
            if let Some(skip) = c.to_digit(10) {
                if skip == 0 || file as u32 + skip > 8 {
                    return Err(Error::MalformedFen(format!("invalid empty-square run '{c}' in rank")));
                }
                file += skip as u8;
                continue;
            }
            if file >= 8 {
                return Err(Error::MalformedFen("rank describes more than 8 files".to_string()));
            }
            let piece = Piece::from_code(c)
                .ok_or_else(|| Error::MalformedFen(format!("unrecognized piece letter '{c}'")))?;
            let sq = Square::new(rank, file).expect("rank and file are both in range");
            pos.place(sq, piece);
            file += 1;
        }
        if file != 8 {
            return Err(Error::MalformedFen(format!(
                "rank {} describes {file} files, expected 8",
                rank + 1
            )));
        }
    }
    Ok(())
}

fn parse_side(side: &str) -> Result<Color> {
    match side {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(Error::MalformedFen(format!("side to move must be 'w' or 'b', found '{side}'"))),
    }
}

fn parse_castling(castling: &str) -> Result<CastleRights> {
    if castling == "-" {
        return Ok(CastleRights::NONE);
    }
    let mut rights = CastleRights::NONE;
    for c in castling.chars() {
        rights |= match c {
            'K' => CastleRights::WHITE_KINGSIDE,
            'Q' => CastleRights::WHITE_QUEENSIDE,
            'k' => CastleRights::BLACK_KINGSIDE,
            'q' => CastleRights::BLACK_QUEENSIDE,
            _ => return Err(Error::MalformedFen(format!("invalid castling letter '{c}'"))),
        };
    }
    Ok(rights)
}

fn parse_en_passant(ep: &str) -> Result<Option<Square>> {
    if ep == "-" {
        return Ok(None);
    }
    let sq = Square::from_algebraic(ep)
        .ok_or_else(|| Error::MalformedFen(format!("invalid en-passant square '{ep}'")))?;
    if sq.rank() != 2 && sq.rank() != 5 {
        return Err(Error::MalformedFen(format!(
            "en-passant square '{ep}' must be on rank 3 or 6"
        )));
    }
    Ok(Some(sq))
}

fn parse_clock(field: &str, name: &str) -> Result<u32> {
    field
        .parse()
        .map_err(|_| Error::MalformedFen(format!("{name} '{field}' is not a non-negative integer")))
}

#[must_use]
/// Render `pos` as a FEN string. Always emits all six fields; uses `-`
/// where a field has no content.
pub fn generate(pos: &Position) -> String {
    let mut placement = String::new();
    for rank in (0..8).rev() {
        let mut empty_run = 0u8;
        for file in 0..8 {
            let sq = Square::new(rank, file).unwrap();
            match pos.piece_at(sq) {
                Some(piece) => {
                    if empty_run > 0 {
                        placement.push_str(&empty_run.to_string());
                        empty_run = 0;
                    }
                    placement.push(piece.code());
                }
                None => empty_run += 1,
            }
        }
        if empty_run > 0 {
            placement.push_str(&empty_run.to_string());
        }
        if rank != 0 {
            placement.push('/');
        }
    }

    let side = match pos.side_to_move() {
        Color::White => "w",
        Color::Black => "b",
    };

    let rights = pos.castling_rights();
    let mut castling = String::new();
    if rights.has_kingside(Color::White) {
        castling.push('K');
    }
    if rights.has_queenside(Color::White) {
        castling.push('Q');
    }
    if rights.has_kingside(Color::Black) {
        castling.push('k');
    }
    if rights.has_queenside(Color::Black) {
        castling.push('q');
    }
    if castling.is_empty() {
        castling.push('-');
    }

    let ep = pos.en_passant_square().map_or("-".to_string(), |sq| sq.to_string());

    format!(
        "{} {} {} {} {} {}",
        placement,
        side,
        castling,
        ep,
        pos.halfmove_clock(),
        pos.fullmove_clock()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_starting_position() {
        let pos = parse(START_POSITION_FEN).unwrap();
        assert_eq!(generate(&pos), START_POSITION_FEN);
    }

    #[test]
    fn round_trips_kiwipete() {
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        let pos = parse(fen).unwrap();
        assert_eq!(generate(&pos), fen);
    }

    #[test]
    fn rejects_wrong_field_count() {
        assert!(matches!(parse("8/8/8/8/8/8/8/8 w - -"), Err(Error::MalformedFen(_))));
    }

    #[test]
    fn rejects_short_rank() {
        assert!(matches!(
            parse("7/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(Error::MalformedFen(_))
        ));
    }

    #[test]
    fn rejects_missing_king() {
        assert!(matches!(
            parse("8/8/8/8/8/8/8/8 w - - 0 1"),
            Err(Error::IllegalPosition(_))
        ));
    }

    #[test]
    fn rejects_bad_en_passant_rank() {
        assert!(matches!(
            parse("8/8/8/8/8/8/8/k6K w - e4 0 1"),
            Err(Error::MalformedFen(_))
        ));
    }
}
