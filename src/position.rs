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

//! `Position`: the full mutable state of a chess game, plus make/unmake.

use std::fmt::{Display, Formatter};

use crate::bitboard::Bitboard;
use crate::castling::CastleRights;
use crate::color::Color;
use crate::error::{Error, Result};
use crate::moves::{Move, MoveFlag};
use crate::piece::{Piece, PieceType};
use crate::square::Square;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Everything needed to reverse one `make_move` call exactly.
pub struct UndoInfo {
    // All fields are Copy, which keeps UndoInfo itself Copy: make_move both
    // pushes a copy onto the undo stack and returns one to the caller.
    pub from: Option<Square>,
    pub to: Option<Square>,
    pub moved_piece: Option<Piece>,
    pub captured_piece: Option<Piece>,
    pub captured_square: Option<Square>,
    pub promotion: Option<PieceType>,
    pub flag: MoveFlag,
    pub prev_en_passant: Option<Square>,
    pub prev_castling_rights: CastleRights,
    pub prev_halfmove_clock: u32,
}

#[derive(Clone, Debug)]
/// The full state of a chess position. `pieces` and `colors` are the
/// source of truth; `diag_sliders`/`ortho_sliders` are caches refreshed
/// after every mutation, kept around because the move generator and
/// attack computation consult them on every pseudo-legal slider move.
pub struct Position {
    pieces: [Bitboard; 12],
    colors: [Bitboard; 2],
    diag_sliders: [Bitboard; 2],
    ortho_sliders: [Bitboard; 2],
    side_to_move: Color,
    castling_rights: CastleRights,
    en_passant_square: Option<Square>,
    halfmove_clock: u32,
    fullmove_clock: u32,
    undo_stack: Vec<UndoInfo>,
}

impl Position {
    #[must_use]
    /// An otherwise-empty position with no pieces, White to move, no
    /// castling rights. Used by the FEN parser as a blank slate.
    pub fn empty() -> Position {
        Position {
            pieces: [Bitboard::EMPTY; 12],
            colors: [Bitboard::EMPTY; 2],
            diag_sliders: [Bitboard::EMPTY; 2],
            ortho_sliders: [Bitboard::EMPTY; 2],
            side_to_move: Color::White,
            castling_rights: CastleRights::NONE,
            en_passant_square: None,
            halfmove_clock: 0,
            fullmove_clock: 1,
            undo_stack: Vec::new(),
        }
    }

    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        let bb = Bitboard::from_square(sq);
        for color in Color::ALL {
            if self.colors[color as usize] & bb == Bitboard::EMPTY {
                continue;
            }
            for piece_type in PieceType::ALL {
                let piece = Piece::new(color, piece_type);
                if self.pieces[piece.index()] & bb != Bitboard::EMPTY {
                    return Some(piece);
                }
            }
        }
        None
    }

    #[must_use]
    pub fn piece_bb(&self, piece: Piece) -> Bitboard {
        self.pieces[piece.index()]
    }

    #[must_use]
    pub fn pieces_of(&self, color: Color, piece_type: PieceType) -> Bitboard {
        self.pieces[Piece::new(color, piece_type).index()]
    }

    #[must_use]
    pub fn color_bb(&self, color: Color) -> Bitboard {
        self.colors[color as usize]
    }

    #[must_use]
    pub fn occupied(&self) -> Bitboard {
        self.colors[0] | self.colors[1]
    }

    #[must_use]
    pub fn diag_sliders(&self, color: Color) -> Bitboard {
        self.diag_sliders[color as usize]
    }

    #[must_use]
    pub fn ortho_sliders(&self, color: Color) -> Bitboard {
        self.ortho_sliders[color as usize]
    }

    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[must_use]
    pub fn castling_rights(&self) -> CastleRights {
        self.castling_rights
    }

    #[must_use]
    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant_square
    }

    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[must_use]
    pub fn fullmove_clock(&self) -> u32 {
        self.fullmove_clock
    }

    #[must_use]
    pub fn king_square(&self, color: Color) -> Square {
        self.pieces_of(color, PieceType::King)
            .lsb()
            .expect("every legal position has exactly one king per side")
    }

    /// Place `piece` on `sq`. Used only by the FEN parser and tests, which
    /// are responsible for not creating overlapping pieces.
    pub(crate) fn place(&mut self, sq: Square, piece: Piece) {
        self.pieces[piece.index()].set(sq);
        self.colors[piece.color as usize].set(sq);
        self.refresh_sliders();
    }

    pub(crate) fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    pub(crate) fn set_castling_rights(&mut self, rights: CastleRights) {
        self.castling_rights = rights;
    }

    pub(crate) fn set_en_passant_square(&mut self, sq: Option<Square>) {
        self.en_passant_square = sq;
    }

    pub(crate) fn set_halfmove_clock(&mut self, clock: u32) {
        self.halfmove_clock = clock;
    }

    pub(crate) fn set_fullmove_clock(&mut self, clock: u32) {
        self.fullmove_clock = clock;
    }

    fn refresh_sliders(&mut self) {
        for color in Color::ALL {
            self.diag_sliders[color as usize] =
                self.pieces_of(color, PieceType::Bishop) | self.pieces_of(color, PieceType::Queen);
            self.ortho_sliders[color as usize] =
                self.pieces_of(color, PieceType::Rook) | self.pieces_of(color, PieceType::Queen);
        }
    }

    /// Remove whatever piece of `color` sits at `sq` from both its piece
    /// bitboard and the color bitboard. No-op if `sq` is empty for that
    /// color.
    fn remove_piece(&mut self, color: Color, sq: Square) -> Option<Piece> {
        for piece_type in PieceType::ALL {
            let piece = Piece::new(color, piece_type);
            if self.pieces[piece.index()].contains(sq) {
                self.pieces[piece.index()].clear(sq);
                self.colors[color as usize].clear(sq);
                return Some(piece);
            }
        }
        None
    }

    fn add_piece(&mut self, piece: Piece, sq: Square) {
        self.pieces[piece.index()].set(sq);
        self.colors[piece.color as usize].set(sq);
    }

    /// The square of the pawn captured en passant, given the capturing
    /// pawn's destination square: same file as `to`, same rank as `from`.
    fn en_passant_victim_square(from: Square, to: Square) -> Square {
        Square::new(from.rank(), to.file()).expect("from and to share a valid rank/file pair")
    }

    /// Apply `mv` to the board, returning the `UndoInfo` needed to reverse
    /// it (also retained on the internal undo stack for `unmake_move`).
    pub fn make_move(&mut self, mv: Move) -> UndoInfo {
        let side = self.side_to_move;
        let from = mv.from_sq();
        let to = mv.to_sq();
        let flag = mv.flag();

        let moved_piece = self
            .piece_at(from)
            .expect("make_move precondition: from holds a piece of the side to move");

        let (captured_piece, captured_square) = if flag == MoveFlag::EnPassantCapture {
            let victim_sq = Position::en_passant_victim_square(from, to);
            (self.piece_at(victim_sq), Some(victim_sq))
        } else {
            (self.piece_at(to), Some(to))
        };

        let undo = UndoInfo {
            from: Some(from),
            to: Some(to),
            moved_piece: Some(moved_piece),
            captured_piece,
            captured_square: captured_piece.map(|_| captured_square.unwrap()),
            promotion: flag.promotion_piece(),
            flag,
            prev_en_passant: self.en_passant_square,
            prev_castling_rights: self.castling_rights,
            prev_halfmove_clock: self.halfmove_clock,
        };

        if let (Some(_), Some(victim_sq)) = (captured_piece, captured_square) {
            self.remove_piece(!side, victim_sq);
        }

        self.remove_piece(side, from);
        self.add_piece(moved_piece, to);

        if let Some(promoted_type) = flag.promotion_piece() {
            self.remove_piece(side, to);
            self.add_piece(Piece::new(side, promoted_type), to);
        }

        if flag == MoveFlag::Castle {
            let rank = from.rank();
            let (rook_from_file, rook_to_file) = if to.file() > from.file() { (7, 5) } else { (0, 3) };
            let rook_from = Square::new(rank, rook_from_file).unwrap();
            let rook_to = Square::new(rank, rook_to_file).unwrap();
            self.remove_piece(side, rook_from);
            self.add_piece(Piece::new(side, PieceType::Rook), rook_to);
        }

        self.en_passant_square = if flag == MoveFlag::PawnTwoUp {
            let dir = side.pawn_direction();
            from.try_towards(dir)
        } else {
            None
        };

        self.castling_rights = self
            .castling_rights
            .revoking(CastleRights::revoked_by_square(from))
            .revoking(CastleRights::revoked_by_square(to));
        if moved_piece.piece_type == PieceType::King {
            self.castling_rights = self.castling_rights.revoking(CastleRights::for_color(side));
        }

        let is_capture = undo.captured_piece.is_some();
        if moved_piece.piece_type == PieceType::Pawn || is_capture {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }

        self.side_to_move = !side;
        if self.side_to_move == Color::White {
            self.fullmove_clock += 1;
        }

        self.refresh_sliders();
        self.undo_stack.push(undo);
        undo
    }

    /// Reverse the most recent `make_move`. Panics if called with no moves
    /// on the undo stack, or with an `UndoInfo` that is not the most recent
    /// one (an ordering violation by the caller).
    pub fn unmake_move(&mut self, undo: UndoInfo) {
        let top = self
            .undo_stack
            .pop()
            .expect("unmake_move called with an empty undo stack");
        debug_assert_eq!(top, undo, "unmake_move must reverse moves in LIFO order");

        self.side_to_move = !self.side_to_move;
        if self.side_to_move == Color::Black {
            self.fullmove_clock -= 1;
        }
        self.en_passant_square = undo.prev_en_passant;
        self.castling_rights = undo.prev_castling_rights;
        self.halfmove_clock = undo.prev_halfmove_clock;

        let side = self.side_to_move;
        let from = undo.from.expect("unmake_move does not support null moves; see unmake_null");
        let to = undo.to.unwrap();
        let moved_piece = undo.moved_piece.unwrap();

        if undo.flag == MoveFlag::Castle {
            let rank = from.rank();
            let (rook_from_file, rook_to_file) = if to.file() > from.file() { (7, 5) } else { (0, 3) };
            let rook_from = Square::new(rank, rook_from_file).unwrap();
            let rook_to = Square::new(rank, rook_to_file).unwrap();
            self.remove_piece(side, rook_to);
            self.add_piece(Piece::new(side, PieceType::Rook), rook_from);
        }

        // Whatever sits at `to` now — the moved piece, or its promoted
        // form — is removed; the original piece is restored at `from`.
        self.remove_piece(side, to);
        self.add_piece(moved_piece, from);

        if let (Some(captured), Some(captured_sq)) = (undo.captured_piece, undo.captured_square) {
            self.add_piece(captured, captured_sq);
        }

        self.refresh_sliders();
    }

    /// Make a null move: flips the side to move and clears en passant,
    /// without moving any piece. Used by null-move search pruning.
    pub fn make_null_move(&mut self) -> UndoInfo {
        let undo = UndoInfo {
            from: None,
            to: None,
            moved_piece: None,
            captured_piece: None,
            captured_square: None,
            promotion: None,
            flag: MoveFlag::None,
            prev_en_passant: self.en_passant_square,
            prev_castling_rights: self.castling_rights,
            prev_halfmove_clock: self.halfmove_clock,
        };
        self.en_passant_square = None;
        self.side_to_move = !self.side_to_move;
        if self.side_to_move == Color::White {
            self.fullmove_clock += 1;
        }
        self.halfmove_clock += 1;
        self.undo_stack.push(undo);
        undo
    }

    pub fn unmake_null_move(&mut self, undo: UndoInfo) {
        let top = self
            .undo_stack
            .pop()
            .expect("unmake_null_move called with an empty undo stack");
        debug_assert_eq!(top, undo);
        self.side_to_move = !self.side_to_move;
        if self.side_to_move == Color::Black {
            self.fullmove_clock -= 1;
        }
        self.en_passant_square = undo.prev_en_passant;
        self.castling_rights = undo.prev_castling_rights;
        self.halfmove_clock = undo.prev_halfmove_clock;
    }

    /// Resolve a `(from, to, promotion)` triple, as produced by
    /// [`crate::moves::Move::from_uci`], against this position's legal
    /// moves, recovering the flag the bare squares can't carry (capture,
    /// castle, en passant, pawn double push).
    ///
    /// # Errors
    /// Returns [`Error::IllegalMove`] if no legal move matches.
    pub fn resolve_move(&self, from: Square, to: Square, promotion: Option<PieceType>) -> Result<Move> {
        crate::movegen::legal_moves(self)
            .into_iter()
            .find(|mv| mv.from_sq() == from && mv.to_sq() == to && mv.flag().promotion_piece() == promotion)
            .ok_or_else(|| {
                let promo_suffix = promotion.map_or(String::new(), |p| p.code().to_ascii_lowercase().to_string());
                Error::IllegalMove(format!("{from}{to}{promo_suffix} is not a legal move in this position"))
            })
    }

    /// Parse a UCI move string and apply it if it names a legal move.
    ///
    /// # Errors
    /// Returns [`Error::IllegalMove`] if `uci` is not well-formed move text,
    /// or does not resolve to a legal move in this position.
    pub fn make_uci(&mut self, uci: &str) -> Result<UndoInfo> {
        let (from, to, promotion) =
            Move::from_uci(uci).ok_or_else(|| Error::IllegalMove(format!("'{uci}' is not a well-formed move")))?;
        let mv = self.resolve_move(from, to, promotion)?;
        Ok(self.make_move(mv))
    }

    /// Sanity-check the structural invariants documented on `Position`:
    /// pairwise-disjoint piece bitboards whose union is `colors[W] | colors[B]`,
    /// and exactly one king per side. Returns `Err(Error::IllegalPosition)`
    /// describing the first violation found.
    pub fn validate(&self) -> Result<()> {
        let mut seen = Bitboard::EMPTY;
        for &bb in &self.pieces {
            if (seen & bb) != Bitboard::EMPTY {
                return Err(Error::IllegalPosition("overlapping piece bitboards".to_string()));
            }
            seen |= bb;
        }
        if seen != (self.colors[0] | self.colors[1]) {
            return Err(Error::IllegalPosition(
                "piece bitboards do not match color bitboards".to_string(),
            ));
        }
        for color in Color::ALL {
            let kings = self.pieces_of(color, PieceType::King).popcount();
            if kings != 1 {
                return Err(Error::IllegalPosition(format!(
                    "{color:?} has {kings} kings, expected exactly 1"
                )));
            }
        }
        Ok(())
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                let sq = Square::new(rank, file).unwrap();
                let c = self.piece_at(sq).map_or('.', Piece::code);
                write!(f, "{c} ")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "  a b c d e f g h")?;
        write!(
            f,
            "{:?} to move, castling {:?}, ep {}",
            self.side_to_move,
            self.castling_rights,
            self.en_passant_square
                .map_or("-".to_string(), |sq| sq.to_string())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::{self, START_POSITION_FEN};

    #[test]
    fn starting_position_is_valid() {
        let pos = fen::parse(START_POSITION_FEN).unwrap();
        pos.validate().unwrap();
        assert_eq!(pos.side_to_move(), Color::White);
        assert_eq!(pos.castling_rights(), CastleRights::ALL);
    }

    #[test]
    fn simple_pawn_push_make_unmake_round_trips() {
        let mut pos = fen::parse(START_POSITION_FEN).unwrap();
        let before = fen::generate(&pos);
        let mv = Move::new(Square::E2, Square::E4, MoveFlag::PawnTwoUp);
        let undo = pos.make_move(mv);
        assert_eq!(pos.en_passant_square(), Some(Square::E3));
        assert_eq!(pos.side_to_move(), Color::Black);
        pos.unmake_move(undo);
        assert_eq!(fen::generate(&pos), before);
    }

    #[test]
    fn castling_moves_the_rook_too() {
        let mut pos = fen::parse("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let before = fen::generate(&pos);
        let mv = Move::new(Square::E1, Square::G1, MoveFlag::Castle);
        let undo = pos.make_move(mv);
        assert_eq!(pos.piece_at(Square::F1), Some(Piece::new(Color::White, PieceType::Rook)));
        assert_eq!(pos.piece_at(Square::G1), Some(Piece::new(Color::White, PieceType::King)));
        assert!(!pos.castling_rights().has_kingside(Color::White));
        assert!(!pos.castling_rights().has_queenside(Color::White));
        pos.unmake_move(undo);
        assert_eq!(fen::generate(&pos), before);
    }

    #[test]
    fn en_passant_capture_removes_victim_pawn() {
        let mut pos = fen::parse("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3").unwrap();
        let before = fen::generate(&pos);
        let mv = Move::new(Square::E5, Square::D6, MoveFlag::EnPassantCapture);
        let undo = pos.make_move(mv);
        assert_eq!(pos.piece_at(Square::D5), None);
        assert_eq!(pos.piece_at(Square::D6), Some(Piece::new(Color::White, PieceType::Pawn)));
        pos.unmake_move(undo);
        assert_eq!(fen::generate(&pos), before);
    }

    #[test]
    fn promotion_replaces_the_pawn() {
        let mut pos = fen::parse("8/P7/8/8/8/8/8/k6K w - - 0 1").unwrap();
        let before = fen::generate(&pos);
        let mv = Move::new(Square::A7, Square::A8, MoveFlag::PromoteQueen);
        let undo = pos.make_move(mv);
        assert_eq!(pos.piece_at(Square::A8), Some(Piece::new(Color::White, PieceType::Queen)));
        pos.unmake_move(undo);
        assert_eq!(fen::generate(&pos), before);
        assert_eq!(pos.piece_at(Square::A7), Some(Piece::new(Color::White, PieceType::Pawn)));
    }

    #[test]
    fn make_uci_applies_a_legal_move() {
        let mut pos = fen::parse(START_POSITION_FEN).unwrap();
        let undo = pos.make_uci("e2e4").unwrap();
        assert_eq!(pos.piece_at(Square::E4), Some(Piece::new(Color::White, PieceType::Pawn)));
        assert_eq!(pos.en_passant_square(), Some(Square::E3));
        pos.unmake_move(undo);
    }

    #[test]
    fn make_uci_resolves_castling_from_king_squares_alone() {
        let mut pos = fen::parse("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let undo = pos.make_uci("e1g1").unwrap();
        assert_eq!(pos.piece_at(Square::F1), Some(Piece::new(Color::White, PieceType::Rook)));
        assert_eq!(pos.piece_at(Square::G1), Some(Piece::new(Color::White, PieceType::King)));
        pos.unmake_move(undo);
    }

    #[test]
    fn make_uci_resolves_promotion_letter_to_the_right_flag() {
        let mut pos = fen::parse("8/P7/8/8/8/8/8/k6K w - - 0 1").unwrap();
        let undo = pos.make_uci("a7a8q").unwrap();
        assert_eq!(pos.piece_at(Square::A8), Some(Piece::new(Color::White, PieceType::Queen)));
        pos.unmake_move(undo);
    }

    #[test]
    fn make_uci_rejects_a_move_absent_from_the_legal_list() {
        let mut pos = fen::parse(START_POSITION_FEN).unwrap();
        assert!(matches!(pos.make_uci("e2e5"), Err(Error::IllegalMove(_))));
    }

    #[test]
    fn make_uci_rejects_malformed_move_text() {
        let mut pos = fen::parse(START_POSITION_FEN).unwrap();
        assert!(matches!(pos.make_uci("zz"), Err(Error::IllegalMove(_))));
    }

    #[test]
    fn null_move_flips_side_and_clears_en_passant() {
        let mut pos = fen::parse("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3").unwrap();
        let before = fen::generate(&pos);
        let undo = pos.make_null_move();
        assert_eq!(pos.side_to_move(), Color::Black);
        assert_eq!(pos.en_passant_square(), None);
        pos.unmake_null_move(undo);
        assert_eq!(fen::generate(&pos), before);
    }
}
