//! The position: placement, side to move, castling rights, en passant target
//! and counters. Positions are values; the only in-place mutation happens in
//! `make`/`unmake`, which always come in pairs or produce a fresh copy.

use std::fmt::{Display, Formatter};
use crate::attacks;
use crate::bitboard::Bitboard;
use crate::castling::CastlingRights;
use crate::error::{IllegalMoveError, Result};
use crate::history::HistoryEntry;
use crate::legality;
use crate::movelist::MoveList;
use crate::piece::{Color, Piece, PieceType};
use crate::r#move::Move;
use crate::special;
use crate::square::Square;
use crate::zob_hash::{Hash, ZobristHasher};

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

// Bitboards are indexed by color and piece_type, with a redundant
// color bitboard at index 6.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub(crate) pieces: [Option<Piece>; 64],
    pub(crate) bitboards: [[Bitboard; 7]; 2],
    pub(crate) side_to_move: Color,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) ep_target: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
    pub(crate) hash: Hash,
}

impl Position {
    /// The standard starting position
    pub fn start() -> Position {
        let mut position = Position::empty();
        let back_rank = [
            PieceType::Rook,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Queen,
            PieceType::King,
            PieceType::Bishop,
            PieceType::Knight,
            PieceType::Rook,
        ];
        for (file, piece_type) in back_rank.iter().enumerate() {
            for (color, back, pawns) in [(Color::White, 0, 1), (Color::Black, 7, 6)] {
                if let (Some(back_sq), Some(pawn_sq)) = (Square::new(back, file), Square::new(pawns, file)) {
                    position.add_piece(Piece::new(*piece_type, color), back_sq);
                    position.add_piece(Piece::new(PieceType::Pawn, color), pawn_sq);
                }
            }
        }
        position.castling_rights = CastlingRights::ALL;
        position.hash = position.cold_hash();
        position
    }

    /// A board with no pieces, white to move. Only a building block: the king
    /// invariants are established by the FEN parser and `start`.
    pub(crate) fn empty() -> Position {
        Position {
            pieces: [None; 64],
            bitboards: [[Bitboard::EMPTY; 7]; 2],
            side_to_move: Color::White,
            castling_rights: CastlingRights::NONE,
            ep_target: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            hash: 0,
        }
    }

    /*
    MOVE APPLICATION
     */

    /// Produces the position reached by playing a legal move. The input is
    /// left untouched.
    pub fn apply(&self, mv: Move) -> Result<Position> {
        self.transition(mv, true).map(|(next, _)| next)
    }

    /// Same as [`Position::apply`] without checking the move against the legal
    /// move list. Only structural checks remain: a piece of the side to move
    /// on the origin, no capture of an own piece, and a promotion piece when a
    /// pawn reaches its last rank. Passing a move that is not legal yields a
    /// position the rules cannot reach.
    pub fn apply_unvalidated(&self, mv: Move) -> Result<Position> {
        self.transition(mv, false).map(|(next, _)| next)
    }

    /// Plays a move on a copy, returning the new position and the record
    /// needed to revert it
    pub fn transition(&self, mv: Move, validate: bool) -> Result<(Position, HistoryEntry)> {
        self.check_promotion(mv)?;
        if validate && !self.legal_moves().contains(&mv) {
            return Err(IllegalMoveError::NotLegal(mv.to_string()).into());
        }
        let mut next = self.clone();
        let entry = next.make(mv)?;
        Ok((next, entry))
    }

    /// Restores the position that preceded the move recorded in `entry`.
    /// `entry` must be the record produced when reaching `self`.
    pub fn undo(&self, entry: &HistoryEntry) -> Position {
        let mut previous = self.clone();
        previous.unmake(entry);
        previous
    }

    fn check_promotion(&self, mv: Move) -> Result<()> {
        if let Some(moved) = self.piece_on(mv.origin()) {
            if special::requires_promotion(moved, mv.target()) && mv.promotion().is_none() {
                return Err(IllegalMoveError::MissingPromotion(mv).into());
            }
        }
        Ok(())
    }

    /// Makes a move on the position, returning what is needed to unmake it.
    /// The move is expected to be at least pseudo-legal.
    pub(crate) fn make(&mut self, mv: Move) -> Result<HistoryEntry> {
        let origin = mv.origin();
        let target = mv.target();
        let side = self.side_to_move;

        let moved = match self.pieces[origin.index()] {
            Some(p) if p.color == side => p,
            _ => return Err(IllegalMoveError::EmptyOrigin(origin).into()),
        };
        if self.color_on(target) == Some(side) {
            return Err(IllegalMoveError::NotLegal(mv.to_string()).into());
        }

        let captured_square = if mv.is_en_passant() {
            special::en_passant_capture_square(origin, target)
        } else {
            target
        };
        // the hash is saved before any piece leaves the board
        let hash = self.hash;
        let history_entry = HistoryEntry {
            move_played: mv,
            captured_piece: self.remove_piece(captured_square),
            ep_target: self.ep_target,
            castling_rights: self.castling_rights,
            halfmove_clock: self.halfmove_clock,
            hash,
        };

        self.remove_piece(origin);
        self.add_piece(special::landing_piece(moved, mv), target);
        if let Some(castle) = mv.castle_side() {
            let path = special::castling_path(side, castle);
            if let Some(rook) = self.remove_piece(path.rook_from) {
                self.add_piece(rook, path.rook_to)
            }
        }

        self.hash ^= ZobristHasher::castling_rights_hash(self.castling_rights);
        self.castling_rights = special::updated_castling_rights(self.castling_rights, origin, target);
        self.hash ^= ZobristHasher::castling_rights_hash(self.castling_rights);

        self.hash ^= ZobristHasher::en_passant_hash(self.ep_target);
        self.ep_target = special::en_passant_target(moved, origin, target);
        self.hash ^= ZobristHasher::en_passant_hash(self.ep_target);

        if special::resets_halfmove_clock(moved, mv) {
            self.halfmove_clock = 0
        } else {
            self.halfmove_clock += 1
        }
        if side == Color::Black {
            self.fullmove_number += 1
        }
        self.hash ^= ZobristHasher::ZOBRIST_KEYS[ZobristHasher::BLACK_TO_MOVE_INDEX];
        self.side_to_move = side.opposite();

        Ok(history_entry)
    }

    /// Unmakes the move recorded in the entry, which must be the last one made
    pub(crate) fn unmake(&mut self, entry: &HistoryEntry) {
        let move_played = entry.move_played;
        self.side_to_move = self.side_to_move.opposite();
        let side = self.side_to_move;
        if side == Color::Black {
            self.fullmove_number -= 1
        }

        if let Some(castle) = move_played.castle_side() {
            let path = special::castling_path(side, castle);
            if let Some(rook) = self.remove_piece(path.rook_to) {
                self.add_piece(rook, path.rook_from)
            }
        }
        if let Some(moved) = self.remove_piece(move_played.target()) {
            let original = if move_played.promotion().is_some() {
                Piece::new(PieceType::Pawn, side)
            } else {
                moved
            };
            self.add_piece(original, move_played.origin())
        }
        if let Some(captured) = entry.captured_piece {
            let captured_square = if move_played.is_en_passant() {
                special::en_passant_capture_square(move_played.origin(), move_played.target())
            } else {
                move_played.target()
            };
            self.add_piece(captured, captured_square)
        }

        self.castling_rights = entry.castling_rights;
        self.ep_target = entry.ep_target;
        self.halfmove_clock = entry.halfmove_clock;
        self.hash = entry.hash;
    }

    /// Places a new piece on a given square
    pub(crate) fn add_piece(&mut self, piece: Piece, sq: Square) {
        self.pieces[sq.index()] = Some(piece);
        self.bitboards[piece.color as usize][piece.piece_type as usize].set(sq);
        self.bitboards[piece.color as usize][6].set(sq);
        self.hash ^= ZobristHasher::hash_for_piece_sq(piece, sq);
    }

    /// Clears the given square, returning the piece that has been removed if any
    pub(crate) fn remove_piece(&mut self, sq: Square) -> Option<Piece> {
        let removed = self.pieces[sq.index()].take();
        if let Some(p) = removed {
            self.bitboards[p.color as usize][p.piece_type as usize].unset(sq);
            self.bitboards[p.color as usize][6].unset(sq);
            self.hash ^= ZobristHasher::hash_for_piece_sq(p, sq);
        }
        removed
    }

    /*
    INTERESTING GETTERS
     */
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }
    pub fn en_passant_target(&self) -> Option<Square> {
        self.ep_target
    }
    /// Plies since the last capture or pawn move
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.pieces[sq.index()]
    }
    pub fn piece_type_on(&self, sq: Square) -> Option<PieceType> {
        self.pieces[sq.index()].map(|p| p.piece_type)
    }
    pub fn color_on(&self, sq: Square) -> Option<Color> {
        self.pieces[sq.index()].map(|p| p.color)
    }

    pub fn get_piece_bitboard(&self, piece_type: PieceType, color: Color) -> Bitboard {
        self.bitboards[color as usize][piece_type as usize]
    }
    pub fn get_piecetype_bitboard(&self, piece_type: PieceType) -> Bitboard {
        self.bitboards[0][piece_type as usize] | self.bitboards[1][piece_type as usize]
    }
    pub fn get_color_bitboard(&self, color: Color) -> Bitboard {
        self.bitboards[color as usize][6]
    }
    pub fn get_occupancy_bitboard(&self) -> Bitboard {
        self.bitboards[0][6] | self.bitboards[1][6]
    }
    pub fn get_diagonal_sliders_bitboard(&self, color: Color) -> Bitboard {
        self.bitboards[color as usize][PieceType::Bishop as usize]
            | self.bitboards[color as usize][PieceType::Queen as usize]
    }
    pub fn get_cardinal_sliders_bitboard(&self, color: Color) -> Bitboard {
        self.bitboards[color as usize][PieceType::Rook as usize]
            | self.bitboards[color as usize][PieceType::Queen as usize]
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.bitboards[color as usize][PieceType::King as usize].ls1b()
    }

    /// Every piece on the board along with its square, from a1 to h8
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.get_occupancy_bitboard()
            .filter_map(move |sq| self.pieces[sq.index()].map(|p| (sq, p)))
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        attacks::is_in_check(self, color)
    }
    /// Whether the side to move is in check
    pub fn in_check(&self) -> bool {
        attacks::is_in_check(self, self.side_to_move)
    }

    pub fn legal_moves(&self) -> MoveList {
        legality::legal_moves(self)
    }

    /// Hash of the repeatable state: placement, side to move, castling rights
    /// and en passant target
    pub fn hash(&self) -> Hash {
        self.hash
    }

    pub(crate) fn cold_hash(&self) -> Hash {
        let mut hash = 0u64;
        for (sq, piece) in self.pieces() {
            hash ^= ZobristHasher::hash_for_piece_sq(piece, sq)
        }
        hash ^= ZobristHasher::side_to_move_hash(self.side_to_move);
        hash ^= ZobristHasher::castling_rights_hash(self.castling_rights);
        hash ^= ZobristHasher::en_passant_hash(self.ep_target);
        hash
    }

    /// Read-only character view of the board, rank 8 first. Uppercase letters
    /// are white pieces, lowercase black ones, `.` an empty square.
    pub fn grid(&self) -> [[char; 8]; 8] {
        let mut grid = [['.'; 8]; 8];
        for (sq, piece) in self.pieces() {
            grid[7 - sq.rank()][sq.file()] = piece.to_char();
        }
        grid
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let ep = match self.ep_target {
            Some(sq) => sq.to_string(),
            None => String::from("-"),
        };
        let side_notes = [
            String::new(),
            format!("  side to move: {}", self.side_to_move),
            format!("  castling rights: {}", self.castling_rights),
            format!("  en passant: {}", ep),
            format!("  halfmove clock: {}, move {}", self.halfmove_clock, self.fullmove_number),
            format!("  hash: {:#018x}", self.hash),
            String::new(),
            String::new(),
        ];
        for (i, (row, note)) in self.grid().iter().zip(side_notes.iter()).enumerate() {
            write!(f, "{} ", 8 - i)?;
            for c in row {
                write!(f, "{} ", c)?;
            }
            writeln!(f, "{}", note)?;
        }
        write!(f, "  a b c d e f g h")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::square::parse_square;

    fn sq(s: &str) -> Square {
        parse_square(s).unwrap()
    }

    #[test]
    fn start_position() {
        let position = Position::start();
        assert_eq!(position.pieces().count(), 32);
        assert_eq!(position.king_square(Color::White), Some(Square::E1));
        assert_eq!(position.king_square(Color::Black), Some(Square::E8));
        assert_eq!(position.castling_rights(), CastlingRights::ALL);
        assert_eq!(position.hash(), position.cold_hash());
        assert_eq!(position.grid()[0], ['r', 'n', 'b', 'q', 'k', 'b', 'n', 'r']);
        assert_eq!(position.grid()[6], ['P'; 8]);
        assert_eq!(position.grid()[4], ['.'; 8]);
    }

    #[test]
    fn make_unmake_restores_everything() {
        let mut position = Position::start();
        let original = position.clone();
        let entry = position.make(Move::new_double_push(sq("e2"), sq("e4"))).unwrap();
        assert_eq!(position.en_passant_target(), Some(sq("e3")));
        assert_eq!(position.side_to_move(), Color::Black);
        assert_eq!(position.hash(), position.cold_hash());
        position.unmake(&entry);
        assert_eq!(position, original);
    }

    #[test]
    fn captures_are_undone_exactly() {
        let cases = [
            ("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1", "e5f7"),
            ("rnbqkbnr/pp1ppppp/8/2pP4/8/8/PPP1PPPP/RNBQKBNR w KQkq c6 0 2", "d5c6"),
            ("1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1", "a7b8q"),
        ];
        for (fen, uci) in cases {
            let position = Position::from_fen(fen).unwrap();
            let mv = crate::notation::parse_uci(&position, uci).unwrap();
            assert!(mv.is_capture(), "{}", uci);

            let (next, entry) = position.transition(mv, true).unwrap();
            assert_eq!(entry.hash, position.hash(), "{}", uci);
            assert_eq!(next.hash(), next.cold_hash(), "{}", uci);
            let back = next.undo(&entry);
            assert_eq!(back, position, "{}", uci);
            assert_eq!(back.hash(), back.cold_hash(), "{}", uci);

            let mut scratch = position.clone();
            let entry = scratch.make(mv).unwrap();
            scratch.unmake(&entry);
            assert_eq!(scratch, position, "{}", uci);
        }
    }

    #[test]
    fn every_capture_unmakes_to_the_same_hash() {
        let mut position =
            Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1").unwrap();
        let original = position.clone();
        let captures: Vec<Move> = position.legal_moves().into_iter().filter(|m| m.is_capture()).collect();
        assert_eq!(captures.len(), 8);
        for mv in captures {
            let entry = position.make(mv).unwrap();
            position.unmake(&entry);
            assert_eq!(position.hash(), original.hash(), "{}", mv);
        }
        assert_eq!(position, original);
    }

    #[test]
    fn apply_leaves_input_untouched() {
        let position = Position::start();
        let next = position.apply(Move::new_quiet(sq("g1"), sq("f3"))).unwrap();
        assert_eq!(position, Position::start());
        assert_eq!(next.piece_type_on(sq("f3")), Some(PieceType::Knight));
        assert_eq!(next.halfmove_clock(), 1);
        assert_eq!(next.fullmove_number(), 1);
    }

    #[test]
    fn apply_rejects_illegal_moves() {
        let position = Position::start();
        assert!(position.apply(Move::new_quiet(sq("e2"), sq("e5"))).is_err());
        // a well-formed move with the wrong flags is not the legal move
        assert!(position.apply(Move::new_quiet(sq("e2"), sq("e4"))).is_err());
        assert!(position.apply_unvalidated(Move::new_quiet(sq("e4"), sq("e5"))).is_err());
        assert!(position.apply_unvalidated(Move::new_quiet(sq("a1"), sq("a2"))).is_err());
    }

    #[test]
    fn fullmove_number_advances_after_black() {
        let position = Position::start()
            .apply(Move::new_double_push(sq("e2"), sq("e4")))
            .unwrap();
        assert_eq!(position.fullmove_number(), 1);
        let position = position.apply(Move::new_double_push(sq("e7"), sq("e5"))).unwrap();
        assert_eq!(position.fullmove_number(), 2);
        assert_eq!(position.halfmove_clock(), 0);
    }
}
