//! Bookkeeping for the moves that touch more than their origin and target:
//! castling, en passant and promotion. Shared by the move generator and by
//! the position transitions.

use crate::bitboard::Bitboard;
use crate::castling::{CastleSide, CastlingRights};
use crate::piece::{Color, Piece, PieceType};
use crate::r#move::Move;
use crate::square::Square;

/// Squares involved in one castling move
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CastlingPath {
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    /// Squares strictly between king and rook
    pub between: Bitboard,
    /// The king's square, every square it crosses, and its destination
    pub king_path: Bitboard,
}

pub fn castling_path(color: Color, side: CastleSide) -> CastlingPath {
    let rank = match color {
        Color::White => 0,
        Color::Black => 7,
    };
    let sq = |file: usize| Square::new(rank, file).unwrap_or(Square::A1);
    match side {
        CastleSide::KingSide => CastlingPath {
            king_from: sq(4),
            king_to: sq(6),
            rook_from: sq(7),
            rook_to: sq(5),
            between: Bitboard::from_squares(&[sq(5), sq(6)]),
            king_path: Bitboard::from_squares(&[sq(4), sq(5), sq(6)]),
        },
        CastleSide::QueenSide => CastlingPath {
            king_from: sq(4),
            king_to: sq(2),
            rook_from: sq(0),
            rook_to: sq(3),
            between: Bitboard::from_squares(&[sq(1), sq(2), sq(3)]),
            king_path: Bitboard::from_squares(&[sq(4), sq(3), sq(2)]),
        },
    }
}

/// Clears every right whose king or rook home square is the origin or the
/// target of a move, whatever piece actually stands there
pub fn updated_castling_rights(rights: CastlingRights, origin: Square, target: Square) -> CastlingRights {
    let mut updated = rights;
    for color in [Color::White, Color::Black] {
        for side in CastleSide::BOTH {
            let path = castling_path(color, side);
            let touched = |sq: Square| sq == path.king_from || sq == path.rook_from;
            if touched(origin) || touched(target) {
                updated.revoke(color, side);
            }
        }
    }
    updated
}

/// The square of the pawn removed by an en passant capture: target file,
/// origin rank
pub fn en_passant_capture_square(origin: Square, target: Square) -> Square {
    Square::new(origin.rank(), target.file()).unwrap_or(target)
}

/// The en passant target created by a move: the square a pawn skipped over
/// on a double push, nothing otherwise
pub fn en_passant_target(moved: Piece, origin: Square, target: Square) -> Option<Square> {
    if moved.piece_type != PieceType::Pawn || origin.file() != target.file() {
        return None;
    }
    if origin.rank().abs_diff(target.rank()) != 2 {
        return None;
    }
    Square::new((origin.rank() + target.rank()) / 2, origin.file())
}

/// Whether a piece landing on this square must promote
pub fn requires_promotion(moved: Piece, target: Square) -> bool {
    moved.piece_type == PieceType::Pawn && target.rank() == moved.color.promotion_rank()
}

/// The piece that stands on the target square once the move is played
pub fn landing_piece(moved: Piece, mv: Move) -> Piece {
    match mv.promotion() {
        Some(promote_to) if moved.piece_type == PieceType::Pawn => Piece::new(promote_to, moved.color),
        _ => moved,
    }
}

/// Pawn moves and captures are irreversible and reset the fifty-move counter
pub fn resets_halfmove_clock(moved: Piece, mv: Move) -> bool {
    moved.piece_type == PieceType::Pawn || mv.is_capture()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::square::parse_square;

    fn sq(s: &str) -> Square {
        parse_square(s).unwrap()
    }

    #[test]
    fn paths() {
        let path = castling_path(Color::Black, CastleSide::QueenSide);
        assert_eq!(path.king_to, Square::C8);
        assert_eq!(path.rook_from, Square::A8);
        assert_eq!(path.rook_to, Square::D8);
        assert!(path.between.is_set(Square::B8));
        assert!(!path.king_path.is_set(Square::B8));
        assert!(path.king_path.is_set(Square::E8));
    }

    #[test]
    fn rights_invalidation() {
        let rights = updated_castling_rights(CastlingRights::ALL, Square::A1, sq("a3"));
        assert_eq!(rights.to_string(), "Kkq");
        let rights = updated_castling_rights(rights, Square::E1, Square::F1);
        assert_eq!(rights.to_string(), "kq");
        // capturing on h8 removes black's kingside right
        let rights = updated_castling_rights(rights, sq("b2"), Square::H8);
        assert_eq!(rights.to_string(), "q");
    }

    #[test]
    fn en_passant_squares() {
        let pawn = Piece::new(PieceType::Pawn, Color::White);
        assert_eq!(en_passant_target(pawn, sq("e2"), sq("e4")), Some(sq("e3")));
        assert_eq!(en_passant_target(pawn, sq("e2"), sq("e3")), None);
        let rook = Piece::new(PieceType::Rook, Color::White);
        assert_eq!(en_passant_target(rook, sq("e2"), sq("e4")), None);
        assert_eq!(en_passant_capture_square(sq("e5"), sq("d6")), sq("d5"));
    }

    #[test]
    fn promotion() {
        let pawn = Piece::new(PieceType::Pawn, Color::Black);
        assert!(requires_promotion(pawn, sq("c1")));
        assert!(!requires_promotion(pawn, sq("c8")));
        let mv = Move::new_promotion(sq("c2"), sq("c1"), PieceType::Knight, false).unwrap();
        assert_eq!(landing_piece(pawn, mv), Piece::new(PieceType::Knight, Color::Black));
    }
}
