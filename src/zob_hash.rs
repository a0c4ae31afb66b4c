use crate::castling::CastlingRights;
use crate::piece::{Color, Piece};
use crate::square::Square;

// Keys are initialized at compile time for reproducibility and
// to avoid init functions
include!(concat!(env!("OUT_DIR"), "/zobrist_keys.rs"));

pub type Hash = u64;

/// Hashes the repeatable part of a position: placement, side to move,
/// castling rights and en passant target
pub struct ZobristHasher {}
impl ZobristHasher {
    pub fn hash_for_piece_sq(piece: Piece, sq: Square) -> Hash {
        let piece_type_offset = 64 * (piece.piece_type as usize);
        let color_offset = if piece.color == Color::White { 6 * 64 } else { 0 };
        Self::ZOBRIST_KEYS[piece_type_offset + color_offset + sq.index()]
    }

    pub fn side_to_move_hash(color: Color) -> Hash {
        if color == Color::Black { Self::ZOBRIST_KEYS[Self::BLACK_TO_MOVE_INDEX] } else { 0u64 }
    }

    pub fn castling_rights_hash(castling_rights: CastlingRights) -> Hash {
        castling_rights
            .indices()
            .fold(0u64, |hash, i| hash ^ Self::ZOBRIST_KEYS[Self::CASTLING_OFFSET + i])
    }

    pub fn en_passant_hash(ep_target: Option<Square>) -> Hash {
        match ep_target {
            Some(sq) => Self::ZOBRIST_KEYS[Self::EP_TARGET_OFFSET + sq.file()],
            None => 0u64,
        }
    }

    pub const BLACK_TO_MOVE_INDEX: usize = 768;
    pub const CASTLING_OFFSET: usize = 769;
    pub const EP_TARGET_OFFSET: usize = 773;
}
