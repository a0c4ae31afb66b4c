use crate::castling::CastlingRights;
use crate::piece::Piece;
use crate::r#move::Move;
use crate::square::Square;
use crate::zob_hash::Hash;

/// Everything a move destroys, so that it can be reverted without
/// recomputing anything
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub move_played: Move,
    pub captured_piece: Option<Piece>,
    pub ep_target: Option<Square>,
    pub castling_rights: CastlingRights,
    pub halfmove_clock: u32,
    pub hash: Hash,
}
