//! Attack maps. A square is attacked when a piece could capture on it, so a
//! slider's first blocker counts as attacked whatever its color.

use crate::bitboard::Bitboard;
use crate::piece::{Color, PieceType};
use crate::position::Position;
use crate::square::Square;

/// Generates the set of squares attacked by the pieces of `attacking_color`
pub fn attacked_squares(position: &Position, attacking_color: Color) -> Bitboard {
    let occupancy = position.get_occupancy_bitboard();
    let mut attack_map = Bitboard::pawn_attacks(
        position.get_piece_bitboard(PieceType::Pawn, attacking_color),
        attacking_color,
    );

    for sq in position.get_piece_bitboard(PieceType::Knight, attacking_color) {
        attack_map |= Bitboard::knight_attacks(sq)
    }
    for sq in position.get_piece_bitboard(PieceType::King, attacking_color) {
        attack_map |= Bitboard::king_attacks(sq)
    }
    for sq in position.get_diagonal_sliders_bitboard(attacking_color) {
        attack_map |= Bitboard::bishop_attacks(sq, occupancy)
    }
    for sq in position.get_cardinal_sliders_bitboard(attacking_color) {
        attack_map |= Bitboard::rook_attacks(sq, occupancy)
    }

    attack_map
}

/// Returns a bitboard with the pieces of `attacking_color` attacking a square.
/// Works backwards from the target, which is cheaper than a full attack map.
pub fn attackers_of_square(position: &Position, target: Square, attacking_color: Color) -> Bitboard {
    let occupancy = position.get_occupancy_bitboard();
    let origin = Bitboard::from_square(target);

    // a pawn attacks the target iff a pawn of the other color on the target would attack it back
    Bitboard::pawn_attacks(origin, attacking_color.opposite())
        & position.get_piece_bitboard(PieceType::Pawn, attacking_color)
        | Bitboard::knight_attacks(target) & position.get_piece_bitboard(PieceType::Knight, attacking_color)
        | Bitboard::king_attacks(target) & position.get_piece_bitboard(PieceType::King, attacking_color)
        | Bitboard::bishop_attacks(target, occupancy) & position.get_diagonal_sliders_bitboard(attacking_color)
        | Bitboard::rook_attacks(target, occupancy) & position.get_cardinal_sliders_bitboard(attacking_color)
}

pub fn is_square_attacked(position: &Position, target: Square, attacking_color: Color) -> bool {
    !attackers_of_square(position, target, attacking_color).is_empty()
}

/// Whether the king of `color` stands on a square attacked by the other side.
/// A side without a king is never in check.
pub fn is_in_check(position: &Position, color: Color) -> bool {
    match position.king_square(color) {
        Some(king_square) => is_square_attacked(position, king_square, color.opposite()),
        None => false,
    }
}

/// Pieces currently giving check to the side to move
pub fn checkers(position: &Position) -> Bitboard {
    let side = position.side_to_move();
    match position.king_square(side) {
        Some(king_square) => attackers_of_square(position, king_square, side.opposite()),
        None => Bitboard::EMPTY,
    }
}
