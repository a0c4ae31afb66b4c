//! Pseudo-legal move generation: moves that follow the movement rules of
//! each piece, without looking at the safety of the mover's king. Castling is
//! the exception, as its rules themselves forbid crossing attacked squares.

use crate::{
    attacks,
    bitboard::Bitboard,
    castling::CastleSide,
    movelist::MoveList,
    piece::{Color, PieceType},
    position::Position,
    r#move::Move,
    special,
    square::Square,
};

struct MoveGenInfo {
    pub move_list: MoveList,
    pub side: Color,
    pub occupancy: Bitboard,
    pub opponents: Bitboard,
    /// Squares a non-pawn piece may land on: empty or enemy-occupied
    pub targets: Bitboard,
}

/// Every pseudo-legal move of the side to move
pub fn pseudo_moves(position: &Position) -> MoveList {
    let side = position.side_to_move();
    let mut info = MoveGenInfo {
        move_list: MoveList::default(),
        side,
        occupancy: position.get_occupancy_bitboard(),
        opponents: position.get_color_bitboard(side.opposite()),
        targets: !position.get_color_bitboard(side),
    };

    pawn_moves(position, &mut info);
    en_passant(position, &mut info);
    knight_moves(position, &mut info);
    slider_moves(position, &mut info);
    king_moves(position, &mut info);
    castling(position, &mut info);

    info.move_list
}

fn pawn_moves(position: &Position, info: &mut MoveGenInfo) {
    let forward = info.side.forward();
    for origin in position.get_piece_bitboard(PieceType::Pawn, info.side) {
        if let Some(single) = origin.offset(forward, 0) {
            if !info.occupancy.is_set(single) {
                if single.rank() == info.side.promotion_rank() {
                    push_promotions(info, origin, single, false);
                } else {
                    info.move_list.push(Move::new_quiet(origin, single));
                    if origin.rank() == info.side.pawn_rank() {
                        if let Some(double) = single.offset(forward, 0) {
                            if !info.occupancy.is_set(double) {
                                info.move_list.push(Move::new_double_push(origin, double));
                            }
                        }
                    }
                }
            }
        }

        for target in Bitboard::pawn_attacks(Bitboard::from_square(origin), info.side) & info.opponents {
            if target.rank() == info.side.promotion_rank() {
                push_promotions(info, origin, target, true);
            } else {
                info.move_list.push(Move::new_capture(origin, target));
            }
        }
    }
}

fn push_promotions(info: &mut MoveGenInfo, origin: Square, target: Square, is_capture: bool) {
    for piece in PieceType::PROMOTIONS {
        if let Some(mv) = Move::new_promotion(origin, target, piece, is_capture) {
            info.move_list.push(mv)
        }
    }
}

fn en_passant(position: &Position, info: &mut MoveGenInfo) {
    if let Some(target) = position.en_passant_target() {
        // Our pawns able to capture on the target are the ones a pawn of the
        // opposite color standing on the target would attack
        let origins = Bitboard::pawn_attacks(Bitboard::from_square(target), info.side.opposite())
            & position.get_piece_bitboard(PieceType::Pawn, info.side);
        for origin in origins {
            info.move_list.push(Move::new_en_passant(origin, target))
        }
    }
}

fn knight_moves(position: &Position, info: &mut MoveGenInfo) {
    for origin in position.get_piece_bitboard(PieceType::Knight, info.side) {
        push_piece_moves(info, origin, Bitboard::knight_attacks(origin));
    }
}

fn king_moves(position: &Position, info: &mut MoveGenInfo) {
    for origin in position.get_piece_bitboard(PieceType::King, info.side) {
        push_piece_moves(info, origin, Bitboard::king_attacks(origin));
    }
}

fn slider_moves(position: &Position, info: &mut MoveGenInfo) {
    for origin in position.get_diagonal_sliders_bitboard(info.side) {
        push_piece_moves(info, origin, Bitboard::bishop_attacks(origin, info.occupancy));
    }
    for origin in position.get_cardinal_sliders_bitboard(info.side) {
        push_piece_moves(info, origin, Bitboard::rook_attacks(origin, info.occupancy));
    }
}

fn push_piece_moves(info: &mut MoveGenInfo, origin: Square, attacks: Bitboard) {
    for target in attacks & info.targets {
        if info.opponents.is_set(target) {
            info.move_list.push(Move::new_capture(origin, target))
        } else {
            info.move_list.push(Move::new_quiet(origin, target))
        }
    }
}

fn castling(position: &Position, info: &mut MoveGenInfo) {
    let rights = position.castling_rights();
    let (king_side_right, queen_side_right) = rights.get(info.side);
    if !king_side_right && !queen_side_right {
        return;
    }

    let attacked = attacks::attacked_squares(position, info.side.opposite());
    for castle in CastleSide::BOTH {
        if !rights.has(info.side, castle) {
            continue;
        }
        let path = special::castling_path(info.side, castle);
        if (info.occupancy & path.between).is_empty() && (attacked & path.king_path).is_empty() {
            info.move_list.push(Move::new_castle(info.side, castle))
        }
    }
}
