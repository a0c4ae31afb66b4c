use crate::castling::CastleSide;
use crate::piece::{Color, PieceType};
use crate::square::Square;
use std::fmt::{Display, Formatter};

/// Moves are stored as a 2bytes word, with the following alignment:
/// - 6*2 bits for origin and destination square
/// - 4 bits used for various flags
///
/// Castling moves are encoded as the king's displacement (e1g1, e8c8, ...).
#[repr(transparent)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move(u16);

const DOUBLE_PUSH: u16 = 0b0001;
const KINGSIDE_CASTLE: u16 = 0b0010;
const QUEENSIDE_CASTLE: u16 = 0b0011;
const CAPTURE: u16 = 0b0100;
const EN_PASSANT: u16 = 0b0101;
const PROMOTION: u16 = 0b1000;

impl Move {
    fn new(origin: Square, target: Square, flags: u16) -> Move {
        Move(((origin.index() as u16) << 10) | ((target.index() as u16) << 4) | flags)
    }
    pub fn new_quiet(origin: Square, target: Square) -> Move {
        Self::new(origin, target, 0)
    }
    pub fn new_double_push(origin: Square, target: Square) -> Move {
        Self::new(origin, target, DOUBLE_PUSH)
    }
    pub fn new_capture(origin: Square, target: Square) -> Move {
        Self::new(origin, target, CAPTURE)
    }
    pub fn new_en_passant(origin: Square, target: Square) -> Move {
        Self::new(origin, target, EN_PASSANT)
    }
    pub fn new_castle(color: Color, side: CastleSide) -> Move {
        let (origin, target, flags) = match (color, side) {
            (Color::White, CastleSide::KingSide) => (Square::E1, Square::G1, KINGSIDE_CASTLE),
            (Color::White, CastleSide::QueenSide) => (Square::E1, Square::C1, QUEENSIDE_CASTLE),
            (Color::Black, CastleSide::KingSide) => (Square::E8, Square::G8, KINGSIDE_CASTLE),
            (Color::Black, CastleSide::QueenSide) => (Square::E8, Square::C8, QUEENSIDE_CASTLE),
        };
        Self::new(origin, target, flags)
    }

    /// Only pieces a pawn may turn into are accepted, anything else yields `None`
    pub fn new_promotion(origin: Square, target: Square, promote_to: PieceType, is_capture: bool) -> Option<Move> {
        let piece_bits = match promote_to {
            PieceType::Knight => 0b00,
            PieceType::Bishop => 0b01,
            PieceType::Rook => 0b10,
            PieceType::Queen => 0b11,
            PieceType::Pawn | PieceType::King => return None,
        };
        let capture_bit = if is_capture { CAPTURE } else { 0 };
        Some(Self::new(origin, target, PROMOTION | capture_bit | piece_bits))
    }

    pub fn origin(&self) -> Square {
        Square::from_index_unchecked((self.0 >> 10) as usize)
    }
    pub fn target(&self) -> Square {
        Square::from_index_unchecked(((self.0 >> 4) & 0b111111) as usize)
    }
    fn flag_bits(&self) -> u16 {
        self.0 & 0b1111
    }

    pub fn flags(&self) -> MoveFlags {
        match self.flag_bits() {
            DOUBLE_PUSH => MoveFlags::DoublePush,
            KINGSIDE_CASTLE => MoveFlags::Castle(CastleSide::KingSide),
            QUEENSIDE_CASTLE => MoveFlags::Castle(CastleSide::QueenSide),
            CAPTURE => MoveFlags::Capture,
            EN_PASSANT => MoveFlags::EnPassant,
            bits if bits & PROMOTION != 0 => {
                let piece = match bits & 0b11 {
                    0b00 => PieceType::Knight,
                    0b01 => PieceType::Bishop,
                    0b10 => PieceType::Rook,
                    _ => PieceType::Queen,
                };
                if bits & CAPTURE != 0 {
                    MoveFlags::PromotionCapture(piece)
                } else {
                    MoveFlags::Promotion(piece)
                }
            }
            _ => MoveFlags::Quiet,
        }
    }

    /// En passant captures count as captures
    pub fn is_capture(&self) -> bool {
        self.flag_bits() & CAPTURE != 0
    }
    pub fn is_en_passant(&self) -> bool {
        self.flag_bits() == EN_PASSANT
    }
    pub fn is_double_push(&self) -> bool {
        self.flag_bits() == DOUBLE_PUSH
    }
    pub fn is_castle_kingside(&self) -> bool {
        self.flag_bits() == KINGSIDE_CASTLE
    }
    pub fn is_castle_queenside(&self) -> bool {
        self.flag_bits() == QUEENSIDE_CASTLE
    }
    pub fn castle_side(&self) -> Option<CastleSide> {
        match self.flags() {
            MoveFlags::Castle(side) => Some(side),
            _ => None,
        }
    }

    pub fn promotion(&self) -> Option<PieceType> {
        match self.flags() {
            MoveFlags::Promotion(p) | MoveFlags::PromotionCapture(p) => Some(p),
            _ => None,
        }
    }
}

/// Coordinate (UCI) notation, e.g. `e2e4`, `e7e8q`
impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.promotion() {
            Some(p) => write!(f, "{}{}{}", self.origin(), self.target(), p),
            None => write!(f, "{}{}", self.origin(), self.target()),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MoveFlags {
    Quiet,
    DoublePush,
    Castle(CastleSide),
    Capture,
    EnPassant,
    Promotion(PieceType),
    PromotionCapture(PieceType),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::square::parse_square;

    #[test]
    fn packing() {
        let e7 = parse_square("e7").unwrap();
        let d8 = parse_square("d8").unwrap();
        let mv = Move::new_promotion(e7, d8, PieceType::Rook, true).unwrap();
        assert_eq!(mv.origin(), e7);
        assert_eq!(mv.target(), d8);
        assert_eq!(mv.promotion(), Some(PieceType::Rook));
        assert!(mv.is_capture());
        assert!(!mv.is_en_passant());
        assert_eq!(mv.flags(), MoveFlags::PromotionCapture(PieceType::Rook));
        assert_eq!(mv.to_string(), "e7d8r");
    }

    #[test]
    fn promotion_to_king_is_refused() {
        assert_eq!(Move::new_promotion(Square::A1, Square::A8, PieceType::King, false), None);
        assert_eq!(Move::new_promotion(Square::A1, Square::A8, PieceType::Pawn, false), None);
    }

    #[test]
    fn castles() {
        let mv = Move::new_castle(Color::Black, CastleSide::QueenSide);
        assert!(mv.is_castle_queenside());
        assert!(!mv.is_castle_kingside());
        assert!(!mv.is_capture());
        assert_eq!(mv.to_string(), "e8c8");
        assert_eq!(mv.castle_side(), Some(CastleSide::QueenSide));
    }

    #[test]
    fn en_passant_is_a_capture() {
        let mv = Move::new_en_passant(parse_square("e5").unwrap(), parse_square("d6").unwrap());
        assert!(mv.is_capture());
        assert!(mv.is_en_passant());
        assert_eq!(mv.promotion(), None);
    }
}
