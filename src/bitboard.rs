use crate::piece::Color;
use crate::square::Square;
use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

// Build script to calculate lookup tables at compile time
include!(concat!(env!("OUT_DIR"), "/lookup.rs"));

/// A set of squares, one bit per square
#[repr(transparent)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Bitboard(pub u64);

impl Bitboard {
    #[inline]
    pub fn from_square(square: Square) -> Bitboard {
        Bitboard(1u64 << square.index())
    }
    #[inline]
    pub fn from_squares(squares: &[Square]) -> Bitboard {
        squares.iter().fold(Bitboard::EMPTY, |bb, sq| bb | Bitboard::from_square(*sq))
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
    #[inline(always)]
    pub fn is_set(&self, sq: Square) -> bool {
        self.0 & (1 << sq.index()) != 0
    }
    #[inline(always)]
    pub fn set(&mut self, sq: Square) {
        self.0 |= 1 << sq.index()
    }
    #[inline(always)]
    pub fn unset(&mut self, sq: Square) {
        self.0 &= !(1 << sq.index())
    }

    #[inline(always)]
    pub fn ls1b(&self) -> Option<Square> {
        if self.is_empty() {
            return None;
        }
        Some(Square::from_index_unchecked(self.0.trailing_zeros() as usize))
    }
    #[inline(always)]
    pub fn ms1b(&self) -> Option<Square> {
        if self.is_empty() {
            return None;
        }
        Some(Square::from_index_unchecked(63 - self.0.leading_zeros() as usize))
    }

    #[inline(always)]
    pub fn pop_ls1b(&mut self) -> Option<Square> {
        let ls1b = self.ls1b();
        self.0 &= self.0.wrapping_sub(1);
        ls1b
    }

    #[inline(always)]
    pub fn pop_count(&self) -> u32 {
        self.0.count_ones()
    }

    /*
    SHIFTS
     */
    #[inline]
    pub fn north_west_shift(bb: &Bitboard) -> Bitboard {
        Bitboard(bb.0 << 7) & !Self::FILES[7]
    }
    #[inline]
    pub fn north_east_shift(bb: &Bitboard) -> Bitboard {
        Bitboard(bb.0 << 9) & !Self::FILES[0]
    }
    #[inline]
    pub fn south_west_shift(bb: &Bitboard) -> Bitboard {
        Bitboard(bb.0 >> 9) & !Self::FILES[7]
    }
    #[inline]
    pub fn south_east_shift(bb: &Bitboard) -> Bitboard {
        Bitboard(bb.0 >> 7) & !Self::FILES[0]
    }

    /*
    GENERALY USEFUL BITBOARDS
    */
    pub const EMPTY: Bitboard = Bitboard(0);
    pub const UNIVERSE: Bitboard = Bitboard(!0);
    pub const FILES: [Bitboard; 8] = [
        Bitboard(0x0101010101010101),
        Bitboard(0x0202020202020202),
        Bitboard(0x0404040404040404),
        Bitboard(0x0808080808080808),
        Bitboard(0x1010101010101010),
        Bitboard(0x2020202020202020),
        Bitboard(0x4040404040404040),
        Bitboard(0x8080808080808080),
    ];
    pub const RANKS: [Bitboard; 8] = [
        Bitboard(0x00000000000000ff),
        Bitboard(0x000000000000ff00),
        Bitboard(0x0000000000ff0000),
        Bitboard(0x00000000ff000000),
        Bitboard(0x000000ff00000000),
        Bitboard(0x0000ff0000000000),
        Bitboard(0x00ff000000000000),
        Bitboard(0xff00000000000000),
    ];
    pub const LIGHT_SQUARES: Bitboard = Bitboard(0x55aa55aa55aa55aa);

    /// Squares attacked by a set of pawns of the given color
    #[inline]
    pub fn pawn_attacks(pawns_bb: Bitboard, color: Color) -> Bitboard {
        match color {
            Color::White => Self::north_west_shift(&pawns_bb) | Self::north_east_shift(&pawns_bb),
            Color::Black => Self::south_west_shift(&pawns_bb) | Self::south_east_shift(&pawns_bb),
        }
    }

    #[inline]
    pub fn knight_attacks(origin: Square) -> Bitboard {
        Self::KNIGHT_ATTACKS[origin.index()]
    }
    #[inline]
    pub fn king_attacks(origin: Square) -> Bitboard {
        Self::KING_ATTACKS[origin.index()]
    }

    #[inline]
    pub fn bishop_attacks(origin: Square, occupancy: Bitboard) -> Bitboard {
        (4..8).fold(Self::EMPTY, |attacks, dir| attacks | Self::ray_attacks(dir, origin, occupancy))
    }
    #[inline]
    pub fn rook_attacks(origin: Square, occupancy: Bitboard) -> Bitboard {
        (0..4).fold(Self::EMPTY, |attacks, dir| attacks | Self::ray_attacks(dir, origin, occupancy))
    }

    /// Walks a ray from the origin, stopping at (and including) the first
    /// occupied square. Even directions go towards higher squares.
    #[inline]
    fn ray_attacks(direction: usize, origin: Square, occupancy: Bitboard) -> Bitboard {
        let ray = Self::RAYS[direction][origin.index()];
        let blockers = ray & occupancy;
        let first_blocker = if direction % 2 == 0 { blockers.ls1b() } else { blockers.ms1b() };
        match first_blocker {
            Some(sq) => ray & !Self::RAYS[direction][sq.index()],
            None => ray,
        }
    }
}

impl fmt::Display for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for rank in (0..8).rev() {
            for file in 0..8 {
                let set = Square::new(rank, file).map_or(false, |sq| self.is_set(sq));
                write!(f, "{}", if set { "x " } else { ". " })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// A simple Iterator that resets the LS1B each time
impl Iterator for Bitboard {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        self.pop_ls1b()
    }
}

/*
BITWISE OPERATIONS IMPLEMENTATIONS
 */
impl BitAnd for Bitboard {
    type Output = Bitboard;
    fn bitand(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 & rhs.0)
    }
}
impl BitAndAssign for Bitboard {
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0
    }
}
impl BitOr for Bitboard {
    type Output = Bitboard;
    fn bitor(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 | rhs.0)
    }
}
impl BitOrAssign for Bitboard {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0
    }
}
impl BitXor for Bitboard {
    type Output = Bitboard;
    fn bitxor(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 ^ rhs.0)
    }
}
impl BitXorAssign for Bitboard {
    fn bitxor_assign(&mut self, rhs: Bitboard) {
        self.0 ^= rhs.0
    }
}
impl Not for Bitboard {
    type Output = Bitboard;
    fn not(self) -> Self::Output {
        Bitboard(!self.0)
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
    fn lookup_tables() {
        assert_eq!(Bitboard::knight_attacks(Square::A1).pop_count(), 2);
        assert_eq!(Bitboard::knight_attacks(sq("d4")).pop_count(), 8);
        assert_eq!(Bitboard::king_attacks(Square::H8).pop_count(), 3);
        assert_eq!(Bitboard::king_attacks(sq("e4")).pop_count(), 8);
    }

    #[test]
    fn rays_stop_on_blockers_inclusive() {
        let occupancy = Bitboard::from_squares(&[sq("d6"), sq("f4")]);
        let attacks = Bitboard::rook_attacks(sq("d4"), occupancy);
        assert!(attacks.is_set(sq("d5")));
        assert!(attacks.is_set(sq("d6")));
        assert!(!attacks.is_set(sq("d7")));
        assert!(attacks.is_set(sq("f4")));
        assert!(!attacks.is_set(sq("g4")));
        assert!(attacks.is_set(sq("a4")));
        assert!(attacks.is_set(sq("d1")));
        assert_eq!(attacks.pop_count(), 2 + 2 + 3 + 3);
    }

    #[test]
    fn bishop_rays_do_not_wrap() {
        let attacks = Bitboard::bishop_attacks(Square::H1, Bitboard::EMPTY);
        assert_eq!(attacks.pop_count(), 7);
        assert!(attacks.is_set(Square::A8));
        let blocked = Bitboard::bishop_attacks(Square::H1, Bitboard::from_square(sq("e4")));
        assert_eq!(blocked, Bitboard::from_squares(&[sq("g2"), sq("f3"), sq("e4")]));
    }

    #[test]
    fn pawn_attacks_are_diagonal_and_forward() {
        let white = Bitboard::pawn_attacks(Bitboard::from_square(sq("a2")), Color::White);
        assert_eq!(white, Bitboard::from_square(sq("b3")));
        let black = Bitboard::pawn_attacks(Bitboard::from_square(sq("e5")), Color::Black);
        assert_eq!(black, Bitboard::from_squares(&[sq("d4"), sq("f4")]));
    }

    #[test]
    fn light_squares_mask() {
        for sq in Bitboard::UNIVERSE {
            assert_eq!(Bitboard::LIGHT_SQUARES.is_set(sq), sq.is_light());
        }
    }
}
