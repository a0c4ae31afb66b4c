use crate::error::ParseError;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A square of the board, indexed `rank * 8 + file` (a1 = 0, h8 = 63)
#[repr(transparent)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square(u8);

impl Square {
    /// Builds a square from its index, if it lies on the board
    /// ```
    /// use arbiter::square::Square;
    /// assert_eq!(Square::from_index(28), Some(Square::E4));
    /// assert_eq!(Square::from_index(64), None);
    /// ```
    pub const fn from_index(index: usize) -> Option<Square> {
        if index < 64 { Some(Square(index as u8)) } else { None }
    }

    /// Builds a square from 0-based rank and file coordinates
    /// ```
    /// use arbiter::square::Square;
    /// assert_eq!(Square::new(3, 4), Some(Square::E4));
    /// assert_eq!(Square::new(8, 0), None);
    /// ```
    pub const fn new(rank: usize, file: usize) -> Option<Square> {
        if rank < 8 && file < 8 { Some(Square((rank * 8 + file) as u8)) } else { None }
    }

    /// Only used for in-bounds indices coming from bitboards and lookup tables
    pub(crate) const fn from_index_unchecked(index: usize) -> Square {
        Square(index as u8)
    }

    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
    #[inline(always)]
    pub const fn rank(self) -> usize {
        self.0 as usize / 8
    }
    #[inline(always)]
    pub const fn file(self) -> usize {
        self.0 as usize % 8
    }

    /// Moves the square by the given rank and file deltas, returning `None` when
    /// falling off the board
    pub fn offset(self, rank_delta: i32, file_delta: i32) -> Option<Square> {
        let rank = self.rank() as i32 + rank_delta;
        let file = self.file() as i32 + file_delta;
        if (0..8).contains(&rank) && (0..8).contains(&file) {
            Square::new(rank as usize, file as usize)
        } else {
            None
        }
    }

    /// Whether the square is a light one (h1 is light)
    pub const fn is_light(self) -> bool {
        (self.rank() + self.file()) % 2 == 1
    }

    pub fn file_char(self) -> char {
        (b'a' + self.file() as u8) as char
    }
    pub fn rank_char(self) -> char {
        (b'1' + self.rank() as u8) as char
    }

    pub const A1: Square = Square(0);
    pub const B1: Square = Square(1);
    pub const C1: Square = Square(2);
    pub const D1: Square = Square(3);
    pub const E1: Square = Square(4);
    pub const F1: Square = Square(5);
    pub const G1: Square = Square(6);
    pub const H1: Square = Square(7);
    pub const E4: Square = Square(28);
    pub const A8: Square = Square(56);
    pub const B8: Square = Square(57);
    pub const C8: Square = Square(58);
    pub const D8: Square = Square(59);
    pub const E8: Square = Square(60);
    pub const F8: Square = Square(61);
    pub const G8: Square = Square(62);
    pub const H8: Square = Square(63);
}

/// Parses a square from a given string slice,
/// only caring that the first two characters form a valid square representation
/// ```
/// use arbiter::square::{parse_square, Square};
/// assert_eq!(parse_square("e4"), Some(Square::E4));
/// assert_eq!(parse_square("d2someotherstuff").map(|sq| sq.index()), Some(11));
/// assert_eq!(parse_square("randoma1stuff"), None);
/// assert_eq!(parse_square("k9"), None);
/// ```
pub fn parse_square(s: &str) -> Option<Square> {
    let mut chars_iter = s.chars();
    let file = match chars_iter.next() {
        Some(c @ 'a'..='h') => c as usize - 'a' as usize,
        _ => return None,
    };
    let rank = match chars_iter.next().and_then(|c| c.to_digit(10)) {
        Some(i) if (1..=8).contains(&i) => i as usize - 1,
        _ => return None,
    };
    Square::new(rank, file)
}

impl FromStr for Square {
    type Err = ParseError;

    /// Strict parsing: the string must be exactly a square name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match parse_square(s) {
            Some(sq) if s.len() == 2 => Ok(sq),
            _ => Err(ParseError::Square(s.to_string())),
        }
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates() {
        let sq = Square::new(6, 2).unwrap();
        assert_eq!(sq.to_string(), "c7");
        assert_eq!(sq.rank(), 6);
        assert_eq!(sq.file(), 2);
        assert_eq!(sq.offset(1, 1).map(|s| s.to_string()), Some(String::from("d8")));
        assert_eq!(sq.offset(2, 0), None);
        assert_eq!(Square::A1.offset(0, -1), None);
    }

    #[test]
    fn square_colors() {
        assert!(!Square::A1.is_light());
        assert!(Square::H1.is_light());
        assert!(!Square::H8.is_light());
        assert!(Square::D1.is_light());
    }

    #[test]
    fn strict_parsing() {
        assert_eq!("h8".parse::<Square>(), Ok(Square::H8));
        assert!("h8x".parse::<Square>().is_err());
        assert!("i1".parse::<Square>().is_err());
        assert!("a0".parse::<Square>().is_err());
    }
}
