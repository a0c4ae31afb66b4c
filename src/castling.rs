use crate::error::ParseError;
use crate::piece::Color;
use crate::piece::Color::{Black, White};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

impl CastleSide {
    pub const BOTH: [CastleSide; 2] = [CastleSide::KingSide, CastleSide::QueenSide];
}

/// The four castling rights, packed as `KQkq` from the most significant bit.
/// Rights are only ever cleared during a game.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights(0b1111);
    pub const NONE: CastlingRights = CastlingRights(0);

    pub fn new() -> CastlingRights {
        Self::ALL
    }

    fn mask(side: Color, castle: CastleSide) -> u8 {
        match (side, castle) {
            (White, CastleSide::KingSide) => 0b1000,
            (White, CastleSide::QueenSide) => 0b0100,
            (Black, CastleSide::KingSide) => 0b0010,
            (Black, CastleSide::QueenSide) => 0b0001,
        }
    }

    /// Returns the castling rights of a given color, as (kingside, queenside)
    pub fn get(&self, side: Color) -> (bool, bool) {
        (self.has(side, CastleSide::KingSide), self.has(side, CastleSide::QueenSide))
    }
    pub fn has(&self, side: Color, castle: CastleSide) -> bool {
        self.0 & Self::mask(side, castle) != 0
    }
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Marks the given side as unable to castle
    pub fn uncastle(&mut self, side: Color) {
        self.revoke(side, CastleSide::KingSide);
        self.revoke(side, CastleSide::QueenSide);
    }
    /// Marks the given side as unable to castle on one wing
    pub fn revoke(&mut self, side: Color, castle: CastleSide) {
        self.0 &= !Self::mask(side, castle)
    }

    pub(crate) fn grant(&mut self, side: Color, castle: CastleSide) {
        self.0 |= Self::mask(side, castle)
    }

    /// Index of each right that is set, used for hashing
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        (0..4).filter(move |i| self.0 & (0b1000 >> i) != 0)
    }
}

impl FromStr for CastlingRights {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut res = CastlingRights::NONE;
        if s == "-" {
            return Ok(res);
        }
        if s.is_empty() {
            return Err(ParseError::Castling(s.to_string()));
        }
        for c in s.chars() {
            let (side, castle) = match c {
                'K' => (White, CastleSide::KingSide),
                'Q' => (White, CastleSide::QueenSide),
                'k' => (Black, CastleSide::KingSide),
                'q' => (Black, CastleSide::QueenSide),
                _ => return Err(ParseError::Castling(s.to_string())),
            };
            if res.has(side, castle) {
                return Err(ParseError::Castling(s.to_string()));
            }
            res.grant(side, castle);
        }
        Ok(res)
    }
}

impl Display for CastlingRights {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "-");
        }
        let (wking, wqueen) = self.get(White);
        let (bking, bqueen) = self.get(Black);
        write!(
            f,
            "{}{}{}{}",
            if wking { "K" } else { "" },
            if wqueen { "Q" } else { "" },
            if bking { "k" } else { "" },
            if bqueen { "q" } else { "" }
        )
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self::new()
    }
}
