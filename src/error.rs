//! Errors returned by every fallible operation of the crate. Nothing is ever
//! corrected silently: malformed input is rejected with one of these.

use crate::piece::Color;
use crate::r#move::Move;
use crate::square::Square;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChessError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("illegal move: {0}")]
    IllegalMove(#[from] IllegalMoveError),
    #[error("invalid position: {0}")]
    InvalidPosition(#[from] InvalidPositionError),
}

/// Malformed FEN or move strings
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected 6 FEN fields, found {0}")]
    FieldCount(usize),
    #[error("invalid piece letter '{0}'")]
    InvalidPiece(char),
    #[error("rank {rank} describes {squares} squares")]
    RankLength { rank: usize, squares: usize },
    #[error("expected 8 ranks, found {0}")]
    RankCount(usize),
    #[error("invalid side to move '{0}'")]
    SideToMove(String),
    #[error("invalid castling field '{0}'")]
    Castling(String),
    #[error("castling right '{0}' without king and rook on their original squares")]
    InconsistentCastling(char),
    #[error("invalid en passant field '{0}'")]
    EnPassant(String),
    #[error("en passant square {0} does not match the side to move")]
    InconsistentEnPassant(Square),
    #[error("invalid move counter '{0}'")]
    Counter(String),
    #[error("invalid square '{0}'")]
    Square(String),
    #[error("unrecognized move '{0}'")]
    MoveFormat(String),
    #[error("ambiguous move '{0}'")]
    AmbiguousMove(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IllegalMoveError {
    #[error("{0} is not legal in this position")]
    NotLegal(String),
    #[error("{0} reaches the last rank without a promotion piece")]
    MissingPromotion(Move),
    #[error("no piece of the side to move on {0}")]
    EmptyOrigin(Square),
}

/// Well-formed FEN describing a position that cannot occur in a game
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidPositionError {
    #[error("{color} has {count} kings")]
    KingCount { color: ColorName, count: u32 },
    #[error("pawn on back rank square {0}")]
    PawnOnBackRank(Square),
    #[error("the side not to move ({0}) is in check")]
    OpponentInCheck(ColorName),
}

/// Human readable color, for error messages
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ColorName(pub Color);

impl std::fmt::Display for ColorName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}
