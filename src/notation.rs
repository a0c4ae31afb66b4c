//! Move notation: UCI coordinates (`e2e4`, `e7e8q`) and standard algebraic
//! notation (`Nbd7`, `exd6`, `O-O`, `e8=Q+`). Strings are always resolved
//! against the legal moves of a position, never trusted as-is.

use crate::error::{IllegalMoveError, ParseError, Result};
use crate::piece::PieceType;
use crate::position::Position;
use crate::r#move::Move;
use crate::square::Square;
use regex::{Captures, Regex};
use std::sync::OnceLock;

static UCI_REGEX: OnceLock<Regex> = OnceLock::new();
static SAN_REGEX: OnceLock<Regex> = OnceLock::new();

fn uci_regex() -> &'static Regex {
    UCI_REGEX.get_or_init(|| Regex::new(r"^([a-h][1-8])([a-h][1-8])([nbrq])?$").unwrap())
}

fn san_regex() -> &'static Regex {
    SAN_REGEX.get_or_init(|| Regex::new(r"^([NBRQK])?([a-h])?([1-8])?(x)?([a-h][1-8])(?:=?([NBRQ]))?$").unwrap())
}

/// Resolves a move given either in UCI or in SAN
pub fn parse_move(position: &Position, s: &str) -> Result<Move> {
    let s = s.trim();
    match uci_regex().captures(s) {
        Some(captures) => resolve_uci(position, &captures, s),
        None => parse_san(position, s),
    }
}

/// Resolves a UCI coordinate move
pub fn parse_uci(position: &Position, s: &str) -> Result<Move> {
    let captures = uci_regex()
        .captures(s)
        .ok_or_else(|| ParseError::MoveFormat(s.to_string()))?;
    resolve_uci(position, &captures, s)
}

fn resolve_uci(position: &Position, captures: &Captures, s: &str) -> Result<Move> {
    let origin: Square = captures[1].parse()?;
    let target: Square = captures[2].parse()?;
    let promotion = match captures.get(3) {
        Some(m) => Some(piece_from_letter(m.as_str())?),
        None => None,
    };

    let candidates: Vec<Move> = position
        .legal_moves()
        .into_iter()
        .filter(|m| m.origin() == origin && m.target() == target)
        .collect();
    if let Some(mv) = candidates.iter().find(|m| m.promotion() == promotion) {
        return Ok(*mv);
    }
    if promotion.is_none() && !candidates.is_empty() {
        return Err(IllegalMoveError::MissingPromotion(Move::new_quiet(origin, target)).into());
    }
    Err(IllegalMoveError::NotLegal(s.to_string()).into())
}

/// Resolves a SAN move. Castling may be written with zeros, check and
/// annotation suffixes are ignored, and the `=` of promotions is optional.
pub fn parse_san(position: &Position, s: &str) -> Result<Move> {
    let stripped = s.trim().trim_end_matches(|c| matches!(c, '+' | '#' | '!' | '?'));
    let legal = position.legal_moves();

    let castle = match stripped {
        "O-O" | "0-0" => Some(true),
        "O-O-O" | "0-0-0" => Some(false),
        _ => None,
    };
    if let Some(kingside) = castle {
        return legal
            .iter()
            .find(|m| {
                if kingside {
                    m.is_castle_kingside()
                } else {
                    m.is_castle_queenside()
                }
            })
            .copied()
            .ok_or_else(|| IllegalMoveError::NotLegal(s.to_string()).into());
    }

    let captures = san_regex()
        .captures(stripped)
        .ok_or_else(|| ParseError::MoveFormat(s.to_string()))?;
    let piece_type = match captures.get(1) {
        Some(m) => piece_from_letter(m.as_str())?,
        None => PieceType::Pawn,
    };
    let from_file = captures.get(2).map(|m| m.as_str().as_bytes()[0] - b'a');
    let from_rank = captures.get(3).map(|m| m.as_str().as_bytes()[0] - b'1');
    let is_capture = captures.get(4).is_some();
    let target: Square = captures[5].parse()?;
    let promotion = match captures.get(6) {
        Some(m) => Some(piece_from_letter(m.as_str())?),
        None => None,
    };

    let matches_squares = |m: &&Move| {
        m.target() == target
            && position.piece_type_on(m.origin()) == Some(piece_type)
            && from_file.map_or(true, |f| m.origin().file() == f as usize)
            && from_rank.map_or(true, |r| m.origin().rank() == r as usize)
            && (!is_capture || m.is_capture())
            // castling is only ever written O-O or O-O-O
            && !(m.is_castle_kingside() || m.is_castle_queenside())
    };
    let candidates: Vec<Move> = legal
        .iter()
        .filter(matches_squares)
        .filter(|m| m.promotion() == promotion)
        .copied()
        .collect();

    match candidates.len() {
        1 => Ok(candidates[0]),
        0 => {
            let promoting = legal.iter().filter(matches_squares).find(|m| m.promotion().is_some());
            match (promotion, promoting) {
                (None, Some(mv)) => {
                    Err(IllegalMoveError::MissingPromotion(Move::new_quiet(mv.origin(), mv.target())).into())
                }
                _ => Err(IllegalMoveError::NotLegal(s.to_string()).into()),
            }
        }
        _ => Err(ParseError::AmbiguousMove(s.to_string()).into()),
    }
}

fn piece_from_letter(s: &str) -> Result<PieceType> {
    s.chars()
        .next()
        .and_then(PieceType::from_char)
        .ok_or_else(|| ParseError::MoveFormat(s.to_string()).into())
}

/// Writes a legal move in SAN, with the minimal disambiguation and a check
/// or mate suffix
pub fn to_san(position: &Position, mv: Move) -> Result<String> {
    let legal = position.legal_moves();
    if !legal.contains(&mv) {
        return Err(IllegalMoveError::NotLegal(mv.to_string()).into());
    }
    let piece_type = position
        .piece_type_on(mv.origin())
        .ok_or(IllegalMoveError::EmptyOrigin(mv.origin()))?;

    let mut san = String::new();
    if mv.is_castle_kingside() {
        san.push_str("O-O");
    } else if mv.is_castle_queenside() {
        san.push_str("O-O-O");
    } else if piece_type == PieceType::Pawn {
        if mv.is_capture() {
            san.push(mv.origin().file_char());
            san.push('x');
        }
        san.push_str(&mv.target().to_string());
        if let Some(promotion) = mv.promotion() {
            san.push('=');
            san.push(promotion.to_char().to_ascii_uppercase());
        }
    } else {
        san.push(piece_type.to_char().to_ascii_uppercase());
        let rivals: Vec<Square> = legal
            .iter()
            .filter(|m| {
                m.target() == mv.target()
                    && m.origin() != mv.origin()
                    && position.piece_type_on(m.origin()) == Some(piece_type)
            })
            .map(|m| m.origin())
            .collect();
        if !rivals.is_empty() {
            if rivals.iter().all(|sq| sq.file() != mv.origin().file()) {
                san.push(mv.origin().file_char());
            } else if rivals.iter().all(|sq| sq.rank() != mv.origin().rank()) {
                san.push(mv.origin().rank_char());
            } else {
                san.push_str(&mv.origin().to_string());
            }
        }
        if mv.is_capture() {
            san.push('x');
        }
        san.push_str(&mv.target().to_string());
    }

    let next = position.apply_unvalidated(mv)?;
    if next.in_check() {
        san.push(if next.legal_moves().is_empty() { '#' } else { '+' });
    }
    Ok(san)
}
