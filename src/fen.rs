//! FEN import and export.

use crate::attacks;
use crate::castling::{CastleSide, CastlingRights};
use crate::error::{ColorName, InvalidPositionError, ParseError, Result};
use crate::piece::{Color, Piece, PieceType};
use crate::position::Position;
use crate::special;
use crate::square::Square;
use std::str::FromStr;

impl Position {
    /// Creates a position from its FEN representation, rejecting malformed
    /// strings and positions no game can reach
    pub fn from_fen(fen: &str) -> Result<Position> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(ParseError::FieldCount(fields.len()).into());
        }

        let mut position = Position::empty();
        parse_placement(&mut position, fields[0])?;
        position.side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(ParseError::SideToMove(other.to_string()).into()),
        };
        position.castling_rights = fields[2].parse()?;
        position.ep_target = match fields[3] {
            "-" => None,
            s => Some(s.parse().map_err(|_| ParseError::EnPassant(s.to_string()))?),
        };
        position.halfmove_clock = fields[4]
            .parse()
            .map_err(|_| ParseError::Counter(fields[4].to_string()))?;
        position.fullmove_number = match fields[5].parse::<u32>() {
            Ok(n) if n >= 1 => n,
            _ => return Err(ParseError::Counter(fields[5].to_string()).into()),
        };

        validate(&position)?;
        position.hash = position.cold_hash();
        Ok(position)
    }

    pub fn to_fen(&self) -> String {
        let mut placement = String::new();
        for (i, row) in self.grid().iter().enumerate() {
            if i != 0 {
                placement.push('/');
            }
            let mut empty_counter = 0;
            for c in row {
                if *c == '.' {
                    empty_counter += 1;
                    continue;
                }
                if empty_counter != 0 {
                    placement.push_str(&empty_counter.to_string());
                    empty_counter = 0;
                }
                placement.push(*c);
            }
            if empty_counter != 0 {
                placement.push_str(&empty_counter.to_string());
            }
        }

        let ep = match self.ep_target {
            Some(sq) => sq.to_string(),
            None => String::from("-"),
        };
        format!(
            "{} {} {} {} {} {}",
            placement, self.side_to_move, self.castling_rights, ep, self.halfmove_clock, self.fullmove_number
        )
    }
}

impl FromStr for Position {
    type Err = crate::error::ChessError;

    fn from_str(s: &str) -> Result<Self> {
        Position::from_fen(s)
    }
}

fn parse_placement(position: &mut Position, placement: &str) -> Result<()> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(ParseError::RankCount(ranks.len()).into());
    }

    for (i, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - i;
        let mut file = 0usize;
        for c in rank_str.chars() {
            if let Some(skip) = c.to_digit(10) {
                if skip == 0 || skip > 8 {
                    return Err(ParseError::InvalidPiece(c).into());
                }
                file += skip as usize;
                continue;
            }
            let piece = Piece::from_char(c).ok_or(ParseError::InvalidPiece(c))?;
            match Square::new(rank, file) {
                Some(sq) => position.add_piece(piece, sq),
                None => return Err(ParseError::RankLength { rank: rank + 1, squares: file + 1 }.into()),
            }
            file += 1;
        }
        if file != 8 {
            return Err(ParseError::RankLength { rank: rank + 1, squares: file }.into());
        }
    }
    Ok(())
}

/// Checks the invariants a game always upholds: one king per side, no pawn
/// on a back rank, castling rights backed by unmoved-looking kings and rooks,
/// a plausible en passant target, and the side not to move out of check
fn validate(position: &Position) -> Result<()> {
    for color in [Color::White, Color::Black] {
        let count = position.get_piece_bitboard(PieceType::King, color).pop_count();
        if count != 1 {
            return Err(InvalidPositionError::KingCount { color: ColorName(color), count }.into());
        }
    }

    for sq in position.get_piecetype_bitboard(PieceType::Pawn) {
        if sq.rank() == 0 || sq.rank() == 7 {
            return Err(InvalidPositionError::PawnOnBackRank(sq).into());
        }
    }

    validate_castling(position.castling_rights, position)?;
    if let Some(ep) = position.ep_target {
        validate_en_passant(ep, position)?;
    }

    let waiting = position.side_to_move.opposite();
    if attacks::is_in_check(position, waiting) {
        return Err(InvalidPositionError::OpponentInCheck(ColorName(waiting)).into());
    }
    Ok(())
}

fn validate_castling(rights: CastlingRights, position: &Position) -> Result<()> {
    for color in [Color::White, Color::Black] {
        for side in CastleSide::BOTH {
            if !rights.has(color, side) {
                continue;
            }
            let path = special::castling_path(color, side);
            let king_home = position.piece_on(path.king_from) == Some(Piece::new(PieceType::King, color));
            let rook_home = position.piece_on(path.rook_from) == Some(Piece::new(PieceType::Rook, color));
            if !king_home || !rook_home {
                let letter = match side {
                    CastleSide::KingSide => 'k',
                    CastleSide::QueenSide => 'q',
                };
                let letter = if color == Color::White { letter.to_ascii_uppercase() } else { letter };
                return Err(ParseError::InconsistentCastling(letter).into());
            }
        }
    }
    Ok(())
}

/// The target must sit on the third rank of the side that just moved, empty,
/// with that side's pawn right in front of it and its starting square empty
fn validate_en_passant(ep: Square, position: &Position) -> Result<()> {
    let pusher = position.side_to_move.opposite();
    let expected_rank = match pusher {
        Color::White => 2,
        Color::Black => 5,
    };
    let forward = pusher.forward();
    let pawn_square = ep.offset(forward, 0);
    let start_square = ep.offset(-forward, 0);
    let consistent = ep.rank() == expected_rank
        && position.piece_on(ep).is_none()
        && pawn_square.and_then(|sq| position.piece_on(sq)) == Some(Piece::new(PieceType::Pawn, pusher))
        && start_square.map_or(false, |sq| position.piece_on(sq).is_none());
    if consistent {
        Ok(())
    } else {
        Err(ParseError::InconsistentEnPassant(ep).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChessError;
    use crate::position::START_FEN;

    #[test]
    fn round_trips_reference_positions() {
        for fen in [
            START_FEN,
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq c6 0 2",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 13 42",
        ] {
            assert_eq!(Position::from_fen(fen).unwrap().to_fen(), fen);
        }
        assert_eq!(Position::from_fen(START_FEN).unwrap(), Position::start());
    }

    #[test]
    fn malformed_fields() {
        let parse_err = |fen: &str| match Position::from_fen(fen) {
            Err(ChessError::Parse(e)) => e,
            other => panic!("{} gave {:?}", fen, other),
        };
        assert_eq!(parse_err("8/8/8/8/8/8/8/8 w - -"), ParseError::FieldCount(4));
        assert_eq!(
            parse_err("rnbqkbnr/ppppxppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            ParseError::InvalidPiece('x')
        );
        assert!(matches!(
            parse_err("rnbqkbnr/ppppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            ParseError::RankLength { rank: 7, .. }
        ));
        assert!(matches!(
            parse_err("rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            ParseError::RankLength { rank: 7, squares: 7 }
        ));
        assert_eq!(parse_err("8/8/8/8/8/8/8 w - - 0 1"), ParseError::RankCount(7));
        assert_eq!(
            parse_err("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1"),
            ParseError::SideToMove(String::from("x"))
        );
        assert_eq!(
            parse_err("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq z9 0 1"),
            ParseError::EnPassant(String::from("z9"))
        );
        assert_eq!(
            parse_err("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - x 1"),
            ParseError::Counter(String::from("x"))
        );
        assert_eq!(
            parse_err("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 0"),
            ParseError::Counter(String::from("0"))
        );
    }

    #[test]
    fn inconsistent_state() {
        let parse_err = |fen: &str| match Position::from_fen(fen) {
            Err(ChessError::Parse(e)) => e,
            other => panic!("{} gave {:?}", fen, other),
        };
        assert_eq!(
            parse_err("4k3/8/8/8/8/8/8/4K3 w K - 0 1"),
            ParseError::InconsistentCastling('K')
        );
        assert_eq!(
            parse_err("r3k3/8/8/8/8/8/8/4K3 w kq - 0 1"),
            ParseError::InconsistentCastling('k')
        );
        // en passant square on the wrong rank for the side to move
        assert!(matches!(
            parse_err("rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR b KQkq c6 0 2"),
            ParseError::InconsistentEnPassant(_)
        ));
        // no pawn in front of the target
        assert!(matches!(
            parse_err("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e6 0 1"),
            ParseError::InconsistentEnPassant(_)
        ));
    }

    #[test]
    fn impossible_positions() {
        let invalid = |fen: &str| match Position::from_fen(fen) {
            Err(ChessError::InvalidPosition(e)) => e,
            other => panic!("{} gave {:?}", fen, other),
        };
        assert!(matches!(
            invalid("8/8/8/8/8/8/8/4K3 w - - 0 1"),
            InvalidPositionError::KingCount { count: 0, .. }
        ));
        assert!(matches!(
            invalid("4k3/8/8/8/8/8/8/3KK3 w - - 0 1"),
            InvalidPositionError::KingCount { count: 2, .. }
        ));
        assert!(matches!(
            invalid("P3k3/8/8/8/8/8/8/4K3 w - - 0 1"),
            InvalidPositionError::PawnOnBackRank(_)
        ));
        assert!(matches!(
            invalid("4k3/8/8/8/8/8/8/4K2r b - - 0 1"),
            InvalidPositionError::OpponentInCheck(_)
        ));
    }
}
