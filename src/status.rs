//! Game state classification over a position and the hashes of the positions
//! that led to it.

use crate::bitboard::Bitboard;
use crate::config::RulesConfig;
use crate::legality;
use crate::piece::{Color, PieceType};
use crate::position::Position;
use crate::zob_hash::Hash;
use std::fmt::{Display, Formatter};

/// Plies without capture or pawn move after which the game is drawn
pub const FIFTY_MOVE_PLIES: u32 = 100;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GameState {
    Normal,
    Check,
    Checkmate,
    Stalemate,
    InsufficientMaterial,
    FiftyMoveDraw,
    ThreefoldRepetition,
}

impl GameState {
    pub fn is_draw(&self) -> bool {
        matches!(
            self,
            GameState::Stalemate
                | GameState::InsufficientMaterial
                | GameState::FiftyMoveDraw
                | GameState::ThreefoldRepetition
        )
    }

    /// Whether no further move is expected
    pub fn is_terminal(&self) -> bool {
        *self == GameState::Checkmate || self.is_draw()
    }
}

impl Display for GameState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            GameState::Normal => "normal",
            GameState::Check => "check",
            GameState::Checkmate => "checkmate",
            GameState::Stalemate => "stalemate",
            GameState::InsufficientMaterial => "draw by insufficient material",
            GameState::FiftyMoveDraw => "draw by the fifty-move rule",
            GameState::ThreefoldRepetition => "draw by threefold repetition",
        };
        write!(f, "{}", s)
    }
}

/// How a finished game ended
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Outcome {
    Decisive { winner: Color },
    Draw(GameState),
}

impl Outcome {
    /// The outcome a terminal state gives, `None` while the game goes on.
    /// `side_to_move` is the side facing the state, so the mated side.
    pub fn from_state(state: GameState, side_to_move: Color) -> Option<Outcome> {
        match state {
            GameState::Checkmate => Some(Outcome::Decisive {
                winner: side_to_move.opposite(),
            }),
            s if s.is_draw() => Some(Outcome::Draw(s)),
            _ => None,
        }
    }

    /// PGN result token
    pub fn result(&self) -> &'static str {
        match self {
            Outcome::Decisive { winner: Color::White } => "1-0",
            Outcome::Decisive { winner: Color::Black } => "0-1",
            Outcome::Draw(_) => "1/2-1/2",
        }
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Decisive { winner: Color::White } => write!(f, "{} (white wins)", self.result()),
            Outcome::Decisive { winner: Color::Black } => write!(f, "{} (black wins)", self.result()),
            Outcome::Draw(state) => write!(f, "{} ({})", self.result(), state),
        }
    }
}

/// Classifies a position with every draw rule enabled. See [`classify_with`].
pub fn classify(position: &Position, history: &[Hash]) -> GameState {
    classify_with(position, history, &RulesConfig::default())
}

/// Classifies a position.
///
/// `history` holds the hashes of the positions of the game in order, and may
/// or may not end with the current one. Checkmate and stalemate come first;
/// then, when draws are detected, insufficient material, threefold repetition
/// and the fifty-move rule, in that order; `Check` and `Normal` last.
pub fn classify_with(position: &Position, history: &[Hash], config: &RulesConfig) -> GameState {
    let in_check = position.in_check();
    if !legality::has_legal_move(position) {
        return if in_check {
            GameState::Checkmate
        } else {
            GameState::Stalemate
        };
    }

    if config.detect_draws {
        if is_insufficient_material(position) {
            return GameState::InsufficientMaterial;
        }
        if repetition_count(position, history) >= 3 {
            return GameState::ThreefoldRepetition;
        }
        if is_fifty_move_draw(position) {
            return GameState::FiftyMoveDraw;
        }
    }

    if in_check {
        GameState::Check
    } else {
        GameState::Normal
    }
}

/// Neither side can ever mate: bare kings, a single minor piece, or one bishop
/// each on squares of the same color
pub fn is_insufficient_material(position: &Position) -> bool {
    let heavy = position.get_piecetype_bitboard(PieceType::Pawn)
        | position.get_piecetype_bitboard(PieceType::Rook)
        | position.get_piecetype_bitboard(PieceType::Queen);
    if !heavy.is_empty() {
        return false;
    }

    let minors = |color: Color| {
        position.get_piece_bitboard(PieceType::Knight, color) | position.get_piece_bitboard(PieceType::Bishop, color)
    };
    let (white, black) = (minors(Color::White), minors(Color::Black));
    match (white.pop_count(), black.pop_count()) {
        (0, 0) | (1, 0) | (0, 1) => true,
        (1, 1) => {
            let bishops = position.get_piecetype_bitboard(PieceType::Bishop);
            // both on light squares or both on dark ones
            let on_light = (bishops & Bitboard::LIGHT_SQUARES).pop_count();
            bishops.pop_count() == 2 && on_light != 1
        }
        _ => false,
    }
}

/// Occurrences of the current position, itself included, among the positions
/// since the last irreversible move
pub fn repetition_count(position: &Position, history: &[Hash]) -> usize {
    let current = position.hash();
    let window = (position.halfmove_clock() as usize + 1).min(history.len());
    let recent = &history[history.len() - window..];
    let mut count = recent.iter().filter(|h| **h == current).count();
    if recent.last() != Some(&current) {
        count += 1
    }
    count
}

pub fn is_fifty_move_draw(position: &Position) -> bool {
    position.halfmove_clock() >= FIFTY_MOVE_PLIES
}
