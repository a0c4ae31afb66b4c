//! A chess rules engine: positions as values, legal move generation, move
//! application and undo, and game state classification, with FEN and move
//! notation on the outside.
//!
//! ```
//! use arbiter::{Game, GameState};
//!
//! let mut game = Game::new();
//! for m in ["e4", "e5", "Bc4", "Nc6", "Qh5", "Nf6", "Qxf7#"] {
//!     game.play_str(m).unwrap();
//! }
//! assert_eq!(game.state(), GameState::Checkmate);
//! ```

pub mod attacks;
pub mod bitboard;
pub mod castling;
pub mod config;
pub mod console;
pub mod error;
pub mod fen;
pub mod game;
pub mod history;
pub mod legality;
pub mod move_generator;
pub mod movelist;
pub mod notation;
pub mod perft;
pub mod piece;
pub mod position;
pub mod r#move;
pub mod special;
pub mod square;
pub mod status;
mod zob_hash;

pub use config::RulesConfig;
pub use error::{ChessError, IllegalMoveError, InvalidPositionError, ParseError, Result};
pub use game::Game;
pub use history::HistoryEntry;
pub use movelist::MoveList;
pub use piece::{Color, Piece, PieceType};
pub use position::Position;
pub use r#move::Move;
pub use square::Square;
pub use status::{classify, classify_with, GameState, Outcome};
pub use zob_hash::Hash;
