use crate::config::RulesConfig;
use crate::error::Result;
use crate::history::HistoryEntry;
use crate::movelist::MoveList;
use crate::notation;
use crate::position::Position;
use crate::r#move::Move;
use crate::status::{self, GameState, Outcome};
use crate::zob_hash::Hash;

/// A position together with the moves that led to it, so that moves can be
/// taken back and repetitions detected
#[derive(Debug, Clone)]
pub struct Game {
    position: Position,
    history: Vec<HistoryEntry>,
    /// Hash of every position reached, the current one last
    hashes: Vec<Hash>,
    config: RulesConfig,
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

impl Game {
    /// A game from the standard starting position
    pub fn new() -> Game {
        Game::with_config(Position::start(), RulesConfig::default())
    }

    pub fn from_fen(fen: &str) -> Result<Game> {
        Ok(Game::with_config(Position::from_fen(fen)?, RulesConfig::default()))
    }

    pub fn with_config(position: Position, config: RulesConfig) -> Game {
        let hashes = vec![position.hash()];
        Game {
            position,
            history: Vec::new(),
            hashes,
            config,
        }
    }

    /// Plays a move. With `validate_moves` off, only structural checks are
    /// made and the caller vouches for legality.
    pub fn play(&mut self, mv: Move) -> Result<()> {
        let (next, entry) = self.position.transition(mv, self.config.validate_moves)?;
        self.position = next;
        self.history.push(entry);
        self.hashes.push(self.position.hash());
        Ok(())
    }

    /// Plays a move given in UCI or SAN notation, returning it
    pub fn play_str(&mut self, s: &str) -> Result<Move> {
        let mv = notation::parse_move(&self.position, s)?;
        self.play(mv)?;
        Ok(mv)
    }

    /// Takes back the last move, returning it. `None` at the start of the game.
    pub fn undo(&mut self) -> Option<Move> {
        let entry = self.history.pop()?;
        self.hashes.pop();
        self.position = self.position.undo(&entry);
        Some(entry.move_played)
    }

    pub fn legal_moves(&self) -> MoveList {
        self.position.legal_moves()
    }

    pub fn state(&self) -> GameState {
        status::classify_with(&self.position, &self.hashes, &self.config)
    }

    pub fn outcome(&self) -> Option<Outcome> {
        Outcome::from_state(self.state(), self.position.side_to_move())
    }

    pub fn is_over(&self) -> bool {
        self.state().is_terminal()
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut RulesConfig {
        &mut self.config
    }

    /// Moves played since the game was created, oldest first
    pub fn moves_played(&self) -> impl Iterator<Item = Move> + '_ {
        self.history.iter().map(|entry| entry.move_played)
    }

    /// Occurrences of the current position since the last irreversible move
    pub fn repetitions(&self) -> usize {
        status::repetition_count(&self.position, &self.hashes)
    }
}
