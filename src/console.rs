//! Line-oriented console over a [`Game`], the only part of the crate that
//! talks to the outside world.

use crate::error::ChessError;
use crate::game::Game;
use crate::notation;
use crate::perft;
use crate::position::Position;
use crate::status::Outcome;

use regex::Regex;
use rustyline::config::Configurer;
use rustyline::Editor;
use std::collections::BTreeMap;
use std::fmt::{Display, Error, Formatter};
use std::time::Instant;

const HELP: &str = "\
commands:
  new                                     start a new game
  position startpos|fen <FEN> [moves ...] set up a position, then play moves
  move <m>                                play a move (e2e4, e7e8q, Nf3, O-O, ...)
  undo                                    take back the last move
  moves                                   list the legal moves
  status                                  state of the game
  fen                                     FEN of the current position
  show                                    print the board
  perft <depth>                           count the leaf nodes at depth
  divide <depth>                          perft split by root move
  options                                 list the options
  setoption name <name> value <value>     change an option
  help                                    this message
  quit                                    leave";

pub struct Console {
    game: Game,
    editor: Editor<()>,
    options: BTreeMap<String, ConsoleOption>,
}
impl Default for Console {
    fn default() -> Self {
        let mut editor = Editor::<()>::new();
        editor.set_auto_add_history(true);
        editor.set_check_cursor_position(true);
        let game = Game::new();
        let config = *game.config();
        let options = [
            ConsoleOption::BoolValue {
                name: String::from("ValidateMoves"),
                value: config.validate_moves,
                default: config.validate_moves,
            },
            ConsoleOption::BoolValue {
                name: String::from("DetectDraws"),
                value: config.detect_draws,
                default: config.detect_draws,
            },
        ];
        Console {
            game,
            editor,
            options: options.into_iter().map(|o| (o.name().to_string(), o)).collect(),
        }
    }
}

impl Console {
    pub fn run(&mut self) {
        while let Ok(line) = self.editor.readline("arbiter> ") {
            match self.handle_command(&line) {
                Ok(ConsoleOkCode::ShouldQuit) => break,
                Err(ConsoleErrCode::BadCommand(cmd)) => {
                    eprintln!("Unknown or badly formed command: {} (try help)", cmd)
                }
                Err(ConsoleErrCode::MissingArg(arg)) => {
                    eprintln!("Missing an argument: {} {} <- here", line.trim(), arg)
                }
                Err(ConsoleErrCode::Chess(e)) => eprintln!("{}", e),
                _ => (),
            }
        }
    }

    fn handle_command(&mut self, line: &str) -> Result<ConsoleOkCode, ConsoleErrCode> {
        let args_regex = Self::args_regex();
        let mut args = args_regex.find_iter(line).map(|m| m.as_str());
        let cmd = if let Some(c) = args.next() {
            c
        } else {
            return Err(ConsoleErrCode::NoCommand);
        };
        match cmd {
            "new" => self.game = Game::with_config(Position::start(), *self.game.config()),
            "position" => {
                let position = match args.next() {
                    Some("startpos") => Position::start(),
                    Some("fen") => {
                        let fen_parts: Vec<&str> = args.by_ref().take_while(|a| *a != "moves").collect();
                        if fen_parts.is_empty() {
                            return Err(ConsoleErrCode::MissingArg(String::from("<FEN>")));
                        }
                        Position::from_fen(&fen_parts.join(" ").replace('"', ""))?
                    }
                    Some(other) => return Err(ConsoleErrCode::BadCommand(format!("position {}", other))),
                    None => return Err(ConsoleErrCode::MissingArg(String::from("<startpos | fen>"))),
                };
                let mut game = Game::with_config(position, *self.game.config());
                for mv in args.filter(|a| *a != "moves") {
                    game.play_str(mv)?;
                }
                self.game = game;
            }
            "move" => match args.next() {
                Some(m) => {
                    let mv = notation::parse_move(self.game.position(), m)?;
                    let san = notation::to_san(self.game.position(), mv)?;
                    self.game.play(mv)?;
                    println!("played {}", san);
                    self.print_outcome();
                }
                None => return Err(ConsoleErrCode::MissingArg(String::from("<move>"))),
            },
            "undo" => match self.game.undo() {
                Some(mv) => println!("took back {}", mv),
                None => println!("no move to take back"),
            },
            "moves" => {
                let position = self.game.position();
                let moves = self.game.legal_moves();
                let listed: Vec<String> = moves
                    .iter()
                    .map(|mv| match notation::to_san(position, *mv) {
                        Ok(san) => format!("{} ({})", mv, san),
                        Err(_) => mv.to_string(),
                    })
                    .collect();
                println!("{} legal moves: {}", moves.len(), listed.join(", "));
            }
            "status" => {
                println!("{}", self.game.state());
                self.print_outcome();
            }
            "fen" => println!("{}", self.game.position().to_fen()),
            "show" => {
                println!("{}", self.game.position());
                println!("state: {}", self.game.state());
            }
            "perft" => perft_report(self.game.position(), Self::depth_arg(args.next())?),
            "divide" => {
                let depth = Self::depth_arg(args.next())?;
                let split = perft::divide(self.game.position(), depth);
                for (mv, nodes) in &split {
                    println!("{}: {}", mv, nodes);
                }
                println!("\nmoves: {}, nodes: {}", split.len(), split.iter().map(|(_, n)| n).sum::<u64>());
            }
            "options" => self.options.values().for_each(|o| println!("option {}", o)),
            "setoption" => {
                let option_name = if let Some("name") = args.next() {
                    args.next().unwrap_or("")
                } else {
                    ""
                };
                let option_value = match args.nth(1) {
                    Some(v) => v,
                    None => return Err(ConsoleErrCode::MissingArg(String::from("<value>"))),
                };
                match self.options.get_mut(option_name) {
                    Some(option) => option.set_value(option_value),
                    None => return Err(ConsoleErrCode::BadCommand(format!("setoption name {}", option_name))),
                }
                self.sync_config();
            }
            "help" => println!("{}", HELP),
            "quit" => return Ok(ConsoleOkCode::ShouldQuit),
            _ => return Err(ConsoleErrCode::BadCommand(String::from(cmd))),
        }

        Ok(ConsoleOkCode::OkCommand)
    }

    fn print_outcome(&self) {
        if let Some(outcome) = self.game.outcome() {
            println!("game over: {}", outcome);
        }
    }

    /// Pushes the option values into the rules of the current game
    fn sync_config(&mut self) {
        let validate = self.bool_option("ValidateMoves");
        let detect = self.bool_option("DetectDraws");
        let config = self.game.config_mut();
        if let Some(v) = validate {
            config.set_validate_moves(v);
        }
        if let Some(v) = detect {
            config.set_detect_draws(v);
        }
    }

    fn bool_option(&self, name: &str) -> Option<bool> {
        match self.options.get(name) {
            Some(ConsoleOption::BoolValue { value, .. }) => Some(*value),
            _ => None,
        }
    }

    fn depth_arg(arg: Option<&str>) -> Result<u32, ConsoleErrCode> {
        match arg {
            Some(d) => d
                .parse::<u32>()
                .map_err(|_| ConsoleErrCode::BadCommand(format!("depth {}", d))),
            None => Err(ConsoleErrCode::MissingArg(String::from("<depth>"))),
        }
    }

    fn args_regex() -> Regex {
        Regex::new(r#"(".*?"|[^"\s]+)"#).unwrap()
    }
}

/// Prints the node count of every depth up to `depth`, with timings
pub fn perft_report(position: &Position, depth: u32) {
    println!("{}\n", position);
    println!("depth nodes\n--------");
    for d in 0..depth + 1 {
        let start = Instant::now();
        let nodes = perft::perft(position, d);
        let elapsed = start.elapsed().as_secs_f64();
        let nps = if elapsed > 0.0 { nodes as f64 / elapsed } else { 0.0 };
        println!("{}     {} ({:.3}s, {:.0} nps)", d, nodes, elapsed, nps);
    }
}

enum ConsoleOkCode {
    OkCommand,
    ShouldQuit,
}

enum ConsoleErrCode {
    MissingArg(String),
    NoCommand,
    BadCommand(String),
    Chess(ChessError),
}

impl From<ChessError> for ConsoleErrCode {
    fn from(e: ChessError) -> Self {
        ConsoleErrCode::Chess(e)
    }
}

pub enum ConsoleOption {
    BoolValue { name: String, value: bool, default: bool },
}
impl ConsoleOption {
    pub fn name(&self) -> &str {
        match self {
            Self::BoolValue { name, .. } => name,
        }
    }

    pub fn set_value(&mut self, v: &str) {
        match self {
            Self::BoolValue { value, .. } => *value = v.parse::<bool>().unwrap_or(*value),
        }
    }
}
impl Display for ConsoleOption {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            Self::BoolValue { name, value, default } => {
                write!(f, "name {} type check default {} value {}", name, default, value)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_fen_is_a_single_argument() {
        let line = r#"position fen "8/8/8/8/8/8/8/K6k w - - 0 1" moves a1a2"#;
        let args: Vec<&str> = Console::args_regex().find_iter(line).map(|m| m.as_str()).collect();
        assert_eq!(args.len(), 5);
        assert_eq!(args[2], r#""8/8/8/8/8/8/8/K6k w - - 0 1""#);
    }

    #[test]
    fn commands_drive_the_game() {
        let mut console = Console::default();
        assert!(console.handle_command("move e4").is_ok());
        assert!(console.handle_command("move e7e5").is_ok());
        assert!(matches!(console.handle_command("move e4e5"), Err(ConsoleErrCode::Chess(_))));
        assert_eq!(console.game.moves_played().count(), 2);
        assert!(console.handle_command("undo").is_ok());
        assert_eq!(console.game.moves_played().count(), 1);

        assert!(console
            .handle_command("position fen 4k3/8/8/8/8/8/8/R3K3 w Q - 0 1 moves O-O-O")
            .is_ok());
        assert_eq!(console.game.position().to_fen(), "4k3/8/8/8/8/8/8/2KR4 b - - 1 1");
        assert!(matches!(console.handle_command("position"), Err(ConsoleErrCode::MissingArg(_))));
        assert!(matches!(console.handle_command("frobnicate"), Err(ConsoleErrCode::BadCommand(_))));
        assert!(matches!(console.handle_command("quit"), Ok(ConsoleOkCode::ShouldQuit)));
    }

    #[test]
    fn move_command_plays_what_it_parsed() {
        let mut console = Console::default();
        assert!(console
            .handle_command("position fen r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1")
            .is_ok());
        assert!(matches!(console.handle_command("move Kg1"), Err(ConsoleErrCode::Chess(_))));
        assert_eq!(console.game.moves_played().count(), 0);
        assert!(console.handle_command("move O-O").is_ok());
        assert!(console.handle_command("move Rxa1").is_ok());
        assert_eq!(console.game.position().to_fen(), "4k2r/8/8/8/8/8/8/r4RK1 w k - 0 2");
        assert!(console.handle_command("undo").is_ok());
        assert_eq!(console.game.position().to_fen(), "r3k2r/8/8/8/8/8/8/R4RK1 b kq - 1 1");
    }

    #[test]
    fn options_reach_the_rules() {
        let mut console = Console::default();
        assert!(console.handle_command("setoption name DetectDraws value false").is_ok());
        assert!(!console.game.config().detect_draws);
        assert!(console.game.config().validate_moves);
        // the rules carry over to new games
        assert!(console.handle_command("new").is_ok());
        assert!(!console.game.config().detect_draws);
        assert!(console.handle_command("setoption name Nonsense value true").is_err());
    }
}
