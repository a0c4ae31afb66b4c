use arbiter::castling::{CastleSide, CastlingRights};
use arbiter::notation::parse_move;
use arbiter::perft::perft;
use arbiter::{classify, Color, Game, GameState, Position};

fn game_after(moves: &[&str]) -> Game {
    let mut game = Game::new();
    for m in moves {
        game.play_str(m).unwrap();
    }
    game
}

#[test]
fn start_position_counts() {
    let position = Position::start();
    assert_eq!(position.legal_moves().len(), 20);
    let game = game_after(&["e2e4"]);
    assert_eq!(game.legal_moves().len(), 20);
    assert_eq!(game.position().side_to_move(), Color::Black);
    assert_eq!(perft(&position, 4), 197_281);
}

#[test]
fn scholars_mate() {
    let game = game_after(&["e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6", "h5f7"]);
    assert_eq!(game.position().side_to_move(), Color::Black);
    assert_eq!(game.state(), GameState::Checkmate);
    assert_eq!(game.outcome().map(|o| o.result()), Some("1-0"));
}

#[test]
fn stalemate_is_not_checkmate() {
    let mut game = Game::from_fen("7k/8/6K1/8/8/8/8/5Q2 w - - 0 1").unwrap();
    assert_eq!(game.state(), GameState::Normal);
    game.play_str("Qf7").unwrap();
    assert!(!game.position().in_check());
    assert!(game.legal_moves().is_empty());
    assert_eq!(game.state(), GameState::Stalemate);
    assert_eq!(game.outcome().map(|o| o.result()), Some("1/2-1/2"));
}

#[test]
fn insufficient_material() {
    let state = |fen: &str| classify(&Position::from_fen(fen).unwrap(), &[]);
    assert_eq!(state("4k3/8/8/8/8/8/8/4K3 w - - 0 1"), GameState::InsufficientMaterial);
    assert_eq!(state("4k3/8/8/8/8/8/8/4KN2 w - - 0 1"), GameState::InsufficientMaterial);
    assert_eq!(state("4k3/8/8/8/8/8/8/3BKB2 w - - 0 1"), GameState::Normal);
}

#[test]
fn castling_rights_are_lost_for_good() {
    let mut game = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let white_rights = |game: &Game| {
        let rights: CastlingRights = game.position().castling_rights();
        (
            rights.has(Color::White, CastleSide::KingSide),
            rights.has(Color::White, CastleSide::QueenSide),
        )
    };

    game.play_str("a1a2").unwrap();
    assert_eq!(white_rights(&game), (true, false));
    assert_eq!(game.position().castling_rights().to_string(), "Kkq");
    game.play_str("a8a7").unwrap();
    game.play_str("a2a1").unwrap();
    assert_eq!(white_rights(&game), (true, false));
    game.play_str("a7a8").unwrap();

    game.play_str("e1e2").unwrap();
    assert_eq!(white_rights(&game), (false, false));
    game.play_str("e8e7").unwrap();
    game.play_str("e2e1").unwrap();
    game.play_str("e7e8").unwrap();
    assert_eq!(white_rights(&game), (false, false));
    assert!(game.play_str("O-O").is_err());
    assert_eq!(game.position().castling_rights().to_string(), "-");
}

#[test]
fn castling_moves_both_pieces() {
    let game = game_after(&["e4", "e5", "Nf3", "Nc6", "Bc4", "Bc5", "O-O"]);
    let fen = game.position().to_fen();
    assert_eq!(fen, "r1bqk1nr/pppp1ppp/2n5/2b1p3/2B1P3/5N2/PPPP1PPP/RNBQ1RK1 b kq - 5 4");
}

#[test]
fn en_passant_window_is_one_ply() {
    let mut game = game_after(&["e2e4", "a7a6", "e4e5", "d7d5"]);
    let position = game.position().clone();
    let capture = parse_move(&position, "e5d6").unwrap();
    assert!(capture.is_en_passant());

    let after = position.apply(capture).unwrap();
    assert_eq!(after.piece_on("d5".parse().unwrap()), None);
    assert_eq!(after.to_fen(), "rnbqkbnr/1pp1pppp/p2P4/8/8/8/PPPP1PPP/RNBQKBNR b KQkq - 0 3");

    game.play_str("h2h3").unwrap();
    game.play_str("h7h6").unwrap();
    assert!(parse_move(game.position(), "e5d6").is_err());
    assert!(!game.legal_moves().iter().any(|m| m.is_en_passant()));
}

#[test]
fn promotion_needs_a_piece() {
    let mut game = Game::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    assert!(game.play_str("a7a8").is_err());
    assert_eq!(game.play_str("a7a8n").unwrap().to_string(), "a7a8n");
    assert_eq!(game.position().to_fen(), "N3k3/8/8/8/8/8/8/4K3 b - - 0 1");
}

#[test]
fn undo_restores_the_exact_position() {
    let moves = ["e4", "d5", "exd5", "Qxd5", "Nc3"];
    let mut game = Game::new();
    let mut seen = vec![game.position().clone()];
    for m in moves {
        game.play_str(m).unwrap();
        seen.push(game.position().clone());
    }
    while let Some(position) = seen.pop() {
        assert_eq!(game.position(), &position);
        assert_eq!(game.position(), &Position::from_fen(&position.to_fen()).unwrap());
        game.undo();
    }
    assert_eq!(game.position(), &Position::start());
}

#[test]
fn en_passant_and_capture_promotion_are_undone() {
    for (fen, m) in [
        ("rnbqkbnr/pp1ppppp/8/2pP4/8/8/PPP1PPPP/RNBQKBNR w KQkq c6 0 2", "dxc6"),
        ("1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1", "axb8=Q+"),
    ] {
        let mut game = Game::from_fen(fen).unwrap();
        let before = game.position().clone();
        game.play_str(m).unwrap();
        assert_ne!(game.position().hash(), before.hash());
        game.undo();
        assert_eq!(game.position(), &before);
        assert_eq!(game.position().to_fen(), fen);
    }
}
