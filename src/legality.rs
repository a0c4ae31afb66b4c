//! Legal move filtering by trial: every pseudo-legal move is played on a
//! scratch copy and kept only if the mover's king is not attacked afterwards.

use crate::attacks;
use crate::move_generator::pseudo_moves;
use crate::movelist::MoveList;
use crate::position::Position;
use crate::r#move::Move;

/// Every legal move of the side to move
pub fn legal_moves(position: &Position) -> MoveList {
    let mut moves = pseudo_moves(position);
    let mut scratch = position.clone();
    moves.retain(|mv| keeps_king_safe(&mut scratch, *mv));
    moves
}

/// Whether the side to move has at least one legal move. Stops at the first one.
pub fn has_legal_move(position: &Position) -> bool {
    let mut scratch = position.clone();
    pseudo_moves(position)
        .into_iter()
        .any(|mv| keeps_king_safe(&mut scratch, mv))
}

/// Plays the move on the scratch position, checks the mover's king, and takes
/// the move back so the scratch position can be reused
fn keeps_king_safe(scratch: &mut Position, mv: Move) -> bool {
    let mover = scratch.side_to_move();
    match scratch.make(mv) {
        Ok(entry) => {
            let safe = !attacks::is_in_check(scratch, mover);
            scratch.unmake(&entry);
            safe
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::Color;
    use crate::square::{parse_square, Square};

    fn sq(s: &str) -> Square {
        parse_square(s).unwrap()
    }

    #[test]
    fn no_legal_move_leaves_the_king_attacked() {
        for fen in [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        ] {
            let position = Position::from_fen(fen).unwrap();
            let mover = position.side_to_move();
            for mv in &legal_moves(&position) {
                let next = position.apply(*mv).unwrap();
                assert!(!next.is_in_check(mover), "{} {}", fen, mv);
            }
        }
    }

    #[test]
    fn check_evasions_only() {
        // white king on e1 checked by the e8 rook: block, capture or step aside
        let position = Position::from_fen("4r1k1/8/8/8/8/8/3B4/3QK3 w - - 0 1").unwrap();
        let moves = legal_moves(&position);
        assert!(position.is_in_check(Color::White));
        for mv in &moves {
            let blocks = mv.target().file() == 4;
            let king_moves = mv.origin() == Square::E1;
            assert!(blocks || king_moves, "{}", mv);
        }
        assert!(moves.iter().any(|m| m.origin() == sq("d2") && m.target() == sq("e3")));
        assert!(moves.iter().any(|m| m.origin() == sq("d1") && m.target() == sq("e2")));
        assert!(has_legal_move(&position));
    }

    #[test]
    fn en_passant_discovering_a_rank_check_is_illegal() {
        // bxc6 removes both pawns from the fifth rank between the h5 rook and the a5 king
        let position = Position::from_fen("8/8/8/KPp4r/8/8/8/7k w - c6 0 1").unwrap();
        let moves = legal_moves(&position);
        assert!(!moves.iter().any(|m| m.is_en_passant()));
    }

    #[test]
    fn king_cannot_step_along_the_checking_ray() {
        let position = Position::from_fen("4k3/8/8/8/8/8/8/r3K3 w - - 0 1").unwrap();
        let moves = legal_moves(&position);
        assert!(!moves.iter().any(|m| m.target() == Square::F1));
        assert!(!moves.iter().any(|m| m.target() == Square::D1));
        assert_eq!(moves.len(), 3);
    }
}
