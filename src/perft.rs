//! Node counting over the legal move tree, the usual way of checking a move
//! generator against known results.

use crate::legality;
use crate::position::Position;
use crate::r#move::Move;

/// Number of leaf nodes `depth` plies below the position
pub fn perft(position: &Position, depth: u32) -> u64 {
    let mut scratch = position.clone();
    count_nodes(&mut scratch, depth)
}

/// Perft split by root move, in move generation order
pub fn divide(position: &Position, depth: u32) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }
    let mut scratch = position.clone();
    let mut results = Vec::new();
    for mv in &legality::legal_moves(position) {
        if let Ok(entry) = scratch.make(*mv) {
            results.push((*mv, count_nodes(&mut scratch, depth - 1)));
            scratch.unmake(&entry);
        }
    }
    results
}

// perft with counting at horizon nodes
fn count_nodes(position: &mut Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = legality::legal_moves(position);
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0;
    for mv in &moves {
        if let Ok(entry) = position.make(*mv) {
            nodes += count_nodes(position, depth - 1);
            position.unmake(&entry);
        }
    }
    nodes
}
