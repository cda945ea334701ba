//! Feature extraction for learned evaluators.
//!
//! The input vector is the flattened board, the most recent encoded moves and
//! a side indicator:
//!
//! ```text
//! [cell_0 .. cell_{rows*cols-1}, move_{-8} .. move_{-1}, side]
//! ```
//!
//! Cells encode empty as 0, attacker 1, defender 2, king 3. Missing moves at
//! the start of a game are padded with 0. The side is 1 for the attacker and
//! 0 for the defender.

use crate::{board::Board, history::History, types::*};

/// Number of trailing moves included in the feature vector.
pub const MOVE_WINDOW: usize = 8;

pub fn cell_value(cell: Option<Piece>) -> u32 {
    match cell {
        None => 0,
        Some(Piece::Attacker) => 1,
        Some(Piece::Defender) => 2,
        Some(Piece::King) => 3,
    }
}

pub fn side_value(side: Side) -> u32 {
    match side {
        Side::Attacker => 1,
        Side::Defender => 0,
    }
}

pub fn num_features(dims: Dims) -> usize {
    dims.cells() + MOVE_WINDOW + 1
}

/// Integer feature tuple for `board` with `history`'s tail and `side`.
pub fn feature_tuple(board: &Board, history: &History, side: Side) -> Vec<u32> {
    feature_tuple_with_moves(board, &history.last_moves(MOVE_WINDOW), side)
}

/// Same as [`feature_tuple`] with an explicit move window (already padded).
pub fn feature_tuple_with_moves(board: &Board, moves: &[u32], side: Side) -> Vec<u32> {
    let mut out = Vec::with_capacity(board.cells().len() + moves.len() + 1);
    out.extend(board.cells().iter().map(|c| cell_value(*c)));
    out.extend_from_slice(moves);
    out.push(side_value(side));
    out
}

/// The feature tuple as `f32`, ready for a network.
pub fn extract_features(board: &Board, history: &History, side: Side) -> Vec<f32> {
    feature_tuple(board, history, side)
        .into_iter()
        .map(|v| v as f32)
        .collect()
}

/// Stringified feature tuple, `"(0, 1, ...)"`. Used as a state-table key.
pub fn state_key(tuple: &[u32]) -> String {
    let parts: Vec<String> = tuple.iter().map(|v| v.to_string()).collect();
    format!("({})", parts.join(", "))
}

#[cfg(test)]
#[path = "features_tests.rs"]
mod features_tests;
