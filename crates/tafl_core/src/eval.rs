//! Static heuristic evaluation.
//!
//! Advisory only: used to rank candidate moves, never to decide termination.

use crate::{board::Board, movegen::moves_from, types::*};

/// Term weights. Positive scores favour the attacker.
#[derive(Clone, Debug, PartialEq)]
pub struct EvalWeights {
    pub attacker: f64,
    pub defender: f64,
    /// Per legal king move.
    pub king_mobility: f64,
    /// Per step of Manhattan distance between the king and its nearest escape.
    pub escape_distance: f64,
    /// Per escape square the king can reach in one move.
    pub open_escape: f64,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            attacker: 1.0,
            defender: 2.0,
            king_mobility: 0.25,
            escape_distance: 0.5,
            open_escape: 8.0,
        }
    }
}

pub fn heuristic(board: &Board) -> f64 {
    heuristic_with(board, &EvalWeights::default())
}

pub fn heuristic_with(board: &Board, w: &EvalWeights) -> f64 {
    let mut score = w.attacker * board.count(Piece::Attacker) as f64
        - w.defender * board.count(Piece::Defender) as f64;

    let king = match board.king_square() {
        Some(k) => k,
        None => return score,
    };
    let variant = board.variant();

    let king_moves = moves_from(board, king);
    let open = king_moves
        .iter()
        .filter(|mv| variant.is_escape(mv.to))
        .count();
    let nearest = variant
        .escape_squares()
        .map(|e| king.distance(e))
        .min()
        .unwrap_or(0);

    score -= w.king_mobility * king_moves.len() as f64;
    score -= w.open_escape * open as f64;
    score += w.escape_distance * nearest as f64;
    score
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
