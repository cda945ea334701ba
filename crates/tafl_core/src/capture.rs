//! Move application and custodian-capture resolution.
//!
//! A soldier is captured when the move lands directly beside it and the square
//! on the far side is an anchor for the mover: a friendly piece, an empty
//! restricted square (if hostile), or the board edge (if hostile). Only the
//! piece that just moved can trigger a capture.
//!
//! The king falls under a separate, configurable rule (`CaptureRules::king_surround`).
//! A captured king stays on the board; the outcome reports the capture and
//! the game ends on it.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::board::Board;
use crate::error::MoveError;
use crate::movegen::is_legal;
use crate::types::*;

/// What a single move captured.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureOutcome {
    /// Squares vacated by custodian captures.
    pub captured: BTreeSet<Square>,
    pub king_captured: bool,
}

impl CaptureOutcome {
    pub fn any(&self) -> bool {
        self.king_captured || !self.captured.is_empty()
    }
}

/// Applies a legal move to `board`, removing captured pieces and updating the
/// no-capture counter. An illegal move is rejected and the board is untouched.
///
/// # Panics
/// If the board does not hold exactly one king afterwards.
pub fn apply(board: &mut Board, mv: Move) -> Result<CaptureOutcome, MoveError> {
    if !is_legal(board, mv) {
        return Err(MoveError::InvalidMove(mv));
    }
    Ok(apply_unchecked(board, mv))
}

/// Same as [`apply`] but leaves `board` alone and returns the successor.
pub fn preview_apply(board: &Board, mv: Move) -> Result<(Board, CaptureOutcome), MoveError> {
    let mut next = board.clone();
    let outcome = apply(&mut next, mv)?;
    Ok((next, outcome))
}

/// Moves the piece and resolves captures. `mv` must already be legal.
pub(crate) fn apply_unchecked(board: &mut Board, mv: Move) -> CaptureOutcome {
    let piece = match board.piece_at(mv.from) {
        Some(p) => p,
        None => unreachable!("apply_unchecked called with empty source {}", mv.from),
    };
    board.set_piece(mv.from, None);
    board.set_piece(mv.to, Some(piece));

    let mut outcome = CaptureOutcome::default();
    if !piece.is_king() || board.variant().capture().king_is_armed {
        for dir in Direction::ALL {
            if let Some(target) = custodian_target(board, mv.to, piece, dir) {
                board.set_piece(target, None);
                outcome.captured.insert(target);
            }
        }
    }
    outcome.king_captured = king_captured_by(board, mv);

    if outcome.any() {
        trace!(%mv, captured = outcome.captured.len(), king = outcome.king_captured, "capture");
        board.no_capture_count = 0;
    } else {
        board.no_capture_count += 1;
    }

    board.assert_invariants();
    outcome
}

/// The opposing soldier beside `at` in `dir` if it is sandwiched against an anchor.
fn custodian_target(board: &Board, at: Square, mover: Piece, dir: Direction) -> Option<Square> {
    let dims = board.dims();
    let adj = at.offset(dir, dims)?;
    let target = board.piece_at(adj)?;
    if target.side() == mover.side() || target.is_king() {
        return None;
    }
    let beyond = adj.offset(dir, dims);
    is_anchor_for(board, beyond, mover.side()).then_some(adj)
}

/// Whether `sq` (or the edge, when `None`) sandwiches pieces against `side`.
fn is_anchor_for(board: &Board, sq: Option<Square>, side: Side) -> bool {
    let rules = board.variant().capture();
    match sq {
        None => rules.edge_is_hostile,
        Some(sq) => match board.piece_at(sq) {
            Some(Piece::King) => side == Side::Defender && rules.king_is_armed,
            Some(p) => p.side() == side,
            None => rules.restricted_is_hostile && board.variant().is_restricted(sq),
        },
    }
}

/// True when `mv` was an attacker move that completed the configured
/// encirclement of the king. A king that walks into an encirclement is safe.
pub fn king_captured_by(board: &Board, mv: Move) -> bool {
    if board.piece_at(mv.to) != Some(Piece::Attacker) {
        return false;
    }
    let king = match board.king_square() {
        Some(k) => k,
        None => return false,
    };
    if king.distance(mv.to) != 1 {
        return false;
    }
    king_surrounded(board, king, mv.to)
}

fn king_surrounded(board: &Board, king: Square, attacker: Square) -> bool {
    let dims = board.dims();
    let need = board.variant().capture().king_surround;
    if need == 2 {
        let Some(toward) = Direction::ALL
            .into_iter()
            .find(|&d| king.offset(d, dims) == Some(attacker))
        else {
            return false;
        };
        return hostile_to_king(board, king.offset(toward.opposite(), dims));
    }
    let hostile = Direction::ALL
        .into_iter()
        .filter(|&d| hostile_to_king(board, king.offset(d, dims)))
        .count();
    hostile >= need as usize
}

fn hostile_to_king(board: &Board, sq: Option<Square>) -> bool {
    let rules = board.variant().capture();
    match sq {
        None => rules.edge_is_hostile,
        Some(sq) => match board.piece_at(sq) {
            Some(p) => p == Piece::Attacker,
            None => rules.restricted_is_hostile && board.variant().is_restricted(sq),
        },
    }
}

#[cfg(test)]
#[path = "capture_tests.rs"]
mod capture_tests;
