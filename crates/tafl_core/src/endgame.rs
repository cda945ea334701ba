//! Terminal-state detection.
//!
//! [`check_endgame`] is a pure function of its arguments. Conditions are tested
//! in a fixed order and the first match wins:
//!
//! 1. king captured by the last move
//! 2. king on an escape square
//! 3. side to move has no legal move
//! 4. threefold repetition of (position, side to move)
//! 5. no-capture counter at the variant limit
//! 6. turn cap reached

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::capture::king_captured_by;
use crate::history::History;
use crate::movegen::has_legal_move;
use crate::types::{Move, Side};

/// Number of occurrences of a position that ends the game in a draw.
pub const REPETITION_LIMIT: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndReason {
    KingCaptured,
    KingEscaped,
    NoLegalMoves,
    ThreefoldRepetition,
    NoCaptureLimit,
    MoveLimit,
}

impl EndReason {
    pub fn as_str(self) -> &'static str {
        match self {
            EndReason::KingCaptured => "king captured",
            EndReason::KingEscaped => "king escaped",
            EndReason::NoLegalMoves => "no legal moves",
            EndReason::ThreefoldRepetition => "threefold repetition",
            EndReason::NoCaptureLimit => "no-capture limit",
            EndReason::MoveLimit => "move limit",
        }
    }
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Ongoing,
    AttackerWin(EndReason),
    DefenderWin(EndReason),
    Draw(EndReason),
}

impl GameOutcome {
    pub fn win_for(side: Side, reason: EndReason) -> Self {
        match side {
            Side::Attacker => GameOutcome::AttackerWin(reason),
            Side::Defender => GameOutcome::DefenderWin(reason),
        }
    }

    pub fn is_over(self) -> bool {
        self != GameOutcome::Ongoing
    }

    pub fn winner(self) -> Option<Side> {
        match self {
            GameOutcome::AttackerWin(_) => Some(Side::Attacker),
            GameOutcome::DefenderWin(_) => Some(Side::Defender),
            _ => None,
        }
    }

    pub fn is_draw(self) -> bool {
        matches!(self, GameOutcome::Draw(_))
    }

    pub fn reason(self) -> Option<EndReason> {
        match self {
            GameOutcome::Ongoing => None,
            GameOutcome::AttackerWin(r) | GameOutcome::DefenderWin(r) | GameOutcome::Draw(r) => {
                Some(r)
            }
        }
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::Ongoing => write!(f, "ongoing"),
            GameOutcome::AttackerWin(r) => write!(f, "attacker wins ({r})"),
            GameOutcome::DefenderWin(r) => write!(f, "defender wins ({r})"),
            GameOutcome::Draw(r) => write!(f, "draw ({r})"),
        }
    }
}

/// Decides whether the game is over.
///
/// * `board` - the position after `last_move`
/// * `history` - every move played so far, `last_move` included
/// * `last_move` - the move that produced `board` (`None` before the first move)
/// * `side` - the side to move in `board`
/// * `turn_index` - number of turns played so far
pub fn check_endgame(
    board: &Board,
    history: &History,
    last_move: Option<Move>,
    side: Side,
    turn_index: u32,
) -> GameOutcome {
    let variant = board.variant();

    if last_move.is_some_and(|mv| king_captured_by(board, mv)) {
        return GameOutcome::AttackerWin(EndReason::KingCaptured);
    }

    if board.king_square().is_some_and(|k| variant.is_escape(k)) {
        return GameOutcome::DefenderWin(EndReason::KingEscaped);
    }

    if !has_legal_move(board, side) {
        return GameOutcome::win_for(side.other(), EndReason::NoLegalMoves);
    }

    if repetition_count(board, history, side) >= REPETITION_LIMIT {
        return GameOutcome::Draw(EndReason::ThreefoldRepetition);
    }

    let config = variant.config();
    if board.no_capture_count >= config.no_capture_limit {
        return GameOutcome::Draw(EndReason::NoCaptureLimit);
    }

    if turn_index >= config.turn_limit {
        return GameOutcome::Draw(EndReason::MoveLimit);
    }

    GameOutcome::Ongoing
}

/// How many times (`board`, `side`) has occurred, counting `board` itself once.
///
/// `history` must end at `board`. Only plies since the last capture are
/// scanned, since a capture can never be undone.
pub fn repetition_count(board: &Board, history: &History, side: Side) -> usize {
    let plies = history.len();
    let quiet = board.no_capture_count as usize;
    if plies < 4 || quiet < 4 {
        return 1;
    }
    let key = board.position_key(side);
    let keys = history.keys();
    let first = plies.saturating_sub(quiet);
    // Same side to move means an even distance from the current ply.
    let earlier = (first..plies)
        .filter(|&i| (plies - i) % 2 == 0)
        .filter(|&i| keys[i] == key)
        .count();
    1 + earlier
}

#[cfg(test)]
#[path = "endgame_tests.rs"]
mod endgame_tests;
