use std::sync::Arc;

use tracing::{debug, trace};

use crate::board::Board;
use crate::capture::{apply, preview_apply, CaptureOutcome};
use crate::codec::decode_move;
use crate::config::{Variant, VariantConfig};
use crate::endgame::{check_endgame, GameOutcome};
use crate::error::{ConfigError, MoveError};
use crate::features::feature_tuple;
use crate::history::History;
use crate::movegen::legal_moves;
use crate::types::*;

/// Canonical state of one game: board, history, turn bookkeeping and outcome.
///
/// Each `Game` owns everything it mutates, so independent games can run on
/// separate threads without coordination.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    history: History,
    side_to_move: Side,
    turn: u32,
    last_move: Option<Move>,
    outcome: GameOutcome,
}

impl Game {
    pub fn new(config: VariantConfig) -> Result<Self, ConfigError> {
        Ok(Self::from_board(Board::new(config)?))
    }

    pub fn from_variant(variant: Arc<Variant>) -> Self {
        Self::from_board(Board::from_variant(variant))
    }

    /// Starts a game from an arbitrary position with the attacker to move.
    pub fn from_board(board: Board) -> Self {
        let history = History::new(&board);
        let outcome = check_endgame(&board, &history, None, Side::Attacker, 0);
        Self {
            board,
            history,
            side_to_move: Side::Attacker,
            turn: 0,
            last_move: None,
            outcome,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    /// Number of turns played.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_over()
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        if self.is_over() {
            return Vec::new();
        }
        legal_moves(&self.board, self.side_to_move)
    }

    fn check_turn(&self, mv: Move) -> Result<(), MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        if !self.board.dims().contains(mv.from) {
            return Err(MoveError::InvalidMove(mv));
        }
        match self.board.piece_at(mv.from) {
            None => Err(MoveError::InvalidMove(mv)),
            Some(p) if p.side() != self.side_to_move => Err(MoveError::WrongSide(mv.from)),
            Some(_) => Ok(()),
        }
    }

    /// Plays `mv` for the side to move and re-evaluates the outcome.
    pub fn play(&mut self, mv: Move) -> Result<(CaptureOutcome, GameOutcome), MoveError> {
        self.check_turn(mv)?;
        let capture = apply(&mut self.board, mv)?;

        self.history.push_move(mv, &self.board);
        self.turn += 1;
        self.side_to_move = self.side_to_move.other();
        self.last_move = Some(mv);
        self.outcome = check_endgame(
            &self.board,
            &self.history,
            self.last_move,
            self.side_to_move,
            self.turn,
        );

        trace!(turn = self.turn, %mv, captured = capture.captured.len(), "move played");
        if self.outcome.is_over() {
            debug!(turns = self.turn, outcome = %self.outcome, "game over");
        }
        Ok((capture, self.outcome))
    }

    pub fn play_code(&mut self, code: u32) -> Result<(CaptureOutcome, GameOutcome), MoveError> {
        let mv = decode_move(code, self.board.dims())?;
        self.play(mv)
    }

    /// Successor board for `mv` without touching this game.
    pub fn preview(&self, mv: Move) -> Result<(Board, CaptureOutcome), MoveError> {
        self.check_turn(mv)?;
        preview_apply(&self.board, mv)
    }

    /// Feature tuple of the current position for the side to move.
    pub fn features(&self) -> Vec<u32> {
        feature_tuple(&self.board, &self.history, self.side_to_move)
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
