//! Baseline players.
//!
//! Both players are seeded, so a match between them is reproducible.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::trace;

use tafl_core::{
    encode_move, feature_tuple_with_moves, heuristic, Board, CaptureOutcome, Game, Move,
    MoveChoice, Player, Side, MOVE_WINDOW,
};

/// Score given to a successor that wins on the spot.
pub const WIN_SCORE: f64 = 1.0e6;

/// Picks uniformly among the legal moves.
#[derive(Debug, Clone)]
pub struct RandomPlayer {
    name: String,
    rng: StdRng,
}

impl RandomPlayer {
    pub fn new(seed: u64) -> Self {
        Self {
            name: format!("random-{seed}"),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl Player for RandomPlayer {
    fn choose_move(&mut self, game: &Game) -> MoveChoice {
        let moves = game.legal_moves();
        MoveChoice {
            best_move: moves.choose(&mut self.rng).copied(),
            score: 0.0,
            candidates: moves.len(),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Values a successor position from the point of view of the side that just
/// moved. Higher is better for `mover`.
///
/// `features` is the evaluator input for the successor: its cells, the last
/// moves ending with the candidate, and `mover` as the side indicator (see
/// [`tafl_core::features`]).
pub trait MoveScorer: Send {
    fn score(
        &self,
        successor: &Board,
        capture: &CaptureOutcome,
        features: &[u32],
        mover: Side,
    ) -> f64;
}

/// Scores successors with the static heuristic, plus immediate wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicScorer;

impl MoveScorer for HeuristicScorer {
    fn score(&self, successor: &Board, capture: &CaptureOutcome, _: &[u32], mover: Side) -> f64 {
        match mover {
            Side::Attacker if capture.king_captured => WIN_SCORE,
            Side::Attacker => heuristic(successor),
            Side::Defender => {
                let escaped = successor
                    .king_square()
                    .is_some_and(|k| successor.variant().is_escape(k));
                if escaped {
                    WIN_SCORE
                } else {
                    -heuristic(successor)
                }
            }
        }
    }
}

/// Epsilon-greedy player: with probability `epsilon` plays a random move,
/// otherwise the move whose successor scores best. Ties are broken at random.
pub struct GreedyPlayer {
    name: String,
    epsilon: f64,
    rng: StdRng,
    scorer: Box<dyn MoveScorer>,
}

impl GreedyPlayer {
    pub fn new(scorer: Box<dyn MoveScorer>, epsilon: f64, seed: u64) -> Self {
        Self {
            name: format!("greedy-{epsilon}"),
            epsilon: epsilon.clamp(0.0, 1.0),
            rng: StdRng::seed_from_u64(seed),
            scorer,
        }
    }

    pub fn heuristic(epsilon: f64, seed: u64) -> Self {
        Self::new(Box::new(HeuristicScorer), epsilon, seed)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    fn best_moves(&self, game: &Game, moves: &[Move]) -> (Vec<Move>, f64) {
        let mover = game.side_to_move();
        let dims = game.board().dims();
        let past = game.history().last_moves(MOVE_WINDOW - 1);
        let mut best = Vec::new();
        let mut best_score = f64::NEG_INFINITY;
        for &mv in moves {
            let Ok((successor, capture)) = game.preview(mv) else {
                continue;
            };
            let mut window = past.clone();
            window.push(encode_move(mv, dims));
            let features = feature_tuple_with_moves(&successor, &window, mover);
            let score = self.scorer.score(&successor, &capture, &features, mover);
            if score > best_score {
                best_score = score;
                best.clear();
                best.push(mv);
            } else if score == best_score {
                best.push(mv);
            }
        }
        (best, best_score)
    }
}

impl Player for GreedyPlayer {
    fn choose_move(&mut self, game: &Game) -> MoveChoice {
        let moves = game.legal_moves();
        if moves.is_empty() {
            return MoveChoice::none();
        }

        if self.rng.gen::<f64>() < self.epsilon {
            trace!(player = %self.name, "exploring");
            return MoveChoice {
                best_move: moves.choose(&mut self.rng).copied(),
                score: 0.0,
                candidates: moves.len(),
            };
        }

        let (best, score) = self.best_moves(game, &moves);
        MoveChoice {
            best_move: best.choose(&mut self.rng).copied(),
            score,
            candidates: moves.len(),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
#[path = "players_tests.rs"]
mod players_tests;
