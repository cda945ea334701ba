pub mod board;
pub mod capture;
pub mod codec;
pub mod config;
pub mod endgame;
pub mod error;
pub mod eval;
pub mod features;
pub mod game;
pub mod history;
pub mod movegen;
pub mod types;
pub mod zobrist;

// Re-export core game logic (not player-specific)
pub use board::*;
pub use capture::*;
pub use codec::*;
pub use config::*;
pub use endgame::*;
pub use error::*;
pub use eval::*;
pub use features::*;
pub use game::*;
pub use history::*;
pub use movegen::*;
pub use types::*;
pub use zobrist::ZOBRIST;

// =============================================================================
// Player trait: implemented by every move chooser (random, greedy, learned)
// =============================================================================

/// Result of a move choice
#[derive(Debug, Clone)]
pub struct MoveChoice {
    /// The chosen move (None if the side to move has no legal moves)
    pub best_move: Option<Move>,
    /// Score the player assigned to the chosen move
    pub score: f64,
    /// Number of candidate moves considered
    pub candidates: usize,
}

impl MoveChoice {
    pub fn none() -> Self {
        Self {
            best_move: None,
            score: 0.0,
            candidates: 0,
        }
    }
}

/// Trait that all players must implement.
///
/// Players only read the game; the match runner owns it and applies the
/// chosen move, so exploring candidates can never disturb the real state.
pub trait Player: Send {
    /// Pick a move for the side to move in `game`.
    fn choose_move(&mut self, game: &Game) -> MoveChoice;

    /// Returns the player's name for reports
    fn name(&self) -> &str;

    /// Reset internal state for a new game
    fn new_game(&mut self) {}
}
