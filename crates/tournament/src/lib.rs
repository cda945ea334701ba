//! Tournament Runner for ML-tafl
//!
//! This crate provides infrastructure for:
//! - Baseline players (uniform random, epsilon-greedy over a move scorer)
//! - Playing single games and role-alternating matches
//! - Round-robin tournaments with win/draw/loss scoring
//! - Outcome statistics per visited state, for training learned evaluators
//!
//! # Usage
//!
//! ```no_run
//! use tournament::{GreedyPlayer, MatchConfig, MatchRunner, RandomPlayer};
//! use tafl_core::VariantConfig;
//!
//! let runner = MatchRunner::from_config(VariantConfig::brandubh(), MatchConfig::default())?;
//! let mut random = RandomPlayer::new(1);
//! let mut greedy = GreedyPlayer::heuristic(0.1, 2);
//! let stats = runner.play_n_matches(&mut greedy, &mut random)?;
//! println!("{stats}");
//! # Ok::<(), tournament::TournamentError>(())
//! ```

mod error;
mod match_runner;
mod players;
mod results;
mod state_table;

pub use error::*;
pub use match_runner::*;
pub use players::*;
pub use results::*;
pub use state_table::*;
