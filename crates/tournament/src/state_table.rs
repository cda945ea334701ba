//! Outcome counts per visited state.
//!
//! Keys are [`tafl_core::state_key`] strings of the feature tuple, values are
//! `[attacker wins, draws, defender wins]` over every recorded game that
//! passed through the state. The table is plain owned data; callers decide
//! when to load, update and save it.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use tafl_core::{state_key, Game, GameOutcome, Side, Variant};

use crate::error::TournamentError;
use crate::match_runner::GameRecord;

pub const ATTACKER_WINS: usize = 0;
pub const DRAWS: usize = 1;
pub const DEFENDER_WINS: usize = 2;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateTable {
    entries: BTreeMap<String, [u32; 3]>,
}

fn outcome_slot(outcome: GameOutcome) -> Option<usize> {
    match outcome {
        GameOutcome::Ongoing => None,
        GameOutcome::AttackerWin(_) => Some(ATTACKER_WINS),
        GameOutcome::Draw(_) => Some(DRAWS),
        GameOutcome::DefenderWin(_) => Some(DEFENDER_WINS),
    }
}

impl StateTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<[u32; 3]> {
        self.entries.get(key).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u32; 3])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Adds one result for `key`.
    pub fn bump(&mut self, key: String, outcome: GameOutcome) {
        if let Some(slot) = outcome_slot(outcome) {
            self.entries.entry(key).or_insert([0; 3])[slot] += 1;
        }
    }

    /// Replays `record` from the variant's starting position and credits its
    /// outcome to every state the game visited, the final one included.
    /// Returns the number of states credited.
    ///
    /// Nothing is credited when a move fails to replay or the replayed game
    /// ends differently from the record.
    pub fn record_game(
        &mut self,
        variant: &Arc<Variant>,
        record: &GameRecord,
    ) -> Result<usize, TournamentError> {
        if !record.outcome.is_over() {
            return Ok(0);
        }
        let mut game = Game::from_variant(Arc::clone(variant));
        let mut visited = vec![state_key(&game.features())];
        for &code in &record.moves {
            game.play_code(code).map_err(TournamentError::Replay)?;
            visited.push(state_key(&game.features()));
        }
        if game.outcome() != record.outcome {
            debug!(
                recorded = %record.outcome,
                replayed = %game.outcome(),
                "replayed outcome differs from record"
            );
            return Err(TournamentError::OutcomeMismatch {
                recorded: record.outcome,
                replayed: game.outcome(),
            });
        }

        let count = visited.len();
        for key in visited {
            self.bump(key, record.outcome);
        }
        Ok(count)
    }

    /// Adds every count from `other`.
    pub fn merge(&mut self, other: &StateTable) {
        for (key, counts) in &other.entries {
            let entry = self.entries.entry(key.clone()).or_insert([0; 3]);
            for (dst, src) in entry.iter_mut().zip(counts) {
                *dst += src;
            }
        }
    }

    /// Empirical score of `key` for `side` in `[-1, 1]`: wins minus losses
    /// over games seen. `None` for unseen states.
    pub fn value(&self, key: &str, side: Side) -> Option<f64> {
        let [atk, draws, def] = self.get(key)?;
        let total = (atk + draws + def) as f64;
        if total == 0.0 {
            return None;
        }
        let diff = atk as f64 - def as f64;
        Some(match side {
            Side::Attacker => diff / total,
            Side::Defender => -diff / total,
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), TournamentError> {
        let json = serde_json::to_string(self)?;
        std::fs::write(path, json).map_err(|e| TournamentError::io(path, e))
    }

    pub fn load(path: &Path) -> Result<Self, TournamentError> {
        let contents = std::fs::read_to_string(path).map_err(|e| TournamentError::io(path, e))?;
        Ok(serde_json::from_str(&contents)?)
    }
}

#[cfg(test)]
#[path = "state_table_tests.rs"]
mod state_table_tests;
