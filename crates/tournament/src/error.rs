use thiserror::Error;

use tafl_core::{ConfigError, GameOutcome, MoveError};

#[derive(Debug, Error)]
pub enum TournamentError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("illegal move from {player}: {source}")]
    IllegalMove {
        player: String,
        #[source]
        source: MoveError,
    },

    #[error("{player} returned no move on turn {turn} with legal moves available")]
    NoMove { player: String, turn: u32 },

    #[error("replaying recorded game failed: {0}")]
    Replay(MoveError),

    #[error("recorded outcome {recorded} does not match replayed outcome {replayed}")]
    OutcomeMismatch {
        recorded: GameOutcome,
        replayed: GameOutcome,
    },

    #[error("a round robin needs at least two players, got {0}")]
    TooFewPlayers(usize),

    #[error("i/o error on {path}: {message}")]
    Io { path: String, message: String },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TournamentError {
    pub(crate) fn io(path: &std::path::Path, err: std::io::Error) -> Self {
        TournamentError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}
