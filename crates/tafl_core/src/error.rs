//! Error types for the rules engine.
//!
//! `ConfigError` and `MoveError` are recoverable and returned through `Result`.
//! `InvariantViolation` describes a corrupted board; it is raised as a panic
//! from the operation that produced it.

use thiserror::Error;

use crate::types::{Move, Piece, Square};

/// A malformed `VariantConfig` or board diagram.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("board dimensions {rows}x{cols} are invalid (1..=19 each)")]
    InvalidDimensions { rows: u32, cols: u32 },

    #[error("{what} square {square} lies outside the board")]
    SquareOffBoard { what: &'static str, square: Square },

    #[error("variant defines no escape squares")]
    NoEscapeSquares,

    #[error("escape square {0} is not in the restricted set")]
    EscapeNotRestricted(Square),

    #[error("layout has {found} rows, expected {expected}")]
    LayoutRowCount { expected: usize, found: usize },

    #[error("layout row {row} has {found} cells, expected {expected}")]
    LayoutRowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown layout glyph {glyph:?} at {square}")]
    UnknownGlyph { glyph: char, square: Square },

    #[error("layout must contain exactly one king, found {0}")]
    KingCount(usize),

    #[error("{piece:?} may not start on restricted square {square}")]
    PieceOnRestricted { piece: Piece, square: Square },

    #[error("king capture requires 2..=4 hostile sides, got {0}")]
    KingSurround(u8),

    #[error("{0} must be positive")]
    NonPositiveLimit(&'static str),

    #[error("failed to read variant file: {0}")]
    Io(String),

    #[error("failed to parse variant TOML: {0}")]
    Parse(String),
}

/// A move rejected by the engine. The board is left unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("illegal move: {0}")]
    InvalidMove(Move),

    #[error("move code {code} is out of range for a {rows}x{cols} board")]
    CodeOutOfRange { code: u32, rows: u8, cols: u8 },

    #[error("piece on {0} does not belong to the side to move")]
    WrongSide(Square),

    #[error("game is already over")]
    GameOver,
}

/// A board that no longer holds exactly one king.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invariant violation: board holds {kings} kings, expected exactly 1")]
pub struct InvariantViolation {
    pub kings: usize,
}
