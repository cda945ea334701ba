//! Compact integer form of a move.
//!
//! `code = from_index * cells + to_index`, with square indices taken row-major.
//! The mapping depends only on the board dimensions, so codes are stable for a
//! variant and can be used as hash keys and as evaluator features. A legal move
//! never has `from == to`, so code `0` is free to act as padding.

use crate::error::MoveError;
use crate::types::{Dims, Move};

pub fn encode_move(mv: Move, dims: Dims) -> u32 {
    let cells = dims.cells() as u32;
    dims.index(mv.from) as u32 * cells + dims.index(mv.to) as u32
}

pub fn decode_move(code: u32, dims: Dims) -> Result<Move, MoveError> {
    let cells = dims.cells() as u32;
    if code >= cells * cells {
        return Err(MoveError::CodeOutOfRange {
            code,
            rows: dims.rows,
            cols: dims.cols,
        });
    }
    let from = dims.square((code / cells) as usize);
    let to = dims.square((code % cells) as usize);
    Ok(Move::new(from, to))
}

/// Number of distinct codes for `dims`; every valid code is below this.
pub fn code_space(dims: Dims) -> u32 {
    let cells = dims.cells() as u32;
    cells * cells
}

#[cfg(test)]
#[path = "codec_tests.rs"]
mod codec_tests;
