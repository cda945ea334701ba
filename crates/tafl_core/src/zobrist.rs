//! Zobrist hashing for Tafl positions.
//!
//! `History` stores one key per ply, so repetition detection is a scan over
//! 64-bit keys instead of a replay of the game.
//!
//! The hash is computed by XOR-ing together random values for:
//! - Each piece kind on each square (3 kinds × up to 19×19 squares)
//! - Defender to move (1 value)

use crate::config::MAX_EDGE;
use crate::types::Piece;

/// Largest number of cells on any supported board.
pub const MAX_CELLS: usize = MAX_EDGE as usize * MAX_EDGE as usize;

/// Pre-computed random values for Zobrist hashing.
/// Generated using a fixed seed for reproducibility.
pub struct ZobristKeys {
    /// Indexed by [piece][square index]
    pub pieces: [[u64; MAX_CELLS]; 3],
    /// XOR-ed in when the defender is to move
    pub side_to_move: u64,
}

impl Default for ZobristKeys {
    fn default() -> Self {
        Self::new()
    }
}

impl ZobristKeys {
    /// Generate keys with xorshift64 from a fixed seed.
    pub const fn new() -> Self {
        const fn xorshift64(mut state: u64) -> u64 {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        }

        let mut state = 0x7AF1_5EED_0BAD_C0DEu64;

        let mut pieces = [[0u64; MAX_CELLS]; 3];
        let mut piece = 0;
        while piece < 3 {
            let mut sq = 0;
            while sq < MAX_CELLS {
                state = xorshift64(state);
                pieces[piece][sq] = state;
                sq += 1;
            }
            piece += 1;
        }

        state = xorshift64(state);
        let side_to_move = state;

        ZobristKeys {
            pieces,
            side_to_move,
        }
    }

    #[inline(always)]
    pub fn piece_key(&self, piece: Piece, idx: usize) -> u64 {
        self.pieces[piece.idx()][idx]
    }
}

/// Global static Zobrist keys, computed at compile time.
pub static ZOBRIST: ZobristKeys = ZobristKeys::new();

#[cfg(test)]
#[path = "zobrist_tests.rs"]
mod zobrist_tests;
