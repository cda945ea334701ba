use tracing::warn;

use crate::board::Board;
use crate::capture::apply;
use crate::codec::{decode_move, encode_move};
use crate::types::{Move, Side};

/// Append-only record of a game: the starting position, every encoded move
/// played from it, and the position key reached after each move. Attackers
/// move first from the starting position.
///
/// `keys[i]` is the key of the position after `i` moves with the side to move
/// in it folded in, so `keys[0]` belongs to the start.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct History {
    start: Board,
    moves: Vec<u32>,
    keys: Vec<u64>,
}

impl History {
    pub fn new(start: &Board) -> Self {
        Self {
            start: start.clone(),
            moves: Vec::new(),
            keys: vec![start.position_key(Side::Attacker)],
        }
    }

    /// Records `code` and the position `after` it produced.
    pub fn push(&mut self, code: u32, after: &Board) {
        self.moves.push(code);
        let to_move = Side::for_turn(self.moves.len() as u32);
        self.keys.push(after.position_key(to_move));
    }

    pub fn push_move(&mut self, mv: Move, after: &Board) {
        let code = encode_move(mv, self.start.dims());
        self.push(code, after);
    }

    pub fn start(&self) -> &Board {
        &self.start
    }

    pub fn moves(&self) -> &[u32] {
        &self.moves
    }

    /// Position keys, one more than there are moves.
    pub fn keys(&self) -> &[u64] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// The last `n` codes, left-padded with zeros when fewer were played.
    pub fn last_moves(&self, n: usize) -> Vec<u32> {
        let tail = &self.moves[self.moves.len().saturating_sub(n)..];
        let mut out = vec![0; n - tail.len()];
        out.extend_from_slice(tail);
        out
    }

    /// Replays the first `plies` moves, calling `visit` with each position
    /// reached (the start included) and the side to move in it. Returns the
    /// last position reached.
    ///
    /// Stops early at the first code that does not decode to a legal move.
    pub fn replay(&self, plies: usize, mut visit: impl FnMut(&Board, Side)) -> Board {
        let dims = self.start.dims();
        let mut board = self.start.clone();
        visit(&board, Side::Attacker);
        for (turn, &code) in self.moves.iter().take(plies).enumerate() {
            let applied = decode_move(code, dims).and_then(|mv| apply(&mut board, mv));
            if let Err(e) = applied {
                warn!(turn, code, error = %e, "history replay stopped");
                return board;
            }
            visit(&board, Side::for_turn(turn as u32 + 1));
        }
        board
    }

    /// Board after every recorded move.
    pub fn final_board(&self) -> Board {
        self.replay(self.moves.len(), |_, _| {})
    }
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod history_tests;
