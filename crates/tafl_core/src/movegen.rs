use crate::{board::Board, types::*};

/// Generate all legal moves for `side`, returning a freshly allocated vector.
///
/// Order is deterministic: sources row-major, then directions up, right,
/// down, left, then increasing distance along each ray.
pub fn legal_moves(board: &Board, side: Side) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    legal_moves_into(board, side, &mut out);
    out
}

/// Generate all legal moves into the provided buffer, reusing it across calls.
pub fn legal_moves_into(board: &Board, side: Side, out: &mut Vec<Move>) {
    out.clear();
    for (from, piece) in board.pieces(side) {
        gen_slides(board, from, piece, out);
    }
}

/// True if `side` has at least one legal move. Stops at the first one found.
pub fn has_legal_move(board: &Board, side: Side) -> bool {
    let dims = board.dims();
    let variant = board.variant();
    board.pieces(side).any(|(from, piece)| {
        Direction::ALL.iter().any(|&dir| {
            let mut cur = from;
            while let Some(to) = cur.offset(dir, dims) {
                if !board.is_empty(to) {
                    break;
                }
                if piece.is_king() || !variant.is_restricted(to) {
                    return true;
                }
                cur = to;
            }
            false
        })
    })
}

/// Moves of the single piece on `from`. Empty if the square is empty.
pub fn moves_from(board: &Board, from: Square) -> Vec<Move> {
    let mut out = Vec::new();
    if let Some(piece) = board.piece_at(from) {
        gen_slides(board, from, piece, &mut out);
    }
    out
}

/// Checks `mv` against the rules without enumerating every move: the source
/// holds a piece, the destination is empty and on the same line, nothing sits
/// in between, and only the king lands on a restricted square.
pub fn is_legal(board: &Board, mv: Move) -> bool {
    let dims = board.dims();
    if !dims.contains(mv.from) || !dims.contains(mv.to) || !mv.is_orthogonal() {
        return false;
    }
    let piece = match board.piece_at(mv.from) {
        Some(p) => p,
        None => return false,
    };
    if !piece.is_king() && board.variant().is_restricted(mv.to) {
        return false;
    }
    let dir = direction_between(mv.from, mv.to);
    let mut cur = mv.from;
    while let Some(next) = cur.offset(dir, dims) {
        if !board.is_empty(next) {
            return false;
        }
        if next == mv.to {
            return true;
        }
        cur = next;
    }
    false
}

fn direction_between(from: Square, to: Square) -> Direction {
    if from.row == to.row {
        if to.col > from.col {
            Direction::Right
        } else {
            Direction::Left
        }
    } else if to.row > from.row {
        Direction::Down
    } else {
        Direction::Up
    }
}

fn gen_slides(board: &Board, from: Square, piece: Piece, out: &mut Vec<Move>) {
    let dims = board.dims();
    let variant = board.variant();
    for dir in Direction::ALL {
        let mut cur = from;
        while let Some(to) = cur.offset(dir, dims) {
            if !board.is_empty(to) {
                break;
            }
            // Soldiers may slide across an empty restricted square but not stop on it.
            if piece.is_king() || !variant.is_restricted(to) {
                out.push(Move::new(from, to));
            }
            cur = to;
        }
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
