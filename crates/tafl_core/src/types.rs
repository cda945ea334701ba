use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Attacker,
    Defender,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Attacker => Side::Defender,
            Side::Defender => Side::Attacker,
        }
    }

    pub fn idx(self) -> usize {
        match self {
            Side::Attacker => 0,
            Side::Defender => 1,
        }
    }

    /// Side to move on the given zero-based turn. Attackers always open.
    pub fn for_turn(turn: u32) -> Side {
        if turn % 2 == 0 {
            Side::Attacker
        } else {
            Side::Defender
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Attacker => write!(f, "attacker"),
            Side::Defender => write!(f, "defender"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Piece {
    Attacker,
    Defender,
    King,
}

impl Piece {
    pub const ALL: [Piece; 3] = [Piece::Attacker, Piece::Defender, Piece::King];

    pub fn side(self) -> Side {
        match self {
            Piece::Attacker => Side::Attacker,
            Piece::Defender | Piece::King => Side::Defender,
        }
    }

    pub fn idx(self) -> usize {
        match self {
            Piece::Attacker => 0,
            Piece::Defender => 1,
            Piece::King => 2,
        }
    }

    pub fn is_king(self) -> bool {
        self == Piece::King
    }

    /// Diagram glyph used by variant layouts and `Board`'s `Display`.
    pub fn glyph(self) -> char {
        match self {
            Piece::Attacker => 'A',
            Piece::Defender => 'D',
            Piece::King => 'K',
        }
    }

    pub fn from_glyph(c: char) -> Option<Option<Piece>> {
        match c {
            '.' => Some(None),
            'A' | 'a' => Some(Some(Piece::Attacker)),
            'D' | 'd' => Some(Some(Piece::Defender)),
            'K' | 'k' => Some(Some(Piece::King)),
            _ => None,
        }
    }
}

/// A board coordinate. Row 0 is the top row of a diagram.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(u8, u8)", into = "(u8, u8)")]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Steps one square in `dir`, returning `None` when that leaves a
    /// `dims`-sized board.
    pub fn offset(self, dir: Direction, dims: Dims) -> Option<Square> {
        let (dr, dc) = dir.delta();
        let r = self.row as i16 + dr;
        let c = self.col as i16 + dc;
        if (0..dims.rows as i16).contains(&r) && (0..dims.cols as i16).contains(&c) {
            Some(Square::new(r as u8, c as u8))
        } else {
            None
        }
    }

    pub fn distance(self, other: Square) -> u32 {
        (self.row as i32 - other.row as i32).unsigned_abs()
            + (self.col as i32 - other.col as i32).unsigned_abs()
    }
}

impl From<(u8, u8)> for Square {
    fn from((row, col): (u8, u8)) -> Self {
        Square::new(row, col)
    }
}

impl From<Square> for (u8, u8) {
    fn from(sq: Square) -> Self {
        (sq.row, sq.col)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Board dimensions. Square indices are row-major: `row * cols + col`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dims {
    pub rows: u8,
    pub cols: u8,
}

impl Dims {
    pub const fn new(rows: u8, cols: u8) -> Self {
        Self { rows, cols }
    }

    pub fn cells(self) -> usize {
        self.rows as usize * self.cols as usize
    }

    pub fn contains(self, sq: Square) -> bool {
        sq.row < self.rows && sq.col < self.cols
    }

    pub fn index(self, sq: Square) -> usize {
        sq.row as usize * self.cols as usize + sq.col as usize
    }

    pub fn square(self, idx: usize) -> Square {
        let cols = self.cols as usize;
        Square::new((idx / cols) as u8, (idx % cols) as u8)
    }

    /// All squares in row-major order.
    pub fn squares(self) -> impl Iterator<Item = Square> {
        (0..self.cells()).map(move |i| self.square(i))
    }
}

/// Orthogonal directions in move-generation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    pub fn delta(self) -> (i16, i16) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }
}

/// A sliding move. Always orthogonal; `from != to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    pub fn is_orthogonal(self) -> bool {
        self.from != self.to && (self.from.row == self.to.row || self.from.col == self.to.col)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}
