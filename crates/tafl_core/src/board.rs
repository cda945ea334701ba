use std::fmt;
use std::sync::Arc;

use crate::config::{check_placement, parse_diagram, Variant, VariantConfig};
use crate::error::{ConfigError, InvariantViolation};
use crate::types::*;
use crate::zobrist::ZOBRIST;

/// Mutable grid of piece occupancy plus the no-capture counter.
///
/// Cloning is cheap relative to move exploration: the cell vector is copied
/// and the variant is shared through its `Arc`.
#[derive(Clone, Debug)]
pub struct Board {
    variant: Arc<Variant>,
    cells: Vec<Option<Piece>>,
    /// Turns elapsed since the last capture.
    pub no_capture_count: u32,
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells
            && self.no_capture_count == other.no_capture_count
            && (Arc::ptr_eq(&self.variant, &other.variant)
                || self.variant.config() == other.variant.config())
    }
}

impl Eq for Board {}

impl Board {
    /// Validates `config` and lays out its starting position.
    pub fn new(config: VariantConfig) -> Result<Self, ConfigError> {
        Ok(Self::from_variant(Arc::new(Variant::new(config)?)))
    }

    /// Starting position of an already validated variant.
    pub fn from_variant(variant: Arc<Variant>) -> Self {
        let cells = variant.initial_cells().to_vec();
        Self {
            variant,
            cells,
            no_capture_count: 0,
        }
    }

    /// Builds an arbitrary position from diagram rows (`.`, `A`, `D`, `K`).
    ///
    /// The diagram must fit the variant's dimensions and hold exactly one king;
    /// soldiers may not stand on restricted squares and nothing may stand on an
    /// escape square.
    pub fn from_diagram<S: AsRef<str>>(
        config: VariantConfig,
        rows: &[S],
    ) -> Result<Self, ConfigError> {
        let variant = Arc::new(Variant::new(config)?);
        Self::from_diagram_in(variant, rows)
    }

    pub fn from_diagram_in<S: AsRef<str>>(
        variant: Arc<Variant>,
        rows: &[S],
    ) -> Result<Self, ConfigError> {
        let dims = variant.dims();
        let cells = parse_diagram(dims, rows)?;
        let kinds: Vec<_> = dims.squares().map(|sq| variant.kind(sq)).collect();
        check_placement(dims, &kinds, &cells)?;
        Ok(Self {
            variant,
            cells,
            no_capture_count: 0,
        })
    }

    /// A fresh board at the variant's starting position.
    pub fn initial(&self) -> Board {
        Board::from_variant(Arc::clone(&self.variant))
    }

    pub fn variant(&self) -> &Arc<Variant> {
        &self.variant
    }

    pub fn config(&self) -> &VariantConfig {
        self.variant.config()
    }

    #[inline]
    pub fn dims(&self) -> Dims {
        self.variant.dims()
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.cells[self.dims().index(sq)]
    }

    /// Raw cell write. Does not enforce the one-king invariant; the next
    /// mutating engine operation does.
    pub fn set_piece(&mut self, sq: Square, pc: Option<Piece>) {
        let idx = self.dims().index(sq);
        self.cells[idx] = pc;
    }

    pub fn cells(&self) -> &[Option<Piece>] {
        &self.cells
    }

    pub fn is_empty(&self, sq: Square) -> bool {
        self.piece_at(sq).is_none()
    }

    pub fn king_square(&self) -> Option<Square> {
        self.cells
            .iter()
            .position(|c| *c == Some(Piece::King))
            .map(|i| self.dims().square(i))
    }

    pub fn count(&self, piece: Piece) -> usize {
        self.cells.iter().filter(|c| **c == Some(piece)).count()
    }

    /// Squares and pieces belonging to `side`, row-major.
    pub fn pieces(&self, side: Side) -> impl Iterator<Item = (Square, Piece)> + '_ {
        let dims = self.dims();
        self.cells.iter().enumerate().filter_map(move |(i, c)| match c {
            Some(p) if p.side() == side => Some((dims.square(i), *p)),
            _ => None,
        })
    }

    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let kings = self.count(Piece::King);
        if kings == 1 {
            Ok(())
        } else {
            Err(InvariantViolation { kings })
        }
    }

    /// Panics with the violation message if the board is corrupted.
    pub(crate) fn assert_invariants(&self) {
        if let Err(violation) = self.check_invariants() {
            panic!("{violation}");
        }
    }

    /// Zobrist key of the occupancy plus the side to move.
    pub fn position_key(&self, side_to_move: Side) -> u64 {
        let mut h = 0u64;
        for (i, cell) in self.cells.iter().enumerate() {
            if let Some(pc) = cell {
                h ^= ZOBRIST.piece_key(*pc, i);
            }
        }
        if side_to_move == Side::Defender {
            h ^= ZOBRIST.side_to_move;
        }
        h
    }

    /// True when both boards have identical occupancy.
    pub fn same_position(&self, other: &Board) -> bool {
        self.cells == other.cells
    }

    pub fn to_diagram(&self) -> Vec<String> {
        let cols = self.dims().cols as usize;
        self.cells
            .chunks(cols)
            .map(|row| {
                row.iter()
                    .map(|c| c.map(Piece::glyph).unwrap_or('.'))
                    .collect()
            })
            .collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.to_diagram() {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
