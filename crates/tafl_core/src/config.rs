//! Variant configuration.
//!
//! A `VariantConfig` is the raw, serde-friendly description of a rule set. It is
//! validated once into a [`Variant`], which adds per-square lookup tables and the
//! decoded starting layout. Boards share a `Variant` through an `Arc`; it never
//! changes for the lifetime of a game.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::types::{Dims, Piece, Square};

/// Largest supported board edge.
pub const MAX_EDGE: u8 = 19;

/// Geometry parameters for custodian and king capture.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureRules {
    /// Number of orthogonal sides that must be hostile for the king to fall.
    /// `2` means plain custodian capture along the mover's axis.
    pub king_surround: u8,
    /// The board edge acts as an anchor (for soldiers and the king alike).
    pub edge_is_hostile: bool,
    /// Empty restricted squares (throne, corners) act as anchors.
    pub restricted_is_hostile: bool,
    /// The king counts as a defender anchor and may capture when moving.
    pub king_is_armed: bool,
}

impl Default for CaptureRules {
    fn default() -> Self {
        Self {
            king_surround: 4,
            edge_is_hostile: false,
            restricted_is_hostile: true,
            king_is_armed: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantConfig {
    pub name: String,
    pub rows: u8,
    pub cols: u8,
    pub throne: Square,
    pub escape_squares: BTreeSet<Square>,
    pub restricted_squares: BTreeSet<Square>,
    /// One string per row using `.`, `A`, `D` and `K`.
    pub layout: Vec<String>,
    pub no_capture_limit: u32,
    pub turn_limit: u32,
    #[serde(default)]
    pub capture: CaptureRules,
}

impl Default for VariantConfig {
    fn default() -> Self {
        Self::brandubh()
    }
}

fn corners(rows: u8, cols: u8) -> BTreeSet<Square> {
    [
        Square::new(0, 0),
        Square::new(0, cols - 1),
        Square::new(rows - 1, 0),
        Square::new(rows - 1, cols - 1),
    ]
    .into_iter()
    .collect()
}

fn layout(rows: &[&str]) -> Vec<String> {
    rows.iter().map(|r| r.to_string()).collect()
}

impl VariantConfig {
    /// 7x7 cross layout with corner escapes and a king-only throne.
    pub fn brandubh() -> Self {
        let throne = Square::new(3, 3);
        let escape_squares = corners(7, 7);
        let mut restricted_squares = escape_squares.clone();
        restricted_squares.insert(throne);
        Self {
            name: "brandubh".to_string(),
            rows: 7,
            cols: 7,
            throne,
            escape_squares,
            restricted_squares,
            layout: layout(&[
                "...A...",
                "...A...",
                "...D...",
                "AADKDAA",
                "...D...",
                "...A...",
                "...A...",
            ]),
            no_capture_limit: 50,
            turn_limit: 150,
            capture: CaptureRules::default(),
        }
    }

    /// 9x9 Tablut layout with corner escapes.
    pub fn tablut() -> Self {
        let throne = Square::new(4, 4);
        let escape_squares = corners(9, 9);
        let mut restricted_squares = escape_squares.clone();
        restricted_squares.insert(throne);
        Self {
            name: "tablut".to_string(),
            rows: 9,
            cols: 9,
            throne,
            escape_squares,
            restricted_squares,
            layout: layout(&[
                "...AAA...",
                "....A....",
                "....D....",
                "A...D...A",
                "AADDKDDAA",
                "A...D...A",
                "....D....",
                "....A....",
                "...AAA...",
            ]),
            no_capture_limit: 80,
            turn_limit: 250,
            capture: CaptureRules::default(),
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&contents)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn dims(&self) -> Dims {
        Dims::new(self.rows, self.cols)
    }

    /// Checks every structural constraint without building anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Variant::new(self.clone()).map(|_| ())
    }
}

/// Per-square classification derived from the config.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SquareKind {
    pub restricted: bool,
    pub escape: bool,
    pub throne: bool,
}

/// A validated `VariantConfig` plus lookup tables.
#[derive(Clone, Debug)]
pub struct Variant {
    config: VariantConfig,
    kinds: Vec<SquareKind>,
    initial: Vec<Option<Piece>>,
}

impl Variant {
    pub fn new(config: VariantConfig) -> Result<Self, ConfigError> {
        let (rows, cols) = (config.rows, config.cols);
        if rows == 0 || cols == 0 || rows > MAX_EDGE || cols > MAX_EDGE {
            return Err(ConfigError::InvalidDimensions {
                rows: rows as u32,
                cols: cols as u32,
            });
        }
        let dims = config.dims();

        let on_board = |what: &'static str, square: Square| {
            if dims.contains(square) {
                Ok(())
            } else {
                Err(ConfigError::SquareOffBoard { what, square })
            }
        };
        on_board("throne", config.throne)?;
        for &sq in &config.restricted_squares {
            on_board("restricted", sq)?;
        }
        if config.escape_squares.is_empty() {
            return Err(ConfigError::NoEscapeSquares);
        }
        for &sq in &config.escape_squares {
            on_board("escape", sq)?;
            if !config.restricted_squares.contains(&sq) {
                return Err(ConfigError::EscapeNotRestricted(sq));
            }
        }

        let surround = config.capture.king_surround;
        if !(2..=4).contains(&surround) {
            return Err(ConfigError::KingSurround(surround));
        }
        if config.no_capture_limit == 0 {
            return Err(ConfigError::NonPositiveLimit("no_capture_limit"));
        }
        if config.turn_limit == 0 {
            return Err(ConfigError::NonPositiveLimit("turn_limit"));
        }

        let mut kinds = vec![SquareKind::default(); dims.cells()];
        for &sq in &config.restricted_squares {
            kinds[dims.index(sq)].restricted = true;
        }
        for &sq in &config.escape_squares {
            kinds[dims.index(sq)].escape = true;
        }
        kinds[dims.index(config.throne)].throne = true;

        let initial = parse_diagram(dims, &config.layout)?;
        check_placement(dims, &kinds, &initial)?;

        debug!(
            variant = %config.name,
            rows,
            cols,
            king_surround = surround,
            "variant validated"
        );

        Ok(Self {
            config,
            kinds,
            initial,
        })
    }

    pub fn config(&self) -> &VariantConfig {
        &self.config
    }

    pub fn dims(&self) -> Dims {
        self.config.dims()
    }

    pub fn capture(&self) -> &CaptureRules {
        &self.config.capture
    }

    #[inline]
    pub fn kind(&self, sq: Square) -> SquareKind {
        self.kinds[self.dims().index(sq)]
    }

    pub fn is_restricted(&self, sq: Square) -> bool {
        self.kind(sq).restricted
    }

    pub fn is_escape(&self, sq: Square) -> bool {
        self.kind(sq).escape
    }

    pub fn throne(&self) -> Square {
        self.config.throne
    }

    pub fn escape_squares(&self) -> impl Iterator<Item = Square> + '_ {
        self.config.escape_squares.iter().copied()
    }

    /// Decoded starting layout, one cell per square in row-major order.
    pub fn initial_cells(&self) -> &[Option<Piece>] {
        &self.initial
    }

    /// The starting layout as a `square -> piece` list.
    pub fn initial_layout(&self) -> Vec<(Square, Piece)> {
        let dims = self.dims();
        self.initial
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.map(|p| (dims.square(i), p)))
            .collect()
    }
}

/// Decodes diagram rows into row-major cells.
pub(crate) fn parse_diagram<S: AsRef<str>>(
    dims: Dims,
    rows: &[S],
) -> Result<Vec<Option<Piece>>, ConfigError> {
    if rows.len() != dims.rows as usize {
        return Err(ConfigError::LayoutRowCount {
            expected: dims.rows as usize,
            found: rows.len(),
        });
    }
    let mut cells = Vec::with_capacity(dims.cells());
    for (r, row) in rows.iter().enumerate() {
        let row = row.as_ref().trim();
        let width = row.chars().count();
        if width != dims.cols as usize {
            return Err(ConfigError::LayoutRowWidth {
                row: r,
                expected: dims.cols as usize,
                found: width,
            });
        }
        for (c, glyph) in row.chars().enumerate() {
            let cell = Piece::from_glyph(glyph).ok_or(ConfigError::UnknownGlyph {
                glyph,
                square: Square::new(r as u8, c as u8),
            })?;
            cells.push(cell);
        }
    }
    Ok(cells)
}

/// Exactly one king; soldiers off restricted squares; nothing on an escape square.
pub(crate) fn check_placement(
    dims: Dims,
    kinds: &[SquareKind],
    cells: &[Option<Piece>],
) -> Result<(), ConfigError> {
    let kings = cells.iter().filter(|c| **c == Some(Piece::King)).count();
    if kings != 1 {
        return Err(ConfigError::KingCount(kings));
    }
    for (i, cell) in cells.iter().enumerate() {
        if let Some(piece) = *cell {
            let kind = kinds[i];
            if kind.escape || (kind.restricted && !piece.is_king()) {
                return Err(ConfigError::PieceOnRestricted {
                    piece,
                    square: dims.square(i),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
