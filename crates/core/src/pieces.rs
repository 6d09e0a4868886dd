//! Pieces module - piece shapes, rotation tables and spawn data
//!
//! Every piece kind is described by a square bitmask per rotation. Insets and
//! spawn positions are derived from the bitmasks by `const` evaluation, so the
//! whole registry is fixed at compile time and lookups are plain array reads.
//!
//! Bit `row * dimension + col` of a rotation mask is set when that local cell
//! is filled.

use crate::types::{PieceKind, Rotation, BOARD_WIDTH};

/// Lowest colour channel value; keeps room for dark shading.
pub const COLOR_MIN: u8 = 35;

/// Highest colour channel value; keeps room for light shading.
pub const COLOR_MAX: u8 = 255 - COLOR_MIN;

/// Empty columns/rows between each bounding-box edge and the first filled cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Insets {
    pub left: u8,
    pub right: u8,
    pub top: u8,
    pub bottom: u8,
}

/// Immutable description of one piece kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceDefinition {
    kind: PieceKind,
    dimension: u8,
    cols: u8,
    rows: u8,
    color: [u8; 3],
    tiles: [u16; 4],
    insets: [Insets; 4],
    spawn_col: i8,
    spawn_row: i8,
}

impl PieceDefinition {
    const fn new(
        kind: PieceKind,
        dimension: u8,
        cols: u8,
        rows: u8,
        color: [u8; 3],
        tiles: [u16; 4],
    ) -> Self {
        let insets = [
            compute_insets(tiles[0], dimension),
            compute_insets(tiles[1], dimension),
            compute_insets(tiles[2], dimension),
            compute_insets(tiles[3], dimension),
        ];
        Self {
            kind,
            dimension,
            cols,
            rows,
            color,
            tiles,
            insets,
            spawn_col: (BOARD_WIDTH / 2) as i8 - (dimension / 2) as i8,
            spawn_row: insets[0].top as i8,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Side length of the square bitmask (2-4).
    pub fn dimension(&self) -> u8 {
        self.dimension
    }

    /// Logical width at the canonical rotation.
    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Logical height at the canonical rotation.
    pub fn rows(&self) -> u8 {
        self.rows
    }

    /// Base RGB colour of the piece's tiles.
    pub fn base_color(&self) -> [u8; 3] {
        self.color
    }

    /// Whether the local cell `(col, row)` is filled at `rotation`.
    ///
    /// Cells outside the bitmask are never filled.
    #[inline]
    pub fn is_tile(&self, col: i8, row: i8, rotation: Rotation) -> bool {
        let dim = self.dimension as i8;
        if col < 0 || row < 0 || col >= dim || row >= dim {
            return false;
        }
        let bit = (row as u16) * (dim as u16) + (col as u16);
        self.tiles[rotation.index()] & (1 << bit) != 0
    }

    #[inline]
    pub fn insets(&self, rotation: Rotation) -> Insets {
        self.insets[rotation.index()]
    }

    /// Column a freshly spawned piece starts in: `5 - dimension / 2`.
    pub fn spawn_column(&self) -> i8 {
        self.spawn_col
    }

    /// Row a freshly spawned piece starts in: the top inset at rotation 0.
    pub fn spawn_row(&self) -> i8 {
        self.spawn_row
    }

    /// Local `(col, row)` coordinates of every filled cell at `rotation`.
    pub fn cells(&self, rotation: Rotation) -> impl Iterator<Item = (i8, i8)> + '_ {
        let dim = self.dimension as i8;
        (0..dim)
            .flat_map(move |row| (0..dim).map(move |col| (col, row)))
            .filter(move |&(col, row)| self.is_tile(col, row, rotation))
    }
}

/// Parse a square pattern (`#` filled, anything else empty) into a bitmask.
const fn mask(rows: &[&str]) -> u16 {
    let dim = rows.len();
    let mut bits = 0u16;
    let mut y = 0;
    while y < dim {
        let row = rows[y].as_bytes();
        let mut x = 0;
        while x < dim {
            if row[x] == b'#' {
                bits |= 1u16 << (y * dim + x);
            }
            x += 1;
        }
        y += 1;
    }
    bits
}

const fn compute_insets(tiles: u16, dimension: u8) -> Insets {
    let dim = dimension as usize;
    let mut min_col = dim;
    let mut max_col = 0;
    let mut min_row = dim;
    let mut max_row = 0;

    let mut y = 0;
    while y < dim {
        let mut x = 0;
        while x < dim {
            if tiles & (1u16 << (y * dim + x)) != 0 {
                if x < min_col {
                    min_col = x;
                }
                if x > max_col {
                    max_col = x;
                }
                if y < min_row {
                    min_row = y;
                }
                if y > max_row {
                    max_row = y;
                }
            }
            x += 1;
        }
        y += 1;
    }

    Insets {
        left: min_col as u8,
        right: (dim - 1 - max_col) as u8,
        top: min_row as u8,
        bottom: (dim - 1 - max_row) as u8,
    }
}

static DEFINITIONS: [PieceDefinition; PieceKind::COUNT] = [
    PieceDefinition::new(
        PieceKind::I,
        4,
        4,
        1,
        [COLOR_MIN, COLOR_MAX, COLOR_MAX],
        [
            mask(&["....", "####", "....", "...."]),
            mask(&["..#.", "..#.", "..#.", "..#."]),
            mask(&["....", "....", "####", "...."]),
            mask(&[".#..", ".#..", ".#..", ".#.."]),
        ],
    ),
    PieceDefinition::new(
        PieceKind::J,
        3,
        3,
        2,
        [COLOR_MIN, COLOR_MIN, COLOR_MAX],
        [
            mask(&["#..", "###", "..."]),
            mask(&[".##", ".#.", ".#."]),
            mask(&["...", "###", "..#"]),
            mask(&[".#.", ".#.", "##."]),
        ],
    ),
    PieceDefinition::new(
        PieceKind::L,
        3,
        3,
        2,
        [COLOR_MAX, 127, COLOR_MIN],
        [
            mask(&["..#", "###", "..."]),
            mask(&[".#.", ".#.", ".##"]),
            mask(&["...", "###", "#.."]),
            mask(&["##.", ".#.", ".#."]),
        ],
    ),
    PieceDefinition::new(
        PieceKind::O,
        2,
        2,
        2,
        [COLOR_MAX, COLOR_MAX, COLOR_MIN],
        [
            mask(&["##", "##"]),
            mask(&["##", "##"]),
            mask(&["##", "##"]),
            mask(&["##", "##"]),
        ],
    ),
    PieceDefinition::new(
        PieceKind::S,
        3,
        3,
        2,
        [COLOR_MIN, COLOR_MAX, COLOR_MIN],
        [
            mask(&[".##", "##.", "..."]),
            mask(&[".#.", ".##", "..#"]),
            mask(&["...", ".##", "##."]),
            mask(&["#..", "##.", ".#."]),
        ],
    ),
    PieceDefinition::new(
        PieceKind::T,
        3,
        3,
        2,
        [128, COLOR_MIN, 128],
        [
            mask(&[".#.", "###", "..."]),
            mask(&[".#.", ".##", ".#."]),
            mask(&["...", "###", ".#."]),
            mask(&[".#.", "##.", ".#."]),
        ],
    ),
    PieceDefinition::new(
        PieceKind::Z,
        3,
        3,
        2,
        [COLOR_MAX, COLOR_MIN, COLOR_MIN],
        [
            mask(&["##.", ".##", "..."]),
            mask(&["..#", ".##", ".#."]),
            mask(&["...", "##.", ".##"]),
            mask(&[".#.", "##.", "#.."]),
        ],
    ),
];

/// Registry entry for a piece kind.
#[inline]
pub fn definition(kind: PieceKind) -> &'static PieceDefinition {
    &DEFINITIONS[kind.index()]
}

/// Whether local cell `(col, row)` of `kind` is filled at `rotation`.
pub fn is_tile(kind: PieceKind, col: i8, row: i8, rotation: Rotation) -> bool {
    definition(kind).is_tile(col, row, rotation)
}

pub fn insets(kind: PieceKind, rotation: Rotation) -> Insets {
    definition(kind).insets(rotation)
}

pub fn spawn_column(kind: PieceKind) -> i8 {
    definition(kind).spawn_column()
}

pub fn spawn_row(kind: PieceKind) -> i8 {
    definition(kind).spawn_row()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_is_indexed_by_ordinal() {
        for kind in PieceKind::ALL {
            assert_eq!(definition(kind).kind(), kind);
        }
    }

    #[test]
    fn every_rotation_has_four_tiles() {
        for kind in PieceKind::ALL {
            for rotation in Rotation::ALL {
                assert_eq!(
                    definition(kind).cells(rotation).count(),
                    4,
                    "{:?} {:?}",
                    kind,
                    rotation
                );
            }
        }
    }

    #[test]
    fn mask_reads_row_major() {
        assert_eq!(mask(&["#.", ".."]), 0b0001);
        assert_eq!(mask(&[".#", ".."]), 0b0010);
        assert_eq!(mask(&["..", "#."]), 0b0100);
    }

    #[test]
    fn i_piece_insets() {
        let def = definition(PieceKind::I);
        assert_eq!(
            def.insets(Rotation::R0),
            Insets {
                left: 0,
                right: 0,
                top: 1,
                bottom: 2
            }
        );
        assert_eq!(
            def.insets(Rotation::R1),
            Insets {
                left: 2,
                right: 1,
                top: 0,
                bottom: 0
            }
        );
    }

    #[test]
    fn spawn_positions() {
        assert_eq!(spawn_column(PieceKind::I), 3);
        assert_eq!(spawn_row(PieceKind::I), 1);
        assert_eq!(spawn_column(PieceKind::O), 4);
        assert_eq!(spawn_row(PieceKind::O), 0);
        assert_eq!(spawn_column(PieceKind::T), 4);
        assert_eq!(spawn_row(PieceKind::T), 0);
    }

    #[test]
    fn out_of_mask_cells_are_empty() {
        let def = definition(PieceKind::O);
        assert!(!def.is_tile(-1, 0, Rotation::R0));
        assert!(!def.is_tile(2, 0, Rotation::R0));
        assert!(!def.is_tile(0, 2, Rotation::R0));
    }
}
