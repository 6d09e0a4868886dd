//! Board module - manages the game grid
//!
//! The board is a 10x22 grid (20 visible rows below 2 hidden spawn rows) where
//! each cell is either empty or holds the kind of the piece that was locked there.
//! Uses a flat array for cache locality and zero allocation.
//! Coordinates: (col, row) where col ranges 0..9 (left to right) and row ranges
//! 0..21 (top to bottom). Rows 0 and 1 are hidden.

use crate::pieces::definition;
use crate::types::{Cell, PieceKind, Rotation, BOARD_WIDTH, HIDDEN_ROWS, TOTAL_ROWS};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (TOTAL_ROWS as usize);

const WIDTH: usize = BOARD_WIDTH as usize;

/// The game board - 10 columns x 22 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (row * WIDTH + col)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (col, row) coordinates
    #[inline(always)]
    fn index(col: i8, row: i8) -> Option<usize> {
        if col < 0 || col >= BOARD_WIDTH as i8 || row < 0 || row >= TOTAL_ROWS as i8 {
            return None;
        }
        Some((row as usize) * WIDTH + (col as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Total rows including the hidden spawn rows
    pub fn height(&self) -> u8 {
        TOTAL_ROWS
    }

    /// Get cell at (col, row), `None` if out of bounds
    pub fn get(&self, col: i8, row: i8) -> Option<Cell> {
        Self::index(col, row).map(|idx| self.cells[idx])
    }

    /// Set cell at (col, row). Returns false if out of bounds.
    pub fn set(&mut self, col: i8, row: i8, cell: Cell) -> bool {
        match Self::index(col, row) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is within bounds and filled
    pub fn is_occupied(&self, col: i8, row: i8) -> bool {
        matches!(self.get(col, row), Some(Some(_)))
    }

    /// Determine whether `kind` fits at (col, row) with `rotation`.
    ///
    /// The piece's filled cells (its bounding box trimmed by the rotation's
    /// insets) must lie inside the grid, and none of them may overlap a
    /// locked tile.
    pub fn is_valid_and_empty(&self, kind: PieceKind, col: i8, row: i8, rotation: Rotation) -> bool {
        let def = definition(kind);
        let insets = def.insets(rotation);
        let dim = def.dimension() as i16;
        let (col, row) = (col as i16, row as i16);

        if col + (insets.left as i16) < 0
            || col + dim - 1 - (insets.right as i16) >= BOARD_WIDTH as i16
        {
            return false;
        }
        if row + (insets.top as i16) < 0
            || row + dim - 1 - (insets.bottom as i16) >= TOTAL_ROWS as i16
        {
            return false;
        }

        def.cells(rotation)
            .all(|(dx, dy)| !self.is_occupied(col as i8 + dx, row as i8 + dy))
    }

    /// Write the piece's filled cells into the grid.
    ///
    /// The placement must have been validated with [`Board::is_valid_and_empty`].
    pub fn add_piece(&mut self, kind: PieceKind, col: i8, row: i8, rotation: Rotation) {
        debug_assert!(
            self.is_valid_and_empty(kind, col, row, rotation),
            "add_piece on an invalid placement: {:?} at ({}, {}) {:?}",
            kind,
            col,
            row,
            rotation
        );

        for (dx, dy) in definition(kind).cells(rotation) {
            self.set(col + dx, row + dy, Some(kind));
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= TOTAL_ROWS as usize {
            return false;
        }
        let start = row * WIDTH;
        self.cells[start..start + WIDTH].iter().all(|cell| cell.is_some())
    }

    /// Clear a row and shift all rows above it down by one.
    /// The top row becomes empty.
    fn clear_row(&mut self, row: usize) {
        for r in (1..=row).rev() {
            let src = (r - 1) * WIDTH;
            self.cells.copy_within(src..src + WIDTH, r * WIDTH);
        }
        self.cells[..WIDTH].fill(None);
    }

    /// Remove every full row and return how many were removed.
    ///
    /// Rows are scanned top to bottom; a full row is removed as soon as it is
    /// found by shifting everything above it down one row. Rows above the scan
    /// position have already been checked, so the pass never revisits them.
    pub fn check_lines(&mut self) -> u32 {
        let mut completed = 0;
        for row in 0..TOTAL_ROWS as usize {
            if self.is_row_full(row) {
                self.clear_row(row);
                completed += 1;
            }
        }
        completed
    }

    /// Cells of a single row
    pub fn row(&self, row: usize) -> &[Cell] {
        let start = row * WIDTH;
        &self.cells[start..start + WIDTH]
    }

    /// Rows shown to the player, top to bottom
    pub fn visible_rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks_exact(WIDTH).skip(HIDDEN_ROWS as usize)
    }

    /// Number of occupied cells on the whole board
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
