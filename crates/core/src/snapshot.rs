use crate::pieces::definition;
use crate::types::{
    Cell, PieceKind, Rotation, SessionState, BOARD_WIDTH, HIDDEN_ROWS, VISIBLE_ROWS,
};

/// Active piece as seen by a renderer. `row` is in full-grid coordinates,
/// so rows below `HIDDEN_ROWS` are above the visible field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub col: i8,
    pub row: i8,
}

impl ActiveSnapshot {
    /// Filled cells of the piece placed at `row`, as `(col, visible_row)`,
    /// skipping anything still inside the hidden rows.
    pub fn visible_cells_at(&self, row: i8) -> impl Iterator<Item = (u8, u8)> + '_ {
        let col = self.col;
        definition(self.kind)
            .cells(self.rotation)
            .filter_map(move |(dx, dy)| {
                let x = col + dx;
                let y = row + dy - HIDDEN_ROWS as i8;
                if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= VISIBLE_ROWS as i8 {
                    return None;
                }
                Some((x as u8, y as u8))
            })
    }

    pub fn visible_cells(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.visible_cells_at(self.row)
    }
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub state: SessionState,
    /// Visible rows only, top to bottom
    pub board: [[Cell; BOARD_WIDTH as usize]; VISIBLE_ROWS as usize],
    pub active: Option<ActiveSnapshot>,
    pub ghost_row: Option<i8>,
    pub next: Option<PieceKind>,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn playable(&self) -> bool {
        self.state.is_playing()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            state: SessionState::NewGame,
            board: [[None; BOARD_WIDTH as usize]; VISIBLE_ROWS as usize],
            active: None,
            ghost_row: None,
            next: None,
            score: 0,
            level: 0,
            lines: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_cells_are_skipped() {
        let active = ActiveSnapshot {
            kind: PieceKind::O,
            rotation: Rotation::R0,
            col: 4,
            row: 1,
        };
        let cells: Vec<(u8, u8)> = active.visible_cells().collect();
        assert_eq!(cells, vec![(4, 0), (5, 0)]);
    }
}
