//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{definition, ActiveSnapshot, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, Rotation, SessionState, BOARD_WIDTH, VISIBLE_ROWS};

const FIELD_BG: Rgb = Rgb::new(0, 0, 0);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
const GRID_FG: Rgb = Rgb::new(55, 55, 60);
const BORDER_FG: Rgb = Rgb::new(200, 200, 200);
const TEXT_FG: Rgb = Rgb::new(220, 220, 220);

/// Width of the side panel in terminal columns.
const PANEL_W: u16 = 30;
/// Gap between the play field and the side panel.
const PANEL_GAP: u16 = 2;

/// Preview box interior, in terminal cells.
const PREVIEW_W: u16 = 10;
const PREVIEW_H: u16 = 4;

const CONTROLS: [&str; 7] = [
    "A/Left  Move Left",
    "D/Right Move Right",
    "Q/Z     Rotate Anticlockwise",
    "E/Up    Rotate Clockwise",
    "S/Down  Drop",
    "P       Pause Game",
    "Esc     Quit",
];

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Top-left corners of the drawn regions for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub field_x: u16,
    pub field_y: u16,
    pub frame_w: u16,
    pub frame_h: u16,
    pub panel_x: u16,
    pub show_panel: bool,
}

/// A lightweight terminal renderer for the falling-block game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Where the field and panel land in `viewport`. The panel is dropped
    /// when the terminal is too narrow for it.
    pub fn layout(&self, viewport: Viewport) -> Layout {
        let frame_w = (BOARD_WIDTH as u16) * self.cell_w + 2;
        let frame_h = (VISIBLE_ROWS as u16) * self.cell_h + 2;
        let full_w = frame_w + PANEL_GAP + PANEL_W;
        let show_panel = viewport.width >= full_w;
        let used_w = if show_panel { full_w } else { frame_w };

        let field_x = viewport.width.saturating_sub(used_w) / 2;
        let field_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        Layout {
            field_x,
            field_y,
            frame_w,
            frame_h,
            panel_x: field_x + frame_w + PANEL_GAP,
            show_panel,
        }
    }

    /// Render the current game state into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::plain(TEXT_FG, PANEL_BG).into_cell(' '));

        let layout = self.layout(viewport);
        let border = CellStyle::plain(BORDER_FG, FIELD_BG);
        self.draw_border(fb, layout.field_x, layout.field_y, layout.frame_w, layout.frame_h, border);
        fb.fill_rect(
            layout.field_x + 1,
            layout.field_y + 1,
            layout.frame_w - 2,
            layout.frame_h - 2,
            ' ',
            CellStyle::plain(TEXT_FG, FIELD_BG),
        );

        match snap.state {
            // The field is hidden so pausing cannot be used to study the stack.
            SessionState::Paused => {
                self.draw_overlay_text(fb, &layout, 0, "PAUSED", true);
            }
            SessionState::NewGame => {
                self.draw_overlay_text(fb, &layout, -3, "TETRIS", true);
                self.draw_overlay_text(fb, &layout, 3, "Press Enter", false);
                self.draw_overlay_text(fb, &layout, 4, "to Play", false);
            }
            SessionState::GameOver => {
                self.draw_overlay_text(fb, &layout, -3, "GAME OVER", true);
                self.draw_overlay_text(fb, &layout, 3, "Press Enter", false);
                self.draw_overlay_text(fb, &layout, 4, "to Play Again", false);
            }
            SessionState::Playing => self.draw_field(fb, snap, &layout),
        }

        if layout.show_panel {
            self.draw_side_panel(fb, snap, viewport, &layout);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_field(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, layout: &Layout) {
        for (y, row) in snap.board.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                match cell {
                    Some(kind) => self.draw_tile(fb, layout, x as u16, y as u16, *kind),
                    None => self.draw_empty_cell(fb, layout, x as u16, y as u16),
                }
            }
        }

        let Some(active) = snap.active else {
            return;
        };

        if let Some(ghost_row) = snap.ghost_row.filter(|&row| row != active.row) {
            self.draw_ghost(fb, layout, &active, ghost_row);
        }
        for (x, y) in active.visible_cells() {
            self.draw_tile(fb, layout, x as u16, y as u16, active.kind);
        }
    }

    fn draw_ghost(&self, fb: &mut FrameBuffer, layout: &Layout, active: &ActiveSnapshot, row: i8) {
        let base = Rgb::from_array(definition(active.kind).base_color());
        let style = CellStyle::plain(base.darker(), FIELD_BG).dim();
        for (x, y) in active.visible_cells_at(row) {
            self.fill_cell_rect(fb, layout, x as u16, y as u16, '░', style);
        }
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, layout: &Layout, x: u16, y: u16) {
        let style = CellStyle::plain(GRID_FG, FIELD_BG);
        let (px, py) = self.cell_origin(layout, x, y);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);
        // Grid dot sits in the last column of the cell.
        fb.put_char(px + self.cell_w - 1, py, '·', style);
    }

    /// A locked or falling tile: base colour with a lit left edge and a
    /// shadowed right edge.
    fn draw_tile(&self, fb: &mut FrameBuffer, layout: &Layout, x: u16, y: u16, kind: PieceKind) {
        let (px, py) = self.cell_origin(layout, x, y);
        draw_tile_at(fb, px, py, self.cell_w, self.cell_h, kind);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        layout: &Layout,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let (px, py) = self.cell_origin(layout, cell_x, cell_y);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn cell_origin(&self, layout: &Layout, cell_x: u16, cell_y: u16) -> (u16, u16) {
        (
            layout.field_x + 1 + cell_x * self.cell_w,
            layout.field_y + 1 + cell_y * self.cell_h,
        )
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        layout: &Layout,
    ) {
        let label = CellStyle::plain(TEXT_FG, PANEL_BG).bold();
        let value = CellStyle::plain(Rgb::new(200, 200, 200), PANEL_BG);
        let x = layout.panel_x;
        let mut y = layout.field_y;

        fb.put_str(x, y, "STATS", label);
        y += 1;
        fb.put_str(x, y, "Level: ", value);
        fb.put_u32(x + 7, y, snap.level, value);
        y += 1;
        fb.put_str(x, y, "Score: ", value);
        fb.put_u32(x + 7, y, snap.score, value);
        y += 1;
        fb.put_str(x, y, "Lines: ", value);
        fb.put_u32(x + 7, y, snap.lines, value);
        y += 2;

        fb.put_str(x, y, "NEXT PIECE", label);
        y += 1;
        self.draw_border(fb, x, y, PREVIEW_W + 2, PREVIEW_H + 2, CellStyle::plain(BORDER_FG, PANEL_BG));
        if snap.state != SessionState::GameOver {
            if let Some(next) = snap.next {
                draw_preview(fb, x + 1, y + 1, next);
            }
        }
        y += PREVIEW_H + 3;

        fb.put_str(x, y, "CONTROLS", label);
        y += 1;
        for line in CONTROLS {
            if y >= viewport.height {
                break;
            }
            fb.put_str(x, y, line, value);
            y += 1;
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, layout: &Layout, dy: i16, text: &str, bold: bool) {
        let mid_y = layout.field_y.saturating_add(layout.frame_h / 2);
        let y = mid_y.saturating_add_signed(dy);
        let text_w = text.chars().count() as u16;
        let x = layout.field_x.saturating_add(layout.frame_w.saturating_sub(text_w) / 2);
        let mut style = CellStyle::plain(Rgb::new(255, 255, 255), FIELD_BG);
        if bold {
            style = style.bold();
        }
        fb.put_str(x, y, text, style);
    }
}

fn draw_tile_at(fb: &mut FrameBuffer, px: u16, py: u16, w: u16, h: u16, kind: PieceKind) {
    let base = Rgb::from_array(definition(kind).base_color());
    let body = CellStyle::plain(base, base);
    fb.fill_rect(px, py, w, h, ' ', body);
    for dy in 0..h {
        fb.put_char(px, py + dy, '▏', CellStyle::plain(base.brighter(), base));
        if w > 1 {
            fb.put_char(px + w - 1, py + dy, '▕', CellStyle::plain(base.darker(), base));
        }
    }
}

/// Draw `kind` at its spawn rotation, centred in the preview box whose
/// interior starts at (`x`, `y`).
fn draw_preview(fb: &mut FrameBuffer, x: u16, y: u16, kind: PieceKind) {
    let def = definition(kind);
    let insets = def.insets(Rotation::R0);
    let start_x = x + PREVIEW_W.saturating_sub(def.cols() as u16 * 2) / 2;
    let start_y = y + PREVIEW_H.saturating_sub(def.rows() as u16) / 2;
    for (col, row) in def.cells(Rotation::R0) {
        let dx = (col - insets.left as i8) as u16;
        let dy = (row - insets.top as i8) as u16;
        draw_tile_at(fb, start_x + dx * 2, start_y + dy, 2, 1, kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find_text(fb: &FrameBuffer, text: &str) -> Option<u16> {
        (0..fb.height()).find(|&y| fb.row_text(y).contains(text))
    }

    #[test]
    fn layout_centres_field_and_panel() {
        let view = GameView::default();
        let layout = view.layout(Viewport::new(80, 24));
        assert_eq!(layout.frame_w, 22);
        assert_eq!(layout.frame_h, 22);
        assert!(layout.show_panel);
        assert_eq!(layout.field_x, (80 - 54) / 2);
        assert_eq!(layout.field_y, 1);
        assert_eq!(layout.panel_x, layout.field_x + 24);
    }

    #[test]
    fn narrow_terminal_drops_panel() {
        let view = GameView::default();
        let layout = view.layout(Viewport::new(30, 24));
        assert!(!layout.show_panel);
        assert_eq!(layout.field_x, 4);
    }

    #[test]
    fn preview_is_centred() {
        let mut fb = FrameBuffer::new(PREVIEW_W, PREVIEW_H);
        draw_preview(&mut fb, 0, 0, PieceKind::I);
        // 4 cells of 2 columns, one row, centred in a 10x4 box.
        assert_eq!(fb.row_text(1), " ▏▕▏▕▏▕▏▕ ");
        assert_eq!(fb.row_text(0).trim(), "");
        assert_eq!(fb.row_text(2).trim(), "");
    }

    #[test]
    fn paused_hides_the_field() {
        let mut snap = GameSnapshot::default();
        snap.state = SessionState::Paused;
        snap.board[19][0] = Some(PieceKind::O);
        let view = GameView::default();
        let fb = view.render(&snap, Viewport::new(80, 24));
        assert!(find_text(&fb, "PAUSED").is_some());
        let layout = view.layout(Viewport::new(80, 24));
        let cell = fb.get(layout.field_x + 1, layout.field_y + 20).unwrap();
        assert_eq!(cell.ch, ' ');
        assert_eq!(cell.style.bg, FIELD_BG);
    }
}
