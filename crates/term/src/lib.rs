//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: the game view draws a
//! [`core::GameSnapshot`] into a plain framebuffer, and the renderer flushes
//! framebuffers to the terminal as diffs.
//!
//! - Keeps `core` free of terminal concerns
//! - Board cells are 2 columns wide to offset the terminal glyph aspect ratio

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_blocks_core as core;
pub use tui_blocks_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Layout, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
