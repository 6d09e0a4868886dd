//! Terminal key mapping for the game session.
//!
//! Maps `crossterm` key events into [`crate::types::GameCommand`] and tracks the
//! held soft-drop key, including on terminals without key-release events.

pub mod handler;
pub mod map;

pub use tui_blocks_types as types;

pub use handler::SoftDropTracker;
pub use map::{is_soft_drop_key, map_key_press, should_quit};
