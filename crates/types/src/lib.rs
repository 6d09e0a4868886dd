//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (simulation, rendering, input mapping).
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Visible rows**: 20
//! - **Hidden rows**: 2 rows above the visible field, used as spawn buffer
//! - **Total rows**: 22 (indexed 0-21, rows 0-1 are hidden)
//!
//! # Timing and Difficulty
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAMES_PER_SECOND` | 50 | Target render/update cadence |
//! | `INITIAL_SPEED` | 1.0 | Gravity cycles per second at the start of a game |
//! | `SPEED_INCREMENT` | 0.035 | Speed added after every locked piece |
//! | `SOFT_DROP_RATE` | 25.0 | Cycle rate while the soft-drop key is held |
//! | `DROP_COOLDOWN_FRAMES` | 25 | Frames after a lock before soft drop re-engages |
//! | `LEVEL_FACTOR` | 1.70 | `level = floor(speed * LEVEL_FACTOR)` |
//!
//! # Examples
//!
//! ```
//! use tui_blocks_types::{GameCommand, PieceKind, Rotation, BOARD_WIDTH, TOTAL_ROWS};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//!
//! assert_eq!(Rotation::R0.rotate_ccw(), Rotation::R3);
//! assert_eq!(GameCommand::from_str("rotateCw"), Some(GameCommand::RotateCw));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(TOTAL_ROWS, 22);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Number of rows shown to the player
pub const VISIBLE_ROWS: u8 = 20;

/// Rows above the visible field where pieces spawn
pub const HIDDEN_ROWS: u8 = 2;

/// Total number of rows held by the board
pub const TOTAL_ROWS: u8 = VISIBLE_ROWS + HIDDEN_ROWS;

/// Target frame rate of the main loop
pub const FRAMES_PER_SECOND: u32 = 50;

/// Gravity speed (cycles per second) at the start of a game
pub const INITIAL_SPEED: f32 = 1.0;

/// Speed added every time a piece locks
pub const SPEED_INCREMENT: f32 = 0.035;

/// Cycle rate used while soft drop is held
pub const SOFT_DROP_RATE: f32 = 25.0;

/// Frames after a lock during which soft drop cannot be engaged (~0.5s at 50 fps)
pub const DROP_COOLDOWN_FRAMES: u32 = 25;

/// Multiplier converting speed into the displayed level
pub const LEVEL_FACTOR: f32 = 1.70;

/// Base of the line clear score: `LINE_CLEAR_BASE_SCORE << lines`
pub const LINE_CLEAR_BASE_SCORE: u32 = 50;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_dimensions_include_hidden_rows() {
        assert_eq!(TOTAL_ROWS, 22);
        assert_eq!(TOTAL_ROWS - HIDDEN_ROWS, VISIBLE_ROWS);
    }

    #[test]
    fn initial_level_is_one() {
        assert_eq!((INITIAL_SPEED * LEVEL_FACTOR) as u32, 1);
    }
}

/// The seven piece kinds
///
/// Ordinals follow the registry order: I, J, L, O, S, T, Z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// Number of piece kinds
    pub const COUNT: usize = 7;

    /// All kinds in ordinal order
    pub const ALL: [PieceKind; Self::COUNT] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Ordinal of this kind (0..7)
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Kind for an ordinal, `None` if out of range
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_blocks_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Single-letter uppercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
        }
    }
}

/// Rotation state of a piece
///
/// `R0` is the spawn orientation; each step is a quarter turn clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    R0,
    R1,
    R2,
    R3,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [Rotation::R0, Rotation::R1, Rotation::R2, Rotation::R3];

    /// Rotation index in `0..4`
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Rotation for an index, wrapping modulo 4
    pub const fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Rotation::R0,
            1 => Rotation::R1,
            2 => Rotation::R2,
            _ => Rotation::R3,
        }
    }

    /// Rotate 90° clockwise: `(r + 1) mod 4`
    pub const fn rotate_cw(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Rotate 90° counter-clockwise: `(r + 3) mod 4`
    pub const fn rotate_ccw(self) -> Self {
        Self::from_index(self.index() + 3)
    }
}

/// Discrete commands produced by the input layer
///
/// Soft drop is a held key, so it arrives as a press/release pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCommand {
    /// Move piece one column left
    MoveLeft,
    /// Move piece one column right
    MoveRight,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Soft-drop key went down
    SoftDropPress,
    /// Soft-drop key went up
    SoftDropRelease,
    /// Toggle pause
    PauseToggle,
    /// Start a game from the title or game-over screen
    Confirm,
}

impl GameCommand {
    /// Parse a command name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_blocks_types::GameCommand;
    ///
    /// assert_eq!(GameCommand::from_str("moveLeft"), Some(GameCommand::MoveLeft));
    /// assert_eq!(GameCommand::from_str("SOFTDROPPRESS"), Some(GameCommand::SoftDropPress));
    /// assert_eq!(GameCommand::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameCommand::MoveLeft),
            "moveright" => Some(GameCommand::MoveRight),
            "rotatecw" => Some(GameCommand::RotateCw),
            "rotateccw" => Some(GameCommand::RotateCcw),
            "softdroppress" => Some(GameCommand::SoftDropPress),
            "softdroprelease" => Some(GameCommand::SoftDropRelease),
            "pausetoggle" => Some(GameCommand::PauseToggle),
            "confirm" => Some(GameCommand::Confirm),
            _ => None,
        }
    }

    /// camelCase name of the command
    pub fn as_str(&self) -> &'static str {
        match self {
            GameCommand::MoveLeft => "moveLeft",
            GameCommand::MoveRight => "moveRight",
            GameCommand::RotateCw => "rotateCw",
            GameCommand::RotateCcw => "rotateCcw",
            GameCommand::SoftDropPress => "softDropPress",
            GameCommand::SoftDropRelease => "softDropRelease",
            GameCommand::PauseToggle => "pauseToggle",
            GameCommand::Confirm => "confirm",
        }
    }
}

/// Display/simulation state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    /// Title screen, nothing has been played yet
    #[default]
    NewGame,
    Playing,
    Paused,
    /// Terminal state until the player confirms a new game
    GameOver,
}

impl SessionState {
    /// Whether the simulation is actively stepping
    pub fn is_playing(&self) -> bool {
        matches!(self, SessionState::Playing)
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell holding a locked tile of that kind (for colouring only)
pub type Cell = Option<PieceKind>;
