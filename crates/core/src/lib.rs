//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the game rules, state management, and simulation loop.
//! It has **no dependencies** on terminals, windows, or the system clock
//! beyond the injectable [`clock::TimeSource`], making it:
//!
//! - **Deterministic**: seeded randomizer plus manual time reproduce a game exactly
//! - **Testable**: every rule runs without sleeping or a terminal
//! - **Portable**: any frontend can drive it through [`runner::Frontend`]
//!
//! # Module Structure
//!
//! - [`pieces`]: static registry of the seven piece shapes, insets and spawn points
//! - [`board`]: 10x22 grid with placement validation and line clearing
//! - [`clock`]: cycle clock converting elapsed time into simulation steps
//! - [`game`]: the session controller (spawn, gravity, rotation, locking, scoring)
//! - [`rng`]: uniform piece randomizer
//! - [`scoring`]: line clear points and level progression
//! - [`snapshot`]: render-facing copy of the session state
//! - [`runner`]: fixed-rate main loop
//! - [`config`]: tunable pacing parameters
//!
//! # Game Rules
//!
//! - Gravity runs at `speed` cycles per second, starting at 1.0 and rising by
//!   0.035 after every lock
//! - Holding soft drop raises the cycle rate to 25 per second
//! - Clearing `n` lines with one piece scores `50 << n`
//! - The level is `floor(speed * 1.70)`
//! - The game ends when a new piece cannot spawn
//!
//! # Example
//!
//! ```
//! use tui_blocks_core::{GameConfig, GameSession, ManualTime, PieceSequence};
//! use tui_blocks_types::{GameCommand, PieceKind, SessionState};
//!
//! let time = ManualTime::shared();
//! let mut game = GameSession::new(
//!     GameConfig::default(),
//!     time.clone(),
//!     PieceSequence::repeat(PieceKind::O),
//! );
//!
//! game.apply_command(GameCommand::Confirm);
//! assert_eq!(game.state(), SessionState::Playing);
//!
//! let row = game.active().unwrap().row;
//! time.advance(1000);
//! game.frame();
//! assert_eq!(game.active().unwrap().row, row + 1);
//! ```

pub mod board;
pub mod clock;
pub mod config;
pub mod game;
pub mod pieces;
pub mod rng;
pub mod runner;
pub mod scoring;
pub mod snapshot;

pub use tui_blocks_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use clock::{CycleClock, InstantTime, ManualTime, TimeSource};
pub use config::{GameConfig, InvalidConfig};
pub use game::{kick_into_bounds, ActivePiece, CycleOutcome, GameSession};
pub use pieces::{definition, Insets, PieceDefinition};
pub use rng::{PieceSequence, PieceSource, SimpleRng};
pub use runner::{CommandBuffer, FramePacer, Frontend, GameLoop, LoopControl, Sleeper, ThreadSleeper};
pub use scoring::{level_for_speed, line_clear_score};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
