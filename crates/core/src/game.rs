//! Game session - the controller that owns all mutable game state
//!
//! A [`GameSession`] holds the board, the falling piece, the cycle clock and
//! the score/speed bookkeeping. Input handlers, the per-frame update and the
//! render query all take the session explicitly; there is no global state.
//!
//! # State machine
//!
//! ```text
//! NewGame --Confirm--> Playing <--PauseToggle--> Paused
//!                         |
//!                   spawn collides
//!                         v
//!                      GameOver --Confirm--> Playing
//! ```

use log::{debug, info};

use crate::board::Board;
use crate::clock::{CycleClock, InstantTime, TimeSource};
use crate::config::GameConfig;
use crate::pieces::definition;
use crate::rng::{PieceSource, SimpleRng};
use crate::scoring::{level_for_speed, line_clear_score};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{GameCommand, PieceKind, Rotation, SessionState, BOARD_WIDTH, TOTAL_ROWS};

/// The falling piece: kind, top-left of its bounding box, and rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub col: i8,
    pub row: i8,
    pub rotation: Rotation,
}

impl ActivePiece {
    /// A piece of `kind` at its spawn position and rotation 0.
    pub fn spawn(kind: PieceKind) -> Self {
        let def = definition(kind);
        Self {
            kind,
            col: def.spawn_column(),
            row: def.spawn_row(),
            rotation: Rotation::R0,
        }
    }

    pub fn fits(&self, board: &Board) -> bool {
        board.is_valid_and_empty(self.kind, self.col, self.row, self.rotation)
    }
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            col: value.col,
            row: value.row,
        }
    }
}

/// What a single simulation cycle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// No cycle ran (none elapsed, or the game is not being played)
    Idle,
    /// The piece moved down one row
    Fell,
    /// The piece locked and the next one spawned
    Locked { lines_cleared: u32 },
    /// The piece locked and the next spawn collided
    GameOver { lines_cleared: u32 },
}

/// Shift `(col, row)` so that `kind` at `rotation` lies inside the grid.
///
/// Only the bounds are corrected; overlap with locked tiles is left for
/// [`Board::is_valid_and_empty`] to reject.
pub fn kick_into_bounds(kind: PieceKind, col: i8, row: i8, rotation: Rotation) -> (i8, i8) {
    let def = definition(kind);
    let insets = def.insets(rotation);
    let dim = def.dimension() as i8;

    let left_edge = col + insets.left as i8;
    let right_edge = col + dim - 1 - insets.right as i8;
    let col = if left_edge < 0 {
        col - left_edge
    } else if right_edge >= BOARD_WIDTH as i8 {
        col - (right_edge - (BOARD_WIDTH as i8 - 1))
    } else {
        col
    };

    let top_edge = row + insets.top as i8;
    let bottom_edge = row + dim - 1 - insets.bottom as i8;
    let row = if top_edge < 0 {
        row - top_edge
    } else if bottom_edge >= TOTAL_ROWS as i8 {
        row - (bottom_edge - (TOTAL_ROWS as i8 - 1))
    } else {
        row
    };

    (col, row)
}

/// A single-player game: board, pieces, timing and score.
#[derive(Debug)]
pub struct GameSession<T: TimeSource = InstantTime, R: PieceSource = SimpleRng> {
    config: GameConfig,
    board: Board,
    clock: CycleClock<T>,
    pieces: R,
    state: SessionState,
    active: Option<ActivePiece>,
    next: Option<PieceKind>,
    score: u32,
    level: u32,
    lines: u32,
    speed: f32,
    drop_cooldown: u32,
}

impl GameSession<InstantTime, SimpleRng> {
    /// Wall-clock session with a seeded uniform randomizer.
    pub fn with_seed(config: GameConfig, seed: u32) -> Self {
        Self::new(config, InstantTime::new(), SimpleRng::new(seed))
    }
}

impl<T: TimeSource, R: PieceSource> GameSession<T, R> {
    /// Create a session on the title screen. Nothing moves until
    /// [`GameCommand::Confirm`] starts a game.
    pub fn new(config: GameConfig, time: T, pieces: R) -> Self {
        let mut clock = CycleClock::new(config.initial_speed, time);
        clock.set_paused(true);
        Self {
            level: level_for_speed(config.initial_speed, config.level_factor),
            speed: config.initial_speed,
            config,
            board: Board::new(),
            clock,
            pieces,
            state: SessionState::NewGame,
            active: None,
            next: None,
            score: 0,
            lines: 0,
            drop_cooldown: 0,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Total rows cleared this game
    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Gravity speed in cycles per second
    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn drop_cooldown(&self) -> u32 {
        self.drop_cooldown
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn next_kind(&self) -> Option<PieceKind> {
        self.next
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for preset positions.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Replace the falling piece. Refused unless a game is running and
    /// `piece` fits where it is.
    pub fn set_active(&mut self, piece: ActivePiece) -> bool {
        if !self.state.is_playing() || !piece.fits(&self.board) {
            return false;
        }
        self.active = Some(piece);
        true
    }

    pub fn clock(&self) -> &CycleClock<T> {
        &self.clock
    }

    /// Apply an input command. Returns whether it changed anything.
    pub fn apply_command(&mut self, command: GameCommand) -> bool {
        match command {
            GameCommand::MoveLeft => self.move_horizontal(-1),
            GameCommand::MoveRight => self.move_horizontal(1),
            GameCommand::RotateCw => self.rotate(true),
            GameCommand::RotateCcw => self.rotate(false),
            GameCommand::SoftDropPress => self.soft_drop_press(),
            GameCommand::SoftDropRelease => self.soft_drop_release(),
            GameCommand::PauseToggle => self.toggle_pause(),
            GameCommand::Confirm => match self.state {
                SessionState::NewGame | SessionState::GameOver => {
                    self.start_new_game();
                    true
                }
                SessionState::Playing | SessionState::Paused => false,
            },
        }
    }

    /// Reset score, speed, board and clock, queue two pieces and start playing.
    pub fn start_new_game(&mut self) {
        self.score = 0;
        self.lines = 0;
        self.speed = self.config.initial_speed;
        self.level = level_for_speed(self.speed, self.config.level_factor);
        self.drop_cooldown = 0;
        self.board.clear();
        self.clock.reset();
        self.clock.set_rate(self.speed);
        self.next = Some(self.pieces.next_kind());
        self.state = SessionState::Playing;
        info!("new game started at speed {:.3}", self.speed);
        self.spawn_piece();
    }

    /// Promote the queued piece to the active one and queue a new kind.
    ///
    /// Returns false, and ends the game, when the spawn position is blocked.
    pub fn spawn_piece(&mut self) -> bool {
        let kind = self.next.take().unwrap_or_else(|| self.pieces.next_kind());
        let piece = ActivePiece::spawn(kind);
        self.active = Some(piece);
        self.next = Some(self.pieces.next_kind());

        if !piece.fits(&self.board) {
            self.state = SessionState::GameOver;
            self.clock.set_paused(true);
            info!(
                "game over: score {} level {} lines {}",
                self.score, self.level, self.lines
            );
            return false;
        }
        true
    }

    /// Move the active piece one column. Blocked moves are ignored.
    pub fn move_horizontal(&mut self, dx: i8) -> bool {
        if !self.state.is_playing() {
            return false;
        }
        let Some(mut piece) = self.active else {
            return false;
        };
        let Some(col) = piece.col.checked_add(dx) else {
            return false;
        };
        piece.col = col;
        if !piece.fits(&self.board) {
            return false;
        }
        self.active = Some(piece);
        true
    }

    /// Rotate the active piece, nudging it back inside the grid if the new
    /// orientation would stick out. The rotation is dropped if the corrected
    /// position still collides.
    pub fn rotate(&mut self, clockwise: bool) -> bool {
        if !self.state.is_playing() {
            return false;
        }
        let Some(piece) = self.active else {
            return false;
        };

        let rotation = if clockwise {
            piece.rotation.rotate_cw()
        } else {
            piece.rotation.rotate_ccw()
        };
        let (col, row) = kick_into_bounds(piece.kind, piece.col, piece.row, rotation);
        let candidate = ActivePiece {
            col,
            row,
            rotation,
            ..piece
        };
        if !candidate.fits(&self.board) {
            return false;
        }
        self.active = Some(candidate);
        true
    }

    /// Speed gravity up to the soft-drop rate, unless a lock just happened.
    pub fn soft_drop_press(&mut self) -> bool {
        if !self.state.is_playing() || self.drop_cooldown > 0 {
            return false;
        }
        self.clock.set_rate(self.config.soft_drop_rate);
        true
    }

    /// Return to the game speed and discard partially elapsed cycles.
    pub fn soft_drop_release(&mut self) -> bool {
        let paused = self.clock.is_paused();
        self.clock.set_rate(self.speed);
        self.clock.reset();
        self.clock.set_paused(paused);
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.state {
            SessionState::Playing => {
                self.state = SessionState::Paused;
                self.clock.set_paused(true);
                debug!("paused");
                true
            }
            SessionState::Paused => {
                self.state = SessionState::Playing;
                self.clock.set_paused(false);
                debug!("resumed");
                true
            }
            SessionState::NewGame | SessionState::GameOver => false,
        }
    }

    /// Run one simulation cycle: fall one row, or lock and spawn the next piece.
    pub fn update_cycle(&mut self) -> CycleOutcome {
        if !self.state.is_playing() {
            return CycleOutcome::Idle;
        }
        let Some(piece) = self.active else {
            return CycleOutcome::Idle;
        };

        let fallen = ActivePiece {
            row: piece.row + 1,
            ..piece
        };
        if fallen.fits(&self.board) {
            self.active = Some(fallen);
            return CycleOutcome::Fell;
        }

        let lines_cleared = self.lock_piece(piece);
        if self.spawn_piece() {
            CycleOutcome::Locked { lines_cleared }
        } else {
            CycleOutcome::GameOver { lines_cleared }
        }
    }

    /// Commit `piece` to the board, score cleared rows and raise the speed.
    fn lock_piece(&mut self, piece: ActivePiece) -> u32 {
        self.board
            .add_piece(piece.kind, piece.col, piece.row, piece.rotation);

        let cleared = self.board.check_lines();
        if cleared > 0 {
            let points = line_clear_score(cleared);
            self.score = self.score.saturating_add(points);
            self.lines = self.lines.saturating_add(cleared);
            debug!("cleared {} line(s) for {} points", cleared, points);
        }

        self.speed += self.config.speed_increment;
        self.clock.set_rate(self.speed);
        self.clock.reset();
        self.drop_cooldown = self.config.drop_cooldown_frames;

        let level = level_for_speed(self.speed, self.config.level_factor);
        if level != self.level {
            info!("level {} reached (speed {:.3})", level, self.speed);
            self.level = level;
        }
        cleared
    }

    /// One frame of the main loop: advance the clock, run at most one cycle,
    /// and count down the soft-drop cooldown.
    pub fn frame(&mut self) -> CycleOutcome {
        self.clock.tick();

        let outcome = if self.state.is_playing() && self.clock.consume_elapsed_cycle() {
            self.update_cycle()
        } else {
            CycleOutcome::Idle
        };

        if self.drop_cooldown > 0 {
            self.drop_cooldown -= 1;
        }
        outcome
    }

    /// Row the active piece would land on if dropped straight down.
    pub fn ghost_row(&self) -> Option<i8> {
        let mut landing = self.active?;
        loop {
            let below = ActivePiece {
                row: landing.row + 1,
                ..landing
            };
            if !below.fits(&self.board) {
                return Some(landing.row);
            }
            landing = below;
        }
    }

    /// Fill `out` with the render-facing view of this session.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.state = self.state;
        for (dst, src) in out.board.iter_mut().zip(self.board.visible_rows()) {
            dst.copy_from_slice(src);
        }
        let in_play = matches!(self.state, SessionState::Playing | SessionState::Paused);
        out.active = self.active.filter(|_| in_play).map(ActiveSnapshot::from);
        out.ghost_row = if in_play { self.ghost_row() } else { None };
        out.next = self.next;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = GameSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }
}
