//! Fixed-rate main loop.
//!
//! The loop itself is I/O-free: input and drawing go through a [`Frontend`],
//! frame pacing through a [`Sleeper`], and time through the session's
//! [`TimeSource`]. A terminal build plugs in crossterm and `thread::sleep`;
//! tests plug in scripted input and a sleeper that advances manual time.

use std::time::Duration;

use arrayvec::ArrayVec;

use crate::clock::TimeSource;
use crate::game::GameSession;
use crate::rng::PieceSource;
use crate::snapshot::GameSnapshot;
use crate::types::GameCommand;

/// Commands gathered during one frame. Frontends should `try_push` and drop
/// overflow; 32 key events inside a 20ms frame only happens with a stuck key.
pub type CommandBuffer = ArrayVec<GameCommand, 32>;

/// Whether the loop keeps going after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    /// The window layer asked to close
    Close,
}

/// Input source and render target of the loop.
pub trait Frontend {
    type Error;

    /// Collect commands received since the previous frame without blocking.
    fn poll_input(&mut self, commands: &mut CommandBuffer) -> Result<LoopControl, Self::Error>;

    /// Draw one frame.
    fn render(&mut self, snapshot: &GameSnapshot) -> Result<(), Self::Error>;
}

/// Blocks the loop for the rest of a frame.
pub trait Sleeper {
    fn sleep(&mut self, duration: Duration);
}

/// Real sleeping via `std::thread::sleep`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Tracks the start of the current frame and how much of its budget is left.
#[derive(Debug, Clone, Copy)]
pub struct FramePacer {
    frame_ms: u64,
    frame_start_ms: u64,
}

impl FramePacer {
    pub fn new(frame_ms: u64) -> Self {
        Self {
            frame_ms: frame_ms.max(1),
            frame_start_ms: 0,
        }
    }

    pub fn frame_ms(&self) -> u64 {
        self.frame_ms
    }

    pub fn begin(&mut self, now_ms: u64) {
        self.frame_start_ms = now_ms;
    }

    /// Time left in the frame, `None` once the budget is used up.
    pub fn remaining(&self, now_ms: u64) -> Option<Duration> {
        let spent = now_ms.saturating_sub(self.frame_start_ms);
        if spent >= self.frame_ms {
            return None;
        }
        Some(Duration::from_millis(self.frame_ms - spent))
    }
}

/// Drives a [`GameSession`] at a fixed frame rate.
#[derive(Debug)]
pub struct GameLoop<S: Sleeper = ThreadSleeper> {
    pacer: FramePacer,
    sleeper: S,
    snapshot: GameSnapshot,
    commands: CommandBuffer,
    frames: u64,
}

impl<S: Sleeper> GameLoop<S> {
    pub fn new(frame_ms: u64, sleeper: S) -> Self {
        Self {
            pacer: FramePacer::new(frame_ms),
            sleeper,
            snapshot: GameSnapshot::default(),
            commands: CommandBuffer::new(),
            frames: 0,
        }
    }

    /// Frames completed so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn sleeper(&self) -> &S {
        &self.sleeper
    }

    /// Run a single frame: input, one simulation step, render, sleep.
    pub fn step<F, T, R>(
        &mut self,
        session: &mut GameSession<T, R>,
        frontend: &mut F,
    ) -> Result<LoopControl, F::Error>
    where
        F: Frontend,
        T: TimeSource,
        R: PieceSource,
    {
        self.pacer.begin(session.clock().time().now_ms());

        self.commands.clear();
        let control = frontend.poll_input(&mut self.commands)?;
        if control == LoopControl::Close {
            return Ok(LoopControl::Close);
        }
        for &command in &self.commands {
            session.apply_command(command);
        }

        session.frame();

        session.snapshot_into(&mut self.snapshot);
        frontend.render(&self.snapshot)?;
        self.frames += 1;

        if let Some(rest) = self.pacer.remaining(session.clock().time().now_ms()) {
            self.sleeper.sleep(rest);
        }
        Ok(LoopControl::Continue)
    }

    /// Run frames until the frontend asks to close or fails.
    pub fn run<F, T, R>(
        &mut self,
        session: &mut GameSession<T, R>,
        frontend: &mut F,
    ) -> Result<(), F::Error>
    where
        F: Frontend,
        T: TimeSource,
        R: PieceSource,
    {
        log::info!("main loop started at {}ms per frame", self.pacer.frame_ms());
        while self.step(session, frontend)? == LoopControl::Continue {}
        log::info!("main loop stopped after {} frames", self.frames);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pacer_reports_remaining_budget() {
        let mut pacer = FramePacer::new(20);
        pacer.begin(100);
        assert_eq!(pacer.remaining(100), Some(Duration::from_millis(20)));
        assert_eq!(pacer.remaining(115), Some(Duration::from_millis(5)));
        assert_eq!(pacer.remaining(120), None);
        assert_eq!(pacer.remaining(150), None);
    }

    #[test]
    fn pacer_never_has_zero_frame() {
        assert_eq!(FramePacer::new(0).frame_ms(), 1);
    }
}
