//! Cycle clock - turns elapsed wall-clock time into discrete simulation cycles
//!
//! The clock never sleeps or reads the system time directly; it asks a
//! [`TimeSource`] for the current millisecond count. Production code uses
//! [`InstantTime`], tests drive a [`ManualTime`] by hand.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Monotonic millisecond counter.
pub trait TimeSource {
    fn now_ms(&self) -> u64;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for Rc<T> {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}

/// Wall-clock time measured from the moment the source was created.
#[derive(Debug, Clone, Copy)]
pub struct InstantTime {
    origin: Instant,
}

impl InstantTime {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for InstantTime {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for InstantTime {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Hand-driven time source for deterministic tests.
///
/// Wrap it in an `Rc` to share one timeline between the test and the clock.
#[derive(Debug, Default)]
pub struct ManualTime {
    now: Cell<u64>,
}

impl ManualTime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Rc<Self> {
        Rc::new(Self::new())
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }
}

impl TimeSource for ManualTime {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

/// Counts elapsed simulation cycles at a configurable rate.
#[derive(Debug)]
pub struct CycleClock<T: TimeSource> {
    time: T,
    millis_per_cycle: f64,
    last_update_ms: u64,
    elapsed_cycles: u32,
    excess_ms: f64,
    paused: bool,
}

impl<T: TimeSource> CycleClock<T> {
    /// Create a clock ticking `cycles_per_second` times a second.
    pub fn new(cycles_per_second: f32, time: T) -> Self {
        let mut clock = Self {
            last_update_ms: time.now_ms(),
            time,
            millis_per_cycle: 1000.0,
            elapsed_cycles: 0,
            excess_ms: 0.0,
            paused: false,
        };
        clock.set_rate(cycles_per_second);
        clock
    }

    /// Change the cycle rate. Accumulated cycles and excess time are kept.
    ///
    /// Non-positive or non-finite rates are ignored.
    pub fn set_rate(&mut self, cycles_per_second: f32) {
        if !cycles_per_second.is_finite() || cycles_per_second <= 0.0 {
            log::warn!("ignoring invalid cycle rate {}", cycles_per_second);
            return;
        }
        self.millis_per_cycle = 1000.0 / cycles_per_second as f64;
    }

    /// Cycles per second currently in effect.
    pub fn rate(&self) -> f32 {
        (1000.0 / self.millis_per_cycle) as f32
    }

    pub fn millis_per_cycle(&self) -> f64 {
        self.millis_per_cycle
    }

    /// Drop elapsed cycles and excess time, restart timing from now and unpause.
    pub fn reset(&mut self) {
        self.elapsed_cycles = 0;
        self.excess_ms = 0.0;
        self.last_update_ms = self.time.now_ms();
        self.paused = false;
    }

    /// Account for the time passed since the previous tick.
    ///
    /// While paused no cycles accrue, but the reference time still advances so
    /// unpausing does not release a burst of cycles.
    pub fn tick(&mut self) {
        let now = self.time.now_ms();
        let delta = now.saturating_sub(self.last_update_ms) as f64 + self.excess_ms;

        if !self.paused {
            self.elapsed_cycles = self
                .elapsed_cycles
                .saturating_add((delta / self.millis_per_cycle).floor() as u32);
            self.excess_ms = delta % self.millis_per_cycle;
        }

        self.last_update_ms = now;
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Take one elapsed cycle if any are pending.
    pub fn consume_elapsed_cycle(&mut self) -> bool {
        if self.elapsed_cycles > 0 {
            self.elapsed_cycles -= 1;
            true
        } else {
            false
        }
    }

    /// Whether a cycle is pending, without taking it.
    pub fn peek_elapsed_cycle(&self) -> bool {
        self.elapsed_cycles > 0
    }

    /// Number of pending cycles.
    pub fn pending_cycles(&self) -> u32 {
        self.elapsed_cycles
    }

    pub fn time(&self) -> &T {
        &self.time
    }
}
