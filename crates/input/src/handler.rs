//! Soft-drop hold tracking for terminal environments.
//!
//! Soft drop is the only held key in the game: pressing it speeds gravity up
//! and releasing it restores the normal pace. Many terminals never report key
//! releases, only a stream of auto-repeated presses, so the tracker also
//! releases the key on its own after a quiet period.

use crossterm::event::KeyCode;

use crate::map::is_soft_drop_key;
use crate::types::GameCommand;

// Longer than the usual auto-repeat start delay (~500ms) so a held key is not
// released between the first press and the first repeat.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 550;

/// Tracks whether the soft-drop key is down.
#[derive(Debug, Clone)]
pub struct SoftDropTracker {
    held: bool,
    since_last_press_ms: u32,
    key_release_timeout_ms: u32,
    reports_releases: bool,
}

impl SoftDropTracker {
    pub fn new() -> Self {
        Self {
            held: false,
            since_last_press_ms: 0,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
            reports_releases: false,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    /// Declare that the terminal sends real release events, which turns the
    /// timeout off.
    pub fn with_release_events(mut self, reports_releases: bool) -> Self {
        self.reports_releases = reports_releases;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Handle a press or auto-repeat of `code`.
    ///
    /// Every press is forwarded: the game refuses soft drop during its
    /// post-lock cooldown, so a key held through the cooldown must keep asking.
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<GameCommand> {
        if !is_soft_drop_key(code) {
            return None;
        }
        self.held = true;
        self.since_last_press_ms = 0;
        Some(GameCommand::SoftDropPress)
    }

    pub fn handle_key_release(&mut self, code: KeyCode) -> Option<GameCommand> {
        if !is_soft_drop_key(code) || !self.held {
            return None;
        }
        self.held = false;
        self.since_last_press_ms = 0;
        Some(GameCommand::SoftDropRelease)
    }

    /// Advance the quiet-period timer; emits a release once it runs out.
    pub fn update(&mut self, elapsed_ms: u32) -> Option<GameCommand> {
        if !self.held || self.reports_releases {
            return None;
        }
        self.since_last_press_ms = self.since_last_press_ms.saturating_add(elapsed_ms);
        if self.since_last_press_ms <= self.key_release_timeout_ms {
            return None;
        }
        log::trace!("soft drop auto-released after {}ms", self.since_last_press_ms);
        self.held = false;
        self.since_last_press_ms = 0;
        Some(GameCommand::SoftDropRelease)
    }
}

impl Default for SoftDropTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release() {
        let mut tracker = SoftDropTracker::new();
        assert_eq!(
            tracker.handle_key_press(KeyCode::Down),
            Some(GameCommand::SoftDropPress)
        );
        assert!(tracker.is_held());
        assert_eq!(
            tracker.handle_key_release(KeyCode::Down),
            Some(GameCommand::SoftDropRelease)
        );
        assert!(!tracker.is_held());
        assert_eq!(tracker.handle_key_release(KeyCode::Down), None);
    }

    #[test]
    fn other_keys_are_ignored() {
        let mut tracker = SoftDropTracker::new();
        assert_eq!(tracker.handle_key_press(KeyCode::Left), None);
        assert_eq!(tracker.handle_key_release(KeyCode::Left), None);
        assert!(!tracker.is_held());
    }

    #[test]
    fn repeats_keep_the_key_held() {
        let mut tracker = SoftDropTracker::new().with_key_release_timeout_ms(100);
        tracker.handle_key_press(KeyCode::Char('s'));
        assert_eq!(tracker.update(80), None);
        assert_eq!(
            tracker.handle_key_press(KeyCode::Char('s')),
            Some(GameCommand::SoftDropPress)
        );
        assert_eq!(tracker.update(80), None);
        assert!(tracker.is_held());
    }

    #[test]
    fn auto_release_after_timeout() {
        let mut tracker = SoftDropTracker::new().with_key_release_timeout_ms(100);
        tracker.handle_key_press(KeyCode::Down);
        assert_eq!(tracker.update(100), None);
        assert_eq!(tracker.update(1), Some(GameCommand::SoftDropRelease));
        assert_eq!(tracker.update(500), None);
    }

    #[test]
    fn no_timeout_with_release_events() {
        let mut tracker = SoftDropTracker::new()
            .with_key_release_timeout_ms(100)
            .with_release_events(true);
        tracker.handle_key_press(KeyCode::Down);
        assert_eq!(tracker.update(10_000), None);
        assert!(tracker.is_held());
    }
}
