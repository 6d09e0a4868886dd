//! Tunable gameplay parameters.
//!
//! Defaults reproduce the classic pacing; every field can be overridden from a
//! TOML file by the binary.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{
    DROP_COOLDOWN_FRAMES, FRAMES_PER_SECOND, INITIAL_SPEED, LEVEL_FACTOR, SOFT_DROP_RATE,
    SPEED_INCREMENT,
};

/// First out-of-range field found by [`GameConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum InvalidConfig {
    #[error("{field} must be a positive number, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must be zero or positive, got {value}")]
    Negative { field: &'static str, value: f32 },
    #[error("frames_per_second must be in 1..=1000, got {0}")]
    FrameRate(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Gravity cycles per second at the start of a game
    pub initial_speed: f32,
    /// Speed added after each locked piece
    pub speed_increment: f32,
    /// Cycle rate while soft drop is held
    pub soft_drop_rate: f32,
    /// Frames after a lock before soft drop can engage again
    pub drop_cooldown_frames: u32,
    /// `level = floor(speed * level_factor)`
    pub level_factor: f32,
    /// Target frame rate of the main loop
    pub frames_per_second: u32,
}

impl GameConfig {
    /// Duration of one frame in milliseconds.
    pub fn frame_ms(&self) -> u64 {
        1000 / u64::from(self.frames_per_second.max(1))
    }

    /// Check every field, reporting the first one out of range.
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        let positive = [
            ("initial_speed", self.initial_speed),
            ("soft_drop_rate", self.soft_drop_rate),
            ("level_factor", self.level_factor),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(InvalidConfig::NotPositive { field, value });
            }
        }
        if !self.speed_increment.is_finite() || self.speed_increment < 0.0 {
            return Err(InvalidConfig::Negative {
                field: "speed_increment",
                value: self.speed_increment,
            });
        }
        if self.frames_per_second == 0 || self.frames_per_second > 1000 {
            return Err(InvalidConfig::FrameRate(self.frames_per_second));
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            initial_speed: INITIAL_SPEED,
            speed_increment: SPEED_INCREMENT,
            soft_drop_rate: SOFT_DROP_RATE,
            drop_cooldown_frames: DROP_COOLDOWN_FRAMES,
            level_factor: LEVEL_FACTOR,
            frames_per_second: FRAMES_PER_SECOND,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.frame_ms(), 20);
    }

    #[test]
    fn rejects_bad_values() {
        let config = GameConfig {
            initial_speed: 0.0,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(InvalidConfig::NotPositive {
                field: "initial_speed",
                value: 0.0
            })
        );

        let config = GameConfig {
            speed_increment: -0.1,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(InvalidConfig::Negative {
                field: "speed_increment",
                ..
            })
        ));

        let config = GameConfig {
            frames_per_second: 0,
            ..GameConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err, InvalidConfig::FrameRate(0));
        assert_eq!(err.to_string(), "frames_per_second must be in 1..=1000, got 0");
    }
}
