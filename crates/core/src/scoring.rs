//! Scoring module - line clear points and level progression
//!
//! Points double with every extra line cleared by a single lock:
//! 1 line = 100, 2 = 200, 3 = 400, 4 = 800. The level is a function of the
//! gravity speed rather than of lines cleared.

use crate::types::LINE_CLEAR_BASE_SCORE;

/// Points for clearing `lines` rows with one locked piece (`50 << lines`).
///
/// A piece spans at most four rows, so larger counts never occur in play;
/// they saturate instead of overflowing.
pub fn line_clear_score(lines: u32) -> u32 {
    if lines == 0 {
        return 0;
    }
    LINE_CLEAR_BASE_SCORE
        .checked_shl(lines)
        .filter(|score| score >> lines == LINE_CLEAR_BASE_SCORE)
        .unwrap_or(u32::MAX)
}

/// Displayed level for a gravity speed: `floor(speed * factor)`.
pub fn level_for_speed(speed: f32, factor: f32) -> u32 {
    (speed * factor).floor().max(0.0) as u32
}
