//! Scoring, leveling and the speed curve.
//!
//! Score depends only on how many rows a single lock cleared. Level is
//! derived from total score and capped; speed (gravity frames per row)
//! strictly tightens as the level rises, floored so the game stays
//! playable.

use blockfall_types::{CLEAR_SCORES, LEVEL_MAX, LEVEL_MIN, SCORE_PER_LEVEL, SPEED_MAX, SPEED_MIN};

/// Points awarded for clearing `rows` rows in one lock event.
pub fn score_for_clear(rows: usize) -> u32 {
    CLEAR_SCORES[rows.min(CLEAR_SCORES.len() - 1)]
}

/// Level for a total score: one step per 600 points, capped at 10.
pub fn level_for_score(score: u32) -> u32 {
    (score / SCORE_PER_LEVEL + LEVEL_MIN).min(LEVEL_MAX)
}

/// Gravity frames per row at a level: 12 at level 1, one fewer per
/// level, floored at 2.
pub fn speed_for_level(level: u32) -> u32 {
    SPEED_MAX.saturating_sub(level.saturating_sub(LEVEL_MIN)).max(SPEED_MIN)
}
