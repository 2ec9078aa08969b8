//! Score tracking and the difficulty ramp
//!
//! Scroll speed and spawn density are derived from the score, never stored.

use crate::consts::*;

/// Horizontal scroll speed (pixels/tick) at a given score
#[inline]
pub fn scroll_speed(score: u64) -> u32 {
    BASE_SPEED + (score / SPEED_SCORE_STEP) as u32
}

/// Minimum ticks between spawns at a given score
#[inline]
pub fn min_spawn_gap(score: u64) -> u64 {
    SPAWN_GAP_START
        .saturating_sub(score / SPAWN_GAP_SCORE_STEP)
        .max(SPAWN_GAP_FLOOR)
}

/// True if going from `before` to `after` lands on or crosses a milestone
pub fn crossed_milestone(before: u64, after: u64) -> bool {
    after > before && after / MILESTONE_INTERVAL > before / MILESTONE_INTERVAL
}

/// Add one tick's worth of score. Returns true when a milestone was reached.
pub fn advance(score: &mut u64) -> bool {
    let before = *score;
    *score += SCORE_PER_TICK;
    let milestone = crossed_milestone(before, *score);
    if milestone {
        log::debug!("Milestone reached at score {}", score);
    }
    milestone
}
