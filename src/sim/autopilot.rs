//! Idle/demo mode: a simple bot that jumps over incoming obstacles

use super::score::scroll_speed;
use super::state::GameState;

/// Jump when the next obstacle will reach the player within this many ticks
pub const LEAD_TICKS: f32 = 7.0;

/// Decide whether to jump this tick
pub fn should_jump(state: &GameState) -> bool {
    if !state.is_running() || !state.player_grounded() {
        return false;
    }

    let front = state.player.x + state.player.w;
    let reach = scroll_speed(state.score) as f32 * LEAD_TICKS;

    state
        .field
        .obstacles
        .iter()
        .map(|o| o.x - front)
        .filter(|gap| *gap >= 0.0)
        .any(|gap| gap <= reach)
}
