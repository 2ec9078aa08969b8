//! Vertical physics for the player
//!
//! Only the player's y axis is integrated. The player never moves
//! horizontally; obstacles scroll toward it instead.

use super::state::Player;

/// True when the bottom edge is at or below the ground line
#[inline]
pub fn is_grounded(player: &Player, ground_y: f32) -> bool {
    player.y + player.h >= ground_y
}

/// Advance one tick: gravity into velocity, velocity into position,
/// then clamp onto the ground.
pub fn integrate(player: &mut Player, ground_y: f32) {
    player.vy += player.gravity;
    player.y += player.vy;

    if is_grounded(player, ground_y) {
        player.rest_on(ground_y);
    }
}

/// Apply the jump impulse if grounded. Returns whether the jump happened.
pub fn try_jump(player: &mut Player, ground_y: f32) -> bool {
    if !is_grounded(player, ground_y) {
        return false;
    }
    player.vy = player.jump_power;
    true
}
