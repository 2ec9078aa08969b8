//! Obstacle spawning, scrolling and culling

use rand::Rng;

use super::score::min_spawn_gap;
use super::state::{Obstacle, World};
use crate::consts::*;

/// Live obstacles (in arrival order) plus the countdown to the next spawn
#[derive(Debug, Clone, Default)]
pub struct ObstacleField {
    pub obstacles: Vec<Obstacle>,
    /// Ticks until the next spawn; spawns when it drops to zero or below
    pub spawn_timer: f32,
}

impl ObstacleField {
    /// Remove every obstacle and zero the countdown
    pub fn clear(&mut self) {
        self.obstacles.clear();
        self.spawn_timer = 0.0;
    }

    /// Run the countdown, spawning an obstacle when it expires
    pub fn update_spawn<R: Rng + ?Sized>(&mut self, world: &World, score: u64, rng: &mut R) {
        self.spawn_timer -= 1.0;
        if self.spawn_timer <= 0.0 {
            let obstacle = spawn_obstacle(world, rng);
            log::debug!(
                "Spawned obstacle {:.1}x{:.1} at score {}",
                obstacle.w,
                obstacle.h,
                score
            );
            self.obstacles.push(obstacle);
            self.spawn_timer = next_spawn_delay(score, rng);
        }
    }

    /// Scroll every obstacle left, then drop those past the cull margin
    pub fn scroll(&mut self, speed: u32) {
        let dx = speed as f32;
        for o in &mut self.obstacles {
            o.x -= dx;
        }
        self.obstacles.retain(|o| o.right() > -OBSTACLE_CULL_MARGIN);
    }

    /// One tick of the spawner: countdown, scroll, cull
    pub fn step<R: Rng + ?Sized>(&mut self, world: &World, score: u64, speed: u32, rng: &mut R) {
        self.update_spawn(world, score, rng);
        self.scroll(speed);
    }
}

/// Build a new obstacle just past the right edge, resting on the ground
pub fn spawn_obstacle<R: Rng + ?Sized>(world: &World, rng: &mut R) -> Obstacle {
    let w = sample_half_open(
        rng,
        OBSTACLE_MIN_WIDTH,
        OBSTACLE_MIN_WIDTH + OBSTACLE_WIDTH_RANGE,
    );
    let h = sample_half_open(
        rng,
        OBSTACLE_MIN_HEIGHT,
        OBSTACLE_MIN_HEIGHT + OBSTACLE_HEIGHT_RANGE,
    );
    Obstacle {
        x: world.width + OBSTACLE_SPAWN_OFFSET,
        y: world.ground_y() - h,
        w,
        h,
    }
}

/// Ticks until the following spawn, somewhere in [min_gap, max_gap)
pub fn next_spawn_delay<R: Rng + ?Sized>(score: u64, rng: &mut R) -> f32 {
    sample_half_open(rng, min_spawn_gap(score) as f32, SPAWN_GAP_MAX)
}

/// Uniform draw in `[low, high)` for `0 <= low < high`
pub fn sample_half_open<R: Rng + ?Sized>(rng: &mut R, low: f32, high: f32) -> f32 {
    let v = rng.random_range(low..high);
    // f32 rounding can land exactly on `high`; step back one ulp
    if v < high {
        v
    } else {
        f32::from_bits(high.to_bits() - 1).max(low)
    }
}
