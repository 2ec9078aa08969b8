//! Animation state selection
//!
//! The pose is recomputed from physics and phase every tick; it never feeds
//! back into the simulation. Only the run-cycle counters carry over.

use serde::{Deserialize, Serialize};

use super::state::Phase;
use crate::consts::{ANIM_SPEED, RUN_FRAMES};

/// Visual pose of the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pose {
    /// Standing still (also shown after game over)
    Idle,
    /// Running on the ground; carries the cycle index 0..3
    Run(u8),
    /// Airborne and rising
    Jump,
    /// Airborne and falling
    Fall,
}

impl Pose {
    /// Pick the pose for the current state. `run_frame` is only used for `Run`.
    pub fn resolve(phase: Phase, grounded: bool, vy: f32, run_frame: u8) -> Self {
        match phase {
            Phase::GameOver => Pose::Idle,
            Phase::Running if !grounded => {
                if vy < 0.0 {
                    Pose::Jump
                } else {
                    Pose::Fall
                }
            }
            Phase::Running => Pose::Run(run_frame),
        }
    }

    /// Sprite sheet frame index (0..6)
    pub fn frame_index(&self) -> u32 {
        match self {
            Pose::Idle => 0,
            Pose::Run(i) => 1 + (*i % RUN_FRAMES) as u32,
            Pose::Jump => 4,
            Pose::Fall => 5,
        }
    }
}

/// Run-cycle counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animator {
    /// Index into the run cycle (0..3)
    pub run_frame: u8,
    /// Ticks spent on the current run frame
    pub anim_tick: u32,
}

impl Animator {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Advance the run cycle by one tick
    pub fn advance(&mut self) {
        self.anim_tick += 1;
        if self.anim_tick >= ANIM_SPEED {
            self.anim_tick = 0;
            self.run_frame = (self.run_frame + 1) % RUN_FRAMES;
        }
    }

    /// Resolve this tick's pose, advancing the cycle only while running on the ground
    pub fn step(&mut self, phase: Phase, grounded: bool, vy: f32) -> Pose {
        if matches!(Pose::resolve(phase, grounded, vy, self.run_frame), Pose::Run(_)) {
            self.advance();
        }
        self.pose(phase, grounded, vy)
    }

    /// Current pose without advancing anything
    pub fn pose(&self, phase: Phase, grounded: bool, vy: f32) -> Pose {
        Pose::resolve(phase, grounded, vy, self.run_frame)
    }
}
