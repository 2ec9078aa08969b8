//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per display frame, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (obstacles stay in arrival order)
//! - No rendering, audio or platform dependencies

pub mod animation;
pub mod autopilot;
pub mod collision;
pub mod physics;
pub mod score;
pub mod spawner;
pub mod state;
pub mod tick;

pub use animation::{Animator, Pose};
pub use collision::{Rect, first_hit};
pub use score::{min_spawn_gap, scroll_speed};
pub use spawner::ObstacleField;
pub use state::{GameEvent, GameState, Obstacle, Phase, Player, World};
pub use tick::{TickOutcome, tick};
