//! Hop Runner - a side-scrolling obstacle runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, scoring, animation)
//! - `renderer`: Draw-call boundary and WebGPU rendering pipeline
//! - `sprite`: Sprite sheet readiness and frame cropping
//! - `audio`: Cue playback gated behind a user gesture
//! - `platform`: Raw input to game command mapping
//! - `settings`: Persisted player preferences

pub mod audio;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod sprite;

pub use settings::Settings;
pub use sprite::SpriteSheet;

/// Game configuration constants
pub mod consts {
    /// Default field size (matches the browser canvas)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 300.0;
    /// Ground line sits this far above the bottom of the field
    pub const GROUND_OFFSET: f32 = 60.0;
    /// Thickness of the drawn ground line
    pub const GROUND_LINE_THICKNESS: f32 = 3.0;

    /// Player defaults
    pub const PLAYER_X: f32 = 80.0;
    pub const PLAYER_WIDTH: f32 = 48.0;
    pub const PLAYER_HEIGHT: f32 = 48.0;
    /// Added to vertical velocity every tick (pixels/tick²)
    pub const GRAVITY: f32 = 0.9;
    /// Vertical velocity set by a jump (negative is up)
    pub const JUMP_POWER: f32 = -14.0;

    /// Obstacle size ranges (half-open)
    pub const OBSTACLE_MIN_WIDTH: f32 = 20.0;
    pub const OBSTACLE_WIDTH_RANGE: f32 = 25.0;
    pub const OBSTACLE_MIN_HEIGHT: f32 = 30.0;
    pub const OBSTACLE_HEIGHT_RANGE: f32 = 35.0;
    /// Obstacles enter this far past the right edge
    pub const OBSTACLE_SPAWN_OFFSET: f32 = 10.0;
    /// Obstacles are culled once fully this far past the left edge
    pub const OBSTACLE_CULL_MARGIN: f32 = 20.0;

    /// Spawn gap bounds, in ticks
    pub const SPAWN_GAP_MAX: f32 = 140.0;
    pub const SPAWN_GAP_START: u64 = 90;
    pub const SPAWN_GAP_FLOOR: u64 = 35;
    /// Score points per one-tick reduction of the minimum spawn gap
    pub const SPAWN_GAP_SCORE_STEP: u64 = 200;

    /// Scroll speed at score 0 (pixels/tick)
    pub const BASE_SPEED: u32 = 6;
    /// Score points per +1 scroll speed
    pub const SPEED_SCORE_STEP: u64 = 400;

    /// Score added per running tick
    pub const SCORE_PER_TICK: u64 = 1;
    /// Milestone cue interval
    pub const MILESTONE_INTERVAL: u64 = 200;

    /// Ticks per run-cycle frame advance (smaller = faster)
    pub const ANIM_SPEED: u32 = 6;
    /// Number of frames in the run cycle
    pub const RUN_FRAMES: u8 = 3;

    /// Sprite sheet grid
    pub const SHEET_COLS: u32 = 2;
    pub const SHEET_ROWS: u32 = 3;
}
