//! Game state and core simulation types
//!
//! Everything the tick mutates lives in [`GameState`]; nothing is global.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::animation::{Animator, Pose};
use super::collision::Rect;
use super::spawner::ObstacleField;
use crate::consts::*;

/// Top-level run state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Simulation advances every tick
    Running,
    /// Run ended; state is frozen until reset
    GameOver,
}

/// Discrete side effects emitted by the simulation for the adapters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A jump was accepted
    Jump,
    /// Score crossed a milestone boundary
    Milestone,
    /// The player hit an obstacle
    GameOver,
}

impl GameEvent {
    /// Audio cue name for this event
    pub fn cue_name(&self) -> &'static str {
        match self {
            GameEvent::Jump => "jump",
            GameEvent::Milestone => "score",
            GameEvent::GameOver => "gameover",
        }
    }
}

/// Playfield dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub width: f32,
    pub height: f32,
}

impl Default for World {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
        }
    }
}

impl World {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Y coordinate of the ground line (hard floor)
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.height - GROUND_OFFSET
    }
}

/// The player-controlled runner. Only vertical motion is simulated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub vy: f32,
    pub w: f32,
    pub h: f32,
    pub gravity: f32,
    pub jump_power: f32,
}

impl Player {
    /// A player resting on the ground
    pub fn new(ground_y: f32) -> Self {
        Self {
            x: PLAYER_X,
            y: ground_y - PLAYER_HEIGHT,
            vy: 0.0,
            w: PLAYER_WIDTH,
            h: PLAYER_HEIGHT,
            gravity: GRAVITY,
            jump_power: JUMP_POWER,
        }
    }

    /// Put the player back at rest on the ground
    pub fn rest_on(&mut self, ground_y: f32) {
        self.y = ground_y - self.h;
        self.vy = 0.0;
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}

/// An obstacle scrolling toward the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Obstacle {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }

    /// X coordinate of the trailing (right) edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    /// Playfield
    pub world: World,
    /// Running or GameOver
    pub phase: Phase,
    pub player: Player,
    /// Live obstacles and the spawn countdown
    pub field: ObstacleField,
    /// Score of the current run
    pub score: u64,
    /// Best completed-run score this session
    pub best: u64,
    /// Run-cycle animation counters
    pub anim: Animator,
    /// Ticks simulated in the current run
    pub time_ticks: u64,
    /// Spawn randomness
    pub rng: Pcg32,
}

impl GameState {
    /// Create a running game on the default field
    pub fn new(seed: u64) -> Self {
        Self::with_world(seed, World::default())
    }

    /// Create a running game on the given field
    pub fn with_world(seed: u64, world: World) -> Self {
        Self {
            seed,
            world,
            phase: Phase::Running,
            player: Player::new(world.ground_y()),
            field: ObstacleField::default(),
            score: 0,
            best: 0,
            anim: Animator::default(),
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Start a fresh run. `best` and the RNG stream carry over.
    pub fn reset(&mut self) {
        self.phase = Phase::Running;
        self.score = 0;
        self.time_ticks = 0;
        self.field.clear();
        self.player.rest_on(self.world.ground_y());
        self.anim.reset();
        log::info!("Run started (seed {}, best {})", self.seed, self.best);
    }

    /// Jump command. Accepted only while running and grounded.
    pub fn jump(&mut self) -> Option<GameEvent> {
        if !self.is_running() {
            return None;
        }
        super::physics::try_jump(&mut self.player, self.world.ground_y())
            .then_some(GameEvent::Jump)
    }

    /// Running -> GameOver. Records the run's score into `best`.
    pub fn end_run(&mut self) -> Option<GameEvent> {
        if !self.is_running() {
            return None;
        }
        self.phase = Phase::GameOver;
        self.best = self.best.max(self.score);
        log::info!("Game over: score {}, best {}", self.score, self.best);
        Some(GameEvent::GameOver)
    }

    /// True when the player's bottom edge is on (or past) the ground
    pub fn player_grounded(&self) -> bool {
        super::physics::is_grounded(&self.player, self.world.ground_y())
    }

    /// Pose for the current state, without advancing the run cycle
    pub fn pose(&self) -> Pose {
        self.anim
            .pose(self.phase, self.player_grounded(), self.player.vy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_running_at_rest() {
        let state = GameState::new(1);
        assert_eq!(state.phase, Phase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.best, 0);
        assert!(state.field.obstacles.is_empty());
        assert_eq!(state.player.y + state.player.h, state.world.ground_y());
        assert_eq!(state.player.vy, 0.0);
        assert!(state.player_grounded());
    }

    #[test]
    fn test_ground_y_from_field_height() {
        assert_eq!(World::default().ground_y(), 240.0);
        assert_eq!(World::new(640.0, 480.0).ground_y(), 420.0);
    }

    #[test]
    fn test_jump_rejected_when_game_over() {
        let mut state = GameState::new(1);
        state.end_run();
        assert_eq!(state.jump(), None);
        assert_eq!(state.player.vy, 0.0);
    }

    #[test]
    fn test_end_run_keeps_higher_best() {
        let mut state = GameState::new(1);
        state.best = 500;
        state.score = 120;
        assert_eq!(state.end_run(), Some(GameEvent::GameOver));
        assert_eq!(state.best, 500);

        // Already over: no second transition
        assert_eq!(state.end_run(), None);
    }

    #[test]
    fn test_reset_keeps_seed_and_best() {
        let mut state = GameState::new(77);
        state.score = 300;
        state.end_run();
        state.reset();
        assert_eq!(state.seed, 77);
        assert_eq!(state.best, 300);
        assert_eq!(state.score, 0);
        assert!(state.is_running());
    }

    #[test]
    fn test_cue_names() {
        assert_eq!(GameEvent::Jump.cue_name(), "jump");
        assert_eq!(GameEvent::Milestone.cue_name(), "score");
        assert_eq!(GameEvent::GameOver.cue_name(), "gameover");
    }
}
