//! Raw input to game commands

use crate::sim::{GameEvent, GameState, Phase, autopilot};

/// What a key press or pointer press asks the game to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Jump,
    /// Start a new run (allowed at any time)
    Reset,
    ToggleAutopilot,
    ToggleMute,
}

impl Command {
    /// Map a `KeyboardEvent.code` value
    pub fn from_key_code(code: &str) -> Option<Self> {
        match code {
            "Space" => Some(Command::Jump),
            "KeyR" => Some(Command::Reset),
            "KeyI" => Some(Command::ToggleAutopilot),
            "KeyM" => Some(Command::ToggleMute),
            _ => None,
        }
    }

    /// Mouse or touch press: restart after a game over, jump otherwise
    pub fn from_pointer(phase: Phase) -> Self {
        match phase {
            Phase::GameOver => Command::Reset,
            Phase::Running => Command::Jump,
        }
    }
}

/// Input-side state that is not part of the simulation
#[derive(Debug, Clone, Default)]
pub struct Controls {
    pub autopilot: bool,
}

impl Controls {
    /// Apply a gameplay command. Mute is left to the caller, which owns audio.
    pub fn apply(&mut self, command: Command, state: &mut GameState) -> Option<GameEvent> {
        match command {
            Command::Jump => state.jump(),
            Command::Reset => {
                state.reset();
                None
            }
            Command::ToggleAutopilot => {
                self.autopilot = !self.autopilot;
                log::info!("Autopilot: {}", self.autopilot);
                None
            }
            Command::ToggleMute => None,
        }
    }

    /// Jump for the player when autopilot is on and an obstacle is close
    pub fn drive(&self, state: &mut GameState) -> Option<GameEvent> {
        if self.autopilot && autopilot::should_jump(state) {
            state.jump()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tick;

    #[test]
    fn test_key_codes() {
        assert_eq!(Command::from_key_code("Space"), Some(Command::Jump));
        assert_eq!(Command::from_key_code("KeyR"), Some(Command::Reset));
        assert_eq!(Command::from_key_code("KeyI"), Some(Command::ToggleAutopilot));
        assert_eq!(Command::from_key_code("KeyM"), Some(Command::ToggleMute));
        assert_eq!(Command::from_key_code("ArrowUp"), None);
    }

    #[test]
    fn test_pointer_depends_on_phase() {
        assert_eq!(Command::from_pointer(Phase::Running), Command::Jump);
        assert_eq!(Command::from_pointer(Phase::GameOver), Command::Reset);
    }

    #[test]
    fn test_jump_command_emits_cue() {
        let mut controls = Controls::default();
        let mut state = GameState::new(3);
        assert_eq!(
            controls.apply(Command::Jump, &mut state),
            Some(GameEvent::Jump)
        );
        // Airborne after a tick, so a second jump is refused
        tick(&mut state);
        assert_eq!(controls.apply(Command::Jump, &mut state), None);
    }

    #[test]
    fn test_reset_restarts_after_game_over() {
        let mut controls = Controls::default();
        let mut state = GameState::new(3);
        state.score = 50;
        state.end_run();

        let cmd = Command::from_pointer(state.phase);
        controls.apply(cmd, &mut state);
        assert!(state.is_running());
        assert_eq!(state.score, 0);
        assert_eq!(state.best, 50);
    }

    #[test]
    fn test_autopilot_toggle_gates_drive() {
        let mut controls = Controls::default();
        let mut state = GameState::new(3);
        state.field.obstacles.push(crate::sim::Obstacle {
            x: 150.0,
            y: state.world.ground_y() - 40.0,
            w: 30.0,
            h: 40.0,
        });

        assert_eq!(controls.drive(&mut state), None);
        controls.apply(Command::ToggleAutopilot, &mut state);
        assert!(controls.autopilot);
        assert_eq!(controls.drive(&mut state), Some(GameEvent::Jump));
    }
}
