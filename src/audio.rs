//! Sound cues
//!
//! Procedurally generated with Web Audio oscillators in the browser; silent
//! on native. Browsers block audio until a user gesture, so cues are dropped
//! (not queued) until [`AudioManager::unlock`] is called.

#[cfg(target_arch = "wasm32")]
use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Audio manager for the game
pub struct AudioManager {
    #[cfg(target_arch = "wasm32")]
    ctx: Option<AudioContext>,
    unlocked: bool,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self::from_settings(&Settings::default())
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut audio = Self {
            #[cfg(target_arch = "wasm32")]
            ctx: None,
            unlocked: false,
            master_volume: 1.0,
            sfx_volume: 1.0,
            muted: false,
        };
        audio.apply_settings(settings);
        audio
    }

    /// Pick up volume and mute changes
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_muted(settings.muted);
    }

    /// Called on every user gesture. Only the first one does anything.
    pub fn unlock(&mut self) {
        if self.unlocked {
            return;
        }
        self.unlocked = true;

        #[cfg(target_arch = "wasm32")]
        {
            // Creating the context inside the gesture handler lets it start running
            self.ctx = AudioContext::new().ok();
            match &self.ctx {
                Some(ctx) => {
                    let _ = ctx.resume();
                }
                None => log::warn!("Failed to create AudioContext - audio disabled"),
            }
        }

        log::debug!("Audio unlocked");
    }

    #[inline]
    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play the cue for a game event. Returns false when the cue was dropped.
    pub fn play(&self, event: GameEvent) -> bool {
        if !self.unlocked {
            return false;
        }
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return false;
        }
        self.play_backend(event, vol)
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn play_backend(&self, event: GameEvent, _vol: f32) -> bool {
        log::trace!("cue {}", event.cue_name());
        true
    }

    #[cfg(target_arch = "wasm32")]
    fn play_backend(&self, event: GameEvent, vol: f32) -> bool {
        let Some(ctx) = &self.ctx else { return false };

        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match event {
            GameEvent::Jump => play_jump(ctx, vol),
            GameEvent::Milestone => play_score(ctx, vol),
            GameEvent::GameOver => play_game_over(ctx, vol),
        }
        true
    }
}

// === Sound generators ===

/// Create an oscillator with gain envelope
#[cfg(target_arch = "wasm32")]
fn create_osc(
    ctx: &AudioContext,
    freq: f32,
    osc_type: OscillatorType,
) -> Option<(OscillatorNode, GainNode)> {
    let osc = ctx.create_oscillator().ok()?;
    let gain = ctx.create_gain().ok()?;

    osc.set_type(osc_type);
    osc.frequency().set_value(freq);
    osc.connect_with_audio_node(&gain).ok()?;
    gain.connect_with_audio_node(&ctx.destination()).ok()?;

    Some((osc, gain))
}

/// Jump - quick upward chirp
#[cfg(target_arch = "wasm32")]
fn play_jump(ctx: &AudioContext, vol: f32) {
    let Some((osc, gain)) = create_osc(ctx, 300.0, OscillatorType::Square) else {
        return;
    };
    let t = ctx.current_time();

    gain.gain().set_value_at_time(vol * 0.3, t).ok();
    gain.gain()
        .exponential_ramp_to_value_at_time(0.01, t + 0.12)
        .ok();
    osc.frequency().set_value_at_time(300.0, t).ok();
    osc.frequency()
        .exponential_ramp_to_value_at_time(700.0, t + 0.1)
        .ok();

    osc.start().ok();
    osc.stop_with_when(t + 0.15).ok();
}

/// Milestone - two-note ding
#[cfg(target_arch = "wasm32")]
fn play_score(ctx: &AudioContext, vol: f32) {
    for (i, freq) in [880.0, 1320.0].iter().enumerate() {
        let delay = i as f64 * 0.08;
        if let Some((osc, gain)) = create_osc(ctx, *freq, OscillatorType::Triangle) {
            let t = ctx.current_time() + delay;
            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                .ok();
            osc.start_with_when(t).ok();
            osc.stop_with_when(t + 0.2).ok();
        }
    }
}

/// Game over - sad descending
#[cfg(target_arch = "wasm32")]
fn play_game_over(ctx: &AudioContext, vol: f32) {
    for (i, freq) in [400.0, 300.0, 200.0].iter().enumerate() {
        let delay = i as f64 * 0.15;
        if let Some((osc, gain)) = create_osc(ctx, *freq, OscillatorType::Sine) {
            let t = ctx.current_time() + delay;
            gain.gain().set_value_at_time(vol * 0.4, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                .ok();
            osc.start_with_when(t).ok();
            osc.stop_with_when(t + 0.3).ok();
        }
    }
}
