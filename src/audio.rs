//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!
//! Every simulation [`SoundCue`] maps to a handful of scheduled oscillators.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::sim::SoundCue;
use crate::tuning::Difficulty;

/// A single oscillator voice
#[derive(Debug, Clone, Copy)]
struct Tone {
    wave: OscillatorType,
    freq: f32,
    /// Frequency reached at 80% of the duration
    ramp_to: Option<f32>,
    duration: f64,
    volume: f32,
    pan: f32,
    /// Delay before the voice starts (seconds)
    offset: f64,
}

impl Tone {
    fn new(wave: OscillatorType, freq: f32, duration: f64, volume: f32) -> Self {
        Self {
            wave,
            freq,
            ramp_to: None,
            duration,
            volume,
            pan: 0.0,
            offset: 0.0,
        }
    }

    fn ramp(mut self, to: f32) -> Self {
        self.ramp_to = Some(to);
        self
    }

    fn pan(mut self, pan: f32) -> Self {
        self.pan = pan.clamp(-1.0, 1.0);
        self
    }

    fn at(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
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
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Suspend output while the game is paused
    pub fn suspend(&self) {
        if let Some(ctx) = &self.ctx {
            if ctx.state() == web_sys::AudioContextState::Running {
                let _ = ctx.suspend();
            }
        }
    }

    /// Pick up volume and mute from player settings
    pub fn apply_settings(&mut self, settings: &crate::Settings) {
        self.master_volume = settings.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
        self.muted = settings.muted;
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play the voices for a simulation cue
    pub fn play(&self, cue: SoundCue) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        for tone in voices(cue) {
            self.play_tone(ctx, tone, vol);
        }
    }

    /// Create an oscillator routed through a panner and a gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        tone: &Tone,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let panner = ctx.create_stereo_panner().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(tone.wave);
        osc.frequency().set_value(tone.freq);
        panner.pan().set_value(tone.pan);
        osc.connect_with_audio_node(&panner).ok()?;
        panner.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    fn play_tone(&self, ctx: &AudioContext, tone: Tone, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, &tone) else {
            return;
        };
        let t = ctx.current_time() + tone.offset;
        let end = t + tone.duration;

        gain.gain().set_value_at_time(tone.volume * vol, t).ok();
        gain.gain().exponential_ramp_to_value_at_time(0.001, end).ok();
        osc.frequency().set_value_at_time(tone.freq, t).ok();
        if let Some(to) = tone.ramp_to {
            osc.frequency()
                .linear_ramp_to_value_at_time(to, t + tone.duration * 0.8)
                .ok();
        }

        osc.start_with_when(t).ok();
        osc.stop_with_when(end).ok();
    }
}

// === Sound designs ===

fn voices(cue: SoundCue) -> Vec<Tone> {
    use OscillatorType::{Sawtooth, Sine, Square, Triangle};

    match cue {
        // Asteroid arrival, flavored by difficulty
        SoundCue::Spawn { pan, difficulty } => vec![
            match difficulty {
                Difficulty::Easy => Tone::new(Sine, 180.0, 0.25, 0.3),
                Difficulty::Normal => Tone::new(Triangle, 150.0, 0.2, 0.3),
                Difficulty::Hard => Tone::new(Sawtooth, 120.0, 0.15, 0.2),
            }
            .pan(pan),
        ],
        // Rising whoosh
        SoundCue::NearMiss { pan, difficulty } => {
            let (from, to, duration) = match difficulty {
                Difficulty::Easy => (600.0, 900.0, 0.15),
                Difficulty::Normal => (800.0, 1200.0, 0.1),
                Difficulty::Hard => (1000.0, 1500.0, 0.08),
            };
            vec![Tone::new(Sine, from, duration, 0.2).ramp(to).pan(pan)]
        }
        // Thud plus crackle
        SoundCue::Collision => vec![
            Tone::new(Triangle, 120.0, 0.5, 0.5).ramp(40.0),
            Tone::new(Square, 1800.0, 0.15, 0.15).ramp(200.0),
            Tone::new(Sawtooth, 90.0, 0.2, 0.25).ramp(30.0),
        ],
        // Major arpeggio
        SoundCue::LevelUp => [440.0, 554.37, 659.25, 880.0]
            .iter()
            .enumerate()
            .map(|(i, &f)| Tone::new(Triangle, f, 0.15, 0.2).at(i as f64 * 0.07))
            .collect(),
        SoundCue::PowerUpCollect => vec![
            Tone::new(Triangle, 880.0, 0.1, 0.3).ramp(1200.0),
            Tone::new(Triangle, 1108.0, 0.15, 0.3).ramp(1400.0).at(0.05),
        ],
        SoundCue::Bomb => vec![Tone::new(Sine, 100.0, 0.5, 0.8).ramp(30.0)],
        SoundCue::ShieldBlock => vec![Tone::new(Square, 400.0, 0.1, 0.2).ramp(200.0)],
    }
}
