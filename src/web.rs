//! Browser bridge
//!
//! The host page owns the canvas, the input listeners and the
//! `requestAnimationFrame` loop. Each frame it calls [`WebSession::frame`]
//! with the rAF timestamp and uploads [`WebSession::vertices`].

use wasm_bindgen::prelude::*;

use crate::audio::AudioManager;
use crate::highscores::HighScores;
use crate::renderer::{Vertex, build_frame};
use crate::settings::Settings;
use crate::sim::{GameHooks, SessionPhase, SimulationState, SoundCue, TickInput, tick};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Planet Orbit starting...");
}

/// Host-side effects of the simulation
struct WebHooks {
    audio: AudioManager,
    on_game_over: Option<js_sys::Function>,
    /// Final score waiting to be recorded
    finished: Option<u32>,
}

impl GameHooks for WebHooks {
    fn on_game_over(&mut self, score: u32) {
        self.finished = Some(score);
        if let Some(callback) = &self.on_game_over {
            if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from(score)) {
                log::warn!("Game over callback failed: {:?}", e);
            }
        }
    }

    fn play_sound(&mut self, cue: SoundCue) {
        self.audio.play(cue);
    }

    fn on_pause(&mut self, paused: bool) {
        if paused {
            self.audio.suspend();
        } else {
            self.audio.resume();
        }
    }
}

/// One game instance bound to a canvas
#[wasm_bindgen]
pub struct WebSession {
    state: SimulationState,
    settings: Settings,
    scores: HighScores,
    hooks: WebHooks,
    input: TickInput,
    vertices: Vec<Vertex>,
    clear_color: [f32; 4],
}

#[wasm_bindgen]
impl WebSession {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, seed: f64) -> WebSession {
        let settings = Settings::load();
        let mut audio = AudioManager::new();
        audio.apply_settings(&settings);

        WebSession {
            state: SimulationState::new(width, height, Tuning::default(), seed as u64),
            settings,
            scores: HighScores::load(),
            hooks: WebHooks {
                audio,
                on_game_over: None,
                finished: None,
            },
            input: TickInput {
                autopilot: true,
                ..Default::default()
            },
            vertices: Vec::new(),
            clear_color: [0.0, 0.0, 0.0, 1.0],
        }
    }

    /// Register `callback(score)`, invoked once when the moon is destroyed
    pub fn set_game_over_callback(&mut self, callback: js_sys::Function) {
        self.hooks.on_game_over = Some(callback);
    }

    /// Begin a session with the current settings snapshot
    pub fn start(&mut self, now: f64) {
        self.settings = Settings::load();
        self.hooks.audio.apply_settings(&self.settings);
        self.hooks.audio.resume();

        let config = self.settings.session_config();
        if config.start_power_up.is_some() {
            // Consumables are single use
            self.settings.equipped_consumable = None;
            self.settings.save();
        }
        self.state.start_session(&config, now);
        self.input = TickInput::default();
        self.hooks.finished = None;
    }

    /// Leave the current session and return to the attract loop
    pub fn exit(&mut self) {
        self.state.exit_session();
        self.input = TickInput {
            autopilot: true,
            ..Default::default()
        };
    }

    /// Advance to `now` (ms) and rebuild the vertex buffer
    pub fn frame(&mut self, now: f64) {
        let in_tutorial = self.state.tutorial.is_some();
        tick(&mut self.state, &self.input, now, &mut self.hooks);
        self.input.pause = false;

        if in_tutorial && self.state.tutorial.is_none() {
            self.settings.tutorial = false;
            self.settings.save();
        }

        if let Some(score) = self.hooks.finished.take() {
            let timestamp = js_sys::Date::now();
            self.scores
                .record_game(score, self.state.level(), self.state.difficulty, timestamp);
            self.scores.save();
        }

        let frame = build_frame(&self.state, &self.settings, now);
        self.vertices = frame.vertices;
        self.clear_color = frame.clear_color;
    }

    pub fn set_pressing(&mut self, pressing: bool) {
        self.input.pressing = pressing;
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        self.input.autopilot = enabled;
    }

    pub fn pause(&mut self, now: f64) -> bool {
        let paused = self.state.pause(now);
        if paused {
            self.hooks.on_pause(true);
        }
        paused
    }

    pub fn resume(&mut self, now: f64) -> bool {
        let resumed = self.state.resume(now);
        if resumed {
            self.hooks.on_pause(false);
        }
        resumed
    }

    /// Toggle pause on the next frame (keyboard shortcut). Audio follows
    /// through [`GameHooks::on_pause`] like the direct calls above.
    pub fn toggle_pause(&mut self) {
        self.input.pause = true;
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.resize(width, height);
    }

    /// Interleaved `x, y, r, g, b, a` triangle list in canvas pixels
    pub fn vertices(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(Vertex::as_floats(&self.vertices))
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn clear_color(&self) -> Vec<f32> {
        self.clear_color.to_vec()
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn level(&self) -> u32 {
        self.state.level()
    }

    pub fn phase(&self) -> String {
        match self.state.phase {
            SessionPhase::Idle => "idle",
            SessionPhase::Playing if self.state.is_paused() => "paused",
            SessionPhase::Playing => "playing",
            SessionPhase::Colliding => "colliding",
            SessionPhase::GameOver => "gameOver",
        }
        .to_string()
    }

    /// Best score for the selected difficulty
    pub fn best(&self) -> u32 {
        self.scores.best(self.settings.difficulty)
    }

    pub fn credits(&self) -> u32 {
        self.scores.credits
    }

    /// Re-read settings after the page edited them
    pub fn reload_settings(&mut self) {
        self.settings = Settings::load();
        self.hooks.audio.apply_settings(&self.settings);
    }
}
