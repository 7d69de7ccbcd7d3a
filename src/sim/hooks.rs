//! Outbound interfaces the simulation calls into
//!
//! Hosts implement [`GameHooks`] to receive score/level updates, sound cues
//! and the single game-over notification. All calls are fire-and-forget.

use crate::tuning::Difficulty;

/// Sound cue fired at the moment of a simulation event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SoundCue {
    /// Asteroid entered play; `pan` in [-1, 1] from its x position
    Spawn { pan: f32, difficulty: Difficulty },
    /// Asteroid brushed past the moon
    NearMiss { pan: f32, difficulty: Difficulty },
    /// Moon destroyed
    Collision,
    LevelUp,
    PowerUpCollect,
    Bomb,
    /// Shield absorbed an asteroid
    ShieldBlock,
}

impl SoundCue {
    pub fn name(&self) -> &'static str {
        match self {
            SoundCue::Spawn { .. } => "spawn",
            SoundCue::NearMiss { .. } => "near-miss",
            SoundCue::Collision => "collision",
            SoundCue::LevelUp => "level-up",
            SoundCue::PowerUpCollect => "power-up-collect",
            SoundCue::Bomb => "bomb",
            SoundCue::ShieldBlock => "shield-block",
        }
    }
}

/// Callbacks from the simulation to its host
pub trait GameHooks {
    /// Called exactly once per session when the moon is destroyed
    fn on_game_over(&mut self, score: u32);

    /// Called every playing tick
    fn set_score(&mut self, _score: u32) {}

    /// Called every playing tick (1-based level)
    fn set_level(&mut self, _level: u32) {}

    fn play_sound(&mut self, _cue: SoundCue) {}

    /// Called when gameplay actually pauses (`true`) or resumes (`false`)
    fn on_pause(&mut self, _paused: bool) {}
}

/// Hooks that record every call, for headless runs and tests
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    pub game_overs: Vec<u32>,
    pub score: u32,
    pub level: u32,
    pub score_updates: usize,
    pub sounds: Vec<SoundCue>,
    /// Pause transitions in order
    pub pauses: Vec<bool>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded cues with the given name
    pub fn count(&self, name: &str) -> usize {
        self.sounds.iter().filter(|c| c.name() == name).count()
    }
}

impl GameHooks for EventLog {
    fn on_game_over(&mut self, score: u32) {
        self.game_overs.push(score);
    }

    fn set_score(&mut self, score: u32) {
        self.score = score;
        self.score_updates += 1;
    }

    fn set_level(&mut self, level: u32) {
        self.level = level;
    }

    fn play_sound(&mut self, cue: SoundCue) {
        self.sounds.push(cue);
    }

    fn on_pause(&mut self, paused: bool) {
        self.pauses.push(paused);
    }
}
