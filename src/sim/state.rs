//! Simulation state and core entity types
//!
//! Everything a session mutates lives in [`SimulationState`]. The tick and
//! render steps both borrow it; nothing here is ever persisted.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ambient::Ambient;
use super::clock::FrameClock;
use super::effects::{ActivePowerUps, PowerUpKind};
use super::particles::ParticlePool;
use crate::consts::*;
use crate::polar_to_cartesian;
use crate::tuning::{Difficulty, DifficultySettings, LevelConfig, Tuning};

/// Session state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// No session running (title screen)
    Idle,
    /// Active gameplay
    Playing,
    /// Moon destroyed; only cosmetics advance until the flash fades
    Colliding,
    /// Session over
    GameOver,
}

/// The planet at the canvas center
#[derive(Debug, Clone)]
pub struct Planet {
    pub pos: Vec2,
    pub radius: f32,
    /// Cosmetic atmosphere band rotation
    pub atmosphere_rotation: f32,
}

/// The player-controlled moon
#[derive(Debug, Clone)]
pub struct Moon {
    /// Orbit angle in radians. Only ever increases, so it is kept in f64.
    pub angle: f64,
    pub orbit_radius: f32,
    pub radius: f32,
    /// Cosmetic self-rotation
    pub rotation: f32,
}

impl Moon {
    /// Absolute position around `center`
    pub fn position(&self, center: Vec2) -> Vec2 {
        center + polar_to_cartesian(self.orbit_radius, self.heading())
    }

    /// Orbit angle wrapped into `[0, TAU)`
    pub fn heading(&self) -> f32 {
        self.angle.rem_euclid(std::f64::consts::TAU) as f32
    }
}

/// Contracted (resting) and expanded (held) orbit radii
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitBounds {
    pub min: f32,
    pub max: f32,
}

impl OrbitBounds {
    pub fn clamp(&self, r: f32) -> f32 {
        r.clamp(self.min, self.max)
    }

    pub fn target(&self, pressing: bool) -> f32 {
        if pressing { self.max } else { self.min }
    }

    pub fn mid(&self) -> f32 {
        (self.min + self.max) * 0.5
    }
}

/// Surface detail on an asteroid (offset from its center)
#[derive(Debug, Clone, Copy)]
pub struct Crater {
    pub offset: Vec2,
    pub radius: f32,
}

/// An asteroid entity
#[derive(Debug, Clone)]
pub struct Asteroid {
    pub id: u32,
    pub pos: Vec2,
    /// px per tick
    pub vel: Vec2,
    pub radius: f32,
    /// Velocity rotation per tick (radians), zero for straight paths
    pub curve_rate: f32,
    pub rotation: f32,
    pub rotation_speed: f32,
    /// Near-miss cue already played
    pub near_miss_played: bool,
    /// 0xRRGGBB fill
    pub color: u32,
    /// 0xRRGGBB outline
    pub stroke: u32,
    /// Irregular outline in local space
    pub outline: Vec<Vec2>,
    pub craters: Vec<Crater>,
}

impl Asteroid {
    /// Move along the velocity, then bend the velocity by the curve rate
    pub fn advance(&mut self, time_scale: f32) {
        self.pos += self.vel * time_scale;
        if self.curve_rate != 0.0 {
            self.vel = crate::rotate(self.vel, self.curve_rate * time_scale);
        }
        self.rotation += self.rotation_speed * time_scale;
    }
}

/// A collectible power-up
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Ticks remaining
    pub life: f32,
    pub initial_life: f32,
    pub rotation: f32,
    pub rotation_speed: f32,
}

impl PowerUp {
    /// Fade alpha: full until half its life is spent, then fades out
    pub fn alpha(&self) -> f32 {
        if self.initial_life <= 0.0 {
            return 0.0;
        }
        (self.life / (self.initial_life * 0.5)).clamp(0.0, 1.0)
    }
}

/// Session timers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameTime {
    /// Score anchor (ms); shifted forward by pauses
    pub start: f64,
    /// Ticks since the last asteroid spawn
    pub asteroid_spawn_timer: f32,
    /// Current ticks between asteroid spawns
    pub asteroid_spawn_interval: f32,
    /// Ticks since the last power-up spawn
    pub power_up_spawn_timer: f32,
}

/// Cosmetic level-up banner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelUpBanner {
    pub alpha: f32,
    pub scale: f32,
}

impl Default for LevelUpBanner {
    fn default() -> Self {
        Self {
            alpha: 0.0,
            scale: 0.5,
        }
    }
}

/// First-run tutorial steps, driven by the press input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TutorialStep {
    /// Waiting for the player to press (expand the orbit)
    AwaitPress,
    /// Waiting for the release (contract the orbit)
    AwaitRelease,
    /// Both controls demonstrated
    Done,
}

impl TutorialStep {
    pub fn observe(self, pressing: bool) -> Self {
        match (self, pressing) {
            (TutorialStep::AwaitPress, true) => TutorialStep::AwaitRelease,
            (TutorialStep::AwaitRelease, false) => TutorialStep::Done,
            (step, _) => step,
        }
    }
}

/// Per-session options read when a session starts
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub difficulty: Difficulty,
    /// Run the tutorial first (no spawns, score held at zero)
    pub tutorial: bool,
    /// Consumable applied at session start
    pub start_power_up: Option<PowerUpKind>,
    pub max_particles: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            tutorial: false,
            start_power_up: None,
            max_particles: 500,
        }
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub tuning: Tuning,
    pub difficulty: Difficulty,
    /// Canvas size in px
    pub canvas: Vec2,
    pub planet: Planet,
    pub moon: Moon,
    pub bounds: OrbitBounds,
    pub asteroids: Vec<Asteroid>,
    pub power_ups: Vec<PowerUp>,
    pub effects: ActivePowerUps,
    pub particles: ParticlePool,
    pub ambient: Ambient,
    pub game_time: GameTime,
    /// 0-based index into the level table
    pub level_index: usize,
    pub score: u32,
    pub phase: SessionPhase,
    /// Wall-clock time the current pause began
    pub paused_at: Option<f64>,
    /// Player is holding the expand control
    pub pressing: bool,
    pub tutorial: Option<TutorialStep>,
    pub screen_flash: f32,
    pub level_up: LevelUpBanner,
    pub clock: FrameClock,
    pub rng: Pcg32,
    next_id: u32,
}

impl SimulationState {
    /// Create an idle simulation for a canvas of the given size
    pub fn new(width: f32, height: f32, tuning: Tuning, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let canvas = Vec2::new(width, height);
        let ambient = Ambient::generate(&mut rng, canvas);
        let difficulty = Difficulty::Normal;
        let initial_interval = tuning.difficulty(difficulty).initial_spawn_interval;

        let mut state = Self {
            tuning,
            difficulty,
            canvas,
            planet: Planet {
                pos: canvas * 0.5,
                radius: PLANET_MIN_RADIUS,
                atmosphere_rotation: 0.0,
            },
            moon: Moon {
                angle: 0.0,
                orbit_radius: 0.0,
                radius: MOON_MIN_RADIUS,
                rotation: 0.0,
            },
            bounds: OrbitBounds { min: 0.0, max: 0.0 },
            asteroids: Vec::new(),
            power_ups: Vec::new(),
            effects: ActivePowerUps::default(),
            particles: ParticlePool::new(SessionConfig::default().max_particles),
            ambient,
            game_time: GameTime {
                start: 0.0,
                asteroid_spawn_timer: 0.0,
                asteroid_spawn_interval: initial_interval,
                power_up_spawn_timer: 0.0,
            },
            level_index: 0,
            score: 0,
            phase: SessionPhase::Idle,
            paused_at: None,
            pressing: false,
            tutorial: None,
            screen_flash: 0.0,
            level_up: LevelUpBanner::default(),
            clock: FrameClock::new(),
            rng,
            next_id: 1,
        };
        state.apply_geometry();
        state.moon.orbit_radius = state.bounds.mid();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Recompute planet, moon and orbit geometry for a new canvas size
    pub fn resize(&mut self, width: f32, height: f32) {
        self.canvas = Vec2::new(width, height);
        self.apply_geometry();
        self.ambient = Ambient::generate(&mut self.rng, self.canvas);

        match self.phase {
            SessionPhase::Idle => self.moon.orbit_radius = self.bounds.mid(),
            _ => self.moon.orbit_radius = self.bounds.clamp(self.moon.orbit_radius),
        }
        log::debug!(
            "Resized to {}x{} (orbit {:.1}..{:.1})",
            width,
            height,
            self.bounds.min,
            self.bounds.max
        );
    }

    fn apply_geometry(&mut self) {
        let short_side = self.canvas.x.min(self.canvas.y).max(0.0);
        self.planet.pos = self.canvas * 0.5;
        self.planet.radius = (short_side * PLANET_SIZE_RATIO).max(PLANET_MIN_RADIUS);
        self.moon.radius = (self.planet.radius * MOON_SIZE_RATIO).max(MOON_MIN_RADIUS);

        let min = self.planet.radius + self.moon.radius + ORBIT_INNER_GAP;
        let max = (short_side / 2.0 - ORBIT_OUTER_GAP).max(min);
        self.bounds = OrbitBounds { min, max };
    }

    /// Reset every transient entity and begin a new playing session
    pub fn start_session(&mut self, config: &SessionConfig, now: f64) {
        self.difficulty = config.difficulty;
        self.asteroids.clear();
        self.power_ups.clear();
        self.particles.clear();
        self.particles.set_cap(config.max_particles);
        self.effects = ActivePowerUps::default();

        self.game_time = GameTime {
            start: now,
            asteroid_spawn_timer: 0.0,
            asteroid_spawn_interval: self.difficulty_settings().initial_spawn_interval,
            power_up_spawn_timer: 0.0,
        };
        self.level_index = 0;
        self.score = 0;
        self.moon.angle = 0.0;
        self.moon.rotation = 0.0;
        self.moon.orbit_radius = self.bounds.min;
        self.screen_flash = 0.0;
        self.level_up = LevelUpBanner::default();
        self.paused_at = None;
        self.pressing = false;
        self.tutorial = config.tutorial.then_some(TutorialStep::AwaitPress);
        self.phase = SessionPhase::Playing;
        self.clock.reset(now);

        if let Some(kind) = config.start_power_up {
            self.effects.grant(kind, now, &self.tuning);
            log::info!("Session starts with {:?}", kind);
        }

        log::info!(
            "Session started ({} difficulty{})",
            self.difficulty.as_str(),
            if config.tutorial { ", tutorial" } else { "" }
        );
    }

    /// Leave the tutorial and start scoring from `now`
    pub fn end_tutorial(&mut self, now: f64) {
        if self.tutorial.take().is_some() {
            self.game_time.start = now;
            log::info!("Tutorial complete");
        }
    }

    /// Abandon the current session and return to the title screen
    pub fn exit_session(&mut self) {
        self.asteroids.clear();
        self.power_ups.clear();
        self.particles.clear();
        self.effects = ActivePowerUps::default();
        self.paused_at = None;
        self.pressing = false;
        self.tutorial = None;
        self.screen_flash = 0.0;
        self.phase = SessionPhase::Idle;
        self.moon.orbit_radius = self.bounds.mid();
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// Freeze gameplay. Only a running session can be paused.
    pub fn pause(&mut self, now: f64) -> bool {
        if self.phase != SessionPhase::Playing || self.paused_at.is_some() {
            return false;
        }
        self.paused_at = Some(now);
        self.pressing = false;
        log::info!("Paused at score {}", self.score);
        true
    }

    /// Resume gameplay, shifting the score anchor and effect expiries past the pause
    pub fn resume(&mut self, now: f64) -> bool {
        let Some(paused_at) = self.paused_at.take() else {
            return false;
        };
        let gap = (now - paused_at).max(0.0);
        self.game_time.start += gap;
        self.effects.extend(gap);
        self.clock.reset(now);
        log::info!("Resumed after {:.0} ms", gap);
        true
    }

    /// Moon center in canvas coordinates
    pub fn moon_position(&self) -> Vec2 {
        self.moon.position(self.planet.pos)
    }

    /// Radius of the shield bubble around the moon
    pub fn shield_radius(&self) -> f32 {
        self.moon.radius + self.tuning.shield_gap
    }

    pub fn difficulty_settings(&self) -> &DifficultySettings {
        self.tuning.difficulty(self.difficulty)
    }

    pub fn level_config(&self) -> &LevelConfig {
        self.tuning.level(self.level_index)
    }

    /// 1-based level shown to the player
    pub fn level(&self) -> u32 {
        self.level_index as u32 + 1
    }

    /// Moon angular speed this tick (radians per tick)
    pub fn angular_speed(&self) -> f32 {
        let boost = if self.effects.boosted() {
            self.tuning.speed_boost_factor
        } else {
            1.0
        };
        self.tuning.moon_angular_speed * self.level_config().speed_multiplier * boost
    }

    /// Whether a point lies beyond the canvas by more than the despawn margin
    pub fn out_of_bounds(&self, pos: Vec2) -> bool {
        let margin = self.tuning.out_of_bounds_margin;
        pos.x < -margin
            || pos.x > self.canvas.x + margin
            || pos.y < -margin
            || pos.y > self.canvas.y + margin
    }
}
