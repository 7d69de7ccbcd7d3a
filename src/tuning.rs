//! Data-driven game balance
//!
//! Every per-tick constant is expressed in 60 Hz "ticks" and scaled by the
//! frame's time scale at the call site. Durations measured against the wall
//! clock are in milliseconds.

use serde::{Deserialize, Serialize};

/// Difficulty selected by the player for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "medium" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// Per-difficulty spawn and motion parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultySettings {
    /// Asteroid spawn interval at session start (ticks)
    pub initial_spawn_interval: f32,
    /// Floor for the spawn interval before the level multiplier (ticks)
    pub min_spawn_interval: f32,
    /// Asteroid speed (px per tick) before level and random factors
    pub base_speed: f32,
    /// Carried for hosts that rate runs; not used by the simulation
    pub score_divider: u32,
    /// Aim deviation as a fraction of the current orbit radius
    #[serde(default)]
    pub aim_deviation: f32,
    /// Largest |curve rate| (radians per tick) assigned to asteroids
    #[serde(default)]
    pub curve_strength: f32,
}

impl DifficultySettings {
    pub fn easy() -> Self {
        Self {
            initial_spawn_interval: 120.0,
            min_spawn_interval: 50.0,
            base_speed: 1.2,
            score_divider: 2500,
            aim_deviation: 0.0,
            curve_strength: 0.0,
        }
    }

    pub fn normal() -> Self {
        Self {
            initial_spawn_interval: 100.0,
            min_spawn_interval: 30.0,
            base_speed: 1.5,
            score_divider: 2000,
            aim_deviation: 0.4,
            curve_strength: 0.003,
        }
    }

    pub fn hard() -> Self {
        Self {
            initial_spawn_interval: 80.0,
            min_spawn_interval: 20.0,
            base_speed: 1.8,
            score_divider: 1500,
            aim_deviation: 0.8,
            curve_strength: 0.008,
        }
    }
}

/// Difficulty lookup table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyTable {
    pub easy: DifficultySettings,
    pub normal: DifficultySettings,
    pub hard: DifficultySettings,
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self {
            easy: DifficultySettings::easy(),
            normal: DifficultySettings::normal(),
            hard: DifficultySettings::hard(),
        }
    }
}

impl DifficultyTable {
    pub fn get(&self, difficulty: Difficulty) -> &DifficultySettings {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Normal => &self.normal,
            Difficulty::Hard => &self.hard,
        }
    }

    pub fn get_mut(&mut self, difficulty: Difficulty) -> &mut DifficultySettings {
        match difficulty {
            Difficulty::Easy => &mut self.easy,
            Difficulty::Normal => &mut self.normal,
            Difficulty::Hard => &mut self.hard,
        }
    }
}

/// One row of the level table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Score at which this level begins
    pub threshold: u32,
    /// Multiplies asteroid speed and moon angular speed
    pub speed_multiplier: f32,
    /// Multiplies the spawn-interval floor
    pub spawn_multiplier: f32,
}

/// Used when a tuning file supplies an empty level table
const BASE_LEVEL: LevelConfig = LevelConfig {
    threshold: 0,
    speed_multiplier: 1.0,
    spawn_multiplier: 1.0,
};

fn default_levels() -> Vec<LevelConfig> {
    [
        (0, 1.0, 1.0),
        (150, 1.15, 0.9),
        (350, 1.3, 0.8),
        (600, 1.45, 0.7),
        (900, 1.6, 0.6),
        (1300, 1.75, 0.5),
        (1800, 1.9, 0.45),
        (2500, 2.0, 0.4),
    ]
    .into_iter()
    .map(|(threshold, speed_multiplier, spawn_multiplier)| LevelConfig {
        threshold,
        speed_multiplier,
        spawn_multiplier,
    })
    .collect()
}

/// Complete balance sheet for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub difficulties: DifficultyTable,
    /// Ordered by ascending threshold
    pub levels: Vec<LevelConfig>,

    // === Moon ===
    /// Angular speed at level 1 (radians per tick)
    pub moon_angular_speed: f32,
    /// Angular speed multiplier while speed boost is active
    pub speed_boost_factor: f32,
    /// Fraction of the gap to the target orbit closed per tick
    pub orbit_lerp_rate: f32,
    /// Cosmetic self-rotation (radians per tick)
    pub moon_spin: f32,

    // === Asteroids ===
    /// Spawn interval reduction applied at every spawn (ticks)
    pub spawn_interval_step: f32,
    pub asteroid_min_radius: u32,
    pub asteroid_max_radius: u32,
    pub asteroid_speed_min: f32,
    pub asteroid_speed_max: f32,
    /// Largest |rotation speed| (radians per tick)
    pub asteroid_spin_max: f32,
    /// Distance beyond the canvas at which entities are dropped
    pub out_of_bounds_margin: f32,
    /// Extra distance around the moon that counts as a near miss
    pub near_miss_margin: f32,

    // === Power-ups ===
    /// Ticks between power-up spawns
    pub power_up_interval: f32,
    /// Ticks a power-up stays on screen
    pub power_up_life: f32,
    pub power_up_radius: f32,
    pub power_up_speed: f32,
    pub power_up_spin_max: f32,
    pub shield_duration_ms: f64,
    pub speed_boost_duration_ms: f64,
    /// Shield radius beyond the moon surface
    pub shield_gap: f32,

    // === Attract loop ===
    /// Ticks between title-screen asteroids
    pub attract_spawn_interval: f32,
    /// Speed multiplier for title-screen asteroids
    pub attract_speed_factor: f32,

    // === Cosmetics ===
    /// Velocity retained per tick by particles
    pub particle_drag: f32,
    /// Screen flash alpha lost per tick
    pub flash_decay: f32,
    /// Level-up banner alpha lost per tick
    pub level_up_fade: f32,
    /// Level-up banner scale gained per tick
    pub level_up_growth: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            difficulties: DifficultyTable::default(),
            levels: default_levels(),

            moon_angular_speed: 0.02,
            speed_boost_factor: 1.5,
            orbit_lerp_rate: 0.06,
            moon_spin: 0.05,

            spawn_interval_step: 0.5,
            asteroid_min_radius: 10,
            asteroid_max_radius: 25,
            asteroid_speed_min: 0.8,
            asteroid_speed_max: 1.3,
            asteroid_spin_max: 0.025,
            out_of_bounds_margin: 100.0,
            near_miss_margin: 30.0,

            power_up_interval: 900.0,
            power_up_life: 600.0,
            power_up_radius: 18.0,
            power_up_speed: 1.0,
            power_up_spin_max: 0.02,
            shield_duration_ms: 10_000.0,
            speed_boost_duration_ms: 5_000.0,
            shield_gap: 8.0,

            attract_spawn_interval: 120.0,
            attract_speed_factor: 0.3,

            particle_drag: 0.98,
            flash_decay: 0.05,
            level_up_fade: 0.02,
            level_up_growth: 0.01,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut tuning: Tuning = serde_json::from_str(json)?;
        tuning.levels.sort_by_key(|l| l.threshold);
        Ok(tuning)
    }

    pub fn difficulty(&self, difficulty: Difficulty) -> &DifficultySettings {
        self.difficulties.get(difficulty)
    }

    /// Level row for a 0-based index, clamped to the table
    pub fn level(&self, index: usize) -> &LevelConfig {
        match self.levels.len() {
            0 => &BASE_LEVEL,
            len => &self.levels[index.min(len - 1)],
        }
    }

    /// 0-based index of the last level whose threshold does not exceed `score`
    pub fn level_index_for_score(&self, score: u32) -> usize {
        self.levels
            .iter()
            .rposition(|l| l.threshold <= score)
            .unwrap_or(0)
    }

    /// Number of levels (at least one)
    pub fn level_count(&self) -> usize {
        self.levels.len().max(1)
    }
}
