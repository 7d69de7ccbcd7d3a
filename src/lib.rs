//! Planet Orbit - keep the moon alive while asteroids rain in on its planet
//!
//! Core modules:
//! - `sim`: Frame-rate independent simulation (orbit, spawning, collisions, progression)
//! - `tuning`: Data-driven game balance (difficulty and level tables)
//! - `renderer`: Geometry for a host-owned drawing surface
//! - `settings`: Player preferences and cosmetics
//! - `highscores`: Per-difficulty records and the local leaderboard
//! - `autopilot`: Demo controller for attract mode and headless runs

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod autopilot;
pub mod highscores;
pub mod renderer;
#[cfg(not(target_arch = "wasm32"))]
pub mod runner;
pub mod settings;
pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use highscores::HighScores;
pub use settings::{QualityPreset, Settings};
pub use tuning::{Difficulty, Tuning};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Reference frame duration the per-tick constants are tuned for (60 Hz)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Longest wall-clock gap a single frame may account for
    pub const MAX_FRAME_MS: f64 = 64.0;

    /// Planet radius as a fraction of the shorter canvas side
    pub const PLANET_SIZE_RATIO: f32 = 0.08;
    pub const PLANET_MIN_RADIUS: f32 = 25.0;
    /// Moon radius as a fraction of the planet radius
    pub const MOON_SIZE_RATIO: f32 = 0.25;
    pub const MOON_MIN_RADIUS: f32 = 6.0;
    /// Clearance between planet surface and the contracted orbit
    pub const ORBIT_INNER_GAP: f32 = 15.0;
    /// Clearance between the expanded orbit and the canvas edge
    pub const ORBIT_OUTER_GAP: f32 = 20.0;

    /// Score ticks: one point per 100 ms survived
    pub const SCORE_MS: f64 = 100.0;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Rotate a vector by `angle` radians
#[inline]
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Stereo pan in [-1, 1] for an x position across the canvas
#[inline]
pub fn stereo_pan(x: f32, width: f32) -> f32 {
    if width <= 0.0 {
        return 0.0;
    }
    ((x / width) * 2.0 - 1.0).clamp(-1.0, 1.0)
}
