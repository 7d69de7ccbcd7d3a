//! Asteroid and power-up spawning
//!
//! Both spawners are tick-count timers scaled by `time_scale`. Asteroids get
//! faster and more frequent as the level rises; power-ups arrive at a fixed
//! cadence.

use glam::Vec2;
use rand::Rng;

use super::effects::PowerUpKind;
use super::hooks::{GameHooks, SoundCue};
use super::state::{Asteroid, Crater, PowerUp, SimulationState};
use crate::stereo_pan;
use crate::tuning::{Difficulty, Tuning};

/// Fill and outline colors an asteroid can be drawn with
#[derive(Debug, Clone, Copy)]
pub struct AsteroidPalette {
    pub fills: [u32; 5],
    pub strokes: [u32; 5],
}

const EASY_PALETTE: AsteroidPalette = AsteroidPalette {
    fills: [0xcbd5e1, 0x94a3b8, 0x64748b, 0xe2e8f0, 0x818cf8],
    strokes: [0xe2e8f0, 0xcbd5e1, 0x94a3b8, 0xf8fafc, 0xa5b4fc],
};

const NORMAL_PALETTE: AsteroidPalette = AsteroidPalette {
    fills: [0xa1a1aa, 0x84828f, 0x71717a, 0x78716c, 0x57534e],
    strokes: [0xd4d4d8, 0xa9a9a9, 0xa1a1aa, 0xa8a29e, 0x78716c],
};

const HARD_PALETTE: AsteroidPalette = AsteroidPalette {
    fills: [0x451a03, 0x7f1d1d, 0x3f3f46, 0x1c1917, 0x78350f],
    strokes: [0xb45309, 0xb91c1c, 0x52525b, 0x44403c, 0x9a3412],
};

pub fn palette(difficulty: Difficulty) -> &'static AsteroidPalette {
    match difficulty {
        Difficulty::Easy => &EASY_PALETTE,
        Difficulty::Normal => &NORMAL_PALETTE,
        Difficulty::Hard => &HARD_PALETTE,
    }
}

/// Uniform draw in `[lo, hi)`, or `lo` when the range is empty
fn spread<R: Rng>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi > lo {
        rng.random_range(lo..hi)
    } else {
        lo
    }
}

/// Uniform draw in `[-max, max)`
fn symmetric<R: Rng>(rng: &mut R, max: f32) -> f32 {
    (rng.random::<f32>() - 0.5) * 2.0 * max
}

/// Random point just outside the canvas, `pad` px beyond a random edge
pub fn edge_point<R: Rng>(rng: &mut R, canvas: Vec2, pad: f32) -> Vec2 {
    if rng.random_bool(0.5) {
        // Left or right edge
        let x = if rng.random_bool(0.5) { -pad } else { canvas.x + pad };
        Vec2::new(x, rng.random::<f32>() * canvas.y)
    } else {
        // Top or bottom edge
        let y = if rng.random_bool(0.5) { -pad } else { canvas.y + pad };
        Vec2::new(rng.random::<f32>() * canvas.x, y)
    }
}

/// Irregular outline around the origin
fn asteroid_outline<R: Rng>(rng: &mut R, radius: f32, difficulty: Difficulty) -> Vec<Vec2> {
    let (irregularity, spikiness) = match difficulty {
        Difficulty::Hard => (0.4, 0.3),
        _ => (0.2, 0.1),
    };
    let points: usize = rng.random_range(7..=12);
    (0..points)
        .map(|i| {
            let angle = i as f32 / points as f32 * std::f32::consts::TAU;
            let spike = if i % 2 == 0 { spikiness } else { -spikiness };
            let r = radius * (1.0 + (rng.random::<f32>() - 0.5) * irregularity + spike);
            crate::polar_to_cartesian(r, angle)
        })
        .collect()
}

fn asteroid_craters<R: Rng>(rng: &mut R, radius: f32) -> Vec<Crater> {
    let count: usize = rng.random_range(1..=3);
    let max_crater = ((radius / 4.0) as u32).max(2);
    (0..count)
        .map(|_| Crater {
            offset: Vec2::new(
                (rng.random::<f32>() - 0.5) * radius * 0.8,
                (rng.random::<f32>() - 0.5) * radius * 0.8,
            ),
            radius: rng.random_range(2..=max_crater) as f32,
        })
        .collect()
}

/// Whole-pixel asteroid radius from the tuning range
fn roll_radius<R: Rng>(rng: &mut R, tuning: &Tuning) -> f32 {
    let min_r = tuning.asteroid_min_radius;
    rng.random_range(min_r..=tuning.asteroid_max_radius.max(min_r)) as f32
}

/// How a new asteroid flies
#[derive(Debug, Clone, Copy, PartialEq)]
enum Flight {
    /// Gameplay asteroid: aim deviation and curve follow the difficulty
    Hunting,
    /// Title-screen scenery: straight at the planet, slowed down
    Ambient,
}

/// Create an asteroid at `origin` aimed at (or near) the planet. Returns its ID.
pub fn spawn_asteroid_from(state: &mut SimulationState, origin: Vec2) -> u32 {
    let radius = roll_radius(&mut state.rng, &state.tuning);
    spawn_asteroid(state, origin, radius, Flight::Hunting)
}

fn spawn_asteroid(state: &mut SimulationState, origin: Vec2, radius: f32, flight: Flight) -> u32 {
    let settings = state.difficulty_settings().clone();
    let speed_multiplier = state.level_config().speed_multiplier;
    let difficulty = state.difficulty;
    let planet = state.planet.pos;
    let hunting = flight == Flight::Hunting;
    let deviation = if hunting {
        settings.aim_deviation * state.moon.orbit_radius
    } else {
        0.0
    };
    let id = state.next_entity_id();
    let t = &state.tuning;
    let rng = &mut state.rng;

    let target = if deviation > 0.0 {
        planet + Vec2::new(symmetric(rng, deviation), symmetric(rng, deviation))
    } else {
        planet
    };
    let factor = spread(rng, t.asteroid_speed_min, t.asteroid_speed_max);
    let mut speed = settings.base_speed * speed_multiplier * factor;
    if !hunting {
        speed *= t.attract_speed_factor;
    }
    let vel = (target - origin).normalize_or_zero() * speed;

    let curve_rate = if hunting && settings.curve_strength > 0.0 {
        symmetric(rng, settings.curve_strength)
    } else {
        0.0
    };

    let colors = palette(difficulty);
    let shade = rng.random_range(0..colors.fills.len());
    let outline = asteroid_outline(rng, radius, difficulty);
    let craters = asteroid_craters(rng, radius);
    let rotation_speed = symmetric(rng, t.asteroid_spin_max);

    state.asteroids.push(Asteroid {
        id,
        pos: origin,
        vel,
        radius,
        curve_rate,
        rotation: 0.0,
        rotation_speed,
        near_miss_played: false,
        color: colors.fills[shade],
        stroke: colors.strokes[shade],
        outline,
        craters,
    });
    id
}

/// Create a random power-up drifting in from a canvas edge. Returns its ID.
pub fn spawn_power_up(state: &mut SimulationState) -> u32 {
    let id = state.next_entity_id();
    let planet = state.planet.pos;
    let canvas = state.canvas;
    let t = &state.tuning;
    let rng = &mut state.rng;

    let kind = PowerUpKind::ALL[rng.random_range(0..PowerUpKind::ALL.len())];
    let pos = edge_point(rng, canvas, t.power_up_radius);
    let vel = (planet - pos).normalize_or_zero() * t.power_up_speed;
    let rotation_speed = symmetric(rng, t.power_up_spin_max);

    state.power_ups.push(PowerUp {
        id,
        kind,
        pos,
        vel,
        radius: t.power_up_radius,
        life: t.power_up_life,
        initial_life: t.power_up_life,
        rotation: 0.0,
        rotation_speed,
    });
    log::debug!("Spawned {:?} power-up", kind);
    id
}

/// Advance both spawn timers and create whatever is due
pub fn update(state: &mut SimulationState, time_scale: f32, hooks: &mut dyn GameHooks) {
    let gt = &mut state.game_time;
    gt.asteroid_spawn_timer += time_scale;
    gt.power_up_spawn_timer += time_scale;

    if state.game_time.asteroid_spawn_timer >= state.game_time.asteroid_spawn_interval {
        let floor = state.difficulty_settings().min_spawn_interval
            * state.level_config().spawn_multiplier;
        let step = state.tuning.spawn_interval_step;
        let gt = &mut state.game_time;
        gt.asteroid_spawn_timer = 0.0;
        gt.asteroid_spawn_interval = (gt.asteroid_spawn_interval - step).max(floor);

        let radius = roll_radius(&mut state.rng, &state.tuning);
        let origin = edge_point(&mut state.rng, state.canvas, radius);
        spawn_asteroid(state, origin, radius, Flight::Hunting);
        hooks.play_sound(SoundCue::Spawn {
            pan: stereo_pan(origin.x, state.canvas.x),
            difficulty: state.difficulty,
        });
    }

    if state.game_time.power_up_spawn_timer > state.tuning.power_up_interval {
        state.game_time.power_up_spawn_timer = 0.0;
        spawn_power_up(state);
    }
}

/// Title-screen spawner: a slow, silent asteroid every `attract_spawn_interval` ticks
pub fn update_attract(state: &mut SimulationState, time_scale: f32) {
    state.game_time.asteroid_spawn_timer += time_scale;
    if state.game_time.asteroid_spawn_timer < state.tuning.attract_spawn_interval {
        return;
    }
    state.game_time.asteroid_spawn_timer = 0.0;

    let radius = roll_radius(&mut state.rng, &state.tuning);
    let origin = edge_point(&mut state.rng, state.canvas, radius);
    spawn_asteroid(state, origin, radius, Flight::Ambient);
}
