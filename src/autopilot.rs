//! Demo controller for idle/attract mode and headless runs
//!
//! Looks a short way into the future for both orbit choices (held and
//! released) and picks the one that keeps the moon furthest from every
//! asteroid. When neither choice is threatened it steers toward the nearest
//! power-up.

use glam::Vec2;

use crate::sim::SimulationState;

/// Ticks of lookahead
const HORIZON: u32 = 40;
/// Clearance (px beyond touching) considered safe
const SAFE_CLEARANCE: f32 = 12.0;

/// Smallest gap between the moon and any asteroid over the horizon
/// if the player holds (`pressing`) or releases for the whole window
fn min_clearance(state: &SimulationState, pressing: bool) -> f32 {
    let target = state.bounds.target(pressing);
    let speed = state.angular_speed();
    let lerp = state.tuning.orbit_lerp_rate.min(1.0);
    let shield = if state.effects.shielded() {
        state.shield_radius()
    } else {
        state.moon.radius
    };

    let mut radius = state.moon.orbit_radius;
    let mut angle = state.moon.heading();
    let mut worst = f32::INFINITY;

    for t in 1..=HORIZON {
        angle += speed;
        radius += (target - radius) * lerp;
        let moon = state.planet.pos + crate::polar_to_cartesian(radius, angle);

        for a in &state.asteroids {
            let pos = a.pos + a.vel * t as f32;
            // Asteroids that reach the planet first never get to the moon
            if pos.distance(state.planet.pos) < state.planet.radius + a.radius {
                continue;
            }
            worst = worst.min(pos.distance(moon) - a.radius - shield);
        }
    }
    worst
}

/// Orbit radius that puts the moon on a power-up's path, if one is worth chasing
fn power_up_radius(state: &SimulationState) -> Option<f32> {
    let moon = state.moon_position();
    state
        .power_ups
        .iter()
        .min_by(|a, b| {
            a.pos
                .distance(moon)
                .partial_cmp(&b.pos.distance(moon))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|p| p.pos.distance(state.planet.pos))
}

/// Decide whether to hold the expand control this tick
pub fn decide(state: &SimulationState) -> bool {
    let held = min_clearance(state, true);
    let released = min_clearance(state, false);

    if held.min(released) > SAFE_CLEARANCE {
        // Both safe: go grab the nearest power-up, otherwise rest
        return match power_up_radius(state) {
            Some(r) => r > state.bounds.mid(),
            None => false,
        };
    }

    if (held - released).abs() < f32::EPSILON {
        return state.pressing;
    }
    held > released
}

/// Distance from the moon to the closest asteroid surface (diagnostics)
pub fn nearest_threat(state: &SimulationState) -> Option<f32> {
    let moon: Vec2 = state.moon_position();
    state
        .asteroids
        .iter()
        .map(|a| a.pos.distance(moon) - a.radius - state.moon.radius)
        .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
}
