//! Collision detection and resolution
//!
//! Everything here is circle against circle. Asteroids are resolved in
//! reverse order so they can be removed in place, and the first fatal hit
//! ends the pass immediately.

use glam::Vec2;

use super::effects::PowerUpKind;
use super::hooks::{GameHooks, SoundCue};
use super::particles::Burst;
use super::progression::score_at;
use super::state::{SessionPhase, SimulationState};
use crate::stereo_pan;

/// Shield bubble color used for deflection bursts
pub const SHIELD_COLOR: u32 = 0x60a5fa;

/// Strict circle overlap (touching does not count)
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let reach = ra + rb;
    a.distance_squared(b) < reach * reach
}

/// Move, spin and age power-ups, dropping expired or escaped ones
pub fn advance_power_ups(state: &mut SimulationState, time_scale: f32) {
    for p in state.power_ups.iter_mut() {
        p.pos += p.vel * time_scale;
        p.rotation += p.rotation_speed * time_scale;
        p.life -= time_scale;
    }
    let margin = state.tuning.out_of_bounds_margin;
    let canvas = state.canvas;
    state.power_ups.retain(|p| {
        p.life > 0.0
            && p.pos.x >= -margin
            && p.pos.x <= canvas.x + margin
            && p.pos.y >= -margin
            && p.pos.y <= canvas.y + margin
    });
}

/// Advance every asteroid and resolve its collisions.
///
/// Returns true if the moon was destroyed. In that case the session has
/// moved to [`SessionPhase::Colliding`], the game-over hook has fired, and
/// the remaining asteroids were left untouched.
pub fn resolve_asteroids(
    state: &mut SimulationState,
    now: f64,
    time_scale: f32,
    hooks: &mut dyn GameHooks,
) -> bool {
    let moon_pos = state.moon_position();
    let moon_radius = state.moon.radius;
    let planet_pos = state.planet.pos;
    let planet_radius = state.planet.radius;
    let shielded = state.effects.shielded();
    let shield_radius = state.shield_radius();
    let near_miss_margin = state.tuning.near_miss_margin;

    let mut i = state.asteroids.len();
    while i > 0 {
        i -= 1;

        let asteroid = &mut state.asteroids[i];
        asteroid.advance(time_scale);
        let (pos, radius, color) = (asteroid.pos, asteroid.radius, asteroid.color);

        if state.out_of_bounds(pos) {
            state.asteroids.remove(i);
            continue;
        }

        // Planet impact
        if circles_overlap(pos, radius, planet_pos, planet_radius) {
            state.asteroids.remove(i);
            state
                .particles
                .burst(&mut state.rng, pos, color, Burst::PLANET_IMPACT);
            continue;
        }

        if shielded {
            if circles_overlap(pos, radius, moon_pos, shield_radius) {
                state.asteroids.remove(i);
                state
                    .particles
                    .burst(&mut state.rng, pos, SHIELD_COLOR, Burst::SHIELD_BLOCK);
                hooks.play_sound(SoundCue::ShieldBlock);
                continue;
            }
        } else if circles_overlap(pos, radius, moon_pos, moon_radius) {
            end_session(state, now, moon_pos, color, hooks);
            return true;
        }

        let asteroid = &mut state.asteroids[i];
        if !asteroid.near_miss_played
            && circles_overlap(pos, radius, moon_pos, moon_radius + near_miss_margin)
        {
            asteroid.near_miss_played = true;
            hooks.play_sound(SoundCue::NearMiss {
                pan: stereo_pan(pos.x, state.canvas.x),
                difficulty: state.difficulty,
            });
        }
    }
    false
}

/// Advance title-screen asteroids. Planet and moon both just shatter them.
pub fn drift_asteroids(state: &mut SimulationState, time_scale: f32) {
    let moon_pos = state.moon_position();
    let moon_radius = state.moon.radius;
    let planet_pos = state.planet.pos;
    let planet_radius = state.planet.radius;

    let mut i = state.asteroids.len();
    while i > 0 {
        i -= 1;

        let asteroid = &mut state.asteroids[i];
        asteroid.advance(time_scale);
        let (pos, radius, color) = (asteroid.pos, asteroid.radius, asteroid.color);

        if state.out_of_bounds(pos) {
            state.asteroids.remove(i);
        } else if circles_overlap(pos, radius, planet_pos, planet_radius)
            || circles_overlap(pos, radius, moon_pos, moon_radius)
        {
            state.asteroids.remove(i);
            state
                .particles
                .burst(&mut state.rng, pos, color, Burst::PLANET_IMPACT);
        }
    }
}

/// Fatal moon hit: freeze the session and report the final score once
fn end_session(
    state: &mut SimulationState,
    now: f64,
    moon_pos: Vec2,
    color: u32,
    hooks: &mut dyn GameHooks,
) {
    state.phase = SessionPhase::Colliding;
    state.pressing = false;
    state.screen_flash = 1.0;
    state.score = score_at(state.game_time.start, now);
    state
        .particles
        .burst(&mut state.rng, moon_pos, color, Burst::PLANET_IMPACT);

    hooks.play_sound(SoundCue::Collision);
    hooks.on_game_over(state.score);
    log::info!(
        "Moon destroyed at score {} (level {})",
        state.score,
        state.level()
    );
}

/// Apply and remove every power-up the moon is touching
pub fn collect_power_ups(state: &mut SimulationState, now: f64, hooks: &mut dyn GameHooks) {
    let moon_pos = state.moon_position();
    let moon_radius = state.moon.radius;

    let mut i = state.power_ups.len();
    while i > 0 {
        i -= 1;
        let p = &state.power_ups[i];
        if !circles_overlap(p.pos, p.radius, moon_pos, moon_radius) {
            continue;
        }
        let p = state.power_ups.remove(i);
        state
            .particles
            .burst(&mut state.rng, p.pos, p.kind.color(), Burst::PICKUP);

        match p.kind {
            PowerUpKind::Shield | PowerUpKind::SpeedBoost => {
                state.effects.grant(p.kind, now, &state.tuning);
                hooks.play_sound(SoundCue::PowerUpCollect);
            }
            PowerUpKind::Bomb => detonate(state, hooks),
        }
        log::debug!("Collected {:?}", p.kind);
    }
}

/// Clear every asteroid on screen
fn detonate(state: &mut SimulationState, hooks: &mut dyn GameHooks) {
    for a in state.asteroids.drain(..) {
        state
            .particles
            .burst(&mut state.rng, a.pos, a.color, Burst::BOMB);
    }
    state.screen_flash = state.screen_flash.max(0.8);
    hooks.play_sound(SoundCue::Bomb);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::hooks::EventLog;
    use crate::sim::spawn::spawn_asteroid_from;
    use crate::sim::state::{PowerUp, SessionConfig};
    use crate::tuning::Tuning;

    fn playing() -> SimulationState {
        let mut state = SimulationState::new(800.0, 600.0, Tuning::default(), 23);
        state.start_session(&SessionConfig::default(), 0.0);
        state
    }

    /// Place a motionless asteroid at `pos`
    fn park_asteroid(state: &mut SimulationState, pos: Vec2, radius: f32) {
        spawn_asteroid_from(state, pos);
        let a = state.asteroids.last_mut().unwrap();
        a.pos = pos;
        a.vel = Vec2::ZERO;
        a.curve_rate = 0.0;
        a.radius = radius;
    }

    fn power_up(kind: PowerUpKind, pos: Vec2) -> PowerUp {
        PowerUp {
            id: 99,
            kind,
            pos,
            vel: Vec2::ZERO,
            radius: 18.0,
            life: 600.0,
            initial_life: 600.0,
            rotation: 0.0,
            rotation_speed: 0.0,
        }
    }

    #[test]
    fn test_touching_is_not_overlap() {
        assert!(!circles_overlap(Vec2::ZERO, 5.0, Vec2::new(10.0, 0.0), 5.0));
        assert!(circles_overlap(Vec2::ZERO, 5.0, Vec2::new(9.99, 0.0), 5.0));
    }

    #[test]
    fn test_planet_hit_despawns_with_burst() {
        let mut state = playing();
        let center = state.planet.pos;
        park_asteroid(&mut state, center + Vec2::new(0.0, -50.0), 10.0);
        let mut hooks = EventLog::new();
        assert!(!resolve_asteroids(&mut state, 16.0, 1.0, &mut hooks));
        assert!(state.asteroids.is_empty());
        assert_eq!(state.particles.len(), 6);
        assert!(hooks.game_overs.is_empty());
    }

    #[test]
    fn test_out_of_bounds_despawns_silently() {
        let mut state = playing();
        park_asteroid(&mut state, Vec2::new(-101.0, 300.0), 10.0);
        let mut hooks = EventLog::new();
        resolve_asteroids(&mut state, 16.0, 1.0, &mut hooks);
        assert!(state.asteroids.is_empty());
        assert!(state.particles.is_empty());
        assert!(hooks.sounds.is_empty());
    }

    #[test]
    fn test_drifting_asteroids_shatter_on_planet_and_moon() {
        let mut state = SimulationState::new(800.0, 600.0, Tuning::default(), 23);
        let center = state.planet.pos;
        let moon = state.moon_position();
        park_asteroid(&mut state, center + Vec2::new(0.0, -50.0), 10.0);
        park_asteroid(&mut state, moon, 10.0);
        park_asteroid(&mut state, Vec2::new(-101.0, 300.0), 10.0);
        let far = park_far(&mut state);

        drift_asteroids(&mut state, 1.0);
        assert_eq!(state.phase, SessionPhase::Idle);
        assert_eq!(state.screen_flash, 0.0);
        assert_eq!(state.asteroids.len(), 1);
        assert_eq!(state.asteroids[0].id, far);
        assert_eq!(state.particles.len(), 12);
    }

    /// Motionless asteroid in an empty corner, returning its id
    fn park_far(state: &mut SimulationState) -> u32 {
        park_asteroid(state, Vec2::new(30.0, 30.0), 10.0);
        state.asteroids[state.asteroids.len() - 1].id
    }

    #[test]
    fn test_first_fatal_hit_stops_the_pass() {
        let mut state = playing();
        let moon = state.moon_position();
        // Both overlap the moon; the last one is resolved first
        park_asteroid(&mut state, moon, 10.0);
        park_asteroid(&mut state, moon + Vec2::new(3.0, 0.0), 10.0);
        state.asteroids[0].vel = Vec2::new(0.0, 1.0);
        let mut hooks = EventLog::new();

        assert!(resolve_asteroids(&mut state, 5_000.0, 1.0, &mut hooks));
        assert_eq!(hooks.game_overs, vec![50]);
        assert_eq!(hooks.count("collision"), 1);
        assert_eq!(state.phase, SessionPhase::Colliding);
        assert_eq!(state.screen_flash, 1.0);
        // The first asteroid was never advanced
        assert_eq!(state.asteroids.len(), 2);
        assert_eq!(state.asteroids[0].pos, moon);
    }

    #[test]
    fn test_shield_deflects_inside_bubble() {
        let mut state = playing();
        state.effects.grant(PowerUpKind::Shield, 0.0, &state.tuning.clone());
        let moon = state.moon_position();
        let reach = state.shield_radius() + 10.0;
        park_asteroid(&mut state, moon + Vec2::new(0.0, -(reach - 1.0)), 10.0);
        let mut hooks = EventLog::new();

        assert!(!resolve_asteroids(&mut state, 100.0, 1.0, &mut hooks));
        assert!(state.asteroids.is_empty());
        assert_eq!(state.phase, SessionPhase::Playing);
        assert_eq!(hooks.count("shield-block"), 1);
        assert_eq!(state.particles.len(), 5);
    }

    #[test]
    fn test_shield_ignores_asteroid_outside_bubble() {
        let mut state = playing();
        state.effects.grant(PowerUpKind::Shield, 0.0, &state.tuning.clone());
        let moon = state.moon_position();
        let reach = state.shield_radius() + 10.0;
        let pos = moon + Vec2::new(0.0, -(reach + 1.0));
        park_asteroid(&mut state, pos, 10.0);
        let mut hooks = EventLog::new();

        assert!(!resolve_asteroids(&mut state, 100.0, 1.0, &mut hooks));
        assert_eq!(state.asteroids.len(), 1);
        assert_eq!(state.asteroids[0].pos, pos);
        assert_eq!(hooks.count("shield-block"), 0);
    }

    #[test]
    fn test_near_miss_plays_once() {
        let mut state = playing();
        let moon = state.moon_position();
        let gap = state.moon.radius + 10.0 + 15.0;
        park_asteroid(&mut state, moon + Vec2::new(0.0, -gap), 10.0);
        let mut hooks = EventLog::new();

        resolve_asteroids(&mut state, 100.0, 1.0, &mut hooks);
        resolve_asteroids(&mut state, 116.0, 1.0, &mut hooks);
        assert_eq!(hooks.count("near-miss"), 1);
        assert!(state.asteroids[0].near_miss_played);
    }

    #[test]
    fn test_collect_shield_and_boost() {
        let mut state = playing();
        let moon = state.moon_position();
        state.power_ups.push(power_up(PowerUpKind::Shield, moon));
        state
            .power_ups
            .push(power_up(PowerUpKind::SpeedBoost, moon + Vec2::new(5.0, 0.0)));
        let mut hooks = EventLog::new();

        collect_power_ups(&mut state, 2_000.0, &mut hooks);
        assert!(state.power_ups.is_empty());
        assert!(state.effects.shielded());
        assert_eq!(state.effects.shield.end_time, 12_000.0);
        assert!(state.effects.boosted());
        assert_eq!(state.effects.speed_boost.end_time, 7_000.0);
        assert_eq!(hooks.count("power-up-collect"), 2);
    }

    #[test]
    fn test_bomb_clears_asteroids() {
        let mut state = playing();
        for _ in 0..4 {
            park_asteroid(&mut state, Vec2::new(10.0, 10.0), 12.0);
        }
        let moon = state.moon_position();
        state.power_ups.push(power_up(PowerUpKind::Bomb, moon));
        let far = Vec2::new(700.0, 50.0);
        state.power_ups.push(power_up(PowerUpKind::Shield, far));
        let mut hooks = EventLog::new();

        collect_power_ups(&mut state, 0.0, &mut hooks);
        assert!(state.asteroids.is_empty());
        assert_eq!(state.screen_flash, 0.8);
        assert_eq!(hooks.count("bomb"), 1);
        assert_eq!(state.power_ups.len(), 1);
        assert_eq!(state.power_ups[0].pos, far);
        assert!(!state.effects.shielded());
    }

    #[test]
    fn test_power_ups_expire_and_escape() {
        let mut state = playing();
        let mut fading = power_up(PowerUpKind::Shield, Vec2::new(100.0, 100.0));
        fading.life = 0.5;
        let mut leaving = power_up(PowerUpKind::Bomb, Vec2::new(-100.0, 100.0));
        leaving.vel = Vec2::new(-2.0, 0.0);
        let staying = power_up(PowerUpKind::SpeedBoost, Vec2::new(200.0, 200.0));
        state.power_ups = vec![fading, leaving, staying];

        advance_power_ups(&mut state, 1.0);
        assert_eq!(state.power_ups.len(), 1);
        assert_eq!(state.power_ups[0].kind, PowerUpKind::SpeedBoost);
        assert_eq!(state.power_ups[0].life, 599.0);
    }
}
