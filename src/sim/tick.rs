//! Per-frame simulation tick
//!
//! Control flow for one animation frame: normalize the frame delta, animate
//! the background, advance gameplay while a session is running and not
//! paused (or the autopilot attract loop on the title screen), then let the
//! cosmetic timers run down.

use super::collision;
use super::hooks::GameHooks;
use super::progression;
use super::spawn;
use super::state::{SessionPhase, SimulationState, TutorialStep};

/// Input commands for a single frame
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Player is holding the expand control
    pub pressing: bool,
    /// Pause toggle
    pub pause: bool,
    /// Demo mode - the autopilot decides `pressing`
    pub autopilot: bool,
}

/// Advance the simulation to wall-clock time `now` (ms)
pub fn tick(state: &mut SimulationState, input: &TickInput, now: f64, hooks: &mut dyn GameHooks) {
    let time_scale = state.clock.advance(now);
    step(state, input, now, time_scale, hooks);
}

/// Advance the simulation by an explicit time scale (1.0 = one 60 Hz frame)
pub fn step(
    state: &mut SimulationState,
    input: &TickInput,
    now: f64,
    time_scale: f32,
    hooks: &mut dyn GameHooks,
) {
    // Handle pause toggle
    if input.pause {
        if state.resume(now) {
            hooks.on_pause(false);
        } else if state.pause(now) {
            hooks.on_pause(true);
        }
    }

    // Background runs in every phase
    state.ambient.update(&mut state.rng, state.canvas, time_scale);
    state.planet.atmosphere_rotation += 0.001 * time_scale;

    match state.phase {
        SessionPhase::Playing if !state.is_paused() => {
            state.pressing = if input.autopilot {
                crate::autopilot::decide(state)
            } else {
                input.pressing
            };
            advance_session(state, now, time_scale, hooks);
        }
        SessionPhase::Idle if input.autopilot => advance_attract(state, time_scale),
        _ => {}
    }

    // === Cosmetics ===
    state
        .particles
        .update(time_scale, state.tuning.particle_drag);

    if state.screen_flash > 0.0 {
        state.screen_flash = (state.screen_flash - state.tuning.flash_decay * time_scale).max(0.0);
    }
    progression::update_banner(
        &mut state.level_up,
        state.tuning.level_up_fade,
        state.tuning.level_up_growth,
        time_scale,
    );

    if state.phase == SessionPhase::Colliding && state.screen_flash <= 0.0 {
        state.phase = SessionPhase::GameOver;
        log::info!("Game over: {} points", state.score);
    }
}

fn advance_session(
    state: &mut SimulationState,
    now: f64,
    time_scale: f32,
    hooks: &mut dyn GameHooks,
) {
    state.effects.expire(now);

    match state.tutorial {
        Some(step) => {
            // Nothing spawns and the score anchor follows the clock
            state.game_time.start = now;
            state.score = 0;
            hooks.set_score(0);
            hooks.set_level(state.level());

            let next = step.observe(state.pressing);
            state.tutorial = Some(next);
            if next == TutorialStep::Done {
                state.end_tutorial(now);
            }
        }
        None => {
            progression::update(state, now, hooks);
            spawn::update(state, time_scale, hooks);
        }
    }

    advance_moon(state, time_scale);

    collision::advance_power_ups(state, time_scale);
    if collision::resolve_asteroids(state, now, time_scale, hooks) {
        return;
    }
    collision::collect_power_ups(state, now, hooks);
}

/// Title-screen demo: the autopilot flies through a slow field that can't
/// score or end anything, and no hook is called.
fn advance_attract(state: &mut SimulationState, time_scale: f32) {
    state.pressing = crate::autopilot::decide(state);
    spawn::update_attract(state, time_scale);
    advance_moon(state, time_scale);
    collision::drift_asteroids(state, time_scale);
}

/// Orbit step, easing toward the held or released radius
fn advance_moon(state: &mut SimulationState, time_scale: f32) {
    state.moon.angle += f64::from(state.angular_speed() * time_scale);
    let target = state.bounds.target(state.pressing);
    let lerp = (state.tuning.orbit_lerp_rate * time_scale).min(1.0);
    let radius = state.moon.orbit_radius + (target - state.moon.orbit_radius) * lerp;
    state.moon.orbit_radius = state.bounds.clamp(radius);
    state.moon.rotation += state.tuning.moon_spin * time_scale;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::effects::PowerUpKind;
    use crate::sim::hooks::EventLog;
    use crate::sim::state::SessionConfig;
    use crate::tuning::Tuning;
    use glam::Vec2;
    use std::collections::HashSet;

    const HOLD: TickInput = TickInput {
        pressing: true,
        pause: false,
        autopilot: false,
    };
    const IDLE: TickInput = TickInput {
        pressing: false,
        pause: false,
        autopilot: false,
    };
    const PAUSE: TickInput = TickInput {
        pressing: false,
        pause: true,
        autopilot: false,
    };
    const DEMO: TickInput = TickInput {
        pressing: false,
        pause: false,
        autopilot: true,
    };

    fn playing() -> SimulationState {
        let mut state = SimulationState::new(800.0, 600.0, Tuning::default(), 31);
        state.start_session(&SessionConfig::default(), 0.0);
        state
    }

    #[test]
    fn test_idle_state_only_animates_background() {
        let mut state = SimulationState::new(800.0, 600.0, Tuning::default(), 31);
        let mut hooks = EventLog::new();
        let angle = state.moon.angle;
        for i in 0..30 {
            step(&mut state, &HOLD, i as f64 * 16.0, 1.0, &mut hooks);
        }
        assert_eq!(state.moon.angle, angle);
        assert!(state.asteroids.is_empty());
        assert_eq!(hooks.score_updates, 0);
    }

    #[test]
    fn test_idle_autopilot_flies_attract_loop() {
        let mut state = SimulationState::new(800.0, 600.0, Tuning::default(), 31);
        let mut hooks = EventLog::new();
        let bounds = state.bounds;
        let mut seen = HashSet::new();
        for i in 0..600 {
            step(&mut state, &DEMO, i as f64 * 16.0, 1.0, &mut hooks);
            seen.extend(state.asteroids.iter().map(|a| a.id));
            let r = state.moon.orbit_radius;
            assert!(r >= bounds.min && r <= bounds.max);
        }
        assert_eq!(state.phase, SessionPhase::Idle);
        assert!((state.moon.angle - 600.0 * 0.02).abs() < 1e-3);
        assert!(seen.len() >= 4, "only {} asteroids in the attract loop", seen.len());
        assert_eq!(state.score, 0);
        assert!(hooks.game_overs.is_empty());
        assert!(hooks.sounds.is_empty());
        assert_eq!(hooks.score_updates, 0);
    }

    #[test]
    fn test_attract_asteroid_hitting_moon_is_harmless() {
        let mut state = SimulationState::new(800.0, 600.0, Tuning::default(), 31);
        let mut hooks = EventLog::new();
        let moon = state.moon_position();
        spawn::spawn_asteroid_from(&mut state, moon);
        let a = &mut state.asteroids[0];
        a.pos = moon;
        a.vel = Vec2::ZERO;
        a.curve_rate = 0.0;

        step(&mut state, &DEMO, 16.0, 1.0, &mut hooks);
        assert!(state.asteroids.is_empty());
        assert_eq!(state.phase, SessionPhase::Idle);
        assert_eq!(state.screen_flash, 0.0);
        assert!(hooks.game_overs.is_empty());
        assert!(hooks.sounds.is_empty());
    }

    #[test]
    fn test_moon_keeps_turning_at_large_angles() {
        let mut state = playing();
        state.moon.angle = 600_000.0;
        let mut hooks = EventLog::new();
        step(&mut state, &IDLE, 16.0, 1.0, &mut hooks);
        assert!(state.moon.angle > 600_000.0);
        assert!((state.moon.angle - 600_000.02).abs() < 1e-6);
    }

    #[test]
    fn test_moon_advances_and_eases_outward() {
        let mut state = playing();
        let mut hooks = EventLog::new();
        step(&mut state, &HOLD, 16.0, 1.0, &mut hooks);
        assert!((state.moon.angle - 0.02).abs() < 1e-6);
        let expected = 75.0 + (280.0 - 75.0) * 0.06;
        assert!((state.moon.orbit_radius - expected).abs() < 1e-3);
    }

    #[test]
    fn test_speed_boost_scales_angle() {
        let mut state = playing();
        state.effects.grant(PowerUpKind::SpeedBoost, 0.0, &state.tuning.clone());
        let mut hooks = EventLog::new();
        step(&mut state, &IDLE, 16.0, 1.0, &mut hooks);
        assert!((state.moon.angle - 0.03).abs() < 1e-6);
    }

    #[test]
    fn test_effect_expires_during_tick() {
        let mut state = playing();
        state.effects.grant(PowerUpKind::Shield, 0.0, &state.tuning.clone());
        let mut hooks = EventLog::new();
        step(&mut state, &IDLE, 9_999.0, 1.0, &mut hooks);
        assert!(state.effects.shielded());
        step(&mut state, &IDLE, 10_000.0, 1.0, &mut hooks);
        assert!(!state.effects.shielded());
    }

    #[test]
    fn test_pause_toggle_freezes_gameplay() {
        let mut state = playing();
        let mut hooks = EventLog::new();
        step(&mut state, &IDLE, 16.0, 1.0, &mut hooks);
        step(&mut state, &PAUSE, 32.0, 1.0, &mut hooks);
        assert!(state.is_paused());
        let angle = state.moon.angle;
        for i in 0..100 {
            step(&mut state, &HOLD, 48.0 + i as f64 * 16.0, 1.0, &mut hooks);
        }
        assert_eq!(state.moon.angle, angle);
        assert_eq!(state.game_time.asteroid_spawn_timer, 1.0);

        step(&mut state, &PAUSE, 5_032.0, 1.0, &mut hooks);
        assert!(!state.is_paused());
        assert_eq!(state.game_time.start, 5_000.0);
    }

    #[test]
    fn test_pause_toggle_reports_each_transition() {
        let mut idle = SimulationState::new(800.0, 600.0, Tuning::default(), 31);
        let mut hooks = EventLog::new();
        // Nothing to pause on the title screen
        step(&mut idle, &PAUSE, 16.0, 1.0, &mut hooks);
        assert!(hooks.pauses.is_empty());

        let mut state = playing();
        step(&mut state, &PAUSE, 16.0, 1.0, &mut hooks);
        step(&mut state, &IDLE, 32.0, 1.0, &mut hooks);
        step(&mut state, &PAUSE, 48.0, 1.0, &mut hooks);
        assert_eq!(hooks.pauses, vec![true, false]);

        // Pausing directly, then toggling, resumes through the same hook
        assert!(state.pause(64.0));
        step(&mut state, &PAUSE, 80.0, 1.0, &mut hooks);
        assert!(!state.is_paused());
        assert_eq!(hooks.pauses, vec![true, false, false]);
    }

    #[test]
    fn test_tutorial_holds_score_and_spawns_nothing() {
        let mut state = SimulationState::new(800.0, 600.0, Tuning::default(), 31);
        let config = SessionConfig {
            tutorial: true,
            ..Default::default()
        };
        state.start_session(&config, 0.0);
        let mut hooks = EventLog::new();
        for i in 0..300 {
            step(&mut state, &IDLE, i as f64 * 16.0, 1.0, &mut hooks);
        }
        assert!(state.asteroids.is_empty());
        assert_eq!(state.score, 0);
        assert_eq!(state.tutorial, Some(TutorialStep::AwaitPress));

        step(&mut state, &HOLD, 5_000.0, 1.0, &mut hooks);
        assert_eq!(state.tutorial, Some(TutorialStep::AwaitRelease));
        step(&mut state, &IDLE, 5_016.0, 1.0, &mut hooks);
        assert_eq!(state.tutorial, None);
        assert_eq!(state.game_time.start, 5_016.0);

        step(&mut state, &IDLE, 6_016.0, 1.0, &mut hooks);
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_collision_flash_leads_to_game_over() {
        let mut state = playing();
        let mut hooks = EventLog::new();
        // Put an asteroid right where the moon will be after one tick
        spawn::spawn_asteroid_from(&mut state, Vec2::ZERO);
        let moon_next = state.planet.pos
            + crate::polar_to_cartesian(state.bounds.min, 0.02);
        let a = &mut state.asteroids[0];
        a.pos = moon_next;
        a.vel = Vec2::ZERO;

        step(&mut state, &IDLE, 3_000.0, 1.0, &mut hooks);
        assert_eq!(state.phase, SessionPhase::Colliding);
        assert_eq!(hooks.game_overs, vec![30]);

        for i in 1..=15 {
            step(&mut state, &IDLE, 3_000.0 + i as f64 * 16.0, 1.0, &mut hooks);
        }
        assert_eq!(state.phase, SessionPhase::Colliding);
        for i in 16..=25 {
            step(&mut state, &IDLE, 3_000.0 + i as f64 * 16.0, 1.0, &mut hooks);
        }
        assert_eq!(state.phase, SessionPhase::GameOver);
        assert_eq!(hooks.game_overs.len(), 1);
    }
}
