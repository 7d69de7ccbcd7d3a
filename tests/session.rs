use anyhow::Result;
use glam::Vec2;
use planet_orbit::consts::FRAME_MS;
use planet_orbit::runner::{RunConfig, read_json, run_session};
use planet_orbit::sim::clock::max_time_scale;
use planet_orbit::sim::spawn::spawn_asteroid_from;
use planet_orbit::sim::{
    EventLog, PowerUpKind, SessionConfig, SessionPhase, SimulationState, TickInput, score_at, step,
    tick,
};
use planet_orbit::{Difficulty, Settings, Tuning};

const IDLE: TickInput = TickInput {
    pressing: false,
    pause: false,
    autopilot: false,
};
const HOLD: TickInput = TickInput {
    pressing: true,
    pause: false,
    autopilot: false,
};
const TOGGLE_PAUSE: TickInput = TickInput {
    pressing: false,
    pause: true,
    autopilot: false,
};

fn session(tuning: Tuning, config: SessionConfig, now: f64) -> SimulationState {
    let mut state = SimulationState::new(800.0, 600.0, tuning, 0xC0FFEE);
    state.start_session(&config, now);
    state
}

/// Balance sheet where nothing ever spawns
fn quiet_tuning() -> Tuning {
    let mut tuning = Tuning::default();
    for d in Difficulty::ALL {
        tuning.difficulties.get_mut(d).initial_spawn_interval = f32::MAX;
    }
    tuning.power_up_interval = f32::MAX;
    tuning
}

/// Drop a motionless asteroid at `pos`, returning its id
fn park_asteroid(state: &mut SimulationState, pos: Vec2, radius: f32) -> u32 {
    let id = spawn_asteroid_from(state, pos);
    let a = state.asteroids.last_mut().unwrap();
    a.pos = pos;
    a.vel = Vec2::ZERO;
    a.curve_rate = 0.0;
    a.radius = radius;
    id
}

#[test]
fn first_asteroid_arrives_on_the_sixtieth_tick() {
    let mut tuning = Tuning::default();
    tuning.difficulties.normal.initial_spawn_interval = 60.0;
    let mut state = session(tuning, SessionConfig::default(), 0.0);
    let mut hooks = EventLog::new();

    for i in 1..60 {
        step(&mut state, &IDLE, i as f64 * FRAME_MS, 1.0, &mut hooks);
        assert!(state.asteroids.is_empty(), "spawned early at tick {i}");
    }
    step(&mut state, &IDLE, 60.0 * FRAME_MS, 1.0, &mut hooks);

    assert_eq!(state.asteroids.len(), 1);
    assert_eq!(state.game_time.asteroid_spawn_timer, 0.0);
    assert_eq!(hooks.count("spawn"), 1);
}

#[test]
fn easy_asteroid_flies_straight_at_the_planet() {
    let config = SessionConfig {
        difficulty: Difficulty::Easy,
        ..Default::default()
    };
    let mut state = session(Tuning::default(), config, 0.0);
    let mut hooks = EventLog::new();

    let origin = Vec2::new(-25.0, 137.0);
    let target = state.planet.pos;
    let id = spawn_asteroid_from(&mut state, origin);
    let heading = (target - origin).normalize();
    let mut last_distance = origin.distance(target);

    for i in 1..=100 {
        step(&mut state, &IDLE, i as f64 * FRAME_MS, 1.0, &mut hooks);
        let a = state
            .asteroids
            .iter()
            .find(|a| a.id == id)
            .expect("asteroid left play early");
        assert_eq!(a.curve_rate, 0.0);

        let offset = a.pos - origin;
        let off_line = offset.perp_dot(heading).abs();
        assert!(off_line < 1e-2, "drifted {off_line}px off course at tick {i}");

        let distance = a.pos.distance(target);
        assert!(distance < last_distance);
        last_distance = distance;
    }
}

#[test]
fn score_counts_one_point_per_tenth_of_a_second() {
    assert_eq!(score_at(5000.0, 10_000.0), 50);

    let mut state = session(Tuning::default(), SessionConfig::default(), 5000.0);
    let mut hooks = EventLog::new();
    step(&mut state, &IDLE, 10_000.0, 1.0, &mut hooks);

    assert_eq!(state.score, 50);
    assert_eq!(hooks.score, 50);
    assert_eq!(hooks.level, 1);
}

#[test]
fn fatal_hit_reports_once_and_freezes_the_field() {
    let mut state = session(quiet_tuning(), SessionConfig::default(), 0.0);
    let mut hooks = EventLog::new();

    let moon = state.moon_position();
    park_asteroid(&mut state, moon, 20.0);
    park_asteroid(&mut state, moon + Vec2::new(3.0, 2.0), 20.0);

    step(&mut state, &IDLE, FRAME_MS, 1.0, &mut hooks);
    assert_eq!(state.phase, SessionPhase::Colliding);
    assert_eq!(hooks.game_overs.len(), 1);
    assert_eq!(hooks.count("collision"), 1);
    // The colliding asteroid stays where it hit
    assert_eq!(state.asteroids.len(), 2);

    let positions: Vec<Vec2> = state.asteroids.iter().map(|a| a.pos).collect();
    let (angle, radius, score) = (state.moon.angle, state.moon.orbit_radius, state.score);

    for i in 2..=60 {
        step(&mut state, &HOLD, i as f64 * FRAME_MS, 1.0, &mut hooks);
    }

    assert_eq!(state.phase, SessionPhase::GameOver);
    assert_eq!(hooks.game_overs, vec![score]);
    assert_eq!(state.moon.angle, angle);
    assert_eq!(state.moon.orbit_radius, radius);
    assert_eq!(state.score, score);
    let after: Vec<Vec2> = state.asteroids.iter().map(|a| a.pos).collect();
    assert_eq!(after, positions);
}

#[test]
fn shield_absorbs_only_what_reaches_the_bubble() {
    let mut tuning = quiet_tuning();
    // Keep the moon still so distances are exact
    tuning.moon_angular_speed = 0.0;
    let config = SessionConfig {
        start_power_up: Some(PowerUpKind::Shield),
        ..Default::default()
    };
    let mut state = session(tuning, config, 0.0);
    let mut hooks = EventLog::new();

    let moon = state.moon_position();
    let shield = state.shield_radius();
    let r = 10.0;
    // Outward from the planet, clear of the bubble
    let outside = park_asteroid(&mut state, moon + Vec2::new(shield + r + 5.0, 0.0), r);
    // Inside the bubble without touching the moon
    park_asteroid(&mut state, moon + Vec2::new(0.0, -(shield + r - 5.0)), r);
    // Overlapping the moon itself
    let moon_radius = state.moon.radius;
    park_asteroid(&mut state, moon + Vec2::new(0.0, moon_radius), r);

    step(&mut state, &IDLE, FRAME_MS, 1.0, &mut hooks);

    assert_eq!(state.phase, SessionPhase::Playing);
    assert!(hooks.game_overs.is_empty());
    assert_eq!(hooks.count("shield-block"), 2);
    assert_eq!(state.asteroids.len(), 1);
    assert_eq!(state.asteroids[0].id, outside);
}

#[test]
fn paused_time_never_scores_and_delays_expiry() {
    let config = SessionConfig {
        start_power_up: Some(PowerUpKind::Shield),
        ..Default::default()
    };
    let mut state = session(quiet_tuning(), config, 0.0);
    let mut hooks = EventLog::new();

    step(&mut state, &IDLE, 1000.0, 1.0, &mut hooks);
    assert_eq!(state.score, 10);

    step(&mut state, &TOGGLE_PAUSE, 1000.0, 1.0, &mut hooks);
    assert!(state.is_paused());
    for now in [2000.0, 4000.0, 5999.0] {
        step(&mut state, &IDLE, now, 1.0, &mut hooks);
        assert_eq!(state.score, 10);
    }

    // Resume after 5 s away
    step(&mut state, &TOGGLE_PAUSE, 6000.0, 1.0, &mut hooks);
    assert!(!state.is_paused());
    assert_eq!(state.score, 10);

    step(&mut state, &IDLE, 7000.0, 1.0, &mut hooks);
    assert_eq!(state.score, 20);

    // A 10 s shield granted at 0 now lasts until 15 s
    step(&mut state, &IDLE, 14_999.0, 1.0, &mut hooks);
    assert!(state.effects.shielded());
    step(&mut state, &IDLE, 15_000.0, 1.0, &mut hooks);
    assert!(!state.effects.shielded());
}

#[test]
fn levels_climb_in_order_and_stop_at_the_table_end() {
    let mut state = session(quiet_tuning(), SessionConfig::default(), 0.0);
    let mut hooks = EventLog::new();
    let mut last_level = state.level();
    let mut last_score = state.score;

    // Zero time scale: only the wall clock moves
    for i in 1..=600 {
        step(&mut state, &IDLE, i as f64 * 500.0, 0.0, &mut hooks);
        assert!(state.score >= last_score);
        assert!(state.level() >= last_level);
        assert!(state.level() - last_level <= 1);
        assert_eq!(hooks.level, state.level());
        last_score = state.score;
        last_level = state.level();
    }

    assert_eq!(state.score, 3000);
    assert_eq!(state.level(), state.tuning.level_count() as u32);
    assert_eq!(hooks.count("level-up"), state.tuning.level_count() - 1);
}

#[test]
fn orbit_stays_inside_bounds_however_long_the_press() {
    let mut state = session(quiet_tuning(), SessionConfig::default(), 0.0);
    let mut hooks = EventLog::new();
    let bounds = state.bounds;

    for i in 1..=2000 {
        step(&mut state, &HOLD, i as f64 * FRAME_MS, 1.0, &mut hooks);
        let r = state.moon.orbit_radius;
        assert!(r >= bounds.min && r <= bounds.max, "radius {r} at tick {i}");
    }
    assert!((state.moon.orbit_radius - bounds.max).abs() < 0.01);

    // Enormous frame gaps still ease rather than overshoot
    let mut now = 2000.0 * FRAME_MS;
    for _ in 0..200 {
        now += 10_000.0;
        tick(&mut state, &IDLE, now, &mut hooks);
        let r = state.moon.orbit_radius;
        assert!(r >= bounds.min && r <= bounds.max);
    }
    assert!((state.moon.orbit_radius - bounds.min).abs() < 0.01);
}

#[test]
fn huge_frame_gap_moves_no_more_than_the_cap() {
    let mut state = session(quiet_tuning(), SessionConfig::default(), 0.0);
    let mut hooks = EventLog::new();

    let origin = Vec2::new(-25.0, 137.0);
    let id = spawn_asteroid_from(&mut state, origin);
    let speed = state.asteroids[0].vel.length();
    let angle = state.moon.angle;

    tick(&mut state, &IDLE, 1_000_000.0, &mut hooks);

    let a = state.asteroids.iter().find(|a| a.id == id).unwrap();
    let moved = a.pos.distance(origin);
    assert!(moved <= speed * max_time_scale() + 1e-3, "moved {moved}px");
    assert!(moved > 0.0);

    let turned = state.moon.angle - angle;
    assert!(turned <= f64::from(state.angular_speed() * max_time_scale()) + 1e-5);
}

#[test]
fn same_seed_replays_the_same_run() -> Result<()> {
    let config = RunConfig {
        seed: 0xDEAD_BEEF,
        difficulty: Difficulty::Hard,
        max_frames: 2400,
        ..Default::default()
    };
    let first = run_session(&config)?;
    let second = run_session(&config)?;

    assert_eq!(
        serde_json::to_string(&first)?,
        serde_json::to_string(&second)?
    );
    assert!(first.frame_count > 0);
    Ok(())
}

#[test]
fn settings_file_drives_a_headless_run() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("settings.json");
    std::fs::write(
        &path,
        r#"{ "difficulty": "easy", "equipped_consumable": "shield" }"#,
    )?;
    let settings: Settings = read_json(&path)?;
    assert_eq!(settings.difficulty, Difficulty::Easy);
    assert_eq!(settings.equipped_consumable, Some(PowerUpKind::Shield));

    let summary = run_session(&RunConfig {
        difficulty: settings.difficulty,
        settings,
        max_frames: 600,
        ..Default::default()
    })?;
    assert_eq!(summary.difficulty, Difficulty::Easy);
    assert!(summary.frame_count <= 600);
    Ok(())
}
