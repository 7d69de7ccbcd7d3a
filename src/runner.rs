//! Headless session runner
//!
//! Plays one autopilot session at a simulated 60 Hz and reports what
//! happened. Used by the native CLI and the integration tests.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::autopilot;
use crate::consts::FRAME_MS;
use crate::highscores::{HighScores, RunRecord};
use crate::settings::Settings;
use crate::sim::{EventLog, SessionPhase, SimulationState, TickInput, tick};
use crate::tuning::{Difficulty, Tuning};

/// Everything needed to reproduce a run
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub seed: u64,
    pub difficulty: Difficulty,
    /// Upper bound on simulated frames
    pub max_frames: u32,
    pub width: f32,
    pub height: f32,
    pub tuning: Tuning,
    pub settings: Settings,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            difficulty: Difficulty::Normal,
            max_frames: 3600,
            width: 800.0,
            height: 600.0,
            tuning: Tuning::default(),
            settings: Settings::default(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct RunSummary {
    pub seed: u64,
    pub difficulty: Difficulty,
    pub max_frames: u32,
    pub frame_count: u32,
    /// Simulated milliseconds since the session started
    pub elapsed_ms: f64,
    pub final_score: u32,
    pub final_level: u32,
    pub game_over: bool,
    pub asteroids_spawned: usize,
    pub power_ups_spawned: u32,
    pub power_ups_collected: usize,
    pub bombs: usize,
    pub shield_blocks: usize,
    pub near_misses: usize,
    pub level_ups: usize,
    pub press_frames: u32,
    /// Smallest moon-to-asteroid surface gap seen during the run
    pub closest_call: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<RunRecord>,
}

/// Play a single autopilot session until game over or `max_frames`
pub fn run_session(config: &RunConfig) -> Result<RunSummary> {
    if config.max_frames == 0 {
        return Err(anyhow!("max_frames must be > 0"));
    }
    if !(config.width > 0.0 && config.height > 0.0) {
        return Err(anyhow!(
            "canvas must have a positive size, got {}x{}",
            config.width,
            config.height
        ));
    }

    let mut state = SimulationState::new(
        config.width,
        config.height,
        config.tuning.clone(),
        config.seed,
    );
    let mut session = config.settings.session_config();
    session.difficulty = config.difficulty;
    // Nobody is watching the tutorial
    session.tutorial = false;
    state.start_session(&session, 0.0);

    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };
    let mut hooks = EventLog::new();
    let mut frame_count = 0;
    let mut press_frames = 0;
    let mut closest_call: Option<f32> = None;
    let mut last_power_up_id = None;
    let mut power_ups_spawned = 0;

    while frame_count < config.max_frames && state.phase != SessionPhase::GameOver {
        frame_count += 1;
        let now = frame_count as f64 * FRAME_MS;
        tick(&mut state, &input, now, &mut hooks);

        if state.phase != SessionPhase::Playing {
            continue;
        }
        if state.pressing {
            press_frames += 1;
        }
        if let Some(gap) = autopilot::nearest_threat(&state) {
            closest_call = Some(closest_call.map_or(gap, |c| c.min(gap)));
        }
        // Ids only grow, so a new maximum means a new power-up
        let newest = state.power_ups.iter().map(|p| p.id).max();
        if newest > last_power_up_id {
            power_ups_spawned += 1;
            last_power_up_id = newest;
        }
    }

    let game_over = !hooks.game_overs.is_empty();
    log::info!(
        "Run finished after {} frames: score {} level {}{}",
        frame_count,
        state.score,
        state.level(),
        if game_over { " (destroyed)" } else { "" }
    );

    Ok(RunSummary {
        seed: config.seed,
        difficulty: config.difficulty,
        max_frames: config.max_frames,
        frame_count,
        elapsed_ms: frame_count as f64 * FRAME_MS,
        final_score: state.score,
        final_level: state.level(),
        game_over,
        asteroids_spawned: hooks.count("spawn"),
        power_ups_spawned,
        power_ups_collected: hooks.count("power-up-collect"),
        bombs: hooks.count("bomb"),
        shield_blocks: hooks.count("shield-block"),
        near_misses: hooks.count("near-miss"),
        level_ups: hooks.count("level-up"),
        press_frames,
        closest_call,
        record: None,
    })
}

/// Read a JSON document, naming the file in any error
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid JSON in {}", path.display()))
}

/// Write a value as pretty JSON, creating parent directories
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed creating directory {}", parent.display()))?;
        }
    }
    let encoded = serde_json::to_vec_pretty(value)?;
    fs::write(path, encoded).with_context(|| format!("failed writing {}", path.display()))
}

/// Load a balance sheet, keeping the level table ordered
pub fn load_tuning(path: &Path) -> Result<Tuning> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed reading {}", path.display()))?;
    Tuning::from_json(&text).with_context(|| format!("invalid tuning in {}", path.display()))
}

/// Load a score file, starting fresh when it does not exist yet
pub fn load_scores(path: &Path) -> Result<HighScores> {
    if !path.exists() {
        log::debug!("No score file at {}, starting fresh", path.display());
        return Ok(HighScores::new());
    }
    read_json(path)
}

/// Record a finished run into the score file at `path`
pub fn record_run(path: &Path, summary: &mut RunSummary, timestamp: f64) -> Result<HighScores> {
    let mut scores = load_scores(path)?;
    let record = scores.record_game(
        summary.final_score,
        summary.final_level,
        summary.difficulty,
        timestamp,
    );
    summary.record = Some(record);
    write_json(path, &scores)?;
    Ok(scores)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_frames() {
        let config = RunConfig {
            max_frames: 0,
            ..Default::default()
        };
        assert!(run_session(&config).is_err());
    }

    #[test]
    fn test_rejects_empty_canvas() {
        let config = RunConfig {
            width: 0.0,
            ..Default::default()
        };
        assert!(run_session(&config).is_err());
    }

    #[test]
    fn test_short_run_counts_frames_and_score() {
        let config = RunConfig {
            max_frames: 120,
            seed: 9,
            ..Default::default()
        };
        let summary = run_session(&config).unwrap();
        assert!(summary.frame_count <= 120);
        assert!(summary.frame_count > 0);
        if !summary.game_over {
            assert_eq!(summary.frame_count, 120);
            // 2 simulated seconds, give or take float rounding
            assert!((19..=20).contains(&summary.final_score));
        }
        assert_eq!(summary.final_level, 1);
    }

    #[test]
    fn test_missing_score_file_starts_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let scores = load_scores(&dir.path().join("none.json")).unwrap();
        assert!(scores.is_empty());
    }

    #[test]
    fn test_record_run_writes_score_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("scores.json");
        let mut summary = run_session(&RunConfig {
            max_frames: 90,
            ..Default::default()
        })
        .unwrap();

        let scores = record_run(&path, &mut summary, 1000.0).unwrap();
        assert_eq!(scores.entries.len(), 1);
        assert_eq!(summary.record.map(|r| r.rank), Some(Some(1)));

        let reloaded: HighScores = read_json(&path).unwrap();
        assert_eq!(reloaded.entries, scores.entries);
        assert_eq!(reloaded.credits, summary.final_score / 10);
    }

    #[test]
    fn test_invalid_json_names_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tuning.json");
        fs::write(&path, "{ not json").unwrap();
        let err = load_tuning(&path).unwrap_err();
        assert!(format!("{err:#}").contains("tuning.json"));
    }
}
