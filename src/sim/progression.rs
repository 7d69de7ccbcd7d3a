//! Score and level progression
//!
//! Score is survival time in deciseconds. Level is looked up from the score
//! every tick, so it can only move forward while the score does.

use super::hooks::{GameHooks, SoundCue};
use super::state::{LevelUpBanner, SimulationState};
use crate::consts::SCORE_MS;

/// Score for a session anchored at `start`, evaluated at `now`
#[inline]
pub fn score_at(start: f64, now: f64) -> u32 {
    ((now - start) / SCORE_MS).floor().max(0.0) as u32
}

/// Recompute score and level, firing the level-up cue on a threshold crossing.
///
/// Returns true if the level increased this tick.
pub fn update(state: &mut SimulationState, now: f64, hooks: &mut dyn GameHooks) -> bool {
    state.score = score_at(state.game_time.start, now);
    hooks.set_score(state.score);

    let index = state.tuning.level_index_for_score(state.score);
    let leveled_up = index > state.level_index;
    if leveled_up {
        state.level_index = index;
        state.level_up = LevelUpBanner {
            alpha: 1.0,
            scale: 0.5,
        };
        hooks.play_sound(SoundCue::LevelUp);
        log::info!("Level {} at score {}", state.level(), state.score);
    }
    hooks.set_level(state.level());
    leveled_up
}

/// Fade and grow the level-up banner
pub fn update_banner(banner: &mut LevelUpBanner, fade: f32, growth: f32, time_scale: f32) {
    if banner.alpha > 0.0 {
        banner.alpha = (banner.alpha - fade * time_scale).max(0.0);
        banner.scale += growth * time_scale;
    }
}
