//! Delta-time normalizer
//!
//! Converts wall-clock frame deltas into a dimensionless time scale where
//! 1.0 is one 60 Hz frame.

use crate::consts::{FRAME_MS, MAX_FRAME_MS};

/// Time scale for a wall-clock delta, capped at `MAX_FRAME_MS`
#[inline]
pub fn time_scale_for(dt_ms: f64) -> f32 {
    (dt_ms.clamp(0.0, MAX_FRAME_MS) / FRAME_MS) as f32
}

/// Largest time scale a single frame can produce
pub fn max_time_scale() -> f32 {
    time_scale_for(MAX_FRAME_MS)
}

/// Tracks the previous frame timestamp
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_time: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { last_time: None }
    }

    /// Forget the previous frame so the next delta starts at `now`
    pub fn reset(&mut self, now: f64) {
        self.last_time = Some(now);
    }

    /// Record a frame at `now` and return its time scale.
    ///
    /// The first frame after construction counts as exactly one reference frame.
    pub fn advance(&mut self, now: f64) -> f32 {
        let dt = match self.last_time {
            Some(last) => now - last,
            None => FRAME_MS,
        };
        self.last_time = Some(now);
        time_scale_for(dt)
    }
}
