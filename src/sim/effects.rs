//! Time-boxed status effects granted by power-ups
//!
//! Expiry is checked lazily against the injected wall clock each tick.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PowerUpKind {
    /// Absorbs asteroids that would hit the moon
    Shield,
    /// Moon orbits faster
    SpeedBoost,
    /// Clears every asteroid on screen
    Bomb,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::Shield,
        PowerUpKind::SpeedBoost,
        PowerUpKind::Bomb,
    ];

    /// Whether the kind leaves a lasting status effect
    pub fn is_timed(&self) -> bool {
        !matches!(self, PowerUpKind::Bomb)
    }

    /// Signature color (0xRRGGBB) for icons and pickup bursts
    pub fn color(&self) -> u32 {
        match self {
            PowerUpKind::Shield => 0x38bdf8,
            PowerUpKind::SpeedBoost => 0xfacc15,
            PowerUpKind::Bomb => 0xef4444,
        }
    }
}

/// A boolean modifier with a wall-clock end time (ms)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StatusEffect {
    pub active: bool,
    pub end_time: f64,
}

impl StatusEffect {
    pub fn activate(&mut self, now: f64, duration_ms: f64) {
        self.active = true;
        self.end_time = now + duration_ms;
    }

    /// Deactivate once `now` reaches the end time. Returns true on the tick it expires.
    pub fn expire(&mut self, now: f64) -> bool {
        if self.active && now >= self.end_time {
            self.active = false;
            return true;
        }
        false
    }

    /// Push the end time back by a paused interval
    pub fn extend(&mut self, gap_ms: f64) {
        self.end_time += gap_ms;
    }
}

/// Status effects currently applied to the moon
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ActivePowerUps {
    pub shield: StatusEffect,
    pub speed_boost: StatusEffect,
}

impl ActivePowerUps {
    /// Lazily expire both effects
    pub fn expire(&mut self, now: f64) {
        if self.shield.expire(now) {
            log::debug!("Shield expired");
        }
        if self.speed_boost.expire(now) {
            log::debug!("Speed boost expired");
        }
    }

    /// Shift both end times forward so a pause does not burn them down
    pub fn extend(&mut self, gap_ms: f64) {
        self.shield.extend(gap_ms);
        self.speed_boost.extend(gap_ms);
    }

    /// Apply a timed power-up. Bombs have no lasting effect and are ignored here.
    pub fn grant(&mut self, kind: PowerUpKind, now: f64, tuning: &Tuning) {
        match kind {
            PowerUpKind::Shield => self.shield.activate(now, tuning.shield_duration_ms),
            PowerUpKind::SpeedBoost => self
                .speed_boost
                .activate(now, tuning.speed_boost_duration_ms),
            PowerUpKind::Bomb => {}
        }
    }

    pub fn shielded(&self) -> bool {
        self.shield.active
    }

    pub fn boosted(&self) -> bool {
        self.speed_boost.active
    }
}
