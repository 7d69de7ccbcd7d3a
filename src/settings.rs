//! Player settings and cosmetics
//!
//! Persisted separately from the leaderboard in LocalStorage. A session reads
//! a snapshot when it starts; edits mid-session apply to the next one.

use serde::{Deserialize, Serialize};

use crate::renderer::color::parse_hex_color;
use crate::sim::{PowerUpKind, SessionConfig};
use crate::tuning::Difficulty;

pub const DEFAULT_PLANET_COLOR: u32 = 0x0ea5e9;
pub const DEFAULT_MOON_COLOR: u32 = 0xe5e7eb;
pub const DEFAULT_TRAIL_COLOR: u32 = 0x38bdf8;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => 500,
            QualityPreset::High => 2000,
        }
    }

    /// Moon trail segments (normal, boosted)
    pub fn trail_segments(&self) -> (usize, usize) {
        match self {
            QualityPreset::Low => (4, 8),
            QualityPreset::Medium | QualityPreset::High => (8, 15),
        }
    }

    /// Whether to render nebula background
    pub fn nebula_enabled(&self) -> bool {
        !matches!(self, QualityPreset::Low)
    }
}

/// Moon appearance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MoonSkin {
    #[default]
    Default,
    /// Rotating square plating
    Tech,
    /// Plain disc with a highlight
    Smooth,
    /// Heavily cratered
    Crater,
}

impl MoonSkin {
    pub const ALL: [MoonSkin; 4] = [
        MoonSkin::Default,
        MoonSkin::Tech,
        MoonSkin::Smooth,
        MoonSkin::Crater,
    ];
}

/// Background color scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Backdrop {
    #[default]
    Classic,
    Aurora,
    /// Stars only
    Void,
}

impl Backdrop {
    pub const ALL: [Backdrop; 3] = [Backdrop::Classic, Backdrop::Aurora, Backdrop::Void];
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: Difficulty,
    /// Show the tutorial before the next session
    pub tutorial: bool,
    /// Consumable applied at the start of the next session
    pub equipped_consumable: Option<PowerUpKind>,

    // === Cosmetics ===
    /// Hex color strings ("#rrggbb"); invalid values fall back to defaults
    pub planet_color: String,
    pub moon_color: String,
    pub trail_color: String,
    pub moon_skin: MoonSkin,
    pub backdrop: Backdrop,

    // === Visual Effects ===
    /// Graphics quality preset
    pub quality: QualityPreset,
    pub particles: bool,
    pub trails: bool,
    /// Full-screen flash on collision and bomb
    pub screen_flash: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Accessibility ===
    /// Reduced motion (no flashes, no shooting stars)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            tutorial: true,
            equipped_consumable: None,

            planet_color: "#0ea5e9".to_string(),
            moon_color: "#e5e7eb".to_string(),
            trail_color: "#38bdf8".to_string(),
            moon_skin: MoonSkin::Default,
            backdrop: Backdrop::Classic,

            quality: QualityPreset::Medium,
            particles: true,
            trails: true,
            screen_flash: true,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset (applies preset defaults)
    pub fn from_preset(preset: QualityPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a quality preset (updates quality-dependent settings)
    pub fn apply_preset(&mut self, preset: QualityPreset) {
        self.quality = preset;

        // Low preset disables trails for performance
        if preset == QualityPreset::Low {
            self.trails = false;
        }
    }

    /// Parse a settings document; unknown or missing fields use defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Effective screen flash (respects reduced_motion)
    pub fn effective_screen_flash(&self) -> bool {
        self.screen_flash && !self.reduced_motion
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Effective output gain for sound effects
    pub fn sfx_gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    pub fn planet_rgb(&self) -> u32 {
        parse_hex_color(&self.planet_color).unwrap_or(DEFAULT_PLANET_COLOR)
    }

    pub fn moon_rgb(&self) -> u32 {
        parse_hex_color(&self.moon_color).unwrap_or(DEFAULT_MOON_COLOR)
    }

    pub fn trail_rgb(&self) -> u32 {
        parse_hex_color(&self.trail_color).unwrap_or(DEFAULT_TRAIL_COLOR)
    }

    /// Session options for the next run.
    ///
    /// Bombs are not a valid start consumable and are ignored.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            difficulty: self.difficulty,
            tutorial: self.tutorial,
            start_power_up: self.equipped_consumable.filter(|k| k.is_timed()),
            max_particles: self.max_particles(),
        }
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "planet_orbit_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }
}
