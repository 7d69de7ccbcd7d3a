//! Background ambience: starfield, nebulae, shooting stars
//!
//! Advanced every frame in every phase, including while paused.

use glam::Vec2;
use rand::Rng;

/// Probability per reference tick that a shooting star appears
const SHOOTING_STAR_CHANCE: f32 = 0.005;
/// Opacity lost per tick by a shooting star
const SHOOTING_STAR_FADE: f32 = 0.015;
const MAX_STARS: usize = 150;
/// Canvas area (px^2) per star
const STAR_DENSITY: f32 = 4000.0;
/// Number of tints the renderer provides for nebulae
pub const NEBULA_TINTS: usize = 3;

#[derive(Debug, Clone)]
pub struct Star {
    pub pos: Vec2,
    pub radius: f32,
    pub alpha: f32,
    /// Downward drift (px per tick)
    pub speed: f32,
}

#[derive(Debug, Clone)]
pub struct Nebula {
    pub pos: Vec2,
    pub radius: f32,
    pub vel: Vec2,
    /// Index into the backdrop's nebula palette
    pub tint: usize,
    pub pulse_phase: f32,
    pub pulse_speed: f32,
}

impl Nebula {
    /// Radius including the current pulse
    pub fn pulse_radius(&self) -> f32 {
        self.radius * (1.0 + 0.1 * self.pulse_phase.sin())
    }
}

#[derive(Debug, Clone)]
pub struct ShootingStar {
    pub pos: Vec2,
    pub vel: Vec2,
    pub length: f32,
    pub opacity: f32,
}

/// All background state
#[derive(Debug, Clone, Default)]
pub struct Ambient {
    pub stars: Vec<Star>,
    pub nebulae: Vec<Nebula>,
    pub shooting_stars: Vec<ShootingStar>,
}

impl Ambient {
    /// Populate a background for a canvas of the given size
    pub fn generate<R: Rng>(rng: &mut R, size: Vec2) -> Self {
        let width = size.x.max(1.0);
        let height = size.y.max(1.0);

        let star_count = ((width * height / STAR_DENSITY) as usize).min(MAX_STARS);
        let stars = (0..star_count)
            .map(|_| Star {
                pos: Vec2::new(rng.random::<f32>() * width, rng.random::<f32>() * height),
                radius: rng.random::<f32>() * 1.2 + 0.5,
                alpha: rng.random::<f32>() * 0.5 + 0.5,
                speed: rng.random::<f32>() * 0.3 + 0.1,
            })
            .collect();

        let nebula_count = rng.random_range(2..=4);
        let min_radius = (width / 4.0).max(1.0);
        let max_radius = (width / 2.0).max(min_radius + 1.0);
        let nebulae = (0..nebula_count)
            .map(|_| Nebula {
                pos: Vec2::new(rng.random::<f32>() * width, rng.random::<f32>() * height),
                radius: rng.random_range(min_radius..max_radius),
                vel: Vec2::new(
                    (rng.random::<f32>() - 0.5) * 0.05,
                    (rng.random::<f32>() - 0.5) * 0.05,
                ),
                tint: rng.random_range(0..NEBULA_TINTS),
                pulse_phase: rng.random::<f32>() * std::f32::consts::TAU,
                pulse_speed: 0.002 + rng.random::<f32>() * 0.005,
            })
            .collect();

        Self {
            stars,
            nebulae,
            shooting_stars: Vec::new(),
        }
    }

    /// Advance the background by one frame
    pub fn update<R: Rng>(&mut self, rng: &mut R, size: Vec2, time_scale: f32) {
        for star in &mut self.stars {
            star.pos.y += star.speed * time_scale;
            if star.pos.y > size.y {
                star.pos.y = 0.0;
                star.pos.x = rng.random::<f32>() * size.x;
            }
        }

        for nebula in &mut self.nebulae {
            nebula.pos += nebula.vel * time_scale;
            nebula.pulse_phase += nebula.pulse_speed * time_scale;

            let r = nebula.radius;
            let off_screen = nebula.pos.x - r > size.x
                || nebula.pos.x + r < 0.0
                || nebula.pos.y - r > size.y
                || nebula.pos.y + r < 0.0;
            if off_screen {
                nebula.pos = Vec2::new(rng.random::<f32>() * size.x, -r);
            }
        }

        if rng.random::<f32>() < SHOOTING_STAR_CHANCE * time_scale {
            self.shooting_stars.push(ShootingStar {
                pos: Vec2::new(
                    rng.random::<f32>() * size.x,
                    rng.random::<f32>() * size.y * 0.6,
                ),
                vel: Vec2::new(
                    15.0 + rng.random::<f32>() * 10.0,
                    2.0 + rng.random::<f32>() * 3.0,
                ),
                length: 50.0 + rng.random::<f32>() * 80.0,
                opacity: 1.0,
            });
        }

        for s in &mut self.shooting_stars {
            s.pos += s.vel * time_scale;
            s.opacity -= SHOOTING_STAR_FADE * time_scale;
        }
        self.shooting_stars.retain(|s| {
            s.opacity > 0.0 && s.pos.x <= size.x + 100.0 && s.pos.y <= size.y + 100.0
        });
    }
}
