//! Cosmetic particle pool
//!
//! Particles never influence gameplay. The pool is capped and drops its
//! oldest entries first.

use glam::Vec2;
use rand::Rng;

/// A particle for visual effects
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// 0xRRGGBB
    pub color: u32,
    /// Ticks remaining
    pub life: f32,
    pub initial_life: f32,
}

impl Particle {
    /// Opacity derived from remaining life
    pub fn alpha(&self) -> f32 {
        if self.initial_life <= 0.0 {
            return 0.0;
        }
        (self.life / self.initial_life).clamp(0.0, 1.0)
    }
}

/// Burst parameters for a collision or pickup
#[derive(Debug, Clone, Copy)]
pub struct Burst {
    pub count: usize,
    /// Max |velocity| per axis (px per tick)
    pub speed: f32,
    /// Lifespan in ticks
    pub life: f32,
    pub max_radius: f32,
}

impl Burst {
    /// Asteroid crashing into the planet
    pub const PLANET_IMPACT: Burst = Burst {
        count: 6,
        speed: 1.5,
        life: 25.0,
        max_radius: 3.0,
    };
    /// Asteroid deflected by the shield
    pub const SHIELD_BLOCK: Burst = Burst {
        count: 5,
        speed: 2.0,
        life: 30.0,
        max_radius: 3.0,
    };
    /// Power-up collected by the moon
    pub const PICKUP: Burst = Burst {
        count: 10,
        speed: 2.5,
        life: 35.0,
        max_radius: 2.5,
    };
    /// Asteroid vaporised by a bomb
    pub const BOMB: Burst = Burst {
        count: 4,
        speed: 3.0,
        life: 30.0,
        max_radius: 3.0,
    };
}

/// Bounded particle storage
#[derive(Debug, Clone)]
pub struct ParticlePool {
    particles: Vec<Particle>,
    cap: usize,
}

impl ParticlePool {
    pub fn new(cap: usize) -> Self {
        Self {
            particles: Vec::with_capacity(cap.min(1024)),
            cap,
        }
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn set_cap(&mut self, cap: usize) {
        self.cap = cap;
        self.trim();
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn push(&mut self, particle: Particle) {
        self.particles.push(particle);
        self.trim();
    }

    /// Spawn a burst of randomly scattered particles at `origin`
    pub fn burst<R: Rng>(&mut self, rng: &mut R, origin: Vec2, color: u32, burst: Burst) {
        for _ in 0..burst.count {
            let vel = Vec2::new(
                rng.random_range(-1.0..1.0) * burst.speed,
                rng.random_range(-1.0..1.0) * burst.speed,
            );
            self.particles.push(Particle {
                pos: origin,
                vel,
                radius: rng.random::<f32>() * burst.max_radius,
                color,
                life: burst.life,
                initial_life: burst.life,
            });
        }
        self.trim();
    }

    /// Move, drag and age every particle, dropping the expired ones
    pub fn update(&mut self, time_scale: f32, drag: f32) {
        let decay = drag.powf(time_scale);
        for p in self.particles.iter_mut() {
            p.pos += p.vel * time_scale;
            p.vel *= decay;
            p.life -= time_scale;
        }
        self.particles.retain(|p| p.life > 0.0);
    }

    fn trim(&mut self) {
        if self.particles.len() > self.cap {
            let excess = self.particles.len() - self.cap;
            self.particles.drain(..excess);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn particle(life: f32) -> Particle {
        Particle {
            pos: Vec2::ZERO,
            vel: Vec2::new(2.0, 0.0),
            radius: 1.0,
            color: 0xffffff,
            life,
            initial_life: life,
        }
    }

    #[test]
    fn test_update_moves_drags_and_expires() {
        let mut pool = ParticlePool::new(16);
        pool.push(particle(2.0));
        pool.push(particle(0.5));
        pool.update(1.0, 0.5);
        assert_eq!(pool.len(), 1);
        let p = pool.iter().next().unwrap();
        assert_eq!(p.pos, Vec2::new(2.0, 0.0));
        assert_eq!(p.vel, Vec2::new(1.0, 0.0));
        assert_eq!(p.life, 1.0);
        assert!((p.alpha() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_cap_drops_oldest_first() {
        let mut pool = ParticlePool::new(3);
        for i in 0..5 {
            pool.push(particle(10.0 + i as f32));
        }
        assert_eq!(pool.len(), 3);
        let lives: Vec<f32> = pool.iter().map(|p| p.life).collect();
        assert_eq!(lives, vec![12.0, 13.0, 14.0]);
    }

    #[test]
    fn test_burst_respects_cap_and_speed() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut pool = ParticlePool::new(4);
        pool.burst(&mut rng, Vec2::new(5.0, 5.0), 0xff0000, Burst::PLANET_IMPACT);
        assert_eq!(pool.len(), 4);
        for p in pool.iter() {
            assert!(p.vel.x.abs() <= 1.5 && p.vel.y.abs() <= 1.5);
            assert_eq!(p.life, 25.0);
            assert_eq!(p.pos, Vec2::new(5.0, 5.0));
        }
    }

    #[test]
    fn test_zero_cap_keeps_nothing() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut pool = ParticlePool::new(0);
        pool.burst(&mut rng, Vec2::ZERO, 0, Burst::SHIELD_BLOCK);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_shrinking_cap_trims_immediately() {
        let mut pool = ParticlePool::new(8);
        for _ in 0..8 {
            pool.push(particle(5.0));
        }
        pool.set_cap(2);
        assert_eq!(pool.len(), 2);
    }
}
