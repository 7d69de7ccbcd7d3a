//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay headless:
//! - Time comes in as a `now` parameter, never from a global clock
//! - Seeded RNG only
//! - Host effects (score, sound, game over) go through [`GameHooks`]
//! - No rendering or platform dependencies

pub mod ambient;
pub mod clock;
pub mod collision;
pub mod effects;
pub mod hooks;
pub mod particles;
pub mod progression;
pub mod spawn;
pub mod state;
pub mod tick;

pub use clock::{FrameClock, time_scale_for};
pub use collision::circles_overlap;
pub use effects::{ActivePowerUps, PowerUpKind, StatusEffect};
pub use hooks::{EventLog, GameHooks, SoundCue};
pub use particles::{Particle, ParticlePool};
pub use progression::score_at;
pub use state::{
    Asteroid, GameTime, Moon, OrbitBounds, Planet, PowerUp, SessionConfig, SessionPhase,
    SimulationState, TutorialStep,
};
pub use tick::{TickInput, step, tick};
