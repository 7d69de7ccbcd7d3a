//! Frame geometry for a host-owned drawing surface
//!
//! [`build_frame`] turns a borrowed [`SimulationState`] plus the player's
//! cosmetic settings into one triangle list in canvas pixel coordinates.
//! The host uploads it however it likes (WebGL, canvas, a test harness).

pub mod color;
pub mod shapes;
pub mod skins;
pub mod vertex;

pub use vertex::Vertex;

use glam::Vec2;

use crate::settings::Settings;
use crate::sim::{PowerUp, PowerUpKind, SessionPhase, SimulationState};
use color::{darken, lighten, rgba};
use vertex::colors;

/// One frame of geometry
#[derive(Debug, Clone)]
pub struct Frame {
    pub clear_color: [f32; 4],
    pub vertices: Vec<Vertex>,
}

/// Build everything visible this frame. `time_ms` drives purely decorative pulses.
pub fn build_frame(state: &SimulationState, settings: &Settings, time_ms: f64) -> Frame {
    let style = skins::backdrop(settings.backdrop);
    let mut out = Vec::with_capacity(8192);

    draw_background(&mut out, state, settings, style);
    draw_planet(&mut out, state, settings, time_ms);

    // Orbit path
    out.extend(shapes::ring(
        state.planet.pos,
        state.moon.orbit_radius - 0.5,
        state.moon.orbit_radius + 0.5,
        rgba(colors::WHITE, 0.1),
        96,
    ));

    let hard = state.difficulty == crate::Difficulty::Hard;
    for a in &state.asteroids {
        let points: Vec<Vec2> = a
            .outline
            .iter()
            .map(|p| a.pos + crate::rotate(*p, a.rotation))
            .collect();
        out.extend(shapes::polygon(a.pos, &points, rgba(a.color, 1.0)));
        let (width, stroke) = if hard {
            (3.0, colors::HARD_OUTLINE)
        } else {
            (2.0, a.stroke)
        };
        out.extend(shapes::outline(&points, width, rgba(stroke, 1.0)));

        let pit = rgba(darken(a.color, 25.0), 1.0);
        for c in &a.craters {
            let pos = a.pos + crate::rotate(c.offset, a.rotation);
            out.extend(shapes::circle(pos, c.radius, pit, 8));
        }
    }

    for p in &state.power_ups {
        draw_power_up(&mut out, p);
    }

    if matches!(state.phase, SessionPhase::Idle | SessionPhase::Playing) {
        draw_moon(&mut out, state, settings, time_ms);
    }

    // Particles as squares
    for p in state.particles.iter() {
        out.extend(shapes::square(p.pos, p.radius, 0.0, rgba(p.color, p.alpha())));
    }

    if state.level_up.alpha > 0.0 && !settings.reduced_motion {
        let r = state.planet.radius * (1.0 + state.level_up.scale);
        out.extend(shapes::ring(
            state.planet.pos,
            r,
            r + 3.0,
            rgba(colors::WHITE, state.level_up.alpha * 0.6),
            64,
        ));
    }

    if state.screen_flash > 0.0 && settings.effective_screen_flash() {
        out.extend(shapes::quad(
            [
                Vec2::ZERO,
                Vec2::new(state.canvas.x, 0.0),
                state.canvas,
                Vec2::new(0.0, state.canvas.y),
            ],
            rgba(colors::WHITE, state.screen_flash * 0.8),
        ));
    }

    Frame {
        clear_color: style.clear,
        vertices: out,
    }
}

fn draw_background(
    out: &mut Vec<Vertex>,
    state: &SimulationState,
    settings: &Settings,
    style: &skins::BackdropStyle,
) {
    let ambient = &state.ambient;

    if style.nebulae && settings.quality.nebula_enabled() {
        for n in &ambient.nebulae {
            let tint = style.nebula_tints[n.tint % style.nebula_tints.len()];
            out.extend(shapes::radial_gradient(
                n.pos,
                n.pulse_radius(),
                rgba(tint, style.nebula_alpha),
                rgba(tint, 0.0),
                32,
            ));
        }
    }

    for s in &ambient.stars {
        out.extend(shapes::circle(s.pos, s.radius, rgba(colors::WHITE, s.alpha), 6));
    }

    if !settings.reduced_motion {
        for s in &ambient.shooting_stars {
            let tail = s.pos - s.vel.normalize_or_zero() * s.length;
            out.extend(shapes::streak(
                s.pos,
                tail,
                2.0,
                rgba(colors::WHITE, s.opacity),
                rgba(colors::WHITE, 0.0),
            ));
        }
    }
}

fn draw_planet(out: &mut Vec<Vertex>, state: &SimulationState, settings: &Settings, time_ms: f64) {
    let planet = &state.planet;
    let base = settings.planet_rgb();

    // Glow
    out.extend(shapes::circle(planet.pos, planet.radius * 1.5, rgba(base, 0.15), 48));

    // Body, lit from the upper left
    let light = planet.pos - Vec2::splat(planet.radius * 0.3);
    out.extend(shapes::circle(planet.pos, planet.radius, rgba(darken(base, 40.0), 1.0), 48));
    out.extend(shapes::radial_gradient(
        light,
        planet.radius * 0.7,
        rgba(lighten(base, 20.0), 1.0),
        rgba(base, 1.0),
        48,
    ));

    // Atmosphere bands
    let drift = (time_ms * 0.0002) as f32;
    for i in 0..5 {
        let dir = if i % 2 == 0 { 1.0 } else { -0.5 };
        let offset = drift * dir + planet.atmosphere_rotation;
        let r = planet.radius * (0.6 + i as f32 * 0.08);
        let start = std::f32::consts::PI * (0.1 + i as f32 * 0.4) + offset;
        let end = std::f32::consts::PI * (1.0 + 0.06 * i as f32) + offset;
        out.extend(shapes::arc_band(
            planet.pos,
            r - 0.75,
            r + 0.75,
            start,
            end,
            rgba(colors::WHITE, 0.08),
            24,
        ));
    }
}

fn draw_power_up(out: &mut Vec<Vertex>, p: &PowerUp) {
    let alpha = p.alpha();
    let r = p.radius;
    let at = |x: f32, y: f32| p.pos + crate::rotate(Vec2::new(x, y) * r, p.rotation);

    out.extend(shapes::circle(p.pos, r, rgba(colors::WHITE, 0.1 * alpha), 24));

    match p.kind {
        PowerUpKind::Shield => {
            let stroke = rgba(colors::SHIELD_ICON, alpha);
            out.extend(shapes::ring(p.pos, r * 0.7 - 1.5, r * 0.7 + 1.5, stroke, 24));
            out.extend(shapes::line(at(0.0, -0.5), at(0.0, 0.5), 3.0, stroke));
            out.extend(shapes::line(at(-0.5, 0.0), at(0.5, 0.0), 3.0, stroke));
        }
        PowerUpKind::SpeedBoost => {
            let bolt = [
                at(-0.2, -0.7),
                at(0.5, 0.0),
                at(0.2, 0.1),
                at(0.2, 0.7),
                at(-0.5, 0.0),
                at(-0.2, -0.1),
            ];
            out.extend(shapes::outline(&bolt, 3.0, rgba(colors::BOOST_ICON, alpha)));
        }
        PowerUpKind::Bomb => {
            let stroke = rgba(colors::BOMB_ICON, alpha);
            out.extend(shapes::ring(p.pos, r * 0.5 - 1.5, r * 0.5 + 1.5, stroke, 24));
            for i in 0..8 {
                let dir = crate::polar_to_cartesian(1.0, i as f32 / 8.0 * std::f32::consts::TAU);
                out.extend(shapes::line(at(dir.x * 0.6, dir.y * 0.6), at(dir.x * 0.9, dir.y * 0.9), 3.0, stroke));
            }
        }
    }
}

fn draw_moon(out: &mut Vec<Vertex>, state: &SimulationState, settings: &Settings, time_ms: f64) {
    let moon = &state.moon;
    let pos = state.moon_position();
    let boosted = state.effects.boosted();
    let moon_color = settings.moon_rgb();

    if settings.trails {
        let (normal, boost) = settings.quality.trail_segments();
        let length = if boosted { boost } else { normal };
        let speed = state.angular_speed() * if boosted { 2.0 } else { 1.0 };
        let trail = settings.trail_rgb();
        for i in 1..=length {
            let t = i as f32 / length as f32;
            let past = moon.heading() - speed * i as f32 * 1.5;
            let p = state.planet.pos + crate::polar_to_cartesian(moon.orbit_radius, past);
            let r = moon.radius * (1.0 - i as f32 / (length as f32 * 1.5));
            out.extend(shapes::circle(p, r, rgba(trail, 0.3 * (1.0 - t)), 12));
        }
    }

    // Glow
    let (glow_radius, glow_color) = if boosted {
        (moon.radius * 2.5, colors::BOOST_GLOW)
    } else {
        (moon.radius * 1.8, moon_color)
    };
    out.extend(shapes::circle(pos, glow_radius, rgba(glow_color, 0.2), 24));

    let skin = skins::moon_skin(settings.moon_skin);
    let facing = moon.heading() + if skin.spins { moon.rotation } else { 0.0 };
    (skin.paint)(out, pos, moon.radius, facing, moon_color);

    if state.effects.shielded() {
        let pulse = ((time_ms / 200.0).sin() * 0.1 + 0.9) as f32;
        let r = state.shield_radius();
        let half = 2.0 * pulse;
        out.extend(shapes::ring(
            pos,
            r - half,
            r + half,
            rgba(colors::SHIELD, 0.8 * pulse),
            32,
        ));
    }
}
