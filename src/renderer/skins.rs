//! Cosmetic skin dispatch tables
//!
//! Each [`MoonSkin`] and [`Backdrop`] maps to a static style entry, resolved
//! once per frame. Adding a skin means adding a table row, not a branch in
//! the frame builder.

use glam::Vec2;

use super::color::{darken, rgba};
use super::shapes;
use super::vertex::{Vertex, colors};
use crate::settings::{Backdrop, MoonSkin};
use crate::sim::ambient::NEBULA_TINTS;

/// Moon body painter: center, radius, facing angle, base color
pub type MoonPainter = fn(&mut Vec<Vertex>, Vec2, f32, f32, u32);

pub struct MoonSkinStyle {
    /// Body turns with the moon's self-rotation as well as its orbit angle
    pub spins: bool,
    pub paint: MoonPainter,
}

pub struct BackdropStyle {
    pub clear: [f32; 4],
    /// Packed nebula tints, indexed by `Nebula::tint`
    pub nebula_tints: [u32; NEBULA_TINTS],
    pub nebula_alpha: f32,
    pub nebulae: bool,
}

static MOON_SKINS: [MoonSkinStyle; 4] = [
    MoonSkinStyle {
        spins: false,
        paint: paint_default,
    },
    MoonSkinStyle {
        spins: true,
        paint: paint_tech,
    },
    MoonSkinStyle {
        spins: false,
        paint: paint_smooth,
    },
    MoonSkinStyle {
        spins: false,
        paint: paint_crater,
    },
];

static BACKDROPS: [BackdropStyle; 3] = [
    // Classic
    BackdropStyle {
        clear: [0.0, 0.0, 0.02, 1.0],
        nebula_tints: [0x084f8a, 0x6b21a8, 0x075985],
        nebula_alpha: 0.12,
        nebulae: true,
    },
    // Aurora
    BackdropStyle {
        clear: [0.0, 0.03, 0.03, 1.0],
        nebula_tints: [0x047857, 0x0e7490, 0x4d7c0f],
        nebula_alpha: 0.15,
        nebulae: true,
    },
    // Void
    BackdropStyle {
        clear: [0.0, 0.0, 0.0, 1.0],
        nebula_tints: [0; NEBULA_TINTS],
        nebula_alpha: 0.0,
        nebulae: false,
    },
];

pub fn moon_skin(skin: MoonSkin) -> &'static MoonSkinStyle {
    &MOON_SKINS[skin as usize]
}

pub fn backdrop(backdrop: Backdrop) -> &'static BackdropStyle {
    &BACKDROPS[backdrop as usize]
}

fn paint_default(out: &mut Vec<Vertex>, center: Vec2, radius: f32, angle: f32, color: u32) {
    out.extend(shapes::circle(center, radius, rgba(color, 1.0), 24));

    // Faint craters
    let crater = rgba(darken(color, 15.0), 0.8);
    for i in 0..3 {
        let dist = i as f32 / 3.0 * radius * 0.6;
        let offset = crate::polar_to_cartesian(dist, i as f32 * 1.8 + angle);
        out.extend(shapes::circle(center + offset, 1.5, crater, 8));
    }
}

fn paint_tech(out: &mut Vec<Vertex>, center: Vec2, radius: f32, angle: f32, color: u32) {
    out.extend(shapes::square(center, radius * 0.6, angle, rgba(color, 1.0)));

    let strut = rgba(darken(color, 30.0), 1.0);
    let vertical = crate::rotate(Vec2::new(0.0, radius), angle);
    let horizontal = crate::rotate(Vec2::new(radius, 0.0), angle);
    out.extend(shapes::line(center - vertical, center + vertical, 2.0, strut));
    out.extend(shapes::line(center - horizontal, center + horizontal, 2.0, strut));

    let corners = [
        Vec2::new(-1.0, -1.0),
        Vec2::new(1.0, -1.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(-1.0, 1.0),
    ]
    .map(|c| center + crate::rotate(c * radius * 0.3, angle));
    out.extend(shapes::outline(&corners, 1.0, rgba(colors::WHITE, 1.0)));
}

fn paint_smooth(out: &mut Vec<Vertex>, center: Vec2, radius: f32, _angle: f32, color: u32) {
    out.extend(shapes::radial_gradient(
        center,
        radius,
        rgba(colors::WHITE, 1.0),
        rgba(color, 1.0),
        24,
    ));
}

fn paint_crater(out: &mut Vec<Vertex>, center: Vec2, radius: f32, angle: f32, color: u32) {
    out.extend(shapes::circle(center, radius, rgba(color, 1.0), 24));

    let pit = rgba(darken(color, 20.0), 1.0);
    for (offset, r) in [
        (Vec2::new(-2.0, -2.0), 3.0),
        (Vec2::new(3.0, 3.0), 2.0),
        (Vec2::new(3.0, -3.0), 1.5),
    ] {
        let scale = radius / 12.0;
        let pos = center + crate::rotate(offset * scale, angle);
        out.extend(shapes::circle(pos, r * scale, pit, 8));
    }
}
