//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position (canvas px) and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    /// Floats per vertex in the interleaved buffer
    pub const FLOATS: usize = 6;

    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    /// View a vertex list as the interleaved `x, y, r, g, b, a` float buffer
    pub fn as_floats(vertices: &[Vertex]) -> &[f32] {
        bytemuck::cast_slice(vertices)
    }
}

/// Fixed colors for game elements (0xRRGGBB)
pub mod colors {
    pub const WHITE: u32 = 0xffffff;
    /// Shield ring (blue-300)
    pub const SHIELD: u32 = 0x93c5fd;
    /// Moon glow while boosted (amber-400)
    pub const BOOST_GLOW: u32 = 0xfbbf24;
    /// Hard difficulty asteroid outline
    pub const HARD_OUTLINE: u32 = 0xef4444;
    /// Power-up icon strokes
    pub const SHIELD_ICON: u32 = 0x3b82f6;
    pub const BOOST_ICON: u32 = 0xfbbf24;
    pub const BOMB_ICON: u32 = 0xef4444;
}
