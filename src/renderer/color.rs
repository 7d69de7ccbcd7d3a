//! Color helpers
//!
//! Colors travel through the simulation as packed `0xRRGGBB` integers and
//! become linear `[f32; 4]` only when vertices are built.

/// Parse `#rrggbb` (leading `#` optional). Anything else is rejected.
pub fn parse_hex_color(s: &str) -> Option<u32> {
    let hex = s.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(hex, 16).ok()
}

/// Split a packed color into 0-255 channels
#[inline]
pub fn channels(rgb: u32) -> (u8, u8, u8) {
    ((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

#[inline]
fn pack(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Packed color to vertex color with the given alpha
pub fn rgba(rgb: u32, alpha: f32) -> [f32; 4] {
    let (r, g, b) = channels(rgb);
    [
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        alpha.clamp(0.0, 1.0),
    ]
}

fn scale(rgb: u32, factor: f32) -> u32 {
    let (r, g, b) = channels(rgb);
    let f = |c: u8| (c as f32 * factor).round().clamp(0.0, 255.0) as u8;
    pack(f(r), f(g), f(b))
}

/// Brighten by `percent` (channels saturate at 255)
pub fn lighten(rgb: u32, percent: f32) -> u32 {
    scale(rgb, 1.0 + percent / 100.0)
}

/// Darken by `percent`
pub fn darken(rgb: u32, percent: f32) -> u32 {
    scale(rgb, 1.0 - percent / 100.0)
}
