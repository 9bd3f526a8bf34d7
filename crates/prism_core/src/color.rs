//! Conversions from UI color values.

use prism_math::Color;

/// Convert an 8-bit-per-channel color into a linear `Color`.
///
/// Channels are divided by 256 so that the renderer's quantisation
/// (`256 * clamp(c, 0, 0.999)`) maps a color back to the same byte.
pub fn color_from_rgb8(r: u8, g: u8, b: u8) -> Color {
    Color::new(r as f64 / 256.0, g as f64 / 256.0, b as f64 / 256.0)
}
