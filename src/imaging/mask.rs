//! Per-pixel queries against a processed buffer
//!
//! Coordinates are signed so callers can probe box corners that fall off the
//! canvas; such probes are simply ineligible.

use crate::color::Rgb;
use crate::imaging::filters::pixel_luminance;
use crate::io::configuration::MIN_MASK_ALPHA;
use image::{Rgba, RgbaImage};

/// Colour and luminance sampled from one pixel
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelSample {
    /// RGB channels of the pixel
    pub color: Rgb,
    /// Perceptual luminance of the pixel
    pub luminance: f32,
}

fn pixel_at(buffer: &RgbaImage, x: i64, y: i64) -> Option<&Rgba<u8>> {
    let x = u32::try_from(x).ok()?;
    let y = u32::try_from(y).ok()?;
    buffer.get_pixel_checked(x, y)
}

/// Whether a canvas location is inside the dark, opaque region words may occupy
///
/// True iff the pixel exists, its alpha is at least [`MIN_MASK_ALPHA`] and its
/// luminance is strictly below `density`.
pub fn check_mask(buffer: &RgbaImage, x: i64, y: i64, density: f32) -> bool {
    pixel_at(buffer, x, y)
        .is_some_and(|pixel| pixel.0[3] >= MIN_MASK_ALPHA && pixel_luminance(pixel) < density)
}

/// RGB and luminance at a location, zero for out-of-range coordinates
pub fn pixel_color(buffer: &RgbaImage, x: i64, y: i64) -> PixelSample {
    pixel_at(buffer, x, y).map_or_else(PixelSample::default, |pixel| {
        let [r, g, b, _] = pixel.0;
        PixelSample {
            color: Rgb::new(r, g, b),
            luminance: pixel_luminance(pixel),
        }
    })
}
