//! Buffer-to-buffer preprocessing filters
//!
//! Each filter takes the buffer by value and hands it back, so the chain in
//! [`crate::imaging::layout::process_image`] reads as a linear pipeline.

use crate::color::{Rgb, brightness, clamp_channel, hex_to_rgb};
use crate::io::configuration::{
    DEFAULT_NEGATIVE_COLOR, DEFAULT_THRESHOLD_PERCENT, EDGE_STRENGTH_DIVISOR,
};
use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

// Sobel kernels laid out row-major alongside their sampling offsets
const KERNEL_OFFSETS: [(i64, i64); 9] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (0, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];
const SOBEL_X: [f32; 9] = [-1.0, 0.0, 1.0, -2.0, 0.0, 2.0, -1.0, 0.0, 1.0];
const SOBEL_Y: [f32; 9] = [-1.0, -2.0, -1.0, 0.0, 0.0, 0.0, 1.0, 2.0, 1.0];

/// Preprocessing parameters applied after the source is drawn onto the canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingParams {
    /// Luminance cutoff as a percentage of 255; brighter pixels become white
    pub threshold_percent: f32,
    /// Edge darkening strength in `0.0..=10.0`, zero disables the pass
    pub edge_strength: f32,
    /// Whether the negative tint is applied to pixels at or below the cutoff
    pub negative: bool,
    /// Hex colour added to the inverted channels by the negative pass
    pub negative_color: String,
}

impl Default for ProcessingParams {
    fn default() -> Self {
        Self {
            threshold_percent: DEFAULT_THRESHOLD_PERCENT,
            edge_strength: 0.0,
            negative: false,
            negative_color: DEFAULT_NEGATIVE_COLOR.to_string(),
        }
    }
}

/// Luminance of a pixel, ignoring alpha
pub fn pixel_luminance(pixel: &Rgba<u8>) -> f32 {
    let [r, g, b, _] = pixel.0;
    brightness(r, g, b)
}

/// Absolute luminance cutoff for a threshold percentage
pub const fn threshold_cutoff(threshold_percent: f32) -> f32 {
    255.0 * threshold_percent / 100.0
}

/// Darken edges using the Sobel gradient magnitude of each colour channel
///
/// Border pixels are left untouched and gradients are computed from a snapshot
/// of the input, so the output never depends on already-edited neighbours.
/// A channel can only get darker.
#[must_use]
pub fn apply_edge_detection(mut buffer: RgbaImage, strength: f32) -> RgbaImage {
    if strength <= 0.0 || !strength.is_finite() {
        return buffer;
    }
    let (width, height) = buffer.dimensions();
    if width < 3 || height < 3 {
        return buffer;
    }

    let snapshot = buffer.clone();
    let factor = strength / EDGE_STRENGTH_DIVISOR;

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let mut gx = [0.0f32; 3];
            let mut gy = [0.0f32; 3];

            for ((&(dx, dy), &kx), &ky) in KERNEL_OFFSETS.iter().zip(&SOBEL_X).zip(&SOBEL_Y) {
                let sx = u32::try_from(i64::from(x) + dx).unwrap_or(x);
                let sy = u32::try_from(i64::from(y) + dy).unwrap_or(y);
                let Some(sample) = snapshot.get_pixel_checked(sx, sy) else {
                    continue;
                };
                for ((sum_x, sum_y), &channel) in gx.iter_mut().zip(gy.iter_mut()).zip(&sample.0) {
                    *sum_x += kx * f32::from(channel);
                    *sum_y += ky * f32::from(channel);
                }
            }

            if let Some(pixel) = buffer.get_pixel_mut_checked(x, y) {
                for ((channel, sum_x), sum_y) in pixel.0.iter_mut().zip(&gx).zip(&gy) {
                    let magnitude = sum_x.hypot(*sum_y) * factor;
                    *channel = clamp_channel(f32::from(*channel) - magnitude);
                }
            }
        }
    }

    buffer
}

/// Force every pixel brighter than the cutoff to opaque white
///
/// Alpha is preserved. Applying the same threshold twice is a no-op the second time.
#[must_use]
pub fn apply_threshold(mut buffer: RgbaImage, threshold_percent: f32) -> RgbaImage {
    let cutoff = threshold_cutoff(threshold_percent);
    for pixel in buffer.pixels_mut() {
        if pixel_luminance(pixel) > cutoff {
            let [r, g, b, _] = &mut pixel.0;
            *r = 255;
            *g = 255;
            *b = 255;
        }
    }
    buffer
}

/// Invert pixels at or below the cutoff and tint them with `negative_color`
///
/// Each channel becomes `clamp(255 - channel + tint)`.
#[must_use]
pub fn apply_negative(
    mut buffer: RgbaImage,
    threshold_percent: f32,
    negative_color: &str,
) -> RgbaImage {
    let cutoff = threshold_cutoff(threshold_percent);
    let tint: Rgb = hex_to_rgb(negative_color);
    for pixel in buffer.pixels_mut() {
        if pixel_luminance(pixel) <= cutoff {
            for (channel, tint_channel) in pixel.0.iter_mut().zip(tint.channels()) {
                *channel =
                    clamp_channel(255 - i32::from(*channel) + i32::from(tint_channel));
            }
        }
    }
    buffer
}
