//! Source-over compositing of rasterised words

use crate::color::{Rgb, clamp_channel};
use crate::io::configuration::{SHADOW_ALPHA, SHADOW_BLUR_REACH, SHADOW_BLUR_SIGMA, SHADOW_OFFSET};
use crate::placement::text::GlyphMask;
use image::{GrayImage, RgbaImage, imageops};

/// Soft drop shadow painted beneath a word
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    /// Shadow colour
    pub color: Rgb,
    /// Shadow opacity in `0.0..=1.0`
    pub alpha: f32,
    /// Gaussian blur sigma in pixels
    pub blur_sigma: f32,
    /// Offset from the word in pixels
    pub offset: (f32, f32),
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            color: Rgb::BLACK,
            alpha: SHADOW_ALPHA,
            blur_sigma: SHADOW_BLUR_SIGMA,
            offset: SHADOW_OFFSET,
        }
    }
}

/// Fill settings for one word
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Fill colour
    pub color: Rgb,
    /// Global opacity in `0.0..=1.0`, applied to the shadow as well
    pub alpha: f32,
    /// Optional drop shadow
    pub shadow: Option<Shadow>,
}

/// Paint a glyph mask so its anchor lands on `center`
pub fn paint_text(canvas: &mut RgbaImage, glyphs: &GlyphMask, center: (f32, f32), style: &TextStyle) {
    let origin = (center.0 - glyphs.anchor.0, center.1 - glyphs.anchor.1);

    if let Some(shadow) = style.shadow {
        let (blurred, margin) = blur_with_margin(&glyphs.coverage, shadow.blur_sigma);
        blend_mask(
            canvas,
            &blurred,
            (
                origin.0 + shadow.offset.0 - margin,
                origin.1 + shadow.offset.1 - margin,
            ),
            shadow.color,
            shadow.alpha * style.alpha,
        );
    }

    blend_mask(canvas, &glyphs.coverage, origin, style.color, style.alpha);
}

// Blurred copy of `mask` on a transparent border wide enough for the blur to
// fade out, plus that border width
fn blur_with_margin(mask: &GrayImage, sigma: f32) -> (GrayImage, f32) {
    if sigma <= 0.0 {
        return (mask.clone(), 0.0);
    }
    let margin = (sigma * SHADOW_BLUR_REACH).ceil() as u32;
    let mut padded = GrayImage::new(mask.width() + 2 * margin, mask.height() + 2 * margin);
    imageops::replace(&mut padded, mask, i64::from(margin), i64::from(margin));
    (imageops::blur(&padded, sigma), margin as f32)
}

/// Blend `color` through `mask` at `alpha`, with the mask's top-left at `origin`
///
/// Pixels outside the canvas are skipped.
pub fn blend_mask(canvas: &mut RgbaImage, mask: &GrayImage, origin: (f32, f32), color: Rgb, alpha: f32) {
    let alpha = alpha.clamp(0.0, 1.0);
    if alpha <= 0.0 {
        return;
    }
    let (origin_x, origin_y) = (origin.0.round() as i64, origin.1.round() as i64);

    for (mask_x, mask_y, coverage) in mask.enumerate_pixels() {
        let coverage = coverage.0[0];
        if coverage == 0 {
            continue;
        }
        let (Ok(x), Ok(y)) = (
            u32::try_from(origin_x + i64::from(mask_x)),
            u32::try_from(origin_y + i64::from(mask_y)),
        ) else {
            continue;
        };
        let Some(pixel) = canvas.get_pixel_mut_checked(x, y) else {
            continue;
        };

        let weight = alpha * f32::from(coverage) / 255.0;
        for (channel, source) in pixel.0.iter_mut().zip(color.channels()) {
            *channel = clamp_channel(
                f32::from(source).mul_add(weight, f32::from(*channel) * (1.0 - weight)),
            );
        }
        let [_, _, _, destination_alpha] = &mut pixel.0;
        *destination_alpha = clamp_channel(
            (f32::from(*destination_alpha) * (1.0 - weight)) + 255.0 * weight,
        );
    }
}
