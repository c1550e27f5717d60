//! Text measurement and rasterisation
//!
//! Words are drawn centred on both axes: the anchor of a [`GlyphMask`] is the
//! point that lands on the sampled canvas location.

use crate::io::configuration::{
    BLOCK_ADVANCE_RATIO, BLOCK_CELL_HEIGHT_RATIO, BLOCK_CELL_WIDTH_RATIO, FALLBACK_ASCENT_RATIO,
    FALLBACK_DESCENT_RATIO,
};
use crate::io::error::{PortraitError, Result};
use fontdue::{Font, FontSettings};
use image::{GrayImage, Luma};
use std::path::Path;

/// Coverage mask for a rendered word
#[derive(Debug, Clone)]
pub struct GlyphMask {
    /// Per-pixel coverage, 255 fully inked
    pub coverage: GrayImage,
    /// Point inside the mask that corresponds to the text centre
    pub anchor: (f32, f32),
}

/// Backend that measures and rasterises single-line text
pub trait TextRenderer {
    /// Horizontal advance of `text` at `font_size`, in pixels
    fn measure(&self, text: &str, font_size: f32) -> f32;

    /// Rasterise `text` at `font_size` into a coverage mask
    fn rasterize(&self, text: &str, font_size: f32) -> GlyphMask;
}

/// Font-free renderer drawing each visible character as a solid cell
///
/// Metrics are fixed ratios of the font size, which makes layouts predictable
/// when no font file is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockRenderer;

impl TextRenderer for BlockRenderer {
    fn measure(&self, text: &str, font_size: f32) -> f32 {
        text.chars().count() as f32 * font_size * BLOCK_ADVANCE_RATIO
    }

    fn rasterize(&self, text: &str, font_size: f32) -> GlyphMask {
        let advance = font_size * BLOCK_ADVANCE_RATIO;
        let text_width = self.measure(text, font_size);
        let width = text_width.ceil().max(1.0) as u32;
        let height = font_size.ceil().max(1.0) as u32;
        let mut coverage = GrayImage::new(width, height);

        let cell_width = font_size * BLOCK_CELL_WIDTH_RATIO;
        let cell_height = font_size * BLOCK_CELL_HEIGHT_RATIO;
        let cell_top = (height as f32 - cell_height) / 2.0;

        for (index, ch) in text.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            let cell_left = (advance - cell_width).mul_add(0.5, index as f32 * advance);
            let x_range = cell_left.round() as u32..(cell_left + cell_width).round() as u32;
            for y in cell_top.round() as u32..(cell_top + cell_height).round() as u32 {
                for x in x_range.clone() {
                    if let Some(pixel) = coverage.get_pixel_mut_checked(x, y) {
                        *pixel = Luma([255]);
                    }
                }
            }
        }

        GlyphMask {
            coverage,
            anchor: (text_width / 2.0, height as f32 / 2.0),
        }
    }
}

/// TrueType/OpenType renderer backed by `fontdue`
pub struct FontRenderer {
    font: Font,
}

impl std::fmt::Debug for FontRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontRenderer")
            .field("name", &self.font.name())
            .finish()
    }
}

impl FontRenderer {
    /// Parse a font from raw bytes
    ///
    /// # Errors
    ///
    /// Returns [`PortraitError::FontLoad`] if the data is not a usable font.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let font = Font::from_bytes(bytes, FontSettings::default()).map_err(|reason| {
            PortraitError::FontLoad {
                path: None,
                reason: reason.to_string(),
            }
        })?;
        Ok(Self { font })
    }

    /// Read and parse a font file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not contain a usable font.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| PortraitError::FileSystem {
            path: path.to_path_buf(),
            operation: "read font",
            source,
        })?;
        Self::from_bytes(bytes).map_err(|error| match error {
            PortraitError::FontLoad { reason, .. } => PortraitError::FontLoad {
                path: Some(path.to_path_buf()),
                reason,
            },
            other => other,
        })
    }

    // Ascent and (negative) descent, falling back to typical ratios
    fn vertical_metrics(&self, font_size: f32) -> (f32, f32) {
        self.font.horizontal_line_metrics(font_size).map_or(
            (
                font_size * FALLBACK_ASCENT_RATIO,
                font_size * FALLBACK_DESCENT_RATIO,
            ),
            |metrics| (metrics.ascent, metrics.descent),
        )
    }

    fn kern(&self, previous: Option<char>, ch: char, font_size: f32) -> f32 {
        previous
            .and_then(|left| self.font.horizontal_kern(left, ch, font_size))
            .unwrap_or(0.0)
    }
}

impl TextRenderer for FontRenderer {
    fn measure(&self, text: &str, font_size: f32) -> f32 {
        let mut width = 0.0;
        let mut previous = None;
        for ch in text.chars() {
            width += self.kern(previous, ch, font_size);
            width += self.font.metrics(ch, font_size).advance_width;
            previous = Some(ch);
        }
        width
    }

    fn rasterize(&self, text: &str, font_size: f32) -> GlyphMask {
        let (ascent, descent) = self.vertical_metrics(font_size);
        let text_width = self.measure(text, font_size);
        // Room for glyph overhang beyond the advance box
        let padding = (font_size * 0.25).ceil().max(1.0);

        let width = 2.0f32.mul_add(padding, text_width).ceil().max(1.0) as u32;
        let height = 2.0f32.mul_add(padding, ascent - descent).ceil().max(1.0) as u32;
        let mut coverage = GrayImage::new(width, height);
        let baseline = padding + ascent;

        let mut pen = padding;
        let mut previous = None;
        for ch in text.chars() {
            pen += self.kern(previous, ch, font_size);
            let (metrics, bitmap) = self.font.rasterize(ch, font_size);
            previous = Some(ch);

            if metrics.width > 0 {
                let glyph_left = (pen + metrics.xmin as f32).round() as i64;
                let glyph_top =
                    (baseline - metrics.ymin as f32 - metrics.height as f32).round() as i64;
                for (row, line) in bitmap.chunks(metrics.width).enumerate() {
                    for (col, &value) in line.iter().enumerate() {
                        let (Ok(x), Ok(y)) = (
                            u32::try_from(glyph_left + col as i64),
                            u32::try_from(glyph_top + row as i64),
                        ) else {
                            continue;
                        };
                        if let Some(pixel) = coverage.get_pixel_mut_checked(x, y) {
                            pixel.0[0] = pixel.0[0].max(value);
                        }
                    }
                }
            }

            pen += metrics.advance_width;
        }

        GlyphMask {
            coverage,
            anchor: (
                padding + text_width / 2.0,
                padding + (ascent - descent) / 2.0,
            ),
        }
    }
}
