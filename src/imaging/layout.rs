//! Fitting a source image onto the canvas and producing the processed buffer

use crate::imaging::filters::{
    ProcessingParams, apply_edge_detection, apply_negative, apply_threshold,
};
use crate::io::configuration::{DEFAULT_MARGIN_PERCENT, DEFAULT_SCALE_PERCENT};
use crate::io::error::{PortraitError, Result};
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// User placement of the source image on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageTransform {
    /// Scale applied after fitting, in percent (100 = fitted size)
    pub scale_percent: f32,
    /// Horizontal shift in canvas pixels
    pub offset_x: f32,
    /// Vertical shift in canvas pixels
    pub offset_y: f32,
    /// Margin on each side, as a percentage of the matching canvas dimension
    pub margin_percent: f32,
}

impl Default for ImageTransform {
    fn default() -> Self {
        Self {
            scale_percent: DEFAULT_SCALE_PERCENT,
            offset_x: 0.0,
            offset_y: 0.0,
            margin_percent: DEFAULT_MARGIN_PERCENT,
        }
    }
}

/// Rectangle the source image is drawn into, in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawRect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Drawn width
    pub width: f32,
    /// Drawn height
    pub height: f32,
}

/// Compute where the source lands on the canvas
///
/// The source is fitted inside the canvas minus its margins with the aspect
/// ratio preserved, scaled about the canvas centre, then shifted by the offsets.
/// Returns `None` when either image has a zero dimension.
pub fn compute_draw_rect(
    canvas: (u32, u32),
    source: (u32, u32),
    transform: &ImageTransform,
) -> Option<DrawRect> {
    let (canvas_width, canvas_height) = (canvas.0 as f32, canvas.1 as f32);
    let (source_width, source_height) = (source.0 as f32, source.1 as f32);
    if canvas.0 == 0 || canvas.1 == 0 || source.0 == 0 || source.1 == 0 {
        return None;
    }

    let margin = transform.margin_percent.max(0.0) / 100.0;
    let available_width = 2.0f32.mul_add(-canvas_width * margin, canvas_width).max(1.0);
    let available_height = 2.0f32.mul_add(-canvas_height * margin, canvas_height).max(1.0);

    let fit = (available_width / source_width).min(available_height / source_height);
    let scale = transform.scale_percent.max(0.0) / 100.0;
    let width = source_width * fit * scale;
    let height = source_height * fit * scale;

    Some(DrawRect {
        x: (canvas_width - width) / 2.0 + transform.offset_x,
        y: (canvas_height - height) / 2.0 + transform.offset_y,
        width,
        height,
    })
}

/// Part of the drawn source that lands on the canvas
///
/// Only this crop is resampled, so the intermediate buffer stays near canvas
/// size however far the source is scaled. The crop is widened to whole source
/// pixels, which lets the target overhang the canvas by at most one scaled
/// source pixel per side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleRegion {
    /// Source crop as `(x, y, width, height)` in source pixels
    pub source: (u32, u32, u32, u32),
    /// Size the crop is resampled to
    pub target: (u32, u32),
    /// Canvas position of the resampled crop's top-left corner
    pub origin: (i64, i64),
}

// One axis of the visible crop: (source start, source length, target length, target origin)
fn visible_span(origin: i64, drawn: u32, canvas: u32, source: u32) -> Option<(u32, u32, u32, i64)> {
    let start = origin.max(0);
    let end = (origin + i64::from(drawn)).min(i64::from(canvas));
    if drawn == 0 || source == 0 || end <= start {
        return None;
    }

    let source_per_pixel = f64::from(source) / f64::from(drawn);
    let source_start = (((start - origin) as f64 * source_per_pixel).floor() as u32).min(source - 1);
    let source_end = (((end - origin) as f64 * source_per_pixel).ceil() as u32)
        .clamp(source_start + 1, source);

    let target_start = origin + (f64::from(source_start) / source_per_pixel).round() as i64;
    let target_end = origin + (f64::from(source_end) / source_per_pixel).round() as i64;

    Some((
        source_start,
        source_end - source_start,
        (target_end - target_start).max(1) as u32,
        target_start,
    ))
}

/// Work out which part of the source is visible once drawn into `rect`
///
/// Returns `None` when nothing of the source reaches the canvas.
pub fn visible_region(canvas: (u32, u32), source: (u32, u32), rect: &DrawRect) -> Option<VisibleRegion> {
    let drawn_width = rect.width.round() as u32;
    let drawn_height = rect.height.round() as u32;
    let (x, width, target_width, origin_x) =
        visible_span(rect.x.round() as i64, drawn_width, canvas.0, source.0)?;
    let (y, height, target_height, origin_y) =
        visible_span(rect.y.round() as i64, drawn_height, canvas.1, source.1)?;

    Some(VisibleRegion {
        source: (x, y, width, height),
        target: (target_width, target_height),
        origin: (origin_x, origin_y),
    })
}

/// Lay the source out on a white canvas and run the preprocessing chain
///
/// Filters run in a fixed order: edge detection (when strength is positive),
/// threshold, then negative (when enabled).
///
/// # Errors
///
/// Returns [`PortraitError::InvalidSourceData`] when the canvas or source has a
/// zero dimension.
pub fn process_image(
    canvas_width: u32,
    canvas_height: u32,
    source: &DynamicImage,
    transform: &ImageTransform,
    processing: &ProcessingParams,
) -> Result<RgbaImage> {
    let rect = compute_draw_rect(
        (canvas_width, canvas_height),
        (source.width(), source.height()),
        transform,
    )
    .ok_or_else(|| PortraitError::InvalidSourceData {
        reason: format!(
            "cannot lay out a {}x{} source on a {canvas_width}x{canvas_height} canvas",
            source.width(),
            source.height()
        ),
    })?;

    let mut canvas = RgbaImage::from_pixel(canvas_width, canvas_height, Rgba([255, 255, 255, 255]));

    debug!(
        x = rect.x,
        y = rect.y,
        width = rect.width,
        height = rect.height,
        "drawing source onto canvas"
    );
    if let Some(region) = visible_region(
        (canvas_width, canvas_height),
        (source.width(), source.height()),
        &rect,
    ) {
        let (x, y, width, height) = region.source;
        let resized = imageops::resize(
            &source.crop_imm(x, y, width, height).to_rgba8(),
            region.target.0,
            region.target.1,
            FilterType::Triangle,
        );
        imageops::overlay(&mut canvas, &resized, region.origin.0, region.origin.1);
    }

    let mut buffer = canvas;
    if processing.edge_strength > 0.0 {
        buffer = apply_edge_detection(buffer, processing.edge_strength);
    }
    buffer = apply_threshold(buffer, processing.threshold_percent);
    if processing.negative {
        buffer = apply_negative(
            buffer,
            processing.threshold_percent,
            &processing.negative_color,
        );
    }

    Ok(buffer)
}
