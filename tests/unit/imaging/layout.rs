//! Tests for source layout on the canvas and the processing chain

#[cfg(test)]
mod tests {
    use image::{DynamicImage, Rgba, RgbaImage};
    use wordportrait::imaging::layout::{compute_draw_rect, process_image, visible_region};
    use wordportrait::imaging::{ImageTransform, ProcessingParams};
    use wordportrait::io::error::PortraitError;

    fn no_margin() -> ImageTransform {
        ImageTransform {
            margin_percent: 0.0,
            ..ImageTransform::default()
        }
    }

    // Tests aspect-preserving fit centred in the canvas
    // Verified by stretching to the full canvas
    #[test]
    fn test_fit_preserves_aspect_ratio() {
        let rect = compute_draw_rect((400, 200), (100, 100), &no_margin());
        let Some(rect) = rect else {
            unreachable!("layout should succeed");
        };
        assert!((rect.width - 200.0).abs() < 1e-3);
        assert!((rect.height - 200.0).abs() < 1e-3);
        assert!((rect.x - 100.0).abs() < 1e-3);
        assert!(rect.y.abs() < 1e-3);
    }

    // Tests margin, scale re-centring and offsets
    // Verified by applying the offset before scaling
    #[test]
    fn test_margin_scale_and_offset() {
        let transform = ImageTransform {
            scale_percent: 50.0,
            offset_x: 10.0,
            offset_y: -5.0,
            margin_percent: 10.0,
        };
        let rect = compute_draw_rect((200, 200), (50, 100), &transform);
        let Some(rect) = rect else {
            unreachable!("layout should succeed");
        };
        // Available 160x160, fit 1.6 gives 80x160, halved to 40x80
        assert!((rect.width - 40.0).abs() < 1e-3);
        assert!((rect.height - 80.0).abs() < 1e-3);
        assert!((rect.x - 90.0).abs() < 1e-3);
        assert!((rect.y - 55.0).abs() < 1e-3);
    }

    // Tests zero-sized inputs have no layout
    // Verified by dividing by zero dimensions
    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(compute_draw_rect((100, 100), (0, 10), &no_margin()).is_none());
        assert!(compute_draw_rect((0, 100), (10, 10), &no_margin()).is_none());
    }

    // Tests the processed buffer has canvas size, white surround and dark source
    // Verified by skipping the white background fill
    #[test]
    fn test_process_image_draws_source_on_white() {
        let source = DynamicImage::ImageRgba8(RgbaImage::from_pixel(10, 10, Rgba([0, 0, 0, 255])));
        let transform = ImageTransform {
            margin_percent: 25.0,
            ..ImageTransform::default()
        };
        let result = process_image(100, 80, &source, &transform, &ProcessingParams::default());
        let Ok(buffer) = result else {
            unreachable!("processing should succeed");
        };
        assert_eq!(buffer.dimensions(), (100, 80));
        assert_eq!(buffer.get_pixel(0, 0), &Rgba([255, 255, 255, 255]));
        assert_eq!(buffer.get_pixel(50, 40), &Rgba([0, 0, 0, 255]));
    }

    // Tests transparent source pixels composite onto white and are thresholded away
    // Verified by copying source pixels without blending
    #[test]
    fn test_process_image_transparent_source() {
        let source = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 0])));
        let result = process_image(100, 100, &source, &ImageTransform::default(), &ProcessingParams::default());
        let Ok(buffer) = result else {
            unreachable!("processing should succeed");
        };
        assert!(buffer.pixels().all(|p| p == &Rgba([255, 255, 255, 255])));
    }

    // Tests the negative pass runs after the threshold when enabled
    // Verified by skipping the negative flag
    #[test]
    fn test_process_image_negative() {
        let source = DynamicImage::ImageRgba8(RgbaImage::from_pixel(10, 10, Rgba([0, 0, 0, 255])));
        let processing = ProcessingParams {
            negative: true,
            ..ProcessingParams::default()
        };
        let result = process_image(100, 100, &source, &no_margin(), &processing);
        let Ok(buffer) = result else {
            unreachable!("processing should succeed");
        };
        assert_eq!(buffer.get_pixel(50, 50), &Rgba([255, 255, 255, 255]));
    }

    // Tests an empty source is reported as invalid data
    // Verified by returning an empty buffer instead
    #[test]
    fn test_process_image_empty_source() {
        let source = DynamicImage::new_rgba8(0, 0);
        let result = process_image(100, 100, &source, &no_margin(), &ProcessingParams::default());
        assert!(matches!(result, Err(PortraitError::InvalidSourceData { .. })));
    }

    // Tests extreme scales only resample the part of the source on the canvas
    // Verified by resizing the whole scaled source before clipping
    #[test]
    fn test_visible_region_bounded_at_extreme_scale() {
        let transform = ImageTransform {
            scale_percent: 500.0,
            ..no_margin()
        };
        let Some(rect) = compute_draw_rect((10_000, 10_000), (4_000, 3_000), &transform) else {
            unreachable!("layout should succeed");
        };
        assert!(rect.width > 40_000.0);

        let Some(region) = visible_region((10_000, 10_000), (4_000, 3_000), &rect) else {
            unreachable!("the centre of the source is on the canvas");
        };
        // One scaled source pixel is 12.5 canvas pixels
        assert!(region.target.0 <= 10_000 + 26);
        assert!(region.target.1 <= 10_000 + 26);
        assert!((800..=802).contains(&region.source.2));
        assert!((800..=802).contains(&region.source.3));
        assert!(region.origin.0 <= 0 && region.origin.0 > -13);
    }

    // Tests a fully visible source is resampled whole at its drawn size
    // Verified by cropping one pixel off each side
    #[test]
    fn test_visible_region_whole_source() {
        let Some(rect) = compute_draw_rect((400, 200), (100, 100), &no_margin()) else {
            unreachable!("layout should succeed");
        };
        let region = visible_region((400, 200), (100, 100), &rect);
        let Some(region) = region else {
            unreachable!("the source is on the canvas");
        };
        assert_eq!(region.source, (0, 0, 100, 100));
        assert_eq!(region.target, (200, 200));
        assert_eq!(region.origin, (100, 0));
    }

    // Tests a source shifted off the canvas leaves it white
    // Verified by clamping the draw position into the canvas
    #[test]
    fn test_offscreen_source() {
        let transform = ImageTransform {
            offset_x: 5_000.0,
            ..no_margin()
        };
        let Some(rect) = compute_draw_rect((100, 100), (10, 10), &transform) else {
            unreachable!("layout should succeed");
        };
        assert!(visible_region((100, 100), (10, 10), &rect).is_none());

        let source = DynamicImage::ImageRgba8(RgbaImage::from_pixel(10, 10, Rgba([0, 0, 0, 255])));
        let result = process_image(100, 100, &source, &transform, &ProcessingParams::default());
        let Ok(buffer) = result else {
            unreachable!("processing should succeed");
        };
        assert!(buffer.pixels().all(|p| p == &Rgba([255, 255, 255, 255])));
    }

    // Tests a clipped, enlarged source still lands in the right place
    // Verified by drawing the crop at the canvas origin
    #[test]
    fn test_clipped_source_alignment() {
        // Black top-left quadrant on white
        let source = DynamicImage::ImageRgba8(RgbaImage::from_fn(100, 100, |x, y| {
            if x < 50 && y < 50 {
                Rgba([0, 0, 0, 255])
            } else {
                Rgba([255, 255, 255, 255])
            }
        }));
        let transform = ImageTransform {
            scale_percent: 200.0,
            ..no_margin()
        };
        let result = process_image(100, 100, &source, &transform, &ProcessingParams::default());
        let Ok(buffer) = result else {
            unreachable!("processing should succeed");
        };
        assert_eq!(buffer.get_pixel(25, 25), &Rgba([0, 0, 0, 255]));
        assert_eq!(buffer.get_pixel(75, 25), &Rgba([255, 255, 255, 255]));
        assert_eq!(buffer.get_pixel(25, 75), &Rgba([255, 255, 255, 255]));
        assert_eq!(buffer.get_pixel(75, 75), &Rgba([255, 255, 255, 255]));
    }
}
