//! Source image loading and rendered canvas export

use crate::io::error::{PortraitError, Result};
use image::{DynamicImage, RgbaImage};
use std::path::Path;

/// Decode a source image from disk
///
/// # Errors
///
/// Returns [`PortraitError::ImageLoad`] if the file cannot be opened or decoded.
pub fn load_source(path: &Path) -> Result<DynamicImage> {
    image::open(path).map_err(|source| PortraitError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })
}

// Formats without an alpha channel need the canvas flattened first
fn is_opaque_format(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg"))
}

/// Save the canvas, picking the format from the file extension
///
/// Parent directories are created as needed.
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The extension names an unsupported format or encoding fails
pub fn export_canvas(canvas: &RgbaImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| PortraitError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source,
        })?;
    }

    let saved = if is_opaque_format(path) {
        DynamicImage::ImageRgba8(canvas.clone()).to_rgb8().save(path)
    } else {
        canvas.save(path)
    };

    saved.map_err(|source| PortraitError::ImageExport {
        path: path.to_path_buf(),
        source,
    })
}
