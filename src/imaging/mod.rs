//! Source image layout and preprocessing into a placement mask
//!
//! The canvas-sized RGBA buffer produced here doubles as the mask: a pixel is
//! eligible for a word when it is opaque enough and darker than the density cutoff.

/// Edge emphasis, threshold and negative filters
pub mod filters;
/// Fitting the source image onto the canvas and running the filter chain
pub mod layout;
/// Per-pixel mask and colour queries
pub mod mask;

pub use filters::ProcessingParams;
pub use layout::{DrawRect, ImageTransform, VisibleRegion, process_image, visible_region};
pub use mask::{PixelSample, check_mask, pixel_color};
