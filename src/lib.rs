//! Word portrait generation: raster images rendered as dense fields of text
//!
//! A source image is laid out on a canvas and preprocessed into a placement mask
//! (edge emphasis, thresholding, optional negative tint). Words are then scattered
//! across the mask tier by tier, largest first, using a collision grid so no two
//! words overlap. Colour and opacity follow the source image.

#![forbid(unsafe_code)]

/// Hex and RGB conversion, perceptual brightness and random colour sampling
pub mod color;
/// Canvas layout, preprocessing filters and per-pixel mask queries
pub mod imaging;
/// Input/output operations, configuration and error handling
pub mod io;
/// Orchestration of preprocessing and placement with lifecycle notifications
pub mod pipeline;
/// Stochastic collision-aware word placement and text rasterisation
pub mod placement;

pub use io::error::{PortraitError, Result};
