//! Colour utilities shared by preprocessing and placement

/// Hex parsing, RGB formatting, brightness and channel clamping
pub mod conversion;
/// Random colour and palette sampling
pub mod sampling;

pub use conversion::{Rgb, brightness, clamp_channel, hex_to_rgb, parse_hex, rgb_to_hex};
