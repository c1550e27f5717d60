//! Conversion between hex strings and RGB triples with perceptual brightness

use num_traits::{ToPrimitive, clamp};
use tracing::warn;

/// 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Pure black, also the fallback for unparsable input
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// Pure white
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Create a colour from its channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Perceptual brightness in `0.0..=255.0`
    pub fn brightness(self) -> f32 {
        brightness(self.r, self.g, self.b)
    }

    /// Lowercase `#rrggbb` representation
    pub fn to_hex(self) -> String {
        rgb_to_hex(self.r, self.g, self.b)
    }

    /// Channels as an array in RGB order
    pub const fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// Parse `#rrggbb` or `#rgb` (leading `#` optional, case insensitive)
///
/// Returns `None` for anything else.
pub fn parse_hex(hex: &str) -> Option<Rgb> {
    let digits = hex.trim();
    let digits = digits.strip_prefix('#').unwrap_or(digits);
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return None,
    };

    let value = u32::from_str_radix(&expanded, 16).ok()?;
    Some(Rgb::new(
        ((value >> 16) & 0xFF) as u8,
        ((value >> 8) & 0xFF) as u8,
        (value & 0xFF) as u8,
    ))
}

/// Decode a hex colour, tolerating malformed input by returning black
pub fn hex_to_rgb(hex: &str) -> Rgb {
    parse_hex(hex).unwrap_or_else(|| {
        warn!(value = hex, "unparsable hex colour, using black");
        Rgb::BLACK
    })
}

/// Format channels as lowercase `#rrggbb`
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Perceptual luminance using the Rec. 601 weights
pub fn brightness(r: u8, g: u8, b: u8) -> f32 {
    0.114f32.mul_add(
        f32::from(b),
        0.299f32.mul_add(f32::from(r), 0.587 * f32::from(g)),
    )
}

/// Round and clamp any numeric value into a channel
///
/// Non-finite and unrepresentable values map to 0.
pub fn clamp_channel<T: ToPrimitive>(value: T) -> u8 {
    value
        .to_f64()
        .filter(|v| v.is_finite())
        .map_or(0, |v| clamp(v.round(), 0.0, 255.0) as u8)
}
