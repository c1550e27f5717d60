//! Random colour generation for the `random` and `palette` colour modes

use crate::color::conversion::{Rgb, parse_hex};
use crate::io::configuration::RANDOM_CHANNEL_LIMIT;
use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::warn;

/// Uniformly random colour with every channel below [`RANDOM_CHANNEL_LIMIT`]
///
/// Keeping channels away from 255 keeps words legible on a white canvas.
pub fn random_color<R: Rng>(rng: &mut R) -> Rgb {
    Rgb::new(
        rng.random_range(0..RANDOM_CHANNEL_LIMIT),
        rng.random_range(0..RANDOM_CHANNEL_LIMIT),
        rng.random_range(0..RANDOM_CHANNEL_LIMIT),
    )
}

/// Uniform pick from a decoded palette, black when the palette is empty
pub fn pick_palette_color<R: Rng>(palette: &[Rgb], rng: &mut R) -> Rgb {
    palette.choose(rng).copied().unwrap_or_default()
}

/// Decode a list of hex strings, dropping entries that fail to parse
pub fn decode_palette<S: AsRef<str>>(entries: &[S]) -> Vec<Rgb> {
    entries
        .iter()
        .filter_map(|entry| {
            let parsed = parse_hex(entry.as_ref());
            if parsed.is_none() {
                warn!(value = entry.as_ref(), "dropping unparsable palette entry");
            }
            parsed
        })
        .collect()
}
