//! Placement constants and the per-run configuration record

use crate::imaging::{ImageTransform, ProcessingParams};
use crate::placement::tiers::{SizeTier, default_schedule, ordered};
use serde::{Deserialize, Serialize};
use tracing::warn;

// Canvas limits
/// Smallest accepted canvas dimension
pub const MIN_CANVAS_DIMENSION: u32 = 100;
/// Largest accepted canvas dimension
pub const MAX_CANVAS_DIMENSION: u32 = 10_000;
/// Canvas width used when none is configured
pub const DEFAULT_CANVAS_WIDTH: u32 = 1000;
/// Canvas height used when none is configured
pub const DEFAULT_CANVAS_HEIGHT: u32 = 1000;

// Tier schedule
/// Hard ceiling on attempts per tier regardless of configuration
pub const MAX_TIER_ATTEMPTS: usize = 50_000;
/// Tiers at or above this scale are giant tiers
pub const GIANT_TIER_SCALE: f32 = 3.0;
/// Giant words only land where luminance is at most this
pub const GIANT_MAX_LUMINANCE: f32 = 100.0;
/// Font size cap as a fraction of canvas width
pub const MAX_FONT_WIDTH_RATIO: f32 = 0.8;
/// Built-in (scale, attempts) schedule, largest first
pub const DEFAULT_TIERS: [(f32, usize); 5] = [
    (5.0, 300),
    (3.0, 1_500),
    (1.8, 6_000),
    (1.0, 20_000),
    (0.6, 50_000),
];

// Word footprint and collision grid
/// Word box height as a fraction of the font size
pub const BOX_HEIGHT_FACTOR: f32 = 0.8;
/// Padding claimed around every placed word
pub const GRID_PADDING: u32 = 2;
/// Sampling stride of collision checks
pub const COLLISION_STRIDE: usize = 2;

// Mask
/// Minimum alpha for a pixel to count as part of the mask
pub const MIN_MASK_ALPHA: u8 = 10;
/// Density cutoff used when none is configured
pub const DEFAULT_DENSITY: u8 = 128;

// Preprocessing
/// Threshold percentage used when none is configured
pub const DEFAULT_THRESHOLD_PERCENT: f32 = 50.0;
/// Largest accepted edge strength
pub const MAX_EDGE_STRENGTH: f32 = 10.0;
/// Edge strength that maps to an unscaled gradient magnitude
pub const EDGE_STRENGTH_DIVISOR: f32 = 5.0;
/// Negative tint used when none is configured (plain inversion)
pub const DEFAULT_NEGATIVE_COLOR: &str = "#000000";
/// Source scale used when none is configured
pub const DEFAULT_SCALE_PERCENT: f32 = 100.0;
/// Accepted source scale range, in percent
pub const SCALE_PERCENT_RANGE: (f32, f32) = (1.0, 500.0);
/// Canvas margin used when none is configured
pub const DEFAULT_MARGIN_PERCENT: f32 = 5.0;
/// Largest accepted margin; beyond this nothing is left to draw into
pub const MAX_MARGIN_PERCENT: f32 = 45.0;

// Words and colours
/// Base font size used when the configured one is unusable
pub const DEFAULT_FONT_SIZE: f32 = 12.0;
/// Word pair used when the word list is empty
pub const DEFAULT_WORDS: [&str; 2] = ["WORD", "ART"];
/// Fill colour used by `single` mode when none is configured
pub const DEFAULT_SINGLE_COLOR: &str = "#000000";
/// Palette used by `palette` mode when none is configured
pub const DEFAULT_PALETTE: [&str; 5] = ["#264653", "#2a9d8f", "#e9c46a", "#f4a261", "#e76f51"];
/// Exclusive upper bound of each channel in `random` mode
pub const RANDOM_CHANNEL_LIMIT: u8 = 200;

// Text rendering
/// Shadow opacity in `source` mode
pub const SHADOW_ALPHA: f32 = 0.3;
/// Shadow blur sigma in `source` mode
pub const SHADOW_BLUR_SIGMA: f32 = 2.0;
/// Shadow offset in `source` mode
pub const SHADOW_OFFSET: (f32, f32) = (1.0, 1.0);
/// Blur reach, in sigmas, kept clear around a mask before blurring
pub const SHADOW_BLUR_REACH: f32 = 3.0;
/// Character advance of the block renderer, relative to font size
pub const BLOCK_ADVANCE_RATIO: f32 = 0.6;
/// Inked cell width of the block renderer, relative to font size
pub const BLOCK_CELL_WIDTH_RATIO: f32 = 0.5;
/// Inked cell height of the block renderer, relative to font size
pub const BLOCK_CELL_HEIGHT_RATIO: f32 = 0.7;
/// Ascent assumed for fonts without line metrics
pub const FALLBACK_ASCENT_RATIO: f32 = 0.8;
/// Descent assumed for fonts without line metrics
pub const FALLBACK_DESCENT_RATIO: f32 = -0.2;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_portrait";
/// Width of the tier progress bar in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

/// How placed words are coloured
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Sampled source pixel colour, fully opaque, with a drop shadow
    #[default]
    Source,
    /// One configured colour
    Single,
    /// Random dark-ish colour per word
    Random,
    /// Random pick from the configured palette
    Palette,
}

/// Everything a generation run needs besides the source image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Luminance below which a pixel may hold a word
    pub density: u8,
    /// Font size before tier scaling
    pub font_size: f32,
    /// Words sampled for every tier
    pub words: Vec<String>,
    /// Words reserved for giant tiers
    pub hero_words: Vec<String>,
    /// Colouring strategy
    pub color_mode: ColorMode,
    /// Hex colour for `single` mode
    pub single_color: String,
    /// Hex colours for `palette` mode
    pub palette: Vec<String>,
    /// Placement of the source image on the canvas
    pub transform: ImageTransform,
    /// Preprocessing filters
    pub processing: ProcessingParams,
    /// Size tier schedule
    pub tiers: Vec<SizeTier>,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
            density: DEFAULT_DENSITY,
            font_size: DEFAULT_FONT_SIZE,
            words: DEFAULT_WORDS.iter().map(ToString::to_string).collect(),
            hero_words: Vec::new(),
            color_mode: ColorMode::default(),
            single_color: DEFAULT_SINGLE_COLOR.to_string(),
            palette: DEFAULT_PALETTE.iter().map(ToString::to_string).collect(),
            transform: ImageTransform::default(),
            processing: ProcessingParams::default(),
            tiers: default_schedule(),
        }
    }
}

fn clean_words(words: &[String]) -> Vec<String> {
    words
        .iter()
        .map(|word| word.trim())
        .filter(|word| !word.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() { value } else { fallback }
}

impl PlacementConfig {
    /// Copy with every field forced into its valid range
    ///
    /// Canvas dimensions are clamped, blank words dropped (an empty list falls
    /// back to [`DEFAULT_WORDS`]), unusable font sizes reset, percentages and
    /// strengths clamped and the tier schedule sorted largest first.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let mut words = clean_words(&self.words);
        if words.is_empty() {
            warn!("word list is empty, using the default pair");
            words = DEFAULT_WORDS.iter().map(ToString::to_string).collect();
        }

        let font_size = if self.font_size.is_finite() && self.font_size > 0.0 {
            self.font_size
        } else {
            warn!(font_size = self.font_size, "unusable font size, using default");
            DEFAULT_FONT_SIZE
        };

        let usable: Vec<SizeTier> = self
            .tiers
            .iter()
            .copied()
            .filter(|tier| tier.scale.is_finite() && tier.scale > 0.0)
            .collect();
        let tiers = if usable.is_empty() {
            default_schedule()
        } else {
            ordered(&usable)
        };

        let transform = ImageTransform {
            scale_percent: finite_or(self.transform.scale_percent, DEFAULT_SCALE_PERCENT)
                .clamp(SCALE_PERCENT_RANGE.0, SCALE_PERCENT_RANGE.1),
            offset_x: finite_or(self.transform.offset_x, 0.0),
            offset_y: finite_or(self.transform.offset_y, 0.0),
            margin_percent: finite_or(self.transform.margin_percent, DEFAULT_MARGIN_PERCENT)
                .clamp(0.0, MAX_MARGIN_PERCENT),
        };

        let processing = ProcessingParams {
            threshold_percent: finite_or(
                self.processing.threshold_percent,
                DEFAULT_THRESHOLD_PERCENT,
            )
            .clamp(0.0, 100.0),
            edge_strength: finite_or(self.processing.edge_strength, 0.0)
                .clamp(0.0, MAX_EDGE_STRENGTH),
            negative: self.processing.negative,
            negative_color: self.processing.negative_color.clone(),
        };

        Self {
            width: self.width.clamp(MIN_CANVAS_DIMENSION, MAX_CANVAS_DIMENSION),
            height: self.height.clamp(MIN_CANVAS_DIMENSION, MAX_CANVAS_DIMENSION),
            density: self.density,
            font_size,
            words,
            hero_words: clean_words(&self.hero_words),
            color_mode: self.color_mode,
            single_color: self.single_color.clone(),
            palette: self.palette.clone(),
            transform,
            processing,
            tiers,
        }
    }
}
