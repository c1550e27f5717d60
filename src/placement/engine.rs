//! Tiered stochastic placement of words over a processed mask

use crate::color::sampling::{decode_palette, pick_palette_color, random_color};
use crate::color::{Rgb, hex_to_rgb};
use crate::imaging::mask::{PixelSample, check_mask, pixel_color};
use crate::io::configuration::{
    BOX_HEIGHT_FACTOR, ColorMode, DEFAULT_WORDS, GIANT_MAX_LUMINANCE, GRID_PADDING,
    PlacementConfig,
};
use crate::placement::bounds::WordBox;
use crate::placement::canvas::{Shadow, TextStyle, paint_text};
use crate::placement::grid::CollisionGrid;
use crate::placement::text::TextRenderer;
use crate::placement::tiers::{SizeTier, ordered};
use image::{Rgba, RgbaImage};
use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::debug;

/// Summary of one completed tier
#[derive(Debug, Clone, PartialEq)]
pub struct TierReport {
    /// Position in the (descending) schedule
    pub index: usize,
    /// Scale multiplier of the tier
    pub scale: f32,
    /// Effective font size after capping
    pub font_size: f32,
    /// Attempts actually made
    pub attempts: usize,
    /// Words committed
    pub placed: usize,
    /// Whether the tier was a giant tier
    pub giant: bool,
}

/// A committed word
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    /// The word text
    pub text: String,
    /// Index of the tier that placed it
    pub tier: usize,
    /// Font size it was drawn at
    pub font_size: f32,
    /// Footprint used for collision tests
    pub bounds: WordBox,
    /// Sampled canvas point the word is centred on
    pub center: (u32, u32),
    /// Fill colour
    pub color: Rgb,
    /// Fill opacity
    pub alpha: f32,
    /// Mask luminance at the centre point
    pub luminance: f32,
}

/// Everything a placement run produced
#[derive(Debug, Clone)]
pub struct PlacementOutcome {
    /// Rendered canvas
    pub canvas: RgbaImage,
    /// Final occupancy grid
    pub grid: CollisionGrid,
    /// Committed words in placement order
    pub placements: Vec<PlacedWord>,
    /// Per-tier statistics in schedule order
    pub tiers: Vec<TierReport>,
}

impl PlacementOutcome {
    /// Number of words committed across all tiers
    pub const fn placed_count(&self) -> usize {
        self.placements.len()
    }
}

// Colour mode resolved once per run; only the active mode's colours are decoded
enum ColorPicker {
    Source,
    Single(Rgb),
    Random,
    Palette(Vec<Rgb>),
}

impl ColorPicker {
    fn from_config(config: &PlacementConfig) -> Self {
        match config.color_mode {
            ColorMode::Source => Self::Source,
            ColorMode::Single => Self::Single(hex_to_rgb(&config.single_color)),
            ColorMode::Random => Self::Random,
            ColorMode::Palette => Self::Palette(decode_palette(&config.palette)),
        }
    }

    // Source mode is fully opaque; other modes fade with the mask brightness
    fn pick<R: Rng>(&self, sample: &PixelSample, rng: &mut R) -> (Rgb, f32) {
        match self {
            Self::Source => (sample.color, 1.0),
            Self::Single(color) => (*color, Self::fade(sample)),
            Self::Random => (random_color(rng), Self::fade(sample)),
            Self::Palette(palette) => (pick_palette_color(palette, rng), Self::fade(sample)),
        }
    }

    fn fade(sample: &PixelSample) -> f32 {
        (1.0 - sample.luminance / 255.0).clamp(0.0, 1.0)
    }
}

// Per-tier values shared by every attempt
struct TierPlan<'w> {
    index: usize,
    font_size: f32,
    giant: bool,
    candidates: &'w [String],
}

/// Places words over a processed mask
///
/// The placer holds no state between runs; every call to [`WordPlacer::run`]
/// starts from a white canvas and an empty grid.
pub struct WordPlacer<'a> {
    renderer: &'a dyn TextRenderer,
    words: Vec<String>,
    hero_words: Vec<String>,
    density: f32,
    base_font_size: f32,
    tiers: Vec<SizeTier>,
    colors: ColorPicker,
    shadow: Option<Shadow>,
}

impl<'a> WordPlacer<'a> {
    /// Prepare a placer for `config`, drawing text with `renderer`
    pub fn new(config: &PlacementConfig, renderer: &'a dyn TextRenderer) -> Self {
        let words = if config.words.is_empty() {
            DEFAULT_WORDS.iter().map(ToString::to_string).collect()
        } else {
            config.words.clone()
        };

        Self {
            renderer,
            words,
            hero_words: config.hero_words.clone(),
            density: f32::from(config.density),
            base_font_size: config.font_size,
            tiers: ordered(&config.tiers),
            colors: ColorPicker::from_config(config),
            shadow: (config.color_mode == ColorMode::Source).then(Shadow::default),
        }
    }

    /// Fill the mask with words, largest tier first
    ///
    /// `on_tier` is called after each tier finishes. Tiers always spend their
    /// whole attempt budget; a tier with no eligible points places nothing.
    pub fn run<R: Rng, F: FnMut(&TierReport)>(
        &self,
        mask: &RgbaImage,
        rng: &mut R,
        mut on_tier: F,
    ) -> PlacementOutcome {
        let (width, height) = mask.dimensions();
        let mut canvas = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));
        let mut grid = CollisionGrid::new(width, height);
        let mut placements = Vec::new();
        let mut reports = Vec::with_capacity(self.tiers.len());

        for (index, tier) in self.tiers.iter().enumerate() {
            let giant = tier.is_giant();
            let plan = TierPlan {
                index,
                font_size: tier.font_size(self.base_font_size, width),
                giant,
                candidates: if giant && !self.hero_words.is_empty() {
                    self.hero_words.as_slice()
                } else {
                    self.words.as_slice()
                },
            };
            // An empty canvas has no points to sample
            let attempts = if width == 0 || height == 0 {
                0
            } else {
                tier.capped_attempts()
            };

            let mut placed = 0;
            for _ in 0..attempts {
                if let Some(word) = self.attempt(mask, &grid, &plan, rng) {
                    self.commit(&mut canvas, &mut grid, &word);
                    placements.push(word);
                    placed += 1;
                }
            }

            let report = TierReport {
                index,
                scale: tier.scale,
                font_size: plan.font_size,
                attempts,
                placed,
                giant,
            };
            debug!(
                tier = index,
                scale = tier.scale,
                font_size = plan.font_size,
                attempts,
                placed,
                giant,
                "tier complete"
            );
            on_tier(&report);
            reports.push(report);
        }

        PlacementOutcome {
            canvas,
            grid,
            placements,
            tiers: reports,
        }
    }

    fn attempt<R: Rng>(
        &self,
        mask: &RgbaImage,
        grid: &CollisionGrid,
        plan: &TierPlan<'_>,
        rng: &mut R,
    ) -> Option<PlacedWord> {
        let (width, height) = mask.dimensions();
        let x = rng.random_range(0..width);
        let y = rng.random_range(0..height);
        let (probe_x, probe_y) = (i64::from(x), i64::from(y));

        if !check_mask(mask, probe_x, probe_y, self.density) {
            return None;
        }
        let sample = pixel_color(mask, probe_x, probe_y);
        if plan.giant && sample.luminance > GIANT_MAX_LUMINANCE {
            return None;
        }

        let text = plan.candidates.choose(rng)?;
        let text_width = self.renderer.measure(text, plan.font_size);
        let bounds = WordBox::centered(
            x as f32,
            y as f32,
            text_width,
            plan.font_size * BOX_HEIGHT_FACTOR,
        );

        let inside = bounds
            .probe_points()
            .iter()
            .all(|&(px, py)| check_mask(mask, px, py, self.density));
        if !inside || grid.check_collision(&bounds) {
            return None;
        }

        let (color, alpha) = self.colors.pick(&sample, rng);
        Some(PlacedWord {
            text: text.clone(),
            tier: plan.index,
            font_size: plan.font_size,
            bounds,
            center: (x, y),
            color,
            alpha,
            luminance: sample.luminance,
        })
    }

    fn commit(&self, canvas: &mut RgbaImage, grid: &mut CollisionGrid, word: &PlacedWord) {
        let glyphs = self.renderer.rasterize(&word.text, word.font_size);
        let style = TextStyle {
            color: word.color,
            alpha: word.alpha,
            shadow: self.shadow,
        };
        paint_text(
            canvas,
            &glyphs,
            (word.center.0 as f32, word.center.1 as f32),
            &style,
        );
        grid.mark(&word.bounds, GRID_PADDING);
    }
}
