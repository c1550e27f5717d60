//! Size tiers: font scale multipliers paired with attempt budgets

use crate::io::configuration::{
    DEFAULT_TIERS, GIANT_TIER_SCALE, MAX_FONT_WIDTH_RATIO, MAX_TIER_ATTEMPTS,
};
use serde::{Deserialize, Serialize};

/// One pass of the placement schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeTier {
    /// Multiplier applied to the base font size
    pub scale: f32,
    /// Number of random placement attempts before moving on
    pub attempts: usize,
}

impl SizeTier {
    /// Create a tier
    pub const fn new(scale: f32, attempts: usize) -> Self {
        Self { scale, attempts }
    }

    /// Giant tiers host hero words and only accept very dark regions
    pub const fn is_giant(&self) -> bool {
        self.scale >= GIANT_TIER_SCALE
    }

    /// Attempt budget limited to [`MAX_TIER_ATTEMPTS`]
    pub const fn capped_attempts(&self) -> usize {
        if self.attempts > MAX_TIER_ATTEMPTS {
            MAX_TIER_ATTEMPTS
        } else {
            self.attempts
        }
    }

    /// Effective font size, never wider than 80% of the canvas
    pub const fn font_size(&self, base_font_size: f32, canvas_width: u32) -> f32 {
        (base_font_size * self.scale).min(canvas_width as f32 * MAX_FONT_WIDTH_RATIO)
    }
}

/// The built-in five-tier schedule
pub fn default_schedule() -> Vec<SizeTier> {
    DEFAULT_TIERS
        .iter()
        .map(|&(scale, attempts)| SizeTier::new(scale, attempts))
        .collect()
}

/// Copy of `tiers` sorted by descending scale so large words claim space first
pub fn ordered(tiers: &[SizeTier]) -> Vec<SizeTier> {
    let mut sorted = tiers.to_vec();
    sorted.sort_by(|a, b| b.scale.total_cmp(&a.scale));
    sorted
}
