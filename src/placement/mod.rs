//! Stochastic, collision-aware word placement
//!
//! Words are scattered tier by tier from the largest scale down. Each attempt
//! samples a random canvas point, checks the mask at the word's centre and
//! corners, tests the collision grid and, on success, paints the word and
//! claims its footprint.

/// Axis-aligned word footprints
pub mod bounds;
/// Source-over compositing of glyph masks onto the canvas
pub mod canvas;
/// The placement engine itself
pub mod engine;
/// Occupancy grid preventing overlapping words
pub mod grid;
/// Text measurement and rasterisation backends
pub mod text;
/// Size tier schedule
pub mod tiers;

pub use bounds::WordBox;
pub use engine::{PlacedWord, PlacementOutcome, TierReport, WordPlacer};
pub use grid::CollisionGrid;
pub use text::{BlockRenderer, FontRenderer, GlyphMask, TextRenderer};
pub use tiers::SizeTier;
