//! Input/output: CLI, configuration, errors, image files, presets and progress

/// Command-line interface
pub mod cli;
/// Constants and the placement configuration record
pub mod configuration;
/// Error types
pub mod error;
/// Source image loading and canvas export
pub mod image;
/// Named configuration presets stored as JSON
pub mod presets;
/// Terminal progress reporting
pub mod progress;
