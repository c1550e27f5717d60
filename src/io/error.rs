//! Error types for loading, generation and export

use std::fmt;
use std::path::PathBuf;

/// Main error type for all portrait operations
#[derive(Debug)]
pub enum PortraitError {
    /// Failed to load source image from filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save the rendered canvas
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// Font data could not be parsed
    FontLoad {
        /// Font file, when the data came from disk
        path: Option<PathBuf>,
        /// Parser message
        reason: String,
    },

    /// Preset file is not valid JSON for a preset book
    PresetFormat {
        /// Path to the preset file
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// Requested preset does not exist in the book
    UnknownPreset {
        /// Requested preset name
        name: String,
    },

    /// Generation was requested before a source image was supplied
    MissingSource,

    /// Generation was requested while another run is active
    GenerationInProgress,

    /// Source data cannot be processed
    InvalidSourceData {
        /// Description of what's wrong with the source data
        reason: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for PortraitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FontLoad { path, reason } => match path {
                Some(path) => write!(f, "Failed to load font '{}': {reason}", path.display()),
                None => write!(f, "Failed to load font: {reason}"),
            },
            Self::PresetFormat { path, source } => {
                write!(f, "Invalid preset file '{}': {source}", path.display())
            }
            Self::UnknownPreset { name } => write!(f, "No preset named '{name}'"),
            Self::MissingSource => write!(f, "No source image loaded"),
            Self::GenerationInProgress => write!(f, "A generation run is already in progress"),
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for PortraitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::PresetFormat { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for portrait results
pub type Result<T> = std::result::Result<T, PortraitError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> PortraitError {
    PortraitError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
