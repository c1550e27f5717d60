//! Named placement configurations persisted as a JSON object
//!
//! The source image is never part of a preset.

use crate::io::configuration::PlacementConfig;
use crate::io::error::{PortraitError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Mapping from preset name to configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PresetBook {
    presets: BTreeMap<String, PlacementConfig>,
}

impl PresetBook {
    /// Create an empty book
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a book from disk
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a preset object.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| PortraitError::FileSystem {
            path: path.to_path_buf(),
            operation: "read presets",
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| PortraitError::PresetFormat {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read a book from disk, or start an empty one if the file does not exist
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::new())
        }
    }

    /// Write the book as pretty-printed JSON, creating parent directories
    ///
    /// # Errors
    ///
    /// Returns an error if serialisation or any file operation fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        let text =
            serde_json::to_string_pretty(self).map_err(|source| PortraitError::PresetFormat {
                path: path.to_path_buf(),
                source,
            })?;
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| PortraitError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source,
            })?;
        }
        std::fs::write(path, text).map_err(|source| PortraitError::FileSystem {
            path: path.to_path_buf(),
            operation: "write presets",
            source,
        })
    }

    /// Look up a preset by name
    ///
    /// # Errors
    ///
    /// Returns [`PortraitError::UnknownPreset`] if no preset has that name.
    pub fn get(&self, name: &str) -> Result<&PlacementConfig> {
        self.presets
            .get(name)
            .ok_or_else(|| PortraitError::UnknownPreset {
                name: name.to_string(),
            })
    }

    /// Store a preset, returning the one it replaced
    pub fn insert(&mut self, name: impl Into<String>, config: PlacementConfig) -> Option<PlacementConfig> {
        self.presets.insert(name.into(), config)
    }

    /// Remove a preset
    pub fn remove(&mut self, name: &str) -> Option<PlacementConfig> {
        self.presets.remove(name)
    }

    /// Preset names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }

    /// Number of stored presets
    pub fn len(&self) -> usize {
        self.presets.len()
    }

    /// Whether the book is empty
    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}
