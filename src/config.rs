//! Configuration persistence
//!
//! Stores default delimiters in `~/.config/csvgrid/config.yaml`

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::csv::{Delimiters, DEFAULT_FIELD_DELIM, DEFAULT_TEXT_DELIM};

/// Default buffer capacity for reading a single field
pub const DEFAULT_GET_CAPACITY: usize = 64;

/// Settings used when no command-line override is given
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Character separating fields within a row
    #[serde(default = "default_field_delim")]
    pub field_delim: char,

    /// Character quoting fields that contain special characters
    #[serde(default = "default_text_delim")]
    pub text_delim: char,

    /// Buffer capacity for `--get` (includes the terminator)
    #[serde(default = "default_get_capacity")]
    pub get_capacity: usize,
}

fn default_field_delim() -> char {
    DEFAULT_FIELD_DELIM
}

fn default_text_delim() -> char {
    DEFAULT_TEXT_DELIM
}

fn default_get_capacity() -> usize {
    DEFAULT_GET_CAPACITY
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            field_delim: default_field_delim(),
            text_delim: default_text_delim(),
            get_capacity: default_get_capacity(),
        }
    }
}

impl GridConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::from_file(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{}", e);
                Self::default()
            }
        }
    }

    /// Read and parse a specific config file
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config at {}: {}", path.display(), e))?;
        serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse config at {}: {}", path.display(), e))
    }

    /// Save config to a specific file
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Delimiters described by this config
    pub fn delimiters(&self) -> Delimiters {
        Delimiters::new(self.field_delim, self.text_delim)
    }
}
