//! # Configuration Module
//!
//! Session settings and the location of the persisted model.
//!
//! ## Data Storage
//!
//! The trained model is stored in the platform-standard data directory:
//! - Linux: `~/.local/share/song-rec/`
//! - macOS: `~/Library/Application Support/song-rec/`
//! - Windows: `%APPDATA%\song-rec\`

use anyhow::{bail, Context, Result};
use pipeline::DEFAULT_LIKE_THRESHOLD;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application subdirectory inside the platform data directory
pub const APP_DIR_NAME: &str = "song-rec";

/// File name of the persisted model
pub const MODEL_FILE_NAME: &str = "song_rec_knn.json";

/// Neighbours that vote in the default KNN model
pub const DEFAULT_NEIGHBORS: usize = 3;

/// Where the model file goes by default. Does not touch the filesystem.
fn default_model_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(APP_DIR_NAME))
        .join(MODEL_FILE_NAME)
}

/// Settings for a recommendation session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Path of the persisted model file
    pub model_path: PathBuf,
    /// Neighbours that vote in the KNN model
    pub neighbors: usize,
    /// Minimum like-probability for a recommendation (inclusive)
    pub like_threshold: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            neighbors: DEFAULT_NEIGHBORS,
            like_threshold: DEFAULT_LIKE_THRESHOLD,
        }
    }
}

impl SessionConfig {
    /// Parse a JSON config document; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("Invalid session config")?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json_str(&json)
    }

    pub fn with_model_path(mut self, model_path: impl Into<PathBuf>) -> Self {
        self.model_path = model_path.into();
        self
    }

    pub fn with_neighbors(mut self, neighbors: usize) -> Self {
        self.neighbors = neighbors;
        self
    }

    pub fn with_like_threshold(mut self, like_threshold: f64) -> Self {
        self.like_threshold = like_threshold;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.neighbors == 0 {
            bail!("neighbors must be at least 1");
        }
        if !(0.0..=1.0).contains(&self.like_threshold) {
            bail!(
                "like_threshold must be within [0, 1], got {}",
                self.like_threshold
            );
        }
        Ok(())
    }
}
