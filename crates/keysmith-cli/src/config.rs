//! Client configuration at `~/.keysmith/config.toml`.
//!
//! Provides default algorithm, comment and output directory.
//! CLI flags always override config file values.

use anyhow::{Context, Result};
use keysmith_core::KeyAlgorithm;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Top-level config file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Defaults for `keysmith generate`.
    #[serde(default)]
    pub defaults: GenerateDefaults,
}

/// Defaults for `keysmith generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateDefaults {
    /// Algorithm in `ed25519` / `rsa-<bits>` / `ecdsa-<bits>` form.
    #[serde(default = "default_algorithm")]
    pub algorithm: KeyAlgorithm,

    /// Comment embedded in the public key (empty = none).
    #[serde(default)]
    pub comment: String,

    /// Directory keys are written to (empty = print only).
    #[serde(default)]
    pub output_dir: String,
}

impl Default for GenerateDefaults {
    fn default() -> Self {
        Self {
            algorithm: default_algorithm(),
            comment: String::new(),
            output_dir: String::new(),
        }
    }
}

fn default_algorithm() -> KeyAlgorithm {
    KeyAlgorithm::Ed25519
}

/// Default config location: `~/.keysmith/config.toml`.
pub fn default_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_default()
        .join(".keysmith")
        .join("config.toml")
}

impl Config {
    /// Load configuration from a TOML file, returning defaults if the file
    /// does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("failed to parse config at {}", path.display()))?;

        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }
}
