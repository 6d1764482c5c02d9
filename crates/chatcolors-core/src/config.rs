//! User-facing switches for the recoloring engine.
//!
//! The configuration is a flat TOML table. Every key is optional; missing
//! keys take their defaults and a missing file means "all defaults".
//!
//! ```toml
//! mod_enabled = true
//! color_names = true
//! use_identity_color = true
//! color_self_authored_messages = true
//! override_all_colors = false
//! ```

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors raised while reading or writing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Engine switches. Each flag gates exactly one decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Master switch; when off the hook passes messages through untouched.
    pub mod_enabled: bool,
    /// Recolor the author's name itself (brackets are recolored regardless).
    pub color_names: bool,
    /// Derive colors from the author's stable id when it is known, matching
    /// the per-player marker colors drawn elsewhere by the host.
    pub use_identity_color: bool,
    /// Recolor messages written by the local viewer.
    pub color_self_authored_messages: bool,
    /// Recolor runs even when they already carry an intentional color.
    pub override_all_colors: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mod_enabled: true,
            color_names: true,
            use_identity_color: true,
            color_self_authored_messages: true,
            override_all_colors: false,
        }
    }
}

impl Config {
    /// Parse a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Render as a TOML document.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    /// Load from `path`, falling back to defaults when the file is absent.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml_str(&text),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "config file missing, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}
