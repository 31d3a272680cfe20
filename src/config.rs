//! Editor configuration loaded from the user's config directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// User-tunable options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Show a line-number gutter.
    #[serde(default)]
    pub line_numbers: bool,
}

impl Config {
    /// Default location: `<config dir>/rawl/config.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("rawl").join("config.json"))
    }

    /// Load from `path`, or from the default location when `path` is
    /// `None`.
    ///
    /// A missing file yields the defaults; a malformed one is an error so
    /// a typo does not silently revert the user's settings.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) => path,
                None => return Ok(Self::default()),
            },
        };
        match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text)
                .with_context(|| format!("invalid config file {}", path.display())),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => {
                Err(err).with_context(|| format!("failed to read config {}", path.display()))
            }
        }
    }
}
