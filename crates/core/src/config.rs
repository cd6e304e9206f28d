use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::profile::ConnectionProfile;

pub const APP_DIR: &str = "ora-explorer";
pub const CONFIG_FILE: &str = "config.toml";

/// Settings loaded from `<config dir>/ora-explorer/config.toml`.
///
/// ```toml
/// [connection]
/// host = "db.internal"
/// port = 1521
/// service = "FREEPDB1"
/// username = "hr"
///
/// [display]
/// default_width = 10
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ExplorerConfig {
    #[serde(default)]
    pub connection: ConnectionProfile,

    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DisplayConfig {
    /// Characters of a column default shown in column listings
    #[serde(default = "default_width")]
    pub default_width: usize,
}

fn default_width() -> usize {
    10
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            default_width: default_width(),
        }
    }
}

impl ExplorerConfig {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Loads the file at `path`, or the default location when `None`.
    /// A missing file is not an error; a malformed one is.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Some(p) => p,
                None => return Ok(Self::default()),
            },
        };

        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: ExplorerConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }
}
