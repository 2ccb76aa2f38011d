//! User configuration loaded from `config.toml`.
//!
//! Every field has a default, so a missing file or a partial file is fine.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculator::{AngleMode, DEFAULT_MAX_INPUT_LEN};

/// Which keypad the session starts with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Keypad {
    #[default]
    Basic,
    Scientific,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub keypad: Keypad,
    /// Initial angle mode of the scientific keypad.
    pub angle_mode: AngleMode,
    /// Maximum length of the entry text.
    pub max_input_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            keypad: Keypad::default(),
            angle_mode: AngleMode::default(),
            max_input_len: DEFAULT_MAX_INPUT_LEN,
        }
    }
}

impl Config {
    /// Load from the default location, falling back to defaults on any problem.
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            return Self::default();
        };
        if !path.exists() {
            debug!("No config at {:?}, using defaults", path);
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(err) => {
                warn!("{:#}", err);
                Self::default()
            }
        }
    }

    /// Load from an explicit path. Any read or parse failure is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {:?}", path))?;
        Self::parse(&content).with_context(|| format!("Failed to parse config at {:?}", path))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// `$XDG_CONFIG_HOME/deskcalc/config.toml` or the platform equivalent.
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("deskcalc").join("config.toml"))
    }
}
