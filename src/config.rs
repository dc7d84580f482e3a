use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level configuration loaded from .patchsplit.toml.
///
/// All fields are optional; the tool works with zero config.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Terminal display settings
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DisplayConfig {
    /// Force colored output on or off. When unset, the NO_COLOR environment
    /// variable and terminal detection decide.
    pub color: Option<bool>,
}

impl Config {
    /// Load configuration from .patchsplit.toml in the current directory.
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Config, ConfigError> {
        let path = Path::new(".patchsplit.toml");
        if path.exists() {
            Self::load_from(path)
        } else {
            Ok(Config::default())
        }
    }

    /// Load from a specific path (useful for testing).
    pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Resolve the color override: config file value takes precedence, then
    /// a set NO_COLOR env var disables color. None leaves the decision to
    /// terminal detection.
    pub fn color_override(&self) -> Option<bool> {
        if self.display.color.is_some() {
            return self.display.color;
        }
        if std::env::var_os("NO_COLOR").is_some() {
            return Some(false);
        }
        None
    }
}
