//! Configuration handling for DowelKit
//!
//! A configuration file carries the dowel grid settings plus output
//! preferences. JSON and TOML files are supported; the format is chosen from
//! the file extension. Every field is optional and falls back to its default.

pub use dowelkit_camtools::DowelSettings;
pub use dowelkit_core::Units;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{ConfigError, SettingsResult};

/// On-disk configuration format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.json`
    Json,
    /// `.toml`
    Toml,
}

impl ConfigFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string()).into()),
            None => Err(ConfigError::UnsupportedFormat(format!(
                "{} has no extension (expected .json or .toml)",
                path.display()
            ))
            .into()),
        }
    }
}

/// Output preferences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Where to write the program; standard output when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,
}

/// Complete DowelKit configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dowel grid and cutting parameters
    pub dowel: DowelSettings,
    /// Output preferences
    pub output: OutputSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;
        let config = Self::parse(&content, format)?;
        debug!("Loaded {:?} config from {}", format, path.display());
        Ok(config)
    }

    /// Parse and validate config text in the given format
    pub fn parse(content: &str, format: ConfigFormat) -> SettingsResult<Self> {
        let config: Self = match format {
            ConfigFormat::Json => serde_json::from_str(content)?,
            ConfigFormat::Toml => toml::from_str(content)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        self.dowel.validate()?;
        Ok(())
    }

    /// Render the configuration as TOML
    pub fn to_toml_string(&self) -> SettingsResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
