//! Error types for the settings crate.
//!
//! This module provides structured error types for loading and validating
//! DowelKit configuration files.

use std::io;
use thiserror::Error;

use dowelkit_camtools::ParameterError;

/// Errors that can occur during settings operations.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML deserialization error.
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSerError(#[from] toml::ser::Error),

    /// A configuration file error occurred.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// A dowel parameter failed validation.
    #[error("Invalid dowel settings: {0}")]
    Parameter(#[from] ParameterError),
}

/// Errors related to configuration files.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file format is not supported.
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),
}

/// Result type alias for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::UnsupportedFormat("yaml".to_string());
        assert_eq!(err.to_string(), "Unsupported config format: yaml");
    }

    #[test]
    fn test_error_conversion() {
        let config_err = ConfigError::UnsupportedFormat("ini".to_string());
        let settings_err: SettingsError = config_err.into();
        assert!(matches!(settings_err, SettingsError::Config(_)));

        let param_err = ParameterError::InvalidDimensions("bit_diameter must be > 0".to_string());
        let settings_err: SettingsError = param_err.into();
        assert!(matches!(settings_err, SettingsError::Parameter(_)));
        assert_eq!(
            settings_err.to_string(),
            "Invalid dowel settings: Invalid dimensions: bit_diameter must be > 0"
        );

        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let settings_err: SettingsError = io_err.into();
        assert!(matches!(settings_err, SettingsError::IoError(_)));
    }
}
