//! DowelKit Settings Crate
//!
//! Loads and validates configuration files for the dowel generator.

pub mod config;
pub mod error;

pub use config::{Config, ConfigFormat, OutputSettings};
pub use error::{ConfigError, SettingsError, SettingsResult};
