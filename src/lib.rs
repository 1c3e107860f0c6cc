//! # DowelKit
//!
//! Generates G-code for a grid of dowel pockets, each cut with a clockwise
//! helix that spirals down to the dowel length and flattens the floor.
//!
//! ## Architecture
//!
//! DowelKit is organized as a workspace with multiple crates:
//!
//! 1. **dowelkit-core** - Units and coordinate types
//! 2. **dowelkit-camtools** - Pocket layout and G-code emission
//! 3. **dowelkit-settings** - JSON/TOML configuration and validation
//! 4. **dowelkit** - Command-line binary that integrates all crates

pub mod cli;

pub use dowelkit_camtools::{
    CamToolError, CamToolResult, DowelGenerator, DowelSettings, ParameterError,
};
pub use dowelkit_core::{Point3D, Units};
pub use dowelkit_settings::{Config, OutputSettings, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output on stderr, leaving stdout free for generated programs
/// - RUST_LOG environment variable support (defaults to `info`)
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
