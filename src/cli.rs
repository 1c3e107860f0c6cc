//! Command-line interface
//!
//! Settings come from an optional JSON/TOML config file, then individual
//! flags override single fields. The effective settings are validated before
//! anything is generated.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use dowelkit_camtools::{format_value, DowelGenerator};
use dowelkit_core::Units;
use dowelkit_settings::Config;

#[derive(Parser, Debug)]
#[command(name = "dowelkit")]
#[command(about = "Generate helical dowel pocket grids as G-code")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write the G-code program for a dowel grid
    Generate {
        #[command(flatten)]
        grid: GridArgs,

        /// Output file (defaults to the config's output path, then stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the pocket centers in machining order
    Layout {
        #[command(flatten)]
        grid: GridArgs,

        /// Units to report the centers in (defaults to the settings' units)
        #[arg(long)]
        target: Option<Units>,
    },

    /// Print the effective configuration as TOML
    ShowConfig {
        #[command(flatten)]
        grid: GridArgs,
    },
}

/// Config file plus per-field overrides
#[derive(Args, Debug, Default, Clone)]
pub struct GridArgs {
    /// JSON or TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Unit system (mm or inch)
    #[arg(long)]
    pub units: Option<Units>,

    /// Number of pockets along X
    #[arg(long)]
    pub nx: Option<u32>,

    /// Number of pockets along Y
    #[arg(long)]
    pub ny: Option<u32>,

    #[arg(long)]
    pub dowel_diameter: Option<f64>,

    #[arg(long)]
    pub bit_diameter: Option<f64>,

    /// Depth removed per helix revolution
    #[arg(long)]
    pub cut_depth: Option<f64>,

    /// Final pocket depth
    #[arg(long)]
    pub dowel_length: Option<f64>,

    #[arg(long)]
    pub feed: Option<f64>,

    #[arg(long)]
    pub safety_height: Option<f64>,
}

impl GridArgs {
    /// Load the config file (or defaults), apply overrides and validate.
    pub fn effective_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => Config::new(),
        };

        let d = &mut config.dowel;
        if let Some(units) = self.units {
            d.units = units;
        }
        if let Some(nx) = self.nx {
            d.num_dowels_x = nx;
        }
        if let Some(ny) = self.ny {
            d.num_dowels_y = ny;
        }
        if let Some(v) = self.dowel_diameter {
            d.dowel_diameter = v;
        }
        if let Some(v) = self.bit_diameter {
            d.bit_diameter = v;
        }
        if let Some(v) = self.cut_depth {
            d.cut_depth = v;
        }
        if let Some(v) = self.dowel_length {
            d.dowel_length = v;
        }
        if let Some(v) = self.feed {
            d.feed = v;
        }
        if let Some(v) = self.safety_height {
            d.safety_height = v;
        }

        config.validate().context("Invalid dowel settings")?;
        Ok(config)
    }
}

/// Execute a parsed command, writing any console output to `stdout`.
pub fn run<W: Write>(cli: Cli, stdout: &mut W) -> Result<()> {
    match cli.command {
        Commands::Generate { grid, output } => {
            let config = grid.effective_config()?;
            let generator = DowelGenerator::new(config.dowel);

            match output.or(config.output.output_path) {
                Some(path) => write_program_file(&generator, &path)?,
                None => {
                    generator
                        .write_program(stdout)
                        .context("Failed to write program")?;
                    stdout.flush()?;
                }
            }
        }
        Commands::Layout { grid, target } => {
            let config = grid.effective_config()?;
            let target = target.unwrap_or(config.dowel.units);
            let generator = DowelGenerator::new(config.dowel);

            for center in generator.locations(target) {
                writeln!(
                    stdout,
                    "X{} Y{}",
                    format_value(center.x),
                    format_value(center.y)
                )?;
            }
        }
        Commands::ShowConfig { grid } => {
            let config = grid.effective_config()?;
            write!(stdout, "{}", config.to_toml_string()?)?;
        }
    }

    Ok(())
}

fn write_program_file(generator: &DowelGenerator, path: &Path) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    generator
        .write_program(&mut writer)
        .with_context(|| format!("Failed to write program to {}", path.display()))?;
    writer.flush()?;

    info!(
        "Wrote {} dowel pockets to {}",
        generator.settings().pocket_count(),
        path.display()
    );
    Ok(())
}
