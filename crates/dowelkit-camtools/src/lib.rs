//! # DowelKit CAM Tools
//!
//! This crate provides the CAM (Computer-Aided Manufacturing) operations
//! that turn DowelKit settings into G-Code.
//!
//! ## CAM Tools Included
//!
//! - **Dowel Pockets**: A grid of helically interpolated pockets sized to
//!   receive cylindrical dowels

pub mod dowel;
pub mod error;

// Re-export commonly used items
pub use dowel::{
    format_value, DowelGenerator, DowelSettings, FINISHING_ARCS, MAX_DESCENT_ARCS,
    SPACING_BIT_FACTOR,
};
pub use error::{CamToolError, CamToolResult, ParameterError, ParameterResult};
