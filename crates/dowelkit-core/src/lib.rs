//! # DowelKit Core
//!
//! Core types shared by the DowelKit crates: measurement units and the
//! plain coordinate type that toolpaths are built from.

pub mod data;

pub use data::{Point3D, Units, MM_PER_INCH};
