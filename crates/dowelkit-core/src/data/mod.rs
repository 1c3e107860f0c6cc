//! Data models for coordinates and measurement units
//!
//! This module provides:
//! - Unit management (MM, INCH) including the scale factor between systems
//! - The G-code modal command selecting a unit system
//! - A plain 3-axis point used for pocket centers and arc endpoints

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Millimetres per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Machine coordinate units (millimeters or inches)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Units {
    /// Millimeters (metric)
    #[serde(rename = "mm", alias = "MM")]
    MM,
    /// Inches (imperial)
    #[serde(rename = "inch", alias = "in", alias = "INCH")]
    INCH,
}

impl Units {
    /// Factor that converts a length expressed in `from` into `to`.
    ///
    /// # Examples
    /// ```
    /// use dowelkit_core::Units;
    /// assert_eq!(Units::scale_factor(Units::INCH, Units::MM), 25.4);
    /// assert_eq!(Units::scale_factor(Units::MM, Units::MM), 1.0);
    /// ```
    pub fn scale_factor(from: Units, to: Units) -> f64 {
        match (from, to) {
            (Units::MM, Units::INCH) => 1.0 / MM_PER_INCH,
            (Units::INCH, Units::MM) => MM_PER_INCH,
            _ => 1.0,
        }
    }

    /// G-code modal command that puts the controller into this unit mode.
    pub fn gcode_command(self) -> &'static str {
        match self {
            Units::MM => "G21",
            Units::INCH => "G20",
        }
    }
}

impl Default for Units {
    fn default() -> Self {
        Self::MM
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Units::MM => write!(f, "mm"),
            Units::INCH => write!(f, "in"),
        }
    }
}

impl FromStr for Units {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mm" | "metric" | "millimeter" | "millimeters" => Ok(Self::MM),
            "in" | "inch" | "inches" | "imperial" => Ok(Self::INCH),
            _ => Err(format!("Unknown units: {}", s)),
        }
    }
}

/// A 3-axis coordinate.
///
/// Pocket centers always carry `z == 0`; arc endpoints take the cutting depth
/// through [`Point3D::with_z`] when they are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3D {
    /// X-axis position
    pub x: f64,
    /// Y-axis position
    pub y: f64,
    /// Z-axis position
    pub z: f64,
}

impl Point3D {
    /// Create a point from its three coordinates
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Copy of this point with a different Z
    pub fn with_z(self, z: f64) -> Self {
        Self { z, ..self }
    }

    /// Scale every axis by `factor`
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
            z: self.z * factor,
        }
    }
}

impl fmt::Display for Point3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_factor() {
        assert_eq!(Units::scale_factor(Units::MM, Units::MM), 1.0);
        assert_eq!(Units::scale_factor(Units::INCH, Units::INCH), 1.0);
        assert_eq!(Units::scale_factor(Units::INCH, Units::MM), 25.4);
        assert!((Units::scale_factor(Units::MM, Units::INCH) - 0.03937007874).abs() < 1e-9);
    }

    #[test]
    fn test_package_metadata_inherited() {
        assert!(env!("CARGO_PKG_REPOSITORY").starts_with("https://"));
        assert!(!env!("CARGO_PKG_AUTHORS").is_empty());
    }

    #[test]
    fn test_gcode_command() {
        assert_eq!(Units::MM.gcode_command(), "G21");
        assert_eq!(Units::INCH.gcode_command(), "G20");
    }

    #[test]
    fn test_units_from_str() {
        assert_eq!("mm".parse::<Units>().unwrap(), Units::MM);
        assert_eq!(" Metric ".parse::<Units>().unwrap(), Units::MM);
        assert_eq!("in".parse::<Units>().unwrap(), Units::INCH);
        assert_eq!("INCH".parse::<Units>().unwrap(), Units::INCH);
        assert!("furlong".parse::<Units>().is_err());
    }

    #[test]
    fn test_units_serde_names() {
        assert_eq!(serde_json::to_string(&Units::MM).unwrap(), "\"mm\"");
        assert_eq!(serde_json::to_string(&Units::INCH).unwrap(), "\"inch\"");
        let parsed: Units = serde_json::from_str("\"in\"").unwrap();
        assert_eq!(parsed, Units::INCH);
    }

    #[test]
    fn test_point_helpers() {
        let p = Point3D::new(1.0, 2.0, 0.0);
        assert_eq!(p.with_z(-3.0), Point3D::new(1.0, 2.0, -3.0));
        assert_eq!(p.scaled(2.0), Point3D::new(2.0, 4.0, 0.0));
        assert_eq!(p.to_string(), "(1.000, 2.000, 0.000)");
    }
}
