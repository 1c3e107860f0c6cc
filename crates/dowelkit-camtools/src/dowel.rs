//! Dowel pocket grid generator.
//!
//! Lays out a rectangular grid of dowel pockets and cuts each one with a
//! clockwise helix: quarter-turn `G02` arcs that step down by a quarter of
//! the cut depth until full length is reached, followed by a flattening pass
//! at the floor.

use std::io::Write;

use chrono::{DateTime, Local};
use dowelkit_core::{Point3D, Units};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{CamToolResult, ParameterError, ParameterResult};

/// Pocket spacing is the dowel diameter plus this multiple of the bit diameter.
pub const SPACING_BIT_FACTOR: f64 = 1.25;

/// Arcs cut at full depth once the helix reaches the floor.
pub const FINISHING_ARCS: usize = 5;

/// Most quarter-turn arcs a single helix may descend with.
pub const MAX_DESCENT_ARCS: f64 = 1_000_000.0;

/// Format of the timestamp in the program's first comment line.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parameters for the Dowel Pocket CAMTool.
///
/// All lengths are in `units`; the feed is in `units` per minute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DowelSettings {
    /// Unit system for every length below
    pub units: Units,
    /// Number of pockets along X
    pub num_dowels_x: u32,
    /// Number of pockets along Y
    pub num_dowels_y: u32,
    /// Diameter of the dowel the pocket must receive
    pub dowel_diameter: f64,
    /// Diameter of the cutting bit
    pub bit_diameter: f64,
    /// Depth removed by one full revolution of the helix
    pub cut_depth: f64,
    /// Final depth of the pocket
    pub dowel_length: f64,
    /// Feed rate for cutting moves
    pub feed: f64,
    /// Z height the tool retracts to between pockets
    pub safety_height: f64,
}

impl Default for DowelSettings {
    fn default() -> Self {
        Self {
            units: Units::MM,
            num_dowels_x: 2,
            num_dowels_y: 2,
            dowel_diameter: 10.0,
            bit_diameter: 6.35,
            cut_depth: 4.0,
            dowel_length: 12.0,
            feed: 500.0,
            safety_height: 5.0,
        }
    }
}

impl DowelSettings {
    /// Radius of the circular toolpath: the bit's edge sweeps the full dowel diameter.
    pub fn pocket_radius(&self) -> f64 {
        self.bit_diameter / 2.0 + self.dowel_diameter / 2.0
    }

    /// Depth descended by each quarter-turn arc of the helix.
    pub fn quarter_depth(&self) -> f64 {
        self.cut_depth / 4.0
    }

    /// Number of pockets in the grid.
    pub fn pocket_count(&self) -> usize {
        self.num_dowels_x as usize * self.num_dowels_y as usize
    }

    /// Check that every dimension is usable for cutting.
    ///
    /// The generator itself does not call this; it is the validation layer
    /// for settings that come from outside (config files, the command line).
    /// Empty grids are accepted.
    pub fn validate(&self) -> ParameterResult<()> {
        require_positive_dimension("dowel_diameter", self.dowel_diameter)?;
        require_positive_dimension("bit_diameter", self.bit_diameter)?;
        require_positive("cut_depth", self.cut_depth)?;
        require_positive("feed", self.feed)?;
        require_positive("safety_height", self.safety_height)?;

        if !self.dowel_length.is_finite() || self.dowel_length < 0.0 {
            return Err(ParameterError::InvalidValue {
                name: "dowel_length".to_string(),
                reason: format!("must be zero or positive, got {}", self.dowel_length),
            });
        }

        Ok(())
    }
}

fn require_positive(name: &str, value: f64) -> ParameterResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ParameterError::InvalidValue {
            name: name.to_string(),
            reason: format!("must be positive, got {}", value),
        })
    }
}

fn require_positive_dimension(name: &str, value: f64) -> ParameterResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ParameterError::InvalidDimensions(format!(
            "{} must be > 0, got {}",
            name, value
        )))
    }
}

/// Format a coordinate or feed value for a G-code word.
///
/// Three decimals, with negative zero printed as zero.
pub fn format_value(value: f64) -> String {
    let formatted = format!("{:.3}", value);
    if formatted == "-0.000" {
        "0.000".to_string()
    } else {
        formatted
    }
}

/// West, north, east and south points around a pocket center, walked in
/// that order and wrapping forever.
struct ArcCycle {
    points: [Point3D; 4],
    index: usize,
}

impl ArcCycle {
    fn around(center: Point3D, radius: f64) -> Self {
        Self {
            points: [
                Point3D::new(center.x - radius, center.y, 0.0),
                Point3D::new(center.x, center.y + radius, 0.0),
                Point3D::new(center.x + radius, center.y, 0.0),
                Point3D::new(center.x, center.y - radius, 0.0),
            ],
            index: 0,
        }
    }

    fn next_point(&mut self) -> Point3D {
        let point = self.points[self.index];
        self.index = (self.index + 1) % self.points.len();
        point
    }
}

/// Generator for Dowel Pocket G-Code
pub struct DowelGenerator {
    settings: DowelSettings,
}

impl DowelGenerator {
    /// Create a new DowelGenerator with the given settings
    pub fn new(settings: DowelSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &DowelSettings {
        &self.settings
    }

    /// Replace the settings used by subsequent generations
    pub fn set_settings(&mut self, settings: DowelSettings) {
        self.settings = settings;
    }

    /// Scale factor from the settings' units to millimetres.
    pub fn unit_multiplier(&self) -> f64 {
        Units::scale_factor(self.settings.units, Units::MM)
    }

    /// Pocket centers in machining order, expressed in `target` units.
    ///
    /// Row-major with X as the outer loop. The first pocket sits one dowel
    /// radius in from the origin on both axes so its cut never crosses zero.
    pub fn locations(&self, target: Units) -> Vec<Point3D> {
        let s = &self.settings;
        let scale = Units::scale_factor(s.units, target);
        let spacing = scale * (s.dowel_diameter + s.bit_diameter * SPACING_BIT_FACTOR);
        let corner =
            Point3D::new(s.dowel_diameter / 2.0, s.dowel_diameter / 2.0, 0.0).scaled(scale);

        let mut centers = Vec::with_capacity(s.pocket_count());
        for x in 0..s.num_dowels_x {
            for y in 0..s.num_dowels_y {
                centers.push(Point3D::new(
                    corner.x + f64::from(x) * spacing,
                    corner.y + f64::from(y) * spacing,
                    0.0,
                ));
            }
        }

        centers
    }

    /// Generate the complete program as a string, stamped with the current time.
    pub fn generate(&self) -> CamToolResult<String> {
        let mut buffer = Vec::new();
        self.write_program(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    /// Write the complete program to `out`, stamped with the current time.
    pub fn write_program<W: Write>(&self, out: &mut W) -> CamToolResult<()> {
        self.write_program_at(out, Local::now())
    }

    /// Write the complete program to `out` with an explicit generation timestamp.
    pub fn write_program_at<W: Write>(
        &self,
        out: &mut W,
        generated_at: DateTime<Local>,
    ) -> CamToolResult<()> {
        let s = &self.settings;
        let centers = self.locations(s.units);

        if !centers.is_empty() {
            self.check_helix_step()?;
        }

        info!(
            "Generating dowel program: {} pockets ({}x{}) in {}",
            centers.len(),
            s.num_dowels_x,
            s.num_dowels_y,
            s.units
        );

        // Units, absolute distances and absolute arc centers
        writeln!(
            out,
            "(Generated by DowelKit {})",
            generated_at.format(TIMESTAMP_FORMAT)
        )?;
        writeln!(out, "{} G90 G91.1", s.units.gcode_command())?;
        writeln!(out, "G17 F{}", format_value(s.feed))?;
        writeln!(out, "M3")?;

        for at in centers {
            self.emit_pocket(at, out)?;
        }

        writeln!(out)?;
        writeln!(out, "(All done!)")?;
        writeln!(out, "M5")?;
        writeln!(out, "M30")?;

        Ok(())
    }

    /// Write the helical cut for a single pocket centered on `at`.
    pub fn write_pocket<W: Write>(&self, at: Point3D, out: &mut W) -> CamToolResult<()> {
        self.check_helix_step()?;
        self.emit_pocket(at, out)
    }

    /// Rejects helices the descent loop could not finish: a step that never
    /// makes progress, an unbounded floor, or more than [`MAX_DESCENT_ARCS`]
    /// quarter-turns.
    fn check_helix_step(&self) -> ParameterResult<()> {
        let s = &self.settings;
        // Same test as the descent loop's first iteration.
        let enters_descent = 0.0 > -s.dowel_length;
        if !enters_descent {
            return Ok(());
        }

        if !s.dowel_length.is_finite() {
            warn!("Refusing helix with unbounded dowel length");
            return Err(ParameterError::InvalidValue {
                name: "dowel_length".to_string(),
                reason: "must be finite".to_string(),
            });
        }

        let step = s.quarter_depth();
        if step.is_nan() || step <= 0.0 {
            warn!(
                "Refusing helix that never descends: cut depth {} with dowel length {}",
                s.cut_depth, s.dowel_length
            );
            return Err(ParameterError::InvalidValue {
                name: "cut_depth".to_string(),
                reason: format!(
                    "must be positive when dowel length is {}, got {}",
                    s.dowel_length, s.cut_depth
                ),
            });
        }

        let arcs_needed = (s.dowel_length / step).ceil();
        if arcs_needed > MAX_DESCENT_ARCS {
            warn!(
                "Refusing helix with {} descent arcs (limit {})",
                arcs_needed, MAX_DESCENT_ARCS
            );
            return Err(ParameterError::InvalidValue {
                name: "cut_depth".to_string(),
                reason: format!(
                    "{} is too small for dowel length {}: needs more than {} arcs",
                    s.cut_depth, s.dowel_length, MAX_DESCENT_ARCS
                ),
            });
        }

        Ok(())
    }

    fn emit_pocket<W: Write>(&self, at: Point3D, out: &mut W) -> CamToolResult<()> {
        let s = &self.settings;
        let quarter_depth = s.quarter_depth();
        let mut arcs = ArcCycle::around(at, s.pocket_radius());

        writeln!(out)?;
        writeln!(
            out,
            "(Dowel at x:{} y:{})",
            format_value(at.x),
            format_value(at.y)
        )?;

        let mut last = arcs.next_point();

        // Start
        writeln!(out, "G0 X{} Y{}", format_value(last.x), format_value(last.y))?;
        writeln!(out, "G1 Z0")?;
        writeln!(out, "G17 F{}", format_value(s.feed))?;

        // Helix. The depth written is the one before the step, so the last
        // descent arc can stop short of the floor.
        let mut current_depth = 0.0;
        let mut descent_arcs = 0usize;
        while current_depth > -s.dowel_length {
            let next = arcs.next_point();
            write_arc(out, at, last, next.with_z(current_depth))?;
            last = next;
            current_depth -= quarter_depth;
            descent_arcs += 1;
        }

        // Flatten the floor
        for _ in 0..FINISHING_ARCS {
            let next = arcs.next_point();
            write_arc(out, at, last, next.with_z(-s.dowel_length))?;
            last = next;
        }

        writeln!(out, "G0 Z{}", format_value(s.safety_height))?;

        debug!(
            "Pocket at {}: {} descent arcs, {} finishing arcs",
            at, descent_arcs, FINISHING_ARCS
        );

        Ok(())
    }
}

/// Clockwise arc to `to` (including its depth); I/J is the offset from the
/// previous endpoint `from` to the pocket center.
fn write_arc<W: Write>(
    out: &mut W,
    center: Point3D,
    from: Point3D,
    to: Point3D,
) -> CamToolResult<()> {
    writeln!(
        out,
        "G02 X{} Y{} Z{} I{} J{}",
        format_value(to.x),
        format_value(to.y),
        format_value(to.z),
        format_value(center.x - from.x),
        format_value(center.y - from.y)
    )?;
    Ok(())
}
