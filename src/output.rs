//! JSON light records consumed by renderers.
//!
//! One record per emitted light, in the order of the light list (strongest
//! first after a merge). Lights whose centroid lies in the lower half of the
//! map (`v >= 0.5`) point below the horizon and are never emitted.

use crate::angle::is_lower_hemisphere;
use crate::lights::Light;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// Position and size of a light in normalized image space: `x`, `y` hold the
/// centroid, `w`, `h` the footprint size.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LightArea {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LightRecord {
    /// Unit vector towards the light.
    pub direction: [f64; 3],
    /// Average luminance over the footprint.
    pub luminosity: f64,
    pub color: [f64; 3],
    pub area: LightArea,
    pub sum: f64,
    /// Share of the map's total luminance.
    pub lum_ratio: f64,
    pub variance: f64,
    /// Degenerate statistics flag. Serialized as a JSON boolean, not as the
    /// `0`/`1` integer some older light-list readers parse.
    pub error: bool,
}

impl LightRecord {
    pub fn from_light(light: &Light, total_luminance: f64) -> Self {
        let d = light.direction();
        let lum_ratio = if total_luminance > 0.0 {
            light.sum / total_luminance
        } else {
            0.0
        };
        Self {
            direction: [d.x, d.y, d.z],
            luminosity: light.lum_average,
            color: light.color,
            area: LightArea {
                x: light.centroid[0],
                y: light.centroid[1],
                w: light.footprint.w,
                h: light.footprint.h,
            },
            sum: light.sum,
            lum_ratio,
            variance: light.variance,
            error: light.error,
        }
    }
}

/// Records for the lights above the horizon, at most `max_lights` of them
/// (`0` keeps all). Culled lights do not count towards the cap.
pub fn records(lights: &[Light], total_luminance: f64, max_lights: usize) -> Vec<LightRecord> {
    let cap = if max_lights == 0 {
        usize::MAX
    } else {
        max_lights
    };
    lights
        .iter()
        .filter(|light| !is_lower_hemisphere(light.centroid[1]))
        .take(cap)
        .map(|light| LightRecord::from_light(light, total_luminance))
        .collect()
}

/// Write `records` as a JSON array with one compact record per line.
pub fn write_records_json<W: Write>(writer: &mut W, records: &[LightRecord]) -> io::Result<()> {
    writeln!(writer, "[")?;
    for (i, record) in records.iter().enumerate() {
        let line = serde_json::to_string(record)?;
        let sep = if i + 1 < records.len() { "," } else { "" };
        writeln!(writer, "{line}{sep}")?;
    }
    writeln!(writer, "]")?;
    writer.flush()
}
