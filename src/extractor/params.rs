//! Parameters configuring one extraction run.
//!
//! Defaults reproduce the command-line tool: eight cut levels (up to 256
//! regions), merged footprints limited to 5% of the map area and 8% of its
//! side, a luminance threshold at half of the map's total energy and a 35°
//! merge cone. Only the strongest light is emitted unless `max_lights` is
//! raised (0 emits every light above the horizon).

use crate::merge::{MergeParams, MergeStrategy};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExtractionParams {
    /// Number of cut levels; the partition has at most `2^max_depth` leaves.
    pub max_depth: u32,
    /// Maximum normalized area of a merged footprint.
    pub max_merged_area: f64,
    /// Maximum normalized side length of a merged footprint.
    pub max_merged_length: f64,
    /// Fraction of the total luminance below which a light may be absorbed.
    pub luminance_ratio: f64,
    /// Merge cone half-angle in degrees.
    pub max_angle_deg: f64,
    /// Emitted light cap (0 = unlimited).
    pub max_lights: usize,
    pub strategy: MergeStrategy,
}

impl Default for ExtractionParams {
    fn default() -> Self {
        Self {
            max_depth: 8,
            max_merged_area: 0.05,
            max_merged_length: 0.08,
            luminance_ratio: 0.5,
            max_angle_deg: 35.0,
            max_lights: 1,
            strategy: MergeStrategy::Plain,
        }
    }
}

impl ExtractionParams {
    /// Merge thresholds for a map whose total luminance is `total_luminance`.
    pub fn merge_params(&self, total_luminance: f64) -> MergeParams {
        MergeParams {
            max_merged_area: self.max_merged_area,
            max_merged_length: self.max_merged_length,
            min_luminance: self.luminance_ratio * total_luminance,
            max_angle_deg: self.max_angle_deg,
        }
    }
}
