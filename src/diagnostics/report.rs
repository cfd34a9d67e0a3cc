use super::TimingBreakdown;
use crate::extractor::ExtractionParams;
use crate::lights::Light;
use crate::output::{records, LightRecord};
use crate::sat::{SatRegion, SummedAreaTable};
use crate::types::PixelRect;
use serde::Serialize;

/// Result of [`LightExtractor::extract`](crate::LightExtractor::extract):
/// the final lights plus every intermediate stage.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionReport {
    pub input: InputDescriptor,
    pub params: ExtractionParams,
    /// Absolute luminance threshold used by the merge (`ratio × total`).
    pub min_luminance: f64,
    pub regions: Vec<RegionDescriptor>,
    /// Candidate lights, weakest first.
    pub candidates: Vec<Light>,
    /// Final lights, strongest first.
    pub lights: Vec<Light>,
    pub merge_count: usize,
    pub timings: TimingBreakdown,
}

impl ExtractionReport {
    /// Output records for the final lights, culled and capped with the
    /// run's `max_lights`.
    pub fn records(&self) -> Vec<LightRecord> {
        records(
            &self.lights,
            self.input.total_luminance,
            self.params.max_lights,
        )
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    pub channels: usize,
    pub total_luminance: f64,
    pub min_luminance: f64,
    pub max_luminance: f64,
}

impl InputDescriptor {
    pub fn from_table(table: &SummedAreaTable, channels: usize) -> Self {
        Self {
            width: table.width(),
            height: table.height(),
            channels,
            total_luminance: table.total_luminance_sum(),
            min_luminance: table.min_luminance(),
            max_luminance: table.max_luminance(),
        }
    }
}

/// One partition leaf.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionDescriptor {
    pub rect: PixelRect,
    pub pixel_count: f64,
    pub energy: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variance: Option<f64>,
}

impl RegionDescriptor {
    pub fn from_region(region: &SatRegion<'_>) -> Self {
        Self {
            rect: region.rect(),
            pixel_count: region.pixel_count(),
            energy: region.energy(),
            variance: region.variance(),
        }
    }
}
