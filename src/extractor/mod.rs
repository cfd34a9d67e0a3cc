//! Light extractor driving the pipeline end-to-end.
//!
//! [`LightExtractor`] takes an [`HdrImage`] and runs the summed-area table
//! build, the variance cut partition, per-region light synthesis and the
//! configured merge strategy, returning an [`ExtractionReport`] with every
//! intermediate stage.
//!
//! ```no_run
//! use envmap_lights::{ExtractionParams, LightExtractor};
//! use envmap_lights::image::io::load_hdr_image;
//! use std::path::Path;
//!
//! # fn example() -> envmap_lights::Result<()> {
//! let image = load_hdr_image(Path::new("studio.hdr"))?;
//! let report = LightExtractor::new(ExtractionParams::default()).extract(&image)?;
//! for record in report.records() {
//!     println!("{:?} {:.3}", record.direction, record.lum_ratio);
//! }
//! # Ok(())
//! # }
//! ```

pub mod params;

pub use params::ExtractionParams;

use crate::diagnostics::{
    elapsed_ms, ExtractionReport, InputDescriptor, RegionDescriptor, TimingBreakdown,
};
use crate::error::{ExtractError, Result};
use crate::image::{HdrImage, ImageView};
use crate::lights::{sort_ascending, synthesize_all, Light};
use crate::merge::merge_with_strategy;
use crate::partition::partition;
use crate::sat::SummedAreaTable;
use log::{debug, info};
use std::time::Instant;

pub struct LightExtractor {
    params: ExtractionParams,
}

impl LightExtractor {
    pub fn new(params: ExtractionParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ExtractionParams {
        &self.params
    }

    /// Final lights only, strongest first.
    pub fn extract_lights(&self, image: &HdrImage) -> Result<Vec<Light>> {
        self.extract(image).map(|report| report.lights)
    }

    /// Run every stage and return the full report.
    pub fn extract(&self, image: &HdrImage) -> Result<ExtractionReport> {
        let (width, height) = (image.width(), image.height());
        debug!(
            "LightExtractor::extract start w={} h={} depth={} strategy={}",
            width, height, self.params.max_depth, self.params.strategy
        );
        let total_start = Instant::now();
        let mut timings = TimingBreakdown::default();

        let stage = Instant::now();
        let table = SummedAreaTable::build(image)?;
        timings.push("sat", elapsed_ms(stage));

        let stage = Instant::now();
        let regions = partition(&table, self.params.max_depth);
        timings.push("partition", elapsed_ms(stage));
        if regions.is_empty() {
            return Err(ExtractError::DegeneratePartition { width, height });
        }
        debug!("partition produced {} regions", regions.len());

        let stage = Instant::now();
        let mut candidates = synthesize_all(&regions, image);
        sort_ascending(&mut candidates);
        timings.push("synthesize", elapsed_ms(stage));
        let degenerate = candidates.iter().filter(|l| l.error).count();
        if degenerate > 0 {
            debug!("{degenerate} candidate lights have degenerate statistics");
        }

        let total_luminance = table.total_luminance_sum();
        let merge_params = self.params.merge_params(total_luminance);
        let stage = Instant::now();
        let merged = merge_with_strategy(&candidates, &merge_params, self.params.strategy);
        timings.push("merge", elapsed_ms(stage));

        timings.total_ms = elapsed_ms(total_start);
        info!(
            "extracted {} lights from {} candidates ({} merged) in {:.2} ms",
            merged.lights.len(),
            candidates.len(),
            merged.merge_count,
            timings.total_ms
        );

        Ok(ExtractionReport {
            input: InputDescriptor::from_table(&table, image.channels()),
            params: self.params.clone(),
            min_luminance: merge_params.min_luminance,
            regions: regions.iter().map(RegionDescriptor::from_region).collect(),
            candidates,
            lights: merged.lights,
            merge_count: merged.merge_count,
            timings,
        })
    }
}
