#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod extractor;
pub mod image;
pub mod output;
pub mod types;

// Pipeline stages, public for tools and tests.
pub mod angle;
pub mod debug;
pub mod lights;
pub mod merge;
pub mod partition;
pub mod sat;

// --- High-level re-exports -------------------------------------------------

// Main entry points: extractor + results.
pub use crate::error::{ExtractError, Result};
pub use crate::extractor::{ExtractionParams, LightExtractor};
pub use crate::lights::Light;
pub use crate::merge::MergeStrategy;
pub use crate::output::LightRecord;

// Diagnostics returned by the extractor.
pub use crate::diagnostics::ExtractionReport;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use envmap_lights::prelude::*;
///
/// # fn main() -> envmap_lights::Result<()> {
/// let image = HdrImage::from_fn(256, 128, |x, y| {
///     if x < 16 && y < 16 { [80.0, 75.0, 60.0] } else { [0.3, 0.4, 0.6] }
/// })?;
/// let report = LightExtractor::new(ExtractionParams {
///     max_lights: 4,
///     ..Default::default()
/// })
/// .extract(&image)?;
/// for record in report.records() {
///     println!("dir={:?} ratio={:.3}", record.direction, record.lum_ratio);
/// }
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::HdrImage;
    pub use crate::{ExtractionParams, ExtractionReport, Light, LightExtractor, MergeStrategy};
}

// --- Stage-level API (for tools & advanced users) --------------------------

pub mod stages {
    pub use crate::lights::{synthesize, synthesize_all};
    pub use crate::merge::{
        merge_lights, merge_near_lights, merge_with_strategy, select_lights, MergeOutcome,
        MergeParams,
    };
    pub use crate::partition::{best_cut, partition, split_region, CutChoice};
    pub use crate::sat::{SatRegion, SummedAreaTable};

    pub use crate::diagnostics::{InputDescriptor, RegionDescriptor, StageTiming, TimingBreakdown};
}
