//! Diagnostics data model returned by the extractor.
//!
//! [`ExtractionReport`] is the main entry point: it carries the input
//! statistics, the partition leaves, the candidate and merged lights and the
//! per-stage timings. Everything serializes to camelCase JSON so a run can be
//! dumped with [`write_json_file`](crate::image::io::write_json_file).

pub mod report;
pub mod timing;

pub use report::{ExtractionReport, InputDescriptor, RegionDescriptor};
pub use timing::{elapsed_ms, StageTiming, TimingBreakdown};
