//! Merging candidate lights into the final light set.
//!
//! The base pass ([`merge_lights`]) walks the candidates from weakest to
//! strongest once. A candidate below the luminance threshold is absorbed into
//! a stronger light when the union of both footprints stays under the area
//! and length limits and their directions are close enough. The pass is not
//! iterated to a fixed point: its result depends on the visiting order.
//!
//! Two optional follow-up passes are selected at runtime through
//! [`MergeStrategy`]:
//!
//! - `select` keeps compact lights, folding near duplicates into stronger
//!   neighbours and dropping broad regions ([`select_lights`]);
//! - `near-merge` re-merges close lights regardless of their energy
//!   ([`merge_near_lights`]).

mod near;
mod pass;
mod select;

pub use near::merge_near_lights;
pub use pass::merge_lights;
pub use select::select_lights;

use crate::lights::Light;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Thresholds shared by all merge passes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeParams {
    /// Maximum normalized area of the union footprint.
    pub max_merged_area: f64,
    /// Maximum normalized side length of the union footprint.
    pub max_merged_length: f64,
    /// Absolute energy below which a light may be absorbed.
    pub min_luminance: f64,
    /// Maximum angle between two light directions, in degrees.
    pub max_angle_deg: f64,
}

impl MergeParams {
    /// Whether the union footprint of `a` and `b` respects the area and
    /// length limits.
    pub fn union_fits(&self, a: &Light, b: &Light) -> bool {
        let union = a.footprint.union(&b.footprint);
        union.area() <= self.max_merged_area && union.length() <= self.max_merged_length
    }
}

/// Which merge pipeline runs after synthesis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MergeStrategy {
    /// Base merge pass only.
    #[default]
    Plain,
    /// Base merge pass, then [`select_lights`].
    Select,
    /// Base merge pass, then [`merge_near_lights`].
    NearMerge,
}

impl fmt::Display for MergeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MergeStrategy::Plain => "plain",
            MergeStrategy::Select => "select",
            MergeStrategy::NearMerge => "near-merge",
        };
        f.write_str(name)
    }
}

impl FromStr for MergeStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" => Ok(MergeStrategy::Plain),
            "select" => Ok(MergeStrategy::Select),
            "near-merge" | "near_merge" | "nearmerge" => Ok(MergeStrategy::NearMerge),
            other => Err(format!(
                "unknown merge strategy '{other}' (expected plain, select or near-merge)"
            )),
        }
    }
}

/// Lights surviving a merge, strongest first.
#[derive(Clone, Debug, Default)]
pub struct MergeOutcome {
    pub lights: Vec<Light>,
    /// `input count - output count`.
    pub merge_count: usize,
}

/// Run the pipeline selected by `strategy`.
pub fn merge_with_strategy(
    candidates: &[Light],
    params: &MergeParams,
    strategy: MergeStrategy,
) -> MergeOutcome {
    let base = merge_lights(candidates, params);
    let follow_up = match strategy {
        MergeStrategy::Plain => return base,
        MergeStrategy::Select => select_lights(&base.lights, params),
        MergeStrategy::NearMerge => merge_near_lights(&base.lights, params),
    };
    MergeOutcome {
        merge_count: candidates.len() - follow_up.lights.len(),
        lights: follow_up.lights,
    }
}
