//! Median / variance-minimizing cut partition of a summed-area table.
//!
//! Starting from the whole image, every region whose sides are both at least
//! two pixels and whose depth budget is not exhausted is cut along its longer
//! axis (see [`split`]) and both children are processed with one less level
//! of budget. Everything else becomes a leaf. The leaves form an exact,
//! disjoint cover of the image with at most `2^max_depth` entries.
//!
//! The traversal uses an explicit stack of `(region, remaining_depth)` pairs
//! and visits children depth-first, A (left/top) before B, so the leaf order
//! is the one a recursive implementation would produce. The output depends
//! only on the image and `max_depth`.

pub mod split;

pub use split::{best_cut, cut_cost, split_axis, split_region, CutChoice};

use crate::sat::{SatRegion, SummedAreaTable};
use log::debug;
use std::time::Instant;

/// Regions produced by the partitioner, in traversal order.
pub type SatRegionVector<'a> = Vec<SatRegion<'a>>;

#[inline]
fn is_splittable(region: &SatRegion<'_>) -> bool {
    let r = region.rect();
    r.w >= 2 && r.h >= 2
}

/// Partition the table into at most `2^max_depth` leaf regions.
pub fn partition(table: &SummedAreaTable, max_depth: u32) -> SatRegionVector<'_> {
    let t0 = Instant::now();
    let mut leaves = Vec::new();
    let mut stack = vec![(SatRegion::whole(table), max_depth)];

    while let Some((region, budget)) = stack.pop() {
        if budget == 0 || !is_splittable(&region) {
            leaves.push(region);
            continue;
        }
        match split_region(&region) {
            Some((a, b)) => {
                // B first so that A is popped (and fully expanded) before it.
                stack.push((b, budget - 1));
                stack.push((a, budget - 1));
            }
            None => leaves.push(region),
        }
    }

    debug!(
        "partition: {}x{} depth={} -> {} regions elapsed_ms={:.3}",
        table.width(),
        table.height(),
        max_depth,
        leaves.len(),
        t0.elapsed().as_secs_f64() * 1000.0
    );
    leaves
}
