//! Variance-minimizing cut search along one axis of a region.
//!
//! Each slice `i` of the region (a column for width cuts, a row for height
//! cuts) contributes its energy `e_i`, obtained with one SAT query. For a cut
//! at offset `k` the cost is
//!
//! ```text
//! V(A) + V(B),   V(S) = Σ e_i·i² − (Σ e_i·i)² / Σ e_i     (i ∈ S)
//! ```
//!
//! i.e. the energy-weighted spatial variance of both children along the cut
//! axis. On uniform energy the minimum lands on the middle slice (an
//! equal-energy bisection); a bright band pulls the cut toward itself.
//! Costs are accumulated incrementally so the scan is linear in the axis
//! length.
//!
//! Ties keep the first offset reaching the minimum. Regions without positive
//! energy fall back to pixel counts as weights, which selects the
//! geometric middle.

use crate::sat::{Plane, SatRegion};
use crate::types::Axis;
use serde::Serialize;

/// Winning cut for one region.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CutChoice {
    pub axis: Axis,
    /// Size of the first child (A) along `axis`, in `1..len`.
    pub offset: usize,
    /// Combined spatial variance of both children.
    pub cost: f64,
}

/// Axis a region is cut along: the longer side, ties go to the width.
#[inline]
pub fn split_axis(w: usize, h: usize) -> Axis {
    if w >= h {
        Axis::Width
    } else {
        Axis::Height
    }
}

#[inline]
fn spread(s0: f64, s1: f64, s2: f64) -> f64 {
    if s0 <= 0.0 {
        0.0
    } else {
        (s2 - s1 * s1 / s0).max(0.0)
    }
}

/// Per-slice weights of `region` along `axis`.
fn slice_weights(region: &SatRegion<'_>, axis: Axis, plane: Plane) -> Vec<f64> {
    let rect = region.rect();
    match axis {
        Axis::Width => (0..rect.w)
            .map(|i| region.query_local(plane, i, 0, i, rect.h - 1))
            .collect(),
        Axis::Height => (0..rect.h)
            .map(|i| region.query_local(plane, 0, i, rect.w - 1, i))
            .collect(),
    }
}

/// Cost of cutting `region` at `offset` along `axis`, using the same weights
/// as [`best_cut`].
pub fn cut_cost(region: &SatRegion<'_>, axis: Axis, offset: usize) -> f64 {
    let weights = slice_weights(region, axis, weight_plane(region));
    let (a, b) = weights.split_at(offset.min(weights.len()));
    let sums = |part: &[f64], start: usize| {
        part.iter().enumerate().fold((0.0, 0.0, 0.0), |(s0, s1, s2), (j, &e)| {
            let i = (start + j) as f64;
            (s0 + e, s1 + e * i, s2 + e * i * i)
        })
    };
    let (a0, a1, a2) = sums(a, 0);
    let (b0, b1, b2) = sums(b, a.len());
    spread(a0, a1, a2) + spread(b0, b1, b2)
}

fn weight_plane(region: &SatRegion<'_>) -> Plane {
    let energy = region.energy();
    if energy > 0.0 && energy.is_finite() {
        Plane::Moment(1)
    } else {
        Plane::Moment(0)
    }
}

/// Linear scan for the cheapest cut along `axis`.
///
/// Returns `None` when the region is a single slice thick along `axis`.
pub fn best_cut(region: &SatRegion<'_>, axis: Axis) -> Option<CutChoice> {
    let weights = slice_weights(region, axis, weight_plane(region));
    let len = weights.len();
    if len < 2 {
        return None;
    }

    let (t0, t1, t2) = weights
        .iter()
        .enumerate()
        .fold((0.0f64, 0.0f64, 0.0f64), |(s0, s1, s2), (i, &e)| {
            let fi = i as f64;
            (s0 + e, s1 + e * fi, s2 + e * fi * fi)
        });

    let mut best: Option<CutChoice> = None;
    let (mut a0, mut a1, mut a2) = (0.0f64, 0.0f64, 0.0f64);
    for offset in 1..len {
        let i = (offset - 1) as f64;
        let e = weights[offset - 1];
        a0 += e;
        a1 += e * i;
        a2 += e * i * i;
        let cost = spread(a0, a1, a2) + spread(t0 - a0, t1 - a1, t2 - a2);
        if best.map_or(true, |b| cost < b.cost) {
            best = Some(CutChoice { axis, offset, cost });
        }
    }
    best
}

/// Cut `region` along its longer axis at the variance-minimizing offset.
pub fn split_region<'a>(region: &SatRegion<'a>) -> Option<(SatRegion<'a>, SatRegion<'a>)> {
    let rect = region.rect();
    let choice = best_cut(region, split_axis(rect.w, rect.h))?;
    let table = region.table();
    let k = choice.offset;
    let children = match choice.axis {
        Axis::Width => (
            SatRegion::create(rect.x, rect.y, k, rect.h, table),
            SatRegion::create(rect.x + k, rect.y, rect.w - k, rect.h, table),
        ),
        Axis::Height => (
            SatRegion::create(rect.x, rect.y, rect.w, k, table),
            SatRegion::create(rect.x, rect.y + k, rect.w, rect.h - k, table),
        ),
    };
    Some(children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::HdrImage;
    use crate::sat::SummedAreaTable;
    use crate::types::PixelRect;

    fn gray(w: usize, h: usize, f: impl Fn(usize, usize) -> f32) -> HdrImage {
        HdrImage::from_fn(w, h, |x, y| {
            let v = f(x, y);
            [v, v, v]
        })
        .expect("image")
    }

    #[test]
    fn axis_prefers_width_on_ties() {
        assert_eq!(split_axis(4, 4), Axis::Width);
        assert_eq!(split_axis(5, 4), Axis::Width);
        assert_eq!(split_axis(3, 4), Axis::Height);
    }

    #[test]
    fn uniform_energy_cuts_in_the_middle() {
        let img = gray(8, 3, |_, _| 1.0);
        let sat = SummedAreaTable::build(&img).expect("table");
        let region = SatRegion::whole(&sat);
        let cut = best_cut(&region, Axis::Width).expect("splittable");
        assert_eq!(cut.offset, 4);
        let (a, b) = split_region(&region).expect("split");
        assert_eq!(a.rect(), PixelRect::new(0, 0, 4, 3));
        assert_eq!(b.rect(), PixelRect::new(4, 0, 4, 3));
    }

    #[test]
    fn odd_length_tie_keeps_first_minimum() {
        // Pixel-count weights keep the arithmetic exact: offsets 2 and 3 tie.
        let img = gray(5, 1, |_, _| 0.0);
        let sat = SummedAreaTable::build(&img).expect("table");
        let region = SatRegion::whole(&sat);
        let cut = best_cut(&region, Axis::Width).expect("splittable");
        assert_eq!(cut.offset, 2);
        assert_eq!(cut.cost, cut_cost(&region, Axis::Width, 3));
    }

    #[test]
    fn black_region_falls_back_to_geometric_middle() {
        let img = gray(4, 6, |_, _| 0.0);
        let sat = SummedAreaTable::build(&img).expect("table");
        let (a, b) = split_region(&SatRegion::whole(&sat)).expect("split");
        assert_eq!(a.rect(), PixelRect::new(0, 0, 4, 3));
        assert_eq!(b.rect(), PixelRect::new(0, 3, 4, 3));
    }

    #[test]
    fn bright_column_pulls_cut_toward_it() {
        let img = gray(8, 4, |x, _| if x == 0 { 50.0 } else { 0.5 });
        let sat = SummedAreaTable::build(&img).expect("table");
        let region = SatRegion::whole(&sat);
        let cut = best_cut(&region, Axis::Width).expect("splittable");
        assert!(
            cut.offset < 4,
            "cut should move toward the bright column, got offset {}",
            cut.offset
        );
        assert!((cut_cost(&region, Axis::Width, cut.offset) - cut.cost).abs() < 1e-6);
    }

    #[test]
    fn chosen_cut_is_no_worse_than_middle() {
        let img = gray(12, 7, |x, y| ((x * 5 + y * 3) % 7) as f32 * 0.75 + 0.1);
        let sat = SummedAreaTable::build(&img).expect("table");
        let region = SatRegion::whole(&sat);
        let cut = best_cut(&region, Axis::Width).expect("splittable");
        let middle = cut_cost(&region, Axis::Width, 6);
        assert!(cut.cost <= middle + 1e-9, "cost {} > middle {}", cut.cost, middle);
    }

    #[test]
    fn thin_region_has_no_cut() {
        let img = gray(1, 5, |_, _| 1.0);
        let sat = SummedAreaTable::build(&img).expect("table");
        assert!(best_cut(&SatRegion::whole(&sat), Axis::Width).is_none());
    }
}
