use super::{MergeOutcome, MergeParams};
use crate::angle::angle_between_deg;
use crate::lights::{sort_ascending, sort_descending, Light};
use log::debug;
use nalgebra::Vector3;

/// Single weak-to-strong merge pass.
///
/// Candidates are sorted by ascending energy and visited once. A candidate
/// with `sum < min_luminance` looks for an acceptor among the stronger lights
/// that follow it: the union footprint must fit the area and length limits
/// and the directions must be within `max_angle_deg`. The closest acceptor
/// (smallest angle, first on ties) absorbs it. Acceptors keep accumulating,
/// so a light that absorbed an earlier candidate may itself be absorbed
/// later.
///
/// Energy is conserved: Σ`sum` of the output equals Σ`sum` of the input.
pub fn merge_lights(candidates: &[Light], params: &MergeParams) -> MergeOutcome {
    let mut lights = candidates.to_vec();
    sort_ascending(&mut lights);
    let n = lights.len();
    let mut dirs: Vec<Vector3<f64>> = lights.iter().map(Light::direction).collect();
    let mut alive = vec![true; n];

    for i in 0..n {
        if lights[i].sum >= params.min_luminance {
            continue;
        }
        let mut best: Option<(usize, f64)> = None;
        for j in (i + 1)..n {
            let angle = angle_between_deg(&dirs[i], &dirs[j]);
            if angle > params.max_angle_deg || !params.union_fits(&lights[i], &lights[j]) {
                continue;
            }
            if best.map_or(true, |(_, a)| angle < a) {
                best = Some((j, angle));
            }
        }
        if let Some((j, _)) = best {
            let (head, tail) = lights.split_at_mut(j);
            tail[0].absorb(&head[i]);
            dirs[j] = tail[0].direction();
            alive[i] = false;
        }
    }

    let mut merged: Vec<Light> = lights
        .into_iter()
        .zip(alive)
        .filter_map(|(light, keep)| keep.then_some(light))
        .collect();
    sort_descending(&mut merged);
    debug!(
        "merge_lights: {} candidates -> {} lights (min luminance {:.4})",
        n,
        merged.len(),
        params.min_luminance
    );
    MergeOutcome {
        merge_count: n - merged.len(),
        lights: merged,
    }
}
