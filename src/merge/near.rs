use super::{MergeOutcome, MergeParams};
use crate::angle::angle_between_deg;
use crate::lights::{sort_descending, Light};
use log::debug;

/// Re-merge close lights regardless of their energy.
///
/// Lights are visited strongest first; each surviving light absorbs every
/// later survivor whose direction is within `max_angle_deg` and whose union
/// footprint respects the area and length limits. The absorber's direction
/// is refreshed after each absorption. Energy is conserved.
pub fn merge_near_lights(lights: &[Light], params: &MergeParams) -> MergeOutcome {
    let mut ordered = lights.to_vec();
    sort_descending(&mut ordered);
    let n = ordered.len();
    let mut alive = vec![true; n];

    for i in 0..n {
        if !alive[i] {
            continue;
        }
        let (head, tail) = ordered.split_at_mut(i + 1);
        let absorber = &mut head[i];
        for (offset, other) in tail.iter().enumerate() {
            let j = i + 1 + offset;
            if !alive[j] {
                continue;
            }
            let angle = angle_between_deg(&absorber.direction(), &other.direction());
            if angle <= params.max_angle_deg && params.union_fits(absorber, other) {
                absorber.absorb(other);
                alive[j] = false;
            }
        }
    }

    let mut merged: Vec<Light> = ordered
        .into_iter()
        .zip(alive)
        .filter_map(|(light, keep)| keep.then_some(light))
        .collect();
    sort_descending(&mut merged);
    debug!("merge_near_lights: {} -> {} lights", n, merged.len());
    MergeOutcome {
        merge_count: n - merged.len(),
        lights: merged,
    }
}
