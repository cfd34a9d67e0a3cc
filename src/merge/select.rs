use super::{MergeOutcome, MergeParams};
use crate::angle::angle_between_deg;
use crate::lights::{sort_descending, Light};
use log::debug;

/// Keep compact lights, strongest first.
///
/// A light that lies within `max_angle_deg` of an already selected light is
/// folded into the closest one. Otherwise it is selected when its footprint
/// area is at most `max_merged_area` and dropped when it is broader. Dropped
/// lights lose their energy, so this pass does not conserve Σ`sum`.
pub fn select_lights(lights: &[Light], params: &MergeParams) -> MergeOutcome {
    let mut ordered = lights.to_vec();
    sort_descending(&mut ordered);

    let mut selected: Vec<Light> = Vec::new();
    let mut dropped = 0usize;
    for light in ordered {
        let dir = light.direction();
        let nearest = selected
            .iter()
            .enumerate()
            .map(|(k, s)| (k, angle_between_deg(&s.direction(), &dir)))
            .filter(|&(_, angle)| angle <= params.max_angle_deg)
            .min_by(|a, b| a.1.total_cmp(&b.1));
        if let Some((k, _)) = nearest {
            selected[k].absorb(&light);
        } else if light.footprint.area() <= params.max_merged_area {
            selected.push(light);
        } else {
            dropped += 1;
        }
    }

    sort_descending(&mut selected);
    debug!(
        "select_lights: {} in, {} selected, {} dropped",
        lights.len(),
        selected.len(),
        dropped
    );
    MergeOutcome {
        merge_count: lights.len() - selected.len(),
        lights: selected,
    }
}
