use crate::angle::equirect_direction;
use crate::types::{NormRect, PixelRect};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A directional light approximating one or more partition regions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Light {
    /// Luminance-weighted centroid `(u, v)` in normalized image space.
    pub centroid: [f64; 2],
    /// Normalized footprint (union of all absorbed regions).
    pub footprint: NormRect,
    /// Footprint in source pixels.
    pub rect: PixelRect,
    /// Average linear RGB.
    pub color: [f64; 3],
    pub lum_average: f64,
    /// Total luminance (energy) over the footprint's regions.
    pub sum: f64,
    pub pixel_count: f64,
    /// Σ luminance², kept so merged variances stay exact.
    pub sum_sq: f64,
    pub variance: f64,
    /// Set when the source statistics were degenerate.
    pub error: bool,
    /// Number of candidate lights absorbed into this one.
    pub merged_count: usize,
}

impl Light {
    /// Unit direction of the centroid (equirectangular mapping).
    pub fn direction(&self) -> Vector3<f64> {
        equirect_direction(self.centroid[0], self.centroid[1])
    }

    /// Fold `other` into `self`.
    ///
    /// Energy, pixel count and Σl² add up; centroid and color become the
    /// energy-weighted mean of both lights (pixel-count weighted when neither
    /// carries energy); the footprint becomes the union bounding box.
    pub fn absorb(&mut self, other: &Light) {
        let total = self.sum + other.sum;
        let count = self.pixel_count + other.pixel_count;
        let (wa, wb) = if total > 0.0 {
            (self.sum / total, other.sum / total)
        } else if count > 0.0 {
            (self.pixel_count / count, other.pixel_count / count)
        } else {
            (0.5, 0.5)
        };

        for i in 0..2 {
            self.centroid[i] = self.centroid[i] * wa + other.centroid[i] * wb;
        }
        for c in 0..3 {
            self.color[c] = self.color[c] * wa + other.color[c] * wb;
        }

        self.sum = total;
        self.pixel_count = count;
        self.sum_sq += other.sum_sq;
        if count > 0.0 {
            self.lum_average = total / count;
            self.variance = (self.sum_sq / count - self.lum_average * self.lum_average).max(0.0);
        }
        self.footprint = self.footprint.union(&other.footprint);
        self.rect = self.rect.union(&other.rect);
        self.error |= other.error;
        self.merged_count += other.merged_count + 1;
    }
}

/// Default light order: ascending energy, ties by position (row, then
/// column) so sorting is deterministic.
pub fn cmp_energy(a: &Light, b: &Light) -> Ordering {
    a.sum
        .total_cmp(&b.sum)
        .then_with(|| a.rect.y.cmp(&b.rect.y))
        .then_with(|| a.rect.x.cmp(&b.rect.x))
}

/// Weakest first.
pub fn sort_ascending(lights: &mut [Light]) {
    lights.sort_by(cmp_energy);
}

/// Strongest first (exact reverse of [`sort_ascending`]).
pub fn sort_descending(lights: &mut [Light]) {
    lights.sort_by(|a, b| cmp_energy(b, a));
}

/// Σ energy of a light list.
pub fn total_energy(lights: &[Light]) -> f64 {
    lights.iter().map(|l| l.sum).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn light(x: usize, sum: f64, count: f64) -> Light {
        let rect = PixelRect::new(x, 0, 1, 1);
        Light {
            centroid: [(x as f64 + 0.5) / 8.0, 0.125],
            footprint: rect.normalized(8, 4),
            rect,
            color: [sum / count, sum / count, sum / count],
            lum_average: sum / count,
            sum,
            pixel_count: count,
            sum_sq: sum * sum / count,
            variance: 0.0,
            error: false,
            merged_count: 0,
        }
    }

    #[test]
    fn absorb_is_energy_weighted() {
        let mut a = light(0, 3.0, 1.0);
        let b = light(2, 1.0, 1.0);
        a.absorb(&b);
        assert_eq!(a.sum, 4.0);
        assert_eq!(a.pixel_count, 2.0);
        assert_eq!(a.rect, PixelRect::new(0, 0, 3, 1));
        let expected_u = (0.5 / 8.0) * 0.75 + (2.5 / 8.0) * 0.25;
        assert!((a.centroid[0] - expected_u).abs() < 1e-12);
        assert!((a.color[0] - (3.0 * 0.75 + 0.25)).abs() < 1e-12);
        assert_eq!(a.lum_average, 2.0);
        // pixels 3 and 1 → variance 1
        assert!((a.variance - 1.0).abs() < 1e-12);
        assert_eq!(a.merged_count, 1);
    }

    #[test]
    fn absorb_without_energy_uses_pixel_counts() {
        let mut a = light(0, 0.0, 3.0);
        let b = light(4, 0.0, 1.0);
        a.absorb(&b);
        let expected_u = (0.5 / 8.0) * 0.75 + (4.5 / 8.0) * 0.25;
        assert!((a.centroid[0] - expected_u).abs() < 1e-12);
        assert_eq!(a.sum, 0.0);
    }

    #[test]
    fn sorting_orders_by_energy_then_position() {
        let mut lights = vec![light(3, 2.0, 1.0), light(1, 5.0, 1.0), light(0, 2.0, 1.0)];
        sort_ascending(&mut lights);
        let xs: Vec<usize> = lights.iter().map(|l| l.rect.x).collect();
        assert_eq!(xs, vec![0, 3, 1]);
        sort_descending(&mut lights);
        let xs: Vec<usize> = lights.iter().map(|l| l.rect.x).collect();
        assert_eq!(xs, vec![1, 3, 0]);
        assert_eq!(total_energy(&lights), 9.0);
    }
}
