//! Multi-moment summed-area table over per-pixel luminance.
//!
//! The table keeps nine prefix-sum planes of size `(W+1) × (H+1)`:
//!
//! - `Moment(k)` for `k = 0..=5`: Σ lᵏ, so moment 0 is the pixel count,
//!   moment 1 the total luminance and moment 2 feeds the variance.
//! - `Red`, `Green`, `Blue`: Σ of the raw channel values.
//!
//! Entry `(x, y)` of a plane holds the sum over all pixels with column `< x`
//! and row `< y`; row 0 and column 0 are zero. Any axis-aligned rectangle is
//! then summed with four lookups (inclusion–exclusion). All planes are
//! accumulated in `f64` regardless of the input precision so that moment 5
//! stays usable on maps with tens of millions of pixels.
//!
//! Non-finite channel values (NaN/inf from broken EXR writers) are treated as
//! zero, see [`finite_rgb`]. Centroids computed from the pixel buffer use the
//! same rule.

mod region;

pub use region::SatRegion;

use crate::error::{ExtractError, Result};
use crate::image::ImageView;
use crate::types::PixelRect;
use log::{debug, warn};
use std::time::Instant;

/// Number of luminance moment planes (powers 0 through 5).
pub const MOMENT_COUNT: usize = 6;

/// Rec. 709 luminance of a linear RGB triple.
#[inline]
pub fn luminance(rgb: [f32; 3]) -> f64 {
    0.2126 * rgb[0] as f64 + 0.7152 * rgb[1] as f64 + 0.0722 * rgb[2] as f64
}

/// Replace non-finite channels with zero; also returns how many were replaced.
#[inline]
pub fn finite_rgb(rgb: [f32; 3]) -> ([f32; 3], usize) {
    let mut replaced = 0;
    let clean = rgb.map(|c| {
        if c.is_finite() {
            c
        } else {
            replaced += 1;
            0.0
        }
    });
    (clean, replaced)
}

/// Selects one of the nine prefix planes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Plane {
    /// Σ luminanceᵏ, `k < MOMENT_COUNT`.
    Moment(usize),
    Red,
    Green,
    Blue,
}

#[derive(Clone, Debug)]
pub struct SummedAreaTable {
    width: usize,
    height: usize,
    moments: [Vec<f64>; MOMENT_COUNT],
    colors: [Vec<f64>; 3],
    min_lum: f64,
    max_lum: f64,
}

impl SummedAreaTable {
    /// Build all planes in one pass over the image.
    pub fn build<I: ImageView + ?Sized>(image: &I) -> Result<Self> {
        let (w, h) = (image.width(), image.height());
        if w == 0 || h == 0 {
            return Err(ExtractError::InvalidDimensions(w, h));
        }
        let t0 = Instant::now();
        let stride = w + 1;
        let len = stride * (h + 1);
        let mut moments: [Vec<f64>; MOMENT_COUNT] = std::array::from_fn(|_| vec![0.0; len]);
        let mut colors: [Vec<f64>; 3] = std::array::from_fn(|_| vec![0.0; len]);
        let mut min_lum = f64::INFINITY;
        let mut max_lum = f64::NEG_INFINITY;
        let mut sanitized = 0usize;

        // Running row sums, one per plane.
        let mut row_moments = [0.0f64; MOMENT_COUNT];
        let mut row_colors = [0.0f64; 3];
        for y in 0..h {
            row_moments.fill(0.0);
            row_colors.fill(0.0);
            for x in 0..w {
                let (rgb, replaced) = finite_rgb(image.rgb(x, y));
                sanitized += replaced;
                let lum = luminance(rgb);
                min_lum = min_lum.min(lum);
                max_lum = max_lum.max(lum);

                let mut power = 1.0;
                for acc in row_moments.iter_mut() {
                    *acc += power;
                    power *= lum;
                }
                for (acc, &c) in row_colors.iter_mut().zip(rgb.iter()) {
                    *acc += c as f64;
                }

                let above = y * stride + x + 1;
                let here = above + stride;
                for (plane, &acc) in moments.iter_mut().zip(row_moments.iter()) {
                    plane[here] = plane[above] + acc;
                }
                for (plane, &acc) in colors.iter_mut().zip(row_colors.iter()) {
                    plane[here] = plane[above] + acc;
                }
            }
        }

        if sanitized > 0 {
            warn!("SummedAreaTable: treated {sanitized} non-finite samples as zero");
        }
        debug!(
            "SummedAreaTable::build {}x{} lum=[{:.4}, {:.4}] elapsed_ms={:.3}",
            w,
            h,
            min_lum,
            max_lum,
            t0.elapsed().as_secs_f64() * 1000.0
        );

        Ok(Self {
            width: w,
            height: h,
            moments,
            colors,
            min_lum,
            max_lum,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn plane(&self, plane: Plane) -> &[f64] {
        match plane {
            Plane::Moment(k) => &self.moments[k],
            Plane::Red => &self.colors[0],
            Plane::Green => &self.colors[1],
            Plane::Blue => &self.colors[2],
        }
    }

    #[inline]
    fn at(data: &[f64], stride: usize, x: usize, y: usize) -> f64 {
        data[y * stride + x]
    }

    /// Aggregate over the closed pixel rectangle `[x0, x1] × [y0, y1]`.
    ///
    /// Callers must pass `x0 <= x1 < width` and `y0 <= y1 < height`.
    #[inline]
    pub fn query(&self, plane: Plane, x0: usize, y0: usize, x1: usize, y1: usize) -> f64 {
        debug_assert!(x0 <= x1 && x1 < self.width, "x range {x0}..={x1}");
        debug_assert!(y0 <= y1 && y1 < self.height, "y range {y0}..={y1}");
        let data = self.plane(plane);
        let s = self.width + 1;
        Self::at(data, s, x1 + 1, y1 + 1) + Self::at(data, s, x0, y0)
            - Self::at(data, s, x0, y1 + 1)
            - Self::at(data, s, x1 + 1, y0)
    }

    /// Aggregate over a non-empty rectangle.
    #[inline]
    pub fn sum_rect(&self, plane: Plane, rect: PixelRect) -> f64 {
        self.query(
            plane,
            rect.x,
            rect.y,
            rect.x_end() - 1,
            rect.y_end() - 1,
        )
    }

    /// All six luminance moments over `rect`.
    pub fn moments(&self, rect: PixelRect) -> [f64; MOMENT_COUNT] {
        std::array::from_fn(|k| self.sum_rect(Plane::Moment(k), rect))
    }

    /// Σ R, Σ G, Σ B over `rect`.
    pub fn color_sum(&self, rect: PixelRect) -> [f64; 3] {
        [
            self.sum_rect(Plane::Red, rect),
            self.sum_rect(Plane::Green, rect),
            self.sum_rect(Plane::Blue, rect),
        ]
    }

    /// Moment 1 over the whole image.
    pub fn total_luminance_sum(&self) -> f64 {
        let s = self.width + 1;
        Self::at(&self.moments[1], s, self.width, self.height)
    }

    pub fn min_luminance(&self) -> f64 {
        self.min_lum
    }

    pub fn max_luminance(&self) -> f64 {
        self.max_lum
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::HdrImage;

    fn ramp_image(w: usize, h: usize) -> HdrImage {
        HdrImage::from_fn(w, h, |x, y| {
            let v = 0.25 + (x * 3 + y * 7 % 5) as f32 * 0.5;
            [v, v * 0.5, v * 2.0]
        })
        .expect("valid ramp image")
    }

    fn brute(image: &HdrImage, x0: usize, y0: usize, x1: usize, y1: usize, k: i32) -> f64 {
        let mut acc = 0.0;
        for y in y0..=y1 {
            for x in x0..=x1 {
                acc += luminance(image.rgb(x, y)).powi(k);
            }
        }
        acc
    }

    #[test]
    fn query_matches_brute_force_for_interior_and_edges() {
        let img = ramp_image(9, 6);
        let sat = SummedAreaTable::build(&img).expect("table");
        let rects = [
            (0, 0, 8, 5),
            (0, 0, 0, 0),
            (8, 5, 8, 5),
            (2, 1, 5, 3),
            (0, 2, 8, 2),
            (4, 0, 4, 5),
        ];
        for &(x0, y0, x1, y1) in &rects {
            let count = ((x1 - x0 + 1) * (y1 - y0 + 1)) as f64;
            assert_eq!(sat.query(Plane::Moment(0), x0, y0, x1, y1), count);
            for k in 1..MOMENT_COUNT {
                let expected = brute(&img, x0, y0, x1, y1, k as i32);
                let got = sat.query(Plane::Moment(k), x0, y0, x1, y1);
                assert!(
                    (got - expected).abs() <= 1e-9 * expected.abs().max(1.0),
                    "moment {k} rect {:?}: got {got} expected {expected}",
                    (x0, y0, x1, y1)
                );
            }
        }
    }

    #[test]
    fn color_planes_sum_raw_channels() {
        let img = ramp_image(5, 4);
        let sat = SummedAreaTable::build(&img).expect("table");
        let rect = PixelRect::new(1, 1, 3, 2);
        let mut expected = [0.0f64; 3];
        for y in 1..3 {
            for x in 1..4 {
                let rgb = img.rgb(x, y);
                for c in 0..3 {
                    expected[c] += rgb[c] as f64;
                }
            }
        }
        let got = sat.color_sum(rect);
        for c in 0..3 {
            assert!((got[c] - expected[c]).abs() < 1e-9, "channel {c}");
        }
    }

    #[test]
    fn tracks_luminance_range_and_total() {
        let img = ramp_image(4, 4);
        let sat = SummedAreaTable::build(&img).expect("table");
        let lums: Vec<f64> = (0..16).map(|i| luminance(img.rgb(i % 4, i / 4))).collect();
        let min = lums.iter().copied().fold(f64::INFINITY, f64::min);
        let max = lums.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let total: f64 = lums.iter().sum();
        assert_eq!(sat.min_luminance(), min);
        assert_eq!(sat.max_luminance(), max);
        assert!((sat.total_luminance_sum() - total).abs() < 1e-9);
    }

    #[test]
    fn non_finite_samples_count_as_zero() {
        let img = HdrImage::from_fn(3, 3, |x, y| {
            if x == 1 && y == 1 {
                [f32::NAN, f32::INFINITY, 1.0]
            } else {
                [1.0, 1.0, 1.0]
            }
        })
        .expect("image");
        let sat = SummedAreaTable::build(&img).expect("table");
        let expected = 8.0 + 0.0722;
        assert!((sat.total_luminance_sum() - expected).abs() < 1e-9);
        assert!(sat.query(Plane::Moment(2), 1, 1, 2, 2).is_finite());
    }

    /// Planar single-row view, laid out unlike `HdrImage`.
    struct PlanarStrip {
        r: Vec<f32>,
        g: Vec<f32>,
        b: Vec<f32>,
    }

    impl ImageView for PlanarStrip {
        fn width(&self) -> usize {
            self.r.len()
        }
        fn height(&self) -> usize {
            1
        }
        fn channels(&self) -> usize {
            3
        }
        fn rgb(&self, x: usize, _y: usize) -> [f32; 3] {
            [self.r[x], self.g[x], self.b[x]]
        }
    }

    #[test]
    fn builds_from_any_image_view() {
        let strip = PlanarStrip {
            r: vec![1.0, 0.0, 4.0],
            g: vec![0.0, 2.0, f32::NAN],
            b: vec![0.5, 0.0, 1.0],
        };
        let sat = SummedAreaTable::build(&strip).expect("table");
        assert_eq!((sat.width(), sat.height()), (3, 1));
        let expected = luminance([1.0, 0.0, 0.5])
            + luminance([0.0, 2.0, 0.0])
            + luminance([4.0, 0.0, 1.0]);
        assert!((sat.total_luminance_sum() - expected).abs() < 1e-9);
        let color = sat.color_sum(PixelRect::new(0, 0, 3, 1));
        assert_eq!(color, [5.0, 2.0, 1.5]);
    }

    #[test]
    fn finite_rgb_zeroes_bad_channels() {
        assert_eq!(finite_rgb([1.0, 2.0, 3.0]), ([1.0, 2.0, 3.0], 0));
        assert_eq!(
            finite_rgb([f32::NAN, f32::NEG_INFINITY, 3.0]),
            ([0.0, 0.0, 3.0], 2)
        );
    }
}
