use super::Light;
use crate::image::HdrImage;
use crate::sat::{finite_rgb, luminance, SatRegion};
use crate::types::PixelRect;
use rayon::prelude::*;

fn geometric_center(rect: PixelRect, width: usize, height: usize) -> [f64; 2] {
    [
        (rect.x as f64 + rect.w as f64 * 0.5) / width as f64,
        (rect.y as f64 + rect.h as f64 * 0.5) / height as f64,
    ]
}

/// Luminance-weighted mean of the pixel centres inside `rect`, normalized.
///
/// Channels are sanitized exactly as the summed-area table does, so the
/// weights add up to the region's moment-1 sum.
fn weighted_centroid(rect: PixelRect, image: &HdrImage) -> Option<[f64; 2]> {
    let (mut sx, mut sy, mut sl) = (0.0f64, 0.0f64, 0.0f64);
    for y in rect.y..rect.y_end() {
        for x in rect.x..rect.x_end() {
            let (rgb, _) = finite_rgb(image.rgb(x, y));
            let lum = luminance(rgb);
            sx += lum * (x as f64 + 0.5);
            sy += lum * (y as f64 + 0.5);
            sl += lum;
        }
    }
    if sl <= 0.0 {
        return None;
    }
    Some([
        (sx / sl / image.w as f64).clamp(0.0, 1.0),
        (sy / sl / image.h as f64).clamp(0.0, 1.0),
    ])
}

/// Turn one leaf region into a candidate light.
///
/// Luminance statistics come from the region's cached moments, the color
/// from the table's color planes and the centroid from the pixel buffer.
/// Degenerate statistics do not fail: the light gets the geometric centre,
/// zero color and `error = true`.
pub fn synthesize(region: &SatRegion<'_>, image: &HdrImage) -> Light {
    let rect = region.rect();
    let sums = region.sums();
    let (m0, m1, m2) = (sums[0], sums[1], sums[2]);
    let center = geometric_center(rect, image.w, image.h);
    let footprint = rect.normalized(image.w, image.h);

    if m0 <= 0.0 || !m1.is_finite() || !m2.is_finite() {
        return Light {
            centroid: center,
            footprint,
            rect,
            color: [0.0; 3],
            lum_average: 0.0,
            sum: if m1.is_finite() { m1 } else { 0.0 },
            pixel_count: m0.max(0.0),
            sum_sq: 0.0,
            variance: 0.0,
            error: true,
            merged_count: 0,
        };
    }

    let lum_average = m1 / m0;
    let variance = (m2 / m0 - lum_average * lum_average).max(0.0);
    let [r, g, b] = region.color_sum();
    Light {
        centroid: weighted_centroid(rect, image).unwrap_or(center),
        footprint,
        rect,
        color: [r / m0, g / m0, b / m0],
        lum_average,
        sum: m1,
        pixel_count: m0,
        sum_sq: m2,
        variance,
        error: false,
        merged_count: 0,
    }
}

/// One candidate light per region, in region order.
///
/// Regions are independent and only read the table and the image, so the
/// work is spread over the rayon pool; the output order is preserved.
pub fn synthesize_all(regions: &[SatRegion<'_>], image: &HdrImage) -> Vec<Light> {
    regions
        .par_iter()
        .map(|region| synthesize(region, image))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::SummedAreaTable;

    #[test]
    fn flat_region_has_zero_variance_and_mean_color() {
        let img = HdrImage::from_fn(4, 2, |_, _| [2.0, 1.0, 0.5]).expect("image");
        let sat = SummedAreaTable::build(&img).expect("table");
        let region = SatRegion::create(2, 0, 2, 2, &sat);
        let light = synthesize(&region, &img);
        assert!(!light.error);
        assert!(light.variance < 1e-12);
        assert!((light.color[0] - 2.0).abs() < 1e-9);
        assert!((light.color[2] - 0.5).abs() < 1e-9);
        assert!((light.centroid[0] - 0.75).abs() < 1e-12);
        assert!((light.centroid[1] - 0.5).abs() < 1e-12);
        assert_eq!(light.pixel_count, 4.0);
    }

    #[test]
    fn centroid_follows_luminance() {
        let img =
            HdrImage::from_fn(4, 1, |x, _| if x == 3 { [9.0; 3] } else { [1.0; 3] }).expect("image");
        let sat = SummedAreaTable::build(&img).expect("table");
        let light = synthesize(&SatRegion::whole(&sat), &img);
        // (0.5 + 1.5 + 2.5 + 9 * 3.5) / 12 / 4
        let expected = (0.5 + 1.5 + 2.5 + 9.0 * 3.5) / 12.0 / 4.0;
        assert!((light.centroid[0] - expected).abs() < 1e-9);
        assert!(light.variance > 0.0);
    }

    #[test]
    fn black_region_uses_geometric_center_without_error() {
        let img = HdrImage::from_fn(4, 4, |_, _| [0.0; 3]).expect("image");
        let sat = SummedAreaTable::build(&img).expect("table");
        let light = synthesize(&SatRegion::create(0, 0, 2, 4, &sat), &img);
        assert_eq!(light.centroid, [0.25, 0.5]);
        assert!(!light.error);
        assert_eq!(light.sum, 0.0);
    }

    #[test]
    fn parallel_synthesis_keeps_region_order() {
        let img = HdrImage::from_fn(8, 8, |x, y| [(x + y) as f32; 3]).expect("image");
        let sat = SummedAreaTable::build(&img).expect("table");
        let regions: Vec<SatRegion> = (0..8).map(|x| SatRegion::create(x, 0, 1, 8, &sat)).collect();
        let lights = synthesize_all(&regions, &img);
        let xs: Vec<usize> = lights.iter().map(|l| l.rect.x).collect();
        assert_eq!(xs, (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn nan_channel_weighs_the_centroid_like_the_table() {
        let img = HdrImage::from_fn(2, 1, |x, _| {
            if x == 0 {
                [f32::NAN, 1.0, 1.0]
            } else {
                [1.0; 3]
            }
        })
        .expect("image");
        let sat = SummedAreaTable::build(&img).expect("table");
        let light = synthesize(&SatRegion::whole(&sat), &img);
        let bad = 0.7152 + 0.0722;
        let total = bad + 1.0;
        assert!((light.sum - total).abs() < 1e-6);
        let expected = (bad * 0.5 + 1.5) / total / 2.0;
        assert!(
            (light.centroid[0] - expected).abs() < 1e-6,
            "centroid {} expected {expected}",
            light.centroid[0]
        );
    }
}
