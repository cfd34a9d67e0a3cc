//! Debug overlay of an extraction run.
//!
//! The map is tone mapped with a global Reinhard operator (key 0.18 over the
//! mean luminance) and gamma encoded to 8 bits. On top of it:
//!
//! - partition leaves are outlined in dark grey;
//! - candidate centroids are marked with a small yellow cross;
//! - final light footprints are outlined in red for the emitted lights (the
//!   first `max_lights` above the horizon) and blue for the rest.

use crate::angle::is_lower_hemisphere;
use crate::diagnostics::ExtractionReport;
use crate::error::Result;
use crate::image::io::save_rgb_u8;
use crate::image::HdrImage;
use crate::types::PixelRect;
use image::{Rgb, RgbImage};
use log::debug;
use std::path::Path;

const REGION_COLOR: Rgb<u8> = Rgb([64, 64, 64]);
const CANDIDATE_COLOR: Rgb<u8> = Rgb([255, 220, 0]);
const EMITTED_COLOR: Rgb<u8> = Rgb([255, 32, 32]);
const OTHER_LIGHT_COLOR: Rgb<u8> = Rgb([48, 96, 255]);
const KEY: f64 = 0.18;

fn tone_map(value: f32, exposure: f64) -> u8 {
    let v = (value.max(0.0) as f64) * exposure;
    let mapped = v / (1.0 + v);
    (mapped.powf(1.0 / 2.2) * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Tone-mapped 8-bit copy of `image`.
pub fn tone_mapped(image: &HdrImage, mean_luminance: f64) -> RgbImage {
    let exposure = if mean_luminance > 0.0 && mean_luminance.is_finite() {
        KEY / mean_luminance
    } else {
        1.0
    };
    RgbImage::from_fn(image.w as u32, image.h as u32, |x, y| {
        let [r, g, b] = image.rgb(x as usize, y as usize);
        Rgb([
            tone_map(r, exposure),
            tone_map(g, exposure),
            tone_map(b, exposure),
        ])
    })
}

fn outline(canvas: &mut RgbImage, rect: PixelRect, color: Rgb<u8>) {
    if rect.w == 0 || rect.h == 0 {
        return;
    }
    let (x0, y0) = (rect.x as u32, rect.y as u32);
    let (x1, y1) = ((rect.x_end() - 1) as u32, (rect.y_end() - 1) as u32);
    for x in x0..=x1 {
        canvas.put_pixel(x, y0, color);
        canvas.put_pixel(x, y1, color);
    }
    for y in y0..=y1 {
        canvas.put_pixel(x0, y, color);
        canvas.put_pixel(x1, y, color);
    }
}

fn cross(canvas: &mut RgbImage, u: f64, v: f64, color: Rgb<u8>) {
    let (w, h) = (canvas.width() as i64, canvas.height() as i64);
    let cx = ((u * w as f64) as i64).clamp(0, w - 1);
    let cy = ((v * h as f64) as i64).clamp(0, h - 1);
    for d in -1i64..=1 {
        let x = cx + d;
        let y = cy + d;
        if (0..w).contains(&x) {
            canvas.put_pixel(x as u32, cy as u32, color);
        }
        if (0..h).contains(&y) {
            canvas.put_pixel(cx as u32, y as u32, color);
        }
    }
}

/// Rasterize the stages of `report` over a tone-mapped copy of `image`.
pub fn render_overlay(image: &HdrImage, report: &ExtractionReport) -> RgbImage {
    let pixels = (image.w * image.h) as f64;
    let mut canvas = tone_mapped(image, report.input.total_luminance / pixels);

    for region in &report.regions {
        outline(&mut canvas, region.rect, REGION_COLOR);
    }
    for light in &report.candidates {
        cross(&mut canvas, light.centroid[0], light.centroid[1], CANDIDATE_COLOR);
    }

    let cap = match report.params.max_lights {
        0 => usize::MAX,
        n => n,
    };
    let mut emitted = Vec::new();
    for light in &report.lights {
        if emitted.len() < cap && !is_lower_hemisphere(light.centroid[1]) {
            emitted.push(light.rect);
        } else {
            outline(&mut canvas, light.rect, OTHER_LIGHT_COLOR);
        }
    }
    // Emitted lights go on top.
    for rect in emitted {
        outline(&mut canvas, rect, EMITTED_COLOR);
    }
    canvas
}

/// Render the overlay and save it as a PNG.
pub fn save_overlay(image: &HdrImage, report: &ExtractionReport, path: &Path) -> Result<()> {
    let canvas = render_overlay(image, report);
    save_rgb_u8(&canvas, path)?;
    debug!("debug overlay written to {}", path.display());
    Ok(())
}
