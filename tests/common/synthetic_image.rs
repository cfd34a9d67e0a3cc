use envmap_lights::image::HdrImage;

/// Uniform grey map.
pub fn flat(width: usize, height: usize, value: f32) -> HdrImage {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    HdrImage::from_fn(width, height, |_, _| [value; 3]).expect("flat image")
}

/// Grey map with a `bright` rectangle `[x0, x0 + w) × [y0, y0 + h)` over a
/// `base` background.
pub fn bright_patch(
    width: usize,
    height: usize,
    patch: (usize, usize, usize, usize),
    bright: f32,
    base: f32,
) -> HdrImage {
    let (x0, y0, w, h) = patch;
    assert!(x0 + w <= width && y0 + h <= height, "patch must fit the image");
    HdrImage::from_fn(width, height, |x, y| {
        if (x0..x0 + w).contains(&x) && (y0..y0 + h).contains(&y) {
            [bright; 3]
        } else {
            [base; 3]
        }
    })
    .expect("patch image")
}

/// Deterministic pseudo-random HDR noise with occasional hot pixels.
pub fn noisy(width: usize, height: usize, seed: u32) -> HdrImage {
    let mut state = seed.wrapping_mul(747_796_405).wrapping_add(2_891_336_453);
    HdrImage::from_fn(width, height, |_, _| {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        let r = (state % 1000) as f32 / 1000.0;
        let hot = if state % 97 == 0 { 50.0 } else { 0.0 };
        [r + hot, 0.5 * r + hot, 0.25 + hot]
    })
    .expect("noisy image")
}

/// Write `map` as an RGB32F OpenEXR file.
pub fn write_exr(map: &HdrImage, path: &std::path::Path) {
    use envmap_lights::image::ImageView;
    let mut data = Vec::with_capacity(map.pixel_count() * 3);
    for y in 0..map.height() {
        for x in 0..map.width() {
            data.extend_from_slice(&map.rgb(x, y));
        }
    }
    let buf = image::Rgb32FImage::from_raw(map.width() as u32, map.height() as u32, data)
        .expect("rgb32f buffer");
    image::DynamicImage::ImageRgb32F(buf)
        .save(path)
        .expect("write exr");
}

/// Scratch directory removed when the returned guard is dropped.
pub fn scratch_dir(name: &str) -> tempfile::TempDir {
    tempfile::Builder::new()
        .prefix(&format!("envmap-lights-{name}-"))
        .tempdir()
        .expect("scratch dir")
}
