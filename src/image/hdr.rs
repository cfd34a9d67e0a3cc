//! Owned linear-light f32 image in interleaved row-major layout.
//!
//! The first three channels are always R, G, B. Extra channels (alpha from
//! EXR files) are carried along but never read by the extraction.
use crate::error::{ExtractError, Result};
use crate::image::traits::ImageView;

#[derive(Clone, Debug)]
pub struct HdrImage {
    /// Image width in pixels
    pub w: usize,
    /// Image height in pixels
    pub h: usize,
    /// Samples per pixel (>= 3)
    pub channels: usize,
    /// Backing storage, `w * h * channels` samples
    pub data: Vec<f32>,
}

impl HdrImage {
    /// Wrap a decoded buffer, validating its shape.
    pub fn from_raw(w: usize, h: usize, channels: usize, data: Vec<f32>) -> Result<Self> {
        if w == 0 || h == 0 {
            return Err(ExtractError::InvalidDimensions(w, h));
        }
        if channels < 3 {
            return Err(ExtractError::UnsupportedChannels(channels));
        }
        let expected = w * h * channels;
        if data.len() != expected {
            return Err(ExtractError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            w,
            h,
            channels,
            data,
        })
    }

    /// Build an RGB image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(w: usize, h: usize, mut f: impl FnMut(usize, usize) -> [f32; 3]) -> Result<Self> {
        let mut data = Vec::with_capacity(w * h * 3);
        for y in 0..h {
            for x in 0..w {
                data.extend_from_slice(&f(x, y));
            }
        }
        Self::from_raw(w, h, 3, data)
    }

    #[inline]
    /// Linear index of the first sample of pixel (x, y).
    pub fn idx(&self, x: usize, y: usize) -> usize {
        (y * self.w + x) * self.channels
    }

    #[inline]
    /// RGB triple at (x, y).
    pub fn rgb(&self, x: usize, y: usize) -> [f32; 3] {
        let i = self.idx(x, y);
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }
}

impl ImageView for HdrImage {
    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn channels(&self) -> usize {
        self.channels
    }
    #[inline]
    fn rgb(&self, x: usize, y: usize) -> [f32; 3] {
        HdrImage::rgb(self, x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_rejects_bad_shapes() {
        assert!(matches!(
            HdrImage::from_raw(0, 4, 3, Vec::new()),
            Err(ExtractError::InvalidDimensions(0, 4))
        ));
        assert!(matches!(
            HdrImage::from_raw(2, 2, 2, vec![0.0; 8]),
            Err(ExtractError::UnsupportedChannels(2))
        ));
        assert!(matches!(
            HdrImage::from_raw(2, 2, 3, vec![0.0; 11]),
            Err(ExtractError::BufferSize {
                expected: 12,
                actual: 11
            })
        ));
    }

    #[test]
    fn rgba_buffer_skips_alpha() {
        let data: Vec<f32> = (0..2 * 3 * 4).map(|v| v as f32).collect();
        let img = HdrImage::from_raw(2, 3, 4, data).expect("valid rgba buffer");
        assert_eq!(img.rgb(1, 2), [20.0, 21.0, 22.0]);
        assert_eq!(ImageView::rgb(&img, 1, 0), [4.0, 5.0, 6.0]);
        assert_eq!(ImageView::channels(&img), 4);
        assert_eq!(img.pixel_count(), 6);
    }
}
