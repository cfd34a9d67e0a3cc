use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in pixel coordinates (`x`, `y` = top-left corner).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: usize,
    pub y: usize,
    pub w: usize,
    pub h: usize,
}

impl PixelRect {
    pub fn new(x: usize, y: usize, w: usize, h: usize) -> Self {
        Self { x, y, w, h }
    }

    /// Exclusive right edge.
    #[inline]
    pub fn x_end(&self) -> usize {
        self.x + self.w
    }

    /// Exclusive bottom edge.
    #[inline]
    pub fn y_end(&self) -> usize {
        self.y + self.h
    }

    #[inline]
    pub fn area(&self) -> usize {
        self.w * self.h
    }

    #[inline]
    pub fn contains(&self, px: usize, py: usize) -> bool {
        px >= self.x && px < self.x_end() && py >= self.y && py < self.y_end()
    }

    /// Smallest rectangle covering both `self` and `other`.
    pub fn union(&self, other: &PixelRect) -> PixelRect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let x_end = self.x_end().max(other.x_end());
        let y_end = self.y_end().max(other.y_end());
        PixelRect::new(x, y, x_end - x, y_end - y)
    }

    /// Footprint normalized by the image size.
    pub fn normalized(&self, width: usize, height: usize) -> NormRect {
        let wf = width.max(1) as f64;
        let hf = height.max(1) as f64;
        NormRect {
            x: self.x as f64 / wf,
            y: self.y as f64 / hf,
            w: self.w as f64 / wf,
            h: self.h as f64 / hf,
        }
    }
}

/// Rectangle in normalized `[0, 1] × [0, 1]` image space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NormRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl NormRect {
    #[inline]
    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    /// Longest side, the "length" limited by the merger.
    #[inline]
    pub fn length(&self) -> f64 {
        self.w.max(self.h)
    }

    /// Smallest rectangle covering both `self` and `other`.
    pub fn union(&self, other: &NormRect) -> NormRect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let x_end = (self.x + self.w).max(other.x + other.w);
        let y_end = (self.y + self.h).max(other.y + other.h);
        NormRect {
            x,
            y,
            w: x_end - x,
            h: y_end - y,
        }
    }
}

/// Split axis of the partitioner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Cut through the width (vertical cut line, left/right children).
    Width,
    /// Cut through the height (horizontal cut line, top/bottom children).
    Height,
}
