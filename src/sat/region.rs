use super::{Plane, SummedAreaTable, MOMENT_COUNT};
use crate::types::PixelRect;

/// Rectangle of a [`SummedAreaTable`] with its six moment sums cached.
///
/// The region borrows the table; it never owns it, so the table outlives
/// every region derived from it. Copying a region copies the cached sums only.
#[derive(Clone, Copy)]
pub struct SatRegion<'a> {
    rect: PixelRect,
    table: &'a SummedAreaTable,
    sums: [f64; MOMENT_COUNT],
}

impl<'a> SatRegion<'a> {
    /// Create a region and populate its moment cache.
    ///
    /// Panics if the rectangle is empty or leaves the table bounds.
    pub fn create(x: usize, y: usize, w: usize, h: usize, table: &'a SummedAreaTable) -> Self {
        assert!(w >= 1 && h >= 1, "region must cover at least one pixel");
        assert!(
            x + w <= table.width() && y + h <= table.height(),
            "region ({x}, {y}, {w}, {h}) exceeds {}x{} table",
            table.width(),
            table.height()
        );
        let rect = PixelRect::new(x, y, w, h);
        Self {
            rect,
            table,
            sums: table.moments(rect),
        }
    }

    /// Region covering the whole table.
    pub fn whole(table: &'a SummedAreaTable) -> Self {
        Self::create(0, 0, table.width(), table.height(), table)
    }

    pub fn rect(&self) -> PixelRect {
        self.rect
    }

    pub fn table(&self) -> &'a SummedAreaTable {
        self.table
    }

    /// Cached Σ lᵏ for `k = 0..=5`.
    pub fn sums(&self) -> &[f64; MOMENT_COUNT] {
        &self.sums
    }

    pub fn pixel_count(&self) -> f64 {
        self.sums[0]
    }

    /// Total luminance (moment 1).
    pub fn energy(&self) -> f64 {
        self.sums[1]
    }

    /// Luminance variance `m2/m0 - (m1/m0)²`, `None` for an empty support.
    pub fn variance(&self) -> Option<f64> {
        let m0 = self.sums[0];
        if m0 <= 0.0 {
            return None;
        }
        let mean = self.sums[1] / m0;
        Some((self.sums[2] / m0 - mean * mean).max(0.0))
    }

    /// Σ R, Σ G, Σ B over the region.
    pub fn color_sum(&self) -> [f64; 3] {
        self.table.color_sum(self.rect)
    }

    /// Query any plane over a sub-rectangle expressed in region-local
    /// coordinates (closed ranges).
    pub fn query_local(&self, plane: Plane, x0: usize, y0: usize, x1: usize, y1: usize) -> f64 {
        self.table.query(
            plane,
            self.rect.x + x0,
            self.rect.y + y0,
            self.rect.x + x1,
            self.rect.y + y1,
        )
    }
}

impl std::fmt::Debug for SatRegion<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SatRegion")
            .field("rect", &self.rect)
            .field("sums", &self.sums)
            .finish()
    }
}
