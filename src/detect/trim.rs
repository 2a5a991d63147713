//! Ink-content bounding box trimming

use image::RgbImage;

use super::{luma, BoundingBox};

/// Tightens a region crop to its ink content plus fixed padding.
pub struct RegionTrimmer {
    whitespace_threshold: u8,
    padding: u32,
}

impl RegionTrimmer {
    pub const DEFAULT_PADDING: u32 = 10;

    pub fn new(whitespace_threshold: u8, padding: u32) -> Self {
        Self {
            whitespace_threshold,
            padding,
        }
    }

    /// Bounding box of all non-white pixels, expanded by the padding and
    /// clamped to the image bounds. An image with no ink at all comes back
    /// as its full bounds, never an empty crop.
    pub fn trim(&self, region: &RgbImage) -> BoundingBox {
        let (width, height) = region.dimensions();
        let mut min_x = width;
        let mut max_x = 0u32;
        let mut min_y = height;
        let mut max_y = 0u32;
        let mut found = false;

        for (x, y, px) in region.enumerate_pixels() {
            if luma(px) < self.whitespace_threshold {
                found = true;
                min_x = min_x.min(x);
                max_x = max_x.max(x);
                min_y = min_y.min(y);
                max_y = max_y.max(y);
            }
        }

        if !found {
            return BoundingBox {
                x: 0,
                y: 0,
                width,
                height,
            };
        }

        let x0 = min_x.saturating_sub(self.padding);
        let y0 = min_y.saturating_sub(self.padding);
        let x1 = (max_x + self.padding + 1).min(width);
        let y1 = (max_y + self.padding + 1).min(height);
        BoundingBox {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        }
    }
}
