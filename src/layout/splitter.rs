//! Page-to-column splitting

use image::imageops;
use image::RgbImage;

use crate::error::{Error, Result};

use super::{ColumnImage, ColumnSide};

/// Splits a page raster into its left and right columns around a central
/// gutter.
pub struct ColumnSplitter {
    gap_ratio: f32,
}

impl ColumnSplitter {
    /// `gap_ratio` is the gutter width as a fraction of page width.
    pub fn new(gap_ratio: f32) -> Self {
        Self { gap_ratio }
    }

    /// Split one page into left and right columns.
    ///
    /// The gutter is centered on `width / 2` and spans `width * gap_ratio`
    /// pixels (truncated); both columns keep the full page height.
    pub fn split(&self, page: &RgbImage, page_index: usize) -> Result<Vec<ColumnImage>> {
        let (width, height) = page.dimensions();
        let gap_px = (width as f32 * self.gap_ratio) as u32;
        let mid = width / 2;
        let half_gap = gap_px / 2;

        let left_end = mid.saturating_sub(half_gap);
        let right_start = mid + half_gap;
        if left_end == 0 || right_start >= width {
            return Err(Error::Layout {
                reason: format!(
                    "page {} too narrow to split into columns: {}px wide",
                    page_index + 1,
                    width
                ),
            });
        }

        let left = imageops::crop_imm(page, 0, 0, left_end, height).to_image();
        let right =
            imageops::crop_imm(page, right_start, 0, width - right_start, height).to_image();

        Ok(vec![
            ColumnImage {
                image: left,
                page_index,
                side: ColumnSide::Left,
            },
            ColumnImage {
                image: right,
                page_index,
                side: ColumnSide::Right,
            },
        ])
    }
}
