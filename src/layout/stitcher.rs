//! Composite image construction and inverse mapping

use image::{imageops, Rgb, RgbImage};

use crate::error::{Error, Result};

use super::{ColumnImage, ColumnSide};

/// One column's vertical span `[start_y, end_y)` within the composite image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// 0-based page index within the source document.
    pub page_index: usize,
    pub side: ColumnSide,
    pub start_y: u32,
    pub end_y: u32,
}

impl Segment {
    pub fn height(&self) -> u32 {
        self.end_y - self.start_y
    }
}

/// Original location of a composite-image row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    /// 1-based page number.
    pub page: usize,
    pub column: ColumnSide,
    /// Row offset within the source column crop.
    pub local_y: u32,
}

/// All columns of a document stacked into one tall image, with the segment
/// descriptors needed to map composite rows back to their source column.
///
/// Segments are contiguous, non-overlapping, and cover `[0, height)` exactly.
pub struct CompositeImage {
    pub image: RgbImage,
    segments: Vec<Segment>,
}

impl CompositeImage {
    /// Stack columns in reading order (page ascending, left before right).
    ///
    /// The canvas is as wide as the widest column; narrower columns are
    /// horizontally centered on a white background.
    pub fn stitch(columns: &[ColumnImage]) -> Result<Self> {
        if columns.is_empty() {
            return Err(Error::Layout {
                reason: "no columns to stitch".to_string(),
            });
        }

        let max_width = columns.iter().map(|c| c.image.width()).max().unwrap_or(0);
        let total_height: u32 = columns.iter().map(|c| c.image.height()).sum();
        let mut canvas = RgbImage::from_pixel(max_width, total_height, Rgb([255, 255, 255]));

        let mut segments = Vec::with_capacity(columns.len());
        let mut y_offset = 0u32;
        for column in columns {
            let x_offset = (max_width - column.image.width()) / 2;
            imageops::overlay(&mut canvas, &column.image, x_offset as i64, y_offset as i64);
            segments.push(Segment {
                page_index: column.page_index,
                side: column.side,
                start_y: y_offset,
                end_y: y_offset + column.image.height(),
            });
            y_offset += column.image.height();
        }

        Ok(Self {
            image: canvas,
            segments,
        })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Map a composite row back to its source page and column.
    ///
    /// Binary search over segment start offsets. A `y` at or beyond the total
    /// height clamps to the last segment and returns a `local_y` that may
    /// exceed that segment's own height; callers get a stable answer for
    /// out-of-range rows rather than a panic.
    pub fn locate(&self, y: u32) -> SourceLocation {
        let idx = match self.segments.binary_search_by(|s| s.start_y.cmp(&y)) {
            Ok(i) => i,
            Err(0) => 0,
            Err(i) => i - 1,
        };
        let segment = &self.segments[idx];
        SourceLocation {
            page: segment.page_index + 1,
            column: segment.side,
            local_y: y - segment.start_y,
        }
    }
}
