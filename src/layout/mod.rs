//! Two-column page layout
//!
//! Splits page rasters into column images and stitches every column of a
//! document into one composite image in reading order.

mod splitter;
mod stitcher;

pub use splitter::ColumnSplitter;
pub use stitcher::{CompositeImage, Segment, SourceLocation};

use image::RgbImage;
use serde::{Deserialize, Serialize};

/// Which side of the page a column came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnSide {
    Left,
    Right,
}

impl std::fmt::Display for ColumnSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnSide::Left => write!(f, "left"),
            ColumnSide::Right => write!(f, "right"),
        }
    }
}

/// One column cropped out of a page raster.
#[derive(Debug, Clone)]
pub struct ColumnImage {
    pub image: RgbImage,
    /// 0-based page index within the source document.
    pub page_index: usize,
    pub side: ColumnSide,
}
