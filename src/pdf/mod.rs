//! PDF rasterization layer
//!
//! Rendering sits behind the [`PageRasterizer`] trait; the production
//! implementation binds PDFium at startup.

mod raster;

pub use raster::PdfiumRasterizer;

use std::path::Path;

use image::RgbImage;

use crate::error::Result;

/// Basic document facts, probed before processing.
#[derive(Debug, Clone)]
pub struct PdfInfo {
    pub filename: String,
    pub page_count: u32,
    /// First-page size in PDF points.
    pub page_width_pt: f32,
    pub page_height_pt: f32,
}

/// Page rasterization service.
pub trait PageRasterizer {
    /// Render every page of the document at `dpi`, in page order.
    fn rasterize(&self, path: &Path, dpi: u32) -> Result<Vec<RgbImage>>;

    /// Probe page count and geometry without rendering.
    fn info(&self, path: &Path) -> Result<PdfInfo>;
}
