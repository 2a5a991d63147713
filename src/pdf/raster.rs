//! Pdfium-backed page rendering

use std::path::Path;

use image::RgbImage;
use pdfium_render::prelude::*;
use tracing::debug;

use crate::error::{Error, Result};

use super::{PageRasterizer, PdfInfo};

const POINTS_PER_INCH: f32 = 72.0;

/// Get PDFium instance (creates new instance each time - PDFium is not thread-safe)
fn create_pdfium() -> Result<Pdfium> {
    // Try to bind to system library or use static linking
    let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| {
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(
                "/opt/pdfium/lib",
            ))
        })
        .or_else(|_| Pdfium::bind_to_system_library())
        .map_err(|e| Error::Pdfium {
            reason: format!("Failed to initialize PDFium: {}", e),
        })?;

    Ok(Pdfium::new(bindings))
}

/// Renders whole pages through PDFium at a DPI-derived scale.
pub struct PdfiumRasterizer;

impl PdfiumRasterizer {
    /// Verify the PDFium library binds before any file is processed.
    pub fn new() -> Result<Self> {
        create_pdfium()?;
        Ok(Self)
    }
}

impl PageRasterizer for PdfiumRasterizer {
    fn rasterize(&self, path: &Path, dpi: u32) -> Result<Vec<RgbImage>> {
        let pdfium = create_pdfium()?;
        let document = pdfium
            .load_pdf_from_file(path, None)
            .map_err(|e| Error::Rasterize {
                path: path.display().to_string(),
                reason: format!("Failed to load PDF: {}", e),
            })?;

        let scale = dpi as f32 / POINTS_PER_INCH;
        let config = PdfRenderConfig::new()
            .scale_page_by_factor(scale)
            .render_form_data(true)
            .render_annotations(true);

        let mut pages = Vec::with_capacity(document.pages().len() as usize);
        for (index, page) in document.pages().iter().enumerate() {
            let bitmap = page
                .render_with_config(&config)
                .map_err(|e| Error::Rasterize {
                    path: path.display().to_string(),
                    reason: format!("Failed to render page {}: {}", index + 1, e),
                })?;
            let image = bitmap.as_image().to_rgb8();
            debug!(
                "rendered page {} at {}x{}",
                index + 1,
                image.width(),
                image.height()
            );
            pages.push(image);
        }

        if pages.is_empty() {
            return Err(Error::EmptyDocument {
                path: path.display().to_string(),
            });
        }
        Ok(pages)
    }

    fn info(&self, path: &Path) -> Result<PdfInfo> {
        let pdfium = create_pdfium()?;
        let document = pdfium
            .load_pdf_from_file(path, None)
            .map_err(|e| Error::Rasterize {
                path: path.display().to_string(),
                reason: format!("Failed to load PDF: {}", e),
            })?;

        let pages = document.pages();
        let (page_width_pt, page_height_pt) = match pages.first() {
            Ok(page) => (page.width().value, page.height().value),
            Err(_) => (0.0, 0.0),
        };

        Ok(PdfInfo {
            filename: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            page_count: pages.len() as u32,
            page_width_pt,
            page_height_pt,
        })
    }
}
