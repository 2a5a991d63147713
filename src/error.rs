//! Error types for qslice

use thiserror::Error;

/// Result type alias for qslice
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for qslice
#[derive(Error, Debug)]
pub enum Error {
    /// PDF file not found
    #[error("PDF not found: {path}")]
    PdfNotFound { path: String },

    /// Input path rejected before processing
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    /// Configuration file unusable or failed validation
    #[error("Configuration error: {reason}")]
    Config { reason: String },

    /// PDFium library binding error
    #[error("PDFium error: {reason}")]
    Pdfium { reason: String },

    /// Page rendering failed for a document
    #[error("Failed to rasterize {path}: {reason}")]
    Rasterize { path: String, reason: String },

    /// Document has no pages or yielded no columns
    #[error("Empty document: {path}")]
    EmptyDocument { path: String },

    /// Degenerate page geometry
    #[error("Layout error: {reason}")]
    Layout { reason: String },

    /// OCR engine construction or recognition failure
    #[error("OCR error: {reason}")]
    Ocr { reason: String },

    /// Image encode/decode error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
