//! qslice library
//!
//! This crate segments scanned two-column exam PDFs into per-question
//! images:
//! - pages are rasterized and split into columns, then stitched into one
//!   composite image in reading order
//! - whitespace gaps in the composite delimit candidate question regions
//! - each region's hand-stamped number is isolated by ink color and OCRed;
//!   regions without a valid number are discarded
//! - surviving questions are written as images plus a `metadata.json`
//!   manifest with page/column provenance

pub mod config;
pub mod detect;
pub mod error;
pub mod layout;
pub mod ocr;
pub mod output;
pub mod pdf;
pub mod pipeline;

pub use config::{Config, ImageFormat};
pub use detect::{BoundaryResolver, BoundingBox, CandidateRegion, GapDetector, GapInterval, RegionTrimmer};
pub use error::{Error, Result};
pub use layout::{ColumnImage, ColumnSide, ColumnSplitter, CompositeImage, Segment, SourceLocation};
pub use ocr::{NumberExtractor, TesseractRecognizer, TextRecognizer};
pub use output::{Manifest, OutputAssembler, QuestionRecord};
pub use pdf::{PageRasterizer, PdfInfo, PdfiumRasterizer};
pub use pipeline::{collect_pdfs, BatchOutcome, BatchSummary, FileReport, Pipeline};
