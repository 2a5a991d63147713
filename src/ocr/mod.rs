//! Question-number recognition
//!
//! Text recognition sits behind the [`TextRecognizer`] trait so the pipeline
//! can be driven without a Tesseract installation in tests.

mod engine;
mod number;

pub use engine::TesseractRecognizer;
pub use number::{validate_number, NumberExtractor};

use image::GrayImage;

use crate::error::Result;

/// Text recognition over a prepared grayscale image.
pub trait TextRecognizer {
    /// Recognize text in `image`. When `charset` is given, recognition is
    /// restricted to those characters.
    fn recognize(&self, image: &GrayImage, charset: Option<&str>) -> Result<String>;
}
