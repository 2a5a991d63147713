//! Tesseract-backed recognition via leptess

use std::io::Cursor;

use image::GrayImage;
use leptess::{LepTess, Variable};

use crate::error::{Error, Result};

use super::TextRecognizer;

/// Uniform-block page segmentation; the corner crops hold one short line.
const PAGE_SEG_MODE: &str = "6";

/// Recognizer driving a local Tesseract installation.
///
/// `LepTess` holds mutable engine state and is not thread-safe, so a fresh
/// instance is constructed per call. The language pack is probed once at
/// construction so a missing pack fails before any page is rendered.
pub struct TesseractRecognizer {
    language: String,
}

impl TesseractRecognizer {
    pub fn new(language: &str) -> Result<Self> {
        LepTess::new(None, language).map_err(|e| Error::Ocr {
            reason: format!("cannot initialize tesseract for language '{}': {}", language, e),
        })?;
        Ok(Self {
            language: language.to_string(),
        })
    }
}

impl TextRecognizer for TesseractRecognizer {
    fn recognize(&self, image: &GrayImage, charset: Option<&str>) -> Result<String> {
        let mut engine = LepTess::new(None, &self.language).map_err(|e| Error::Ocr {
            reason: format!("cannot initialize tesseract: {}", e),
        })?;
        engine
            .set_variable(Variable::TesseditPagesegMode, PAGE_SEG_MODE)
            .map_err(|e| Error::Ocr {
                reason: format!("cannot set page segmentation mode: {}", e),
            })?;
        if let Some(charset) = charset {
            engine
                .set_variable(Variable::TesseditCharWhitelist, charset)
                .map_err(|e| Error::Ocr {
                    reason: format!("cannot set character whitelist: {}", e),
                })?;
        }

        let mut buf = Cursor::new(Vec::new());
        image.write_to(&mut buf, image::ImageFormat::Png)?;
        engine
            .set_image_from_mem(buf.get_ref())
            .map_err(|e| Error::Ocr {
                reason: format!("cannot load image into tesseract: {}", e),
            })?;

        engine.get_utf8_text().map_err(|e| Error::Ocr {
            reason: format!("recognition failed: {}", e),
        })
    }
}
