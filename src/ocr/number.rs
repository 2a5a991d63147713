//! Ink isolation and question-number validation

use std::ops::RangeInclusive;

use image::{GrayImage, Luma, Rgb, RgbImage};
use tracing::debug;

use super::TextRecognizer;

/// Corner crop bounds for the number stamp.
const CORNER_WIDTH: u32 = 150;
const CORNER_HEIGHT: u32 = 100;

/// Annotation-pen color window in HSV, hue on the 0-179 scale.
const HUE_RANGE: RangeInclusive<u8> = 70..=105;
const SAT_RANGE: RangeInclusive<u8> = 20..=255;
const VAL_RANGE: RangeInclusive<u8> = 50..=255;

const DIGIT_CHARSET: &str = "0123456789";

/// Reads the hand-stamped question number out of a region's top-left corner.
///
/// Question numbers are marked with an annotation pen in a known color; the
/// extractor isolates that color, hands the mask to the recognizer, and
/// validates the result. A region without a valid number is reported as
/// `None` for the caller to discard, never guessed.
pub struct NumberExtractor<'a> {
    recognizer: &'a dyn TextRecognizer,
}

impl<'a> NumberExtractor<'a> {
    pub fn new(recognizer: &'a dyn TextRecognizer) -> Self {
        Self { recognizer }
    }

    /// OCR a validated question number from the region's top-left corner.
    ///
    /// Recognition runs digit-constrained first; on an engine failure it
    /// retries once unconstrained. Engine failures on both attempts are
    /// treated the same as unreadable text.
    pub fn extract(&self, region: &RgbImage) -> Option<u32> {
        let masked = isolate_ink(region);

        let text = match self.recognizer.recognize(&masked, Some(DIGIT_CHARSET)) {
            Ok(text) => text,
            Err(e) => {
                debug!("constrained recognition failed, retrying unconstrained: {}", e);
                match self.recognizer.recognize(&masked, None) {
                    Ok(text) => text,
                    Err(e) => {
                        debug!("recognition failed: {}", e);
                        return None;
                    }
                }
            }
        };
        validate_number(&text)
    }
}

/// Corner crop with the annotation-pen color isolated, rendered as dark ink
/// on a white background.
fn isolate_ink(region: &RgbImage) -> GrayImage {
    let corner_w = region.width().min(CORNER_WIDTH);
    let corner_h = region.height().min(CORNER_HEIGHT);

    let mut mask = GrayImage::from_pixel(corner_w, corner_h, Luma([255]));
    for y in 0..corner_h {
        for x in 0..corner_w {
            let (h, s, v) = rgb_to_hsv(region.get_pixel(x, y));
            if HUE_RANGE.contains(&h) && SAT_RANGE.contains(&s) && VAL_RANGE.contains(&v) {
                mask.put_pixel(x, y, Luma([0]));
            }
        }
    }
    mask
}

/// First maximal contiguous digit run in `text`, parsed and accepted only in
/// `[1, 999]`. Anything else is no number.
pub fn validate_number(text: &str) -> Option<u32> {
    let digits: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return None;
    }
    let number = digits.parse::<u32>().ok()?;
    (1..=999).contains(&number).then_some(number)
}

/// RGB to HSV with hue halved onto the 0-179 scale, saturation and value on
/// 0-255. The color window constants above are calibrated to this scale.
fn rgb_to_hsv(px: &Rgb<u8>) -> (u8, u8, u8) {
    let Rgb([r, g, b]) = *px;
    let (rf, gf, bf) = (r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let delta = max - min;

    let mut hue = if delta == 0.0 {
        0.0
    } else if max == rf {
        60.0 * ((gf - bf) / delta)
    } else if max == gf {
        60.0 * ((bf - rf) / delta) + 120.0
    } else {
        60.0 * ((rf - gf) / delta) + 240.0
    };
    if hue < 0.0 {
        hue += 360.0;
    }
    let saturation = if max == 0.0 { 0.0 } else { delta / max };

    (
        (hue / 2.0).round() as u8,
        (saturation * 255.0).round() as u8,
        (max * 255.0).round() as u8,
    )
}
