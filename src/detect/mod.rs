//! Whitespace-gap detection and question-region extraction

mod gaps;
mod regions;
mod trim;

pub use gaps::GapDetector;
pub use regions::BoundaryResolver;
pub use trim::RegionTrimmer;

use image::Rgb;
use serde::{Deserialize, Serialize};

/// Half-open run `[start_y, end_y)` of whitespace rows in the composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GapInterval {
    pub start_y: u32,
    pub end_y: u32,
}

impl GapInterval {
    pub fn height(&self) -> u32 {
        self.end_y - self.start_y
    }
}

/// Full-width composite slice hypothesized to hold one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateRegion {
    pub y: u32,
    pub height: u32,
}

/// Axis-aligned pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Integer Rec. 601 luma: `(299R + 587G + 114B) / 1000`.
pub(crate) fn luma(px: &Rgb<u8>) -> u8 {
    let Rgb([r, g, b]) = *px;
    ((299 * r as u32 + 587 * g as u32 + 114 * b as u32) / 1000) as u8
}
