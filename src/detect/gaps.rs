//! Whitespace row scanning

use image::RgbImage;

use super::{luma, GapInterval};

/// Finds horizontal bands of near-white rows in a composite image.
pub struct GapDetector {
    whitespace_threshold: u8,
    min_white_ratio: f32,
    min_gap_height: u32,
}

impl GapDetector {
    pub fn new(whitespace_threshold: u8, min_white_ratio: f32, min_gap_height: u32) -> Self {
        Self {
            whitespace_threshold,
            min_white_ratio,
            min_gap_height,
        }
    }

    /// Scan every row once and return qualifying gap runs in ascending order.
    ///
    /// A row counts as whitespace when at least `min_white_ratio` of its
    /// pixels have luma at or above `whitespace_threshold`; consecutive
    /// whitespace rows form a run, kept when at least `min_gap_height` tall.
    /// A run touching the bottom edge is kept under the same rule.
    pub fn detect(&self, image: &RgbImage) -> Vec<GapInterval> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Vec::new();
        }

        let mut gaps = Vec::new();
        let mut run_start: Option<u32> = None;
        for (y, row) in image.rows().enumerate() {
            let y = y as u32;
            let white = row
                .filter(|&px| luma(px) >= self.whitespace_threshold)
                .count();
            let is_white_row = white as f32 / width as f32 >= self.min_white_ratio;

            match (is_white_row, run_start) {
                (true, None) => run_start = Some(y),
                (false, Some(start)) => {
                    if y - start >= self.min_gap_height {
                        gaps.push(GapInterval {
                            start_y: start,
                            end_y: y,
                        });
                    }
                    run_start = None;
                }
                _ => {}
            }
        }
        if let Some(start) = run_start {
            if height - start >= self.min_gap_height {
                gaps.push(GapInterval {
                    start_y: start,
                    end_y: height,
                });
            }
        }
        gaps
    }
}
