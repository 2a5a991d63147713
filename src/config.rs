//! Pipeline configuration: defaults, TOML loading, validation

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Output image encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    #[serde(alias = "jpg")]
    Jpeg,
}

impl ImageFormat {
    /// File extension used for persisted question images.
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
        }
    }
}

/// Segmentation pipeline configuration.
///
/// Every field has a documented default; a TOML file merges over those
/// defaults, so a partial file is valid.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Page rasterization resolution.
    pub dpi: u32,
    /// Column count per page. Only 2 is supported.
    pub columns: u32,
    /// Central gutter width as a fraction of page width.
    pub column_gap_ratio: f32,
    /// Minimum whitespace run height (px) kept as an inter-question gap.
    pub min_gap_height: u32,
    /// Luma at or above this counts as a white pixel.
    pub whitespace_threshold: u8,
    /// Fraction of white pixels for a row to count as whitespace.
    pub min_white_ratio: f32,
    /// Regions shorter than this (px) are dropped without OCR.
    pub min_question_height: u32,
    /// Output encoding for question images.
    pub image_format: ImageFormat,
    /// JPEG quality (1-100); ignored for PNG.
    pub image_quality: u8,
    /// Tesseract language for number recognition.
    pub ocr_language: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dpi: 300,
            columns: 2,
            column_gap_ratio: 0.05,
            min_gap_height: 30,
            whitespace_threshold: 250,
            min_white_ratio: 0.95,
            min_question_height: 100,
            image_format: ImageFormat::Png,
            image_quality: 95,
            ocr_language: "eng".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file, merging over the defaults.
    ///
    /// An unreadable or unparsable file is a fatal configuration error;
    /// the loaded values are validated before being returned.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::Config {
            reason: format!("cannot read {}: {}", path.display(), e),
        })?;
        let config: Config = toml::from_str(&content).map_err(|e| Error::Config {
            reason: format!("cannot parse {}: {}", path.display(), e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.columns != 2 {
            return Err(Error::Config {
                reason: format!(
                    "unsupported column count {}: only 2-column layouts are supported",
                    self.columns
                ),
            });
        }
        if !(0.0..1.0).contains(&self.column_gap_ratio) {
            return Err(Error::Config {
                reason: format!(
                    "column_gap_ratio {} out of range [0, 1)",
                    self.column_gap_ratio
                ),
            });
        }
        if !(0.0..=1.0).contains(&self.min_white_ratio) || self.min_white_ratio == 0.0 {
            return Err(Error::Config {
                reason: format!("min_white_ratio {} out of range (0, 1]", self.min_white_ratio),
            });
        }
        if self.image_quality == 0 || self.image_quality > 100 {
            return Err(Error::Config {
                reason: format!("image_quality {} out of range [1, 100]", self.image_quality),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.dpi, 300);
        assert_eq!(config.columns, 2);
        assert_eq!(config.min_gap_height, 30);
        assert_eq!(config.whitespace_threshold, 250);
        assert_eq!(config.min_question_height, 100);
        assert_eq!(config.image_format, ImageFormat::Png);
        assert_eq!(config.ocr_language, "eng");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_merges_over_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "dpi = 150\nmin_gap_height = 40").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.dpi, 150);
        assert_eq!(config.min_gap_height, 40);
        // untouched keys keep their defaults
        assert_eq!(config.columns, 2);
        assert_eq!(config.whitespace_threshold, 250);
    }

    #[test]
    fn test_jpg_alias_for_jpeg() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "image_format = \"jpg\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.image_format, ImageFormat::Jpeg);
        assert_eq!(config.image_format.extension(), "jpg");
    }

    #[test]
    fn test_unknown_format_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "image_format = \"webp\"").unwrap();

        let result = Config::load(file.path());
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let result = Config::load(Path::new("/nonexistent/qslice.toml"));
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_rejects_other_column_counts() {
        let config = Config {
            columns: 3,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config { .. })));
    }

    #[test]
    fn test_rejects_out_of_range_ratios() {
        let config = Config {
            column_gap_ratio: 1.5,
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            min_white_ratio: 0.0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_quality() {
        let config = Config {
            image_quality: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
