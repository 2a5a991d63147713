//! Question image persistence and manifest assembly

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ImageFormat;
use crate::detect::BoundingBox;
use crate::error::Result;
use crate::layout::{ColumnSide, SourceLocation};

/// One extracted question in the manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// Unique id in discovery order: `q001`, `q002`, ...
    pub id: String,
    /// Validated question number; null when absent by schema, though the
    /// pipeline only emits numbered questions.
    pub number: Option<u32>,
    /// Theme label; assignment belongs to downstream tooling.
    pub theme: Option<String>,
    /// Image location relative to the output directory.
    pub image_path: String,
    /// 1-based source page numbers.
    pub source_pages: Vec<usize>,
    pub column: ColumnSide,
    /// Region bounds in composite-image coordinates, pre-trim.
    pub bbox: BoundingBox,
}

/// Per-file processing manifest, written once as `metadata.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub source_pdf: String,
    pub processed_at: DateTime<Utc>,
    pub total_questions: usize,
    pub questions: Vec<QuestionRecord>,
}

/// Collects question images and records for one file, then writes the
/// manifest exactly once.
///
/// Records accumulate in memory until [`finish`](Self::finish); a failure
/// mid-file therefore never leaves a partial `metadata.json` behind.
pub struct OutputAssembler {
    source_pdf: String,
    output_dir: PathBuf,
    images_dir: PathBuf,
    format: ImageFormat,
    quality: u8,
    records: Vec<QuestionRecord>,
}

impl OutputAssembler {
    /// Prepare `{output_dir}/images/` for one source file.
    pub fn new(
        source_pdf: &str,
        output_dir: &Path,
        format: ImageFormat,
        quality: u8,
    ) -> Result<Self> {
        let images_dir = output_dir.join("images");
        fs::create_dir_all(&images_dir)?;
        Ok(Self {
            source_pdf: source_pdf.to_string(),
            output_dir: output_dir.to_path_buf(),
            images_dir,
            format,
            quality,
            records: Vec::new(),
        })
    }

    /// Persist one question image and queue its manifest record.
    ///
    /// Ids run `q001`, `q002`, ... in call order; returns the assigned id.
    pub fn add_question(
        &mut self,
        image: &RgbImage,
        number: Option<u32>,
        location: SourceLocation,
        bbox: BoundingBox,
    ) -> Result<String> {
        let id = format!("q{:03}", self.records.len() + 1);
        let filename = format!("{}.{}", id, self.format.extension());
        let path = self.images_dir.join(&filename);
        self.write_image(image, &path)?;
        debug!("wrote {} ({}x{})", path.display(), image.width(), image.height());

        self.records.push(QuestionRecord {
            id: id.clone(),
            number,
            theme: None,
            image_path: format!("images/{}", filename),
            source_pages: vec![location.page],
            column: location.column,
            bbox,
        });
        Ok(id)
    }

    pub fn question_count(&self) -> usize {
        self.records.len()
    }

    /// Write the manifest with the current time.
    pub fn finish(self) -> Result<Manifest> {
        self.finish_at(Utc::now())
    }

    /// Write the manifest with an injected timestamp.
    ///
    /// Apart from `processed_at`, identical inputs produce byte-identical
    /// manifests; pinning the timestamp makes the whole file reproducible.
    pub fn finish_at(self, processed_at: DateTime<Utc>) -> Result<Manifest> {
        let manifest = Manifest {
            source_pdf: self.source_pdf,
            processed_at,
            total_questions: self.records.len(),
            questions: self.records,
        };
        let json = serde_json::to_string_pretty(&manifest)?;
        fs::write(self.output_dir.join("metadata.json"), json)?;
        Ok(manifest)
    }

    fn write_image(&self, image: &RgbImage, path: &Path) -> Result<()> {
        match self.format {
            ImageFormat::Png => image.save_with_format(path, image::ImageFormat::Png)?,
            ImageFormat::Jpeg => {
                let file = File::create(path)?;
                let mut writer = BufWriter::new(file);
                let encoder = JpegEncoder::new_with_quality(&mut writer, self.quality);
                image.write_with_encoder(encoder)?;
            }
        }
        Ok(())
    }
}
