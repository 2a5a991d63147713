//! Segmentation pipeline orchestration

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use image::imageops;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::detect::{BoundaryResolver, BoundingBox, GapDetector, RegionTrimmer};
use crate::error::{Error, Result};
use crate::layout::{ColumnSplitter, CompositeImage};
use crate::ocr::{NumberExtractor, TextRecognizer};
use crate::output::{Manifest, OutputAssembler};
use crate::pdf::PageRasterizer;

/// Outcome of one file's run.
#[derive(Debug)]
pub struct FileReport {
    pub manifest: Manifest,
    /// Regions dropped for having no valid question number.
    pub discarded: usize,
    pub elapsed: Duration,
}

/// Outcome of one file within a batch.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub file: String,
    /// `"ok"` or `"error"`.
    pub status: &'static str,
    pub questions: usize,
    pub error: Option<String>,
}

/// Results of a whole batch run.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub outcomes: Vec<BatchOutcome>,
}

impl BatchSummary {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.status == "ok").count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn total_questions(&self) -> usize {
        self.outcomes.iter().map(|o| o.questions).sum()
    }
}

/// PDF files directly under `dir`, optionally filtered by a glob-style
/// filename pattern, sorted by path for consistent ordering.
pub fn collect_pdfs(dir: &Path, pattern: Option<&str>) -> Result<Vec<PathBuf>> {
    let pattern = pattern
        .map(|p| {
            glob::Pattern::new(p).map_err(|e| Error::InvalidInput {
                reason: format!("invalid pattern '{}': {}", p, e),
            })
        })
        .transpose()?;

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue, // Skip entries we can't read
        };
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_pdf = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);
        if !is_pdf {
            continue;
        }
        if let Some(pattern) = &pattern {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            if !pattern.matches(&name) {
                continue;
            }
        }
        files.push(path);
    }
    files.sort();
    Ok(files)
}

/// Runs the full segmentation for one PDF at a time.
///
/// Both services are passed in explicitly; the pipeline holds no state of
/// its own across files, so identical input and configuration always produce
/// identical ids and manifest content.
pub struct Pipeline<'a> {
    config: &'a Config,
    rasterizer: &'a dyn PageRasterizer,
    recognizer: &'a dyn TextRecognizer,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        config: &'a Config,
        rasterizer: &'a dyn PageRasterizer,
        recognizer: &'a dyn TextRecognizer,
    ) -> Self {
        Self {
            config,
            rasterizer,
            recognizer,
        }
    }

    /// Process one PDF into `{output_dir}/images/` plus `metadata.json`.
    pub fn process_file(&self, pdf_path: &Path, output_dir: &Path) -> Result<FileReport> {
        self.process_file_at(pdf_path, output_dir, Utc::now())
    }

    /// Process every PDF directly under `input_dir`, writing each file's
    /// output to `output_dir/<stem>/`. A failing file is recorded in the
    /// summary and does not stop the batch.
    pub fn process_batch(
        &self,
        input_dir: &Path,
        output_dir: &Path,
        pattern: Option<&str>,
    ) -> Result<BatchSummary> {
        let files = collect_pdfs(input_dir, pattern)?;
        let mut summary = BatchSummary::default();

        for (index, path) in files.iter().enumerate() {
            let file = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| file.clone());
            info!("[{}/{}] {}", index + 1, files.len(), file);

            match self.process_file(path, &output_dir.join(stem)) {
                Ok(report) => summary.outcomes.push(BatchOutcome {
                    file,
                    status: "ok",
                    questions: report.manifest.total_questions,
                    error: None,
                }),
                Err(e) => {
                    error!("{}: {}", file, e);
                    summary.outcomes.push(BatchOutcome {
                        file,
                        status: "error",
                        questions: 0,
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        Ok(summary)
    }

    /// Same as [`process_file`](Self::process_file) with a caller-supplied
    /// manifest timestamp.
    pub fn process_file_at(
        &self,
        pdf_path: &Path,
        output_dir: &Path,
        processed_at: DateTime<Utc>,
    ) -> Result<FileReport> {
        let started = Instant::now();

        if !pdf_path.exists() {
            return Err(Error::PdfNotFound {
                path: pdf_path.display().to_string(),
            });
        }
        let is_pdf = pdf_path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);
        if !is_pdf {
            return Err(Error::InvalidInput {
                reason: format!("{} is not a PDF file", pdf_path.display()),
            });
        }
        let source_pdf = pdf_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let info = self.rasterizer.info(pdf_path)?;
        info!(
            "processing {}: {} pages, {:.0}x{:.0} pt",
            info.filename, info.page_count, info.page_width_pt, info.page_height_pt
        );
        let pages = self.rasterizer.rasterize(pdf_path, self.config.dpi)?;
        info!("rasterized {} pages at {} dpi", pages.len(), self.config.dpi);

        let splitter = ColumnSplitter::new(self.config.column_gap_ratio);
        let mut columns = Vec::with_capacity(pages.len() * 2);
        for (page_index, page) in pages.iter().enumerate() {
            columns.extend(splitter.split(page, page_index)?);
        }
        let composite = CompositeImage::stitch(&columns)?;
        debug!(
            "composite is {}x{} across {} segments",
            composite.width(),
            composite.height(),
            composite.segments().len()
        );

        let gaps = GapDetector::new(
            self.config.whitespace_threshold,
            self.config.min_white_ratio,
            self.config.min_gap_height,
        )
        .detect(&composite.image);
        let regions =
            BoundaryResolver::new(self.config.min_gap_height).resolve(composite.height(), &gaps);
        info!("{} gaps -> {} candidate regions", gaps.len(), regions.len());

        let trimmer = RegionTrimmer::new(
            self.config.whitespace_threshold,
            RegionTrimmer::DEFAULT_PADDING,
        );
        let extractor = NumberExtractor::new(self.recognizer);
        let mut assembler = OutputAssembler::new(
            &source_pdf,
            output_dir,
            self.config.image_format,
            self.config.image_quality,
        )?;
        let mut discarded = 0usize;

        for region in &regions {
            if region.height < self.config.min_question_height {
                debug!(
                    "skipping region at y={}: {}px is below the question height floor",
                    region.y, region.height
                );
                continue;
            }
            let crop = imageops::crop_imm(
                &composite.image,
                0,
                region.y,
                composite.width(),
                region.height,
            )
            .to_image();
            let trim_box = trimmer.trim(&crop);
            if trim_box.height < self.config.min_question_height {
                debug!(
                    "skipping region at y={}: {}px of ink after trimming",
                    region.y, trim_box.height
                );
                continue;
            }
            let trimmed = imageops::crop_imm(
                &crop,
                trim_box.x,
                trim_box.y,
                trim_box.width,
                trim_box.height,
            )
            .to_image();

            let number = extractor.extract(&trimmed);
            if number.is_none() {
                discarded += 1;
                debug!("no valid number in region at y={}, discarding", region.y);
                continue;
            }

            // provenance and bbox refer to the untrimmed full-width region
            let bbox = BoundingBox {
                x: 0,
                y: region.y,
                width: composite.width(),
                height: region.height,
            };
            let location = composite.locate(region.y);
            let id = assembler.add_question(&trimmed, number, location, bbox)?;
            debug!(
                "{}: number {:?} from page {}, {} column",
                id, number, location.page, location.column
            );
        }

        let total = assembler.question_count();
        let manifest = assembler.finish_at(processed_at)?;
        let elapsed = started.elapsed();
        info!(
            "{}: {} questions extracted, {} regions discarded in {:.1}s",
            source_pdf,
            total,
            discarded,
            elapsed.as_secs_f32()
        );

        Ok(FileReport {
            manifest,
            discarded,
            elapsed,
        })
    }
}
