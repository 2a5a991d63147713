//! qslice - Entry point
//!
//! Segments scanned two-column exam PDFs into per-question images.

use std::path::{Path, PathBuf};

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use qslice::{Config, PdfiumRasterizer, Pipeline, TesseractRecognizer};

#[derive(Parser)]
#[command(
    name = "qslice",
    version,
    about = "Segment scanned two-column exam PDFs into per-question images"
)]
struct Args {
    /// PDF file, or a directory of PDFs in batch mode
    input: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Process every PDF in the input directory
    #[arg(long)]
    batch: bool,

    /// Filename filter for batch mode (e.g. "mock*.pdf")
    #[arg(long)]
    pattern: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let default_filter = if args.verbose {
        "qslice=debug"
    } else {
        "qslice=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if !args.input.exists() {
        anyhow::bail!("input path not found: {}", args.input.display());
    }
    if args.batch && args.input.is_file() {
        anyhow::bail!("--batch requires a directory input");
    }

    let rasterizer = PdfiumRasterizer::new()?;
    let recognizer = TesseractRecognizer::new(&config.ocr_language)?;
    let pipeline = Pipeline::new(&config, &rasterizer, &recognizer);

    if args.batch || args.input.is_dir() {
        run_batch(&pipeline, &args.input, &args.output, args.pattern.as_deref())
    } else {
        run_single(&pipeline, &args.input, &args.output)
    }
}

fn run_single(pipeline: &Pipeline, input: &Path, output: &Path) -> anyhow::Result<()> {
    let report = pipeline.process_file(input, output)?;
    println!(
        "{}: {} questions -> {} ({} regions discarded, {:.1}s)",
        report.manifest.source_pdf,
        report.manifest.total_questions,
        output.display(),
        report.discarded,
        report.elapsed.as_secs_f32()
    );
    Ok(())
}

/// Per-file failures are reported in the summary but never change the
/// process exit code; only an unreadable input directory or an invalid
/// pattern is fatal.
fn run_batch(
    pipeline: &Pipeline,
    input_dir: &Path,
    output_dir: &Path,
    pattern: Option<&str>,
) -> anyhow::Result<()> {
    let summary = pipeline.process_batch(input_dir, output_dir, pattern)?;

    if summary.outcomes.is_empty() {
        println!("No PDF files found in {}", input_dir.display());
        return Ok(());
    }

    println!(
        "{}/{} files processed, {} questions total",
        summary.succeeded(),
        summary.outcomes.len(),
        summary.total_questions()
    );
    for outcome in summary.outcomes.iter().filter(|o| o.status == "error") {
        if let Some(error) = &outcome.error {
            println!("  {}: {}", outcome.file, error);
        }
    }
    Ok(())
}
