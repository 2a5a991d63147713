//! Performance benchmarks for qslice
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use image::{Rgb, RgbImage};
use qslice::{BoundaryResolver, ColumnSplitter, CompositeImage, GapDetector, RegionTrimmer};

const COLUMN_W: u32 = 1200;
const BAND_H: u32 = 350;
const GAP_H: u32 = 60;

fn fill(image: &mut RgbImage, x0: u32, x1: u32, y0: u32, y1: u32, color: Rgb<u8>) {
    for y in y0..y1 {
        for x in x0..x1 {
            image.put_pixel(x, y, color);
        }
    }
}

/// Synthetic composite column: `questions` ink bands separated by white gaps,
/// sized like a 300 dpi scan.
fn banded_composite(questions: u32) -> RgbImage {
    let height = questions * (BAND_H + GAP_H) + GAP_H;
    let mut composite = RgbImage::from_pixel(COLUMN_W, height, Rgb([255, 255, 255]));
    for q in 0..questions {
        let y0 = GAP_H + q * (BAND_H + GAP_H);
        fill(&mut composite, 40, COLUMN_W - 40, y0, y0 + BAND_H, Rgb([20, 20, 20]));
    }
    composite
}

/// Benchmark whitespace-gap scanning over composites of growing length
fn bench_gap_detection(c: &mut Criterion) {
    let mut group = c.benchmark_group("gap_detection");

    for questions in [8u32, 40] {
        let composite = banded_composite(questions);
        group.throughput(Throughput::Bytes(
            (composite.width() * composite.height() * 3) as u64,
        ));
        group.bench_with_input(
            BenchmarkId::new("scan", format!("{}_questions", questions)),
            &composite,
            |b, composite| {
                let detector = GapDetector::new(250, 0.95, 30);
                b.iter(|| {
                    let _ = detector.detect(black_box(composite));
                });
            },
        );
    }

    group.finish();
}

/// Benchmark the full gap-to-region derivation
fn bench_region_resolution(c: &mut Criterion) {
    let composite = banded_composite(40);
    let detector = GapDetector::new(250, 0.95, 30);
    let resolver = BoundaryResolver::new(30);

    c.bench_function("gaps_to_regions_40_questions", |b| {
        b.iter(|| {
            let gaps = detector.detect(black_box(&composite));
            let _ = resolver.resolve(composite.height(), &gaps);
        });
    });
}

/// Benchmark ink bounding-box trimming of a single region
fn bench_region_trimming(c: &mut Criterion) {
    let mut region = RgbImage::from_pixel(COLUMN_W, BAND_H + GAP_H, Rgb([255, 255, 255]));
    fill(&mut region, 40, COLUMN_W - 40, 30, BAND_H, Rgb([20, 20, 20]));
    let trimmer = RegionTrimmer::new(250, RegionTrimmer::DEFAULT_PADDING);

    c.bench_function("trim_region", |b| {
        b.iter(|| {
            let _ = trimmer.trim(black_box(&region));
        });
    });
}

/// Benchmark column splitting and composite stitching for a short document
fn bench_split_and_stitch(c: &mut Criterion) {
    // 300 dpi US letter page
    let page = RgbImage::from_pixel(2550, 3300, Rgb([255, 255, 255]));
    let splitter = ColumnSplitter::new(0.05);

    let mut group = c.benchmark_group("layout");
    group.throughput(Throughput::Elements(2));
    group.bench_function("split_and_stitch_2_pages", |b| {
        b.iter(|| {
            let mut columns = Vec::new();
            for page_index in 0..2 {
                columns.extend(splitter.split(black_box(&page), page_index).unwrap());
            }
            let _ = CompositeImage::stitch(&columns).unwrap();
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_gap_detection,
    bench_region_resolution,
    bench_region_trimming,
    bench_split_and_stitch,
);

criterion_main!(benches);
