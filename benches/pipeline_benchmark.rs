//! Benchmarks for reportkit generation performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic requests of increasing size.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use reportkit::request::{DocumentRequest, SectionRequest, TableRequest};
use reportkit::style::{resolve, Preset, StyleOverrides};
use reportkit::{DocumentPipeline, JsonRenderer, MarkdownRenderer};

/// Creates a request with the given number of sections, each holding a table.
fn create_test_request(section_count: usize) -> DocumentRequest {
    let mut request = DocumentRequest::new("Benchmark Report");
    for i in 0..section_count {
        let rows: Vec<Vec<String>> = (0..20)
            .map(|r| vec![format!("Item {r}"), format!("{}", r * 10), format!("{}", i)])
            .collect();
        request = request.with_section(
            SectionRequest::new(format!("Section {}", i + 1))
                .with_content("Benchmark paragraph content for section rendering.")
                .with_table(TableRequest::new(
                    ["Name", "Value", "Section"].map(String::from),
                    rows,
                )),
        );
    }
    request
}

/// Benchmark style resolution.
fn bench_style_resolution(c: &mut Criterion) {
    let overrides = StyleOverrides::new()
        .with_primary_color("#003366")
        .with_font_size(11.0)
        .with_margins(50.0, 50.0, 60.0, 60.0);

    c.bench_function("resolve_overrides", |b| {
        b.iter(|| resolve(black_box(Preset::Professional.style()), black_box(&overrides)).unwrap());
    });

    c.bench_function("resolve_empty", |b| {
        let empty = StyleOverrides::new();
        b.iter(|| resolve(black_box(Preset::Default.style()), black_box(&empty)).unwrap());
    });
}

/// Benchmark request parsing.
fn bench_request_parsing(c: &mut Criterion) {
    let json = serde_json::to_string(&create_test_request(10)).unwrap();

    c.bench_function("parse_request_10_sections", |b| {
        b.iter(|| DocumentRequest::from_json(black_box(&json)).unwrap());
    });
}

/// Benchmark full generation at various sizes.
fn bench_generation(c: &mut Criterion) {
    let markdown = DocumentPipeline::new(MarkdownRenderer::default());
    let json = DocumentPipeline::new(JsonRenderer::new());
    let mut group = c.benchmark_group("generation");

    for section_count in [1, 10, 50].iter() {
        let request = create_test_request(*section_count);

        group.bench_function(format!("markdown_{}_sections", section_count), |b| {
            b.iter(|| markdown.execute(black_box(&request)).unwrap());
        });

        group.bench_function(format!("json_{}_sections", section_count), |b| {
            b.iter(|| json.execute(black_box(&request)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark parallel batch generation.
fn bench_batch(c: &mut Criterion) {
    let pipeline = DocumentPipeline::new(MarkdownRenderer::default());
    let requests: Vec<DocumentRequest> = (0..32).map(|_| create_test_request(5)).collect();

    c.bench_function("batch_32_documents", |b| {
        b.iter(|| pipeline.execute_batch(black_box(&requests)));
    });
}

criterion_group!(
    benches,
    bench_style_resolution,
    bench_request_parsing,
    bench_generation,
    bench_batch,
);
criterion_main!(benches);
