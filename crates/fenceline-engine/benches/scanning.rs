use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use fenceline_engine::{Document, scan_document};
use pulldown_cmark::Parser;
use std::hint::black_box;
mod common;

fn bench_scan_vs_pulldown(c: &mut Criterion) {
    let mut group = c.benchmark_group("scanning");
    group.sample_size(10);

    for sections in [10, 100, 1000] {
        let content = common::generate_notebook(sections);
        group.bench_with_input(
            BenchmarkId::new("scan_document", sections),
            &content,
            |b, content| b.iter(|| black_box(scan_document(black_box(content)))),
        );
        group.bench_with_input(
            BenchmarkId::new("pulldown_cmark", sections),
            &content,
            |b, content| {
                b.iter(|| {
                    let events: Vec<_> = Parser::new(black_box(content)).collect();
                    black_box(events);
                })
            },
        );
    }

    group.finish();
}

fn bench_deep_nesting(c: &mut Criterion) {
    let content = common::generate_deep_nesting(200);
    c.bench_function("deep_nesting_200", |b| {
        b.iter(|| black_box(scan_document(black_box(&content))))
    });
}

fn bench_edit_rescan(c: &mut Criterion) {
    let content = common::generate_notebook(100);
    c.bench_function("edit_then_rescan", |b| {
        let mut doc = Document::new(&content);
        b.iter(|| {
            doc.insert(0, "x");
            black_box(doc.scan().code_blocks.len());
            doc.delete(0..1);
        })
    });
}

criterion_group!(
    benches,
    bench_scan_vs_pulldown,
    bench_deep_nesting,
    bench_edit_rescan
);
criterion_main!(benches);
