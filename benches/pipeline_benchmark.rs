//! Benchmarks for the reconstruction pipeline.
//!
//! Run with: cargo bench
//!
//! These benchmarks exercise the layout and assembly hot paths with
//! synthetic page content.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use redocx::{layout, ContentItem, DocMetadata, PackageAssembler, TextItem};

/// Fragmented runs spread over `lines` text lines, `runs_per_line` runs
/// each, the way extraction typically splits a justified paragraph.
fn synthetic_items(lines: usize, runs_per_line: usize) -> Vec<ContentItem> {
    let mut items = Vec::with_capacity(lines * runs_per_line);
    for line in 0..lines {
        let y = 720.0 - line as f32 * 14.0;
        for run in 0..runs_per_line {
            let x = 72.0 + run as f32 * 36.0;
            items.push(ContentItem::Text(TextItem {
                text: format!("run{run}"),
                x,
                y,
                width: 30.0,
                font_size: 12.0,
                bold: false,
                italic: false,
            }));
        }
    }
    items
}

fn bench_reconstruct(c: &mut Criterion) {
    let items = synthetic_items(200, 12);
    c.bench_function("reconstruct 2400 runs", |b| {
        b.iter(|| layout::reconstruct(black_box(items.clone())))
    });
}

fn bench_assemble(c: &mut Criterion) {
    let blocks = layout::reconstruct(synthetic_items(200, 12));
    let metadata = DocMetadata::default();
    c.bench_function("assemble 200 blocks", |b| {
        b.iter(|| {
            PackageAssembler::new()
                .assemble(black_box(blocks.clone()), &metadata)
                .unwrap()
        })
    });
}

fn bench_sort(c: &mut Criterion) {
    let items = synthetic_items(500, 8);
    c.bench_function("sort 4000 items", |b| {
        b.iter(|| layout::sort_reading_order(black_box(items.clone())))
    });
}

criterion_group!(benches, bench_reconstruct, bench_assemble, bench_sort);
criterion_main!(benches);
