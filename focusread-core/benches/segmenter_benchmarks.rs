//! Performance benchmarks for segmentation and block styling
//!
//! Run with: cargo bench --bench segmenter_benchmarks

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use focusread_core::{segment, FeatureFlags, StyledBlock};
use std::hint::black_box;

/// Generate test text of specified size
fn generate_text(size: usize) -> String {
    let base_sentence = "This is a test sentence with some reasonable length. ";
    let repeat_count = size / base_sentence.len() + 1;

    let mut text = base_sentence.repeat(repeat_count);
    text.truncate(size);
    text
}

fn bench_segment(c: &mut Criterion) {
    let mut group = c.benchmark_group("segment");

    for size in [256, 4096, 65_536] {
        let text = generate_text(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("segment", size), &text, |b, text| {
            b.iter(|| segment(black_box(text)).len());
        });
    }

    group.finish();
}

fn bench_build_block(c: &mut Criterion) {
    let mut group = c.benchmark_group("styled_block");
    let flags = FeatureFlags::default();

    for size in [256, 4096, 65_536] {
        let text = generate_text(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("build", size), &text, |b, text| {
            b.iter(|| StyledBlock::build(black_box(text), 0, flags).to_html());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_segment, bench_build_block);
criterion_main!(benches);
