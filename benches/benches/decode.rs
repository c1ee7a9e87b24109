//! Benchmark suite for IconVG decoding
//!
//! Measures the viewbox pre-pass and the full decode pipeline over
//! synthetic files of increasing size.
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use iconvg_benches::{generate_curve_icon, generate_line_icon};
use iconvg_core::{BrokenCanvas, DecodeOptions, Rect, decode, decode_viewbox};

const DST: Rect = Rect::new(0.0, 0.0, 96.0, 96.0);

/// Benchmark the metadata-only viewbox query
fn bench_decode_viewbox(c: &mut Criterion) {
	let data = generate_line_icon(1024);

	c.bench_function("decode_viewbox", |b| {
		b.iter(|| {
			let result = decode_viewbox(black_box(&data));
			black_box(result)
		});
	});
}

/// Benchmark full decodes of line-heavy files
fn bench_decode_lines(c: &mut Criterion) {
	let mut group = c.benchmark_group("decode_lines");

	for segments in [64usize, 1024, 16384] {
		let data = generate_line_icon(segments);
		group.throughput(Throughput::Bytes(data.len() as u64));
		group.bench_with_input(BenchmarkId::from_parameter(segments), &data, |b, data| {
			b.iter(|| {
				let mut canvas = BrokenCanvas::new(None);
				let result = decode(&mut canvas, DST, black_box(data), &DecodeOptions::new());
				black_box(result)
			});
		});
	}

	group.finish();
}

/// Benchmark full decodes of curve-heavy files
fn bench_decode_curves(c: &mut Criterion) {
	let mut group = c.benchmark_group("decode_curves");

	for segments in [64usize, 1024] {
		let data = generate_curve_icon(segments);
		group.throughput(Throughput::Bytes(data.len() as u64));
		group.bench_with_input(BenchmarkId::from_parameter(segments), &data, |b, data| {
			b.iter(|| {
				let mut canvas = BrokenCanvas::new(None);
				let result = decode(&mut canvas, DST, black_box(data), &DecodeOptions::new());
				black_box(result)
			});
		});
	}

	group.finish();
}

criterion_group!(benches, bench_decode_viewbox, bench_decode_lines, bench_decode_curves);

criterion_main!(benches);
