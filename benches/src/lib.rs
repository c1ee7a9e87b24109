//! Benchmark helper utilities for iconvg-rs
//!
//! This module generates synthetic IconVG files of controllable size so the
//! decode benchmarks can measure throughput without shipping binary
//! fixtures.

/// Magic identifier opening every IconVG file.
const MAGIC: [u8; 4] = [0x89, 0x49, 0x56, 0x47];

/// Encodes a small natural number in the 1-byte form.
fn nat(v: u8) -> u8 {
	v << 1
}

/// Encodes a small coordinate (-64 to 63) in the 1-byte form.
fn coord(v: i8) -> u8 {
	((v as i16 + 64) as u8) << 1
}

/// File header: magic plus an explicit 48x48 viewbox.
fn header() -> Vec<u8> {
	let mut bytes = MAGIC.to_vec();
	bytes.extend_from_slice(&[
		nat(1),
		nat(5),
		nat(0),
		coord(-24),
		coord(-24),
		coord(24),
		coord(24),
	]);
	bytes
}

/// Generates a file tracing one filled polyline with `segments` line-tos.
///
/// Segments are emitted in maximal batches of 32 per opcode, zig-zagging
/// across the viewbox, so the benchmark exercises repetition decoding the
/// way real files do.
pub fn generate_line_icon(segments: usize) -> Vec<u8> {
	let mut bytes = header();

	// Select CREG[0] and enter drawing mode at the origin.
	bytes.extend_from_slice(&[0x00, 0xC0, coord(0), coord(0)]);

	let mut remaining = segments;
	let mut i = 0i32;
	while remaining > 0 {
		let batch = remaining.min(32);
		bytes.push((batch - 1) as u8); // absolute line-to, `batch` reps
		for _ in 0..batch {
			let x = ((i * 7) % 49 - 24) as i8;
			let y = ((i * 11) % 49 - 24) as i8;
			bytes.extend_from_slice(&[coord(x), coord(y)]);
			i += 1;
		}
		remaining -= batch;
	}

	bytes.push(0xE1);
	bytes
}

/// Generates a file tracing `segments` explicit cubic Bézier segments.
pub fn generate_curve_icon(segments: usize) -> Vec<u8> {
	let mut bytes = header();
	bytes.extend_from_slice(&[0x00, 0xC0, coord(0), coord(0)]);

	let mut remaining = segments;
	let mut i = 0i32;
	while remaining > 0 {
		let batch = remaining.min(16);
		bytes.push(0xA0 + (batch - 1) as u8); // absolute cube-to, `batch` reps
		for _ in 0..batch {
			for k in 0..3 {
				let x = ((i * 5 + k * 3) % 49 - 24) as i8;
				let y = ((i * 13 + k * 7) % 49 - 24) as i8;
				bytes.extend_from_slice(&[coord(x), coord(y)]);
			}
			i += 1;
		}
		remaining -= batch;
	}

	bytes.push(0xE1);
	bytes
}

#[cfg(test)]
mod tests {
	use super::*;
	use iconvg_core::{BrokenCanvas, DecodeOptions, Rect, decode};

	#[test]
	fn test_generated_icons_decode_cleanly() {
		let dst = Rect::new(0.0, 0.0, 96.0, 96.0);
		for src in [generate_line_icon(100), generate_curve_icon(100)] {
			let mut canvas = BrokenCanvas::new(None);
			decode(&mut canvas, dst, &src, &DecodeOptions::new()).expect("synthetic icon decodes");
		}
	}
}
