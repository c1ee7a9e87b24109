//! Decoding entry points.
//!
//! [`decode`] runs the full pipeline against a caller-supplied canvas;
//! [`decode_viewbox`] is a cheap pre-pass answering only "how big is this
//! graphic", for callers that size a destination before rendering.
//!
//! A decode is single-threaded and synchronous, borrows the source bytes
//! and the canvas for its duration, and keeps no state across calls. The
//! only early exit is an error: either the input violating the format or a
//! canvas callback failing. Whatever already reached the canvas before the
//! error stays; nothing is rolled back.

mod drawing;
mod metadata;
mod state;
mod styling;

use log::debug;

use crate::canvas::Canvas;
use crate::cursor::Cursor;
use crate::error::Result;
use crate::geometry::Rect;
use crate::palette::Palette;

pub use metadata::DEFAULT_VIEWBOX;

use state::DecodeState;

/// Caller knobs for [`decode`].
#[derive(Debug, Clone, Default)]
pub struct DecodeOptions {
	/// Overrides the height-in-pixels derived from the destination
	/// rectangle; the level-of-detail opcodes test against this value.
	pub height_in_pixels: Option<u32>,

	/// Replaces the file's suggested palette for drawing. The
	/// `on_metadata_suggested_palette` notification still reports what the
	/// file carried.
	pub palette: Option<Palette>,
}

impl DecodeOptions {
	/// Creates the default options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets an explicit height-in-pixels for level-of-detail gating.
	pub fn with_height_in_pixels(mut self, height: u32) -> Self {
		self.height_in_pixels = Some(height);
		self
	}

	/// Sets a caller palette overriding the file's suggested palette.
	pub fn with_palette(mut self, palette: Palette) -> Self {
		self.palette = Some(palette);
		self
	}
}

/// Decodes IconVG bytes, reporting drawing events to `canvas`.
///
/// Graphic coordinates are mapped onto `dst_rect`. The decode is bracketed
/// by `begin_decode` and `end_decode` on the canvas; the value returned by
/// `end_decode` is the value returned here.
pub fn decode(
	canvas: &mut dyn Canvas,
	dst_rect: Rect,
	src: &[u8],
	options: &DecodeOptions,
) -> Result<()> {
	let mut cursor = Cursor::new(src);
	let result = decode_inner(canvas, dst_rect, &mut cursor, options);
	canvas.end_decode(result, cursor.consumed(), cursor.remaining())
}

fn decode_inner(
	canvas: &mut dyn Canvas,
	dst_rect: Rect,
	cursor: &mut Cursor<'_>,
	options: &DecodeOptions,
) -> Result<()> {
	canvas.begin_decode(dst_rect)?;

	let metadata = metadata::parse(cursor)?;
	canvas.on_metadata_viewbox(metadata.viewbox)?;
	canvas.on_metadata_suggested_palette(&metadata.suggested_palette)?;

	let palette = options.palette.unwrap_or(metadata.suggested_palette);
	let mut state = DecodeState::new(dst_rect, metadata.viewbox, palette, options.height_in_pixels);
	debug!(
		"metadata parsed: viewbox {}, height {} px, {} bytecode bytes follow",
		state.viewbox,
		state.height_in_pixels,
		cursor.remaining()
	);
	styling::run(cursor, &mut state, canvas)
}

/// Reads the ViewBox out of IconVG bytes without decoding the graphic.
///
/// Validates the magic identifier, the metadata framing and the chunk ID
/// ordering, but skips chunks a viewbox query does not need. Files without
/// a ViewBox chunk get the default `(-32, -32, 32, 32)`.
pub fn decode_viewbox(src: &[u8]) -> Result<Rect> {
	metadata::parse_viewbox(&mut Cursor::new(src))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::canvas::{BrokenCanvas, DebugCanvas};
	use crate::error::Error;

	const MAGIC: [u8; 4] = [0x89, 0x49, 0x56, 0x47];

	fn minimal_file() -> Vec<u8> {
		let mut bytes = MAGIC.to_vec();
		bytes.push(0); // zero metadata chunks
		bytes
	}

	#[test]
	fn test_decode_viewbox_default() {
		assert_eq!(decode_viewbox(&minimal_file()), Ok(DEFAULT_VIEWBOX));
	}

	#[test]
	fn test_decode_viewbox_bad_magic() {
		assert_eq!(decode_viewbox(&[0, 0, 0, 0]).unwrap_err(), Error::BadMagicIdentifier);
	}

	#[test_log::test]
	fn test_minimal_decode_callback_sequence() {
		let mut canvas = DebugCanvas::new(Vec::new(), "", None);
		decode(
			&mut canvas,
			Rect::new(0.0, 0.0, 64.0, 64.0),
			&minimal_file(),
			&DecodeOptions::new(),
		)
		.unwrap();

		let log = String::from_utf8(canvas.into_writer()).unwrap();
		let lines: Vec<&str> = log.lines().collect();
		assert_eq!(
			lines,
			[
				"begin_decode((0, 0) - (64, 64))",
				"on_metadata_viewbox((-32, -32) - (32, 32))",
				"on_metadata_suggested_palette(Palette: 0 of 64 entries non-default)",
				"end_decode(ok, 5, 0)",
			]
		);
	}

	#[test_log::test]
	fn test_decode_error_reaches_end_decode() {
		let mut canvas = DebugCanvas::new(Vec::new(), "", None);
		let result = decode(&mut canvas, Rect::ZERO, &[0x12, 0x34], &DecodeOptions::new());
		assert_eq!(result.unwrap_err(), Error::BadMagicIdentifier);

		let log = String::from_utf8(canvas.into_writer()).unwrap();
		assert!(log.lines().last().unwrap().starts_with("end_decode(bad magic identifier"));
	}

	#[test]
	fn test_canvas_error_aborts_decode() {
		let mut canvas = BrokenCanvas::new(Some(Error::SystemFailureOutOfMemory));
		let result =
			decode(&mut canvas, Rect::ZERO, &minimal_file(), &DecodeOptions::new());
		assert_eq!(result.unwrap_err(), Error::SystemFailureOutOfMemory);
	}
}
