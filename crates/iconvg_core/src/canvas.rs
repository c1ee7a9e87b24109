//! The drawing sink driven by the decoder.
//!
//! The decoder does not rasterize. It walks the bytecode and reports what it
//! sees to a [`Canvas`]: one `begin_decode`/`end_decode` pair around the
//! whole run, metadata notifications, then `begin_drawing`/`end_drawing`
//! brackets around each styled path. Rasterization backends implement this
//! trait; two non-rasterizing implementations live here.

use std::fmt;
use std::io::Write;

use crate::color::PremulColor;
use crate::error::Error;
use crate::geometry::Rect;
use crate::palette::Palette;

/// Result type returned by every canvas callback.
///
/// Returning an error aborts the decode; the error propagates unchanged to
/// `end_decode` and from there to the caller.
pub type CanvasResult = Result<(), Error>;

/// The paint applied to a finished drawing region.
///
/// Only flat colors are produced today; the enum is non-exhaustive because
/// the file format reserves encodings for gradient paints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Paint {
	/// A single premultiplied color covering the whole region
	FlatColor(PremulColor),
}

impl Paint {
	/// Returns the flat color, if this paint is one.
	pub fn flat_color(&self) -> Option<PremulColor> {
		match self {
			Paint::FlatColor(color) => Some(*color),
		}
	}
}

impl fmt::Display for Paint {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Paint::FlatColor(color) => write!(f, "flat_color({color})"),
		}
	}
}

/// Receiver for decoded drawing events.
///
/// Callback ordering for a successful decode:
///
/// 1. `begin_decode`
/// 2. `on_metadata_viewbox`, then `on_metadata_suggested_palette`
/// 3. zero or more drawing regions, each
///    `begin_drawing (begin_path path_* end_path) end_drawing`
/// 4. `end_decode`
///
/// Any error (from the input bytes or from a callback) skips straight to
/// `end_decode`, whose return value is what the caller of the decoder sees.
pub trait Canvas {
	/// Called once before anything else, with the destination rectangle.
	fn begin_decode(&mut self, dst_rect: Rect) -> CanvasResult;

	/// Called exactly once at the end of the decode.
	///
	/// `result` is the decode outcome so far; the returned value replaces it
	/// as the final outcome. `num_bytes_consumed` and `num_bytes_remaining`
	/// describe how far into the source the decoder got.
	fn end_decode(
		&mut self,
		result: CanvasResult,
		num_bytes_consumed: usize,
		num_bytes_remaining: usize,
	) -> CanvasResult;

	/// Opens a styled drawing region.
	fn begin_drawing(&mut self) -> CanvasResult;

	/// Closes a drawing region, supplying the paint to fill it with.
	fn end_drawing(&mut self, paint: &Paint) -> CanvasResult;

	/// Starts a path at the given point.
	fn begin_path(&mut self, x0: f32, y0: f32) -> CanvasResult;

	/// Finishes the current path.
	fn end_path(&mut self) -> CanvasResult;

	/// Straight line segment to `(x1, y1)`.
	fn path_line_to(&mut self, x1: f32, y1: f32) -> CanvasResult;

	/// Quadratic Bézier segment via `(x1, y1)` to `(x2, y2)`.
	fn path_quad_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> CanvasResult;

	/// Cubic Bézier segment via `(x1, y1)` and `(x2, y2)` to `(x3, y3)`.
	fn path_cube_to(
		&mut self,
		x1: f32,
		y1: f32,
		x2: f32,
		y2: f32,
		x3: f32,
		y3: f32,
	) -> CanvasResult;

	/// Reports the viewbox once metadata parsing has finished.
	fn on_metadata_viewbox(&mut self, viewbox: Rect) -> CanvasResult;

	/// Reports the suggested palette once metadata parsing has finished.
	fn on_metadata_suggested_palette(&mut self, palette: &Palette) -> CanvasResult;
}

/// A canvas that ignores all drawing and answers with a fixed result.
///
/// With `None` it is a pure sink: every callback succeeds and nothing is
/// recorded. This is what the decoder swaps in when level-of-detail gating
/// suppresses a drawing region. With `Some(err)` every callback fails with
/// that error, which is useful for exercising error propagation.
#[derive(Debug, Clone, Copy)]
pub struct BrokenCanvas {
	err: Option<Error>,
}

impl BrokenCanvas {
	/// Creates a canvas that returns `err` from every callback.
	pub const fn new(err: Option<Error>) -> Self {
		Self {
			err,
		}
	}

	fn result(&self) -> CanvasResult {
		match self.err {
			Some(err) => Err(err),
			None => Ok(()),
		}
	}
}

impl Canvas for BrokenCanvas {
	fn begin_decode(&mut self, _dst_rect: Rect) -> CanvasResult {
		self.result()
	}

	fn end_decode(
		&mut self,
		result: CanvasResult,
		_num_bytes_consumed: usize,
		_num_bytes_remaining: usize,
	) -> CanvasResult {
		// Without a configured error this canvas is transparent to the
		// decode outcome.
		match self.err {
			Some(err) => Err(err),
			None => result,
		}
	}

	fn begin_drawing(&mut self) -> CanvasResult {
		self.result()
	}

	fn end_drawing(&mut self, _paint: &Paint) -> CanvasResult {
		self.result()
	}

	fn begin_path(&mut self, _x0: f32, _y0: f32) -> CanvasResult {
		self.result()
	}

	fn end_path(&mut self) -> CanvasResult {
		self.result()
	}

	fn path_line_to(&mut self, _x1: f32, _y1: f32) -> CanvasResult {
		self.result()
	}

	fn path_quad_to(&mut self, _x1: f32, _y1: f32, _x2: f32, _y2: f32) -> CanvasResult {
		self.result()
	}

	fn path_cube_to(
		&mut self,
		_x1: f32,
		_y1: f32,
		_x2: f32,
		_y2: f32,
		_x3: f32,
		_y3: f32,
	) -> CanvasResult {
		self.result()
	}

	fn on_metadata_viewbox(&mut self, _viewbox: Rect) -> CanvasResult {
		self.result()
	}

	fn on_metadata_suggested_palette(&mut self, _palette: &Palette) -> CanvasResult {
		self.result()
	}
}

/// A canvas that logs every callback as a text line and forwards it.
///
/// Each call is written to the wrapped writer as
/// `{prefix}{callback}({args})`, then forwarded to the wrapped canvas when
/// one is present. Write failures on the log writer are ignored; the
/// wrapped canvas decides the returned result.
pub struct DebugCanvas<'a, W: Write> {
	writer: W,
	prefix: String,
	wrapped: Option<&'a mut dyn Canvas>,
}

impl<'a, W: Write> DebugCanvas<'a, W> {
	/// Creates a debug canvas logging to `writer`.
	pub fn new(writer: W, prefix: impl Into<String>, wrapped: Option<&'a mut dyn Canvas>) -> Self {
		Self {
			writer,
			prefix: prefix.into(),
			wrapped,
		}
	}

	/// Consumes the canvas, handing back the log writer.
	pub fn into_writer(self) -> W {
		self.writer
	}

	fn log(&mut self, line: fmt::Arguments<'_>) {
		let _ = writeln!(self.writer, "{}{}", self.prefix, line);
	}

	fn forward(&mut self, call: impl FnOnce(&mut dyn Canvas) -> CanvasResult) -> CanvasResult {
		match self.wrapped.as_deref_mut() {
			Some(canvas) => call(canvas),
			None => Ok(()),
		}
	}
}

impl<W: Write> Canvas for DebugCanvas<'_, W> {
	fn begin_decode(&mut self, dst_rect: Rect) -> CanvasResult {
		self.log(format_args!("begin_decode({dst_rect})"));
		self.forward(|c| c.begin_decode(dst_rect))
	}

	fn end_decode(
		&mut self,
		result: CanvasResult,
		num_bytes_consumed: usize,
		num_bytes_remaining: usize,
	) -> CanvasResult {
		match result {
			Ok(()) => self.log(format_args!(
				"end_decode(ok, {num_bytes_consumed}, {num_bytes_remaining})"
			)),
			Err(err) => self.log(format_args!(
				"end_decode({err}, {num_bytes_consumed}, {num_bytes_remaining})"
			)),
		}
		match self.wrapped.as_deref_mut() {
			Some(canvas) => canvas.end_decode(result, num_bytes_consumed, num_bytes_remaining),
			None => result,
		}
	}

	fn begin_drawing(&mut self) -> CanvasResult {
		self.log(format_args!("begin_drawing()"));
		self.forward(|c| c.begin_drawing())
	}

	fn end_drawing(&mut self, paint: &Paint) -> CanvasResult {
		self.log(format_args!("end_drawing({paint})"));
		self.forward(|c| c.end_drawing(paint))
	}

	fn begin_path(&mut self, x0: f32, y0: f32) -> CanvasResult {
		self.log(format_args!("begin_path({x0}, {y0})"));
		self.forward(|c| c.begin_path(x0, y0))
	}

	fn end_path(&mut self) -> CanvasResult {
		self.log(format_args!("end_path()"));
		self.forward(|c| c.end_path())
	}

	fn path_line_to(&mut self, x1: f32, y1: f32) -> CanvasResult {
		self.log(format_args!("path_line_to({x1}, {y1})"));
		self.forward(|c| c.path_line_to(x1, y1))
	}

	fn path_quad_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> CanvasResult {
		self.log(format_args!("path_quad_to({x1}, {y1}, {x2}, {y2})"));
		self.forward(|c| c.path_quad_to(x1, y1, x2, y2))
	}

	fn path_cube_to(
		&mut self,
		x1: f32,
		y1: f32,
		x2: f32,
		y2: f32,
		x3: f32,
		y3: f32,
	) -> CanvasResult {
		self.log(format_args!("path_cube_to({x1}, {y1}, {x2}, {y2}, {x3}, {y3})"));
		self.forward(|c| c.path_cube_to(x1, y1, x2, y2, x3, y3))
	}

	fn on_metadata_viewbox(&mut self, viewbox: Rect) -> CanvasResult {
		self.log(format_args!("on_metadata_viewbox({viewbox})"));
		self.forward(|c| c.on_metadata_viewbox(viewbox))
	}

	fn on_metadata_suggested_palette(&mut self, palette: &Palette) -> CanvasResult {
		self.log(format_args!("on_metadata_suggested_palette({palette})"));
		self.forward(|c| c.on_metadata_suggested_palette(palette))
	}
}
