//! Drawing-mode interpreter.
//!
//! One invocation covers one paint region: it opens with `begin_drawing`
//! and `begin_path`, walks path opcodes until the `z` terminator, then
//! closes with `end_path` and `end_drawing` and returns to styling mode.
//!
//! Path state is tracked in graphic space and transformed per coordinate on
//! emission. Besides the current point, the interpreter keeps the smooth
//! control point: the reflection of the previous segment's last control
//! point through the current point. Smooth quadratic and cubic opcodes use
//! it as their implicit first control; line and arc segments reset it to
//! the current point.
//!
//! ## Opcode map
//!
//! | Range       | Command (SVG mnemonic)                 | Repetitions    |
//! |-------------|----------------------------------------|----------------|
//! | `0x00-0x1F` | absolute line-to (`L`)                 | `(op&0x1F)+1`  |
//! | `0x20-0x3F` | relative line-to (`l`)                 | `(op&0x1F)+1`  |
//! | `0x40-0x5F` | smooth quadratic (`T`/`t`)             | `(op&0x0F)+1`  |
//! | `0x60-0x7F` | quadratic (`Q`/`q`)                    | `(op&0x0F)+1`  |
//! | `0x80-0x9F` | smooth cubic (`S`/`s`)                 | `(op&0x0F)+1`  |
//! | `0xA0-0xBF` | cubic (`C`/`c`)                        | `(op&0x0F)+1`  |
//! | `0xC0-0xDF` | elliptical arc (`A`/`a`)               | `(op&0x0F)+1`  |
//! | `0xE1`      | `z`, end the region                    |                |
//! | `0xE2-0xE3` | `z; M` / `z; m`, next subpath          |                |
//! | `0xE6-0xE9` | `H`/`h`/`V`/`v`                        |                |
//!
//! Anything else is an error, as is running out of bytes anywhere in this
//! mode.

use std::f32::consts::TAU;

use crate::arc::arc_to;
use crate::canvas::{Canvas, CanvasResult, Paint};
use crate::cursor::Cursor;
use crate::error::{Error, Result};
use crate::number::{decode_coordinate, decode_natural, decode_zero_to_one};

use super::state::DecodeState;

/// Path bookkeeping in graphic space.
struct PathState {
	/// Current point
	curr: (f32, f32),
	/// Implicit first control for the next smooth curve
	smooth: (f32, f32),
}

impl PathState {
	fn new(start: (f32, f32)) -> Self {
		Self {
			curr: start,
			smooth: start,
		}
	}

	/// Moves to `end` after a segment whose last control point was `ctrl`.
	fn advance(&mut self, ctrl: (f32, f32), end: (f32, f32)) {
		self.smooth = (2.0 * end.0 - ctrl.0, 2.0 * end.1 - ctrl.1);
		self.curr = end;
	}

	/// Moves to `end` after a segment with no control point.
	fn advance_flat(&mut self, end: (f32, f32)) {
		self.curr = end;
		self.smooth = end;
	}
}

/// A truncated read inside drawing mode means the path never finished.
fn coordinate(cursor: &mut Cursor<'_>) -> Result<f32> {
	decode_coordinate(cursor).map_err(|_| Error::BadPathUnfinished)
}

/// Executes one drawing region and returns once styling mode resumes.
pub(crate) fn run(
	cursor: &mut Cursor<'_>,
	state: &DecodeState,
	canvas: &mut dyn Canvas,
	paint: &Paint,
	start: (f32, f32),
) -> Result<()> {
	let tf = &state.forward;
	let mut path = PathState::new(start);

	canvas.begin_drawing()?;
	let (x0, y0) = tf.apply(start.0, start.1);
	canvas.begin_path(x0, y0)?;

	loop {
		let op = cursor.read_u8().ok_or(Error::BadPathUnfinished)?;
		match op {
			// Line-to, absolute and relative.
			0x00..=0x3F => {
				let relative = op >= 0x20;
				for _ in 0..(op & 0x1F) + 1 {
					let mut x = coordinate(cursor)?;
					let mut y = coordinate(cursor)?;
					if relative {
						x += path.curr.0;
						y += path.curr.1;
					}
					let (lx, ly) = tf.apply(x, y);
					canvas.path_line_to(lx, ly)?;
					path.advance_flat((x, y));
				}
			}
			// Quadratics: smooth (implicit control) and explicit.
			0x40..=0x7F => {
				let smooth = op < 0x60;
				let relative = op & 0x10 != 0;
				for _ in 0..(op & 0x0F) + 1 {
					let ctrl = if smooth {
						path.smooth
					} else {
						let cx = coordinate(cursor)?;
						let cy = coordinate(cursor)?;
						offset_if(relative, (cx, cy), path.curr)
					};
					let x = coordinate(cursor)?;
					let y = coordinate(cursor)?;
					let end = offset_if(relative, (x, y), path.curr);

					emit_quad(canvas, state, ctrl, end)?;
					path.advance(ctrl, end);
				}
			}
			// Cubics: smooth (implicit first control) and explicit.
			0x80..=0xBF => {
				let smooth = op < 0xA0;
				let relative = op & 0x10 != 0;
				for _ in 0..(op & 0x0F) + 1 {
					let ctrl1 = if smooth {
						path.smooth
					} else {
						let cx = coordinate(cursor)?;
						let cy = coordinate(cursor)?;
						offset_if(relative, (cx, cy), path.curr)
					};
					let cx = coordinate(cursor)?;
					let cy = coordinate(cursor)?;
					let ctrl2 = offset_if(relative, (cx, cy), path.curr);
					let x = coordinate(cursor)?;
					let y = coordinate(cursor)?;
					let end = offset_if(relative, (x, y), path.curr);

					emit_cube(canvas, state, ctrl1, ctrl2, end)?;
					path.advance(ctrl2, end);
				}
			}
			// Elliptical arcs.
			0xC0..=0xDF => {
				let relative = op & 0x10 != 0;
				for _ in 0..(op & 0x0F) + 1 {
					let rx = coordinate(cursor)?;
					let ry = coordinate(cursor)?;
					let rotation =
						decode_zero_to_one(cursor).map_err(|_| Error::BadPathUnfinished)?;
					let flags =
						decode_natural(cursor).map_err(|_| Error::BadPathUnfinished)?;
					let x = coordinate(cursor)?;
					let y = coordinate(cursor)?;
					let end = offset_if(relative, (x, y), path.curr);

					arc_to(
						canvas,
						tf,
						path.curr.0,
						path.curr.1,
						rx,
						ry,
						rotation * TAU,
						flags & 0x01 != 0,
						flags & 0x02 != 0,
						end.0,
						end.1,
					)?;
					path.advance_flat(end);
				}
			}
			// z: close out the region, back to styling mode.
			0xE1 => {
				canvas.end_path()?;
				canvas.end_drawing(paint)?;
				return Ok(());
			}
			// z followed by a move-to: next subpath of the same region.
			0xE2 | 0xE3 => {
				canvas.end_path()?;
				let x = coordinate(cursor)?;
				let y = coordinate(cursor)?;
				let next = offset_if(op == 0xE3, (x, y), path.curr);
				let (px, py) = tf.apply(next.0, next.1);
				canvas.begin_path(px, py)?;
				path = PathState::new(next);
			}
			// Axis-aligned line-to variants.
			0xE6..=0xE9 => {
				let value = coordinate(cursor)?;
				let end = match op {
					0xE6 => (value, path.curr.1),
					0xE7 => (path.curr.0 + value, path.curr.1),
					0xE8 => (path.curr.0, value),
					_ => (path.curr.0, path.curr.1 + value),
				};
				let (lx, ly) = tf.apply(end.0, end.1);
				canvas.path_line_to(lx, ly)?;
				path.advance_flat(end);
			}
			_ => return Err(Error::BadDrawingOpcode),
		}
	}
}

fn offset_if(relative: bool, point: (f32, f32), origin: (f32, f32)) -> (f32, f32) {
	if relative {
		(origin.0 + point.0, origin.1 + point.1)
	} else {
		point
	}
}

fn emit_quad(
	canvas: &mut dyn Canvas,
	state: &DecodeState,
	ctrl: (f32, f32),
	end: (f32, f32),
) -> CanvasResult {
	let (cx, cy) = state.forward.apply(ctrl.0, ctrl.1);
	let (ex, ey) = state.forward.apply(end.0, end.1);
	canvas.path_quad_to(cx, cy, ex, ey)
}

fn emit_cube(
	canvas: &mut dyn Canvas,
	state: &DecodeState,
	ctrl1: (f32, f32),
	ctrl2: (f32, f32),
	end: (f32, f32),
) -> CanvasResult {
	let (c1x, c1y) = state.forward.apply(ctrl1.0, ctrl1.1);
	let (c2x, c2y) = state.forward.apply(ctrl2.0, ctrl2.1);
	let (ex, ey) = state.forward.apply(end.0, end.1);
	canvas.path_cube_to(c1x, c1y, c2x, c2y, ex, ey)
}
