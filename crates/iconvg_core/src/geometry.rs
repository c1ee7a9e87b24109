//! Rectangles and the graphic-space to destination-space transform.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle with finite floating point coordinates.
///
/// A rectangle is considered degenerate on an axis when its minimum is not
/// strictly less than its maximum (or either bound is NaN); the extent on
/// that axis is then zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
	/// Minimum x coordinate (left edge)
	pub min_x: f32,
	/// Minimum y coordinate (top edge)
	pub min_y: f32,
	/// Maximum x coordinate (right edge)
	pub max_x: f32,
	/// Maximum y coordinate (bottom edge)
	pub max_y: f32,
}

impl Rect {
	/// The canonical empty rectangle, all four fields positive zero.
	pub const ZERO: Rect = Rect::new(0.0, 0.0, 0.0, 0.0);

	/// Creates a rectangle from its corner coordinates.
	pub const fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
		Self {
			min_x,
			min_y,
			max_x,
			max_y,
		}
	}

	/// Returns the width, or zero if the rectangle is degenerate on x.
	pub fn width(&self) -> f32 {
		if self.max_x > self.min_x {
			self.max_x - self.min_x
		} else {
			0.0
		}
	}

	/// Returns the height, or zero if the rectangle is degenerate on y.
	pub fn height(&self) -> f32 {
		if self.max_y > self.min_y {
			self.max_y - self.min_y
		} else {
			0.0
		}
	}

	/// Returns `true` if the rectangle encloses no area.
	///
	/// NaN coordinates count as empty, as does any axis whose minimum is not
	/// strictly less than its maximum.
	pub fn is_empty(&self) -> bool {
		!(self.min_x < self.max_x) || !(self.min_y < self.max_y)
	}

	/// Returns `true` if all four coordinates are finite.
	pub fn is_finite(&self) -> bool {
		self.min_x.is_finite()
			&& self.min_y.is_finite()
			&& self.max_x.is_finite()
			&& self.max_y.is_finite()
	}
}

impl fmt::Display for Rect {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "({}, {}) - ({}, {})", self.min_x, self.min_y, self.max_x, self.max_y)
	}
}

/// An axis-separable affine transform: independent scale and bias per axis.
///
/// This is the shape of the graphic-space to destination-space mapping: the
/// decoder applies `x * scale_x + bias_x` (likewise for y) to every
/// coordinate it hands to the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
	/// Horizontal scale factor
	pub scale_x: f32,
	/// Horizontal offset, applied after scaling
	pub bias_x: f32,
	/// Vertical scale factor
	pub scale_y: f32,
	/// Vertical offset, applied after scaling
	pub bias_y: f32,
}

impl Transform {
	/// The identity transform.
	pub const IDENTITY: Transform = Transform {
		scale_x: 1.0,
		bias_x: 0.0,
		scale_y: 1.0,
		bias_y: 0.0,
	};

	/// Computes the transform mapping `src` onto `dst`.
	///
	/// When either rectangle has a non-positive extent on some axis there is
	/// no meaningful mapping and the identity transform is returned.
	pub fn rect_to_rect(src: &Rect, dst: &Rect) -> Self {
		let (sw, sh) = (src.width(), src.height());
		let (dw, dh) = (dst.width(), dst.height());
		if sw <= 0.0 || sh <= 0.0 || dw <= 0.0 || dh <= 0.0 {
			return Self::IDENTITY;
		}

		let scale_x = dw / sw;
		let scale_y = dh / sh;
		Self {
			scale_x,
			bias_x: dst.min_x - src.min_x * scale_x,
			scale_y,
			bias_y: dst.min_y - src.min_y * scale_y,
		}
	}

	/// Applies the transform to a point.
	#[inline]
	pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
		(x * self.scale_x + self.bias_x, y * self.scale_y + self.bias_y)
	}

	/// Returns the inverse transform (destination space back to source).
	pub fn invert(&self) -> Self {
		Self {
			scale_x: 1.0 / self.scale_x,
			bias_x: -self.bias_x / self.scale_x,
			scale_y: 1.0 / self.scale_y,
			bias_y: -self.bias_y / self.scale_y,
		}
	}
}

impl Default for Transform {
	fn default() -> Self {
		Self::IDENTITY
	}
}
