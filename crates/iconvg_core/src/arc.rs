//! Elliptical arc reduction.
//!
//! Arc drawing opcodes carry SVG-style endpoint parameterization: radii, an
//! x-axis rotation, large-arc and sweep flags, and the endpoint. Canvases
//! only understand Bézier segments, so the arc is converted to its center
//! parameterization and split into cubic segments of at most a quarter turn
//! each, using the `4/3 * tan(delta/4)` control point construction.
//!
//! All math runs in `f64`; coordinates are transformed to destination space
//! and narrowed to `f32` only at emission.

use crate::canvas::{Canvas, CanvasResult};
use crate::geometry::Transform;

/// Appends an elliptical arc from `(x0, y0)` to `(x, y)` as cubic segments.
///
/// Degenerate cases follow the SVG rules: identical endpoints emit nothing,
/// and a zero radius degrades the arc to a straight line. Radii too small
/// to span the endpoints are scaled up uniformly until they fit.
#[allow(clippy::too_many_arguments)]
pub(crate) fn arc_to(
	canvas: &mut dyn Canvas,
	transform: &Transform,
	x0: f32,
	y0: f32,
	rx: f32,
	ry: f32,
	x_axis_rotation: f32,
	large_arc: bool,
	sweep: bool,
	x: f32,
	y: f32,
) -> CanvasResult {
	if x0 == x && y0 == y {
		return Ok(());
	}

	let mut rx = f64::from(rx).abs();
	let mut ry = f64::from(ry).abs();
	if rx == 0.0 || ry == 0.0 {
		let (lx, ly) = transform.apply(x, y);
		return canvas.path_line_to(lx, ly);
	}

	let (x0, y0) = (f64::from(x0), f64::from(y0));
	let (x1, y1) = (f64::from(x), f64::from(y));
	let phi = f64::from(x_axis_rotation);
	let (sin_phi, cos_phi) = phi.sin_cos();

	// Step 1: endpoints in the ellipse-aligned frame, halved.
	let dx2 = (x0 - x1) / 2.0;
	let dy2 = (y0 - y1) / 2.0;
	let x1p = cos_phi * dx2 + sin_phi * dy2;
	let y1p = -sin_phi * dx2 + cos_phi * dy2;

	// Step 2: scale radii up if no ellipse with the given radii can span
	// the two endpoints.
	let lambda = (x1p * x1p) / (rx * rx) + (y1p * y1p) / (ry * ry);
	if lambda > 1.0 {
		let s = lambda.sqrt();
		rx *= s;
		ry *= s;
	}

	// Step 3: center in the ellipse-aligned frame.
	let rx_sq = rx * rx;
	let ry_sq = ry * ry;
	let x1p_sq = x1p * x1p;
	let y1p_sq = y1p * y1p;
	let num = (rx_sq * ry_sq - rx_sq * y1p_sq - ry_sq * x1p_sq).max(0.0);
	let den = rx_sq * y1p_sq + ry_sq * x1p_sq;
	let mut coef = (num / den).sqrt();
	if large_arc == sweep {
		coef = -coef;
	}
	let cxp = coef * rx * y1p / ry;
	let cyp = -coef * ry * x1p / rx;

	// Step 4: center and sweep angles in the original frame.
	let cx = cos_phi * cxp - sin_phi * cyp + (x0 + x1) / 2.0;
	let cy = sin_phi * cxp + cos_phi * cyp + (y0 + y1) / 2.0;

	let ux = (x1p - cxp) / rx;
	let uy = (y1p - cyp) / ry;
	let vx = (-x1p - cxp) / rx;
	let vy = (-y1p - cyp) / ry;

	let theta1 = uy.atan2(ux);
	let mut delta = (ux * vy - uy * vx).atan2(ux * vx + uy * vy);
	if !sweep && delta > 0.0 {
		delta -= 2.0 * std::f64::consts::PI;
	} else if sweep && delta < 0.0 {
		delta += 2.0 * std::f64::consts::PI;
	}

	// Step 5: split into segments no larger than a quarter turn and emit
	// each as one cubic.
	let segments = (delta.abs() / std::f64::consts::FRAC_PI_2).ceil().max(1.0) as usize;
	let step = delta / segments as f64;
	let k = 4.0 / 3.0 * (step / 4.0).tan();

	let point = |t: f64| {
		let (sin_t, cos_t) = t.sin_cos();
		(
			cx + rx * cos_phi * cos_t - ry * sin_phi * sin_t,
			cy + rx * sin_phi * cos_t + ry * cos_phi * sin_t,
		)
	};
	let tangent = |t: f64| {
		let (sin_t, cos_t) = t.sin_cos();
		(
			-rx * cos_phi * sin_t - ry * sin_phi * cos_t,
			-rx * sin_phi * sin_t + ry * cos_phi * cos_t,
		)
	};

	for i in 0..segments {
		let t1 = theta1 + step * i as f64;
		let t2 = t1 + step;

		let (px1, py1) = point(t1);
		let (px2, py2) = point(t2);
		let (tx1, ty1) = tangent(t1);
		let (tx2, ty2) = tangent(t2);

		let c1 = transform.apply((px1 + k * tx1) as f32, (py1 + k * ty1) as f32);
		let c2 = transform.apply((px2 - k * tx2) as f32, (py2 - k * ty2) as f32);
		let end = transform.apply(px2 as f32, py2 as f32);
		canvas.path_cube_to(c1.0, c1.1, c2.0, c2.1, end.0, end.1)?;
	}

	Ok(())
}
