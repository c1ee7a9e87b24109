//! Interpreter state shared by the styling and drawing modes.

use crate::color::{ONE_BYTE_COLORS, PremulColor, two_bit_rgb};
use crate::geometry::{Rect, Transform};
use crate::palette::{PALETTE_SIZE, Palette};

/// Number of slots in each register bank.
pub(crate) const NUM_REGISTERS: usize = PALETTE_SIZE;

/// Upper bound on the height-in-pixels value (2^20).
pub(crate) const MAX_HEIGHT_IN_PIXELS: u32 = 1 << 20;

/// All mutable interpreter state for one decode call.
///
/// Built once after metadata parsing and destroyed when the decode returns;
/// nothing survives across calls.
#[derive(Debug)]
pub(crate) struct DecodeState {
	/// The graphic's coordinate space
	pub viewbox: Rect,
	/// Palette after suggested-palette and caller overrides
	pub custom_palette: Palette,
	/// Color registers, seeded from the custom palette
	pub creg: [PremulColor; NUM_REGISTERS],
	/// Number registers, seeded with zeroes
	pub nreg: [f32; NUM_REGISTERS],
	/// Color register selector; masked modulo 64 on use
	pub csel: u32,
	/// Number register selector; masked modulo 64 on use
	pub nsel: u32,
	/// Level-of-detail bounds, `lod0 <= h < lod1` enables drawing
	pub lod: (f64, f64),
	/// Rendered height used for the level-of-detail test
	pub height_in_pixels: u32,
	/// Graphic space to destination space
	pub forward: Transform,
	/// Destination space back to graphic space
	pub inverse: Transform,
}

impl DecodeState {
	/// Builds the interpreter state for one bytecode execution.
	///
	/// `height_override` substitutes the height derived from the
	/// destination rectangle; either way the value is capped at 2^20.
	pub(crate) fn new(
		dst_rect: Rect,
		viewbox: Rect,
		custom_palette: Palette,
		height_override: Option<u32>,
	) -> Self {
		let height = height_override
			.unwrap_or_else(|| dst_rect.height().round() as u32)
			.min(MAX_HEIGHT_IN_PIXELS);
		let forward = Transform::rect_to_rect(&viewbox, &dst_rect);

		Self {
			viewbox,
			custom_palette,
			creg: *custom_palette.colors(),
			nreg: [0.0; NUM_REGISTERS],
			csel: 0,
			nsel: 0,
			lod: (0.0, f64::INFINITY),
			height_in_pixels: height,
			forward,
			inverse: forward.invert(),
		}
	}

	/// Resolves a one-byte color payload against the current registers.
	///
	/// | Payload     | Meaning                                      |
	/// |-------------|----------------------------------------------|
	/// | `0x00-0x7F` | built-in one-byte color table                |
	/// | `0x80-0xBF` | 6-bit `rrggbb` opaque color                  |
	/// | `0xC0-0xFF` | `CREG[payload & 0x3F]`                       |
	///
	/// Register references reach the custom palette too, because CREG is
	/// seeded from it and palette entries stay in place until overwritten.
	pub(crate) fn resolve_one_byte_color(&self, payload: u8) -> PremulColor {
		match payload {
			0x00..=0x7F => ONE_BYTE_COLORS[usize::from(payload)],
			0x80..=0xBF => two_bit_rgb(payload - 0x80),
			_ => self.creg[usize::from(payload) & (NUM_REGISTERS - 1)],
		}
	}

	/// Returns `true` when the current height passes the LOD gate.
	pub(crate) fn lod_allows_drawing(&self) -> bool {
		let h = f64::from(self.height_in_pixels);
		self.lod.0 <= h && h < self.lod.1
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn state() -> DecodeState {
		DecodeState::new(
			Rect::new(0.0, 0.0, 64.0, 64.0),
			Rect::new(-32.0, -32.0, 32.0, 32.0),
			Palette::new(),
			None,
		)
	}

	#[test]
	fn test_initial_registers() {
		let state = state();
		assert!(state.creg.iter().all(|c| *c == PremulColor::OPAQUE_BLACK));
		assert!(state.nreg.iter().all(|n| *n == 0.0));
		assert_eq!(state.csel, 0);
		assert_eq!(state.nsel, 0);
	}

	#[test]
	fn test_creg_seeded_from_palette() {
		let mut palette = Palette::new();
		let red = PremulColor::new(0xFF, 0x00, 0x00, 0xFF);
		palette.set(7, red);

		let state = DecodeState::new(Rect::ZERO, Rect::ZERO, palette, None);
		assert_eq!(state.creg[7], red);
	}

	#[test]
	fn test_height_defaults_and_caps() {
		let state = state();
		assert_eq!(state.height_in_pixels, 64);

		let tall = DecodeState::new(
			Rect::new(0.0, 0.0, 1.0, 1e9),
			Rect::new(-32.0, -32.0, 32.0, 32.0),
			Palette::new(),
			None,
		);
		assert_eq!(tall.height_in_pixels, MAX_HEIGHT_IN_PIXELS);

		let overridden = DecodeState::new(Rect::ZERO, Rect::ZERO, Palette::new(), Some(480));
		assert_eq!(overridden.height_in_pixels, 480);
	}

	#[test]
	fn test_lod_defaults_open() {
		assert!(state().lod_allows_drawing());
	}

	#[test]
	fn test_lod_half_open_interval() {
		let mut state = state();
		state.lod = (10.0, 64.0);
		assert!(!state.lod_allows_drawing());

		state.lod = (10.0, 65.0);
		assert!(state.lod_allows_drawing());

		state.lod = (64.0, 65.0);
		assert!(state.lod_allows_drawing());
	}

	#[test]
	fn test_resolve_one_byte_color() {
		let mut state = state();
		state.creg[5] = PremulColor::new(0x11, 0x22, 0x33, 0xFF);

		assert_eq!(state.resolve_one_byte_color(0x00), ONE_BYTE_COLORS[0]);
		assert_eq!(state.resolve_one_byte_color(0x7F), ONE_BYTE_COLORS[127]);
		assert_eq!(state.resolve_one_byte_color(0xBF), PremulColor::new(0xFF, 0xFF, 0xFF, 0xFF));
		assert_eq!(state.resolve_one_byte_color(0xC5), PremulColor::new(0x11, 0x22, 0x33, 0xFF));
	}
}
