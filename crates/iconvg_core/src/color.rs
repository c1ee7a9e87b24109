//! Color types used by the decoder.
//!
//! IconVG stores colors as alpha-premultiplied RGBA bytes. A premultiplied
//! value where some channel exceeds the alpha channel cannot be an actual
//! color; the file format exploits that gap to encode non-flat paints, so
//! the two representations are kept as distinct types and all internal
//! arithmetic happens on [`PremulColor`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Non-premultiplied RGBA color.
///
/// This is the human-facing representation: channels are independent of
/// alpha. Convert with [`Color::premultiply`] before handing a color to the
/// decoder state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
	/// Red component (0-255)
	pub r: u8,
	/// Green component (0-255)
	pub g: u8,
	/// Blue component (0-255)
	pub b: u8,
	/// Alpha component (0-255)
	pub a: u8,
}

impl Color {
	/// Creates a new RGBA color.
	pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
		Self {
			r,
			g,
			b,
			a,
		}
	}

	/// Creates a fully opaque RGB color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self::new(r, g, b, 0xFF)
	}

	/// Converts to the premultiplied representation.
	pub fn premultiply(self) -> PremulColor {
		let a = u32::from(self.a);
		let mul = |c: u8| ((u32::from(c) * a + 128) / 255) as u8;
		PremulColor::new(mul(self.r), mul(self.g), mul(self.b), self.a)
	}
}

impl fmt::Display for Color {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "RGBA({}, {}, {}, {})", self.r, self.g, self.b, self.a)
	}
}

/// Alpha-premultiplied RGBA color.
///
/// Every color channel carries its value already scaled by alpha, so
/// `r <= a && g <= a && b <= a` holds for any value that denotes an actual
/// color. Values violating that are "nonsensical" and act as sentinels for
/// non-flat paint kinds in the file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PremulColor {
	/// Premultiplied red component
	pub r: u8,
	/// Premultiplied green component
	pub g: u8,
	/// Premultiplied blue component
	pub b: u8,
	/// Alpha component
	pub a: u8,
}

impl PremulColor {
	/// Fully opaque black, the default register and palette color.
	pub const OPAQUE_BLACK: PremulColor = PremulColor::new(0x00, 0x00, 0x00, 0xFF);

	/// Creates a premultiplied color from raw bytes.
	pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
		Self {
			r,
			g,
			b,
			a,
		}
	}

	/// Returns `true` if the value denotes an actual color.
	///
	/// Nonsensical values (a channel exceeding alpha) are the encoding for
	/// non-flat paints and must not be used as flat colors.
	pub const fn is_sensible(&self) -> bool {
		self.r <= self.a && self.g <= self.a && self.b <= self.a
	}

	/// Converts back to the non-premultiplied representation.
	///
	/// Nonsensical channels saturate at 255.
	pub fn unpremultiply(self) -> Color {
		if self.a == 0 {
			return Color::new(0, 0, 0, 0);
		}
		let a = u32::from(self.a);
		let div = |c: u8| ((u32::from(c) * 255 + a / 2) / a).min(255) as u8;
		Color::new(div(self.r), div(self.g), div(self.b), self.a)
	}

	/// Linear interpolation between `p` and `q` at position `t / 255`.
	///
	/// Each channel (alpha included) is `((255 - t)*p + t*q + 128) / 255`,
	/// rounding half away from zero.
	pub fn blend(t: u8, p: PremulColor, q: PremulColor) -> PremulColor {
		let s = u32::from(255 - t);
		let t = u32::from(t);
		let mix = |p: u8, q: u8| ((s * u32::from(p) + t * u32::from(q) + 128) / 255) as u8;
		PremulColor::new(mix(p.r, q.r), mix(p.g, q.g), mix(p.b, q.b), mix(p.a, q.a))
	}
}

impl fmt::Display for PremulColor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "PremulRGBA({}, {}, {}, {})", self.r, self.g, self.b, self.a)
	}
}

/// Channel values for the 5x5x5 color cube part of the one-byte color space.
const CUBE_CHANNELS: [u8; 5] = [0x00, 0x40, 0x80, 0xC0, 0xFF];

/// The built-in one-byte color table.
///
/// Indices 0 to 124 form a 5x5x5 opaque color cube, `index = 25*r + 5*g + b`
/// with channel levels {0x00, 0x40, 0x80, 0xC0, 0xFF}. The last three
/// entries are translucent greys (premultiplied):
///
/// | Index | Color |
/// |-------|----------------------|
/// | 125   | `C0 C0 C0 C0` (75% white) |
/// | 126   | `80 80 80 80` (50% white) |
/// | 127   | `00 00 00 80` (50% black) |
pub const ONE_BYTE_COLORS: [PremulColor; 128] = {
	let mut table = [PremulColor::OPAQUE_BLACK; 128];
	let mut i = 0;
	while i < 125 {
		let r = CUBE_CHANNELS[i / 25];
		let g = CUBE_CHANNELS[(i / 5) % 5];
		let b = CUBE_CHANNELS[i % 5];
		table[i] = PremulColor::new(r, g, b, 0xFF);
		i += 1;
	}
	table[125] = PremulColor::new(0xC0, 0xC0, 0xC0, 0xC0);
	table[126] = PremulColor::new(0x80, 0x80, 0x80, 0x80);
	table[127] = PremulColor::new(0x00, 0x00, 0x00, 0x80);
	table
};

/// Expands a 6-bit `rrggbb` value into an opaque color.
///
/// Each 2-bit field selects from {0x00, 0x55, 0xAA, 0xFF}; red sits in the
/// two high bits.
pub(crate) const fn two_bit_rgb(v: u8) -> PremulColor {
	PremulColor::new(0x55 * ((v >> 4) & 0x03), 0x55 * ((v >> 2) & 0x03), 0x55 * (v & 0x03), 0xFF)
}

/// Expands two nibble-packed bytes `rg`, `ba` into a premultiplied color.
///
/// Each nibble `x` becomes the byte `0x11 * x`, so `0x38 0xF7` decodes as
/// `(0x33, 0x88, 0xFF, 0x77)`.
pub(crate) const fn from_nibbles(rg: u8, ba: u8) -> PremulColor {
	PremulColor::new(0x11 * (rg >> 4), 0x11 * (rg & 0x0F), 0x11 * (ba >> 4), 0x11 * (ba & 0x0F))
}
