//! 64-color palettes.
//!
//! Every IconVG file is decoded against a palette of exactly 64
//! premultiplied colors. The default palette is all fully opaque black; a
//! file's Suggested Palette metadata overrides a prefix of it, and a caller
//! may replace it wholesale through the decode options.

use std::fmt;

use crate::color::PremulColor;

/// Number of colors in a palette.
pub const PALETTE_SIZE: usize = 64;

/// An ordered table of exactly 64 premultiplied colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
	colors: [PremulColor; PALETTE_SIZE],
}

impl Palette {
	/// Creates the default palette: 64 fully opaque black entries.
	pub const fn new() -> Self {
		Self {
			colors: [PremulColor::OPAQUE_BLACK; PALETTE_SIZE],
		}
	}

	/// Creates a palette from an explicit color table.
	pub const fn from_colors(colors: [PremulColor; PALETTE_SIZE]) -> Self {
		Self {
			colors,
		}
	}

	/// Gets a color by index. Indices are taken modulo 64.
	#[inline]
	pub fn get(&self, index: u8) -> PremulColor {
		self.colors[usize::from(index) % PALETTE_SIZE]
	}

	/// Sets a color. Indices are taken modulo 64.
	#[inline]
	pub fn set(&mut self, index: u8, color: PremulColor) {
		self.colors[usize::from(index) % PALETTE_SIZE] = color;
	}

	/// Returns a reference to the color array.
	#[inline]
	pub fn colors(&self) -> &[PremulColor; PALETTE_SIZE] {
		&self.colors
	}

	/// Returns an iterator over the palette colors.
	pub fn iter(&self) -> impl Iterator<Item = &PremulColor> {
		self.colors.iter()
	}
}

impl Default for Palette {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Display for Palette {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let custom = self.colors.iter().filter(|c| **c != PremulColor::OPAQUE_BLACK).count();
		write!(f, "Palette: {custom} of {PALETTE_SIZE} entries non-default")
	}
}

impl std::ops::Index<u8> for Palette {
	type Output = PremulColor;

	fn index(&self, index: u8) -> &Self::Output {
		&self.colors[usize::from(index) % PALETTE_SIZE]
	}
}

impl std::ops::IndexMut<u8> for Palette {
	fn index_mut(&mut self, index: u8) -> &mut Self::Output {
		&mut self.colors[usize::from(index) % PALETTE_SIZE]
	}
}
