//! Styling-mode interpreter.
//!
//! Styling mode is where bytecode execution starts and where it must end:
//! running out of bytes here is the natural end of the file. Opcodes either
//! mutate the register banks and selectors, set the level-of-detail bounds,
//! or hand control to the drawing-mode interpreter for one paint region.
//!
//! ## Opcode map
//!
//! | Range       | Action                                            |
//! |-------------|---------------------------------------------------|
//! | `0x00-0x3F` | set CSEL                                          |
//! | `0x40-0x7F` | set NSEL                                          |
//! | `0x80-0x87` | CREG write, one-byte color payload                |
//! | `0x88-0x8F` | CREG write, nibble-packed RGBA payload            |
//! | `0x90-0x97` | CREG write, direct RGB payload                    |
//! | `0x98-0x9F` | CREG write, direct RGBA payload                   |
//! | `0xA0-0xA7` | CREG write, blend of two one-byte colors          |
//! | `0xA8-0xAF` | NREG write, real number                           |
//! | `0xB0-0xB7` | NREG write, coordinate number                     |
//! | `0xB8-0xBF` | NREG write, zero-to-one number                    |
//! | `0xC0-0xC6` | enter drawing mode                                |
//! | `0xC7`      | set level-of-detail bounds                        |
//! | `0xC8-0xFF` | error                                             |

use log::trace;

use crate::canvas::{BrokenCanvas, Canvas, Paint};
use crate::color::{PremulColor, from_nibbles};
use crate::cursor::Cursor;
use crate::error::{Error, Result};
use crate::number::{decode_coordinate, decode_real, decode_zero_to_one};

use super::drawing;
use super::state::{DecodeState, NUM_REGISTERS};

/// Selector perturbation for the low three opcode bits of a register write.
///
/// Low bits 0 to 6 address `sel - adjustment`; low bits 7 address `sel`
/// itself and then step the selector forward by one.
const SELECTOR_ADJUSTMENTS: [u32; 8] = [0, 1, 2, 3, 4, 5, 6, 0];

/// Resolves the register slot addressed by a write (or mode-switch) opcode.
fn register_index(sel: u32, op: u8) -> usize {
	let adjusted = sel.wrapping_sub(SELECTOR_ADJUSTMENTS[usize::from(op & 0x07)]);
	adjusted as usize & (NUM_REGISTERS - 1)
}

fn write_creg(state: &mut DecodeState, op: u8, color: PremulColor) {
	state.creg[register_index(state.csel, op)] = color;
	if op & 0x07 == 0x07 {
		state.csel = state.csel.wrapping_add(1);
	}
}

fn write_nreg(state: &mut DecodeState, op: u8, value: f32) {
	state.nreg[register_index(state.nsel, op)] = value;
	if op & 0x07 == 0x07 {
		state.nsel = state.nsel.wrapping_add(1);
	}
}

/// Runs the bytecode from the current cursor position to the end of input.
pub(crate) fn run(
	cursor: &mut Cursor<'_>,
	state: &mut DecodeState,
	canvas: &mut dyn Canvas,
) -> Result<()> {
	let mut noop = BrokenCanvas::new(None);

	while let Some(op) = cursor.read_u8() {
		match op {
			0x00..=0x3F => state.csel = u32::from(op),
			0x40..=0x7F => state.nsel = u32::from(op & 0x3F),
			0x80..=0x87 => {
				let payload = cursor.read_u8().ok_or(Error::BadColor)?;
				let color = state.resolve_one_byte_color(payload);
				write_creg(state, op, color);
			}
			0x88..=0x8F => {
				let [rg, ba] = cursor.read_array::<2>().ok_or(Error::BadColor)?;
				write_creg(state, op, from_nibbles(rg, ba));
			}
			0x90..=0x97 => {
				let [r, g, b] = cursor.read_array::<3>().ok_or(Error::BadColor)?;
				write_creg(state, op, PremulColor::new(r, g, b, 0xFF));
			}
			0x98..=0x9F => {
				let [r, g, b, a] = cursor.read_array::<4>().ok_or(Error::BadColor)?;
				write_creg(state, op, PremulColor::new(r, g, b, a));
			}
			0xA0..=0xA7 => {
				let [t, p, q] = cursor.read_array::<3>().ok_or(Error::BadColor)?;
				let color = PremulColor::blend(
					t,
					state.resolve_one_byte_color(p),
					state.resolve_one_byte_color(q),
				);
				write_creg(state, op, color);
			}
			0xA8..=0xAF => {
				let value = decode_real(cursor)?;
				write_nreg(state, op, value);
			}
			0xB0..=0xB7 => {
				let value = decode_coordinate(cursor)?;
				write_nreg(state, op, value);
			}
			0xB8..=0xBF => {
				let value = decode_zero_to_one(cursor)?;
				write_nreg(state, op, value);
			}
			0xC0..=0xC6 => {
				let color = state.creg[register_index(state.csel, op)];
				if !color.is_sensible() {
					return Err(Error::InvalidPaintType);
				}
				let paint = Paint::FlatColor(color);

				let x = decode_coordinate(cursor)?;
				let y = decode_coordinate(cursor)?;

				let gated = !state.lod_allows_drawing();
				trace!(
					"drawing mode: start ({x}, {y}), paint {paint}{}",
					if gated { ", suppressed by LOD" } else { "" }
				);
				if gated {
					drawing::run(cursor, state, &mut noop, &paint, (x, y))?;
				} else {
					drawing::run(cursor, state, &mut *canvas, &paint, (x, y))?;
				}
			}
			0xC7 => {
				let lod0 = decode_real(cursor)?;
				let lod1 = decode_real(cursor)?;
				state.lod = (f64::from(lod0), f64::from(lod1));
				trace!("LOD bounds set to [{lod0}, {lod1})");
			}
			_ => return Err(Error::BadStylingOpcode),
		}
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::geometry::Rect;
	use crate::palette::Palette;

	fn state() -> DecodeState {
		DecodeState::new(
			Rect::new(0.0, 0.0, 64.0, 64.0),
			Rect::new(-32.0, -32.0, 32.0, 32.0),
			Palette::new(),
			None,
		)
	}

	fn run_bytes(state: &mut DecodeState, bytes: &[u8]) -> Result<()> {
		let mut noop = BrokenCanvas::new(None);
		run(&mut Cursor::new(bytes), state, &mut noop)
	}

	#[test]
	fn test_selector_opcodes() {
		let mut state = state();
		run_bytes(&mut state, &[0x05, 0x47]).unwrap();
		assert_eq!(state.csel, 5);
		assert_eq!(state.nsel, 7);
	}

	#[test]
	fn test_empty_input_is_natural_exit() {
		let mut state = state();
		assert_eq!(run_bytes(&mut state, &[]), Ok(()));
	}

	#[test]
	fn test_direct_rgba_write_with_adjustment() {
		let mut state = state();
		// CSEL = 2; low bits 0 write at CSEL, low bits 1 write at CSEL-1.
		run_bytes(&mut state, &[0x02, 0x98, 1, 2, 3, 4, 0x99, 5, 6, 7, 8]).unwrap();
		assert_eq!(state.creg[2], PremulColor::new(1, 2, 3, 4));
		assert_eq!(state.creg[1], PremulColor::new(5, 6, 7, 8));
		assert_eq!(state.csel, 2);
	}

	#[test]
	fn test_write_with_low_bits_7_steps_selector() {
		let mut state = state();
		run_bytes(
			&mut state,
			&[0x10, 0x9F, 1, 1, 1, 1, 0x9F, 2, 2, 2, 2],
		)
		.unwrap();
		assert_eq!(state.creg[16], PremulColor::new(1, 1, 1, 1));
		assert_eq!(state.creg[17], PremulColor::new(2, 2, 2, 2));
		assert_eq!(state.csel, 18);
	}

	#[test]
	fn test_register_index_wraps() {
		let mut state = state();
		// CSEL = 0, adjustment 1 wraps to slot 63.
		run_bytes(&mut state, &[0x00, 0x99, 9, 9, 9, 9]).unwrap();
		assert_eq!(state.creg[63], PremulColor::new(9, 9, 9, 9));
	}

	#[test]
	fn test_one_byte_and_nibble_writes() {
		let mut state = state();
		run_bytes(&mut state, &[0x00, 0x80, 124, 0x89, 0x38, 0xF7]).unwrap();
		assert_eq!(state.creg[0], PremulColor::new(0xFF, 0xFF, 0xFF, 0xFF));
		assert_eq!(state.creg[63], PremulColor::new(0x33, 0x88, 0xFF, 0x77));
	}

	#[test]
	fn test_blend_write() {
		let mut state = state();
		// Blend fully toward q: q is one-byte color 124 (opaque white).
		run_bytes(&mut state, &[0x00, 0xA0, 255, 0, 124]).unwrap();
		assert_eq!(state.creg[0], PremulColor::new(0xFF, 0xFF, 0xFF, 0xFF));
	}

	#[test]
	fn test_nreg_writes() {
		let mut state = state();
		// Real 7 into NREG[0], coordinate -64 into NREG[63] (adjustment 1
		// wraps), zero-to-one 1/120 into NREG[1].
		run_bytes(&mut state, &[0x40, 0xA8, 14, 0xB1, 0, 0x41, 0xB8, 2]).unwrap();
		assert_eq!(state.nreg[0], 7.0);
		assert_eq!(state.nreg[63], -64.0);
		assert_eq!(state.nreg[1], 1.0 / 120.0);
	}

	#[test]
	fn test_lod_opcode() {
		let mut state = state();
		run_bytes(&mut state, &[0xC7, 20, 40]).unwrap();
		assert_eq!(state.lod, (10.0, 20.0));
	}

	#[test]
	fn test_bad_styling_opcode() {
		let mut state = state();
		assert_eq!(run_bytes(&mut state, &[0xC8]), Err(Error::BadStylingOpcode));
		assert_eq!(run_bytes(&mut state, &[0xFF]), Err(Error::BadStylingOpcode));
	}

	#[test]
	fn test_truncated_color_payload() {
		let mut state = state();
		assert_eq!(run_bytes(&mut state, &[0x98, 1, 2]), Err(Error::BadColor));
	}

	#[test]
	fn test_nonsensical_paint_rejected() {
		let mut state = state();
		state.creg[0] = PremulColor::new(0xFF, 0x00, 0x00, 0x40);
		assert_eq!(run_bytes(&mut state, &[0xC0]), Err(Error::InvalidPaintType));
	}
}
