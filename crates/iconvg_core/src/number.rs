//! Variable-length number decoding.
//!
//! All four number kinds share one length-prefix convention, carried in the
//! low bits of the first byte:
//!
//! | Low bits | Length | Raw value                                   |
//! |----------|--------|---------------------------------------------|
//! | `xxxxxxx0` | 1 byte | `byte >> 1` (0 to 127)                     |
//! | `xxxxxx01` | 2 bytes | `u16_le >> 2` (0 to 16383)                |
//! | `xxxxxx11` | 4 bytes | `u32_le & 0xFFFF_FFFC`                    |
//!
//! The kinds differ only in how the raw value is interpreted:
//!
//! | Kind        | 1 byte      | 2 bytes              | 4 bytes            |
//! |-------------|-------------|----------------------|--------------------|
//! | natural     | `raw`       | `raw`                | `raw >> 2`         |
//! | coordinate  | `raw - 64`  | `raw / 64 - 128`     | `f32::from_bits`   |
//! | real        | `raw`       | `raw`                | `f32::from_bits`   |
//! | zero-to-one | `raw / 120` | `raw / 15120`        | `f32::from_bits`   |
//!
//! The 4-byte float reinterpretation happens after the two prefix bits are
//! masked off, so only bit patterns with two low zero bits are exactly
//! representable.

use crate::cursor::Cursor;
use crate::error::{Error, Result};

/// A raw number: the prefix-free integer plus how many bytes encoded it.
struct Raw {
	value: u32,
	len: usize,
}

/// Consumes the shared length prefix, returning the raw integer.
fn decode_raw(cursor: &mut Cursor<'_>) -> Option<Raw> {
	let first = cursor.peek()?;
	if first & 0x01 == 0 {
		let byte = cursor.read_u8()?;
		Some(Raw {
			value: u32::from(byte >> 1),
			len: 1,
		})
	} else if first & 0x02 == 0 {
		let bytes = cursor.read_array::<2>()?;
		Some(Raw {
			value: u32::from(u16::from_le_bytes(bytes) >> 2),
			len: 2,
		})
	} else {
		let bytes = cursor.read_array::<4>()?;
		Some(Raw {
			value: u32::from_le_bytes(bytes) & 0xFFFF_FFFC,
			len: 4,
		})
	}
}

/// Decodes a natural number (unsigned integer).
pub(crate) fn decode_natural(cursor: &mut Cursor<'_>) -> Result<u32> {
	let raw = decode_raw(cursor).ok_or(Error::BadNumber)?;
	match raw.len {
		4 => Ok(raw.value >> 2),
		_ => Ok(raw.value),
	}
}

/// Decodes a real number.
pub(crate) fn decode_real(cursor: &mut Cursor<'_>) -> Result<f32> {
	let raw = decode_raw(cursor).ok_or(Error::BadNumber)?;
	match raw.len {
		4 => Ok(f32::from_bits(raw.value)),
		_ => Ok(raw.value as f32),
	}
}

/// Decodes a coordinate number.
///
/// The short encodings bias the raw value so that small coordinates around
/// the origin fit in one byte (-64 to +63) or two bytes (-128 to +127.98,
/// in steps of 1/64).
pub(crate) fn decode_coordinate(cursor: &mut Cursor<'_>) -> Result<f32> {
	let raw = decode_raw(cursor).ok_or(Error::BadCoordinate)?;
	match raw.len {
		1 => Ok(raw.value as f32 - 64.0),
		2 => Ok((raw.value as f32 - 128.0 * 64.0) / 64.0),
		_ => Ok(f32::from_bits(raw.value)),
	}
}

/// Decodes a number in the unit interval.
pub(crate) fn decode_zero_to_one(cursor: &mut Cursor<'_>) -> Result<f32> {
	let raw = decode_raw(cursor).ok_or(Error::BadNumber)?;
	match raw.len {
		1 => Ok(raw.value as f32 / 120.0),
		2 => Ok(raw.value as f32 / 15120.0),
		_ => Ok(f32::from_bits(raw.value)),
	}
}
