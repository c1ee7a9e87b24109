//! Metadata parsing: magic identifier, chunk framing, ViewBox and
//! Suggested Palette.
//!
//! ## Layout
//!
//! | Field                | Encoding                                     |
//! |----------------------|----------------------------------------------|
//! | magic                | `89 49 56 47`                                |
//! | `num_metadata_chunks`| natural number                               |
//! | chunk, repeated      | `chunk_length` (natural), then payload       |
//!
//! Each chunk payload starts with its metadata ID (natural number); IDs
//! must be strictly increasing across chunks. ID 0 is the ViewBox (four
//! coordinate numbers), ID 1 the Suggested Palette. A full decode rejects
//! any other ID; the viewbox-only pre-pass skips unknown chunks instead.

use crate::color::{ONE_BYTE_COLORS, PremulColor, from_nibbles};
use crate::cursor::Cursor;
use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::number::{decode_coordinate, decode_natural};
use crate::palette::Palette;

/// The four magic bytes every IconVG file starts with.
pub(crate) const MAGIC: [u8; 4] = [0x89, 0x49, 0x56, 0x47];

/// ViewBox used when a file carries no ViewBox metadata chunk.
pub const DEFAULT_VIEWBOX: Rect = Rect::new(-32.0, -32.0, 32.0, 32.0);

/// Metadata ID of the ViewBox chunk.
const METADATA_ID_VIEWBOX: u32 = 0;

/// Metadata ID of the Suggested Palette chunk.
const METADATA_ID_SUGGESTED_PALETTE: u32 = 1;

/// Everything the metadata section can carry.
#[derive(Debug, Clone)]
pub(crate) struct Metadata {
	/// ViewBox, defaulted when absent
	pub viewbox: Rect,
	/// Suggested palette, defaulted when absent
	pub suggested_palette: Palette,
}

/// Parses the full metadata section, rejecting unknown chunk IDs.
///
/// On return the cursor sits on the first bytecode byte.
pub(crate) fn parse(cursor: &mut Cursor<'_>) -> Result<Metadata> {
	parse_section(cursor, true)
}

/// Parses only as much metadata as a viewbox query needs.
///
/// Unknown chunk IDs are skipped (their framing and ordering is still
/// validated) and Suggested Palette chunks are not decoded.
pub(crate) fn parse_viewbox(cursor: &mut Cursor<'_>) -> Result<Rect> {
	parse_section(cursor, false).map(|metadata| metadata.viewbox)
}

fn parse_section(cursor: &mut Cursor<'_>, strict: bool) -> Result<Metadata> {
	let magic = cursor.read_array::<4>().ok_or(Error::BadMagicIdentifier)?;
	if magic != MAGIC {
		return Err(Error::BadMagicIdentifier);
	}

	let num_chunks = decode_natural(cursor)?;
	let mut metadata = Metadata {
		viewbox: DEFAULT_VIEWBOX,
		suggested_palette: Palette::new(),
	};

	let mut previous_id: i64 = -1;
	for _ in 0..num_chunks {
		let chunk_length = decode_natural(cursor)? as usize;
		let Some(mut chunk) = cursor.sub_limit(chunk_length) else {
			return Err(Error::BadMetadata);
		};
		// Trailing bytes inside a chunk are the chunk's own business; the
		// outer parse always resumes at the declared boundary.
		cursor.skip(chunk_length).ok_or(Error::BadMetadata)?;

		let id = decode_natural(&mut chunk)?;
		if i64::from(id) <= previous_id {
			return Err(Error::BadMetadataIdOrder);
		}
		previous_id = i64::from(id);

		match id {
			METADATA_ID_VIEWBOX => metadata.viewbox = parse_viewbox_chunk(&mut chunk)?,
			METADATA_ID_SUGGESTED_PALETTE if strict => {
				parse_suggested_palette(&mut chunk, &mut metadata.suggested_palette)?;
			}
			_ if strict => return Err(Error::BadMetadata),
			_ => {}
		}
	}

	Ok(metadata)
}

/// Reads a ViewBox payload: four coordinates, nothing else.
fn parse_viewbox_chunk(chunk: &mut Cursor<'_>) -> Result<Rect> {
	fn read(chunk: &mut Cursor<'_>) -> Result<f32> {
		decode_coordinate(chunk).map_err(|_| Error::BadMetadataViewBox)
	}
	let viewbox = Rect::new(read(chunk)?, read(chunk)?, read(chunk)?, read(chunk)?);

	if !chunk.is_empty() {
		return Err(Error::BadMetadataViewBox);
	}
	// -inf < min <= max < +inf on both axes; NaN fails the comparisons.
	let ordered = viewbox.min_x <= viewbox.max_x && viewbox.min_y <= viewbox.max_y;
	if !ordered || !viewbox.is_finite() {
		return Err(Error::BadMetadataViewBox);
	}
	Ok(viewbox)
}

/// Reads a Suggested Palette payload into `palette`.
///
/// The first byte packs the entry count (low six bits, offset by one) and
/// the bytes per entry (high two bits, offset by one). The payload must
/// then hold exactly `count * bytes_per_entry` bytes. Entries beyond the
/// count keep their previous colors.
fn parse_suggested_palette(chunk: &mut Cursor<'_>, palette: &mut Palette) -> Result<()> {
	let layout = chunk.read_u8().ok_or(Error::BadMetadataSuggestedPalette)?;
	let count = usize::from(layout & 0x3F) + 1;
	let bytes_per_entry = usize::from(layout >> 6) + 1;

	if chunk.remaining() != count * bytes_per_entry {
		return Err(Error::BadMetadataSuggestedPalette);
	}

	for index in 0..count {
		let color = match bytes_per_entry {
			1 => {
				let b = chunk.read_u8().ok_or(Error::BadMetadataSuggestedPalette)?;
				// Inside a palette definition the indirect half of the
				// one-byte color space has nothing to refer to.
				if b < 0x80 {
					ONE_BYTE_COLORS[usize::from(b)]
				} else {
					PremulColor::OPAQUE_BLACK
				}
			}
			2 => {
				let [rg, ba] =
					chunk.read_array::<2>().ok_or(Error::BadMetadataSuggestedPalette)?;
				from_nibbles(rg, ba)
			}
			3 => {
				let [r, g, b] =
					chunk.read_array::<3>().ok_or(Error::BadMetadataSuggestedPalette)?;
				PremulColor::new(r, g, b, 0xFF)
			}
			_ => {
				let [r, g, b, a] =
					chunk.read_array::<4>().ok_or(Error::BadMetadataSuggestedPalette)?;
				PremulColor::new(r, g, b, a)
			}
		};
		palette.set(index as u8, color);
	}

	Ok(())
}
