//! Error types for IconVG decoding.

use thiserror::Error;

/// Errors that can occur while decoding an IconVG file.
///
/// Every variant is a plain reason code: the enum is `Copy` and `Eq`, so
/// errors can be stored, compared and returned by value from canvas
/// callbacks as well as from the decoder itself.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Error {
	/// The input does not start with the IconVG magic identifier
	#[error("bad magic identifier")]
	BadMagicIdentifier,

	/// Malformed metadata framing (chunk length, unknown metadata ID, ...)
	#[error("bad metadata")]
	BadMetadata,

	/// Metadata chunk IDs are not strictly increasing
	#[error("bad metadata ID order")]
	BadMetadataIdOrder,

	/// Malformed `ViewBox` metadata chunk
	#[error("bad metadata (ViewBox)")]
	BadMetadataViewBox,

	/// Malformed Suggested Palette metadata chunk
	#[error("bad metadata (suggested palette)")]
	BadMetadataSuggestedPalette,

	/// Truncated or malformed variable-length number
	#[error("bad number")]
	BadNumber,

	/// Truncated or malformed coordinate number
	#[error("bad coordinate")]
	BadCoordinate,

	/// Truncated or malformed color payload
	#[error("bad color")]
	BadColor,

	/// Opcode outside the styling-mode opcode space
	#[error("bad styling opcode")]
	BadStylingOpcode,

	/// Opcode outside the drawing-mode opcode space
	#[error("bad drawing opcode")]
	BadDrawingOpcode,

	/// Input ended while still inside drawing mode
	#[error("bad path (unfinished)")]
	BadPathUnfinished,

	/// The selected paint register does not hold a flat color
	#[error("invalid paint type")]
	InvalidPaintType,

	/// A canvas backend ran out of memory; the core itself never allocates
	#[error("system failure: out of memory")]
	SystemFailureOutOfMemory,
}

/// Convenience alias for decoder results.
pub type Result<T> = std::result::Result<T, Error>;
