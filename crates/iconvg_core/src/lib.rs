//! Decoder for IconVG, a compact binary vector graphics format.
//!
//! An IconVG file is a short metadata section followed by bytecode for a
//! two-mode interpreter: styling opcodes manage 64-slot color and number
//! register banks, drawing opcodes trace filled paths. This crate executes
//! that bytecode against untrusted input and reports every drawing event to
//! a caller-supplied [`Canvas`]; it does not rasterize anything itself.
//!
//! # Examples
//!
//! ```
//! use iconvg_core::{DecodeOptions, DebugCanvas, Rect, decode, decode_viewbox};
//!
//! // The smallest valid file: magic bytes, zero metadata chunks.
//! let src = [0x89, 0x49, 0x56, 0x47, 0x00];
//!
//! let viewbox = decode_viewbox(&src)?;
//! assert_eq!(viewbox, Rect::new(-32.0, -32.0, 32.0, 32.0));
//!
//! let mut canvas = DebugCanvas::new(Vec::new(), "ivg: ", None);
//! decode(&mut canvas, Rect::new(0.0, 0.0, 64.0, 64.0), &src, &DecodeOptions::new())?;
//! # Ok::<(), iconvg_core::Error>(())
//! ```

mod arc;
mod cursor;
mod number;

pub mod canvas;
pub mod color;
pub mod decode;
pub mod error;
pub mod geometry;
pub mod palette;
pub mod prelude;

pub use canvas::{BrokenCanvas, Canvas, CanvasResult, DebugCanvas, Paint};
pub use color::{Color, ONE_BYTE_COLORS, PremulColor};
pub use decode::{DEFAULT_VIEWBOX, DecodeOptions, decode, decode_viewbox};
pub use error::{Error, Result};
pub use geometry::{Rect, Transform};
pub use palette::{PALETTE_SIZE, Palette};
