//! Prelude module for `iconvg_core`.
//!
//! This module provides a convenient way to import commonly used types and
//! functions.
//!
//! # Examples
//!
//! ```
//! use iconvg_core::prelude::*;
//!
//! let canvas = BrokenCanvas::new(None);
//! let dst = Rect::new(0.0, 0.0, 48.0, 48.0);
//! let options = DecodeOptions::new().with_height_in_pixels(48);
//! ```

#[doc(inline)]
pub use crate::canvas::{BrokenCanvas, Canvas, CanvasResult, DebugCanvas, Paint};

#[doc(inline)]
pub use crate::color::{Color, PremulColor};

#[doc(inline)]
pub use crate::decode::{DEFAULT_VIEWBOX, DecodeOptions, decode, decode_viewbox};

#[doc(inline)]
pub use crate::error::{Error, Result};

#[doc(inline)]
pub use crate::geometry::{Rect, Transform};

#[doc(inline)]
pub use crate::palette::{PALETTE_SIZE, Palette};
