//! `iconvg-rs` decodes IconVG, a compact binary vector graphics format,
//! into drawing callbacks on a polymorphic canvas.
//!
//! The decoder lives in the `iconvg_core` crate; everything it exports is
//! re-exported here.

pub use iconvg_core::*;
