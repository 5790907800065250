//! font-export - TTF to BitmapFont header converter
//!
//! Rasterizes a character range from a vector font at a fixed pixel size,
//! thresholds each glyph to 1-bit coverage, bit-packs the pixels LSB-first,
//! and renders the result as a C header consumed by the display renderer.
//!
//! Pipeline: a [`Rasterizer`] produces per-character coverage bitmaps,
//! [`build_font`] folds the character range into a packed [`BitmapFont`],
//! and [`generate_header`] formats it as text.

pub mod codegen;
pub mod glyph;
pub mod pack;
pub mod raster;

pub use codegen::generate_header;
pub use glyph::{build_font, extract_glyph, BitmapFont, Glyph, RenderOptions};
pub use raster::{FontError, Raster, Rasterizer, TtfRasterizer};
