//! Rasterizer boundary over the TTF engine
//!
//! The pipeline only needs two operations from a font: advance measurement
//! and rasterization to a tight coverage bitmap. Keeping them behind a trait
//! lets tests substitute a deterministic rasterizer for `fontdue`.

use std::path::{Path, PathBuf};

/// Error type for font loading.
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("Failed to read font file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse font {path:?}: {reason}")]
    Parse { path: PathBuf, reason: &'static str },
}

/// Tight coverage bitmap for one character plus its bounding box.
///
/// The bounding box is baseline-relative with y up (`y_max` is the top edge
/// of the ink above the baseline); the bitmap itself is row-major with the
/// top row first.
pub struct Raster {
    /// Bounding box width in pixels.
    pub width: usize,
    /// Bounding box height in pixels.
    pub height: usize,
    /// Left edge of the bounding box.
    pub x_min: i32,
    /// Top edge of the bounding box, up from the baseline.
    pub y_max: i32,
    /// Row-major 0-255 coverage, `width * height` entries. Empty when the
    /// character has no ink (space).
    pub coverage: Vec<u8>,
}

/// Font engine capability: advance measurement and glyph rasterization.
pub trait Rasterizer {
    /// Nominal pixel size the font was loaded at.
    fn px_size(&self) -> u32;

    /// Advance width for `ch` in pixels.
    fn measure(&self, ch: char) -> f32;

    /// Coverage bitmap and bounding box for `ch`.
    fn rasterize(&self, ch: char) -> Raster;
}

/// Production rasterizer backed by `fontdue`.
pub struct TtfRasterizer {
    font: fontdue::Font,
    px: u32,
}

impl TtfRasterizer {
    /// Load a TTF file at the given pixel size.
    pub fn load(path: &Path, px: u32) -> Result<Self, FontError> {
        let data = std::fs::read(path).map_err(|source| FontError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let font = fontdue::Font::from_bytes(data, fontdue::FontSettings::default()).map_err(
            |reason| FontError::Parse {
                path: path.to_path_buf(),
                reason,
            },
        )?;
        Ok(Self { font, px })
    }
}

impl Rasterizer for TtfRasterizer {
    fn px_size(&self) -> u32 {
        self.px
    }

    fn measure(&self, ch: char) -> f32 {
        self.font.metrics(ch, self.px as f32).advance_width
    }

    fn rasterize(&self, ch: char) -> Raster {
        let (metrics, coverage) = self.font.rasterize(ch, self.px as f32);
        // fontdue reports ymin (bottom edge, y up from the baseline); the
        // glyph extractor wants the top edge.
        Raster {
            width: metrics.width,
            height: metrics.height,
            x_min: metrics.xmin,
            y_max: metrics.ymin + metrics.height as i32,
            coverage,
        }
    }
}
