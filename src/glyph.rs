//! Glyph extraction and font assembly
//!
//! Converts one character at a time into 1-bit coverage plus metrics, then
//! folds the whole character range into a single packed [`BitmapFont`].

use crate::pack::pack_bits;
use crate::raster::Rasterizer;

/// Intensity above which a pixel counts as ink.
const COVERAGE_THRESHOLD: u8 = 127;

/// Extra rows added below the tallest glyph to form the line height.
const LINE_SPACING: u32 = 3;

/// Rendering policy applied uniformly to every glyph in the range.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Substitute uppercase forms for ASCII lowercase letters.
    pub all_caps: bool,
    /// Draw each glyph twice with a 1px horizontal offset.
    pub bold: bool,
    /// Added to every glyph's y offset (positive = move down).
    pub y_offset_adjust: i32,
}

/// Metrics and packed-data location for one character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    /// Character code this glyph was generated for.
    pub code: u8,
    /// Byte index into the shared bitmap blob where this glyph begins.
    pub bitmap_offset: u32,
    /// Bitmap width in pixels.
    pub width: u32,
    /// Bitmap height in pixels.
    pub height: u32,
    /// Cursor advance after drawing, in pixels.
    pub x_advance: i32,
    /// Horizontal shift from the cursor to the bitmap's left edge.
    pub x_offset: i32,
    /// Vertical shift from the baseline to the bitmap's top row
    /// (negative = above the baseline).
    pub y_offset: i32,
}

/// A complete packed font: the shared bitmap blob plus per-glyph records.
///
/// Built once by [`build_font`] and immutable afterwards. Glyphs cover
/// `first_char..=last_char` in order, and their `bitmap_offset` values are
/// contiguous across `bitmap`.
#[derive(Debug, Clone)]
pub struct BitmapFont {
    pub bitmap: Vec<u8>,
    pub glyphs: Vec<Glyph>,
    pub first_char: u8,
    pub last_char: u8,
    /// Line height: tallest glyph plus spacing.
    pub y_advance: u32,
}

/// One extracted glyph before packing: metrics plus its row-major coverage
/// bits.
pub struct ExtractedGlyph {
    pub width: u32,
    pub height: u32,
    pub x_advance: i32,
    pub x_offset: i32,
    pub y_offset: i32,
    /// Row-major, top row first, `width * height` entries.
    pub bits: Vec<bool>,
}

/// Rasterize one character and threshold it to 1-bit coverage.
///
/// Characters with no ink (space) become a 1x1 bitmap holding a single zero
/// bit, with the advance falling back to half the pixel size when the font
/// reports none.
pub fn extract_glyph<R: Rasterizer>(
    rasterizer: &R,
    code: u8,
    options: &RenderOptions,
) -> ExtractedGlyph {
    let ch = char::from(code);
    let render_ch = if options.all_caps && ch.is_ascii_lowercase() {
        ch.to_ascii_uppercase()
    } else {
        ch
    };

    let raster = rasterizer.rasterize(render_ch);
    if raster.width == 0 || raster.height == 0 {
        let advance = rasterizer.measure(render_ch);
        let x_advance = if advance == 0.0 {
            (rasterizer.px_size() / 2) as i32
        } else {
            advance as i32
        };
        return ExtractedGlyph {
            width: 1,
            height: 1,
            x_advance,
            x_offset: 0,
            y_offset: 0,
            bits: vec![false],
        };
    }

    let mut canvas = raster.coverage;
    if options.bold {
        // Second draw shifted +1px, composited with per-pixel max and
        // clipped at the right edge. Right-to-left so each cell still reads
        // the unshifted value of its left neighbor.
        for y in 0..raster.height {
            let row = y * raster.width;
            for x in (1..raster.width).rev() {
                canvas[row + x] = canvas[row + x].max(canvas[row + x - 1]);
            }
        }
    }
    let bits = canvas.iter().map(|&p| p > COVERAGE_THRESHOLD).collect();

    ExtractedGlyph {
        width: raster.width as u32,
        height: raster.height as u32,
        x_advance: rasterizer.measure(render_ch) as i32,
        x_offset: raster.x_min,
        // The bounding box is y-up from the baseline; bitmap space is y-down.
        y_offset: -raster.y_max + options.y_offset_adjust,
        bits,
    }
}

/// Extract and pack every character in `first_char..=last_char`.
///
/// Accumulates packed bytes into one blob, recording each glyph's byte
/// offset; each glyph starts on a fresh byte boundary.
pub fn build_font<R: Rasterizer>(
    rasterizer: &R,
    first_char: u8,
    last_char: u8,
    options: &RenderOptions,
) -> BitmapFont {
    let mut bitmap = Vec::new();
    let mut glyphs = Vec::with_capacity((last_char - first_char) as usize + 1);
    let mut max_height = 0u32;

    for code in first_char..=last_char {
        let extracted = extract_glyph(rasterizer, code, options);
        let packed = pack_bits(&extracted.bits);

        tracing::debug!(
            "glyph 0x{:02X}: {}x{} at offset {}, advance {}",
            code,
            extracted.width,
            extracted.height,
            bitmap.len(),
            extracted.x_advance
        );

        glyphs.push(Glyph {
            code,
            bitmap_offset: bitmap.len() as u32,
            width: extracted.width,
            height: extracted.height,
            x_advance: extracted.x_advance,
            x_offset: extracted.x_offset,
            y_offset: extracted.y_offset,
        });
        max_height = max_height.max(extracted.height);
        bitmap.extend_from_slice(&packed);
    }

    BitmapFont {
        bitmap,
        glyphs,
        first_char,
        last_char,
        y_advance: max_height + LINE_SPACING,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pack::packed_len;
    use crate::raster::{Raster, Rasterizer};

    /// Deterministic stand-in for the TTF engine. Space has no ink, a few
    /// characters have fixed small patterns, everything else is a solid
    /// 3x5 block.
    struct FakeRasterizer;

    impl Rasterizer for FakeRasterizer {
        fn px_size(&self) -> u32 {
            8
        }

        fn measure(&self, ch: char) -> f32 {
            match ch {
                ' ' => 0.0,
                'A'..='Z' => 5.0,
                _ => 4.0,
            }
        }

        fn rasterize(&self, ch: char) -> Raster {
            match ch {
                ' ' => Raster {
                    width: 0,
                    height: 0,
                    x_min: 0,
                    y_max: 0,
                    coverage: Vec::new(),
                },
                // single column, full height
                '!' => Raster {
                    width: 1,
                    height: 3,
                    x_min: 0,
                    y_max: 3,
                    coverage: vec![255, 255, 255],
                },
                // straddles the coverage threshold
                '.' => Raster {
                    width: 2,
                    height: 2,
                    x_min: 0,
                    y_max: 2,
                    coverage: vec![127, 128, 200, 0],
                },
                // left column inked, two empty columns to its right
                'I' => Raster {
                    width: 3,
                    height: 3,
                    x_min: 1,
                    y_max: 3,
                    coverage: vec![255, 0, 0, 255, 0, 0, 255, 0, 0],
                },
                _ => Raster {
                    width: 3,
                    height: 5,
                    x_min: 0,
                    y_max: 5,
                    coverage: vec![255; 15],
                },
            }
        }
    }

    #[test]
    fn test_empty_bbox_becomes_one_blank_pixel() {
        let glyph = extract_glyph(&FakeRasterizer, b' ', &RenderOptions::default());
        assert_eq!((glyph.width, glyph.height), (1, 1));
        assert_eq!(glyph.bits, vec![false]);
        assert_eq!(glyph.x_offset, 0);
        assert_eq!(glyph.y_offset, 0);
        // zero reported advance falls back to px_size / 2
        assert_eq!(glyph.x_advance, 4);
    }

    #[test]
    fn test_coverage_thresholds_above_127() {
        let glyph = extract_glyph(&FakeRasterizer, b'.', &RenderOptions::default());
        assert_eq!(glyph.bits, vec![false, true, true, false]);
    }

    #[test]
    fn test_bit_count_matches_dimensions() {
        let glyph = extract_glyph(&FakeRasterizer, b'A', &RenderOptions::default());
        assert_eq!(glyph.bits.len(), (glyph.width * glyph.height) as usize);
    }

    #[test]
    fn test_metric_sign_conventions() {
        let glyph = extract_glyph(&FakeRasterizer, b'I', &RenderOptions::default());
        assert_eq!(glyph.x_offset, 1);
        assert_eq!(glyph.y_offset, -3);

        let adjusted = RenderOptions {
            y_offset_adjust: 2,
            ..Default::default()
        };
        let glyph = extract_glyph(&FakeRasterizer, b'I', &adjusted);
        assert_eq!(glyph.y_offset, -1);
    }

    #[test]
    fn test_all_caps_renders_uppercase_form() {
        let options = RenderOptions {
            all_caps: true,
            ..Default::default()
        };
        // 'a' picks up the uppercase advance
        let glyph = extract_glyph(&FakeRasterizer, b'a', &options);
        assert_eq!(glyph.x_advance, 5);

        let glyph = extract_glyph(&FakeRasterizer, b'a', &RenderOptions::default());
        assert_eq!(glyph.x_advance, 4);
    }

    #[test]
    fn test_all_caps_keeps_recorded_code() {
        let options = RenderOptions {
            all_caps: true,
            ..Default::default()
        };
        let font = build_font(&FakeRasterizer, b'a', b'a', &options);
        assert_eq!(font.glyphs[0].code, 0x61);
    }

    #[test]
    fn test_bold_widens_strokes() {
        let plain = extract_glyph(&FakeRasterizer, b'I', &RenderOptions::default());
        assert_eq!(
            plain.bits,
            vec![true, false, false, true, false, false, true, false, false]
        );

        let options = RenderOptions {
            bold: true,
            ..Default::default()
        };
        let bold = extract_glyph(&FakeRasterizer, b'I', &options);
        assert_eq!(
            bold.bits,
            vec![true, true, false, true, true, false, true, true, false]
        );
    }

    #[test]
    fn test_bold_clips_at_right_edge() {
        let options = RenderOptions {
            bold: true,
            ..Default::default()
        };
        let glyph = extract_glyph(&FakeRasterizer, b'!', &options);
        assert_eq!((glyph.width, glyph.height), (1, 3));
        assert_eq!(glyph.bits, vec![true, true, true]);
    }

    #[test]
    fn test_offsets_monotonic_and_contiguous() {
        let font = build_font(&FakeRasterizer, b'A', b'C', &RenderOptions::default());
        let offsets: Vec<u32> = font.glyphs.iter().map(|g| g.bitmap_offset).collect();
        assert_eq!(offsets, vec![0, 2, 4]);
        assert_eq!(font.bitmap.len(), 6);

        for pair in font.glyphs.windows(2) {
            let bytes = packed_len((pair[0].width * pair[0].height) as usize);
            assert_eq!(
                pair[1].bitmap_offset as usize,
                pair[0].bitmap_offset as usize + bytes
            );
        }
    }

    #[test]
    fn test_codes_ascend_across_range() {
        let font = build_font(&FakeRasterizer, 0x20, 0x2F, &RenderOptions::default());
        let codes: Vec<u8> = font.glyphs.iter().map(|g| g.code).collect();
        assert_eq!(codes, (0x20..=0x2F).collect::<Vec<u8>>());
        assert_eq!(font.first_char, 0x20);
        assert_eq!(font.last_char, 0x2F);
    }

    #[test]
    fn test_y_advance_is_max_height_plus_spacing() {
        // heights across the range: ' ' 1, '!' 3, '"' 5
        let font = build_font(&FakeRasterizer, b' ', b'"', &RenderOptions::default());
        assert_eq!(font.y_advance, 8);
    }
}
