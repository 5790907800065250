//! C header generator

use anyhow::Result;
use std::fmt::Write as FmtWrite;

use crate::glyph::BitmapFont;

/// Bytes per line in the emitted bitmap array.
const BYTES_PER_LINE: usize = 12;

/// Bits per pixel in the packed bitmap (reserved for future depths).
const BIT_DEPTH: u32 = 1;

/// Render `font` as a C header: an include guard, `<symbol>_bitmap`,
/// `<symbol>_glyphs` with one annotated row per glyph, and the top-level
/// `BitmapFont` record named `symbol`.
///
/// The output is a pure function of its inputs; identical inputs produce
/// byte-identical text.
pub fn generate_header(font: &BitmapFont, symbol: &str) -> Result<String> {
    let mut output = String::new();
    let guard = format!("__{}_H__", symbol.to_uppercase());

    writeln!(output, "#ifndef {}", guard)?;
    writeln!(output, "#define {}", guard)?;
    writeln!(output)?;
    writeln!(output, "#include \"BitmapFont.h\"")?;
    writeln!(output)?;

    writeln!(output, "static uint8_t {}_bitmap[] = {{", symbol)?;
    for (i, chunk) in font.bitmap.chunks(BYTES_PER_LINE).enumerate() {
        let hex: Vec<String> = chunk.iter().map(|b| format!("0x{:02X}", b)).collect();
        if (i + 1) * BYTES_PER_LINE < font.bitmap.len() {
            writeln!(output, "  {},", hex.join(", "))?;
        } else {
            writeln!(output, "  {}", hex.join(", "))?;
        }
    }
    writeln!(output, "}};")?;
    writeln!(output)?;

    writeln!(output, "static BitmapFontGlyph {}_glyphs[] = {{", symbol)?;
    for glyph in &font.glyphs {
        writeln!(
            output,
            "  {{ {:5}, {:3}, {:3}, {:3}, {:4}, {:4} }},   // 0x{:02X} '{}'",
            glyph.bitmap_offset,
            glyph.width,
            glyph.height,
            glyph.x_advance,
            glyph.x_offset,
            glyph.y_offset,
            glyph.code,
            char::from(glyph.code),
        )?;
    }
    writeln!(output, "}};")?;
    writeln!(output)?;

    writeln!(output, "static BitmapFont {} = {{", symbol)?;
    writeln!(
        output,
        "  {0}, {1}_bitmap, {1}_glyphs, 0x{2:02X}, 0x{3:02X}, {4}",
        BIT_DEPTH, symbol, font.first_char, font.last_char, font.y_advance,
    )?;
    writeln!(output, "}};")?;
    writeln!(output)?;
    writeln!(output, "#endif // {}", guard)?;

    Ok(output)
}
