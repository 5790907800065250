//! font-export - TTF to BitmapFont converter
//!
//! Rasterizes a character range from a TTF font at a fixed pixel size and
//! emits a C header with the packed 1-bit bitmap, per-glyph metrics, and a
//! `BitmapFont` record tying them together.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use font_export::{build_font, generate_header, RenderOptions, TtfRasterizer};

#[derive(Parser)]
#[command(name = "font-export")]
#[command(about = "Convert a TTF font to a packed 1-bit BitmapFont header")]
#[command(version)]
struct Cli {
    /// Path to the TTF font file
    ttf_file: PathBuf,

    /// Font size in pixels
    #[arg(short, long, default_value_t = 8)]
    size: u32,

    /// Output filename (".h" appended if missing)
    #[arg(short, long)]
    output: String,

    /// Font variable name (defaults to the output base name)
    #[arg(short, long)]
    name: Option<String>,

    /// First character code, decimal or 0x-prefixed hex
    #[arg(long, value_parser = parse_char_code, default_value = "0x20")]
    first: u32,

    /// Last character code, decimal or 0x-prefixed hex
    #[arg(long, value_parser = parse_char_code, default_value = "0x7E")]
    last: u32,

    /// Convert lowercase letters to uppercase
    #[arg(long)]
    all_caps: bool,

    /// Render bold by drawing twice with a 1px offset
    #[arg(long)]
    bold: bool,

    /// Vertical offset adjustment in pixels (positive = move down)
    #[arg(long, default_value_t = 0)]
    y_offset: i32,
}

fn parse_char_code(s: &str) -> Result<u32, String> {
    let parsed = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16)
    } else {
        s.parse()
    };
    parsed.map_err(|_| format!("invalid character code: {}", s))
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    if cli.first > cli.last {
        anyhow::bail!(
            "--first (0x{:02X}) must not exceed --last (0x{:02X})",
            cli.first,
            cli.last
        );
    }
    if cli.last > 0xFF {
        // glyph records store one-byte character codes
        anyhow::bail!("--last (0x{:X}) must fit in one byte", cli.last);
    }

    let output_file = if cli.output.ends_with(".h") {
        cli.output.clone()
    } else {
        format!("{}.h", cli.output)
    };
    let symbol = match cli.name {
        Some(ref name) => name.clone(),
        None => cli
            .output
            .strip_suffix(".h")
            .unwrap_or(&cli.output)
            .to_string(),
    };

    tracing::info!("Converting {:?} at size {}px...", cli.ttf_file, cli.size);
    if cli.all_caps {
        tracing::info!("  - ALL CAPS mode enabled");
    }
    if cli.bold {
        tracing::info!("  - Bold rendering enabled");
    }
    if cli.y_offset != 0 {
        tracing::info!("  - Vertical offset: {:+} pixels", cli.y_offset);
    }

    let rasterizer = TtfRasterizer::load(&cli.ttf_file, cli.size)?;
    let options = RenderOptions {
        all_caps: cli.all_caps,
        bold: cli.bold,
        y_offset_adjust: cli.y_offset,
    };
    let font = build_font(&rasterizer, cli.first as u8, cli.last as u8, &options);

    tracing::info!(
        "Converted font: {} glyphs, {} bitmap bytes, line height {}",
        font.glyphs.len(),
        font.bitmap.len(),
        font.y_advance
    );

    let header = generate_header(&font, &symbol)?;
    std::fs::write(&output_file, header)
        .with_context(|| format!("Failed to write output: {:?}", output_file))?;

    tracing::info!("Generated {}", output_file);

    Ok(())
}
