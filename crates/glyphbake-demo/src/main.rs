//! glyphbake demo - bake a font, draw a string, save a PNG
//!
//! Usage: glyphbake-demo <font-file> [text] [output.png] [--config <file.json>]

mod config;

use std::path::{Path, PathBuf};

use anyhow::Context;
use glyphbake_text::{FontFace, Surface, TextPipeline};
use tracing_subscriber::EnvFilter;

use crate::config::RenderConfig;

struct Args {
    font: PathBuf,
    text: Option<String>,
    output: PathBuf,
    config: Option<PathBuf>,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut positional = Vec::new();
    let mut config = None;
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        if arg == "--config" {
            config = Some(PathBuf::from(args.next().context("--config needs a path")?));
        } else {
            positional.push(arg);
        }
    }

    let mut positional = positional.into_iter();
    let font = positional
        .next()
        .context("usage: glyphbake-demo <font-file> [text] [output.png] [--config <file.json>]")?;

    Ok(Args {
        font: PathBuf::from(font),
        text: positional.next(),
        output: positional.next().map(PathBuf::from).unwrap_or_else(|| "glyphbake.png".into()),
        config,
    })
}

/// Read the font file; the bytes live only until the bake returns
fn load_font(path: &Path) -> anyhow::Result<FontFace> {
    let data = std::fs::read(path).with_context(|| format!("reading font {}", path.display()))?;
    Ok(FontFace::from_bytes(data))
}

fn save_png(surface: &Surface, path: &Path) -> anyhow::Result<()> {
    let mut pixmap = tiny_skia::Pixmap::new(surface.width(), surface.height())
        .context("surface too large for a pixmap")?;

    let rgba = surface.to_rgba();
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(rgba.chunks_exact(4)) {
        *dst = tiny_skia::ColorU8::from_rgba(src[0], src[1], src[2], src[3]).premultiply();
    }

    pixmap
        .save_png(path)
        .with_context(|| format!("writing {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = parse_args()?;
    let mut config = match &args.config {
        Some(path) => RenderConfig::load(path)?,
        None => RenderConfig::default(),
    };
    if let Some(text) = args.text {
        config.text = text;
    }
    config.validate()?;

    let font = load_font(&args.font)?;
    tracing::info!(font = %args.font.display(), bytes = font.len(), "loaded font");

    let pipeline = TextPipeline::new(config.bake, font)
        .context("baking font atlas")?
        .with_missing_glyph(config.missing_glyph);

    let mut surface = Surface::filled(config.width, config.height, config.format, config.background);
    let start = pipeline.origin_at_top(config.origin.x, config.origin.y);
    let end = pipeline
        .draw_text(&config.text, start, &mut surface)
        .with_context(|| format!("drawing {:?}", config.text))?;

    tracing::info!(text = %config.text, end_x = end.x, "rendered text");

    save_png(&surface, &args.output)?;
    tracing::info!(output = %args.output.display(), "saved image");

    Ok(())
}
