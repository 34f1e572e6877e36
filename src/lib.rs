pub mod cli;
pub mod config;
pub mod constants;
pub mod font;
pub mod renderer;
pub mod text;

use std::io::Write;

use log::info;

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::font::Point;
use crate::renderer::{Canvas, Color};
use crate::text::{DrawOptions, LayoutOptions};

pub fn run(cli: &Cli, out: &mut impl Write) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => {
            info!("Using config file {}", path.display());
            Config::from_path(path)?
        }
        None => Config::load(),
    };
    let chain = config.build()?;
    let face = &chain.face;

    match &cli.command {
        Command::Advance { text } => {
            writeln!(out, "{}", text::advance(text, face))?;
        }
        Command::Measure { text, line_spacing } => {
            let options = LayoutOptions {
                line_spacing: line_spacing.or(chain.line_spacing),
                ..Default::default()
            };
            let (width, height) = text::measure(text, face, &options);
            writeln!(out, "{} x {}", width, height)?;
        }
        Command::Runs { text } => {
            for run in face.runs(text) {
                writeln!(
                    out,
                    "{}..{}\t{}\t{:?}",
                    run.start,
                    run.end,
                    chain.name(run.face_index),
                    run.text
                )?;
            }
        }
        Command::Glyphs { text } => {
            let mut glyphs = Vec::new();
            let options = LayoutOptions {
                line_spacing: chain.line_spacing,
                ..Default::default()
            };
            text::append_glyphs(&mut glyphs, text, face, &options);
            for glyph in &glyphs {
                let image = match &glyph.image {
                    Some(image) if image.buffer.is_colored() => {
                        format!("{}x{} color", image.width, image.height)
                    }
                    Some(image) => format!("{}x{}", image.width, image.height),
                    None => "-".to_string(),
                };
                writeln!(
                    out,
                    "{}..{}\t{:?}\tx={} y={}\t{}",
                    glyph.start, glyph.end, glyph.character, glyph.origin_x, glyph.origin_y, image
                )?;
            }
        }
        Command::Render {
            text,
            width,
            height,
        } => {
            let mut canvas = Canvas::new(*width, *height)?;
            let options = DrawOptions {
                origin: Point::default(),
                color: Color::WHITE,
                layout: LayoutOptions {
                    line_spacing: chain.line_spacing,
                    ..Default::default()
                },
            };
            text::draw(&mut canvas, text, face, &options);
            writeln!(out, "{}", canvas.to_ascii())?;
        }
    }

    Ok(())
}
