use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::constants::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, MAX_CANVAS_SIDE};

#[derive(Parser, Debug)]
#[command(name = "text-faces")]
#[command(version)]
#[command(about = "Measure and render text through a chain of fallback faces", long_about = None)]
#[command(after_help = "\
CONFIGURATION:
    Faces are read from `text-faces/config.toml` in the user config
    directory unless --config is given. Each [[faces]] entry lists the
    code point ranges it covers; the last face is used for any rune no
    face covers.")]
pub struct Cli {
    /// Face chain configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Print the advance of TEXT
    Advance { text: String },
    /// Print the width and height of TEXT, one line per `\n`
    Measure {
        text: String,
        /// Baseline-to-baseline distance in pixels
        #[arg(long)]
        line_spacing: Option<f32>,
    },
    /// Show which face handles each run of TEXT
    Runs { text: String },
    /// List the laid-out glyphs of TEXT
    Glyphs { text: String },
    /// Render TEXT as ASCII art
    Render {
        text: String,
        #[arg(
            long,
            default_value_t = DEFAULT_CANVAS_WIDTH,
            value_parser = clap::value_parser!(u32).range(1..=MAX_CANVAS_SIDE as i64)
        )]
        width: u32,
        #[arg(
            long,
            default_value_t = DEFAULT_CANVAS_HEIGHT,
            value_parser = clap::value_parser!(u32).range(1..=MAX_CANVAS_SIDE as i64)
        )]
        height: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_advance() {
        let cli = Cli::parse_from(["text-faces", "advance", "Hello"]);
        assert!(cli.config.is_none());
        assert_eq!(
            cli.command,
            Command::Advance {
                text: "Hello".to_string()
            }
        );
    }

    #[test]
    fn test_parse_global_config() {
        let cli = Cli::parse_from(["text-faces", "runs", "aあ", "--config", "faces.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("faces.toml")));
        assert!(matches!(cli.command, Command::Runs { .. }));
    }

    #[test]
    fn test_parse_measure_line_spacing() {
        let cli = Cli::parse_from(["text-faces", "measure", "a\nb", "--line-spacing", "18"]);
        assert_eq!(
            cli.command,
            Command::Measure {
                text: "a\nb".to_string(),
                line_spacing: Some(18.0)
            }
        );
    }

    #[test]
    fn test_parse_render_defaults() {
        let cli = Cli::parse_from(["text-faces", "render", "Hi"]);
        assert_eq!(
            cli.command,
            Command::Render {
                text: "Hi".to_string(),
                width: DEFAULT_CANVAS_WIDTH,
                height: DEFAULT_CANVAS_HEIGHT
            }
        );
    }

    #[test]
    fn test_render_size_limits() {
        let cli = Cli::parse_from(["text-faces", "render", "Hi", "--width", "8192"]);
        assert!(matches!(cli.command, Command::Render { width: 8192, .. }));

        for size in ["70000", "0", "-1"] {
            let result =
                Cli::try_parse_from(["text-faces", "render", "Hi", "--height", size]);
            assert!(result.is_err(), "height {}", size);
        }
    }

    #[test]
    fn test_missing_subcommand_is_an_error() {
        assert!(Cli::try_parse_from(["text-faces"]).is_err());
    }
}
