//! CLI argument definitions using Clap v4

use clap::{Parser, ValueEnum};

/// Waterprint - render a tiled username watermark as a background style
#[derive(Parser, Debug)]
#[command(name = "waterprint")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Username to draw on the tile
    pub username: String,

    /// Tilt in degrees, a positive integer [env: WATERPRINT_ANGLE, default: 15]
    #[arg(short = 'a', long = "angle", allow_hyphen_values = true)]
    pub angle: Option<String>,

    /// CSS font shorthand [env: WATERPRINT_FONT, default: "24px -apple-system, sans-serif, Arial"]
    #[arg(short = 'f', long = "font")]
    pub font: Option<String>,

    /// What to print on stdout
    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Log pipeline details to stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The style descriptor as a JSON object
    Json,
    /// CSS declarations
    Css,
    /// Only the tile's data URL
    Url,
}
