//! Command-line argument definitions for the Swimlane CLI.
//!
//! Arguments control the input definition, output path, configuration file,
//! viewport overrides, status highlighting and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Swimlane pipeline diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input pipeline definition (TOML)
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output SVG file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Viewport width in pixels, overriding the configuration
    #[arg(long)]
    pub width: Option<f32>,

    /// Viewport height in pixels, overriding the configuration
    #[arg(long)]
    pub height: Option<f32>,

    /// Name of the status overlay to highlight
    #[arg(short, long)]
    pub status: Option<String>,

    /// Print the computed layout of every node
    #[arg(long)]
    pub describe: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
