//! Command line options.

use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

/// Render a simulated status bar headlessly and save the last frame as PNG.
#[derive(Parser, Debug)]
#[command(name = "simulator", version)]
pub struct Args {
    /// Number of frames to simulate.
    #[arg(long, default_value_t = 1500)]
    pub frames: u32,

    /// Display width in pixels.
    #[arg(long, default_value_t = 192)]
    pub width: u32,

    /// Display height in pixels.
    #[arg(long, default_value_t = 32)]
    pub height: u32,

    /// Rebuild every widget from the layout every N frames.
    #[arg(long)]
    pub reset_every: Option<u32>,

    /// Where the final frame is written.
    #[arg(long, short, default_value = "status_bar.png")]
    pub out: PathBuf,

    /// Pixel scale of the exported image.
    #[arg(long, default_value_t = 4)]
    pub scale: u32,

    /// Log the layout configuration before running.
    #[arg(long)]
    pub dump_config: bool,

    /// Maximum log level (off, error, warn, info, debug, trace).
    #[arg(long, default_value_t = LevelFilter::Info)]
    pub log_level: LevelFilter,
}
