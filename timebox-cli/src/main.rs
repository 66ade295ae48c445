//! TimeBox CLI - inspect assets and captures for the TimeBox LED matrix
//!
//! Decodes GIF images and sprite fonts the way the device shows them and
//! splits raw device captures into frames.

mod commands;
mod utils;

use clap::{Parser, Subcommand};
use commands::{cmd_frames, cmd_glyph, cmd_info, cmd_payload, cmd_show};
use std::path::PathBuf;
use timebox_image::FontConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "timebox")]
#[command(author, version, about = "Inspect TimeBox assets and device captures")]
#[command(long_about = "
Tools for the TimeBox 11x11 LED matrix.

Examples:
  timebox info sprite.gif
  timebox info sprite.gif --json
  timebox show sprite.gif --left 4
  timebox glyph ArcadeClassic.gif Q --gamma 0.5
  timebox frames capture.bin --chunk 16
  timebox payload \"set view\" 00 01
")]
struct Cli {
    /// Log decoding details (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the structure of a GIF file
    #[command(alias = "i")]
    Info {
        /// GIF file to inspect
        gif: PathBuf,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Print the 11x11 device image of a GIF as 4-bit RGB
    Show {
        /// GIF file to decode
        gif: PathBuf,

        /// Left edge of the device window
        #[arg(short, long, default_value_t = 0)]
        left: usize,

        /// Top edge of the device window
        #[arg(short, long, default_value_t = 0)]
        top: usize,
    },

    /// Print one glyph of a sprite font
    Glyph {
        /// Font sheet GIF
        font: PathBuf,

        /// Letter to render (A-Z, case-insensitive)
        letter: char,

        /// Glyph width in pixels
        #[arg(long, default_value_t = FontConfig::ARCADE_CLASSIC.glyph_width)]
        width: usize,

        /// Glyph height in pixels
        #[arg(long, default_value_t = FontConfig::ARCADE_CLASSIC.glyph_height)]
        height: usize,

        /// Distance between glyph left edges
        #[arg(long, default_value_t = FontConfig::ARCADE_CLASSIC.spacing)]
        spacing: usize,

        /// Gamma applied to glyph pixels
        #[arg(short, long, default_value_t = FontConfig::ARCADE_CLASSIC.gamma)]
        gamma: f64,
    },

    /// Split a raw device capture into garbage runs and frames
    Frames {
        /// Capture file
        capture: PathBuf,

        /// Bytes fed per read
        #[arg(short, long, default_value_t = 1024)]
        chunk: usize,
    },

    /// Print the payload of a device command
    Payload {
        /// Command name, e.g. "set view"
        command: String,

        /// Argument bytes in hex
        args: Vec<String>,
    },
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Info { gif, json } => cmd_info(&gif, json),
        Commands::Show { gif, left, top } => cmd_show(&gif, left, top),
        Commands::Glyph {
            font,
            letter,
            width,
            height,
            spacing,
            gamma,
        } => cmd_glyph(
            &font,
            letter,
            FontConfig {
                glyph_width: width,
                glyph_height: height,
                spacing,
                gamma,
            },
        ),
        Commands::Frames { capture, chunk } => cmd_frames(&capture, chunk),
        Commands::Payload { command, args } => cmd_payload(&command, &args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
