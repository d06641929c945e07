//! mockimg - Generate mock images from the command line
//!
//! Writes BMP/PNG bytes to a file or to stdout.

use clap::{Args, Parser, Subcommand};
use mockforge_image::{
    AvatarOptions, EncodedImage, GradientOptions, HueDriftOptions, ImageProvider, TileOptions,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "mockimg")]
#[command(version)]
#[command(about = "Generate mock BMP/PNG images and seed-based avatars", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output file (default: stdout)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Seed for the random tile generators (default: entropy)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Log debug details to stderr
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Args)]
struct Canvas {
    /// Image width in pixels
    #[arg(long, default_value = "256")]
    width: usize,

    /// Image height in pixels
    #[arg(long, default_value = "256")]
    height: usize,

    /// Tile edge length in pixels
    #[arg(short, long, default_value = "32")]
    tile_size: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Random colour tiles as a 24-bit BMP
    Bmp {
        #[command(flatten)]
        canvas: Canvas,
    },

    /// Smooth RGB random-walk tiles as a PNG
    Gradient {
        #[command(flatten)]
        canvas: Canvas,

        /// Maximum per-channel step between tiles
        #[arg(short, long, default_value = "30")]
        delta: i32,
    },

    /// Hue-drifting HSV tiles as a PNG
    Hue {
        #[command(flatten)]
        canvas: Canvas,

        /// Maximum hue step between tiles, in degrees
        #[arg(short, long, default_value = "15")]
        max_hue_step: f32,
    },

    /// Deterministic avatar sprite for a seed string as a PNG
    Avatar {
        /// Seed string (e.g. a user name or e-mail)
        #[arg(value_name = "SEED")]
        text: String,

        /// Logical sprite size in cells (even, >= 2)
        #[arg(short, long, default_value = "8")]
        size: usize,

        /// Upscale factor
        #[arg(long, default_value = "8")]
        scale: usize,
    },
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        Level::DEBUG
    } else if quiet {
        Level::WARN
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut provider = ImageProvider::new(rng);

    let image: EncodedImage = match cli.command {
        Commands::Bmp { canvas } => provider.random_bitmap(
            canvas.width,
            canvas.height,
            &TileOptions {
                tile_size: canvas.tile_size,
            },
        )?,

        Commands::Gradient { canvas, delta } => provider.gradient_png(
            canvas.width,
            canvas.height,
            &GradientOptions {
                tile_size: canvas.tile_size,
                delta,
            },
        )?,

        Commands::Hue {
            canvas,
            max_hue_step,
        } => provider.hue_png(
            canvas.width,
            canvas.height,
            &HueDriftOptions {
                tile_size: canvas.tile_size,
                max_hue_step,
            },
        )?,

        Commands::Avatar { text, size, scale } => provider.avatar_png(
            &text,
            &AvatarOptions {
                logical_size: size,
                scale,
            },
        )?,
    };

    match cli.output {
        Some(path) => {
            fs::write(&path, &image.bytes)
                .map_err(|e| format!("Failed to write '{}': {}", path.display(), e))?;
            info!(
                "Written {}x{} {} ({} bytes) to '{}'",
                image.width,
                image.height,
                image.format.mime_type(),
                image.bytes.len(),
                path.display()
            );
        }
        None => {
            io::stdout().write_all(&image.bytes)?;
        }
    }

    Ok(())
}
