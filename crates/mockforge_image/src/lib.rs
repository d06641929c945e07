//! # mockforge_image
//!
//! Procedural mock images for tests, fixtures and demo APIs.
//!
//! ## Features
//!
//! - **Generators**: tiled random colours, smooth random-walk gradients,
//!   hue-drifting HSV fields and deterministic seed-based avatar sprites
//! - **Encoders**: byte-exact 24-bit BMP and RGBA PNG (zlib-compressed IDAT,
//!   filter 0) with a table-driven CRC-32
//!
//! ## Quick Start
//!
//! ### Random tiles as BMP
//!
//! ```ignore
//! use mockforge_image::{ImageProvider, TileOptions};
//!
//! let mut provider = ImageProvider::new(rand::thread_rng());
//! let image = provider.random_bitmap(256, 256, &TileOptions::default())?;
//! assert_eq!(image.format.mime_type(), "image/bmp");
//! ```
//!
//! ### Avatar from a seed
//!
//! ```ignore
//! use mockforge_image::{generate_avatar, AvatarOptions};
//!
//! let opts = AvatarOptions { logical_size: 16, scale: 8 };
//! let png = generate_avatar("alice", &opts)?.into_png()?;
//! ```

use thiserror::Error;

pub mod avatar;
pub mod bmp;
pub mod color;
pub mod crc32;
pub mod generate;
pub mod pixel;
pub mod png;
pub mod provider;
pub mod random;

pub use avatar::{generate_avatar, AvatarOptions};
pub use bmp::encode_bmp;
pub use color::{hsv_to_rgb, Palette, Rgb};
pub use generate::{
    gradient_walk, hue_drift, tiled_random, GradientOptions, HueDriftOptions, TileOptions,
};
pub use pixel::{PixelBuffer, PixelLayout};
pub use png::encode_png;
pub use provider::{EncodedImage, ImageFormat, ImageProvider};
pub use random::{RandomByteStream, Randomizer};

/// Errors that can occur while generating or encoding an image.
#[derive(Debug, Error)]
pub enum ImageError {
    /// Width or height is zero or above [`DIMENSION_LIMIT`]
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    /// Tile size must be at least one pixel
    #[error("invalid tile size: {0}")]
    InvalidTileSize(usize),

    /// Buffer size doesn't match expected size for dimensions
    #[error("buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// Pixel buffer handed to an encoder that expects another channel layout
    #[error("pixel layout mismatch: expected {expected:?}, got {actual:?}")]
    LayoutMismatch {
        expected: PixelLayout,
        actual: PixelLayout,
    },

    /// Avatar logical size must be even and at least 2
    #[error("invalid avatar size: {0} (must be even and >= 2)")]
    InvalidAvatarSize(usize),

    /// Avatar upscale factor must be at least 1
    #[error("invalid scale: {0}")]
    InvalidScale(usize),

    /// Pixel count above [`PIXEL_LIMIT`], or a container header field would
    /// overflow
    #[error("image too large")]
    TooLarge,
}

/// Result type for image operations.
pub type Result<T> = core::result::Result<T, ImageError>;

/// Largest accepted width or height, in pixels.
pub const DIMENSION_LIMIT: usize = 1_000_000;

/// Largest accepted `width * height` (1 GiB of RGBA pixels).
pub const PIXEL_LIMIT: usize = 1 << 28;

pub(crate) fn check_dimensions(width: usize, height: usize) -> Result<()> {
    if width == 0 || height == 0 || width > DIMENSION_LIMIT || height > DIMENSION_LIMIT {
        return Err(ImageError::InvalidDimensions { width, height });
    }
    match width.checked_mul(height) {
        Some(pixels) if pixels <= PIXEL_LIMIT => Ok(()),
        _ => Err(ImageError::TooLarge),
    }
}
