//! Caller-facing facade: generate a picture and hand back encoded bytes with
//! their MIME type.

use crate::avatar::{generate_avatar, AvatarOptions};
use crate::generate::{
    gradient_walk, hue_drift, tiled_random, GradientOptions, HueDriftOptions, TileOptions,
};
use crate::random::Randomizer;
use crate::Result;

/// Container format of an [`EncodedImage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// Uncompressed 24-bit bitmap
    Bmp,
    /// RGBA PNG
    Png,
}

impl ImageFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            ImageFormat::Bmp => "image/bmp",
            ImageFormat::Png => "image/png",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Bmp => "bmp",
            ImageFormat::Png => "png",
        }
    }
}

/// Encoded file bytes plus the metadata a caller needs to serve them.
#[derive(Debug, Clone)]
pub struct EncodedImage {
    pub format: ImageFormat,
    /// Image width in pixels
    pub width: usize,
    /// Image height in pixels
    pub height: usize,
    pub bytes: Vec<u8>,
}

/// Image generator bound to one randomizer.
///
/// The randomizer is owned, so a provider is used from a single call path at
/// a time; create one per thread for concurrent use.
pub struct ImageProvider<R> {
    rng: R,
}

impl<R: Randomizer> ImageProvider<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Give the randomizer back.
    pub fn into_inner(self) -> R {
        self.rng
    }

    /// Random colour tiles as a BMP.
    #[tracing::instrument(skip(self))]
    pub fn random_bitmap(
        &mut self,
        width: usize,
        height: usize,
        opts: &TileOptions,
    ) -> Result<EncodedImage> {
        let bytes = tiled_random(&mut self.rng, width, height, opts)?.into_bmp()?;
        Ok(EncodedImage {
            format: ImageFormat::Bmp,
            width,
            height,
            bytes,
        })
    }

    /// Smooth RGB random-walk tiles as a PNG.
    #[tracing::instrument(skip(self))]
    pub fn gradient_png(
        &mut self,
        width: usize,
        height: usize,
        opts: &GradientOptions,
    ) -> Result<EncodedImage> {
        let bytes = gradient_walk(&mut self.rng, width, height, opts)?.into_png()?;
        Ok(EncodedImage {
            format: ImageFormat::Png,
            width,
            height,
            bytes,
        })
    }

    /// Hue-drifting HSV tiles as a PNG.
    #[tracing::instrument(skip(self))]
    pub fn hue_png(
        &mut self,
        width: usize,
        height: usize,
        opts: &HueDriftOptions,
    ) -> Result<EncodedImage> {
        let bytes = hue_drift(&mut self.rng, width, height, opts)?.into_png()?;
        Ok(EncodedImage {
            format: ImageFormat::Png,
            width,
            height,
            bytes,
        })
    }

    /// Deterministic avatar as a PNG. Does not touch the randomizer.
    #[tracing::instrument(skip(self))]
    pub fn avatar_png(&self, seed: &str, opts: &AvatarOptions) -> Result<EncodedImage> {
        let sprite = generate_avatar(seed, opts)?;
        let (width, height) = (sprite.width, sprite.height);
        Ok(EncodedImage {
            format: ImageFormat::Png,
            width,
            height,
            bytes: sprite.into_png()?,
        })
    }
}
