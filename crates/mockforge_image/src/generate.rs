//! Tile-based pixel generators.
//!
//! All three generators partition the canvas into `tile_size × tile_size`
//! tiles (clipped at the right and bottom edges), visit them row-major and
//! fill each with a single colour drawn from the caller's [`Randomizer`].

use crate::color::{hsv_to_rgb, Rgb};
use crate::pixel::{PixelBuffer, PixelLayout};
use crate::random::Randomizer;
use crate::{ImageError, Result};
use tracing::debug;

const HUE_SATURATION: f32 = 0.6;
const HUE_VALUE: f32 = 0.9;

/// Options for [`tiled_random`].
#[derive(Clone, Debug)]
pub struct TileOptions {
    /// Edge length of a square tile in pixels (>= 1).
    pub tile_size: usize,
}

impl Default for TileOptions {
    fn default() -> Self {
        Self { tile_size: 32 }
    }
}

/// Options for [`gradient_walk`].
#[derive(Clone, Debug)]
pub struct GradientOptions {
    /// Edge length of a square tile in pixels (>= 1).
    pub tile_size: usize,
    /// Maximum per-channel change between consecutive tiles.
    pub delta: i32,
}

impl Default for GradientOptions {
    fn default() -> Self {
        Self {
            tile_size: 32,
            delta: 30,
        }
    }
}

/// Options for [`hue_drift`].
#[derive(Clone, Debug)]
pub struct HueDriftOptions {
    /// Edge length of a square tile in pixels (>= 1).
    pub tile_size: usize,
    /// Maximum hue change between consecutive tiles, in degrees.
    pub max_hue_step: f32,
}

impl Default for HueDriftOptions {
    fn default() -> Self {
        Self {
            tile_size: 32,
            max_hue_step: 15.0,
        }
    }
}

/// Visit every tile row-major as `(x, y, w, h)`.
fn for_each_tile(
    width: usize,
    height: usize,
    tile_size: usize,
    mut f: impl FnMut(usize, usize, usize, usize),
) {
    for y in (0..height).step_by(tile_size) {
        let h = tile_size.min(height - y);
        for x in (0..width).step_by(tile_size) {
            let w = tile_size.min(width - x);
            f(x, y, w, h);
        }
    }
}

fn check_tile_size(tile_size: usize) -> Result<()> {
    if tile_size == 0 {
        return Err(ImageError::InvalidTileSize(tile_size));
    }
    Ok(())
}

/// One uniformly random colour per tile, returned as a BGR buffer ready for
/// the BMP encoder. Channels are drawn R, G, B.
pub fn tiled_random<R: Randomizer>(
    rng: &mut R,
    width: usize,
    height: usize,
    opts: &TileOptions,
) -> Result<PixelBuffer> {
    check_tile_size(opts.tile_size)?;
    let mut buffer = PixelBuffer::new(width, height, PixelLayout::Bgr24)?;
    debug!(width, height, tile_size = opts.tile_size, "tiled random");

    for_each_tile(width, height, opts.tile_size, |x, y, w, h| {
        let r = rng.next_int(0, 256) as u8;
        let g = rng.next_int(0, 256) as u8;
        let b = rng.next_int(0, 256) as u8;
        buffer.fill_rect(x, y, w, h, [r, g, b]);
    });

    Ok(buffer)
}

#[inline]
fn perturb<R: Randomizer>(rng: &mut R, channel: i32, delta: i32) -> i32 {
    let step = ((rng.next_double() * 2.0 - 1.0) * f64::from(delta)).round_ties_even() as i32;
    channel.saturating_add(step).clamp(0, 255)
}

/// Random walk in RGB space: each tile moves every channel by at most
/// `delta` from the previous tile, clamped to `[0, 255]`. RGBA output.
pub fn gradient_walk<R: Randomizer>(
    rng: &mut R,
    width: usize,
    height: usize,
    opts: &GradientOptions,
) -> Result<PixelBuffer> {
    check_tile_size(opts.tile_size)?;
    let mut buffer = PixelBuffer::new(width, height, PixelLayout::Rgba32)?;
    debug!(
        width,
        height,
        tile_size = opts.tile_size,
        delta = opts.delta,
        "gradient walk"
    );

    let mut r = rng.next_int(0, 256);
    let mut g = rng.next_int(0, 256);
    let mut b = rng.next_int(0, 256);

    for_each_tile(width, height, opts.tile_size, |x, y, w, h| {
        r = perturb(rng, r, opts.delta);
        g = perturb(rng, g, opts.delta);
        b = perturb(rng, b, opts.delta);
        buffer.fill_rect(x, y, w, h, [r as u8, g as u8, b as u8]);
    });

    Ok(buffer)
}

/// Random walk on the hue circle at fixed saturation 0.6 and value 0.9.
/// RGBA output.
pub fn hue_drift<R: Randomizer>(
    rng: &mut R,
    width: usize,
    height: usize,
    opts: &HueDriftOptions,
) -> Result<PixelBuffer> {
    check_tile_size(opts.tile_size)?;
    let mut buffer = PixelBuffer::new(width, height, PixelLayout::Rgba32)?;
    debug!(
        width,
        height,
        tile_size = opts.tile_size,
        max_hue_step = opts.max_hue_step,
        "hue drift"
    );

    let mut hue = (rng.next_double() * 360.0) as f32;

    for_each_tile(width, height, opts.tile_size, |x, y, w, h| {
        let u = (rng.next_double() * 2.0 - 1.0) as f32;
        hue = (hue + u * opts.max_hue_step + 360.0).rem_euclid(360.0);
        let Rgb { r, g, b } = hsv_to_rgb(hue, HUE_SATURATION, HUE_VALUE);
        buffer.fill_rect(x, y, w, h, [r, g, b]);
    });

    Ok(buffer)
}
