//! Deterministic humanoid avatar sprites.
//!
//! A seed string is hashed into a [`RandomByteStream`]; every shape decision
//! below is drawn from that stream in a fixed order, so the same
//! `(seed, logical_size, scale)` always yields the same bytes. Only the left
//! half of the sprite is synthesized, then mirrored.

use crate::color::Palette;
use crate::pixel::{PixelBuffer, PixelLayout};
use crate::random::RandomByteStream;
use crate::{ImageError, Result};
use tracing::debug;

const BACKGROUND: u8 = 0;
const PRIMARY: u8 = 1;
const SECONDARY: u8 = 2;
const ACCENT: u8 = 3;

/// Largest accepted logical sprite size.
pub const MAX_LOGICAL_SIZE: usize = 4096;

/// Options for [`generate_avatar`].
#[derive(Clone, Debug)]
pub struct AvatarOptions {
    /// Sprite edge length in logical cells. Must be even and >= 2.
    pub logical_size: usize,
    /// Nearest-neighbour upscale factor (>= 1).
    pub scale: usize,
}

impl Default for AvatarOptions {
    fn default() -> Self {
        Self {
            logical_size: 8,
            scale: 8,
        }
    }
}

/// `v < lo → lo`, `v > hi → hi`. Unlike [`i32::clamp`] this tolerates
/// `lo > hi`, which happens for very small sprites.
#[inline]
fn clamp_i32(v: i32, lo: i32, hi: i32) -> i32 {
    if v < lo {
        lo
    } else if v > hi {
        hi
    } else {
        v
    }
}

#[inline]
fn round_i32(v: f64) -> i32 {
    v.round_ties_even() as i32
}

#[inline]
fn round_f32(v: f32) -> i32 {
    v.round_ties_even() as i32
}

/// Label grid for the left half of the sprite plus the populated extent of
/// each row. Out-of-range reads return background and writes are dropped.
struct RegionGrid {
    size: i32,
    half: i32,
    cells: Vec<u8>,
    left_bound: Vec<i32>,
    right_bound: Vec<i32>,
}

impl RegionGrid {
    fn new(size: i32) -> Self {
        let half = size / 2;
        Self {
            size,
            half,
            cells: vec![BACKGROUND; (size * half) as usize],
            left_bound: vec![half; size as usize],
            right_bound: vec![-1; size as usize],
        }
    }

    #[inline]
    fn index(&self, y: i32, x: i32) -> Option<usize> {
        if x < 0 || x >= self.half || y < 0 || y >= self.size {
            return None;
        }
        Some((y * self.half + x) as usize)
    }

    #[inline]
    fn get(&self, y: i32, x: i32) -> u8 {
        self.index(y, x).map_or(BACKGROUND, |i| self.cells[i])
    }

    #[inline]
    fn set(&mut self, y: i32, x: i32, label: u8) {
        if let Some(i) = self.index(y, x) {
            self.cells[i] = label;
        }
    }

    /// Set a cell and widen the row's bounds.
    fn mark(&mut self, y: i32, x: i32, label: u8) {
        let Some(i) = self.index(y, x) else {
            return;
        };
        self.cells[i] = label;
        let row = y as usize;
        self.left_bound[row] = self.left_bound[row].min(x);
        self.right_bound[row] = self.right_bound[row].max(x);
    }

    fn mark_span(&mut self, y: i32, left: i32, span: i32) {
        for x in 0..span {
            self.mark(y, left + x, PRIMARY);
        }
    }

    /// Inclusive `(left, right)` extent of row `y`, or `None` if nothing was
    /// ever marked there.
    fn row_bounds(&self, y: i32) -> Option<(i32, i32)> {
        if y < 0 || y >= self.size {
            return None;
        }
        let (l, r) = (self.left_bound[y as usize], self.right_bound[y as usize]);
        (l <= r).then_some((l, r))
    }

    /// Full `size × size` label grid, column `x` mirrored to `size - 1 - x`.
    fn mirror(&self) -> Vec<u8> {
        let size = self.size as usize;
        let half = self.half as usize;
        let mut full = vec![BACKGROUND; size * size];
        for y in 0..size {
            let src = &self.cells[y * half..(y + 1) * half];
            let dst = &mut full[y * size..(y + 1) * size];
            for (x, &label) in src.iter().enumerate() {
                dst[x] = label;
                dst[size - 1 - x] = label;
            }
        }
        full
    }
}

/// Heights and start rows of the head, body and legs bands.
#[derive(Debug, Clone, Copy)]
struct Bands {
    head: i32,
    body: i32,
    legs: i32,
    body_start: i32,
    legs_start: i32,
}

impl Bands {
    fn sample(stream: &mut RandomByteStream, size: i32) -> Self {
        let size_f = f64::from(size);
        let mut remaining = size;
        let head = clamp_i32(
            round_i32(stream.next_gaussian(size_f * 0.3, size_f * 0.08)),
            2,
            size - 4,
        );
        remaining -= head;
        let body = clamp_i32(
            round_i32(stream.next_gaussian(size_f * 0.4, size_f * 0.10)),
            2,
            remaining - 2,
        );
        remaining -= body;
        let legs = remaining.max(1);

        Self {
            head,
            body,
            legs,
            body_start: head,
            legs_start: head + body,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LegsMode {
    /// Two separate legs with a gap
    Pair,
    /// One tapering block
    Skirt,
    /// No legs at all
    Floating,
}

impl LegsMode {
    fn sample(stream: &mut RandomByteStream) -> Self {
        match stream.next_int(3) {
            0 => LegsMode::Pair,
            1 => LegsMode::Skirt,
            _ => LegsMode::Floating,
        }
    }
}

/// Per-band width bases, as fractions of the half width.
#[derive(Debug, Clone, Copy)]
struct WidthBases {
    head: f32,
    body: f32,
    legs: f32,
}

impl WidthBases {
    fn sample(stream: &mut RandomByteStream, half: i32) -> Self {
        let half_f = half as f32;
        let head = half_f * stream.next_gaussian(0.5, 0.15).clamp(0.2, 0.9) as f32;
        let body = half_f * stream.next_gaussian(0.8, 0.15).clamp(0.4, 1.1) as f32;
        let legs = half_f * stream.next_gaussian(0.45, 0.12).clamp(0.2, 0.8) as f32;
        Self { head, body, legs }
    }
}

/// Shape state shared by the row-synthesis passes.
struct Sprite {
    grid: RegionGrid,
    size: i32,
    half: i32,
    /// Column next to the mirror axis; every span is centred on it.
    center: i32,
    /// Upper clamp for a continuous row width.
    max_width: f32,
}

impl Sprite {
    fn new(size: i32) -> Self {
        let half = size / 2;
        Self {
            grid: RegionGrid::new(size),
            size,
            half,
            center: half - 1,
            max_width: half as f32 - 0.2,
        }
    }

    #[inline]
    fn clamp_width(&self, width: f32, min: f32) -> f32 {
        let mut w = width;
        if w < min {
            w = min;
        }
        if w > self.max_width {
            w = self.max_width;
        }
        w
    }

    /// Bulge profile: narrow at the top, widest mid-band.
    fn draw_head(&mut self, stream: &mut RandomByteStream, bands: &Bands, base: f32) {
        let mut width = base;
        for y in 0..bands.head {
            let t = if bands.head > 1 {
                y as f32 / (bands.head - 1) as f32
            } else {
                0.0
            };
            let bulge = 1.0 - (2.0 * t - 1.0).abs();

            width *= 0.8 + 0.3 * bulge;
            width += stream.next_gaussian(0.0, f64::from(0.3f32)) as f32;
            width = self.clamp_width(width, 0.5);

            let span = clamp_i32(round_f32(width), 1, self.half);
            let left = self.center - span / 2;
            self.grid.mark_span(y, left, span);
        }
    }

    /// Shoulders with arms over the top third, then a waist taper.
    fn draw_body(&mut self, stream: &mut RandomByteStream, bands: &Bands, base: f32) {
        let shoulder_rows = (bands.body / 3).max(1);
        let mut width = base;

        for i in 0..shoulder_rows {
            let row = bands.body_start + i;
            let stretch = 1.1 + stream.next_gaussian(0.0, f64::from(0.1f32)) as f32;
            let row_width = self.clamp_width(width * stretch, 1.0);

            let span = clamp_i32(round_f32(row_width), 2, self.half);
            let left = self.center - span / 2;
            self.grid.mark_span(row, left, span);

            let arm_len = 1 + stream.next_int(2);
            for d in 1..=arm_len {
                self.grid.mark(row, left - d, PRIMARY);
                self.grid.mark(row, left + span - 1 + d, PRIMARY);
            }
        }

        for y in bands.body_start + shoulder_rows..bands.body_start + bands.body {
            let t = if bands.body > 1 {
                (y - bands.body_start) as f32 / (bands.body - 1) as f32
            } else {
                0.0
            };
            let waist = 1.0 - 0.4 * (2.0 * t - 1.0).abs();
            let target = base * waist;

            width = width * 0.6 + target * 0.4;
            width += stream.next_gaussian(0.0, f64::from(0.25f32)) as f32;
            width = self.clamp_width(width, 1.0);

            let span = clamp_i32(round_f32(width), 2, self.half);
            let left = self.center - span / 2;
            self.grid.mark_span(y, left, span);
        }
    }

    fn draw_legs(
        &mut self,
        stream: &mut RandomByteStream,
        bands: &Bands,
        mode: LegsMode,
        base: f32,
    ) {
        match mode {
            LegsMode::Pair => {
                let leg_width = 1 + stream.next_int(2);
                let leg_gap = 1 + stream.next_int(2);
                let total = leg_width * 2 + leg_gap;
                let mut leg_left = self.center - total / 2;
                if leg_left < 0 {
                    leg_left = 0;
                }
                if leg_left + total > self.half {
                    leg_left = self.half - total;
                }
                let right_start = leg_left + leg_width + leg_gap;

                for y in 0..bands.legs {
                    let row = bands.legs_start + y;
                    if stream.next_int(5) == 0 {
                        continue;
                    }
                    for dx in 0..leg_width {
                        self.grid.mark(row, leg_left + dx, PRIMARY);
                        self.grid.mark(row, right_start + dx, PRIMARY);
                    }
                }
            }
            LegsMode::Skirt => {
                let mut width = base;
                for y in 0..bands.legs {
                    let row = bands.legs_start + y;
                    let t = if bands.legs > 1 {
                        y as f32 / (bands.legs - 1) as f32
                    } else {
                        0.0
                    };

                    width = width * 0.6 + base * (0.9 - 0.4 * t) * 0.4;
                    width += stream.next_gaussian(0.0, f64::from(0.2f32)) as f32;
                    width = self.clamp_width(width, 1.0);

                    let span = clamp_i32(round_f32(width), 1, self.half);
                    let left = self.center - span / 2;

                    if stream.next_int(6) == 0 {
                        continue;
                    }
                    self.grid.mark_span(row, left, span);
                }
            }
            LegsMode::Floating => {}
        }
    }

    /// Clear roughly one in twelve marked cells. Row bounds are left as-is.
    fn erode(&mut self, stream: &mut RandomByteStream) {
        for y in 0..self.size {
            let Some((left, right)) = self.grid.row_bounds(y) else {
                continue;
            };
            for x in left..=right {
                if self.grid.get(y, x) == BACKGROUND {
                    continue;
                }
                if stream.next_int(12) == 0 {
                    self.grid.set(y, x, BACKGROUND);
                }
            }
        }
    }

    /// Spine, eyes, belt and shoes, in that order.
    fn decorate(&mut self, stream: &mut RandomByteStream, bands: &Bands) {
        for y in bands.body_start..bands.body_start + bands.body {
            let Some((left, right)) = self.grid.row_bounds(y) else {
                continue;
            };
            let mid = self.center;
            if mid >= left && mid <= right && self.grid.get(y, mid) == PRIMARY {
                self.grid.set(y, mid, SECONDARY);
            }
        }

        if bands.head > 1 {
            let eyes_row = clamp_i32(1 + stream.next_int(bands.head - 1), 1, bands.head - 1);
            let offset = 1 + stream.next_int((self.half - 2).max(1));
            let left_eye = self.center - offset;
            let right_eye = if self.center + offset >= self.half {
                self.half - 1
            } else {
                self.center + offset
            };

            for eye in [left_eye, right_eye] {
                if eye >= 0 && eye < self.half && self.grid.get(eyes_row, eye) != BACKGROUND {
                    self.grid.set(eyes_row, eye, ACCENT);
                }
            }
        }

        let belt_row = bands.body_start + bands.body / 2;
        if belt_row >= bands.body_start && belt_row < bands.body_start + bands.body {
            for x in 0..self.half {
                if self.grid.get(belt_row, x) != BACKGROUND && stream.next_int(3) == 0 {
                    self.grid.set(belt_row, x, ACCENT);
                }
            }
        }

        for row in (bands.legs_start.max(0)..self.size).rev() {
            let mut any = false;
            for x in 0..self.half {
                if self.grid.get(row, x) == PRIMARY {
                    any = true;
                    self.grid.set(row, x, ACCENT);
                }
            }
            if any {
                break;
            }
        }
    }
}

/// Build the mirrored label grid for `seed`. Returns `size × size` labels,
/// row-major, together with the palette to colour them with.
fn synthesize(seed: &str, size: i32) -> (Vec<u8>, Palette) {
    let mut stream = RandomByteStream::from_seed(seed);
    let palette = Palette::from_stream(&stream);
    let mut sprite = Sprite::new(size);

    let bands = Bands::sample(&mut stream, size);
    let bases = WidthBases::sample(&mut stream, sprite.half);
    let legs_mode = LegsMode::sample(&mut stream);
    debug!(
        head = bands.head,
        body = bands.body,
        legs = bands.legs,
        ?legs_mode,
        "avatar bands"
    );

    sprite.draw_head(&mut stream, &bands, bases.head);
    sprite.draw_body(&mut stream, &bands, bases.body);
    sprite.draw_legs(&mut stream, &bands, legs_mode, bases.legs);
    sprite.erode(&mut stream);
    sprite.decorate(&mut stream, &bands);

    (sprite.grid.mirror(), palette)
}

/// Generate the avatar for `seed` as an RGBA buffer of
/// `(logical_size * scale)²` pixels, alpha 255.
///
/// # Example
/// ```ignore
/// use mockforge_image::{generate_avatar, AvatarOptions};
///
/// let opts = AvatarOptions { logical_size: 16, scale: 8 };
/// let sprite = generate_avatar("alice", &opts)?;
/// assert_eq!(sprite.width, 128);
/// ```
pub fn generate_avatar(seed: &str, opts: &AvatarOptions) -> Result<PixelBuffer> {
    let size = opts.logical_size;
    if size < 2 || size % 2 != 0 || size > MAX_LOGICAL_SIZE {
        return Err(ImageError::InvalidAvatarSize(size));
    }
    if opts.scale == 0 {
        return Err(ImageError::InvalidScale(opts.scale));
    }
    let px = size.checked_mul(opts.scale).ok_or(ImageError::TooLarge)?;
    let mut buffer = PixelBuffer::new(px, px, PixelLayout::Rgba32)?;

    let (labels, palette) = synthesize(seed, size as i32);
    for (i, &label) in labels.iter().enumerate() {
        if label == BACKGROUND {
            continue;
        }
        let (x, y) = (i % size, i / size);
        let color = palette.color_for(label);
        buffer.fill_rect(x * opts.scale, y * opts.scale, opts.scale, opts.scale, color.to_array());
    }

    debug!(size, scale = opts.scale, "avatar generated");
    Ok(buffer)
}
