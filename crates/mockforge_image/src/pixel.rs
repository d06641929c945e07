//! Row-major pixel storage shared by the generators and encoders.

use crate::{check_dimensions, ImageError, Result};

/// Channel order of a [`PixelBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelLayout {
    /// 3 bytes per pixel in B, G, R order (what BMP stores on disk)
    Bgr24,
    /// 4 bytes per pixel in R, G, B, A order (what PNG colour type 6 stores)
    Rgba32,
}

impl PixelLayout {
    /// Number of bytes per pixel.
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            PixelLayout::Bgr24 => 3,
            PixelLayout::Rgba32 => 4,
        }
    }
}

/// A contiguous `height × width` grid of pixels, rows top to bottom.
///
/// Generators create and own the buffer; encoders only read it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Raw pixel bytes, `width * layout.channels()` bytes per row
    pub pixels: Vec<u8>,
    /// Image width in pixels
    pub width: usize,
    /// Image height in pixels
    pub height: usize,
    /// Channel layout of `pixels`
    pub layout: PixelLayout,
}

impl PixelBuffer {
    /// Allocate a zero-filled buffer. For [`PixelLayout::Rgba32`] the alpha
    /// channel is set to 255.
    pub fn new(width: usize, height: usize, layout: PixelLayout) -> Result<Self> {
        check_dimensions(width, height)?;
        let len = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(layout.channels()))
            .ok_or(ImageError::TooLarge)?;
        let mut pixels = vec![0u8; len];
        if layout == PixelLayout::Rgba32 {
            for px in pixels.chunks_exact_mut(4) {
                px[3] = 255;
            }
        }
        Ok(Self {
            pixels,
            width,
            height,
            layout,
        })
    }

    /// Wrap existing bytes, checking their length against the dimensions.
    pub fn from_raw(
        pixels: Vec<u8>,
        width: usize,
        height: usize,
        layout: PixelLayout,
    ) -> Result<Self> {
        check_dimensions(width, height)?;
        let expected = width * height * layout.channels();
        if pixels.len() != expected {
            return Err(ImageError::BufferSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            pixels,
            width,
            height,
            layout,
        })
    }

    /// Bytes per row (no padding).
    #[inline]
    pub fn row_bytes(&self) -> usize {
        self.width * self.layout.channels()
    }

    /// Bytes of the pixel at `(x, y)`.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> &[u8] {
        let c = self.layout.channels();
        let offset = (y * self.width + x) * c;
        &self.pixels[offset..offset + c]
    }

    /// Fill the rectangle `[x0, x0+w) × [y0, y0+h)` with one colour, clipped
    /// to the canvas. `rgb` is always given in R, G, B order; alpha is 255.
    pub fn fill_rect(&mut self, x0: usize, y0: usize, w: usize, h: usize, rgb: [u8; 3]) {
        let x1 = (x0 + w).min(self.width);
        let y1 = (y0 + h).min(self.height);
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        let px: [u8; 4] = match self.layout {
            PixelLayout::Bgr24 => [rgb[2], rgb[1], rgb[0], 0],
            PixelLayout::Rgba32 => [rgb[0], rgb[1], rgb[2], 255],
        };
        let c = self.layout.channels();
        let row_bytes = self.row_bytes();
        for y in y0..y1 {
            let row = &mut self.pixels[y * row_bytes + x0 * c..y * row_bytes + x1 * c];
            for dst in row.chunks_exact_mut(c) {
                dst.copy_from_slice(&px[..c]);
            }
        }
    }

    /// Consume the buffer and encode it as a 24-bit BMP.
    pub fn into_bmp(self) -> Result<Vec<u8>> {
        if self.layout != PixelLayout::Bgr24 {
            return Err(ImageError::LayoutMismatch {
                expected: PixelLayout::Bgr24,
                actual: self.layout,
            });
        }
        crate::bmp::encode_bmp(&self.pixels, self.width, self.height)
    }

    /// Consume the buffer and encode it as an RGBA PNG.
    pub fn into_png(self) -> Result<Vec<u8>> {
        if self.layout != PixelLayout::Rgba32 {
            return Err(ImageError::LayoutMismatch {
                expected: PixelLayout::Rgba32,
                actual: self.layout,
            });
        }
        crate::png::encode_png(&self.pixels, self.width, self.height)
    }
}
