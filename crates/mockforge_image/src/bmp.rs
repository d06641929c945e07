//! Uncompressed 24-bit BMP encoder.
//!
//! Layout: 14-byte `BITMAPFILEHEADER`, 40-byte `BITMAPINFOHEADER`, then pixel
//! rows bottom-to-top, each padded to a multiple of four bytes. All header
//! fields are little-endian.

use crate::{check_dimensions, ImageError, Result};
use tracing::debug;

const FILE_HEADER_SIZE: u32 = 14;
const INFO_HEADER_SIZE: u32 = 40;
/// Offset of the first pixel row from the start of the file.
pub const PIXEL_DATA_OFFSET: u32 = FILE_HEADER_SIZE + INFO_HEADER_SIZE;
const BYTES_PER_PIXEL: usize = 3;

/// Row length in bytes including padding to the next 4-byte boundary.
#[inline]
pub fn row_stride(width: usize) -> usize {
    (width * BYTES_PER_PIXEL).div_ceil(4) * 4
}

/// Encode BGR pixel data (3 bytes per pixel, rows top to bottom) as a BMP file.
///
/// # Arguments
/// * `bgr` - Raw pixel data in B, G, R order
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
#[must_use = "this returns the encoded BMP bytes"]
pub fn encode_bmp(bgr: &[u8], width: usize, height: usize) -> Result<Vec<u8>> {
    check_dimensions(width, height)?;
    let row_bytes = width * BYTES_PER_PIXEL;
    let expected = row_bytes * height;
    if bgr.len() != expected {
        return Err(ImageError::BufferSizeMismatch {
            expected,
            actual: bgr.len(),
        });
    }

    let stride = row_stride(width);
    let pixel_data_size = u32::try_from(stride * height).map_err(|_| ImageError::TooLarge)?;
    let file_size = pixel_data_size
        .checked_add(PIXEL_DATA_OFFSET)
        .ok_or(ImageError::TooLarge)?;

    let mut out = Vec::with_capacity(file_size as usize);

    // BITMAPFILEHEADER
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&file_size.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes()); // reserved
    out.extend_from_slice(&0u16.to_le_bytes()); // reserved
    out.extend_from_slice(&PIXEL_DATA_OFFSET.to_le_bytes());

    // BITMAPINFOHEADER
    out.extend_from_slice(&INFO_HEADER_SIZE.to_le_bytes());
    out.extend_from_slice(&(width as i32).to_le_bytes());
    out.extend_from_slice(&(height as i32).to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // planes
    out.extend_from_slice(&((BYTES_PER_PIXEL * 8) as u16).to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // BI_RGB
    out.extend_from_slice(&pixel_data_size.to_le_bytes());
    out.extend_from_slice(&0i32.to_le_bytes()); // x pixels per metre
    out.extend_from_slice(&0i32.to_le_bytes()); // y pixels per metre
    out.extend_from_slice(&0u32.to_le_bytes()); // colours used
    out.extend_from_slice(&0u32.to_le_bytes()); // important colours

    let padding = [0u8; 3];
    let pad = stride - row_bytes;
    for row in bgr.chunks_exact(row_bytes).rev() {
        out.extend_from_slice(row);
        out.extend_from_slice(&padding[..pad]);
    }

    debug!(width, height, bytes = out.len(), "encoded bmp");
    Ok(out)
}
