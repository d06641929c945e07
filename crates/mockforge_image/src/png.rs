//! Minimal RGBA PNG encoder.
//!
//! Emits the signature followed by exactly three chunks: `IHDR` (8-bit RGBA,
//! no interlace), a single `IDAT` holding the zlib stream of filter-0
//! scanlines, and an empty `IEND`.

use crate::crc32::Crc32;
use crate::{check_dimensions, ImageError, Result};
use tracing::debug;

/// The 8-byte PNG file signature.
pub const SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

const BIT_DEPTH: u8 = 8;
const COLOR_TYPE_RGBA: u8 = 6;
const FILTER_NONE: u8 = 0;
/// zlib effort for the IDAT payload (fastest non-stored level).
const COMPRESSION_LEVEL: u8 = 1;

/// Append one chunk: length, type, payload, CRC over type + payload.
fn write_chunk(out: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) -> Result<()> {
    let len = u32::try_from(data.len()).map_err(|_| ImageError::TooLarge)?;
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(chunk_type);
    out.extend_from_slice(data);

    let mut crc = Crc32::new();
    crc.update(chunk_type);
    crc.update(data);
    out.extend_from_slice(&crc.finalize().to_be_bytes());
    Ok(())
}

fn ihdr(width: u32, height: u32) -> [u8; 13] {
    let mut data = [0u8; 13];
    data[0..4].copy_from_slice(&width.to_be_bytes());
    data[4..8].copy_from_slice(&height.to_be_bytes());
    data[8] = BIT_DEPTH;
    data[9] = COLOR_TYPE_RGBA;
    data[10] = 0; // compression: deflate
    data[11] = 0; // filter method
    data[12] = 0; // interlace: none
    data
}

/// Prefix every scanline with filter type 0.
fn filter_none(rgba: &[u8], row_bytes: usize, height: usize) -> Vec<u8> {
    let mut raw = Vec::with_capacity((row_bytes + 1) * height);
    for row in rgba.chunks_exact(row_bytes) {
        raw.push(FILTER_NONE);
        raw.extend_from_slice(row);
    }
    raw
}

/// Encode RGBA pixel data (4 bytes per pixel, rows top to bottom) as a PNG.
///
/// # Arguments
/// * `rgba` - Raw pixel data in R, G, B, A order
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
#[must_use = "this returns the encoded PNG bytes"]
pub fn encode_png(rgba: &[u8], width: usize, height: usize) -> Result<Vec<u8>> {
    check_dimensions(width, height)?;
    let row_bytes = width * 4;
    let expected = row_bytes * height;
    if rgba.len() != expected {
        return Err(ImageError::BufferSizeMismatch {
            expected,
            actual: rgba.len(),
        });
    }

    let raw = filter_none(rgba, row_bytes, height);
    let compressed = miniz_oxide::deflate::compress_to_vec_zlib(&raw, COMPRESSION_LEVEL);

    let mut out = Vec::with_capacity(SIGNATURE.len() + compressed.len() + 3 * 12 + 13);
    out.extend_from_slice(&SIGNATURE);
    write_chunk(&mut out, b"IHDR", &ihdr(width as u32, height as u32))?;
    write_chunk(&mut out, b"IDAT", &compressed)?;
    write_chunk(&mut out, b"IEND", &[])?;

    debug!(
        width,
        height,
        raw = raw.len(),
        compressed = compressed.len(),
        "encoded png"
    );
    Ok(out)
}
