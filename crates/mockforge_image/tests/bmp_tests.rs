use mockforge_image::*;
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn le_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

#[test]
fn test_1x1_bitmap_size() {
    let bmp = encode_bmp(&[0, 0, 255], 1, 1).unwrap();
    assert_eq!(bmp.len(), 14 + 40 + 4, "one padded row after both headers");
}

#[test]
fn test_header_invariants() {
    for (width, height) in [(1, 1), (2, 3), (3, 1), (4, 4), (17, 5), (256, 2)] {
        let bgr = vec![0x5Au8; width * height * 3];
        let bmp = encode_bmp(&bgr, width, height).unwrap();

        let file_size = le_u32(&bmp, 2) as usize;
        let offset = le_u32(&bmp, 10) as usize;
        let image_size = le_u32(&bmp, 34) as usize;
        let stride = image_size / height;

        assert_eq!(file_size, bmp.len(), "file size field for {width}x{height}");
        assert_eq!(offset, 54);
        assert_eq!(stride % 4, 0, "stride for width {width}");
        assert!(stride >= width * 3);
        assert_eq!(offset + image_size, bmp.len());

        assert_eq!(le_u32(&bmp, 14), 40);
        assert_eq!(le_u32(&bmp, 18) as usize, width);
        assert_eq!(le_u32(&bmp, 22) as usize, height);
        assert_eq!(u16::from_le_bytes([bmp[26], bmp[27]]), 1);
        assert_eq!(u16::from_le_bytes([bmp[28], bmp[29]]), 24);
        assert_eq!(le_u32(&bmp, 30), 0);
        assert!(bmp[38..54].iter().all(|&b| b == 0));
    }
}

#[test]
fn test_reference_decoder_reads_tiles() {
    let mut rng = StdRng::seed_from_u64(0xB1A5);
    let buffer = tiled_random(&mut rng, 37, 21, &TileOptions { tile_size: 8 }).unwrap();
    let source = buffer.clone();
    let bmp = buffer.into_bmp().unwrap();

    let decoded = image::load_from_memory_with_format(&bmp, image::ImageFormat::Bmp)
        .expect("BMP should decode")
        .to_rgb8();
    assert_eq!(decoded.dimensions(), (37, 21));

    for (x, y, px) in decoded.enumerate_pixels() {
        let bgr = source.pixel(x as usize, y as usize);
        assert_eq!(px.0, [bgr[2], bgr[1], bgr[0]], "pixel ({x}, {y})");
    }
}

#[test]
fn test_wrong_layout_rejected() {
    let mut rng = StdRng::seed_from_u64(1);
    let rgba = gradient_walk(&mut rng, 4, 4, &GradientOptions::default()).unwrap();
    assert!(matches!(
        rgba.into_bmp(),
        Err(ImageError::LayoutMismatch {
            expected: PixelLayout::Bgr24,
            actual: PixelLayout::Rgba32
        })
    ));
}

#[test]
fn test_invalid_dimensions() {
    assert!(matches!(
        encode_bmp(&[], 0, 0),
        Err(ImageError::InvalidDimensions {
            width: 0,
            height: 0
        })
    ));
    assert!(encode_bmp(&[0; 3], 1, 0).is_err());
}
