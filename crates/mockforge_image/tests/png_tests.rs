use mockforge_image::crc32::crc32;
use mockforge_image::png::SIGNATURE;
use mockforge_image::*;
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn be_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_be_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

/// Split a PNG into (type, payload, stored crc) triples.
fn chunks(png: &[u8]) -> Vec<([u8; 4], Vec<u8>, u32)> {
    let mut out = Vec::new();
    let mut pos = SIGNATURE.len();
    while pos < png.len() {
        let len = be_u32(png, pos) as usize;
        let mut kind = [0u8; 4];
        kind.copy_from_slice(&png[pos + 4..pos + 8]);
        let payload = png[pos + 8..pos + 8 + len].to_vec();
        let crc = be_u32(png, pos + 8 + len);
        out.push((kind, payload, crc));
        pos += 12 + len;
    }
    out
}

fn decode(png: &[u8]) -> image::RgbaImage {
    image::load_from_memory_with_format(png, image::ImageFormat::Png)
        .expect("PNG should decode")
        .to_rgba8()
}

#[test]
fn test_256x256_signature_and_iend() {
    let mut rng = StdRng::seed_from_u64(256);
    let png = gradient_walk(&mut rng, 256, 256, &GradientOptions::default())
        .unwrap()
        .into_png()
        .unwrap();

    assert_eq!(&png[..8], &SIGNATURE);
    assert_eq!(
        &png[png.len() - 12..],
        &[0, 0, 0, 0, b'I', b'E', b'N', b'D', 0xAE, 0x42, 0x60, 0x82]
    );
}

#[test]
fn test_chunk_order_and_crcs() {
    let rgba = vec![200u8; 5 * 4 * 4];
    let png = encode_png(&rgba, 5, 4).unwrap();
    let chunks = chunks(&png);

    let kinds: Vec<&[u8; 4]> = chunks.iter().map(|(k, _, _)| k).collect();
    assert_eq!(kinds, vec![b"IHDR", b"IDAT", b"IEND"]);

    for (kind, payload, crc) in &chunks {
        let mut covered = kind.to_vec();
        covered.extend_from_slice(payload);
        assert_eq!(*crc, crc32(&covered), "crc of {}", String::from_utf8_lossy(kind));
    }

    let ihdr = &chunks[0].1;
    assert_eq!(ihdr.len(), 13);
    assert_eq!(be_u32(ihdr, 0), 5);
    assert_eq!(be_u32(ihdr, 4), 4);
    assert_eq!(&ihdr[8..], &[8, 6, 0, 0, 0]);
    assert!(chunks[2].1.is_empty());
}

#[test]
fn test_gradient_round_trip() {
    let mut rng = StdRng::seed_from_u64(7);
    let opts = GradientOptions {
        tile_size: 16,
        delta: 40,
    };
    let source = gradient_walk(&mut rng, 70, 33, &opts).unwrap();
    let decoded = decode(&source.clone().into_png().unwrap());

    assert_eq!(decoded.dimensions(), (70, 33));
    assert_eq!(decoded.into_raw(), source.pixels);
}

#[test]
fn test_hue_round_trip() {
    let mut rng = StdRng::seed_from_u64(11);
    let source = hue_drift(&mut rng, 64, 48, &HueDriftOptions::default()).unwrap();
    let decoded = decode(&source.clone().into_png().unwrap());
    assert_eq!(decoded.into_raw(), source.pixels);
}

#[test]
fn test_avatar_round_trip() {
    let opts = AvatarOptions {
        logical_size: 16,
        scale: 8,
    };
    let source = generate_avatar("alice", &opts).unwrap();
    let decoded = decode(&source.clone().into_png().unwrap());
    assert_eq!(decoded.dimensions(), (128, 128));
    assert_eq!(decoded.into_raw(), source.pixels);
}

#[test]
fn test_arbitrary_alpha_survives() {
    let rgba: Vec<u8> = (0..3 * 3 * 4).map(|i| (i * 7) as u8).collect();
    let decoded = decode(&encode_png(&rgba, 3, 3).unwrap());
    assert_eq!(decoded.into_raw(), rgba);
}

#[test]
fn test_invalid_dimensions() {
    assert!(matches!(
        encode_png(&[], 0, 3),
        Err(ImageError::InvalidDimensions {
            width: 0,
            height: 3
        })
    ));
}
