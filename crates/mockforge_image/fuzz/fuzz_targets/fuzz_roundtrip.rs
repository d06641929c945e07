#![no_main]

use libfuzzer_sys::fuzz_target;
use mockforge_image::encode_png;
use arbitrary::Arbitrary;

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    width: u8,
    height: u8,
    pixels: Vec<u8>,
}

fuzz_target!(|input: FuzzInput| {
    let width = (input.width as usize).max(1).min(64);
    let height = (input.height as usize).max(1).min(64);

    // RGBA = 4 bytes per pixel
    let expected_size = width * height * 4;
    if input.pixels.len() < expected_size {
        return;
    }
    let pixels = &input.pixels[..expected_size];

    let png = encode_png(pixels, width, height).expect("valid input must encode");

    // signature(8) + IHDR(25), then the IDAT chunk
    let idat_len = u32::from_be_bytes([png[33], png[34], png[35], png[36]]) as usize;
    let raw = miniz_oxide::inflate::decompress_to_vec_zlib(&png[41..41 + idat_len])
        .expect("IDAT must inflate");

    let row = width * 4;
    assert_eq!(raw.len(), height * (row + 1));
    for (y, line) in raw.chunks_exact(row + 1).enumerate() {
        assert_eq!(line[0], 0, "filter byte");
        assert_eq!(&line[1..], &pixels[y * row..(y + 1) * row]);
    }
});
