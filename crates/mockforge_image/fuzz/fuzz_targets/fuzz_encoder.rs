#![no_main]

use libfuzzer_sys::fuzz_target;
use mockforge_image::{encode_bmp, encode_png};
use arbitrary::Arbitrary;

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    width: u8,
    height: u8,
    pixels: Vec<u8>,
}

fuzz_target!(|input: FuzzInput| {
    let width = input.width as usize;
    let height = input.height as usize;

    // Any length, including mismatched ones, must give Ok or Err, never panic
    let bmp = encode_bmp(&input.pixels, width, height);
    let png = encode_png(&input.pixels, width, height);

    if let Ok(bmp) = bmp {
        let declared = u32::from_le_bytes([bmp[2], bmp[3], bmp[4], bmp[5]]) as usize;
        assert_eq!(declared, bmp.len());
    }
    if let Ok(png) = png {
        assert_eq!(&png[png.len() - 8..png.len() - 4], b"IEND");
    }
});
