#![no_main]

use libfuzzer_sys::fuzz_target;
use mockforge_image::{generate_avatar, AvatarOptions};
use arbitrary::Arbitrary;

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    seed: String,
    half_size: u8,
    scale: u8,
}

fuzz_target!(|input: FuzzInput| {
    let opts = AvatarOptions {
        logical_size: (input.half_size as usize % 32 + 1) * 2,
        scale: (input.scale as usize % 4) + 1,
    };

    let sprite = generate_avatar(&input.seed, &opts).expect("valid options must generate");

    let w = sprite.width;
    for y in 0..sprite.height {
        for x in 0..w / 2 {
            assert_eq!(sprite.pixel(x, y), sprite.pixel(w - 1 - x, y));
        }
    }
});
