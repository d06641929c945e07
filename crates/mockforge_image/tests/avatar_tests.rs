use mockforge_image::*;
use pretty_assertions::assert_eq;

fn opts(logical_size: usize, scale: usize) -> AvatarOptions {
    AvatarOptions {
        logical_size,
        scale,
    }
}

#[test]
fn test_same_seed_same_bytes() {
    let a = generate_avatar("alice", &opts(16, 8)).unwrap().into_png().unwrap();
    let b = generate_avatar("alice", &opts(16, 8)).unwrap().into_png().unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_different_seeds_differ() {
    let alice = generate_avatar("alice", &opts(16, 8)).unwrap();
    let bob = generate_avatar("bob", &opts(16, 8)).unwrap();
    assert_ne!(alice.pixels, bob.pixels);
}

#[test]
fn test_mirror_symmetry() {
    for seed in ["alice", "bob", "carol", "", "ünïcødé", "a much longer seed string"] {
        for (size, scale) in [(8, 8), (16, 4), (32, 1), (10, 3)] {
            let sprite = generate_avatar(seed, &opts(size, scale)).unwrap();
            let w = sprite.width;
            for y in 0..sprite.height {
                for x in 0..w / 2 {
                    assert_eq!(
                        sprite.pixel(x, y),
                        sprite.pixel(w - 1 - x, y),
                        "seed {seed:?} size {size}: ({x}, {y})"
                    );
                }
            }
        }
    }
}

#[test]
fn test_scale_is_nearest_neighbour() {
    let one = generate_avatar("scaled", &opts(16, 1)).unwrap();
    let five = generate_avatar("scaled", &opts(16, 5)).unwrap();
    assert_eq!((five.width, five.height), (80, 80));
    for y in 0..80 {
        for x in 0..80 {
            assert_eq!(five.pixel(x, y), one.pixel(x / 5, y / 5));
        }
    }
}

#[test]
fn test_only_palette_colours() {
    let sprite = generate_avatar("palette", &opts(16, 1)).unwrap();
    let stream = RandomByteStream::from_seed("palette");
    let palette = Palette::from_stream(&stream);
    let allowed: Vec<[u8; 4]> = [Rgb::BLACK, palette.primary, palette.secondary, palette.accent]
        .iter()
        .map(|c| [c.r, c.g, c.b, 255])
        .collect();

    for px in sprite.pixels.chunks_exact(4) {
        assert!(allowed.iter().any(|a| a == px), "unexpected colour {px:?}");
    }
    assert!(
        sprite.pixels.chunks_exact(4).any(|px| px[..3] != [0, 0, 0]),
        "sprite should not be empty"
    );
}

#[test]
fn test_provider_avatar_ignores_randomizer() {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    let a = ImageProvider::new(StdRng::seed_from_u64(1))
        .avatar_png("seed", &AvatarOptions::default())
        .unwrap();
    let b = ImageProvider::new(StdRng::seed_from_u64(2))
        .avatar_png("seed", &AvatarOptions::default())
        .unwrap();
    assert_eq!(a.bytes, b.bytes);
    assert_eq!(a.format.mime_type(), "image/png");
}

/// Expand a label map (`.` background, `1` primary, `2` secondary, `3` accent)
/// into the RGBA pixels `generate_avatar` draws at scale 1.
fn render_labels(seed: &str, rows: &[&str]) -> Vec<u8> {
    let palette = Palette::from_stream(&RandomByteStream::from_seed(seed));
    rows.iter()
        .flat_map(|row| row.bytes())
        .flat_map(|cell| {
            let label = if cell == b'.' { 0 } else { cell - b'0' };
            let Rgb { r, g, b } = palette.color_for(label);
            [r, g, b, 255]
        })
        .collect()
}

#[test]
fn test_alice_sprite_is_stable() {
    // Two-leg sprite: head 7, body 7, legs 2.
    let expected = render_labels(
        "alice",
        &[
            "......1111......",
            "......1111......",
            "......3333......",
            "......1111......",
            "......1..1......",
            "......1111......",
            ".......11.......",
            "...1111..1111...",
            "..111112211111..",
            ".....112211.....",
            ".....332233.....",
            ".....112211.....",
            ".....112211.....",
            ".....112211.....",
            "....3.3..3.3....",
            "................",
        ],
    );
    let sprite = generate_avatar("alice", &opts(16, 1)).unwrap();
    assert_eq!(sprite.pixels, expected);
}

#[test]
fn test_floating_sprite_is_stable() {
    // No legs drawn: the rows below the body stay empty and no shoes are set.
    let expected = render_labels(
        "erin",
        &[
            ".......11.......",
            ".......11.......",
            "......1111......",
            ".....113311.....",
            "......1111......",
            "..11111..11111..",
            "...1111221111...",
            "....1.1221.1....",
            "....11122111....",
            "....1.3..3.1....",
            "....1.1221.1....",
            "....11122111....",
            ".....112211.....",
            "................",
            "................",
            "................",
        ],
    );
    let sprite = generate_avatar("erin", &opts(16, 1)).unwrap();
    assert_eq!(sprite.pixels, expected);
}
