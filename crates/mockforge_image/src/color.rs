//! HSV→RGB conversion and the three-colour avatar palette.

use crate::random::RandomByteStream;

/// An 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// Convert hue (degrees, `[0, 360)`), saturation and value (`[0, 1]`) to RGB
/// using the six 60° sector decomposition. Channels round half to even.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Rgb {
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (rp, gp, bp) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    let scale = |channel: f32| ((channel + m) * 255.0).round_ties_even() as u8;
    Rgb::new(scale(rp), scale(gp), scale(bp))
}

/// Primary, secondary and accent colours of one avatar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub primary: Rgb,
    pub secondary: Rgb,
    pub accent: Rgb,
}

impl Palette {
    /// Derive the palette from the first two digest bytes. The stream cursor
    /// is not moved.
    pub fn from_stream(stream: &RandomByteStream) -> Self {
        let base_hue = (f32::from(stream.peek(0)) / 255.0) * 360.0;
        let offset = if stream.peek(1) & 1 == 0 { -25.0 } else { 25.0 };
        let secondary_hue = (base_hue + offset + 360.0) % 360.0;
        let accent_hue = (base_hue + 180.0) % 360.0;

        Self {
            primary: hsv_to_rgb(base_hue, 0.8, 0.9),
            secondary: hsv_to_rgb(secondary_hue, 0.75, 0.85),
            accent: hsv_to_rgb(accent_hue, 0.9, 0.95),
        }
    }

    /// Colour for a region label: 1 primary, 2 secondary, 3 accent, else black.
    #[inline]
    pub fn color_for(&self, label: u8) -> Rgb {
        match label {
            1 => self.primary,
            2 => self.secondary,
            3 => self.accent,
            _ => Rgb::BLACK,
        }
    }
}
