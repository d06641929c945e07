//! Random sources: the caller-supplied [`Randomizer`] and the seed-derived
//! [`RandomByteStream`] that makes avatars deterministic.

use rand::{Rng, RngCore};
use sha2::{Digest, Sha256};
use std::f64::consts::PI;

/// Uniform random source consumed by the tile generators.
///
/// Implemented for every [`rand::RngCore`], so `StdRng`, `thread_rng()` and
/// friends can be passed directly. Callers bind one instance per call path.
pub trait Randomizer {
    /// Uniform integer in the half-open range `[min, max)`.
    /// Returns `min` when the range is empty.
    fn next_int(&mut self, min: i32, max: i32) -> i32;

    /// Uniform double in `[0, 1)`.
    fn next_double(&mut self) -> f64;
}

impl<R: RngCore> Randomizer for R {
    #[inline]
    fn next_int(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        self.gen_range(min..max)
    }

    #[inline]
    fn next_double(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

const DIGEST_LEN: usize = 32;

/// SHA-256 digest of a seed string, read circularly.
///
/// Every derived value depends on the cursor position left by the previous
/// draw, so draw order is part of the output format.
#[derive(Debug, Clone)]
pub struct RandomByteStream {
    bytes: [u8; DIGEST_LEN],
    cursor: usize,
}

impl RandomByteStream {
    /// Hash `seed` (UTF-8) and position the cursor at offset 0.
    pub fn from_seed(seed: &str) -> Self {
        let digest = Sha256::digest(seed.as_bytes());
        let mut bytes = [0u8; DIGEST_LEN];
        bytes.copy_from_slice(&digest);
        Self { bytes, cursor: 0 }
    }

    /// Raw digest byte at `index`, without moving the cursor.
    #[inline]
    pub fn peek(&self, index: usize) -> u8 {
        self.bytes[index % DIGEST_LEN]
    }

    /// Next byte; wraps to offset 0 after the last one.
    #[inline]
    pub fn next_byte(&mut self) -> u8 {
        if self.cursor >= DIGEST_LEN {
            self.cursor = 0;
        }
        let b = self.bytes[self.cursor];
        self.cursor += 1;
        b
    }

    /// `byte % max`, or 0 without consuming a byte when `max <= 0`.
    #[inline]
    pub fn next_int(&mut self, max: i32) -> i32 {
        if max <= 0 {
            return 0;
        }
        i32::from(self.next_byte()) % max
    }

    /// Two bytes big-endian, scaled to `[0, 1]`.
    #[inline]
    pub fn next_uniform(&mut self) -> f64 {
        let hi = u32::from(self.next_byte());
        let lo = u32::from(self.next_byte());
        f64::from((hi << 8) | lo) / 65535.0
    }

    /// Box-Muller: `u1` is drawn before `u2`.
    pub fn next_gaussian(&mut self, mean: f64, std: f64) -> f64 {
        let mut u1 = self.next_uniform();
        if u1 <= 0.0 {
            u1 = 1e-6;
        }
        let u2 = self.next_uniform();
        let r = (-2.0 * u1.ln()).sqrt();
        let theta = 2.0 * PI * u2;
        mean + std * (r * theta.cos())
    }
}
