// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Sinusoidal coloring of escape velocities.
//!
//! Each channel is a sine wave over the continuous iteration count,
//! with its own phase and frequency.  Points that never escape are
//! painted with `INSIDE`.

use image::Rgba;
use std::f64::consts::LN_2;

/// The color of points inside the set: opaque black.
pub const INSIDE: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Per-channel phases and frequencies, in RGB order.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Palette {
    /// Phase offset of each channel's sine wave.
    pub phase: [f64; 3],
    /// Frequency of each channel's sine wave.
    pub frequency: [f64; 3],
}

/// The palette used when nothing else is asked for.
pub const DEFAULT_PALETTE: Palette = Palette {
    phase: [4.0, 2.0, 1.0],
    frequency: [0.15, 0.15, 0.10],
};

impl Default for Palette {
    fn default() -> Self {
        DEFAULT_PALETTE
    }
}

impl Palette {
    /// Map a continuous iteration count to an opaque color.
    pub fn color(&self, n: f64) -> Rgba<u8> {
        let channel = |i: usize| ((n * self.frequency[i] + self.phase[i]).sin() * 127.0 + 128.0) as u8;
        Rgba([channel(0), channel(1), channel(2), 255])
    }
}

/// Smooths the discrete escape count using the magnitude of the
/// final orbit value, so neighbouring iteration bands blend into
/// one another.  `norm_sqr` is |z|² at the moment of escape.
pub fn continuous_iteration(iterations: usize, norm_sqr: f64) -> f64 {
    let modulus = norm_sqr.sqrt();
    iterations as f64 + 1.0 - ((modulus.ln() / 2.0) / LN_2).ln() / LN_2
}
