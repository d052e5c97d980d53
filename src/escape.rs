// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time kernel.
//!
//! A point `c` on the complex plane belongs to the Mandelbrot set if
//! the orbit of `z ← z² + c`, starting at zero, never leaves the
//! circle of radius two.  We can't iterate forever, so a point that
//! hasn't left after `depth` iterations is treated as inside.
//!
//! Large parts of the set are the main cardioid and the period-2
//! bulb to its left, both of which have closed-form membership
//! tests.  Points there are reported without iterating at all.

use image::Rgba;
use num::Complex;

use crate::palette::{continuous_iteration, INSIDE};
use crate::viewport::ViewportSnapshot;

/// What happened to the orbit of a single point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Orbit {
    /// The point lies in the main cardioid or the period-2 bulb.
    Bulb,
    /// The orbit stayed bounded for the full depth.
    Bounded,
    /// The orbit left the radius-two circle.
    Escaped {
        /// How many iterations it took.
        iterations: usize,
        /// The first orbit value outside the circle.
        z: Complex<f64>,
    },
}

impl Orbit {
    /// The number of iterations spent classifying the point.
    pub fn iterations(&self, depth: usize) -> usize {
        match *self {
            Orbit::Bulb => 0,
            Orbit::Bounded => depth,
            Orbit::Escaped { iterations, .. } => iterations,
        }
    }

    /// Whether the point is considered part of the set.
    pub fn is_inside(&self) -> bool {
        match *self {
            Orbit::Escaped { .. } => false,
            _ => true,
        }
    }
}

/// Closed-form test for the main cardioid and the period-2 bulb.
pub fn in_main_bulbs(c: Complex<f64>) -> bool {
    let (x, y) = (c.re, c.im);
    let q = (x * x - 0.5 * x + 0.0625) + y * y;
    q * (q + (x - 0.25)) < (y * y) / 4.0 || x * x + 2.0 * x + 1.0 + y * y < 0.0625
}

/// Classify `c` by iterating at most `depth` times.
pub fn orbit(c: Complex<f64>, depth: usize) -> Orbit {
    if in_main_bulbs(c) {
        return Orbit::Bulb;
    }

    let mut z: Complex<f64> = Complex { re: 0.0, im: 0.0 };
    let mut sum = 0.0;
    let mut sub = 0.0;
    let mut iterations = 0;
    while sum <= 4.0 && iterations < depth {
        z.im = 2.0 * z.re * z.im + c.im;
        z.re = sub + c.re;
        sum = z.re * z.re + z.im * z.im;
        sub = z.re * z.re - z.im * z.im;
        iterations += 1;
    }

    if iterations == depth {
        Orbit::Bounded
    } else {
        Orbit::Escaped { iterations, z }
    }
}

/// Compute the color of pixel (x, y) in a `width` × `height` frame.
pub fn pixel(width: u32, height: u32, x: u32, y: u32, view: &ViewportSnapshot) -> Rgba<u8> {
    let c = view.pixel_to_point(width, height, x, y);
    match orbit(c, view.depth) {
        Orbit::Escaped { iterations, z } => view
            .palette
            .color(continuous_iteration(iterations, z.norm_sqr())),
        _ => INSIDE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_is_inside_at_any_depth() {
        for depth in &[1, 2, 10, 500, 10_000] {
            let o = orbit(Complex::new(0.0, 0.0), *depth);
            assert!(o.is_inside());
            assert_eq!(o.iterations(*depth), 0);
        }
    }

    #[test]
    fn far_point_escapes_on_first_iteration() {
        for depth in &[2, 3, 500] {
            match orbit(Complex::new(2.0, 2.0), *depth) {
                Orbit::Escaped { iterations, z } => {
                    assert_eq!(iterations, 1);
                    assert_eq!(z, Complex::new(2.0, 2.0));
                }
                o => panic!("expected escape, got {:?}", o),
            }
        }
    }

    #[test]
    fn bulb_points_skip_iteration() {
        let points = [
            Complex::new(0.0, 0.0),
            Complex::new(-0.1, 0.1),
            Complex::new(0.2, 0.0),
            Complex::new(-1.0, 0.0),
            Complex::new(-1.1, 0.1),
        ];
        for p in points.iter() {
            assert!(in_main_bulbs(*p), "{:?} should be in a bulb", p);
            assert_eq!(orbit(*p, 500), Orbit::Bulb);
        }
    }

    #[test]
    fn points_outside_bulbs_iterate() {
        // -1.75 lies on the real axis inside the set, but outside the
        // cardioid and the period-2 bulb.
        let c = Complex::new(-1.75, 0.0);
        assert!(!in_main_bulbs(c));
        assert_eq!(orbit(c, 300), Orbit::Bounded);
        assert_eq!(orbit(c, 300).iterations(300), 300);
    }

    #[test]
    fn depth_caps_iterations() {
        // Just outside the cardioid cusp; escapes slowly.
        let c = Complex::new(0.26, 0.0);
        assert_eq!(orbit(c, 5), Orbit::Bounded);
        match orbit(c, 10_000) {
            Orbit::Escaped { iterations, .. } => assert!(iterations > 5),
            o => panic!("expected escape, got {:?}", o),
        }
    }

    #[test]
    fn inside_pixels_are_black() {
        let view = ViewportSnapshot::default();
        assert_eq!(pixel(100, 100, 50, 50, &view), INSIDE);
    }

    #[test]
    fn escaped_pixels_are_colored() {
        let view = ViewportSnapshot::default();
        // The top-left corner of the default view is (-2.25, -1.2).
        let p = pixel(100, 100, 0, 0, &view);
        assert_eq!(p.0[3], 255);
        assert_ne!(p, INSIDE);
    }
}
