// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the ViewportSnapshot, which describes the rectangle of
//! the complex plane currently mapped onto the image, and the zoom
//! transform that derives a new rectangle from a scroll gesture.
//!
//! The rectangle is stored as a center and a pair of half-extents,
//! so the visible region runs from `center - half` to `center + half`
//! on each axis.  Pixel (0, 0) maps to the `center - half` corner.

use log::debug;
use num::Complex;

use crate::palette::Palette;

/// Maximum iterations used when nothing else is asked for.
pub const DEFAULT_DEPTH: usize = 500;

/// Center of the initial view.
pub const DEFAULT_CENTER: (f64, f64) = (-0.75, 0.0);

/// Half-width and half-height of the initial view.
pub const DEFAULT_HALF_EXTENT: (f64, f64) = (1.5, 1.2);

/// Smallest half-extent a zoom may produce.
pub const MIN_HALF_EXTENT: f64 = 1e-300;

/// Largest half-extent a zoom may produce.
pub const MAX_HALF_EXTENT: f64 = 1e300;

/// How much a single scroll step magnifies the view.
pub const ZOOM_IN_STEP: f64 = 1.1;

/// How much a single scroll step in the other direction magnifies
/// the view.  Less than one, so the view shrinks.
pub const ZOOM_OUT_STEP: f64 = 0.9;

/// An immutable description of everything a render needs to know
/// about the view: where it is, how deep to iterate, and how to
/// color the result.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewportSnapshot {
    /// Real part of the center of the view.
    pub center_x: f64,
    /// Imaginary part of the center of the view.
    pub center_y: f64,
    /// Half the width of the view on the complex plane.
    pub half_width: f64,
    /// Half the height of the view on the complex plane.
    pub half_height: f64,
    /// Maximum number of iterations per point.
    pub depth: usize,
    /// Coloring coefficients.
    pub palette: Palette,
    /// Cumulative magnification relative to the initial view.
    pub magnification: f64,
}

impl Default for ViewportSnapshot {
    fn default() -> Self {
        ViewportSnapshot {
            center_x: DEFAULT_CENTER.0,
            center_y: DEFAULT_CENTER.1,
            half_width: DEFAULT_HALF_EXTENT.0,
            half_height: DEFAULT_HALF_EXTENT.1,
            depth: DEFAULT_DEPTH,
            palette: Palette::default(),
            magnification: 1.0,
        }
    }
}

/// A scroll event over the image.  Pointer coordinates are relative
/// to the top-left corner of the widget showing the image.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ZoomGesture {
    /// Width of the widget, in pixels.
    pub viewport_width: f64,
    /// Height of the widget, in pixels.
    pub viewport_height: f64,
    /// Pointer position along the width.
    pub pointer_x: f64,
    /// Pointer position along the height.
    pub pointer_y: f64,
    /// Scroll amount; only the sign matters.
    pub scroll_delta: f64,
}

impl ZoomGesture {
    /// Bundle up the raw values of a scroll event.
    pub fn new(
        viewport_width: f64,
        viewport_height: f64,
        pointer_x: f64,
        pointer_y: f64,
        scroll_delta: f64,
    ) -> Self {
        ZoomGesture {
            viewport_width,
            viewport_height,
            pointer_x,
            pointer_y,
            scroll_delta,
        }
    }
}

fn valid_extent(half: f64) -> bool {
    half.is_finite() && half >= MIN_HALF_EXTENT && half <= MAX_HALF_EXTENT
}

/// Scale one axis of the view by `mult`, keeping `mouse` fixed.
/// Returns the new (center, half).
fn blend_axis(center: f64, half: f64, mouse: f64, mult: f64) -> (f64, f64) {
    let low = (center - half) * mult + mouse * (1.0 - mult);
    let high = (center + half) * mult + mouse * (1.0 - mult);
    let new_half = (high - low) / 2.0;
    (high - new_half, new_half)
}

impl ViewportSnapshot {
    /// Move the view to a new center.
    pub fn with_center(self, center_x: f64, center_y: f64) -> Self {
        ViewportSnapshot {
            center_x,
            center_y,
            ..self
        }
    }

    /// Resize the view.  Extents are clamped into the range a zoom
    /// is allowed to produce.
    pub fn with_extent(self, half_width: f64, half_height: f64) -> Self {
        let clamp = |h: f64| {
            if h.is_nan() {
                MIN_HALF_EXTENT
            } else {
                num::clamp(h, MIN_HALF_EXTENT, MAX_HALF_EXTENT)
            }
        };
        ViewportSnapshot {
            half_width: clamp(half_width),
            half_height: clamp(half_height),
            ..self
        }
    }

    /// Change the iteration depth.  A depth of zero is raised to one.
    pub fn with_depth(self, depth: usize) -> Self {
        ViewportSnapshot {
            depth: depth.max(1),
            ..self
        }
    }

    /// Change the coloring.
    pub fn with_palette(self, palette: Palette) -> Self {
        ViewportSnapshot { palette, ..self }
    }

    /// Given a pixel of a `width` × `height` frame, return the
    /// point on the complex plane it shows.
    pub fn pixel_to_point(&self, width: u32, height: u32, x: u32, y: u32) -> Complex<f64> {
        self.fraction_to_point(x as f64 / width as f64, y as f64 / height as f64)
    }

    /// Like `pixel_to_point`, but for fractional positions in [0, 1].
    pub fn fraction_to_point(&self, fx: f64, fy: f64) -> Complex<f64> {
        Complex::new(
            fx * (self.half_width * 2.0) + self.center_x - self.half_width,
            fy * (self.half_height * 2.0) + self.center_y - self.half_height,
        )
    }

    /// Derive the view that results from `gesture`.  The point under
    /// the pointer stays under the pointer; everything else moves
    /// toward it (zooming in, negative delta) or away from it.
    ///
    /// If the result would collapse or blow up the view, the
    /// snapshot comes back unchanged.
    pub fn zoomed(&self, gesture: &ZoomGesture) -> Self {
        let step = if gesture.scroll_delta < 0.0 {
            ZOOM_IN_STEP
        } else {
            ZOOM_OUT_STEP
        };
        let mult = 1.0 / step;

        let mouse = self.fraction_to_point(
            gesture.pointer_x / gesture.viewport_width,
            gesture.pointer_y / gesture.viewport_height,
        );
        let (center_x, half_width) = blend_axis(self.center_x, self.half_width, mouse.re, mult);
        let (center_y, half_height) = blend_axis(self.center_y, self.half_height, mouse.im, mult);

        if !(valid_extent(half_width)
            && valid_extent(half_height)
            && center_x.is_finite()
            && center_y.is_finite())
        {
            debug!("zoom rejected: extents {}x{} out of range", half_width, half_height);
            return *self;
        }

        ViewportSnapshot {
            center_x,
            center_y,
            half_width,
            half_height,
            magnification: self.magnification * step,
            ..*self
        }
    }
}
