// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! What a caller showing a fractal needs from it.

use image::RgbaImage;

use crate::viewport::ZoomGesture;

/// A zoomable fractal.  The caller asks for a frame whenever it has
/// to repaint, and forwards scroll events as they come in.
pub trait Fractal {
    /// A human-readable name.
    fn name(&self) -> &str;

    /// Draw a `width` × `height` frame of the current view.  The
    /// returned image is overwritten by the next call.
    fn render(&mut self, width: u32, height: u32) -> &RgbaImage;

    /// Move the view in response to a scroll event.
    fn zoom(&mut self, gesture: &ZoomGesture);
}
