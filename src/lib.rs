#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot zoomer
//!
//! The Mandelbrot set is the set of points `c` on the complex plane
//! for which `z ← z² + c`, starting at zero, never runs off to
//! infinity.  Points outside the set are colored by how quickly they
//! leave, using a smoothed iteration count so the bands between
//! iteration counts don't show.
//!
//! This crate draws the set for a caller that owns the window.  The
//! caller asks for a frame with `render` whenever it repaints, and
//! hands scroll events to `zoom`, which zooms in or out around the
//! pointer.  Frames are computed on a pool of scoped threads, each
//! owning a vertical band of the image.  New views travel from the
//! zooming side to the rendering side through a single-slot mailbox,
//! so neither side ever blocks the other.
//!
//! ```no_run
//! use mandelzoom::{Fractal, Mandelbrot, ZoomGesture};
//!
//! let mut set = Mandelbrot::new();
//! set.zoom(&ZoomGesture::new(800.0, 600.0, 400.0, 300.0, -1.0));
//! let frame = set.render(800, 600);
//! frame.save("mandelbrot.png").unwrap();
//! ```

extern crate crossbeam;
extern crate image;
extern crate itertools;
extern crate log;
extern crate num;
extern crate num_cpus;

pub mod escape;
pub mod fractal;
pub mod mailbox;
pub mod mandelbrot;
pub mod palette;
pub mod partition;
pub mod render;
pub mod viewport;

pub use fractal::Fractal;
pub use mandelbrot::{Mandelbrot, Zoomer};
pub use palette::Palette;
pub use render::{RenderConfig, RenderMode, Renderer};
pub use viewport::{ViewportSnapshot, ZoomGesture};
