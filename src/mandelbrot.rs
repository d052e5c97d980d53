// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The Mandelbrot set, as a `Fractal`.
//!
//! A `Mandelbrot` is a `Zoomer` and a `Renderer` that share a
//! mailbox.  The zoomer keeps the authoritative view and publishes a
//! copy every time it changes; the renderer picks up the latest copy
//! at the start of each frame.  When events and repaints arrive on
//! different threads, `split` hands the two halves out separately.

use image::RgbaImage;
use log::debug;
use std::sync::Arc;

use crate::fractal::Fractal;
use crate::mailbox::Mailbox;
use crate::render::{RenderConfig, RenderMode, Renderer};
use crate::viewport::{ViewportSnapshot, ZoomGesture};

/// The producing side of the view handoff.
pub struct Zoomer {
    view: ViewportSnapshot,
    mailbox: Arc<Mailbox<ViewportSnapshot>>,
}

impl Zoomer {
    /// A zoomer starting at `view`, publishing into `mailbox`.
    pub fn new(view: ViewportSnapshot, mailbox: Arc<Mailbox<ViewportSnapshot>>) -> Self {
        Zoomer { view, mailbox }
    }

    /// The most recently published view.
    pub fn view(&self) -> &ViewportSnapshot {
        &self.view
    }

    /// Apply `gesture` and publish the resulting view.  Never waits
    /// on the renderer.
    pub fn zoom(&mut self, gesture: &ZoomGesture) -> ViewportSnapshot {
        self.view = self.view.zoomed(gesture);
        debug!(
            "zoomed to ({}, {}) extent {}x{}",
            self.view.center_x, self.view.center_y, self.view.half_width, self.view.half_height
        );
        if self.mailbox.publish(self.view) {
            debug!("replaced a view the renderer never saw");
        }
        self.view
    }
}

/// The Mandelbrot set.
pub struct Mandelbrot {
    zoomer: Zoomer,
    renderer: Renderer,
}

impl Default for Mandelbrot {
    fn default() -> Self {
        Self::new()
    }
}

impl Mandelbrot {
    /// The classic view of the whole set, rendered in parallel.
    pub fn new() -> Self {
        Self::with_view(ViewportSnapshot::default(), RenderConfig::default())
    }

    /// Start from a custom view and render configuration.
    pub fn with_view(view: ViewportSnapshot, config: RenderConfig) -> Self {
        let mailbox = Arc::new(Mailbox::new());
        Mandelbrot {
            zoomer: Zoomer::new(view, mailbox.clone()),
            renderer: Renderer::new(view, mailbox, config),
        }
    }

    /// The latest view, including zooms not yet rendered.
    pub fn view(&self) -> &ViewportSnapshot {
        self.zoomer.view()
    }

    /// Switch between the sequential and parallel render paths.
    pub fn set_mode(&mut self, mode: RenderMode) {
        self.renderer.set_mode(mode);
    }

    /// Separate the zooming and rendering halves so they can be
    /// driven from different threads.
    pub fn split(self) -> (Zoomer, Renderer) {
        (self.zoomer, self.renderer)
    }
}

impl Fractal for Mandelbrot {
    fn name(&self) -> &str {
        "Mandelbrot set"
    }

    fn render(&mut self, width: u32, height: u32) -> &RgbaImage {
        self.renderer.render(width, height)
    }

    fn zoom(&mut self, gesture: &ZoomGesture) {
        self.zoomer.zoom(gesture);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn zoom_changes_the_next_frame() {
        let mut m = Mandelbrot::new();
        let before = m.render(60, 40).clone();
        m.zoom(&ZoomGesture::new(60.0, 40.0, 10.0, 10.0, -1.0));
        assert_ne!(before.as_raw(), m.render(60, 40).as_raw());
    }

    #[test]
    fn only_the_latest_zoom_is_rendered() {
        let mut m = Mandelbrot::new();
        let g = ZoomGesture::new(60.0, 40.0, 12.0, 30.0, -1.0);
        m.zoom(&g);
        m.zoom(&g);
        m.zoom(&g);
        let latest = *m.view();
        let (_, mut renderer) = m.split();
        renderer.render(6, 4);
        assert_eq!(*renderer.view(), latest);
    }

    #[test]
    fn zoom_then_unzoom_at_same_point_is_close_to_start() {
        let mut m = Mandelbrot::new();
        m.zoom(&ZoomGesture::new(100.0, 100.0, 30.0, 70.0, -1.0));
        m.zoom(&ZoomGesture::new(100.0, 100.0, 30.0, 70.0, 1.0));
        // 1/1.1 then 1/0.9 is not quite the identity.
        let v = m.view();
        assert!((v.half_width - 1.5 / 1.1 / 0.9).abs() < 1e-12);
    }

    #[test]
    fn halves_work_across_threads() {
        let (mut zoomer, mut renderer) = Mandelbrot::new().split();
        let events = thread::spawn(move || {
            for i in 0..20 {
                zoomer.zoom(&ZoomGesture::new(32.0, 32.0, i as f64, 16.0, -1.0));
            }
            *zoomer.view()
        });
        for _ in 0..5 {
            renderer.render(32, 32);
        }
        let last = events.join().unwrap();
        renderer.render(32, 32);
        assert_eq!(*renderer.view(), last);
    }

    #[test]
    fn has_a_name() {
        assert_eq!(Mandelbrot::new().name(), "Mandelbrot set");
    }
}
