// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The Renderer turns the latest viewport into an image.
//!
//! The image is split into vertical bands, one per worker.  Each
//! worker is handed, for every row, the slice of that row that falls
//! inside its band, so the workers write to disjoint memory and
//! never need to lock anything.  All workers are joined before the
//! image is handed back.

use image::RgbaImage;
use itertools::iproduct;
use log::{debug, warn};
use std::mem;
use std::panic;
use std::sync::Arc;
use std::time::Instant;

use crate::escape::pixel;
use crate::mailbox::Mailbox;
use crate::partition::{partition, PartitionRange};
use crate::viewport::ViewportSnapshot;

/// Workers started per available CPU.
pub const DEFAULT_WORKER_MULTIPLIER: usize = 3;

const CHANNELS: usize = 4;

/// How the pixels of a frame get computed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RenderMode {
    /// One thread, row by row.
    Sequential,
    /// Vertical bands on many threads.
    Parallel,
}

/// Knobs for the Renderer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// Which path to render with.
    pub mode: RenderMode,
    /// Workers per CPU on the parallel path.
    pub worker_multiplier: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            mode: RenderMode::Parallel,
            worker_multiplier: DEFAULT_WORKER_MULTIPLIER,
        }
    }
}

/// Owns the image buffer and the view it was last drawn with.
pub struct Renderer {
    buffer: RgbaImage,
    view: Arc<ViewportSnapshot>,
    mailbox: Arc<Mailbox<ViewportSnapshot>>,
    config: RenderConfig,
}

impl Renderer {
    /// A renderer that starts out drawing `view`, and picks up new
    /// views from `mailbox` as they are published.
    pub fn new(
        view: ViewportSnapshot,
        mailbox: Arc<Mailbox<ViewportSnapshot>>,
        config: RenderConfig,
    ) -> Self {
        Renderer {
            buffer: RgbaImage::new(0, 0),
            view: Arc::new(view),
            mailbox,
            config,
        }
    }

    /// The view used by the most recent render.
    pub fn view(&self) -> &ViewportSnapshot {
        &self.view
    }

    /// The current render path.
    pub fn mode(&self) -> RenderMode {
        self.config.mode
    }

    /// Switch render paths.  Takes effect on the next frame.
    pub fn set_mode(&mut self, mode: RenderMode) {
        self.config.mode = mode;
    }

    /// How many workers the parallel path starts.
    pub fn workers(&self) -> usize {
        num_cpus::get() * self.config.worker_multiplier.max(1)
    }

    /// Draw a `width` × `height` frame of the latest view.  The
    /// buffer is reused between calls of the same size.
    pub fn render(&mut self, width: u32, height: u32) -> &RgbaImage {
        let started = Instant::now();
        if self.buffer.dimensions() != (width, height) {
            debug!("resizing buffer to {}x{}", width, height);
            self.buffer = RgbaImage::new(width, height);
        }

        if let Some(view) = self.mailbox.take() {
            debug!(
                "new view: center ({}, {}), extent {}x{}, magnification {}",
                view.center_x, view.center_y, view.half_width, view.half_height, view.magnification
            );
            self.view = view;
        }

        if width == 0 || height == 0 {
            warn!("asked for an empty {}x{} frame", width, height);
            return &self.buffer;
        }

        match self.config.mode {
            RenderMode::Sequential => render_sequential(&mut self.buffer, &self.view),
            RenderMode::Parallel => {
                let workers = self.workers();
                render_parallel(&mut self.buffer, &self.view, workers)
            }
        }

        debug!(
            "rendered {}x{} ({:?}) in {:?}",
            width,
            height,
            self.config.mode,
            started.elapsed()
        );
        &self.buffer
    }
}

/// Fill `buffer` one pixel at a time, in row-major order.
pub fn render_sequential(buffer: &mut RgbaImage, view: &ViewportSnapshot) {
    let (width, height) = buffer.dimensions();
    for (y, x) in iproduct!(0..height, 0..width) {
        buffer.put_pixel(x, y, pixel(width, height, x, y, view));
    }
}

/// Fill `buffer` using up to `workers` threads, each owning a band
/// of columns.
pub fn render_parallel(buffer: &mut RgbaImage, view: &ViewportSnapshot, workers: usize) {
    let (width, height) = buffer.dimensions();
    if width == 0 || height == 0 {
        return;
    }
    let ranges = partition(workers, width as usize);

    let mut bands: Vec<Vec<&mut [u8]>> = ranges
        .iter()
        .map(|_| Vec::with_capacity(height as usize))
        .collect();
    let raw: &mut [u8] = &mut **buffer;
    for row in raw.chunks_mut(width as usize * CHANNELS) {
        let mut rest = row;
        for (band, range) in bands.iter_mut().zip(&ranges) {
            let (head, tail) = mem::take(&mut rest).split_at_mut(range.len() * CHANNELS);
            band.push(head);
            rest = tail;
        }
    }

    let result = crossbeam::scope(|spawner| {
        for (rows, range) in bands.into_iter().zip(ranges.iter()) {
            spawner.spawn(move |_| render_band(rows, *range, width, height, view));
        }
    });
    if let Err(cause) = result {
        panic::resume_unwind(cause);
    }
}

fn render_band(
    rows: Vec<&mut [u8]>,
    range: PartitionRange,
    width: u32,
    height: u32,
    view: &ViewportSnapshot,
) {
    for (y, row) in rows.into_iter().enumerate() {
        for (x, dest) in range.columns().zip(row.chunks_exact_mut(CHANNELS)) {
            dest.copy_from_slice(&pixel(width, height, x as u32, y as u32, view).0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::INSIDE;
    use crate::viewport::ZoomGesture;

    fn renderer(mode: RenderMode) -> (Renderer, Arc<Mailbox<ViewportSnapshot>>) {
        let mailbox = Arc::new(Mailbox::new());
        let config = RenderConfig {
            mode,
            ..RenderConfig::default()
        };
        let r = Renderer::new(ViewportSnapshot::default(), mailbox.clone(), config);
        (r, mailbox)
    }

    #[test]
    fn sequential_and_parallel_agree() {
        let view = ViewportSnapshot::default().with_depth(200);
        for &(w, h) in &[(1, 1), (7, 3), (64, 48), (101, 37)] {
            let mut a = RgbaImage::new(w, h);
            let mut b = RgbaImage::new(w, h);
            render_sequential(&mut a, &view);
            for workers in &[1, 2, 5, 64] {
                render_parallel(&mut b, &view, *workers);
                assert_eq!(a.as_raw(), b.as_raw(), "{}x{} with {} workers", w, h, workers);
            }
        }
    }

    #[test]
    fn center_pixel_is_inside() {
        let (mut r, _) = renderer(RenderMode::Parallel);
        let img = r.render(100, 100);
        assert_eq!(*img.get_pixel(50, 50), INSIDE);
    }

    #[test]
    fn corner_pixel_has_escaped() {
        let (mut r, _) = renderer(RenderMode::Sequential);
        let img = r.render(100, 100);
        assert_ne!(*img.get_pixel(0, 0), INSIDE);
    }

    #[test]
    fn render_is_idempotent() {
        let (mut r, _) = renderer(RenderMode::Parallel);
        let first = r.render(80, 60).clone();
        let second = r.render(80, 60);
        assert_eq!(first.as_raw(), second.as_raw());
    }

    #[test]
    fn buffer_is_reused_for_same_size() {
        let (mut r, _) = renderer(RenderMode::Parallel);
        let before = r.render(40, 30).as_raw().as_ptr();
        let after = r.render(40, 30).as_raw().as_ptr();
        assert_eq!(before, after);
        assert_eq!(r.render(41, 30).dimensions(), (41, 30));
    }

    #[test]
    fn picks_up_published_view() {
        let (mut r, mailbox) = renderer(RenderMode::Parallel);
        let old = r.render(50, 50).clone();
        let zoomed = r.view().zoomed(&ZoomGesture::new(50.0, 50.0, 5.0, 5.0, -1.0));
        mailbox.publish(zoomed);
        let new = r.render(50, 50);
        assert_ne!(old.as_raw(), new.as_raw());
        assert_eq!(*r.view(), zoomed);
    }

    #[test]
    fn keeps_view_when_nothing_is_pending() {
        let (mut r, _) = renderer(RenderMode::Parallel);
        r.render(10, 10);
        assert_eq!(*r.view(), ViewportSnapshot::default());
    }

    #[test]
    fn empty_frames_do_not_panic() {
        let (mut r, _) = renderer(RenderMode::Parallel);
        assert_eq!(r.render(0, 10).dimensions(), (0, 10));
        assert_eq!(r.render(10, 0).dimensions(), (10, 0));
        r.set_mode(RenderMode::Sequential);
        assert_eq!(r.render(0, 0).dimensions(), (0, 0));
    }

    #[test]
    fn mode_can_be_switched() {
        let (mut r, _) = renderer(RenderMode::Parallel);
        let parallel = r.render(33, 21).clone();
        r.set_mode(RenderMode::Sequential);
        assert_eq!(r.mode(), RenderMode::Sequential);
        assert_eq!(parallel.as_raw(), r.render(33, 21).as_raw());
    }
}
