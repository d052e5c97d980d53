// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

#[macro_use]
extern crate criterion;
extern crate mandelzoom;

use criterion::Criterion;
use mandelzoom::{Fractal, Mandelbrot, RenderConfig, RenderMode, ViewportSnapshot};

fn set(mode: RenderMode) -> Mandelbrot {
    let config = RenderConfig {
        mode,
        ..RenderConfig::default()
    };
    Mandelbrot::with_view(ViewportSnapshot::default(), config)
}

fn sequential(c: &mut Criterion) {
    let mut m = set(RenderMode::Sequential);
    c.bench_function("sequential 320x240", move |b| b.iter(|| m.render(320, 240).len()));
}

fn parallel(c: &mut Criterion) {
    let mut m = set(RenderMode::Parallel);
    c.bench_function("parallel 320x240", move |b| b.iter(|| m.render(320, 240).len()));
}

criterion_group!(benches, sequential, parallel);
criterion_main!(benches);
