// Copyright 2025 the Cropzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for painting the crop overlay.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use cropzoom_overlay::{ClipOverlay, ClipType, PixmapCanvas, RecordingCanvas};
use kurbo::Size;

fn overlay(clip_type: ClipType, size: Size) -> ClipOverlay {
    let mut o = ClipOverlay::new(clip_type);
    o.set_size(size);
    o.set_horizontal_padding(24.0);
    o
}

fn bench_paint(c: &mut Criterion) {
    let mut g = c.benchmark_group("overlay_paint");
    for (name, clip_type) in [("circle", ClipType::Circle), ("rectangle", ClipType::Rectangle)] {
        let o = overlay(clip_type, Size::new(540.0, 960.0));
        g.bench_with_input(BenchmarkId::new("recording", name), &o, |b, o| {
            b.iter(|| {
                let mut canvas = RecordingCanvas::new();
                o.paint(&mut canvas);
                black_box(canvas.events().len())
            });
        });
        g.bench_with_input(BenchmarkId::new("pixmap", name), &o, |b, o| {
            b.iter(|| {
                let Some(mut canvas) = PixmapCanvas::new(540, 960) else {
                    return;
                };
                o.paint(&mut canvas);
                black_box(canvas.pixel(270, 480));
            });
        });
    }
    g.finish();
}

criterion_group!(benches, bench_paint);
criterion_main!(benches);
