// Copyright 2025 the Cropzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for the per-frame transform work: zoom, pan and crop mapping.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use cropzoom_transform::{
    CropRegion, FullView, ImageFrame, Rotation, ViewportBounds, ZoomTransform,
};
use kurbo::{Point, Rect, Size, Vec2};

fn laid_out<V: ViewportBounds>(bounds: V, rotation: Rotation) -> ZoomTransform<V> {
    let mut t = ZoomTransform::new(bounds);
    t.set_view_size(Size::new(1080.0, 1920.0));
    t.set_image(Some(ImageFrame::new(4032, 3024, rotation)), true);
    t
}

fn bench_zoom(c: &mut Criterion) {
    let mut g = c.benchmark_group("zoom_to");
    for rotation in [Rotation::Deg0, Rotation::Deg90] {
        let mut t = laid_out(FullView, rotation);
        g.bench_with_input(
            BenchmarkId::new("full_view", rotation.degrees()),
            &rotation,
            |b, _| {
                let mut i = 0_u32;
                b.iter(|| {
                    i = i.wrapping_add(1);
                    let target = 1.0 + f64::from(i % 64) / 16.0;
                    t.zoom_to(black_box(target), black_box(Point::new(540.0, 960.0)));
                    black_box(t.scale())
                });
            },
        );
    }
    let mut crop = laid_out(
        CropRegion::new(Rect::new(40.0, 420.0, 1040.0, 1420.0)),
        Rotation::Deg0,
    );
    g.bench_function("crop_region", |b| {
        let mut i = 0_u32;
        b.iter(|| {
            i = i.wrapping_add(1);
            let target = 1.0 + f64::from(i % 64) / 16.0;
            crop.zoom_to(black_box(target), black_box(Point::new(540.0, 920.0)));
            black_box(crop.scale())
        });
    });
    g.finish();
}

fn bench_pan(c: &mut Criterion) {
    let mut t = laid_out(FullView, Rotation::Deg0);
    t.zoom_to(3.0, Point::new(540.0, 960.0));
    c.bench_function("pan_and_center", |b| {
        let mut sign = 1.0;
        b.iter(|| {
            sign = -sign;
            black_box(t.pan(black_box(Vec2::new(12.0 * sign, -7.0 * sign))))
        });
    });
}

fn bench_crop_mapping(c: &mut Criterion) {
    let crop_rect = Rect::new(40.0, 420.0, 1040.0, 1420.0);
    let mut t = laid_out(CropRegion::new(crop_rect), Rotation::Deg270);
    t.zoom_to(2.5, Point::new(300.0, 700.0));
    c.bench_function("view_to_image_rect", |b| {
        b.iter(|| black_box(t.view_to_image_rect(black_box(crop_rect))));
    });
}

criterion_group!(benches, bench_zoom, bench_pan, bench_crop_mapping);
criterion_main!(benches);
