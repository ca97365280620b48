// Copyright 2025 the Cropzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for gesture recognition and fling physics.

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use cropzoom_gesture::{Fling, GestureConfig, GestureRecognizer, PointerEvent, PointerKind};
use kurbo::{Point, Vec2};

/// A one-finger drag followed by a two-finger pinch.
fn script() -> Vec<PointerEvent> {
    let mut events = Vec::new();
    let mut t = 0_u64;
    events.push(PointerEvent::new(PointerKind::Down, 1, Point::new(100.0, 100.0), t));
    for i in 1..=60_u32 {
        t += 8;
        let p = Point::new(100.0 + f64::from(i) * 6.0, 100.0 + f64::from(i) * 2.0);
        events.push(PointerEvent::new(PointerKind::Move, 1, p, t));
    }
    events.push(PointerEvent::new(PointerKind::Up, 1, Point::new(460.0, 220.0), t));

    t += 500;
    events.push(PointerEvent::new(PointerKind::Down, 1, Point::new(400.0, 500.0), t));
    events.push(PointerEvent::new(PointerKind::Down, 2, Point::new(600.0, 500.0), t + 4));
    for i in 1..=60_u32 {
        t += 8;
        let d = f64::from(i) * 3.0;
        events.push(PointerEvent::new(PointerKind::Move, 1, Point::new(400.0 - d, 500.0), t));
        events.push(PointerEvent::new(PointerKind::Move, 2, Point::new(600.0 + d, 500.0), t + 1));
    }
    events.push(PointerEvent::new(PointerKind::Up, 2, Point::new(780.0, 500.0), t + 2));
    events.push(PointerEvent::new(PointerKind::Up, 1, Point::new(220.0, 500.0), t + 3));
    events
}

fn bench_recognizer(c: &mut Criterion) {
    let events = script();
    c.bench_function("recognizer_drag_then_pinch", |b| {
        b.iter_batched(
            GestureRecognizer::default,
            |mut g| {
                let mut produced = 0;
                for e in &events {
                    produced += g.on_pointer(e).len();
                }
                black_box(produced)
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_fling(c: &mut Criterion) {
    let config = GestureConfig::default();
    let bounds = (Point::ORIGIN, Point::new(4000.0, 4000.0));
    c.bench_function("fling_start", |b| {
        b.iter(|| {
            black_box(Fling::start(
                &config,
                Point::ORIGIN,
                black_box(Vec2::new(5200.0, 3100.0)),
                bounds,
                0,
            ))
        });
    });
    c.bench_function("fling_run_to_rest", |b| {
        b.iter(|| {
            let mut fling = Fling::start(&config, Point::ORIGIN, Vec2::new(5200.0, 3100.0), bounds, 0);
            let mut now = 0;
            while fling.compute(now) {
                now += 16;
            }
            black_box(fling.current())
        });
    });
}

criterion_group!(benches, bench_recognizer, bench_fling);
criterion_main!(benches);
