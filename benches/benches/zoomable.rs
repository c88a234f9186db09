// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::{Point, Size, Vec2};
use understory_gesture::PointerEvent;
use understory_zoomable::{ChildSpec, Element, Placement, SizeMode, Zoomable};

#[derive(Clone, Copy, Default)]
struct Sink {
    placed: Option<Placement>,
}

impl Element for Sink {
    fn measure(&self) -> Size {
        Size::new(48.0, 24.0)
    }

    fn apply(&mut self, placement: &Placement) {
        self.placed = Some(*placement);
    }
}

/// A grid of `n` children, alternating fixed, auto, and scaled sizing.
fn build(n: usize) -> Zoomable<Sink> {
    let mut z = Zoomable::new();
    z.resize(Size::new(1280.0, 800.0));
    let cols = (n as f64).sqrt().ceil().max(1.0) as usize;
    for i in 0..n {
        let x = (i % cols) as f64 * 64.0;
        let y = (i / cols) as f64 * 40.0;
        let spec = match i % 3 {
            0 => ChildSpec::at(x, y).with_size(56.0, 32.0),
            1 => ChildSpec::at(x, y),
            _ => ChildSpec::at(x, y).with_size(SizeMode::Scale, SizeMode::Scale),
        };
        z.push_child(spec, Sink::default());
    }
    z.fit();
    z
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("zoomable/layout");
    for n in [16usize, 256, 4_096] {
        group.throughput(Throughput::Elements(n as u64));
        let mut z = build(n);
        group.bench_function(BenchmarkId::new("layout", n), |b| {
            b.iter(|| {
                z.layout();
                black_box(z.children().len());
            });
        });
    }
    group.finish();
}

fn bench_clamp(c: &mut Criterion) {
    let mut group = c.benchmark_group("zoomable/clamp");
    for n in [16usize, 256, 4_096] {
        let base = build(n);
        // Cached bounds: clamp only does arithmetic.
        group.bench_function(BenchmarkId::new("cached", n), |b| {
            let mut z = base.clone();
            b.iter(|| {
                z.pan(Vec2::new(1.0, -1.0));
                black_box(z.transform());
            });
        });
        // Invalidated bounds: every clamp re-measures all children.
        group.bench_function(BenchmarkId::new("remeasure", n), |b| {
            b.iter_batched(
                || {
                    let mut z = base.clone();
                    z.children_changed();
                    z
                },
                |mut z| {
                    z.clamp();
                    black_box(z.transform());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_gestures(c: &mut Criterion) {
    let mut group = c.benchmark_group("zoomable/gesture");
    let base = build(256);

    group.bench_function("drag", |b| {
        b.iter_batched(
            || base.clone(),
            |mut z| {
                z.pointer_event(&PointerEvent::down(1, (400.0, 300.0)));
                for i in 0..64 {
                    let t = f64::from(i);
                    z.pointer_event(&PointerEvent::moved(1, (400.0 + t, 300.0 - t * 0.5)));
                }
                z.pointer_event(&PointerEvent::up(1, (464.0, 268.0)));
                black_box(z.transform());
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("pinch", |b| {
        b.iter_batched(
            || base.clone(),
            |mut z| {
                z.pointer_event(&PointerEvent::down(1, (500.0, 400.0)));
                z.pointer_event(&PointerEvent::down(2, (600.0, 400.0)));
                for i in 0..64 {
                    let t = f64::from(i);
                    z.pointer_event(&PointerEvent::moved(2, (600.0 + t, 400.0 + t * 0.25)));
                }
                z.pointer_event(&PointerEvent::up(2, (664.0, 416.0)));
                z.pointer_event(&PointerEvent::up(1, (500.0, 400.0)));
                black_box(z.transform());
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("wheel", |b| {
        let mut z = base.clone();
        let mut delta = -120.0;
        b.iter(|| {
            z.wheel(Point::new(640.0, 400.0), delta);
            delta = -delta;
            black_box(z.scale());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_layout, bench_clamp, bench_gestures);
criterion_main!(benches);
